//! Fill SVG path from a file and save the result as BMP image
use scanfill::*;
use std::{
    env,
    fs::File,
    io::{BufWriter, Read},
};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

type Error = Box<dyn std::error::Error>;

#[derive(Debug)]
struct Args {
    input_file: String,
    output_file: String,
    width: usize,
    blend_mode: BlendMode,
    fg: Color,
    bg: Option<Color>,
}

impl Args {
    fn parse() -> Result<Args, Error> {
        let mut result = Args {
            input_file: String::new(),
            output_file: String::new(),
            width: 256,
            blend_mode: BlendMode::default(),
            fg: Color::BLACK,
            bg: None,
        };
        let mut positional = 0;
        let mut args = env::args();
        let cmd = args.next().unwrap_or_default();
        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "-h" => {
                    positional = 0;
                    break;
                }
                "-w" => {
                    let width = args.next().ok_or("-w requires argument")?;
                    result.width = width.parse()?;
                }
                "-m" => {
                    let mode = args.next().ok_or("-m requires blend mode argument")?;
                    result.blend_mode = mode.parse()?;
                }
                "-fg" => {
                    let fg = args.next().ok_or("-fg requires color #rrggbb(aa) argument")?;
                    result.fg = fg.parse()?;
                }
                "-bg" => {
                    let bg = args.next().ok_or("-bg requires color #rrggbb(aa) argument")?;
                    result.bg = Some(bg.parse()?);
                }
                _ => {
                    positional += 1;
                    match positional {
                        1 => result.input_file = arg,
                        2 => result.output_file = arg,
                        _ => return Err("unexpected positional argument".into()),
                    }
                }
            }
        }
        if positional < 2 {
            eprintln!("Fill SVG path with non-zero winding rule and save it as BMP image");
            eprintln!("\nUSAGE:");
            eprintln!(
                "    {} [-w <width>] [-m <blend>] [-fg <color>] [-bg <color>] <file.path> <out.bmp>",
                cmd
            );
            eprintln!("\nARGS:");
            eprintln!("    -w <width>         width in pixels of the output image (default: 256)");
            eprintln!("    -m <blend>         blend mode used to fill the path (default: src-over)");
            eprintln!("    -fg <color>        foreground color");
            eprintln!("    -bg <color>        background color");
            eprintln!("    <file.path>        file containing SVG path ('-' means stdin)");
            eprintln!("    <out.bmp>          image rendered in the BMP format ('-' means stdout)");
            std::process::exit(1);
        }
        Ok(result)
    }
}

fn path_load(path: &str) -> Result<Path, Error> {
    let mut contents = String::new();
    if path != "-" {
        File::open(path)?.read_to_string(&mut contents)?;
    } else {
        std::io::stdin().read_to_string(&mut contents)?;
    }
    Ok(tracing::debug_span!("[parse]").in_scope(|| contents.parse())?)
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse()?;
    let path = path_load(&args.input_file)?;
    tracing::debug!("[path:points_count] {}", path.count_points());

    // fit path bounds into the image width leaving one pixel margin
    let bounds = path.bounds().ok_or("path is empty")?;
    if args.width < 3 || bounds.width() < EPSILON {
        return Err("nothing to render".into());
    }
    let scale = (args.width - 2) as Scalar / bounds.width();
    let height = (bounds.height() * scale).ceil() as usize + 2;
    let ctm = Transform::new_translate(1.0, 1.0)
        .scale(scale, scale)
        .translate(-bounds.left(), -bounds.top());

    let mut canvas = Canvas::new(Bitmap::new_default(Size {
        width: args.width,
        height,
    }));
    tracing::debug_span!("[render]", blend_mode = %args.blend_mode).in_scope(|| {
        if let Some(bg) = args.bg {
            canvas.fill_paint(&mut Paint::new(bg));
        }
        canvas.set_transform(ctm);
        let mut paint = Paint::new(args.fg).with_blend_mode(args.blend_mode);
        canvas.fill_path(&path, &mut paint);
    });
    let image = canvas.into_image();

    let _save = tracing::debug_span!("[save]").entered();
    if args.output_file != "-" {
        let mut image_file = BufWriter::new(File::create(&args.output_file)?);
        image.write_bmp(&mut image_file)?;
    } else {
        image.write_bmp(std::io::stdout())?;
    }

    Ok(())
}
