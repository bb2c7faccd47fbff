//! Render scene from JSON serialized representation
//!
//! ```json
//! {
//!   "width": 64, "height": 64, "background": "#ffffff",
//!   "layers": [
//!     {"type": "path", "path": "M8,8 H56 V56 Z", "color": "#ff000080"},
//!     {"type": "rect", "ltrb": [16, 16, 48, 48], "color": "#000000", "blend-mode": "dst-out"},
//!     {"type": "linear", "ltrb": [0, 0, 64, 8], "p0": [0, 0], "p1": [16, 0],
//!      "colors": ["#ff0000", "#0000ff"], "tile": "mirror"}
//!   ]
//! }
//! ```
use scanfill::*;
use serde::Deserialize;
use std::{
    fs::File,
    io::{BufReader, BufWriter},
};

type Error = Box<dyn std::error::Error>;

#[derive(Debug, Deserialize)]
struct Scene {
    width: usize,
    height: usize,
    #[serde(default)]
    background: Option<String>,
    #[serde(default)]
    transform: Option<Transform>,
    layers: Vec<Layer>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum Layer {
    Rect {
        ltrb: [Scalar; 4],
        color: String,
        #[serde(default, rename = "blend-mode")]
        blend_mode: BlendMode,
    },
    Path {
        path: String,
        color: String,
        #[serde(default, rename = "blend-mode")]
        blend_mode: BlendMode,
    },
    Linear {
        ltrb: [Scalar; 4],
        p0: Point,
        p1: Point,
        colors: Vec<String>,
        #[serde(default)]
        tile: TileMode,
    },
    Radial {
        ltrb: [Scalar; 4],
        center: Point,
        radius: Scalar,
        colors: Vec<String>,
        #[serde(default)]
        tile: TileMode,
    },
    Quad {
        corners: [Point; 4],
        colors: [String; 4],
        #[serde(default)]
        level: usize,
    },
}

fn parse_colors(colors: &[String]) -> Result<Vec<Color>, Error> {
    Ok(colors
        .iter()
        .map(|color| color.parse())
        .collect::<Result<Vec<Color>, _>>()?)
}

fn render_layer(canvas: &mut Canvas<Bitmap>, layer: &Layer) -> Result<(), Error> {
    match layer {
        Layer::Rect {
            ltrb: [l, t, r, b],
            color,
            blend_mode,
        } => {
            let mut paint = Paint::new(color.parse()?).with_blend_mode(*blend_mode);
            canvas.fill_rect(Rect::from_ltrb(*l, *t, *r, *b), &mut paint);
        }
        Layer::Path {
            path,
            color,
            blend_mode,
        } => {
            let path: Path = path.parse()?;
            let mut paint = Paint::new(color.parse()?).with_blend_mode(*blend_mode);
            canvas.fill_path(&path, &mut paint);
        }
        Layer::Linear {
            ltrb: [l, t, r, b],
            p0,
            p1,
            colors,
            tile,
        } => {
            let colors = parse_colors(colors)?;
            let shader = LinearGradient::new(*p0, *p1, colors.as_slice(), *tile);
            let mut paint = Paint::default().with_shader(shader);
            canvas.fill_rect(Rect::from_ltrb(*l, *t, *r, *b), &mut paint);
        }
        Layer::Radial {
            ltrb: [l, t, r, b],
            center,
            radius,
            colors,
            tile,
        } => {
            let colors = parse_colors(colors)?;
            let shader = RadialGradient::new(*center, *radius, colors.as_slice(), *tile);
            let mut paint = Paint::default().with_shader(shader);
            canvas.fill_rect(Rect::from_ltrb(*l, *t, *r, *b), &mut paint);
        }
        Layer::Quad {
            corners,
            colors,
            level,
        } => {
            let [c0, c1, c2, c3] = parse_colors(colors)?
                .try_into()
                .map_err(|_| "quad requires four colors")?;
            canvas.fill_quad(*corners, Some([c0, c1, c2, c3]), None, *level, &mut Paint::default());
        }
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    let args: Vec<_> = std::env::args().collect();
    let (input, output) = match args.as_slice() {
        [_, input, output] => (input, output),
        [cmd, ..] => {
            eprintln!("Render scene from JSON serialized representation");
            eprintln!("USAGE:");
            eprintln!("    {} <scene> <output>", cmd);
            std::process::exit(1);
        }
        _ => return Err("missing arguments".into()),
    };

    let scene: Scene = serde_json::from_reader(BufReader::new(File::open(input)?))?;
    let mut canvas = Canvas::new(Bitmap::new_default(Size {
        width: scene.width,
        height: scene.height,
    }));
    if let Some(background) = &scene.background {
        canvas.fill_paint(&mut Paint::new(background.parse()?));
    }
    if let Some(tr) = scene.transform {
        canvas.set_transform(tr);
    }
    for layer in scene.layers.iter() {
        render_layer(&mut canvas, layer)?;
    }
    let image = canvas.into_image();

    if output != "-" {
        let mut image_file = BufWriter::new(File::create(output)?);
        image.write_bmp(&mut image_file)?;
    } else {
        image.write_bmp(std::io::stdout())?;
    }

    Ok(())
}
