//! Render linear and radial gradients with all tile modes, BMP image is written to stdout
use scanfill::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let stops = GradStops::new(vec![
        GradStop::new(0.0, "#ffbd4f".parse()?),
        GradStop::new(0.5, "#ff0000".parse()?),
        GradStop::new(0.7, "#ff00ff".parse()?),
        GradStop::new(1.0, "#000000".parse()?),
    ]);
    let tiles = [TileMode::Clamp, TileMode::Repeat, TileMode::Mirror];
    let cell = 80.0;

    let mut canvas = Canvas::new(Bitmap::new_default(Size {
        width: 3 * cell as usize,
        height: 3 * cell as usize,
    }));
    canvas.fill_paint(&mut Paint::new(Color::WHITE));

    for (index, tile) in tiles.into_iter().enumerate() {
        let offset = index as Scalar * cell;

        // linear gradient covering a third of the cell
        canvas.save();
        canvas.concat(&Transform::new_translate(offset, 0.0));
        let linear = LinearGradient::new((30.0, 30.0), (50.0, 40.0), stops.clone(), tile);
        let mut paint = Paint::default().with_shader(linear);
        canvas.fill_rect(Rect::from_xywh(5.0, 5.0, cell - 10.0, cell - 10.0), &mut paint);
        canvas.restore();

        // radial gradient inside of a rotated square
        canvas.save();
        canvas.concat(
            &Transform::new_translate(offset + cell / 2.0, cell * 1.5)
                .rotate(PI / 6.0)
                .translate(-cell / 2.0, -cell / 2.0),
        );
        let radial = RadialGradient::new((40.0, 40.0), 15.0, stops.clone(), tile);
        let mut paint = Paint::default().with_shader(radial);
        canvas.fill_rect(Rect::from_xywh(12.0, 12.0, cell - 24.0, cell - 24.0), &mut paint);
        canvas.restore();

        // gradient modulated by the vertex colors of a tessellated quad
        canvas.save();
        canvas.concat(&Transform::new_translate(offset, 2.0 * cell));
        let corners = [
            Point::new(8.0, 4.0),
            Point::new(cell - 4.0, 12.0),
            Point::new(cell - 12.0, cell - 4.0),
            Point::new(4.0, cell - 8.0),
        ];
        let colors = [
            Color::WHITE,
            "#00ff00".parse()?,
            "#0000ff80".parse()?,
            "#ffff00".parse()?,
        ];
        let linear = LinearGradient::new((20.0, 40.0), (40.0, 40.0), stops.clone(), tile);
        let mut paint = Paint::default().with_shader(linear);
        let tex_coords = Rect::from_xywh(0.0, 0.0, cell, cell).corners();
        canvas.fill_quad(corners, Some(colors), Some(tex_coords), 4, &mut paint);
        canvas.restore();
    }

    canvas.image().write_bmp(std::io::stdout())?;
    Ok(())
}
