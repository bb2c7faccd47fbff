use crate::{Color, Pixel, Point, Scalar, Shader, TileMode, Transform, shader::row_start};
use std::cmp::Ordering;

/// Specifies color at a particular parameter offset of the gradient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradStop {
    pub position: Scalar,
    pub color: Color,
}

impl GradStop {
    pub fn new(position: Scalar, color: Color) -> Self {
        Self { position, color }
    }
}

/// List of all `GradStop` in the gradient ordered by position
#[derive(Debug, Clone)]
pub struct GradStops {
    stops: Vec<GradStop>,
}

impl GradStops {
    pub fn new(mut stops: Vec<GradStop>) -> Self {
        stops.sort_by(|s0, s1| {
            s0.position
                .partial_cmp(&s1.position)
                .unwrap_or(Ordering::Greater)
        });
        if stops.is_empty() {
            stops.push(GradStop::new(0.0, Color::BLACK));
        }
        Self { stops }
    }

    /// Colors placed evenly on the `[0, 1]` interval
    pub fn evenly(colors: &[Color]) -> Self {
        let step = 1.0 / (colors.len().max(2) - 1) as Scalar;
        Self::new(
            colors
                .iter()
                .enumerate()
                .map(|(index, color)| GradStop::new(index as Scalar * step, *color))
                .collect(),
        )
    }

    pub fn stops(&self) -> &[GradStop] {
        &self.stops
    }

    pub fn is_opaque(&self) -> bool {
        self.stops.iter().all(|stop| stop.color.is_opaque())
    }

    /// Two stops at the ends of the `[0, 1]` interval
    fn endpoints(&self) -> Option<(Color, Color)> {
        match self.stops.as_slice() {
            [s0, s1] if s0.position == 0.0 && s1.position == 1.0 => Some((s0.color, s1.color)),
            _ => None,
        }
    }

    /// Color at the parameter value `t`
    pub fn at(&self, t: Scalar) -> Color {
        let index = self.stops.binary_search_by(|stop| {
            if stop.position < t {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        });
        let index = match index {
            Ok(index) => index,
            Err(index) => index,
        };
        let size = self.stops.len();
        if index == 0 {
            self.stops[index].color
        } else if index == size {
            self.stops[size - 1].color
        } else {
            let p0 = &self.stops[index - 1];
            let p1 = &self.stops[index];
            let ratio = (t - p0.position) / (p1.position - p0.position);
            p0.color.lerp(p1.color, ratio as f32)
        }
    }
}

impl From<Vec<GradStop>> for GradStops {
    fn from(stops: Vec<GradStop>) -> Self {
        Self::new(stops)
    }
}

impl From<&[Color]> for GradStops {
    fn from(colors: &[Color]) -> Self {
        Self::evenly(colors)
    }
}

/// Shade row by evaluating `param` at every pixel center mapped into gradient space
fn shade_gradient(
    stops: &GradStops,
    tile: TileMode,
    inverse: &Transform,
    x: i32,
    y: i32,
    row: &mut [Pixel],
    param: impl Fn(Point) -> Scalar,
) {
    let (mut point, step) = row_start(inverse, x, y);
    match stops.endpoints() {
        Some((c0, c1)) => {
            for pixel in row.iter_mut() {
                let t = tile.tile(param(point));
                *pixel = c0.lerp(c1, t as f32).into();
                point = point + step;
            }
        }
        None => {
            for pixel in row.iter_mut() {
                let t = tile.tile(param(point));
                *pixel = stops.at(t).into();
                point = point + step;
            }
        }
    }
}

/// Gradient along the line from `p0` to `p1`
///
/// Parameter is the projection of a point onto the segment, `0` at `p0` and `1` at `p1`.
#[derive(Debug, Clone)]
pub struct LinearGradient {
    stops: GradStops,
    tile: TileMode,
    // maps local space onto the gradient space where the segment is `[(0, 0), (1, 0)]`
    basis: Option<Transform>,
    inverse: Transform,
}

impl LinearGradient {
    pub fn new(
        p0: impl Into<Point>,
        p1: impl Into<Point>,
        stops: impl Into<GradStops>,
        tile: TileMode,
    ) -> Self {
        let p0 = p0.into();
        let dir = p1.into() - p0;
        let basis = Transform::from_basis(dir, Point::new(-dir.y(), dir.x()), p0).invert();
        Self {
            stops: stops.into(),
            tile,
            basis,
            inverse: Transform::identity(),
        }
    }
}

impl Shader for LinearGradient {
    fn is_opaque(&self) -> bool {
        self.stops.is_opaque()
    }

    fn set_context(&mut self, ctm: &Transform) -> bool {
        match (self.basis, ctm.invert()) {
            (Some(basis), Some(ctm_inv)) => {
                self.inverse = basis * ctm_inv;
                true
            }
            _ => false,
        }
    }

    fn shade_row(&self, x: i32, y: i32, row: &mut [Pixel]) {
        shade_gradient(&self.stops, self.tile, &self.inverse, x, y, row, |p| {
            p.x()
        })
    }
}

/// Gradient of concentric circles, `0` at the center and `1` at the `radius`
#[derive(Debug, Clone)]
pub struct RadialGradient {
    stops: GradStops,
    tile: TileMode,
    // maps local space onto the space where the gradient circle is the unit one
    basis: Option<Transform>,
    inverse: Transform,
}

impl RadialGradient {
    pub fn new(
        center: impl Into<Point>,
        radius: Scalar,
        colors: impl Into<GradStops>,
        tile: TileMode,
    ) -> Self {
        let basis = Transform::from_basis(
            Point::new(radius, 0.0),
            Point::new(0.0, radius),
            center.into(),
        )
        .invert();
        Self {
            stops: colors.into(),
            tile,
            basis,
            inverse: Transform::identity(),
        }
    }
}

impl Shader for RadialGradient {
    fn is_opaque(&self) -> bool {
        self.stops.is_opaque()
    }

    fn set_context(&mut self, ctm: &Transform) -> bool {
        match (self.basis, ctm.invert()) {
            (Some(basis), Some(ctm_inv)) => {
                self.inverse = basis * ctm_inv;
                true
            }
            _ => false,
        }
    }

    fn shade_row(&self, x: i32, y: i32, row: &mut [Pixel]) {
        shade_gradient(&self.stops, self.tile, &self.inverse, x, y, row, |p| {
            p.length()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
    const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

    fn shade(shader: &mut impl Shader, x: i32, y: i32) -> Pixel {
        assert!(shader.set_context(&Transform::identity()));
        let mut row = [Pixel::TRANSPARENT];
        shader.shade_row(x, y, &mut row);
        row[0]
    }

    fn assert_pixel_near(pixel: Pixel, expected: [u8; 4]) {
        for (c0, c1) in pixel.to_argb().into_iter().zip(expected) {
            assert!(c0.abs_diff(c1) <= 1, "{:?} != {:?}", pixel, expected);
        }
    }

    #[test]
    fn test_grad_stops() {
        let stops = GradStops::evenly(&[RED, GREEN, BLUE]);
        assert_eq!(stops.at(-1.0), RED);
        assert_eq!(stops.at(0.25), Color::new(0.5, 0.5, 0.0, 1.0));
        assert_eq!(stops.at(0.75), Color::new(0.0, 0.5, 0.5, 1.0));
        assert_eq!(stops.at(2.0), BLUE);
        assert!(stops.endpoints().is_none());

        // unordered explicit positions
        let stops = GradStops::new(vec![GradStop::new(1.0, BLUE), GradStop::new(0.0, RED)]);
        assert_eq!(stops.endpoints(), Some((RED, BLUE)));

        let stops = GradStops::evenly(&[GREEN]);
        assert_eq!(stops.at(0.7), GREEN);
        assert_eq!(GradStops::evenly(&[]).at(0.5), Color::BLACK);
    }

    #[test]
    fn test_linear_tile() {
        // pixel `x` maps to `t = x / 8`
        let colors = [RED, BLUE];
        let mut clamp = LinearGradient::new((0.5, 0.0), (8.5, 0.0), &colors[..], TileMode::Clamp);
        let mut repeat = LinearGradient::new((0.5, 0.0), (8.5, 0.0), &colors[..], TileMode::Repeat);
        let mut mirror = LinearGradient::new((0.5, 0.0), (8.5, 0.0), &colors[..], TileMode::Mirror);

        assert_pixel_near(shade(&mut clamp, 4, 0), [255, 128, 0, 128]);
        assert_pixel_near(shade(&mut clamp, 4, 10), [255, 128, 0, 128]);
        assert_eq!(shade(&mut clamp, 0, 0), Pixel::from(RED));
        assert_eq!(shade(&mut clamp, -5, 0), Pixel::from(RED));

        // beyond the end
        assert_eq!(shade(&mut clamp, 16, 0), Pixel::from(BLUE));
        assert_eq!(shade(&mut repeat, 16, 0), Pixel::from(RED));
        assert_eq!(shade(&mut mirror, 8, 0), Pixel::from(BLUE));
        assert_eq!(shade(&mut mirror, 16, 0), Pixel::from(RED));
        assert_pixel_near(shade(&mut mirror, 12, 0), [255, 128, 0, 128]);
    }

    #[test]
    fn test_linear_row() {
        let mut grad = LinearGradient::new(
            (0.5, 0.0),
            (8.5, 0.0),
            vec![
                GradStop::new(0.0, RED),
                GradStop::new(0.5, GREEN),
                GradStop::new(1.0, BLUE),
            ],
            TileMode::Clamp,
        );
        assert!(grad.is_opaque());
        assert!(grad.set_context(&Transform::identity()));
        let mut row = [Pixel::TRANSPARENT; 9];
        grad.shade_row(0, 3, &mut row);
        assert_eq!(row[0], Pixel::from(RED));
        assert_eq!(row[4], Pixel::from(GREEN));
        assert_eq!(row[8], Pixel::from(BLUE));
        assert_pixel_near(row[2], [255, 128, 128, 0]);

        // context transformation is applied
        assert!(grad.set_context(&Transform::new_translate(4.0, 0.0)));
        grad.shade_row(4, 0, &mut row[..1]);
        assert_eq!(row[0], Pixel::from(RED));
    }

    #[test]
    fn test_linear_degenerate() {
        let mut grad = LinearGradient::new((1.0, 1.0), (1.0, 1.0), &[RED, BLUE][..], TileMode::Clamp);
        assert!(!grad.set_context(&Transform::identity()));
        let mut grad = LinearGradient::new((0.0, 0.0), (1.0, 0.0), &[RED, BLUE][..], TileMode::Clamp);
        assert!(!grad.set_context(&Transform::new_scale(1.0, 0.0)));
    }

    #[test]
    fn test_radial() {
        let mut grad = RadialGradient::new((4.0, 4.0), 4.0, &[RED, BLUE][..], TileMode::Clamp);
        // center of the pixel (3, 3) is at the distance of sqrt(0.5)
        let pixel = shade(&mut grad, 3, 3);
        assert!(pixel.red() > 200);
        assert_eq!(shade(&mut grad, 20, 3), Pixel::from(BLUE));

        // pixel (7, 3) is at the distance of 3.5
        let mut grad = RadialGradient::new((4.0, 3.5), 4.0, &[RED, BLUE][..], TileMode::Repeat);
        let pixel = shade(&mut grad, 7, 3);
        assert_pixel_near(pixel, [255, 32, 0, 223]);
        // distance of 4.5 wraps around
        let pixel = shade(&mut grad, 8, 3);
        assert_pixel_near(pixel, [255, 223, 0, 32]);

        let mut grad = RadialGradient::new((0.0, 0.0), 0.0, &[RED, BLUE][..], TileMode::Clamp);
        assert!(!grad.set_context(&Transform::identity()));
    }

    #[test]
    fn test_opacity() {
        let grad = LinearGradient::new(
            (0.0, 0.0),
            (1.0, 0.0),
            &[RED, Color::new(0.0, 0.0, 1.0, 0.5)][..],
            TileMode::Clamp,
        );
        assert!(!grad.is_opaque());
        assert_approx_eq!(grad.stops.stops()[1].position, 1.0);
    }
}
