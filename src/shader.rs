//! Sources of pixels for the shaded spans
use crate::{Color, Pixel, Point, Scalar, Transform};

/// Producer of source pixels for device space spans
///
/// Before the first [`Shader::shade_row`] call the shader must be bound to the
/// current transformation matrix with [`Shader::set_context`].
pub trait Shader {
    /// Whether every pixel produced by this shader is opaque
    fn is_opaque(&self) -> bool;

    /// Bind shader to the current transformation matrix
    ///
    /// Returns `false` if the shader can not be used with this matrix (it is not
    /// invertible), in which case the draw must be skipped.
    fn set_context(&mut self, ctm: &Transform) -> bool;

    /// Fill `row` with pixels sampled at centers of `(x + i, y)` device pixels
    fn shade_row(&self, x: i32, y: i32, row: &mut [Pixel]);
}

impl<S: Shader + ?Sized> Shader for Box<S> {
    fn is_opaque(&self) -> bool {
        (**self).is_opaque()
    }

    fn set_context(&mut self, ctm: &Transform) -> bool {
        (**self).set_context(ctm)
    }

    fn shade_row(&self, x: i32, y: i32, row: &mut [Pixel]) {
        (**self).shade_row(x, y, row)
    }
}

/// Logic for the shader parameters outside of the `[0, 1]` interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum TileMode {
    /// Extend colors at the ends
    #[default]
    Clamp,
    /// Repeat the interval
    Repeat,
    /// Repeat the interval, every odd repetition is reflected
    Mirror,
}

impl TileMode {
    /// Map parameter into `[0, 1]`
    pub fn tile(self, t: Scalar) -> Scalar {
        match self {
            TileMode::Clamp => t.clamp(0.0, 1.0),
            TileMode::Repeat => t - t.floor(),
            TileMode::Mirror => ((t + 1.0).rem_euclid(2.0) - 1.0).abs(),
        }
    }

    /// Map coordinate into index of a pixel in `[0, size)`, `size` must not be zero
    pub fn tile_index(self, x: Scalar, size: usize) -> usize {
        // saturating conversion, NaN becomes zero
        let index = x.floor() as i64;
        let size = size as i64;
        let index = match self {
            TileMode::Clamp => index.clamp(0, size - 1),
            TileMode::Repeat => index.rem_euclid(size),
            TileMode::Mirror => {
                let index = index.rem_euclid(2 * size);
                if index < size {
                    index
                } else {
                    2 * size - 1 - index
                }
            }
        };
        index as usize
    }
}

/// Shader producing the same pixel everywhere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorShader {
    pixel: Pixel,
}

impl ColorShader {
    pub fn new(color: Color) -> Self {
        Self {
            pixel: color.into(),
        }
    }
}

impl From<Pixel> for ColorShader {
    fn from(pixel: Pixel) -> Self {
        Self { pixel }
    }
}

impl Shader for ColorShader {
    fn is_opaque(&self) -> bool {
        self.pixel.is_opaque()
    }

    fn set_context(&mut self, _ctm: &Transform) -> bool {
        true
    }

    fn shade_row(&self, _x: i32, _y: i32, row: &mut [Pixel]) {
        row.fill(self.pixel)
    }
}

/// Shader that applies additional transformation before the wrapped one
///
/// Wrapped shader is bound to `ctm * extra`, that is its local space is mapped
/// by `extra` first.
pub struct ProxyShader<'a> {
    shader: &'a mut dyn Shader,
    extra: Transform,
}

impl<'a> ProxyShader<'a> {
    pub fn new(shader: &'a mut dyn Shader, extra: Transform) -> Self {
        Self { shader, extra }
    }
}

impl Shader for ProxyShader<'_> {
    fn is_opaque(&self) -> bool {
        self.shader.is_opaque()
    }

    fn set_context(&mut self, ctm: &Transform) -> bool {
        self.shader.set_context(&(*ctm * self.extra))
    }

    fn shade_row(&self, x: i32, y: i32, row: &mut [Pixel]) {
        self.shader.shade_row(x, y, row)
    }
}

/// Center of the first pixel of a row and the step to the next one, mapped by `inverse`
pub(crate) fn row_start(inverse: &Transform, x: i32, y: i32) -> (Point, Point) {
    let start = inverse.apply(Point::new(x as Scalar + 0.5, y as Scalar + 0.5));
    (start, inverse.x_step())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_tile() {
        use TileMode::*;
        assert_approx_eq!(Clamp.tile(-0.5), 0.0);
        assert_approx_eq!(Clamp.tile(1.5), 1.0);
        assert_approx_eq!(Clamp.tile(0.3), 0.3);

        assert_approx_eq!(Repeat.tile(0.3), 0.3);
        assert_approx_eq!(Repeat.tile(-0.3), 0.7, 1e-9);
        assert_approx_eq!(Repeat.tile(2.0), 0.0);

        assert_approx_eq!(Mirror.tile(0.3), 0.3, 1e-9);
        assert_approx_eq!(Mirror.tile(-0.3), 0.3, 1e-9);
        assert_approx_eq!(Mirror.tile(1.3), 0.7, 1e-9);
        assert_approx_eq!(Mirror.tile(-1.3), 0.7, 1e-9);
        assert_approx_eq!(Mirror.tile(1.0), 1.0);
        assert_approx_eq!(Mirror.tile(2.0), 0.0);
    }

    #[test]
    fn test_tile_index() {
        use TileMode::*;
        assert_eq!(Clamp.tile_index(-3.5, 4), 0);
        assert_eq!(Clamp.tile_index(2.9, 4), 2);
        assert_eq!(Clamp.tile_index(7.0, 4), 3);
        assert_eq!(Clamp.tile_index(Scalar::NAN, 4), 0);

        assert_eq!(Repeat.tile_index(5.5, 4), 1);
        assert_eq!(Repeat.tile_index(-0.5, 4), 3);

        // 0 1 2 3 3 2 1 0 0 1 ...
        let mirrored: Vec<_> = (-2..10).map(|x| Mirror.tile_index(x as Scalar, 4)).collect();
        assert_eq!(mirrored, vec![1, 0, 0, 1, 2, 3, 3, 2, 1, 0, 0, 1]);
    }

    #[test]
    fn test_color_shader() {
        let mut shader = ColorShader::new(Color::new(1.0, 0.0, 0.0, 0.5));
        assert!(!shader.is_opaque());
        assert!(shader.set_context(&Transform::identity()));
        let mut row = [Pixel::TRANSPARENT; 3];
        shader.shade_row(0, 0, &mut row);
        assert!(row.iter().all(|p| *p == Pixel::pack_argb(128, 128, 0, 0)));
        shader.shade_row(0, 0, &mut []);
    }

    /// Shader encoding sampled coordinates into pixels
    struct CoordShader(Transform);

    impl Shader for CoordShader {
        fn is_opaque(&self) -> bool {
            true
        }

        fn set_context(&mut self, ctm: &Transform) -> bool {
            match ctm.invert() {
                Some(inverse) => {
                    self.0 = inverse;
                    true
                }
                None => false,
            }
        }

        fn shade_row(&self, x: i32, y: i32, row: &mut [Pixel]) {
            let (mut point, step) = row_start(&self.0, x, y);
            for pixel in row.iter_mut() {
                *pixel = Pixel::pack_argb(255, point.x() as u8, point.y() as u8, 0);
                point = point + step;
            }
        }
    }

    #[test]
    fn test_proxy_shader() {
        let mut inner = CoordShader(Transform::identity());
        let mut proxy = ProxyShader::new(&mut inner, Transform::new_scale(2.0, 2.0));
        assert!(proxy.set_context(&Transform::new_translate(10.0, 0.0)));
        let mut row = [Pixel::TRANSPARENT; 2];
        // device (20.5, 4.5) -> (10.5, 4.5) -> (5.25, 2.25)
        proxy.shade_row(20, 4, &mut row);
        assert_eq!(row[0], Pixel::pack_argb(255, 5, 2, 0));
        assert_eq!(row[1], Pixel::pack_argb(255, 5, 2, 0));

        let mut proxy = ProxyShader::new(&mut inner, Transform::new_scale(0.0, 1.0));
        assert!(!proxy.set_context(&Transform::identity()));
    }
}
