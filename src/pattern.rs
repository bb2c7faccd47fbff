//! Shaders sampling pixels of a bitmap
use crate::{Bitmap, Image, Pixel, Scalar, Shader, TileMode, Transform, shader::row_start};
use std::sync::Arc;

/// Bind bitmap shader: inverse of `ctm * local`
fn bitmap_inverse(ctm: &Transform, local: &Transform) -> Option<Transform> {
    (*ctm * *local).invert()
}

/// Bitmap sampled with the nearest neighbour filter
#[derive(Debug, Clone)]
pub struct BitmapShader {
    bitmap: Arc<Bitmap>,
    local: Transform,
    tile: TileMode,
    opaque: bool,
    inverse: Transform,
}

impl BitmapShader {
    /// Create shader, `local` maps bitmap pixel space into the local space
    pub fn new(bitmap: impl Into<Arc<Bitmap>>, local: Transform, tile: TileMode) -> Self {
        let bitmap = bitmap.into();
        let opaque = bitmap.width() > 0 && bitmap.is_opaque();
        Self {
            bitmap,
            local,
            tile,
            opaque,
            inverse: Transform::identity(),
        }
    }
}

impl Shader for BitmapShader {
    fn is_opaque(&self) -> bool {
        self.opaque
    }

    fn set_context(&mut self, ctm: &Transform) -> bool {
        match bitmap_inverse(ctm, &self.local) {
            Some(inverse) => {
                self.inverse = inverse;
                true
            }
            None => false,
        }
    }

    fn shade_row(&self, x: i32, y: i32, row: &mut [Pixel]) {
        let width = self.bitmap.width();
        let height = self.bitmap.height();
        if width == 0 || height == 0 {
            row.fill(Pixel::TRANSPARENT);
            return;
        }
        let (mut point, step) = row_start(&self.inverse, x, y);
        for pixel in row.iter_mut() {
            let col = self.tile.tile_index(point.x(), width);
            let row = self.tile.tile_index(point.y(), height);
            *pixel = self.bitmap.get(row, col).copied().unwrap_or_default();
            point = point + step;
        }
    }
}

/// Bitmap sampled with the bilinear filter, coordinates outside are clamped to the edge pixels
#[derive(Debug, Clone)]
pub struct BilerpShader {
    bitmap: Arc<Bitmap>,
    local: Transform,
    opaque: bool,
    inverse: Transform,
}

impl BilerpShader {
    /// Create shader, `local` maps bitmap pixel space into the local space
    pub fn new(bitmap: impl Into<Arc<Bitmap>>, local: Transform) -> Self {
        let bitmap = bitmap.into();
        let opaque = bitmap.width() > 0 && bitmap.is_opaque();
        Self {
            bitmap,
            local,
            opaque,
            inverse: Transform::identity(),
        }
    }

    /// Sample bitmap at the point in pixel space, bitmap must not be empty
    fn sample(&self, x: Scalar, y: Scalar) -> Pixel {
        let max_x = (self.bitmap.width() - 1) as Scalar;
        let max_y = (self.bitmap.height() - 1) as Scalar;
        // pixel centers are at `.5`
        let x = (x - 0.5).clamp(0.0, max_x);
        let y = (y - 0.5).clamp(0.0, max_y);
        if x.is_nan() || y.is_nan() {
            return Pixel::TRANSPARENT;
        }

        let x0 = x.floor();
        let y0 = y.floor();
        let u = x - x0;
        let v = y - y0;
        let col0 = x0 as usize;
        let row0 = y0 as usize;
        let col1 = (col0 + 1).min(max_x as usize);
        let row1 = (row0 + 1).min(max_y as usize);
        let get = |row, col| {
            self.bitmap
                .get(row, col)
                .copied()
                .unwrap_or_default()
                .to_argb()
        };
        let p00 = get(row0, col0);
        let p01 = get(row0, col1);
        let p10 = get(row1, col0);
        let p11 = get(row1, col1);

        let mut argb = [0u8; 4];
        for (index, channel) in argb.iter_mut().enumerate() {
            let top = p00[index] as Scalar * (1.0 - u) + p01[index] as Scalar * u;
            let bottom = p10[index] as Scalar * (1.0 - u) + p11[index] as Scalar * u;
            *channel = (top * (1.0 - v) + bottom * v).round() as u8;
        }
        let [a, r, g, b] = argb;
        Pixel::pack_argb(a, r, g, b)
    }
}

impl Shader for BilerpShader {
    fn is_opaque(&self) -> bool {
        self.opaque
    }

    fn set_context(&mut self, ctm: &Transform) -> bool {
        match bitmap_inverse(ctm, &self.local) {
            Some(inverse) => {
                self.inverse = inverse;
                true
            }
            None => false,
        }
    }

    fn shade_row(&self, x: i32, y: i32, row: &mut [Pixel]) {
        if self.bitmap.width() == 0 || self.bitmap.height() == 0 {
            row.fill(Pixel::TRANSPARENT);
            return;
        }
        let (mut point, step) = row_start(&self.inverse, x, y);
        for pixel in row.iter_mut() {
            *pixel = self.sample(point.x(), point.y());
            point = point + step;
        }
    }
}
