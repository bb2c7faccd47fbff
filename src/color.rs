use bytemuck::{Pod, Zeroable};
use std::{
    fmt,
    ops::{Add, Mul, Sub},
    str::FromStr,
};

/// Alpha premultiplied ARGB color packed as u32 value, 8 bits per channel
///
/// Color channels are expected to be less or equal to the alpha channel, which
/// holds for every pixel produced by this crate but is not enforced by the type.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Pod, Zeroable)]
pub struct Pixel(u32);

impl Pixel {
    pub const TRANSPARENT: Pixel = Pixel(0);

    /// Pack premultiplied channels
    #[inline(always)]
    pub const fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    #[inline(always)]
    pub const fn alpha(self) -> u8 {
        ((self.0 >> 24) & 0xff) as u8
    }

    #[inline(always)]
    pub const fn red(self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }

    #[inline(always)]
    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    #[inline(always)]
    pub const fn blue(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Premultiplied `[a, r, g, b]` channels
    #[inline(always)]
    pub const fn to_argb(self) -> [u8; 4] {
        [self.alpha(), self.red(), self.green(), self.blue()]
    }

    /// Raw packed value
    #[inline(always)]
    pub const fn to_u32(self) -> u32 {
        self.0
    }

    /// Whether pixel is fully opaque
    #[inline(always)]
    pub const fn is_opaque(self) -> bool {
        self.alpha() == 255
    }

    /// Remove alpha premultiplication, returns `[r, g, b, a]`
    pub fn to_rgba(self) -> [u8; 4] {
        let [a, r, g, b] = self.to_argb();
        match a {
            0 => [0, 0, 0, 0],
            255 => [r, g, b, a],
            _ => {
                let unmul = |c: u8| ((c as u32 * 255 + a as u32 / 2) / a as u32).min(255) as u8;
                [unmul(r), unmul(g), unmul(b), a]
            }
        }
    }
}

impl From<Color> for Pixel {
    fn from(color: Color) -> Self {
        let Color { r, g, b, a } = color.pin_to_unit();
        let round = |value: f32| (value * 255.0).round() as u8;
        if a >= 1.0 {
            Pixel::pack_argb(255, round(r), round(g), round(b))
        } else {
            Pixel::pack_argb(round(a), round(r * a), round(g * a), round(b * a))
        }
    }
}

impl fmt::Debug for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, r, g, b] = self.to_argb();
        write!(f, "Pixel(a={a}, r={r}, g={g}, b={b})")
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)?;
        if a != 255 {
            write!(f, "{:02x}", a)?;
        }
        Ok(())
    }
}

/// Unpremultiplied RGBA color with floating point channels
///
/// Channels are conceptually in `[0, 1]` but may go out of range as a result of
/// interpolation, they are clamped with [`Color::pin_to_unit`] when converted to [`Pixel`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Clamp all channels into `[0, 1]`
    pub fn pin_to_unit(self) -> Self {
        let pin = |value: f32| {
            if value.is_nan() {
                0.0
            } else {
                value.clamp(0.0, 1.0)
            }
        };
        Self {
            r: pin(self.r),
            g: pin(self.g),
            b: pin(self.b),
            a: pin(self.a),
        }
    }

    pub fn is_opaque(self) -> bool {
        self.a >= 1.0
    }

    /// Linear interpolation between self and other colors.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Add<Self> for Color {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self::Output {
        Self::new(
            self.r + other.r,
            self.g + other.g,
            self.b + other.b,
            self.a + other.a,
        )
    }
}

impl Sub<Self> for Color {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self::Output {
        Self::new(
            self.r - other.r,
            self.g - other.g,
            self.b - other.b,
            self.a - other.a,
        )
    }
}

impl Mul<f32> for Color {
    type Output = Self;

    #[inline]
    fn mul(self, scale: f32) -> Self::Output {
        Self::new(self.r * scale, self.g * scale, self.b * scale, self.a * scale)
    }
}

impl Mul<Color> for f32 {
    type Output = Color;

    #[inline]
    fn mul(self, color: Color) -> Self::Output {
        color * self
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(color: &str) -> Result<Self, Self::Err> {
        if color.starts_with('#') && (color.len() == 7 || color.len() == 9) {
            // #RRGGBB(AA)
            let bytes: &[u8] = color[1..].as_ref();
            let digit = |byte| match byte {
                b'A'..=b'F' => Ok(byte - b'A' + 10),
                b'a'..=b'f' => Ok(byte - b'a' + 10),
                b'0'..=b'9' => Ok(byte - b'0'),
                _ => Err(ColorError::HexExpected),
            };
            let mut hex = bytes
                .chunks(2)
                .map(|pair| Ok((digit(pair[0])? << 4 | digit(pair[1])?) as f32 / 255.0));
            Ok(Color::new(
                hex.next().unwrap_or(Ok(0.0))?,
                hex.next().unwrap_or(Ok(0.0))?,
                hex.next().unwrap_or(Ok(0.0))?,
                hex.next().unwrap_or(Ok(1.0))?,
            ))
        } else {
            Err(ColorError::HexExpected)
        }
    }
}

#[derive(Debug, Clone)]
pub enum ColorError {
    HexExpected,
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::HexExpected => {
                write!(f, "Color expected to be #RRGGBB(AA) in hexidemical format")
            }
        }
    }
}

impl std::error::Error for ColorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_pack() {
        let p = Pixel::pack_argb(4, 1, 2, 3);
        assert_eq!([4, 1, 2, 3], p.to_argb());
        assert_eq!(p.to_u32(), 0x04010203);
        assert_eq!(4, p.alpha());
        assert_eq!(1, p.red());
        assert_eq!(2, p.green());
        assert_eq!(3, p.blue());
    }

    #[test]
    fn test_color_to_pixel() {
        let red = Pixel::from(Color::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(red, Pixel::pack_argb(255, 255, 0, 0));

        // premultiplied
        let half = Pixel::from(Color::new(1.0, 0.5, 0.0, 0.5));
        assert_eq!(half, Pixel::pack_argb(128, 128, 64, 0));

        // out of range values are pinned
        let over = Pixel::from(Color::new(1.5, -0.5, 0.25, 2.0));
        assert_eq!(over, Pixel::pack_argb(255, 255, 0, 64));
    }

    #[test]
    fn test_color_arith() {
        let c0 = Color::new(1.0, 0.0, 0.0, 1.0);
        let c1 = Color::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(c0.lerp(c1, 0.5), Color::new(0.5, 0.0, 0.5, 1.0));
        assert_eq!(c1 - c0, Color::new(-1.0, 0.0, 1.0, 0.0));
        assert_eq!(2.0 * c0, Color::new(2.0, 0.0, 0.0, 2.0));
        assert_eq!((c1 - c0).pin_to_unit(), Color::new(0.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn test_color_parse() -> Result<(), ColorError> {
        let c: Color = "#ff0000".parse()?;
        assert_eq!(c, Color::new(1.0, 0.0, 0.0, 1.0));
        let c: Color = "#00ff0000".parse()?;
        assert_eq!(c, Color::new(0.0, 1.0, 0.0, 0.0));
        assert!("ff0000".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
        Ok(())
    }

    #[test]
    fn test_unmultiply_display() {
        let p = Pixel::from(Color::new(1.0, 0.0, 0.0, 0.5));
        assert_eq!(p.to_rgba(), [255, 0, 0, 128]);
        assert_eq!(p.to_string(), "#ff000080");
        assert_eq!(Pixel::pack_argb(255, 1, 2, 3).to_string(), "#010203");
    }
}
