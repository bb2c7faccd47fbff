//! Porter-Duff compositing of premultiplied pixels
use crate::Pixel;
use std::{fmt, str::FromStr};

/// Blend operator applied to `(src, dst)` pair of pixels
pub type BlendProc = fn(Pixel, Pixel) -> Pixel;

/// Porter-Duff compositing rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum BlendMode {
    /// `0`
    Clear,
    /// `S`
    Src,
    /// `D`
    Dst,
    /// `S + (1 - Sa) * D`
    #[default]
    SrcOver,
    /// `D + (1 - Da) * S`
    DstOver,
    /// `Da * S`
    SrcIn,
    /// `Sa * D`
    DstIn,
    /// `(1 - Da) * S`
    SrcOut,
    /// `(1 - Sa) * D`
    DstOut,
    /// `Da * S + (1 - Sa) * D`
    #[cfg_attr(feature = "serde", serde(rename = "src-atop"))]
    SrcATop,
    /// `Sa * D + (1 - Da) * S`
    #[cfg_attr(feature = "serde", serde(rename = "dst-atop"))]
    DstATop,
    /// `(1 - Da) * S + (1 - Sa) * D`
    Xor,
}

use BlendMode::*;

/// Cheapest equivalent operator when source alpha is `0`
const TRANSPARENT_TABLE: [BlendMode; 12] = [
    Clear, Clear, Dst, Dst, Dst, Clear, Clear, Clear, Dst, Dst, Clear, Dst,
];

/// Cheapest equivalent operator when source alpha is `255`
const OPAQUE_TABLE: [BlendMode; 12] = [
    Clear, Src, Dst, Src, DstOver, SrcIn, Dst, SrcOut, Clear, SrcIn, DstATop, SrcOut,
];

/// Operator used for any other source alpha
const GENERAL_TABLE: [BlendMode; 12] = [
    Clear, Src, Dst, SrcOver, DstOver, SrcIn, DstIn, SrcOut, DstOut, SrcATop, DstATop, Xor,
];

const PROCS: [BlendProc; 12] = [
    blend_clear,
    blend_src,
    blend_dst,
    blend_src_over,
    blend_dst_over,
    blend_src_in,
    blend_dst_in,
    blend_src_out,
    blend_dst_out,
    blend_src_atop,
    blend_dst_atop,
    blend_xor,
];

impl BlendMode {
    pub const ALL: [BlendMode; 12] = GENERAL_TABLE;

    /// Replace blend mode with the cheapest equivalent one for the given source alpha.
    ///
    /// Result of `Dst` means destination is left untouched.
    #[inline]
    pub fn reduce(self, src_alpha: u8) -> BlendMode {
        let table = match src_alpha {
            0 => &TRANSPARENT_TABLE,
            255 => &OPAQUE_TABLE,
            _ => &GENERAL_TABLE,
        };
        table[self as usize]
    }

    /// Operator implementing this blend mode
    #[inline]
    pub fn proc(self) -> BlendProc {
        PROCS[self as usize]
    }

    /// Blend single pixel
    #[inline]
    pub fn blend(self, src: Pixel, dst: Pixel) -> Pixel {
        (self.reduce(src.alpha()).proc())(src, dst)
    }

    /// Blend constant source pixel over the whole destination span
    pub fn blend_span(self, src: Pixel, dst: &mut [Pixel]) {
        match self.reduce(src.alpha()) {
            Dst => {}
            Src => dst.fill(src),
            Clear => dst.fill(Pixel::TRANSPARENT),
            mode => {
                let proc = mode.proc();
                for pixel in dst.iter_mut() {
                    *pixel = proc(src, *pixel);
                }
            }
        }
    }

    /// Blend row of source pixels into destination, operator is chosen per source pixel
    pub fn blend_row(self, src: &[Pixel], dst: &mut [Pixel]) {
        for (src, dst) in src.iter().zip(dst.iter_mut()) {
            let mode = self.reduce(src.alpha());
            if mode != Dst {
                *dst = (mode.proc())(*src, *dst);
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Clear => "clear",
            Src => "src",
            Dst => "dst",
            SrcOver => "src-over",
            DstOver => "dst-over",
            SrcIn => "src-in",
            DstIn => "dst-in",
            SrcOut => "src-out",
            DstOut => "dst-out",
            SrcATop => "src-atop",
            DstATop => "dst-atop",
            Xor => "xor",
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlendMode {
    type Err = BlendModeError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        BlendMode::ALL
            .into_iter()
            .find(|mode| mode.name() == name)
            .ok_or_else(|| BlendModeError::UnknownMode(name.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlendModeError {
    UnknownMode(String),
}

impl fmt::Display for BlendModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlendModeError::UnknownMode(name) => write!(f, "Unknown blend mode: {}", name),
        }
    }
}

impl std::error::Error for BlendModeError {}

/// Divide by 255 with rounding, exact for `x` in `[0, 255 * 255]`
#[inline(always)]
pub const fn div255(x: u32) -> u32 {
    let x = x + 128;
    (x + (x >> 8)) >> 8
}

/// Multiply two premultiplied pixels channel by channel
#[inline]
pub fn modulate(p0: Pixel, p1: Pixel) -> Pixel {
    zip_channels(p0, p1, |c0, c1| div255(c0 * c1))
}

/// Combine source and destination channel by channel
#[inline(always)]
fn zip_channels(src: Pixel, dst: Pixel, op: impl Fn(u32, u32) -> u32) -> Pixel {
    let [sa, sr, sg, sb] = src.to_argb();
    let [da, dr, dg, db] = dst.to_argb();
    let channel = |s: u8, d: u8| op(s as u32, d as u32).min(255) as u8;
    Pixel::pack_argb(
        channel(sa, da),
        channel(sr, dr),
        channel(sg, dg),
        channel(sb, db),
    )
}

fn blend_clear(_src: Pixel, _dst: Pixel) -> Pixel {
    Pixel::TRANSPARENT
}

fn blend_src(src: Pixel, _dst: Pixel) -> Pixel {
    src
}

fn blend_dst(_src: Pixel, dst: Pixel) -> Pixel {
    dst
}

fn blend_src_over(src: Pixel, dst: Pixel) -> Pixel {
    let src_inv = 255 - src.alpha() as u32;
    zip_channels(src, dst, |s, d| s + div255(d * src_inv))
}

fn blend_dst_over(src: Pixel, dst: Pixel) -> Pixel {
    let dst_inv = 255 - dst.alpha() as u32;
    zip_channels(src, dst, |s, d| d + div255(s * dst_inv))
}

fn blend_src_in(src: Pixel, dst: Pixel) -> Pixel {
    let dst_alpha = dst.alpha() as u32;
    zip_channels(src, dst, |s, _| div255(s * dst_alpha))
}

fn blend_dst_in(src: Pixel, dst: Pixel) -> Pixel {
    let src_alpha = src.alpha() as u32;
    zip_channels(src, dst, |_, d| div255(d * src_alpha))
}

fn blend_src_out(src: Pixel, dst: Pixel) -> Pixel {
    let dst_inv = 255 - dst.alpha() as u32;
    zip_channels(src, dst, |s, _| div255(s * dst_inv))
}

fn blend_dst_out(src: Pixel, dst: Pixel) -> Pixel {
    let src_inv = 255 - src.alpha() as u32;
    zip_channels(src, dst, |_, d| div255(d * src_inv))
}

fn blend_src_atop(src: Pixel, dst: Pixel) -> Pixel {
    let dst_alpha = dst.alpha() as u32;
    let src_inv = 255 - src.alpha() as u32;
    zip_channels(src, dst, |s, d| div255(s * dst_alpha + d * src_inv))
}

fn blend_dst_atop(src: Pixel, dst: Pixel) -> Pixel {
    let src_alpha = src.alpha() as u32;
    let dst_inv = 255 - dst.alpha() as u32;
    zip_channels(src, dst, |s, d| div255(d * src_alpha + s * dst_inv))
}

fn blend_xor(src: Pixel, dst: Pixel) -> Pixel {
    let src_inv = 255 - src.alpha() as u32;
    let dst_inv = 255 - dst.alpha() as u32;
    zip_channels(src, dst, |s, d| div255(s * dst_inv + d * src_inv))
}
