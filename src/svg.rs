//! Path data in the SVG format
//!
//! Supported commands are `M L H V Q T C S Z` in absolute and relative forms,
//! coordinates without a command letter repeat the previous command.
use crate::{Path, Point, Scalar};
use std::{fmt, io::Read, str::FromStr};

/// Path command with all coordinates resolved to absolute points
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SvgPathCmd {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CubicTo(Point, Point, Point),
    Close,
}

/// Iterator of commands parsed from SVG path data
pub struct SvgPathParser<'a> {
    text: &'a [u8],
    offset: usize,
    // command applied to coordinates that follow without a command letter
    repeat: Option<u8>,
    current: Point,
    contour_start: Point,
    // last control point of the previous curve, tagged with `Q` or `C`
    control: Option<(u8, Point)>,
}

impl<'a> SvgPathParser<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text: text.as_bytes(),
            offset: 0,
            repeat: None,
            current: Point::new(0.0, 0.0),
            contour_start: Point::new(0.0, 0.0),
            control: None,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.text.get(self.offset).copied()
    }

    fn skip_separators(&mut self) {
        while let Some(b' ' | b'\t' | b'\r' | b'\n' | b',') = self.peek() {
            self.offset += 1;
        }
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.offset;
        while self.peek().is_some_and(|byte| byte.is_ascii_digit()) {
            self.offset += 1;
        }
        self.offset - start
    }

    /// Number in the `[+-]digits[.digits][(e|E)[+-]digits]` form
    fn scalar(&mut self) -> Result<Scalar, SvgParserError> {
        self.skip_separators();
        let start = self.offset;
        let invalid = SvgParserError::InvalidScalar { offset: start };
        if let Some(b'+' | b'-') = self.peek() {
            self.offset += 1;
        }
        let mut digits = self.skip_digits();
        if self.peek() == Some(b'.') {
            self.offset += 1;
            digits += self.skip_digits();
        }
        if digits == 0 {
            return Err(invalid);
        }
        if let Some(b'e' | b'E') = self.peek() {
            self.offset += 1;
            if let Some(b'+' | b'-') = self.peek() {
                self.offset += 1;
            }
            if self.skip_digits() == 0 {
                return Err(invalid);
            }
        }
        std::str::from_utf8(&self.text[start..self.offset])
            .ok()
            .and_then(|number| number.parse().ok())
            .ok_or(invalid)
    }

    fn point(&mut self, relative: bool) -> Result<Point, SvgParserError> {
        let point = Point::new(self.scalar()?, self.scalar()?);
        Ok(if relative { point + self.current } else { point })
    }

    /// Control point of a smooth curve: reflection of the previous control point
    /// if the previous command is a curve of the same `kind`, current point otherwise
    fn reflected(&self, kind: u8) -> Point {
        match self.control {
            Some((prev, control)) if prev == kind => 2.0 * self.current - control,
            _ => self.current,
        }
    }

    /// Next command letter, `None` at the end of the input
    fn command(&mut self) -> Result<Option<u8>, SvgParserError> {
        self.skip_separators();
        let Some(byte) = self.peek() else {
            return Ok(None);
        };
        if !byte.is_ascii_alphabetic() {
            return self.repeat.map(Some).ok_or(SvgParserError::InvalidCmd(byte));
        }
        self.repeat = match byte.to_ascii_uppercase() {
            b'Z' => None,
            b'M' if byte == b'M' => Some(b'L'),
            b'M' => Some(b'l'),
            b'L' | b'H' | b'V' | b'Q' | b'T' | b'C' | b'S' => Some(byte),
            _ => return Err(SvgParserError::InvalidCmd(byte)),
        };
        self.offset += 1;
        Ok(Some(byte))
    }

    /// Parse single command, `None` at the end of the input
    pub fn parse_cmd(&mut self) -> Result<Option<SvgPathCmd>, SvgParserError> {
        let Some(op) = self.command()? else {
            return Ok(None);
        };
        let relative = op.is_ascii_lowercase();
        let cmd = match op.to_ascii_uppercase() {
            b'M' => SvgPathCmd::MoveTo(self.point(relative)?),
            b'L' => SvgPathCmd::LineTo(self.point(relative)?),
            b'H' => {
                let x = self.scalar()?;
                let x = if relative { self.current.x() + x } else { x };
                SvgPathCmd::LineTo(Point::new(x, self.current.y()))
            }
            b'V' => {
                let y = self.scalar()?;
                let y = if relative { self.current.y() + y } else { y };
                SvgPathCmd::LineTo(Point::new(self.current.x(), y))
            }
            b'Q' => SvgPathCmd::QuadTo(self.point(relative)?, self.point(relative)?),
            b'T' => SvgPathCmd::QuadTo(self.reflected(b'Q'), self.point(relative)?),
            b'C' => SvgPathCmd::CubicTo(
                self.point(relative)?,
                self.point(relative)?,
                self.point(relative)?,
            ),
            b'S' => SvgPathCmd::CubicTo(
                self.reflected(b'C'),
                self.point(relative)?,
                self.point(relative)?,
            ),
            _ => SvgPathCmd::Close,
        };

        self.control = None;
        match cmd {
            SvgPathCmd::MoveTo(p) => {
                self.contour_start = p;
                self.current = p;
            }
            SvgPathCmd::LineTo(p) => self.current = p,
            SvgPathCmd::QuadTo(p1, p2) => {
                self.control = Some((b'Q', p1));
                self.current = p2;
            }
            SvgPathCmd::CubicTo(_, p2, p3) => {
                self.control = Some((b'C', p2));
                self.current = p3;
            }
            SvgPathCmd::Close => self.current = self.contour_start,
        }
        Ok(Some(cmd))
    }
}

impl Iterator for SvgPathParser<'_> {
    type Item = Result<SvgPathCmd, SvgParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.parse_cmd();
        if result.is_err() {
            // stop after the first error
            self.offset = self.text.len();
        }
        result.transpose()
    }
}

impl Path {
    /// Read path data in the SVG format
    pub fn read_svg_path(mut input: impl Read) -> Result<Self, SvgParserError> {
        let mut text = String::new();
        input.read_to_string(&mut text)?;
        text.parse()
    }
}

impl FromStr for Path {
    type Err = SvgParserError;

    fn from_str(text: &str) -> Result<Path, Self::Err> {
        let mut path = Path::new();
        for cmd in SvgPathParser::new(text) {
            match cmd? {
                SvgPathCmd::MoveTo(p) => path.move_to(p),
                SvgPathCmd::LineTo(p) => path.line_to(p),
                SvgPathCmd::QuadTo(p1, p2) => path.quad_to(p1, p2),
                SvgPathCmd::CubicTo(p1, p2, p3) => path.cubic_to(p1, p2, p3),
                SvgPathCmd::Close => path.close(),
            };
        }
        Ok(path)
    }
}

#[derive(Debug)]
pub enum SvgParserError {
    /// Unknown command letter, or coordinates before the first command
    InvalidCmd(u8),
    /// Malformed number starting at `offset`
    InvalidScalar { offset: usize },
    IoError(std::io::Error),
}

impl fmt::Display for SvgParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCmd(byte) => write!(f, "invalid svg path command {:?}", *byte as char),
            Self::InvalidScalar { offset } => write!(f, "invalid number at offset {}", offset),
            Self::IoError(error) => write!(f, "failed to read svg path: {}", error),
        }
    }
}

impl std::error::Error for SvgParserError {}

impl From<std::io::Error> for SvgParserError {
    fn from(error: std::io::Error) -> Self {
        Self::IoError(error)
    }
}

impl From<SvgParserError> for std::io::Error {
    fn from(error: SvgParserError) -> Self {
        match error {
            SvgParserError::IoError(error) => error,
            error => Self::new(std::io::ErrorKind::InvalidData, error),
        }
    }
}
