use std::{
    fmt,
    ops::{Add, Div, Mul, Neg, Sub},
};

pub type Scalar = f64;
pub const EPSILON: f64 = f64::EPSILON;
pub const PI: f64 = std::f64::consts::PI;

/// Format floats in a compact way suitable for SVG path
pub fn scalar_fmt(f: &mut fmt::Formatter<'_>, value: Scalar) -> fmt::Result {
    let value_abs = value.abs();
    if value_abs.fract() < EPSILON {
        write!(f, "{}", value.trunc() as i64)
    } else {
        let ten: Scalar = 10.0;
        let round = ten.powi(6 - (value_abs.trunc() + 1.0).log10().ceil() as i32);
        let value = (value * round).round() / round;
        let mut buffer = [0u8; lexical_core::BUFFER_SIZE];
        let bytes = lexical_core::write(value, &mut buffer);
        f.write_str(std::str::from_utf8(bytes).map_err(|_| fmt::Error)?)
    }
}

/// Value representing a 2D point or vector.
#[derive(Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point(pub [Scalar; 2]);

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Point([x, y]) = self;
        scalar_fmt(f, *x)?;
        write!(f, ",")?;
        scalar_fmt(f, *y)?;
        Ok(())
    }
}

impl Point {
    #[inline]
    pub const fn new(x: Scalar, y: Scalar) -> Self {
        Self([x, y])
    }

    /// Get `x` component of the point
    #[inline]
    pub fn x(self) -> Scalar {
        self.0[0]
    }

    /// Get `y` compenent of the point
    #[inline]
    pub fn y(self) -> Scalar {
        self.0[1]
    }

    /// Get length of the vector (distance from the origin)
    pub fn length(self) -> Scalar {
        let Self([x, y]) = self;
        x.hypot(y)
    }

    /// Distance between two points
    pub fn dist(self, other: Self) -> Scalar {
        (self - other).length()
    }

    /// Dot product between two vectors
    pub fn dot(self, other: Self) -> Scalar {
        let Self([x0, y0]) = self;
        let Self([x1, y1]) = other;
        x0 * x1 + y0 * y1
    }

    /// Linear interpolation between self and other points
    pub fn lerp(self, other: Self, t: Scalar) -> Self {
        self + (other - self) * t
    }

    /// Whether both coordinates are finite
    pub fn is_finite(self) -> bool {
        self.x().is_finite() && self.y().is_finite()
    }

    /// Determine if self is close to the other within the marging of error (EPSILON)
    pub fn is_close_to(self, other: Point) -> bool {
        let Self([x0, y0]) = self;
        let Self([x1, y1]) = other;
        (x0 - x1).abs() < EPSILON && (y0 - y1).abs() < EPSILON
    }
}

impl From<(Scalar, Scalar)> for Point {
    #[inline]
    fn from(xy: (Scalar, Scalar)) -> Self {
        Self([xy.0, xy.1])
    }
}

impl Mul<Point> for Scalar {
    type Output = Point;

    #[inline]
    fn mul(self, other: Point) -> Self::Output {
        let Point([x, y]) = other;
        Point([self * x, self * y])
    }
}

impl Mul<Scalar> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, scale: Scalar) -> Self::Output {
        scale * self
    }
}

impl Div<Scalar> for Point {
    type Output = Point;

    #[inline]
    fn div(self, rhs: Scalar) -> Self::Output {
        let Point([x, y]) = self;
        Point([x / rhs, y / rhs])
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0 + x1, y0 + y1])
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0 - x1, y0 - y1])
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline]
    fn neg(self) -> Self::Output {
        let Point([x, y]) = self;
        Point([-x, -y])
    }
}

/// 2D affine transformation
///
/// Stored as an array [m00, m01, m02, m10, m11, m12] but semantically corresponds to
/// a matrix:
/// ┌             ┐
/// │ m00 m01 m02 │
/// │ m10 m11 m12 │
/// │   0   0   1 │
/// └             ┘
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform([Scalar; 6]);

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self([m00, m01, m02, m10, m11, m12]) = self;
        write!(f, "matrix(")?;
        for (index, value) in [m00, m10, m01, m11, m02, m12].into_iter().enumerate() {
            if index != 0 {
                write!(f, " ")?;
            }
            scalar_fmt(f, *value)?;
        }
        write!(f, ")")
    }
}

impl Transform {
    pub const fn new(
        m00: Scalar,
        m01: Scalar,
        m02: Scalar,
        m10: Scalar,
        m11: Scalar,
        m12: Scalar,
    ) -> Self {
        Self([m00, m01, m02, m10, m11, m12])
    }

    pub const fn identity() -> Self {
        Self([1.0, 0.0, 0.0, 0.0, 1.0, 0.0])
    }

    pub fn new_translate(tx: Scalar, ty: Scalar) -> Self {
        Self([1.0, 0.0, tx, 0.0, 1.0, ty])
    }

    pub fn new_scale(sx: Scalar, sy: Scalar) -> Self {
        Self([sx, 0.0, 0.0, 0.0, sy, 0.0])
    }

    pub fn new_rotate(a: Scalar) -> Self {
        let (sin, cos) = a.sin_cos();
        Self([cos, -sin, 0.0, sin, cos, 0.0])
    }

    /// Matrix whose columns are `x_axis`, `y_axis` and `origin`.
    ///
    /// Maps `(1, 0)` to `origin + x_axis` and `(0, 1)` to `origin + y_axis`.
    pub fn from_basis(x_axis: Point, y_axis: Point, origin: Point) -> Self {
        Self([
            x_axis.x(),
            y_axis.x(),
            origin.x(),
            x_axis.y(),
            y_axis.y(),
            origin.y(),
        ])
    }

    /// Coefficients in `[m00, m01, m02, m10, m11, m12]` order
    pub fn coeffs(&self) -> [Scalar; 6] {
        self.0
    }

    /// Apply this transformation to a point
    #[inline]
    pub fn apply(&self, point: Point) -> Point {
        let Self([m00, m01, m02, m10, m11, m12]) = self;
        let Point([x, y]) = point;
        Point([x * m00 + y * m01 + m02, x * m10 + y * m11 + m12])
    }

    /// Map `src` points into `dst`, only `min(src.len(), dst.len())` points are mapped
    pub fn map_points(&self, dst: &mut [Point], src: &[Point]) {
        for (dst, src) in dst.iter_mut().zip(src) {
            *dst = self.apply(*src);
        }
    }

    /// Change of the mapped point when `x` increases by one
    #[inline]
    pub fn x_step(&self) -> Point {
        Point([self.0[0], self.0[3]])
    }

    /// Whether transformation maps axis aligned rectangles to axis aligned rectangles
    /// without swapping axes (only scale and translation)
    pub fn is_scale_translate(&self) -> bool {
        self.0[1] == 0.0 && self.0[3] == 0.0
    }

    /// Find the inverse transformation
    pub fn invert(&self) -> Option<Self> {
        // inv([[M, v], [0, 1]]) = [[inv(M), - inv(M) * v], [0, 1]]
        let Self([m00, m01, m02, m10, m11, m12]) = self;
        let det = m00 * m11 - m10 * m01;
        if det.abs() <= EPSILON || !det.is_finite() {
            return None;
        }
        let o00 = m11 / det;
        let o01 = -m01 / det;
        let o10 = -m10 / det;
        let o11 = m00 / det;
        let o02 = -o00 * m02 - o01 * m12;
        let o12 = -o10 * m02 - o11 * m12;
        Some(Self([o00, o01, o02, o10, o11, o12]))
    }

    /// Apply translation by `[tx, ty]` before self
    pub fn translate(&self, tx: Scalar, ty: Scalar) -> Self {
        self.matmul(Self::new_translate(tx, ty))
    }

    /// Apply scale transformatoin by `[sx, sy]` before self
    pub fn scale(&self, sx: Scalar, sy: Scalar) -> Self {
        self.matmul(Self::new_scale(sx, sy))
    }

    /// Apply rotation by `a` angle around the origin before self
    pub fn rotate(&self, a: Scalar) -> Self {
        self.matmul(Self::new_rotate(a))
    }

    /// Multiply transformations in matrix form
    pub fn matmul(&self, other: Transform) -> Self {
        let Self([s00, s01, s02, s10, s11, s12]) = self;
        let Self([o00, o01, o02, o10, o11, o12]) = other;

        // s00, s01, s02 | o00, o01, o02
        // s10, s11, s12 | o10, o11, o12
        // 0  , 0  , 1   | 0  , 0  , 1
        Self([
            s00 * o00 + s01 * o10,
            s00 * o01 + s01 * o11,
            s00 * o02 + s01 * o12 + s02,
            s10 * o00 + s11 * o10,
            s10 * o01 + s11 * o11,
            s10 * o02 + s11 * o12 + s12,
        ])
    }
}

impl Mul<Transform> for Transform {
    type Output = Transform;

    fn mul(self, other: Transform) -> Self::Output {
        self.matmul(other)
    }
}

/// Rectangle with sides directed along the axes
#[derive(Clone, Copy, PartialEq)]
pub struct Rect {
    left: Scalar,
    top: Scalar,
    right: Scalar,
    bottom: Scalar,
}

impl Rect {
    /// Construct rectangle from its sides, sides are reordered if needed
    pub fn from_ltrb(left: Scalar, top: Scalar, right: Scalar, bottom: Scalar) -> Self {
        Self {
            left: left.min(right),
            top: top.min(bottom),
            right: left.max(right),
            bottom: top.max(bottom),
        }
    }

    pub fn from_xywh(x: Scalar, y: Scalar, width: Scalar, height: Scalar) -> Self {
        Self::from_ltrb(x, y, x + width, y + height)
    }

    /// Rectangle `[0, width) x [0, height)`
    pub fn from_size(width: usize, height: usize) -> Self {
        Self::from_ltrb(0.0, 0.0, width as Scalar, height as Scalar)
    }

    #[inline]
    pub fn left(&self) -> Scalar {
        self.left
    }

    #[inline]
    pub fn top(&self) -> Scalar {
        self.top
    }

    #[inline]
    pub fn right(&self) -> Scalar {
        self.right
    }

    #[inline]
    pub fn bottom(&self) -> Scalar {
        self.bottom
    }

    #[inline]
    pub fn width(&self) -> Scalar {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> Scalar {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// Corners in clockwise order (in y-down space) starting from top-left
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right, self.top),
            Point::new(self.right, self.bottom),
            Point::new(self.left, self.bottom),
        ]
    }

    /// Bounding rectangle of the points, `None` if there are no points
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let init = Self::from_ltrb(first.x(), first.y(), first.x(), first.y());
        Some(rest.iter().fold(init, |rect, p| Self {
            left: rect.left.min(p.x()),
            top: rect.top.min(p.y()),
            right: rect.right.max(p.x()),
            bottom: rect.bottom.max(p.y()),
        }))
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rect x=")?;
        scalar_fmt(f, self.left)?;
        write!(f, ", y=")?;
        scalar_fmt(f, self.top)?;
        write!(f, ", w=")?;
        scalar_fmt(f, self.width())?;
        write!(f, ", h=")?;
        scalar_fmt(f, self.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_trasform() {
        let tr = Transform::identity()
            .translate(1.0, 2.0)
            .rotate(PI / 3.0)
            .scale(3.0, 2.0);
        let inv = tr.invert().unwrap();
        let p0 = Point::new(1.0, 1.0);

        let p1 = tr.apply(p0);
        let p2 = inv.apply(p1);
        assert_approx_eq!(p2.x(), 1.0, 1e-9);
        assert_approx_eq!(p2.y(), 1.0, 1e-9);

        let id = tr * inv;
        for (v0, v1) in id.coeffs().iter().zip(Transform::identity().coeffs().iter()) {
            assert_approx_eq!(v0, v1, 1e-9);
        }
    }

    #[test]
    fn test_invert_singular() {
        assert!(Transform::new_scale(0.0, 1.0).invert().is_none());
        assert!(Transform::new(1.0, 2.0, 0.0, 2.0, 4.0, 0.0).invert().is_none());
    }

    #[test]
    fn test_map_points() {
        let tr = Transform::new_translate(1.0, 2.0).scale(2.0, 3.0);
        let src = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        let mut dst = [Point::default(); 2];
        tr.map_points(&mut dst, &src);
        assert_eq!(dst[0], Point::new(1.0, 2.0));
        assert_eq!(dst[1], Point::new(3.0, 5.0));
    }

    #[test]
    fn test_from_basis() {
        let tr = Transform::from_basis(
            Point::new(2.0, 0.0),
            Point::new(0.0, 4.0),
            Point::new(1.0, 1.0),
        );
        assert_eq!(tr.apply(Point::new(1.0, 0.0)), Point::new(3.0, 1.0));
        assert_eq!(tr.apply(Point::new(0.0, 1.0)), Point::new(1.0, 5.0));
    }

    #[test]
    fn test_rect() {
        let rect = Rect::from_ltrb(4.0, 3.0, 1.0, 1.0);
        assert_eq!(rect.left(), 1.0);
        assert_eq!(rect.bottom(), 3.0);
        assert!(!rect.is_empty());
        assert!(Rect::from_xywh(0.0, 0.0, 0.0, 1.0).is_empty());

        let bounds = Rect::from_points(&[
            Point::new(1.0, 5.0),
            Point::new(-1.0, 2.0),
            Point::new(3.0, 0.0),
        ])
        .unwrap();
        assert_eq!(bounds, Rect::from_ltrb(-1.0, 0.0, 3.0, 5.0));
        assert!(Rect::from_points(&[]).is_none());
    }

    #[test]
    fn test_debug_fmt() {
        assert_eq!(format!("{:?}", Point::new(1.0, 0.5)), "1,0.5");
        assert_eq!(
            format!("{:?}", Transform::new_translate(1.0, -2.0)),
            "matrix(1 0 0 1 1 -2)"
        );
    }
}
