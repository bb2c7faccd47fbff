//! Bezier curves and their flattening into line segments
use crate::{Point, Scalar, Transform};
use std::fmt;

/// Maximum allowed distance between a curve and its flattened approximation (in pixels)
pub const FLATTEN_TOLERANCE: Scalar = 0.25;

/// Upper limit on the number of lines a single curve is flattened into
pub const MAX_SEGMENTS: usize = 1 << 16;

pub trait Curve: Sized + Copy {
    /// Point at which curve starts
    fn start(&self) -> Point;

    /// Point at which curve ends
    fn end(&self) -> Point;

    /// Evaluate curve at parameter value `t` in (0.0..=1.0)
    fn at(&self, t: Scalar) -> Point;

    /// Split the curve at prameter value `t`
    fn split_at(&self, t: Scalar) -> (Self, Self);

    /// Apply affine transformation to the curve
    fn transform(&self, tr: &Transform) -> Self;

    /// Number of lines needed to approximate the curve within [`FLATTEN_TOLERANCE`]
    fn segments_count(&self) -> usize;

    /// Convert curve to an iterator over line segments
    ///
    /// Curve is evaluated at uniformly distributed values of parameter, the last
    /// line always ends exactly at the curve end point.
    fn flatten(&self) -> CurveFlattenIter<Self> {
        CurveFlattenIter {
            curve: *self,
            index: 0,
            count: self.segments_count(),
            prev: self.start(),
        }
    }
}

// Convert estimated number of segments into a count, NaN and infinite estimates
// produced by degenerate input are bounded.
fn segments_from(estimate: Scalar) -> usize {
    if estimate.is_nan() {
        return 1;
    }
    (estimate.ceil() as usize).clamp(1, MAX_SEGMENTS)
}

pub struct CurveFlattenIter<C> {
    curve: C,
    index: usize,
    count: usize,
    prev: Point,
}

impl<C: Curve> Iterator for CurveFlattenIter<C> {
    type Item = Line;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }
        self.index += 1;
        let point = if self.index == self.count {
            self.curve.end()
        } else {
            self.curve
                .at(self.index as Scalar / self.count as Scalar)
        };
        let line = Line([self.prev, point]);
        self.prev = point;
        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.count - self.index;
        (size, Some(size))
    }
}

impl<C: Curve> ExactSizeIterator for CurveFlattenIter<C> {}

// -----------------------------------------------------------------------------
// Line
// -----------------------------------------------------------------------------

/// Line segment curve
#[derive(Clone, Copy, PartialEq)]
pub struct Line(pub [Point; 2]);

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Line([p0, p1]) = self;
        write!(f, "Line {:?} {:?}", p0, p1)
    }
}

impl Line {
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        Self([p0.into(), p1.into()])
    }

    /// Start and end points of the line
    pub fn points(&self) -> [Point; 2] {
        self.0
    }
}

impl Curve for Line {
    fn start(&self) -> Point {
        self.0[0]
    }

    fn end(&self) -> Point {
        self.0[1]
    }

    fn at(&self, t: Scalar) -> Point {
        let Self([p0, p1]) = *self;
        p0.lerp(p1, t)
    }

    fn split_at(&self, t: Scalar) -> (Self, Self) {
        let Self([p0, p1]) = *self;
        let mid = self.at(t);
        (Self([p0, mid]), Self([mid, p1]))
    }

    fn transform(&self, tr: &Transform) -> Self {
        let Self([p0, p1]) = *self;
        Self([tr.apply(p0), tr.apply(p1)])
    }

    fn segments_count(&self) -> usize {
        1
    }
}

// -----------------------------------------------------------------------------
// Quadratic bezier curve
// -----------------------------------------------------------------------------

/// Quadratic bezier curve
#[derive(Clone, Copy, PartialEq)]
pub struct Quad(pub [Point; 3]);

impl fmt::Debug for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Quad([p0, p1, p2]) = self;
        write!(f, "Quad {:?} {:?} {:?}", p0, p1, p2)
    }
}

impl Quad {
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>, p2: impl Into<Point>) -> Self {
        Self([p0.into(), p1.into(), p2.into()])
    }

    pub fn points(&self) -> [Point; 3] {
        self.0
    }
}

impl Curve for Quad {
    fn start(&self) -> Point {
        self.0[0]
    }

    fn end(&self) -> Point {
        self.0[2]
    }

    fn at(&self, t: Scalar) -> Point {
        // at(t) =
        //   (1 - t) ^ 2 * p0 +
        //   2 * (1 - t) * t * p1 +
        //   t ^ 2 * p2
        let Self([p0, p1, p2]) = *self;
        let (t1, t_1) = (t, 1.0 - t);
        let (t2, t_2) = (t1 * t1, t_1 * t_1);
        t_2 * p0 + 2.0 * t1 * t_1 * p1 + t2 * p2
    }

    fn split_at(&self, t: Scalar) -> (Self, Self) {
        // https://pomax.github.io/bezierinfo/#matrixsplit
        let Self([p0, p1, p2]) = *self;
        let (t1, t_1) = (t, 1.0 - t);
        let (t2, t_2) = (t1 * t1, t_1 * t_1);
        let mid = t_2 * p0 + 2.0 * t1 * t_1 * p1 + t2 * p2;
        (
            Self([p0, t_1 * p0 + t * p1, mid]),
            Self([mid, t_1 * p1 + t * p2, p2]),
        )
    }

    fn transform(&self, tr: &Transform) -> Self {
        let Self([p0, p1, p2]) = *self;
        Self([tr.apply(p0), tr.apply(p1), tr.apply(p2)])
    }

    /// Distance between the quad and a line evaluated at the same parameter is
    /// `(1 - t) t |p0 - 2 p1 + p2|`, for `k` uniform segments it is bounded by
    /// `|D| / k^2` where `D = (p0 - 2 p1 + p2) / 4`.
    fn segments_count(&self) -> usize {
        let Self([p0, p1, p2]) = *self;
        let d = (p0 - 2.0 * p1 + p2) * 0.25;
        segments_from((d.length() / FLATTEN_TOLERANCE).sqrt())
    }
}

// -----------------------------------------------------------------------------
// Cubic bezier curve
// -----------------------------------------------------------------------------

/// Cubic bezier curve
#[derive(Clone, Copy, PartialEq)]
pub struct Cubic(pub [Point; 4]);

impl fmt::Debug for Cubic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Cubic([p0, p1, p2, p3]) = self;
        write!(f, "Cubic {:?} {:?} {:?} {:?}", p0, p1, p2, p3)
    }
}

impl Cubic {
    pub fn new(
        p0: impl Into<Point>,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
    ) -> Self {
        Self([p0.into(), p1.into(), p2.into(), p3.into()])
    }

    pub fn points(&self) -> [Point; 4] {
        self.0
    }
}

impl Curve for Cubic {
    fn start(&self) -> Point {
        self.0[0]
    }

    fn end(&self) -> Point {
        self.0[3]
    }

    fn at(&self, t: Scalar) -> Point {
        // at(t) =
        //   (1 - t) ^ 3 * p0 +
        //   3 * (1 - t) ^ 2 * t * p1 +
        //   3 * (1 - t) * t ^ 2 * p2 +
        //   t ^ 3 * p3
        let Self([p0, p1, p2, p3]) = *self;
        let (t1, t_1) = (t, 1.0 - t);
        let (t2, t_2) = (t1 * t1, t_1 * t_1);
        let (t3, t_3) = (t2 * t1, t_2 * t_1);
        t_3 * p0 + 3.0 * t1 * t_2 * p1 + 3.0 * t2 * t_1 * p2 + t3 * p3
    }

    fn split_at(&self, t: Scalar) -> (Self, Self) {
        // https://pomax.github.io/bezierinfo/#matrixsplit
        let Self([p0, p1, p2, p3]) = *self;
        let (t1, t_1) = (t, 1.0 - t);
        let (t2, t_2) = (t1 * t1, t_1 * t_1);
        let (t3, t_3) = (t2 * t1, t_2 * t_1);
        let mid = t_3 * p0 + 3.0 * t1 * t_2 * p1 + 3.0 * t2 * t_1 * p2 + t3 * p3;
        let c0 = Self([
            p0,
            t_1 * p0 + t * p1,
            t_2 * p0 + 2.0 * t * t_1 * p1 + t2 * p2,
            mid,
        ]);
        let c1 = Self([
            mid,
            t_2 * p1 + 2.0 * t * t_1 * p2 + t2 * p3,
            t_1 * p2 + t * p3,
            p3,
        ]);
        (c0, c1)
    }

    fn transform(&self, tr: &Transform) -> Self {
        let Self([p0, p1, p2, p3]) = *self;
        Self([tr.apply(p0), tr.apply(p1), tr.apply(p2), tr.apply(p3)])
    }

    /// Wang's bound for the cubic: `k = sqrt(3 / 4 |E| / tolerance)` where
    /// `E` is the component-wise maximum of the second differences of control points.
    fn segments_count(&self) -> usize {
        let Self([p0, p1, p2, p3]) = *self;
        let e0 = p0 - 2.0 * p1 + p2;
        let e1 = p1 - 2.0 * p2 + p3;
        let e = Point::new(
            e0.x().abs().max(e1.x().abs()),
            e0.y().abs().max(e1.y().abs()),
        );
        segments_from((0.75 * e.length() / FLATTEN_TOLERANCE).sqrt())
    }
}
