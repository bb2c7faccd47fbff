//! Construction of device space edges clipped against the device bounds
use crate::{Curve, Point, Rect, Scalar, utils::round_to_int};

/// Monotonic in y line segment covering scanlines `[top, bottom)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// First scanline crossed by the edge
    pub top: i32,
    /// Scanline after the last one crossed by the edge
    pub bottom: i32,
    /// Change of `x` per scanline
    pub m: Scalar,
    /// Intersection of the edge with the center of the current scanline
    pub cur_x: Scalar,
    /// `1` if the edge was directed downwards, `-1` otherwise
    pub winding: i32,
}

impl Edge {
    /// Create edge between two points, `None` if it does not cross the center of any scanline
    pub fn new(p0: Point, p1: Point, winding: i32) -> Option<Self> {
        let (p0, p1) = if p0.y() > p1.y() { (p1, p0) } else { (p0, p1) };
        let top = round_to_int(p0.y());
        let bottom = round_to_int(p1.y());
        if top >= bottom {
            return None;
        }
        let m = (p1.x() - p0.x()) / (p1.y() - p0.y());
        let cur_x = p0.x() + m * (top as Scalar - p0.y() + 0.5);
        Some(Self {
            top,
            bottom,
            m,
            cur_x,
            winding,
        })
    }

    /// Whether `y` is the last scanline crossed by the edge
    #[inline]
    pub fn is_last(&self, y: i32) -> bool {
        y >= self.bottom - 1
    }

    /// Whether the edge crosses scanline `y`
    #[inline]
    pub fn is_active(&self, y: i32) -> bool {
        self.top <= y && y < self.bottom
    }

    /// Move intersection to the next scanline
    #[inline]
    pub fn advance(&mut self) {
        self.cur_x += self.m;
    }

    /// Order in which edges become active
    pub fn activation_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.top
            .cmp(&other.top)
            .then_with(|| self.cur_x.total_cmp(&other.cur_x))
    }
}

/// Clip line segment against `bounds`, resulting edges are pushed into `edges`
///
/// Parts of the segment to the left or right of the bounds are projected on the
/// corresponding side, so the winding of any point inside the bounds is preserved.
pub fn clip(p0: Point, p1: Point, bounds: &Rect, edges: &mut Vec<Edge>) {
    if p0.y() == p1.y() {
        return;
    }
    let (mut p0, mut p1, winding) = if p0.y() > p1.y() {
        (p1, p0, -1)
    } else {
        (p0, p1, 1)
    };
    if p1.y() < bounds.top() || p0.y() > bounds.bottom() {
        return;
    }

    // clip vertically
    if p0.y() < bounds.top() {
        let x = p0.x() + (p1.x() - p0.x()) * (bounds.top() - p0.y()) / (p1.y() - p0.y());
        p0 = Point::new(x, bounds.top());
    }
    if p1.y() > bounds.bottom() {
        let x = p1.x() + (p0.x() - p1.x()) * (p1.y() - bounds.bottom()) / (p1.y() - p0.y());
        p1 = Point::new(x, bounds.bottom());
    }

    // clip horizontally, from now on points are ordered by x
    if p0.x() > p1.x() {
        std::mem::swap(&mut p0, &mut p1);
    }
    if p1.x() <= bounds.left() {
        edges.extend(Edge::new(
            Point::new(bounds.left(), p0.y()),
            Point::new(bounds.left(), p1.y()),
            winding,
        ));
        return;
    }
    if p0.x() >= bounds.right() {
        edges.extend(Edge::new(
            Point::new(bounds.right(), p0.y()),
            Point::new(bounds.right(), p1.y()),
            winding,
        ));
        return;
    }
    if p0.x() < bounds.left() {
        let phantom = Point::new(bounds.left(), p0.y());
        let y = p0.y() + (p1.y() - p0.y()) * (bounds.left() - p0.x()) / (p1.x() - p0.x());
        p0 = Point::new(bounds.left(), y);
        edges.extend(Edge::new(phantom, p0, winding));
    }
    if p1.x() > bounds.right() {
        let phantom = Point::new(bounds.right(), p1.y());
        let y = p1.y() + (p0.y() - p1.y()) * (p1.x() - bounds.right()) / (p1.x() - p0.x());
        p1 = Point::new(bounds.right(), y);
        edges.extend(Edge::new(phantom, p1, winding));
    }
    edges.extend(Edge::new(p0, p1, winding));
}

/// Clip closed polygon, last point is connected to the first one
pub fn clip_polygon(points: &[Point], bounds: &Rect, edges: &mut Vec<Edge>) {
    let Some(last) = points.last() else {
        return;
    };
    let mut prev = *last;
    for point in points.iter().copied() {
        clip(prev, point, bounds, edges);
        prev = point;
    }
}

/// Flatten curve and clip resulting lines
pub fn clip_curve(curve: impl Curve, bounds: &Rect, edges: &mut Vec<Edge>) {
    for line in curve.flatten() {
        let [p0, p1] = line.points();
        clip(p0, p1, bounds, edges);
    }
}
