//! Path container and its decomposition into edges
use crate::{Cubic, EPSILON, Line, Point, Quad, Rect, Scalar, Transform};
use std::fmt;

/// Path building operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Start new contour, uses one point
    Move,
    /// Line from the last point, uses one point
    Line,
    /// Quadratic bezier curve from the last point, uses two points
    Quad,
    /// Cubic bezier curve from the last point, uses three points
    Cubic,
    /// Explicitly close the current contour, uses no points
    Close,
}

/// Orientation of the contours produced by `add_rect` and `add_circle` in y-down space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

/// Shape of the end points of a stroked line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum LineCap {
    /// Line ends exactly at its end points
    #[default]
    Butt,
    /// Line is extended by half of its width
    Square,
    /// Half circle is added at each end
    Round,
}

/// Edge of the path produced by [`Path::edges`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathEdge {
    Line(Line),
    Quad(Quad),
    Cubic(Cubic),
}

impl PathEdge {
    /// Apply affine transformation to the edge
    pub fn transform(&self, tr: &Transform) -> Self {
        use crate::Curve;
        match self {
            PathEdge::Line(line) => PathEdge::Line(line.transform(tr)),
            PathEdge::Quad(quad) => PathEdge::Quad(quad.transform(tr)),
            PathEdge::Cubic(cubic) => PathEdge::Cubic(cubic.transform(tr)),
        }
    }
}

/// Sequence of contours made of lines and bezier curves
///
/// Every contour is implicitly closed when it is filled.
#[derive(Clone, PartialEq, Default)]
pub struct Path {
    points: Vec<Point>,
    verbs: Vec<Verb>,
    // index of the point of the last move
    contour_start: usize,
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.verbs.is_empty() {
            write!(f, "Empty")
        } else {
            write!(f, "Path({})", self)
        }
    }
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn verbs(&self) -> &[Verb] {
        &self.verbs
    }

    pub fn count_points(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Remove all contours
    pub fn reset(&mut self) {
        self.points.clear();
        self.verbs.clear();
        self.contour_start = 0;
    }

    /// Last point of the path
    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }

    // segments always continue some contour
    fn ensure_contour(&mut self) {
        match self.verbs.last() {
            None => {
                self.move_to(Point::new(0.0, 0.0));
            }
            Some(Verb::Close) => {
                let start = self.points[self.contour_start];
                self.move_to(start);
            }
            _ => {}
        }
    }

    /// Start new contour at `p`
    pub fn move_to(&mut self, p: impl Into<Point>) -> &mut Self {
        self.contour_start = self.points.len();
        self.points.push(p.into());
        self.verbs.push(Verb::Move);
        self
    }

    /// Add line from the last point to `p`
    pub fn line_to(&mut self, p: impl Into<Point>) -> &mut Self {
        self.ensure_contour();
        self.points.push(p.into());
        self.verbs.push(Verb::Line);
        self
    }

    /// Add quadratic bezier curve with control point `p1` ending at `p2`
    pub fn quad_to(&mut self, p1: impl Into<Point>, p2: impl Into<Point>) -> &mut Self {
        self.ensure_contour();
        self.points.extend([p1.into(), p2.into()]);
        self.verbs.push(Verb::Quad);
        self
    }

    /// Add cubic bezier curve with control points `p1`, `p2` ending at `p3`
    pub fn cubic_to(
        &mut self,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
    ) -> &mut Self {
        self.ensure_contour();
        self.points.extend([p1.into(), p2.into(), p3.into()]);
        self.verbs.push(Verb::Cubic);
        self
    }

    /// Close current contour, next segment starts from the contour start point
    pub fn close(&mut self) -> &mut Self {
        if matches!(
            self.verbs.last(),
            Some(Verb::Line | Verb::Quad | Verb::Cubic)
        ) {
            self.verbs.push(Verb::Close);
        }
        self
    }

    /// Add rectangle as a new contour starting at its top-left corner
    pub fn add_rect(&mut self, rect: Rect, dir: Direction) -> &mut Self {
        let [tl, tr, br, bl] = rect.corners();
        self.move_to(tl);
        match dir {
            Direction::Clockwise => self.line_to(tr).line_to(br).line_to(bl),
            Direction::CounterClockwise => self.line_to(bl).line_to(br).line_to(tr),
        }
    }

    /// Add polygon as a new contour, polygons with less than three points are ignored
    pub fn add_polygon(&mut self, points: &[Point]) -> &mut Self {
        if points.len() < 3 {
            return self;
        }
        self.move_to(points[0]);
        for point in &points[1..] {
            self.line_to(*point);
        }
        self
    }

    /// Add circle as a new contour made of four cubic curves, starts at the bottom most point
    pub fn add_circle(&mut self, center: Point, radius: Scalar, dir: Direction) -> &mut Self {
        // control points are chosen to minimize radial error of the approximation
        const A: Scalar = 1.00005519;
        const B: Scalar = 0.55342686;
        const C: Scalar = 0.99873585;
        #[rustfmt::skip]
        let unit = [
            Point::new(0.0, A), Point::new(B, C), Point::new(C, B),
            Point::new(A, 0.0), Point::new(C, -B), Point::new(B, -C),
            Point::new(0.0, -A), Point::new(-B, -C), Point::new(-C, -B),
            Point::new(-A, 0.0), Point::new(-C, B), Point::new(-B, C),
            Point::new(0.0, A),
        ];
        let tr = Transform::new_translate(center.x(), center.y()).scale(radius, radius);
        let mut points = [Point::default(); 13];
        tr.map_points(&mut points, &unit);

        self.move_to(points[0]);
        match dir {
            Direction::CounterClockwise => {
                for index in (1..13).step_by(3) {
                    self.cubic_to(points[index], points[index + 1], points[index + 2]);
                }
            }
            Direction::Clockwise => {
                for index in (2..12).rev().step_by(3) {
                    self.cubic_to(points[index], points[index - 1], points[index - 2]);
                }
            }
        }
        self
    }

    /// Add stroked line segment of the given `width` with specified caps
    ///
    /// Body of the line is a clockwise quadrilateral, round caps are clockwise circles
    /// so the union is filled correctly with the winding rule.
    pub fn add_line(&mut self, p0: Point, p1: Point, width: Scalar, cap: LineCap) -> &mut Self {
        let length = p0.dist(p1);
        if length <= EPSILON || width <= 0.0 {
            return self;
        }
        let half = width / 2.0;
        let dir = (p1 - p0) / length;
        let normal = Point::new(-dir.y(), dir.x()) * half;
        let (start, end) = match cap {
            LineCap::Square => (p0 - dir * half, p1 + dir * half),
            LineCap::Butt | LineCap::Round => (p0, p1),
        };
        self.add_polygon(&[start - normal, end - normal, end + normal, start + normal]);
        if cap == LineCap::Round {
            self.add_circle(p0, half, Direction::Clockwise);
            self.add_circle(p1, half, Direction::Clockwise);
        }
        self
    }

    /// Bounding box of all points (including control points)
    pub fn bounds(&self) -> Option<Rect> {
        Rect::from_points(&self.points)
    }

    /// Apply transformation to all points of the path
    pub fn transform(&mut self, tr: &Transform) -> &mut Self {
        for point in self.points.iter_mut() {
            *point = tr.apply(*point);
        }
        self
    }

    /// Iterator over all edges of the path, each contour is implicitly closed
    pub fn edges(&self) -> PathEdgeIter<'_> {
        PathEdgeIter {
            path: self,
            verb: 0,
            point: 0,
            start: Point::default(),
            last: Point::default(),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut points = self.points.iter();
        let mut next = || points.next().ok_or(fmt::Error);
        let mut prev_verb: Option<Verb> = None;
        for (index, verb) in self.verbs.iter().enumerate() {
            if index != 0 {
                write!(f, " ")?;
            }
            if prev_verb != Some(*verb) || matches!(verb, Verb::Move | Verb::Close) {
                match verb {
                    Verb::Move => write!(f, "M")?,
                    Verb::Line => write!(f, "L")?,
                    Verb::Quad => write!(f, "Q")?,
                    Verb::Cubic => write!(f, "C")?,
                    Verb::Close => write!(f, "Z")?,
                }
            }
            prev_verb = Some(*verb);
            match verb {
                Verb::Move | Verb::Line => write!(f, "{:?}", next()?)?,
                Verb::Quad => write!(f, "{:?} {:?}", next()?, next()?)?,
                Verb::Cubic => write!(f, "{:?} {:?} {:?}", next()?, next()?, next()?)?,
                Verb::Close => {}
            }
        }
        Ok(())
    }
}

pub struct PathEdgeIter<'a> {
    path: &'a Path,
    verb: usize,
    point: usize,
    start: Point,
    last: Point,
}

impl PathEdgeIter<'_> {
    fn close_contour(&mut self) -> Option<PathEdge> {
        if self.last == self.start {
            return None;
        }
        let line = Line([self.last, self.start]);
        self.last = self.start;
        Some(PathEdge::Line(line))
    }

    fn take_points<const N: usize>(&mut self) -> [Point; N] {
        let mut result = [Point::default(); N];
        result.copy_from_slice(&self.path.points[self.point..self.point + N]);
        self.point += N;
        result
    }
}

impl Iterator for PathEdgeIter<'_> {
    type Item = PathEdge;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(verb) = self.path.verbs.get(self.verb) else {
                return self.close_contour();
            };
            match verb {
                Verb::Move => {
                    if let Some(edge) = self.close_contour() {
                        return Some(edge);
                    }
                    let [p0] = self.take_points();
                    self.verb += 1;
                    self.start = p0;
                    self.last = p0;
                }
                Verb::Line => {
                    let [p1] = self.take_points();
                    self.verb += 1;
                    let edge = PathEdge::Line(Line([self.last, p1]));
                    self.last = p1;
                    return Some(edge);
                }
                Verb::Quad => {
                    let [p1, p2] = self.take_points();
                    self.verb += 1;
                    let edge = PathEdge::Quad(Quad([self.last, p1, p2]));
                    self.last = p2;
                    return Some(edge);
                }
                Verb::Cubic => {
                    let [p1, p2, p3] = self.take_points();
                    self.verb += 1;
                    let edge = PathEdge::Cubic(Cubic([self.last, p1, p2, p3]));
                    self.last = p3;
                    return Some(edge);
                }
                Verb::Close => {
                    self.verb += 1;
                    if let Some(edge) = self.close_contour() {
                        return Some(edge);
                    }
                }
            }
        }
    }
}

/// Split quadratic curve at `t`, result is `[A, AB, ABC, BC, C]` where the first
/// three points are the first half and the last three are the second half.
pub fn chop_quad_at(src: [Point; 3], t: Scalar) -> [Point; 5] {
    let [a, b, c] = src;
    let ab = a.lerp(b, t);
    let bc = b.lerp(c, t);
    let abc = ab.lerp(bc, t);
    [a, ab, abc, bc, c]
}

/// Split cubic curve at `t`, result is `[A, AB, ABC, ABCD, BCD, CD, D]` where the
/// first four points are the first half and the last four are the second half.
pub fn chop_cubic_at(src: [Point; 4], t: Scalar) -> [Point; 7] {
    let [a, b, c, d] = src;
    let ab = a.lerp(b, t);
    let bc = b.lerp(c, t);
    let cd = c.lerp(d, t);
    let abc = ab.lerp(bc, t);
    let bcd = bc.lerp(cd, t);
    let abcd = abc.lerp(bcd, t);
    [a, ab, abc, abcd, bcd, cd, d]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Curve, assert_approx_eq};

    fn lines(path: &Path) -> Vec<[Point; 2]> {
        path.edges()
            .map(|edge| match edge {
                PathEdge::Line(line) => line.points(),
                edge => panic!("line expected: {:?}", edge),
            })
            .collect()
    }

    #[test]
    fn test_edges_implicit_close() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0))
            .line_to((10.0, 0.0))
            .line_to((10.0, 10.0))
            .move_to((20.0, 20.0))
            .line_to((30.0, 20.0))
            .line_to((20.0, 30.0));
        let p = Point::new;
        assert_eq!(
            lines(&path),
            vec![
                [p(0.0, 0.0), p(10.0, 0.0)],
                [p(10.0, 0.0), p(10.0, 10.0)],
                [p(10.0, 10.0), p(0.0, 0.0)],
                [p(20.0, 20.0), p(30.0, 20.0)],
                [p(30.0, 20.0), p(20.0, 30.0)],
                [p(20.0, 30.0), p(20.0, 20.0)],
            ]
        );
        // restartable
        assert_eq!(path.edges().count(), 6);
    }

    #[test]
    fn test_close_continues_from_start() {
        let mut path = Path::new();
        path.move_to((1.0, 1.0))
            .line_to((5.0, 1.0))
            .line_to((5.0, 5.0))
            .close()
            .line_to((1.0, 8.0));
        assert_eq!(
            path.verbs(),
            &[
                Verb::Move,
                Verb::Line,
                Verb::Line,
                Verb::Close,
                Verb::Move,
                Verb::Line
            ]
        );
        let edges = lines(&path);
        assert_eq!(edges.len(), 5);
        assert_eq!(edges[2], [Point::new(5.0, 5.0), Point::new(1.0, 1.0)]);
        assert_eq!(edges[3], [Point::new(1.0, 1.0), Point::new(1.0, 8.0)]);
    }

    #[test]
    fn test_add_rect() {
        let rect = Rect::from_ltrb(1.0, 2.0, 3.0, 4.0);
        let mut cw = Path::new();
        cw.add_rect(rect, Direction::Clockwise);
        assert_eq!(
            cw.points(),
            &[
                Point::new(1.0, 2.0),
                Point::new(3.0, 2.0),
                Point::new(3.0, 4.0),
                Point::new(1.0, 4.0)
            ]
        );
        let mut ccw = Path::new();
        ccw.add_rect(rect, Direction::CounterClockwise);
        assert_eq!(ccw.points()[1], Point::new(1.0, 4.0));
        assert_eq!(cw.bounds(), Some(rect));
        assert_eq!(Path::new().bounds(), None);
    }

    #[test]
    fn test_add_polygon() {
        let mut path = Path::new();
        path.add_polygon(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert!(path.is_empty());
        path.add_polygon(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ]);
        assert_eq!(path.count_points(), 3);
        assert_eq!(path.edges().count(), 3);
    }

    #[test]
    fn test_add_circle() {
        let center = Point::new(10.0, 20.0);
        for dir in [Direction::Clockwise, Direction::CounterClockwise] {
            let mut path = Path::new();
            path.add_circle(center, 5.0, dir);
            assert_eq!(path.count_points(), 13);
            let edges: Vec<_> = path.edges().collect();
            assert_eq!(edges.len(), 4);
            for edge in edges {
                let PathEdge::Cubic(cubic) = edge else {
                    panic!("cubic expected")
                };
                for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
                    assert_approx_eq!(cubic.at(t).dist(center), 5.0, 1e-2);
                }
            }
        }
        // clockwise in y-down space goes from the bottom to the left
        let mut path = Path::new();
        path.add_circle(center, 5.0, Direction::Clockwise);
        assert!(path.points()[3].x() < center.x());
        let mut path = Path::new();
        path.add_circle(center, 5.0, Direction::CounterClockwise);
        assert!(path.points()[3].x() > center.x());
    }

    #[test]
    fn test_add_line() {
        let mut path = Path::new();
        path.add_line(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 2.0, LineCap::Butt);
        assert_eq!(path.bounds(), Some(Rect::from_ltrb(0.0, -1.0, 10.0, 1.0)));

        let mut path = Path::new();
        path.add_line(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 2.0, LineCap::Square);
        assert_eq!(path.bounds(), Some(Rect::from_ltrb(-1.0, -1.0, 11.0, 1.0)));

        let mut path = Path::new();
        path.add_line(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 2.0, LineCap::Round);
        assert_eq!(path.edges().count(), 4 + 2 * 4);

        let mut path = Path::new();
        path.add_line(Point::new(1.0, 1.0), Point::new(1.0, 1.0), 2.0, LineCap::Round);
        assert!(path.is_empty());
    }

    #[test]
    fn test_chop() {
        let quad = [
            Point::new(0.0, 0.0),
            Point::new(2.0, 4.0),
            Point::new(4.0, 0.0),
        ];
        let chopped = chop_quad_at(quad, 0.25);
        let (q0, q1) = Quad(quad).split_at(0.25);
        assert_eq!(&chopped[..3], &q0.points());
        assert!(chopped[2].is_close_to(q1.start()));

        let cubic = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 3.0),
            Point::new(3.0, 3.0),
            Point::new(4.0, 0.0),
        ];
        let chopped = chop_cubic_at(cubic, 0.5);
        assert!(chopped[3].is_close_to(Cubic(cubic).at(0.5)));
        assert_eq!(chopped[0], cubic[0]);
        assert_eq!(chopped[6], cubic[3]);
    }

    #[test]
    fn test_display() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0))
            .line_to((10.0, 0.0))
            .line_to((10.0, 10.5))
            .quad_to((5.0, 15.0), (0.0, 10.0))
            .close();
        assert_eq!(path.to_string(), "M0,0 L10,0 10,10.5 Q5,15 0,10 Z");
    }

    #[test]
    fn test_transform() {
        let mut path = Path::new();
        path.add_rect(Rect::from_ltrb(0.0, 0.0, 1.0, 1.0), Direction::Clockwise);
        path.transform(&Transform::new_scale(2.0, 3.0));
        assert_eq!(path.bounds(), Some(Rect::from_ltrb(0.0, 0.0, 2.0, 3.0)));
        let edge = path.edges().next().unwrap();
        let moved = edge.transform(&Transform::new_translate(1.0, 1.0));
        assert_eq!(
            moved,
            PathEdge::Line(Line([Point::new(1.0, 1.0), Point::new(3.0, 1.0)]))
        );
    }
}
