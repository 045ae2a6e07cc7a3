use crate::curve::Curve;
use crate::tolerance::EPSILON;
use crate::transform::AffineExt;
use crate::utils::{normalized, perp_dot, rotate_90};
use crate::{GeomError, GeomResult, Point, Transform, Vector};

use core::ops::Range;

/// A linear segment between two points.
///
/// The same type stands for the infinite line through both points wherever an
/// algorithm takes a line extent as a separate argument.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    #[inline]
    pub fn new(start: Point, end: Point) -> Self {
        Line { start, end }
    }

    /// A line through `origin` pointing along `direction`, one unit of
    /// `direction` long.
    #[inline]
    pub fn with_direction(origin: Point, direction: Vector) -> Self {
        Line {
            start: origin,
            end: origin + direction,
        }
    }

    /// True if both end points are equal within the shared epsilon.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.to_vector().square_length() <= EPSILON * EPSILON
    }

    #[inline]
    pub fn to_vector(&self) -> Vector {
        self.end - self.start
    }

    /// Unit direction from start to end, `None` for a degenerate line.
    #[inline]
    pub fn direction(&self) -> Option<Vector> {
        normalized(self.to_vector())
    }

    /// Unit normal, a quarter turn counter-clockwise from the direction.
    #[inline]
    pub fn normal(&self) -> Option<Vector> {
        self.direction().map(rotate_90)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.to_vector().length()
    }

    #[inline]
    pub fn square_length(&self) -> f64 {
        self.to_vector().square_length()
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        self.start.lerp(self.end, 0.5)
    }

    /// Sample the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: f64) -> Point {
        self.start.lerp(self.end, t)
    }

    /// Returns the same segment travelled from end to start.
    #[inline]
    pub fn reversed(&self) -> Self {
        Line {
            start: self.end,
            end: self.start,
        }
    }

    /// `dy / dx`, infinite for vertical lines.
    pub fn slope(&self) -> f64 {
        let v = self.to_vector();
        if v.x.abs() <= EPSILON {
            return f64::INFINITY;
        }

        v.y / v.x
    }

    /// Distance from `p` to the infinite line, positive on the left side.
    pub fn signed_distance(&self, p: Point) -> Option<f64> {
        let d = self.direction()?;
        Some(perp_dot(d, p - self.start))
    }

    /// Parameter of the orthogonal projection of `p` on the infinite line.
    pub fn project_t(&self, p: Point) -> Option<f64> {
        if self.is_degenerate() {
            return None;
        }
        let v = self.to_vector();
        Some((p - self.start).dot(v) / v.square_length())
    }

    /// Point of the infinite line closest to `p`.
    pub fn project(&self, p: Point) -> Point {
        match self.project_t(p) {
            Some(t) => self.sample(t),
            None => self.start,
        }
    }

    pub fn solve_t_for_x(&self, x: f64) -> Option<f64> {
        let dx = self.end.x - self.start.x;
        if dx.abs() <= EPSILON {
            return None;
        }

        Some((x - self.start.x) / dx)
    }

    pub fn solve_t_for_y(&self, y: f64) -> Option<f64> {
        let dy = self.end.y - self.start.y;
        if dy.abs() <= EPSILON {
            return None;
        }

        Some((y - self.start.y) / dy)
    }

    /// Split this segment into two sub-segments.
    pub fn split(&self, t: f64) -> (Line, Line) {
        let split_point = self.sample(t);

        (
            Line::new(self.start, split_point),
            Line::new(split_point, self.end),
        )
    }

    /// Return the sub-segment inside a given range of t.
    pub fn split_range(&self, t_range: Range<f64>) -> Line {
        Line::new(self.sample(t_range.start), self.sample(t_range.end))
    }

    /// True if `p` lies on the segment within `tolerance`.
    pub fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        self.closest(p).distance_to(p) <= tolerance
    }

    /// Point of the segment closest to `p`.
    pub fn closest(&self, p: Point) -> Point {
        match self.project_t(p) {
            Some(t) => self.sample(t.clamp(0.0, 1.0)),
            None => self.start,
        }
    }

    /// The components `(a, b, c)` of the normalized implicit equation
    /// `a·x + b·y + c = 0`, with `(a, b)` the unit normal.
    pub fn equation(&self) -> Option<(f64, f64, f64)> {
        let n = self.normal()?;
        Some((n.x, n.y, -n.dot(self.start.to_vector())))
    }

    #[inline]
    pub fn transform(&self, transform: &Transform) -> Self {
        Line {
            start: transform.apply_point(self.start),
            end: transform.apply_point(self.end),
        }
    }

    fn degenerate(operation: &'static str) -> GeomError {
        GeomError::Degenerate {
            curve: "line",
            operation,
        }
    }
}

impl Curve for Line {
    fn name(&self) -> &'static str {
        "line"
    }

    fn is_closed(&self) -> bool {
        false
    }

    fn length(&self) -> GeomResult<f64> {
        Ok(Line::length(self))
    }

    fn signed_area(&self) -> GeomResult<f64> {
        Ok(0.0)
    }

    fn point_at(&self, t: f64) -> GeomResult<Point> {
        Ok(self.sample(t))
    }

    fn direction_at(&self, _t: f64) -> GeomResult<Vector> {
        if self.is_degenerate() {
            return Err(Line::degenerate("direction"));
        }
        Ok(self.to_vector())
    }

    fn tangent_at(&self, _p: Point) -> GeomResult<Vector> {
        self.direction().ok_or(Line::degenerate("tangent"))
    }

    fn closest_point(&self, p: Point) -> GeomResult<Point> {
        Ok(self.closest(p))
    }

    fn position_of(&self, p: Point) -> GeomResult<f64> {
        self.project_t(p)
            .map(|t| t.clamp(0.0, 1.0))
            .ok_or(Line::degenerate("position"))
    }

    fn transformed(&self, transform: &Transform) -> Option<Self> {
        Some(self.transform(transform))
    }
}

#[cfg(test)]
use crate::test_utils::{fuzzy_eq, fuzzy_eq_point, fuzzy_eq_vector};
#[cfg(test)]
use crate::{point, vector};

#[test]
fn sample_and_project() {
    let l = Line::new(point(0.0, 0.0), point(10.0, 0.0));
    assert_eq!(l.point_at(0.25), Ok(point(2.5, 0.0)));
    assert_eq!(l.closest(point(-3.0, 2.0)), point(0.0, 0.0));
    assert_eq!(l.closest(point(4.0, 2.0)), point(4.0, 0.0));
    assert_eq!(l.position_of(point(12.0, 1.0)), Ok(1.0));
    assert_eq!(l.project_t(point(12.0, 1.0)), Some(1.2));
    assert_eq!(l.distance(point(4.0, -2.0)), Ok(2.0));
}

#[test]
fn signed_distance_side() {
    let l = Line::new(point(0.0, 0.0), point(0.0, 5.0));
    assert!(fuzzy_eq(l.signed_distance(point(-2.0, 1.0)).unwrap(), 2.0, 1e-12));
    assert!(fuzzy_eq(l.signed_distance(point(3.0, 1.0)).unwrap(), -3.0, 1e-12));
    assert_eq!(l.slope(), f64::INFINITY);
    assert!(fuzzy_eq_vector(l.normal().unwrap(), vector(-1.0, 0.0), 1e-12));

    let (a, b, c) = Line::new(point(0.0, 1.0), point(1.0, 2.0)).equation().unwrap();
    assert!(fuzzy_eq(a * 3.0 + b * 4.0 + c, 0.0, 1e-12));
}

#[test]
fn degenerate_line() {
    let p = point(1.0, 1.0);
    let l = Line::new(p, p);
    assert!(l.is_degenerate());
    assert!(l.direction().is_none());
    assert!(matches!(l.tangent_at(p), Err(GeomError::Degenerate { .. })));
    assert!(matches!(l.position_of(p), Err(GeomError::Degenerate { .. })));
    assert_eq!(l.closest_point(point(5.0, 5.0)), Ok(p));
    assert_eq!(Curve::length(&l), Ok(0.0));
}

#[test]
fn split_segment() {
    let l = Line::new(point(0.0, 0.0), point(4.0, 2.0));
    let (a, b) = l.split(0.5);
    assert_eq!(a.end, point(2.0, 1.0));
    assert_eq!(b.start, point(2.0, 1.0));
    let sub = l.split_range(0.25..0.75);
    assert!(fuzzy_eq_point(sub.start, point(1.0, 0.5), 1e-12));
    assert!(fuzzy_eq_point(sub.end, point(3.0, 1.5), 1e-12));
    assert_eq!(l.solve_t_for_x(1.0), Some(0.25));
    assert_eq!(l.reversed().reversed(), l);
}

#[test]
fn transform_always_succeeds() {
    let l = Line::new(point(1.0, 2.0), point(3.0, -1.0));
    assert_eq!(l.transformed(&Transform::identity()), Some(l));
    let t = Transform::new(2.0, 0.5, 0.0, 3.0, 1.0, 1.0);
    let m = l.transformed(&t).unwrap();
    assert!(fuzzy_eq_point(m.start, t.apply_point(l.start), 1e-12));
}
