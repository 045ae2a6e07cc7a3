//! Lines and circles tangent to points, lines and circles.
//!
//! The problems of Apollonius, in three families:
//!
//! - [`tan_tan_line`]: lines tangent to two objects,
//! - [`tan_tan_rad_circle`]: circles of a given radius tangent to two objects,
//! - [`tan_tan_tan_circle`]: circles tangent to three objects.
//!
//! "Tangent to a point" means going through it, and lines are infinite. Each
//! solver enumerates the sides of the input objects the solution can touch
//! (the sign cases) and solves every case in closed form, in a frame where the
//! first object sits at the origin and the configuration lies along the x
//! axis. An empty result means that there is no solution.

pub mod tan_tan_line;
pub mod tan_tan_rad_circle;
pub mod tan_tan_tan_circle;

pub use self::tan_tan_rad_circle::tan_tan_rad_circle;
pub use self::tan_tan_tan_circle::tan_tan_tan_circle;

use crate::geom::tolerance::EPSILON;
use crate::geom::transform::Frame;
use crate::geom::{Circle, Line};
use crate::math::{point, Point};

/// Two solutions closer than this, in center and in radius, are merged.
pub const DEDUP_TOLERANCE: f64 = 1e-9;

/// An input object of the tangency problems.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Primitive {
    Point(Point),
    /// The infinite line through both points.
    Line(Line),
    Circle(Circle),
}

impl Primitive {
    /// Position of the object used to build the canonical frame.
    pub(crate) fn anchor(&self) -> Point {
        match self {
            Primitive::Point(p) => *p,
            Primitive::Line(l) => l.start,
            Primitive::Circle(c) => c.center,
        }
    }
}

impl From<Point> for Primitive {
    fn from(p: Point) -> Self {
        Primitive::Point(p)
    }
}

impl From<Line> for Primitive {
    fn from(l: Line) -> Self {
        Primitive::Line(l)
    }
}

impl From<Circle> for Primitive {
    fn from(c: Circle) -> Self {
        Primitive::Circle(c)
    }
}

/// True if `circle` touches `primitive` within `tolerance`: goes through a
/// point, is at a distance of its radius from a line, or touches a circle from
/// the inside or the outside.
pub fn is_tangent(circle: &Circle, primitive: &Primitive, tolerance: f64) -> bool {
    let r = circle.radius;
    match primitive {
        Primitive::Point(p) => (circle.center.distance_to(*p) - r).abs() <= tolerance,
        Primitive::Line(line) => match line.signed_distance(circle.center) {
            Some(d) => (d.abs() - r).abs() <= tolerance,
            None => false,
        },
        Primitive::Circle(other) => {
            let d = circle.center.distance_to(other.center);
            (d - (r + other.radius)).abs() <= tolerance || (d - (r - other.radius).abs()).abs() <= tolerance
        }
    }
}

/// Accumulates the solutions of a tangency problem.
///
/// Circles of zero radius (or not finite) are dropped, and a circle equal to
/// an existing one within the tolerance is only kept once.
#[derive(Clone, Debug)]
pub struct CircleSet {
    circles: Vec<Circle>,
    tolerance: f64,
}

impl CircleSet {
    pub fn new() -> Self {
        Self::with_tolerance(DEDUP_TOLERANCE)
    }

    pub fn with_tolerance(tolerance: f64) -> Self {
        CircleSet {
            circles: Vec::new(),
            tolerance,
        }
    }

    /// Adds a circle, returns true if it was not already in the set.
    pub fn add(&mut self, circle: Circle) -> bool {
        let valid = circle.radius > EPSILON
            && circle.radius.is_finite()
            && circle.center.x.is_finite()
            && circle.center.y.is_finite();
        if !valid {
            return false;
        }

        let tolerance = self.tolerance * (1.0 + circle.radius);
        let duplicate = self.circles.iter().any(|c| {
            (c.radius - circle.radius).abs() <= tolerance && c.center.distance_to(circle.center) <= tolerance
        });
        if duplicate {
            return false;
        }

        self.circles.push(circle);
        true
    }

    /// Adds a circle given in `frame` coordinates.
    pub(crate) fn add_local(&mut self, frame: &Frame, center: Point, radius: f64) -> bool {
        self.add(Circle::new(frame.to_world(center), radius))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.circles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<Circle> {
        self.circles.iter()
    }

    pub fn into_vec(self) -> Vec<Circle> {
        self.circles
    }
}

impl Default for CircleSet {
    fn default() -> Self {
        Self::new()
    }
}

impl<'l> IntoIterator for &'l CircleSet {
    type Item = &'l Circle;
    type IntoIter = core::slice::Iter<'l, Circle>;

    fn into_iter(self) -> Self::IntoIter {
        self.circles.iter()
    }
}

/// Points at distance `r1` from the origin and `r2` from `(d, 0)`, `d > 0`.
///
/// A negative discriminant that is small next to the squared lengths counts
/// as tangency.
pub(crate) fn circle_circle_points(d: f64, r1: f64, r2: f64) -> arrayvec::ArrayVec<Point, 2> {
    let mut result = arrayvec::ArrayVec::new();
    let x = (d * d + r1 * r1 - r2 * r2) / (2.0 * d);
    let y2 = r1 * r1 - x * x;
    if !y2.is_finite() || y2 < -EPSILON * (d * d + r1 * r1 + r2 * r2) {
        return result;
    }

    let y = y2.max(0.0).sqrt();
    result.push(point(x, y));
    if y > 0.0 {
        result.push(point(x, -y));
    }

    result
}

/// The sign of the sign case `case` for the input `bit`: `1` or `-1`.
#[inline]
pub(crate) fn side(case: u32, bit: u32) -> f64 {
    if case & (1 << bit) == 0 {
        1.0
    } else {
        -1.0
    }
}

#[test]
fn tangency_checks() {
    let circle = Circle::new(point(0.0, 0.0), 1.0);
    assert!(is_tangent(&circle, &Primitive::Point(point(0.0, 1.0)), 1e-12));
    assert!(!is_tangent(&circle, &Primitive::Point(point(0.0, 0.5)), 1e-12));
    assert!(is_tangent(
        &circle,
        &Primitive::Line(Line::new(point(-1.0, -1.0), point(1.0, -1.0))),
        1e-12
    ));
    assert!(is_tangent(&circle, &Primitive::Circle(Circle::new(point(3.0, 0.0), 2.0)), 1e-12));
    assert!(is_tangent(&circle, &Primitive::Circle(Circle::new(point(0.5, 0.0), 1.5)), 1e-12));
    assert!(!is_tangent(&circle, &Primitive::Circle(Circle::new(point(0.5, 0.0), 1.0)), 1e-12));
    let degenerate = Line::new(point(1.0, 1.0), point(1.0, 1.0));
    assert!(!is_tangent(&circle, &Primitive::Line(degenerate), 1e-6));
}

#[test]
fn circle_set() {
    let mut set = CircleSet::new();
    assert!(set.add(Circle::new(point(1.0, 1.0), 2.0)));
    assert!(!set.add(Circle::new(point(1.0, 1.0 + 1e-12), 2.0)));
    assert!(set.add(Circle::new(point(1.0, 1.0), 3.0)));
    assert!(!set.add(Circle::new(point(5.0, 1.0), 0.0)));
    assert!(!set.add(Circle::new(point(5.0, 1.0), f64::NAN)));
    assert_eq!(set.len(), 2);
}

#[test]
fn two_distances() {
    let points = circle_circle_points(4.0, 5.0, 3.0);
    assert_eq!(points.len(), 2);
    assert_eq!(points[0], point(4.0, 3.0));
    assert!(circle_circle_points(10.0, 1.0, 1.0).is_empty());
    assert_eq!(circle_circle_points(2.0, 1.0, 1.0).len(), 1);
}
