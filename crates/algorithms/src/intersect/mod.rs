//! Intersection points between curves.
//!
//! Each pair of curves is solved in the frame of its *dominant* curve, the one
//! whose parameterization turns the other curve's implicit equation into the
//! simplest polynomial:
//!
//! | pair | solved by |
//! |---|---|
//! | line, line | [`line_line`] (Cramer's rule) |
//! | line, circle | [`circle_line`] |
//! | line, other conic | [`line_conic`] |
//! | circle, circle | [`circle_circle`] (radical line) |
//! | hyperbola, any conic | [`hyperbola_conic`] |
//! | parabola, any other conic | [`parabola_conic`] |
//! | ellipse, ellipse or circle | [`ellipse_ellipse`], [`ellipse_circle`] |
//! | ellipse or circle, general conic | [`ellipse_conic`] |
//! | general conic, general conic | [`conic_conic`] (pencil of conics) |
//!
//! Arcs are intersected through their supporting circle (or their chord when
//! they are straight) and the results outside of the arc are discarded.
//!
//! Every path collects its results in a [`PointSet`], since independent
//! algebraic branches often find the same geometric point twice. Degenerate
//! inputs (zero length lines, coincident circles) have no intersection.
//!
//! # Examples
//!
//! ```
//! use apollo_algorithms::intersect::intersect;
//! use apollo_algorithms::geom::{AnyCurve, Circle, Line};
//! use apollo_algorithms::math::point;
//!
//! let circle = AnyCurve::Circle(Circle::new(point(0.0, 0.0), 1.0));
//! let segment = AnyCurve::Line(Line::new(point(-2.0, 0.0), point(0.0, 0.0)));
//!
//! let points = intersect(&circle, &segment);
//! assert_eq!(points.len(), 1);
//! ```

mod circle;
mod conic;
mod ellipse;
mod hyperbola;
mod line;
mod parabola;

pub use self::circle::{circle_circle, circle_line};
pub use self::conic::conic_conic;
pub use self::ellipse::{ellipse_circle, ellipse_conic, ellipse_ellipse};
pub use self::hyperbola::hyperbola_conic;
pub use self::line::{line_conic, line_line};
pub use self::parabola::parabola_conic;

use crate::geom::tolerance::EPSILON;
use crate::geom::utils::angle_to;
use crate::geom::{AnyCurve, Arc, Circle, Conic, Ellipse, GeneralConic, Hyperbola, Line, Parabola, PointSet};
use crate::math::Point;

/// Parameters for the intersection algorithms.
///
/// The defaults are tuned for coordinates of moderate magnitude. Each
/// tolerance applies at a single step of the algorithms and they are kept
/// separate on purpose: the error accumulated by a change of frame is not the
/// error of a direct evaluation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct IntersectOptions {
    /// Two results closer than the square root of this are merged.
    ///
    /// Default value: `IntersectOptions::DEFAULT_DEDUP_TOLERANCE`.
    pub dedup_tolerance: f64,

    /// Residual accepted on the implicit equation of the second curve, in the
    /// standard position of an ellipse, hyperbola or parabola.
    ///
    /// Default value: `IntersectOptions::DEFAULT_ELLIPSE_TOLERANCE`.
    pub ellipse_tolerance: f64,

    /// Residual accepted on the unit circle an ellipse is mapped to.
    ///
    /// Default value: `IntersectOptions::DEFAULT_CIRCLE_TOLERANCE`.
    pub circle_tolerance: f64,

    /// Residual accepted on the original, unnormalized, equations of two
    /// general conics.
    ///
    /// Default value: `IntersectOptions::DEFAULT_PENCIL_TOLERANCE`.
    pub pencil_tolerance: f64,

    /// Distance, estimated to the first order, accepted between a point found
    /// through the pencil of two general conics and each of the conics.
    ///
    /// Default value: `IntersectOptions::DEFAULT_PENCIL_DISTANCE_TOLERANCE`.
    pub pencil_distance_tolerance: f64,
}

impl IntersectOptions {
    pub const DEFAULT_DEDUP_TOLERANCE: f64 = EPSILON;
    pub const DEFAULT_ELLIPSE_TOLERANCE: f64 = 1e-7;
    pub const DEFAULT_CIRCLE_TOLERANCE: f64 = EPSILON;
    pub const DEFAULT_PENCIL_TOLERANCE: f64 = 5.0;
    pub const DEFAULT_PENCIL_DISTANCE_TOLERANCE: f64 = 1e-6;

    pub const DEFAULT: Self = IntersectOptions {
        dedup_tolerance: Self::DEFAULT_DEDUP_TOLERANCE,
        ellipse_tolerance: Self::DEFAULT_ELLIPSE_TOLERANCE,
        circle_tolerance: Self::DEFAULT_CIRCLE_TOLERANCE,
        pencil_tolerance: Self::DEFAULT_PENCIL_TOLERANCE,
        pencil_distance_tolerance: Self::DEFAULT_PENCIL_DISTANCE_TOLERANCE,
    };

    #[inline]
    pub const fn with_dedup_tolerance(mut self, tolerance: f64) -> Self {
        self.dedup_tolerance = tolerance;
        self
    }

    #[inline]
    pub const fn with_ellipse_tolerance(mut self, tolerance: f64) -> Self {
        self.ellipse_tolerance = tolerance;
        self
    }

    #[inline]
    pub const fn with_circle_tolerance(mut self, tolerance: f64) -> Self {
        self.circle_tolerance = tolerance;
        self
    }

    #[inline]
    pub const fn with_pencil_tolerance(mut self, tolerance: f64) -> Self {
        self.pencil_tolerance = tolerance;
        self
    }

    #[inline]
    pub const fn with_pencil_distance_tolerance(mut self, tolerance: f64) -> Self {
        self.pencil_distance_tolerance = tolerance;
        self
    }

    pub(crate) fn point_set(&self) -> PointSet {
        PointSet::with_tolerance(self.dedup_tolerance)
    }
}

impl Default for IntersectOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The part of a line that takes part in an intersection, in terms of the
/// parameter `t` of `start + t·(end - start)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LineExtent {
    /// `t` in `[0, 1]`.
    Segment,
    /// `t` in `[0, ∞)`.
    Ray,
    /// Any `t`.
    Infinite,
}

impl LineExtent {
    /// True if the parameter `t` is within the extent, up to the shared
    /// epsilon.
    #[inline]
    pub fn contains(self, t: f64) -> bool {
        if !t.is_finite() {
            return false;
        }
        match self {
            LineExtent::Segment => t >= -EPSILON && t <= 1.0 + EPSILON,
            LineExtent::Ray => t >= -EPSILON,
            LineExtent::Infinite => true,
        }
    }
}

/// The curve an intersection is actually computed on.
#[derive(Copy, Clone, Debug)]
enum Support {
    Line(Line, LineExtent),
    Circle(Circle),
    Ellipse(Ellipse),
    Hyperbola(Hyperbola),
    Parabola(Parabola),
    Conic(GeneralConic),
}

impl Support {
    fn of(curve: &AnyCurve) -> Self {
        match curve {
            AnyCurve::Line(line) => Support::Line(*line, LineExtent::Segment),
            AnyCurve::Arc(arc) => match arc.to_circle() {
                Some(circle) => Support::Circle(circle),
                None => Support::Line(arc.chord(), LineExtent::Segment),
            },
            AnyCurve::Circle(circle) => Support::Circle(*circle),
            AnyCurve::Ellipse(ellipse) => Support::Ellipse(*ellipse),
            AnyCurve::Hyperbola(hyperbola) => Support::Hyperbola(*hyperbola),
            AnyCurve::Parabola(parabola) => Support::Parabola(*parabola),
            AnyCurve::Conic(conic) => Support::Conic(*conic),
        }
    }

    fn to_general_conic(&self) -> GeneralConic {
        match self {
            Support::Line(line, _) => GeneralConic::from_line(line),
            Support::Circle(c) => c.to_general_conic(),
            Support::Ellipse(c) => c.to_general_conic(),
            Support::Hyperbola(c) => c.to_general_conic(),
            Support::Parabola(c) => c.to_general_conic(),
            Support::Conic(c) => *c,
        }
    }
}

/// Intersection points of two curves, with the default options.
pub fn intersect(a: &AnyCurve, b: &AnyCurve) -> Vec<Point> {
    intersect_with_options(a, b, &IntersectOptions::DEFAULT)
}

/// Intersection points of two curves.
///
/// The result does not depend on the order of the arguments, except for the
/// order of the points.
pub fn intersect_with_options(a: &AnyCurve, b: &AnyCurve, options: &IntersectOptions) -> Vec<Point> {
    let candidates = intersect_supports(&Support::of(a), &Support::of(b), options);

    let mut result = options.point_set();
    for p in candidates {
        if on_arc(a, p) && on_arc(b, p) {
            result.insert(p);
        } else {
            log::trace!("intersection {:?} is outside of an arc", p);
        }
    }

    result.into_vec()
}

fn on_arc(curve: &AnyCurve, p: Point) -> bool {
    let arc: &Arc = match curve {
        AnyCurve::Arc(arc) => arc,
        _ => return true,
    };

    match arc.center() {
        Some(center) => arc.is_angle_on_arc(angle_to(center, p)),
        // Straight arcs were intersected as segments.
        None => true,
    }
}

fn intersect_supports(a: &Support, b: &Support, options: &IntersectOptions) -> Vec<Point> {
    match (a, b) {
        (Support::Line(l1, e1), Support::Line(l2, e2)) => {
            line_line(l1, *e1, l2, *e2).into_iter().collect()
        }
        (Support::Line(l, e), Support::Circle(c)) | (Support::Circle(c), Support::Line(l, e)) => {
            circle_line(c, l, *e)
        }
        (Support::Line(l, e), other) | (other, Support::Line(l, e)) => {
            line_conic(l, *e, &other.to_general_conic())
        }
        (Support::Circle(c1), Support::Circle(c2)) => circle_circle(c1, c2),
        (Support::Hyperbola(h), other) | (other, Support::Hyperbola(h)) => {
            hyperbola_conic(h, &other.to_general_conic(), options)
        }
        (Support::Parabola(p), other) | (other, Support::Parabola(p)) => {
            parabola_conic(p, &other.to_general_conic(), options)
        }
        (Support::Ellipse(e1), Support::Ellipse(e2)) => ellipse_ellipse(e1, e2, options),
        (Support::Ellipse(e), Support::Circle(c)) | (Support::Circle(c), Support::Ellipse(e)) => {
            ellipse_circle(e, c, options)
        }
        (Support::Ellipse(e), Support::Conic(q)) | (Support::Conic(q), Support::Ellipse(e)) => {
            ellipse_conic(e, q, options)
        }
        (Support::Circle(c), Support::Conic(q)) | (Support::Conic(q), Support::Circle(c)) => {
            ellipse_conic(&Ellipse::from(*c), q, options)
        }
        (Support::Conic(q1), Support::Conic(q2)) => conic_conic(q1, q2, options),
    }
}

/// True if `p` is on the conic, `conic` being normalized, within a residual
/// that grows with the magnitude of the quadratic terms at `p`.
pub(crate) fn residual_is_small(conic: &GeneralConic, p: Point, tolerance: f64) -> bool {
    let scale = 1.0 + p.x * p.x + p.y * p.y;
    conic.eval(p).abs() <= tolerance * scale
}

#[cfg(test)]
use crate::geom::point;

#[cfg(test)]
pub(crate) fn assert_same_points(actual: &[Point], expected: &[Point], epsilon: f64) {
    assert_eq!(actual.len(), expected.len(), "{:?} != {:?}", actual, expected);
    for e in expected {
        assert!(
            actual.iter().any(|a| (*a - *e).length() <= epsilon),
            "{:?} != {:?}",
            actual,
            expected
        );
    }
}

#[test]
fn extents() {
    assert!(LineExtent::Segment.contains(0.0));
    assert!(LineExtent::Segment.contains(1.0));
    assert!(!LineExtent::Segment.contains(1.1));
    assert!(!LineExtent::Ray.contains(-0.5));
    assert!(LineExtent::Ray.contains(1e6));
    assert!(LineExtent::Infinite.contains(-1e6));
    assert!(!LineExtent::Infinite.contains(f64::NAN));
}

#[test]
fn options() {
    let options = IntersectOptions::DEFAULT
        .with_ellipse_tolerance(1e-6)
        .with_pencil_tolerance(1.0);
    assert_eq!(options.ellipse_tolerance, 1e-6);
    assert_eq!(options.pencil_tolerance, 1.0);
    assert_eq!(options.circle_tolerance, EPSILON);
    assert_eq!(IntersectOptions::default(), IntersectOptions::DEFAULT);
}

#[test]
fn segments_are_bounded() {
    let circle = AnyCurve::Circle(Circle::new(point(5.0, 0.0), 3.0));
    let short = AnyCurve::Line(Line::new(point(0.0, 0.0), point(5.0, 0.0)));
    assert_same_points(&intersect(&circle, &short), &[point(2.0, 0.0)], 1e-12);
    assert_same_points(&intersect(&short, &circle), &[point(2.0, 0.0)], 1e-12);
}

#[test]
fn arcs_filter_their_support() {
    // Upper half of the circle of radius 5 centered at (5, 0), counter-clockwise
    // from (10, 0) to (0, 0).
    let arc = AnyCurve::Arc(Arc::new(point(10.0, 0.0), point(0.0, 0.0), 1.0));
    let vertical = AnyCurve::Line(Line::new(point(5.0, -10.0), point(5.0, 10.0)));
    assert_same_points(&intersect(&arc, &vertical), &[point(5.0, 5.0)], 1e-9);

    let straight = AnyCurve::Arc(Arc::new(point(0.0, 0.0), point(2.0, 2.0), 0.0));
    let cross = AnyCurve::Line(Line::new(point(0.0, 2.0), point(2.0, 0.0)));
    assert_same_points(&intersect(&straight, &cross), &[point(1.0, 1.0)], 1e-12);
}

#[test]
fn dispatch_is_symmetric() {
    let curves = [
        AnyCurve::Line(Line::new(point(-5.0, -0.5), point(5.0, 1.0))),
        AnyCurve::Circle(Circle::new(point(0.5, 0.0), 2.0)),
        AnyCurve::Ellipse(Ellipse::new(point(0.0, 0.5), 3.0, 1.0, 0.2, true)),
        AnyCurve::Parabola(Parabola::new(point(0.0, -1.0), 0.1, 0.5).unwrap()),
        AnyCurve::Hyperbola(Hyperbola::new(point(0.0, 0.0), 1.0, 0.8, 0.0).unwrap()),
        AnyCurve::Conic(GeneralConic::from_ellipse_axes(point(-0.5, 0.0), 1.0, 2.5, 0.7)),
    ];

    for a in &curves {
        for b in &curves {
            if a == b {
                continue;
            }
            let ab = intersect(a, b);
            let ba = intersect(b, a);
            assert_same_points(&ab, &ba, 1e-6);
            for p in &ab {
                assert!(a.to_general_conic().normalized().eval(*p).abs() < 1e-6, "{:?} {:?}", a, p);
                assert!(b.to_general_conic().normalized().eval(*p).abs() < 1e-6, "{:?} {:?}", b, p);
            }
        }
    }
}
