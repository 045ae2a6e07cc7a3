//! Circular arcs in bulge form.

use crate::circle::Circle;
use crate::curve::Curve;
use crate::line::Line;
use crate::tolerance::EPSILON;
use crate::transform::AffineExt;
use crate::utils::{angle_to, mid_point, normalize_angle, perp_dot, polar, rotate_90, unit_vector};
use crate::{GeomResult, Point, Transform, Vector};

use core::f64::consts::TAU;

/// A circular arc given by its end points and its bulge.
///
/// The bulge is `tan(sweep / 4)`: zero for a straight segment, positive for a
/// counter-clockwise arc, negative for a clockwise one. Center and radius are
/// derived. Swapping the end points and negating the bulge describes the same
/// arc, which makes mirroring and reversal trivial.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Arc {
    pub start: Point,
    pub end: Point,
    pub bulge: f64,
}

impl Arc {
    #[inline]
    pub fn new(start: Point, end: Point, bulge: f64) -> Self {
        Arc { start, end, bulge }
    }

    /// The arc of `circle`-like geometry starting at `start_angle` and
    /// sweeping `sweep_angle` radians (positive counter-clockwise).
    pub fn from_center(center: Point, radius: f64, start_angle: f64, sweep_angle: f64) -> Self {
        Arc {
            start: polar(center, start_angle, radius),
            end: polar(center, start_angle + sweep_angle, radius),
            bulge: (sweep_angle / 4.0).tan(),
        }
    }

    /// The arc from `start` to `end` passing through `through`.
    ///
    /// Returns `None` if the three points are collinear.
    pub fn from_three_points(start: Point, through: Point, end: Point) -> Option<Self> {
        let circle = Circle::from_three_points(start, through, end)?;
        let sa = angle_to(circle.center, start);
        let ea = angle_to(circle.center, end);
        let ccw = perp_dot(through - start, end - through) > 0.0;
        let sweep = if ccw {
            normalize_angle(ea - sa)
        } else {
            -normalize_angle(sa - ea)
        };

        Some(Arc::new(start, end, (sweep / 4.0).tan()))
    }

    #[inline]
    pub fn chord(&self) -> Line {
        Line::new(self.start, self.end)
    }

    #[inline]
    pub fn is_linear(&self) -> bool {
        self.bulge.abs() <= EPSILON || self.chord().is_degenerate()
    }

    #[inline]
    pub fn is_ccw(&self) -> bool {
        self.bulge > EPSILON
    }

    #[inline]
    pub fn is_cw(&self) -> bool {
        self.bulge < -EPSILON
    }

    /// Signed included angle, positive counter-clockwise.
    #[inline]
    pub fn sweep_angle(&self) -> f64 {
        4.0 * self.bulge.atan()
    }

    /// Radius of the supporting circle, infinite for a straight arc.
    pub fn radius(&self) -> f64 {
        if self.is_linear() {
            return f64::INFINITY;
        }
        let d = self.chord().length();
        d * (1.0 + self.bulge * self.bulge) / (4.0 * self.bulge.abs())
    }

    /// Center of the supporting circle, `None` for a straight arc.
    pub fn center(&self) -> Option<Point> {
        if self.is_linear() {
            return None;
        }
        let chord = self.chord().to_vector();
        let d = chord.length();
        let b = self.bulge;
        let offset = d * (1.0 - b * b) / (4.0 * b);

        Some(mid_point(self.start, self.end) + rotate_90(chord) / d * offset)
    }

    /// The supporting circle, `None` for a straight arc.
    pub fn to_circle(&self) -> Option<Circle> {
        Some(Circle::new(self.center()?, self.radius()))
    }

    /// Angle of the start point seen from the center, in `[0, 2π)`.
    pub fn start_angle(&self) -> f64 {
        match self.center() {
            Some(c) => angle_to(c, self.start),
            None => angle_to(self.start, self.end),
        }
    }

    /// Angle of the end point seen from the center, in `[0, 2π)`.
    pub fn end_angle(&self) -> f64 {
        match self.center() {
            Some(c) => angle_to(c, self.end),
            None => angle_to(self.start, self.end),
        }
    }

    /// Angle travelled from the start point to reach `angle`, in the arc's
    /// winding direction, in `[0, 2π)`.
    fn travelled(&self, angle: f64) -> f64 {
        let rel = if self.is_cw() {
            normalize_angle(self.start_angle() - angle)
        } else {
            normalize_angle(angle - self.start_angle())
        };
        // Just before the start point counts as the start point.
        if rel > TAU - EPSILON {
            0.0
        } else {
            rel
        }
    }

    /// True if the world angle `angle`, seen from the center, lies between the
    /// start and end angles in the arc's winding direction.
    pub fn is_angle_on_arc(&self, angle: f64) -> bool {
        if self.is_linear() {
            return false;
        }

        self.travelled(angle) <= self.sweep_angle().abs() + EPSILON
    }

    /// Area between the arc and its chord.
    pub fn segment_area(&self) -> f64 {
        if self.is_linear() {
            return 0.0;
        }
        let r = self.radius();
        let theta = self.sweep_angle().abs();
        0.5 * r * r * (theta - theta.sin())
    }

    /// Same arc walked from end to start.
    #[inline]
    pub fn reversed(&self) -> Self {
        Arc {
            start: self.end,
            end: self.start,
            bulge: -self.bulge,
        }
    }

    pub fn sample(&self, t: f64) -> Point {
        match self.center() {
            Some(c) => polar(c, self.start_angle() + t * self.sweep_angle(), self.radius()),
            None => self.chord().sample(t),
        }
    }

    pub fn derivative(&self, t: f64) -> Vector {
        if self.is_linear() {
            return self.chord().to_vector();
        }
        let sweep = self.sweep_angle();
        let angle = self.start_angle() + t * sweep;

        rotate_90(unit_vector(angle)) * (self.radius() * sweep)
    }

    /// Parameter of the point of the arc closest to `p`.
    pub fn closest_t(&self, p: Point) -> f64 {
        let center = match self.center() {
            Some(c) if (p - c).square_length() > EPSILON * EPSILON => c,
            Some(_) => return 0.0,
            None => return self.chord().project_t(p).map_or(0.0, |t| t.clamp(0.0, 1.0)),
        };

        let angle = angle_to(center, p);
        if self.is_angle_on_arc(angle) {
            return (self.travelled(angle) / self.sweep_angle().abs()).min(1.0);
        }

        if p.distance_to(self.start) <= p.distance_to(self.end) {
            0.0
        } else {
            1.0
        }
    }
}

impl Curve for Arc {
    fn name(&self) -> &'static str {
        "arc"
    }

    fn is_closed(&self) -> bool {
        false
    }

    fn length(&self) -> GeomResult<f64> {
        if self.is_linear() {
            return Ok(self.chord().length());
        }
        Ok(self.radius() * self.sweep_angle().abs())
    }

    fn signed_area(&self) -> GeomResult<f64> {
        Ok(0.0)
    }

    fn point_at(&self, t: f64) -> GeomResult<Point> {
        Ok(self.sample(t))
    }

    fn direction_at(&self, t: f64) -> GeomResult<Vector> {
        if self.chord().is_degenerate() {
            return Err(crate::GeomError::Degenerate {
                curve: "arc",
                operation: "direction",
            });
        }
        Ok(self.derivative(t))
    }

    fn tangent_at(&self, p: Point) -> GeomResult<Vector> {
        crate::utils::unit(self.direction_at(self.closest_t(p))?)
    }

    fn closest_point(&self, p: Point) -> GeomResult<Point> {
        Ok(self.sample(self.closest_t(p)))
    }

    fn position_of(&self, p: Point) -> GeomResult<f64> {
        Ok(self.closest_t(p))
    }

    /// Only shape preserving transforms keep an arc circular. Mirroring
    /// transforms flip the winding.
    fn transformed(&self, transform: &Transform) -> Option<Self> {
        if !self.is_linear() && !transform.is_uniform() {
            return None;
        }

        let bulge = if transform.is_mirroring() {
            -self.bulge
        } else {
            self.bulge
        };

        Some(Arc {
            start: transform.apply_point(self.start),
            end: transform.apply_point(self.end),
            bulge,
        })
    }
}

#[cfg(test)]
use crate::test_utils::{fuzzy_eq, fuzzy_eq_point};
#[cfg(test)]
use crate::{point, vector};
#[cfg(test)]
use core::f64::consts::{FRAC_PI_2, FRAC_PI_8, PI};

#[test]
fn unit_bulge_is_a_half_circle() {
    let arc = Arc::new(point(0.0, 0.0), point(10.0, 0.0), 1.0);
    assert!(arc.is_ccw());
    assert!(fuzzy_eq(arc.sweep_angle(), PI, 1e-12));
    assert!(fuzzy_eq(arc.radius(), 5.0, 1e-12));
    let c = arc.center().unwrap();
    assert!(fuzzy_eq_point(c, point(5.0, 0.0), 1e-12));
    assert!(fuzzy_eq(c.distance_to(arc.start), c.distance_to(arc.end), 1e-10));
    // Counter-clockwise from (0, 0) to (10, 0) passes below the chord.
    assert!(fuzzy_eq_point(arc.sample(0.5), point(5.0, -5.0), 1e-9));
}

#[test]
fn quarter_arc_radius() {
    let arc = Arc::new(point(0.0, 0.0), point(10.0, 0.0), FRAC_PI_8.tan());
    assert!(fuzzy_eq(arc.sweep_angle(), FRAC_PI_2, 1e-12));
    assert!(fuzzy_eq(arc.radius(), 5.0 * 2f64.sqrt(), 1e-9));
    let c = arc.center().unwrap();
    assert!(fuzzy_eq_point(c, point(5.0, 5.0), 1e-9));
    assert!(fuzzy_eq(Curve::length(&arc).unwrap(), 5.0 * 2f64.sqrt() * FRAC_PI_2, 1e-9));
}

#[test]
fn angles_on_arc() {
    // Counter-clockwise quarter from angle 0 to angle π/2.
    let arc = Arc::from_center(point(0.0, 0.0), 1.0, 0.0, FRAC_PI_2);
    assert!(arc.is_angle_on_arc(0.3));
    assert!(arc.is_angle_on_arc(0.0));
    assert!(arc.is_angle_on_arc(FRAC_PI_2));
    assert!(!arc.is_angle_on_arc(PI));
    assert!(!arc.is_angle_on_arc(-0.1));

    // The same quarter walked clockwise.
    let cw = arc.reversed();
    assert!(cw.is_cw());
    assert!(cw.is_angle_on_arc(0.3));
    assert!(!cw.is_angle_on_arc(PI));
    assert!(fuzzy_eq_point(cw.sample(0.0), point(0.0, 1.0), 1e-12));
    assert!(fuzzy_eq_point(cw.sample(1.0), point(1.0, 0.0), 1e-12));
}

#[test]
fn three_points() {
    let arc = Arc::from_three_points(point(1.0, 0.0), point(0.0, 1.0), point(-1.0, 0.0)).unwrap();
    assert!(fuzzy_eq(arc.sweep_angle(), PI, 1e-9));
    let cw = Arc::from_three_points(point(-1.0, 0.0), point(0.0, 1.0), point(1.0, 0.0)).unwrap();
    assert!(fuzzy_eq(cw.sweep_angle(), -PI, 1e-9));
    assert!(Arc::from_three_points(point(0.0, 0.0), point(1.0, 1.0), point(2.0, 2.0)).is_none());
}

#[test]
fn closest_point_on_arc() {
    let arc = Arc::from_center(point(0.0, 0.0), 2.0, 0.0, FRAC_PI_2);
    let p = arc.closest_point(point(3.0, 3.0)).unwrap();
    let s = 2f64.sqrt();
    assert!(fuzzy_eq_point(p, point(s, s), 1e-9));
    assert!(fuzzy_eq(arc.position_of(point(3.0, 3.0)).unwrap(), 0.5, 1e-9));
    // Outside the sweep, the nearest end point wins.
    let q = arc.closest_point(point(1.0, -5.0)).unwrap();
    assert!(fuzzy_eq_point(q, point(2.0, 0.0), 1e-9));
    let t = arc.tangent_at(point(3.0, 3.0)).unwrap();
    assert!(fuzzy_eq(t.dot(vector(-s / 2.0, s / 2.0)), 1.0, 1e-9));
}

#[test]
fn straight_arc() {
    let arc = Arc::new(point(0.0, 0.0), point(4.0, 0.0), 0.0);
    assert!(arc.is_linear());
    assert!(arc.center().is_none());
    assert_eq!(arc.radius(), f64::INFINITY);
    assert_eq!(Curve::length(&arc), Ok(4.0));
    assert_eq!(arc.point_at(0.5), Ok(point(2.0, 0.0)));
    assert!(!arc.is_angle_on_arc(0.0));
    assert_eq!(arc.segment_area(), 0.0);
}

#[test]
fn mirrored_arc_flips_winding() {
    let arc = Arc::new(point(0.0, 0.0), point(10.0, 0.0), 0.5);
    let m = arc.transformed(&Transform::scale(1.0, -1.0)).unwrap();
    assert!(m.is_cw());
    assert!(arc.transformed(&Transform::scale(2.0, 1.0)).is_none());
    assert_eq!(arc.reversed().reversed(), arc);
    assert_eq!(arc.transformed(&Transform::identity()), Some(arc));
}
