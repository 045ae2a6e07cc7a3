use crate::conic::GeneralConic;
use crate::curve::{Conic, Curve};
use crate::tolerance::EPSILON;
use crate::transform::AffineExt;
use crate::utils::{angle_to, mid_point, normalized, polar, rotate_90, solve_2x2, unit_vector};
use crate::{point, vector, GeomError, GeomResult, Point, Transform, Vector};

use core::f64::consts::{PI, TAU};

/// A circle, always travelled counter-clockwise.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    #[inline]
    pub fn new(center: Point, radius: f64) -> Self {
        Circle { center, radius }
    }

    /// The circle having the segment `a b` as a diameter.
    pub fn from_two_points(a: Point, b: Point) -> Self {
        Circle {
            center: mid_point(a, b),
            radius: a.distance_to(b) * 0.5,
        }
    }

    /// The circle through three points, `None` if they are collinear.
    pub fn from_three_points(a: Point, b: Point, c: Point) -> Option<Self> {
        // Perpendicular bisectors of ab and ac, relative to a.
        let ab = b - a;
        let ac = c - a;
        let (x, y) = solve_2x2(
            ab.x,
            ab.y,
            ac.x,
            ac.y,
            ab.square_length() * 0.5,
            ac.square_length() * 0.5,
        )?;
        let center = a + vector(x, y);

        Some(Circle {
            center,
            radius: center.distance_to(a),
        })
    }

    #[inline]
    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    #[inline]
    pub fn circumference(&self) -> f64 {
        TAU * self.radius
    }

    /// True if `p` is inside the circle or on it within `tolerance`.
    pub fn contains(&self, p: Point, tolerance: f64) -> bool {
        self.center.distance_to(p) <= self.radius + tolerance
    }

    /// True if `p` is on the circle within `tolerance`.
    pub fn is_on(&self, p: Point, tolerance: f64) -> bool {
        (self.center.distance_to(p) - self.radius).abs() <= tolerance
    }

    /// The point of angle `angle` seen from the center.
    #[inline]
    pub fn point_at_angle(&self, angle: f64) -> Point {
        polar(self.center, angle, self.radius)
    }

    /// The radial projection of `p`, the first point of the circle when `p`
    /// is the center.
    pub fn project(&self, p: Point) -> Point {
        match normalized(p - self.center) {
            Some(dir) => self.center + dir * self.radius,
            None => self.center + vector(self.radius, 0.0),
        }
    }

    #[inline]
    pub fn translate(&self, by: Vector) -> Self {
        Circle::new(self.center + by, self.radius)
    }

    /// Same center, radius changed by `delta`.
    #[inline]
    pub fn offset(&self, delta: f64) -> Self {
        Circle::new(self.center, self.radius + delta)
    }
}

impl Curve for Circle {
    fn name(&self) -> &'static str {
        "circle"
    }

    fn is_closed(&self) -> bool {
        true
    }

    fn length(&self) -> GeomResult<f64> {
        Ok(self.circumference())
    }

    fn signed_area(&self) -> GeomResult<f64> {
        Ok(PI * self.radius * self.radius)
    }

    fn point_at(&self, t: f64) -> GeomResult<Point> {
        Ok(self.point_at_angle(t * TAU))
    }

    fn direction_at(&self, t: f64) -> GeomResult<Vector> {
        Ok(rotate_90(unit_vector(t * TAU)) * (self.radius * TAU))
    }

    fn tangent_at(&self, p: Point) -> GeomResult<Vector> {
        normalized(p - self.center)
            .map(rotate_90)
            .ok_or(GeomError::Degenerate {
                curve: "circle",
                operation: "tangent at the center",
            })
    }

    fn closest_point(&self, p: Point) -> GeomResult<Point> {
        Ok(self.project(p))
    }

    fn position_of(&self, p: Point) -> GeomResult<f64> {
        if (p - self.center).square_length() <= EPSILON * EPSILON {
            return Ok(0.0);
        }
        Ok(angle_to(self.center, p) / TAU)
    }

    fn distance(&self, p: Point) -> GeomResult<f64> {
        Ok((self.center.distance_to(p) - self.radius).abs())
    }

    /// Only succeeds for uniform transforms, use [`Ellipse`](crate::Ellipse)
    /// otherwise.
    fn transformed(&self, transform: &Transform) -> Option<Self> {
        if !transform.is_uniform() {
            return None;
        }

        Some(Circle {
            center: transform.apply_point(self.center),
            radius: self.radius * transform.uniform_scale(),
        })
    }
}

impl Conic for Circle {
    fn to_general_conic(&self) -> GeneralConic {
        GeneralConic::from_circle(self.center, self.radius)
    }
}

impl Default for Circle {
    fn default() -> Self {
        Circle::new(point(0.0, 0.0), 1.0)
    }
}

#[cfg(test)]
use crate::test_utils::{fuzzy_eq, fuzzy_eq_point, fuzzy_eq_vector};

#[test]
fn circle_through_points() {
    let c = Circle::from_three_points(point(1.0, 0.0), point(-1.0, 0.0), point(0.0, 1.0)).unwrap();
    assert!(fuzzy_eq_point(c.center, point(0.0, 0.0), 1e-12));
    assert!(fuzzy_eq(c.radius, 1.0, 1e-12));

    let c = Circle::from_three_points(point(3.0, 2.0), point(5.0, 4.0), point(7.0, 2.0)).unwrap();
    assert!(fuzzy_eq_point(c.center, point(5.0, 2.0), 1e-12));
    assert!(fuzzy_eq(c.radius, 2.0, 1e-12));

    assert!(Circle::from_three_points(point(0.0, 0.0), point(1.0, 1.0), point(3.0, 3.0)).is_none());

    let c = Circle::from_two_points(point(0.0, 0.0), point(4.0, 0.0));
    assert_eq!(c, Circle::new(point(2.0, 0.0), 2.0));
}

#[test]
fn parameterization() {
    let c = Circle::new(point(1.0, 1.0), 2.0);
    assert!(fuzzy_eq_point(c.point_at(0.25).unwrap(), point(1.0, 3.0), 1e-12));
    assert!(fuzzy_eq(c.position_of(point(1.0, 3.0)).unwrap(), 0.25, 1e-12));
    assert!(fuzzy_eq(c.position_of(point(1.0, -5.0)).unwrap(), 0.75, 1e-12));
    assert!(fuzzy_eq_vector(
        c.tangent_at(point(3.0, 1.0)).unwrap(),
        vector(0.0, 1.0),
        1e-12
    ));
    assert!(c.tangent_at(c.center).is_err());
    assert!(fuzzy_eq(c.area().unwrap(), 4.0 * PI, 1e-12));
}

#[test]
fn closest_and_distance_agree() {
    let c = Circle::new(point(-2.0, 0.5), 3.0);
    for p in [point(0.0, 0.0), point(10.0, -3.0), point(-2.0, 0.5), point(-2.0, 3.5)] {
        let d = c.distance(p).unwrap();
        let q = c.closest_point(p).unwrap();
        assert!(fuzzy_eq(d, q.distance_to(p), 1e-10));
    }
}

#[test]
fn uniform_transform_only() {
    let c = Circle::new(point(1.0, 0.0), 2.0);
    let t = crate::transform::rotation(crate::Angle::radians(0.7))
        .then_scale(3.0, 3.0)
        .then_translate(vector(1.0, 2.0));
    let m = c.transformed(&t).unwrap();
    assert!(fuzzy_eq(m.radius, 6.0, 1e-12));
    assert!(fuzzy_eq_point(m.center, t.apply_point(c.center), 1e-12));
    assert!(c.transformed(&Transform::scale(1.0, 2.0)).is_none());
    assert_eq!(c.transformed(&Transform::identity()), Some(c));
}
