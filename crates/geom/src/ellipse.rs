//! Ellipses.

use crate::circle::Circle;
use crate::conic::{GeneralConic, Reduced};
use crate::curve::{Conic, Curve};
use crate::line::Line;
use crate::roots;
use crate::tolerance::EPSILON;
use crate::transform::AffineExt;
use crate::utils::{normalize_angle, normalized, rotate_90, unit_vector};
use crate::{point, vector, GeomResult, Point, Transform, Vector};

use arrayvec::ArrayVec;
use core::f64::consts::{FRAC_PI_2, PI, TAU};

/// An ellipse given by its center, its major axis and the signed ratio of
/// the minor radius to the major radius.
///
/// The curve is `center + major_axis·cos θ + ratio·perp(major_axis)·sin θ`,
/// where `perp` rotates a quarter turn counter-clockwise. A positive ratio
/// runs counter-clockwise, a negative one clockwise.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ellipse {
    pub center: Point,
    pub major_axis: Vector,
    pub ratio: f64,
}

impl Ellipse {
    /// Ellipse of radii `rx` along `tilt` and `ry` across it.
    ///
    /// The larger radius always ends up as the major axis: swapped radii turn
    /// the axis by a quarter turn.
    pub fn new(center: Point, rx: f64, ry: f64, tilt: f64, ccw: bool) -> Self {
        let (rx, ry) = (rx.abs(), ry.abs());
        let (major, minor, angle) = if rx >= ry {
            (rx, ry, tilt)
        } else {
            (ry, rx, tilt + FRAC_PI_2)
        };
        let ratio = if major > 0.0 { minor / major } else { 1.0 };

        Ellipse {
            center,
            major_axis: unit_vector(angle) * major,
            ratio: if ccw { ratio } else { -ratio },
        }
    }

    /// Ellipse from its axis vector and its signed ratio.
    ///
    /// A ratio larger than one in magnitude means the given axis is the minor
    /// one: the axes are exchanged and the winding kept.
    pub fn from_major_axis(center: Point, major_axis: Vector, ratio: f64) -> Self {
        if ratio.abs() <= 1.0 {
            return Ellipse {
                center,
                major_axis,
                ratio,
            };
        }

        Ellipse {
            center,
            major_axis: rotate_90(major_axis) * ratio.abs(),
            ratio: ratio.signum() / ratio.abs(),
        }
    }

    #[inline]
    pub fn major_radius(&self) -> f64 {
        self.major_axis.length()
    }

    #[inline]
    pub fn minor_radius(&self) -> f64 {
        self.major_axis.length() * self.ratio.abs()
    }

    /// The vector from the center to the end of the minor axis reached a
    /// quarter of the way along the curve.
    #[inline]
    pub fn minor_axis(&self) -> Vector {
        rotate_90(self.major_axis) * self.ratio
    }

    /// Angle of the major axis.
    #[inline]
    pub fn tilt(&self) -> f64 {
        self.major_axis.y.atan2(self.major_axis.x)
    }

    #[inline]
    pub fn is_ccw(&self) -> bool {
        self.ratio >= 0.0
    }

    pub fn eccentricity(&self) -> f64 {
        (1.0 - self.ratio * self.ratio).max(0.0).sqrt()
    }

    /// The two foci, on the major axis.
    pub fn foci(&self) -> (Point, Point) {
        let offset = self.major_axis * self.eccentricity();
        (self.center - offset, self.center + offset)
    }

    /// Point at eccentric angle `angle`.
    #[inline]
    pub fn sample(&self, angle: f64) -> Point {
        let (s, c) = angle.sin_cos();
        self.center + self.major_axis * c + self.minor_axis() * s
    }

    /// Derivative with respect to the eccentric angle.
    #[inline]
    pub fn derivative(&self, angle: f64) -> Vector {
        let (s, c) = angle.sin_cos();
        self.minor_axis() * c - self.major_axis * s
    }

    /// Same ellipse, opposite winding, same start point.
    #[inline]
    pub fn reversed(&self) -> Self {
        Ellipse {
            ratio: -self.ratio,
            ..*self
        }
    }

    /// Perimeter from the arithmetic-geometric mean of the radii.
    pub fn perimeter(&self) -> f64 {
        let a = self.major_radius();
        let b = self.minor_radius();
        if a == 0.0 {
            return 0.0;
        }
        if b <= EPSILON * a {
            return 4.0 * a;
        }

        let (mut an, mut bn) = (a, b);
        let mut sum = 0.5 * (a * a - b * b);
        let mut weight = 0.5;
        for _ in 0..32 {
            let next_a = 0.5 * (an + bn);
            let next_b = (an * bn).sqrt();
            let cn = 0.5 * (an - bn);
            weight *= 2.0;
            sum += weight * cn * cn;
            an = next_a;
            bn = next_b;
            if cn.abs() <= 1e-15 * a {
                break;
            }
        }

        TAU * (a * a - sum) / an
    }

    /// The unit axes of the ellipse's own frame.
    fn axes(&self) -> Option<(Vector, Vector)> {
        let e1 = normalized(self.major_axis)?;
        Some((e1, rotate_90(e1)))
    }

    /// Eccentric angle of `p`, assumed on the ellipse, in `[0, 2π)`.
    fn angle_of(&self, p: Point) -> f64 {
        let a2 = self.major_axis.square_length();
        if a2 == 0.0 {
            return 0.0;
        }
        let v = p - self.center;
        let cos = v.dot(self.major_axis) / a2;
        if self.ratio == 0.0 {
            return cos.clamp(-1.0, 1.0).acos();
        }
        let sin = v.dot(rotate_90(self.major_axis)) / (a2 * self.ratio);

        normalize_angle(sin.atan2(cos))
    }

    /// Point of the ellipse closest to `p`.
    ///
    /// The feet of the normals through `p` are the roots of the Lagrange
    /// multiplier quartic, solved in the ellipse's frame scaled so that the
    /// major radius is one.
    pub fn closest(&self, p: Point) -> Point {
        let (e1, e2) = match self.axes() {
            Some(axes) => axes,
            None => return self.center,
        };
        let a = self.major_radius();
        let b = self.minor_radius();
        let v = p - self.center;
        let u = v.dot(e1) / a;
        let w = v.dot(e2) / a;

        if b <= EPSILON * a {
            // Flat ellipse: the major axis segment.
            let x = u.clamp(-1.0, 1.0);
            return self.center + e1 * (x * a);
        }

        let bb = (b / a) * (b / a);
        let candidates = normal_feet(u, w, 1.0, bb);
        let local = nearest(&candidates, point(u, w)).unwrap_or(point(1.0, 0.0));

        self.center + (e1 * local.x + e2 * local.y) * a
    }

    fn to_conic(&self) -> GeneralConic {
        let a = self.major_radius();
        let b = self.minor_radius();
        if b <= EPSILON * a {
            return GeneralConic::from_line(&Line::new(
                self.center - self.major_axis,
                self.center + self.major_axis,
            ));
        }

        GeneralConic::from_ellipse_axes(self.center, a, b, self.tilt())
    }
}

/// Candidate feet of the normals from `(u, v)` onto `x²/A + y²/B = 1`.
///
/// `B` is negative for hyperbolas. Besides the generic roots of the quartic,
/// the points reached when the multiplier equals `-A` or `-B` and the axis
/// vertices are included: they are on the curve, so including them can only
/// help picking the nearest point.
pub(crate) fn normal_feet(u: f64, v: f64, a: f64, b: f64) -> ArrayVec<Point, 12> {
    let mut feet = ArrayVec::new();
    let (uu, vv) = (u * u, v * v);
    let s = a + b;
    let p = a * b;

    let lambdas = roots::quartic(
        1.0,
        2.0 * s,
        s * s + 2.0 * p - a * uu - b * vv,
        2.0 * p * s - 2.0 * p * uu - 2.0 * p * vv,
        p * p - p * b * uu - p * a * vv,
    );
    for l in lambdas {
        let (da, db) = (a + l, b + l);
        if da.abs() <= EPSILON || db.abs() <= EPSILON {
            continue;
        }
        feet.push(point(u * a / da, v * b / db));
    }

    // Multiplier equal to -A: x is free.
    if (b - a).abs() > EPSILON {
        let y = v * b / (b - a);
        let x2 = a * (1.0 - y * y / b);
        if x2 >= 0.0 {
            let x = x2.sqrt();
            feet.push(point(x, y));
            feet.push(point(-x, y));
        }
        // Multiplier equal to -B: y is free.
        let x = u * a / (a - b);
        let y2 = b * (1.0 - x * x / a);
        if y2 >= 0.0 {
            let y = y2.sqrt();
            feet.push(point(x, y));
            feet.push(point(x, -y));
        }
    }

    feet.push(point(a.sqrt(), 0.0));
    feet.push(point(-a.sqrt(), 0.0));
    if b > 0.0 {
        feet.push(point(0.0, b.sqrt()));
        feet.push(point(0.0, -b.sqrt()));
    }

    feet
}

pub(crate) fn nearest(candidates: &[Point], p: Point) -> Option<Point> {
    candidates
        .iter()
        .filter(|q| q.x.is_finite() && q.y.is_finite())
        .min_by(|q1, q2| {
            (**q1 - p)
                .square_length()
                .total_cmp(&(**q2 - p).square_length())
        })
        .copied()
}

impl From<Circle> for Ellipse {
    fn from(circle: Circle) -> Self {
        Ellipse {
            center: circle.center,
            major_axis: vector(circle.radius, 0.0),
            ratio: 1.0,
        }
    }
}

impl Curve for Ellipse {
    fn name(&self) -> &'static str {
        "ellipse"
    }

    fn is_closed(&self) -> bool {
        true
    }

    fn length(&self) -> GeomResult<f64> {
        Ok(self.perimeter())
    }

    fn signed_area(&self) -> GeomResult<f64> {
        Ok(PI * self.major_axis.square_length() * self.ratio)
    }

    fn point_at(&self, t: f64) -> GeomResult<Point> {
        Ok(self.sample(t * TAU))
    }

    fn direction_at(&self, t: f64) -> GeomResult<Vector> {
        Ok(self.derivative(t * TAU) * TAU)
    }

    fn tangent_at(&self, p: Point) -> GeomResult<Vector> {
        let angle = self.angle_of(self.closest(p));
        crate::utils::unit(self.derivative(angle))
    }

    fn closest_point(&self, p: Point) -> GeomResult<Point> {
        Ok(self.closest(p))
    }

    fn position_of(&self, p: Point) -> GeomResult<f64> {
        Ok(self.angle_of(self.closest(p)) / TAU)
    }

    /// Uniform transforms map the axes directly; any other invertible
    /// transform goes through the implicit equation. Mirroring reverses the
    /// winding.
    fn transformed(&self, transform: &Transform) -> Option<Self> {
        let sign = if transform.is_mirroring() { -1.0 } else { 1.0 };
        if transform.is_uniform() {
            return Some(Ellipse {
                center: transform.apply_point(self.center),
                major_axis: transform.apply_vector(self.major_axis),
                ratio: self.ratio * sign,
            });
        }

        let image = transform.apply_vector(self.major_axis);
        let winding = if self.ratio < 0.0 { -sign } else { sign };
        let (center, major_axis, ratio) = match self.to_conic().transform(transform)?.reduce() {
            Ok(Reduced::Ellipse(e)) => (e.center, e.major_axis, e.ratio.abs()),
            Ok(Reduced::Circle(c)) => {
                let dir = normalized(image).unwrap_or(vector(1.0, 0.0));
                (c.center, dir * c.radius, 1.0)
            }
            other => {
                log::debug!("transformed ellipse reduced to {:?}", other);
                return None;
            }
        };
        // Keep the start point close to the image of the original one.
        let major_axis = if major_axis.dot(image) < 0.0 {
            -major_axis
        } else {
            major_axis
        };

        Some(Ellipse {
            center,
            major_axis,
            ratio: ratio * winding,
        })
    }
}

impl Conic for Ellipse {
    fn to_general_conic(&self) -> GeneralConic {
        self.to_conic()
    }
}

#[cfg(test)]
use crate::test_utils::{fuzzy_eq, fuzzy_eq_point, fuzzy_eq_vector};

#[cfg(test)]
fn brute_force_distance(e: &Ellipse, p: Point) -> f64 {
    (0..20_000)
        .map(|i| e.sample(i as f64 * TAU / 20_000.0).distance_to(p))
        .fold(f64::INFINITY, f64::min)
}

#[test]
fn constructor_swaps_axes() {
    let e = Ellipse::new(point(1.0, 2.0), 1.0, 3.0, 0.0, true);
    assert!(fuzzy_eq(e.major_radius(), 3.0, 1e-12));
    assert!(fuzzy_eq(e.minor_radius(), 1.0, 1e-12));
    assert!(fuzzy_eq(e.tilt(), FRAC_PI_2, 1e-12));
    assert!(e.is_ccw());

    let e = Ellipse::new(point(0.0, 0.0), 4.0, 2.0, 0.3, false);
    assert!(fuzzy_eq(e.ratio, -0.5, 1e-12));
    assert!(fuzzy_eq(e.tilt(), 0.3, 1e-12));

    let e = Ellipse::from_major_axis(point(0.0, 0.0), vector(1.0, 0.0), -2.0);
    assert!(fuzzy_eq_vector(e.major_axis, vector(0.0, 2.0), 1e-12));
    assert!(fuzzy_eq(e.ratio, -0.5, 1e-12));
    assert!(!e.is_ccw());
}

#[test]
fn swapped_axes_keep_the_winding() {
    let swapped = Ellipse::from_major_axis(point(0.0, 0.0), vector(1.0, 0.0), 2.0);
    assert!(swapped.signed_area().unwrap() > 0.0);
    let swapped = Ellipse::from_major_axis(point(0.0, 0.0), vector(1.0, 0.0), -2.0);
    assert!(swapped.signed_area().unwrap() < 0.0);
}

#[test]
fn perimeter_and_area() {
    let circle = Ellipse::new(point(0.0, 0.0), 2.0, 2.0, 0.0, true);
    assert!(fuzzy_eq(circle.perimeter(), 4.0 * PI, 1e-12));

    let e = Ellipse::new(point(0.0, 0.0), 1.0, 0.5, 0.0, true);
    // Ramanujan's approximation is accurate to ~1e-5 at this eccentricity.
    assert!(fuzzy_eq(e.perimeter(), 4.844_224, 1e-5));
    assert!(fuzzy_eq(e.area().unwrap(), PI * 0.5, 1e-12));
    assert!(fuzzy_eq(e.reversed().signed_area().unwrap(), -PI * 0.5, 1e-12));

    let flat = Ellipse::new(point(0.0, 0.0), 3.0, 0.0, 0.0, true);
    assert_eq!(flat.perimeter(), 12.0);
}

#[test]
fn parameterization() {
    let e = Ellipse::new(point(1.0, 1.0), 2.0, 1.0, 0.0, true);
    assert!(fuzzy_eq_point(e.point_at(0.0).unwrap(), point(3.0, 1.0), 1e-12));
    assert!(fuzzy_eq_point(e.point_at(0.25).unwrap(), point(1.0, 2.0), 1e-12));
    assert!(fuzzy_eq_point(e.reversed().point_at(0.25).unwrap(), point(1.0, 0.0), 1e-12));
    assert!(fuzzy_eq(e.position_of(point(1.0, 2.0)).unwrap(), 0.25, 1e-9));
    assert!(fuzzy_eq(e.reversed().position_of(point(1.0, 0.0)).unwrap(), 0.25, 1e-9));
    assert!(fuzzy_eq_vector(
        e.tangent_at(point(3.0, 1.0)).unwrap(),
        vector(0.0, 1.0),
        1e-9
    ));

    let (f1, f2) = e.foci();
    let s = 3f64.sqrt();
    assert!(fuzzy_eq_point(f1, point(1.0 - s, 1.0), 1e-12));
    assert!(fuzzy_eq_point(f2, point(1.0 + s, 1.0), 1e-12));
}

#[test]
fn closest_points() {
    let e = Ellipse::new(point(0.0, 0.0), 2.0, 1.0, 0.0, true);
    assert!(fuzzy_eq_point(e.closest(point(0.0, 3.0)), point(0.0, 1.0), 1e-9));
    assert!(fuzzy_eq_point(e.closest(point(3.0, 0.0)), point(2.0, 0.0), 1e-9));
    assert!(fuzzy_eq(e.distance(point(0.0, 0.0)).unwrap(), 1.0, 1e-9));
    // Inside, near the major axis: the foot is off the vertices.
    assert!(fuzzy_eq(
        e.distance(point(1.0, 0.1)).unwrap(),
        brute_force_distance(&e, point(1.0, 0.1)),
        1e-6
    ));

    let tilted = Ellipse::new(point(-1.0, 2.0), 3.0, 1.5, 0.7, false);
    for p in [point(4.0, 4.0), point(-1.0, 2.5), point(-6.0, -3.0), point(0.0, 0.0)] {
        let d = tilted.distance(p).unwrap();
        assert!(fuzzy_eq(d, brute_force_distance(&tilted, p), 1e-6), "{:?}", p);
        assert!(fuzzy_eq(d, tilted.closest(p).distance_to(p), 1e-12));
    }
}

#[test]
fn uniform_transform() {
    let e = Ellipse::new(point(1.0, 0.0), 2.0, 1.0, 0.2, true);
    assert_eq!(e.transformed(&Transform::identity()), Some(e));

    let mirrored = e.transformed(&Transform::scale(-1.0, 1.0)).unwrap();
    assert!(!mirrored.is_ccw());
    assert!(fuzzy_eq_point(mirrored.center, point(-1.0, 0.0), 1e-12));
    for t in [0.1, 0.4, 0.8] {
        let expected = Transform::scale(-1.0, 1.0).apply_point(e.point_at(t).unwrap());
        assert!(fuzzy_eq_point(mirrored.point_at(t).unwrap(), expected, 1e-9));
    }
}

#[test]
fn affine_transform() {
    let e = Ellipse::new(point(1.0, 0.0), 2.0, 1.0, 0.0, false);
    let t = Transform::new(1.0, 0.0, 1.0, 2.0, 3.0, -1.0);
    let image = e.transformed(&t).unwrap();
    assert!(!image.is_ccw());
    for i in 0..8 {
        let p = t.apply_point(e.sample(i as f64 * 0.8));
        assert!(image.distance(p).unwrap() < 1e-7);
    }
    assert!(fuzzy_eq(
        image.area().unwrap(),
        e.area().unwrap() * t.determinant().abs(),
        1e-9
    ));

    let mirror = Transform::new(2.0, 0.0, 0.0, -1.0, 0.0, 0.0);
    assert!(e.transformed(&mirror).unwrap().is_ccw());

    // A circle stretched back into a circle.
    let c = Ellipse::new(point(0.0, 0.0), 2.0, 1.0, 0.0, true);
    let round = c.transformed(&Transform::scale(1.0, 2.0)).unwrap();
    assert!(fuzzy_eq(round.ratio, 1.0, 1e-9));
    assert!(fuzzy_eq(round.major_radius(), 2.0, 1e-9));
}

#[test]
fn reduce_round_trip() {
    let e = Ellipse::new(point(3.0, -1.0), 2.5, 1.0, 1.1, true);
    match e.to_general_conic().reduce().unwrap() {
        Reduced::Ellipse(r) => {
            assert!(fuzzy_eq_point(r.center, e.center, 1e-9));
            assert!(fuzzy_eq(r.major_radius(), 2.5, 1e-9));
            assert!(fuzzy_eq(r.minor_radius(), 1.0, 1e-9));
            // Same axis up to its orientation.
            assert!(fuzzy_eq(
                crate::utils::perp_dot(r.major_axis, e.major_axis),
                0.0,
                1e-9
            ));
        }
        other => panic!("{:?}", other),
    }
}

#[test]
fn normal_feet_of_an_inner_point() {
    // Inside the evolute: four normals, plus every special case.
    let (a, b) = (1.0, 0.25);
    let feet = normal_feet(0.1, 0.05, a, b);
    assert_eq!(feet.len(), feet.capacity());
    for foot in &feet {
        assert!((foot.x * foot.x / a + foot.y * foot.y / b - 1.0).abs() < 1e-7, "{:?}", foot);
    }
}
