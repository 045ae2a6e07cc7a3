//! Hyperbolas.

use crate::conic::{GeneralConic, Reduced};
use crate::curve::{Conic, Curve};
use crate::ellipse::{nearest, normal_feet};
use crate::line::Line;
use crate::transform::AffineExt;
use crate::utils::{normalized, rotate_90, unit_vector};
use crate::{point, GeomError, GeomResult, Point, Transform, Vector};

/// A hyperbola given by its center, its transverse axis and the ratio `b / a`
/// of its conjugate radius to its transverse radius.
///
/// The parameter of the curve is the hyperbolic angle `u` of the branch the
/// transverse axis points to:
/// `center + major_axis·cosh u + ratio·perp(major_axis)·sinh u`.
/// Closest point queries consider both branches.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hyperbola {
    pub center: Point,
    pub major_axis: Vector,
    pub ratio: f64,
}

impl Hyperbola {
    /// Hyperbola of transverse radius `a` along `tilt` and conjugate radius `b`.
    ///
    /// Both radii must be positive.
    pub fn new(center: Point, a: f64, b: f64, tilt: f64) -> GeomResult<Self> {
        if !(a > 0.0 && b > 0.0) {
            return Err(GeomError::InvalidHyperbolaAxes { a, b });
        }

        Ok(Hyperbola {
            center,
            major_axis: unit_vector(tilt) * a,
            ratio: b / a,
        })
    }

    pub fn from_major_axis(center: Point, major_axis: Vector, ratio: f64) -> GeomResult<Self> {
        let a = major_axis.length();
        if !(a > 0.0 && ratio > 0.0) {
            return Err(GeomError::InvalidHyperbolaAxes { a, b: a * ratio });
        }

        Ok(Hyperbola {
            center,
            major_axis,
            ratio,
        })
    }

    #[inline]
    pub fn major_radius(&self) -> f64 {
        self.major_axis.length()
    }

    #[inline]
    pub fn minor_radius(&self) -> f64 {
        self.major_axis.length() * self.ratio
    }

    #[inline]
    pub fn minor_axis(&self) -> Vector {
        rotate_90(self.major_axis) * self.ratio
    }

    #[inline]
    pub fn tilt(&self) -> f64 {
        self.major_axis.y.atan2(self.major_axis.x)
    }

    pub fn eccentricity(&self) -> f64 {
        (1.0 + self.ratio * self.ratio).sqrt()
    }

    pub fn foci(&self) -> (Point, Point) {
        let offset = self.major_axis * self.eccentricity();
        (self.center - offset, self.center + offset)
    }

    /// The two vertices; the first one is on the parameterized branch.
    pub fn vertices(&self) -> (Point, Point) {
        (self.center + self.major_axis, self.center - self.major_axis)
    }

    /// The asymptotes as lines through the center.
    pub fn asymptotes(&self) -> [Line; 2] {
        let minor = self.minor_axis();
        [
            Line::with_direction(self.center, self.major_axis + minor),
            Line::with_direction(self.center, self.major_axis - minor),
        ]
    }

    #[inline]
    pub fn sample(&self, u: f64) -> Point {
        self.center + self.major_axis * u.cosh() + self.minor_axis() * u.sinh()
    }

    #[inline]
    pub fn derivative(&self, u: f64) -> Vector {
        self.major_axis * u.sinh() + self.minor_axis() * u.cosh()
    }

    /// Local coordinates of `p`, in units of the transverse radius.
    fn to_local(&self, p: Point) -> Option<Point> {
        let e1 = normalized(self.major_axis)?;
        let a = self.major_radius();
        let v = p - self.center;
        Some(point(v.dot(e1) / a, v.dot(rotate_90(e1)) / a))
    }

    /// Point of either branch closest to `p`.
    pub fn closest(&self, p: Point) -> Point {
        let local = match self.to_local(p) {
            Some(local) => local,
            None => return self.center,
        };
        let bb = self.ratio * self.ratio;
        let candidates = normal_feet(local.x, local.y, 1.0, -bb);
        let foot = nearest(&candidates, local).unwrap_or(point(1.0, 0.0));

        self.center + (self.major_axis * foot.x + rotate_90(self.major_axis) * foot.y)
    }

    /// Hyperbolic angle of `p`, assumed on the curve. Points of the other
    /// branch get the angle of their mirror image through the center.
    fn angle_of(&self, p: Point) -> f64 {
        match self.to_local(p) {
            Some(local) => (local.y / self.ratio).asinh() * local.x.signum(),
            None => 0.0,
        }
    }

    fn on_main_branch(&self, p: Point) -> bool {
        (p - self.center).dot(self.major_axis) >= 0.0
    }
}

impl Curve for Hyperbola {
    fn name(&self) -> &'static str {
        "hyperbola"
    }

    fn is_closed(&self) -> bool {
        false
    }

    fn length(&self) -> GeomResult<f64> {
        Ok(f64::INFINITY)
    }

    fn signed_area(&self) -> GeomResult<f64> {
        Ok(0.0)
    }

    fn point_at(&self, t: f64) -> GeomResult<Point> {
        Ok(self.sample(t))
    }

    fn direction_at(&self, t: f64) -> GeomResult<Vector> {
        Ok(self.derivative(t))
    }

    /// On the other branch, the tangent follows the mirror image of the
    /// parameterized branch.
    fn tangent_at(&self, p: Point) -> GeomResult<Vector> {
        let q = self.closest(p);
        let u = self.angle_of(q);
        let d = if self.on_main_branch(q) {
            self.derivative(u)
        } else {
            -self.derivative(u)
        };

        crate::utils::unit(d)
    }

    fn closest_point(&self, p: Point) -> GeomResult<Point> {
        Ok(self.closest(p))
    }

    fn position_of(&self, p: Point) -> GeomResult<f64> {
        Ok(self.angle_of(self.closest(p)))
    }

    fn transformed(&self, transform: &Transform) -> Option<Self> {
        if transform.is_uniform() {
            return Some(Hyperbola {
                center: transform.apply_point(self.center),
                major_axis: transform.apply_vector(self.major_axis),
                ratio: self.ratio,
            });
        }

        let image = transform.apply_vector(self.major_axis);
        match self.to_general_conic().transform(transform)?.reduce() {
            Ok(Reduced::Hyperbola(h)) => {
                // The parameterized branch maps to the parameterized branch.
                let major_axis = if h.major_axis.dot(image) < 0.0 {
                    -h.major_axis
                } else {
                    h.major_axis
                };
                Some(Hyperbola { major_axis, ..h })
            }
            other => {
                log::debug!("transformed hyperbola reduced to {:?}", other);
                None
            }
        }
    }
}

impl Conic for Hyperbola {
    fn to_general_conic(&self) -> GeneralConic {
        GeneralConic::from_hyperbola_axes(
            self.center,
            self.major_radius(),
            self.minor_radius(),
            self.tilt(),
        )
    }
}

#[cfg(test)]
use crate::test_utils::{fuzzy_eq, fuzzy_eq_point};
#[cfg(test)]
use crate::vector;

#[cfg(test)]
fn brute_force_distance(h: &Hyperbola, p: Point) -> f64 {
    let mirrored = Hyperbola {
        major_axis: -h.major_axis,
        ..*h
    };
    (-20_000..20_000)
        .flat_map(|i| {
            let u = i as f64 * 4e-4;
            [h.sample(u), mirrored.sample(u)]
        })
        .map(|q| q.distance_to(p))
        .fold(f64::INFINITY, f64::min)
}

#[test]
fn invalid_axes() {
    assert_eq!(
        Hyperbola::new(point(0.0, 0.0), 0.0, 1.0, 0.0),
        Err(GeomError::InvalidHyperbolaAxes { a: 0.0, b: 1.0 })
    );
    assert!(Hyperbola::new(point(0.0, 0.0), 1.0, -1.0, 0.0).is_err());
    assert!(Hyperbola::from_major_axis(point(0.0, 0.0), vector(0.0, 0.0), 1.0).is_err());
}

#[test]
fn shape() {
    let h = Hyperbola::new(point(1.0, 0.0), 3.0, 4.0, 0.0).unwrap();
    assert!(fuzzy_eq(h.eccentricity(), 5.0 / 3.0, 1e-12));
    let (f1, f2) = h.foci();
    assert!(fuzzy_eq_point(f1, point(-4.0, 0.0), 1e-12));
    assert!(fuzzy_eq_point(f2, point(6.0, 0.0), 1e-12));
    assert_eq!(h.point_at(0.0), Ok(point(4.0, 0.0)));

    let [a1, a2] = h.asymptotes();
    assert!(fuzzy_eq(a1.slope(), 4.0 / 3.0, 1e-12));
    assert!(fuzzy_eq(a2.slope(), -4.0 / 3.0, 1e-12));

    assert_eq!(h.length(), Ok(f64::INFINITY));
    assert_eq!(h.area(), Ok(0.0));
    assert!(!h.is_closed());
}

#[test]
fn position_and_tangent() {
    let h = Hyperbola::new(point(0.0, 0.0), 1.0, 1.0, 0.0).unwrap();
    let p = h.sample(0.8);
    assert!(fuzzy_eq(h.position_of(p).unwrap(), 0.8, 1e-9));
    let t = h.tangent_at(p).unwrap();
    assert!(fuzzy_eq(crate::utils::perp_dot(t, h.derivative(0.8)), 0.0, 1e-9));
    assert!(t.dot(h.derivative(0.8)) > 0.0);
}

#[test]
fn closest_on_both_branches() {
    let h = Hyperbola::new(point(0.0, 1.0), 1.0, 0.5, 0.4).unwrap();
    for p in [point(3.0, 3.0), point(-3.0, 0.0), point(0.0, 1.0), point(0.5, 4.0)] {
        let q = h.closest(p);
        assert!(h.to_general_conic().normalized().eval(q).abs() < 1e-8);
        assert!(fuzzy_eq(q.distance_to(p), brute_force_distance(&h, p), 1e-5), "{:?}", p);
    }
}

#[test]
fn transforms() {
    let h = Hyperbola::new(point(0.0, 1.0), 2.0, 1.0, 0.3).unwrap();
    assert_eq!(h.transformed(&Transform::identity()), Some(h));

    let t = Transform::new(1.0, 0.5, 0.0, 1.0, 2.0, 0.0);
    let image = h.transformed(&t).unwrap();
    for u in [-1.0, 0.0, 0.5] {
        let p = t.apply_point(h.sample(u));
        assert!(image.distance(p).unwrap() < 1e-7);
    }
    // The main branch stays the main branch.
    assert!((t.apply_point(h.sample(0.0)) - image.center).dot(image.major_axis) > 0.0);
}
