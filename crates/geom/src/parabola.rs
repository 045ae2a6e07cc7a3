//! Parabolas.

use crate::conic::{GeneralConic, Reduced};
use crate::curve::{Conic, Curve};
use crate::line::Line;
use crate::roots;
use crate::tolerance::EPSILON;
use crate::transform::AffineExt;
use crate::utils::{rotate, unit_vector};
use crate::{point, vector, GeomError, GeomResult, Point, Transform, Vector};

use core::f64::consts::FRAC_PI_2;

/// A parabola `y = a·x²` in the frame at `vertex` rotated by `tilt`.
///
/// `a` is `1 / (4·focal_distance)`. The parameter of the curve is the local
/// abscissa.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Parabola {
    pub vertex: Point,
    pub tilt: f64,
    pub a: f64,
}

impl Parabola {
    /// Parabola opening towards `tilt + 90°` with its focus at
    /// `focal_distance` from the vertex. A negative focal distance opens the
    /// other way.
    pub fn new(vertex: Point, tilt: f64, focal_distance: f64) -> GeomResult<Self> {
        if focal_distance.abs() <= EPSILON || !focal_distance.is_finite() {
            return Err(GeomError::ZeroFocalDistance);
        }

        Ok(Parabola {
            vertex,
            tilt,
            a: 0.25 / focal_distance,
        })
    }

    #[inline]
    pub fn focal_distance(&self) -> f64 {
        0.25 / self.a
    }

    /// Unit vector along the axis of symmetry, from the vertex to the focus
    /// for positive focal distances.
    #[inline]
    pub fn axis(&self) -> Vector {
        unit_vector(self.tilt + FRAC_PI_2)
    }

    pub fn focus(&self) -> Point {
        self.vertex + self.axis() * self.focal_distance()
    }

    pub fn directrix(&self) -> Line {
        let origin = self.vertex - self.axis() * self.focal_distance();
        Line::with_direction(origin, unit_vector(self.tilt))
    }

    #[inline]
    fn to_world(&self, local: Vector) -> Point {
        self.vertex + rotate(local, self.tilt)
    }

    #[inline]
    fn to_local(&self, p: Point) -> Vector {
        rotate(p - self.vertex, -self.tilt)
    }

    #[inline]
    pub fn sample(&self, x: f64) -> Point {
        self.to_world(vector(x, self.a * x * x))
    }

    #[inline]
    pub fn derivative(&self, x: f64) -> Vector {
        rotate(vector(1.0, 2.0 * self.a * x), self.tilt)
    }

    /// Local abscissa of the point closest to `p`.
    ///
    /// Normals through `p` meet the curve where `2a²x³ + (1 - 2a·v)x - u = 0`.
    pub fn closest_x(&self, p: Point) -> f64 {
        let local = self.to_local(p);
        let (u, v) = (local.x, local.y);
        let a = self.a;
        let candidates = roots::cubic(2.0 * a * a, 0.0, 1.0 - 2.0 * a * v, -u);

        candidates
            .iter()
            .copied()
            .min_by(|x1, x2| {
                let d1 = (point(*x1, a * x1 * x1) - local.to_point()).square_length();
                let d2 = (point(*x2, a * x2 * x2) - local.to_point()).square_length();
                d1.total_cmp(&d2)
            })
            .unwrap_or(0.0)
    }
}

impl Curve for Parabola {
    fn name(&self) -> &'static str {
        "parabola"
    }

    fn is_closed(&self) -> bool {
        false
    }

    fn length(&self) -> GeomResult<f64> {
        Ok(f64::INFINITY)
    }

    fn area(&self) -> GeomResult<f64> {
        Ok(f64::INFINITY)
    }

    fn signed_area(&self) -> GeomResult<f64> {
        Ok(f64::INFINITY)
    }

    fn point_at(&self, t: f64) -> GeomResult<Point> {
        Ok(self.sample(t))
    }

    fn direction_at(&self, t: f64) -> GeomResult<Vector> {
        Ok(self.derivative(t))
    }

    fn tangent_at(&self, p: Point) -> GeomResult<Vector> {
        crate::utils::unit(self.derivative(self.closest_x(p)))
    }

    fn closest_point(&self, p: Point) -> GeomResult<Point> {
        Ok(self.sample(self.closest_x(p)))
    }

    fn position_of(&self, p: Point) -> GeomResult<f64> {
        Ok(self.closest_x(p))
    }

    /// Uniform transforms rotate and scale the local frame, a mirror negates
    /// the focal distance. Other transforms go through the implicit equation.
    fn transformed(&self, transform: &Transform) -> Option<Self> {
        if transform.is_uniform() {
            let x_axis = transform.apply_vector(unit_vector(self.tilt));
            let scale = transform.uniform_scale();
            let sign = if transform.is_mirroring() { -1.0 } else { 1.0 };
            return Some(Parabola {
                vertex: transform.apply_point(self.vertex),
                tilt: x_axis.y.atan2(x_axis.x),
                a: sign * self.a / scale,
            });
        }

        match self.to_general_conic().transform(transform)?.reduce() {
            Ok(Reduced::Parabola(p)) => Some(p),
            other => {
                log::debug!("transformed parabola reduced to {:?}", other);
                None
            }
        }
    }
}

impl Conic for Parabola {
    fn to_general_conic(&self) -> GeneralConic {
        GeneralConic::from_parabola_coefficient(self.vertex, self.tilt, self.a)
    }
}

#[cfg(test)]
use crate::test_utils::{fuzzy_eq, fuzzy_eq_point};

#[test]
fn zero_focal_distance() {
    assert_eq!(
        Parabola::new(point(0.0, 0.0), 0.0, 0.0),
        Err(GeomError::ZeroFocalDistance)
    );
}

#[test]
fn focus_and_directrix() {
    let p = Parabola::new(point(1.0, 2.0), FRAC_PI_2, 0.5).unwrap();
    assert!(fuzzy_eq(p.a, 0.5, 1e-12));
    // Opens towards -x.
    assert!(fuzzy_eq_point(p.focus(), point(0.5, 2.0), 1e-12));
    let d = p.directrix();
    assert!(fuzzy_eq(d.start.x, 1.5, 1e-12));
    // Every point is as far from the focus as from the directrix.
    for x in [-2.0, 0.0, 0.7, 3.0] {
        let q = p.sample(x);
        assert!(fuzzy_eq(
            q.distance_to(p.focus()),
            d.signed_distance(q).unwrap().abs(),
            1e-9
        ));
    }
    assert_eq!(p.length(), Ok(f64::INFINITY));
}

#[test]
fn closest_point() {
    let p = Parabola::new(point(0.0, 0.0), 0.0, 0.25).unwrap();
    // y = x²
    assert!(fuzzy_eq_point(p.closest_point(point(0.0, -1.0)).unwrap(), point(0.0, 0.0), 1e-12));
    // Above the evolute, the vertex is not the closest point.
    let q = p.closest_point(point(0.0, 2.0)).unwrap();
    assert!(fuzzy_eq(q.y, 1.5, 1e-9));
    assert!(fuzzy_eq(q.x.abs(), 1.5f64.sqrt(), 1e-9));
    let q = p.closest_point(point(2.0, 1.0)).unwrap();
    let tangent = p.tangent_at(q).unwrap();
    assert!(fuzzy_eq(tangent.dot(point(2.0, 1.0) - q), 0.0, 1e-9));
    assert!(fuzzy_eq(p.position_of(q).unwrap(), q.x, 1e-9));
}

#[test]
fn transforms() {
    let p = Parabola::new(point(1.0, -1.0), 0.3, 2.0).unwrap();
    assert_eq!(p.transformed(&Transform::identity()), Some(p));

    let mirrored = p.transformed(&Transform::scale(1.0, -1.0)).unwrap();
    assert!(fuzzy_eq(mirrored.focal_distance(), -2.0, 1e-12));
    let expected_focus = Transform::scale(1.0, -1.0).apply_point(p.focus());
    assert!(fuzzy_eq_point(mirrored.focus(), expected_focus, 1e-12));

    let t = Transform::new(2.0, 0.0, 0.5, 1.0, 0.0, 3.0);
    let image = p.transformed(&t).unwrap();
    for x in [-1.0, 0.0, 2.0] {
        let q = t.apply_point(p.sample(x));
        assert!(image.distance(q).unwrap() < 1e-7);
    }
}

#[test]
fn reduce_round_trip() {
    let p = Parabola::new(point(-2.0, 1.0), 1.2, 0.75).unwrap();
    match p.to_general_conic().reduce().unwrap() {
        Reduced::Parabola(r) => {
            assert!(fuzzy_eq_point(r.vertex, p.vertex, 1e-9));
            assert!(fuzzy_eq(r.focal_distance(), 0.75, 1e-9));
            assert!(fuzzy_eq_point(r.focus(), p.focus(), 1e-9));
        }
        other => panic!("{:?}", other),
    }
}
