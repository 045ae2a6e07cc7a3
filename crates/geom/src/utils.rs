//! Vector and angle helpers shared by the curve types.

use crate::tolerance::EPSILON;
use crate::{point, vector, GeomError, GeomResult, Point, Vector};

use core::f64::consts::{PI, TAU};

#[inline]
pub fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Squared distance between two points.
///
/// Prefer this over `distance_to` when the result is only compared.
#[inline]
pub fn square_distance(a: Point, b: Point) -> f64 {
    (b - a).square_length()
}

#[inline]
pub fn dot(a: Vector, b: Vector) -> f64 {
    a.x * b.x + a.y * b.y
}

/// The 2D cross product `a.x * b.y - a.y * b.x`.
#[inline]
pub fn perp_dot(a: Vector, b: Vector) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Rotates counter-clockwise by a quarter turn.
#[inline]
pub fn rotate_90(v: Vector) -> Vector {
    vector(-v.y, v.x)
}

#[inline]
pub fn rotate_180(v: Vector) -> Vector {
    vector(-v.x, -v.y)
}

/// Rotates clockwise by a quarter turn.
#[inline]
pub fn rotate_270(v: Vector) -> Vector {
    vector(v.y, -v.x)
}

/// Rotates a vector by an angle in radians.
#[inline]
pub fn rotate(v: Vector, angle: f64) -> Vector {
    let (sin, cos) = angle.sin_cos();
    vector(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Unit vector with the direction of `v`, or `None` for a zero-length vector.
#[inline]
pub fn normalized(v: Vector) -> Option<Vector> {
    let len = v.length();
    if len <= EPSILON || !len.is_finite() {
        return None;
    }

    Some(v / len)
}

/// Like [`normalized`], for call sites where a zero-length vector is a caller error.
#[inline]
pub fn unit(v: Vector) -> GeomResult<Vector> {
    normalized(v).ok_or(GeomError::ZeroLengthVector)
}

/// Unit vector at `angle` radians from the x axis.
#[inline]
pub fn unit_vector(angle: f64) -> Vector {
    let (sin, cos) = angle.sin_cos();
    vector(cos, sin)
}

/// The point at `distance` from `origin` in the direction `angle`.
#[inline]
pub fn polar(origin: Point, angle: f64, distance: f64) -> Point {
    origin + unit_vector(angle) * distance
}

/// Maps an angle to `[0, 2π)`.
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % TAU;
    if a < 0.0 {
        a += TAU;
    }
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Angle of the direction `v` in `[0, 2π)`.
#[inline]
pub fn vector_angle(v: Vector) -> f64 {
    normalize_angle(v.y.atan2(v.x))
}

/// Angle of the direction from `from` to `to` in `[0, 2π)`.
#[inline]
pub fn angle_to(from: Point, to: Point) -> f64 {
    vector_angle(to - from)
}

/// Counter-clockwise angle from `a` to `b`, in `[0, 2π)`.
#[inline]
pub fn directed_angle(a: Vector, b: Vector) -> f64 {
    normalize_angle(b.y.atan2(b.x) - a.y.atan2(a.x))
}

/// Unit bisector of two directions.
///
/// Opposite directions have no unique bisector: either of them rotated by a
/// quarter turn is returned. Returns `None` if one of the vectors has no direction.
pub fn bisector(a: Vector, b: Vector) -> Option<Vector> {
    let a = normalized(a)?;
    let b = normalized(b)?;

    normalized(a + b).or_else(|| Some(rotate_90(a)))
}

/// Mid point of two points.
#[inline]
pub fn mid_point(a: Point, b: Point) -> Point {
    point((a.x + b.x) * 0.5, (a.y + b.y) * 0.5)
}

/// Largest absolute value of a slice of coefficients.
#[inline]
pub(crate) fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc: f64, v| acc.max(v.abs()))
}

/// Solves `a·x + b·y = e, c·x + d·y = f` with Cramer's rule.
pub(crate) fn solve_2x2(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Option<(f64, f64)> {
    let det = a * d - b * c;
    let scale = max_abs(&[a, b, c, d]);
    if scale == 0.0 || det.abs() <= EPSILON * scale * scale {
        return None;
    }

    Some(((e * d - b * f) / det, (a * f - e * c) / det))
}

#[cfg(test)]
use crate::test_utils::{fuzzy_eq, fuzzy_eq_vector};

#[test]
fn angles_are_normalized() {
    assert!(fuzzy_eq(normalize_angle(-PI / 2.0), 1.5 * PI, 1e-12));
    assert!(fuzzy_eq(normalize_angle(5.0 * PI), PI, 1e-12));
    assert_eq!(normalize_angle(TAU), 0.0);
    assert!(fuzzy_eq(angle_to(point(1.0, 1.0), point(1.0, 0.0)), 1.5 * PI, 1e-12));
    assert!(fuzzy_eq(directed_angle(vector(0.0, 1.0), vector(1.0, 0.0)), 1.5 * PI, 1e-12));
}

#[test]
fn quarter_turns() {
    let v = vector(2.0, 1.0);
    assert_eq!(rotate_90(v), vector(-1.0, 2.0));
    assert_eq!(rotate_180(v), vector(-2.0, -1.0));
    assert_eq!(rotate_270(v), vector(1.0, -2.0));
    assert!(fuzzy_eq_vector(rotate(v, PI / 2.0), rotate_90(v), 1e-12));
    assert_eq!(perp_dot(vector(1.0, 0.0), vector(0.0, 1.0)), 1.0);
}

#[test]
fn bisector_of_opposite_vectors() {
    let b = bisector(vector(1.0, 0.0), vector(0.0, 3.0)).unwrap();
    let s = 0.5f64.sqrt();
    assert!(fuzzy_eq_vector(b, vector(s, s), 1e-12));

    let b = bisector(vector(1.0, 0.0), vector(-2.0, 0.0)).unwrap();
    assert!(fuzzy_eq_vector(b, vector(0.0, 1.0), 1e-12));

    assert!(bisector(vector(0.0, 0.0), vector(1.0, 0.0)).is_none());
}

#[test]
fn zero_vector_has_no_direction() {
    assert!(normalized(vector(0.0, 0.0)).is_none());
    assert_eq!(unit(vector(0.0, 0.0)), Err(GeomError::ZeroLengthVector));
    assert!(fuzzy_eq_vector(unit(vector(0.0, 4.0)).unwrap(), vector(0.0, 1.0), 1e-12));
}

#[test]
fn polar_offset() {
    let p = polar(point(1.0, 1.0), PI / 2.0, 2.0);
    assert!(fuzzy_eq(p.x, 1.0, 1e-12));
    assert!(fuzzy_eq(p.y, 3.0, 1e-12));
}
