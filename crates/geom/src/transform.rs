//! Affine transform helpers.
//!
//! Transforms are plain `euclid` transforms (see [`Transform`]). This module adds
//! the queries the curve types need on top of them, and a rigid [`Frame`] used
//! to move configurations to a canonical position before solving.

use crate::tolerance::EPSILON;
use crate::utils::{max_abs, normalized, rotate_90};
use crate::{point, vector, Angle, GeomError, GeomResult, Point, Transform, Vector};

/// A 3×3 matrix in row-major order.
pub type Matrix3 = [[f64; 3]; 3];

/// Queries on affine transforms that euclid does not provide.
pub trait AffineExt {
    /// Inverse transform, or `SingularTransform` if the determinant vanishes.
    fn checked_inverse(&self) -> GeomResult<Transform>;

    /// True if the transform preserves shapes: both axes have the same length
    /// and are perpendicular. Only such transforms keep a circle a circle.
    fn is_uniform(&self) -> bool;

    /// True if the transform reverses orientation.
    fn is_mirroring(&self) -> bool;

    /// Scale factor of a uniform transform, `sqrt(|det|)` in general.
    fn uniform_scale(&self) -> f64;

    /// Angle of the image of the x axis.
    fn rotation_angle(&self) -> f64;

    /// Applies the transform to a position (translation included).
    fn apply_point(&self, p: Point) -> Point;

    /// Applies the linear part of the transform to a direction.
    fn apply_vector(&self, v: Vector) -> Vector;

    /// The homogeneous matrix acting on column vectors `(x, y, 1)`.
    fn to_homogeneous(&self) -> Matrix3;
}

impl AffineExt for Transform {
    fn checked_inverse(&self) -> GeomResult<Transform> {
        let det = self.determinant();
        let scale = max_abs(&[self.m11, self.m12, self.m21, self.m22]);
        if scale == 0.0 || det.abs() <= EPSILON * scale * scale {
            return Err(GeomError::SingularTransform(det));
        }

        self.inverse().ok_or(GeomError::SingularTransform(det))
    }

    fn is_uniform(&self) -> bool {
        let x_axis = vector(self.m11, self.m12);
        let y_axis = vector(self.m21, self.m22);
        let lx = x_axis.square_length();
        let ly = y_axis.square_length();
        let scale = lx.max(ly);
        if scale == 0.0 {
            return false;
        }

        (lx - ly).abs() <= EPSILON * scale && x_axis.dot(y_axis).abs() <= EPSILON * scale
    }

    fn is_mirroring(&self) -> bool {
        self.determinant() < 0.0
    }

    fn uniform_scale(&self) -> f64 {
        self.determinant().abs().sqrt()
    }

    fn rotation_angle(&self) -> f64 {
        self.m12.atan2(self.m11)
    }

    #[inline]
    fn apply_point(&self, p: Point) -> Point {
        self.transform_point(p)
    }

    #[inline]
    fn apply_vector(&self, v: Vector) -> Vector {
        self.transform_vector(v)
    }

    fn to_homogeneous(&self) -> Matrix3 {
        [
            [self.m11, self.m21, self.m31],
            [self.m12, self.m22, self.m32],
            [0.0, 0.0, 1.0],
        ]
    }
}

/// Counter-clockwise rotation around the origin.
pub fn rotation(angle: Angle) -> Transform {
    let (sin, cos) = angle.radians.sin_cos();
    Transform::new(cos, sin, -sin, cos, 0.0, 0.0)
}

pub(crate) fn mat3_mul(a: &Matrix3, b: &Matrix3) -> Matrix3 {
    let mut m = [[0.0; 3]; 3];
    for (i, row) in m.iter_mut().enumerate() {
        for (j, v) in row.iter_mut().enumerate() {
            *v = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
        }
    }

    m
}

pub(crate) fn mat3_transpose(a: &Matrix3) -> Matrix3 {
    let mut m = [[0.0; 3]; 3];
    for (i, row) in m.iter_mut().enumerate() {
        for (j, v) in row.iter_mut().enumerate() {
            *v = a[j][i];
        }
    }

    m
}

pub(crate) fn mat3_determinant(m: &Matrix3) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Transposed matrix of cofactors. `adjugate(m) * m == det(m) * I`.
pub(crate) fn mat3_adjugate(m: &Matrix3) -> Matrix3 {
    let c = |r0: usize, r1: usize, c0: usize, c1: usize| m[r0][c0] * m[r1][c1] - m[r0][c1] * m[r1][c0];

    [
        [c(1, 2, 1, 2), -c(0, 2, 1, 2), c(0, 1, 1, 2)],
        [-c(1, 2, 0, 2), c(0, 2, 0, 2), -c(0, 1, 0, 2)],
        [c(1, 2, 0, 1), -c(0, 2, 0, 1), c(0, 1, 0, 1)],
    ]
}

/// A rigid frame: an origin and the direction of its x axis.
///
/// Solvers translate and rotate their inputs into a frame so that the first
/// object sits at the origin and the configuration's main axis is the x axis,
/// which keeps cancellation error in the closed form solves low.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frame {
    pub origin: Point,
    /// Unit direction of the local x axis.
    pub x_axis: Vector,
}

impl Frame {
    /// Frame at `origin` with its x axis along `direction`.
    ///
    /// Returns `None` if `direction` has no length.
    pub fn new(origin: Point, direction: Vector) -> Option<Self> {
        Some(Frame {
            origin,
            x_axis: normalized(direction)?,
        })
    }

    /// Frame at `origin` with its x axis at `angle` radians.
    pub fn with_angle(origin: Point, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Frame {
            origin,
            x_axis: vector(cos, sin),
        }
    }

    /// Frame at `origin`, axes parallel to the world axes.
    pub fn at(origin: Point) -> Self {
        Frame {
            origin,
            x_axis: vector(1.0, 0.0),
        }
    }

    #[inline]
    pub fn y_axis(&self) -> Vector {
        rotate_90(self.x_axis)
    }

    /// Angle of the local x axis.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.x_axis.y.atan2(self.x_axis.x)
    }

    #[inline]
    pub fn to_local(&self, p: Point) -> Point {
        let v = p - self.origin;
        point(v.dot(self.x_axis), v.dot(self.y_axis()))
    }

    #[inline]
    pub fn vector_to_local(&self, v: Vector) -> Vector {
        vector(v.dot(self.x_axis), v.dot(self.y_axis()))
    }

    #[inline]
    pub fn to_world(&self, p: Point) -> Point {
        self.origin + self.x_axis * p.x + self.y_axis() * p.y
    }

    #[inline]
    pub fn vector_to_world(&self, v: Vector) -> Vector {
        self.x_axis * v.x + self.y_axis() * v.y
    }

    /// The transform mapping world coordinates into this frame.
    pub fn world_to_local(&self) -> Transform {
        let x = self.x_axis;
        let y = self.y_axis();
        let o = self.origin.to_vector();
        Transform::new(x.x, y.x, x.y, y.y, -o.dot(x), -o.dot(y))
    }

    /// The transform mapping this frame's coordinates to world coordinates.
    pub fn local_to_world(&self) -> Transform {
        let x = self.x_axis;
        let y = self.y_axis();
        Transform::new(x.x, x.y, y.x, y.y, self.origin.x, self.origin.y)
    }
}

#[cfg(test)]
use crate::test_utils::fuzzy_eq_point;

#[test]
fn uniformity() {
    assert!(Transform::identity().is_uniform());
    assert!(rotation(Angle::radians(0.3))
        .then_scale(2.0, 2.0)
        .then_translate(vector(4.0, -1.0))
        .is_uniform());
    assert!(Transform::scale(1.0, -1.0).is_uniform());
    assert!(Transform::scale(1.0, -1.0).is_mirroring());
    assert!(!Transform::scale(2.0, 1.0).is_uniform());
    assert!(!Transform::new(1.0, 0.0, 0.5, 1.0, 0.0, 0.0).is_uniform());
}

#[test]
fn singular_inverse_is_an_error() {
    let t = Transform::scale(1.0, 0.0);
    assert!(matches!(t.checked_inverse(), Err(GeomError::SingularTransform(_))));

    let t = rotation(Angle::radians(1.0)).then_translate(vector(3.0, 2.0));
    let inv = t.checked_inverse().unwrap();
    let p = point(5.0, -7.0);
    assert!(fuzzy_eq_point(inv.apply_point(t.apply_point(p)), p, 1e-12));
}

#[test]
fn homogeneous_matrix_matches_transform_point() {
    let t = Transform::new(1.0, 2.0, -3.0, 0.5, 7.0, -2.0);
    let m = t.to_homogeneous();
    let p = point(1.5, -4.0);
    let q = t.apply_point(p);
    let x = m[0][0] * p.x + m[0][1] * p.y + m[0][2];
    let y = m[1][0] * p.x + m[1][1] * p.y + m[1][2];
    assert!(fuzzy_eq_point(point(x, y), q, 1e-12));
}

#[test]
fn adjugate_inverts() {
    let m = [[2.0, 1.0, 0.0], [1.0, 3.0, 1.0], [0.0, 1.0, 4.0]];
    let adj = mat3_adjugate(&m);
    let det = mat3_determinant(&m);
    let id = mat3_mul(&adj, &m);
    for (i, row) in id.iter().enumerate() {
        for (j, v) in row.iter().enumerate() {
            let expected = if i == j { det } else { 0.0 };
            assert!((v - expected).abs() < 1e-12);
        }
    }
}

#[test]
fn rotation_is_counter_clockwise() {
    let t = rotation(Angle::radians(core::f64::consts::FRAC_PI_2));
    assert!(fuzzy_eq_point(t.apply_point(point(1.0, 0.0)), point(0.0, 1.0), 1e-12));
    assert!((t.rotation_angle() - core::f64::consts::FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn frame_round_trip() {
    let frame = Frame::new(point(1.0, 2.0), vector(0.0, 5.0)).unwrap();
    let p = point(-3.0, 4.5);
    let local = frame.to_local(p);
    assert!(fuzzy_eq_point(local, point(2.5, 4.0), 1e-12));
    assert!(fuzzy_eq_point(frame.to_world(local), p, 1e-12));
    assert!(fuzzy_eq_point(frame.world_to_local().apply_point(p), local, 1e-12));
    assert!(fuzzy_eq_point(frame.local_to_world().apply_point(local), p, 1e-12));
}
