//! General conics given by their implicit equation.
//!
//! `a·x² + b·xy + c·y² + d·x + e·y + f = 0` is the interchange form between
//! the curve types of this crate: every conic curve converts to it, and
//! [`GeneralConic::reduce`] converts it back to the most specific curve type.
//!
//! The symmetric matrix of the conic is
//!
//! ```text
//! | a    b/2  d/2 |
//! | b/2  c    e/2 |
//! | d/2  e/2  f   |
//! ```
//!
//! and the classification relies on its determinant, on `J = a·c - b²/4`
//! (the determinant of the quadratic part) and on `I = a + c`.

use crate::circle::Circle;
use crate::curve::{Conic, Curve};
use crate::ellipse::Ellipse;
use crate::hyperbola::Hyperbola;
use crate::line::Line;
use crate::parabola::Parabola;
use crate::roots;
use crate::tolerance::{CONIC_EPSILON, EPSILON};
use crate::transform::{mat3_adjugate, mat3_determinant, mat3_mul, mat3_transpose, AffineExt, Matrix3};
use crate::utils::{max_abs, rotate, rotate_90, solve_2x2};
use crate::{point, vector, GeomError, GeomResult, Point, Transform, Vector};

use arrayvec::ArrayVec;
use core::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// The kind of curve a general conic describes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConicType {
    Circle,
    Ellipse,
    Parabola,
    Hyperbola,
    ImaginaryEllipse,
    ImaginaryCircle,
    IntersectingLines,
    ParallelLines,
    CoincidentLines,
    ComplexIntersectingLines,
    ComplexParallelLines,
    /// No quadratic term: a single line, or nothing at all.
    Unknown,
}

impl ConicType {
    /// True for the types whose matrix is singular.
    pub fn is_degenerate(self) -> bool {
        matches!(
            self,
            ConicType::IntersectingLines
                | ConicType::ParallelLines
                | ConicType::CoincidentLines
                | ConicType::ComplexIntersectingLines
                | ConicType::ComplexParallelLines
        )
    }

    /// True for the degenerate types made of real lines.
    pub fn is_line_pair(self) -> bool {
        matches!(
            self,
            ConicType::IntersectingLines | ConicType::ParallelLines | ConicType::CoincidentLines
        )
    }

    /// True for the types that have no real point, or a single one.
    pub fn is_imaginary(self) -> bool {
        matches!(
            self,
            ConicType::ImaginaryEllipse
                | ConicType::ImaginaryCircle
                | ConicType::ComplexIntersectingLines
                | ConicType::ComplexParallelLines
        )
    }

    pub fn is_elliptic(self) -> bool {
        matches!(self, ConicType::Circle | ConicType::Ellipse)
    }
}

/// The most specific curve equivalent to a general conic.
#[derive(Clone, Debug, PartialEq)]
pub enum Reduced {
    Circle(Circle),
    Ellipse(Ellipse),
    Parabola(Parabola),
    Hyperbola(Hyperbola),
    Lines(ArrayVec<Line, 2>),
}

/// A conic section `a·x² + b·xy + c·y² + d·x + e·y + f = 0`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeneralConic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

/// Coefficients in a frame rotated by `angle`, the cross term removed.
#[derive(Copy, Clone, Debug)]
struct Axial {
    angle: f64,
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Axial {
    fn to_world(&self, p: Point) -> Point {
        rotate(p.to_vector(), self.angle).to_point()
    }

    fn vector_to_world(&self, v: Vector) -> Vector {
        rotate(v, self.angle)
    }
}

impl GeneralConic {
    #[inline]
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        GeneralConic { a, b, c, d, e, f }
    }

    /// `(x - cx)² + (y - cy)² - r² = 0`.
    pub fn from_circle(center: Point, radius: f64) -> Self {
        GeneralConic {
            a: 1.0,
            b: 0.0,
            c: 1.0,
            d: -2.0 * center.x,
            e: -2.0 * center.y,
            f: center.x * center.x + center.y * center.y - radius * radius,
        }
    }

    /// The conic `q(p - center) = 1` for a centered quadratic form `q`.
    fn centered(center: Point, a: f64, b: f64, c: f64, f: f64) -> Self {
        let (cx, cy) = (center.x, center.y);
        GeneralConic {
            a,
            b,
            c,
            d: -2.0 * a * cx - b * cy,
            e: -b * cx - 2.0 * c * cy,
            f: a * cx * cx + b * cx * cy + c * cy * cy + f,
        }
    }

    /// Ellipse of semi axes `rx` (along `tilt`) and `ry`.
    pub fn from_ellipse_axes(center: Point, rx: f64, ry: f64, tilt: f64) -> Self {
        let (s, c) = tilt.sin_cos();
        let (ia, ib) = (1.0 / (rx * rx), 1.0 / (ry * ry));
        GeneralConic::centered(
            center,
            c * c * ia + s * s * ib,
            2.0 * c * s * (ia - ib),
            s * s * ia + c * c * ib,
            -1.0,
        )
    }

    /// Hyperbola of semi axes `a` (transverse, along `tilt`) and `b`.
    pub fn from_hyperbola_axes(center: Point, a: f64, b: f64, tilt: f64) -> Self {
        let (s, c) = tilt.sin_cos();
        let (ia, ib) = (1.0 / (a * a), 1.0 / (b * b));
        GeneralConic::centered(
            center,
            c * c * ia - s * s * ib,
            2.0 * c * s * (ia + ib),
            s * s * ia - c * c * ib,
            -1.0,
        )
    }

    /// Parabola `v = k·u²` in the frame at `vertex` rotated by `tilt`.
    pub fn from_parabola_coefficient(vertex: Point, tilt: f64, k: f64) -> Self {
        let (s, c) = tilt.sin_cos();
        let (qa, qb, qc) = (k * c * c, 2.0 * k * c * s, k * s * s);
        let (vx, vy) = (vertex.x, vertex.y);
        GeneralConic {
            a: qa,
            b: qb,
            c: qc,
            d: -2.0 * qa * vx - qb * vy + s,
            e: -qb * vx - 2.0 * qc * vy - c,
            f: qa * vx * vx + qb * vx * vy + qc * vy * vy - s * vx + c * vy,
        }
    }

    pub fn from_ellipse(ellipse: &Ellipse) -> Self {
        ellipse.to_general_conic()
    }

    pub fn from_hyperbola(hyperbola: &Hyperbola) -> Self {
        hyperbola.to_general_conic()
    }

    pub fn from_parabola(parabola: &Parabola) -> Self {
        parabola.to_general_conic()
    }

    /// The doubled line `(α·x + β·y + γ)² = 0`.
    ///
    /// A degenerate line gives the zero conic.
    pub fn from_line(line: &Line) -> Self {
        match line.equation() {
            Some((la, lb, lc)) => GeneralConic::from_line_equations((la, lb, lc), (la, lb, lc)),
            None => GeneralConic::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
        }
    }

    /// The product of two lines, `None` if one of them is degenerate.
    pub fn from_lines(l1: &Line, l2: &Line) -> Option<Self> {
        Some(GeneralConic::from_line_equations(l1.equation()?, l2.equation()?))
    }

    fn from_line_equations(l1: (f64, f64, f64), l2: (f64, f64, f64)) -> Self {
        let (a1, b1, c1) = l1;
        let (a2, b2, c2) = l2;
        GeneralConic {
            a: a1 * a2,
            b: a1 * b2 + a2 * b1,
            c: b1 * b2,
            d: a1 * c2 + a2 * c1,
            e: b1 * c2 + b2 * c1,
            f: c1 * c2,
        }
    }

    pub fn from_matrix(m: &Matrix3) -> Self {
        GeneralConic {
            a: m[0][0],
            b: m[0][1] + m[1][0],
            c: m[1][1],
            d: m[0][2] + m[2][0],
            e: m[1][2] + m[2][1],
            f: m[2][2],
        }
    }

    pub fn matrix(&self) -> Matrix3 {
        let (b, d, e) = (self.b * 0.5, self.d * 0.5, self.e * 0.5);
        [[self.a, b, d], [b, self.c, e], [d, e, self.f]]
    }

    #[inline]
    pub fn coefficients(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    /// Value of the implicit equation at `p`.
    #[inline]
    pub fn eval(&self, p: Point) -> f64 {
        let (x, y) = (p.x, p.y);
        self.a * x * x + self.b * x * y + self.c * y * y + self.d * x + self.e * y + self.f
    }

    /// Gradient of the implicit equation at `p`.
    #[inline]
    pub fn gradient(&self, p: Point) -> Vector {
        vector(
            2.0 * self.a * p.x + self.b * p.y + self.d,
            self.b * p.x + 2.0 * self.c * p.y + self.e,
        )
    }

    /// All coefficients divided by the largest one in magnitude.
    pub fn normalized(&self) -> Self {
        self.scaled_by(max_abs(&self.coefficients()))
    }

    /// All coefficients divided by the largest quadratic one in magnitude.
    fn quadratic_normalized(&self) -> Option<Self> {
        let quad = max_abs(&[self.a, self.b, self.c]);
        let all = max_abs(&self.coefficients());
        if quad == 0.0 || quad <= CONIC_EPSILON * all {
            return None;
        }

        Some(self.scaled_by(quad))
    }

    fn scaled_by(&self, s: f64) -> Self {
        if s == 0.0 || !s.is_finite() {
            return *self;
        }
        let k = 1.0 / s;
        GeneralConic::new(self.a * k, self.b * k, self.c * k, self.d * k, self.e * k, self.f * k)
    }

    /// Magnitude of the terms the determinant is made of, once the quadratic
    /// part is normalized.
    fn determinant_scale(&self) -> f64 {
        1.0 + self.f.abs() + 0.25 * (self.d * self.d + self.e * self.e)
    }

    /// Determinant of the 3×3 matrix.
    pub fn determinant(&self) -> f64 {
        mat3_determinant(&self.matrix())
    }

    /// Determinant of the quadratic part, `a·c - b²/4`.
    #[inline]
    pub fn j(&self) -> f64 {
        self.a * self.c - 0.25 * self.b * self.b
    }

    #[inline]
    pub fn trace(&self) -> f64 {
        self.a + self.c
    }

    pub fn conic_type(&self) -> ConicType {
        self.conic_type_with_tolerance(CONIC_EPSILON)
    }

    /// Classifies the conic, treating quantities within `tolerance` of zero
    /// (relative to the conic's scale) as zero.
    pub fn conic_type_with_tolerance(&self, tolerance: f64) -> ConicType {
        let n = match self.quadratic_normalized() {
            Some(n) => n,
            None => return ConicType::Unknown,
        };

        let det = n.determinant();
        let det_tolerance = tolerance * n.determinant_scale();
        let j = n.j();

        if det.abs() > det_tolerance {
            if j > tolerance {
                let circular = (n.a - n.c).abs() <= tolerance && n.b.abs() <= tolerance;
                match (det * n.trace() < 0.0, circular) {
                    (true, true) => ConicType::Circle,
                    (true, false) => ConicType::Ellipse,
                    (false, true) => ConicType::ImaginaryCircle,
                    (false, false) => ConicType::ImaginaryEllipse,
                }
            } else if j < -tolerance {
                ConicType::Hyperbola
            } else {
                ConicType::Parabola
            }
        } else if j < -tolerance {
            ConicType::IntersectingLines
        } else if j > tolerance {
            ConicType::ComplexIntersectingLines
        } else {
            let k = (n.a * n.f - 0.25 * n.d * n.d) + (n.c * n.f - 0.25 * n.e * n.e);
            if k < -det_tolerance {
                ConicType::ParallelLines
            } else if k > det_tolerance {
                ConicType::ComplexParallelLines
            } else {
                ConicType::CoincidentLines
            }
        }
    }

    /// Angle of the frame in which the cross term vanishes.
    pub fn rotation(&self) -> f64 {
        let scale = max_abs(&[self.a, self.b, self.c]);
        if self.b.abs() <= EPSILON * scale {
            return 0.0;
        }
        if (self.a - self.c).abs() <= EPSILON * scale {
            return FRAC_PI_4;
        }

        0.5 * (self.b / (self.a - self.c)).atan()
    }

    fn axial(&self) -> Axial {
        let angle = self.rotation();
        let (s, c) = angle.sin_cos();
        let (a, b, cc) = (self.a, self.b, self.c);

        Axial {
            angle,
            a: a * c * c + b * c * s + cc * s * s,
            b: b * (c * c - s * s) - 2.0 * (a - cc) * s * c,
            c: a * s * s - b * s * c + cc * c * c,
            d: self.d * c + self.e * s,
            e: -self.d * s + self.e * c,
            f: self.f,
        }
    }

    /// Center of symmetry.
    ///
    /// Pairs of parallel lines have a whole line of centers: the point of that
    /// line closest to the origin is returned. Parabolas have none.
    pub fn center(&self) -> Option<Point> {
        let n = self.quadratic_normalized()?;
        if let Some((x, y)) = solve_2x2(2.0 * n.a, n.b, n.b, 2.0 * n.c, -n.d, -n.e) {
            return Some(point(x, y));
        }

        // Both rows of the system describe the same line of centers, unless
        // the conic is a parabola and the rows contradict each other.
        let rows = [(2.0 * n.a, n.b, n.d), (n.b, 2.0 * n.c, n.e)];
        let (main, other) = if vector(rows[0].0, rows[0].1).square_length()
            >= vector(rows[1].0, rows[1].1).square_length()
        {
            (rows[0], rows[1])
        } else {
            (rows[1], rows[0])
        };

        let (ma, mb, mc) = main;
        let len2 = ma * ma + mb * mb;
        if len2 == 0.0 {
            return None;
        }
        let foot = point(-mc * ma / len2, -mc * mb / len2);
        let residual = other.0 * foot.x + other.1 * foot.y + other.2;
        if residual.abs() > EPSILON.sqrt() * n.determinant_scale().sqrt() {
            return None;
        }

        Some(foot)
    }

    /// Converts the conic into the most specific curve type.
    ///
    /// Fails with `Irreducible` for conics without real points and when a
    /// cross term remains after rotating the conic to its axes.
    pub fn reduce(&self) -> GeomResult<Reduced> {
        let ty = self.conic_type();
        if ty.is_line_pair() {
            return Ok(Reduced::Lines(self.to_lines()?));
        }
        if ty.is_imaginary() || ty == ConicType::Unknown {
            log::debug!("irreducible conic of type {:?}: {:?}", ty, self);
            return Err(GeomError::Irreducible);
        }

        let n = self.quadratic_normalized().ok_or(GeomError::Irreducible)?;
        let ax = n.axial();
        let scale = ax.a.abs().max(ax.c.abs());
        if ax.b.abs() > CONIC_EPSILON.sqrt() * scale {
            log::debug!("residual rotation {} after reduction of {:?}", ax.b, self);
            return Err(GeomError::Irreducible);
        }

        if ty == ConicType::Parabola {
            return reduce_parabola(&ax, scale).map(Reduced::Parabola);
        }

        let x0 = -ax.d / (2.0 * ax.a);
        let y0 = -ax.e / (2.0 * ax.c);
        let f = ax.f - ax.d * ax.d / (4.0 * ax.a) - ax.e * ax.e / (4.0 * ax.c);
        let p = -f / ax.a;
        let q = -f / ax.c;
        let center = ax.to_world(point(x0, y0));

        if p > 0.0 && q > 0.0 {
            if ty == ConicType::Circle || (p - q).abs() <= CONIC_EPSILON * p.max(q) {
                return Ok(Reduced::Circle(Circle::new(center, (0.5 * (p + q)).sqrt())));
            }
            return Ok(Reduced::Ellipse(Ellipse::new(center, p.sqrt(), q.sqrt(), ax.angle, true)));
        }
        if p > 0.0 && q < 0.0 {
            return Hyperbola::new(center, p.sqrt(), (-q).sqrt(), ax.angle).map(Reduced::Hyperbola);
        }
        if p < 0.0 && q > 0.0 {
            return Hyperbola::new(center, q.sqrt(), (-p).sqrt(), ax.angle + FRAC_PI_2)
                .map(Reduced::Hyperbola);
        }

        log::debug!("conic {:?} has no real axes (p = {}, q = {})", self, p, q);
        Err(GeomError::Irreducible)
    }

    /// The real lines of a degenerate conic.
    ///
    /// Only valid for intersecting, parallel and coincident lines, fails with
    /// `NotLinePair` for any other type. The returned lines are infinite lines
    /// given by two of their points.
    pub fn to_lines(&self) -> GeomResult<ArrayVec<Line, 2>> {
        let ty = self.conic_type();
        if !ty.is_line_pair() {
            return Err(GeomError::NotLinePair(ty));
        }

        Ok(self.line_components(ty))
    }

    /// The lines of a conic assumed to be degenerate regardless of its
    /// classification, as needed for the members of a pencil of conics.
    ///
    /// Complex intersecting lines give a single zero-length line at their
    /// only real point. Anything without real points gives nothing.
    pub fn degenerate_components(&self) -> ArrayVec<Line, 2> {
        if self.quadratic_normalized().is_none() {
            // A single line, the other one being at infinity.
            let mut lines = ArrayVec::new();
            let n = self.normalized();
            let normal = vector(n.d, n.e);
            let len2 = normal.square_length();
            if len2 > EPSILON {
                let origin = (normal * (-n.f / len2)).to_point();
                lines.push(Line::with_direction(origin, rotate_90(normal)));
            }
            return lines;
        }

        let ty = match self.conic_type() {
            ConicType::Ellipse | ConicType::Circle => ConicType::ComplexIntersectingLines,
            ConicType::ImaginaryEllipse | ConicType::ImaginaryCircle => ConicType::ComplexIntersectingLines,
            ConicType::Hyperbola => ConicType::IntersectingLines,
            ConicType::Parabola => ConicType::ParallelLines,
            other => other,
        };

        self.line_components(ty)
    }

    fn line_components(&self, ty: ConicType) -> ArrayVec<Line, 2> {
        let mut lines = ArrayVec::new();
        let n = match self.quadratic_normalized() {
            Some(n) => n,
            None => return lines,
        };

        match ty {
            ConicType::IntersectingLines => {
                let center = match n.center() {
                    Some(c) => c,
                    None => return lines,
                };
                let ax = n.axial();
                // a·x² + c·y² = 0 around the center, with a and c of opposite signs.
                let dirs = if ax.a.abs() <= ax.c.abs() {
                    let m = (-ax.a / ax.c).max(0.0).sqrt();
                    [vector(1.0, m), vector(1.0, -m)]
                } else {
                    let m = (-ax.c / ax.a).max(0.0).sqrt();
                    [vector(m, 1.0), vector(-m, 1.0)]
                };
                for dir in dirs {
                    lines.push(Line::with_direction(center, ax.vector_to_world(dir)));
                }
            }
            ConicType::ComplexIntersectingLines => {
                if let Some(center) = n.center() {
                    lines.push(Line::new(center, center));
                }
            }
            ConicType::ParallelLines | ConicType::CoincidentLines => {
                let ax = n.axial();
                // One of the axial quadratic terms vanishes; solve along the other one.
                let (offsets, dir, vertical) = if ax.a.abs() >= ax.c.abs() {
                    (roots::quadratic_with_tolerance(ax.a, ax.d, ax.f, 1e-8), vector(0.0, 1.0), true)
                } else {
                    (roots::quadratic_with_tolerance(ax.c, ax.e, ax.f, 1e-8), vector(1.0, 0.0), false)
                };
                for r in offsets {
                    let origin = if vertical { point(r, 0.0) } else { point(0.0, r) };
                    lines.push(Line::with_direction(ax.to_world(origin), ax.vector_to_world(dir)));
                }
            }
            _ => {}
        }

        lines
    }

    /// The dual conic, from the adjugate of the matrix.
    pub fn dual(&self) -> Self {
        GeneralConic::from_matrix(&mat3_adjugate(&self.matrix()))
    }

    /// Applies a transform: `Q' = H⁻ᵀ·Q·H⁻¹`.
    ///
    /// Returns `None` for singular transforms.
    pub fn transform(&self, transform: &Transform) -> Option<Self> {
        let inv = match transform.checked_inverse() {
            Ok(inv) => inv.to_homogeneous(),
            Err(e) => {
                log::debug!("cannot transform conic: {}", e);
                return None;
            }
        };
        let q = self.matrix();
        let m = mat3_mul(&mat3_transpose(&inv), &mat3_mul(&q, &inv));

        Some(GeneralConic::from_matrix(&m))
    }

    /// The conic of the points whose image by `transform` lies on this conic:
    /// `Q' = Hᵀ·Q·H`.
    ///
    /// Unlike [`transform`](Self::transform) this never inverts anything, and
    /// is how solvers express a curve in another curve's standard position.
    pub fn pulled_back(&self, transform: &Transform) -> Self {
        let h = transform.to_homogeneous();
        let m = mat3_mul(&mat3_transpose(&h), &mat3_mul(&self.matrix(), &h));

        GeneralConic::from_matrix(&m)
    }

    /// The member `self + λ·other` of the pencil of both conics.
    pub fn pencil(&self, other: &Self, lambda: f64) -> Self {
        GeneralConic::new(
            self.a + lambda * other.a,
            self.b + lambda * other.b,
            self.c + lambda * other.c,
            self.d + lambda * other.d,
            self.e + lambda * other.e,
            self.f + lambda * other.f,
        )
    }

    /// Coefficients of the cubic `det(self + λ·other)`, highest degree first.
    ///
    /// Its roots are the degenerate members of the pencil.
    pub fn pencil_determinant(&self, other: &Self) -> [f64; 4] {
        let a = self.matrix();
        let b = other.matrix();
        let trace = |m: &Matrix3, n: &Matrix3| {
            let p = mat3_mul(m, n);
            p[0][0] + p[1][1] + p[2][2]
        };

        [
            mat3_determinant(&b),
            trace(&a, &mat3_adjugate(&b)),
            trace(&mat3_adjugate(&a), &b),
            mat3_determinant(&a),
        ]
    }

    /// Enclosed area of real ellipses and circles, zero otherwise.
    pub fn enclosed_area(&self) -> f64 {
        if !self.conic_type().is_elliptic() {
            return 0.0;
        }
        let j = self.j();
        PI * self.determinant().abs() / (j * j * j).sqrt()
    }

    fn unimplemented(operation: &'static str) -> GeomError {
        GeomError::Unimplemented {
            curve: "general conic",
            operation,
        }
    }
}

fn reduce_parabola(ax: &Axial, scale: f64) -> GeomResult<Parabola> {
    if ax.a.abs() <= ax.c.abs() {
        // c·y² + d·x + e·y + f = 0, symmetric about a horizontal axis.
        if ax.d.abs() <= EPSILON * scale {
            return Err(GeomError::Irreducible);
        }
        let y0 = -ax.e / (2.0 * ax.c);
        let x0 = -(ax.f - ax.e * ax.e / (4.0 * ax.c)) / ax.d;
        let k = -ax.c / ax.d;
        let tilt = if k > 0.0 {
            ax.angle - FRAC_PI_2
        } else {
            ax.angle + FRAC_PI_2
        };
        Ok(Parabola {
            vertex: ax.to_world(point(x0, y0)),
            tilt,
            a: k.abs(),
        })
    } else {
        // a·x² + d·x + e·y + f = 0, symmetric about a vertical axis.
        if ax.e.abs() <= EPSILON * scale {
            return Err(GeomError::Irreducible);
        }
        let x0 = -ax.d / (2.0 * ax.a);
        let y0 = -(ax.f - ax.d * ax.d / (4.0 * ax.a)) / ax.e;
        let k = -ax.a / ax.e;
        let tilt = if k > 0.0 { ax.angle } else { ax.angle + PI };
        Ok(Parabola {
            vertex: ax.to_world(point(x0, y0)),
            tilt,
            a: k.abs(),
        })
    }
}

impl Curve for GeneralConic {
    fn name(&self) -> &'static str {
        "general conic"
    }

    fn is_closed(&self) -> bool {
        self.conic_type().is_elliptic()
    }

    fn length(&self) -> GeomResult<f64> {
        Err(GeneralConic::unimplemented("length"))
    }

    fn area(&self) -> GeomResult<f64> {
        Ok(self.enclosed_area())
    }

    fn signed_area(&self) -> GeomResult<f64> {
        Ok(self.enclosed_area())
    }

    fn point_at(&self, _t: f64) -> GeomResult<Point> {
        Err(GeneralConic::unimplemented("point_at"))
    }

    fn direction_at(&self, _t: f64) -> GeomResult<Vector> {
        Err(GeneralConic::unimplemented("direction_at"))
    }

    fn tangent_at(&self, _p: Point) -> GeomResult<Vector> {
        Err(GeneralConic::unimplemented("tangent_at"))
    }

    fn closest_point(&self, _p: Point) -> GeomResult<Point> {
        Err(GeneralConic::unimplemented("closest_point"))
    }

    fn position_of(&self, _p: Point) -> GeomResult<f64> {
        Err(GeneralConic::unimplemented("position_of"))
    }

    fn transformed(&self, transform: &Transform) -> Option<Self> {
        self.transform(transform)
    }
}

impl Conic for GeneralConic {
    fn to_general_conic(&self) -> GeneralConic {
        *self
    }
}

impl<'l, C: Conic> From<&'l C> for GeneralConic {
    fn from(curve: &'l C) -> Self {
        curve.to_general_conic()
    }
}

#[cfg(test)]
use crate::test_utils::{fuzzy_eq, fuzzy_eq_point};

#[cfg(test)]
fn assert_on_conic(conic: &GeneralConic, p: Point) {
    assert!(conic.normalized().eval(p).abs() < 1e-9, "{:?} not on {:?}", p, conic);
}

#[test]
fn circle_from_center_and_radius() {
    let conic = GeneralConic::from_circle(point(2.0, 3.0), 4.0);
    assert_eq!(conic.conic_type(), ConicType::Circle);
    assert!(fuzzy_eq_point(conic.center().unwrap(), point(2.0, 3.0), EPSILON));
    assert!(fuzzy_eq(conic.enclosed_area(), 16.0 * PI, 1e-9));

    match conic.reduce().unwrap() {
        Reduced::Circle(c) => {
            assert!(fuzzy_eq_point(c.center, point(2.0, 3.0), 1e-9));
            assert!(fuzzy_eq(c.radius, 4.0, 1e-9));
        }
        other => panic!("{:?}", other),
    }
}

#[test]
fn large_and_far_circles() {
    assert_eq!(
        GeneralConic::from_circle(point(0.0, 0.0), 1000.0).conic_type(),
        ConicType::Circle
    );
    assert_eq!(
        GeneralConic::from_circle(point(1000.0, -1000.0), 1.0).conic_type(),
        ConicType::Circle
    );
}

#[test]
fn classification() {
    let ellipse = GeneralConic::from_ellipse_axes(point(1.0, -1.0), 3.0, 1.0, 0.4);
    assert_eq!(ellipse.conic_type(), ConicType::Ellipse);
    let hyperbola = GeneralConic::from_hyperbola_axes(point(0.0, 2.0), 1.0, 2.0, -0.3);
    assert_eq!(hyperbola.conic_type(), ConicType::Hyperbola);
    let parabola = GeneralConic::from_parabola_coefficient(point(1.0, 1.0), 0.25, 0.5);
    assert_eq!(parabola.conic_type(), ConicType::Parabola);
    assert!(parabola.center().is_none());

    // x² + y² + 1 = 0
    let imaginary = GeneralConic::new(1.0, 0.0, 1.0, 0.0, 0.0, 1.0);
    assert_eq!(imaginary.conic_type(), ConicType::ImaginaryCircle);
    assert_eq!(imaginary.reduce(), Err(GeomError::Irreducible));
    // x² + 2y² + 1 = 0
    let imaginary = GeneralConic::new(1.0, 0.0, 2.0, 0.0, 0.0, 1.0);
    assert_eq!(imaginary.conic_type(), ConicType::ImaginaryEllipse);

    // Scaling by a negative factor changes nothing.
    let flipped = GeneralConic::new(-1.0, 0.0, -2.0, 0.0, 0.0, 4.0);
    assert_eq!(flipped.conic_type(), ConicType::Ellipse);

    // x² - y² = 0
    assert_eq!(
        GeneralConic::new(1.0, 0.0, -1.0, 0.0, 0.0, 0.0).conic_type(),
        ConicType::IntersectingLines
    );
    // x² + y² = 0
    assert_eq!(
        GeneralConic::new(1.0, 0.0, 1.0, 0.0, 0.0, 0.0).conic_type(),
        ConicType::ComplexIntersectingLines
    );
    // y² - 1 = 0
    assert_eq!(
        GeneralConic::new(0.0, 0.0, 1.0, 0.0, 0.0, -1.0).conic_type(),
        ConicType::ParallelLines
    );
    // y² + 1 = 0
    assert_eq!(
        GeneralConic::new(0.0, 0.0, 1.0, 0.0, 0.0, 1.0).conic_type(),
        ConicType::ComplexParallelLines
    );
    // (x - y + 1)² = 0
    assert_eq!(
        GeneralConic::new(1.0, -2.0, 1.0, 2.0, -2.0, 1.0).conic_type(),
        ConicType::CoincidentLines
    );
    // x + y = 0
    assert_eq!(
        GeneralConic::new(0.0, 0.0, 0.0, 1.0, 1.0, 0.0).conic_type(),
        ConicType::Unknown
    );
}

#[test]
fn rotation_angle() {
    assert_eq!(GeneralConic::new(1.0, 0.0, 2.0, 0.0, 0.0, -1.0).rotation(), 0.0);
    assert_eq!(GeneralConic::new(1.0, 1.0, 1.0, 0.0, 0.0, -1.0).rotation(), FRAC_PI_4);
    let tilted = GeneralConic::from_ellipse_axes(point(0.0, 0.0), 2.0, 1.0, 0.3);
    assert!(fuzzy_eq(tilted.rotation(), 0.3, 1e-12));
    assert!(tilted.axial().b.abs() < 1e-12);
}

#[test]
fn intersecting_lines() {
    let l1 = Line::new(point(0.0, 1.0), point(1.0, 2.0));
    let l2 = Line::new(point(0.0, 1.0), point(1.0, -1.0));
    let conic = GeneralConic::from_lines(&l1, &l2).unwrap();
    assert_eq!(conic.conic_type(), ConicType::IntersectingLines);
    assert!(fuzzy_eq_point(conic.center().unwrap(), point(0.0, 1.0), 1e-9));

    let lines = conic.to_lines().unwrap();
    assert_eq!(lines.len(), 2);
    for line in &lines {
        assert_on_conic(&conic, line.start);
        assert_on_conic(&conic, line.end);
    }
    // Each input line is found once.
    for input in [l1, l2] {
        let dir = input.direction().unwrap();
        assert!(lines
            .iter()
            .any(|l| crate::utils::perp_dot(l.direction().unwrap(), dir).abs() < 1e-9));
    }
}

#[test]
fn parallel_and_coincident_lines() {
    let l1 = Line::new(point(0.0, 1.0), point(2.0, 3.0));
    let l2 = Line::new(point(0.0, -2.0), point(2.0, 0.0));
    let conic = GeneralConic::from_lines(&l1, &l2).unwrap();
    assert_eq!(conic.conic_type(), ConicType::ParallelLines);
    let lines = conic.to_lines().unwrap();
    assert_eq!(lines.len(), 2);
    for line in &lines {
        assert_on_conic(&conic, line.start);
        assert_on_conic(&conic, line.end);
    }
    let center = conic.center().unwrap();
    assert_on_conic(&GeneralConic::new(0.0, 0.0, 0.0, -1.0, 1.0, 0.5), center);

    let doubled = GeneralConic::from_line(&l1);
    assert_eq!(doubled.conic_type(), ConicType::CoincidentLines);
    let lines = doubled.to_lines().unwrap();
    assert_eq!(lines.len(), 1);
    assert!(l1.signed_distance(lines[0].start).unwrap().abs() < 1e-9);

    assert_eq!(
        GeneralConic::from_circle(point(0.0, 0.0), 1.0).to_lines(),
        Err(GeomError::NotLinePair(ConicType::Circle))
    );
}

#[test]
fn reduce_ellipse_and_hyperbola() {
    let conic = GeneralConic::from_ellipse_axes(point(1.0, -2.0), 1.0, 3.0, 0.2);
    match conic.reduce().unwrap() {
        Reduced::Ellipse(e) => {
            assert!(fuzzy_eq_point(e.center, point(1.0, -2.0), 1e-9));
            assert!(fuzzy_eq(e.major_radius(), 3.0, 1e-9));
            assert!(fuzzy_eq(e.minor_radius(), 1.0, 1e-9));
            for t in [0.0, 0.3, 0.7] {
                assert_on_conic(&conic, e.sample(t * core::f64::consts::TAU));
            }
        }
        other => panic!("{:?}", other),
    }

    for tilt in [0.0, 0.5, 2.0] {
        let conic = GeneralConic::from_hyperbola_axes(point(-1.0, 0.5), 2.0, 1.0, tilt);
        match conic.reduce().unwrap() {
            Reduced::Hyperbola(h) => {
                assert!(fuzzy_eq_point(h.center, point(-1.0, 0.5), 1e-9));
                assert!(fuzzy_eq(h.major_radius(), 2.0, 1e-9));
                assert!(fuzzy_eq(h.minor_radius(), 1.0, 1e-9));
                for u in [-1.0, 0.0, 0.6] {
                    assert_on_conic(&conic, h.sample(u));
                }
            }
            other => panic!("{:?}", other),
        }
    }
}

#[test]
fn reduce_parabolas() {
    for tilt in [0.0, 0.4, FRAC_PI_2, 2.5, -1.0] {
        let conic = GeneralConic::from_parabola_coefficient(point(2.0, -1.0), tilt, 0.25);
        match conic.reduce().unwrap() {
            Reduced::Parabola(p) => {
                assert!(fuzzy_eq_point(p.vertex, point(2.0, -1.0), 1e-9));
                assert!(fuzzy_eq(p.focal_distance(), 1.0, 1e-9));
                assert!(fuzzy_eq_point(p.focus(), point(2.0, -1.0) + rotate(vector(0.0, 1.0), tilt), 1e-9));
                for x in [-2.0, 0.5, 3.0] {
                    assert_on_conic(&conic, p.sample(x));
                }
            }
            other => panic!("{:?}", other),
        }
    }
}

#[test]
fn dual_of_unit_circle() {
    let dual = GeneralConic::from_circle(point(0.0, 0.0), 1.0).dual();
    // adj(diag(1, 1, -1)) = diag(-1, -1, 1)
    assert_eq!(dual, GeneralConic::new(-1.0, 0.0, -1.0, 0.0, 0.0, 1.0));
}

#[test]
fn transform_conic() {
    let conic = GeneralConic::from_circle(point(0.0, 0.0), 1.0);
    let moved = conic.transform(&Transform::translation(3.0, 4.0)).unwrap();
    assert!(fuzzy_eq_point(moved.center().unwrap(), point(3.0, 4.0), 1e-12));
    assert_on_conic(&moved, point(4.0, 4.0));

    let stretched = conic.transform(&Transform::scale(2.0, 1.0)).unwrap();
    assert_eq!(stretched.conic_type(), ConicType::Ellipse);
    assert_on_conic(&stretched, point(2.0, 0.0));
    assert_on_conic(&stretched, point(0.0, 1.0));

    assert!(conic.transform(&Transform::scale(0.0, 1.0)).is_none());
    assert_eq!(conic.transformed(&Transform::identity()), Some(conic));
}

#[test]
fn no_closed_forms_on_general_conics() {
    let conic = GeneralConic::from_circle(point(0.0, 0.0), 1.0);
    assert!(matches!(conic.tangent_at(point(1.0, 0.0)), Err(GeomError::Unimplemented { .. })));
    assert!(matches!(conic.closest_point(point(2.0, 0.0)), Err(GeomError::Unimplemented { .. })));
    assert!(matches!(conic.distance(point(2.0, 0.0)), Err(GeomError::Unimplemented { .. })));
    assert!(matches!(conic.length(), Err(GeomError::Unimplemented { .. })));
    assert!(conic.is_closed());
}

#[test]
fn pencil_member_components() {
    // Difference of two unit circles: the radical line x = 1.
    let c1 = GeneralConic::from_circle(point(0.0, 0.0), 1.0);
    let c2 = GeneralConic::from_circle(point(2.0, 0.0), 1.0);
    let radical = GeneralConic::new(
        c1.a - c2.a,
        c1.b - c2.b,
        c1.c - c2.c,
        c1.d - c2.d,
        c1.e - c2.e,
        c1.f - c2.f,
    );
    let lines = radical.degenerate_components();
    assert_eq!(lines.len(), 1);
    assert!(fuzzy_eq(lines[0].start.x, 1.0, 1e-12));
    assert!(fuzzy_eq(lines[0].end.x, 1.0, 1e-12));

    // x² + y² = 0 only has the origin.
    let point_pair = GeneralConic::new(1.0, 0.0, 1.0, 0.0, 0.0, 0.0).degenerate_components();
    assert_eq!(point_pair.len(), 1);
    assert!(point_pair[0].is_degenerate());
}

#[test]
fn pull_back_and_pencil() {
    let circle = GeneralConic::from_circle(point(3.0, 4.0), 2.0);
    // Local frame centered on the circle, scaled by its radius.
    let t = Transform::new(2.0, 0.0, 0.0, 2.0, 3.0, 4.0);
    let local = circle.pulled_back(&t).normalized();
    let unit = GeneralConic::from_circle(point(0.0, 0.0), 1.0);
    for (l, u) in local.coefficients().iter().zip(unit.coefficients().iter()) {
        assert!(fuzzy_eq(*l, *u, 1e-12));
    }

    let other = GeneralConic::from_ellipse_axes(point(1.0, 0.0), 3.0, 1.0, 0.3);
    let [k3, k2, k1, k0] = circle.pencil_determinant(&other);
    for lambda in [-1.5, 0.0, 0.5, 2.0] {
        let expected = circle.pencil(&other, lambda).determinant();
        let actual = ((k3 * lambda + k2) * lambda + k1) * lambda + k0;
        assert!(fuzzy_eq(actual, expected, 1e-9 * (1.0 + expected.abs())));
    }
}
