//! The capability set shared by every curve type.

use crate::conic::GeneralConic;
use crate::transform::AffineExt;
use crate::{
    Arc, Circle, Ellipse, GeomError, GeomResult, Hyperbola, Line, Parabola, Point, Transform,
    Vector,
};

/// Common APIs to curve types.
///
/// Parameters are normalized to `[0, 1]` for bounded curves. Unbounded curves
/// use their natural parameter: the local abscissa for a parabola, the
/// hyperbolic angle for a hyperbola.
///
/// Operations that have no closed form for a given curve type return
/// [`GeomError::Unimplemented`] instead of approximating.
pub trait Curve {
    /// Short name of the curve type, used in error messages.
    fn name(&self) -> &'static str;

    /// Whether the curve is a closed loop.
    fn is_closed(&self) -> bool;

    /// Length of the curve, `f64::INFINITY` for unbounded curves.
    fn length(&self) -> GeomResult<f64>;

    /// Enclosed area, `0` for open curves.
    fn area(&self) -> GeomResult<f64> {
        Ok(self.signed_area()?.abs())
    }

    /// Enclosed area, negative for clockwise curves.
    fn signed_area(&self) -> GeomResult<f64>;

    /// Sample the curve at `t`.
    fn point_at(&self, t: f64) -> GeomResult<Point>;

    /// Derivative of the curve with respect to its parameter at `t`.
    fn direction_at(&self, t: f64) -> GeomResult<Vector>;

    /// Unit tangent at the point of the curve closest to `p`, oriented along
    /// the curve's direction.
    fn tangent_at(&self, p: Point) -> GeomResult<Vector>;

    /// Point of the curve closest to `p`.
    fn closest_point(&self, p: Point) -> GeomResult<Point>;

    /// Parameter of the point of the curve closest to `p`.
    fn position_of(&self, p: Point) -> GeomResult<f64>;

    /// Distance between `p` and the curve.
    fn distance(&self, p: Point) -> GeomResult<f64> {
        Ok(self.closest_point(p)?.distance_to(p))
    }

    /// Applies a transform.
    ///
    /// Returns `None` if the result cannot be represented by the same curve
    /// type (a circle under a non-uniform scale, for example).
    fn transformed(&self, transform: &Transform) -> Option<Self>
    where
        Self: Sized;
}

/// Curves that have an implicit second degree equation.
pub trait Conic: Curve {
    fn to_general_conic(&self) -> GeneralConic;
}

/// Any of the curve types of this crate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AnyCurve {
    Line(Line),
    Arc(Arc),
    Circle(Circle),
    Ellipse(Ellipse),
    Hyperbola(Hyperbola),
    Parabola(Parabola),
    Conic(GeneralConic),
}

macro_rules! dispatch {
    ($self:expr, $curve:ident => $e:expr) => {
        match $self {
            AnyCurve::Line($curve) => $e,
            AnyCurve::Arc($curve) => $e,
            AnyCurve::Circle($curve) => $e,
            AnyCurve::Ellipse($curve) => $e,
            AnyCurve::Hyperbola($curve) => $e,
            AnyCurve::Parabola($curve) => $e,
            AnyCurve::Conic($curve) => $e,
        }
    };
}

impl AnyCurve {
    /// Applies a transform, promoting the curve to a more general type when
    /// needed: circles become ellipses under non-uniform transforms.
    ///
    /// Returns `None` only for singular transforms and for arcs under
    /// non-uniform transforms (elliptic arcs are not represented).
    pub fn transformed(&self, transform: &Transform) -> Option<AnyCurve> {
        match self {
            AnyCurve::Circle(c) => match c.transformed(transform) {
                Some(c) => Some(AnyCurve::Circle(c)),
                None => Ellipse::from(*c).transformed(transform).map(AnyCurve::Ellipse),
            },
            AnyCurve::Line(c) => c.transformed(transform).map(AnyCurve::Line),
            AnyCurve::Arc(c) => c.transformed(transform).map(AnyCurve::Arc),
            AnyCurve::Ellipse(c) => c.transformed(transform).map(AnyCurve::Ellipse),
            AnyCurve::Hyperbola(c) => c.transformed(transform).map(AnyCurve::Hyperbola),
            AnyCurve::Parabola(c) => c.transformed(transform).map(AnyCurve::Parabola),
            AnyCurve::Conic(c) => c.transformed(transform).map(AnyCurve::Conic),
        }
    }

    /// The implicit equation of the curve.
    ///
    /// Arcs give the equation of their supporting circle (or line, when they
    /// are straight), lines give their doubled line.
    pub fn to_general_conic(&self) -> GeneralConic {
        match self {
            AnyCurve::Line(c) => GeneralConic::from_line(c),
            AnyCurve::Arc(c) => match c.to_circle() {
                Some(circle) => circle.to_general_conic(),
                None => GeneralConic::from_line(&c.chord()),
            },
            AnyCurve::Circle(c) => c.to_general_conic(),
            AnyCurve::Ellipse(c) => c.to_general_conic(),
            AnyCurve::Hyperbola(c) => c.to_general_conic(),
            AnyCurve::Parabola(c) => c.to_general_conic(),
            AnyCurve::Conic(c) => *c,
        }
    }

    /// Applies a transform that must keep the curve type, failing with
    /// `SingularTransform` when the transform cannot be inverted.
    pub fn try_transformed(&self, transform: &Transform) -> GeomResult<AnyCurve> {
        transform.checked_inverse()?;
        self.transformed(transform).ok_or(GeomError::Unimplemented {
            curve: self.name(),
            operation: "non-uniform transform",
        })
    }
}

impl Curve for AnyCurve {
    fn name(&self) -> &'static str {
        dispatch!(self, c => Curve::name(c))
    }

    fn is_closed(&self) -> bool {
        dispatch!(self, c => Curve::is_closed(c))
    }

    fn length(&self) -> GeomResult<f64> {
        dispatch!(self, c => Curve::length(c))
    }

    fn area(&self) -> GeomResult<f64> {
        dispatch!(self, c => Curve::area(c))
    }

    fn signed_area(&self) -> GeomResult<f64> {
        dispatch!(self, c => Curve::signed_area(c))
    }

    fn point_at(&self, t: f64) -> GeomResult<Point> {
        dispatch!(self, c => Curve::point_at(c, t))
    }

    fn direction_at(&self, t: f64) -> GeomResult<Vector> {
        dispatch!(self, c => Curve::direction_at(c, t))
    }

    fn tangent_at(&self, p: Point) -> GeomResult<Vector> {
        dispatch!(self, c => Curve::tangent_at(c, p))
    }

    fn closest_point(&self, p: Point) -> GeomResult<Point> {
        dispatch!(self, c => Curve::closest_point(c, p))
    }

    fn position_of(&self, p: Point) -> GeomResult<f64> {
        dispatch!(self, c => Curve::position_of(c, p))
    }

    fn distance(&self, p: Point) -> GeomResult<f64> {
        dispatch!(self, c => Curve::distance(c, p))
    }

    fn transformed(&self, transform: &Transform) -> Option<Self> {
        AnyCurve::transformed(self, transform)
    }
}

macro_rules! impl_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for AnyCurve {
                fn from(c: $variant) -> Self {
                    AnyCurve::$variant(c)
                }
            }
        )*
    };
}

impl_from!(Line, Arc, Circle, Ellipse, Hyperbola, Parabola);

impl From<GeneralConic> for AnyCurve {
    fn from(c: GeneralConic) -> Self {
        AnyCurve::Conic(c)
    }
}

#[cfg(test)]
use crate::point;

#[test]
fn circle_promotes_to_ellipse() {
    let c = AnyCurve::from(Circle::new(point(1.0, 0.0), 2.0));
    let stretched = c.transformed(&Transform::scale(2.0, 1.0)).unwrap();
    match stretched {
        AnyCurve::Ellipse(e) => {
            assert!((e.major_radius() - 4.0).abs() < 1e-9);
            assert!((e.minor_radius() - 2.0).abs() < 1e-9);
            assert!((e.center - point(2.0, 0.0)).length() < 1e-9);
        }
        other => panic!("expected an ellipse, got {:?}", other),
    }

    let moved = c.transformed(&Transform::translation(1.0, 1.0)).unwrap();
    assert!(matches!(moved, AnyCurve::Circle(_)));
}

#[test]
fn dispatch_reaches_variants() {
    let line = AnyCurve::from(Line::new(point(0.0, 0.0), point(3.0, 4.0)));
    assert_eq!(line.length(), Ok(5.0));
    assert!(!line.is_closed());
    assert_eq!(line.area(), Ok(0.0));

    let conic = AnyCurve::from(GeneralConic::from_circle(point(0.0, 0.0), 1.0));
    assert!(matches!(
        conic.tangent_at(point(1.0, 0.0)),
        Err(GeomError::Unimplemented { .. })
    ));
    assert_eq!(conic.name(), "general conic");

    let singular = Transform::scale(0.0, 1.0);
    assert!(matches!(
        line.try_transformed(&singular),
        Err(GeomError::SingularTransform(_))
    ));
}
