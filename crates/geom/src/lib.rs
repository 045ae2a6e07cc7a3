#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]

//! Exact 2D curves and their algebra on top of euclid.
//!
//! This crate is reexported in `apollo`.
//!
//! # Overview.
//!
//! This crate implements the closed-form maths to work with:
//!
//! - lines and bulge-encoded circular arcs,
//! - circles and ellipses,
//! - hyperbolas and parabolas,
//! - general conics given by their implicit equation
//!   `a·x² + b·xy + c·y² + d·x + e·y + f = 0`.
//!
//! Every curve type implements the [`Curve`](curve::Curve) trait, and the
//! [`AnyCurve`](curve::AnyCurve) enum wraps any of them when the concrete type
//! is only known at runtime.
//!
//! # Tolerances
//!
//! Geometric comparisons go through the shared [`EPSILON`](tolerance::EPSILON).
//! A handful of algorithms use wider, documented tolerances where compounded
//! transformation error is expected; those live next to the algorithm that
//! needs them rather than in one global precision knob.
//!
//! # Failures
//!
//! A configuration that geometrically has no answer (parallel lines, a point
//! inside a circle asked for tangents) yields `None` or an empty collection.
//! Invalid input (a singular transform, a parabola with a zero focal distance)
//! and operations without a closed form on a given curve type yield a
//! [`GeomError`].

// Reexport dependencies.
pub use arrayvec;
pub use euclid;

pub mod arc;
pub mod circle;
pub mod conic;
pub mod curve;
pub mod ellipse;
mod error;
pub mod hyperbola;
mod line;
pub mod parabola;
pub mod point_set;
pub mod roots;
pub mod transform;
pub mod utils;

#[doc(inline)]
pub use crate::arc::Arc;
#[doc(inline)]
pub use crate::circle::Circle;
#[doc(inline)]
pub use crate::conic::{ConicType, GeneralConic, Reduced};
#[doc(inline)]
pub use crate::curve::{AnyCurve, Conic, Curve};
#[doc(inline)]
pub use crate::ellipse::Ellipse;
pub use crate::error::{GeomError, GeomResult};
#[doc(inline)]
pub use crate::hyperbola::Hyperbola;
#[doc(inline)]
pub use crate::line::Line;
#[doc(inline)]
pub use crate::parabola::Parabola;
#[doc(inline)]
pub use crate::point_set::PointSet;
pub use crate::transform::AffineExt;

pub mod tolerance {
    //! Shared tolerance constants.

    /// The shared epsilon used by geometric comparisons throughout the kernel.
    pub const EPSILON: f64 = 1e-10;

    /// Default near-zero threshold of the conic classifier.
    pub const CONIC_EPSILON: f64 = 1e-10;

    #[inline]
    pub fn is_zero(v: f64) -> bool {
        v.abs() <= EPSILON
    }

    #[inline]
    pub fn fuzzy_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() <= epsilon
    }
}

/// Alias for `euclid::default::Point2D<f64>`.
pub type Point = euclid::default::Point2D<f64>;

/// Alias for `euclid::default::Vector2D<f64>`.
pub type Vector = euclid::default::Vector2D<f64>;

/// Alias for `euclid::default::Transform2D<f64>`.
///
/// The linear part maps the x axis to `(m11, m12)` and the y axis to
/// `(m21, m22)`; `(m31, m32)` is the translation.
pub type Transform = euclid::default::Transform2D<f64>;

/// Alias for `euclid::default::Rotation2D<f64>`.
pub type Rotation = euclid::default::Rotation2D<f64>;

/// An angle in radians.
pub type Angle = euclid::Angle<f64>;

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector(x: f64, y: f64) -> Vector {
    Vector::new(x, y)
}

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[cfg(test)]
pub(crate) mod test_utils {
    use crate::{Point, Vector};

    pub fn fuzzy_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() <= epsilon
    }

    pub fn fuzzy_eq_point(a: Point, b: Point, epsilon: f64) -> bool {
        fuzzy_eq(a.x, b.x, epsilon) && fuzzy_eq(a.y, b.y, epsilon)
    }

    pub fn fuzzy_eq_vector(a: Vector, b: Vector, epsilon: f64) -> bool {
        fuzzy_eq(a.x, b.x, epsilon) && fuzzy_eq(a.y, b.y, epsilon)
    }
}
