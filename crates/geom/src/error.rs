use crate::conic::ConicType;

use thiserror::Error;

/// Result type of the fallible operations of this crate.
pub type GeomResult<T> = Result<T, GeomError>;

/// Invalid input, or an operation that has no closed form for a curve type.
///
/// Geometric absence (two parallel lines, a circle that misses another) is
/// never reported through this type.
#[derive(Error, Copy, Clone, Debug, PartialEq)]
pub enum GeomError {
    #[error("hyperbola axes must be positive, got a = {a}, b = {b}")]
    InvalidHyperbolaAxes { a: f64, b: f64 },
    #[error("parabola focal distance must not be zero")]
    ZeroFocalDistance,
    #[error("transform is not invertible (determinant = {0})")]
    SingularTransform(f64),
    #[error("a zero-length vector has no direction")]
    ZeroLengthVector,
    #[error("{operation} is not computable on a degenerate {curve}")]
    Degenerate {
        curve: &'static str,
        operation: &'static str,
    },
    #[error("{operation} has no closed form for {curve}, reduce it to a specific curve first")]
    Unimplemented {
        curve: &'static str,
        operation: &'static str,
    },
    #[error("conic cannot be reduced to a real curve")]
    Irreducible,
    #[error("conic of type {0:?} is not a pair of real lines")]
    NotLinePair(ConicType),
}
