#![deny(bare_trait_objects)]

//! Exact 2D analytic geometry for drafting and CAD code.
//!
//! # Crates
//!
//! This meta-crate (`apollo`) reexports the following sub-crates for convenience:
//!
//! * **apollo_geom** - Lines, bulge-encoded arcs, circles, ellipses, hyperbolas,
//!   parabolas and general conics, with their classification and reduction.
//! * **apollo_algorithms** - Intersections between any two curves and the
//!   tangent constructions of Apollonius.
//!
//! Each `apollo_<name>` crate is reexported as a `<name>` module in `apollo`. For example:
//!
//! ```ignore
//! extern crate apollo_algorithms;
//! use apollo_algorithms::intersect::intersect;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! extern crate apollo;
//! use apollo::algorithms::intersect::intersect;
//! ```
//!
//! # Examples
//!
//! ## Circles tangent to three objects
//!
//! ```
//! use apollo::algorithms::tangent::{tan_tan_tan_circle, Primitive};
//! use apollo::geom::{Circle, Line};
//! use apollo::math::point;
//!
//! let circle = Primitive::Circle(Circle::new(point(0.0, 0.0), 1.0));
//! let line = Primitive::Line(Line::new(point(-5.0, -2.0), point(5.0, -2.0)));
//! let through = Primitive::Point(point(3.0, 0.0));
//!
//! for solution in tan_tan_tan_circle(&circle, &line, &through) {
//!     println!("center {:?} radius {}", solution.center, solution.radius);
//! }
//! ```
//!
//! ## Intersecting curves
//!
//! ```
//! use apollo::algorithms::intersect::intersect;
//! use apollo::geom::{AnyCurve, Circle, Ellipse};
//! use apollo::math::point;
//!
//! let circle = AnyCurve::Circle(Circle::new(point(0.0, 0.0), 1.5));
//! let ellipse = AnyCurve::Ellipse(Ellipse::new(point(0.0, 0.0), 2.0, 1.0, 0.0, true));
//!
//! assert_eq!(intersect(&circle, &ellipse).len(), 4);
//! ```

pub extern crate apollo_algorithms;
pub extern crate apollo_geom;

pub use apollo_algorithms as algorithms;
pub use apollo_geom as geom;

pub mod math {
    //! Basic types that are used everywhere.

    pub use apollo_geom::{point, vector, Angle, Point, Rotation, Transform, Vector};
}
