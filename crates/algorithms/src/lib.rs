#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]

//! Intersections and tangent constructions on exact 2D curves.
//!
//! This crate is reexported in `apollo`.
//!
//! - [`intersect`] finds the intersection points of any two curves of
//!   `apollo_geom`, solving in the standard position of the simplest of the
//!   two.
//! - [`tangent`] solves the problems of Apollonius: lines tangent to two
//!   objects, circles of a given radius tangent to two objects and circles
//!   tangent to three objects, each object being a point, a line or a circle.

pub extern crate apollo_geom as geom;

pub mod intersect;
pub mod tangent;

pub mod math {
    //! Basic types that are used everywhere.

    pub use crate::geom::{point, vector, Angle, Point, Transform, Vector};
}
