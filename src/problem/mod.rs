//! Problem instance and tour types.
//!
//! A [`PointSet`] is created once from input and passed by reference through
//! every stage. A [`Tour`] is the terminal artifact produced by decoding.

pub mod io;
mod point;
mod tour;

pub use point::{Point, PointSet};
pub use tour::{Tour, TourDefect};
