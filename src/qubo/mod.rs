//! Binary quadratic cost functions.
//!
//! Encoders write objective and constraint terms into separate
//! [`ConstraintGraph`]s; [`CostFunction::combine`] scales, sums, and
//! normalizes them into the symmetric 0/1 form consumed by solvers.

mod cost;
mod graph;

pub use cost::CostFunction;
pub use graph::ConstraintGraph;
