//! Tour encodings: from points to a binary cost function and back.
//!
//! A tour over `n` points is encoded with one binary variable per
//! [`EncodedNode`] `(step, point)`. The cost function has two parts:
//!
//! - **Adjacency objective**: variables on consecutive steps (cyclically)
//!   interact with the distance between their points.
//! - **Exclusivity constraints**: variables sharing a step or a point repel,
//!   and every variable carries a negative bias, so the lowest-penalty
//!   assignments pick exactly one point per step and one step per point.
//!
//! The constraints are scaled above the largest objective saving a
//! violation could buy (see [`EncodingWeights`]). [`SpinDecoder`] turns the solver's answer back into a
//! [`Tour`](crate::problem::Tour).

mod builder;
mod decoder;
mod node;
mod weights;

pub use builder::{CostFunctionBuilder, Encoding};
pub use decoder::SpinDecoder;
pub use node::EncodedNode;
pub use weights::{validate_grid_size, EncodingStrategy, EncodingWeights};
