//! Grid partitioning and cell ordering.
//!
//! [`GridPartitioner`] buckets points into a uniform grid; the
//! [`CellOrderResolver`] fixes the order in which cells are toured by
//! solving a small plain instance over the cell centroids.

mod order;
mod partition;

pub use order::{repair_order, CellOrderResolver};
pub use partition::{CellCoord, CentroidSet, Grid, GridCell, GridPartitioner, EPSILON};
