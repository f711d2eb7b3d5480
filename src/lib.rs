//! Grid-partitioned TSP via binary quadratic optimization.
//!
//! Tours over 2-D points are encoded as binary quadratic cost functions,
//! handed to an annealing-style solver, and decoded back:
//!
//! - **Problem** ([`problem`]): point sets, tours, text I/O.
//! - **Grid** ([`grid`]): uniform partitioning and the cell visiting order,
//!   found by solving the plain encoding on cell centroids.
//! - **Encoding** ([`encoding`]): `(step, point)` decision variables,
//!   adjacency objective, exclusivity constraints, and decoding.
//! - **QUBO** ([`qubo`]): constraint graphs and the combined 0/1 cost
//!   function.
//! - **Anneal** ([`anneal`]): the solver contract and a Metropolis annealer.
//! - **Pipeline** ([`pipeline`], [`TspSolver`]): encode → solve → decode,
//!   with verification and a retry policy.
//!
//! # Example
//!
//! ```
//! use u_gridtsp::{PointSet, TspConfig, TspSolver};
//!
//! let points: PointSet = (0..8)
//!     .map(|i| {
//!         let a = i as f64 * std::f64::consts::TAU / 8.0;
//!         (a.cos(), a.sin())
//!     })
//!     .collect();
//!
//! let config = TspConfig::default().with_grid_size(2).with_seed(42);
//! let outcome = TspSolver::new(config)?.solve(&points)?;
//! if let Some(length) = outcome.length() {
//!     assert!(length > 0.0);
//! }
//! # Ok::<(), u_gridtsp::Error>(())
//! ```

pub mod anneal;
pub mod config;
pub mod driver;
pub mod encoding;
pub mod error;
pub mod grid;
pub mod pipeline;
pub mod problem;
pub mod qubo;
pub mod random;

pub use config::TspConfig;
pub use driver::TspSolver;
pub use encoding::{EncodedNode, EncodingStrategy, EncodingWeights};
pub use error::{Error, Result};
pub use pipeline::{Outcome, Pipeline};
pub use problem::{Point, PointSet, Tour, TourDefect};
