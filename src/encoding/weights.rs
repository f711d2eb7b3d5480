//! Encoding strategy and term weights.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the tour problem is laid out into decision variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EncodingStrategy {
    /// Every point may occupy every step: `n²` variables.
    #[default]
    Plain,
    /// Points are bucketed into a `grid_size × grid_size` grid, the cells
    /// are ordered by solving the plain problem on their centroids, and
    /// each cell's points only compete for the cell's block of steps.
    Grid { grid_size: usize },
}

impl EncodingStrategy {
    pub fn validate(&self) -> Result<()> {
        match *self {
            EncodingStrategy::Plain => Ok(()),
            EncodingStrategy::Grid { grid_size } => validate_grid_size(grid_size),
        }
    }
}

/// Grid dimensions must be even and at least 2.
pub fn validate_grid_size(grid_size: usize) -> Result<()> {
    if grid_size < 2 || grid_size % 2 != 0 {
        return Err(Error::InvalidGridSize(grid_size));
    }
    Ok(())
}

/// Weights of the objective and constraint terms.
///
/// With the crate's energy convention (each directed constraint entry adds
/// `penalty_weight * x_a * x_b`, so a conflicting pair costs
/// `2 * penalty_weight`), any `bias_factor` strictly between 0 and 4 makes
/// the one-per-step, one-per-point assignments the unique penalty minima;
/// 2 sits in the middle of that range.
///
/// With normalized distances no objective edge exceeds 1, so dropping a
/// variable saves at most 2 while costing `2 * penalty_weight *
/// constraint_scale`; any `constraint_scale` above 1 keeps violations
/// unprofitable. Larger scales stay feasible but raise the barriers the
/// annealer has to cross between tours, so the objective matters less.
///
/// # Examples
///
/// ```
/// use u_gridtsp::encoding::EncodingWeights;
///
/// let weights = EncodingWeights::default()
///     .with_constraint_scale(1e6)
///     .with_normalize_distances(false);
/// assert!(weights.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EncodingWeights {
    /// Multiplier applied to Euclidean distances in the adjacency objective.
    pub distance_scale: f64,

    /// Divide distances by the bounding-box diagonal before scaling, so the
    /// objective stays in `[0, distance_scale]` per edge whatever the
    /// coordinate range.
    pub normalize_distances: bool,

    /// Repulsion between two variables sharing a step or a point.
    pub penalty_weight: f64,

    /// Every variable's bias is lowered by `bias_factor * penalty_weight`.
    pub bias_factor: f64,

    /// Scale of the adjacency objective in the combined cost function.
    pub objective_scale: f64,

    /// Scale of the exclusivity constraints in the combined cost function.
    pub constraint_scale: f64,
}

impl Default for EncodingWeights {
    fn default() -> Self {
        Self {
            distance_scale: 1.0,
            normalize_distances: true,
            penalty_weight: 1.0,
            bias_factor: 2.0,
            objective_scale: 1.0,
            constraint_scale: 2.0,
        }
    }
}

impl EncodingWeights {
    pub fn with_distance_scale(mut self, scale: f64) -> Self {
        self.distance_scale = scale;
        self
    }

    pub fn with_normalize_distances(mut self, normalize: bool) -> Self {
        self.normalize_distances = normalize;
        self
    }

    pub fn with_penalty_weight(mut self, weight: f64) -> Self {
        self.penalty_weight = weight;
        self
    }

    pub fn with_bias_factor(mut self, factor: f64) -> Self {
        self.bias_factor = factor;
        self
    }

    pub fn with_objective_scale(mut self, scale: f64) -> Self {
        self.objective_scale = scale;
        self
    }

    pub fn with_constraint_scale(mut self, scale: f64) -> Self {
        self.constraint_scale = scale;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("distance_scale", self.distance_scale),
            ("penalty_weight", self.penalty_weight),
            ("bias_factor", self.bias_factor),
            ("objective_scale", self.objective_scale),
            ("constraint_scale", self.constraint_scale),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::invalid_config(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}
