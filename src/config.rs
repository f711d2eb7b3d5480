//! Top-level solver configuration.

use crate::anneal::{AnnealConfig, ScheduleConfig};
use crate::encoding::{EncodingStrategy, EncodingWeights};
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for [`TspSolver`](crate::TspSolver).
///
/// # Examples
///
/// ```
/// use u_gridtsp::{EncodingStrategy, TspConfig};
///
/// let config = TspConfig::default()
///     .with_grid_size(4)
///     .with_attempts(3)
///     .with_seed(7);
/// assert_eq!(config.strategy, EncodingStrategy::Grid { grid_size: 4 });
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TspConfig {
    /// Plain or grid-partitioned encoding of the full instance.
    pub strategy: EncodingStrategy,

    pub weights: EncodingWeights,

    /// Schedule for the full instance. The cell-order sub-problem always
    /// uses [`CellOrderResolver::schedule`](crate::grid::CellOrderResolver::schedule).
    pub schedule: ScheduleConfig,

    pub anneal: AnnealConfig,

    /// Pipeline runs; the shortest feasible tour wins.
    pub attempts: usize,
}

impl Default for TspConfig {
    fn default() -> Self {
        Self {
            strategy: EncodingStrategy::Grid { grid_size: 2 },
            weights: EncodingWeights::default(),
            schedule: ScheduleConfig::default(),
            anneal: AnnealConfig::default(),
            attempts: 1,
        }
    }
}

impl TspConfig {
    pub fn with_strategy(mut self, strategy: EncodingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.strategy = EncodingStrategy::Grid { grid_size };
        self
    }

    pub fn plain(mut self) -> Self {
        self.strategy = EncodingStrategy::Plain;
        self
    }

    pub fn with_weights(mut self, weights: EncodingWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_schedule(mut self, schedule: ScheduleConfig) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_anneal(mut self, anneal: AnnealConfig) -> Self {
        self.anneal = anneal;
        self
    }

    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.anneal.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.strategy.validate()?;
        self.weights.validate()?;
        self.schedule.validate()?;
        self.anneal.validate()?;
        if self.attempts == 0 {
            return Err(Error::invalid_config("attempts must be at least 1"));
        }
        Ok(())
    }
}
