//! Annealing schedules and annealer configuration.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the solver chooses its starting assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InitMode {
    /// Each variable starts active with probability `active_ratio`.
    #[default]
    Random,
    /// Every variable starts inactive.
    Inactive,
}

/// Parameters passed to [`SpinSolver::init`](super::SpinSolver::init).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Schedule {
    pub init_mode: InitMode,

    /// Geometric cooling factor in (0, 1): `T_{k+1} = cooling_factor * T_k`.
    pub cooling_factor: f64,

    /// Initial temperature as a fraction of the largest single-flip energy
    /// change of the cost function.
    pub initial_param: f64,

    /// Fraction of variables active at start (for [`InitMode::Random`]).
    pub active_ratio: f64,
}

impl Schedule {
    pub fn validate(&self) -> Result<()> {
        if !(self.cooling_factor > 0.0 && self.cooling_factor < 1.0) {
            return Err(Error::invalid_config(format!(
                "cooling factor must be in (0, 1), got {}",
                self.cooling_factor
            )));
        }
        if self.initial_param <= 0.0 || !self.initial_param.is_finite() {
            return Err(Error::invalid_config(format!(
                "initial parameter must be positive, got {}",
                self.initial_param
            )));
        }
        if !(0.0..=1.0).contains(&self.active_ratio) {
            return Err(Error::invalid_config(format!(
                "active ratio must be in [0, 1], got {}",
                self.active_ratio
            )));
        }
        Ok(())
    }
}

/// How many variables start active.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ActiveRatio {
    /// `min(1, 1 / sqrt(size))`, calibrated to the cost function size.
    #[default]
    Auto,
    /// A fixed fraction in [0, 1].
    Fixed(f64),
}

impl ActiveRatio {
    /// Resolves the ratio for a cost function with `size` variables.
    pub fn resolve(self, size: usize) -> f64 {
        match self {
            ActiveRatio::Auto => (1.0 / (size as f64).sqrt()).min(1.0),
            ActiveRatio::Fixed(ratio) => ratio,
        }
    }
}

/// Schedule settings for one solver run, before the cost function size is
/// known.
///
/// # Examples
///
/// ```
/// use u_gridtsp::anneal::{ActiveRatio, InitMode, ScheduleConfig};
///
/// let config = ScheduleConfig::default()
///     .with_cooling_factor(0.995)
///     .with_active_ratio(ActiveRatio::Fixed(0.25));
/// let schedule = config.resolve(64);
/// assert_eq!(schedule.init_mode, InitMode::Random);
/// assert_eq!(schedule.active_ratio, 0.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleConfig {
    pub init_mode: InitMode,
    pub cooling_factor: f64,
    pub initial_param: f64,
    pub active_ratio: ActiveRatio,

    /// Extra steps run after the solver's planned total.
    pub settle_steps: usize,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            init_mode: InitMode::Random,
            cooling_factor: 0.999,
            initial_param: 0.3,
            active_ratio: ActiveRatio::Auto,
            settle_steps: 10,
        }
    }
}

impl ScheduleConfig {
    pub fn with_init_mode(mut self, mode: InitMode) -> Self {
        self.init_mode = mode;
        self
    }

    pub fn with_cooling_factor(mut self, factor: f64) -> Self {
        self.cooling_factor = factor;
        self
    }

    pub fn with_initial_param(mut self, param: f64) -> Self {
        self.initial_param = param;
        self
    }

    pub fn with_active_ratio(mut self, ratio: ActiveRatio) -> Self {
        self.active_ratio = ratio;
        self
    }

    pub fn with_settle_steps(mut self, steps: usize) -> Self {
        self.settle_steps = steps;
        self
    }

    /// Builds the solver schedule for a cost function with `size` variables.
    pub fn resolve(&self, size: usize) -> Schedule {
        Schedule {
            init_mode: self.init_mode,
            cooling_factor: self.cooling_factor,
            initial_param: self.initial_param,
            active_ratio: self.active_ratio.resolve(size),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let ActiveRatio::Fixed(ratio) = self.active_ratio {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(Error::invalid_config(format!(
                    "active ratio must be in [0, 1], got {ratio}"
                )));
            }
        }
        self.resolve(1).validate()
    }
}

/// Configuration for the built-in [`Annealer`](super::Annealer).
///
/// # Examples
///
/// ```
/// use u_gridtsp::anneal::AnnealConfig;
///
/// let config = AnnealConfig::default()
///     .with_final_temperature_fraction(0.05)
///     .with_max_steps(5_000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnnealConfig {
    /// Final temperature as a fraction of the smallest nonzero coefficient.
    ///
    /// Small values let the objective terms freeze out at the end.
    pub final_temperature_fraction: f64,

    /// Hard cap on planned steps (sweeps).
    pub max_steps: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            final_temperature_fraction: 0.01,
            max_steps: 50_000,
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_final_temperature_fraction(mut self, fraction: f64) -> Self {
        self.final_temperature_fraction = fraction;
        self
    }

    pub fn with_max_steps(mut self, steps: usize) -> Self {
        self.max_steps = steps;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.final_temperature_fraction <= 0.0 || !self.final_temperature_fraction.is_finite() {
            return Err(Error::invalid_config(format!(
                "final temperature fraction must be positive, got {}",
                self.final_temperature_fraction
            )));
        }
        if self.max_steps == 0 {
            return Err(Error::invalid_config("max_steps must be positive"));
        }
        Ok(())
    }
}
