//! Metropolis annealer over a [`CostFunction`].

use rand::rngs::StdRng;
use rand::Rng;

use super::config::{AnnealConfig, InitMode, Schedule};
use super::types::{SolverFactory, SpinSolver};
use crate::qubo::CostFunction;
use crate::random::{create_rng, rng_from};

/// Counters collected while annealing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnnealStats {
    /// Flip proposals evaluated.
    pub proposals: usize,
    /// Accepted flips (including improvements).
    pub accepted_moves: usize,
    /// Flips that lowered the energy.
    pub improving_moves: usize,
}

/// Single-flip simulated annealing on 0/1 variables.
///
/// One step is a sweep of `size` random flip proposals at a fixed
/// temperature followed by geometric cooling. Local fields are updated
/// incrementally, so a proposal costs O(1) and an accepted flip costs
/// O(degree).
pub struct Annealer {
    cost: CostFunction,
    config: AnnealConfig,
    rng: StdRng,

    state: Vec<bool>,
    fields: Vec<f64>,
    energy: f64,

    best: Vec<bool>,
    best_energy: f64,

    temperature: f64,
    cooling_factor: f64,
    step: usize,
    total_steps: usize,
    stats: AnnealStats,
}

impl Annealer {
    pub fn new(cost: CostFunction, config: AnnealConfig) -> Self {
        let rng = rng_from(config.seed);
        Self::with_rng(cost, config, rng)
    }

    fn with_rng(cost: CostFunction, config: AnnealConfig, rng: StdRng) -> Self {
        let size = cost.size();
        Self {
            fields: cost.bias().to_vec(),
            cost,
            config,
            rng,
            state: vec![false; size],
            energy: 0.0,
            best: vec![false; size],
            best_energy: 0.0,
            temperature: 0.0,
            cooling_factor: 1.0,
            step: 0,
            total_steps: 0,
            stats: AnnealStats::default(),
        }
    }

    /// Current temperature.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Energy of the current assignment.
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Energy of the best assignment.
    pub fn best_energy(&self) -> f64 {
        self.best_energy
    }

    pub fn stats(&self) -> AnnealStats {
        self.stats
    }

    pub fn cost_function(&self) -> &CostFunction {
        &self.cost
    }

    fn flip(&mut self, i: usize) {
        let delta = if self.state[i] {
            -self.fields[i]
        } else {
            self.fields[i]
        };
        let sign = if self.state[i] { -1.0 } else { 1.0 };
        self.state[i] = !self.state[i];
        self.energy += delta;
        for &(j, q) in self.cost.neighbors(i) {
            self.fields[j] += sign * q;
        }
    }

    fn reset_fields(&mut self) {
        let size = self.cost.size();
        self.fields = (0..size)
            .map(|i| self.cost.local_field(i, &self.state))
            .collect();
        self.energy = self.cost.energy(&self.state);
    }
}

impl SpinSolver for Annealer {
    fn init(&mut self, schedule: &Schedule) {
        let size = self.cost.size();

        self.state = match schedule.init_mode {
            InitMode::Random => (0..size)
                .map(|_| self.rng.random_bool(schedule.active_ratio.clamp(0.0, 1.0)))
                .collect(),
            InitMode::Inactive => vec![false; size],
        };
        self.reset_fields();
        self.best = self.state.clone();
        self.best_energy = self.energy;

        let scale = self.cost.max_flip_magnitude();
        self.temperature = if scale > 0.0 {
            schedule.initial_param * scale
        } else {
            1.0
        };
        self.cooling_factor = schedule.cooling_factor;
        self.total_steps = planned_steps(
            self.temperature,
            self.cost.min_coefficient_magnitude(),
            schedule.cooling_factor,
            &self.config,
        );
        self.step = 0;
        self.stats = AnnealStats::default();

        log::debug!(
            "anneal init: size={size} interactions={} t0={:.4e} steps={} energy={:.4e}",
            self.cost.interaction_count(),
            self.temperature,
            self.total_steps,
            self.energy
        );
    }

    fn step(&mut self) {
        let size = self.cost.size();
        let temperature = self.temperature;

        for _ in 0..size {
            let i = self.rng.random_range(0..size);
            let delta = if self.state[i] {
                -self.fields[i]
            } else {
                self.fields[i]
            };

            // Metropolis acceptance criterion
            let accept = if delta < 0.0 {
                self.stats.improving_moves += 1;
                true
            } else if temperature > 0.0 {
                let probability = (-delta / temperature).exp();
                self.rng.random_range(0.0..1.0) < probability
            } else {
                false
            };

            if accept {
                self.flip(i);
                self.stats.accepted_moves += 1;
            }
            self.stats.proposals += 1;
        }

        if self.energy < self.best_energy {
            self.best.clone_from(&self.state);
            self.best_energy = self.energy;
        }

        self.temperature *= self.cooling_factor;
        self.step += 1;
    }

    fn current_step(&self) -> usize {
        self.step
    }

    fn total_steps(&self) -> usize {
        self.total_steps
    }

    fn best_assignment(&self) -> Vec<bool> {
        self.best.clone()
    }
}

/// Number of sweeps needed to cool from `t0` down to the final temperature.
fn planned_steps(
    t0: f64,
    min_coefficient: Option<f64>,
    cooling_factor: f64,
    config: &AnnealConfig,
) -> usize {
    let Some(min_coefficient) = min_coefficient else {
        return 0;
    };
    let t_final = min_coefficient * config.final_temperature_fraction;
    if t_final >= t0 {
        return 1;
    }
    let steps = ((t_final / t0).ln() / cooling_factor.ln()).ceil();
    if steps.is_finite() && steps > 0.0 {
        (steps as usize).min(config.max_steps)
    } else {
        config.max_steps
    }
}

/// Creates one [`Annealer`] per cost function, each with its own seed drawn
/// from a master RNG.
pub struct AnnealerFactory {
    config: AnnealConfig,
    rng: StdRng,
}

impl AnnealerFactory {
    pub fn new(config: AnnealConfig) -> Self {
        Self {
            rng: rng_from(config.seed),
            config,
        }
    }
}

impl Default for AnnealerFactory {
    fn default() -> Self {
        Self::new(AnnealConfig::default())
    }
}

impl SolverFactory for AnnealerFactory {
    type Solver = Annealer;

    fn create(&mut self, cost: CostFunction) -> Annealer {
        let rng = create_rng(self.rng.random());
        Annealer::with_rng(cost, self.config, rng)
    }
}
