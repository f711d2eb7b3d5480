//! Retry policy around the pipeline.

use crate::anneal::{AnnealerFactory, SolverFactory};
use crate::config::TspConfig;
use crate::pipeline::{Outcome, Pipeline};
use crate::problem::PointSet;
use crate::Result;

/// Runs the pipeline up to `attempts` times and keeps the shortest feasible
/// tour. If no attempt is feasible, the last infeasible outcome is
/// returned.
///
/// # Examples
///
/// ```
/// use u_gridtsp::{PointSet, TspConfig, TspSolver};
///
/// let points: PointSet = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
///     .into_iter()
///     .collect();
/// let mut solver = TspSolver::new(TspConfig::default().with_seed(1)).unwrap();
/// let outcome = solver.solve(&points).unwrap();
/// assert_eq!(outcome.tour().len(), 4);
/// ```
pub struct TspSolver<F: SolverFactory = AnnealerFactory> {
    pipeline: Pipeline,
    attempts: usize,
    factory: F,
}

impl TspSolver<AnnealerFactory> {
    /// Uses the built-in annealer.
    pub fn new(config: TspConfig) -> Result<Self> {
        let factory = AnnealerFactory::new(config.anneal);
        Self::with_factory(config, factory)
    }
}

impl<F: SolverFactory> TspSolver<F> {
    pub fn with_factory(config: TspConfig, factory: F) -> Result<Self> {
        config.validate()?;
        let pipeline = Pipeline::new(config.strategy, config.weights, config.schedule)?;
        Ok(Self {
            pipeline,
            attempts: config.attempts,
            factory,
        })
    }

    pub fn solve(&mut self, points: &PointSet) -> Result<Outcome> {
        let mut best: Option<Outcome> = None;

        for attempt in 1..=self.attempts {
            let outcome = self.pipeline.run(points, &mut self.factory)?;
            log::debug!(
                "attempt {attempt}/{}: feasible={} length={:?}",
                self.attempts,
                outcome.is_feasible(),
                outcome.length()
            );

            best = match best {
                Some(current) if !is_better(&outcome, &current) => Some(current),
                _ => Some(outcome),
            };
        }

        Ok(best.unwrap_or_else(|| Outcome::evaluate(Default::default(), points)))
    }
}

/// Feasible beats infeasible; among feasible, shorter wins; among
/// infeasible, the later one wins.
fn is_better(candidate: &Outcome, current: &Outcome) -> bool {
    match (candidate.length(), current.length()) {
        (Some(a), Some(b)) => a < b,
        (Some(_), None) => true,
        (None, Some(_)) => false,
        (None, None) => true,
    }
}
