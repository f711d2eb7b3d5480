//! Encode → solve → decode.

use crate::anneal::{drive, ScheduleConfig, SolverFactory, SpinSolver};
use crate::encoding::{CostFunctionBuilder, Encoding, EncodingStrategy, EncodingWeights, SpinDecoder};
use crate::grid::{CellOrderResolver, GridPartitioner};
use crate::problem::{PointSet, Tour, TourDefect};
use crate::{Error, Result};

/// Result of one pipeline run.
///
/// An infeasible tour is a normal outcome of a stochastic solver, not an
/// error; callers decide whether to retry.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Feasible { tour: Tour, length: f64 },
    Infeasible { tour: Tour, defect: TourDefect },
}

impl Outcome {
    /// Verifies `tour` against `points`.
    pub fn evaluate(tour: Tour, points: &PointSet) -> Self {
        match tour.diagnose(points) {
            None => {
                let length = tour.length(points);
                Outcome::Feasible { tour, length }
            }
            Some(defect) => Outcome::Infeasible { tour, defect },
        }
    }

    pub fn is_feasible(&self) -> bool {
        matches!(self, Outcome::Feasible { .. })
    }

    pub fn tour(&self) -> &Tour {
        match self {
            Outcome::Feasible { tour, .. } | Outcome::Infeasible { tour, .. } => tour,
        }
    }

    /// Cyclic length, only for feasible tours.
    pub fn length(&self) -> Option<f64> {
        match self {
            Outcome::Feasible { length, .. } => Some(*length),
            Outcome::Infeasible { .. } => None,
        }
    }

    /// Converts an infeasible outcome into [`Error::Infeasible`].
    pub fn into_result(self) -> Result<(Tour, f64)> {
        match self {
            Outcome::Feasible { tour, length } => Ok((tour, length)),
            Outcome::Infeasible { defect, .. } => Err(Error::Infeasible(defect.to_string())),
        }
    }
}

/// Runs the solver loop on an encoding and decodes the best assignment.
pub fn solve_encoding<F: SolverFactory>(
    encoding: Encoding,
    factory: &mut F,
    schedule: &ScheduleConfig,
) -> Result<Tour> {
    let Encoding {
        cost, nodes, steps, ..
    } = encoding;
    let resolved = schedule.resolve(cost.size());
    let mut solver = factory.create(cost);
    let assignment = drive(&mut solver, &resolved, schedule.settle_steps);
    log::debug!(
        "solver finished: steps={} active={}",
        solver.current_step(),
        assignment.iter().filter(|&&x| x).count()
    );
    SpinDecoder::decode_nodes(&assignment, &nodes, steps)
}

/// One configured encode/solve/decode pass.
#[derive(Debug, Clone)]
pub struct Pipeline {
    strategy: EncodingStrategy,
    weights: EncodingWeights,
    schedule: ScheduleConfig,
}

impl Pipeline {
    /// Validates the settings up front; an invalid grid size fails here,
    /// before any work is done.
    pub fn new(
        strategy: EncodingStrategy,
        weights: EncodingWeights,
        schedule: ScheduleConfig,
    ) -> Result<Self> {
        strategy.validate()?;
        weights.validate()?;
        schedule.validate()?;
        Ok(Self {
            strategy,
            weights,
            schedule,
        })
    }

    pub fn strategy(&self) -> EncodingStrategy {
        self.strategy
    }

    /// Builds the encoding for `points`. In grid mode this partitions the
    /// points and solves the cell-order sub-problem with `factory`.
    pub fn encode<F: SolverFactory>(&self, points: &PointSet, factory: &mut F) -> Result<Encoding> {
        let builder = CostFunctionBuilder::new(points, self.weights);
        match self.strategy {
            EncodingStrategy::Plain => Ok(builder.plain()),
            EncodingStrategy::Grid { grid_size } => {
                let grid = GridPartitioner::new(grid_size)?.partition(points);
                let order = CellOrderResolver::new(self.weights)
                    .resolve(&grid.centroids(), factory)?;
                builder.with_cell_order(&grid, &order)
            }
        }
    }

    /// Encodes, solves, decodes, and verifies.
    pub fn run<F: SolverFactory>(&self, points: &PointSet, factory: &mut F) -> Result<Outcome> {
        let encoding = self.encode(points, factory)?;
        let tour = solve_encoding(encoding, factory, &self.schedule)?;
        let outcome = Outcome::evaluate(tour, points);
        match &outcome {
            Outcome::Feasible { length, .. } => {
                log::info!("tour: n={} length={length:.4}", points.len())
            }
            Outcome::Infeasible { defect, .. } => log::warn!("tour infeasible: {defect}"),
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anneal::{AnnealConfig, AnnealerFactory};

    fn square() -> PointSet {
        [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_invalid_grid_fails_early() {
        let result = Pipeline::new(
            EncodingStrategy::Grid { grid_size: 3 },
            EncodingWeights::default(),
            ScheduleConfig::default(),
        );
        assert!(matches!(result, Err(Error::InvalidGridSize(3))));
    }

    #[test]
    fn test_plain_square() {
        let pipeline = Pipeline::new(
            EncodingStrategy::Plain,
            EncodingWeights::default(),
            ScheduleConfig::default(),
        )
        .unwrap();
        let mut factory = AnnealerFactory::new(AnnealConfig::default().with_seed(3));
        let outcome = pipeline.run(&square(), &mut factory).unwrap();

        assert!(outcome.is_feasible(), "{outcome:?}");
        let crossing = 2.0 + 2.0 * 2f64.sqrt();
        assert!(outcome.length().unwrap() <= crossing + 1e-9);
    }

    #[test]
    fn test_outcome_evaluate() {
        let points = square();
        let ok = Outcome::evaluate(Tour::new(vec![0, 1, 2, 3]), &points);
        assert_eq!(ok.length(), Some(4.0));
        assert!(ok.clone().into_result().is_ok());

        let bad = Outcome::evaluate(Tour::new(vec![0, 1]), &points);
        assert!(!bad.is_feasible());
        assert_eq!(bad.length(), None);
        assert_eq!(bad.tour().order(), &[0, 1]);
        assert!(matches!(bad.into_result(), Err(Error::Infeasible(_))));
    }
}
