//! Visiting order over grid cells.

use super::{CellCoord, CentroidSet};
use crate::anneal::{ActiveRatio, InitMode, ScheduleConfig, SolverFactory};
use crate::encoding::{CostFunctionBuilder, EncodingWeights};
use crate::pipeline::solve_encoding;
use crate::Result;

/// Orders grid cells by solving the plain tour problem on their centroids.
///
/// The plain encoding is always used here, so cell ordering never recurses
/// into another partition.
#[derive(Debug, Clone)]
pub struct CellOrderResolver {
    weights: EncodingWeights,
    schedule: ScheduleConfig,
}

impl Default for CellOrderResolver {
    fn default() -> Self {
        Self::new(EncodingWeights::default())
    }
}

impl CellOrderResolver {
    pub fn new(weights: EncodingWeights) -> Self {
        Self {
            weights,
            schedule: Self::schedule(),
        }
    }

    /// Fixed schedule for the centroid sub-problem.
    pub fn schedule() -> ScheduleConfig {
        ScheduleConfig::default()
            .with_init_mode(InitMode::Random)
            .with_cooling_factor(0.999)
            .with_initial_param(0.3)
            .with_active_ratio(ActiveRatio::Auto)
            .with_settle_steps(10)
    }

    /// Returns every cell of `centroids` exactly once, in visiting order.
    ///
    /// If the solver's answer is not a permutation, the first occurrence of
    /// each cell is kept and missing cells are appended in linear order.
    pub fn resolve<F: SolverFactory>(
        &self,
        centroids: &CentroidSet,
        factory: &mut F,
    ) -> Result<Vec<CellCoord>> {
        let count = centroids.cells.len();
        if count <= 1 {
            return Ok(centroids.cells.clone());
        }

        let encoding = CostFunctionBuilder::new(&centroids.points, self.weights).plain();
        let tour = solve_encoding(encoding, factory, &self.schedule)?;

        let order = if tour.verify(&centroids.points) {
            tour.into_order()
        } else {
            if let Some(defect) = tour.diagnose(&centroids.points) {
                log::warn!("cell order infeasible, repairing: {defect}");
            }
            repair_order(tour.order(), count)
        };

        let cells: Vec<CellCoord> = order.into_iter().map(|i| centroids.cells[i]).collect();
        log::debug!("cell order: {cells:?}");
        Ok(cells)
    }
}

/// Keeps the first occurrence of each index below `count` and appends the
/// missing ones in ascending order.
pub fn repair_order(order: &[usize], count: usize) -> Vec<usize> {
    let mut seen = vec![false; count];
    let mut repaired = Vec::with_capacity(count);
    for &i in order {
        if i < count && !seen[i] {
            seen[i] = true;
            repaired.push(i);
        }
    }
    repaired.extend((0..count).filter(|&i| !seen[i]));
    repaired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anneal::{AnnealConfig, AnnealerFactory};
    use crate::grid::GridPartitioner;
    use crate::problem::PointSet;

    #[test]
    fn test_repair_order() {
        assert_eq!(repair_order(&[2, 0, 2, 1], 4), vec![2, 0, 1, 3]);
        assert_eq!(repair_order(&[], 3), vec![0, 1, 2]);
        assert_eq!(repair_order(&[5, 1], 2), vec![1, 0]);
    }

    #[test]
    fn test_fixed_schedule() {
        let schedule = CellOrderResolver::schedule().resolve(16);
        assert_eq!(schedule.init_mode, InitMode::Random);
        assert_eq!(schedule.cooling_factor, 0.999);
        assert_eq!(schedule.initial_param, 0.3);
        assert_eq!(schedule.active_ratio, 0.25);
        assert_eq!(CellOrderResolver::schedule().settle_steps, 10);
    }

    #[test]
    fn test_resolves_every_cell_once() {
        let points: PointSet = (0..16)
            .map(|i| ((i % 4) as f64, (i / 4) as f64))
            .collect();
        let grid = GridPartitioner::new(2).unwrap().partition(&points);
        let centroids = grid.centroids();
        let mut factory = AnnealerFactory::new(AnnealConfig::default().with_seed(11));

        let order = CellOrderResolver::default()
            .resolve(&centroids, &mut factory)
            .unwrap();

        assert_eq!(order.len(), 4);
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(sorted, centroids.cells);
    }

    #[test]
    fn test_trivial_sets_skip_solver() {
        let points: PointSet = [(1.0, 1.0), (1.0, 1.0)].into_iter().collect();
        let grid = GridPartitioner::new(2).unwrap().partition(&points);
        let centroids = grid.centroids();
        assert_eq!(centroids.cells, vec![CellCoord::new(0, 0)]);
        let order = CellOrderResolver::default()
            .resolve(&centroids, &mut AnnealerFactory::default())
            .unwrap();
        assert_eq!(order, centroids.cells);
    }
}
