//! Ground-state checks with an exhaustive solver.
//!
//! With exclusivity constraints weighted above the objective, the minimum
//! of the encoded cost function must decode to a valid tour, and among
//! valid tours to the shortest one.

use u_gridtsp::anneal::{Schedule, SolverFactory, SpinSolver};
use u_gridtsp::encoding::CostFunctionBuilder;
use u_gridtsp::qubo::CostFunction;
use u_gridtsp::{EncodingStrategy, EncodingWeights, Pipeline, PointSet};

/// Enumerates every assignment; only usable for tiny encodings.
struct Exhaustive {
    cost: CostFunction,
    step: usize,
}

impl SpinSolver for Exhaustive {
    fn init(&mut self, _: &Schedule) {
        self.step = 0;
    }

    fn step(&mut self) {
        self.step += 1;
    }

    fn current_step(&self) -> usize {
        self.step
    }

    fn total_steps(&self) -> usize {
        0
    }

    fn best_assignment(&self) -> Vec<bool> {
        let n = self.cost.size();
        assert!(n <= 20, "exhaustive search over {n} variables");

        let decode = |mask: u32| -> Vec<bool> { (0..n).map(|i| (mask >> i) & 1 == 1).collect() };
        let mut best_mask = 0;
        let mut best_energy = f64::INFINITY;
        for mask in 0..1u32 << n {
            let energy = self.cost.energy(&decode(mask));
            if energy < best_energy {
                best_energy = energy;
                best_mask = mask;
            }
        }
        decode(best_mask)
    }
}

struct ExhaustiveFactory;

impl SolverFactory for ExhaustiveFactory {
    type Solver = Exhaustive;

    fn create(&mut self, cost: CostFunction) -> Exhaustive {
        Exhaustive { cost, step: 0 }
    }
}

fn square() -> PointSet {
    [(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]
        .into_iter()
        .collect()
}

fn plain_pipeline(weights: EncodingWeights) -> Pipeline {
    Pipeline::new(EncodingStrategy::Plain, weights, Default::default()).unwrap()
}

#[test]
fn ground_state_stays_feasible_as_constraints_grow() {
    let points = square();
    for scale in [2.0, 10.0, 100.0, 1e3, 1e5] {
        let weights = EncodingWeights::default().with_constraint_scale(scale);
        let outcome = plain_pipeline(weights)
            .run(&points, &mut ExhaustiveFactory)
            .unwrap();

        assert!(outcome.is_feasible(), "scale {scale}: {outcome:?}");
        let length = outcome.length().unwrap();
        assert!((length - 8.0).abs() < 1e-9, "scale {scale}: length {length}");
    }
}

#[test]
fn ground_state_matches_between_raw_and_normalized_distances() {
    let points: PointSet = [(0.0, 0.0), (3.0, 0.0), (3.0, 1.0), (0.0, 1.0)]
        .into_iter()
        .collect();
    // Raw distances reach 3 per edge, so constraints need a larger scale.
    let raw = EncodingWeights::default()
        .with_normalize_distances(false)
        .with_constraint_scale(10.0);
    let normalized = EncodingWeights::default();

    let a = plain_pipeline(raw).run(&points, &mut ExhaustiveFactory).unwrap();
    let b = plain_pipeline(normalized)
        .run(&points, &mut ExhaustiveFactory)
        .unwrap();

    assert_eq!(a.length(), b.length());
    assert!((a.length().unwrap() - 8.0).abs() < 1e-9);
}

#[test]
fn unconstrained_ground_state_is_not_a_tour() {
    // Without enough penalty the minimum drops variables to save distance.
    let points = square();
    let weights = EncodingWeights::default()
        .with_normalize_distances(false)
        .with_constraint_scale(0.1);
    let outcome = plain_pipeline(weights)
        .run(&points, &mut ExhaustiveFactory)
        .unwrap();
    assert!(!outcome.is_feasible());
}

#[test]
fn exhaustive_energy_agrees_with_builder_layout() {
    let points = square();
    let encoding = CostFunctionBuilder::new(&points, EncodingWeights::default()).plain();
    assert_eq!(encoding.size(), 16);
    assert_eq!(encoding.steps, 4);
    assert!(encoding.step_nodes.iter().all(|s| s.len() == 4));
    assert!(encoding.point_nodes.iter().all(|p| p.len() == 4));
}
