//! Solver contract.

use super::Schedule;
use crate::qubo::CostFunction;

/// A step-driven solver over a binary cost function.
///
/// The pipeline calls [`init`](SpinSolver::init) once, then
/// [`step`](SpinSolver::step) until
/// `current_step() >= total_steps() + settle_steps`, and finally reads
/// [`best_assignment`](SpinSolver::best_assignment).
pub trait SpinSolver {
    /// Prepares the starting assignment and the step plan.
    fn init(&mut self, schedule: &Schedule);

    /// Advances the search by one step.
    fn step(&mut self);

    /// Steps taken since `init`.
    fn current_step(&self) -> usize;

    /// Steps the solver planned for its schedule.
    fn total_steps(&self) -> usize;

    /// Best assignment seen so far, one entry per variable.
    fn best_assignment(&self) -> Vec<bool>;
}

/// Creates a solver for each cost function the pipeline produces.
///
/// One pipeline run may create several solvers (the cell-order
/// sub-problem first, then the full encoding).
pub trait SolverFactory {
    type Solver: SpinSolver;

    fn create(&mut self, cost: CostFunction) -> Self::Solver;
}

/// Runs the fixed solver loop and returns the best assignment.
pub fn drive<S: SpinSolver>(solver: &mut S, schedule: &Schedule, settle_steps: usize) -> Vec<bool> {
    solver.init(schedule);
    while solver.current_step() < solver.total_steps() + settle_steps {
        solver.step();
    }
    solver.best_assignment()
}
