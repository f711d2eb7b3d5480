//! Cost function construction for tour encodings.

use super::{EncodedNode, EncodingWeights};
use crate::grid::{CellCoord, Grid};
use crate::problem::PointSet;
use crate::qubo::{ConstraintGraph, CostFunction};
use crate::{Error, Result};

/// A built encoding: the cost function handed to the solver and the
/// variable layout needed to decode its answer.
#[derive(Debug, Clone)]
pub struct Encoding {
    /// Combined, normalized cost function. Variable `i` is `nodes[i]`.
    pub cost: CostFunction,
    pub nodes: Vec<EncodedNode>,
    /// Number of tour steps (the point count).
    pub steps: usize,
    /// Variable ids per step.
    pub step_nodes: Vec<Vec<usize>>,
    /// Variable ids per point.
    pub point_nodes: Vec<Vec<usize>>,
}

impl Encoding {
    pub fn size(&self) -> usize {
        self.nodes.len()
    }
}

/// Builds the adjacency objective and exclusivity constraints for a point
/// set laid out in blocks of consecutive steps.
///
/// A block of `k` points occupies `k` consecutive steps and every point of
/// the block may take any of them. The plain layout is a single block of
/// all points.
pub struct CostFunctionBuilder<'a> {
    points: &'a PointSet,
    weights: EncodingWeights,
}

impl<'a> CostFunctionBuilder<'a> {
    pub fn new(points: &'a PointSet, weights: EncodingWeights) -> Self {
        Self { points, weights }
    }

    /// Unpartitioned encoding: `n` steps × `n` points.
    pub fn plain(&self) -> Encoding {
        let all: Vec<usize> = (0..self.points.len()).collect();
        self.build(&[all.as_slice()])
    }

    /// Grid encoding: cells are visited in `order`, each cell's members
    /// competing for the cell's block of steps.
    ///
    /// Fails with [`Error::CellOrder`] if `order` repeats a cell, names a
    /// cell outside the grid, or leaves a non-empty cell out.
    pub fn with_cell_order(&self, grid: &Grid, order: &[CellCoord]) -> Result<Encoding> {
        let n = self.points.len();
        let mut visited = vec![false; grid.cells().len()];
        let mut blocks = Vec::with_capacity(order.len());
        let mut covered = 0;

        for &coord in order {
            let cell = grid.cell(coord).ok_or_else(|| {
                Error::CellOrder(format!("{coord} is outside a {0}x{0} grid", grid.grid_size()))
            })?;
            let linear = coord.linear(grid.grid_size());
            if visited[linear] {
                return Err(Error::CellOrder(format!("{coord} is visited twice")));
            }
            visited[linear] = true;
            covered += cell.members().len();
            blocks.push(cell.members());
        }

        if covered != n {
            return Err(Error::CellOrder(format!(
                "order covers {covered} of {n} points"
            )));
        }

        Ok(self.build(&blocks))
    }

    fn build(&self, blocks: &[&[usize]]) -> Encoding {
        let n = self.points.len();
        let mut nodes = Vec::new();
        let mut step_nodes: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut point_nodes: Vec<Vec<usize>> = vec![Vec::new(); n];

        let mut base = 0;
        for members in blocks {
            for offset in 0..members.len() {
                for &point in members.iter() {
                    let id = nodes.len();
                    nodes.push(EncodedNode::new(base + offset, point));
                    step_nodes[base + offset].push(id);
                    point_nodes[point].push(id);
                }
            }
            base += members.len();
        }
        debug_assert_eq!(base, n);

        let size = nodes.len();
        let objective = self.adjacency_objective(&nodes, &step_nodes);
        let constraints = self.exclusivity_constraints(size, &step_nodes, &point_nodes);
        let cost = CostFunction::combine(&[
            (&objective, self.weights.objective_scale),
            (&constraints, self.weights.constraint_scale),
        ]);

        log::debug!(
            "encoding: points={n} blocks={} variables={size} interactions={}",
            blocks.len(),
            cost.interaction_count()
        );

        Encoding {
            cost,
            nodes,
            steps: n,
            step_nodes,
            point_nodes,
        }
    }

    /// Links every variable at step `s` to every variable at `(s + 1) mod n`
    /// with the scaled distance between their points.
    fn adjacency_objective(
        &self,
        nodes: &[EncodedNode],
        step_nodes: &[Vec<usize>],
    ) -> ConstraintGraph {
        let n = step_nodes.len();
        let scale = self.distance_scale();
        let mut graph = ConstraintGraph::new(nodes.len());

        for step in 0..n {
            let next = (step + 1) % n;
            for &a in &step_nodes[step] {
                for &b in &step_nodes[next] {
                    if a == b {
                        continue;
                    }
                    let distance = self.points.distance(nodes[a].point, nodes[b].point);
                    graph.add_edge(a, b, distance * scale);
                }
            }
        }
        graph
    }

    /// At most one variable per step, at most one per point, and a bias
    /// pulling every variable on.
    fn exclusivity_constraints(
        &self,
        size: usize,
        step_nodes: &[Vec<usize>],
        point_nodes: &[Vec<usize>],
    ) -> ConstraintGraph {
        let penalty = self.weights.penalty_weight;
        let mut graph = ConstraintGraph::new(size);

        for group in step_nodes.iter().chain(point_nodes) {
            for &a in group {
                for &b in group {
                    if a != b {
                        graph.add_edge(a, b, penalty);
                    }
                }
            }
        }
        for node in 0..size {
            graph.add_bias(node, -self.weights.bias_factor * penalty);
        }
        graph
    }

    fn distance_scale(&self) -> f64 {
        if !self.weights.normalize_distances {
            return self.weights.distance_scale;
        }
        match bounding_diagonal(self.points) {
            Some(diagonal) if diagonal > 0.0 => self.weights.distance_scale / diagonal,
            _ => self.weights.distance_scale,
        }
    }
}

fn bounding_diagonal(points: &PointSet) -> Option<f64> {
    let first = points.get(0)?;
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
    for p in points.iter() {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    Some((max_x - min_x).hypot(max_y - min_y))
}
