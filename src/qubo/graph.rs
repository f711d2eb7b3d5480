//! Sparse weighted graph plus per-node bias (`J` and `h`).

/// A directed weighted graph over decision variables, with a bias per
/// variable.
///
/// Entries are directed: `add_edge(a, b, w)` records `(b, w)` under `a`
/// only. Symmetric constraints are expressed by adding both directions.
/// Each directed entry contributes `w * x_a * x_b` to the energy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintGraph {
    edges: Vec<Vec<(usize, f64)>>,
    bias: Vec<f64>,
}

impl ConstraintGraph {
    /// Creates an empty graph over `size` variables.
    pub fn new(size: usize) -> Self {
        Self {
            edges: vec![Vec::new(); size],
            bias: vec![0.0; size],
        }
    }

    pub fn size(&self) -> usize {
        self.bias.len()
    }

    pub fn add_edge(&mut self, from: usize, to: usize, weight: f64) {
        self.edges[from].push((to, weight));
    }

    pub fn add_bias(&mut self, node: usize, delta: f64) {
        self.bias[node] += delta;
    }

    /// Outgoing `(other, weight)` entries of `node`.
    pub fn edges(&self, node: usize) -> &[(usize, f64)] {
        &self.edges[node]
    }

    pub fn bias(&self) -> &[f64] {
        &self.bias
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    /// Iterates over all directed entries as `(from, to, weight)`.
    pub fn iter_edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .flat_map(|(from, out)| out.iter().map(move |&(to, w)| (from, to, w)))
    }

    /// Energy of a binary assignment under this graph alone.
    pub fn energy(&self, assignment: &[bool]) -> f64 {
        let linear: f64 = self
            .bias
            .iter()
            .zip(assignment)
            .filter(|&(_, &x)| x)
            .map(|(h, _)| h)
            .sum();
        let quadratic: f64 = self
            .iter_edges()
            .filter(|&(a, b, _)| assignment[a] && assignment[b])
            .map(|(_, _, w)| w)
            .sum();
        linear + quadratic
    }
}
