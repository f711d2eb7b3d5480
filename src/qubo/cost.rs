//! Combined, normalized quadratic cost function over 0/1 variables.

use super::ConstraintGraph;

/// Quadratic cost function in the 0/1 decision-variable domain:
///
/// ```text
/// E(x) = Σ_i h_i x_i + Σ_{i<j} q_ij x_i x_j
/// ```
///
/// Interactions are stored symmetrically: `neighbors(i)` lists every `j`
/// with a nonzero `q_ij`, sorted by `j`, and `neighbors(j)` lists `i` with
/// the same coefficient. Self-interactions are folded into the bias.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostFunction {
    bias: Vec<f64>,
    neighbors: Vec<Vec<(usize, f64)>>,
}

impl CostFunction {
    /// Normalizes a single graph.
    pub fn from_graph(graph: &ConstraintGraph) -> Self {
        Self::combine(&[(graph, 1.0)])
    }

    /// Scales and sums several graphs over the same variables, then
    /// normalizes the result.
    ///
    /// A directed entry `a → b` with weight `w` in a graph scaled by `s`
    /// adds `s * w` to `q_ab`.
    ///
    /// # Panics
    ///
    /// Panics if the graphs disagree on size.
    pub fn combine(parts: &[(&ConstraintGraph, f64)]) -> Self {
        let size = parts.first().map_or(0, |(g, _)| g.size());
        assert!(
            parts.iter().all(|(g, _)| g.size() == size),
            "combined graphs must share the variable set"
        );

        let mut bias = vec![0.0; size];
        let mut rows: Vec<Vec<(usize, f64)>> = vec![Vec::new(); size];

        for &(graph, scale) in parts {
            for (i, h) in graph.bias().iter().enumerate() {
                bias[i] += h * scale;
            }
            for (a, b, w) in graph.iter_edges() {
                let w = w * scale;
                if a == b {
                    bias[a] += w;
                } else {
                    rows[a].push((b, w));
                    rows[b].push((a, w));
                }
            }
        }

        let neighbors = rows.into_iter().map(merge_row).collect();
        Self { bias, neighbors }
    }

    /// Number of decision variables.
    pub fn size(&self) -> usize {
        self.bias.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bias.is_empty()
    }

    pub fn bias(&self) -> &[f64] {
        &self.bias
    }

    /// Interactions of `node` as `(other, q)` pairs sorted by `other`.
    pub fn neighbors(&self, node: usize) -> &[(usize, f64)] {
        &self.neighbors[node]
    }

    /// Number of distinct unordered interactions.
    pub fn interaction_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Coefficient `q_ab`, or zero when the variables do not interact.
    pub fn interaction(&self, a: usize, b: usize) -> f64 {
        self.neighbors[a]
            .binary_search_by_key(&b, |&(j, _)| j)
            .map_or(0.0, |pos| self.neighbors[a][pos].1)
    }

    /// Energy of a full assignment.
    ///
    /// # Panics
    ///
    /// Panics if `assignment.len() != self.size()`.
    pub fn energy(&self, assignment: &[bool]) -> f64 {
        assert_eq!(assignment.len(), self.size());
        let mut energy = 0.0;
        for (i, &xi) in assignment.iter().enumerate() {
            if !xi {
                continue;
            }
            energy += self.bias[i];
            energy += self.neighbors[i]
                .iter()
                .filter(|&&(j, _)| j > i && assignment[j])
                .map(|&(_, q)| q)
                .sum::<f64>();
        }
        energy
    }

    /// Local field `h_i + Σ_j q_ij x_j`: the energy change of switching
    /// `node` on, given the rest of `assignment`.
    pub fn local_field(&self, node: usize, assignment: &[bool]) -> f64 {
        self.bias[node]
            + self.neighbors[node]
                .iter()
                .filter(|&&(j, _)| assignment[j])
                .map(|&(_, q)| q)
                .sum::<f64>()
    }

    /// Upper bound on `|ΔE|` of a single flip, over all variables.
    pub fn max_flip_magnitude(&self) -> f64 {
        (0..self.size())
            .map(|i| {
                self.bias[i].abs() + self.neighbors[i].iter().map(|&(_, q)| q.abs()).sum::<f64>()
            })
            .fold(0.0, f64::max)
    }

    /// Smallest nonzero coefficient magnitude, if any.
    pub fn min_coefficient_magnitude(&self) -> Option<f64> {
        self.bias
            .iter()
            .chain(self.neighbors.iter().flatten().map(|(_, q)| q))
            .map(|c| c.abs())
            .filter(|&c| c > 0.0)
            .reduce(f64::min)
    }
}

fn merge_row(mut row: Vec<(usize, f64)>) -> Vec<(usize, f64)> {
    row.sort_by_key(|&(j, _)| j);
    let mut merged: Vec<(usize, f64)> = Vec::with_capacity(row.len());
    for (j, w) in row {
        match merged.last_mut() {
            Some(last) if last.0 == j => last.1 += w,
            _ => merged.push((j, w)),
        }
    }
    merged.retain(|&(_, w)| w != 0.0);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_directions() {
        let mut g = ConstraintGraph::new(3);
        g.add_edge(0, 1, 2.0);
        g.add_edge(1, 0, 2.0);
        g.add_edge(2, 1, 1.5);

        let cf = CostFunction::from_graph(&g);
        assert_eq!(cf.interaction(0, 1), 4.0);
        assert_eq!(cf.interaction(1, 0), 4.0);
        assert_eq!(cf.interaction(1, 2), 1.5);
        assert_eq!(cf.interaction(0, 2), 0.0);
        assert_eq!(cf.interaction_count(), 2);
    }

    #[test]
    fn test_energy_matches_graph() {
        let mut g = ConstraintGraph::new(3);
        g.add_edge(0, 1, 2.0);
        g.add_edge(1, 0, 2.0);
        g.add_edge(1, 2, -3.0);
        g.add_bias(0, -1.0);
        g.add_bias(2, 0.5);
        let cf = CostFunction::from_graph(&g);

        for mask in 0..8u32 {
            let x: Vec<bool> = (0..3).map(|i| mask & (1 << i) != 0).collect();
            assert!((cf.energy(&x) - g.energy(&x)).abs() < 1e-12, "mask {mask}");
        }
    }

    #[test]
    fn test_combine_scales() {
        let mut objective = ConstraintGraph::new(2);
        objective.add_edge(0, 1, 1.0);
        let mut constraint = ConstraintGraph::new(2);
        constraint.add_edge(0, 1, 1.0);
        constraint.add_edge(1, 0, 1.0);
        constraint.add_bias(0, -4.0);
        constraint.add_bias(1, -4.0);

        let cf = CostFunction::combine(&[(&objective, 1.0), (&constraint, 100.0)]);
        assert_eq!(cf.interaction(0, 1), 201.0);
        assert_eq!(cf.bias(), &[-400.0, -400.0]);
    }

    #[test]
    fn test_self_edge_folds_into_bias() {
        let mut g = ConstraintGraph::new(1);
        g.add_edge(0, 0, 2.5);
        let cf = CostFunction::from_graph(&g);
        assert_eq!(cf.bias(), &[2.5]);
        assert!(cf.neighbors(0).is_empty());
        assert_eq!(cf.energy(&[true]), 2.5);
    }

    #[test]
    fn test_cancelled_interaction_dropped() {
        let mut g = ConstraintGraph::new(2);
        g.add_edge(0, 1, 1.0);
        g.add_edge(1, 0, -1.0);
        let cf = CostFunction::from_graph(&g);
        assert_eq!(cf.interaction_count(), 0);
    }

    #[test]
    fn test_local_field_is_flip_delta() {
        let mut g = ConstraintGraph::new(3);
        g.add_edge(0, 1, 2.0);
        g.add_edge(0, 2, -1.0);
        g.add_bias(0, 0.25);
        let cf = CostFunction::from_graph(&g);

        let off = [false, true, true];
        let on = [true, true, true];
        let field = cf.local_field(0, &off);
        assert!((cf.energy(&on) - cf.energy(&off) - field).abs() < 1e-12);
    }

    #[test]
    fn test_magnitudes() {
        let mut g = ConstraintGraph::new(2);
        g.add_edge(0, 1, 0.5);
        g.add_bias(1, -3.0);
        let cf = CostFunction::from_graph(&g);
        assert_eq!(cf.max_flip_magnitude(), 3.5);
        assert_eq!(cf.min_coefficient_magnitude(), Some(0.5));
        assert_eq!(CostFunction::default().min_coefficient_magnitude(), None);
    }
}
