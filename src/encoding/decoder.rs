//! Decoding solver assignments into tours.

use super::{EncodedNode, Encoding};
use crate::problem::Tour;
use crate::{Error, Result};

/// Maps a binary assignment back to a visiting order.
pub struct SpinDecoder;

impl SpinDecoder {
    /// Decodes an assignment produced for `encoding`.
    pub fn decode(assignment: &[bool], encoding: &Encoding) -> Result<Tour> {
        Self::decode_nodes(assignment, &encoding.nodes, encoding.steps)
    }

    /// Writes each active node's point into its step, then reads the steps
    /// in order, skipping steps no active node claimed.
    ///
    /// When several active nodes share a step the last one wins, so the
    /// result may be shorter than `steps` or contain duplicates; check it
    /// with [`Tour::verify`].
    pub fn decode_nodes(assignment: &[bool], nodes: &[EncodedNode], steps: usize) -> Result<Tour> {
        if assignment.len() != nodes.len() {
            return Err(Error::AssignmentLength {
                expected: nodes.len(),
                actual: assignment.len(),
            });
        }

        let mut slots: Vec<Option<usize>> = vec![None; steps];
        for (node, _) in nodes.iter().zip(assignment).filter(|&(_, &active)| active) {
            if let Some(slot) = slots.get_mut(node.step) {
                *slot = Some(node.point);
            }
        }

        Ok(Tour::new(slots.into_iter().flatten().collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes() -> Vec<EncodedNode> {
        let mut nodes = Vec::new();
        for step in 0..3 {
            for point in 0..3 {
                nodes.push(EncodedNode::new(step, point));
            }
        }
        nodes
    }

    fn assignment(active: &[(usize, usize)]) -> Vec<bool> {
        nodes()
            .iter()
            .map(|n| active.contains(&(n.step, n.point)))
            .collect()
    }

    #[test]
    fn test_decode_permutation() {
        let x = assignment(&[(0, 2), (1, 0), (2, 1)]);
        let tour = SpinDecoder::decode_nodes(&x, &nodes(), 3).unwrap();
        assert_eq!(tour.order(), &[2, 0, 1]);
    }

    #[test]
    fn test_decode_skips_unset_steps() {
        let x = assignment(&[(0, 2), (2, 1)]);
        let tour = SpinDecoder::decode_nodes(&x, &nodes(), 3).unwrap();
        assert_eq!(tour.order(), &[2, 1]);
    }

    #[test]
    fn test_decode_keeps_duplicates() {
        let x = assignment(&[(0, 1), (1, 1), (2, 0)]);
        let tour = SpinDecoder::decode_nodes(&x, &nodes(), 3).unwrap();
        assert_eq!(tour.order(), &[1, 1, 0]);
    }

    #[test]
    fn test_last_active_node_wins() {
        let x = assignment(&[(0, 0), (0, 2), (1, 1)]);
        let tour = SpinDecoder::decode_nodes(&x, &nodes(), 3).unwrap();
        assert_eq!(tour.order(), &[2, 1]);
    }

    #[test]
    fn test_length_mismatch() {
        let err = SpinDecoder::decode_nodes(&[true], &nodes(), 3).unwrap_err();
        assert!(matches!(
            err,
            Error::AssignmentLength {
                expected: 9,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_empty() {
        let tour = SpinDecoder::decode_nodes(&[], &[], 0).unwrap();
        assert!(tour.is_empty());
    }
}
