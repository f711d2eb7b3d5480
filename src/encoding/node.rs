//! Decision variables of a tour encoding.

use std::fmt;

/// The proposition "`point` is visited at `step`".
///
/// Named fields keep the two roles apart: `step` is a tour position in
/// `0..n`, `point` an index into the [`PointSet`](crate::problem::PointSet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodedNode {
    pub step: usize,
    pub point: usize,
}

impl EncodedNode {
    pub fn new(step: usize, point: usize) -> Self {
        Self { step, point }
    }
}

impl fmt::Display for EncodedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} -> point {}", self.step, self.point)
    }
}
