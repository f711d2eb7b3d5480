//! Tours: decoded visiting orders, their validation and length.

use std::fmt;

use super::PointSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered sequence of point indices, closed into a cycle.
///
/// A tour coming straight out of a decoder may be incomplete or contain
/// duplicates. Call [`verify`](Tour::verify) before trusting
/// [`length`](Tour::length).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tour {
    order: Vec<usize>,
}

impl Tour {
    pub fn new(order: Vec<usize>) -> Self {
        Self { order }
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn into_order(self) -> Vec<usize> {
        self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// True iff the tour visits every point of `points` exactly once.
    pub fn verify(&self, points: &PointSet) -> bool {
        self.diagnose(points).is_none()
    }

    /// Describes why the tour is not a permutation of `points`, if it isn't.
    pub fn diagnose(&self, points: &PointSet) -> Option<TourDefect> {
        let n = points.len();
        let mut seen = vec![false; n];
        let mut duplicates = Vec::new();
        let mut out_of_range = Vec::new();

        for &index in &self.order {
            if index >= n {
                out_of_range.push(index);
            } else if seen[index] {
                duplicates.push(index);
            } else {
                seen[index] = true;
            }
        }

        if self.order.len() == n && duplicates.is_empty() && out_of_range.is_empty() {
            return None;
        }

        let missing = seen
            .iter()
            .enumerate()
            .filter(|&(_, &s)| !s)
            .map(|(i, _)| i)
            .collect();

        Some(TourDefect {
            expected_len: n,
            actual_len: self.order.len(),
            duplicates,
            missing,
            out_of_range,
        })
    }

    /// Cyclic Euclidean length, wrapping from the last point to the first.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range for `points`.
    pub fn length(&self, points: &PointSet) -> f64 {
        let n = self.order.len();
        if n < 2 {
            return 0.0;
        }
        (0..n)
            .map(|i| points.distance(self.order[i], self.order[(i + 1) % n]))
            .sum()
    }
}

impl From<Vec<usize>> for Tour {
    fn from(order: Vec<usize>) -> Self {
        Self::new(order)
    }
}

/// Why a decoded tour failed verification.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TourDefect {
    /// Number of points in the instance.
    pub expected_len: usize,
    /// Number of entries in the tour.
    pub actual_len: usize,
    /// Point indices that occur more than once (one entry per repeat).
    pub duplicates: Vec<usize>,
    /// Point indices that never occur.
    pub missing: Vec<usize>,
    /// Entries that do not name a point of the instance.
    pub out_of_range: Vec<usize>,
}

impl fmt::Display for TourDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected {} points, got {} (duplicates: {:?}, missing: {:?}",
            self.expected_len, self.actual_len, self.duplicates, self.missing
        )?;
        if !self.out_of_range.is_empty() {
            write!(f, ", out of range: {:?}", self.out_of_range)?;
        }
        write!(f, ")")
    }
}
