//! Crate-wide error type.

use thiserror::Error as ThisError;

/// Errors raised while configuring, encoding, or decoding a tour.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Grid dimension is odd or smaller than 2.
    #[error("grid size must be even and >= 2, got {0}")]
    InvalidGridSize(usize),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Malformed point-set text.
    #[error("parse error: {0}")]
    Parse(String),

    /// A cell order that does not cover every point exactly once.
    #[error("invalid cell order: {0}")]
    CellOrder(String),

    /// The solver returned a vector that does not match the encoding.
    #[error("assignment has {actual} entries, encoding has {expected} nodes")]
    AssignmentLength { expected: usize, actual: usize },

    /// The decoded tour is not a permutation of the point set.
    #[error("infeasible tour: {0}")]
    Infeasible(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
