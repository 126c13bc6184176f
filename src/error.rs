//! Error type shared by grid parsing, board construction and search setup.

use std::fmt;

use thiserror::Error;

/// One of the two distinguished endpoint markers on a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sentinel {
    Start,
    Goal,
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentinel::Start => write!(f, "start"),
            Sentinel::Goal => write!(f, "goal"),
        }
    }
}

/// Errors raised before a search begins.
///
/// An unreachable goal is not an error; see [`crate::solver::SearchOutcome::NotFound`].
#[derive(Debug, Error)]
pub enum GridError {
    #[error("malformed grid: {0}")]
    MalformedGrid(String),

    #[error("invalid board dimensions {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("no cell carries the {0} marker")]
    MissingSentinel(Sentinel),

    #[error("{count} cells carry the {sentinel} marker, expected exactly one")]
    DuplicateSentinel { sentinel: Sentinel, count: usize },

    #[error("cell ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("failed to read grid input")]
    Io(#[from] std::io::Error),
}
