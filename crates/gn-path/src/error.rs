//! Planning error type.
//!
//! `NoRoute` is an expected outcome, not a fault: callers turn it into a
//! failed request and move on.

use thiserror::Error;

use gn_core::GridPos;

/// Errors produced by `gn-path`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: GridPos, to: GridPos },

    #[error("cell {0} is outside the grid")]
    OutOfBounds(GridPos),

    #[error("cell {0} is not walkable")]
    Unwalkable(GridPos),

    #[error("chunk size must be at least 1, got {0}")]
    InvalidChunkSize(u32),
}

pub type PathResult<T> = Result<T, PathError>;
