//! Grid error type.

use thiserror::Error;

use gn_core::GridPos;

/// Errors produced by `gn-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("cell {0} is outside the grid")]
    OutOfBounds(GridPos),

    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("grid parse error: {0}")]
    Parse(String),
}

pub type GridResult<T> = Result<T, GridError>;
