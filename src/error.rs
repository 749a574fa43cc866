//! Error types for grid operations

use thiserror::Error;

/// Errors returned by [`Grid`](crate::game_of_life::Grid) operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// Width or height was zero at construction
    #[error("invalid grid dimensions {width}x{height}: both must be positive")]
    InvalidDimension { width: usize, height: usize },

    /// Coordinates fell outside `[0, width) x [0, height)`
    #[error("coordinates ({i}, {j}) out of bounds for {width}x{height} grid")]
    OutOfBounds {
        i: usize,
        j: usize,
        width: usize,
        height: usize,
    },
}

pub type GridResult<T> = std::result::Result<T, GridError>;
