//! Game of Life core functionality

pub mod grid;
pub mod rules;

pub use grid::{CellState, CellView, Grid, StateChanged, NEIGHBOR_OFFSETS};
pub use rules::LifeRules;
