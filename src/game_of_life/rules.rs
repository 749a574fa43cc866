//! Transition rule for the grid
//!
//! Live cells survive with two or three live neighbors. Dead cells are born
//! with exactly two live neighbors, not the conventional three.

use super::CellState;

/// Game of Life rules engine
pub struct LifeRules;

impl LifeRules {
    /// Live neighbor count that brings a dead cell to life
    pub const BIRTH_COUNT: u8 = 2;

    /// Fewest live neighbors a live cell needs to survive
    pub const MIN_SURVIVAL: u8 = 2;

    /// Most live neighbors a live cell can have and still survive
    pub const MAX_SURVIVAL: u8 = 3;

    /// Next state of a cell given its current state and live neighbor count
    pub fn next_state(current: CellState, neighbor_count: u8) -> CellState {
        match current {
            CellState::Alive
                if neighbor_count < Self::MIN_SURVIVAL || neighbor_count > Self::MAX_SURVIVAL =>
            {
                CellState::Dead
            }
            CellState::Dead if neighbor_count == Self::BIRTH_COUNT => CellState::Alive,
            unchanged => unchanged,
        }
    }
}
