//! Fixed-size Game of Life simulator
//!
//! The engine lives in [`game_of_life`]; [`controller`] turns UI events into
//! grid operations and pushes a [`render::Frame`] to a renderer after each one.

pub mod config;
pub mod controller;
pub mod error;
pub mod game_of_life;
pub mod render;
pub mod utils;

pub use config::Settings;
pub use controller::{Controller, Scheduler, TickOutcome, UiEvent};
pub use error::GridError;
pub use game_of_life::{CellState, Grid};
