//! Utility functions and helpers

pub mod display;

pub use display::{GridFormatter, ColorOutput};
