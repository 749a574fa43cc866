//! Redraw frames and the renderers that consume them

pub mod json;
pub mod text;

pub use json::JsonRenderer;
pub use text::TextRenderer;

use crate::game_of_life::{CellView, Grid, StateChanged};
use anyhow::Result;
use serde::Serialize;

/// Full redraw data pushed to a renderer after every render-triggering event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub generation: u64,
    pub width: usize,
    pub height: usize,
    pub show_counts: bool,
    pub running: bool,
    pub cells: Vec<CellView>,
}

impl Frame {
    pub fn from_grid(grid: &Grid, show_counts: bool, running: bool) -> Self {
        Self {
            generation: grid.generation(),
            width: grid.width(),
            height: grid.height(),
            show_counts,
            running,
            cells: grid.snapshot(),
        }
    }

    /// Cells grouped by row, top to bottom
    pub fn rows(&self) -> std::slice::Chunks<'_, CellView> {
        self.cells.chunks(self.width)
    }

    pub fn cell(&self, i: usize, j: usize) -> Option<&CellView> {
        (i < self.width && j < self.height)
            .then(|| &self.cells[j * self.width + i])
    }

    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.state.is_alive()).count()
    }
}

/// Presentation side of the controller
pub trait Renderer {
    /// Redraw the whole grid
    fn render(&mut self, frame: &Frame) -> Result<()>;

    /// A single cell was toggled by the user
    fn cell_changed(&mut self, _change: &StateChanged) {}
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        (**self).render(frame)
    }

    fn cell_changed(&mut self, change: &StateChanged) {
        (**self).cell_changed(change)
    }
}
