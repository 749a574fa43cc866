//! Terminal renderer

use super::{Frame, Renderer};
use crate::game_of_life::StateChanged;
use crate::utils::{ColorOutput, GridFormatter};
use anyhow::{Context, Result};
use std::io::Write;

/// Draws each frame as a header line followed by the grid
pub struct TextRenderer<W: Write> {
    out: W,
    color: ColorOutput,
    with_coords: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color: ColorOutput::new(color),
            with_coords: false,
        }
    }

    /// Label rows and columns with their coordinates
    pub fn with_coords(mut self, with_coords: bool) -> Self {
        self.with_coords = with_coords;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        let body = if self.with_coords {
            GridFormatter::format_with_coords(frame)
        } else {
            GridFormatter::format_compact(frame)
        };
        let body = self.color.paint_grid(&body);

        writeln!(self.out, "{}", GridFormatter::format_header(frame))
            .and_then(|_| writeln!(self.out, "{}", body))
            .and_then(|_| self.out.flush())
            .context("Failed to write frame")
    }

    fn cell_changed(&mut self, change: &StateChanged) {
        log::debug!("Cell ({}, {}) is now {}", change.i, change.j, change.state);
    }
}
