//! JSON lines renderer for machine consumers

use super::{Frame, Renderer};
use anyhow::{Context, Result};
use std::io::Write;

/// Writes one JSON object per frame, one frame per line
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        serde_json::to_writer(&mut self.out, frame)
            .context("Failed to serialize frame")?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
