//! Display and output formatting utilities

use crate::render::Frame;

/// Format frames for terminal display
pub struct GridFormatter;

impl GridFormatter {
    /// One character per cell; neighbor counts replace the symbols when shown
    pub fn format_compact(frame: &Frame) -> String {
        let mut output = String::with_capacity(frame.height * (frame.width * 3 + 1));
        for row in frame.rows() {
            for cell in row {
                if frame.show_counts {
                    output.push(char::from(b'0' + cell.neighbor_count));
                } else {
                    output.push(if cell.state.is_alive() { '█' } else { '·' });
                }
            }
            output.push('\n');
        }
        output
    }

    /// Format a frame with coordinates
    pub fn format_with_coords(frame: &Frame) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for i in 0..frame.width {
            output.push_str(&format!("{:2}", i % 10));
        }
        output.push('\n');

        // Rows with row numbers
        for (j, row) in frame.rows().enumerate() {
            output.push_str(&format!("{:2} ", j));
            for cell in row {
                if frame.show_counts {
                    let cell_text = if cell.state.is_alive() { '█' } else { '·' };
                    output.push(cell_text);
                    output.push(char::from(b'0' + cell.neighbor_count));
                } else {
                    output.push_str(if cell.state.is_alive() { "██" } else { "··" });
                }
            }
            output.push('\n');
        }

        output
    }

    /// Header line shown above every frame
    pub fn format_header(frame: &Frame) -> String {
        let status = if frame.running { "running" } else { "stopped" };
        format!(
            "Generation {} (Living: {}) [{}]",
            frame.generation,
            frame.living_count(),
            status
        )
    }
}

/// Color output utilities
///
/// Colors are applied only when enabled by the caller and the terminal
/// supports them.
#[derive(Debug, Clone, Copy)]
pub struct ColorOutput {
    enabled: bool,
}

impl ColorOutput {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: enabled && Self::supports_color(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Format text with color (if enabled)
    pub fn colored(&self, text: &str, color: Color) -> String {
        if self.enabled {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() &&
        (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(&self, text: &str) -> String {
        self.colored(text, Color::Green)
    }

    /// Format warning message
    pub fn warning(&self, text: &str) -> String {
        self.colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(&self, text: &str) -> String {
        self.colored(text, Color::Blue)
    }

    /// Live cells in blue, dead cells in red
    pub fn paint_grid(&self, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let mut output = String::with_capacity(text.len() * 2);
        for ch in text.chars() {
            match ch {
                '█' => output.push_str(&self.colored("█", Color::Blue)),
                '·' => output.push_str(&self.colored("·", Color::Red)),
                other => output.push(other),
            }
        }
        output
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
