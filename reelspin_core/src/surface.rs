use serde::{Deserialize, Serialize};

pub const GLYPH_FONT: &str = "bold 80px Arial";
pub const GUIDE_LINE_COLOR: &str = "red";
pub const GUIDE_LINE_WIDTH: f64 = 2.0;

/// Anything the animator can paint a frame onto.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    /// `x`, `y` is the glyph centre.
    fn draw_glyph(&mut self, glyph: &str, x: f64, y: f64);
    /// Horizontal line from `x = 0` to `x = width`.
    fn draw_guide_line(&mut self, y: f64, width: f64);
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    Glyph { glyph: String, x: f64, y: f64 },
    GuideLine { y: f64, width: f64 },
}

/// Keeps the commands of the most recent frame.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn guide_lines(&self) -> Vec<f64> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::GuideLine { y, .. } => Some(*y),
                _ => None,
            })
            .collect()
    }

    pub fn glyphs(&self) -> impl Iterator<Item = (&str, f64, f64)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Glyph { glyph, x, y } => Some((glyph.as_str(), *x, *y)),
            _ => None,
        })
    }
}

impl Surface for Recorder {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn draw_glyph(&mut self, glyph: &str, x: f64, y: f64) {
        self.commands.push(DrawCommand::Glyph {
            glyph: glyph.to_string(),
            x,
            y,
        });
    }

    fn draw_guide_line(&mut self, y: f64, width: f64) {
        self.commands.push(DrawCommand::GuideLine { y, width });
    }
}
