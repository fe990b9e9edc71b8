use crate::traits::render::{Color, Rect, RenderSurface};

/// Recorded draw command for testing.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        area: Rect,
        color: Color,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
    },
}

/// A RenderSurface that records draw commands instead of drawing.
/// Does not require a window.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded commands.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Clear recorded commands.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Filled rectangles whose left edge lies in `x_min..x_max`.
    pub fn fills_in_column(&self, x_min: f32, x_max: f32) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { rect, .. } if rect.x >= x_min && rect.x < x_max => {
                    Some(*rect)
                }
                _ => None,
            })
            .collect()
    }
}

impl RenderSurface for CommandRecorder {
    fn clear(&mut self, area: Rect, color: Color) {
        self.commands.push(DrawCommand::Clear { area, color });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            size,
            color,
        });
    }
}
