use macroquad::prelude as mq;

use crate::traits::render::{Color, Rect, RenderSurface};

fn to_mq(color: Color) -> mq::Color {
    mq::Color::new(color.r, color.g, color.b, color.a)
}

/// Draws straight to the macroquad window, shifted by a fixed offset so the
/// play field can sit below the HUD.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacroquadSurface {
    pub offset_x: f32,
    pub offset_y: f32,
}

impl MacroquadSurface {
    pub fn new(offset_x: f32, offset_y: f32) -> Self {
        Self { offset_x, offset_y }
    }
}

impl RenderSurface for MacroquadSurface {
    fn clear(&mut self, area: Rect, color: Color) {
        self.fill_rect(area, color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        mq::draw_rectangle(
            self.offset_x + rect.x,
            self.offset_y + rect.y,
            rect.w,
            rect.h,
            to_mq(color),
        );
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        mq::draw_text(text, self.offset_x + x, self.offset_y + y, size, to_mq(color));
    }
}
