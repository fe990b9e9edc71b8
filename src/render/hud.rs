use crate::game::{HitGrade, ScoreCounter};
use crate::traits::render::{Color, RenderSurface};

pub const HUD_HEIGHT: f32 = 60.0;
const FONT_SIZE: f32 = 24.0;
const SMALL_FONT_SIZE: f32 = 16.0;

/// Score line and per-grade breakdown above the lanes.
pub fn draw_hud(surface: &mut dyn RenderSurface, score: &ScoreCounter, playback_seconds: f64) {
    surface.draw_text(
        &format!("Score: {}", score.total()),
        8.0,
        24.0,
        FONT_SIZE,
        Color::WHITE,
    );

    let breakdown = format!(
        "P {}  G {}  g {}  M {}   {:.1}s",
        score.count(HitGrade::Perfect),
        score.count(HitGrade::Great),
        score.count(HitGrade::Good),
        score.count(HitGrade::Miss),
        playback_seconds,
    );
    surface.draw_text(&breakdown, 8.0, 48.0, SMALL_FONT_SIZE, Color::WHITE);
}
