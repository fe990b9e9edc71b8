use crate::config::GameConfig;
use crate::traits::render::Color;

/// Lane colours, cycled when there are more lanes than entries.
const LANE_PALETTE: [Color; 4] = [Color::RED, Color::GREEN, Color::YELLOW, Color::BLUE];

/// Layout properties for a single lane.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneLayout {
    pub x: f32,
    pub width: f32,
    pub color: Color,
}

impl LaneLayout {
    pub fn new(x: f32, width: f32, color: Color) -> Self {
        Self { x, width, color }
    }

    /// Horizontal centre of the lane.
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// Geometry of the whole play field.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneConfig {
    pub layouts: Vec<LaneLayout>,
    pub visible_height: f64,
    /// Y of the line objects should be struck on.
    pub target_line: f64,
    /// Y past which an object triggers playback start.
    pub preroll_line: f64,
}

impl LaneConfig {
    /// Side-by-side lanes of equal width, starting at x = 0.
    pub fn uniform(
        lane_count: usize,
        lane_width: f32,
        visible_height: f64,
        target_offset: f64,
        preroll_offset: f64,
    ) -> Self {
        let layouts = (0..lane_count)
            .map(|i| {
                LaneLayout::new(
                    i as f32 * lane_width,
                    lane_width,
                    LANE_PALETTE[i % LANE_PALETTE.len()],
                )
            })
            .collect();

        Self {
            layouts,
            visible_height,
            target_line: visible_height - target_offset,
            preroll_line: visible_height - preroll_offset,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::uniform(
            config.lane_count,
            config.lane_width,
            config.visible_height,
            config.target_offset,
            config.preroll_offset,
        )
    }
}
