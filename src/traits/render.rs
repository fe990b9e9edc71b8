/// Color with RGBA components (0.0..=1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const RED: Self = Self::new(0.85, 0.15, 0.15, 1.0);
    pub const GREEN: Self = Self::new(0.15, 0.75, 0.2, 1.0);
    pub const YELLOW: Self = Self::new(0.9, 0.85, 0.1, 1.0);
    pub const BLUE: Self = Self::new(0.15, 0.35, 0.9, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Blend halfway towards white, keeping alpha.
    pub fn brighter(self) -> Self {
        Self {
            r: (self.r + 1.0) / 2.0,
            g: (self.g + 1.0) / 2.0,
            b: (self.b + 1.0) / 2.0,
            a: self.a,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Axis-aligned rectangle on screen (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// The narrow drawing surface the game needs.
/// Implementations: MacroquadSurface (production), CommandRecorder (testing).
pub trait RenderSurface {
    /// Fill `area` with the background colour, erasing what was there.
    fn clear(&mut self, area: Rect, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color);
}
