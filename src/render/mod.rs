// Drawing: the macroquad surface, the recording surface for tests, and the HUD.

pub mod hud;
pub mod macroquad_surface;
pub mod recorder;

pub use hud::{HUD_HEIGHT, draw_hud};
pub use macroquad_surface::MacroquadSurface;
pub use recorder::{CommandRecorder, DrawCommand};
