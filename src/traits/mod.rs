// Seams between the simulation and the outside world.

pub mod audio;
pub mod input;
pub mod render;
pub mod time;

pub use audio::PlaybackDevice;
pub use input::{InputProvider, KeyPress};
pub use render::{Color, Rect, RenderSurface};
pub use time::{MockTimeProvider, SystemTimeProvider, TimeProvider};
