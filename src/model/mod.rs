// Data models for note events, falling objects and lane geometry.

pub mod falling;
pub mod lane;
pub mod note;

pub use falling::{FallingObject, ObjectState};
pub use lane::{LaneConfig, LaneLayout};
pub use note::{DEFAULT_LANE_COUNT, NoteEvent};
