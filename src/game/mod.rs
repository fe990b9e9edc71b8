pub mod frame_clock;
pub mod judge;
pub mod score;
pub mod session;
pub mod track;

pub use frame_clock::{FrameClock, FrameTime};
pub use judge::{HitGrade, HitOutcome, HitPolicy, HitWindows};
pub use score::ScoreCounter;
pub use session::GameSession;
pub use track::{FallSettings, Track};
