/// Number of lanes used when the configuration does not say otherwise.
pub const DEFAULT_LANE_COUNT: usize = 4;

/// A struck note extracted from a score, already placed in time and lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteEvent {
    /// MIDI key number (0-127).
    pub pitch: u8,
    /// Absolute tick in the score.
    pub tick: u64,
    /// Seconds from the start of the score.
    pub time_seconds: f64,
    pub lane: usize,
}
