use std::num::NonZeroUsize;

/// Partitions an observed pitch range into a fixed number of lanes.
///
/// The range `max - min` is cut into groups of `ceil(range / lanes)` pitches
/// (at least one). Pitches past the last group are clamped into the last lane.
/// A range of zero puts everything in lane 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneAssigner {
    min_pitch: u8,
    group_size: u32,
    lane_count: NonZeroUsize,
}

impl LaneAssigner {
    pub fn new(min_pitch: u8, max_pitch: u8, lane_count: NonZeroUsize) -> Self {
        debug_assert!(min_pitch <= max_pitch);
        let range = u32::from(max_pitch.saturating_sub(min_pitch));
        let lanes = u32::try_from(lane_count.get()).unwrap_or(u32::MAX);
        let group_size = range.div_ceil(lanes).max(1);
        Self {
            min_pitch,
            group_size,
            lane_count,
        }
    }

    /// Build from the pitches seen in a score. `None` when there are no pitches.
    pub fn from_pitches(pitches: &[u8], lane_count: NonZeroUsize) -> Option<Self> {
        let min = pitches.iter().copied().min()?;
        let max = pitches.iter().copied().max()?;
        Some(Self::new(min, max, lane_count))
    }

    pub fn group_size(&self) -> u32 {
        self.group_size
    }

    pub fn lane_for(&self, pitch: u8) -> usize {
        let offset = u32::from(pitch.saturating_sub(self.min_pitch));
        let group = (offset / self.group_size) as usize;
        group.min(self.lane_count.get() - 1)
    }
}
