use std::time::{Duration, Instant};

use anyhow::Result;

use crate::traits::audio::PlaybackDevice;

/// Silent playback: a wall clock that runs for the length of the score.
/// Used when no MIDI output port is available.
pub struct ClockDevice {
    duration: Duration,
    started_at: Option<Instant>,
    stopped_at: Option<Duration>,
}

impl ClockDevice {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            started_at: None,
            stopped_at: None,
        }
    }

    fn elapsed(&self) -> Duration {
        match (self.started_at, self.stopped_at) {
            (_, Some(at)) => at,
            (Some(start), None) => start.elapsed().min(self.duration),
            (None, None) => Duration::ZERO,
        }
    }
}

impl PlaybackDevice for ClockDevice {
    fn start(&mut self) -> Result<()> {
        self.started_at = Some(Instant::now());
        self.stopped_at = None;
        Ok(())
    }

    fn position_seconds(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    fn is_playing(&self) -> bool {
        self.started_at.is_some() && self.stopped_at.is_none() && self.elapsed() < self.duration
    }

    fn stop(&mut self) {
        if self.started_at.is_some() && self.stopped_at.is_none() {
            self.stopped_at = Some(self.elapsed());
        }
    }
}
