use midly::{Smf, Timing};

use super::error::DecodeError;
use super::message::{MessageKind, TimedMessage};
use super::DEFAULT_TEMPO;

/// A parsed MIDI file, flattened into one tick-ordered message list.
///
/// Messages from all tracks are merged and stably sorted by `(tick, track)`,
/// so events sharing a tick keep their per-track order.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    resolution: u16,
    track_count: usize,
    messages: Vec<TimedMessage>,
}

impl Sequence {
    pub fn parse(bytes: &[u8]) -> Result<Self, DecodeError> {
        let smf = Smf::parse(bytes).map_err(|e| DecodeError::Malformed(e.to_string()))?;

        let resolution = match smf.header.timing {
            Timing::Metrical(ticks) => ticks.as_int(),
            Timing::Timecode(fps, _) => {
                return Err(DecodeError::UnsupportedTiming { fps: fps.as_f32() });
            }
        };
        if resolution == 0 {
            return Err(DecodeError::ZeroResolution);
        }

        let mut messages = Vec::new();
        for (track, events) in smf.tracks.iter().enumerate() {
            let mut tick = 0u64;
            for event in events {
                tick += u64::from(event.delta.as_int());
                if let Some(kind) = MessageKind::from_event(&event.kind) {
                    messages.push(TimedMessage { tick, track, kind });
                }
            }
        }
        messages.sort_by_key(|m| (m.tick, m.track));

        Ok(Self {
            resolution,
            track_count: smf.tracks.len(),
            messages,
        })
    }

    /// Build a sequence directly from messages. They are re-sorted by `(tick, track)`.
    pub fn from_messages(resolution: u16, track_count: usize, mut messages: Vec<TimedMessage>) -> Self {
        messages.sort_by_key(|m| (m.tick, m.track));
        Self {
            resolution,
            track_count,
            messages,
        }
    }

    /// Ticks per quarter note.
    pub fn resolution(&self) -> u16 {
        self.resolution
    }

    pub fn track_count(&self) -> usize {
        self.track_count
    }

    pub fn messages(&self) -> &[TimedMessage] {
        &self.messages
    }

    /// Tempo of the first tempo marker, if any.
    pub fn first_tempo(&self) -> Option<u32> {
        self.messages.iter().find_map(|m| match m.kind {
            MessageKind::Tempo(t) => Some(t),
            _ => None,
        })
    }

    /// Real time of every message in microseconds, honouring each tempo change
    /// from the point it occurs. Used for playback, not for note placement.
    ///
    /// Times are measured from the last tempo change, so rounding happens once
    /// per tempo segment rather than once per message.
    pub fn realtime_micros(&self) -> Vec<u64> {
        let resolution = u64::from(self.resolution);
        let mut tempo = u64::from(DEFAULT_TEMPO);
        let mut anchor_tick = 0u64;
        let mut anchor_us = 0u64;
        let mut out = Vec::with_capacity(self.messages.len());

        for message in &self.messages {
            let us = anchor_us + (message.tick - anchor_tick) * tempo / resolution;
            out.push(us);
            if let MessageKind::Tempo(t) = message.kind {
                anchor_tick = message.tick;
                anchor_us = us;
                tempo = u64::from(t);
            }
        }
        out
    }

    /// Length of the sequence in seconds, following the full tempo map.
    pub fn duration_seconds(&self) -> f64 {
        self.realtime_micros()
            .last()
            .map_or(0.0, |&us| us as f64 / 1_000_000.0)
    }
}
