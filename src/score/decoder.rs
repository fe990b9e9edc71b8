use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use tracing::debug;

use super::DEFAULT_TEMPO;
use super::lanes::LaneAssigner;
use super::message::MessageKind;
use super::sequence::Sequence;
use crate::model::note::NoteEvent;

/// Convert a tick to seconds at a single fixed tempo.
pub fn ticks_to_seconds(tick: u64, tempo: u32, resolution: u16) -> f64 {
    tick as f64 * f64::from(tempo) / (f64::from(resolution) * 1_000_000.0)
}

/// Turns a [`Sequence`] into lane-assigned note events.
///
/// Timing uses one tempo for the whole score: the last tempo marker in the
/// sequence, or 120 BPM when there is none. Events come out grouped by pitch
/// (ascending), each group in tick order.
#[derive(Debug, Clone, Copy)]
pub struct ScoreDecoder {
    lane_count: NonZeroUsize,
}

impl ScoreDecoder {
    pub fn new(lane_count: NonZeroUsize) -> Self {
        Self { lane_count }
    }

    pub fn decode(&self, sequence: &Sequence) -> Vec<NoteEvent> {
        // Pass 1: final tempo and pitch range.
        let mut tempo = DEFAULT_TEMPO;
        let mut pitches = Vec::new();
        for message in sequence.messages() {
            match message.kind {
                MessageKind::Tempo(t) => tempo = t,
                kind => {
                    if let Some(pitch) = kind.struck_pitch() {
                        pitches.push(pitch);
                    }
                }
            }
        }

        let Some(lanes) = LaneAssigner::from_pitches(&pitches, self.lane_count) else {
            debug!("Score has no note-on events");
            return Vec::new();
        };
        debug!(
            tempo,
            notes = pitches.len(),
            group_size = lanes.group_size(),
            "Decoding score"
        );

        // Pass 2: place every struck note.
        let resolution = sequence.resolution();
        let mut by_pitch: BTreeMap<u8, Vec<NoteEvent>> = BTreeMap::new();
        for message in sequence.messages() {
            let Some(pitch) = message.kind.struck_pitch() else {
                continue;
            };
            by_pitch.entry(pitch).or_default().push(NoteEvent {
                pitch,
                tick: message.tick,
                time_seconds: ticks_to_seconds(message.tick, tempo, resolution),
                lane: lanes.lane_for(pitch),
            });
        }

        by_pitch.into_values().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MidiBuilder;

    fn decode(bytes: &[u8]) -> Vec<NoteEvent> {
        let seq = Sequence::parse(bytes).unwrap();
        ScoreDecoder::new(NonZeroUsize::new(4).unwrap()).decode(&seq)
    }

    #[test]
    fn test_ticks_to_seconds() {
        assert_eq!(ticks_to_seconds(0, 500_000, 480), 0.0);
        assert_eq!(ticks_to_seconds(480, 500_000, 480), 0.5);
        assert_eq!(ticks_to_seconds(960, 250_000, 480), 0.5);
    }

    #[test]
    fn test_groups_by_pitch() {
        let bytes = MidiBuilder::new(480)
            .note(0, 0, 70)
            .note(0, 480, 60)
            .note(0, 960, 70)
            .build();

        let pitches: Vec<(u8, u64)> = decode(&bytes).iter().map(|e| (e.pitch, e.tick)).collect();
        assert_eq!(pitches, vec![(60, 480), (70, 0), (70, 960)]);
    }

    #[test]
    fn test_default_tempo_without_marker() {
        let bytes = MidiBuilder::new(96).note(0, 96, 60).build();
        let events = decode(&bytes);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].time_seconds, 0.5);
    }

    #[test]
    fn test_tempo_after_notes_still_applies() {
        let bytes = MidiBuilder::new(480)
            .note(0, 480, 60)
            .tempo(960, 1_000_000)
            .build();
        let events = decode(&bytes);
        assert_eq!(events[0].time_seconds, 1.0);
    }
}
