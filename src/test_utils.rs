//! MIDI fixtures, shared by unit tests and `tests/common`.

use midly::num::{u4, u7, u15, u24, u28};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};

#[derive(Debug, Clone, Copy)]
enum Event {
    NoteOn { pitch: u8, velocity: u8 },
    NoteOff { pitch: u8 },
    Tempo(u32),
}

/// Builds a standard MIDI file from events placed at absolute ticks.
///
/// Events on one track are emitted in tick order; events sharing a tick keep
/// the order they were added in.
#[derive(Debug, Clone)]
pub struct MidiBuilder {
    resolution: u16,
    tracks: Vec<Vec<(u64, Event)>>,
}

impl MidiBuilder {
    pub fn new(resolution: u16) -> Self {
        Self {
            resolution,
            tracks: vec![Vec::new()],
        }
    }

    fn push(mut self, track: usize, tick: u64, event: Event) -> Self {
        if self.tracks.len() <= track {
            self.tracks.resize_with(track + 1, Vec::new);
        }
        self.tracks[track].push((tick, event));
        self
    }

    /// A note-on at `tick` with its note-off half a beat later.
    pub fn note(self, track: usize, tick: u64, pitch: u8) -> Self {
        let length = u64::from(self.resolution / 2).max(1);
        self.note_on(track, tick, pitch, 100)
            .push(track, tick + length, Event::NoteOff { pitch })
    }

    pub fn note_on(self, track: usize, tick: u64, pitch: u8, velocity: u8) -> Self {
        self.push(track, tick, Event::NoteOn { pitch, velocity })
    }

    /// A tempo marker on track 0.
    pub fn tempo(self, tick: u64, micros_per_quarter: u32) -> Self {
        self.push(0, tick, Event::Tempo(micros_per_quarter))
    }

    pub fn build(&self) -> Vec<u8> {
        let header = Header::new(Format::Parallel, Timing::Metrical(u15::new(self.resolution)));
        let mut smf = Smf::new(header);

        for events in &self.tracks {
            let mut events = events.clone();
            events.sort_by_key(|(tick, _)| *tick);

            let mut track = Vec::with_capacity(events.len() + 1);
            let mut last = 0u64;
            for (tick, event) in events {
                let delta = u28::new((tick - last) as u32);
                last = tick;
                track.push(TrackEvent {
                    delta,
                    kind: event_kind(event),
                });
            }
            track.push(TrackEvent {
                delta: u28::new(0),
                kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
            });
            smf.tracks.push(track);
        }

        let mut bytes = Vec::new();
        smf.write_std(&mut bytes).expect("write to Vec cannot fail");
        bytes
    }
}

fn event_kind(event: Event) -> TrackEventKind<'static> {
    match event {
        Event::NoteOn { pitch, velocity } => TrackEventKind::Midi {
            channel: u4::new(0),
            message: MidiMessage::NoteOn {
                key: u7::new(pitch),
                vel: u7::new(velocity),
            },
        },
        Event::NoteOff { pitch } => TrackEventKind::Midi {
            channel: u4::new(0),
            message: MidiMessage::NoteOff {
                key: u7::new(pitch),
                vel: u7::new(0),
            },
        },
        Event::Tempo(t) => TrackEventKind::Meta(MetaMessage::Tempo(u24::new(t))),
    }
}
