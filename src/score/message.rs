use midly::{MetaMessage, MidiMessage, TrackEventKind};

/// Message kinds the game cares about, decoded once from the raw track events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    NoteOn { channel: u8, pitch: u8, velocity: u8 },
    NoteOff { channel: u8, pitch: u8, velocity: u8 },
    /// Microseconds per quarter note.
    Tempo(u32),
    Controller { channel: u8, controller: u8, value: u8 },
    ProgramChange { channel: u8, program: u8 },
    PitchBend { channel: u8, value: u16 },
}

impl MessageKind {
    /// Convert a raw track event. Returns `None` for events that neither the
    /// decoder nor playback use (sysex, text meta events, aftertouch, ...).
    pub fn from_event(kind: &TrackEventKind<'_>) -> Option<Self> {
        match kind {
            TrackEventKind::Meta(MetaMessage::Tempo(tempo)) => Some(Self::Tempo(tempo.as_int())),
            TrackEventKind::Midi { channel, message } => {
                let channel = channel.as_int();
                match *message {
                    MidiMessage::NoteOn { key, vel } => Some(Self::NoteOn {
                        channel,
                        pitch: key.as_int(),
                        velocity: vel.as_int(),
                    }),
                    MidiMessage::NoteOff { key, vel } => Some(Self::NoteOff {
                        channel,
                        pitch: key.as_int(),
                        velocity: vel.as_int(),
                    }),
                    MidiMessage::Controller { controller, value } => Some(Self::Controller {
                        channel,
                        controller: controller.as_int(),
                        value: value.as_int(),
                    }),
                    MidiMessage::ProgramChange { program } => Some(Self::ProgramChange {
                        channel,
                        program: program.as_int(),
                    }),
                    MidiMessage::PitchBend { bend } => Some(Self::PitchBend {
                        channel,
                        value: bend.0.as_int(),
                    }),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// A note-on that actually starts a note (velocity 0 is a note-off).
    pub fn struck_pitch(&self) -> Option<u8> {
        match *self {
            Self::NoteOn {
                pitch, velocity, ..
            } if velocity > 0 => Some(pitch),
            _ => None,
        }
    }

    /// Raw channel-voice bytes for sending to a MIDI output port.
    /// Returns the buffer and the number of valid bytes; meta messages yield `None`.
    pub fn wire_bytes(&self) -> Option<([u8; 3], usize)> {
        match *self {
            Self::NoteOn {
                channel,
                pitch,
                velocity,
            } => Some(([0x90 | channel, pitch, velocity], 3)),
            Self::NoteOff {
                channel,
                pitch,
                velocity,
            } => Some(([0x80 | channel, pitch, velocity], 3)),
            Self::Controller {
                channel,
                controller,
                value,
            } => Some(([0xB0 | channel, controller, value], 3)),
            Self::ProgramChange { channel, program } => Some(([0xC0 | channel, program, 0], 2)),
            Self::PitchBend { channel, value } => Some((
                [0xE0 | channel, (value & 0x7F) as u8, ((value >> 7) & 0x7F) as u8],
                3,
            )),
            Self::Tempo(_) => None,
        }
    }
}

/// A message positioned on the score's tick grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedMessage {
    /// Absolute tick from the start of the track.
    pub tick: u64,
    /// Index of the track the message came from.
    pub track: usize,
    pub kind: MessageKind,
}
