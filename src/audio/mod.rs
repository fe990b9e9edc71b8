//! Score playback.
//!
//! This module provides:
//! - [`PlaybackSynchronizer`]: lazy, once-only playback start and a polled playback clock
//! - [`MidiOutputDevice`]: plays the score through a MIDI output port with midir
//! - [`ClockDevice`]: silent fallback that only keeps time
//! - [`ScriptedDevice`]: scripted positions for tests

mod clock_device;
mod midi_output;
mod scripted_device;
mod sync;

use std::time::Duration;

use tracing::warn;

pub use clock_device::ClockDevice;
pub use midi_output::{MidiOutputDevice, find_port_name};
pub use scripted_device::{DeviceProbe, ScriptedDevice};
pub use sync::{PlaybackMessage, PlaybackSynchronizer, SyncSettings};

use crate::score::Score;
use crate::traits::audio::PlaybackDevice;

/// Pick a playback device for `score`: a MIDI output port when one matches,
/// otherwise a silent clock of the same length.
pub fn open_device(score: &Score, port_filter: Option<&str>) -> Box<dyn PlaybackDevice> {
    match find_port_name(port_filter) {
        Ok(_) => Box::new(MidiOutputDevice::new(
            score.sequence().clone(),
            port_filter.map(str::to_string),
        )),
        Err(e) => {
            warn!("MIDI output unavailable, playing silently: {:#}", e);
            Box::new(ClockDevice::new(Duration::from_secs_f64(
                score.duration_seconds(),
            )))
        }
    }
}
