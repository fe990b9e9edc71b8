use std::cell::Cell;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use anyhow::{Result, anyhow};

use crate::traits::audio::PlaybackDevice;

#[derive(Debug, Default)]
struct ProbeState {
    start_calls: AtomicUsize,
    stopped: AtomicBool,
}

/// Observes a [`ScriptedDevice`] after it has been moved to another thread.
#[derive(Debug, Clone)]
pub struct DeviceProbe(Arc<ProbeState>);

impl DeviceProbe {
    pub fn start_calls(&self) -> usize {
        self.0.start_calls.load(Ordering::Acquire)
    }

    pub fn stopped(&self) -> bool {
        self.0.stopped.load(Ordering::Acquire)
    }
}

enum Script {
    /// Each position query returns the next value; playback ends after the last.
    Positions(Vec<f64>),
    /// Plays until stopped, always at the same position.
    Endless(f64),
    FailOnStart(String),
}

/// A playback device that follows a fixed script, for tests.
pub struct ScriptedDevice {
    script: Script,
    cursor: Cell<usize>,
    started: bool,
    stopped: bool,
    probe: DeviceProbe,
}

impl ScriptedDevice {
    fn with_script(script: Script) -> (Self, DeviceProbe) {
        let probe = DeviceProbe(Arc::new(ProbeState::default()));
        let device = Self {
            script,
            cursor: Cell::new(0),
            started: false,
            stopped: false,
            probe: probe.clone(),
        };
        (device, probe)
    }

    pub fn new(positions: Vec<f64>) -> (Self, DeviceProbe) {
        Self::with_script(Script::Positions(positions))
    }

    pub fn endless(position: f64) -> (Self, DeviceProbe) {
        Self::with_script(Script::Endless(position))
    }

    pub fn failing(reason: &str) -> (Self, DeviceProbe) {
        Self::with_script(Script::FailOnStart(reason.to_string()))
    }
}

impl PlaybackDevice for ScriptedDevice {
    fn start(&mut self) -> Result<()> {
        self.probe.0.start_calls.fetch_add(1, Ordering::AcqRel);
        if let Script::FailOnStart(reason) = &self.script {
            return Err(anyhow!("{reason}"));
        }
        self.started = true;
        Ok(())
    }

    fn position_seconds(&self) -> f64 {
        match &self.script {
            Script::Positions(positions) => {
                let i = self.cursor.get();
                self.cursor.set(i + 1);
                positions
                    .get(i.min(positions.len().saturating_sub(1)))
                    .copied()
                    .unwrap_or(0.0)
            }
            Script::Endless(position) => *position,
            Script::FailOnStart(_) => 0.0,
        }
    }

    fn is_playing(&self) -> bool {
        if !self.started || self.stopped {
            return false;
        }
        match &self.script {
            Script::Positions(positions) => self.cursor.get() < positions.len(),
            Script::Endless(_) => true,
            Script::FailOnStart(_) => false,
        }
    }

    fn stop(&mut self) {
        self.stopped = true;
        self.probe.0.stopped.store(true, Ordering::Release);
    }
}
