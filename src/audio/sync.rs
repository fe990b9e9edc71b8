use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError, TrySendError};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::traits::audio::PlaybackDevice;

/// Messages from the polling worker to the frame loop.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackMessage {
    Started,
    /// Playback position in seconds.
    Position(f64),
    Finished,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncSettings {
    pub poll_interval: Duration,
    pub channel_capacity: usize,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(10),
            channel_capacity: 64,
        }
    }
}

impl SyncSettings {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            channel_capacity: config.channel_capacity,
        }
    }
}

struct Worker {
    stop: Arc<AtomicBool>,
    rx: Receiver<PlaybackMessage>,
    handle: JoinHandle<()>,
}

enum SyncState {
    Idle(Box<dyn PlaybackDevice>),
    Running(Worker),
    Stopped,
}

/// Owns the playback device and mirrors its clock into the frame loop.
///
/// Playback is started lazily, at most once, by [`trigger`](Self::trigger).
/// A worker thread then polls the device and posts its position into a
/// bounded channel, which the frame loop empties with [`drain`](Self::drain).
/// All observable state lives on the frame loop's side.
pub struct PlaybackSynchronizer {
    state: SyncState,
    settings: SyncSettings,
    elapsed: f64,
    playing: bool,
    finished: bool,
    failure: Option<String>,
}

impl PlaybackSynchronizer {
    pub fn new(device: Box<dyn PlaybackDevice>, settings: SyncSettings) -> Self {
        assert!(settings.channel_capacity > 0, "playback channel needs capacity");
        Self {
            state: SyncState::Idle(device),
            settings,
            elapsed: 0.0,
            playing: false,
            finished: false,
            failure: None,
        }
    }

    /// Start playback the first time `should_start` is true.
    /// Returns whether this call started it.
    pub fn trigger(&mut self, should_start: bool) -> bool {
        if !should_start || !matches!(self.state, SyncState::Idle(_)) {
            return false;
        }
        let SyncState::Idle(device) = std::mem::replace(&mut self.state, SyncState::Stopped) else {
            return false;
        };

        let (tx, rx) = mpsc::sync_channel(self.settings.channel_capacity);
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();
        let interval = self.settings.poll_interval;

        let handle = std::thread::spawn(move || {
            poll_device(device, tx, stop_flag, interval);
        });

        info!("Playback triggered");
        self.state = SyncState::Running(Worker { stop, rx, handle });
        true
    }

    /// Apply every message posted since the last call. Never blocks.
    pub fn drain(&mut self) {
        let SyncState::Running(worker) = &self.state else {
            return;
        };

        loop {
            match worker.rx.try_recv() {
                Ok(PlaybackMessage::Started) => self.playing = true,
                Ok(PlaybackMessage::Position(seconds)) => {
                    self.elapsed = self.elapsed.max(seconds);
                }
                Ok(PlaybackMessage::Finished) => {
                    self.playing = false;
                    self.finished = true;
                }
                Ok(PlaybackMessage::Failed(reason)) => {
                    warn!("Playback failed: {}", reason);
                    self.playing = false;
                    self.finished = true;
                    self.failure = Some(reason);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.finished {
                        self.playing = false;
                        self.finished = true;
                    }
                    break;
                }
            }
        }
    }

    /// Last reported playback position in seconds. Never decreases.
    pub fn current_elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn has_started(&self) -> bool {
        !matches!(self.state, SyncState::Idle(_))
    }

    /// Playback ran and is over, normally or not.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Signal the worker to stop and wait for it to exit.
    pub fn stop(&mut self) {
        let state = std::mem::replace(&mut self.state, SyncState::Stopped);
        match state {
            SyncState::Running(worker) => {
                worker.stop.store(true, Ordering::Release);
                // Unblocks a worker waiting to send.
                drop(worker.rx);
                if worker.handle.join().is_err() {
                    warn!("Playback worker panicked");
                }
                self.playing = false;
                debug!("Playback worker stopped");
            }
            // Never started; give the device back so a later trigger still works.
            SyncState::Idle(device) => self.state = SyncState::Idle(device),
            SyncState::Stopped => {}
        }
    }
}

impl Drop for PlaybackSynchronizer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn poll_device(
    mut device: Box<dyn PlaybackDevice>,
    tx: SyncSender<PlaybackMessage>,
    stop: Arc<AtomicBool>,
    interval: Duration,
) {
    if let Err(e) = device.start() {
        let _ = tx.send(PlaybackMessage::Failed(format!("{e:#}")));
        return;
    }
    if tx.send(PlaybackMessage::Started).is_err() {
        device.stop();
        return;
    }

    loop {
        if stop.load(Ordering::Acquire) {
            break;
        }

        let playing = device.is_playing();
        match tx.try_send(PlaybackMessage::Position(device.position_seconds())) {
            // A full channel only loses a position that the next one supersedes.
            Ok(()) | Err(TrySendError::Full(_)) => {}
            Err(TrySendError::Disconnected(_)) => break,
        }

        if !playing {
            let _ = tx.send(PlaybackMessage::Finished);
            break;
        }
        std::thread::sleep(interval);
    }

    device.stop();
}
