use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use midir::{MidiOutput, MidiOutputConnection, MidiOutputPort};
use tracing::{debug, info, warn};

use crate::score::{MessageKind, Sequence};
use crate::traits::audio::PlaybackDevice;

const CLIENT_NAME: &str = "notefall";
/// Longest the player sleeps before re-checking the stop flag.
const MAX_SLEEP: Duration = Duration::from_millis(10);
/// Controller 123: All Notes Off.
const ALL_NOTES_OFF: u8 = 123;

/// Name of the first output port whose name contains `filter`
/// (any port when `filter` is `None`).
pub fn find_port_name(filter: Option<&str>) -> Result<String> {
    let output = MidiOutput::new(CLIENT_NAME).map_err(|e| anyhow!("{e}"))?;
    let (_, name) = select_port(&output, filter)?;
    Ok(name)
}

fn select_port(output: &MidiOutput, filter: Option<&str>) -> Result<(MidiOutputPort, String)> {
    for port in output.ports() {
        let name = output
            .port_name(&port)
            .unwrap_or_else(|_| "unknown".to_string());
        if filter.is_none_or(|f| name.contains(f)) {
            return Ok((port, name));
        }
    }
    match filter {
        Some(f) => Err(anyhow!("no MIDI output port matching {f:?}")),
        None => Err(anyhow!("no MIDI output ports available")),
    }
}

struct PlayerShared {
    position_us: AtomicU64,
    playing: AtomicBool,
    stop: AtomicBool,
}

/// Streams a score's channel messages to a MIDI output port in real time.
///
/// The connection lives on its own player thread; [`start`](PlaybackDevice::start)
/// waits only until the port is open.
pub struct MidiOutputDevice {
    sequence: Arc<Sequence>,
    port_filter: Option<String>,
    shared: Arc<PlayerShared>,
    handle: Option<JoinHandle<()>>,
}

impl MidiOutputDevice {
    pub fn new(sequence: Arc<Sequence>, port_filter: Option<String>) -> Self {
        Self {
            sequence,
            port_filter,
            shared: Arc::new(PlayerShared {
                position_us: AtomicU64::new(0),
                playing: AtomicBool::new(false),
                stop: AtomicBool::new(false),
            }),
            handle: None,
        }
    }
}

impl PlaybackDevice for MidiOutputDevice {
    fn start(&mut self) -> Result<()> {
        if self.handle.is_some() {
            return Ok(());
        }

        let (ready_tx, ready_rx) = mpsc::channel::<Result<String, String>>();
        let sequence = self.sequence.clone();
        let shared = self.shared.clone();
        let filter = self.port_filter.clone();
        shared.playing.store(true, Ordering::Release);

        let handle = std::thread::spawn(move || {
            let connection = match open_connection(filter.as_deref()) {
                Ok((connection, name)) => {
                    let _ = ready_tx.send(Ok(name));
                    connection
                }
                Err(e) => {
                    shared.playing.store(false, Ordering::Release);
                    let _ = ready_tx.send(Err(format!("{e:#}")));
                    return;
                }
            };
            play(connection, &sequence, &shared);
            shared.playing.store(false, Ordering::Release);
        });
        self.handle = Some(handle);

        match ready_rx.recv() {
            Ok(Ok(name)) => {
                info!(port = %name, "MIDI playback started");
                Ok(())
            }
            Ok(Err(reason)) => Err(anyhow!(reason)).context("Failed to open MIDI output"),
            Err(_) => Err(anyhow!("MIDI player thread exited before opening a port")),
        }
    }

    fn position_seconds(&self) -> f64 {
        self.shared.position_us.load(Ordering::Acquire) as f64 / 1_000_000.0
    }

    fn is_playing(&self) -> bool {
        self.shared.playing.load(Ordering::Acquire)
    }

    fn stop(&mut self) {
        self.shared.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("MIDI player thread panicked");
            }
        }
    }
}

impl Drop for MidiOutputDevice {
    fn drop(&mut self) {
        self.stop();
    }
}

fn open_connection(filter: Option<&str>) -> Result<(MidiOutputConnection, String)> {
    let output = MidiOutput::new(CLIENT_NAME).map_err(|e| anyhow!("{e}"))?;
    let (port, name) = select_port(&output, filter)?;
    let connection = output
        .connect(&port, "notefall-playback")
        .map_err(|e| anyhow!("{e}"))?;
    Ok((connection, name))
}

fn play(mut connection: MidiOutputConnection, sequence: &Sequence, shared: &PlayerShared) {
    stream(sequence, shared, |bytes| {
        if let Err(e) = connection.send(bytes) {
            warn!("MIDI send failed: {}", e);
        }
    });
    connection.close();
    debug!("MIDI player finished");
}

/// Send every channel message to `send` at its tempo-mapped time, then
/// All Notes Off on each channel that played a note. A stop request skips
/// the rest of the score but still silences.
fn stream(sequence: &Sequence, shared: &PlayerShared, mut send: impl FnMut(&[u8])) {
    let schedule = sequence.realtime_micros();
    let origin = Instant::now();

    for (message, &due_us) in sequence.messages().iter().zip(&schedule) {
        let Some((bytes, len)) = message.kind.wire_bytes() else {
            continue;
        };
        if !wait_until(origin, due_us, shared) {
            break;
        }
        send(&bytes[..len]);
    }

    // Let the position reach the end of the score even if it ends on meta events.
    if let Some(&end_us) = schedule.last() {
        wait_until(origin, end_us, shared);
    }

    silence(sequence, &mut send);
}

/// Sleep until `due_us` after `origin`, publishing the position as it goes.
/// Returns false when stopped first.
fn wait_until(origin: Instant, due_us: u64, shared: &PlayerShared) -> bool {
    loop {
        let now_us = u64::try_from(origin.elapsed().as_micros()).unwrap_or(u64::MAX);
        shared.position_us.store(now_us, Ordering::Release);
        if shared.stop.load(Ordering::Acquire) {
            return false;
        }
        if now_us >= due_us {
            return true;
        }
        std::thread::sleep(Duration::from_micros(due_us - now_us).min(MAX_SLEEP));
    }
}

fn silence(sequence: &Sequence, send: &mut impl FnMut(&[u8])) {
    let mut channels = [false; 16];
    for message in sequence.messages() {
        if let MessageKind::NoteOn { channel, .. } = message.kind {
            channels[usize::from(channel & 0x0F)] = true;
        }
    }
    for (channel, _) in channels.iter().enumerate().filter(|(_, used)| **used) {
        send(&[0xB0 | channel as u8, ALL_NOTES_OFF, 0]);
    }
}
