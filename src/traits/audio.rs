use anyhow::Result;

/// Abstraction over score playback.
/// Implementations: MidiOutputDevice (midir), ClockDevice (no output port), ScriptedDevice (testing).
///
/// Devices are moved onto the playback polling thread, hence `Send`.
pub trait PlaybackDevice: Send {
    /// Begin playback from the start of the score. Must not block for the
    /// length of the score.
    fn start(&mut self) -> Result<()>;

    /// Seconds of playback elapsed since `start`.
    fn position_seconds(&self) -> f64;

    fn is_playing(&self) -> bool;

    /// Stop playback and silence any sounding notes.
    fn stop(&mut self);
}
