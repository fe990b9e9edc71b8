use std::path::PathBuf;
use thiserror::Error;

/// The score could not be turned into a playable sequence.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Failed to read score file: {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed MIDI data: {0}")]
    Malformed(String),

    #[error("Unsupported SMPTE timing ({fps} fps); only ticks-per-quarter-note scores can be played")]
    UnsupportedTiming { fps: f32 },

    #[error("Score declares a resolution of 0 ticks per quarter note")]
    ZeroResolution,
}

/// The selected score file does not exist.
#[derive(Debug, Error)]
#[error("Score file not found: {}", path.display())]
pub struct ResourceNotFoundError {
    pub path: PathBuf,
}

/// Anything that can go wrong when loading a score from disk.
#[derive(Debug, Error)]
pub enum ScoreLoadError {
    #[error(transparent)]
    NotFound(#[from] ResourceNotFoundError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
