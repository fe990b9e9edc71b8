//! Score loading and decoding.
//!
//! A score is a standard MIDI file. [`Sequence`] holds the parsed, tick-ordered
//! messages; [`ScoreDecoder`] turns them into lane-assigned [`NoteEvent`]s.

pub mod decoder;
pub mod error;
pub mod lanes;
pub mod message;
pub mod sequence;

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

pub use decoder::{ScoreDecoder, ticks_to_seconds};
pub use error::{DecodeError, ResourceNotFoundError, ScoreLoadError};
pub use lanes::LaneAssigner;
pub use message::{MessageKind, TimedMessage};
pub use sequence::Sequence;

use crate::model::note::NoteEvent;

/// Microseconds per quarter note assumed when a score carries no tempo marker (120 BPM).
pub const DEFAULT_TEMPO: u32 = 500_000;

/// A loaded score. Cloning shares the parsed sequence.
#[derive(Debug, Clone)]
pub struct Score {
    path: Option<PathBuf>,
    sequence: Arc<Sequence>,
}

impl Score {
    /// Load a MIDI file from disk.
    pub fn load(path: &Path) -> Result<Self, ScoreLoadError> {
        if !path.is_file() {
            return Err(ResourceNotFoundError {
                path: path.to_path_buf(),
            }
            .into());
        }

        let bytes = std::fs::read(path).map_err(|source| DecodeError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let sequence = Sequence::parse(&bytes)?;

        info!(
            path = %path.display(),
            resolution = sequence.resolution(),
            tracks = sequence.track_count(),
            messages = sequence.messages().len(),
            "Loaded score"
        );

        Ok(Self {
            path: Some(path.to_path_buf()),
            sequence: Arc::new(sequence),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(Self {
            path: None,
            sequence: Arc::new(Sequence::parse(bytes)?),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn sequence(&self) -> &Arc<Sequence> {
        &self.sequence
    }

    /// Decode the score into note events for `lane_count` lanes.
    pub fn note_events(&self, lane_count: NonZeroUsize) -> Vec<NoteEvent> {
        ScoreDecoder::new(lane_count).decode(&self.sequence)
    }

    /// Beats per minute of the first tempo marker.
    pub fn initial_bpm(&self) -> Option<f64> {
        self.sequence
            .first_tempo()
            .filter(|&t| t > 0)
            .map(|t| 60_000_000.0 / f64::from(t))
    }

    pub fn resolution(&self) -> u16 {
        self.sequence.resolution()
    }

    pub fn track_count(&self) -> usize {
        self.sequence.track_count()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.sequence.duration_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MidiBuilder;

    #[test]
    fn test_initial_bpm() {
        let bytes = MidiBuilder::new(480).tempo(0, 400_000).build();
        let score = Score::from_bytes(&bytes).unwrap();
        assert_eq!(score.initial_bpm(), Some(150.0));

        let bytes = MidiBuilder::new(480).note(0, 0, 60).build();
        let score = Score::from_bytes(&bytes).unwrap();
        assert_eq!(score.initial_bpm(), None);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Score::load(&dir.path().join("nope.mid")).unwrap_err();
        assert!(matches!(err, ScoreLoadError::NotFound(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mid");
        std::fs::write(&path, MidiBuilder::new(480).note(0, 0, 60).build()).unwrap();

        let score = Score::load(&path).unwrap();
        assert_eq!(score.path(), Some(path.as_path()));
        assert_eq!(score.resolution(), 480);
        assert_eq!(score.note_events(NonZeroUsize::new(4).unwrap()).len(), 1);
    }
}
