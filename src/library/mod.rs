//! Discovery of playable scores on disk.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

const SCORE_EXTENSIONS: [&str; 2] = ["mid", "midi"];

pub fn is_score_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SCORE_EXTENSIONS.contains(&ext.as_str()))
}

/// All MIDI files under `dir`, recursively, sorted by path.
/// A missing or unreadable directory yields an empty list.
pub fn find_scores(dir: &Path) -> Vec<PathBuf> {
    let mut scores: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(8)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_score_file(e.path()))
        .map(|e| e.into_path())
        .collect();

    scores.sort();
    debug!(dir = %dir.display(), count = scores.len(), "Scanned for scores");
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_finds_scores_recursively() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("b.mid"), b"").unwrap();
        std::fs::write(dir.path().join("nested/a.MIDI"), b"").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"").unwrap();

        let scores = find_scores(dir.path());
        assert_eq!(
            scores,
            vec![dir.path().join("b.mid"), dir.path().join("nested/a.MIDI")]
        );
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        assert!(find_scores(&dir.path().join("nope")).is_empty());
    }

    #[test]
    fn test_is_score_file() {
        assert!(is_score_file(Path::new("song.mid")));
        assert!(is_score_file(Path::new("song.Midi")));
        assert!(!is_score_file(Path::new("song.bms")));
        assert!(!is_score_file(Path::new("mid")));
    }
}
