use std::path::{Path, PathBuf};

/// User-friendly error messages for common error scenarios.
pub struct UserError;

impl UserError {
    /// Score path missing, with the scores that could be played instead.
    pub fn score_not_found(path: &Path, available: &[PathBuf]) -> String {
        let mut msg = format!("Score file not found: {}", path.display());
        if available.is_empty() {
            msg.push_str("\nNo scores found in the songs directory.");
        } else {
            msg.push_str("\nAvailable scores:");
            for score in available {
                msg.push_str(&format!("\n  {}", score.display()));
            }
        }
        msg
    }

    pub fn score_decode_error(path: &Path, reason: &str) -> String {
        format!(
            "Failed to read score {}: {}\nThe file is not a playable MIDI file.",
            path.display(),
            reason
        )
    }

    pub fn config_error(path: &Path, reason: &str) -> String {
        format!("Invalid configuration in {}: {}", path.display(), reason)
    }

    pub fn no_score_selected() -> &'static str {
        "No score given. Pass a MIDI file, or use --list to see the available scores."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_not_found_lists_alternatives() {
        let msg = UserError::score_not_found(
            Path::new("songs/missing.mid"),
            &[PathBuf::from("songs/a.mid"), PathBuf::from("songs/b.midi")],
        );
        assert!(msg.contains("Score file not found: songs/missing.mid"));
        assert!(msg.contains("  songs/a.mid"));
        assert!(msg.contains("  songs/b.midi"));
    }

    #[test]
    fn test_score_not_found_without_alternatives() {
        let msg = UserError::score_not_found(Path::new("x.mid"), &[]);
        assert!(msg.contains("No scores found"));
    }

    #[test]
    fn test_config_error() {
        let msg = UserError::config_error(Path::new("notefall.json"), "lane_count must be at least 1");
        assert!(msg.contains("notefall.json"));
        assert!(msg.contains("lane_count"));
    }
}
