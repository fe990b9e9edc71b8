//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

#[path = "../../src/test_utils.rs"]
mod midi;

pub use midi::MidiBuilder;

/// Write `bytes` as `name` inside `dir` and return the path.
pub fn write_score(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write fixture");
    path
}
