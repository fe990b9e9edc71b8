use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::game::judge::{HitPolicy, HitWindows};
use crate::input::keyboard::key_from_name;
use crate::model::note::DEFAULT_LANE_COUNT;

pub const CONFIG_FILE: &str = "notefall.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub lane_count: usize,
    pub lane_width: f32,
    /// Height of the lane area; objects below it are retired.
    pub visible_height: f64,
    /// Distance of the target line above the bottom of the lane.
    pub target_offset: f64,
    /// Distance of the pre-roll line above the bottom of the lane.
    pub preroll_offset: f64,
    /// Where new objects appear; negative is above the lane.
    pub spawn_position: f64,
    /// Lane units per second.
    pub fall_speed: f64,
    pub hit_tolerance: f64,
    pub hit_windows: HitWindows,
    pub flash_duration_ms: u64,
    pub poll_interval_ms: u64,
    pub channel_capacity: usize,
    pub key_bindings: Vec<String>,
    /// Substring of the MIDI output port name to play through. First port when unset.
    pub midi_output_port: Option<String>,
    pub songs_dir: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: 480,
            window_height: 660,
            lane_count: DEFAULT_LANE_COUNT,
            lane_width: 100.0,
            visible_height: 600.0,
            target_offset: 20.0,
            preroll_offset: 50.0,
            spawn_position: -40.0,
            fall_speed: 100.0,
            hit_tolerance: 50.0,
            hit_windows: HitWindows::default(),
            flash_duration_ms: 200,
            poll_interval_ms: 10,
            channel_capacity: 64,
            key_bindings: ["A", "S", "D", "F"].map(String::from).to_vec(),
            midi_output_port: None,
            songs_dir: None,
        }
    }
}

impl GameConfig {
    /// Loads config from a specified path.
    /// Returns default config if file doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn lane_count(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.lane_count).ok_or(ConfigError::ZeroLanes)
    }

    pub fn hit_policy(&self) -> HitPolicy {
        HitPolicy::new(self.hit_tolerance, self.hit_windows)
    }

    pub fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_duration_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Reject values the game cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lanes = self.lane_count()?.get();

        // `!(x > 0.0)` also rejects NaN.
        if !(self.hit_tolerance > 0.0) {
            return Err(ConfigError::NonPositiveTolerance(self.hit_tolerance));
        }
        if !(self.fall_speed > 0.0) {
            return Err(ConfigError::NonPositiveFallSpeed(self.fall_speed));
        }
        if !(self.visible_height > 0.0) {
            return Err(ConfigError::NonPositiveHeight(self.visible_height));
        }
        if !(self.lane_width > 0.0) {
            return Err(ConfigError::NonPositiveLaneWidth(self.lane_width));
        }
        for (name, offset) in [("target", self.target_offset), ("pre-roll", self.preroll_offset)] {
            if !(offset >= 0.0 && offset < self.visible_height) {
                return Err(ConfigError::LineOutsideLane {
                    name,
                    offset,
                    height: self.visible_height,
                });
            }
        }
        self.hit_windows.validate()?;
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::ZeroChannelCapacity);
        }
        if self.key_bindings.len() != lanes {
            return Err(ConfigError::KeyBindingMismatch {
                bindings: self.key_bindings.len(),
                lanes,
            });
        }
        if let Some(unknown) = self.key_bindings.iter().find(|k| key_from_name(k).is_none()) {
            return Err(ConfigError::UnknownKey(unknown.clone()));
        }
        Ok(())
    }
}
