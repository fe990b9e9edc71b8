use thiserror::Error;

/// A configuration value that cannot be used. Rejected at startup, never clamped.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("lane_count must be at least 1")]
    ZeroLanes,

    #[error("hit_tolerance must be positive, got {0}")]
    NonPositiveTolerance(f64),

    #[error("fall_speed must be positive, got {0}")]
    NonPositiveFallSpeed(f64),

    #[error("visible_height must be positive, got {0}")]
    NonPositiveHeight(f64),

    #[error("lane_width must be positive, got {0}")]
    NonPositiveLaneWidth(f32),

    #[error("{name} offset {offset} places the line outside the lane (height {height})")]
    LineOutsideLane {
        name: &'static str,
        offset: f64,
        height: f64,
    },

    #[error("hit windows must be positive and strictly increasing, got {perfect}/{great}/{good}")]
    InvalidHitWindows { perfect: f64, great: f64, good: f64 },

    #[error("poll_interval_ms must be at least 1")]
    ZeroPollInterval,

    #[error("channel_capacity must be at least 1")]
    ZeroChannelCapacity,

    #[error("{bindings} key bindings configured for {lanes} lanes")]
    KeyBindingMismatch { bindings: usize, lanes: usize },

    #[error("unknown key name: {0}")]
    UnknownKey(String),
}
