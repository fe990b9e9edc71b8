/// Timing of one simulation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous frame.
    pub elapsed: f64,
    /// Seconds since the first frame.
    pub current: f64,
    pub now_us: i64,
}

/// Turns raw per-refresh timestamps into frame deltas.
///
/// The first timestamp only establishes the origin; simulation starts on the
/// second one so the first delta is never measured from an arbitrary epoch.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    origin_us: Option<i64>,
    last_us: i64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, now_us: i64) -> Option<FrameTime> {
        let Some(origin) = self.origin_us else {
            self.origin_us = Some(now_us);
            self.last_us = now_us;
            return None;
        };

        // A timestamp going backwards is treated as a zero-length frame.
        let now_us = now_us.max(self.last_us);
        let elapsed = (now_us - self.last_us) as f64 / 1_000_000.0;
        self.last_us = now_us;

        Some(FrameTime {
            elapsed,
            current: (now_us - origin) as f64 / 1_000_000.0,
            now_us,
        })
    }

    pub fn has_started(&self) -> bool {
        self.origin_us.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_skipped() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(1_000_000), None);
        assert!(clock.has_started());

        let frame = clock.tick(1_016_000).unwrap();
        assert_eq!(frame.elapsed, 0.016);
        assert_eq!(frame.current, 0.016);

        let frame = clock.tick(1_050_000).unwrap();
        assert!((frame.elapsed - 0.034).abs() < 1e-12);
        assert_eq!(frame.current, 0.05);
    }

    #[test]
    fn test_backwards_time_is_zero_elapsed() {
        let mut clock = FrameClock::new();
        clock.tick(100);
        clock.tick(200);
        let frame = clock.tick(150).unwrap();
        assert_eq!(frame.elapsed, 0.0);
        assert_eq!(frame.now_us, 200);
    }
}
