use std::cell::Cell;
use std::time::Instant;

/// Abstraction over the frame time source.
/// Implementations: SystemTimeProvider (production), MockTimeProvider (testing).
pub trait TimeProvider {
    /// Microseconds since the provider was created.
    fn now_us(&self) -> i64;
}

/// Monotonic wall clock.
pub struct SystemTimeProvider {
    origin: Instant,
}

impl SystemTimeProvider {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for SystemTimeProvider {
    fn now_us(&self) -> i64 {
        i64::try_from(self.origin.elapsed().as_micros()).unwrap_or(i64::MAX)
    }
}

/// Manually driven clock for deterministic tests.
#[derive(Default)]
pub struct MockTimeProvider {
    now: Cell<i64>,
}

impl MockTimeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_time(&self, us: i64) {
        self.now.set(us);
    }

    pub fn advance_ms(&self, ms: i64) {
        self.now.set(self.now.get() + ms * 1_000);
    }
}

impl TimeProvider for MockTimeProvider {
    fn now_us(&self) -> i64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_time_provider_advance() {
        let tp = MockTimeProvider::new();
        assert_eq!(tp.now_us(), 0);
        tp.advance_ms(16);
        tp.advance_ms(17);
        assert_eq!(tp.now_us(), 33_000);
        tp.set_time(5);
        assert_eq!(tp.now_us(), 5);
    }

    #[test]
    fn system_time_provider_monotonic() {
        let tp = SystemTimeProvider::new();
        let t1 = tp.now_us();
        let t2 = tp.now_us();
        assert!(t2 >= t1);
    }
}
