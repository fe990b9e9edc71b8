/// A key-down on one lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub lane: usize,
    /// Frame time of the press in microseconds.
    pub time_us: i64,
}

/// Abstraction over input sources.
/// Implementations: KeyboardInput (macroquad), ScriptedInput (testing).
pub trait InputProvider {
    /// Key-downs since the previous poll, in lane order.
    fn poll_presses(&mut self, now_us: i64) -> Vec<KeyPress>;
}
