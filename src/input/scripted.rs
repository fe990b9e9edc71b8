use std::collections::VecDeque;

use crate::traits::input::{InputProvider, KeyPress};

/// Replays a fixed list of presses. A press is released on the first poll at
/// or after its time, stamped with the poll time.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    pending: VecDeque<KeyPress>,
}

impl ScriptedInput {
    pub fn new(mut presses: Vec<KeyPress>) -> Self {
        presses.sort_by_key(|p| p.time_us);
        Self {
            pending: presses.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl InputProvider for ScriptedInput {
    fn poll_presses(&mut self, now_us: i64) -> Vec<KeyPress> {
        let mut due = Vec::new();
        while self.pending.front().is_some_and(|p| p.time_us <= now_us) {
            if let Some(press) = self.pending.pop_front() {
                due.push(KeyPress {
                    lane: press.lane,
                    time_us: now_us,
                });
            }
        }
        due
    }
}
