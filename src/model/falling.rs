use super::note::NoteEvent;

/// Lifecycle of a falling object. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectState {
    /// Waiting for its scheduled time.
    Pending,
    /// Moving down the lane.
    Active,
    /// Fell past the bottom of the lane; dropped on the next update.
    Retired,
}

/// A note travelling down its lane.
#[derive(Debug, Clone, PartialEq)]
pub struct FallingObject {
    pub scheduled_time: f64,
    /// Vertical position in lane units; grows downwards.
    pub position: f64,
    /// Lane units per second.
    pub fall_speed: f64,
    pub lane: usize,
    pub pitch: u8,
    state: ObjectState,
}

impl FallingObject {
    pub fn new(scheduled_time: f64, position: f64, fall_speed: f64, lane: usize, pitch: u8) -> Self {
        Self {
            scheduled_time,
            position,
            fall_speed,
            lane,
            pitch,
            state: ObjectState::Pending,
        }
    }

    pub fn from_event(event: &NoteEvent, spawn_position: f64, fall_speed: f64) -> Self {
        Self::new(
            event.time_seconds,
            spawn_position,
            fall_speed,
            event.lane,
            event.pitch,
        )
    }

    pub fn state(&self) -> ObjectState {
        self.state
    }

    /// Advance the object by one frame.
    ///
    /// A pending object activates once `current_time` reaches its scheduled
    /// time and moves in that same frame. An active object retires as soon as
    /// its position passes `visible_height`.
    pub fn update(&mut self, elapsed: f64, current_time: f64, visible_height: f64) -> ObjectState {
        if self.state == ObjectState::Pending && current_time >= self.scheduled_time {
            self.state = ObjectState::Active;
        }
        if self.state == ObjectState::Active {
            self.position += self.fall_speed * elapsed;
            if self.position > visible_height {
                self.state = ObjectState::Retired;
            }
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stays_pending_before_schedule() {
        let mut obj = FallingObject::new(1.0, -40.0, 100.0, 0, 60);
        assert_eq!(obj.update(0.5, 0.5, 600.0), ObjectState::Pending);
        assert_eq!(obj.position, -40.0);
    }

    #[test]
    fn test_activates_and_moves() {
        let mut obj = FallingObject::new(1.0, -40.0, 100.0, 0, 60);
        assert_eq!(obj.update(0.5, 1.0, 600.0), ObjectState::Active);
        assert_eq!(obj.position, 10.0);
    }

    #[test]
    fn test_retires_past_bottom() {
        let mut obj = FallingObject::new(0.0, 590.0, 100.0, 0, 60);
        assert_eq!(obj.update(0.05, 0.0, 600.0), ObjectState::Active);
        assert_eq!(obj.update(0.1, 0.1, 600.0), ObjectState::Retired);
        // Retired objects never come back or move.
        let pos = obj.position;
        assert_eq!(obj.update(1.0, 1.0, 10_000.0), ObjectState::Retired);
        assert_eq!(obj.position, pos);
    }

    #[test]
    fn test_exactly_at_bottom_is_still_active() {
        let mut obj = FallingObject::new(0.0, 500.0, 100.0, 0, 60);
        assert_eq!(obj.update(1.0, 0.0, 600.0), ObjectState::Active);
        assert_eq!(obj.position, 600.0);
    }
}
