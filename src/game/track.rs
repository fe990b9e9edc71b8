use std::time::Duration;

use tracing::trace;

use super::judge::{HitOutcome, HitPolicy};
use crate::model::falling::{FallingObject, ObjectState};
use crate::model::lane::LaneLayout;
use crate::model::note::NoteEvent;
use crate::traits::render::{Color, Rect, RenderSurface};

/// Size of a drawn object and of the target indicator.
pub const OBJECT_WIDTH: f32 = 40.0;
pub const OBJECT_HEIGHT: f32 = 20.0;

/// Where objects enter a lane and how fast they fall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallSettings {
    pub spawn_position: f64,
    pub fall_speed: f64,
}

/// One lane of the play field: its falling objects, target line and hit flash.
#[derive(Debug)]
pub struct Track {
    id: usize,
    layout: LaneLayout,
    visible_height: f64,
    target_line: f64,
    preroll_line: f64,
    fall: FallSettings,
    policy: HitPolicy,
    /// Oldest first.
    objects: Vec<FallingObject>,
    /// Set once any object has been at or past the pre-roll line, even if it
    /// left the lane in the same frame.
    preroll_reached: bool,
    flash_active: bool,
    flash_start_us: i64,
    flash_duration_us: i64,
}

impl Track {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: usize,
        layout: LaneLayout,
        visible_height: f64,
        target_line: f64,
        preroll_line: f64,
        fall: FallSettings,
        policy: HitPolicy,
        flash_duration: Duration,
    ) -> Self {
        Self {
            id,
            layout,
            visible_height,
            target_line,
            preroll_line,
            fall,
            policy,
            objects: Vec::new(),
            preroll_reached: false,
            flash_active: false,
            flash_start_us: 0,
            flash_duration_us: i64::try_from(flash_duration.as_micros()).unwrap_or(i64::MAX),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn objects(&self) -> &[FallingObject] {
        &self.objects
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn target_line(&self) -> f64 {
        self.target_line
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_active
    }

    /// Queue a note on this lane.
    ///
    /// # Panics
    /// If the event belongs to another lane or is scheduled before the
    /// previously queued object.
    pub fn push(&mut self, event: &NoteEvent) {
        self.push_object(FallingObject::from_event(
            event,
            self.fall.spawn_position,
            self.fall.fall_speed,
        ));
    }

    /// Queue an already built object. Same rules as [`push`](Self::push).
    pub fn push_object(&mut self, object: FallingObject) {
        assert_eq!(object.lane, self.id, "note dispatched to the wrong lane");
        if let Some(last) = self.objects.last() {
            assert!(
                object.scheduled_time >= last.scheduled_time,
                "lane {} received notes out of time order",
                self.id
            );
        }
        self.objects.push(object);
    }

    /// Advance every object by one frame and drop those that left the lane.
    pub fn update(&mut self, elapsed: f64, current_time: f64, now_us: i64) {
        let height = self.visible_height;
        let preroll_line = self.preroll_line;
        let mut reached = false;
        self.objects.retain_mut(|obj| {
            let before = obj.position;
            let state = obj.update(elapsed, current_time, height);
            debug_assert!(obj.position >= before);
            reached |= obj.position >= preroll_line;
            state != ObjectState::Retired
        });
        self.preroll_reached |= reached;

        if self.flash_active && now_us - self.flash_start_us >= self.flash_duration_us {
            self.flash_active = false;
        }
    }

    /// Redraw the lane from scratch.
    pub fn draw(&self, surface: &mut dyn RenderSurface, now_us: i64) {
        let x = self.layout.x;
        surface.clear(
            Rect::new(x, 0.0, self.layout.width, self.visible_height as f32),
            Color::BLACK,
        );

        let object_x = self.layout.center_x() - OBJECT_WIDTH / 2.0;
        let flashing =
            self.flash_active && now_us - self.flash_start_us < self.flash_duration_us;
        let target_color = if flashing {
            self.layout.color.brighter()
        } else {
            self.layout.color
        };
        surface.fill_rect(
            Rect::new(object_x, self.target_line as f32, OBJECT_WIDTH, OBJECT_HEIGHT),
            target_color,
        );

        for obj in &self.objects {
            surface.fill_rect(
                Rect::new(object_x, obj.position as f32, OBJECT_WIDTH, OBJECT_HEIGHT),
                self.layout.color,
            );
        }
    }

    /// Whether any object has reached the pre-roll line, including objects
    /// that have since left the lane.
    pub fn is_first_row_hit(&self) -> bool {
        self.preroll_reached || self.objects.iter().any(|obj| obj.position >= self.preroll_line)
    }

    /// Evaluate a key press on this lane.
    ///
    /// Always starts the hit flash. The first object in queue order within
    /// tolerance is graded; it stays in the lane.
    pub fn handle_input(&mut self, now_us: i64) -> HitOutcome {
        self.flash_active = true;
        self.flash_start_us = now_us;

        let distance = self
            .objects
            .iter()
            .map(|obj| (obj.position - self.target_line).abs())
            .find(|&d| self.policy.in_tolerance(d));

        let outcome = self.policy.evaluate(distance);
        trace!(lane = self.id, ?outcome, "Key press");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::judge::HitGrade;
    use crate::render::recorder::{CommandRecorder, DrawCommand};

    fn track() -> Track {
        Track::new(
            0,
            LaneLayout::new(0.0, 100.0, Color::RED),
            600.0,
            580.0,
            550.0,
            FallSettings {
                spawn_position: -40.0,
                fall_speed: 100.0,
            },
            HitPolicy::default(),
            Duration::from_millis(200),
        )
    }

    fn note(time_seconds: f64) -> NoteEvent {
        NoteEvent {
            pitch: 60,
            tick: 0,
            time_seconds,
            lane: 0,
        }
    }

    #[test]
    fn test_update_moves_only_due_objects() {
        let mut t = track();
        t.push(&note(0.0));
        t.push(&note(1.0));

        t.update(0.5, 0.5, 500_000);
        assert_eq!(t.objects()[0].position, 10.0);
        assert_eq!(t.objects()[1].position, -40.0);
    }

    #[test]
    fn test_retired_objects_are_dropped_in_order() {
        let mut t = track();
        t.push(&note(0.0));
        t.push(&note(0.0));
        t.push(&note(7.0));
        t.update(6.5, 6.5, 0);

        // -40 + 650 = 610: the first two fell out, the third is still pending.
        assert_eq!(t.objects().len(), 1);
        assert_eq!(t.objects()[0].scheduled_time, 7.0);
        assert_eq!(t.objects()[0].state(), ObjectState::Pending);
    }

    #[test]
    #[should_panic(expected = "wrong lane")]
    fn test_push_wrong_lane_panics() {
        let mut t = track();
        t.push(&NoteEvent {
            lane: 2,
            ..note(0.0)
        });
    }

    #[test]
    fn test_first_row_hit() {
        let mut t = track();
        t.push(&note(0.0));
        assert!(!t.is_first_row_hit());
        t.update(5.0, 5.0, 0);
        assert!(!t.is_first_row_hit());
        // 460 -> 560, past the pre-roll line at 550
        t.update(1.0, 6.0, 0);
        assert!(t.is_first_row_hit());
    }

    #[test]
    fn test_first_row_hit_survives_retirement() {
        let mut t = track();
        t.push(&note(0.0));
        t.update(5.0, 5.0, 0);
        assert_eq!(t.objects()[0].position, 460.0);
        assert!(!t.is_first_row_hit());

        // 460 -> 610 in one frame: past the pre-roll line and out of the lane.
        t.update(1.5, 6.5, 0);
        assert!(t.is_empty());
        assert!(t.is_first_row_hit());
    }

    #[test]
    fn test_flash_expires() {
        let mut t = track();
        t.handle_input(1_000_000);
        assert!(t.is_flashing());
        t.update(0.1, 0.1, 1_100_000);
        assert!(t.is_flashing());
        t.update(0.1, 0.2, 1_200_000);
        assert!(!t.is_flashing());
    }

    #[test]
    fn test_input_on_empty_lane() {
        let mut t = track();
        let outcome = t.handle_input(0);
        assert_eq!(outcome.grade, HitGrade::Miss);
        assert_eq!(outcome.distance, None);
        assert!(t.is_flashing());
    }

    #[test]
    fn test_hit_object_stays_in_lane() {
        let mut t = track();
        t.push(&note(0.0));
        // -40 + 100 * 6.2 = 580, right on the target line
        t.update(6.2, 6.2, 0);
        assert_eq!(t.handle_input(0).points(), 100);
        assert_eq!(t.handle_input(0).points(), 100);
        assert_eq!(t.objects().len(), 1);
    }

    #[test]
    fn test_draw_clears_then_target_then_objects() {
        let mut t = track();
        t.push(&note(0.0));
        t.update(1.0, 1.0, 0);

        let mut recorder = CommandRecorder::new();
        t.draw(&mut recorder, 0);

        let commands = recorder.commands();
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0], DrawCommand::Clear { .. }));
        assert_eq!(
            commands[1],
            DrawCommand::FillRect {
                rect: Rect::new(30.0, 580.0, 40.0, 20.0),
                color: Color::RED,
            }
        );
        assert_eq!(
            commands[2],
            DrawCommand::FillRect {
                rect: Rect::new(30.0, 60.0, 40.0, 20.0),
                color: Color::RED,
            }
        );
    }

    #[test]
    fn test_draw_highlights_target_while_flashing() {
        let mut t = track();
        t.handle_input(0);

        let mut recorder = CommandRecorder::new();
        t.draw(&mut recorder, 150_000);
        assert_eq!(
            recorder.commands()[1],
            DrawCommand::FillRect {
                rect: Rect::new(30.0, 580.0, 40.0, 20.0),
                color: Color::RED.brighter(),
            }
        );

        recorder.clear_commands();
        t.draw(&mut recorder, 250_000);
        assert_eq!(
            recorder.commands()[1],
            DrawCommand::FillRect {
                rect: Rect::new(30.0, 580.0, 40.0, 20.0),
                color: Color::RED,
            }
        );
    }
}
