use tracing::{debug, info};

use super::frame_clock::{FrameClock, FrameTime};
use super::judge::HitGrade;
use super::score::ScoreCounter;
use super::track::{FallSettings, Track};
use crate::audio::PlaybackSynchronizer;
use crate::config::{ConfigError, GameConfig};
use crate::model::lane::LaneConfig;
use crate::model::note::NoteEvent;
use crate::traits::input::InputProvider;
use crate::traits::render::RenderSurface;
use crate::traits::time::TimeProvider;

/// All simulation state of one play-through, driven one frame at a time.
pub struct GameSession {
    tracks: Vec<Track>,
    playback: PlaybackSynchronizer,
    score: ScoreCounter,
    clock: FrameClock,
    finish_logged: bool,
}

impl GameSession {
    /// Build the lanes and queue every event on its lane.
    ///
    /// # Panics
    /// If an event names a lane the configuration does not have.
    pub fn new(
        config: &GameConfig,
        events: &[NoteEvent],
        playback: PlaybackSynchronizer,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let lanes = LaneConfig::from_config(config);
        let fall = FallSettings {
            spawn_position: config.spawn_position,
            fall_speed: config.fall_speed,
        };
        let mut tracks: Vec<Track> = lanes
            .layouts
            .iter()
            .enumerate()
            .map(|(id, layout)| {
                Track::new(
                    id,
                    layout.clone(),
                    lanes.visible_height,
                    lanes.target_line,
                    lanes.preroll_line,
                    fall,
                    config.hit_policy(),
                    config.flash_duration(),
                )
            })
            .collect();

        // Decoded events are grouped by pitch; lanes need them in time order.
        let mut ordered = events.to_vec();
        ordered.sort_by(|a, b| a.time_seconds.total_cmp(&b.time_seconds));
        for event in &ordered {
            assert!(
                event.lane < tracks.len(),
                "note for lane {} but only {} lanes",
                event.lane,
                tracks.len()
            );
            tracks[event.lane].push(event);
        }

        debug!(
            lanes = tracks.len(),
            notes = events.len(),
            "Game session created"
        );

        Ok(Self {
            tracks,
            playback,
            score: ScoreCounter::new(),
            clock: FrameClock::new(),
            finish_logged: false,
        })
    }

    /// Run one frame: update and draw every lane, then check whether playback
    /// should start. The very first call only starts the frame clock.
    pub fn tick(&mut self, now_us: i64, surface: &mut dyn RenderSurface) -> Option<FrameTime> {
        let frame = self.clock.tick(now_us)?;
        self.playback.drain();

        for track in &mut self.tracks {
            track.update(frame.elapsed, frame.current, frame.now_us);
            track.draw(surface, frame.now_us);
        }

        let first_row_hit = self.tracks.iter().any(Track::is_first_row_hit);
        self.playback.trigger(first_row_hit);

        if !self.finish_logged && self.is_finished() {
            self.finish_logged = true;
            info!(
                score = self.score.total(),
                perfect = self.score.count(HitGrade::Perfect),
                great = self.score.count(HitGrade::Great),
                good = self.score.count(HitGrade::Good),
                miss = self.score.count(HitGrade::Miss),
                "Session finished"
            );
        }

        Some(frame)
    }

    /// One full frame: apply the presses `input` reports at the current
    /// time, then [`tick`](Self::tick).
    pub fn step(
        &mut self,
        input: &mut dyn InputProvider,
        time: &dyn TimeProvider,
        surface: &mut dyn RenderSurface,
    ) -> Option<FrameTime> {
        let now_us = time.now_us();
        for press in input.poll_presses(now_us) {
            self.handle_input(press.lane, press.time_us);
        }
        self.tick(now_us, surface)
    }

    /// Evaluate a key press on `lane` and add its points to the score.
    ///
    /// # Panics
    /// If `lane` is not a lane of this session.
    pub fn handle_input(&mut self, lane: usize, now_us: i64) -> u32 {
        assert!(
            lane < self.tracks.len(),
            "input for unregistered lane {lane}"
        );
        let outcome = self.tracks[lane].handle_input(now_us);
        self.score.record(outcome);
        outcome.points()
    }

    /// Every lane is empty and playback is over or was never needed.
    pub fn is_finished(&self) -> bool {
        self.tracks.iter().all(Track::is_empty)
            && (self.playback.is_finished() || !self.playback.has_started())
    }

    pub fn score(&self) -> &ScoreCounter {
        &self.score
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn playback(&self) -> &PlaybackSynchronizer {
        &self.playback
    }

    /// Stop playback and wait for its worker.
    pub fn shutdown(&mut self) {
        self.playback.stop();
    }
}
