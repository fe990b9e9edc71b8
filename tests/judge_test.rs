//! Hit evaluation on a single lane: distance bands, tolerance and queue order.

use std::time::Duration;

use notefall::game::{FallSettings, HitGrade, HitPolicy, Track};
use notefall::model::{FallingObject, LaneLayout};
use notefall::traits::render::Color;

const TARGET: f64 = 580.0;

/// A lane whose objects sit at the given positions, oldest first.
fn lane_with(positions: &[f64]) -> Track {
    let mut track = Track::new(
        0,
        LaneLayout::new(0.0, 100.0, Color::RED),
        600.0,
        TARGET,
        550.0,
        FallSettings {
            spawn_position: -40.0,
            fall_speed: 100.0,
        },
        HitPolicy::default(),
        Duration::from_millis(200),
    );
    for (i, &position) in positions.iter().enumerate() {
        track.push_object(FallingObject::new(i as f64, position, 100.0, 0, 60));
    }
    track
}

fn points_at_distance(distance: f64) -> u32 {
    lane_with(&[TARGET - distance]).handle_input(0).points()
}

#[test]
fn test_distance_bands() {
    assert_eq!(points_at_distance(5.0), 100);
    assert_eq!(points_at_distance(15.0), 50);
    assert_eq!(points_at_distance(25.0), 20);
    assert_eq!(points_at_distance(35.0), 0);
}

#[test]
fn test_distance_is_absolute() {
    assert_eq!(points_at_distance(-5.0), 100);
    assert_eq!(points_at_distance(-25.0), 20);
}

#[test]
fn test_in_tolerance_but_outside_bands_is_graded_miss() {
    let outcome = lane_with(&[TARGET - 35.0]).handle_input(0);
    assert_eq!(outcome.grade, HitGrade::Miss);
    assert_eq!(outcome.distance, Some(35.0));
}

#[test]
fn test_out_of_tolerance_matches_nothing() {
    let outcome = lane_with(&[TARGET - 51.0]).handle_input(0);
    assert_eq!(outcome.grade, HitGrade::Miss);
    assert_eq!(outcome.distance, None);
}

#[test]
fn test_empty_lane_scores_zero() {
    assert_eq!(lane_with(&[]).handle_input(0).points(), 0);
}

#[test]
fn test_close_object_first_in_queue() {
    let mut lane = lane_with(&[TARGET - 5.0, TARGET - 40.0]);
    assert_eq!(lane.handle_input(0).points(), 100);
}

#[test]
fn test_first_match_wins_over_closer_object() {
    // Both are in tolerance; the older one is graded even though the newer is closer.
    let mut lane = lane_with(&[TARGET - 25.0, TARGET - 5.0]);
    assert_eq!(lane.handle_input(0).points(), 20);
}

#[test]
fn test_objects_outside_tolerance_are_skipped() {
    let mut lane = lane_with(&[TARGET + 15.0 - 80.0, TARGET - 5.0]);
    assert_eq!(lane.handle_input(0).points(), 100);
}

#[test]
fn test_hit_leaves_object_in_place() {
    let mut lane = lane_with(&[TARGET]);
    assert_eq!(lane.handle_input(0).points(), 100);
    assert_eq!(lane.handle_input(10).points(), 100);
    assert_eq!(lane.objects().len(), 1);
}

#[test]
fn test_press_starts_flash() {
    let mut lane = lane_with(&[]);
    assert!(!lane.is_flashing());
    lane.handle_input(0);
    assert!(lane.is_flashing());
}
