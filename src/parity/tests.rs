use super::*;
use crate::config::ParityConfig;
use crate::note::{CutDirection, Lane, Note};

fn red(time: f64, x: i32, y: i32, dir: CutDirection) -> Note {
    Note::new(time, Lane::Red, x, y, dir)
}

fn parities(lane: &LaneParity) -> Vec<bool> {
    lane.records.iter().map(|r| r.is_forehand).collect()
}

#[test]
fn test_first_note_is_forehand() {
    let notes = vec![red(0.0, 1, 0, CutDirection::Down)];
    let lane = reconstruct_lane(&notes, &OverrideStore::new(), &ParityConfig::default());
    assert_eq!(parities(&lane), vec![true]);
    assert!(lane.final_forehand);
}

#[test]
fn test_empty_lane() {
    let lane = reconstruct_lane(&[], &OverrideStore::new(), &ParityConfig::default());
    assert!(lane.records.is_empty());
    assert!(!lane.final_forehand);
}

#[test]
fn test_dot_within_gap_shares_swing() {
    // Up, dot 0.1 beats later, Down 0.4 beats after that
    let notes = vec![
        red(0.0, 1, 0, CutDirection::Up),
        red(0.1, 2, 0, CutDirection::Dot),
        red(0.5, 1, 0, CutDirection::Down),
    ];
    let lane = reconstruct_lane(&notes, &OverrideStore::new(), &ParityConfig::default());
    assert_eq!(parities(&lane), vec![true, true, false]);
    assert!(!lane.final_forehand);
}

#[test]
fn test_alternates_without_same_swing_pairs() {
    let notes: Vec<Note> = (0..6)
        .map(|i| {
            let dir = if i % 2 == 0 { CutDirection::Down } else { CutDirection::Up };
            red(i as f64 * 0.5, 1, 0, dir)
        })
        .collect();
    let lane = reconstruct_lane(&notes, &OverrideStore::new(), &ParityConfig::default());
    assert_eq!(parities(&lane), vec![true, false, true, false, true, false]);
}

#[test]
fn test_same_direction_within_gap_shares_swing() {
    // Down then DownLeft (225 vs 270, 45 degrees apart) an eighth of a beat later
    let notes = vec![
        red(0.0, 2, 1, CutDirection::Down),
        red(0.125, 1, 0, CutDirection::DownLeft),
    ];
    let lane = reconstruct_lane(&notes, &OverrideStore::new(), &ParityConfig::default());
    assert_eq!(parities(&lane), vec![true, true]);
}

#[test]
fn test_same_direction_outside_gap_flips() {
    let notes = vec![
        red(0.0, 2, 1, CutDirection::Down),
        red(0.126, 1, 0, CutDirection::Down),
    ];
    let lane = reconstruct_lane(&notes, &OverrideStore::new(), &ParityConfig::default());
    assert_eq!(parities(&lane), vec![true, false]);
}

#[test]
fn test_opposite_direction_within_gap_flips() {
    let notes = vec![
        red(0.0, 1, 0, CutDirection::Down),
        red(0.0625, 1, 1, CutDirection::Up),
    ];
    let lane = reconstruct_lane(&notes, &OverrideStore::new(), &ParityConfig::default());
    assert_eq!(parities(&lane), vec![true, false]);
}

#[test]
fn test_angle_offset_counts_toward_direction() {
    // Right (0) vs Right rotated by 80 degrees: 80 >= 67.5, so a new swing
    let notes = vec![
        red(0.0, 0, 0, CutDirection::Right),
        red(0.1, 1, 0, CutDirection::Right).with_angle_offset(80.0),
    ];
    let lane = reconstruct_lane(&notes, &OverrideStore::new(), &ParityConfig::default());
    assert_eq!(parities(&lane), vec![true, false]);
}

#[test]
fn test_reconstruction_is_idempotent() {
    let notes = vec![
        red(0.0, 1, 0, CutDirection::Down),
        red(0.1, 2, 0, CutDirection::Dot),
        red(1.0, 1, 2, CutDirection::Up),
        red(1.05, 1, 1, CutDirection::UpLeft),
        red(2.0, 0, 0, CutDirection::Left),
    ];
    let config = ParityConfig::default();
    let first = reconstruct_lane(&notes, &OverrideStore::new(), &config);
    let second = reconstruct_lane(&notes, &OverrideStore::new(), &config);
    assert_eq!(parities(&first), parities(&second));
}

#[test]
fn test_override_takes_precedence_and_sets_flag() {
    let notes = vec![
        red(0.0, 1, 0, CutDirection::Down),
        red(1.0, 1, 0, CutDirection::Up),
        red(2.0, 1, 0, CutDirection::Down),
    ];
    // Without overrides: true, false, true. Pin the middle note to forehand.
    let store = OverrideStore::from_manual(vec![ParityRecord::manual(1.0, Lane::Red, 1, 0, true)]);
    let lane = reconstruct_lane(&notes, &store, &ParityConfig::default());

    assert_eq!(parities(&lane), vec![true, true, false]);
    assert!(lane.records[1].manually_tagged);
    assert_eq!(lane.generated().count(), 2);
}

#[test]
fn test_override_on_first_note() {
    let notes = vec![
        red(0.0, 1, 0, CutDirection::Down),
        red(0.05, 2, 0, CutDirection::Dot),
    ];
    let store = OverrideStore::from_manual(vec![ParityRecord::manual(0.0, Lane::Red, 1, 0, false)]);
    let lane = reconstruct_lane(&notes, &store, &ParityConfig::default());
    // The dot continues the overridden backhand swing
    assert_eq!(parities(&lane), vec![false, false]);
}

#[test]
fn test_duplicate_identity_reuses_first_record() {
    let notes = vec![
        red(0.0, 1, 0, CutDirection::Down),
        red(0.0, 1, 0, CutDirection::Up),
        red(1.0, 1, 0, CutDirection::Up),
    ];
    let lane = reconstruct_lane(&notes, &OverrideStore::new(), &ParityConfig::default());
    assert_eq!(parities(&lane), vec![true, true, false]);
}

#[test]
fn test_custom_tolerance() {
    let notes = vec![
        red(0.0, 2, 1, CutDirection::Down),
        red(0.1, 1, 0, CutDirection::DownLeft),
    ];
    let config = ParityConfig {
        same_direction_tolerance: 30.0,
        ..ParityConfig::default()
    };
    let lane = reconstruct_lane(&notes, &OverrideStore::new(), &config);
    assert_eq!(parities(&lane), vec![true, false]);
}
