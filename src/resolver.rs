//! # Stack Resolver
//!
//! Orders the members of same-timestamp note groups ("stacks") in the order
//! the hand reaches them.
//!
//! ## Algorithm
//! For each stack in a time-ordered sequence:
//! 1. Find the governing direction: the last directional member's effective
//!    direction, reversed. A dot-only stack looks ahead to the next directional
//!    note instead and reverses once more for every gap of at least
//!    `intervening_swing_gap` beats between it and the stack, since each such
//!    gap hides a full swing the other way.
//! 2. Simulate a swing of `travel_distance` along that direction from the note
//!    before the stack (or from the stack's first member when nothing precedes
//!    it).
//! 3. Stable-sort the stack by distance from the simulated entry point.
//!
//! A dot-only stack with no directional note after it is left as is.
//!
//! ## Entry Points
//! - [`resolve_order()`] - Index permutation of the resolved sequence
//! - [`resolve_stacks()`] - The resolved sequence itself

use crate::config::ParityConfig;
use crate::direction::{reverse_direction, simulate_swing, SimulatedPosition};
use crate::note::Note;

/// Resolve every stack and return the resolved sequence.
///
/// # Example
/// ```rust
/// use parity::{resolve_stacks, CutDirection, Lane, Note, ParityConfig};
///
/// let notes = vec![
///     Note::new(0.0, Lane::Red, 1, 0, CutDirection::Down),
///     Note::new(1.0, Lane::Red, 1, 2, CutDirection::Down),
///     Note::new(1.0, Lane::Red, 1, 0, CutDirection::Down),
/// ];
/// let resolved = resolve_stacks(&notes, &ParityConfig::default());
/// // Coming from (1,0) the hand swings up into the stack and meets the top note first.
/// assert_eq!(resolved[1].pos_y, 2);
/// assert_eq!(resolved[2].pos_y, 0);
/// ```
pub fn resolve_stacks(notes: &[Note], config: &ParityConfig) -> Vec<Note> {
    resolve_order(notes, config)
        .into_iter()
        .map(|i| notes[i].clone())
        .collect()
}

/// Resolve every stack and return, for each output slot, the index of the
/// input note that goes there.
pub fn resolve_order(notes: &[Note], config: &ParityConfig) -> Vec<usize> {
    let mut order: Vec<usize> = (0..notes.len()).collect();
    let mut start = 0;

    while start < notes.len() {
        let end = stack_end(notes, start);
        if end - start > 1 {
            if let Some(entry) = stack_entry(notes, start, end, config) {
                let members = &mut order[start..end];
                order_by_entry(notes, members, entry);
            }
        }
        start = end;
    }

    order
}

/// One past the last note sharing `notes[start]`'s timestamp.
fn stack_end(notes: &[Note], start: usize) -> usize {
    let time = notes[start].time;
    let mut end = start + 1;
    while end < notes.len() && notes[end].time == time {
        end += 1;
    }
    end
}

/// Simulated hand position entering the stack `notes[start..end]`, or `None`
/// when no direction can be inferred.
fn stack_entry(
    notes: &[Note],
    start: usize,
    end: usize,
    config: &ParityConfig,
) -> Option<SimulatedPosition> {
    let direction = governing_direction(notes, start, end, config)?;
    let origin = if start > 0 {
        &notes[start - 1]
    } else {
        &notes[start]
    };
    Some(simulate_swing(
        origin.pos_x as f64,
        origin.pos_y as f64,
        direction,
        config.travel_distance,
    ))
}

/// Direction the hand travels when entering the stack.
fn governing_direction(
    notes: &[Note],
    start: usize,
    end: usize,
    config: &ParityConfig,
) -> Option<f64> {
    let table = &config.directions;

    if let Some(arrow) = notes[start..end].iter().rev().find(|n| !n.is_dot()) {
        return Some(reverse_direction(table.effective_direction(arrow)));
    }

    // Dot-only stack: borrow the direction of the next arrow
    let stack_time = notes[start].time;
    let found = (end..notes.len()).find(|&i| !notes[i].is_dot() && notes[i].time > stack_time)?;

    let mut direction = reverse_direction(table.effective_direction(&notes[found]));
    for i in (start + 1..found).rev() {
        if notes[i + 1].time - notes[i].time >= config.intervening_swing_gap {
            direction = reverse_direction(direction);
        }
    }
    Some(direction)
}

/// Stable-sort `members` (indices into `notes`) by distance from `entry`.
///
/// Equal distances keep their original relative order.
pub fn order_by_entry(notes: &[Note], members: &mut [usize], entry: SimulatedPosition) {
    members.sort_by(|&a, &b| {
        let da = entry.distance_to(notes[a].pos_x as f64, notes[a].pos_y as f64);
        let db = entry.distance_to(notes[b].pos_x as f64, notes[b].pos_y as f64);
        da.total_cmp(&db)
    });
}
