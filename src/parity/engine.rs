//! Parity reconstruction engine
//!
//! Walks one lane's notes in order and assigns each a forehand/backhand
//! label. The running flag starts at `false` for every lane and flips on each
//! new swing, so the first note of a lane is a forehand.

use std::collections::HashMap;

use super::store::OverrideStore;
use super::types::{IdentityKey, ParityRecord};
use crate::config::ParityConfig;
use crate::direction::is_same_direction;
use crate::note::Note;

/// Result of reconstructing one lane.
///
/// # Fields
/// - `records`: One record per input note, in input order. Notes that matched
///   an existing record carry a copy of it (usually manually tagged).
/// - `final_forehand`: Running flag after the last note
#[derive(Debug, Clone, PartialEq)]
pub struct LaneParity {
    pub records: Vec<ParityRecord>,
    pub final_forehand: bool,
}

impl LaneParity {
    /// Records created by this pass (not taken over from the store).
    pub fn generated(&self) -> impl Iterator<Item = &ParityRecord> {
        self.records.iter().filter(|r| !r.manually_tagged)
    }
}

/// Reconstruct parity for one lane's time-ordered notes.
///
/// For each note:
/// - A record already existing at the note's identity key (in `store`, or
///   created earlier in this pass) is adopted as-is and its parity becomes the
///   running flag.
/// - Otherwise, when the previous note is at most `continuous_swing_gap`
///   beats earlier and the note is a dot or points the same way, the note
///   belongs to the same swing and keeps the flag.
/// - Otherwise the flag flips.
///
/// The store is only read; callers insert the generated records afterwards.
pub fn reconstruct_lane(
    notes: &[Note],
    store: &OverrideStore,
    config: &ParityConfig,
) -> LaneParity {
    let table = &config.directions;
    let mut forehand = false;
    let mut previous: Option<&Note> = None;
    let mut records = Vec::with_capacity(notes.len());
    let mut emitted: HashMap<IdentityKey, usize> = HashMap::new();

    for note in notes {
        let key = IdentityKey::from(note);
        let existing = store
            .get(&key)
            .or_else(|| emitted.get(&key).map(|&i| &records[i]))
            .cloned();

        if let Some(record) = existing {
            forehand = record.is_forehand;
            records.push(record);
            previous = Some(note);
            continue;
        }

        let same_swing = previous.is_some_and(|prev| {
            note.time - prev.time <= config.continuous_swing_gap
                && (note.is_dot()
                    || is_same_direction(
                        table.effective_direction(prev),
                        table.effective_direction(note),
                        config.same_direction_tolerance,
                    ))
        });

        if !same_swing {
            forehand = !forehand;
        }

        emitted.insert(key, records.len());
        records.push(ParityRecord::generated(note, forehand));
        previous = Some(note);
    }

    LaneParity {
        records,
        final_forehand: forehand,
    }
}
