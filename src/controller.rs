//! # Recompute Controller
//!
//! Decides when parity is recomputed and drives one pass from start to end.
//!
//! ## Requests
//! - [`Request::StructuralChange`] - A note was created, or an edit was undone
//!   or redone. Always runs a full rebuild.
//! - [`Request::TimeTick`] - Playback time moved. Runs at most once per
//!   `recompute_cooldown` seconds, and only rebuilds on the first pass of a
//!   session or while the store is empty; otherwise it just repaints.
//! - [`Request::Flag`] / [`Request::Unflag`] - The user toggled the manual
//!   parity of the selected notes. The store is updated, then a full rebuild
//!   propagates the change to the following notes.
//!
//! ## Pass
//! 1. Restore the original look of every note
//! 2. Rebuild when required: drop records of deleted notes, drop generated
//!    records, resolve stacks, reconstruct each lane, sort records by time
//! 3. Tint every note whose record is a backhand
//!
//! A pass always runs to completion; nothing outside the controller sees the
//! store between steps because every step borrows the controller mutably.

use std::thread;
use std::time::Duration;

use log::{debug, info, warn};

use crate::config::ParityConfig;
use crate::note::{sort_by_time, Lane, Note};
use crate::parity::{reconstruct_lane, IdentityKey, OverrideStore, ParityRecord};
use crate::resolver::resolve_stacks;

/// Source of the map's notes.
pub trait NoteSource {
    /// All notes of the map, or `None` while the editor has not loaded them.
    fn notes(&self) -> Option<Vec<Note>>;
}

/// Visual feedback for parity.
pub trait NoteVisuals {
    /// Put the note back to its original appearance.
    fn restore(&mut self, note: &Note);

    /// Mark the note as a backhand hit.
    fn tint_backhand(&mut self, note: &Note);
}

/// Something that should trigger a recompute.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    StructuralChange,
    TimeTick,
    Flag(Vec<Note>),
    Unflag(Vec<Note>),
}

impl Request {
    fn is_rate_limited(&self) -> bool {
        matches!(self, Request::TimeTick)
    }
}

/// What a call to [`RecomputeController::handle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// Records were regenerated and visuals reapplied.
    Rebuilt,
    /// Existing records were reapplied to the visuals.
    Repainted,
    /// A rate-limited request arrived inside the cooldown.
    Skipped,
    /// The note source is not available yet.
    NotReady,
}

#[derive(Debug, Clone)]
pub struct RecomputeController {
    config: ParityConfig,
    store: OverrideStore,
    last_pass: Option<f64>,
    needs_init: bool,
}

impl RecomputeController {
    pub fn new(config: ParityConfig) -> Self {
        Self {
            config,
            store: OverrideStore::new(),
            last_pass: None,
            needs_init: true,
        }
    }

    pub fn config(&self) -> &ParityConfig {
        &self.config
    }

    pub fn store(&self) -> &OverrideStore {
        &self.store
    }

    /// Start over for a newly opened map with its saved manual records.
    pub fn begin_session(&mut self, manual: Vec<ParityRecord>) {
        info!("Starting parity session with {} manual overrides", manual.len());
        self.store.replace_manual(manual);
        self.last_pass = None;
        self.needs_init = true;
    }

    /// Handle one request at time `now` (seconds).
    pub fn handle(
        &mut self,
        request: Request,
        now: f64,
        source: &impl NoteSource,
        visuals: &mut impl NoteVisuals,
    ) -> PassOutcome {
        let rate_limited = request.is_rate_limited();

        if rate_limited {
            if let Some(last) = self.last_pass {
                if now < last + self.config.recompute_cooldown {
                    return PassOutcome::Skipped;
                }
            }
        }

        match &request {
            Request::Flag(selection) => {
                for note in selection {
                    self.store.flag(&IdentityKey::from(note));
                }
            }
            Request::Unflag(selection) => {
                for note in selection {
                    self.store.unflag(&IdentityKey::from(note));
                }
            }
            Request::StructuralChange | Request::TimeTick => {}
        }

        let Some(mut notes) = source.notes() else {
            debug!("Parity pass skipped: notes not available");
            return PassOutcome::NotReady;
        };
        sort_by_time(&mut notes);

        for note in &notes {
            visuals.restore(note);
        }

        let outcome = if !rate_limited || self.store.is_empty() || self.needs_init {
            self.rebuild(&notes);
            PassOutcome::Rebuilt
        } else {
            PassOutcome::Repainted
        };

        for note in &notes {
            if let Some(record) = self.store.get_note(note) {
                if !record.is_forehand {
                    visuals.tint_backhand(note);
                }
            }
        }

        self.last_pass = Some(now);
        debug!("Parity pass for {:?}: {:?}", request, outcome);
        outcome
    }

    fn rebuild(&mut self, notes: &[Note]) {
        let stale = rebuild_store(&mut self.store, notes, &self.config);
        self.needs_init = false;
        info!(
            "Rebuilt parity for {} notes ({} stale records dropped)",
            notes.len(),
            stale
        );
    }
}

/// Regenerate every non-manual record of `store` from time-ordered `notes`.
///
/// Records of notes that no longer exist are dropped first, manual or not.
/// Returns how many such stale records were dropped.
pub fn rebuild_store(store: &mut OverrideStore, notes: &[Note], config: &ParityConfig) -> usize {
    let stale = store.prune_unmatched(notes);
    store.prune_generated();

    let resolved = resolve_stacks(notes, config);
    for lane in Lane::ALL {
        let lane_notes: Vec<Note> = resolved.iter().filter(|n| n.lane == lane).cloned().collect();
        let parity = reconstruct_lane(&lane_notes, store, config);
        for record in parity.generated() {
            store.insert_generated(record.clone());
        }
    }

    store.sort_by_time();
    stale
}

/// Wait for editor collaborators to appear.
///
/// # Parameters
/// - `lookup`: Returns the collaborators once they are available
/// - `initial_wait`: Total time to wait before giving up
/// - `poll_interval`: Time between lookups
/// - `sleep`: Blocks for the given duration
///
/// Like the editor's own startup, the first lookup happens after one interval.
/// Gives up with `None` once `initial_wait` has elapsed.
pub fn await_collaborators<T>(
    mut lookup: impl FnMut() -> Option<T>,
    initial_wait: Duration,
    poll_interval: Duration,
    mut sleep: impl FnMut(Duration),
) -> Option<T> {
    let mut waited = Duration::ZERO;
    while waited < initial_wait {
        sleep(poll_interval);
        waited += poll_interval;
        if let Some(found) = lookup() {
            debug!("Collaborators found after {:?}", waited);
            return Some(found);
        }
    }
    warn!("Collaborators not found within {:?}", initial_wait);
    None
}

/// [`await_collaborators`] with the configured timings, sleeping the current thread.
pub fn await_collaborators_blocking<T>(
    lookup: impl FnMut() -> Option<T>,
    config: &ParityConfig,
) -> Option<T> {
    await_collaborators(lookup, config.initial_wait, config.poll_interval, thread::sleep)
}
