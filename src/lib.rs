pub mod config;
pub mod controller;
pub mod direction;
pub mod error;
pub mod note;
pub mod parity;
pub mod persist;
pub mod resolver;

pub use config::ParityConfig;
pub use controller::{
    rebuild_store, NoteSource, NoteVisuals, PassOutcome, RecomputeController, Request,
};
pub use direction::DirectionTable;
pub use error::*;
pub use note::{CutDirection, Lane, Note};
pub use parity::{IdentityKey, OverrideStore, ParityRecord};
pub use resolver::{resolve_order, resolve_stacks};

/// Infer the parity of every note of a map.
/// This is the main entry point for one-off analysis without an editor.
///
/// `manual` records take precedence over inference. Returns the records
/// ordered by time, one per distinct note identity.
pub fn infer_parity(
    notes: &[Note],
    manual: Vec<ParityRecord>,
    config: &ParityConfig,
) -> Vec<ParityRecord> {
    let mut notes = notes.to_vec();
    note::sort_by_time(&mut notes);

    let mut store = OverrideStore::from_manual(manual);
    rebuild_store(&mut store, &notes, config);
    store.records().to_vec()
}
