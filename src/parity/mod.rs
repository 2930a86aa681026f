//! # Parity Module
//!
//! Infer whether each note is hit with a forehand or a backhand swing, and
//! keep the user's manual corrections across recomputation passes.
//!
//! ## Sub-modules
//! - `types` - ParityRecord and IdentityKey definitions
//! - `engine` - Per-lane parity reconstruction
//! - `store` - Override store holding one record per identity key
//!
//! ## Key Types
//! - [`ParityRecord`] - Parity of one note, possibly manually tagged
//! - [`IdentityKey`] - `(time, lane, x, y)`: how records are matched to notes
//! - [`OverrideStore`] - All records of the current map
//! - [`LaneParity`] - Result of reconstructing one lane
//!
//! ## Entry Point
//! [`reconstruct_lane()`] - Fold one lane's notes into parity records
//!
//! ## Example
//! ```rust
//! use parity::parity::{reconstruct_lane, OverrideStore};
//! use parity::{CutDirection, Lane, Note, ParityConfig};
//!
//! let notes = vec![
//!     Note::new(0.0, Lane::Red, 1, 0, CutDirection::Down),
//!     Note::new(1.0, Lane::Red, 1, 0, CutDirection::Up),
//! ];
//! let lane = reconstruct_lane(&notes, &OverrideStore::new(), &ParityConfig::default());
//!
//! assert!(lane.records[0].is_forehand);
//! assert!(!lane.records[1].is_forehand);
//! assert!(!lane.final_forehand);
//! ```
//!
//! ## Matching notes to records
//!
//! Notes carry no stable identifier, so a record belongs to whatever note has
//! the same time, lane and grid cell. Two notes sharing all four fields are
//! indistinguishable and share one record. The override file relies on the
//! same rule, so it cannot change without a new file format.
//!
//! Times are matched at `f32` precision: override files written by the editor
//! hold single-precision beats (`0.33333334` for a third of a beat), which
//! must still find the note whose time was parsed as `1.0 / 3.0`. Times that
//! differ only below `f32` precision therefore name the same note.

mod engine;
mod store;
mod types;

#[cfg(test)]
mod tests;

pub use engine::{reconstruct_lane, LaneParity};
pub use store::OverrideStore;
pub use types::{IdentityKey, ParityRecord};
