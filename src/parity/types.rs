//! Parity record type definitions

use crate::note::{Lane, Note};
use serde::{Deserialize, Serialize};

/// Identity of a note across recomputation passes.
///
/// Time is compared at single precision, the precision the editor stores
/// beats and override files in; `-0.0` and `0.0` are the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    time_bits: u32,
    pub lane: Lane,
    pub pos_x: i32,
    pub pos_y: i32,
}

impl IdentityKey {
    pub fn new(time: f64, lane: Lane, pos_x: i32, pos_y: i32) -> Self {
        // + 0.0 folds -0.0 into 0.0
        Self {
            time_bits: (time as f32 + 0.0).to_bits(),
            lane,
            pos_x,
            pos_y,
        }
    }

    pub fn time(&self) -> f64 {
        f32::from_bits(self.time_bits) as f64
    }
}

impl From<&Note> for IdentityKey {
    fn from(note: &Note) -> Self {
        IdentityKey::new(note.time, note.lane, note.pos_x, note.pos_y)
    }
}

/// Parity of a single note.
///
/// Serializes with the field names of the editor's `parity.txt` so existing
/// override files load unchanged:
///
/// ```json
/// {"JsonTime":4.5,"Color":0,"PosX":1,"PosY":0,"IsForehand":false,"ManuallyTagged":true}
/// ```
///
/// # Fields
/// - `time`, `lane`, `pos_x`, `pos_y`: Identity of the note
/// - `is_forehand`: `true` for a forehand swing, `false` for backhand
/// - `manually_tagged`: Set by the user; survives recomputation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParityRecord {
    #[serde(rename = "JsonTime", alias = "time")]
    pub time: f64,
    #[serde(rename = "Color", alias = "color")]
    pub lane: Lane,
    #[serde(rename = "PosX", alias = "posX")]
    pub pos_x: i32,
    #[serde(rename = "PosY", alias = "posY")]
    pub pos_y: i32,
    #[serde(rename = "IsForehand", alias = "isForehand")]
    pub is_forehand: bool,
    #[serde(rename = "ManuallyTagged", alias = "manuallyTagged", default)]
    pub manually_tagged: bool,
}

impl ParityRecord {
    /// A record produced by reconstruction.
    pub fn generated(note: &Note, is_forehand: bool) -> Self {
        Self {
            time: note.time,
            lane: note.lane,
            pos_x: note.pos_x,
            pos_y: note.pos_y,
            is_forehand,
            manually_tagged: false,
        }
    }

    pub fn manual(time: f64, lane: Lane, pos_x: i32, pos_y: i32, is_forehand: bool) -> Self {
        Self {
            time,
            lane,
            pos_x,
            pos_y,
            is_forehand,
            manually_tagged: true,
        }
    }

    pub fn key(&self) -> IdentityKey {
        IdentityKey::new(self.time, self.lane, self.pos_x, self.pos_y)
    }
}
