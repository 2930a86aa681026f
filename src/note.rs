//! # Note Model
//!
//! The note events the inference engine reads. Notes come from the level
//! editor already time-ordered; the engine never mutates a note, it only
//! reorders sequences of them and annotates them with parity records.
//!
//! ## Wire indices
//! The editor stores lanes and cut directions as small integers:
//! - Lane: `0` = red (left hand), `1` = blue (right hand)
//! - Cut direction: `0..=7` for the eight compass directions, `8` for a dot
//!
//! `TryFrom<i64>` converts those indices into the typed enums and rejects
//! anything out of range.

use crate::error::ParityError;
use serde::{Deserialize, Serialize};

/// Note color. Each lane is played by one hand and reconstructed independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Lane {
    Red,
    Blue,
}

impl Lane {
    pub const ALL: [Lane; 2] = [Lane::Red, Lane::Blue];

    pub fn index(self) -> i64 {
        match self {
            Lane::Red => 0,
            Lane::Blue => 1,
        }
    }
}

impl TryFrom<i64> for Lane {
    type Error = ParityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Lane::Red),
            1 => Ok(Lane::Blue),
            other => Err(ParityError::InvalidLane(other)),
        }
    }
}

impl From<Lane> for i64 {
    fn from(lane: Lane) -> Self {
        lane.index()
    }
}

/// Cut direction of a note, in the editor's index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum CutDirection {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
    /// No direction: the note can be cut any way.
    Dot,
}

impl CutDirection {
    pub const ALL: [CutDirection; 9] = [
        CutDirection::Up,
        CutDirection::Down,
        CutDirection::Left,
        CutDirection::Right,
        CutDirection::UpLeft,
        CutDirection::UpRight,
        CutDirection::DownLeft,
        CutDirection::DownRight,
        CutDirection::Dot,
    ];

    pub fn index(self) -> usize {
        match self {
            CutDirection::Up => 0,
            CutDirection::Down => 1,
            CutDirection::Left => 2,
            CutDirection::Right => 3,
            CutDirection::UpLeft => 4,
            CutDirection::UpRight => 5,
            CutDirection::DownLeft => 6,
            CutDirection::DownRight => 7,
            CutDirection::Dot => 8,
        }
    }

    pub fn is_dot(self) -> bool {
        self == CutDirection::Dot
    }
}

impl TryFrom<i64> for CutDirection {
    type Error = ParityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|i| CutDirection::ALL.get(i).copied())
            .ok_or(ParityError::InvalidDirection(value))
    }
}

impl From<CutDirection> for i64 {
    fn from(direction: CutDirection) -> Self {
        direction.index() as i64
    }
}

/// A single note event.
///
/// # Fields
/// - `time`: Position in beats
/// - `lane`: Which hand plays it
/// - `pos_x`, `pos_y`: Grid cell (column, row)
/// - `cut_direction`: Required cut direction, or `Dot`
/// - `angle_offset`: Extra rotation in degrees added to the table angle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub time: f64,
    pub lane: Lane,
    pub pos_x: i32,
    pub pos_y: i32,
    pub cut_direction: CutDirection,
    #[serde(default)]
    pub angle_offset: f64,
}

impl Note {
    pub fn new(time: f64, lane: Lane, pos_x: i32, pos_y: i32, cut_direction: CutDirection) -> Self {
        Self {
            time,
            lane,
            pos_x,
            pos_y,
            cut_direction,
            angle_offset: 0.0,
        }
    }

    pub fn with_angle_offset(mut self, angle_offset: f64) -> Self {
        self.angle_offset = angle_offset;
        self
    }

    pub fn is_dot(&self) -> bool {
        self.cut_direction.is_dot()
    }
}

/// Orders notes by time, keeping the relative order of equal timestamps.
pub fn sort_by_time(notes: &mut [Note]) {
    notes.sort_by(|a, b| a.time.total_cmp(&b.time));
}
