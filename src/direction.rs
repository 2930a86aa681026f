//! # Direction Angles
//!
//! Maps cut directions to angles and provides the angle arithmetic shared by
//! the stack resolver and the parity reconstructor.
//!
//! ## Conventions
//! - Angles are in degrees, `0` pointing right and increasing counter-clockwise
//!   (up = 90, left = 180, down = 270)
//! - Every comparison works on angles normalized into `[0, 360)`
//! - A dot note looks up the same angle as a down cut (270)
//!
//! ## Example
//! ```rust
//! use parity::direction::{is_same_direction, reverse_direction};
//!
//! assert!(is_same_direction(0.0, 67.4, 67.5));
//! assert!(!is_same_direction(0.0, 67.5, 67.5));
//! assert_eq!(reverse_direction(90.0), 270.0);
//! ```

use crate::note::{CutDirection, Note};

/// Default angle per cut direction, in wire index order.
pub const DEFAULT_ANGLES: [f64; 9] = [90.0, 270.0, 180.0, 0.0, 135.0, 45.0, 225.0, 315.0, 270.0];

/// Immutable direction → angle table.
///
/// Passed explicitly to the algorithms so tests can swap in alternate tables.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionTable {
    angles: [f64; 9],
}

impl Default for DirectionTable {
    fn default() -> Self {
        Self {
            angles: DEFAULT_ANGLES,
        }
    }
}

impl DirectionTable {
    pub fn new(angles: [f64; 9]) -> Self {
        Self { angles }
    }

    pub fn angle(&self, direction: CutDirection) -> f64 {
        self.angles[direction.index()]
    }

    pub fn angles(&self) -> &[f64; 9] {
        &self.angles
    }

    /// Table angle plus the note's angle offset, normalized into `[0, 360)`.
    pub fn effective_direction(&self, note: &Note) -> f64 {
        normalize_degrees(self.angle(note.cut_direction) + note.angle_offset)
    }
}

/// True modulus into `[0, 360)`, also for negative inputs.
pub fn normalize_degrees(degrees: f64) -> f64 {
    (degrees % 360.0 + 360.0) % 360.0
}

/// Opposite direction: where the hand must come from to cut this way.
pub fn reverse_direction(direction: f64) -> f64 {
    if direction >= 180.0 {
        direction - 180.0
    } else {
        direction + 180.0
    }
}

/// Whether two swing directions are close enough to belong to one swing.
///
/// When the raw difference is at most 180 the two are the same iff the
/// difference is strictly below `tolerance`; otherwise the wrap-around
/// difference `360 - d` is compared instead.
pub fn is_same_direction(before: f64, after: f64, tolerance: f64) -> bool {
    let difference = (normalize_degrees(before) - normalize_degrees(after)).abs();
    if difference <= 180.0 {
        difference < tolerance
    } else {
        360.0 - difference < tolerance
    }
}

/// Hypothetical hand position after swinging `distance` units along `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedPosition {
    pub x: f64,
    pub y: f64,
}

impl SimulatedPosition {
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        ((self.x - x).powi(2) + (self.y - y).powi(2)).sqrt()
    }
}

pub fn simulate_swing(x: f64, y: f64, direction: f64, distance: f64) -> SimulatedPosition {
    let radians = direction.to_radians();
    SimulatedPosition {
        x: x + distance * radians.cos(),
        y: y + distance * radians.sin(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::Lane;

    const TOLERANCE: f64 = 67.5;

    #[test]
    fn test_same_direction_tolerance_boundary() {
        assert!(is_same_direction(0.0, 67.4, TOLERANCE));
        assert!(!is_same_direction(0.0, 67.5, TOLERANCE));
    }

    #[test]
    fn test_same_direction_wraps_around() {
        // difference 292.6, wrap-around difference 67.4
        assert!(is_same_direction(0.0, 292.6, TOLERANCE));
        assert!(is_same_direction(292.6, 0.0, TOLERANCE));
        // difference 292.5, wrap-around difference exactly 67.5
        assert!(!is_same_direction(0.0, 292.5, TOLERANCE));
    }

    #[test]
    fn test_same_direction_at_half_turn() {
        // difference exactly 180 takes the direct branch
        assert!(!is_same_direction(10.0, 190.0, TOLERANCE));
        assert!(is_same_direction(10.0, 190.0, 180.5));
        // difference 181 takes the wrap branch: 360 - 181 = 179
        assert!(!is_same_direction(0.0, 181.0, TOLERANCE));
        assert!(is_same_direction(0.0, 181.0, 179.5));
    }

    #[test]
    fn test_same_direction_normalizes_inputs() {
        assert!(is_same_direction(-10.0, 10.0, TOLERANCE));
        assert!(is_same_direction(720.0, 30.0, TOLERANCE));
    }

    #[test]
    fn test_reverse_direction_is_involution() {
        let mut angle = 0.0;
        while angle < 360.0 {
            assert_eq!(reverse_direction(reverse_direction(angle)), angle);
            angle += 7.5;
        }
        assert_eq!(reverse_direction(reverse_direction(359.9)), 359.9);
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(405.0), 45.0);
        let tiny = normalize_degrees(-1e-15);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_effective_direction_adds_offset() {
        let table = DirectionTable::default();
        let note = Note::new(0.0, Lane::Red, 0, 0, CutDirection::Right).with_angle_offset(-45.0);
        assert_eq!(table.effective_direction(&note), 315.0);
        let dot = Note::new(0.0, Lane::Red, 0, 0, CutDirection::Dot);
        assert_eq!(table.effective_direction(&dot), 270.0);
    }

    #[test]
    fn test_simulate_swing() {
        let pos = simulate_swing(1.0, 1.0, 90.0, 5.0);
        assert!((pos.x - 1.0).abs() < 1e-9);
        assert!((pos.y - 6.0).abs() < 1e-9);
        let pos = simulate_swing(0.0, 0.0, 180.0, 5.0);
        assert!((pos.x + 5.0).abs() < 1e-9);
        assert!(pos.y.abs() < 1e-9);
    }
}
