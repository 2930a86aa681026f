//! # Configuration
//!
//! Tuning constants for stack resolution, parity reconstruction and the
//! recompute cooldown.
//!
//! A configuration can be written as a small YAML document; every key is
//! optional and falls back to the default listed below.
//!
//! ```yaml
//! same-direction-tolerance: 67.5   # degrees
//! continuous-swing-gap: 0.125      # beats
//! intervening-swing-gap: 0.25      # beats
//! travel-distance: 5               # grid units
//! recompute-cooldown: 0.25         # seconds
//! initial-wait: 30                 # seconds
//! poll-interval: 1                 # seconds
//! directions: [90, 270, 180, 0, 135, 45, 225, 315, 270]
//! ```
//!
//! ## Example
//! ```rust
//! use parity::ParityConfig;
//!
//! let config = ParityConfig::from_yaml("same-direction-tolerance: 45").unwrap();
//! assert_eq!(config.same_direction_tolerance, 45.0);
//! assert_eq!(config.continuous_swing_gap, 0.125);
//! ```

use crate::direction::DirectionTable;
use crate::error::ParityError;
use serde::Deserialize;
use std::time::Duration;

/// Engine configuration.
///
/// # Fields
/// - `same_direction_tolerance`: Max angle (degrees, exclusive) between two swings treated as one
/// - `continuous_swing_gap`: Max gap (beats, inclusive) for two notes to share a swing
/// - `intervening_swing_gap`: Min gap (beats) that implies a full swing in between when
///   looking ahead from a dot-only stack
/// - `travel_distance`: Distance of the simulated swing into a stack
/// - `recompute_cooldown`: Min time between rate-limited recomputes
/// - `initial_wait` / `poll_interval`: Bounded wait for editor collaborators
/// - `directions`: Cut direction → angle table
#[derive(Debug, Clone, PartialEq)]
pub struct ParityConfig {
    pub same_direction_tolerance: f64,
    pub continuous_swing_gap: f64,
    pub intervening_swing_gap: f64,
    pub travel_distance: f64,
    pub recompute_cooldown: f64,
    pub initial_wait: Duration,
    pub poll_interval: Duration,
    pub directions: DirectionTable,
}

impl Default for ParityConfig {
    fn default() -> Self {
        Self {
            same_direction_tolerance: 67.5,
            continuous_swing_gap: 0.125,
            intervening_swing_gap: 0.25,
            travel_distance: 5.0,
            recompute_cooldown: 0.25,
            initial_wait: Duration::from_secs(30),
            poll_interval: Duration::from_secs(1),
            directions: DirectionTable::default(),
        }
    }
}

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawConfig {
    same_direction_tolerance: Option<f64>,
    continuous_swing_gap: Option<f64>,
    intervening_swing_gap: Option<f64>,
    travel_distance: Option<f64>,
    recompute_cooldown: Option<f64>,
    initial_wait: Option<f64>,
    poll_interval: Option<f64>,
    directions: Option<Vec<f64>>,
}

impl ParityConfig {
    /// Parse a YAML configuration document. An empty document yields the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, ParityError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| ParityError::ConfigError(e.to_string()))?;

        let defaults = Self::default();

        let same_direction_tolerance = raw
            .same_direction_tolerance
            .unwrap_or(defaults.same_direction_tolerance);
        if !(same_direction_tolerance > 0.0 && same_direction_tolerance <= 180.0) {
            return Err(ParityError::ConfigError(format!(
                "same-direction-tolerance must be in (0, 180], got {}",
                same_direction_tolerance
            )));
        }

        let continuous_swing_gap = non_negative(
            "continuous-swing-gap",
            raw.continuous_swing_gap.unwrap_or(defaults.continuous_swing_gap),
        )?;
        let intervening_swing_gap = non_negative(
            "intervening-swing-gap",
            raw.intervening_swing_gap.unwrap_or(defaults.intervening_swing_gap),
        )?;
        let travel_distance = non_negative(
            "travel-distance",
            raw.travel_distance.unwrap_or(defaults.travel_distance),
        )?;
        let recompute_cooldown = non_negative(
            "recompute-cooldown",
            raw.recompute_cooldown.unwrap_or(defaults.recompute_cooldown),
        )?;

        let initial_wait = match raw.initial_wait {
            Some(secs) => Duration::from_secs_f64(non_negative("initial-wait", secs)?),
            None => defaults.initial_wait,
        };

        let poll_interval = match raw.poll_interval {
            Some(secs) => {
                let secs = non_negative("poll-interval", secs)?;
                if secs == 0.0 {
                    return Err(ParityError::ConfigError(
                        "poll-interval must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs_f64(secs)
            }
            None => defaults.poll_interval,
        };

        let directions = match raw.directions {
            Some(angles) => {
                let angles: [f64; 9] = angles.as_slice().try_into().map_err(|_| {
                    ParityError::ConfigError(format!(
                        "directions must list 9 angles, got {}",
                        angles.len()
                    ))
                })?;
                if let Some(bad) = angles.iter().find(|a| !a.is_finite()) {
                    return Err(ParityError::ConfigError(format!(
                        "direction angle must be finite, got {}",
                        bad
                    )));
                }
                DirectionTable::new(angles)
            }
            None => defaults.directions,
        };

        Ok(Self {
            same_direction_tolerance,
            continuous_swing_gap,
            intervening_swing_gap,
            travel_distance,
            recompute_cooldown,
            initial_wait,
            poll_interval,
            directions,
        })
    }
}

fn non_negative(key: &str, value: f64) -> Result<f64, ParityError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ParityError::ConfigError(format!(
            "{} must be a non-negative number, got {}",
            key, value
        )))
    }
}
