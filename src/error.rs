//! # Error Types
//!
//! Errors surfaced at the crate's boundaries: reading configuration, decoding
//! editor wire values, and loading/saving the override file.
//!
//! The inference algorithms themselves (stack resolution and parity
//! reconstruction) are total over well-formed notes and never return errors.
//!
//! ## Error Types
//! - `Io` - The override file could not be read or written
//! - `MalformedOverrides` - The override file is not a JSON array of records
//! - `EncodeError` - Manual records cannot be written (e.g. a non-finite time)
//! - `ConfigError` - Invalid YAML configuration or out-of-range values
//! - `InvalidDirection` / `InvalidLane` - Wire indices outside their enum range

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParityError {
    /// Reading or writing the override file failed.
    ///
    /// # Example
    /// ```
    /// # use parity::ParityError;
    /// let err = ParityError::Io {
    ///     path: "maps/song/parity.txt".into(),
    ///     message: "permission denied".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "I/O error on maps/song/parity.txt: permission denied");
    /// ```
    #[error("I/O error on {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    /// The override file parsed as text but not as a list of parity records.
    #[error("Malformed override file: {0}")]
    MalformedOverrides(String),

    /// Manual records could not be written as an override file.
    ///
    /// Raised before anything is written, so an existing file is left intact.
    #[error("Cannot encode overrides: {0}")]
    EncodeError(String),

    /// Invalid configuration document or value.
    ///
    /// # Example
    /// ```
    /// # use parity::ParityError;
    /// let err = ParityError::ConfigError("directions must list 9 angles".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: directions must list 9 angles");
    /// ```
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Invalid cut direction index: {0}")]
    InvalidDirection(i64),

    #[error("Invalid lane index: {0}")]
    InvalidLane(i64),
}
