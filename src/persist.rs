//! # Override File
//!
//! Reads and writes the manually tagged records of a map as `parity.txt` in
//! the map's folder: a flat JSON array of [`ParityRecord`]s.
//!
//! Only manual records are ever written, and every record read back is
//! treated as manual. A file that cannot be read or parsed is discarded as a
//! whole; a half-trusted override set is never returned.
//!
//! ## Example
//! ```rust
//! use parity::persist::{decode_overrides, encode_overrides};
//! use parity::{Lane, ParityRecord};
//!
//! let records = vec![ParityRecord::manual(4.5, Lane::Red, 1, 0, false)];
//! let json = encode_overrides(records.iter()).unwrap();
//! assert!(json.contains("\"JsonTime\":4.5"));
//! assert_eq!(decode_overrides(&json).unwrap(), records);
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::error::ParityError;
use crate::parity::{OverrideStore, ParityRecord};

/// Name of the override file inside a map folder.
pub const PARITY_FILE_NAME: &str = "parity.txt";

pub fn override_path(folder: &Path) -> PathBuf {
    folder.join(PARITY_FILE_NAME)
}

/// Serialize records to the override file's JSON shape.
///
/// JSON has no representation for NaN or infinity, so a record with a
/// non-finite time is rejected instead of being written as `null`.
pub fn encode_overrides<'a>(
    records: impl Iterator<Item = &'a ParityRecord>,
) -> Result<String, ParityError> {
    let records: Vec<&ParityRecord> = records.collect();
    if let Some(bad) = records.iter().find(|r| !r.time.is_finite()) {
        return Err(ParityError::EncodeError(format!(
            "record at lane {} ({}, {}) has non-finite time {}",
            bad.lane.index(),
            bad.pos_x,
            bad.pos_y,
            bad.time
        )));
    }
    serde_json::to_string(&records).map_err(|e| ParityError::EncodeError(e.to_string()))
}

/// Parse the override file's JSON. Every returned record is manual.
///
/// A JSON `null` document reads as an empty list.
pub fn decode_overrides(content: &str) -> Result<Vec<ParityRecord>, ParityError> {
    let records: Option<Vec<ParityRecord>> = serde_json::from_str(content)
        .map_err(|e| ParityError::MalformedOverrides(e.to_string()))?;
    Ok(records
        .unwrap_or_default()
        .into_iter()
        .map(|mut r| {
            r.manually_tagged = true;
            r
        })
        .collect())
}

/// Storage for a map's manual records.
pub trait OverridePersistence {
    /// Load the records at `path`. `Ok(None)` when there is no file.
    fn load(&self, path: &Path) -> Result<Option<Vec<ParityRecord>>, ParityError>;

    fn save(&self, path: &Path, records: &[ParityRecord]) -> Result<(), ParityError>;
}

/// [`OverridePersistence`] on the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFilePersistence;

impl OverridePersistence for JsonFilePersistence {
    fn load(&self, path: &Path) -> Result<Option<Vec<ParityRecord>>, ParityError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ParityError::Io {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };
        decode_overrides(&content).map(Some)
    }

    fn save(&self, path: &Path, records: &[ParityRecord]) -> Result<(), ParityError> {
        let json = encode_overrides(records.iter())?;
        fs::write(path, json).map_err(|e| ParityError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Load a map's manual records, falling back to an empty set on any failure.
pub fn load_or_empty(persistence: &impl OverridePersistence, folder: &Path) -> Vec<ParityRecord> {
    let path = override_path(folder);
    match persistence.load(&path) {
        Ok(Some(records)) => {
            info!("Loaded {} parity overrides from {}", records.len(), path.display());
            records
        }
        Ok(None) => Vec::new(),
        Err(e) => {
            error!("Failed to load parity data: {}", e);
            Vec::new()
        }
    }
}

/// Write the store's manual records. Failures are logged; the store is
/// never modified.
pub fn save_manual(
    persistence: &impl OverridePersistence,
    folder: &Path,
    store: &OverrideStore,
) -> Result<(), ParityError> {
    let path = override_path(folder);
    let manual: Vec<ParityRecord> = store.manual_records().cloned().collect();
    persistence.save(&path, &manual).map_err(|e| {
        error!("Failed to save parity: {}", e);
        e
    })
}
