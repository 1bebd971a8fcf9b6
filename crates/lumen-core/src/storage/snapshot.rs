//! Versioned JSON snapshot of the activity collection.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "saved_at": "2026-01-15T10:00:00Z",
//!   "activities": [ { "id": 1, "kind": "personal", ... } ]
//! }
//! ```
//!
//! The version tag is read before the body is decoded, so an unknown version
//! is reported as such instead of as a generic decode failure.
//!
//! # Atomic Writes
//!
//! Uses temp file + rename so a crash mid-write leaves the previous snapshot
//! intact.

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::activity::Activity;
use crate::error::StorageError;

/// Schema version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Decoded snapshot file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub activities: Vec<Activity>,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    saved_at: DateTime<Utc>,
    activities: &'a [Activity],
}

/// Read the snapshot at `path`.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn read(path: &Path) -> Result<Option<Snapshot>, StorageError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StorageError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    decode(&content).map(Some)
}

/// Decode and validate snapshot text.
pub fn decode(content: &str) -> Result<Snapshot, StorageError> {
    let raw: serde_json::Value = serde_json::from_str(content).map_err(StorageError::Decode)?;
    let found = raw.get("version").and_then(serde_json::Value::as_u64);
    let current = upgrade(raw, found)?;
    let snapshot: Snapshot = serde_json::from_value(current).map_err(StorageError::Decode)?;
    validate(&snapshot.activities)?;
    Ok(snapshot)
}

/// Bring an older document up to [`SNAPSHOT_VERSION`].
///
/// Version 1 is the first versioned format; anything else is unreadable.
fn upgrade(raw: serde_json::Value, found: Option<u64>) -> Result<serde_json::Value, StorageError> {
    match found {
        Some(v) if v == u64::from(SNAPSHOT_VERSION) => Ok(raw),
        _ => Err(StorageError::UnsupportedVersion {
            found,
            expected: SNAPSHOT_VERSION,
        }),
    }
}

/// Collection-level invariants: unique ids, in-range progress, derived status.
pub fn validate(activities: &[Activity]) -> Result<(), StorageError> {
    let mut seen = HashSet::with_capacity(activities.len());
    for activity in activities {
        if !seen.insert(activity.id()) {
            return Err(StorageError::Invalid(format!(
                "duplicate activity id {}",
                activity.id()
            )));
        }
        activity.check_invariants().map_err(StorageError::Invalid)?;
    }
    Ok(())
}

/// Serialize `activities` and atomically replace the file at `path`.
pub fn write(path: &Path, activities: &[Activity]) -> Result<(), StorageError> {
    let document = SnapshotRef {
        version: SNAPSHOT_VERSION,
        saved_at: Utc::now(),
        activities,
    };
    let content = serde_json::to_string_pretty(&document).map_err(StorageError::Encode)?;

    let write_err = |source: std::io::Error| StorageError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent_dir).map_err(write_err)?;

    let mut temp_file = NamedTempFile::new_in(parent_dir).map_err(write_err)?;
    temp_file.write_all(content.as_bytes()).map_err(write_err)?;
    temp_file.flush().map_err(write_err)?;
    temp_file.as_file().sync_all().map_err(write_err)?;
    temp_file.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
