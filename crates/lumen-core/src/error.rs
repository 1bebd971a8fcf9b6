//! Core error types for lumen-core.
//!
//! Validation failures are reported synchronously and never reach disk.
//! Storage failures on read are absorbed by the store (it falls back to seed
//! data); storage failures on write are surfaced so callers can warn that a
//! change was not saved.

use std::path::PathBuf;
use thiserror::Error;

use crate::activity::ActivityId;

/// Core error type for lumen-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Input rejected before any state changed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Snapshot could not be read or written
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No activity with this id in the collection
    #[error("Activity not found: {id}")]
    ActivityNotFound { id: ActivityId },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Progress must lie in [0, 100]
    #[error("Progress {value} is outside the range 0..=100")]
    ProgressOutOfRange { value: f64 },

    /// A field required at creation or edit time is empty or absent
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },

    /// Insert with an id that is already in the collection
    #[error("Activity id {id} is already in use")]
    DuplicateId { id: ActivityId },

    /// Variant-specific field set on the other variant
    #[error("Field '{field}' does not apply to {kind} activities")]
    VariantMismatch {
        field: &'static str,
        kind: &'static str,
    },
}

/// Snapshot storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read the snapshot file
    #[error("Failed to read snapshot at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the snapshot file
    #[error("Failed to write snapshot at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the collection
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    /// File contents are not a decodable snapshot
    #[error("Failed to decode snapshot: {0}")]
    Decode(#[source] serde_json::Error),

    /// Snapshot carries a schema version this build cannot read
    #[error("Unsupported snapshot version {found:?} (expected {expected})")]
    UnsupportedVersion { found: Option<u64>, expected: u32 },

    /// Snapshot decodes but breaks a collection invariant
    #[error("Invalid snapshot: {0}")]
    Invalid(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Data directory could not be resolved or created
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
