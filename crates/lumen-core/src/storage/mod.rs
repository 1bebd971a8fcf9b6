mod config;
pub mod activity_store;
pub mod seed;
pub mod snapshot;

pub use activity_store::{ActivityStore, LoadOutcome, SeedReason, StoreOptions, Upsert};
pub use config::{Config, LoggingConfig, StorageConfig};
pub use snapshot::{Snapshot, SNAPSHOT_VERSION};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it if needed.
///
/// `LUMEN_DATA_DIR` overrides everything. Otherwise `~/.config/lumen[-dev]/`,
/// with the `-dev` suffix when `LUMEN_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("LUMEN_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("LUMEN_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("lumen-dev")
            } else {
                base_dir.join("lumen")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
