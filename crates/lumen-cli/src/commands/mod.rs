pub mod activity;
pub mod config;
pub mod session;
pub mod store;

use lumen_core::{ActivityStore, Config};

/// Open the activity store named by the configuration.
pub fn open_store(config: &Config) -> Result<ActivityStore, Box<dyn std::error::Error>> {
    Ok(ActivityStore::open_default(config)?)
}
