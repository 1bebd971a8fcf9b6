use clap::Subcommand;
use lumen_core::{Config, SNAPSHOT_VERSION};
use serde_json::json;

use super::open_store;

#[derive(Subcommand)]
pub enum StoreAction {
    /// Show snapshot location, load outcome and next id
    Info,
    /// Rewrite the snapshot from the current collection
    Save,
}

pub fn run(action: StoreAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config)?;

    match action {
        StoreAction::Info => {
            let out = json!({
                "path": store.path(),
                "version": SNAPSHOT_VERSION,
                "load": store.load_outcome(),
                "activities": store.len(),
                "next_id": store.peek_next_id(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        StoreAction::Save => {
            store.save()?;
            let out = json!({ "path": store.path(), "saved": store.len() });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}
