//! Focus session commands for CLI.

use clap::Subcommand;
use lumen_core::{ActivityId, Config, CoreError, FocusTechnique};
use serde_json::json;

use super::open_store;

#[derive(Subcommand)]
pub enum SessionAction {
    /// Record a finished focus interval against an activity
    Record {
        /// Activity ID
        id: u64,
        /// Interval length in minutes (defaults to the technique's first preset)
        #[arg(long)]
        minutes: Option<u32>,
        /// Technique: pomodoro or deep-work
        #[arg(long, default_value = "pomodoro")]
        technique: String,
        /// The interval was stopped early; it is logged but not counted
        #[arg(long)]
        interrupted: bool,
    },
    /// Show the session log of an activity
    List {
        /// Activity ID
        id: u64,
    },
}

pub fn run(action: SessionAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(config)?;

    match action {
        SessionAction::Record {
            id,
            minutes,
            technique,
            interrupted,
        } => {
            let technique = technique.parse::<FocusTechnique>()?;
            let minutes = minutes.unwrap_or_else(|| technique.default_minutes());
            let receipt = store.record_session(ActivityId(id), minutes, technique, !interrupted)?;
            println!("{}", serde_json::to_string_pretty(&receipt)?);
        }
        SessionAction::List { id } => {
            let id = ActivityId(id);
            let activity = store
                .find_by_id(id)
                .ok_or(CoreError::ActivityNotFound { id })?;
            let out = json!({
                "id": id,
                "sessions": activity.sessions(),
                "summary": activity.session_summary(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}
