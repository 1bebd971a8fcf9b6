//! Activity management commands for CLI.

use chrono::Utc;
use clap::Subcommand;
use lumen_core::{
    parse_due_at, parse_progress, AcademicKind, ActivityDraft, ActivityId, ActivityPatch,
    ActivityQuery, Config, CoreError, KindFilter, Priority, SortOrder,
};
use serde_json::json;

use super::open_store;

#[derive(Subcommand)]
pub enum ActivityAction {
    /// Create a new activity
    Create {
        /// Activity name
        name: String,
        /// Activity kind: academic or personal
        #[arg(long)]
        kind: String,
        /// Activity description
        #[arg(long, default_value = "")]
        description: String,
        /// Due date: "dd/mm/yyyy HH:MM" or RFC 3339
        #[arg(long)]
        due: String,
        /// Priority: high, medium or low
        #[arg(long, default_value = "medium")]
        priority: String,
        /// Estimated minutes of focused work
        #[arg(long, default_value_t = 0)]
        estimate: u32,
        /// Subject (academic)
        #[arg(long)]
        subject: Option<String>,
        /// Academic kind: exam, homework or project
        #[arg(long, default_value = "homework")]
        academic_kind: String,
        /// Location (personal)
        #[arg(long)]
        location: Option<String>,
    },
    /// List activities
    List {
        /// Filter by kind: all, academic or personal
        #[arg(long, default_value = "all")]
        kind: String,
        /// Sort: insertion, name, due or progress
        #[arg(long, default_value = "insertion")]
        sort: String,
        /// Hide unfinished activities past their due date
        #[arg(long)]
        hide_overdue: bool,
    },
    /// Get activity details
    Get {
        /// Activity ID
        id: u64,
    },
    /// Edit activity fields
    Edit {
        /// Activity ID
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        estimate: Option<u32>,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        academic_kind: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
    /// Set progress manually (0-100, decimal comma accepted)
    Progress {
        /// Activity ID
        id: u64,
        /// New progress percent
        value: String,
    },
    /// Delete an activity
    Delete {
        /// Activity ID
        id: u64,
    },
}

pub fn run(action: ActivityAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(config)?;

    match action {
        ActivityAction::Create {
            name,
            kind,
            description,
            due,
            priority,
            estimate,
            subject,
            academic_kind,
            location,
        } => {
            let draft = match kind.trim().to_ascii_lowercase().as_str() {
                "academic" => ActivityDraft::academic(
                    name,
                    subject.unwrap_or_default(),
                    academic_kind.parse::<AcademicKind>()?,
                ),
                "personal" => ActivityDraft::personal(name, location.unwrap_or_default()),
                other => return Err(format!("unknown activity kind: {other}").into()),
            };
            let draft = draft
                .description(description)
                .due_at(parse_due_at(&due)?)
                .priority(priority.parse::<Priority>()?)
                .estimated_minutes(estimate);

            let id = store.create(draft)?;
            let activity = store.get(id).ok_or(CoreError::ActivityNotFound { id })?;
            let out = json!({ "id": id, "activity": activity });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        ActivityAction::List {
            kind,
            sort,
            hide_overdue,
        } => {
            let query = ActivityQuery {
                kind: kind.parse::<KindFilter>()?,
                hide_overdue,
                sort: sort.parse::<SortOrder>()?,
            };
            let selected = query.apply(store.query_all(), Utc::now());
            println!("{}", serde_json::to_string_pretty(&selected)?);
        }
        ActivityAction::Get { id } => {
            let id = ActivityId(id);
            let activity = store.get(id).ok_or(CoreError::ActivityNotFound { id })?;
            let out = json!({
                "activity": activity,
                "kind_label": activity.kind_label(),
                "invested_minutes": activity.invested_minutes(),
                "overdue": activity.is_overdue(Utc::now()),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        ActivityAction::Edit {
            id,
            name,
            description,
            due,
            priority,
            estimate,
            subject,
            academic_kind,
            location,
        } => {
            let patch = ActivityPatch {
                name,
                description,
                due_at: due.as_deref().map(parse_due_at).transpose()?,
                priority: priority.as_deref().map(str::parse::<Priority>).transpose()?,
                estimated_minutes: estimate,
                subject,
                academic_kind: academic_kind
                    .as_deref()
                    .map(str::parse::<AcademicKind>)
                    .transpose()?,
                location,
            };
            if patch.is_empty() {
                return Err("nothing to edit".into());
            }
            let activity = store.edit(ActivityId(id), &patch)?;
            println!("{}", serde_json::to_string_pretty(&activity)?);
        }
        ActivityAction::Progress { id, value } => {
            let progress = parse_progress(&value)?;
            let status = store.set_progress(ActivityId(id), progress)?;
            let out = json!({ "id": id, "progress": progress, "status": status });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        ActivityAction::Delete { id } => {
            let deleted = store.delete(ActivityId(id))?;
            let out = json!({ "id": id, "deleted": deleted });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}
