//! # Lumen Core Library
//!
//! Activity tracking and persistence for the Lumen app. The CLI (and any GUI
//! shell) is a thin layer over the store defined here.
//!
//! ## Architecture
//!
//! - **Activity model**: academic or personal activities whose status is
//!   derived from a progress percent, plus an append-only focus session log
//! - **Session recorder**: turns a finished timer interval into a logged
//!   session and recomputed progress, then persists it
//! - **Storage**: one versioned JSON snapshot, rewritten in full after every
//!   mutation; TOML configuration
//!
//! ## Key Components
//!
//! - [`ActivityStore`]: canonical collection, load/seed/save, upsert/delete
//! - [`IdAllocator`]: monotonic ids reconciled on load
//! - [`SessionRecorder`]: session append + progress recompute + persist
//! - [`Config`]: application configuration management

pub mod activity;
pub mod error;
pub mod ids;
pub mod query;
pub mod recorder;
pub mod storage;

pub use activity::{
    parse_due_at, parse_progress, AcademicKind, Activity, ActivityDetails, ActivityDraft,
    ActivityId, ActivityPatch, ActivityStatus, FocusSession, FocusTechnique, Priority,
    SessionSummary,
};
pub use error::{ConfigError, CoreError, Result, StorageError, ValidationError};
pub use ids::IdAllocator;
pub use query::{ActivityQuery, KindFilter, SortOrder};
pub use recorder::{FocusOutcome, SessionReceipt, SessionRecorder};
pub use storage::{
    data_dir, ActivityStore, Config, LoadOutcome, SeedReason, Snapshot, StoreOptions, Upsert,
    SNAPSHOT_VERSION,
};
