//! Canonical in-memory activity collection backed by a JSON snapshot.
//!
//! Opening a store runs the whole load sequence (read, or seed and save, then
//! reconcile the id allocator), so every `ActivityStore` value is ready for
//! use. Every mutation rewrites the full snapshot before returning. When that
//! write fails the collection is restored to its previous contents and the
//! error is returned, so nothing unsaved is ever visible through the store.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{seed, snapshot, Config};
use crate::activity::{
    Activity, ActivityDraft, ActivityId, ActivityPatch, ActivityStatus, FocusTechnique,
};
use crate::error::{CoreError, Result, StorageError, ValidationError};
use crate::ids::IdAllocator;
use crate::recorder::{FocusOutcome, SessionReceipt, SessionRecorder};

/// Options that shape how a store starts up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Seed sample activities when no usable snapshot exists.
    pub seed_defaults: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        StoreOptions {
            seed_defaults: true,
        }
    }
}

impl From<&Config> for StoreOptions {
    fn from(config: &Config) -> Self {
        StoreOptions {
            seed_defaults: config.storage.seed_defaults,
        }
    }
}

/// Why the persisted snapshot could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum SeedReason {
    Missing,
    Unreadable(String),
    Corrupt(String),
    UnsupportedVersion(Option<u64>),
    Invalid(String),
}

impl From<&StorageError> for SeedReason {
    fn from(err: &StorageError) -> Self {
        match err {
            StorageError::Read { source, .. } => SeedReason::Unreadable(source.to_string()),
            StorageError::Decode(e) => SeedReason::Corrupt(e.to_string()),
            StorageError::UnsupportedVersion { found, .. } => {
                SeedReason::UnsupportedVersion(*found)
            }
            StorageError::Invalid(msg) => SeedReason::Invalid(msg.clone()),
            other => SeedReason::Corrupt(other.to_string()),
        }
    }
}

/// Which startup path the store took.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoadOutcome {
    /// Snapshot read and accepted.
    Loaded { count: usize },
    /// Snapshot unusable; started from seed data (or empty).
    Seeded { reason: SeedReason, persisted: bool },
}

/// Result of an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Upsert {
    /// An activity with the same id was replaced in place.
    Replaced,
    /// No activity had this id; it was appended.
    Inserted,
}

/// Single source of truth for activities.
#[derive(Debug)]
pub struct ActivityStore {
    path: PathBuf,
    activities: Vec<Activity>,
    ids: IdAllocator,
    outcome: LoadOutcome,
}

impl ActivityStore {
    /// Open the store at `path` and run the full load sequence.
    ///
    /// Never fails: an unusable snapshot degrades to seed data.
    pub fn open(path: impl Into<PathBuf>, options: &StoreOptions) -> Self {
        let mut store = ActivityStore {
            path: path.into(),
            activities: Vec::new(),
            ids: IdAllocator::new(),
            outcome: LoadOutcome::Loaded { count: 0 },
        };
        store.outcome = store.load(options);
        store
    }

    /// Open the store at the location named by `config`.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be prepared.
    pub fn open_default(config: &Config) -> Result<Self> {
        let path = config.activities_path()?;
        Ok(Self::open(path, &StoreOptions::from(config)))
    }

    fn load(&mut self, options: &StoreOptions) -> LoadOutcome {
        let reason = match snapshot::read(&self.path) {
            Ok(Some(snapshot)) => {
                self.activities = snapshot.activities;
                self.ids.reconcile_with(&self.activities);
                info!(
                    path = %self.path.display(),
                    count = self.activities.len(),
                    next_id = %self.ids.peek(),
                    "loaded activity snapshot"
                );
                return LoadOutcome::Loaded {
                    count: self.activities.len(),
                };
            }
            Ok(None) => SeedReason::Missing,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "activity snapshot unusable");
                SeedReason::from(&err)
            }
        };

        self.activities = if options.seed_defaults {
            seed::default_activities(&mut self.ids)
        } else {
            Vec::new()
        };

        let persisted = match self.save() {
            Ok(()) => true,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to persist seed data");
                false
            }
        };
        self.ids.reconcile_with(&self.activities);
        info!(
            ?reason,
            count = self.activities.len(),
            persisted,
            "started from seed data"
        );
        LoadOutcome::Seeded { reason, persisted }
    }

    /// Startup path taken by [`ActivityStore::open`].
    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.outcome
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the snapshot with the entire collection.
    pub fn save(&self) -> Result<(), StorageError> {
        snapshot::write(&self.path, &self.activities)?;
        debug!(path = %self.path.display(), count = self.activities.len(), "saved activity snapshot");
        Ok(())
    }

    /// Save, or put `previous` back and report the failure.
    fn commit(&mut self, previous: Vec<Activity>) -> Result<()> {
        if let Err(err) = self.save() {
            warn!(error = %err, "save failed; reverting in-memory change");
            self.activities = previous;
            return Err(err.into());
        }
        Ok(())
    }

    /// Take the next id. Ids are never handed out twice, even if the
    /// activity built with one is never inserted.
    pub fn allocate_id(&mut self) -> ActivityId {
        self.ids.next()
    }

    /// Id the next allocation will return.
    pub fn peek_next_id(&self) -> ActivityId {
        self.ids.peek()
    }

    /// Append an activity whose id was allocated by the caller, then persist.
    pub fn insert(&mut self, activity: Activity) -> Result<()> {
        check_invariants(&activity)?;
        if self.position(activity.id()).is_some() {
            return Err(ValidationError::DuplicateId { id: activity.id() }.into());
        }
        let previous = self.activities.clone();
        self.ids.observe(activity.id());
        debug!(id = %activity.id(), "inserting activity");
        self.activities.push(activity);
        self.commit(previous)
    }

    /// Replace the activity with the same id, or append it if absent.
    ///
    /// Appending on an unknown id tolerates callers holding a copy of an
    /// activity deleted in the meantime; the copy is silently re-added.
    pub fn update(&mut self, activity: Activity) -> Result<Upsert> {
        check_invariants(&activity)?;
        let previous = self.activities.clone();
        let id = activity.id();
        let upsert = match self.position(id) {
            Some(index) => {
                self.activities[index] = activity;
                Upsert::Replaced
            }
            None => {
                debug!(%id, "update on unknown id, inserting");
                self.ids.observe(id);
                self.activities.push(activity);
                Upsert::Inserted
            }
        };
        self.commit(previous)?;
        Ok(upsert)
    }

    /// Remove every activity with this id. Unknown ids are a no-op (but still persist).
    pub fn delete(&mut self, id: ActivityId) -> Result<bool> {
        let previous = self.activities.clone();
        self.activities.retain(|a| a.id() != id);
        let removed = self.activities.len() != previous.len();
        debug!(%id, removed, "deleting activity");
        self.commit(previous)?;
        Ok(removed)
    }

    /// Read view of the whole collection, in insertion order.
    pub fn query_all(&self) -> &[Activity] {
        &self.activities
    }

    pub fn find_by_id(&self, id: ActivityId) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id() == id)
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    fn position(&self, id: ActivityId) -> Option<usize> {
        self.activities.iter().position(|a| a.id() == id)
    }

    fn require(&self, id: ActivityId) -> Result<Activity> {
        self.get(id).ok_or(CoreError::ActivityNotFound { id })
    }

    // Collaborator contract used by the UI and timer layers.

    /// Validate `draft`, give it a fresh id and insert it.
    pub fn create(&mut self, draft: ActivityDraft) -> Result<ActivityId> {
        draft.validate()?;
        let id = self.allocate_id();
        let activity = draft.into_activity(id)?;
        self.insert(activity)?;
        info!(%id, "created activity");
        Ok(id)
    }

    /// Owned copy of the current state of `id`.
    pub fn get(&self, id: ActivityId) -> Option<Activity> {
        self.find_by_id(id).cloned()
    }

    pub fn list_all(&self) -> Vec<Activity> {
        self.activities.clone()
    }

    /// Apply a field edit to the canonical copy and persist it.
    pub fn edit(&mut self, id: ActivityId, patch: &ActivityPatch) -> Result<Activity> {
        let mut activity = self.require(id)?;
        patch.apply_to(&mut activity)?;
        self.update(activity.clone())?;
        Ok(activity)
    }

    /// Manual progress override.
    pub fn set_progress(&mut self, id: ActivityId, progress: f64) -> Result<ActivityStatus> {
        let mut activity = self.require(id)?;
        let status = activity.set_progress(progress)?;
        self.update(activity)?;
        Ok(status)
    }

    /// Record a finished (or cut-short) focus interval against `id`.
    pub fn record_session(
        &mut self,
        id: ActivityId,
        duration_minutes: u32,
        technique: FocusTechnique,
        completed: bool,
    ) -> Result<SessionReceipt> {
        let mut activity = self.require(id)?;
        let outcome = FocusOutcome::new(duration_minutes, technique, completed);
        SessionRecorder::record(self, &mut activity, &outcome)
    }
}

/// Refuse records that would make the next load reject the whole snapshot.
fn check_invariants(activity: &Activity) -> Result<(), ValidationError> {
    activity
        .check_invariants()
        .map_err(|message| ValidationError::InvalidValue {
            field: "progress",
            message,
        })
}
