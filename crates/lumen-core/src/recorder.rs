//! Entry point for a finished focus interval.
//!
//! Recording appends the session, recomputes progress from invested time and
//! persists the activity. The caller only gets a receipt once the snapshot
//! write has succeeded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::activity::{Activity, ActivityId, ActivityStatus, FocusSession, FocusTechnique};
use crate::error::{Result, ValidationError};
use crate::storage::{ActivityStore, Upsert};

/// What the timer reports when an interval ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusOutcome {
    pub duration_minutes: u32,
    pub technique: FocusTechnique,
    /// False when the interval was stopped early.
    pub completed: bool,
    pub occurred_at: DateTime<Utc>,
}

impl FocusOutcome {
    pub fn new(duration_minutes: u32, technique: FocusTechnique, completed: bool) -> Self {
        FocusOutcome {
            duration_minutes,
            technique,
            completed,
            occurred_at: Utc::now(),
        }
    }

    pub fn at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = occurred_at;
        self
    }
}

/// State of the activity after a recorded session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReceipt {
    pub activity_id: ActivityId,
    pub invested_minutes: u64,
    pub progress: f64,
    pub status: ActivityStatus,
    pub upsert: Upsert,
}

pub struct SessionRecorder;

impl SessionRecorder {
    /// Append the session to `activity` and recompute its progress.
    ///
    /// With a zero estimate progress is left as it was. Returns the new
    /// invested-minutes total.
    pub fn apply(activity: &mut Activity, outcome: &FocusOutcome) -> Result<u64, ValidationError> {
        if outcome.duration_minutes == 0 {
            return Err(ValidationError::InvalidValue {
                field: "duration_minutes",
                message: "a session must last at least one minute".into(),
            });
        }

        let invested = activity.record_session(FocusSession::new(
            outcome.occurred_at,
            outcome.duration_minutes,
            outcome.technique,
            outcome.completed,
        ));

        let estimated = activity.estimated_minutes();
        if estimated > 0 {
            let progress = (invested as f64 / f64::from(estimated) * 100.0).min(100.0);
            activity.set_progress(progress)?;
        }
        Ok(invested)
    }

    /// Apply `outcome` to `activity` and upsert it into `store`.
    ///
    /// `activity` may be a copy held by the timer; the store ends up with
    /// exactly this state, re-adding it if it was deleted meanwhile.
    /// `activity` only changes once the snapshot write has succeeded.
    pub fn record(
        store: &mut ActivityStore,
        activity: &mut Activity,
        outcome: &FocusOutcome,
    ) -> Result<SessionReceipt> {
        let mut updated = activity.clone();
        let invested = Self::apply(&mut updated, outcome)?;
        let upsert = store.update(updated.clone())?;
        *activity = updated;
        info!(
            id = %activity.id(),
            minutes = outcome.duration_minutes,
            technique = %outcome.technique,
            completed = outcome.completed,
            progress = activity.progress(),
            "recorded focus session"
        );
        Ok(SessionReceipt {
            activity_id: activity.id(),
            invested_minutes: invested,
            progress: activity.progress(),
            status: activity.status(),
            upsert,
        })
    }
}
