//! Trackable activities (academic or personal) and their derived status.
//!
//! Status is never set directly: it is recomputed from the progress percent
//! on every write through [`Activity::set_progress`].
//!
//!   progress == 0        -> PENDING
//!   0 < progress < 100   -> IN_PROGRESS
//!   progress >= 100      -> COMPLETED

pub mod draft;
pub mod session;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

pub use draft::{ActivityDraft, ActivityPatch};
pub use session::{FocusSession, FocusTechnique, SessionSummary};

/// Identifier of an activity, unique for the lifetime of an installation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ActivityId(pub u64);

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ActivityId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(ActivityId)
            .map_err(|e| ValidationError::InvalidValue {
                field: "id",
                message: e.to_string(),
            })
    }
}

/// Priority of an activity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(ValidationError::InvalidValue {
                field: "priority",
                message: format!("expected high, medium or low, got '{other}'"),
            }),
        }
    }
}

/// Lifecycle status, derived from progress.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityStatus {
    Pending,
    InProgress,
    Completed,
}

impl ActivityStatus {
    /// Map a progress percent to its status.
    pub fn from_progress(progress: f64) -> Self {
        if progress >= 100.0 {
            ActivityStatus::Completed
        } else if progress > 0.0 {
            ActivityStatus::InProgress
        } else {
            ActivityStatus::Pending
        }
    }
}

impl Default for ActivityStatus {
    fn default() -> Self {
        ActivityStatus::Pending
    }
}

/// Type of academic work.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AcademicKind {
    Exam,
    Homework,
    Project,
}

impl FromStr for AcademicKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exam" => Ok(AcademicKind::Exam),
            "homework" => Ok(AcademicKind::Homework),
            "project" => Ok(AcademicKind::Project),
            other => Err(ValidationError::InvalidValue {
                field: "academic_kind",
                message: format!("expected exam, homework or project, got '{other}'"),
            }),
        }
    }
}

/// Variant payload, selected by the `kind` discriminator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ActivityDetails {
    Academic {
        subject: String,
        #[serde(rename = "academic_kind")]
        kind: AcademicKind,
    },
    Personal {
        location: String,
    },
}

impl ActivityDetails {
    pub fn label(&self) -> &'static str {
        match self {
            ActivityDetails::Academic { .. } => "Academic",
            ActivityDetails::Personal { .. } => "Personal",
        }
    }
}

/// A trackable activity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    id: ActivityId,
    name: String,
    description: String,
    due_at: Option<DateTime<Utc>>,
    priority: Priority,
    estimated_minutes: u32,
    progress: f64,
    status: ActivityStatus,
    sessions: Vec<FocusSession>,
    #[serde(flatten)]
    details: ActivityDetails,
}

impl Activity {
    /// Create a pending activity with no progress and an empty session log.
    pub fn new(
        id: ActivityId,
        name: impl Into<String>,
        description: impl Into<String>,
        due_at: Option<DateTime<Utc>>,
        priority: Priority,
        estimated_minutes: u32,
        details: ActivityDetails,
    ) -> Self {
        Activity {
            id,
            name: name.into(),
            description: description.into(),
            due_at,
            priority,
            estimated_minutes,
            progress: 0.0,
            status: ActivityStatus::Pending,
            sessions: Vec::new(),
            details,
        }
    }

    pub fn id(&self) -> ActivityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_at
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Planned effort; the denominator for session-driven progress.
    pub fn estimated_minutes(&self) -> u32 {
        self.estimated_minutes
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn status(&self) -> ActivityStatus {
        self.status
    }

    /// Session log in insertion order.
    pub fn sessions(&self) -> &[FocusSession] {
        &self.sessions
    }

    pub fn details(&self) -> &ActivityDetails {
        &self.details
    }

    pub fn kind_label(&self) -> &'static str {
        self.details.label()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_due_at(&mut self, due_at: Option<DateTime<Utc>>) {
        self.due_at = due_at;
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub fn set_estimated_minutes(&mut self, minutes: u32) {
        self.estimated_minutes = minutes;
    }

    pub fn set_subject(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        match &mut self.details {
            ActivityDetails::Academic { subject, .. } => {
                *subject = value.into();
                Ok(())
            }
            ActivityDetails::Personal { .. } => Err(ValidationError::VariantMismatch {
                field: "subject",
                kind: "Personal",
            }),
        }
    }

    pub fn set_academic_kind(&mut self, value: AcademicKind) -> Result<(), ValidationError> {
        match &mut self.details {
            ActivityDetails::Academic { kind, .. } => {
                *kind = value;
                Ok(())
            }
            ActivityDetails::Personal { .. } => Err(ValidationError::VariantMismatch {
                field: "academic_kind",
                kind: "Personal",
            }),
        }
    }

    pub fn set_location(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        match &mut self.details {
            ActivityDetails::Personal { location } => {
                *location = value.into();
                Ok(())
            }
            ActivityDetails::Academic { .. } => Err(ValidationError::VariantMismatch {
                field: "location",
                kind: "Academic",
            }),
        }
    }

    /// Set progress and recompute status.
    ///
    /// Values outside [0, 100] (and NaN) are rejected and leave the activity
    /// untouched.
    pub fn set_progress(&mut self, progress: f64) -> Result<ActivityStatus, ValidationError> {
        if !(0.0..=100.0).contains(&progress) {
            return Err(ValidationError::ProgressOutOfRange { value: progress });
        }
        self.progress = progress;
        self.status = ActivityStatus::from_progress(progress);
        Ok(self.status)
    }

    /// Append a session and return the new invested-minutes total.
    ///
    /// Progress is not touched here; see [`crate::recorder::SessionRecorder`].
    pub fn record_session(&mut self, session: FocusSession) -> u64 {
        self.sessions.push(session);
        self.invested_minutes()
    }

    /// Sum of durations over completed sessions.
    pub fn invested_minutes(&self) -> u64 {
        self.sessions.iter().map(FocusSession::counted_minutes).sum()
    }

    pub fn session_summary(&self) -> SessionSummary {
        SessionSummary::from_sessions(&self.sessions)
    }

    /// Past its due date without being finished.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match self.due_at {
            Some(due) => due < now && self.progress < 100.0,
            None => false,
        }
    }

    /// Check the per-activity invariants a decoded snapshot must satisfy.
    pub(crate) fn check_invariants(&self) -> Result<(), String> {
        if !(0.0..=100.0).contains(&self.progress) {
            return Err(format!(
                "activity {} has progress {} outside 0..=100",
                self.id, self.progress
            ));
        }
        let expected = ActivityStatus::from_progress(self.progress);
        if self.status != expected {
            return Err(format!(
                "activity {} has status {:?} but progress {} implies {:?}",
                self.id, self.status, self.progress, expected
            ));
        }
        Ok(())
    }
}

/// Parse a due date as RFC 3339 or as `dd/mm/yyyy HH:MM` (UTC).
pub fn parse_due_at(text: &str) -> Result<DateTime<Utc>, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::MissingField { field: "due_at" });
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%d/%m/%Y %H:%M")
        .map(|naive| naive.and_utc())
        .map_err(|_| ValidationError::InvalidValue {
            field: "due_at",
            message: format!("expected RFC 3339 or dd/mm/yyyy HH:MM, got '{text}'"),
        })
}

/// Parse user-entered progress, accepting a decimal comma, and range-check it.
pub fn parse_progress(text: &str) -> Result<f64, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::MissingField { field: "progress" });
    }
    let value = text
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidValue {
            field: "progress",
            message: format!("'{text}' is not a number"),
        })?;
    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::ProgressOutOfRange { value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn personal() -> Activity {
        Activity::new(
            ActivityId(1),
            "Doctor visit",
            "Checkup",
            Some(Utc.with_ymd_and_hms(2026, 1, 20, 10, 0, 0).unwrap()),
            Priority::High,
            60,
            ActivityDetails::Personal {
                location: "Clinic".into(),
            },
        )
    }

    #[test]
    fn new_activity_is_pending() {
        let a = personal();
        assert_eq!(a.progress(), 0.0);
        assert_eq!(a.status(), ActivityStatus::Pending);
        assert!(a.sessions().is_empty());
        assert_eq!(a.kind_label(), "Personal");
    }

    #[test]
    fn status_thresholds() {
        let mut a = personal();
        assert_eq!(a.set_progress(0.5), Ok(ActivityStatus::InProgress));
        assert_eq!(a.set_progress(99.99), Ok(ActivityStatus::InProgress));
        assert_eq!(a.set_progress(100.0), Ok(ActivityStatus::Completed));
        assert_eq!(a.set_progress(0.0), Ok(ActivityStatus::Pending));
    }

    #[test]
    fn out_of_range_progress_leaves_state() {
        let mut a = personal();
        a.set_progress(40.0).unwrap();
        assert!(a.set_progress(100.5).is_err());
        assert!(a.set_progress(-1.0).is_err());
        assert!(a.set_progress(f64::NAN).is_err());
        assert_eq!(a.progress(), 40.0);
        assert_eq!(a.status(), ActivityStatus::InProgress);
    }

    #[test]
    fn record_session_returns_invested_total() {
        let mut a = personal();
        let now = Utc::now();
        assert_eq!(
            a.record_session(FocusSession::new(now, 25, FocusTechnique::Pomodoro, true)),
            25
        );
        assert_eq!(
            a.record_session(FocusSession::new(now, 25, FocusTechnique::Pomodoro, false)),
            25
        );
        assert_eq!(a.sessions().len(), 2);
        // Recording alone never changes progress
        assert_eq!(a.status(), ActivityStatus::Pending);
    }

    #[test]
    fn variant_setters_reject_other_variant() {
        let mut a = personal();
        assert!(a.set_location("Home").is_ok());
        assert_eq!(
            a.set_subject("Math"),
            Err(ValidationError::VariantMismatch {
                field: "subject",
                kind: "Personal"
            })
        );
        assert!(a.set_academic_kind(AcademicKind::Exam).is_err());
    }

    #[test]
    fn overdue_requires_past_due_and_unfinished() {
        let mut a = personal();
        let due = a.due_at().unwrap();
        assert!(a.is_overdue(due + Duration::minutes(1)));
        assert!(!a.is_overdue(due - Duration::minutes(1)));
        a.set_progress(100.0).unwrap();
        assert!(!a.is_overdue(due + Duration::minutes(1)));
    }

    #[test]
    fn serializes_with_kind_discriminator() {
        let a = Activity::new(
            ActivityId(3),
            "Final exam",
            "",
            None,
            Priority::Low,
            120,
            ActivityDetails::Academic {
                subject: "Physics".into(),
                kind: AcademicKind::Exam,
            },
        );
        let value = serde_json::to_value(&a).unwrap();
        assert_eq!(value["kind"], "academic");
        assert_eq!(value["academic_kind"], "EXAM");
        assert_eq!(value["status"], "PENDING");
        assert_eq!(value["priority"], "LOW");
        let back: Activity = serde_json::from_value(value).unwrap();
        assert_eq!(back, a);
    }

    #[test]
    fn parse_due_at_accepts_both_forms() {
        let form = parse_due_at("19/01/2026 23:59").unwrap();
        assert_eq!(form, Utc.with_ymd_and_hms(2026, 1, 19, 23, 59, 0).unwrap());
        let rfc = parse_due_at("2026-01-19T23:59:00Z").unwrap();
        assert_eq!(rfc, form);
        assert!(parse_due_at("tomorrow").is_err());
        assert_eq!(
            parse_due_at("  "),
            Err(ValidationError::MissingField { field: "due_at" })
        );
    }

    #[test]
    fn parse_progress_accepts_decimal_comma() {
        assert_eq!(parse_progress("42,5"), Ok(42.5));
        assert_eq!(parse_progress("100"), Ok(100.0));
        assert!(matches!(
            parse_progress("101"),
            Err(ValidationError::ProgressOutOfRange { .. })
        ));
        assert!(parse_progress("abc").is_err());
    }

    #[test]
    fn invariant_check_flags_inconsistent_status() {
        let mut a = personal();
        a.progress = 50.0;
        assert!(a.check_invariants().is_err());
        a.status = ActivityStatus::InProgress;
        assert!(a.check_invariants().is_ok());
    }
}
