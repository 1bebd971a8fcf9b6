//! Field sets collected by the UI layer for creating and editing activities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AcademicKind, Activity, ActivityDetails, ActivityId, Priority};
use crate::error::ValidationError;

/// Fields for a new activity, before an id has been allocated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub due_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    pub estimated_minutes: u32,
    #[serde(flatten)]
    pub details: ActivityDetails,
}

impl ActivityDraft {
    pub fn academic(
        name: impl Into<String>,
        subject: impl Into<String>,
        kind: AcademicKind,
    ) -> Self {
        ActivityDraft {
            name: name.into(),
            description: String::new(),
            due_at: None,
            priority: Priority::default(),
            estimated_minutes: 0,
            details: ActivityDetails::Academic {
                subject: subject.into(),
                kind,
            },
        }
    }

    pub fn personal(name: impl Into<String>, location: impl Into<String>) -> Self {
        ActivityDraft {
            name: name.into(),
            description: String::new(),
            due_at: None,
            priority: Priority::default(),
            estimated_minutes: 0,
            details: ActivityDetails::Personal {
                location: location.into(),
            },
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn estimated_minutes(mut self, minutes: u32) -> Self {
        self.estimated_minutes = minutes;
        self
    }

    /// Required: a non-blank name, a due date and the variant's text field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "name" });
        }
        if self.due_at.is_none() {
            return Err(ValidationError::MissingField { field: "due_at" });
        }
        match &self.details {
            ActivityDetails::Academic { subject, .. } if subject.trim().is_empty() => {
                Err(ValidationError::MissingField { field: "subject" })
            }
            ActivityDetails::Personal { location } if location.trim().is_empty() => {
                Err(ValidationError::MissingField { field: "location" })
            }
            _ => Ok(()),
        }
    }

    /// Validate and build a fresh activity under `id`.
    pub fn into_activity(self, id: ActivityId) -> Result<Activity, ValidationError> {
        self.validate()?;
        let details = match self.details {
            ActivityDetails::Academic { subject, kind } => ActivityDetails::Academic {
                subject: subject.trim().to_string(),
                kind,
            },
            ActivityDetails::Personal { location } => ActivityDetails::Personal {
                location: location.trim().to_string(),
            },
        };
        Ok(Activity::new(
            id,
            self.name.trim(),
            self.description.trim(),
            self.due_at,
            self.priority,
            self.estimated_minutes,
            details,
        ))
    }
}

/// User-initiated edit. Unset fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub due_at: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
    pub estimated_minutes: Option<u32>,
    pub subject: Option<String>,
    pub academic_kind: Option<AcademicKind>,
    pub location: Option<String>,
}

impl ActivityPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.due_at.is_none()
            && self.priority.is_none()
            && self.estimated_minutes.is_none()
            && self.subject.is_none()
            && self.academic_kind.is_none()
            && self.location.is_none()
    }

    /// Apply every field, or none of them if any is invalid.
    pub fn apply_to(&self, activity: &mut Activity) -> Result<(), ValidationError> {
        self.check(activity)?;

        if let Some(name) = &self.name {
            activity.set_name(name.trim());
        }
        if let Some(description) = &self.description {
            activity.set_description(description.trim());
        }
        if let Some(due_at) = self.due_at {
            activity.set_due_at(Some(due_at));
        }
        if let Some(priority) = self.priority {
            activity.set_priority(priority);
        }
        if let Some(minutes) = self.estimated_minutes {
            activity.set_estimated_minutes(minutes);
        }
        if let Some(subject) = &self.subject {
            activity.set_subject(subject.trim())?;
        }
        if let Some(kind) = self.academic_kind {
            activity.set_academic_kind(kind)?;
        }
        if let Some(location) = &self.location {
            activity.set_location(location.trim())?;
        }
        Ok(())
    }

    fn check(&self, activity: &Activity) -> Result<(), ValidationError> {
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(ValidationError::MissingField { field: "name" });
        }
        let is_academic = matches!(activity.details(), ActivityDetails::Academic { .. });
        if is_academic {
            if self.location.is_some() {
                return Err(ValidationError::VariantMismatch {
                    field: "location",
                    kind: "Academic",
                });
            }
            if matches!(&self.subject, Some(s) if s.trim().is_empty()) {
                return Err(ValidationError::MissingField { field: "subject" });
            }
        } else {
            if self.subject.is_some() {
                return Err(ValidationError::VariantMismatch {
                    field: "subject",
                    kind: "Personal",
                });
            }
            if self.academic_kind.is_some() {
                return Err(ValidationError::VariantMismatch {
                    field: "academic_kind",
                    kind: "Personal",
                });
            }
            if matches!(&self.location, Some(l) if l.trim().is_empty()) {
                return Err(ValidationError::MissingField { field: "location" });
            }
        }
        Ok(())
    }
}
