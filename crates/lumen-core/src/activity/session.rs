//! Focus session log entries.
//!
//! A session is created once, when a timed interval ends, and is never edited
//! afterwards. Only sessions that ran to completion count toward invested time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Focus technique used for a session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FocusTechnique {
    /// Short fixed intervals
    Pomodoro,
    /// Long uninterrupted blocks
    DeepWork,
}

impl FocusTechnique {
    /// Interval lengths (minutes) offered by the timer for this technique.
    pub fn preset_minutes(&self) -> &'static [u32] {
        match self {
            FocusTechnique::Pomodoro => &[25, 5, 15],
            FocusTechnique::DeepWork => &[45, 60, 90],
        }
    }

    /// First preset, used when no explicit length is given.
    pub fn default_minutes(&self) -> u32 {
        self.preset_minutes()[0]
    }
}

impl Default for FocusTechnique {
    fn default() -> Self {
        FocusTechnique::Pomodoro
    }
}

impl fmt::Display for FocusTechnique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FocusTechnique::Pomodoro => write!(f, "pomodoro"),
            FocusTechnique::DeepWork => write!(f, "deep-work"),
        }
    }
}

impl FromStr for FocusTechnique {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "pomodoro" => Ok(FocusTechnique::Pomodoro),
            "deep-work" | "deepwork" => Ok(FocusTechnique::DeepWork),
            other => Err(ValidationError::InvalidValue {
                field: "technique",
                message: format!("expected pomodoro or deep-work, got '{other}'"),
            }),
        }
    }
}

/// One focus interval logged against an activity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FocusSession {
    occurred_at: DateTime<Utc>,
    duration_minutes: u32,
    technique: FocusTechnique,
    completed: bool,
}

impl FocusSession {
    pub fn new(
        occurred_at: DateTime<Utc>,
        duration_minutes: u32,
        technique: FocusTechnique,
        completed: bool,
    ) -> Self {
        FocusSession {
            occurred_at,
            duration_minutes,
            technique,
            completed,
        }
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn technique(&self) -> FocusTechnique {
        self.technique
    }

    /// Whether the interval ran to completion rather than being cut short.
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Minutes this session contributes to invested time.
    pub fn counted_minutes(&self) -> u64 {
        if self.completed {
            u64::from(self.duration_minutes)
        } else {
            0
        }
    }
}

impl fmt::Display for FocusSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} min) - {}",
            self.technique,
            self.duration_minutes,
            if self.completed { "ok" } else { "interrupted" }
        )
    }
}

/// Aggregate view over a session log.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSummary {
    pub total_sessions: usize,
    pub completed_sessions: usize,
    pub interrupted_sessions: usize,
    pub invested_minutes: u64,
    pub pomodoro_minutes: u64,
    pub deep_work_minutes: u64,
}

impl SessionSummary {
    pub fn from_sessions(sessions: &[FocusSession]) -> Self {
        let mut summary = SessionSummary::default();
        for session in sessions {
            summary.total_sessions += 1;
            if session.completed() {
                summary.completed_sessions += 1;
            } else {
                summary.interrupted_sessions += 1;
            }
            let minutes = session.counted_minutes();
            summary.invested_minutes += minutes;
            match session.technique() {
                FocusTechnique::Pomodoro => summary.pomodoro_minutes += minutes,
                FocusTechnique::DeepWork => summary.deep_work_minutes += minutes,
            }
        }
        summary
    }
}
