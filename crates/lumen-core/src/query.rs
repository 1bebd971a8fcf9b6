//! Filtering and ordering over the store's read view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::activity::{Activity, ActivityDetails};
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KindFilter {
    #[default]
    All,
    Academic,
    Personal,
}

impl KindFilter {
    fn matches(&self, activity: &Activity) -> bool {
        match (self, activity.details()) {
            (KindFilter::All, _) => true,
            (KindFilter::Academic, ActivityDetails::Academic { .. }) => true,
            (KindFilter::Personal, ActivityDetails::Personal { .. }) => true,
            _ => false,
        }
    }
}

impl FromStr for KindFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(KindFilter::All),
            "academic" => Ok(KindFilter::Academic),
            "personal" => Ok(KindFilter::Personal),
            other => Err(ValidationError::InvalidValue {
                field: "kind",
                message: format!("expected all, academic or personal, got '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Collection order.
    #[default]
    Insertion,
    Name,
    /// Earliest due first; undated last.
    DueDate,
    /// Most advanced first.
    ProgressDesc,
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "insertion" | "none" => Ok(SortOrder::Insertion),
            "name" => Ok(SortOrder::Name),
            "due" | "due-date" | "due_date" => Ok(SortOrder::DueDate),
            "progress" => Ok(SortOrder::ProgressDesc),
            other => Err(ValidationError::InvalidValue {
                field: "sort",
                message: format!("expected insertion, name, due or progress, got '{other}'"),
            }),
        }
    }
}

/// List-screen query.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityQuery {
    pub kind: KindFilter,
    /// Drop activities past due that are not complete.
    pub hide_overdue: bool,
    pub sort: SortOrder,
}

impl ActivityQuery {
    pub fn apply<'a>(&self, activities: &'a [Activity], now: DateTime<Utc>) -> Vec<&'a Activity> {
        let mut selected: Vec<&Activity> = activities
            .iter()
            .filter(|a| self.kind.matches(a))
            .filter(|a| !(self.hide_overdue && a.is_overdue(now)))
            .collect();

        match self.sort {
            SortOrder::Insertion => {}
            SortOrder::Name => selected.sort_by(|a, b| a.name().cmp(b.name())),
            SortOrder::DueDate => selected.sort_by(|a, b| match (a.due_at(), b.due_at()) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }),
            SortOrder::ProgressDesc => selected.sort_by(|a, b| b.progress().total_cmp(&a.progress())),
        }
        selected
    }
}
