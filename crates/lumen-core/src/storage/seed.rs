//! Sample activities used on first run or when the snapshot is unusable.

use chrono::{TimeZone, Utc};
use tracing::warn;

use crate::activity::{
    AcademicKind, Activity, ActivityDetails, FocusSession, FocusTechnique, Priority,
};
use crate::ids::IdAllocator;

/// Build the default collection, allocating ids from a freshly reset counter.
///
/// Deterministic: ids run 1..=N in the order listed here.
pub fn default_activities(ids: &mut IdAllocator) -> Vec<Activity> {
    ids.reconcile(None);

    let at = |y, mo, d, h, mi| Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).single();

    let checkup = Activity::new(
        ids.next(),
        "Medical appointment",
        "General checkup",
        at(2026, 1, 20, 10, 0),
        Priority::High,
        60,
        ActivityDetails::Personal {
            location: "Kennedy Hospital".into(),
        },
    );

    let homework = Activity::new(
        ids.next(),
        "Statistics homework",
        "Worksheet 4",
        at(2026, 1, 19, 23, 59),
        Priority::Medium,
        120,
        ActivityDetails::Academic {
            subject: "Statistics".into(),
            kind: AcademicKind::Homework,
        },
    );

    let mut project = Activity::new(
        ids.next(),
        "OOP project",
        "App development",
        at(2026, 1, 30, 23, 59),
        Priority::High,
        300,
        ActivityDetails::Academic {
            subject: "OOP".into(),
            kind: AcademicKind::Project,
        },
    );
    for (day, hour) in [(15, 10), (16, 11)] {
        if let Some(when) = at(2026, 1, day, hour, 0) {
            project.record_session(FocusSession::new(when, 25, FocusTechnique::Pomodoro, true));
        }
    }
    // Manual override above the session-derived value, as a user would enter it.
    if let Err(err) = project.set_progress(70.0) {
        warn!(error = %err, "seed progress rejected");
    }

    let exam = Activity::new(
        ids.next(),
        "OOP exam",
        "Midterm 1",
        at(2026, 1, 23, 14, 0),
        Priority::High,
        120,
        ActivityDetails::Academic {
            subject: "OOP".into(),
            kind: AcademicKind::Exam,
        },
    );

    vec![checkup, homework, project, exam]
}
