//! Property tests for status derivation, invested time and id allocation.

use chrono::Utc;
use lumen_core::{
    Activity, ActivityDetails, ActivityId, ActivityStatus, FocusSession, FocusTechnique,
    IdAllocator, Priority,
};
use proptest::prelude::*;

fn blank(id: u64) -> Activity {
    Activity::new(
        ActivityId(id),
        "prop",
        "",
        None,
        Priority::Medium,
        60,
        ActivityDetails::Personal {
            location: "Desk".into(),
        },
    )
}

proptest! {
    #[test]
    fn status_is_derived_from_progress(p in 0.0f64..=100.0) {
        let mut a = blank(1);
        a.set_progress(p).unwrap();
        let expected = if p == 0.0 {
            ActivityStatus::Pending
        } else if p >= 100.0 {
            ActivityStatus::Completed
        } else {
            ActivityStatus::InProgress
        };
        prop_assert_eq!(a.status(), expected);
        prop_assert_eq!(a.progress(), p);
    }

    #[test]
    fn out_of_range_progress_is_rejected(
        start in 0.0f64..=100.0,
        p in prop_oneof![-1.0e6f64..-f64::EPSILON, 100.000_001f64..1.0e6],
    ) {
        let mut a = blank(1);
        a.set_progress(start).unwrap();
        let before = a.clone();
        prop_assert!(a.set_progress(p).is_err());
        prop_assert_eq!(a, before);
    }

    #[test]
    fn invested_minutes_counts_only_completed(
        log in prop::collection::vec((1u32..240, any::<bool>()), 0..20),
        extra in 1u32..240,
    ) {
        let mut a = blank(1);
        for (minutes, completed) in &log {
            a.record_session(FocusSession::new(Utc::now(), *minutes, FocusTechnique::Pomodoro, *completed));
        }
        let expected: u64 = log.iter().filter(|(_, c)| *c).map(|(m, _)| u64::from(*m)).sum();
        prop_assert_eq!(a.invested_minutes(), expected);

        a.record_session(FocusSession::new(Utc::now(), extra, FocusTechnique::DeepWork, false));
        prop_assert_eq!(a.invested_minutes(), expected);
        prop_assert_eq!(a.sessions().len(), log.len() + 1);
    }

    #[test]
    fn next_id_after_reconcile_is_fresh(ids in prop::collection::hash_set(1u64..10_000, 0..50)) {
        let activities: Vec<Activity> = ids.iter().map(|id| blank(*id)).collect();
        let mut allocator = IdAllocator::new();
        allocator.reconcile_with(&activities);
        let next = allocator.next();
        prop_assert!(!ids.contains(&next.0));
        prop_assert!(activities.iter().all(|a| a.id() < next));
    }
}
