//! Integration tests for the store's load/seed/save lifecycle.

use chrono::{TimeZone, Utc};
use lumen_core::{
    AcademicKind, ActivityDraft, ActivityId, ActivityStatus, ActivityStore, CoreError,
    FocusOutcome, FocusTechnique, LoadOutcome, Priority, SeedReason, SessionRecorder,
    StoreOptions, Upsert,
};
use std::path::PathBuf;

fn snapshot_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("activities.json")
}

fn open(dir: &tempfile::TempDir) -> ActivityStore {
    ActivityStore::open(snapshot_path(dir), &StoreOptions::default())
}

fn draft(name: &str, estimated: u32) -> ActivityDraft {
    ActivityDraft::academic(name, "Algorithms", AcademicKind::Homework)
        .description("problem set")
        .due_at(Utc.with_ymd_and_hms(2026, 2, 14, 18, 0, 0).unwrap())
        .priority(Priority::Medium)
        .estimated_minutes(estimated)
}

#[test]
fn fresh_install_seeds_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(&dir);

    let n = store.len() as u64;
    assert!(n > 0);
    let ids: Vec<u64> = store.query_all().iter().map(|a| a.id().0).collect();
    assert_eq!(ids, (1..=n).collect::<Vec<_>>());
    assert_eq!(
        store.load_outcome(),
        &LoadOutcome::Seeded {
            reason: SeedReason::Missing,
            persisted: true
        }
    );
    assert_eq!(store.allocate_id(), ActivityId(n + 1));
}

#[test]
fn second_open_loads_what_the_first_seeded() {
    let dir = tempfile::tempdir().unwrap();
    let first = open(&dir);
    let second = open(&dir);
    assert_eq!(
        second.load_outcome(),
        &LoadOutcome::Loaded {
            count: first.len()
        }
    );
    assert_eq!(first.query_all(), second.query_all());
}

#[test]
fn save_and_reload_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(&dir);
    let id = store.create(draft("Graph homework", 90)).unwrap();
    store
        .record_session(id, 25, FocusTechnique::Pomodoro, true)
        .unwrap();
    store
        .record_session(id, 10, FocusTechnique::DeepWork, false)
        .unwrap();
    let personal = ActivityDraft::personal("Dentist", "Main street")
        .due_at(Utc.with_ymd_and_hms(2026, 2, 2, 9, 30, 0).unwrap())
        .priority(Priority::Low);
    store.create(personal).unwrap();

    let reopened = open(&dir);
    assert_eq!(reopened.query_all(), store.query_all());
    let reloaded = reopened.find_by_id(id).unwrap();
    assert_eq!(reloaded.sessions().len(), 2);
    assert!(!reloaded.sessions()[1].completed());
}

#[test]
fn reconcile_after_reload_never_reuses_ids() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(&dir);
    for i in 0..3 {
        store.create(draft(&format!("task {i}"), 30)).unwrap();
    }
    // Delete the highest id: the next id must still be past every loaded id.
    let last = store.query_all().last().unwrap().id();
    store.delete(last).unwrap();

    let mut reopened = open(&dir);
    let next = reopened.allocate_id();
    assert!(reopened.query_all().iter().all(|a| a.id() < next));
}

#[test]
fn sessions_past_estimate_complete_the_activity() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(&dir);
    let id = store.create(draft("Compilers project", 120)).unwrap();

    let first = store
        .record_session(id, 70, FocusTechnique::DeepWork, true)
        .unwrap();
    assert_eq!(first.status, ActivityStatus::InProgress);

    let second = store
        .record_session(id, 70, FocusTechnique::DeepWork, true)
        .unwrap();
    assert_eq!(second.invested_minutes, 140);
    assert_eq!(second.progress, 100.0);
    assert_eq!(second.status, ActivityStatus::Completed);

    let reopened = open(&dir);
    assert_eq!(
        reopened.find_by_id(id).unwrap().status(),
        ActivityStatus::Completed
    );
}

#[test]
fn zero_estimate_keeps_progress() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(&dir);
    let id = store.create(draft("Unscoped reading", 0)).unwrap();
    let receipt = store
        .record_session(id, 30, FocusTechnique::Pomodoro, true)
        .unwrap();
    assert_eq!(receipt.invested_minutes, 30);
    assert_eq!(receipt.progress, 0.0);
    assert_eq!(receipt.status, ActivityStatus::Pending);
}

/// Updating an id that no longer exists re-adds it instead of failing.
/// This hides stale-copy bugs in callers; kept for compatibility.
#[test]
fn stale_update_after_delete_reinserts() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(&dir);
    let id = store.create(draft("Stale", 60)).unwrap();
    let stale = store.get(id).unwrap();

    assert!(store.delete(id).unwrap());
    assert!(store.find_by_id(id).is_none());

    assert_eq!(store.update(stale.clone()).unwrap(), Upsert::Inserted);
    assert_eq!(store.find_by_id(id), Some(&stale));
    assert_eq!(open(&dir).find_by_id(id), Some(&stale));
}

#[test]
fn timer_copy_recording_upserts() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(&dir);
    let id = store.create(draft("Timer held copy", 50)).unwrap();
    let mut held = store.get(id).unwrap();
    store.delete(id).unwrap();

    let receipt =
        SessionRecorder::record(&mut store, &mut held, &FocusOutcome::new(25, FocusTechnique::Pomodoro, true))
            .unwrap();
    assert_eq!(receipt.upsert, Upsert::Inserted);
    assert_eq!(store.find_by_id(id).unwrap().progress(), 50.0);
}

#[test]
fn corrupt_snapshot_falls_back_to_seed() {
    let dir = tempfile::tempdir().unwrap();
    let path = snapshot_path(&dir);
    std::fs::write(&path, b"\x00\x01 definitely not json").unwrap();

    let store = open(&dir);
    assert!(!store.is_empty());
    match store.load_outcome() {
        LoadOutcome::Seeded {
            reason: SeedReason::Corrupt(_),
            persisted: true,
        } => {}
        other => panic!("unexpected outcome: {other:?}"),
    }
    // The seed replaced the corrupt file.
    assert_eq!(
        open(&dir).load_outcome(),
        &LoadOutcome::Loaded { count: store.len() }
    );
}

#[test]
fn unversioned_snapshot_falls_back_to_seed() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(snapshot_path(&dir), r#"[{"id": 1}]"#).unwrap();
    let store = open(&dir);
    assert!(matches!(
        store.load_outcome(),
        LoadOutcome::Seeded {
            reason: SeedReason::UnsupportedVersion(None),
            ..
        }
    ));
}

#[test]
fn seeding_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(snapshot_path(&dir), "garbage").unwrap();
    let mut store = ActivityStore::open(
        snapshot_path(&dir),
        &StoreOptions {
            seed_defaults: false,
        },
    );
    assert!(store.is_empty());
    assert_eq!(store.allocate_id(), ActivityId(1));
}

#[test]
fn unknown_id_recording_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(&dir);
    let err = store
        .record_session(ActivityId(404), 25, FocusTechnique::Pomodoro, true)
        .unwrap_err();
    assert!(matches!(err, CoreError::ActivityNotFound { id } if id == ActivityId(404)));
}
