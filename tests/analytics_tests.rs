use std::sync::Arc;

use serde_json::json;
use tempfile::tempdir;
use trait_scan::analytics::{names, AnalyticsEvent, EventLog, EventSummary, MAX_EVENTS};
use trait_scan::storage::{keys, KeyValueStore, MemoryStore, SharedStore, SqliteStore};

fn memory() -> (Arc<MemoryStore>, SharedStore) {
    let store = Arc::new(MemoryStore::new());
    let shared: SharedStore = store.clone();
    (store, shared)
}

fn persisted(store: &MemoryStore) -> Vec<AnalyticsEvent> {
    let raw = store
        .get(keys::ANALYTICS_EVENTS)
        .expect("get")
        .expect("events persisted");
    serde_json::from_str(&raw).expect("parse")
}

#[test]
fn log_is_capped_newest_first() {
    let (store, shared) = memory();
    let log = EventLog::new(shared);

    for i in 0..130 {
        log.record("tick", json!({ "i": i }));
    }

    let events = log.list(None);
    assert_eq!(events.len(), MAX_EVENTS);
    assert_eq!(events[0].payload["i"], json!(129));
    assert_eq!(events[MAX_EVENTS - 1].payload["i"], json!(30));
    assert!(events
        .windows(2)
        .all(|pair| pair[0].timestamp >= pair[1].timestamp));
    assert_eq!(persisted(&store).len(), MAX_EVENTS);
}

#[test]
fn record_then_list_one_returns_it() {
    let (_store, shared) = memory();
    let log = EventLog::new(shared);
    log.track("warmup");

    let recorded = log.record(names::TOUR_COMPLETED, json!({ "step": 4 }));
    let latest = log.list(Some(1));

    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0], recorded);
    assert_eq!(latest[0].name, names::TOUR_COMPLETED);
    assert_eq!(latest[0].payload["step"], json!(4));
    assert!(latest[0].id.starts_with("evt_"));
}

#[test]
fn clear_empties_memory_and_storage() {
    let (store, shared) = memory();
    let log = EventLog::new(shared);
    log.track(names::DEMO_SELECTED);
    log.track(names::DEMO_SELECTED);

    log.clear();

    assert!(log.list(None).is_empty());
    assert!(persisted(&store).is_empty());
}

#[test]
fn list_by_name_counts_exact_matches() {
    let (_store, shared) = memory();
    let log = EventLog::new(shared);
    for _ in 0..3 {
        log.track(names::SEED_CREATED);
    }
    log.track(names::REPORT_DOWNLOADED);
    log.track("seed_created_extra");

    assert_eq!(log.list_by_name(names::SEED_CREATED).len(), 3);
    assert_eq!(log.list_by_name(names::REPORT_DOWNLOADED).len(), 1);
    assert!(log.list_by_name("missing").is_empty());
}

#[test]
fn fresh_instance_hydrates_from_storage() {
    let (_store, shared) = memory();
    let first = EventLog::new(shared.clone());
    first.record(names::SEED_CREATED, json!({ "seedId": "s_1" }));
    first.track(names::TOUR_SKIPPED);

    let reloaded = EventLog::new(shared);
    assert_eq!(reloaded.list(None), first.list(None));
    assert_eq!(reloaded.user_id(), first.user_id());
}

#[test]
fn unreadable_log_starts_empty() {
    let (store, shared) = memory();
    store.set(keys::ANALYTICS_EVENTS, "{not json").expect("seed");

    let log = EventLog::new(shared);
    assert!(log.is_empty());

    log.track(names::DEMO_SELECTED);
    assert_eq!(persisted(&store).len(), 1);
}

#[test]
fn write_failure_is_swallowed_and_memory_stays_authoritative() {
    let (store, shared) = memory();
    let log = EventLog::new(shared);
    log.track("first");

    store.set_quota(Some(8));
    let event = log.record("second", json!({ "big": "x".repeat(64) }));

    assert_eq!(log.len(), 2);
    assert_eq!(log.list(Some(1))[0].id, event.id);
    // The store still holds the last write that fit.
    store.set_quota(None);
    assert_eq!(persisted(&store).len(), 1);
}

#[test]
fn user_id_is_created_once_and_stamped_on_events() {
    let (store, shared) = memory();
    let log = EventLog::new(shared);
    let event = log.track("anything");

    let stored = store
        .get(keys::ANALYTICS_USER_ID)
        .expect("get")
        .expect("user id persisted");
    assert!(stored.starts_with("user_"));
    assert_eq!(event.user_id, stored);
    assert_eq!(log.track("again").user_id, stored);
}

#[test]
fn custom_capacity_is_respected_on_hydrate() {
    let (_store, shared) = memory();
    let big = EventLog::new(shared.clone());
    for _ in 0..10 {
        big.track("tick");
    }

    let small = EventLog::with_capacity(shared, 4);
    assert_eq!(small.len(), 4);
    assert_eq!(small.capacity(), 4);
}

#[test]
fn summary_counts_known_events() {
    let (_store, shared) = memory();
    let log = EventLog::new(shared);
    log.track(names::SEED_CREATED);
    log.track(names::SEED_CREATED);
    log.track(names::REPORT_DOWNLOADED);
    log.track(names::TOUR_COMPLETED);
    log.track(names::DEMO_SELECTED);

    let summary = EventSummary::from_events(&log.list(None));
    assert_eq!(
        summary,
        EventSummary {
            total: 5,
            seeds_created: 2,
            reports_downloaded: 1,
            tours_completed: 1,
        }
    );
}

#[test]
fn sqlite_backed_log_survives_reopen() {
    let temp_dir = tempdir().expect("tempdir");
    let db_path = temp_dir.path().join("trait-scan.db");
    let path = db_path.to_string_lossy().to_string();

    {
        let store: SharedStore = Arc::new(SqliteStore::new(&path, 1).expect("store"));
        let log = EventLog::new(store);
        log.record(names::SEED_CREATED, json!({ "seedId": "s_42" }));
    }

    let store: SharedStore = Arc::new(SqliteStore::new(&path, 1).expect("reopen"));
    let log = EventLog::new(store);
    let events = log.list_by_name(names::SEED_CREATED);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].payload["seedId"], json!("s_42"));
}
