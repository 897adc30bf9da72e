use blotter_core::store::keys;
use blotter_core::{
    read_list, read_map, ActivityEvent, Clock, DeltaSynchronizer, KvStore, MemoryKvStore,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const NOW_MS: i64 = 1_800_000_000_000;
// 2026-02-26T00:00:00Z, the filing date used by the fixtures below.
const FILING_DATE_MS: i64 = 1_772_064_000_000;

struct FixedClock(i64);

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

fn synchronizer(store: &MemoryKvStore) -> DeltaSynchronizer<MemoryKvStore, FixedClock> {
    DeltaSynchronizer::with_clock(store.clone(), FixedClock(NOW_MS))
}

fn events(store: &MemoryKvStore) -> Vec<ActivityEvent> {
    read_list(store, keys::ACTIVITY_HISTORY)
}

#[test]
fn new_case_produces_one_event_and_seeds_projection() {
    let store = MemoryKvStore::new();
    store
        .set(
            keys::CASES,
            r#"[{"caseNo":"01-166-02-2026","status":"PENDING","date":"02-26-2026","complainant":"A. Cruz","respondent":"B. Santos"}]"#,
        )
        .unwrap();

    let outcome = synchronizer(&store).synchronize().unwrap();
    assert_eq!(outcome.appended, 1);

    let log = events(&store);
    assert_eq!(log.len(), 1);
    assert!(log[0].title.contains("01-166-02-2026"));
    assert!(log[0].title.contains("NEW CASE LOGGED"));
    assert_eq!(log[0].editor, "System");
    // Creation events back-date to the record's own filing date.
    assert_eq!(log[0].timestamp, FILING_DATE_MS);

    let seen: BTreeMap<String, String> = read_map(&store, keys::SEEN_CASES);
    assert_eq!(seen.get("01-166-02-2026").map(String::as_str), Some("PENDING"));
}

#[test]
fn repeat_run_with_unchanged_collections_appends_nothing() {
    let store = MemoryKvStore::new();
    store
        .set(
            keys::CASES,
            r#"[{"caseNo":"01-166-02-2026","status":"PENDING","date":"02-26-2026"}]"#,
        )
        .unwrap();
    store
        .set(
            keys::SUMMONS,
            r#"[{"caseNo":"01-166-02-2026","summonsNo":1,"status":"Pending"}]"#,
        )
        .unwrap();

    let sync = synchronizer(&store);
    let first = sync.synchronize().unwrap();
    assert_eq!(first.appended, 2);

    let second = sync.synchronize().unwrap();
    assert_eq!(second.appended, 0);
    assert_eq!(second.junk_removed, 0);
    assert_eq!(events(&store).len(), 2);
}

#[test]
fn status_transition_produces_archival_event_and_updates_projection() {
    let store = MemoryKvStore::new();
    store
        .set(keys::SEEN_CASES, r#"{"C1":"PENDING"}"#)
        .unwrap();
    store
        .set(keys::CASES, r#"[{"caseNo":"C1","status":"SETTLED"}]"#)
        .unwrap();

    let outcome = synchronizer(&store).synchronize().unwrap();
    assert_eq!(outcome.appended, 1);

    let log = events(&store);
    assert_eq!(log[0].title, "C1 - CASE ARCHIVED");
    assert!(!log[0].title.contains("CASE SETTLED"));
    // Transitions are observed now, never back-dated.
    assert_eq!(log[0].timestamp, NOW_MS);

    let seen: BTreeMap<String, String> = read_map(&store, keys::SEEN_CASES);
    assert_eq!(seen.get("C1").map(String::as_str), Some("SETTLED"));
}

#[test]
fn non_settled_transition_uses_generic_status_title() {
    let store = MemoryKvStore::new();
    store
        .set(keys::SEEN_CASES, r#"{"C1":"PENDING"}"#)
        .unwrap();
    store
        .set(keys::CASES, r#"[{"caseNo":"C1","status":"ESCALATED"}]"#)
        .unwrap();

    synchronizer(&store).synchronize().unwrap();
    assert_eq!(events(&store)[0].title, "C1 - CASE ESCALATED");
}

#[test]
fn summons_are_presence_only() {
    let store = MemoryKvStore::new();
    store
        .set(
            keys::SUMMONS,
            r#"[{"caseNo":"C1","summonsNo":1,"status":"Pending","reason":"first notice"}]"#,
        )
        .unwrap();

    let sync = synchronizer(&store);
    assert_eq!(sync.synchronize().unwrap().appended, 1);
    assert!(events(&store)[0].title.contains("SUMMONS #1"));

    // Same composite key with changed fields: no transition event.
    store
        .set(
            keys::SUMMONS,
            r#"[{"caseNo":"C1","summonsNo":1,"status":"Settled","reason":"rescheduled"}]"#,
        )
        .unwrap();
    assert_eq!(sync.synchronize().unwrap().appended, 0);

    // A new ordinal is a new key and does produce an event.
    store
        .set(
            keys::SUMMONS,
            r#"[{"caseNo":"C1","summonsNo":1,"status":"Settled"},{"caseNo":"C1","summonsNo":2,"status":"Pending"}]"#,
        )
        .unwrap();
    assert_eq!(sync.synchronize().unwrap().appended, 1);
}

#[test]
fn curfew_transitions_are_detected_and_notes_are_presence_only() {
    let store = MemoryKvStore::new();
    store
        .set(
            keys::CURFEW_VIOLATIONS,
            r#"[{"id":"cv-1","residentName":"J. Dela Cruz","status":"Unsettled","date":"02-26-2026"}]"#,
        )
        .unwrap();
    store
        .set(
            keys::CURFEW_FOLDERS,
            r#"[{"id":"note-1","linkedId":"cv-1","content":"guardian contacted"}]"#,
        )
        .unwrap();

    let sync = synchronizer(&store);
    assert_eq!(sync.synchronize().unwrap().appended, 2);

    store
        .set(
            keys::CURFEW_VIOLATIONS,
            r#"[{"id":"cv-1","residentName":"J. Dela Cruz","status":"Settled","date":"02-26-2026"}]"#,
        )
        .unwrap();
    store
        .set(
            keys::CURFEW_FOLDERS,
            r#"[{"id":"note-1","linkedId":"cv-1","content":"guardian visited office"}]"#,
        )
        .unwrap();

    assert_eq!(sync.synchronize().unwrap().appended, 1);
    let log = events(&store);
    let latest = log.last().unwrap();
    assert_eq!(latest.title, "J. Dela Cruz - VIOLATION SETTLED");
    assert_eq!(latest.timestamp, NOW_MS);
}

#[test]
fn malformed_record_date_falls_back_to_wall_clock() {
    let store = MemoryKvStore::new();
    store
        .set(
            keys::CASES,
            r#"[{"caseNo":"C1","status":"PENDING","date":"not-a-date","time":"later"}]"#,
        )
        .unwrap();

    synchronizer(&store).synchronize().unwrap();
    assert_eq!(events(&store)[0].timestamp, NOW_MS);
}

#[test]
fn malformed_collections_degrade_to_empty_without_error() {
    let store = MemoryKvStore::new();
    store.set(keys::CASES, "not json at all").unwrap();
    store.set(keys::SUMMONS, r#"{"unexpected":"shape"}"#).unwrap();
    store.set(keys::ACTIVITY_HISTORY, "[{broken").unwrap();

    let outcome = synchronizer(&store).synchronize().unwrap();
    assert_eq!(outcome.appended, 0);
    assert!(events(&store).is_empty());
}

#[test]
fn janitorial_filter_strips_legacy_marked_entries() {
    let store = MemoryKvStore::new();
    store
        .set(
            keys::ACTIVITY_HISTORY,
            r#"[
                {"id":"a","title":"undefined - NEW CASE LOGGED","actionText":"","editor":"System","timestamp":1},
                {"id":"b","title":"C1 - NEW CASE LOGGED","actionText":"New case logged","editor":"System","timestamp":2}
            ]"#,
        )
        .unwrap();

    let outcome = synchronizer(&store).synchronize().unwrap();
    assert_eq!(outcome.junk_removed, 1);
    assert!(outcome.changed());

    let log = events(&store);
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].id, "b");
}

#[test]
fn projection_mirrors_snapshot_and_drops_removed_keys_silently() {
    let store = MemoryKvStore::new();
    store
        .set(
            keys::SEEN_CASES,
            r#"{"GONE":"PENDING","KEPT":"PENDING"}"#,
        )
        .unwrap();
    store
        .set(keys::CASES, r#"[{"caseNo":"KEPT","status":"PENDING"}]"#)
        .unwrap();

    let outcome = synchronizer(&store).synchronize().unwrap();
    // Removal is not an observable action; only the projection shrinks.
    assert_eq!(outcome.appended, 0);

    let seen: BTreeMap<String, String> = read_map(&store, keys::SEEN_CASES);
    assert_eq!(seen.len(), 1);
    assert!(seen.contains_key("KEPT"));
}

#[test]
fn collections_are_processed_in_fixed_order() {
    let store = MemoryKvStore::new();
    store
        .set(keys::CURFEW_FOLDERS, r#"[{"id":"n1","content":"x"}]"#)
        .unwrap();
    store
        .set(keys::CASES, r#"[{"caseNo":"C1","status":"PENDING"}]"#)
        .unwrap();
    store
        .set(
            keys::SUMMONS,
            r#"[{"caseNo":"C1","summonsNo":1,"status":"Pending"}]"#,
        )
        .unwrap();

    synchronizer(&store).synchronize().unwrap();
    let log = events(&store);
    assert_eq!(log.len(), 3);
    assert!(log[0].title.contains("NEW CASE LOGGED"));
    assert!(log[1].title.contains("SUMMONS"));
    assert!(log[2].title.contains("CURFEW NOTE ADDED"));
}

#[test]
fn synchronizer_writes_do_not_fire_change_listeners() {
    let store = MemoryKvStore::new();
    store
        .set(keys::CASES, r#"[{"caseNo":"C1","status":"PENDING"}]"#)
        .unwrap();

    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    store.subscribe(Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    synchronizer(&store).synchronize().unwrap();
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}
