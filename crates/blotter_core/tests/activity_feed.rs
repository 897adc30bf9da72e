use blotter_core::store::keys;
use blotter_core::{
    recent_events, render_feed, write_json, ActivityEvent, KvStore, MemoryKvStore,
    RECENT_FEED_LIMIT,
};

const NOW_MS: i64 = 1_800_000_000_000;
const MINUTE_MS: i64 = 60 * 1000;

fn event_at(timestamp: i64) -> ActivityEvent {
    ActivityEvent::new(
        format!("C{timestamp} - NEW CASE LOGGED"),
        "New case logged",
        "System",
        timestamp,
    )
}

#[test]
fn feed_exposes_seven_most_recent_events_descending() {
    let store = MemoryKvStore::new();
    // Append in shuffled order; the feed must sort by timestamp.
    let timestamps = [3, 9, 1, 7, 10, 2, 8, 4, 6, 5];
    let log: Vec<ActivityEvent> = timestamps
        .iter()
        .map(|offset| event_at(NOW_MS - offset * MINUTE_MS))
        .collect();
    write_json(&store, keys::ACTIVITY_HISTORY, &log).unwrap();

    let recent = recent_events(&store);
    assert_eq!(recent.len(), RECENT_FEED_LIMIT);

    let offsets: Vec<i64> = recent
        .iter()
        .map(|event| (NOW_MS - event.timestamp) / MINUTE_MS)
        .collect();
    assert_eq!(offsets, vec![1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn short_logs_are_returned_whole() {
    let store = MemoryKvStore::new();
    write_json(
        &store,
        keys::ACTIVITY_HISTORY,
        &vec![event_at(NOW_MS - MINUTE_MS), event_at(NOW_MS)],
    )
    .unwrap();

    let recent = recent_events(&store);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].timestamp, NOW_MS);
}

#[test]
fn rendered_feed_carries_relative_labels() {
    let store = MemoryKvStore::new();
    write_json(
        &store,
        keys::ACTIVITY_HISTORY,
        &vec![
            event_at(NOW_MS - 30 * 1000),
            event_at(NOW_MS - 5 * MINUTE_MS),
            event_at(NOW_MS - 3 * 60 * MINUTE_MS),
            event_at(NOW_MS - 30 * 60 * MINUTE_MS),
            event_at(NOW_MS - 4 * 24 * 60 * MINUTE_MS),
        ],
    )
    .unwrap();

    let feed = render_feed(&store, NOW_MS);
    let labels: Vec<&str> = feed.iter().map(|item| item.time_ago.as_str()).collect();
    assert_eq!(labels, vec!["just now", "5m ago", "3h ago", "yesterday", "4d ago"]);
}

#[test]
fn missing_or_malformed_log_renders_an_empty_feed() {
    let store = MemoryKvStore::new();
    assert!(render_feed(&store, NOW_MS).is_empty());

    store.set(keys::ACTIVITY_HISTORY, "not a log").unwrap();
    assert!(render_feed(&store, NOW_MS).is_empty());
}
