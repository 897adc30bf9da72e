//! Recent-activity feed projection.
//!
//! Purely presentational: reads the activity log each call and derives
//! a bounded, ordered view with relative-time labels. No state of its
//! own.

use crate::model::activity::ActivityEvent;
use crate::store::{keys, read_list, KvStore};

/// Number of events exposed by the feed.
pub const RECENT_FEED_LIMIT: usize = 7;

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// One rendered feed row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub action_text: String,
    pub editor: String,
    pub timestamp: i64,
    /// Relative label, e.g. `just now`, `5m ago`, `yesterday`.
    pub time_ago: String,
}

/// Returns the activity log sorted by timestamp descending, truncated to
/// the [`RECENT_FEED_LIMIT`] most recent events.
pub fn recent_events<S: KvStore + ?Sized>(store: &S) -> Vec<ActivityEvent> {
    let mut events: Vec<ActivityEvent> = read_list(store, keys::ACTIVITY_HISTORY);
    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    events.truncate(RECENT_FEED_LIMIT);
    events
}

/// Renders the feed with relative-time labels computed against `now_ms`.
pub fn render_feed<S: KvStore + ?Sized>(store: &S, now_ms: i64) -> Vec<FeedItem> {
    recent_events(store)
        .into_iter()
        .map(|event| FeedItem {
            time_ago: relative_label(now_ms, event.timestamp),
            title: event.title,
            action_text: event.action_text,
            editor: event.editor,
            timestamp: event.timestamp,
        })
        .collect()
}

/// Relative "time ago" label. Future timestamps clamp to `just now`.
pub fn relative_label(now_ms: i64, timestamp_ms: i64) -> String {
    let elapsed = (now_ms - timestamp_ms).max(0);
    if elapsed < MINUTE_MS {
        "just now".to_string()
    } else if elapsed < HOUR_MS {
        format!("{}m ago", elapsed / MINUTE_MS)
    } else if elapsed < DAY_MS {
        format!("{}h ago", elapsed / HOUR_MS)
    } else if elapsed < 2 * DAY_MS {
        "yesterday".to_string()
    } else {
        format!("{}d ago", elapsed / DAY_MS)
    }
}
