//! Activity event model.
//!
//! # Invariants
//! - Events are append-only: once written to the log they are never
//!   mutated. The only removal path is the janitorial filter for
//!   legacy-marked entries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entry of the recent-activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    /// Stable event id.
    pub id: String,
    /// Headline shown in the feed, e.g. `01-166-02-2026 - NEW CASE LOGGED`.
    pub title: String,
    /// Short verb phrase describing the action.
    pub action_text: String,
    /// Attribution resolved from the source record.
    pub editor: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

impl ActivityEvent {
    /// Creates an event with a generated id.
    pub fn new(
        title: impl Into<String>,
        action_text: impl Into<String>,
        editor: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            action_text: action_text.into(),
            editor: editor.into(),
            timestamp,
        }
    }
}
