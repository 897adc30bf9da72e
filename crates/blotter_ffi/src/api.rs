//! FFI use-case API for console-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to the UI runtime via FRB.
//! - Keep error semantics simple for UI integration.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Return values are plain envelope structs with stable meaning.

use blotter_core::db::open_db;
use blotter_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    render_feed, Clock, DeltaSynchronizer, SqliteKvStore, SystemClock,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;

const CONSOLE_DB_FILE_NAME: &str = "blotter_console.sqlite3";
static CONSOLE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return
///   an error message.
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Result envelope for one synchronization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncActivityResponse {
    /// Whether the run completed.
    pub ok: bool,
    /// Events appended this run.
    pub appended: u32,
    /// Legacy-marked entries removed by the janitorial filter.
    pub junk_removed: u32,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl SyncActivityResponse {
    fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!("event=ffi_call module=ffi status=error op=sync_activity message={message}");
        Self {
            ok: false,
            appended: 0,
            junk_removed: 0,
            message,
        }
    }
}

/// One rendered feed row for the recent-activity panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityFeedItem {
    pub title: String,
    pub editor: String,
    /// Relative label, e.g. `just now`, `5m ago`, `yesterday`.
    pub time_ago: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

/// Feed response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityFeedResponse {
    /// Whether the read completed.
    pub ok: bool,
    /// Feed rows, most recent first (at most 7).
    pub items: Vec<ActivityFeedItem>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActivityFeedResponse {
    fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!("event=ffi_call module=ffi status=error op=recent_activity message={message}");
        Self {
            ok: false,
            items: Vec::new(),
            message,
        }
    }
}

/// Runs one activity synchronization pass over the console database.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Safe to invoke from any trigger (timer tick, store-change signal);
///   repeat runs with unchanged data append nothing.
#[flutter_rust_bridge::frb(sync)]
pub fn sync_activity() -> SyncActivityResponse {
    let db_path = resolve_console_db_path();
    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => return SyncActivityResponse::failure(format!("sync_activity failed: {err}")),
    };
    let store = match SqliteKvStore::try_new(&conn) {
        Ok(store) => store,
        Err(err) => return SyncActivityResponse::failure(format!("sync_activity failed: {err}")),
    };

    match DeltaSynchronizer::new(store).synchronize() {
        Ok(outcome) => {
            let message = if outcome.changed() {
                format!(
                    "Recorded {} new activity entry(ies), removed {} legacy entry(ies).",
                    outcome.appended, outcome.junk_removed
                )
            } else {
                "No new activity.".to_string()
            };
            SyncActivityResponse {
                ok: true,
                appended: outcome.appended as u32,
                junk_removed: outcome.junk_removed as u32,
                message,
            }
        }
        Err(err) => SyncActivityResponse::failure(format!("sync_activity failed: {err}")),
    }
}

/// Returns the recent-activity feed with relative-time labels.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns at most 7 rows sorted by timestamp descending.
#[flutter_rust_bridge::frb(sync)]
pub fn recent_activity() -> ActivityFeedResponse {
    let db_path = resolve_console_db_path();
    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => return ActivityFeedResponse::failure(format!("recent_activity failed: {err}")),
    };
    let store = match SqliteKvStore::try_new(&conn) {
        Ok(store) => store,
        Err(err) => return ActivityFeedResponse::failure(format!("recent_activity failed: {err}")),
    };

    let items = render_feed(&store, SystemClock.now_ms())
        .into_iter()
        .map(|item| ActivityFeedItem {
            title: item.title,
            editor: item.editor,
            time_ago: item.time_ago,
            timestamp: item.timestamp,
        })
        .collect::<Vec<_>>();
    let message = if items.is_empty() {
        "No recent activity.".to_string()
    } else {
        format!("Loaded {} activity row(s).", items.len())
    };

    ActivityFeedResponse {
        ok: true,
        items,
        message,
    }
}

fn resolve_console_db_path() -> PathBuf {
    CONSOLE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("BLOTTER_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(CONSOLE_DB_FILE_NAME)
        })
        .clone()
}
