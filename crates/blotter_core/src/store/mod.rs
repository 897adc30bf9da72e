//! Key-value store capability and lenient JSON access helpers.
//!
//! # Responsibility
//! - Define the injectable store contract consumed by the synchronizer
//!   and feed (whole-value get/set plus a payload-free change signal).
//! - Provide lenient typed readers that degrade instead of failing.
//!
//! # Invariants
//! - Every successful `set` fires all subscribed listeners once, after
//!   the write. `set_quiet` never fires listeners.
//! - Missing keys and malformed JSON degrade to empty defaults on the
//!   read side; only backend write failures propagate.

use crate::db::DbError;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};

mod memory;
mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

/// Storage keys shared between the console views and the synchronizer.
pub mod keys {
    /// Case records, written by the case-logs view.
    pub const CASES: &str = "cases";
    /// Summons records, written by the case-logs and summons views.
    pub const SUMMONS: &str = "summons";
    /// Curfew violation records, written by the curfew view.
    pub const CURFEW_VIOLATIONS: &str = "curfew_violations";
    /// Curfew notes, written by the curfew view.
    pub const CURFEW_FOLDERS: &str = "curfew_folders";
    /// Seen-projection: case number -> last-observed status.
    pub const SEEN_CASES: &str = "analytics_seen_cases";
    /// Seen-projection: composite summons key -> presence marker.
    pub const SEEN_SUMMONS: &str = "analytics_seen_summons";
    /// Seen-projection: curfew violation id -> last-observed status.
    pub const SEEN_CURFEWS: &str = "analytics_seen_curfews";
    /// Seen-projection: curfew note id -> presence marker.
    pub const SEEN_NOTES: &str = "analytics_seen_notes";
    /// Append-only activity event log.
    pub const ACTIVITY_HISTORY: &str = "activity_history";
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Payload-free change notification callback.
pub type ChangeListener = Arc<dyn Fn() + Send + Sync>;

/// Store-layer error for persistence and subscription operations.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Serialize(serde_json::Error),
    /// Connection has not been migrated (`PRAGMA user_version` is 0).
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Migrated connection is missing a required table.
    MissingRequiredTable(&'static str),
    /// In-memory store mutex was poisoned by a panicking writer.
    LockPoisoned,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize store payload: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is uninitialized; expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::LockPoisoned => write!(f, "store lock poisoned"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// String-keyed JSON store capability.
///
/// Values are whole JSON documents replaced atomically per key; there are
/// no partial updates. Implementations back this with any persistence.
pub trait KvStore {
    /// Returns the raw JSON text stored under `key`.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replaces the value under `key` and broadcasts the change signal.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Replaces the value under `key` without broadcasting.
    ///
    /// Used by the synchronizer, which must not re-trigger itself through
    /// its own bookkeeping writes.
    fn set_quiet(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Registers a payload-free listener fired on every broadcast write.
    fn subscribe(&self, listener: ChangeListener);
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn set_quiet(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_quiet(key, value)
    }

    fn subscribe(&self, listener: ChangeListener) {
        (**self).subscribe(listener)
    }
}

/// Shared listener registry for store implementations.
#[derive(Default)]
pub(crate) struct ChangeHub {
    listeners: Mutex<Vec<ChangeListener>>,
}

impl ChangeHub {
    pub(crate) fn subscribe(&self, listener: ChangeListener) {
        match self.listeners.lock() {
            Ok(mut listeners) => listeners.push(listener),
            Err(_) => warn!("event=store_subscribe module=store status=degraded reason=lock_poisoned"),
        }
    }

    /// Best-effort broadcast; listeners run outside the registry lock.
    pub(crate) fn notify(&self) {
        let snapshot = match self.listeners.lock() {
            Ok(listeners) => listeners.clone(),
            Err(_) => {
                warn!("event=store_notify module=store status=degraded reason=lock_poisoned");
                return;
            }
        };
        for listener in snapshot {
            listener();
        }
    }
}

/// Reads a JSON array under `key`, degrading to empty on any failure.
pub fn read_list<T, S>(store: &S, key: &str) -> Vec<T>
where
    T: DeserializeOwned,
    S: KvStore + ?Sized,
{
    read_or_default(store, key)
}

/// Reads a JSON object under `key` as a string-keyed map, degrading to
/// empty on any failure.
pub fn read_map<V, S>(store: &S, key: &str) -> BTreeMap<String, V>
where
    V: DeserializeOwned,
    S: KvStore + ?Sized,
{
    read_or_default(store, key)
}

fn read_or_default<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KvStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(err) => {
            warn!("event=store_read module=store status=degraded key={key} error={err}");
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!("event=store_read module=store status=degraded key={key} error={err}");
            T::default()
        }
    }
}

/// Serializes `value` and writes it under `key` with broadcast.
pub fn write_json<T, S>(store: &S, key: &str, value: &T) -> StoreResult<()>
where
    T: Serialize,
    S: KvStore + ?Sized,
{
    store.set(key, &serde_json::to_string(value)?)
}

/// Serializes `value` and writes it under `key` without broadcast.
pub fn write_json_quiet<T, S>(store: &S, key: &str, value: &T) -> StoreResult<()>
where
    T: Serialize,
    S: KvStore + ?Sized,
{
    store.set_quiet(key, &serde_json::to_string(value)?)
}
