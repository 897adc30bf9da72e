//! SQLite store backing over the `kv_entries` table.
//!
//! # Invariants
//! - Constructor rejects connections whose migrations have not run.
//! - Writes replace whole values; `updated_at` tracks the last write.

use super::{ChangeHub, ChangeListener, KvStore, StoreError, StoreResult};
use crate::db::migrations::latest_version;
use rusqlite::{params, Connection, OptionalExtension};

/// Store backed by an already-migrated SQLite connection.
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
    hub: ChangeHub,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Wraps a connection after validating its schema state.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` is 0.
    /// - `MissingRequiredTable` when `kv_entries` is absent.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version == 0 {
            return Err(StoreError::UninitializedConnection {
                expected_version: latest_version(),
                actual_version,
            });
        }

        let table_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'kv_entries';",
            [],
            |row| row.get(0),
        )?;
        if table_count == 0 {
            return Err(StoreError::MissingRequiredTable("kv_entries"));
        }

        Ok(Self {
            conn,
            hub: ChangeHub::default(),
        })
    }
}

impl KvStore for SqliteKvStore<'_> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.set_quiet(key, value)?;
        self.hub.notify();
        Ok(())
    }

    fn set_quiet(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn subscribe(&self, listener: ChangeListener) {
        self.hub.subscribe(listener);
    }
}
