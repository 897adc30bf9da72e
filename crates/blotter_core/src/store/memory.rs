//! In-memory store backing for tests and ephemeral sessions.

use super::{ChangeHub, ChangeListener, KvStore, StoreError, StoreResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// `Mutex<HashMap>`-backed store. Clones share the same entries and
/// listener registry.
#[derive(Clone, Default)]
pub struct MemoryKvStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    entries: Mutex<HashMap<String, String>>,
    hub: ChangeHub,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys; diagnostic helper for tests.
    pub fn len(&self) -> usize {
        self.inner
            .entries
            .lock()
            .map(|entries| entries.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self
            .inner
            .entries
            .lock()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.set_quiet(key, value)?;
        self.inner.hub.notify();
        Ok(())
    }

    fn set_quiet(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self
            .inner
            .entries
            .lock()
            .map_err(|_| StoreError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn subscribe(&self, listener: ChangeListener) {
        self.inner.hub.subscribe(listener);
    }
}
