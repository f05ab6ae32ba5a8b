//! Off-the-shelf concurrent map baseline
//!
//! Maps the capability set onto DashMap primitives. Serves as a calibration
//! point for the hand-rolled strategies: if striping by hand does not beat
//! DashMap for this access pattern, it is not worth maintaining.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use speedmap_core::{Error, Key, Result, Store, Value};
use tracing::debug;

/// Store backed by `DashMap`
#[derive(Debug, Default)]
pub struct ConcurrentMapStore {
    data: DashMap<Key, Value>,
}

impl ConcurrentMapStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: DashMap::with_capacity(capacity),
        }
    }
}

impl Store for ConcurrentMapStore {
    fn init(&self) -> Result<()> {
        self.data.clear();
        debug!(target: "speedmap::store", store = "dashmap", "Store initialized");
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Value> {
        self.data
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::NotFound(key.to_string()))
    }

    // DashMap has no fallible reservation; growth failure aborts
    fn put(&self, key: Key, value: Value) -> Result<()> {
        self.data.insert(key, value);
        Ok(())
    }

    fn delete(&self, key: &str) {
        self.data.remove(key);
    }

    fn get_or_create(&self, key: Key, value: Value) -> (Value, bool) {
        // The entry guard holds the key's shard lock across check and insert
        match self.data.entry(key) {
            Entry::Occupied(entry) => (entry.get().clone(), false),
            Entry::Vacant(entry) => {
                entry.insert(value.clone());
                (value, true)
            }
        }
    }

    fn describe(&self) -> String {
        "dashmap".to_string()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
