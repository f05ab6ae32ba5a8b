//! Double-checked GetOrCreate
//!
//! Same layout as `BasicStore`, but GetOrCreate first probes under the
//! shared lock and only takes the exclusive lock when the key looks absent.
//! The absence seen under the shared lock is stale by the time the exclusive
//! lock is held, so it is re-validated before inserting.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use speedmap_core::{Error, Key, Result, Store, Value};
use tracing::debug;

use crate::basic::{fresh_map, insert_checked};

/// Store whose GetOrCreate takes the exclusive lock only on the insert path
#[derive(Debug, Default)]
pub struct OptimisticStore {
    data: RwLock<FxHashMap<Key, Value>>,
    capacity: usize,
}

impl OptimisticStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that pre-allocates room for `capacity` entries on init
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: RwLock::new(FxHashMap::with_capacity_and_hasher(
                capacity,
                Default::default(),
            )),
            capacity,
        }
    }
}

impl Store for OptimisticStore {
    fn init(&self) -> Result<()> {
        let map = fresh_map(self.capacity)?;
        *self.data.write() = map;
        debug!(target: "speedmap::store", store = "optimistic", capacity = self.capacity, "Store initialized");
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Value> {
        self.data
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| Error::NotFound(key.to_string()))
    }

    fn put(&self, key: Key, value: Value) -> Result<()> {
        let mut data = self.data.write();
        insert_checked(&mut data, key, value)
    }

    fn delete(&self, key: &str) {
        self.data.write().remove(key);
    }

    fn get_or_create(&self, key: Key, value: Value) -> (Value, bool) {
        // Fast path: shared lock only, released before upgrading
        {
            let data = self.data.read();
            if let Some(actual) = data.get(&key) {
                return (actual.clone(), false);
            }
        }

        let mut data = self.data.write();
        // Re-check: another writer may have inserted between the two locks
        if let Some(actual) = data.get(&key) {
            return (actual.clone(), false);
        }
        data.insert(key, value.clone());
        (value, true)
    }

    fn describe(&self) -> String {
        "optimistic".to_string()
    }

    fn len(&self) -> usize {
        self.data.read().len()
    }
}
