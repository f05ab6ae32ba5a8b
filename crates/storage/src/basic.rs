//! Single-lock store
//!
//! One FxHashMap behind one `parking_lot::RwLock`. Get takes the shared
//! lock; Put, Delete and GetOrCreate hold the exclusive lock for the whole
//! critical section. Correct by total mutual exclusion, and the lock is a
//! single point of serialization for every operation.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use speedmap_core::{Error, Key, Result, Store, Value};
use tracing::debug;

/// Baseline store: one map, one reader-writer lock
#[derive(Debug, Default)]
pub struct BasicStore {
    data: RwLock<FxHashMap<Key, Value>>,
    capacity: usize,
}

impl BasicStore {
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

/// Allocate a fresh map with room for `capacity` entries
pub(crate) fn fresh_map(capacity: usize) -> Result<FxHashMap<Key, Value>> {
    let mut map = FxHashMap::default();
    map.try_reserve(capacity)?;
    Ok(map)
}

/// Insert under an already held write guard, surfacing growth failure
#[inline]
pub(crate) fn insert_checked(map: &mut FxHashMap<Key, Value>, key: Key, value: Value) -> Result<()> {
    map.try_reserve(1)?;
    map.insert(key, value);
    Ok(())
}

impl Store for BasicStore {
    fn init(&self) -> Result<()> {
        let map = fresh_map(self.capacity)?;
        *self.data.write() = map;
        debug!(target: "speedmap::store", store = "basic", capacity = self.capacity, "Store initialized");
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
        let mut data = self.data.write();
        if let Some(actual) = data.get(&key) {
            return (actual.clone(), false);
        }
        data.insert(key, value.clone());
        (value, true)
    }

    fn describe(&self) -> String {
        "basic".to_string()
    }

    fn len(&self) -> usize {
        self.data.read().len()
    }
}
