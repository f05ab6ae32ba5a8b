//! Shard-striped storage
//!
//! Partitions the keyspace into a fixed number of shards, each an
//! FxHashMap behind its own `parking_lot::RwLock`.
//!
//! # Design
//!
//! - Arena of N shards: all allocated at construction, never resized
//! - Routing: `fnv1a_32(key) % N`, pure and stable for the store's lifetime
//! - Every operation locks exactly one shard and releases it before returning
//!
//! # Thread Safety
//!
//! A caller holds at most one shard lock at a time and never acquires a
//! second while holding the first, so there is no lock ordering to get
//! wrong. Keys routed to different shards never contend.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use speedmap_core::{Error, Key, Result, Store, Value};
use tracing::debug;

use crate::basic::{fresh_map, insert_checked};
use crate::hash::fnv1a_32;

/// Shard count used by [`ShardedStore::new`]
pub const DEFAULT_SHARD_COUNT: usize = 32;

/// One independently lockable partition of the keyspace
#[derive(Debug)]
pub struct Shard {
    /// HashMap with FxHash for O(1) lookups
    pub(crate) data: FxHashMap<Key, Value>,
}

impl Shard {
    /// Create a new empty shard
    pub fn new() -> Self {
        Self {
            data: FxHashMap::default(),
        }
    }

    /// Create a shard with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Get number of keys in this shard
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if shard is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for Shard {
    fn default() -> Self {
        Self::new()
    }
}

/// Sharded storage - fixed arena of RwLock<Shard>
///
/// # Example
///
/// ```
/// use speedmap_core::Store;
/// use speedmap_storage::ShardedStore;
///
/// let store = ShardedStore::new();
/// store.put("foo".to_string(), b"bar".to_vec()).unwrap();
/// assert_eq!(store.get("foo").unwrap(), b"bar");
/// assert_eq!(store.describe(), "sharded(32)");
/// ```
pub struct ShardedStore {
    shards: Box<[RwLock<Shard>]>,
    /// Per-shard capacity reserved on init
    shard_capacity: usize,
}

impl ShardedStore {
    /// Create a store with [`DEFAULT_SHARD_COUNT`] shards
    pub fn new() -> Self {
        Self::build(DEFAULT_SHARD_COUNT, 0)
    }

    /// Create a store with `count` shards
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if `count` is zero.
    pub fn with_shards(count: usize) -> Result<Self> {
        Self::with_shards_and_capacity(count, 0)
    }

    /// Create a store with `count` shards, each sized for `shard_capacity` keys
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if `count` is zero.
    pub fn with_shards_and_capacity(count: usize, shard_capacity: usize) -> Result<Self> {
        if count == 0 {
            return Err(Error::InvalidConfig(
                "shard count must be at least 1".to_string(),
            ));
        }
        Ok(Self::build(count, shard_capacity))
    }

    fn build(count: usize, shard_capacity: usize) -> Self {
        let shards = (0..count)
            .map(|_| RwLock::new(Shard::with_capacity(shard_capacity)))
            .collect();
        Self {
            shards,
            shard_capacity,
        }
    }

    /// Number of shards, fixed at construction
    #[inline]
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Index of the shard that owns `key`
    ///
    /// Depends only on the key bytes and the shard count.
    #[inline]
    pub fn shard_for(&self, key: &str) -> usize {
        fnv1a_32(key.as_bytes()) as usize % self.shards.len()
    }

    #[inline]
    fn shard(&self, key: &str) -> &RwLock<Shard> {
        &self.shards[self.shard_for(key)]
    }

    /// Entries held by each shard, in shard order
    pub fn shard_sizes(&self) -> Vec<usize> {
        self.shards.iter().map(|s| s.read().len()).collect()
    }
}

impl Default for ShardedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ShardedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardedStore")
            .field("shard_count", &self.shard_count())
            .field("total_entries", &self.len())
            .finish()
    }
}

// ============================================================================
// Store Implementation
// ============================================================================

impl Store for ShardedStore {
    fn init(&self) -> Result<()> {
        for shard in self.shards.iter() {
            let data = fresh_map(self.shard_capacity)?;
            shard.write().data = data;
        }
        debug!(
            target: "speedmap::store",
            store = "sharded",
            shards = self.shard_count(),
            "Store initialized"
        );
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Value> {
        let shard = self.shard(key).read();
        shard
            .data
            .get(key)
            .cloned()
            .ok_or_else(|| Error::NotFound(key.to_string()))
    }

    fn put(&self, key: Key, value: Value) -> Result<()> {
        let mut shard = self.shard(&key).write();
        insert_checked(&mut shard.data, key, value)
    }

    fn delete(&self, key: &str) {
        self.shard(key).write().data.remove(key);
    }

    fn get_or_create(&self, key: Key, value: Value) -> (Value, bool) {
        let mut shard = self.shard(&key).write();
        if let Some(actual) = shard.data.get(&key) {
            return (actual.clone(), false);
        }
        shard.data.insert(key, value.clone());
        (value, true)
    }

    fn describe(&self) -> String {
        format!("sharded({})", self.shard_count())
    }

    fn len(&self) -> usize {
        self.shards.iter().map(|s| s.read().len()).sum()
    }
}
