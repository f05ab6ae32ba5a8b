//! Construction-time strategy selection

use serde::{Deserialize, Serialize};
use speedmap_core::{Error, Result, Store};
use std::fmt;
use std::str::FromStr;

use crate::{BasicStore, ConcurrentMapStore, OptimisticStore, ShardedStore};

/// The available store strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoreKind {
    /// Single global RwLock
    Basic,
    /// Single RwLock with double-checked GetOrCreate
    Optimistic,
    /// Shard-striped locking
    Sharded,
    /// DashMap baseline
    ConcurrentMap,
}

impl StoreKind {
    /// Every strategy, in reporting order
    pub const ALL: [StoreKind; 4] = [
        StoreKind::Basic,
        StoreKind::Optimistic,
        StoreKind::ConcurrentMap,
        StoreKind::Sharded,
    ];

    /// Config name of this strategy
    pub fn name(&self) -> &'static str {
        match self {
            StoreKind::Basic => "basic",
            StoreKind::Optimistic => "optimistic",
            StoreKind::Sharded => "sharded",
            StoreKind::ConcurrentMap => "concurrent-map",
        }
    }

    /// Construct and initialize a store of this kind
    ///
    /// `shards` only applies to [`StoreKind::Sharded`].
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` for zero shards, or `Error::Allocation`
    /// if initialization fails.
    pub fn build(&self, shards: usize) -> Result<Box<dyn Store>> {
        let store: Box<dyn Store> = match self {
            StoreKind::Basic => Box::new(BasicStore::new()),
            StoreKind::Optimistic => Box::new(OptimisticStore::new()),
            StoreKind::Sharded => Box::new(ShardedStore::with_shards(shards)?),
            StoreKind::ConcurrentMap => Box::new(ConcurrentMapStore::new()),
        };
        store.init()?;
        Ok(store)
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StoreKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        StoreKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::InvalidConfig(format!("unknown store kind '{}'", s)))
    }
}
