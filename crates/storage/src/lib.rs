//! Store strategies for speedmap
//!
//! Four implementations of the `Store` capability set, each a map guarded
//! by its own locking discipline:
//! - BasicStore: one map behind one RwLock (the baseline)
//! - OptimisticStore: BasicStore with a double-checked GetOrCreate
//! - ShardedStore: N independently locked shards routed by FNV-1a
//! - ConcurrentMapStore: DashMap as an off-the-shelf calibration point
//!
//! `StoreKind` selects a strategy at construction time.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod basic;
pub mod concurrent;
pub mod hash;
pub mod kind;
pub mod optimistic;
pub mod sharded;

pub use basic::BasicStore;
pub use concurrent::ConcurrentMapStore;
pub use hash::fnv1a_32;
pub use kind::StoreKind;
pub use optimistic::OptimisticStore;
pub use sharded::{Shard, ShardedStore, DEFAULT_SHARD_COUNT};
