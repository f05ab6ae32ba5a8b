//! speedmap - concurrent key/value map strategies under contention
//!
//! Compares four locking strategies for a hot in-process map:
//!
//! - [`BasicStore`]: one map behind one reader-writer lock
//! - [`OptimisticStore`]: double-checked GetOrCreate
//! - [`ShardedStore`]: FNV-1a routed, independently locked shards
//! - [`ConcurrentMapStore`]: DashMap baseline
//!
//! # Quick Start
//!
//! ```
//! use speedmap::{Benchmark, ConflictWorkload, ShardedStore, Store, WorkloadDescriptor};
//!
//! let workload = ConflictWorkload::from_descriptor(WorkloadDescriptor {
//!     conflict_probability: 0.1,
//!     read_ratio: 0.9,
//!     keyspace: 1000,
//!     ops_per_worker: 100,
//! })?
//! .with_seed(42);
//!
//! let mut bench = Benchmark::new(workload, 4);
//! bench.run(&ShardedStore::new())?;
//!
//! for result in bench.results() {
//!     println!("{}", result);
//! }
//! # Ok::<(), speedmap::Error>(())
//! ```

pub use speedmap_core::{
    BenchResult, Error, Key, Result, Store, Value, Workload, WorkloadDescriptor, CSV_HEADER,
};
pub use speedmap_engine::{run_config, BenchConfig, Benchmark, DEFAULT_MAX_CONCURRENCY};
pub use speedmap_storage::{
    fnv1a_32, BasicStore, ConcurrentMapStore, OptimisticStore, ShardedStore, StoreKind,
    DEFAULT_SHARD_COUNT,
};
pub use speedmap_workload::{
    blast, random_bytes, random_key, random_mutation, worker_rng, BlastResult, ConflictWorkload,
    Operation, MAX_KEYS, OPS_PER_WORKER,
};
