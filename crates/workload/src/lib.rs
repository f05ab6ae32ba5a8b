//! Workload generation for speedmap
//!
//! - ConflictWorkload: per-worker private partitions plus one shared
//!   conflict partition, with tunable conflict probability and read ratio
//! - random: key/value generation from an explicitly passed RNG
//! - blast: one-operation-per-thread throughput probe

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod blast;
pub mod conflict;
pub mod random;

pub use blast::{blast, BlastResult, Operation};
pub use conflict::{ConflictWorkload, MAX_KEYS, OPS_PER_WORKER};
pub use random::{random_bytes, random_key, random_mutation, worker_rng};
