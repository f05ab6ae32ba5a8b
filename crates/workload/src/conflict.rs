//! Conflict workload
//!
//! Allocates a private key partition to each worker plus one shared
//! "conflict" partition reachable by all of them. With probability `p` an
//! operation targets the shared partition, otherwise the worker's own. A
//! conflict probability of 0 means workers touch disjoint key sets.
//!
//! Workers are numbered from 1 so that partition 0 is always the shared
//! one. The conflict draw does not exclude anything: partition 0 never
//! coincides with a worker's own partition.

use rand::Rng;
use speedmap_core::{BenchResult, Error, Key, Result, Store, Value, Workload, WorkloadDescriptor};
use std::fmt;
use std::thread;
use std::time::Instant;
use tracing::debug;

use crate::random::{random_bytes, random_key, random_mutation, worker_rng};

/// Default number of keys in each partition
pub const MAX_KEYS: u64 = 10_000;

/// Default operations executed by each worker
pub const OPS_PER_WORKER: usize = 5_000;

/// Bytes rewritten per operation when generating random values
const MUTATIONS_PER_OP: usize = 8;

/// One generated operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConflictOp {
    GetOrCreate(Key, Value),
    Put(Key, Value),
}

/// Contention-tunable operation stream
#[derive(Debug, Clone)]
pub struct ConflictWorkload {
    descriptor: WorkloadDescriptor,
    /// 0 for short formatted values, otherwise random values of this size
    value_size: usize,
    seed: Option<u64>,
}

impl ConflictWorkload {
    /// Workload with the default keyspace and operations per worker
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if either probability is outside [0, 1].
    pub fn new(conflict_probability: f64, read_ratio: f64) -> Result<Self> {
        Self::from_descriptor(WorkloadDescriptor {
            conflict_probability,
            read_ratio,
            keyspace: MAX_KEYS,
            ops_per_worker: OPS_PER_WORKER,
        })
    }

    /// Workload with every parameter given explicitly
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if either probability is outside
    /// [0, 1] or the keyspace is zero.
    pub fn from_descriptor(descriptor: WorkloadDescriptor) -> Result<Self> {
        check_probability("conflict probability", descriptor.conflict_probability)?;
        check_probability("read ratio", descriptor.read_ratio)?;
        if descriptor.keyspace == 0 {
            return Err(Error::InvalidConfig("keyspace must be at least 1".to_string()));
        }
        Ok(Self {
            descriptor,
            value_size: 0,
            seed: None,
        })
    }

    /// Generate random values of `size` bytes instead of formatted ones
    pub fn with_value_size(mut self, size: usize) -> Self {
        self.value_size = size;
        self
    }

    /// Make the operation stream reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Base seed, if any
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Produce operation `op` of worker `worker`
    ///
    /// `buf` is the worker's random value buffer; it is mutated in place and
    /// copied so no two operations share a value.
    pub(crate) fn next_op<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        worker: usize,
        op: usize,
        buf: &mut [u8],
    ) -> Result<ConflictOp> {
        let value = if self.value_size > 0 {
            random_mutation(rng, buf, MUTATIONS_PER_OP);
            buf.to_vec()
        } else {
            format!("{:X}-{:X}", worker, op).into_bytes()
        };

        let partition = if rng.gen::<f64>() < self.descriptor.conflict_probability {
            0
        } else {
            worker as u64
        };
        let key = random_key(rng, partition, self.descriptor.keyspace)?;

        Ok(if rng.gen::<f64>() <= self.descriptor.read_ratio {
            ConflictOp::GetOrCreate(key, value)
        } else {
            ConflictOp::Put(key, value)
        })
    }

    /// Check every partition used by `concurrency` workers fits in `u64`
    ///
    /// Workers `1..=concurrency` plus the shared partition need
    /// `keyspace * (concurrency + 1)` distinct key numbers.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the key space would overflow.
    pub fn check_concurrency(&self, concurrency: usize) -> Result<()> {
        (concurrency as u64)
            .checked_add(1)
            .and_then(|partitions| partitions.checked_mul(self.descriptor.keyspace))
            .map(|_| ())
            .ok_or_else(|| {
                Error::InvalidConfig(format!(
                    "keyspace {} is too large for {} workers",
                    self.descriptor.keyspace, concurrency
                ))
            })
    }

    fn worker(&self, worker: usize, store: &dyn Store) -> Result<()> {
        let mut rng = worker_rng(self.seed, worker);
        let mut buf = random_bytes(&mut rng, self.value_size);

        for op in 0..self.descriptor.ops_per_worker {
            match self.next_op(&mut rng, worker, op, &mut buf)? {
                ConflictOp::GetOrCreate(key, value) => {
                    store.get_or_create(key, value);
                }
                ConflictOp::Put(key, value) => store.put(key, value)?,
            }
        }
        Ok(())
    }
}

fn check_probability(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{} must be in [0, 1], got {}",
            name, value
        )))
    }
}

impl Workload for ConflictWorkload {
    fn run(&self, store: &dyn Store, concurrency: usize) -> Result<BenchResult> {
        self.check_concurrency(concurrency)?;
        let start = Instant::now();

        let outcome: Result<()> = thread::scope(|scope| {
            let handles: Vec<_> = (1..=concurrency)
                .map(|worker| scope.spawn(move || self.worker(worker, store)))
                .collect();

            // Join every handle before reporting so no worker outlives the run
            handles
                .into_iter()
                .enumerate()
                .map(|(idx, handle)| {
                    handle
                        .join()
                        .map_err(|_| Error::WorkerPanicked(idx + 1))
                        .and_then(|r| r)
                })
                .collect::<Vec<_>>()
                .into_iter()
                .collect()
        });

        let duration = start.elapsed();
        outcome?;

        let result = BenchResult {
            store: store.describe(),
            workload: self.descriptor,
            concurrency,
            operations: concurrency as u64 * self.descriptor.ops_per_worker as u64,
            duration,
        };

        debug!(
            target: "speedmap::workload",
            store = %result.store,
            concurrency,
            operations = result.operations,
            duration_ns = duration.as_nanos() as u64,
            "Workload run complete"
        );

        Ok(result)
    }

    fn descriptor(&self) -> WorkloadDescriptor {
        self.descriptor
    }
}

impl fmt::Display for ConflictWorkload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.descriptor, f)
    }
}
