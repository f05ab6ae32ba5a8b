//! Benchmark result records
//!
//! Plain data handed to an external report writer. Each `BenchResult`
//! renders as one delimiter-free CSV row via `Display`; the fields never
//! contain commas so no escaping is needed.

use std::fmt;
use std::time::Duration;

/// Column names matching the `Display` rendering of [`BenchResult`]
pub const CSV_HEADER: &str = "store,workload,concurrency,operations,duration (ns),throughput";

/// Parameters of a conflict workload
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkloadDescriptor {
    /// Probability in [0, 1] that an operation targets the shared partition
    pub conflict_probability: f64,
    /// Probability in [0, 1] that an operation is GetOrCreate rather than Put
    pub read_ratio: f64,
    /// Number of keys in each partition
    pub keyspace: u64,
    /// Operations executed by every worker
    pub ops_per_worker: usize,
}

impl fmt::Display for WorkloadDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prob = self.conflict_probability * 100.0;

        if self.read_ratio >= 1.0 {
            return write!(f, "{:.0}% conflict read-only", prob);
        }

        if self.read_ratio <= 0.0 {
            return write!(f, "{:.0}% conflict write-only", prob);
        }

        write!(
            f,
            "{:.0}% conflict {:.0}% reads",
            prob,
            self.read_ratio * 100.0
        )
    }
}

/// Outcome of one workload run against one store at one concurrency level
#[derive(Debug, Clone, PartialEq)]
pub struct BenchResult {
    /// `Store::describe()` of the measured store
    pub store: String,
    /// Workload parameters
    pub workload: WorkloadDescriptor,
    /// Number of concurrent workers
    pub concurrency: usize,
    /// Operations attempted (workers × ops per worker)
    pub operations: u64,
    /// Wall-clock time from launch to the last worker finishing
    pub duration: Duration,
}

impl BenchResult {
    /// Operations per second; 0 when either the duration or the count is 0
    pub fn throughput(&self) -> f64 {
        if self.duration.is_zero() || self.operations == 0 {
            return 0.0;
        }
        self.operations as f64 / self.duration.as_secs_f64()
    }
}

impl fmt::Display for BenchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{:.3}",
            self.store,
            self.workload,
            self.concurrency,
            self.operations,
            self.duration.as_nanos(),
            self.throughput()
        )
    }
}
