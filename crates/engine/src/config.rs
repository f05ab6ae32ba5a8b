//! Benchmark configuration via TOML
//!
//! Every field has a default, so an empty file is a valid configuration
//! and a file only needs the settings it changes.

use serde::{Deserialize, Serialize};
use speedmap_core::{Error, Result, Store, WorkloadDescriptor};
use speedmap_storage::{StoreKind, DEFAULT_SHARD_COUNT};
use speedmap_workload::{ConflictWorkload, MAX_KEYS, OPS_PER_WORKER};
use std::path::Path;

use crate::runner::{Benchmark, DEFAULT_MAX_CONCURRENCY};

/// Benchmark configuration
///
/// # Example
///
/// ```toml
/// rounds = 3
/// max_concurrency = 64
/// conflict_probability = 0.1
/// read_ratio = 0.9
/// stores = ["basic", "sharded"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Outer repetitions of the whole sweep
    pub rounds: usize,
    /// Sweep upper bound (inclusive)
    pub max_concurrency: usize,
    /// Probability an operation targets the shared partition
    pub conflict_probability: f64,
    /// Probability an operation is GetOrCreate rather than Put
    pub read_ratio: f64,
    /// Keys per partition
    pub keyspace: u64,
    /// Operations per worker
    pub ops_per_worker: usize,
    /// 0 for formatted values, otherwise random values of this many bytes
    pub value_size: usize,
    /// Shard count for the sharded store
    pub shards: usize,
    /// Base seed for reproducible workloads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Store strategies to benchmark, in order
    pub stores: Vec<StoreKind>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            rounds: 10,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            conflict_probability: 0.5,
            read_ratio: 0.5,
            keyspace: MAX_KEYS,
            ops_per_worker: OPS_PER_WORKER,
            value_size: 0,
            shards: DEFAULT_SHARD_COUNT,
            seed: None,
            stores: StoreKind::ALL.to_vec(),
        }
    }
}

impl BenchConfig {
    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the document does not parse or a
    /// value is out of range.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BenchConfig = toml::from_str(content)
            .map_err(|e| Error::InvalidConfig(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read, otherwise as
    /// [`BenchConfig::from_toml_str`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Check every value is within its domain
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.shards == 0 {
            return Err(Error::InvalidConfig("shards must be at least 1".to_string()));
        }
        if self.stores.is_empty() {
            return Err(Error::InvalidConfig("no stores selected".to_string()));
        }
        let workload = self.workload()?;
        let max_concurrency = if self.max_concurrency < 1 {
            DEFAULT_MAX_CONCURRENCY
        } else {
            self.max_concurrency
        };
        workload.check_concurrency(max_concurrency)
    }

    /// Descriptor for the configured workload
    pub fn descriptor(&self) -> WorkloadDescriptor {
        WorkloadDescriptor {
            conflict_probability: self.conflict_probability,
            read_ratio: self.read_ratio,
            keyspace: self.keyspace,
            ops_per_worker: self.ops_per_worker,
        }
    }

    /// Build the configured conflict workload
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` for out-of-range workload parameters.
    pub fn workload(&self) -> Result<ConflictWorkload> {
        let workload =
            ConflictWorkload::from_descriptor(self.descriptor())?.with_value_size(self.value_size);
        Ok(match self.seed {
            Some(seed) => workload.with_seed(seed),
            None => workload,
        })
    }

    /// Construct and initialize the selected stores
    ///
    /// # Errors
    ///
    /// Propagates construction or initialization failures.
    pub fn build_stores(&self) -> Result<Vec<Box<dyn Store>>> {
        self.stores.iter().map(|kind| kind.build(self.shards)).collect()
    }

    /// Runner for the configured workload and sweep
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` for out-of-range workload parameters.
    pub fn benchmark(&self) -> Result<Benchmark<ConflictWorkload>> {
        Ok(Benchmark::new(self.workload()?, self.max_concurrency))
    }

    /// Serialize to TOML
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(format!("failed to serialize config: {}", e)))
    }

    /// Commented default configuration
    pub fn default_toml() -> &'static str {
        r#"# speedmap benchmark configuration

# Outer repetitions of the whole sweep
rounds = 10

# Concurrency levels 1..=max_concurrency are measured
max_concurrency = 10

# Probability an operation targets the partition shared by every worker
conflict_probability = 0.5

# Probability an operation is GetOrCreate (otherwise Put)
read_ratio = 0.5

# Keys per partition and operations per worker
keyspace = 10000
ops_per_worker = 5000

# 0 = short formatted values, >0 = random values of this many bytes
value_size = 0

# Shard count for the sharded store
shards = 32

# Base seed for a reproducible operation stream (default: OS entropy)
# seed = 42

stores = ["basic", "optimistic", "concurrent-map", "sharded"]
"#
    }
}

/// Run every configured store through the configured sweep
///
/// # Errors
///
/// Any store or workload failure aborts the whole run.
pub fn run_config(config: &BenchConfig) -> Result<Vec<speedmap_core::BenchResult>> {
    config.validate()?;
    let stores = config.build_stores()?;
    let mut bench = config.benchmark()?;
    bench.run_rounds(&stores, config.rounds)?;
    Ok(bench.into_results())
}
