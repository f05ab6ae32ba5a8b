//! Benchmark orchestration for speedmap
//!
//! - Benchmark: sweeps concurrency levels 1..=N against one or more stores
//! - BenchConfig: TOML configuration with defaults for every field
//! - run_config: build the configured stores and run the full sweep

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod runner;

pub use config::{run_config, BenchConfig};
pub use runner::{Benchmark, DEFAULT_MAX_CONCURRENCY};
