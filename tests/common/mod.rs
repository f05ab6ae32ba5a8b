//! Shared test utilities for all integration test suites.
//!
//! Import via `mod common;` from any test file or suite main.rs.

#![allow(dead_code)]

use speedmap::{Store, StoreKind, DEFAULT_SHARD_COUNT};

/// One freshly initialized instance of every store strategy
pub fn all_stores() -> Vec<Box<dyn Store>> {
    StoreKind::ALL
        .iter()
        .map(|kind| kind.build(DEFAULT_SHARD_COUNT).unwrap())
        .collect()
}

/// Route tracing output through the test harness (idempotent)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Parse a workload key back into its number
pub fn key_number(key: &str) -> u64 {
    u64::from_str_radix(key, 16).unwrap()
}
