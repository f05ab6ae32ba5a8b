//! Error types for speedmap
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::types::Key;
use std::collections::TryReserveError;
use std::io;
use thiserror::Error;

/// Result type alias for speedmap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for speedmap
#[derive(Debug, Error)]
pub enum Error {
    /// Key not present in the store
    #[error("no value found for key '{0}'")]
    NotFound(Key),

    /// The map could not grow to hold another entry. Fatal, never retried.
    #[error("allocation failure: {0}")]
    Allocation(#[from] TryReserveError),

    /// Invalid operation or argument
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Configuration value outside its domain
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// A workload worker thread panicked before finishing its operations
    #[error("worker {0} panicked")]
    WorkerPanicked(usize),

    /// I/O error (reading config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// True for the `NotFound` miss returned by `Store::get`
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
