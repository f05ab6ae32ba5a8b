//! Core types and traits for speedmap
//!
//! This crate defines the contracts shared by every layer:
//! - Key / Value: opaque string keys and byte values
//! - Error: the error hierarchy (NotFound, Allocation, ...)
//! - Store: the capability set every map strategy implements
//! - Workload: a generator that drives a Store with N workers
//! - BenchResult / WorkloadDescriptor: plain records for reporting

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use result::{BenchResult, WorkloadDescriptor, CSV_HEADER};
pub use traits::{Store, Workload};
pub use types::{Key, Value};
