//! Core traits for store and workload abstraction
//!
//! The runner, the workload generator and any serving wrapper depend only on
//! these traits, so a strategy is chosen at construction time and swapped
//! without touching the layers above.

use crate::error::Result;
use crate::result::{BenchResult, WorkloadDescriptor};
use crate::types::{Key, Value};

/// Capability set shared by every map strategy
///
/// Thread safety: all methods must be safe to call concurrently from
/// multiple threads without external synchronization (requires Send + Sync).
/// A wrapper that exposes a `Store` adds no locking of its own.
pub trait Store: Send + Sync {
    /// (Re)allocate internal structures, leaving the store empty
    ///
    /// # Errors
    ///
    /// Returns `Error::Allocation` if the structures cannot be allocated.
    fn init(&self) -> Result<()>;

    /// Get the current value for a key
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the key is absent.
    fn get(&self, key: &str) -> Result<Value>;

    /// Insert or overwrite the value for a key (last put wins)
    ///
    /// # Errors
    ///
    /// Returns `Error::Allocation` if the map cannot grow.
    fn put(&self, key: Key, value: Value) -> Result<()>;

    /// Remove a key. Absent keys are a no-op.
    fn delete(&self, key: &str);

    /// Return the stored value, inserting `value` first if the key is absent
    ///
    /// Returns `(actual, created)`. Among concurrent callers on the same
    /// absent key exactly one observes `created == true`, and all of them
    /// return the winner's value.
    ///
    /// There is no error channel: if the map cannot grow to hold the new
    /// entry the process aborts, as the standard collections do.
    fn get_or_create(&self, key: Key, value: Value) -> (Value, bool);

    /// Stable short identifier for reporting, e.g. `"sharded(32)"`
    fn describe(&self) -> String;

    /// Number of entries currently held
    fn len(&self) -> usize;

    /// True if the store holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn init(&self) -> Result<()> {
        (**self).init()
    }

    fn get(&self, key: &str) -> Result<Value> {
        (**self).get(key)
    }

    fn put(&self, key: Key, value: Value) -> Result<()> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &str) {
        (**self).delete(key)
    }

    fn get_or_create(&self, key: Key, value: Value) -> (Value, bool) {
        (**self).get_or_create(key, value)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// A synthetic operation stream driven concurrently against a store
pub trait Workload: Send + Sync {
    /// Run with exactly `concurrency` workers and block until all finish
    ///
    /// # Errors
    ///
    /// Any store error or worker panic aborts the run; no partial result
    /// is returned.
    fn run(&self, store: &dyn Store, concurrency: usize) -> Result<BenchResult>;

    /// Parameters this workload was built with
    fn descriptor(&self) -> WorkloadDescriptor;
}
