//! Single-operation throughput probe
//!
//! Launches `n` threads that each perform one operation on key `hex(i)`
//! and times how long it takes for all of them to finish. Measures raw
//! per-operation cost under a burst of concurrent callers rather than the
//! steady-state contention the conflict workload produces.

use speedmap_core::{Error, Result, Store};
use std::fmt;
use std::str::FromStr;
use std::thread;
use std::time::{Duration, Instant};

/// Operation performed by every blast thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `Store::get`; misses are expected and not errors here
    Get,
    /// `Store::put` with the key bytes as value
    Put,
    /// `Store::delete`
    Delete,
    /// `Store::get_or_create` with the key bytes as value
    GetOrCreate,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Get => "Get",
            Operation::Put => "Put",
            Operation::Delete => "Delete",
            Operation::GetOrCreate => "GetOrCreate",
        })
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Get" => Ok(Operation::Get),
            "Put" => Ok(Operation::Put),
            "Delete" => Ok(Operation::Delete),
            "GetOrCreate" => Ok(Operation::GetOrCreate),
            other => Err(Error::InvalidOperation(format!(
                "unknown operation '{}'",
                other
            ))),
        }
    }
}

/// Outcome of a blast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlastResult {
    /// Threads launched, one operation each
    pub operations: u64,
    /// Time from first launch to last join
    pub duration: Duration,
}

impl BlastResult {
    /// Operations per second; 0 when either the duration or the count is 0
    pub fn throughput(&self) -> f64 {
        if self.duration.is_zero() || self.operations == 0 {
            return 0.0;
        }
        self.operations as f64 / self.duration.as_secs_f64()
    }
}

fn apply(store: &dyn Store, i: usize, operation: Operation) -> Result<()> {
    let key = format!("{:X}", i);
    match operation {
        Operation::Get => match store.get(&key) {
            Err(e) if !e.is_not_found() => return Err(e),
            _ => {}
        },
        Operation::Put => {
            let value = key.clone().into_bytes();
            store.put(key, value)?;
        }
        Operation::Delete => store.delete(&key),
        Operation::GetOrCreate => {
            let value = key.clone().into_bytes();
            store.get_or_create(key, value);
        }
    }
    Ok(())
}

/// Run `n` concurrent threads, thread `i` applying `operation` to key `hex(i)`
///
/// # Errors
///
/// Propagates any store error other than a `Get` miss, and
/// `Error::WorkerPanicked` if a thread panics.
pub fn blast(store: &dyn Store, n: usize, operation: Operation) -> Result<BlastResult> {
    let start = Instant::now();

    let outcome: Result<()> = thread::scope(|scope| {
        let handles: Vec<_> = (0..n)
            .map(|i| scope.spawn(move || apply(store, i, operation)))
            .collect();

        handles
            .into_iter()
            .enumerate()
            .map(|(i, handle)| handle.join().map_err(|_| Error::WorkerPanicked(i)).and_then(|r| r))
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    });

    let duration = start.elapsed();
    outcome?;

    Ok(BlastResult {
        operations: n as u64,
        duration,
    })
}
