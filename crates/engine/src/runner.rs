//! Concurrency sweep runner
//!
//! For each store and each concurrency level `1..=max_concurrency` the
//! workload runs with exactly that many workers and one `BenchResult` is
//! appended. The sweep is fixed: no warm-up discard, no early stopping,
//! no deduplication. Results accumulate in call order across every call.

use speedmap_core::{BenchResult, Result, Store, Workload};
use tracing::{info, warn};

/// Sweep upper bound used when a non-positive one is requested
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Runs a workload against stores over a range of worker counts
#[derive(Debug)]
pub struct Benchmark<W: Workload> {
    workload: W,
    max_concurrency: usize,
    results: Vec<BenchResult>,
}

impl<W: Workload> Benchmark<W> {
    /// Create a runner sweeping `1..=max_concurrency`
    ///
    /// A `max_concurrency` of 0 falls back to [`DEFAULT_MAX_CONCURRENCY`].
    pub fn new(workload: W, max_concurrency: usize) -> Self {
        let max_concurrency = if max_concurrency < 1 {
            warn!(
                target: "speedmap::bench",
                default = DEFAULT_MAX_CONCURRENCY,
                "max_concurrency < 1, using default"
            );
            DEFAULT_MAX_CONCURRENCY
        } else {
            max_concurrency
        };

        Self {
            workload,
            max_concurrency,
            results: Vec::new(),
        }
    }

    /// The workload being swept
    pub fn workload(&self) -> &W {
        &self.workload
    }

    /// Highest concurrency level in the sweep
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Results collected so far, in run order
    pub fn results(&self) -> &[BenchResult] {
        &self.results
    }

    /// Consume the runner, returning its results
    pub fn into_results(self) -> Vec<BenchResult> {
        self.results
    }

    /// Sweep one store through every concurrency level
    ///
    /// # Errors
    ///
    /// The first failing level aborts the sweep. Results already appended
    /// by this call are discarded; results from earlier calls are kept.
    pub fn run(&mut self, store: &dyn Store) -> Result<()> {
        let mark = self.results.len();

        for concurrency in 1..=self.max_concurrency {
            match self.workload.run(store, concurrency) {
                Ok(result) => self.results.push(result),
                Err(e) => {
                    self.results.truncate(mark);
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Repeat the sweep over every store for `rounds` rounds
    ///
    /// # Errors
    ///
    /// Aborts on the first failing sweep; see [`Benchmark::run`].
    pub fn run_rounds<S: Store>(&mut self, stores: &[S], rounds: usize) -> Result<()> {
        let planned = rounds * self.max_concurrency * stores.len();
        info!(
            target: "speedmap::bench",
            workload = %self.workload.descriptor(),
            stores = stores.len(),
            rounds,
            planned_runs = planned,
            "Benchmark commencing"
        );

        for round in 0..rounds {
            for store in stores {
                self.run(store)?;
                info!(
                    target: "speedmap::bench",
                    round,
                    store = %store.describe(),
                    "Sweep complete"
                );
            }
        }

        info!(target: "speedmap::bench", results = self.results.len(), "Benchmark finished");
        Ok(())
    }
}
