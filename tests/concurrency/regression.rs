//! Throughput regression guards
//!
//! Timing-sensitive, so ignored by default. Run in release mode on a
//! machine with more cores than the concurrency level under test.

use speedmap::{BasicStore, ConflictWorkload, ShardedStore, Store, Workload};

const CONCURRENCY: usize = 40;
const ATTEMPTS: usize = 5;

fn best_throughput(workload: &ConflictWorkload, store: &dyn Store) -> f64 {
    (0..ATTEMPTS)
        .map(|_| {
            store.init().unwrap();
            workload.run(store, CONCURRENCY).unwrap().throughput()
        })
        .fold(0.0, f64::max)
}

#[test]
#[ignore]
fn test_sharded_not_slower_than_basic_above_shard_count() {
    let workload = ConflictWorkload::new(0.5, 0.5).unwrap().with_seed(42);

    let basic = best_throughput(&workload, &BasicStore::new());
    let sharded = best_throughput(&workload, &ShardedStore::new());

    println!("basic:   {:.0} ops/s", basic);
    println!("sharded: {:.0} ops/s", sharded);
    assert!(
        sharded >= basic,
        "sharded ({:.0}) fell below basic ({:.0}) at concurrency {}",
        sharded,
        basic,
        CONCURRENCY
    );
}

#[test]
#[ignore]
fn test_write_heavy_conflict_free_scales() {
    // p = 0 spreads keys over disjoint partitions; more workers must not
    // collapse throughput on the sharded store
    let workload = ConflictWorkload::new(0.0, 0.0).unwrap().with_seed(9);
    let store = ShardedStore::new();

    let single = workload.run(&store, 1).unwrap().throughput();
    store.init().unwrap();
    let many = workload.run(&store, 8).unwrap().throughput();

    println!("1 worker: {:.0} ops/s, 8 workers: {:.0} ops/s", single, many);
    assert!(many >= single, "throughput collapsed under parallel writers");
}
