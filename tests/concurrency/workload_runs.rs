//! Conflict workload and sweep runs against real stores

use speedmap::{
    random_key, worker_rng, Benchmark, ConflictWorkload, ShardedStore, Store, Workload,
    WorkloadDescriptor, CSV_HEADER,
};

use crate::common::{all_stores, init_tracing, key_number};

fn descriptor(p: f64, r: f64, keyspace: u64, ops: usize) -> WorkloadDescriptor {
    WorkloadDescriptor {
        conflict_probability: p,
        read_ratio: r,
        keyspace,
        ops_per_worker: ops,
    }
}

#[test]
fn scenario_c_conflict_free_run() {
    let workload = ConflictWorkload::new(0.0, 0.5).unwrap();
    let store = ShardedStore::new();

    let result = workload.run(&store, 4).unwrap();
    assert_eq!(result.operations, 20_000);
    assert!(result.duration.as_nanos() > 0);
    assert!(result.throughput() > 0.0);
    assert!(store.len() <= 20_000);
}

#[test]
fn scenario_d_keys_stay_in_partition() {
    let mut rng = worker_rng(Some(11), 1);
    for _ in 0..10_000 {
        let n = key_number(&random_key(&mut rng, 1, 1_000).unwrap());
        assert!((1_000..2_000).contains(&n), "{} escaped partition 1", n);
    }
}

#[test]
fn test_conflict_free_keys_stay_in_worker_partitions() {
    let workload = ConflictWorkload::from_descriptor(descriptor(0.0, 0.0, 100, 500))
        .unwrap()
        .with_seed(3);
    let store = ShardedStore::new();
    workload.run(&store, 3).unwrap();

    for k in 0..100u64 {
        assert!(
            store.get(&format!("{:X}", k)).is_err(),
            "shared key {} written with p = 0",
            k
        );
    }
    let in_worker_ranges = (100..400u64)
        .filter(|k| store.get(&format!("{:X}", k)).is_ok())
        .count();
    assert_eq!(in_worker_ranges, store.len());
}

#[test]
fn test_full_conflict_hits_only_shared_partition() {
    let workload = ConflictWorkload::from_descriptor(descriptor(1.0, 0.5, 50, 300))
        .unwrap()
        .with_seed(8);
    for store in all_stores() {
        workload.run(store.as_ref(), 6).unwrap();
        assert!(store.len() <= 50, "{}: {} keys", store.describe(), store.len());
    }
}

#[test]
fn test_read_only_workload_never_overwrites() {
    // With r = 1 every op is GetOrCreate, so each key keeps its first value
    let workload = ConflictWorkload::from_descriptor(descriptor(1.0, 1.0, 10, 200))
        .unwrap()
        .with_seed(21);
    for store in all_stores() {
        workload.run(store.as_ref(), 4).unwrap();
        let snapshot: Vec<_> = (0..10u64)
            .map(|k| store.get(&format!("{:X}", k)).ok())
            .collect();

        workload.run(store.as_ref(), 4).unwrap();
        let after: Vec<_> = (0..10u64)
            .map(|k| store.get(&format!("{:X}", k)).ok())
            .collect();
        for (before, after) in snapshot.iter().zip(&after) {
            if before.is_some() {
                assert_eq!(before, after, "{}", store.describe());
            }
        }
    }
}

#[test]
fn test_sized_values_every_store() {
    let workload = ConflictWorkload::from_descriptor(descriptor(0.5, 0.5, 200, 200))
        .unwrap()
        .with_value_size(64)
        .with_seed(13);
    for store in all_stores() {
        let result = workload.run(store.as_ref(), 3).unwrap();
        assert_eq!(result.operations, 600);
        assert_eq!(store.get_or_create("0".into(), vec![0; 64]).0.len(), 64);
    }
}

#[test]
fn test_sweep_every_store_emits_csv_rows() {
    init_tracing();
    let workload = ConflictWorkload::from_descriptor(descriptor(0.5, 0.5, 100, 100))
        .unwrap()
        .with_seed(1);
    let stores = all_stores();
    let mut bench = Benchmark::new(workload, 5);
    bench.run_rounds(&stores, 1).unwrap();

    assert_eq!(bench.results().len(), 4 * 5);
    let columns = CSV_HEADER.split(',').count();
    for result in bench.results() {
        let row = result.to_string();
        assert_eq!(row.split(',').count(), columns, "{}", row);
        assert!(row.contains("50% conflict 50% reads"), "{}", row);
    }
}
