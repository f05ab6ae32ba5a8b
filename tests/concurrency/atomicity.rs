//! GetOrCreate atomicity
//!
//! N workers released by a barrier race GetOrCreate on the same fresh key
//! with distinct default values. Exactly one must report `created`, and all
//! must return the winner's value.

use speedmap::{OptimisticStore, Store, Value};
use std::sync::Barrier;
use std::thread;

use crate::common::all_stores;

const WORKERS: usize = 16;

/// Race `WORKERS` GetOrCreate calls on `key`, returning every outcome
fn race(store: &dyn Store, key: &str) -> Vec<(Value, bool)> {
    let barrier = Barrier::new(WORKERS);

    thread::scope(|scope| {
        let handles: Vec<_> = (0..WORKERS)
            .map(|i| {
                let barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();
                    store.get_or_create(key.to_string(), format!("worker-{}", i).into_bytes())
                })
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
}

fn assert_single_winner(store: &dyn Store, key: &str, outcomes: &[(Value, bool)]) {
    let creators = outcomes.iter().filter(|(_, created)| *created).count();
    assert_eq!(
        creators,
        1,
        "{}: key {} created {} times",
        store.describe(),
        key,
        creators
    );

    let (winner, _) = outcomes.iter().find(|(_, created)| *created).unwrap();
    for (actual, _) in outcomes {
        assert_eq!(actual, winner, "{}: divergent value for {}", store.describe(), key);
    }
    assert_eq!(&store.get(key).unwrap(), winner);
}

#[test]
fn test_get_or_create_single_winner_all_stores() {
    for store in all_stores() {
        for k in 0..50 {
            let key = format!("fresh-{}", k);
            let outcomes = race(store.as_ref(), &key);
            assert_single_winner(store.as_ref(), &key, &outcomes);
        }
    }
}

/// Dedicated stress for the double-checked path: many rounds so the gap
/// between releasing the shared lock and taking the exclusive one is hit.
#[test]
fn test_optimistic_double_check_stress() {
    let store = OptimisticStore::new();
    for k in 0..1_000 {
        let key = format!("{:X}", k);
        let outcomes = race(&store, &key);
        assert_single_winner(&store, &key, &outcomes);
    }
    assert_eq!(store.len(), 1_000);
}

#[test]
fn test_existing_key_never_created() {
    for store in all_stores() {
        store.put("taken".into(), b"original".to_vec()).unwrap();
        let outcomes = race(store.as_ref(), "taken");
        assert!(outcomes.iter().all(|(v, created)| !created && v == b"original"));
    }
}
