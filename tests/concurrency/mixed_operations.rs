//! Mixed concurrent operations
//!
//! Workers interleave every store operation on overlapping keys. Afterwards
//! each surviving value must be one some worker actually wrote.

use speedmap::Store;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crate::common::all_stores;

const WORKERS: usize = 8;
const OPS: usize = 2_000;
const KEYS: usize = 64;

fn value_for(worker: usize, op: usize) -> Vec<u8> {
    format!("{:X}-{:X}", worker, op).into_bytes()
}

fn hammer(store: &dyn Store) {
    thread::scope(|scope| {
        for worker in 0..WORKERS {
            scope.spawn(move || {
                for op in 0..OPS {
                    let key = format!("{:X}", (worker * 7 + op) % KEYS);
                    match op % 4 {
                        0 => store.put(key, value_for(worker, op)).unwrap(),
                        1 => {
                            store.get_or_create(key, value_for(worker, op));
                        }
                        2 => match store.get(&key) {
                            Ok(v) => assert!(!v.is_empty()),
                            Err(e) => assert!(e.is_not_found(), "{:?}", e),
                        },
                        _ => {
                            if op % 16 == 3 {
                                store.delete(&key);
                            }
                        }
                    }
                }
            });
        }
    });
}

#[test]
fn test_mixed_operations_leave_only_written_values() {
    let written: HashSet<Vec<u8>> = (0..WORKERS)
        .flat_map(|w| (0..OPS).map(move |op| value_for(w, op)))
        .collect();

    for store in all_stores() {
        hammer(store.as_ref());

        assert!(store.len() <= KEYS);
        for k in 0..KEYS {
            if let Ok(v) = store.get(&format!("{:X}", k)) {
                assert!(written.contains(&v), "{}: foreign value", store.describe());
            }
        }
    }
}

#[test]
fn test_disjoint_writers_lose_nothing() {
    for store in all_stores() {
        let puts = AtomicUsize::new(0);

        thread::scope(|scope| {
            for worker in 0..WORKERS {
                let store = store.as_ref();
                let puts = &puts;
                scope.spawn(move || {
                    for i in 0..500 {
                        let key = format!("{:X}", worker * 1_000 + i);
                        store.put(key, vec![worker as u8]).unwrap();
                        puts.fetch_add(1, Ordering::Relaxed);
                    }
                });
            }
        });

        assert_eq!(store.len(), puts.load(Ordering::Relaxed), "{}", store.describe());
        assert_eq!(store.get("3E8").unwrap(), vec![1]);
    }
}

#[test]
fn test_concurrent_init_and_readers() {
    // Re-initializing while readers run must not wedge or corrupt the store
    for store in all_stores() {
        for i in 0..100 {
            store.put(format!("{:X}", i), vec![1]).unwrap();
        }

        thread::scope(|scope| {
            let s = store.as_ref();
            scope.spawn(move || {
                for _ in 0..50 {
                    s.init().unwrap();
                }
            });
            for _ in 0..4 {
                scope.spawn(move || {
                    for i in 0..1_000 {
                        let _ = s.get(&format!("{:X}", i % 100));
                    }
                });
            }
        });

        store.init().unwrap();
        assert!(store.is_empty());
    }
}
