//! Concurrent access through clones sharing one document.

use std::sync::{Arc, Barrier};
use std::thread;

use serde_json::json;
use traviax_store::DocumentStore;

use crate::support::{read_json, rec, seed, Scratch};

#[test]
fn concurrent_writers_lose_nothing() {
    let scratch = Scratch::new();
    scratch.write(&seed());
    let store = scratch.store();

    let threads = 8;
    let per_thread = 25;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let store = store.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..per_thread {
                    let id = format!("r-{t}-{i}");
                    store
                        .add_item("reels", rec(json!({ "id": id, "likes": 0 })))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let expected = threads * per_thread;
    assert_eq!(store.get_collection("reels").unwrap().len(), expected);
    assert_eq!(store.writes() as usize, expected);

    let on_disk = read_json(&scratch.path());
    assert_eq!(on_disk["reels"].as_array().unwrap().len(), expected);
}

#[test]
fn racing_first_readers_load_once() {
    let scratch = Scratch::new();
    let store = scratch.store();
    let barrier = Arc::new(Barrier::new(6));

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let store = store.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                store.get_collection("users").unwrap().len()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 0);
    }

    // Only the bootstrap write happened.
    assert_eq!(store.writes(), 1);
}

#[test]
fn increments_under_contention_are_serialized_by_the_caller_lock() {
    let scratch = Scratch::new();
    scratch.write(&seed());
    let store = Arc::new(scratch.store());
    let guard = Arc::new(std::sync::Mutex::new(()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let guard = Arc::clone(&guard);
            thread::spawn(move || {
                for _ in 0..10 {
                    let _held = guard.lock().unwrap();
                    let user = store.get_item("users", "u2").unwrap().unwrap();
                    let next = user["checkins"].as_u64().unwrap() + 1;
                    store
                        .update_item("users", "u2", rec(json!({ "checkins": next })))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(
        store.get_item("users", "u2").unwrap().unwrap()["checkins"],
        json!(40)
    );
}
