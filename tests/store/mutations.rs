//! CRUD and filter semantics.

use serde_json::json;
use traviax_store::{DocumentStore, InMemoryDocumentStore};

use crate::support::{rec, seed, Scratch};

#[test]
fn insert_then_get() {
    let scratch = Scratch::new();
    scratch.write(&seed());
    let store = scratch.store();

    let record = rec(json!({ "id": "p3", "name": "Hagia Sophia", "city": "Istanbul" }));
    let returned = store.add_item("places", record.clone()).unwrap();

    assert_eq!(returned, record);
    assert_eq!(store.get_item("places", "p3").unwrap(), Some(record));
    assert_eq!(store.get_collection("places").unwrap().len(), 3);
}

#[test]
fn add_to_unknown_collection_creates_it() {
    let scratch = Scratch::new();
    scratch.write(&seed());
    let store = scratch.store();

    store.add_item("trips", rec(json!({ "id": "t1" }))).unwrap();

    assert_eq!(store.get_collection("trips").unwrap().len(), 1);
    assert!(store.load_all().unwrap().contains_key("trips"));
}

#[test]
fn update_merges_instead_of_replacing() {
    let scratch = Scratch::new();
    scratch.write(&seed());
    let store = scratch.store();

    let updated = store
        .update_item("users", "u1", rec(json!({ "checkins": 4, "bio": "explorer" })))
        .unwrap()
        .unwrap();

    assert_eq!(
        updated,
        rec(json!({
            "id": "u1",
            "username": "ayse",
            "city": "Istanbul",
            "checkins": 4,
            "bio": "explorer"
        }))
    );
    assert_eq!(store.get_item("users", "u1").unwrap(), Some(updated));
}

#[test]
fn update_missing_is_a_no_op_without_a_write() {
    let scratch = Scratch::new();
    scratch.write(&seed());
    let store = scratch.store();
    let before = store.load_all().unwrap();

    assert_eq!(
        store.update_item("users", "ghost", rec(json!({ "x": 1 }))).unwrap(),
        None
    );
    assert_eq!(
        store.update_item("nope", "u1", rec(json!({ "x": 1 }))).unwrap(),
        None
    );

    assert_eq!(store.load_all().unwrap(), before);
    assert_eq!(store.writes(), 0);
}

#[test]
fn delete_removes_exactly_one() {
    let scratch = Scratch::new();
    scratch.write(&seed());
    let store = scratch.store();

    assert!(store.delete_item("checkins", "c1").unwrap());
    assert!(!store.delete_item("checkins", "c1").unwrap());
    assert!(!store.delete_item("nope", "c1").unwrap());

    let remaining = store.get_collection("checkins").unwrap();
    assert_eq!(remaining.len(), 2);
    assert_eq!(store.writes(), 1);
}

#[test]
fn filter_is_exact_match_on_every_field() {
    let scratch = Scratch::new();
    scratch.write(&seed());
    let store = scratch.store();

    let by_user = store
        .filter_items("checkins", &rec(json!({ "user_id": "u1" })))
        .unwrap();
    assert_eq!(by_user.len(), 2);

    let both = store
        .filter_items("checkins", &rec(json!({ "user_id": "u1", "rating": 4 })))
        .unwrap();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0]["id"], json!("c3"));

    // No coercion between types, no substring matching.
    assert!(store
        .filter_items("checkins", &rec(json!({ "rating": "4" })))
        .unwrap()
        .is_empty());
    assert!(store
        .filter_items("users", &rec(json!({ "city": "istanbul" })))
        .unwrap()
        .is_empty());

    let everything = store.filter_items("checkins", &rec(json!({}))).unwrap();
    assert_eq!(everything.len(), 3);
}

#[test]
fn duplicate_ids_resolve_to_the_first_record() {
    let store = InMemoryDocumentStore::new();
    store.add_item("reels", rec(json!({ "id": "r1", "n": 1 }))).unwrap();
    store.add_item("reels", rec(json!({ "id": "r1", "n": 2 }))).unwrap();

    assert_eq!(store.get_item("reels", "r1").unwrap().unwrap()["n"], json!(1));

    store.update_item("reels", "r1", rec(json!({ "n": 10 }))).unwrap();
    let ns: Vec<_> = store
        .get_collection("reels")
        .unwrap()
        .into_iter()
        .map(|r| r["n"].clone())
        .collect();
    assert_eq!(ns, [json!(10), json!(2)]);
}

#[test]
fn returned_records_are_copies() {
    let scratch = Scratch::new();
    scratch.write(&seed());
    let store = scratch.store();

    let mut user = store.get_item("users", "u1").unwrap().unwrap();
    user.insert("username".into(), json!("changed"));

    assert_eq!(
        store.get_item("users", "u1").unwrap().unwrap()["username"],
        json!("ayse")
    );
}
