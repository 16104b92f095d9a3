use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tempfile::TempDir;
use traviax_store::{into_record, JsonFileStore, Record};

/// A scratch directory holding `db.json`.
pub struct Scratch {
    pub dir: TempDir,
}

impl Scratch {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("db.json")
    }

    pub fn write(&self, value: &Value) {
        fs::write(self.path(), serde_json::to_string_pretty(value).unwrap()).unwrap();
    }

    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::open(self.path())
    }
}

pub fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

pub fn rec(value: Value) -> Record {
    into_record(value).unwrap()
}

/// A small document in the shape the app ships with.
pub fn seed() -> Value {
    json!({
        "users": [
            { "id": "u1", "username": "ayse", "city": "Istanbul", "checkins": 3 },
            { "id": "u2", "username": "omar", "city": "Dubai", "checkins": 0 }
        ],
        "places": [
            { "id": "p1", "name": "Galata Tower", "city": "Istanbul", "rating": 4.7 },
            { "id": "p2", "name": "Burj Khalifa", "city": "Dubai", "rating": 4.9 }
        ],
        "checkins": [
            { "id": "c1", "user_id": "u1", "place_id": "p1", "rating": 5 },
            { "id": "c2", "user_id": "u2", "place_id": "p2", "rating": 4 },
            { "id": "c3", "user_id": "u1", "place_id": "p2", "rating": 4 }
        ]
    })
}
