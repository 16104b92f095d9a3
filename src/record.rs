//! Generic record shape shared by every collection.
//!
//! The store never looks inside a record beyond its `id` field and the
//! fields named in filter criteria. Typed views live in [`crate::model`].

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::StoreError;

/// A single item: field name to JSON value, in insertion order.
pub type Record = Map<String, Value>;

/// Field-to-value pairs that a record must match exactly.
pub type Criteria = Map<String, Value>;

/// The whole document: collection name to its ordered records.
///
/// Collections keep the order they had in the file, new ones go last.
pub type Collections = IndexMap<String, Vec<Record>>;

/// Collections created when the backing file does not exist yet.
pub const DEFAULT_COLLECTIONS: [&str; 9] = [
    "users", "reels", "places", "checkins", "posts", "comments", "events", "bookings", "trips",
];

pub fn default_collections() -> Collections {
    DEFAULT_COLLECTIONS
        .iter()
        .map(|name| (name.to_string(), Vec::new()))
        .collect()
}

/// The record's `id`, if it has a string one.
pub fn record_id(record: &Record) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

/// True when every criteria field is present on the record with an equal value.
///
/// A record missing a criteria field never matches. Empty criteria match everything.
pub fn matches(record: &Record, criteria: &Criteria) -> bool {
    criteria
        .iter()
        .all(|(field, expected)| record.get(field) == Some(expected))
}

/// Shallow merge: top-level keys of `partial` overwrite, all other keys stay.
pub fn merge(record: &mut Record, partial: Record) {
    for (field, value) in partial {
        record.insert(field, value);
    }
}

/// Convert a JSON value into a record. Anything but an object is rejected.
pub fn into_record(value: Value) -> Result<Record, StoreError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Serde(format!(
            "expected a JSON object, got {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub(crate) fn position(items: &[Record], id: &str) -> Option<usize> {
    items.iter().position(|item| record_id(item) == Some(id))
}
