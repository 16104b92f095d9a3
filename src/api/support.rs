//! Shared pieces for the route handlers.

use std::cmp::Ordering;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use uuid::Uuid;

use super::response::ApiError;
use crate::model::{Place, User};
use crate::{CollectionsExt, Criteria, DocumentStore, Record};

/// Criteria matching a single field.
pub(crate) fn by_field(field: &str, value: impl Into<Value>) -> Criteria {
    let mut criteria = Criteria::new();
    criteria.insert(field.to_string(), value.into());
    criteria
}

/// One-field partial record for `update_item`.
pub(crate) fn set(field: &str, value: impl Into<Value>) -> Record {
    by_field(field, value)
}

pub(crate) fn records(items: Vec<Record>) -> Value {
    Value::Array(items.into_iter().map(Value::Object).collect())
}

pub(crate) fn str_field<'a>(record: &'a Record, field: &str) -> &'a str {
    record.get(field).and_then(Value::as_str).unwrap_or("")
}

pub(crate) fn count_field(record: &Record, field: &str) -> u64 {
    record.get(field).and_then(Value::as_u64).unwrap_or(0)
}

fn number_field(record: &Record, field: &str) -> f64 {
    record.get(field).and_then(Value::as_f64).unwrap_or(0.0)
}

/// Stable sort on `created_at`, newest first. Missing timestamps sort last.
pub(crate) fn newest_first(items: &mut [Record]) {
    items.sort_by(|a, b| str_field(b, "created_at").cmp(str_field(a, "created_at")));
}

/// Stable sort on a numeric field, highest first.
pub(crate) fn highest_first(items: &mut [Record], field: &str) {
    items.sort_by(|a, b| {
        number_field(b, field)
            .partial_cmp(&number_field(a, field))
            .unwrap_or(Ordering::Equal)
    });
}

/// Case-insensitive substring test on a string field.
pub(crate) fn field_contains(record: &Record, field: &str, needle_lower: &str) -> bool {
    str_field(record, field).to_lowercase().contains(needle_lower)
}

pub(crate) fn field_equals(record: &Record, field: &str, value_lower: &str) -> bool {
    str_field(record, field).to_lowercase() == value_lower
}

/// Validate a `limit` query parameter against `1..=max`.
pub(crate) fn limit(requested: Option<usize>, default: usize, max: usize) -> Result<usize, ApiError> {
    match requested.unwrap_or(default) {
        n if (1..=max).contains(&n) => Ok(n),
        n => Err(ApiError::Rejected(format!(
            "limit must be between 1 and {}, got {}",
            max, n
        ))),
    }
}

/// Decode a JSON request body, reporting shape errors as 422s.
pub(crate) fn body<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Rejected(e.to_string()))
}

pub(crate) fn insert(record: &mut Record, field: &str, value: Value) {
    record.insert(field.to_string(), value);
}

/// `{ username, avatar, full_name }` of a user, if the user exists.
pub(crate) fn user_card<S>(store: &S, user_id: &str) -> Result<Option<Value>, ApiError>
where
    S: DocumentStore + ?Sized,
{
    Ok(store.entities::<User>().get(user_id)?.map(|user| user.card()))
}

/// `{ name, city, cover_photo }` of a place, if the place exists.
pub(crate) fn place_card<S>(store: &S, place_id: &str) -> Result<Option<Value>, ApiError>
where
    S: DocumentStore + ?Sized,
{
    Ok(store
        .entities::<Place>()
        .get(place_id)?
        .map(|place| place.card()))
}

/// Attach the author card under `user` when the author exists.
pub(crate) fn with_user<S>(store: &S, record: &mut Record) -> Result<(), ApiError>
where
    S: DocumentStore + ?Sized,
{
    let user_id = str_field(record, "user_id").to_string();
    if let Some(card) = user_card(store, &user_id)? {
        insert(record, "user", card);
    }
    Ok(())
}

/// Attach the place card under `place` when the place exists.
pub(crate) fn with_place<S>(store: &S, record: &mut Record) -> Result<(), ApiError>
where
    S: DocumentStore + ?Sized,
{
    let place_id = str_field(record, "place_id").to_string();
    if let Some(card) = place_card(store, &place_id)? {
        insert(record, "place", card);
    }
    Ok(())
}

/// A user card that also carries the id, as shown on reels.
pub(crate) fn creator_card(user: &User) -> Value {
    let mut card = user.card();
    card["id"] = json!(user.id);
    card
}

/// Naive UTC timestamp with microseconds, e.g. `2024-05-01T09:30:00.000000`.
pub(crate) fn now() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}
