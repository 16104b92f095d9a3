//! `/api/v1/events`

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use serde_json::{json, Value};

use super::places::distinct_categories;
use super::response::{ApiError, ApiResponse, ApiResult};
use super::session::current_user;
use super::support::{self, field_contains, field_equals, insert, records, set, str_field};
use crate::model::{Event, User};
use crate::{CollectionsExt, DocumentStore};

pub(crate) fn routes<S: DocumentStore + 'static>() -> Router<Arc<S>> {
    Router::new()
        .route("/api/v1/events", get(upcoming::<S>))
        .route("/api/v1/events/categories/list", get(categories::<S>))
        .route("/api/v1/events/:event_id", get(detail::<S>))
        .route("/api/v1/events/:event_id/join", post(join::<S>))
}

#[derive(Debug, Default, Deserialize)]
struct EventQuery {
    city: Option<String>,
    category: Option<String>,
    limit: Option<usize>,
}

/// `GET /api/v1/events?city&category&limit` - soonest first.
async fn upcoming<S: DocumentStore>(
    State(store): State<Arc<S>>,
    Query(params): Query<EventQuery>,
) -> ApiResult {
    let limit = support::limit(params.limit, 20, 100)?;
    let mut events = store.get_collection("events")?;

    if let Some(city) = params.city.filter(|c| !c.is_empty()) {
        let city = city.to_lowercase();
        events.retain(|e| field_contains(e, "location", &city));
    }
    if let Some(category) = params.category.filter(|c| !c.is_empty()) {
        let category = category.to_lowercase();
        events.retain(|e| field_equals(e, "category", &category));
    }

    events.sort_by(|a, b| str_field(a, "date").cmp(str_field(b, "date")));
    events.truncate(limit);

    for event in &mut events {
        let organizer = support::user_card(store.as_ref(), str_field(event, "organizer_id"))?;
        if let Some(card) = organizer {
            insert(event, "organizer", card);
        }
    }
    Ok(ApiResponse::ok(records(events)))
}

/// `GET /api/v1/events/:event_id` - with the organizer's card and bio.
async fn detail<S: DocumentStore>(
    State(store): State<Arc<S>>,
    Path(event_id): Path<String>,
) -> ApiResult {
    let mut event = store
        .get_item("events", &event_id)?
        .ok_or_else(|| ApiError::not_found("Event"))?;

    let organizer = store
        .entities::<User>()
        .get(str_field(&event, "organizer_id"))?;
    if let Some(organizer) = organizer {
        let mut card = organizer.card();
        card["bio"] = json!(organizer.bio);
        insert(&mut event, "organizer", card);
    }
    Ok(ApiResponse::ok(Value::Object(event)))
}

/// `POST /api/v1/events/:event_id/join` - 400 once `max_attendees` is reached.
async fn join<S: DocumentStore>(
    State(store): State<Arc<S>>,
    Path(event_id): Path<String>,
    headers: HeaderMap,
) -> ApiResult {
    current_user(store.as_ref(), &headers)?;
    let events = store.entities::<Event>();
    let event = events
        .get(&event_id)?
        .ok_or_else(|| ApiError::not_found("Event"))?;
    if event.is_full() {
        return Err(ApiError::BadRequest("Event is full".into()));
    }

    let attendees = event.attendees + 1;
    events.update(&event_id, set("attendees", attendees))?;
    Ok(ApiResponse::ok(json!({
        "joined": true,
        "attendees": attendees,
        "message": format!("Successfully joined {}!", event.title),
    })))
}

/// `GET /api/v1/events/categories/list`
async fn categories<S: DocumentStore>(State(store): State<Arc<S>>) -> ApiResult {
    let events = store.get_collection("events")?;
    Ok(ApiResponse::ok(json!(distinct_categories(&events))))
}
