//! `/api/v1/checkins`

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use super::response::{ApiError, ApiResponse, ApiResult};
use super::session::current_user;
use super::support::{self, insert, newest_first, records, set};
use crate::model::{Checkin, Place, User};
use crate::{encode, CollectionsExt, DocumentStore};

pub(crate) fn routes<S: DocumentStore + 'static>() -> Router<Arc<S>> {
    Router::new()
        .route("/api/v1/checkins", get(recent::<S>).post(create::<S>))
        .route("/api/v1/checkins/:checkin_id", get(detail::<S>))
        .route("/api/v1/checkins/:checkin_id/like", post(like::<S>))
}

#[derive(Debug, Deserialize)]
struct NewCheckin {
    place_id: String,
    rating: i64,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    photos: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LimitQuery {
    limit: Option<usize>,
}

/// `POST /api/v1/checkins`
///
/// Records the check-in, then bumps the place's `checkins_count` and the
/// user's `checkins`.
async fn create<S: DocumentStore>(
    State(store): State<Arc<S>>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> ApiResult {
    let user = current_user(store.as_ref(), &headers)?;
    let payload: NewCheckin = support::body(payload)?;
    let rating = match u8::try_from(payload.rating) {
        Ok(rating) if (1..=5).contains(&rating) => rating,
        _ => return Err(ApiError::Rejected("rating must be between 1 and 5".into())),
    };

    let places = store.entities::<Place>();
    let place = places
        .get(&payload.place_id)?
        .ok_or_else(|| ApiError::not_found("Place"))?;

    let checkin = Checkin {
        id: support::new_id(),
        user_id: user.id.clone(),
        place_id: payload.place_id,
        rating,
        note: payload.note,
        photos: payload.photos,
        created_at: support::now(),
        ..Checkin::default()
    };
    let checkin = store.entities::<Checkin>().insert(&checkin)?;

    places.update(&place.id, set("checkins_count", place.checkins_count + 1))?;
    let users = store.entities::<User>();
    if let Some(fresh) = users.get(&user.id)? {
        users.update(&user.id, set("checkins", fresh.checkins + 1))?;
    }

    let mut data = encode(&checkin)?;
    insert(&mut data, "place", place.card());
    insert(&mut data, "user", user.card());
    Ok(ApiResponse::ok(Value::Object(data)))
}

/// `GET /api/v1/checkins?limit` - newest across all users.
async fn recent<S: DocumentStore>(
    State(store): State<Arc<S>>,
    Query(params): Query<LimitQuery>,
) -> ApiResult {
    let limit = params.limit.unwrap_or(20);
    let mut checkins = store.get_collection("checkins")?;
    newest_first(&mut checkins);
    checkins.truncate(limit);
    for checkin in &mut checkins {
        support::with_user(store.as_ref(), checkin)?;
        support::with_place(store.as_ref(), checkin)?;
    }
    Ok(ApiResponse::ok(records(checkins)))
}

/// `GET /api/v1/checkins/:checkin_id`
async fn detail<S: DocumentStore>(
    State(store): State<Arc<S>>,
    Path(checkin_id): Path<String>,
) -> ApiResult {
    let mut checkin = store
        .get_item("checkins", &checkin_id)?
        .ok_or_else(|| ApiError::not_found("Check-in"))?;
    support::with_user(store.as_ref(), &mut checkin)?;
    support::with_place(store.as_ref(), &mut checkin)?;
    Ok(ApiResponse::ok(Value::Object(checkin)))
}

/// `POST /api/v1/checkins/:checkin_id/like`
async fn like<S: DocumentStore>(
    State(store): State<Arc<S>>,
    Path(checkin_id): Path<String>,
    headers: HeaderMap,
) -> ApiResult {
    current_user(store.as_ref(), &headers)?;
    let checkin = store
        .get_item("checkins", &checkin_id)?
        .ok_or_else(|| ApiError::not_found("Check-in"))?;

    let likes = support::count_field(&checkin, "likes") + 1;
    store.update_item("checkins", &checkin_id, set("likes", likes))?;
    Ok(ApiResponse::ok(json!({ "likes": likes, "liked": true })))
}
