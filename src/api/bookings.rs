//! `/api/v1/bookings`

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use super::response::{ApiError, ApiResponse, ApiResult};
use super::session::current_user;
use super::support::{self, newest_first, records, str_field};
use crate::model::Booking;
use crate::{CollectionsExt, DocumentStore};

pub(crate) fn routes<S: DocumentStore + 'static>() -> Router<Arc<S>> {
    Router::new()
        .route("/api/v1/bookings/confirm", post(confirm::<S>))
        .route("/api/v1/bookings/my-bookings", get(recent::<S>))
        .route("/api/v1/bookings/:booking_id", get(detail::<S>))
}

/// `TRV-<first two letters of the type, upper-cased>-<six digits>`.
/// Bookings without a type use `BK`.
pub(crate) fn booking_reference(kind: Option<&str>) -> String {
    let prefix: String = kind.unwrap_or("BK").to_uppercase().chars().take(2).collect();
    let number = 100_000 + Uuid::new_v4().as_u128() % 900_000;
    format!("TRV-{}-{}", prefix, number)
}

/// `POST /api/v1/bookings/confirm`
///
/// Accepts `{ "type": ..., "details": {...} }` and stores a confirmed booking.
async fn confirm<S: DocumentStore>(
    State(store): State<Arc<S>>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> ApiResult {
    let user = current_user(store.as_ref(), &headers)?;
    let kind = payload.get("type").and_then(Value::as_str).map(str::to_string);
    let details = payload.get("details").cloned().unwrap_or_else(|| json!({}));

    let booking = Booking {
        id: support::new_id(),
        user_id: user.id.clone(),
        reference: booking_reference(kind.as_deref()),
        kind,
        status: "confirmed".into(),
        details: details.clone(),
        created_at: support::now(),
        ..Booking::default()
    };
    let booking = store.entities::<Booking>().insert(&booking)?;

    let mut confirmation = match details {
        Value::Object(fields) => fields,
        _ => Map::new(),
    };
    confirmation.insert("booking_id".into(), json!(booking.id));
    confirmation.insert("confirmation_email".into(), json!(user.email));
    confirmation.insert("booking_date".into(), json!(booking.created_at));

    Ok(ApiResponse::ok(json!({
        "reference": booking.reference,
        "status": booking.status,
        "details": confirmation,
    })))
}

/// `GET /api/v1/bookings/my-bookings` - the five newest bookings.
async fn recent<S: DocumentStore>(State(store): State<Arc<S>>) -> ApiResult {
    let mut bookings = store.get_collection("bookings")?;
    newest_first(&mut bookings);
    bookings.truncate(5);
    Ok(ApiResponse::ok(records(bookings)))
}

/// `GET /api/v1/bookings/:booking_id` - owner only.
async fn detail<S: DocumentStore>(
    State(store): State<Arc<S>>,
    Path(booking_id): Path<String>,
    headers: HeaderMap,
) -> ApiResult {
    let user = current_user(store.as_ref(), &headers)?;
    let booking = store
        .get_item("bookings", &booking_id)?
        .ok_or_else(|| ApiError::not_found("Booking"))?;
    if str_field(&booking, "user_id") != user.id {
        return Err(ApiError::Forbidden("Access denied".into()));
    }
    Ok(ApiResponse::ok(Value::Object(booking)))
}
