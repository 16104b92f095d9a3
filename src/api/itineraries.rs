//! `/api/itineraries` - curated multi-day trips.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;
use serde_json::Value;

use super::response::{ApiError, ApiResponse, ApiResult};
use crate::model::Itinerary;
use crate::{DocumentStore, Entity};

pub(crate) fn routes<S: DocumentStore + 'static>() -> Router<Arc<S>> {
    Router::new()
        .route("/api/itineraries", get(list::<S>))
        .route("/api/itineraries/:itinerary_id", get(detail::<S>))
}

/// `GET /api/itineraries` - summaries without the day-by-day plan.
async fn list<S: DocumentStore>(State(store): State<Arc<S>>) -> ApiResult {
    let summaries: Vec<Value> = store
        .get_collection(Itinerary::COLLECTION)?
        .iter()
        .map(|record| Value::Object(Itinerary::summarize(record)))
        .collect();
    Ok(ApiResponse::ok(Value::Array(summaries)))
}

/// `GET /api/itineraries/:itinerary_id`
async fn detail<S: DocumentStore>(
    State(store): State<Arc<S>>,
    Path(itinerary_id): Path<String>,
) -> ApiResult {
    let itinerary = store
        .get_item(Itinerary::COLLECTION, &itinerary_id)?
        .ok_or_else(|| ApiError::not_found("Itinerary"))?;
    Ok(ApiResponse::ok(Value::Object(itinerary)))
}
