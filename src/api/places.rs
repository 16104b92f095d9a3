//! `/api/v1/places` - search, details, check-ins and aggregates.

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use serde_json::{json, Value};

use super::response::{ApiError, ApiResponse, ApiResult};
use super::session::current_user;
use super::support::{
    self, by_field, field_contains, field_equals, highest_first, insert, newest_first, records,
    set,
};
use crate::model::Place;
use crate::{CollectionsExt, DocumentStore, Record};

pub(crate) fn routes<S: DocumentStore + 'static>() -> Router<Arc<S>> {
    Router::new()
        .route("/api/v1/places", get(search::<S>))
        .route("/api/v1/places/categories/list", get(categories::<S>))
        .route("/api/v1/places/cities/popular", get(popular_cities::<S>))
        .route("/api/v1/places/:place_id", get(detail::<S>))
        .route("/api/v1/places/:place_id/checkins", get(checkins::<S>))
        .route("/api/v1/places/:place_id/save", post(save::<S>))
}

#[derive(Debug, Default, Deserialize)]
struct SearchQuery {
    query: Option<String>,
    city: Option<String>,
    category: Option<String>,
    limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct LimitQuery {
    limit: Option<usize>,
}

/// `GET /api/v1/places?query&city&category&limit` - highest rated first.
async fn search<S: DocumentStore>(
    State(store): State<Arc<S>>,
    Query(params): Query<SearchQuery>,
) -> ApiResult {
    let limit = support::limit(params.limit, 20, 100)?;
    let mut places = store.get_collection("places")?;

    if let Some(query) = params.query.filter(|q| !q.is_empty()) {
        let query = query.to_lowercase();
        places.retain(|p| {
            field_contains(p, "name", &query)
                || field_contains(p, "summary", &query)
                || field_contains(p, "location", &query)
        });
    }
    if let Some(city) = params.city.filter(|c| !c.is_empty()) {
        let city = city.to_lowercase();
        places.retain(|p| field_equals(p, "city", &city) || field_contains(p, "location", &city));
    }
    if let Some(category) = params.category.filter(|c| !c.is_empty()) {
        let category = category.to_lowercase();
        places.retain(|p| field_equals(p, "category", &category));
    }

    highest_first(&mut places, "rating");
    places.truncate(limit);
    Ok(ApiResponse::ok(records(places)))
}

/// `GET /api/v1/places/:place_id` - with the ten latest check-ins and the
/// mean of their non-zero ratings.
async fn detail<S: DocumentStore>(
    State(store): State<Arc<S>>,
    Path(place_id): Path<String>,
) -> ApiResult {
    let mut place = store
        .get_item("places", &place_id)?
        .ok_or_else(|| ApiError::not_found("Place"))?;

    let mut checkins = store.filter_items("checkins", &by_field("place_id", place_id.as_str()))?;
    newest_first(&mut checkins);

    if let Some(rating) = mean_rating(&checkins) {
        insert(&mut place, "calculated_rating", json!(rating));
    }

    checkins.truncate(10);
    for checkin in &mut checkins {
        support::with_user(store.as_ref(), checkin)?;
    }
    insert(&mut place, "recent_checkins", records(checkins));

    Ok(ApiResponse::ok(Value::Object(place)))
}

/// `GET /api/v1/places/:place_id/checkins?limit`
async fn checkins<S: DocumentStore>(
    State(store): State<Arc<S>>,
    Path(place_id): Path<String>,
    Query(params): Query<LimitQuery>,
) -> ApiResult {
    let limit = support::limit(params.limit, 20, 100)?;
    if store.get_item("places", &place_id)?.is_none() {
        return Err(ApiError::not_found("Place"));
    }

    let mut checkins = store.filter_items("checkins", &by_field("place_id", place_id.as_str()))?;
    newest_first(&mut checkins);
    checkins.truncate(limit);
    for checkin in &mut checkins {
        support::with_user(store.as_ref(), checkin)?;
    }
    Ok(ApiResponse::ok(records(checkins)))
}

/// `POST /api/v1/places/:place_id/save` - every call adds one save.
async fn save<S: DocumentStore>(
    State(store): State<Arc<S>>,
    Path(place_id): Path<String>,
    headers: HeaderMap,
) -> ApiResult {
    current_user(store.as_ref(), &headers)?;
    let places = store.entities::<Place>();
    let place = places
        .get(&place_id)?
        .ok_or_else(|| ApiError::not_found("Place"))?;

    let saved_count = place.saved_count + 1;
    places.update(&place_id, set("saved_count", saved_count))?;
    Ok(ApiResponse::ok(
        json!({ "saved": true, "saved_count": saved_count }),
    ))
}

/// `GET /api/v1/places/categories/list` - distinct categories, sorted.
async fn categories<S: DocumentStore>(State(store): State<Arc<S>>) -> ApiResult {
    let places = store.get_collection("places")?;
    Ok(ApiResponse::ok(json!(distinct_categories(&places))))
}

/// `GET /api/v1/places/cities/popular` - top ten cities by place count.
async fn popular_cities<S: DocumentStore>(State(store): State<Arc<S>>) -> ApiResult {
    let places = store.get_collection("places")?;

    let mut counts: Vec<(String, u64)> = Vec::new();
    for place in &places {
        let city = place
            .get("city")
            .and_then(Value::as_str)
            .unwrap_or("Unknown");
        match counts.iter_mut().find(|(name, _)| name == city) {
            Some((_, count)) => *count += 1,
            None => counts.push((city.to_string(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let cities: Vec<Value> = counts
        .into_iter()
        .take(10)
        .map(|(city, count)| json!({ "city": city, "places_count": count }))
        .collect();
    Ok(ApiResponse::ok(Value::Array(cities)))
}

/// Sorted distinct `category` values; records without one count as "Other".
pub(crate) fn distinct_categories(items: &[Record]) -> Vec<String> {
    items
        .iter()
        .map(|item| match item.get("category").and_then(Value::as_str) {
            Some(category) => category.to_string(),
            None => "Other".to_string(),
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn mean_rating(checkins: &[Record]) -> Option<f64> {
    let ratings: Vec<f64> = checkins
        .iter()
        .filter_map(|c| c.get("rating").and_then(Value::as_f64))
        .filter(|rating| *rating != 0.0)
        .collect();
    if ratings.is_empty() {
        return None;
    }
    Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
}
