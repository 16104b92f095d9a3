//! `/api/v1/users` and `/api/v1/auth/me`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use super::response::{ApiError, ApiResponse, ApiResult};
use super::session::current_user;
use super::support::{self, by_field, insert, newest_first, records, str_field};
use crate::model::{Post, User};
use crate::{encode, CollectionsExt, DocumentStore, Record};

pub(crate) fn routes<S: DocumentStore + 'static>() -> Router<Arc<S>> {
    Router::new()
        .route("/api/v1/auth/me", get(me::<S>))
        .route("/api/v1/users/:user_id", get(profile::<S>))
        .route("/api/v1/users/:user_id/wall", get(wall::<S>))
        .route("/api/v1/users/:user_id/post", post(create_post::<S>))
        .route("/api/v1/users/:user_id/checkins", get(checkins::<S>))
        .route("/api/v1/users/:user_id/places", get(visited_places::<S>))
}

#[derive(Debug, Deserialize)]
struct NewPost {
    content: String,
    #[serde(default)]
    media: Vec<String>,
}

/// `GET /api/v1/auth/me`
async fn me<S: DocumentStore>(State(store): State<Arc<S>>, headers: HeaderMap) -> ApiResult {
    let user = current_user(store.as_ref(), &headers)?;
    ApiResponse::from_data(&user)
}

/// `GET /api/v1/users/:user_id` - profile plus check-ins, wall, places,
/// bookings and events.
async fn profile<S: DocumentStore>(
    State(store): State<Arc<S>>,
    Path(user_id): Path<String>,
) -> ApiResult {
    let user = store
        .entities::<User>()
        .get(&user_id)?
        .ok_or_else(|| ApiError::not_found("User"))?;
    let mut profile = encode(&user)?;

    let checkins = store.filter_items("checkins", &by_field("user_id", user_id.as_str()))?;
    insert(&mut profile, "total_checkins", json!(checkins.len()));
    insert(
        &mut profile,
        "recent_checkins",
        records(checkins.into_iter().take(5).collect()),
    );

    let posts = wall_posts(store.as_ref(), &user_id, Some(&user))?;
    insert(&mut profile, "posts_count", json!(posts.len()));
    insert(&mut profile, "wall_posts", records(posts));

    let visited = store.filter_items("places", &by_field("visited_by", user_id.as_str()))?;
    insert(&mut profile, "visited_places_list", records(visited));

    let bookings = store.filter_items("bookings", &by_field("user_id", user_id.as_str()))?;
    insert(&mut profile, "bookings_count", json!(bookings.len()));
    insert(&mut profile, "bookings", records(bookings));

    let events = store.filter_items("events", &by_field("attendees", user_id.as_str()))?;
    insert(&mut profile, "events_count", json!(events.len()));
    insert(&mut profile, "events", records(events));

    Ok(ApiResponse::ok(Value::Object(profile)))
}

/// `GET /api/v1/users/:user_id/wall`
async fn wall<S: DocumentStore>(
    State(store): State<Arc<S>>,
    Path(user_id): Path<String>,
) -> ApiResult {
    let author = store.entities::<User>().get(&user_id)?;
    let posts = wall_posts(store.as_ref(), &user_id, author.as_ref())?;
    Ok(ApiResponse::ok(records(posts)))
}

/// `POST /api/v1/users/:user_id/post` - only onto the caller's own wall.
async fn create_post<S: DocumentStore>(
    State(store): State<Arc<S>>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> ApiResult {
    let author = current_user(store.as_ref(), &headers)?;
    if author.id != user_id {
        return Err(ApiError::Forbidden("Can only post to your own wall".into()));
    }
    let payload: NewPost = support::body(payload)?;

    let post = Post {
        id: support::new_id(),
        user_id,
        content: payload.content,
        media: payload.media,
        created_at: support::now(),
        ..Post::default()
    };
    let post = store.entities::<Post>().insert(&post)?;

    let mut data = encode(&post)?;
    insert(&mut data, "user", author.card());
    Ok(ApiResponse::ok(Value::Object(data)))
}

/// `GET /api/v1/users/:user_id/checkins` - newest first, with place cards.
async fn checkins<S: DocumentStore>(
    State(store): State<Arc<S>>,
    Path(user_id): Path<String>,
) -> ApiResult {
    let mut checkins = store.filter_items("checkins", &by_field("user_id", user_id.as_str()))?;
    newest_first(&mut checkins);
    for checkin in &mut checkins {
        support::with_place(store.as_ref(), checkin)?;
    }
    Ok(ApiResponse::ok(records(checkins)))
}

/// `GET /api/v1/users/:user_id/places` - distinct places the user checked
/// into, each with the rating and date of the user's latest check-in there.
async fn visited_places<S: DocumentStore>(
    State(store): State<Arc<S>>,
    Path(user_id): Path<String>,
) -> ApiResult {
    let checkins = store.filter_items("checkins", &by_field("user_id", user_id.as_str()))?;

    let mut place_ids: Vec<&str> = Vec::new();
    for checkin in &checkins {
        let place_id = str_field(checkin, "place_id");
        if !place_ids.contains(&place_id) {
            place_ids.push(place_id);
        }
    }

    let mut places = Vec::with_capacity(place_ids.len());
    for place_id in place_ids {
        let Some(mut place) = store.get_item("places", place_id)? else {
            continue;
        };
        if let Some(last) = checkins
            .iter()
            .rev()
            .find(|c| str_field(c, "place_id") == place_id)
        {
            insert(
                &mut place,
                "user_rating",
                last.get("rating").cloned().unwrap_or(Value::Null),
            );
            insert(
                &mut place,
                "last_visit",
                last.get("created_at").cloned().unwrap_or(Value::Null),
            );
        }
        places.push(place);
    }
    Ok(ApiResponse::ok(records(places)))
}

fn wall_posts<S>(store: &S, user_id: &str, author: Option<&User>) -> Result<Vec<Record>, ApiError>
where
    S: DocumentStore + ?Sized,
{
    let mut posts = store.filter_items("posts", &by_field("user_id", user_id))?;
    newest_first(&mut posts);
    if let Some(author) = author {
        for post in &mut posts {
            insert(post, "user", author.card());
        }
    }
    Ok(posts)
}
