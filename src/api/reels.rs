//! `/api/v1/reels` - the short video feed.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use super::response::{ApiError, ApiResponse, ApiResult};
use super::session::current_user;
use super::support::{self, by_field, insert, newest_first, records, set, str_field};
use crate::model::{Comment, Reel, User};
use crate::{encode, CollectionsExt, DocumentStore};

pub(crate) fn routes<S: DocumentStore + 'static>() -> Router<Arc<S>> {
    Router::new()
        .route("/api/v1/reels", get(feed::<S>))
        .route("/api/v1/reels/:reel_id", get(detail::<S>))
        .route("/api/v1/reels/:reel_id/like", post(like::<S>))
        .route("/api/v1/reels/:reel_id/comment", post(comment::<S>))
        .route("/api/v1/reels/:reel_id/view", post(view::<S>))
}

#[derive(Debug, Default, Deserialize)]
struct FeedQuery {
    cursor: Option<String>,
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct NewComment {
    content: String,
}

/// `GET /api/v1/reels?cursor&limit`
///
/// Newest first. The cursor is the offset of the next page; an unparsable
/// cursor starts from the top.
async fn feed<S: DocumentStore>(
    State(store): State<Arc<S>>,
    Query(query): Query<FeedQuery>,
) -> ApiResult {
    let limit = support::limit(query.limit, 10, 50)?;
    let start = query
        .cursor
        .as_deref()
        .and_then(|cursor| cursor.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut reels = store.get_collection("reels")?;
    newest_first(&mut reels);
    let total = reels.len();
    let end = start.saturating_add(limit);

    let mut page: Vec<_> = reels.into_iter().skip(start).take(limit).collect();
    let users = store.entities::<User>();
    for reel in &mut page {
        if let Some(creator) = users.get(str_field(reel, "creator_id"))? {
            insert(reel, "creator", support::creator_card(&creator));
        }
    }

    let has_more = end < total;
    Ok(ApiResponse::ok(json!({
        "reels": records(page),
        "cursor": has_more.then(|| end.to_string()),
        "has_more": has_more,
    })))
}

/// `GET /api/v1/reels/:reel_id` - with creator and comments.
async fn detail<S: DocumentStore>(
    State(store): State<Arc<S>>,
    Path(reel_id): Path<String>,
) -> ApiResult {
    let mut reel = store
        .get_item("reels", &reel_id)?
        .ok_or_else(|| ApiError::not_found("Reel"))?;

    if let Some(creator) = store
        .entities::<User>()
        .get(str_field(&reel, "creator_id"))?
    {
        insert(&mut reel, "creator", support::creator_card(&creator));
    }

    let mut comments = store.filter_items("comments", &by_field("reel_id", reel_id.as_str()))?;
    let users = store.entities::<User>();
    for comment in &mut comments {
        if let Some(user) = users.get(str_field(comment, "user_id"))? {
            insert(
                comment,
                "user",
                json!({ "username": user.username, "avatar": user.avatar }),
            );
        }
    }
    insert(&mut reel, "comments_list", records(comments));

    Ok(ApiResponse::ok(Value::Object(reel)))
}

/// `POST /api/v1/reels/:reel_id/like` - every call adds one like.
async fn like<S: DocumentStore>(
    State(store): State<Arc<S>>,
    Path(reel_id): Path<String>,
    headers: HeaderMap,
) -> ApiResult {
    current_user(store.as_ref(), &headers)?;
    let reels = store.entities::<Reel>();
    let reel = reels.get(&reel_id)?.ok_or_else(|| ApiError::not_found("Reel"))?;

    let likes = reel.likes + 1;
    reels.update(&reel_id, set("likes", likes))?;
    Ok(ApiResponse::ok(json!({ "likes": likes, "liked": true })))
}

/// `POST /api/v1/reels/:reel_id/comment`
async fn comment<S: DocumentStore>(
    State(store): State<Arc<S>>,
    Path(reel_id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> ApiResult {
    let author = current_user(store.as_ref(), &headers)?;
    let reels = store.entities::<Reel>();
    let reel = reels.get(&reel_id)?.ok_or_else(|| ApiError::not_found("Reel"))?;
    let payload: NewComment = support::body(payload)?;

    let comment = Comment {
        id: support::new_id(),
        user_id: author.id.clone(),
        reel_id: Some(reel_id.clone()),
        content: payload.content,
        created_at: support::now(),
        ..Comment::default()
    };
    let comment = store.entities::<Comment>().insert(&comment)?;
    reels.update(&reel_id, set("comments", reel.comments + 1))?;

    let mut data = encode(&comment)?;
    insert(
        &mut data,
        "user",
        json!({ "username": author.username, "avatar": author.avatar }),
    );
    Ok(ApiResponse::ok(Value::Object(data)))
}

/// `POST /api/v1/reels/:reel_id/view`
async fn view<S: DocumentStore>(
    State(store): State<Arc<S>>,
    Path(reel_id): Path<String>,
) -> ApiResult {
    let reels = store.entities::<Reel>();
    let reel = reels.get(&reel_id)?.ok_or_else(|| ApiError::not_found("Reel"))?;

    let views = reel.views + 1;
    reels.update(&reel_id, set("views", views))?;
    Ok(ApiResponse::ok(json!({ "views": views })))
}
