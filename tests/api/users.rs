use axum::http::{Method, StatusCode};
use serde_json::json;
use traviax_store::DocumentStore;

use crate::support::{app, call, get, ids};

#[tokio::test]
async fn profile_is_enriched() {
    let (app, _) = app();
    let (status, body) = get(&app, "/api/v1/users/u1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["username"], "ayse");
    assert_eq!(data["total_checkins"], 1);
    assert_eq!(data["posts_count"], 2);
    assert_eq!(ids(&data["wall_posts"]), ["w2", "w1"]);
    assert_eq!(data["wall_posts"][0]["user"]["full_name"], "Ayse Kaya");
    assert_eq!(data["bookings_count"], 0);
}

#[tokio::test]
async fn unknown_user_is_404_envelope() {
    let (app, _) = app();
    let (status, body) = get(&app, "/api/v1/users/nobody").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "success": false, "data": null, "error": { "message": "User not found" } })
    );
}

#[tokio::test]
async fn auth_me_requires_header() {
    let (app, _) = app();

    let (status, body) = get(&app, "/api/v1/auth/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, body) = call(&app, Method::GET, "/api/v1/auth/me", Some("u2"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "omar@traviax.app");

    let (status, _) = call(&app, Method::GET, "/api/v1/auth/me", Some("ghost"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn posting_to_own_wall() {
    let (app, store) = app();

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/users/u1/post",
        Some("u1"),
        Some(json!({ "content": "Ferry to Kadikoy" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let post = &body["data"];
    assert_eq!(post["content"], "Ferry to Kadikoy");
    assert_eq!(post["likes"], 0);
    assert_eq!(post["user"]["username"], "ayse");

    let id = post["id"].as_str().unwrap();
    assert!(store.get_item("posts", id).unwrap().is_some());

    let (_, wall) = get(&app, "/api/v1/users/u1/wall").await;
    assert_eq!(wall["data"][0]["id"], post["id"]);
}

#[tokio::test]
async fn posting_to_another_wall_is_forbidden() {
    let (app, store) = app();

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/users/u1/post",
        Some("u2"),
        Some(json!({ "content": "hi" })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["message"], "Can only post to your own wall");
    assert_eq!(store.get_collection("posts").unwrap().len(), 2);
}

#[tokio::test]
async fn checkins_and_visited_places() {
    let (app, _) = app();

    let (_, body) = get(&app, "/api/v1/users/u1/checkins").await;
    assert_eq!(body["data"][0]["place"]["name"], "Galata Tower");

    let (_, body) = get(&app, "/api/v1/users/u1/places").await;
    assert_eq!(ids(&body["data"]), ["p1"]);
    assert_eq!(body["data"][0]["user_rating"], 5);
    assert_eq!(body["data"][0]["last_visit"], "2024-05-02T09:00:00");
}
