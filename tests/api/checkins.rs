use axum::http::{Method, StatusCode};
use serde_json::json;
use traviax_store::DocumentStore;

use crate::support::{app, call, get, ids};

#[tokio::test]
async fn create_updates_counters() {
    let (app, store) = app();

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/checkins",
        Some("u2"),
        Some(json!({ "place_id": "p3", "rating": 4, "note": "Great meze" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let checkin = &body["data"];
    assert_eq!(checkin["user_id"], "u2");
    assert_eq!(checkin["rating"], 4);
    assert_eq!(checkin["photos"], json!([]));
    assert_eq!(checkin["place"]["name"], "Karakoy Lokantasi");
    assert_eq!(checkin["user"]["username"], "omar");

    assert_eq!(store.get_item("places", "p3").unwrap().unwrap()["checkins_count"], 1);
    assert_eq!(store.get_item("users", "u2").unwrap().unwrap()["checkins"], 1);
    assert_eq!(store.get_collection("checkins").unwrap().len(), 2);
}

#[tokio::test]
async fn rating_out_of_range_is_rejected() {
    let (app, store) = app();

    for rating in [0, 6, -1] {
        let (status, body) = call(
            &app,
            Method::POST,
            "/api/v1/checkins",
            Some("u2"),
            Some(json!({ "place_id": "p3", "rating": rating })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "rating {rating}");
        assert_eq!(body["success"], false);
    }
    assert_eq!(store.get_collection("checkins").unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_place_is_404() {
    let (app, _) = app();
    let (status, _) = call(
        &app,
        Method::POST,
        "/api/v1/checkins",
        Some("u2"),
        Some(json!({ "place_id": "nope", "rating": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn read_and_like() {
    let (app, _) = app();

    let (_, body) = get(&app, "/api/v1/checkins").await;
    assert_eq!(ids(&body["data"]), ["c1"]);
    assert_eq!(body["data"][0]["place"]["city"], "Istanbul");

    let (_, body) = get(&app, "/api/v1/checkins/c1").await;
    assert_eq!(body["data"]["user"]["username"], "ayse");

    let (_, body) = call(&app, Method::POST, "/api/v1/checkins/c1/like", Some("u2"), None).await;
    assert_eq!(body["data"], json!({ "likes": 1, "liked": true }));

    let (status, body) = get(&app, "/api/v1/checkins/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Check-in not found");
}
