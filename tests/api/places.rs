use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::support::{app, call, get, ids};

#[tokio::test]
async fn search_sorts_by_rating() {
    let (app, _) = app();
    let (status, body) = get(&app, "/api/v1/places").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["data"]), ["p2", "p1", "p3"]);
}

#[tokio::test]
async fn search_filters() {
    let (app, _) = app();

    let (_, body) = get(&app, "/api/v1/places?city=istanbul").await;
    assert_eq!(ids(&body["data"]), ["p1", "p3"]);

    let (_, body) = get(&app, "/api/v1/places?query=TOWER").await;
    assert_eq!(ids(&body["data"]), ["p1"]);

    let (_, body) = get(&app, "/api/v1/places?category=food").await;
    assert_eq!(ids(&body["data"]), ["p3"]);

    let (_, body) = get(&app, "/api/v1/places?city=istanbul&limit=1").await;
    assert_eq!(ids(&body["data"]), ["p1"]);
}

#[tokio::test]
async fn detail_has_recent_checkins_and_rating() {
    let (app, _) = app();
    let (_, body) = get(&app, "/api/v1/places/p1").await;

    let place = &body["data"];
    assert_eq!(place["calculated_rating"], 5.0);
    assert_eq!(ids(&place["recent_checkins"]), ["c1"]);
    assert_eq!(place["recent_checkins"][0]["user"]["username"], "ayse");

    let (_, body) = get(&app, "/api/v1/places/p2").await;
    assert!(body["data"].get("calculated_rating").is_none());
}

#[tokio::test]
async fn place_checkins_404_for_unknown_place() {
    let (app, _) = app();
    let (status, body) = get(&app, "/api/v1/places/nope/checkins").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Place not found");

    let (_, body) = get(&app, "/api/v1/places/p1/checkins?limit=5").await;
    assert_eq!(ids(&body["data"]), ["c1"]);
}

#[tokio::test]
async fn save_increments() {
    let (app, _) = app();
    let (_, body) = call(&app, Method::POST, "/api/v1/places/p2/save", Some("u1"), None).await;
    assert_eq!(body["data"], json!({ "saved": true, "saved_count": 3 }));
}

#[tokio::test]
async fn categories_and_popular_cities() {
    let (app, _) = app();

    let (_, body) = get(&app, "/api/v1/places/categories/list").await;
    assert_eq!(body["data"], json!(["Food", "Landmark"]));

    let (_, body) = get(&app, "/api/v1/places/cities/popular").await;
    assert_eq!(
        body["data"],
        json!([
            { "city": "Istanbul", "places_count": 2 },
            { "city": "Dubai", "places_count": 1 }
        ])
    );
}
