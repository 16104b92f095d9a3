//! Starts a real server over a file-backed store and exercises it with reqwest.

use std::sync::Arc;

use serde_json::{json, Value};
use traviax_store::api::{self, USER_HEADER};
use traviax_store::{DocumentStore, JsonFileStore};

use crate::support::seed;

/// Bind to port 0 and return the actual address.
async fn start_server(store: Arc<JsonFileStore>) -> String {
    let app = api::router(store);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn health_and_root() {
    let dir = tempfile::tempdir().unwrap();
    let base = start_server(Arc::new(JsonFileStore::open(dir.path().join("db.json")))).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "status": "healthy" }));

    let resp = client.get(format!("{base}/")).send().await.unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["version"], "1.0.0");
}

#[tokio::test]
async fn like_reaches_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    std::fs::write(&path, serde_json::to_string_pretty(&seed()).unwrap()).unwrap();

    let store = Arc::new(JsonFileStore::open(&path));
    let base = start_server(store.clone()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/v1/reels/r2/like"))
        .header(USER_HEADER, "u1")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["likes"], 10);

    let on_disk: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let reel = on_disk["reels"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"] == "r2")
        .unwrap();
    assert_eq!(reel["likes"], 10);
    assert_eq!(store.writes(), 1);
    assert_eq!(
        store.get_item("reels", "r2").unwrap().unwrap()["likes"],
        10
    );
}

#[tokio::test]
async fn missing_credentials_are_401() {
    let dir = tempfile::tempdir().unwrap();
    let base = start_server(Arc::new(JsonFileStore::open(dir.path().join("db.json")))).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/v1/checkins"))
        .json(&json!({ "place_id": "p1", "rating": 3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn any_origin_is_allowed() {
    let dir = tempfile::tempdir().unwrap();
    let base = start_server(Arc::new(JsonFileStore::open(dir.path().join("db.json")))).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/health"))
        .header("origin", "http://localhost:5173")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");

    let preflight = client
        .request(reqwest::Method::OPTIONS, format!("{base}/api/v1/checkins"))
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "x-user-id,content-type")
        .send()
        .await
        .unwrap();
    assert_eq!(preflight.status(), 200);
    assert_eq!(preflight.headers()["access-control-allow-origin"], "*");
    assert!(preflight.headers().contains_key("access-control-allow-methods"));
}
