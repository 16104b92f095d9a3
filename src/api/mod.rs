//! HTTP transport for the Traviax backend.
//!
//! Requires the `http` feature. Uses axum for routing; every handler reads
//! and writes through a shared [`DocumentStore`].
//!
//! ## Routes
//!
//! - `GET /`, `GET /health`
//! - `/api/v1/auth/me`, `/api/v1/users/...`, `/api/v1/reels/...`,
//!   `/api/v1/places/...`, `/api/v1/checkins/...`, `/api/v1/events/...`,
//!   `/api/v1/bookings/...`
//! - `GET /api/itineraries`, `GET /api/itineraries/:id`
//!
//! Handlers answer with an [`ApiResponse`] envelope. Callers identify
//! themselves with the `x-user-id` header.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use traviax_store::{api, JsonFileStore};
//!
//! let store = Arc::new(JsonFileStore::open("./mock_data/db.json"));
//!
//! // Compose with other axum routes
//! let app = api::router(store.clone());
//!
//! // Or serve directly
//! api::serve(store, "0.0.0.0:8000").await?;
//! ```

mod bookings;
mod checkins;
mod events;
mod itineraries;
mod places;
mod reels;
mod response;
mod session;
mod support;
mod users;

use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::DocumentStore;

pub use response::{ApiError, ApiResponse, ApiResult, ErrorBody};
pub use session::USER_HEADER;

/// Build the axum `Router` over the given store. CORS is open to any origin.
pub fn router<S: DocumentStore + 'static>(store: Arc<S>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(users::routes::<S>())
        .merge(reels::routes::<S>())
        .merge(places::routes::<S>())
        .merge(checkins::routes::<S>())
        .merge(events::routes::<S>())
        .merge(bookings::routes::<S>())
        .merge(itineraries::routes::<S>())
        .layer(middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
        .with_state(store)
}

/// Serve the API at the given address (e.g. `"0.0.0.0:8000"`) until ctrl-c.
pub async fn serve<S: DocumentStore + 'static>(
    store: Arc<S>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(store);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "traviax api listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}

/// `GET /`
async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Welcome to Traviax API", "version": "1.0.0" }))
}

/// `GET /health`
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    response
}
