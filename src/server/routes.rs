use axum::http::{HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::state::AppState;
use super::ws;

/// Create the HTTP router with all routes.
///
/// Cross-origin access is limited to the configured origin; with none
/// configured no origin is allowed.
pub fn create_router(state: AppState, allowed_origin: Option<&str>) -> Router {
    let mut cors = CorsLayer::new();
    if let Some(origin) = allowed_origin {
        match origin.parse::<HeaderValue>() {
            Ok(origin) => cors = cors.allow_origin(origin),
            Err(e) => warn!("Ignoring unparsable allowed origin: {}", e),
        }
    }

    Router::new()
        .route("/health", get(health_check))
        .route("/v1/stream", get(ws::stream_handler))
        // Request logging middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// GET /health
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
