//! API routes.

use axum::middleware;
use axum::routing::get;
use axum::Router;

use crate::handlers::{download_subtitles, health, list_subtitles, proxy_subtitles};
use crate::middleware::{cors_layer, request_id, request_logging};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/subtitles", get(list_subtitles))
        .route("/download", get(download_subtitles))
        .route("/proxy", get(proxy_subtitles))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
