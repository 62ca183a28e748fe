use crate::{health, post_message};

use mm_hub::AppState;

use std::path::Path;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

/// Largest accepted message submission, attachments included
pub const MAX_SUBMISSION_BYTES: usize = 20 * 1024 * 1024;

/// Build the application router with all endpoints
pub fn build_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        // WebSocket endpoint
        .route("/ws", get(mm_hub::handler))
        // Mailgun-compatible ingestion
        .route(
            "/v3/{domain}/messages",
            post(post_message).layer(DefaultBodyLimit::max(MAX_SUBMISSION_BYTES)),
        )
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        // Viewer UI and anything else on disk
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
