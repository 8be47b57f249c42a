//! HTTP server module

mod api;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::AppState;

pub use api::{HealthResponse, ScoreRequest, ScoreResponse};

/// Create the HTTP router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    let static_dir = state.static_dir.clone();

    let router = Router::new()
        .route("/api/health", get(api::health))
        .route("/api/subjects", get(api::list_subjects))
        .route("/api/examples/:subject", get(api::examples))
        .route("/api/assessment/:subject", get(api::assessment))
        .route("/api/assessment/:subject/score", post(api::score))
        .layer(CorsLayer::permissive())
        .with_state(state);

    match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}
