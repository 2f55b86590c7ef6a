//! Route Definitions

use super::{handlers::*, monitoring::metrics_handler};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Build the API router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/play", post(play_handler))
        .route("/config", get(config_handler))
        // Prometheus scrape target
        .route("/metrics", get(metrics_handler))
        .fallback(not_found_handler)
        .with_state(state)
}
