//! Request Handlers
//!
//! Thin adapters between HTTP and the game processor.

use super::{
    errors::ApiError,
    middleware::RequestId,
    models::*,
    monitoring::GameMetrics,
};
use crate::errors::PlinkoError;
use crate::games::{processor::GameProcessor, types::*};
use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    pub processor: Arc<GameProcessor>,
    pub metrics: Arc<GameMetrics>,
    pub version: String,
}

/// Health check handler
/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Running".to_string(),
    })
}

/// Drop one ball
/// POST /play
pub async fn play_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PlayRequest>, JsonRejection>,
) -> Result<Json<GameOutcome>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        state.metrics.record_rejection();
        ApiError::bad_request(request_id.0.clone(), rejection.body_text())
    })?;

    let play = state.processor.validate(&request).map_err(|e| {
        state.metrics.record_rejection();
        ApiError::from_plinko(request_id.0.clone(), e.into())
    })?;

    match state.processor.play_validated(&play) {
        Ok(outcome) => {
            state.metrics.record_play(play.difficulty, play.bet, &outcome);
            Ok(Json(outcome))
        }
        Err(e) => {
            state.metrics.record_failure();
            Err(ApiError::from_plinko(request_id.0, PlinkoError::Game(e)))
        }
    }
}

/// Any unmatched path
pub async fn not_found_handler(Extension(request_id): Extension<RequestId>) -> ApiError {
    ApiError::not_found(request_id.0, "Route not found".to_string())
}

/// Active limits and difficulty names
/// GET /config
pub async fn config_handler(State(state): State<Arc<AppState>>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        version: state.version.clone(),
        limits: *state.processor.limits(),
        difficulties: state.processor.engine().table().tier_names(),
    })
}
