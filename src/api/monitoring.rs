//! Prometheus metrics
//!
//! Counters for plays, rejections and money flow, exported in the text
//! exposition format on `GET /metrics`.

use crate::games::types::GameOutcome;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use prometheus::{Counter, Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

use super::handlers::AppState;

/// Game metrics backed by a private registry
#[derive(Clone)]
pub struct GameMetrics {
    registry: Registry,
    plays_total: IntCounterVec,
    rejected_total: IntCounter,
    failures_total: IntCounter,
    wagered_total: Counter,
    paid_total: Counter,
}

impl GameMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let plays_total = IntCounterVec::new(
            Opts::new("plinko_plays_total", "Games played, by difficulty level"),
            &["difficulty"],
        )?;
        let rejected_total = IntCounter::new(
            "plinko_rejected_requests_total",
            "Play requests rejected by validation",
        )?;
        let failures_total = IntCounter::new(
            "plinko_failed_plays_total",
            "Plays that failed with an internal error",
        )?;
        let wagered_total = Counter::new("plinko_wagered_total", "Sum of accepted bets")?;
        let paid_total = Counter::new("plinko_paid_total", "Sum of wins paid out")?;

        registry.register(Box::new(plays_total.clone()))?;
        registry.register(Box::new(rejected_total.clone()))?;
        registry.register(Box::new(failures_total.clone()))?;
        registry.register(Box::new(wagered_total.clone()))?;
        registry.register(Box::new(paid_total.clone()))?;

        Ok(Self {
            registry,
            plays_total,
            rejected_total,
            failures_total,
            wagered_total,
            paid_total,
        })
    }

    /// Record a completed game
    pub fn record_play(&self, difficulty: u32, bet: f64, outcome: &GameOutcome) {
        let label = difficulty.to_string();
        self.plays_total.with_label_values(&[label.as_str()]).inc();
        self.wagered_total.inc_by(bet);
        self.paid_total.inc_by(outcome.win);
    }

    pub fn record_rejection(&self) {
        self.rejected_total.inc();
    }

    pub fn record_failure(&self) {
        self.failures_total.inc();
    }

    pub fn plays(&self, difficulty: u32) -> u64 {
        let label = difficulty.to_string();
        self.plays_total.with_label_values(&[label.as_str()]).get()
    }

    pub fn rejections(&self) -> u64 {
        self.rejected_total.get()
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

/// Metrics endpoint
/// GET /metrics
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.metrics.render() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to render metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
