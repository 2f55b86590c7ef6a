//! API Server
//!
//! Router assembly, middleware stack and graceful shutdown.

use super::{
    handlers::AppState,
    middleware::{create_cors_layer, error_body_middleware, request_id_middleware, RequestId},
    monitoring::GameMetrics,
    routes::create_router,
};
use crate::config::ServerConfig;
use crate::errors::PlinkoResult;
use crate::games::processor::GameProcessor;
use axum::{body::Body, http::Request};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn, Span};

/// Plinko HTTP server
pub struct ApiServer {
    config: ServerConfig,
    processor: Arc<GameProcessor>,
}

impl ApiServer {
    pub fn new(config: ServerConfig, processor: Arc<GameProcessor>) -> Self {
        Self { config, processor }
    }

    /// Bind and serve until Ctrl+C or SIGTERM
    pub async fn run(self) -> PlinkoResult<()> {
        let app = build_app(&self.config, self.processor.clone())?;
        let addr = self.socket_addr();

        info!("🌐 Starting Plinko API Server");
        info!("   Listen: http://{}", addr);
        self.log_server_info();

        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("✅ Plinko API Server running");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("🛑 API Server stopped gracefully");
        Ok(())
    }

    fn socket_addr(&self) -> SocketAddr {
        // Host is validated as an IP address when the config is loaded
        let ip = self.config.host.parse().unwrap_or_else(|_| {
            warn!("Invalid host '{}', binding 0.0.0.0", self.config.host);
            std::net::IpAddr::from([0, 0, 0, 0])
        });
        SocketAddr::new(ip, self.config.port)
    }

    fn log_server_info(&self) {
        let limits = self.processor.limits();
        info!("📋 Server Configuration:");
        info!("   CORS: {:?}", self.config.allowed_origins);
        info!("   Request timeout: {}s", self.config.request_timeout_secs);
        info!("   Rows: {}..={}", limits.min_rows, limits.max_rows);
        info!("   Difficulty: {}..={}", limits.min_difficulty, limits.max_difficulty);
        info!("   Bet: {}..={}", limits.min_bet, limits.max_bet);

        info!("📊 Available endpoints:");
        info!("   POST /play     - Drop a ball");
        info!("   GET  /config   - Active limits");
        info!("   GET  /health   - Health check");
        info!("   GET  /metrics  - Prometheus metrics");
    }
}

/// Build the application with its full middleware stack
pub fn build_app(config: &ServerConfig, processor: Arc<GameProcessor>) -> PlinkoResult<axum::Router> {
    let state = Arc::new(AppState {
        processor,
        metrics: Arc::new(GameMetrics::new()?),
        version: env!("CARGO_PKG_VERSION").to_string(),
    });

    // Router::layer wraps outward: the last layer added sees the request first
    Ok(create_router(state)
        .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
        // Inside CORS and tracing, outside the timeout so a 408 gets a JSON body
        .layer(axum::middleware::from_fn(error_body_middleware))
        // CORS before the timeout to handle preflight
        .layer(create_cors_layer(config.allowed_origins.clone()))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        // Outermost, so every span and response carries the ID
        .layer(axum::middleware::from_fn(request_id_middleware)))
}

fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.as_str())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }
}
