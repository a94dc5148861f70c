//! Serve — build the HTTP router and serve until shutdown.

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, StatusCode},
    Router,
};
use std::net::SocketAddr;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::runtime::stop::shutdown_signal;
use crate::state::AppState;
use crate::{health, logs};

/// Open the listener and serve the API with graceful shutdown.
pub async fn serve(state: AppState) -> Result<()> {
    let addr: SocketAddr = state.config.server.bind_address
        .parse()
        .context("Invalid bind address")?;

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    info!("✓ brewlog is ready!");
    info!("Listening on: http://{}", addr);
    info!("  - Logs API: http://{}/api/logs/", addr);
    info!("  - Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down gracefully");
    Ok(())
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let server = &state.config.server;

    let cors = if server.enable_cors {
        let origins = server.cors_origins
            .iter()
            .filter_map(|s| s.parse::<HeaderValue>().ok())
            .collect::<Vec<_>>();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
            .expose_headers([header::CONTENT_DISPOSITION])
    } else {
        // Same-origin only
        CorsLayer::new()
    };

    let request_timeout = Duration::from_secs(server.write_timeout_secs);

    Router::new()
        .merge(health::route::router())
        .merge(logs::route::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout))
                // Chart requests carry at most a small filter document
                .layer(DefaultBodyLimit::max(64 * 1024))
                .layer(cors)
        )
        .with_state(state)
}
