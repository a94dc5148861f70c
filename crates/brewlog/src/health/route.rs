use axum::{
    extract::State,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::json;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
}

/// Root handler - shows API info
async fn root_handler() -> Json<serde_json::Value> {
    Json(json!({
        "name": "brewlog",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "logs": "/api/logs/",
            "actions": "/api/logs/actions",
            "download": "/api/logs/download/{file}",
            "chart": "/api/logs/{t}/{id}",
            "health": "/health"
        }
    }))
}

/// Health check handler - the service itself is always up; the log
/// directory may not exist yet if the brewing engine has not written to it.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let directory = state.logs.directory();
    let present = tokio::fs::metadata(directory)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);

    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "log_directory": directory.display().to_string(),
        "log_directory_present": present,
    }))
}
