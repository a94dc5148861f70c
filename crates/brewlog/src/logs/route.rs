//! Route — HTTP handlers under `/api/logs`.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Json, Response},
    routing::{delete, get, post},
    Router,
};
use tokio_util::io::ReaderStream;
use tracing::debug;

use super::chart::{ChartKind, ChartSeries};
use super::error::LogError;
use super::record::ActionLogRecord;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// All log endpoints, mounted at their full paths.
///
/// A static segment shadows the captures next to it, so `/actions` and
/// `/download/{id}` also carry the delete and chart methods. Those requests
/// then fail validation with 404 instead of 405.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/logs", get(list_logs_handler))
        .route("/api/logs/", get(list_logs_handler))
        .route(
            "/api/logs/actions",
            get(actions_handler).delete(delete_actions_handler),
        )
        .route(
            "/api/logs/download/{file}",
            get(download_log_handler).post(download_chart_handler),
        )
        .route("/api/logs/{file}", delete(delete_log_handler))
        .route("/api/logs/{t}/{id}", post(chart_handler))
}

/// GET /api/logs/ — names of all log files
async fn list_logs_handler(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.logs.list_log_files().await?))
}

/// GET /api/logs/actions — brewing actions as `[timestamp_ms, action]`
async fn actions_handler(State(state): State<AppState>) -> ApiResult<Json<Vec<ActionLogRecord>>> {
    Ok(Json(state.logs.actions().await?))
}

/// DELETE /api/logs/{file}
async fn delete_log_handler(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> ApiResult<StatusCode> {
    state.logs.delete_log(&file).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/logs/actions — `actions` is not a log file name
async fn delete_actions_handler(State(state): State<AppState>) -> ApiResult<StatusCode> {
    state.logs.delete_log("actions").await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/logs/{t}/{id} — chart series for a sensor, kettle or fermenter.
///
/// The request body is reserved for future filtering and is not read.
async fn chart_handler(
    State(state): State<AppState>,
    Path((t, id)): Path<(String, String)>,
) -> ApiResult<Json<Vec<ChartSeries>>> {
    chart(&state, &t, &id).await
}

/// POST /api/logs/download/{id} — `download` is not a chart type
async fn download_chart_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<ChartSeries>>> {
    chart(&state, "download", &id).await
}

async fn chart(state: &AppState, t: &str, id: &str) -> ApiResult<Json<Vec<ChartSeries>>> {
    let kind: ChartKind = t.parse()?;
    let id: u32 = id.parse().map_err(|_| LogError::InvalidChartId(id.to_string()))?;
    Ok(Json(state.logs.chart(kind, id).await?))
}

/// GET /api/logs/download/{file} — stream the raw file as an attachment
async fn download_log_handler(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> ApiResult<Response> {
    let download = state.logs.open_log(&file).await?;
    debug!(file = %download.filename, bytes = download.len, "Streaming log download");

    // No Content-Length: the engine may still be appending to the file
    Response::builder()
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", download.filename),
        )
        .header(header::CACHE_CONTROL, "no-cache, no-store, must-revalidate")
        .header(header::PRAGMA, "no-cache")
        .header(header::EXPIRES, "0")
        .body(Body::from_stream(ReaderStream::new(download.file)))
        .map_err(|e| ApiError::Internal(format!("Failed to build download response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brewery::fake::{FakeBrewery, RecordingNotifier};
    use crate::brewery::{ControllerKind, Entity, EntityKind, StandardChart};
    use crate::conf::BrewlogConfig;
    use crate::logs::LogService;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    struct TestApp {
        dir: TempDir,
        brewery: Arc<FakeBrewery>,
        notifier: Arc<RecordingNotifier>,
        app: Router,
    }

    fn test_app() -> TestApp {
        let dir = TempDir::new().unwrap();
        let logs_dir = dir.path().join("logs");
        std::fs::create_dir(&logs_dir).unwrap();

        let brewery = Arc::new(FakeBrewery::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let service = LogService::new(
            &logs_dir,
            "action.log",
            brewery.clone(),
            brewery.clone(),
            notifier.clone(),
        );
        let app = router().with_state(AppState::with_service(BrewlogConfig::default(), service));

        TestApp { dir, brewery, notifier, app }
    }

    impl TestApp {
        fn write_log(&self, name: &str, content: &str) {
            std::fs::write(self.dir.path().join("logs").join(name), content).unwrap();
        }

        fn log_exists(&self, name: &str) -> bool {
            self.dir.path().join("logs").join(name).exists()
        }

        async fn send(&self, method: &str, uri: &str) -> Response {
            let request = Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap();
            self.app.clone().oneshot(request).await.unwrap()
        }
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        response.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_list_logs() {
        let app = test_app();
        app.write_log("sensor_1.log", "");
        app.write_log("readme.txt", "");

        for uri in ["/api/logs", "/api/logs/"] {
            let response = app.send("GET", uri).await;
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_json(response).await, json!(["sensor_1.log"]));
        }
    }

    #[tokio::test]
    async fn test_actions() {
        let app = test_app();

        let response = app.send("GET", "/api/logs/actions").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));

        app.write_log("action.log", "2021-01-01 00:00:00,started\nbad,row\n");
        let response = app.send("GET", "/api/logs/actions").await;
        assert_eq!(body_json(response).await, json!([[1609459200000_i64, "started"]]));
    }

    #[tokio::test]
    async fn test_delete_log() {
        let app = test_app();
        app.write_log("sensor_1.log", "2021-06-01 12:00:00,23.5\n");

        let response = app.send("DELETE", "/api/logs/sensor_1.log").await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(body_bytes(response).await.is_empty());
        assert!(!app.log_exists("sensor_1.log"));

        let response = app.send("DELETE", "/api/logs/sensor_1.log").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(app.notifier.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_invalid_name() {
        let app = test_app();
        app.write_log("sensor_1.log", "");

        let response = app.send("DELETE", "/api/logs/sensor_1xlog").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = app.send("DELETE", "/api/logs/..%2Fsecret.log").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(app.log_exists("sensor_1.log"));
        assert!(app.notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_delete_actions_is_not_found() {
        let app = test_app();
        app.write_log("action.log", "2021-01-01 00:00:00,started\n");

        let response = app.send("DELETE", "/api/logs/actions").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], "NOT_FOUND");
        assert!(app.log_exists("action.log"));
        assert!(app.notifier.sent().is_empty());

        let response = app.send("GET", "/api/logs/actions").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_download_log() {
        let app = test_app();
        let content = "2021-06-01 12:00:00,23.5\n2021-06-01 12:00:05,23.7\n";
        app.write_log("sensor_1.log", content);

        let response = app.send("GET", "/api/logs/download/sensor_1.log").await;
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"sensor_1.log\""
        );
        assert_eq!(headers[header::CACHE_CONTROL], "no-cache, no-store, must-revalidate");
        assert_eq!(headers[header::PRAGMA], "no-cache");
        assert_eq!(body_bytes(response).await, content.as_bytes());
    }

    #[tokio::test]
    async fn test_download_outside_log_directory() {
        let app = test_app();
        std::fs::write(app.dir.path().join("secret.log"), "top secret").unwrap();

        let response = app.send("GET", "/api/logs/download/..%2Fsecret.log").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_bytes(response).await;
        assert!(!String::from_utf8_lossy(&body).contains("top secret"));

        let response = app.send("GET", "/api/logs/download/missing.log").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_sensor_chart() {
        let app = test_app();
        app.brewery.add_entity(
            EntityKind::Sensor,
            Entity { id: 1, name: "Mash Temp".into(), logic: None, sensor: None },
        );
        app.write_log("sensor_1.log", "2021-06-01 12:00:00,23.5\n");

        let response = app.send("POST", "/api/logs/s/1").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!([{"name": "Mash Temp", "data": [[1622548800000_i64, 23.5]]}])
        );
    }

    #[tokio::test]
    async fn test_kettle_chart() {
        let app = test_app();
        app.brewery.add_entity(
            EntityKind::Kettle,
            Entity { id: 2, name: "Mash Tun".into(), logic: Some("Hysteresis".into()), sensor: Some(1) },
        );
        app.brewery.add_controller(
            ControllerKind::Kettle,
            "Hysteresis",
            Arc::new(StandardChart::new(ControllerKind::Kettle)),
        );
        app.write_log("kettle_2.log", "2021-06-01 12:00:00,65\n");

        let response = app.send("POST", "/api/logs/k/2").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!([
                {"name": "Temp", "data": []},
                {"name": "Target Temp", "data": [[1622548800000_i64, 65.0]]}
            ])
        );
    }

    #[tokio::test]
    async fn test_chart_lookup_failures_are_not_found() {
        let app = test_app();

        let response = app.send("POST", "/api/logs/s/99").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], "NOT_FOUND");

        for uri in [
            "/api/logs/k/1",
            "/api/logs/f/1",
            "/api/logs/x/1",
            "/api/logs/s/abc",
            "/api/logs/download/1",
        ] {
            let response = app.send("POST", uri).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
        }
    }
}
