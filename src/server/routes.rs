use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::services::ServeDir;
use tracing::debug;
use uuid::Uuid;

use super::state::AppState;
use super::websocket::websocket_handler;

pub fn create_routes(state: AppState) -> Router<AppState> {
    let static_dir = state.config.server.static_dir.clone();

    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/blob/:id", get(serve_blob))
        .fallback_service(ServeDir::new(static_dir))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let backend_healthy = state.backend.health_check().await.unwrap_or(false);
    Json(json!({
        "status": "ok",
        "backend": backend_healthy,
        "pages": state.pages.len()
    }))
}

/// Drop quotes and control characters, which cannot appear in a quoted
/// header parameter.
fn header_safe_filename(name: &str) -> String {
    name.chars().filter(|c| *c != '"' && !c.is_control()).collect()
}

/// Serve a translated document once; the URL is revoked by serving it.
async fn serve_blob(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.downloads.take(&id) {
        Some(blob) => {
            debug!("Serving {} ({} bytes)", blob.filename, blob.bytes.len());
            let disposition = format!("attachment; filename=\"{}\"", header_safe_filename(&blob.filename));
            (
                [
                    (header::CONTENT_TYPE, blob.content_type),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                blob.bytes,
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({"error": "Download expired"}))).into_response(),
    }
}
