//! Health check endpoints.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/health` - Store probe (200 when DynamoDB answers, 503 otherwise)

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::state::AppState;

/// GET /livez - Basic liveness probe.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /health - Store health check.
///
/// The repository bounds its own probe time, so this never hangs on a slow store.
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    if state.products.health().await {
        (StatusCode::OK, Json(serde_json::json!("service OK")))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "error": "database not alive" })),
        )
    }
}
