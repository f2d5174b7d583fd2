//! Handlers for liveness and readiness endpoints.

use axum::{
    Json,
    http::header,
    response::{IntoResponse, Response},
};

use crate::api::dto::health::{HealthResponse, ReadyResponse};

/// Name reported by the liveness probe.
pub const SERVICE_NAME: &str = "redirect-service";

/// Returns service liveness.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// ```json
/// { "status": "ok", "service": "redirect-service" }
/// ```
pub async fn health_handler() -> Response {
    json_nosniff(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
    })
}

/// Returns service readiness.
///
/// # Endpoint
///
/// `GET /ready`
///
/// # Response
///
/// ```json
/// { "status": "ready" }
/// ```
pub async fn ready_handler() -> Response {
    json_nosniff(ReadyResponse { status: "ready" })
}

fn json_nosniff<T: serde::Serialize>(body: T) -> Response {
    ([(header::X_CONTENT_TYPE_OPTIONS, "nosniff")], Json(body)).into_response()
}
