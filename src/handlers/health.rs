use axum::{http::StatusCode, response::Json};

use crate::models::HealthResponse;

/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    let response = HealthResponse {
        status: "healthy".to_string(),
        service: "civicsync-triage".to_string(),
        time: chrono::Utc::now().to_rfc3339(),
    };

    (StatusCode::OK, Json(response))
}
