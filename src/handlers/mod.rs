pub mod analytics;
pub mod board;
pub mod health;

use axum::http::StatusCode;

pub(crate) fn upstream_error(e: anyhow::Error) -> (StatusCode, String) {
    tracing::error!("upstream failure: {:#}", e);
    (StatusCode::BAD_GATEWAY, e.to_string())
}
