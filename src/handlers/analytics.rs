use axum::{extract::State, http::StatusCode, response::Json};

use crate::app_state::AppState;
use crate::models::{AnalyticsSnapshot, StatsSummary};
use crate::services::analytics_service;

use super::upstream_error;

/// GET /api/v1/analytics
#[utoipa::path(
    get,
    path = "/api/v1/analytics",
    responses(
        (status = 200, description = "Derived analytics snapshot", body = AnalyticsSnapshot),
        (status = 502, description = "Report store unavailable")
    )
)]
pub async fn get_analytics(
    State(state): State<AppState>,
) -> Result<Json<AnalyticsSnapshot>, (StatusCode, String)> {
    let reports = state.upstream.fetch_reports().await.map_err(upstream_error)?;
    let snapshot = analytics_service::aggregate(&reports, chrono::Utc::now().date_naive());
    Ok(Json(snapshot))
}

/// GET /api/v1/stats
///
/// Advisory pass-through of the report store's own summary totals. The
/// dashboard may show these beside the derived snapshot; the two are not
/// reconciled here.
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    responses(
        (status = 200, description = "Upstream summary totals", body = StatsSummary),
        (status = 502, description = "Report store unavailable")
    )
)]
pub async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<StatsSummary>, (StatusCode, String)> {
    let stats = state.upstream.fetch_stats().await.map_err(upstream_error)?;
    Ok(Json(stats))
}
