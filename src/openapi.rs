use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::models::{
    AnalyticsSnapshot, BoardResponse, CategorySlice, DayBucket, DepartmentColumn, HealthResponse,
    Hotspot, Location, MonthBucket, MoveRequest, MoveResponse, Priority, Report, ReportStatus,
    SeverityBucket, StatsSummary, StatusCounts,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::board::get_board,
        crate::handlers::board::move_report,
        crate::handlers::board::refresh_board,
        crate::handlers::analytics::get_analytics,
        crate::handlers::analytics::get_stats,
    ),
    components(
        schemas(
            Report,
            ReportStatus,
            Priority,
            Location,
            DepartmentColumn,
            BoardResponse,
            MoveRequest,
            MoveResponse,
            AnalyticsSnapshot,
            CategorySlice,
            MonthBucket,
            DayBucket,
            StatusCounts,
            SeverityBucket,
            Hotspot,
            StatsSummary,
            HealthResponse
        )
    ),
    tags(
        (name = "civicsync-triage", description = "Assignment board and analytics for the CivicSync dashboard")
    )
)]
pub struct ApiDoc;

pub fn routes() -> SwaggerUi {
    let openapi = ApiDoc::openapi();
    SwaggerUi::new("/api/v1/docs").url("/api/v1/openapi.json", openapi)
}
