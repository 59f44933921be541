use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel column for reports with no (or an unrecognized) department.
pub const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum ReportStatus {
    Pending,
    InProgress,
    Resolved,
    #[default]
    Unknown,
}

impl From<String> for ReportStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => Self::Pending,
            "in-progress" => Self::InProgress,
            "resolved" => Self::Resolved,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// GeoJSON point as stored by the report backend: coordinates are
/// `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Location {
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub status: ReportStatus,
    #[serde(default, deserialize_with = "de_opt_severity")]
    pub severity: Option<i64>,
    #[serde(default)]
    pub assigned_department: Option<String>,
    #[serde(default, deserialize_with = "de_opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de_opt_priority")]
    pub priority: Option<Priority>,
}

impl Report {
    /// `(longitude, latitude)` when the report has been geocoded.
    pub fn coords(&self) -> Option<(f64, f64)> {
        match &self.location {
            Some(loc) => match loc.coordinates[..] {
                [longitude, latitude, ..] => Some((longitude, latitude)),
                _ => None,
            },
            None => None,
        }
    }
}

// Optional fields decode leniently to None: one malformed record must not
// fail deserialization of the whole list.

fn de_opt_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

fn de_opt_severity<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| v.as_i64()))
}

fn de_opt_priority<'de, D>(deserializer: D) -> Result<Option<Priority>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| match s.as_str() {
        "low" => Some(Priority::Low),
        "medium" => Some(Priority::Medium),
        "high" => Some(Priority::High),
        _ => None,
    }))
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct DepartmentColumn {
    pub department: String,
    pub reports: Vec<Report>,
}

// Request/Response DTOs

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct BoardResponse {
    pub columns: Vec<DepartmentColumn>,
}

/// The abstract pointer-drag event: which card was dragged and what the
/// pointer was released over (a card id or a column name).
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct MoveRequest {
    pub active_id: String,
    pub released_over_id: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MoveResponse {
    pub moved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct CategorySlice {
    pub name: String,
    pub value: u64,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct MonthBucket {
    pub month: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct DayBucket {
    pub day: String,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, utoipa::ToSchema)]
pub struct StatusCounts {
    pub pending: u64,
    pub in_progress: u64,
    pub resolved: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, utoipa::ToSchema)]
pub struct SeverityBucket {
    pub level: i64,
    pub value: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, utoipa::ToSchema)]
pub struct Hotspot {
    pub latitude: f64,
    pub longitude: f64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct AnalyticsSnapshot {
    pub total_reports: u64,
    pub category_distribution: Vec<CategorySlice>,
    pub monthly_trend: Vec<MonthBucket>,
    pub weekly_trend: Vec<DayBucket>,
    pub status_distribution: StatusCounts,
    pub severity_histogram: Vec<SeverityBucket>,
    pub hotspots: Vec<Hotspot>,
    pub resolution_rate: u32,
    pub average_per_day: u32,
}

/// Advisory totals from the report store's own summary endpoint.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct StatsSummary {
    pub total: u64,
    pub pending: u64,
    pub in_progress: u64,
    pub resolved: u64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub time: String,
}
