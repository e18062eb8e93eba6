//! Aggregates produced by the reporting queries.
//! Field names follow the JSON shape the dashboard reads.

use super::visit_status::VisitStatus;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PurposeCount {
    pub purpose: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CourseCount {
    pub course: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub visits: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MonthlyCount {
    pub month: String, // YYYY-MM
    pub visits: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_visits: i64,
    pub active_visitors: i64,
    pub visits_by_purpose: Vec<PurposeCount>,
    pub course_distribution: Vec<CourseCount>,
    pub daily_visits: Vec<DailyCount>,
    pub monthly_trends: Vec<MonthlyCount>,
}

/// One visit as it appears in the activity export.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityRow {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub course: String,
    pub year_level: i64,
    pub section: String,
    pub purpose: String,
    pub check_in: NaiveDateTime,
    pub check_out: Option<NaiveDateTime>,
    pub status: VisitStatus,
    /// Only known once the visit is closed.
    pub duration_minutes: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    pub activities: Vec<ActivityRow>,
    pub total_visits: i64,
    pub active_visitors: i64,
}
