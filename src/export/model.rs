// src/export/model.rs

use crate::models::report::ActivityRow;
use crate::utils::time::format_ts;
use serde::Serialize;

/// Flat, text-only shape of an activity row for CSV output.
#[derive(Serialize, Clone, Debug)]
pub struct ActivityExport {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub course: String,
    pub year_level: i64,
    pub section: String,
    pub purpose: String,
    pub check_in: String,
    pub check_out: String,
    pub status: String,
    pub duration_minutes: String,
}

impl From<&ActivityRow> for ActivityExport {
    fn from(row: &ActivityRow) -> Self {
        Self {
            student_id: row.student_id.clone(),
            first_name: row.first_name.clone(),
            last_name: row.last_name.clone(),
            course: row.course.clone(),
            year_level: row.year_level,
            section: row.section.clone(),
            purpose: row.purpose.to_string(),
            check_in: format_ts(&row.check_in),
            check_out: row.check_out.as_ref().map(format_ts).unwrap_or_default(),
            status: row.status.to_string(),
            duration_minutes: row
                .duration_minutes
                .map(|m| m.to_string())
                .unwrap_or_default(),
        }
    }
}
