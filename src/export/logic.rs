// src/export/logic.rs

use crate::core::ReportLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;

/// High-level export of the activity report to a file.
pub struct ExportLogic;

impl ExportLogic {
    /// Write the activity report to `file` (absolute path, `~/` allowed).
    ///
    /// Returns the number of activity rows written.
    pub fn export(pool: &DbPool, format: ExportFormat, file: &str, force: bool) -> AppResult<usize> {
        let path = expand_tilde(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        ensure_writable(&path, force)?;

        let report = ReportLogic::export_report(pool)?;

        if report.activities.is_empty() {
            warning("No visits recorded yet; writing an empty report.");
        }

        match format {
            ExportFormat::Csv => export_csv(&report, &path)?,
            ExportFormat::Json => export_json(&report, &path)?,
        }

        log::info!(
            "exported {} visits as {} to {}",
            report.activities.len(),
            format.as_str(),
            path.display()
        );

        Ok(report.activities.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AttendanceLogic, StudentLogic};
    use crate::models::student::NewStudent;

    fn seeded_pool(dir: &tempfile::TempDir) -> DbPool {
        let pool = DbPool::open(dir.path().join("export.sqlite")).unwrap();
        StudentLogic::register(
            &pool,
            NewStudent {
                student_id: "S001".into(),
                first_name: "Ana".into(),
                last_name: "Cruz".into(),
                course: "BPED".into(),
                ..Default::default()
            },
        )
        .unwrap();
        let v = AttendanceLogic::check_in(&pool, "S001", "Study").unwrap();
        AttendanceLogic::check_out(&pool, v.id).unwrap();
        AttendanceLogic::check_in(&pool, "S001", "Research").unwrap();
        pool
    }

    #[test]
    fn csv_has_header_and_one_line_per_visit() {
        let dir = tempfile::tempdir().unwrap();
        let pool = seeded_pool(&dir);
        let out = dir.path().join("report.csv");

        let n = ExportLogic::export(&pool, ExportFormat::Csv, out.to_str().unwrap(), false).unwrap();
        assert_eq!(n, 2);

        let content = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("student_id,first_name,last_name,course"));
        assert!(lines[1].contains("Research") && lines[1].contains("Active"));
        assert!(lines[2].contains("Completed"));
    }

    #[test]
    fn json_carries_totals() {
        let dir = tempfile::tempdir().unwrap();
        let pool = seeded_pool(&dir);
        let out = dir.path().join("report.json");

        ExportLogic::export(&pool, ExportFormat::Json, out.to_str().unwrap(), false).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(value["totalVisits"], 2);
        assert_eq!(value["activeVisitors"], 1);
        assert_eq!(value["activities"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn relative_path_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let pool = seeded_pool(&dir);
        assert!(matches!(
            ExportLogic::export(&pool, ExportFormat::Csv, "report.csv", true),
            Err(AppError::Export(_))
        ));
    }
}
