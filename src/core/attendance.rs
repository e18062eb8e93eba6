use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{close_visit, find_student, insert_visit, load_active_visits};
use crate::errors::{AppError, AppResult};
use crate::models::purpose::Purpose;
use crate::models::visit::{ActiveVisit, CheckInReceipt, CheckOutReceipt};
use crate::utils::time;
use rusqlite::TransactionBehavior;

/// Check-in / check-out lifecycle of a visit.
pub struct AttendanceLogic;

impl AttendanceLogic {
    /// Open a visit for the student with external id `student_id`.
    ///
    /// Lookup and insert share one IMMEDIATE transaction: a student deleted
    /// concurrently surfaces as `NotFound`, never as a dangling insert.
    pub fn check_in(pool: &DbPool, student_id: &str, purpose: &str) -> AppResult<CheckInReceipt> {
        let student_id = student_id.trim();
        if student_id.is_empty() {
            return Err(AppError::missing("Student ID"));
        }
        if purpose.trim().is_empty() {
            return Err(AppError::missing("Purpose"));
        }
        let purpose = Purpose::parse(purpose).ok_or_else(|| {
            AppError::InvalidInput(format!(
                "Unknown purpose '{}'. Use one of: {}",
                purpose.trim(),
                Purpose::ALL.map(|p| p.to_db_str()).join(", ")
            ))
        })?;

        pool.with_conn(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

            let student = find_student(&tx, student_id)?
                .ok_or_else(|| AppError::NotFound(format!("Student {student_id} not found")))?;

            let check_in = time::now();
            let id = insert_visit(&tx, student.id, purpose, &check_in)?;

            audit(
                &tx,
                "checkin",
                student_id,
                &format!("Visit {id} opened ({purpose})"),
            );

            tx.commit()?;

            log::info!("check-in: visit {id} for {student_id} ({purpose})");

            Ok(CheckInReceipt {
                id,
                student_id: student.id,
                student_name: student.display_name(),
                purpose,
                check_in,
            })
        })
    }

    /// Close visit `visit_id`. Unknown or already closed ids are not an
    /// error: the receipt reports `updated == 0`.
    pub fn check_out(pool: &DbPool, visit_id: i64) -> AppResult<CheckOutReceipt> {
        pool.with_conn(|conn| {
            let updated = close_visit(conn, visit_id, &time::now())?;

            if updated == 0 {
                log::warn!("check-out: no open visit with id {visit_id}");
            } else {
                audit(conn, "checkout", &visit_id.to_string(), "Visit closed");
                log::info!("check-out: visit {visit_id} closed");
            }

            Ok(CheckOutReceipt {
                visit_id,
                updated,
                message: "Check-out successful".to_string(),
            })
        })
    }

    /// Open visits, most recent check-in first.
    pub fn list_active(pool: &DbPool) -> AppResult<Vec<ActiveVisit>> {
        pool.with_conn(|conn| load_active_visits(conn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::students::StudentLogic;
    use crate::db::queries::find_visit;
    use crate::models::student::NewStudent;
    use crate::models::visit_status::VisitStatus;
    use tempfile::TempDir;

    fn pool() -> (TempDir, DbPool) {
        let dir = tempfile::tempdir().unwrap();
        let pool = DbPool::open(dir.path().join("attendance.sqlite")).unwrap();
        (dir, pool)
    }

    fn register(pool: &DbPool, id: &str, first: &str, last: &str, course: &str) {
        StudentLogic::register(
            pool,
            NewStudent {
                student_id: id.into(),
                first_name: first.into(),
                last_name: last.into(),
                course: course.into(),
                year_level: 1,
                section: "A".into(),
                ..Default::default()
            },
        )
        .unwrap();
    }

    #[test]
    fn unknown_student_is_not_found() {
        let (_dir, pool) = pool();
        let err = AttendanceLogic::check_in(&pool, "S001", "Study").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn empty_fields_are_invalid_input() {
        let (_dir, pool) = pool();
        register(&pool, "S002", "Ben", "Reyes", "BSIT");

        assert!(matches!(
            AttendanceLogic::check_in(&pool, "S002", ""),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            AttendanceLogic::check_in(&pool, "  ", "Study"),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            AttendanceLogic::check_in(&pool, "S002", "Sleeping"),
            Err(AppError::InvalidInput(_))
        ));
        assert!(AttendanceLogic::list_active(&pool).unwrap().is_empty());
    }

    #[test]
    fn check_in_opens_exactly_one_active_visit() {
        let (_dir, pool) = pool();
        register(&pool, "S001", "Ana", "Cruz", "BPED");

        let receipt = AttendanceLogic::check_in(&pool, "S001", "study").unwrap();
        assert_eq!(receipt.student_name, "Ana Cruz");
        assert_eq!(receipt.purpose, Purpose::Study);

        let active = AttendanceLogic::list_active(&pool).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, receipt.id);
        assert_eq!(active[0].student_id, "S001");
        assert_eq!(active[0].course, "BPED");
    }

    #[test]
    fn check_out_completes_the_visit() {
        let (_dir, pool) = pool();
        register(&pool, "S001", "Ana", "Cruz", "BPED");
        let receipt = AttendanceLogic::check_in(&pool, "S001", "Research").unwrap();

        let out = AttendanceLogic::check_out(&pool, receipt.id).unwrap();
        assert_eq!(out.updated, 1);

        let visit = pool
            .with_conn(|conn| find_visit(conn, receipt.id))
            .unwrap()
            .unwrap();
        assert_eq!(visit.status(), VisitStatus::Completed);
        let check_out = visit.check_out.unwrap();
        assert!(check_out >= visit.check_in);
        assert_eq!(
            visit.duration_minutes(time::now()),
            (check_out - visit.check_in).num_minutes()
        );
        assert!(AttendanceLogic::list_active(&pool).unwrap().is_empty());
    }

    #[test]
    fn check_out_of_unknown_visit_is_silent() {
        let (_dir, pool) = pool();
        let out = AttendanceLogic::check_out(&pool, 4242).unwrap();
        assert_eq!(out.updated, 0);
        assert_eq!(out.message, "Check-out successful");
    }

    #[test]
    fn second_check_out_keeps_first_timestamp() {
        let (_dir, pool) = pool();
        register(&pool, "S001", "Ana", "Cruz", "BPED");
        let receipt = AttendanceLogic::check_in(&pool, "S001", "Study").unwrap();

        assert_eq!(AttendanceLogic::check_out(&pool, receipt.id).unwrap().updated, 1);
        assert_eq!(AttendanceLogic::check_out(&pool, receipt.id).unwrap().updated, 0);
    }

    #[test]
    fn check_out_after_clock_step_back_clamps_to_check_in() {
        let (_dir, pool) = pool();
        register(&pool, "S001", "Ana", "Cruz", "BPED");

        // check-in recorded ahead of the current wall clock
        let ahead = time::now() + chrono::Duration::minutes(30);
        pool.with_conn(|conn| {
            conn.execute(
                "INSERT INTO attendance_logs (student_id, purpose, check_in) VALUES (1, 'Study', ?1)",
                [time::format_ts(&ahead)],
            )?;
            Ok(())
        })
        .unwrap();

        let out = AttendanceLogic::check_out(&pool, 1).unwrap();
        assert_eq!(out.updated, 1);

        let visit = pool.with_conn(|conn| find_visit(conn, 1)).unwrap().unwrap();
        assert_eq!(visit.status(), VisitStatus::Completed);
        assert_eq!(visit.check_out, Some(ahead));
        assert_eq!(visit.duration_minutes(time::now()), 0);
    }

    #[test]
    fn unknown_stored_purpose_is_listed_as_is() {
        let (_dir, pool) = pool();
        register(&pool, "S001", "Ana", "Cruz", "BPED");
        pool.with_conn(|conn| {
            conn.execute_batch(
                "INSERT INTO attendance_logs (student_id, purpose, check_in)
                 VALUES (1, 'Thesis defense', '2024-05-02 09:00:00'),
                        (1, 'study', '2024-05-01 09:00:00');",
            )?;
            Ok(())
        })
        .unwrap();

        let active = AttendanceLogic::list_active(&pool).unwrap();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].purpose, "Thesis defense");
        assert_eq!(active[1].purpose, "Study");
    }

    #[test]
    fn unusable_store_surfaces_as_db_error() {
        let dir = tempfile::tempdir().unwrap();
        // a directory is not a database file
        let broken = DbPool::new(dir.path());

        let err = AttendanceLogic::list_active(&broken).unwrap_err();
        assert!(matches!(err, AppError::Db(_)), "unexpected error: {err:?}");
        assert!(err.to_string().starts_with("Database error:"));

        let err = AttendanceLogic::check_out(&broken, 1).unwrap_err();
        assert!(matches!(err, AppError::Db(_)));
    }

    #[test]
    fn active_list_is_newest_first() {
        let (_dir, pool) = pool();
        register(&pool, "S001", "Ana", "Cruz", "BPED");
        register(&pool, "S002", "Ben", "Reyes", "BSIT");

        let first = AttendanceLogic::check_in(&pool, "S001", "Study").unwrap();
        let second = AttendanceLogic::check_in(&pool, "S002", "Study").unwrap();

        let active = AttendanceLogic::list_active(&pool).unwrap();
        assert_eq!(active.len(), 2);
        // same-second check-ins fall back to id order
        assert_eq!(active[0].id, second.id);
        assert_eq!(active[1].id, first.id);
    }
}
