use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{
    count_visits_for_student, find_student, find_student_by_pk, insert_student,
    load_students, load_visits_for_student, search_students, update_profile_image,
};
use crate::errors::{AppError, AppResult};
use crate::models::student::{NewStudent, Student, StudentProfile};
use crate::models::visit::VisitSummary;
use crate::utils::time;

/// Visits shown on a profile when the caller does not say otherwise.
pub const DEFAULT_RECENT_LIMIT: u32 = 20;

/// Student registry: registration, lookup and profile data.
pub struct StudentLogic;

impl StudentLogic {
    pub fn register(pool: &DbPool, new: NewStudent) -> AppResult<Student> {
        for (value, field) in [
            (&new.student_id, "Student ID"),
            (&new.first_name, "First name"),
            (&new.last_name, "Last name"),
            (&new.course, "Course"),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::missing(field));
            }
        }

        pool.with_conn(|conn| {
            let sid = new.student_id.trim();
            if find_student(conn, sid)?.is_some() {
                return Err(AppError::InvalidInput(format!(
                    "Student {sid} is already registered"
                )));
            }

            let id = insert_student(conn, &new)?;
            let student = find_student_by_pk(conn, id)?
                .ok_or_else(|| AppError::Other(format!("student row {id} vanished after insert")))?;

            audit(
                conn,
                "register",
                &student.student_id,
                &format!("Registered {} ({})", student.display_name(), student.course),
            );
            log::info!("registered student {}", student.student_id);

            Ok(student)
        })
    }

    pub fn list(pool: &DbPool) -> AppResult<Vec<Student>> {
        pool.with_conn(|conn| load_students(conn))
    }

    pub fn search(pool: &DbPool, term: &str) -> AppResult<Vec<Student>> {
        let term = term.trim();
        if term.is_empty() {
            return Err(AppError::missing("Search term"));
        }
        pool.with_conn(|conn| search_students(conn, term))
    }

    /// Student record, its `limit` most recent visits and its visit count.
    pub fn profile(pool: &DbPool, student_id: &str, limit: u32) -> AppResult<StudentProfile> {
        pool.with_conn(|conn| {
            let student = find_student(conn, student_id.trim())?
                .ok_or_else(|| AppError::NotFound(format!("Student {student_id} not found")))?;

            let now = time::now();
            let activities = load_visits_for_student(conn, student.id, limit)?
                .into_iter()
                .map(|v| VisitSummary::derive(v, now))
                .collect();
            let total_visits = count_visits_for_student(conn, student.id)?;

            Ok(StudentProfile {
                student,
                activities,
                total_visits,
            })
        })
    }

    /// Store a reference (path or URL) to the student's profile picture.
    pub fn set_profile_image(pool: &DbPool, student_id: &str, image: &str) -> AppResult<()> {
        let image = image.trim();
        if image.is_empty() {
            return Err(AppError::missing("Image reference"));
        }

        pool.with_conn(|conn| {
            let updated = update_profile_image(conn, student_id.trim(), image)?;
            if updated == 0 {
                return Err(AppError::NotFound(format!("Student {student_id} not found")));
            }
            audit(conn, "image", student_id, image);
            Ok(())
        })
    }
}
