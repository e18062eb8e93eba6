use crate::errors::{AppError, AppResult};
use crate::models::purpose::Purpose;
use crate::models::report::ActivityRow;
use crate::models::student::{NewStudent, Student};
use crate::models::visit::{ActiveVisit, Visit};
use crate::models::visit_status::VisitStatus;
use crate::utils::time::{TS_FORMAT, format_ts};
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const STUDENT_COLUMNS: &str = "id, student_id, first_name, last_name, middle_name, address, \
     email, gender, course, year_level, section, profile_image";

fn conversion_failure(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn get_ts(row: &Row, column: &str) -> Result<NaiveDateTime> {
    let raw: String = row.get(column)?;
    let idx = row.as_ref().column_index(column)?;
    NaiveDateTime::parse_from_str(&raw, TS_FORMAT)
        .map_err(|_| conversion_failure(idx, AppError::InvalidTimestamp(raw.clone())))
}

fn get_opt_ts(row: &Row, column: &str) -> Result<Option<NaiveDateTime>> {
    let raw: Option<String> = row.get(column)?;
    match raw {
        None => Ok(None),
        Some(_) => get_ts(row, column).map(Some),
    }
}

/// Known purposes come back in their canonical spelling; any other stored
/// text (imported history) is passed through unchanged.
fn get_purpose(row: &Row) -> Result<String> {
    let raw: String = row.get("purpose")?;
    Ok(Purpose::canonical_label(&raw))
}

pub fn map_student(row: &Row) -> Result<Student> {
    Ok(Student {
        id: row.get("id")?,
        student_id: row.get("student_id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        middle_name: row.get("middle_name")?,
        address: row.get("address")?,
        email: row.get("email")?,
        gender: row.get("gender")?,
        course: row.get("course")?,
        year_level: row.get("year_level")?,
        section: row.get("section")?,
        profile_image: row.get("profile_image")?,
    })
}

pub fn map_visit(row: &Row) -> Result<Visit> {
    Ok(Visit {
        id: row.get("id")?,
        student_id: row.get("student_id")?,
        purpose: get_purpose(row)?,
        check_in: get_ts(row, "check_in")?,
        check_out: get_opt_ts(row, "check_out")?,
    })
}

fn map_active(row: &Row) -> Result<ActiveVisit> {
    Ok(ActiveVisit {
        id: row.get("id")?,
        purpose: get_purpose(row)?,
        check_in: get_ts(row, "check_in")?,
        student_id: row.get("student_id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        course: row.get("course")?,
        year_level: row.get("year_level")?,
        section: row.get("section")?,
    })
}

fn map_activity(row: &Row) -> Result<ActivityRow> {
    let check_in = get_ts(row, "check_in")?;
    let check_out = get_opt_ts(row, "check_out")?;
    let status = VisitStatus::from_check_out(check_out.as_ref());
    let duration_minutes =
        check_out.map(|out| crate::core::calculator::duration::minutes_between(check_in, out));

    Ok(ActivityRow {
        student_id: row.get("student_id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        course: row.get("course")?,
        year_level: row.get("year_level")?,
        section: row.get("section")?,
        purpose: get_purpose(row)?,
        check_in,
        check_out,
        status,
        duration_minutes,
    })
}

pub(crate) fn collect<T>(rows: impl Iterator<Item = Result<T>>) -> AppResult<Vec<T>> {
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// students
// ---------------------------------------------------------------------------

pub fn find_student(conn: &Connection, student_id: &str) -> AppResult<Option<Student>> {
    let sql = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE student_id = ?1");
    let student = conn
        .query_row(&sql, [student_id], map_student)
        .optional()?;
    Ok(student)
}

pub fn find_student_by_pk(conn: &Connection, id: i64) -> AppResult<Option<Student>> {
    let sql = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?1");
    let student = conn.query_row(&sql, [id], map_student).optional()?;
    Ok(student)
}

pub fn insert_student(conn: &Connection, s: &NewStudent) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO students (student_id, first_name, last_name, middle_name, address,
                               email, gender, course, year_level, section, profile_image)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            s.student_id.trim(),
            s.first_name.trim(),
            s.last_name.trim(),
            s.middle_name,
            s.address,
            s.email,
            s.gender,
            s.course.trim(),
            s.year_level,
            s.section.trim(),
            s.profile_image,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_students(conn: &Connection) -> AppResult<Vec<Student>> {
    let sql = format!(
        "SELECT {STUDENT_COLUMNS} FROM students
         ORDER BY last_name COLLATE NOCASE ASC, first_name COLLATE NOCASE ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_student)?;
    collect(rows)
}

/// Exact external id, or a substring of "first last".
pub fn search_students(conn: &Connection, term: &str) -> AppResult<Vec<Student>> {
    let sql = format!(
        "SELECT {STUDENT_COLUMNS} FROM students
         WHERE student_id = ?1
            OR (first_name || ' ' || last_name) LIKE ?2
         ORDER BY last_name COLLATE NOCASE ASC, first_name COLLATE NOCASE ASC"
    );
    let pattern = format!("%{term}%");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![term, pattern], map_student)?;
    collect(rows)
}

pub fn update_profile_image(conn: &Connection, student_id: &str, image: &str) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE students SET profile_image = ?1 WHERE student_id = ?2",
        params![image, student_id],
    )?;
    Ok(n)
}

// ---------------------------------------------------------------------------
// attendance_logs
// ---------------------------------------------------------------------------

pub fn insert_visit(
    conn: &Connection,
    student_pk: i64,
    purpose: Purpose,
    check_in: &NaiveDateTime,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO attendance_logs (student_id, purpose, check_in, check_out)
         VALUES (?1, ?2, ?3, NULL)",
        params![student_pk, purpose.to_db_str(), format_ts(check_in)],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Close an open visit. Returns the number of rows touched (0 or 1).
///
/// A wall clock that stepped back (DST fall-back, NTP) must not make
/// `check_out` precede `check_in`: the stored value is clamped to it.
pub fn close_visit(conn: &Connection, visit_id: i64, check_out: &NaiveDateTime) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE attendance_logs SET check_out = MAX(?1, check_in)
         WHERE id = ?2 AND check_out IS NULL",
        params![format_ts(check_out), visit_id],
    )?;
    Ok(n)
}

pub fn find_visit(conn: &Connection, visit_id: i64) -> AppResult<Option<Visit>> {
    let visit = conn
        .query_row(
            "SELECT id, student_id, purpose, check_in, check_out
             FROM attendance_logs WHERE id = ?1",
            [visit_id],
            map_visit,
        )
        .optional()?;
    Ok(visit)
}

pub fn load_active_visits(conn: &Connection) -> AppResult<Vec<ActiveVisit>> {
    let mut stmt = conn.prepare(
        "SELECT al.id, al.purpose, al.check_in,
                s.student_id, s.first_name, s.last_name, s.course, s.year_level, s.section
         FROM attendance_logs al
         JOIN students s ON al.student_id = s.id
         WHERE al.check_out IS NULL
         ORDER BY al.check_in DESC, al.id DESC",
    )?;
    let rows = stmt.query_map([], map_active)?;
    collect(rows)
}

pub fn load_visits_for_student(
    conn: &Connection,
    student_pk: i64,
    limit: u32,
) -> AppResult<Vec<Visit>> {
    let mut stmt = conn.prepare(
        "SELECT id, student_id, purpose, check_in, check_out
         FROM attendance_logs
         WHERE student_id = ?1
         ORDER BY check_in DESC, id DESC
         LIMIT ?2",
    )?;
    let rows = stmt.query_map(params![student_pk, limit], map_visit)?;
    collect(rows)
}

pub fn count_visits_for_student(conn: &Connection, student_pk: i64) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM attendance_logs WHERE student_id = ?1",
        [student_pk],
        |row| row.get(0),
    )?;
    Ok(n)
}

/// Every visit with its student, newest first.
pub fn load_activity(conn: &Connection) -> AppResult<Vec<ActivityRow>> {
    let mut stmt = conn.prepare(
        "SELECT s.student_id, s.first_name, s.last_name, s.course, s.year_level, s.section,
                al.purpose, al.check_in, al.check_out
         FROM attendance_logs al
         JOIN students s ON al.student_id = s.id
         ORDER BY al.check_in DESC, al.id DESC",
    )?;
    let rows = stmt.query_map([], map_activity)?;
    collect(rows)
}

pub fn load_log(conn: &Connection) -> AppResult<Vec<(i64, String, String, String, String)>> {
    let mut stmt =
        conn.prepare_cached("SELECT id, date, operation, target, message FROM log ORDER BY id ASC")?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            row.get(4)?,
        ))
    })?;

    collect(rows)
}
