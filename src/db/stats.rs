//! Aggregate queries over `attendance_logs` and `students`, plus `db --info`.

use crate::db::pool::DbPool;
use crate::db::queries::collect;
use crate::errors::{AppError, AppResult};
use crate::models::report::{CourseCount, DailyCount, MonthlyCount, PurposeCount};
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::time::format_ts;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension};
use std::fs;

pub fn total_visits(conn: &Connection) -> AppResult<i64> {
    let n = conn.query_row("SELECT COUNT(*) FROM attendance_logs", [], |row| row.get(0))?;
    Ok(n)
}

pub fn active_visitors(conn: &Connection) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM attendance_logs WHERE check_out IS NULL",
        [],
        |row| row.get(0),
    )?;
    Ok(n)
}

pub fn visits_by_purpose(conn: &Connection) -> AppResult<Vec<PurposeCount>> {
    let mut stmt = conn.prepare(
        "SELECT purpose, COUNT(*) AS count
         FROM attendance_logs
         GROUP BY purpose
         ORDER BY count DESC, purpose ASC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(PurposeCount {
            purpose: row.get(0)?,
            count: row.get(1)?,
        })
    })?;

    collect(rows)
}

/// Distinct students per course. The LEFT JOIN keeps courses whose students
/// never visited.
pub fn course_distribution(conn: &Connection) -> AppResult<Vec<CourseCount>> {
    let mut stmt = conn.prepare(
        "SELECT s.course, COUNT(DISTINCT s.id) AS count
         FROM students s
         LEFT JOIN attendance_logs al ON s.id = al.student_id
         GROUP BY s.course
         ORDER BY count DESC, s.course ASC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(CourseCount {
            course: row.get(0)?,
            count: row.get(1)?,
        })
    })?;

    collect(rows)
}

/// Visits per calendar day with check-in at or after `since`.
pub fn daily_visits(conn: &Connection, since: &NaiveDateTime) -> AppResult<Vec<DailyCount>> {
    let mut stmt = conn.prepare(
        "SELECT date(check_in) AS day, COUNT(*) AS visits
         FROM attendance_logs
         WHERE check_in >= ?1
         GROUP BY day
         ORDER BY day ASC",
    )?;
    let rows = stmt.query_map([format_ts(since)], |row| {
        let day: String = row.get(0)?;
        Ok((day, row.get::<_, i64>(1)?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        let (day, visits) = r?;
        let date = NaiveDate::parse_from_str(&day, "%Y-%m-%d")
            .map_err(|_| AppError::InvalidTimestamp(day.clone()))?;
        out.push(DailyCount { date, visits });
    }
    Ok(out)
}

/// Visits per `YYYY-MM` with check-in at or after `since`.
pub fn monthly_trends(conn: &Connection, since: &NaiveDateTime) -> AppResult<Vec<MonthlyCount>> {
    let mut stmt = conn.prepare(
        "SELECT strftime('%Y-%m', check_in) AS month, COUNT(*) AS visits
         FROM attendance_logs
         WHERE check_in >= ?1
         GROUP BY month
         ORDER BY month ASC",
    )?;
    let rows = stmt.query_map([format_ts(since)], |row| {
        Ok(MonthlyCount {
            month: row.get(0)?,
            visits: row.get(1)?,
        })
    })?;

    collect(rows)
}

pub fn print_db_info(pool: &DbPool) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let db_path = pool.path().display().to_string();
    let file_size = fs::metadata(pool.path()).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    pool.with_conn(|conn| {
        //
        // 2) ROW COUNTS
        //
        let students: i64 = conn.query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))?;
        let visits = total_visits(conn)?;
        let open = active_visitors(conn)?;

        println!("{}• Students:{} {}{}{}", CYAN, RESET, GREEN, students, RESET);
        println!("{}• Visits:{} {}{}{}", CYAN, RESET, GREEN, visits, RESET);
        println!("{}• Open visits:{} {}", CYAN, RESET, open);

        //
        // 3) DATE RANGE
        //
        let first: Option<String> = conn
            .query_row("SELECT MIN(check_in) FROM attendance_logs", [], |row| {
                row.get(0)
            })
            .optional()?
            .flatten();
        let last: Option<String> = conn
            .query_row("SELECT MAX(check_in) FROM attendance_logs", [], |row| {
                row.get(0)
            })
            .optional()?
            .flatten();

        let fmt_first = first
            .clone()
            .unwrap_or_else(|| format!("{GREY}--{RESET}"));
        let fmt_last = last.clone().unwrap_or_else(|| format!("{GREY}--{RESET}"));

        println!("{}• Check-in range:{}", CYAN, RESET);
        println!("    from: {}", fmt_first);
        println!("    to:   {}", fmt_last);

        //
        // 4) AVERAGE VISITS/DAY
        //
        if let (Some(f), Some(l)) = (first, last) {
            let d1 = crate::utils::time::parse_ts(&f)?.date();
            let d2 = crate::utils::time::parse_ts(&l)?.date();
            let days = (d2 - d1).num_days().max(1);

            let avg = visits as f64 / days as f64;
            println!("{}• Average visits/day:{} {:.2}", CYAN, RESET, avg);
        }

        println!();
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;
    use crate::utils::time::parse_ts;

    fn seeded() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        conn.execute_batch(
            "INSERT INTO students (student_id, first_name, last_name, course, year_level, section)
             VALUES ('S1','Ana','Cruz','BPED',1,'A'),
                    ('S2','Ben','Reyes','BSIT',2,'B'),
                    ('S3','Cara','Lim','BSIT',3,'A'),
                    ('S4','Dan','Uy','BSED',1,'C');
             INSERT INTO attendance_logs (student_id, purpose, check_in, check_out) VALUES
                (1,'Study','2024-01-01 10:00:00','2024-01-01 10:45:00'),
                (1,'Study','2024-01-02 09:00:00',NULL),
                (2,'Research','2024-01-02 11:00:00',NULL),
                (3,'Borrow Books','2023-11-15 08:00:00','2023-11-15 08:30:00');",
        )
        .unwrap();
        conn
    }

    #[test]
    fn empty_tables_give_zero_and_empty_lists() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        let since = parse_ts("2000-01-01 00:00:00").unwrap();

        assert_eq!(total_visits(&conn).unwrap(), 0);
        assert_eq!(active_visitors(&conn).unwrap(), 0);
        assert!(visits_by_purpose(&conn).unwrap().is_empty());
        assert!(course_distribution(&conn).unwrap().is_empty());
        assert!(daily_visits(&conn, &since).unwrap().is_empty());
        assert!(monthly_trends(&conn, &since).unwrap().is_empty());
    }

    #[test]
    fn counts_and_groups() {
        let conn = seeded();
        assert_eq!(total_visits(&conn).unwrap(), 4);
        assert_eq!(active_visitors(&conn).unwrap(), 2);

        let purposes = visits_by_purpose(&conn).unwrap();
        assert_eq!(purposes[0].purpose, "Study");
        assert_eq!(purposes[0].count, 2);
        assert_eq!(purposes.iter().map(|p| p.count).sum::<i64>(), 4);
    }

    #[test]
    fn course_distribution_includes_courses_without_visits() {
        let conn = seeded();
        let courses = course_distribution(&conn).unwrap();
        assert_eq!(
            courses,
            vec![
                CourseCount { course: "BSIT".into(), count: 2 },
                CourseCount { course: "BPED".into(), count: 1 },
                CourseCount { course: "BSED".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn daily_and_monthly_respect_window() {
        let conn = seeded();
        let since = parse_ts("2023-12-01 00:00:00").unwrap();

        let daily = daily_visits(&conn, &since).unwrap();
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date.to_string(), "2024-01-01");
        assert_eq!(daily[0].visits, 1);
        assert_eq!(daily[1].visits, 2);

        let monthly = monthly_trends(&conn, &parse_ts("2023-11-01 00:00:00").unwrap()).unwrap();
        assert_eq!(
            monthly,
            vec![
                MonthlyCount { month: "2023-11".into(), visits: 1 },
                MonthlyCount { month: "2024-01".into(), visits: 3 },
            ]
        );
    }
}
