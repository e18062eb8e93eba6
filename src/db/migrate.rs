use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now', 'localtime'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Create the `students` table.
fn create_students_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id    TEXT NOT NULL UNIQUE,
            first_name    TEXT NOT NULL,
            last_name     TEXT NOT NULL,
            middle_name   TEXT,
            address       TEXT,
            email         TEXT,
            gender        TEXT,
            course        TEXT NOT NULL,
            year_level    INTEGER NOT NULL DEFAULT 1,
            section       TEXT NOT NULL DEFAULT '',
            profile_image TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_students_course ON students(course);
        "#,
    )?;
    Ok(())
}

/// Create the `attendance_logs` table.
fn create_attendance_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS attendance_logs (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id  INTEGER NOT NULL REFERENCES students(id),
            purpose     TEXT NOT NULL,
            check_in    TEXT NOT NULL,
            check_out   TEXT,
            CHECK (check_out IS NULL OR check_out >= check_in)
        );

        CREATE INDEX IF NOT EXISTS idx_attendance_check_in ON attendance_logs(check_in);
        CREATE INDEX IF NOT EXISTS idx_attendance_open ON attendance_logs(check_out);
        CREATE INDEX IF NOT EXISTS idx_attendance_student ON attendance_logs(student_id);
        "#,
    )?;
    Ok(())
}

/// Older registries were created before profile images existed.
fn migrate_add_profile_image_column(conn: &Connection) -> Result<()> {
    let version = "20250301_0002_add_profile_image";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if !has_column(conn, "students", "profile_image")? {
        warning("Adding 'profile_image' column to students table...");
        conn.execute("ALTER TABLE students ADD COLUMN profile_image TEXT;", [])?;
        success(format!(
            "Migration applied: {} → added 'profile_image' to students table",
            version
        ));
    }

    mark_applied(conn, version, "students.profile_image present")?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Core tables
    if !table_exists(conn, "students")? {
        create_students_table(conn)?;
        success("Created students table.");
    } else {
        migrate_add_profile_image_column(conn)?;
    }

    if !table_exists(conn, "attendance_logs")? {
        create_attendance_table(conn)?;
        success("Created attendance_logs table.");
    }

    // 3) Indexes are cheap to re-assert on every start
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_students_course ON students(course);
        CREATE INDEX IF NOT EXISTS idx_attendance_check_in ON attendance_logs(check_in);
        CREATE INDEX IF NOT EXISTS idx_attendance_open ON attendance_logs(check_out);
        CREATE INDEX IF NOT EXISTS idx_attendance_student ON attendance_logs(student_id);
        "#,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();
        assert!(table_exists(&conn, "students").unwrap());
        assert!(table_exists(&conn, "attendance_logs").unwrap());
        assert!(has_column(&conn, "students", "profile_image").unwrap());
    }

    #[test]
    fn legacy_students_table_gains_profile_image() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE students (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                student_id TEXT NOT NULL UNIQUE,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                middle_name TEXT, address TEXT, email TEXT, gender TEXT,
                course TEXT NOT NULL,
                year_level INTEGER NOT NULL DEFAULT 1,
                section TEXT NOT NULL DEFAULT ''
            );",
        )
        .unwrap();

        run_pending_migrations(&conn).unwrap();

        assert!(has_column(&conn, "students", "profile_image").unwrap());
        assert!(migration_applied(&conn, "20250301_0002_add_profile_image").unwrap());
    }
}
