#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use tempfile::TempDir;

/// The binary in test mode: no config file is read or written.
pub fn atl() -> Command {
    let mut cmd = cargo_bin_cmd!("attendlog");
    cmd.env("NO_COLOR", "1").arg("--test");
    cmd
}

/// Fresh temp dir plus the DB path inside it. Keep the dir alive for the test.
pub fn setup_test_db(name: &str) -> (TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir
        .path()
        .join(format!("{name}_attendlog.sqlite"))
        .to_string_lossy()
        .to_string();
    (dir, db_path)
}

/// Absolute output path inside `dir`.
pub fn temp_out(dir: &TempDir, name: &str, ext: &str) -> String {
    dir.path()
        .join(format!("{name}_out.{ext}"))
        .to_string_lossy()
        .to_string()
}

pub fn add_student(db_path: &str, student_id: &str, first: &str, last: &str, course: &str) {
    atl()
        .args([
            "--db", db_path, "student", "add", student_id, "--first", first, "--last", last,
            "--course", course, "--year", "2", "--section", "A",
        ])
        .assert()
        .success();
}

/// Initialize the DB and register two students.
pub fn init_db_with_students(db_path: &str) {
    atl().args(["--db", db_path, "init"]).assert().success();
    add_student(db_path, "2024-0001", "Ana", "Cruz", "BPED");
    add_student(db_path, "2024-0002", "Ben", "Reyes", "BSIT");
}

/// Same data through the library API, for tests that need exact timestamps.
pub fn insert_visit_raw(db_path: &str, student_pk: i64, purpose: &str, check_in: &str, check_out: Option<&str>) {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    conn.execute(
        "INSERT INTO attendance_logs (student_id, purpose, check_in, check_out)
         VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![student_pk, purpose, check_in, check_out],
    )
    .expect("insert visit");
}
