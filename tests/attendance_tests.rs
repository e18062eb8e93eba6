use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{atl, init_db_with_students, insert_visit_raw, setup_test_db};

#[test]
fn test_init_creates_database() {
    let (_dir, db_path) = setup_test_db("init");

    atl()
        .args(["--db", &db_path, "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_checkin_checkout_lifecycle() {
    let (_dir, db_path) = setup_test_db("lifecycle");
    init_db_with_students(&db_path);

    atl()
        .args(["--db", &db_path, "checkin", "2024-0001", "Study"])
        .assert()
        .success()
        .stdout(contains("Visit 1 opened for Ana Cruz (Study)"));

    atl()
        .args(["--db", &db_path, "active"])
        .assert()
        .success()
        .stdout(contains("Active visitors: 1"))
        .stdout(contains("2024-0001"));

    atl()
        .args(["--db", &db_path, "checkout", "1"])
        .assert()
        .success()
        .stdout(contains("Check-out successful"));

    atl()
        .args(["--db", &db_path, "active"])
        .assert()
        .success()
        .stdout(contains("Nobody is checked in."));
}

#[test]
fn test_checkout_twice_is_silent() {
    let (_dir, db_path) = setup_test_db("checkout_twice");
    init_db_with_students(&db_path);

    atl()
        .args(["--db", &db_path, "checkin", "2024-0002", "research"])
        .assert()
        .success();
    atl()
        .args(["--db", &db_path, "checkout", "1"])
        .assert()
        .success();

    atl()
        .args(["--db", &db_path, "checkout", "1"])
        .assert()
        .success()
        .stdout(contains("nothing changed"));

    atl()
        .args(["--db", &db_path, "checkout", "42"])
        .assert()
        .success()
        .stdout(contains("No open visit with id 42"));
}

#[test]
fn test_checkin_rejects_bad_requests() {
    let (_dir, db_path) = setup_test_db("checkin_errors");
    init_db_with_students(&db_path);

    atl()
        .args(["--db", &db_path, "checkin", "9999", "Study"])
        .assert()
        .failure()
        .stderr(contains("Not found"));

    atl()
        .args(["--db", &db_path, "checkin", "2024-0001", ""])
        .assert()
        .failure()
        .stderr(contains("Purpose is required"));

    atl()
        .args(["--db", &db_path, "checkin", "2024-0001", "Sleeping"])
        .assert()
        .failure()
        .stderr(contains("Unknown purpose"));

    // nothing was recorded
    atl()
        .args(["--db", &db_path, "active"])
        .assert()
        .success()
        .stdout(contains("Nobody is checked in."));
}

#[test]
fn test_student_registry_commands() {
    let (_dir, db_path) = setup_test_db("students");
    init_db_with_students(&db_path);

    atl()
        .args([
            "--db", &db_path, "student", "add", "2024-0001", "--first", "Dup", "--last", "Dup",
            "--course", "X",
        ])
        .assert()
        .failure()
        .stderr(contains("already registered"));

    atl()
        .args(["--db", &db_path, "student", "list"])
        .assert()
        .success()
        .stdout(contains("Ana Cruz").and(contains("Ben Reyes")));

    atl()
        .args(["--db", &db_path, "student", "search", "ben"])
        .assert()
        .success()
        .stdout(contains("2024-0002").and(contains("2024-0001").not()));

    atl()
        .args(["--db", &db_path, "student", "image", "2024-0001", "/img/ana.png"])
        .assert()
        .success();

    atl()
        .args(["--db", &db_path, "checkin", "2024-0001", "Borrow Books"])
        .assert()
        .success();

    atl()
        .args(["--db", &db_path, "student", "show", "2024-0001"])
        .assert()
        .success()
        .stdout(contains("/img/ana.png"))
        .stdout(contains("Borrow Books"))
        .stdout(contains("Active"));
}

#[test]
fn test_stats_report() {
    let (_dir, db_path) = setup_test_db("stats");
    init_db_with_students(&db_path);

    insert_visit_raw(&db_path, 1, "Study", "2024-01-10 09:00:00", Some("2024-01-10 10:00:00"));
    insert_visit_raw(&db_path, 2, "Research", "2024-01-11 09:00:00", None);
    insert_visit_raw(&db_path, 2, "Study", "2024-01-12 09:00:00", None);

    atl()
        .args(["--db", &db_path, "stats"])
        .assert()
        .success()
        .stdout(contains("Total visits:    3"))
        .stdout(contains("Active visitors: 2"))
        .stdout(contains("Study"))
        .stdout(contains("BSIT"));
}

#[test]
fn test_log_records_operations() {
    let (_dir, db_path) = setup_test_db("audit");
    init_db_with_students(&db_path);

    atl()
        .args(["--db", &db_path, "checkin", "2024-0001", "Study"])
        .assert()
        .success();

    atl()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("register"))
        .stdout(contains("checkin"));
}
