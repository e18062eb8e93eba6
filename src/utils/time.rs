//! Timestamp utilities: the TEXT layout used in the database, parsing and "now".

use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDateTime, Timelike};

/// Storage layout of `check_in` / `check_out`. Sorts lexicographically and is
/// understood by SQLite's date functions.
pub const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time, truncated to whole seconds (what the DB can hold).
pub fn now() -> NaiveDateTime {
    let n = Local::now().naive_local();
    n.with_nanosecond(0).unwrap_or(n)
}

pub fn format_ts(ts: &NaiveDateTime) -> String {
    ts.format(TS_FORMAT).to_string()
}

pub fn parse_ts(s: &str) -> AppResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TS_FORMAT)
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

/// Short form for tables: "YYYY-MM-DD HH:MM".
pub fn short_ts(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_layout_round_trips() {
        let ts = parse_ts("2024-01-01 10:45:00").unwrap();
        assert_eq!(format_ts(&ts), "2024-01-01 10:45:00");
        assert_eq!(short_ts(&ts), "2024-01-01 10:45");
    }

    #[test]
    fn rejects_other_layouts() {
        assert!(matches!(
            parse_ts("2024-01-01T10:45:00"),
            Err(AppError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn now_has_no_fraction() {
        assert_eq!(now().nanosecond(), 0);
    }
}
