use chrono::NaiveDateTime;

/// Whole minutes from `start` to `end`, truncated, never negative.
pub fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_minutes().max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::parse_ts;

    #[test]
    fn truncates_partial_minutes() {
        let a = parse_ts("2024-01-01 10:00:00").unwrap();
        let b = parse_ts("2024-01-01 10:45:59").unwrap();
        assert_eq!(minutes_between(a, b), 45);
    }

    #[test]
    fn clock_skew_never_goes_negative() {
        let a = parse_ts("2024-01-01 10:00:30").unwrap();
        let b = parse_ts("2024-01-01 09:58:00").unwrap();
        assert_eq!(minutes_between(a, b), 0);
    }

    #[test]
    fn spans_midnight() {
        let a = parse_ts("2024-01-01 23:50:00").unwrap();
        let b = parse_ts("2024-01-02 00:20:00").unwrap();
        assert_eq!(minutes_between(a, b), 30);
    }
}
