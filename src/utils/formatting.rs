//! Formatting utilities used for CLI and export outputs.

use crate::models::visit_status::VisitStatus;
use crate::utils::colors::{GREEN, GREY, RESET};

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

/// 135 → "02h 15m" (or "02:15" when `short`).
pub fn mins2readable(mins: i64, short: bool) -> String {
    let m = mins.max(0);
    let hours = m / 60;
    let minutes = m % 60;

    if short {
        format!("{:02}:{:02}", hours, minutes)
    } else {
        format!("{:02}h {:02}m", hours, minutes)
    }
}

/// Status label with its terminal colour.
pub fn describe_status(status: VisitStatus) -> String {
    match status {
        VisitStatus::Active => format!("{GREEN}{}{RESET}", status.as_str()),
        VisitStatus::Completed => format!("{GREY}{}{RESET}", status.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readable_minutes() {
        assert_eq!(mins2readable(45, false), "00h 45m");
        assert_eq!(mins2readable(135, true), "02:15");
        assert_eq!(mins2readable(-5, true), "00:00");
    }
}
