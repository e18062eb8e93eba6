use chrono::{Months, NaiveDate, NaiveDateTime};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// First instant counted by a trailing window of `days` calendar days ending today.
pub fn days_back(today: NaiveDate, days: u32) -> NaiveDateTime {
    let start = today
        .checked_sub_days(chrono::Days::new(days as u64))
        .unwrap_or(NaiveDate::MIN);
    start.and_time(chrono::NaiveTime::MIN)
}

/// Same as [`days_back`], for a trailing window of calendar months.
/// Month ends clamp (2024-03-31 minus one month is 2024-02-29).
pub fn months_back(today: NaiveDate, months: u32) -> NaiveDateTime {
    let start = today
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN);
    start.and_time(chrono::NaiveTime::MIN)
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
