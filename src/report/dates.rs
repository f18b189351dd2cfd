// src/report/dates.rs
use chrono::{Datelike, Duration, NaiveDate, NaiveTime};

/// Formats accepted for `date_of_visit`, day-first. Two-digit-year forms are
/// tried first so `"15/03/24"` lands in 2024 rather than year 24.
const DATE_FORMATS: &[&str] = &[
    "%d/%m/%y", "%d-%m-%y", "%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d", "%Y/%m/%d",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];

/// Day-first parse of a visit date. Unparseable values are a null date, not
/// an error; the recency filter drops those rows later.
pub fn parse_visit_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Parse a visit time-of-day. A null time sorts before every valid time.
pub fn parse_visit_time(raw: &str) -> Option<NaiveTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
}

/// The most recent Saturday on or before `today`: the inclusive cutoff for
/// report-eligible audits. The week is Monday-indexed (Mon = 0, Sat = 5), so
/// a Saturday is its own boundary and a Wednesday reaches back four days.
pub fn most_recent_saturday(today: NaiveDate) -> NaiveDate {
    let days_back = (today.weekday().num_days_from_monday() + 2) % 7;
    today - Duration::days(days_back as i64)
}

/// Report `Month` field: calendar month 1-12 without zero padding, empty for
/// a null date.
pub fn month_field(date: Option<NaiveDate>) -> String {
    date.map(|d| d.month().to_string()).unwrap_or_default()
}

/// Report `Year` field: four-digit year, empty for a null date.
pub fn year_field(date: Option<NaiveDate>) -> String {
    date.map(|d| d.year().to_string()).unwrap_or_default()
}
