//! Lenient date coercion for observation dates
//!
//! Accepted shapes (first match wins):
//! - `2021-03-15`, `2021/03/15`, `15/03/2021`
//! - `2021-03-15T10:00:00`, `2021-03-15 10:00:00` (time part dropped)
//! - `2021-03` (first of month)
//! - `2021` (January 1st)
//!
//! Anything else coerces to `None` ("unknown").

use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parses a raw date cell. Returns `None` for empty or unparseable input.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    // Timezone suffixes are ignored; only the calendar date matters.
    let naive = s.trim_end_matches('Z');
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, fmt) {
            return Some(dt.date());
        }
    }

    if let Some((year, month)) = s.split_once('-') {
        if year.len() == 4 && (1..=2).contains(&month.len()) {
            let y = year.parse::<i32>().ok()?;
            let m = month.parse::<u32>().ok()?;
            return NaiveDate::from_ymd_opt(y, m, 1);
        }
        return None;
    }

    if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) {
        let y = s.parse::<i32>().ok()?;
        return NaiveDate::from_ymd_opt(y, 1, 1);
    }

    None
}

/// Whole days from `from` to `to` (negative when `to` precedes `from`).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}
