use chrono::{Local, NaiveDate, NaiveDateTime};

/// Format used for the `Timestamp` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Resolve an optional `--date` argument, defaulting to today.
pub fn resolve_date(s: Option<&str>) -> Option<NaiveDate> {
    match s {
        Some(v) => parse_date(v),
        None => Some(today()),
    }
}

/// Minute-precision timestamp, e.g. `2025-06-18 09:05`.
pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}
