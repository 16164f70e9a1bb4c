//! Small helpers for JSON extraction and timestamp formatting.
//!
//! Kept dependency-light; used by the provider parsing code and the file
//! logger's timestamp formatter.

/// Settings file loading and key-value parsing.
pub mod config;
/// Config, state, and log directory resolution.
pub mod paths;

/// Serializes tests that mutate process environment variables.
#[cfg(test)]
pub(crate) fn env_mutex() -> &'static std::sync::Mutex<()> {
    use std::sync::{Mutex, OnceLock};
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

use serde_json::Value;

/// What: Extract a string field from a JSON object, defaulting to empty.
///
/// Inputs:
/// - `v`: JSON value to read from
/// - `key`: Field name
///
/// Output:
/// - Owned string value, or `""` when missing or not a string.
#[must_use]
pub fn s(v: &Value, key: &str) -> String {
    v.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Whether `year` is a leap year in the proleptic Gregorian calendar.
const fn is_leap(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days in `month` (1-based) of `year`.
const fn days_in_month(year: i32, month: u32) -> i64 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if is_leap(year) {
                29
            } else {
                28
            }
        }
    }
}

/// What: Format a Unix timestamp as `YYYY-MM-DD HH:MM:SS` (UTC).
///
/// Inputs:
/// - `ts`: Seconds since the epoch; `None` yields an empty string
///
/// Output:
/// - Formatted date string; negative inputs are echoed numerically.
#[must_use]
pub fn ts_to_date(ts: Option<i64>) -> String {
    let Some(t) = ts else {
        return String::new();
    };
    if t < 0 {
        return t.to_string();
    }

    let mut days = t / 86_400;
    let sod = t % 86_400;
    let hour = sod / 3600;
    let minute = (sod % 3600) / 60;
    let second = sod % 60;

    let mut year: i32 = 1970;
    loop {
        let len = if is_leap(year) { 366 } else { 365 };
        if days < len {
            break;
        }
        days -= len;
        year += 1;
    }
    let mut month: u32 = 1;
    loop {
        let len = days_in_month(year, month);
        if days < len {
            break;
        }
        days -= len;
        month += 1;
    }
    let day = days + 1;

    format!("{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}")
}
