//! Due-date token resolution.
//!
//! Turns the compact tokens users type for due dates into calendar dates.
//!
//! | Token      | Strict | Smart                                   |
//! |------------|--------|-----------------------------------------|
//! | `YYYYMMDD` | yes    | yes                                     |
//! | `MMDD`     | no     | year inferred (next occurrence)         |
//! | `DD`       | no     | month and year inferred (next occurrence) |
//!
//! Inference never produces a date before `today`: a partial token whose
//! naive date has already passed rolls forward to the next year (`MMDD`) or
//! the next month (`DD`).
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use tasktrack_core::date::resolve;
//! use tasktrack_core::DateInputMode;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//!
//! let due = resolve("0101", DateInputMode::Smart, today).unwrap();
//! assert_eq!(due, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
//!
//! assert!(resolve("0101", DateInputMode::Strict, today).is_err());
//! ```

use chrono::{Datelike, NaiveDate};
use thiserror::Error;
use tracing::debug;

use crate::models::DateInputMode;

/// `chrono` format string for the canonical stored date form.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

const FULL_FORMAT_HINT: &str = "YYYYMMDD";
const MONTH_DAY_FORMAT_HINT: &str = "MMDD for month and day";
const SMART_FORMAT_HINT: &str = "DD, MMDD, or YYYYMMDD";

/// A specialized Result type for date resolution.
pub type DateResult<T> = Result<T, DateError>;

/// Errors that can occur while resolving a due-date token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DateError {
    /// The token does not have the shape the active mode expects.
    #[error("Invalid date format. Please use {expected}.")]
    InvalidFormat {
        /// Description of the accepted shapes.
        expected: &'static str,
    },

    /// The token is well-formed but names a date that does not exist.
    #[error("Invalid date '{token}'. That day does not exist on the calendar.")]
    InvalidDate {
        /// The rejected token.
        token: String,
    },

    /// A day-only token is out of range or fits neither this month nor the next.
    #[error("Invalid day '{token}'. Please enter a day (01-31) that exists this month or next.")]
    InvalidDay {
        /// The rejected token.
        token: String,
    },
}

impl DateError {
    fn invalid_format(expected: &'static str) -> Self {
        DateError::InvalidFormat { expected }
    }

    fn invalid_date(token: &str) -> Self {
        DateError::InvalidDate {
            token: token.to_string(),
        }
    }

    fn invalid_day(token: &str) -> Self {
        DateError::InvalidDay {
            token: token.to_string(),
        }
    }
}

/// Resolves a due-date token to a calendar date.
///
/// # Arguments
///
/// * `token` - Raw user input (`YYYYMMDD`, or `MMDD`/`DD` in smart mode)
/// * `mode` - The configured [`DateInputMode`]
/// * `today` - Reference date used for inference
///
/// # Errors
///
/// - [`DateError::InvalidFormat`] if the token shape is not accepted in `mode`.
/// - [`DateError::InvalidDate`] if the token names a non-existent date.
/// - [`DateError::InvalidDay`] if a day-only token cannot be placed.
pub fn resolve(token: &str, mode: DateInputMode, today: NaiveDate) -> DateResult<NaiveDate> {
    let result = match (mode, token.chars().count()) {
        (_, 8) => parse_full(token),
        (DateInputMode::Strict, _) => Err(DateError::invalid_format(FULL_FORMAT_HINT)),
        (DateInputMode::Smart, 4) => {
            parse_month_day(token).and_then(|(month, day)| infer_year(token, month, day, today))
        }
        (DateInputMode::Smart, 2) => {
            parse_day(token).and_then(|day| infer_month_and_year(token, day, today))
        }
        (DateInputMode::Smart, _) => Err(DateError::invalid_format(SMART_FORMAT_HINT)),
    };

    match &result {
        Ok(date) => debug!(token, %mode, %date, "resolved due date"),
        Err(err) => debug!(token, %mode, error = %err, "rejected due date"),
    }

    result
}

/// Formats a date in canonical `YYYY-MM-DD` form.
pub fn format_canonical(date: NaiveDate) -> String {
    date.format(CANONICAL_FORMAT).to_string()
}

/// Parses a date stored in canonical `YYYY-MM-DD` form.
pub fn parse_canonical(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, CANONICAL_FORMAT).ok()
}

fn is_ascii_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parses an all-digit slice. Callers have already checked the slice bounds.
fn number<T: std::str::FromStr>(s: &str, expected: &'static str) -> DateResult<T> {
    s.parse().map_err(|_| DateError::invalid_format(expected))
}

/// Parses `YYYYMMDD`.
fn parse_full(token: &str) -> DateResult<NaiveDate> {
    if !is_ascii_digits(token) {
        return Err(DateError::invalid_format(FULL_FORMAT_HINT));
    }

    let year: i32 = number(&token[..4], FULL_FORMAT_HINT)?;
    let month: u32 = number(&token[4..6], FULL_FORMAT_HINT)?;
    let day: u32 = number(&token[6..8], FULL_FORMAT_HINT)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| DateError::invalid_date(token))
}

/// Parses `MMDD` into `(month, day)` without checking the pair against a calendar.
fn parse_month_day(token: &str) -> DateResult<(u32, u32)> {
    if !is_ascii_digits(token) {
        return Err(DateError::invalid_format(MONTH_DAY_FORMAT_HINT));
    }

    let month: u32 = number(&token[..2], MONTH_DAY_FORMAT_HINT)?;
    let day: u32 = number(&token[2..4], MONTH_DAY_FORMAT_HINT)?;

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(DateError::invalid_format(MONTH_DAY_FORMAT_HINT));
    }

    Ok((month, day))
}

/// Parses `DD` into a day number in `1..=31`.
fn parse_day(token: &str) -> DateResult<u32> {
    if !is_ascii_digits(token) {
        return Err(DateError::invalid_day(token));
    }

    match token.parse::<u32>() {
        Ok(day) if (1..=31).contains(&day) => Ok(day),
        _ => Err(DateError::invalid_day(token)),
    }
}

/// Places a month/day in the current year, or next year if it already passed.
fn infer_year(token: &str, month: u32, day: u32, today: NaiveDate) -> DateResult<NaiveDate> {
    let due = NaiveDate::from_ymd_opt(today.year(), month, day)
        .ok_or_else(|| DateError::invalid_date(token))?;

    if due >= today {
        return Ok(due);
    }

    NaiveDate::from_ymd_opt(today.year() + 1, month, day)
        .ok_or_else(|| DateError::invalid_date(token))
}

/// Places a day in the current month, falling forward one month when the
/// day does not exist there or has already passed.
fn infer_month_and_year(token: &str, day: u32, today: NaiveDate) -> DateResult<NaiveDate> {
    let (mut year, mut month) = (today.year(), today.month());

    let due = match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => {
            (year, month) = next_month(year, month);
            NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| DateError::invalid_day(token))?
        }
    };

    if due >= today {
        return Ok(due);
    }

    (year, month) = next_month(year, month);
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| DateError::invalid_day(token))
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ==================== Full Date Tests ====================

    #[test]
    fn test_full_date_same_in_both_modes() {
        let today = date(2024, 3, 15);
        for token in ["20231015", "20240101", "20240229", "19991231"] {
            let strict = resolve(token, DateInputMode::Strict, today).unwrap();
            let smart = resolve(token, DateInputMode::Smart, today).unwrap();
            assert_eq!(strict, smart, "token {token}");
        }
        assert_eq!(
            resolve("20231015", DateInputMode::Strict, today).unwrap(),
            date(2023, 10, 15)
        );
    }

    #[test]
    fn test_full_date_does_not_roll_forward() {
        // Fully specified dates are taken literally even when in the past.
        let today = date(2024, 3, 15);
        assert_eq!(
            resolve("20200101", DateInputMode::Smart, today).unwrap(),
            date(2020, 1, 1)
        );
    }

    #[test]
    fn test_full_date_invalid_calendar_date() {
        let today = date(2024, 3, 15);
        for mode in [DateInputMode::Strict, DateInputMode::Smart] {
            assert!(matches!(
                resolve("20230230", mode, today),
                Err(DateError::InvalidDate { .. })
            ));
            assert!(matches!(
                resolve("20231301", mode, today),
                Err(DateError::InvalidDate { .. })
            ));
            // 2023 is not a leap year
            assert!(matches!(
                resolve("20230229", mode, today),
                Err(DateError::InvalidDate { .. })
            ));
        }
    }

    #[test]
    fn test_full_date_non_numeric_is_format_error() {
        let today = date(2024, 3, 15);
        for mode in [DateInputMode::Strict, DateInputMode::Smart] {
            assert!(matches!(
                resolve("2023-1-1", mode, today),
                Err(DateError::InvalidFormat { .. })
            ));
            assert!(matches!(
                resolve("abcdefgh", mode, today),
                Err(DateError::InvalidFormat { .. })
            ));
        }
    }

    #[test]
    fn test_canonical_output_resolves_to_same_date() {
        let today = date(2024, 3, 15);
        for token in ["0101", "1231", "05", "20240704"] {
            let first = resolve(token, DateInputMode::Smart, today).unwrap();
            let canonical = format_canonical(first);
            let refed = resolve(&canonical.replace('-', ""), DateInputMode::Strict, today).unwrap();
            assert_eq!(first, refed, "token {token} via {canonical}");
        }
    }

    // ==================== Strict Mode Tests ====================

    #[test]
    fn test_strict_rejects_other_lengths() {
        let today = date(2024, 3, 15);
        for token in ["", "15", "0315", "2024031", "202403155", "2024-03-15"] {
            let err = resolve(token, DateInputMode::Strict, today).unwrap_err();
            assert_eq!(
                err,
                DateError::InvalidFormat {
                    expected: "YYYYMMDD"
                },
                "token {token:?}"
            );
        }
    }

    #[test]
    fn test_strict_error_message() {
        let err = resolve("15", DateInputMode::Strict, date(2024, 3, 15)).unwrap_err();
        assert_eq!(err.to_string(), "Invalid date format. Please use YYYYMMDD.");
    }

    // ==================== Month/Day Tests ====================

    #[test]
    fn test_month_day_past_rolls_to_next_year() {
        let today = date(2024, 3, 15);
        assert_eq!(
            resolve("0101", DateInputMode::Smart, today).unwrap(),
            date(2025, 1, 1)
        );
    }

    #[test]
    fn test_month_day_future_stays_this_year() {
        let today = date(2024, 3, 15);
        assert_eq!(
            resolve("1231", DateInputMode::Smart, today).unwrap(),
            date(2024, 12, 31)
        );
    }

    #[test]
    fn test_month_day_today_is_not_rolled() {
        let today = date(2024, 3, 15);
        assert_eq!(resolve("0315", DateInputMode::Smart, today).unwrap(), today);
    }

    #[test]
    fn test_month_day_nonexistent_date() {
        let today = date(2024, 3, 15);
        assert!(matches!(
            resolve("0230", DateInputMode::Smart, today),
            Err(DateError::InvalidDate { .. })
        ));
        assert!(matches!(
            resolve("0431", DateInputMode::Smart, today),
            Err(DateError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_month_day_leap_day_rolling_into_non_leap_year() {
        // Feb 29 exists in 2024 but has passed; 2025 has no Feb 29.
        let today = date(2024, 3, 15);
        assert!(matches!(
            resolve("0229", DateInputMode::Smart, today),
            Err(DateError::InvalidDate { .. })
        ));

        let before = date(2024, 2, 1);
        assert_eq!(
            resolve("0229", DateInputMode::Smart, before).unwrap(),
            date(2024, 2, 29)
        );
    }

    #[test]
    fn test_month_day_malformed() {
        let today = date(2024, 3, 15);
        for token in ["1301", "0001", "0100", "0132", "ab12", "1-01"] {
            assert!(
                matches!(
                    resolve(token, DateInputMode::Smart, today),
                    Err(DateError::InvalidFormat { .. })
                ),
                "token {token}"
            );
        }
    }

    // ==================== Day Only Tests ====================

    #[test]
    fn test_day_passed_moves_to_next_month() {
        let today = date(2024, 2, 20);
        assert_eq!(
            resolve("05", DateInputMode::Smart, today).unwrap(),
            date(2024, 3, 5)
        );
    }

    #[test]
    fn test_day_in_future_stays_this_month() {
        let today = date(2024, 1, 15);
        assert_eq!(
            resolve("31", DateInputMode::Smart, today).unwrap(),
            date(2024, 1, 31)
        );
    }

    #[test]
    fn test_day_missing_from_current_month_uses_next() {
        let today = date(2024, 4, 15);
        assert_eq!(
            resolve("31", DateInputMode::Smart, today).unwrap(),
            date(2024, 5, 31)
        );
    }

    #[test]
    fn test_day_wraps_year_in_december() {
        let today = date(2024, 12, 20);
        assert_eq!(
            resolve("05", DateInputMode::Smart, today).unwrap(),
            date(2025, 1, 5)
        );
    }

    #[test]
    fn test_day_passed_and_missing_from_next_month() {
        // Jan 30 has passed and February has no 30th.
        let today = date(2024, 1, 31);
        assert!(matches!(
            resolve("30", DateInputMode::Smart, today),
            Err(DateError::InvalidDay { .. })
        ));
    }

    #[test]
    fn test_day_out_of_range() {
        let today = date(2024, 3, 15);
        for token in ["00", "32", "99", "x1", "-1"] {
            assert!(
                matches!(
                    resolve(token, DateInputMode::Smart, today),
                    Err(DateError::InvalidDay { .. })
                ),
                "token {token}"
            );
        }
    }

    #[test]
    fn test_smart_rejects_other_lengths() {
        let today = date(2024, 3, 15);
        for token in ["", "5", "315", "20240", "2024-03-15"] {
            let err = resolve(token, DateInputMode::Smart, today).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Invalid date format. Please use DD, MMDD, or YYYYMMDD.",
                "token {token:?}"
            );
        }
    }

    // ==================== Canonical Form Tests ====================

    #[test]
    fn test_format_and_parse_canonical() {
        let d = date(2024, 7, 4);
        assert_eq!(format_canonical(d), "2024-07-04");
        assert_eq!(parse_canonical("2024-07-04"), Some(d));
        assert_eq!(parse_canonical("20240704"), None);
    }
}
