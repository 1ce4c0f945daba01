//! Due-date filter tokens and the date ranges they denote.

use chrono::{Datelike, Days, Months, NaiveDate};
use tracing::debug;

use super::error::{FilterError, FilterResult};
use crate::date;
use crate::models::DateInputMode;

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range from `start` to `end`, both inclusive.
    ///
    /// The bounds are swapped if given in reverse order.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// A range covering exactly one day.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// The first through last day of `month` in `year`.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end = start.checked_add_months(Months::new(1))?.pred_opt()?;
        Some(Self { start, end })
    }

    /// January 1 through December 31 of `year`.
    pub fn year(year: i32) -> Option<Self> {
        Some(Self {
            start: NaiveDate::from_ymd_opt(year, 1, 1)?,
            end: NaiveDate::from_ymd_opt(year, 12, 31)?,
        })
    }

    /// First day of the range.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range, inclusive.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if `date` lies within the range, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Resolves a due-date filter token to a [`DateRange`].
///
/// Tokens are matched case-insensitively in this order:
///
/// 1. `today` / `tdy`
/// 2. `tomorrow` / `tmrw`
/// 3. `overmorrow` / `dat` (the day after tomorrow)
/// 4. A month abbreviation (`jan` .. `dec`, plus `sept`) in the current year
/// 5. Four digits, taken as a whole year
/// 6. Anything else is resolved as an exact date under `mode`
///
/// Because rule 5 comes first, a four-digit token is never read as `MMDD`
/// when filtering.
///
/// # Errors
///
/// Returns [`FilterError::InvalidToken`] if the exact-date fallback fails.
pub fn resolve_filter_range(
    token: &str,
    mode: DateInputMode,
    today: NaiveDate,
) -> FilterResult<DateRange> {
    let trimmed = token.trim();
    let lower = trimmed.to_lowercase();

    if let Some(range) = keyword_range(&lower, today) {
        debug!(token, start = %range.start, end = %range.end, "resolved due filter keyword");
        return Ok(range);
    }

    date::resolve(trimmed, mode, today)
        .map(DateRange::single)
        .map_err(|source| FilterError::invalid_token(token, source))
}

/// Matches the symbolic filter forms (rules 1-5).
fn keyword_range(lower: &str, today: NaiveDate) -> Option<DateRange> {
    match lower {
        "today" | "tdy" => Some(DateRange::single(today)),
        "tomorrow" | "tmrw" => today.succ_opt().map(DateRange::single),
        "overmorrow" | "dat" => today.checked_add_days(Days::new(2)).map(DateRange::single),
        _ => {
            if let Some(month) = parse_month_abbrev(lower) {
                return DateRange::month(today.year(), month);
            }
            if lower.len() == 4 && lower.bytes().all(|b| b.is_ascii_digit()) {
                return lower.parse().ok().and_then(DateRange::year);
            }
            None
        }
    }
}

/// Maps a lowercase month abbreviation to its number (1-12).
fn parse_month_abbrev(name: &str) -> Option<u32> {
    match name {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" | "sept" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}
