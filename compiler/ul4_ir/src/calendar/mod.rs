//! Naive calendar types: [`Date`], [`TimeDelta`] and [`MonthDelta`].
//!
//! Dates wrap `chrono::NaiveDateTime`: proleptic Gregorian, no time zone.
//! Durations are kept as normalized microsecond counts and fail with
//! `None` rather than saturate when they leave the representable range.

mod date;
mod monthdelta;
mod timedelta;

use std::fmt;

pub use date::Date;
pub use monthdelta::MonthDelta;
pub use timedelta::TimeDelta;

/// Smallest representable year.
pub const MIN_YEAR: i32 = 1;
/// Largest representable year.
pub const MAX_YEAR: i32 = 9999;

const SECONDS_PER_DAY: i64 = 86_400;
const MICROS_PER_SECOND: i64 = 1_000_000;
const MICROS_PER_DAY: i128 = 86_400_000_000;

/// Failure to build or shift a calendar value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CalendarError {
    /// A component is outside its valid range (e.g. month 13, Feb 30).
    InvalidComponent { component: &'static str, value: i64 },
    /// The result falls outside years 1..=9999.
    OutOfRange,
    /// Malformed compact date text.
    InvalidText(String),
}

impl fmt::Display for CalendarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidComponent { component, value } => {
                write!(f, "{component} {value} is out of range")
            }
            Self::OutOfRange => write!(f, "date value out of range"),
            Self::InvalidText(text) => write!(f, "invalid date {text:?}"),
        }
    }
}

impl std::error::Error for CalendarError {}

pub fn is_leap_year(year: i32) -> bool {
    chrono::NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Number of days in `month` (1-12) of `year`.
pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
