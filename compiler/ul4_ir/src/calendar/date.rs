use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};

use super::{CalendarError, TimeDelta, MAX_YEAR, MICROS_PER_SECOND, MIN_YEAR};

/// Naive date and time with microsecond resolution.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Date(NaiveDateTime);

fn check(component: &'static str, value: i64, min: i64, max: i64) -> Result<(), CalendarError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(CalendarError::InvalidComponent { component, value })
    }
}

impl Date {
    /// Build a date, validating every component.
    pub fn new(
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
        microsecond: i64,
    ) -> Result<Self, CalendarError> {
        check("year", year, i64::from(MIN_YEAR), i64::from(MAX_YEAR))?;
        check("month", month, 1, 12)?;
        check("day", day, 1, 31)?;
        check("hour", hour, 0, 23)?;
        check("minute", minute, 0, 59)?;
        check("second", second, 0, 59)?;
        check("microsecond", microsecond, 0, MICROS_PER_SECOND - 1)?;
        let date = NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
            .ok_or(CalendarError::InvalidComponent {
                component: "day",
                value: day,
            })?;
        date.and_hms_micro_opt(hour as u32, minute as u32, second as u32, microsecond as u32)
            .map(Date)
            .ok_or(CalendarError::InvalidComponent {
                component: "microsecond",
                value: microsecond,
            })
    }

    pub fn from_ymd(year: i64, month: i64, day: i64) -> Result<Self, CalendarError> {
        Self::new(year, month, day, 0, 0, 0, 0)
    }

    /// Wrap a chrono value, rejecting years outside 1..=9999.
    pub fn from_naive(value: NaiveDateTime) -> Result<Self, CalendarError> {
        if (MIN_YEAR..=MAX_YEAR).contains(&value.year()) {
            Ok(Date(value))
        } else {
            Err(CalendarError::OutOfRange)
        }
    }

    /// Current UTC wall-clock time.
    pub fn now() -> Self {
        Date(Utc::now().naive_utc())
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u8 {
        self.0.month() as u8
    }

    pub fn day(self) -> u8 {
        self.0.day() as u8
    }

    pub fn hour(self) -> u8 {
        self.0.hour() as u8
    }

    pub fn minute(self) -> u8 {
        self.0.minute() as u8
    }

    pub fn second(self) -> u8 {
        self.0.second() as u8
    }

    pub fn microsecond(self) -> u32 {
        self.0.nanosecond() / 1_000
    }

    /// Whether any time-of-day component is non-zero.
    pub fn has_time(self) -> bool {
        self.0.time() != NaiveTime::MIN
    }

    pub fn is_leap_year(self) -> bool {
        super::is_leap_year(self.year())
    }

    /// Day of the week, Monday is 0.
    pub fn weekday(self) -> u8 {
        self.0.weekday().num_days_from_monday() as u8
    }

    /// Day of the year, starting at 1.
    pub fn yearday(self) -> u16 {
        self.0.ordinal() as u16
    }

    /// Week number of the year.
    ///
    /// Days before the first `first_weekday` (0 = Monday) of the year are in
    /// week 0.
    pub fn week(self, first_weekday: i64) -> u16 {
        let first_weekday = first_weekday.rem_euclid(7);
        let yearday = i64::from(self.yearday());
        let jan1_weekday = (i64::from(self.weekday()) - (yearday - 1)).rem_euclid(7);
        let offset = (first_weekday - jan1_weekday).rem_euclid(7);
        ((yearday + 6 - offset) / 7) as u16
    }

    /// Shift by a duration.
    pub fn add_delta(self, delta: TimeDelta) -> Result<Self, CalendarError> {
        let micros =
            i64::try_from(delta.total_microseconds()).map_err(|_| CalendarError::OutOfRange)?;
        let shifted = self
            .0
            .checked_add_signed(Duration::microseconds(micros))
            .ok_or(CalendarError::OutOfRange)?;
        Self::from_naive(shifted)
    }

    /// Duration from `other` to `self`.
    pub fn since(self, other: Date) -> Option<TimeDelta> {
        let micros = self.0.signed_duration_since(other.0).num_microseconds()?;
        TimeDelta::from_microseconds(i128::from(micros))
    }

    /// Replace the calendar day, keeping the time of day.
    pub(crate) fn with_ymd(self, year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        Self::new(
            i64::from(year),
            i64::from(month),
            i64::from(day),
            i64::from(self.hour()),
            i64::from(self.minute()),
            i64::from(self.second()),
            i64::from(self.microsecond()),
        )
    }

    /// `YYYY-MM-DD`, plus `THH:MM:SS[.ffffff]` when a time is set.
    pub fn isoformat(self) -> String {
        if self.has_time() {
            format!("{}T{}", self.0.format("%Y-%m-%d"), self.time_text())
        } else {
            self.0.format("%Y-%m-%d").to_string()
        }
    }

    /// RFC 1123 form, e.g. `Wed, 03 Oct 2012 12:34:56 GMT`.
    pub fn mimeformat(self) -> String {
        self.0.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
    }

    /// Literal form, e.g. `@(2012-10-03T12:34:56)`.
    pub fn repr(self) -> String {
        format!("@({})", self.isoformat())
    }

    fn time_text(self) -> String {
        if self.microsecond() == 0 {
            self.0.format("%H:%M:%S").to_string()
        } else {
            self.0.format("%H:%M:%S%.6f").to_string()
        }
    }

    /// `YYYYMMDDHHMMSSffffff`, the serialized form.
    pub fn compact(self) -> String {
        self.0.format("%Y%m%d%H%M%S%6f").to_string()
    }

    /// Parse the output of [`Date::compact`].
    pub fn parse_compact(text: &str) -> Result<Self, CalendarError> {
        let invalid = || CalendarError::InvalidText(text.to_string());
        if text.len() != 20 || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let field = |range: std::ops::Range<usize>| -> Result<i64, CalendarError> {
            text[range].parse::<i64>().map_err(|_| invalid())
        };
        Self::new(
            field(0..4)?,
            field(4..6)?,
            field(6..8)?,
            field(8..10)?,
            field(10..12)?,
            field(12..14)?,
            field(14..20)?,
        )
    }
}

impl fmt::Display for Date {
    /// `YYYY-MM-DD HH:MM:SS[.ffffff]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0.format("%Y-%m-%d"), self.time_text())
    }
}
