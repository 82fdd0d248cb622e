use std::fmt;

use super::{days_in_month, CalendarError, Date, MAX_YEAR, MIN_YEAR};

/// A whole number of months.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthDelta(i64);

impl MonthDelta {
    pub const fn new(months: i64) -> Self {
        MonthDelta(months)
    }

    pub const fn months(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Shift `date` by this many months.
    ///
    /// When the day does not exist in the target month, steps back one day
    /// at a time until it does (Jan 31 + 1 month is Feb 28 or 29).
    pub fn add_to_date(self, date: Date) -> Result<Date, CalendarError> {
        let index = i64::from(date.year()) * 12 + i64::from(date.month()) - 1;
        let index = index
            .checked_add(self.0)
            .ok_or(CalendarError::OutOfRange)?;
        let year = index.div_euclid(12);
        if !(i64::from(MIN_YEAR)..=i64::from(MAX_YEAR)).contains(&year) {
            return Err(CalendarError::OutOfRange);
        }
        let year = year as i32;
        let month = (index.rem_euclid(12) + 1) as u8;
        let mut day = date.day();
        while day > days_in_month(year, month) {
            day -= 1;
        }
        date.with_ymd(year, month, day)
    }

    /// Constructor form, e.g. `monthdelta(3)`.
    pub fn repr(self) -> String {
        if self.0 == 0 {
            "monthdelta()".to_string()
        } else {
            format!("monthdelta({})", self.0)
        }
    }
}

impl fmt::Display for MonthDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.abs() == 1 {
            write!(f, "{} month", self.0)
        } else {
            write!(f, "{} months", self.0)
        }
    }
}
