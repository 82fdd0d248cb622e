use std::fmt;

use super::{MICROS_PER_DAY, MICROS_PER_SECOND, SECONDS_PER_DAY};

/// Normalized duration.
///
/// `seconds` is always in `0..86400` and `microseconds` in `0..1_000_000`;
/// the sign lives in `days`. Every constructor renormalizes, so each
/// duration has exactly one representation and the derived ordering is
/// chronological.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeDelta {
    days: i64,
    seconds: i32,
    microseconds: i32,
}

impl TimeDelta {
    pub const ZERO: TimeDelta = TimeDelta {
        days: 0,
        seconds: 0,
        microseconds: 0,
    };

    /// Build from arbitrary (possibly negative or oversized) components.
    ///
    /// `None` when the day count does not fit in an `i64`.
    pub fn new(days: i64, seconds: i64, microseconds: i64) -> Option<Self> {
        let total = (i128::from(days) * i128::from(SECONDS_PER_DAY) + i128::from(seconds))
            * i128::from(MICROS_PER_SECOND)
            + i128::from(microseconds);
        Self::from_microseconds(total)
    }

    /// Build from fractional components, flooring to whole microseconds.
    ///
    /// `None` for non-finite or out-of-range input.
    pub fn from_f64_parts(days: f64, seconds: f64, microseconds: f64) -> Option<Self> {
        let total = ((days * 86_400.0 + seconds) * 1_000_000.0 + microseconds).floor();
        Self::from_float_microseconds(total)
    }

    /// Build from a signed microsecond count.
    pub fn from_microseconds(total: i128) -> Option<Self> {
        let days = i64::try_from(total.div_euclid(MICROS_PER_DAY)).ok()?;
        let rest = total.rem_euclid(MICROS_PER_DAY);
        let micros_per_second = i128::from(MICROS_PER_SECOND);
        Some(TimeDelta {
            days,
            seconds: (rest / micros_per_second) as i32,
            microseconds: (rest % micros_per_second) as i32,
        })
    }

    fn from_float_microseconds(total: f64) -> Option<Self> {
        // A saturated cast is far outside the i64 day range.
        if total.is_finite() {
            Self::from_microseconds(total as i128)
        } else {
            None
        }
    }

    pub fn days(self) -> i64 {
        self.days
    }

    pub fn seconds(self) -> i32 {
        self.seconds
    }

    pub fn microseconds(self) -> i32 {
        self.microseconds
    }

    pub fn total_microseconds(self) -> i128 {
        i128::from(self.days) * MICROS_PER_DAY
            + i128::from(self.seconds) * i128::from(MICROS_PER_SECOND)
            + i128::from(self.microseconds)
    }

    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    pub fn checked_neg(self) -> Option<Self> {
        Self::from_microseconds(-self.total_microseconds())
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        Self::from_microseconds(self.total_microseconds() + other.total_microseconds())
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        Self::from_microseconds(self.total_microseconds() - other.total_microseconds())
    }

    /// Multiply by an integer; `None` on overflow.
    pub fn mul_int(self, factor: i64) -> Option<Self> {
        self.total_microseconds()
            .checked_mul(i128::from(factor))
            .and_then(Self::from_microseconds)
    }

    /// Multiply by a float, flooring to whole microseconds.
    pub fn mul_float(self, factor: f64) -> Option<Self> {
        Self::from_float_microseconds((self.total_microseconds() as f64 * factor).floor())
    }

    /// Divide by a non-zero number, flooring to whole microseconds.
    pub fn div_float(self, divisor: f64) -> Option<Self> {
        if divisor == 0.0 {
            return None;
        }
        Self::from_float_microseconds((self.total_microseconds() as f64 / divisor).floor())
    }

    /// Constructor form, e.g. `timedelta(1, 30)`.
    pub fn repr(self) -> String {
        match (self.days, self.seconds, self.microseconds) {
            (0, 0, 0) => "timedelta()".to_string(),
            (days, 0, 0) => format!("timedelta({days})"),
            (days, seconds, 0) => format!("timedelta({days}, {seconds})"),
            (days, seconds, micros) => format!("timedelta({days}, {seconds}, {micros})"),
        }
    }
}

impl fmt::Display for TimeDelta {
    /// `N days, H:MM:SS[.ffffff]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.days != 0 {
            let plural = if self.days.abs() == 1 { "" } else { "s" };
            write!(f, "{} day{plural}, ", self.days)?;
        }
        let hours = self.seconds / 3600;
        let minutes = self.seconds / 60 % 60;
        let seconds = self.seconds % 60;
        write!(f, "{hours}:{minutes:02}:{seconds:02}")?;
        if self.microseconds != 0 {
            write!(f, ".{:06}", self.microseconds)?;
        }
        Ok(())
    }
}
