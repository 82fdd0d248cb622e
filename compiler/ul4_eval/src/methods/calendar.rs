//! Methods on `date`, `timedelta` and `monthdelta`.

use ul4_ir::{Date, MonthDelta, TimeDelta};
use ul4_patterns::errors::unknown_method;
use ul4_patterns::{EvalResult, Value};

use crate::helpers::int_or;

pub(super) fn call_date(date: Date, name: &str, args: &[Value]) -> EvalResult {
    let value = match name {
        "isoformat" => Value::string(date.isoformat()),
        "mimeformat" => Value::string(date.mimeformat()),
        "year" => Value::Int(i64::from(date.year())),
        "month" => Value::Int(i64::from(date.month())),
        "day" => Value::Int(i64::from(date.day())),
        "hour" => Value::Int(i64::from(date.hour())),
        "minute" => Value::Int(i64::from(date.minute())),
        "second" => Value::Int(i64::from(date.second())),
        "microsecond" => Value::Int(i64::from(date.microsecond())),
        "weekday" => Value::Int(i64::from(date.weekday())),
        // first day of the week, 0 = Monday
        "week" => Value::Int(i64::from(date.week(int_or(name, args, 0, 0)?))),
        "yearday" => Value::Int(i64::from(date.yearday())),
        "isleap" => Value::Bool(date.is_leap_year()),
        _ => return Err(unknown_method("date", name)),
    };
    Ok(value)
}

/// `name` has already been checked against the method table.
pub(super) fn call_timedelta(delta: TimeDelta, name: &str) -> Value {
    match name {
        "days" => Value::Int(delta.days()),
        "seconds" => Value::Int(i64::from(delta.seconds())),
        _ => Value::Int(i64::from(delta.microseconds())),
    }
}

pub(super) fn call_monthdelta(delta: MonthDelta, _name: &str) -> Value {
    Value::Int(delta.months())
}
