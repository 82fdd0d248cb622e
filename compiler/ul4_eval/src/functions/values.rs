//! `abs` and the calendar and color constructors.

use ul4_ir::{Color, Date, MonthDelta, TimeDelta};
use ul4_patterns::errors::{integer_overflow, invalid_value, wrong_arg_type};
use ul4_patterns::{EvalError, EvalResult, Value};

use crate::helpers::{float_arg, int_arg, optional};

pub(super) fn abs(value: &Value) -> EvalResult {
    match value {
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        Value::Int(n) => n
            .checked_abs()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("abs()")),
        Value::Float(f) => Ok(Value::Float(f.abs())),
        Value::TimeDelta(delta) if delta.days() < 0 => delta
            .checked_neg()
            .map(Value::TimeDelta)
            .ok_or_else(|| integer_overflow("abs()")),
        Value::TimeDelta(delta) => Ok(Value::TimeDelta(*delta)),
        Value::MonthDelta(delta) => delta
            .months()
            .checked_abs()
            .map(|months| Value::MonthDelta(MonthDelta::new(months)))
            .ok_or_else(|| integer_overflow("abs()")),
        other => Err(wrong_arg_type("abs", "a number or a delta", other.type_name())),
    }
}

/// `date(year, month, day[, hour, minute, second, microsecond])`.
pub(super) fn date(args: &[Value]) -> EvalResult {
    let mut parts = [0_i64; 7];
    for (part, arg) in parts.iter_mut().zip(args) {
        *part = int_arg("date", arg)?;
    }
    let [year, month, day, hour, minute, second, microsecond] = parts;
    Date::new(year, month, day, hour, minute, second, microsecond)
        .map(Value::Date)
        .map_err(|err| invalid_value(err.to_string()))
}

/// `timedelta([days[, seconds[, microseconds]]])`.
///
/// Integer arguments are combined exactly; any float switches to
/// floating-point arithmetic with the result floored to microseconds.
pub(super) fn timedelta(args: &[Value]) -> EvalResult {
    if args.iter().all(|arg| arg.as_int().is_some()) {
        let mut parts = [0_i64; 3];
        for (part, arg) in parts.iter_mut().zip(args) {
            *part = int_arg("timedelta", arg)?;
        }
        let [days, seconds, microseconds] = parts;
        return TimeDelta::new(days, seconds, microseconds)
            .map(Value::TimeDelta)
            .ok_or_else(|| integer_overflow("timedelta()"));
    }
    let mut parts = [0.0_f64; 3];
    for (part, arg) in parts.iter_mut().zip(args) {
        *part = float_arg("timedelta", arg)?;
    }
    let [days, seconds, microseconds] = parts;
    TimeDelta::from_f64_parts(days, seconds, microseconds)
        .map(Value::TimeDelta)
        .ok_or_else(|| integer_overflow("timedelta()"))
}

pub(super) fn monthdelta(args: &[Value]) -> EvalResult {
    let months = match args.first() {
        Some(arg) => int_arg("monthdelta", arg)?,
        None => 0,
    };
    Ok(Value::MonthDelta(MonthDelta::new(months)))
}

/// Three unit-interval components plus an optional alpha (default 1.0).
fn components(name: &str, args: &[Value]) -> Result<[f64; 4], EvalError> {
    let alpha = match optional(args, 3) {
        Some(alpha) => float_arg(name, alpha)?,
        None => 1.0,
    };
    Ok([
        float_arg(name, &args[0])?,
        float_arg(name, &args[1])?,
        float_arg(name, &args[2])?,
        alpha,
    ])
}

pub(super) fn rgb(args: &[Value]) -> EvalResult {
    let [r, g, b, a] = components("rgb", args)?;
    Ok(Value::Color(Color::from_unit(r, g, b, a)))
}

pub(super) fn hls(args: &[Value]) -> EvalResult {
    let [h, l, s, a] = components("hls", args)?;
    Ok(Value::Color(Color::from_hls(h, l, s, a)))
}

pub(super) fn hsv(args: &[Value]) -> EvalResult {
    let [h, s, v, a] = components("hsv", args)?;
    Ok(Value::Color(Color::from_hsv(h, s, v, a)))
}
