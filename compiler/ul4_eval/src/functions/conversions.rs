//! `int`, `float` and `list`.
//!
//! String parsing follows Python's literal rules: surrounding whitespace is
//! ignored, a single sign is allowed, and `_` may separate digits.

use std::num::IntErrorKind;

use ul4_patterns::errors::{integer_overflow, invalid_type, invalid_value};
use ul4_patterns::{EvalError, EvalResult, Value};

use crate::helpers::int_arg;

pub(super) fn int(args: &[Value]) -> EvalResult {
    let Some(value) = args.first() else {
        return Ok(Value::Int(0));
    };
    if let Some(base) = args.get(1) {
        let base = int_arg("int", base)?;
        let Value::Str(text) = value else {
            return Err(invalid_type("int() can't convert non-string with explicit base"));
        };
        return parse_int(text, base).map(Value::Int);
    }
    match value {
        Value::Str(text) => parse_int(text, 10).map(Value::Int),
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Float(f) => truncate(*f).map(Value::Int),
        other => Err(invalid_type(format!(
            "int() argument must be a string or a number, not '{}'",
            other.type_name()
        ))),
    }
}

fn truncate(value: f64) -> Result<i64, EvalError> {
    if value.is_nan() {
        return Err(invalid_value("cannot convert float NaN to integer"));
    }
    let truncated = value.trunc();
    if truncated < -9_223_372_036_854_775_808.0 || truncated >= 9_223_372_036_854_775_808.0 {
        return Err(integer_overflow("int()"));
    }
    Ok(truncated as i64)
}

/// Parse `text` as an integer literal in `base` (0 infers the base from a
/// `0x`/`0o`/`0b` prefix).
pub(super) fn parse_int(text: &str, base: i64) -> Result<i64, EvalError> {
    if base != 0 && !(2..=36).contains(&base) {
        return Err(invalid_value("int() base must be >= 2 and <= 36, or 0"));
    }
    let invalid = || invalid_value(format!("invalid literal for int() with base {base}: '{text}'"));

    let trimmed = text.trim().to_ascii_lowercase();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed.as_str()),
    };

    let prefixed = |prefix: &str, radix: u32| unsigned.strip_prefix(prefix).map(|digits| (radix, digits, true));
    let (radix, digits, had_prefix) = match base {
        0 => prefixed("0x", 16)
            .or_else(|| prefixed("0o", 8))
            .or_else(|| prefixed("0b", 2))
            .unwrap_or((10, unsigned, false)),
        16 => prefixed("0x", 16).unwrap_or((16, unsigned, false)),
        8 => prefixed("0o", 8).unwrap_or((8, unsigned, false)),
        2 => prefixed("0b", 2).unwrap_or((2, unsigned, false)),
        _ => (u32::try_from(base).map_err(|_| invalid())?, unsigned, false),
    };

    // `0x_ff` is fine, `_ff`, `ff_` and `f__f` are not
    let digits = match digits.strip_prefix('_') {
        Some(rest) if had_prefix => rest,
        _ => digits,
    };
    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return Err(invalid());
    }
    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    if cleaned.starts_with(['+', '-']) {
        return Err(invalid());
    }
    // base 0 rejects decimal literals with leading zeros, like Python
    if base == 0 && !had_prefix && cleaned.len() > 1 && cleaned.starts_with('0') && cleaned.chars().any(|c| c != '0') {
        return Err(invalid());
    }

    let magnitude = match u64::from_str_radix(&cleaned, radix) {
        Ok(magnitude) => magnitude,
        Err(err) if matches!(err.kind(), IntErrorKind::PosOverflow) => return Err(integer_overflow("int()")),
        Err(_) => return Err(invalid()),
    };
    let wide = if negative {
        -i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };
    i64::try_from(wide).map_err(|_| integer_overflow("int()"))
}

pub(super) fn float(args: &[Value]) -> EvalResult {
    let Some(value) = args.first() else {
        return Ok(Value::Float(0.0));
    };
    match value {
        Value::Str(text) => parse_float(text).map(Value::Float),
        other => other.as_float().map(Value::Float).ok_or_else(|| {
            invalid_type(format!(
                "float() argument must be a string or a number, not '{}'",
                other.type_name()
            ))
        }),
    }
}

pub(super) fn parse_float(text: &str) -> Result<f64, EvalError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| invalid_value(format!("could not convert string to float: '{text}'")))
}

pub(super) fn list(args: &[Value]) -> EvalResult {
    match args.first() {
        Some(value) => value.to_vec().map(Value::list),
        None => Ok(Value::list(Vec::new())),
    }
}
