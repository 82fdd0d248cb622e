//! Binary operator dispatch.
//!
//! `evaluate_binary` matches on the `(left, right)` variant pair. Calendar
//! arms are tried first in both operand orders, then string and list
//! behaviour, then plain numbers. `bool` takes part in arithmetic as `0`/`1`.
//! Pairs without an arm fail with a `TypeError` naming both types.

use std::cmp::Ordering;
use std::ops::Range;

use ul4_ir::{BinaryOp, CalendarError, Date, MonthDelta, TimeDelta};
use ul4_patterns::errors::{
    binary_not_supported, division_by_zero, index_out_of_range, integer_overflow, invalid_value,
    key_not_found, modulo_by_zero, negative_repetition, not_a_container, not_subscriptable,
    repetition_too_large, unorderable_types,
};
use ul4_patterns::{EvalError, EvalResult, Value};

use crate::helpers::len_to_int;

/// Numeric view of an operand.
#[derive(Copy, Clone, Debug)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Num::Int(i64::from(*b))),
            Value::Int(n) => Some(Num::Int(*n)),
            Value::Float(f) => Some(Num::Float(*f)),
            _ => None,
        }
    }

    #[allow(clippy::cast_precision_loss, reason = "UL4 numbers mix freely")]
    fn float(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(f) => f,
        }
    }
}

fn numbers(left: &Value, right: &Value) -> Option<(Num, Num)> {
    Some((Num::of(left)?, Num::of(right)?))
}

#[cold]
fn unsupported(left: &Value, op: BinaryOp, right: &Value) -> EvalError {
    binary_not_supported(left.type_name(), op.as_symbol(), right.type_name())
}

#[cold]
fn calendar_error(err: CalendarError) -> EvalError {
    invalid_value(err.to_string())
}

/// Apply a binary operator to two evaluated operands.
///
/// `and`/`or` are accepted here for completeness; the interpreter
/// short-circuits them before the right operand is evaluated.
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => add(&left, &right),
        BinaryOp::Sub => sub(&left, &right),
        BinaryOp::Mul => mul(&left, &right),
        BinaryOp::FloorDiv => floor_div(&left, &right),
        BinaryOp::TrueDiv => true_div(&left, &right),
        BinaryOp::Mod => modulo(&left, &right),
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::Ne => Ok(Value::Bool(left != right)),
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            let ordering = partial_compare(&left, &right, op)?;
            let result = match (op, ordering) {
                (_, None) => false,
                (BinaryOp::Lt, Some(ordering)) => ordering == Ordering::Less,
                (BinaryOp::Le, Some(ordering)) => ordering != Ordering::Greater,
                (BinaryOp::Gt, Some(ordering)) => ordering == Ordering::Greater,
                (_, Some(ordering)) => ordering != Ordering::Less,
            };
            Ok(Value::Bool(result))
        }
        BinaryOp::Contains => contains(&left, &right).map(Value::Bool),
        BinaryOp::NotContains => contains(&left, &right).map(|found| Value::Bool(!found)),
        BinaryOp::And => Ok(if left.is_truthy() { right } else { left }),
        BinaryOp::Or => Ok(if left.is_truthy() { left } else { right }),
        BinaryOp::GetItem => get_item(&left, &right),
    }
}

// Arithmetic

fn shift_date(date: Date, delta: TimeDelta) -> EvalResult {
    date.add_delta(delta).map(Value::Date).map_err(calendar_error)
}

fn shift_months(date: Date, months: i64) -> EvalResult {
    MonthDelta::new(months)
        .add_to_date(date)
        .map(Value::Date)
        .map_err(calendar_error)
}

fn timedelta(result: Option<TimeDelta>, operation: &'static str) -> EvalResult {
    result
        .map(Value::TimeDelta)
        .ok_or_else(|| integer_overflow(operation))
}

fn months(result: Option<i64>, operation: &'static str) -> EvalResult {
    result
        .map(|m| Value::MonthDelta(MonthDelta::new(m)))
        .ok_or_else(|| integer_overflow(operation))
}

fn add(left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Date(date), Value::TimeDelta(delta))
        | (Value::TimeDelta(delta), Value::Date(date)) => shift_date(*date, *delta),
        (Value::Date(date), Value::MonthDelta(delta))
        | (Value::MonthDelta(delta), Value::Date(date)) => shift_months(*date, delta.months()),
        (Value::TimeDelta(a), Value::TimeDelta(b)) => timedelta(a.checked_add(*b), "addition"),
        (Value::MonthDelta(a), Value::MonthDelta(b)) => {
            months(a.months().checked_add(b.months()), "addition")
        }
        (Value::Str(a), Value::Str(b)) => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::string(joined))
        }
        (Value::List(a), Value::List(b)) => {
            let mut items = Vec::with_capacity(a.len() + b.len());
            items.extend(a.iter().cloned());
            items.extend(b.iter().cloned());
            Ok(Value::list(items))
        }
        _ => match numbers(left, right) {
            Some((Num::Int(a), Num::Int(b))) => a
                .checked_add(b)
                .map(Value::Int)
                .ok_or_else(|| integer_overflow("addition")),
            Some((a, b)) => Ok(Value::Float(a.float() + b.float())),
            None => Err(unsupported(left, BinaryOp::Add, right)),
        },
    }
}

fn sub(left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Date(a), Value::Date(b)) => timedelta(a.since(*b), "subtraction"),
        (Value::Date(date), Value::TimeDelta(back)) => {
            let back = back
                .checked_neg()
                .ok_or_else(|| integer_overflow("subtraction"))?;
            shift_date(*date, back)
        }
        (Value::Date(date), Value::MonthDelta(delta)) => {
            let back = delta
                .months()
                .checked_neg()
                .ok_or_else(|| integer_overflow("subtraction"))?;
            shift_months(*date, back)
        }
        (Value::TimeDelta(a), Value::TimeDelta(b)) => timedelta(a.checked_sub(*b), "subtraction"),
        (Value::MonthDelta(a), Value::MonthDelta(b)) => {
            months(a.months().checked_sub(b.months()), "subtraction")
        }
        _ => match numbers(left, right) {
            Some((Num::Int(a), Num::Int(b))) => a
                .checked_sub(b)
                .map(Value::Int)
                .ok_or_else(|| integer_overflow("subtraction")),
            Some((a, b)) => Ok(Value::Float(a.float() - b.float())),
            None => Err(unsupported(left, BinaryOp::Sub, right)),
        },
    }
}

/// Longest string (in bytes) or list a repetition may produce.
pub(crate) const MAX_REPEAT_LEN: usize = 1 << 28;

/// Validated repetition count.
pub(crate) fn repetitions(count: i64, unit_len: usize) -> Result<usize, EvalError> {
    let count = usize::try_from(count).map_err(|_| negative_repetition())?;
    let length = (unit_len as u128) * (count as u128);
    if length > MAX_REPEAT_LEN as u128 {
        return Err(repetition_too_large(length, MAX_REPEAT_LEN));
    }
    Ok(count)
}

fn repeat_str(text: &str, count: i64) -> EvalResult {
    let count = repetitions(count, text.len())?;
    Ok(Value::string(text.repeat(count)))
}

fn repeat_list(items: &[Value], count: i64) -> EvalResult {
    let count = repetitions(count, items.len())?;
    if items.is_empty() {
        return Ok(Value::list(Vec::new()));
    }
    let mut repeated = Vec::with_capacity(items.len() * count);
    for _ in 0..count {
        repeated.extend(items.iter().cloned());
    }
    Ok(Value::list(repeated))
}

fn mul(left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::TimeDelta(delta), factor) | (factor, Value::TimeDelta(delta)) => {
            let scaled = match Num::of(factor) {
                Some(Num::Float(f)) => delta.mul_float(f),
                Some(Num::Int(n)) => delta.mul_int(n),
                None => return Err(unsupported(left, BinaryOp::Mul, right)),
            };
            timedelta(scaled, "multiplication")
        }
        (Value::MonthDelta(delta), factor) | (factor, Value::MonthDelta(delta)) => {
            let factor = match Num::of(factor) {
                Some(Num::Float(f)) => floor_to_int(f)?,
                Some(Num::Int(n)) => n,
                None => return Err(unsupported(left, BinaryOp::Mul, right)),
            };
            months(delta.months().checked_mul(factor), "multiplication")
        }
        (Value::Str(text), Value::Int(n)) | (Value::Int(n), Value::Str(text)) => {
            repeat_str(text, *n)
        }
        (Value::Str(text), Value::Bool(b)) | (Value::Bool(b), Value::Str(text)) => {
            repeat_str(text, i64::from(*b))
        }
        (Value::List(items), Value::Int(n)) | (Value::Int(n), Value::List(items)) => {
            repeat_list(items, *n)
        }
        (Value::List(items), Value::Bool(b)) | (Value::Bool(b), Value::List(items)) => {
            repeat_list(items, i64::from(*b))
        }
        _ => match numbers(left, right) {
            Some((Num::Int(a), Num::Int(b))) => a
                .checked_mul(b)
                .map(Value::Int)
                .ok_or_else(|| integer_overflow("multiplication")),
            Some((a, b)) => Ok(Value::Float(a.float() * b.float())),
            None => Err(unsupported(left, BinaryOp::Mul, right)),
        },
    }
}

/// `math.floor` into an integer.
#[allow(clippy::cast_precision_loss, reason = "bounds check only")]
pub(crate) fn floor_to_int(value: f64) -> Result<i64, EvalError> {
    let floored = value.floor();
    if !floored.is_finite() || floored < i64::MIN as f64 || floored >= i64::MAX as f64 {
        return Err(integer_overflow("conversion"));
    }
    Ok(floored as i64)
}

/// Integer division rounding toward negative infinity.
pub(crate) fn floor_div_int(a: i64, b: i64) -> Result<i64, EvalError> {
    if b == 0 {
        return Err(division_by_zero());
    }
    let quotient = a
        .checked_div(b)
        .ok_or_else(|| integer_overflow("division"))?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

/// Remainder with the sign of the divisor.
pub(crate) fn floor_mod_int(a: i64, b: i64) -> Result<i64, EvalError> {
    if b == 0 {
        return Err(modulo_by_zero());
    }
    let remainder = a.wrapping_rem(b);
    if remainder != 0 && ((remainder < 0) != (b < 0)) {
        Ok(remainder + b)
    } else {
        Ok(remainder)
    }
}

fn floor_div(left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::MonthDelta(delta), divisor) if divisor.is_number() => {
            let quotient = match Num::of(divisor) {
                Some(Num::Int(n)) => floor_div_int(delta.months(), n)?,
                Some(Num::Float(f)) => {
                    if f == 0.0 {
                        return Err(division_by_zero());
                    }
                    #[allow(clippy::cast_precision_loss, reason = "UL4 numbers mix freely")]
                    let months = delta.months() as f64;
                    floor_to_int(months / f)?
                }
                None => 0,
            };
            Ok(Value::MonthDelta(MonthDelta::new(quotient)))
        }
        _ => match numbers(left, right) {
            Some((Num::Int(a), Num::Int(b))) => floor_div_int(a, b).map(Value::Int),
            Some((a, b)) => {
                if b.float() == 0.0 {
                    return Err(division_by_zero());
                }
                Ok(Value::Float((a.float() / b.float()).floor()))
            }
            None => Err(unsupported(left, BinaryOp::FloorDiv, right)),
        },
    }
}

fn true_div(left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::TimeDelta(delta), divisor) => {
            let Some(divisor) = Num::of(divisor).map(Num::float) else {
                return Err(unsupported(left, BinaryOp::TrueDiv, right));
            };
            if divisor == 0.0 {
                return Err(division_by_zero());
            }
            timedelta(delta.div_float(divisor), "division")
        }
        _ => match numbers(left, right) {
            Some((a, b)) => {
                if b.float() == 0.0 {
                    return Err(division_by_zero());
                }
                Ok(Value::Float(a.float() / b.float()))
            }
            None => Err(unsupported(left, BinaryOp::TrueDiv, right)),
        },
    }
}

fn modulo(left: &Value, right: &Value) -> EvalResult {
    match numbers(left, right) {
        Some((Num::Int(a), Num::Int(b))) => floor_mod_int(a, b).map(Value::Int),
        Some((a, b)) => {
            let (a, b) = (a.float(), b.float());
            if b == 0.0 {
                return Err(modulo_by_zero());
            }
            let mut remainder = a % b;
            if remainder != 0.0 && ((remainder < 0.0) != (b < 0.0)) {
                remainder += b;
            }
            Ok(Value::Float(remainder))
        }
        None => Err(unsupported(left, BinaryOp::Mod, right)),
    }
}

// Comparison

/// Ordering of two values, `None` when unordered (NaN).
///
/// `op` only feeds the error message.
pub(crate) fn partial_compare(
    left: &Value,
    right: &Value,
    op: BinaryOp,
) -> Result<Option<Ordering>, EvalError> {
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => Ok(Some(a.as_str().cmp(b.as_str()))),
        (Value::List(a), Value::List(b)) => {
            for (x, y) in a.iter().zip(b.iter()) {
                if x != y {
                    return partial_compare(x, y, op);
                }
            }
            Ok(Some(a.len().cmp(&b.len())))
        }
        (Value::Date(a), Value::Date(b)) => Ok(Some(a.cmp(b))),
        (Value::TimeDelta(a), Value::TimeDelta(b)) => Ok(Some(a.cmp(b))),
        (Value::MonthDelta(a), Value::MonthDelta(b)) => Ok(Some(a.cmp(b))),
        _ => match numbers(left, right) {
            Some((Num::Int(a), Num::Int(b))) => Ok(Some(a.cmp(&b))),
            Some((a, b)) => Ok(a.float().partial_cmp(&b.float())),
            None => Err(unorderable_types(
                left.type_name(),
                op.as_symbol(),
                right.type_name(),
            )),
        },
    }
}

/// Total ordering for sorting; unordered pairs count as equal.
pub(crate) fn compare(left: &Value, right: &Value) -> Result<Ordering, EvalError> {
    Ok(partial_compare(left, right, BinaryOp::Lt)?.unwrap_or(Ordering::Equal))
}

// Membership

/// `item in container`.
pub(crate) fn contains(item: &Value, container: &Value) -> Result<bool, EvalError> {
    match container {
        Value::Str(haystack) => match item {
            Value::Str(needle) => Ok(haystack.contains(needle.as_str())),
            _ => Err(binary_not_supported(item.type_name(), "in", "str")),
        },
        Value::List(items) => Ok(items.iter().any(|candidate| candidate == item)),
        Value::Dict(map) => Ok(item.as_str().is_some_and(|key| map.contains_key(key))),
        Value::Color(color) => Ok(color
            .channels()
            .iter()
            .any(|channel| Value::Int(i64::from(*channel)) == *item)),
        _ => Err(not_a_container(container.type_name())),
    }
}

// Subscription

/// Resolve a possibly negative index against `len`.
fn wrap_index(index: i64, len: usize) -> Result<usize, EvalError> {
    let len = len_to_int(len);
    let position = if index < 0 { index + len } else { index };
    if (0..len).contains(&position) {
        Ok(position as usize)
    } else {
        Err(index_out_of_range(index))
    }
}

fn index_of(container: &Value, index: &Value) -> Result<i64, EvalError> {
    index
        .as_int()
        .ok_or_else(|| unsupported(container, BinaryOp::GetItem, index))
}

/// `container[index]`.
pub(crate) fn get_item(container: &Value, index: &Value) -> EvalResult {
    match container {
        Value::Dict(map) => index
            .as_str()
            .and_then(|key| map.get(key))
            .cloned()
            .ok_or_else(|| key_not_found(&index.repr())),
        Value::Str(text) => {
            let position = wrap_index(index_of(container, index)?, text.chars().count())?;
            Ok(text
                .chars()
                .nth(position)
                .map_or(Value::None, Value::string))
        }
        Value::List(items) => {
            let position = wrap_index(index_of(container, index)?, items.len())?;
            Ok(items.get(position).cloned().unwrap_or(Value::None))
        }
        Value::Color(color) => {
            let index = index_of(container, index)?;
            color
                .channel(index)
                .map(|channel| Value::Int(i64::from(channel)))
                .ok_or_else(|| index_out_of_range(index))
        }
        _ => Err(not_subscriptable(container.type_name())),
    }
}

/// Python slice bounds: negative bounds count from the end, everything is
/// clamped, and an inverted range is empty.
pub(crate) fn slice_range(len: usize, start: Option<i64>, stop: Option<i64>) -> Range<usize> {
    let len_int = len_to_int(len);
    let clamp = |bound: i64| -> usize {
        let bound = if bound < 0 {
            (bound + len_int).max(0)
        } else {
            bound.min(len_int)
        };
        bound as usize
    };
    let start = start.map_or(0, clamp);
    let stop = stop.map_or(len, clamp);
    start..stop.max(start)
}

/// `container[start:stop]`.
pub fn get_slice(container: &Value, start: Option<i64>, stop: Option<i64>) -> EvalResult {
    match container {
        Value::Str(text) => {
            let range = slice_range(text.chars().count(), start, stop);
            Ok(Value::string(
                text.chars()
                    .skip(range.start)
                    .take(range.len())
                    .collect::<String>(),
            ))
        }
        Value::List(items) => {
            let range = slice_range(items.len(), start, stop);
            Ok(Value::list(items[range].to_vec()))
        }
        _ => Err(not_subscriptable(container.type_name())),
    }
}
