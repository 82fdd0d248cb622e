//! Aggregates over iterables and the iterator producers.

use std::cmp::Ordering;

use ul4_patterns::errors::{empty_sequence, invalid_type};
use ul4_patterns::{EvalError, EvalResult, IteratorValue, Markers, Value};

use crate::helpers::{int_arg, int_or, len_to_int};
use crate::operators::compare;

pub(super) const FIRST: Markers = Markers {
    index: false,
    first: true,
    last: false,
};

pub(super) const LAST: Markers = Markers {
    index: false,
    first: false,
    last: true,
};

pub(super) const FIRST_LAST: Markers = Markers {
    index: false,
    first: true,
    last: true,
};

const INDEX_FIRST_LAST: Markers = Markers {
    index: true,
    first: true,
    last: true,
};

pub(super) fn any(value: &Value) -> EvalResult {
    let iter = value.iter()?;
    while let Some(item) = iter.next()? {
        if item.is_truthy() {
            return Ok(Value::Bool(true));
        }
    }
    Ok(Value::Bool(false))
}

pub(super) fn all(value: &Value) -> EvalResult {
    let iter = value.iter()?;
    while let Some(item) = iter.next()? {
        if !item.is_truthy() {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

pub(super) fn len(value: &Value) -> EvalResult {
    let len = match value {
        Value::Str(s) => s.chars().count(),
        Value::List(items) => items.len(),
        Value::Dict(map) => map.len(),
        other => {
            return Err(invalid_type(format!(
                "object of type '{}' has no len()",
                other.type_name()
            )))
        }
    };
    Ok(Value::Int(len_to_int(len)))
}

/// `min` (`wanted == Less`) and `max` (`wanted == Greater`).
///
/// A single argument is iterated; several arguments are compared directly.
/// Ties keep the first item.
pub(super) fn extreme(name: &str, args: &[Value], wanted: Ordering) -> EvalResult {
    let items = match args {
        [single] => single.to_vec()?,
        _ => args.to_vec(),
    };
    let mut items = items.into_iter();
    let mut best = items.next().ok_or_else(|| empty_sequence(name))?;
    for item in items {
        if compare(&item, &best)? == wanted {
            best = item;
        }
    }
    Ok(best)
}

pub(super) fn sorted(value: &Value) -> EvalResult {
    sort_values(value.to_vec()?).map(Value::list)
}

/// Stable merge sort that fails on the first unorderable pair.
fn sort_values(mut items: Vec<Value>) -> Result<Vec<Value>, EvalError> {
    if items.len() <= 1 {
        return Ok(items);
    }
    let right = items.split_off(items.len() / 2);
    let left = sort_values(items)?;
    let right = sort_values(right)?;

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        if compare(r, l)? == Ordering::Less {
            merged.extend(right.next());
        } else {
            merged.extend(left.next());
        }
    }
    merged.extend(left);
    merged.extend(right);
    Ok(merged)
}

pub(super) fn range(args: &[Value]) -> EvalResult {
    let ints = args
        .iter()
        .map(|arg| int_arg("range", arg))
        .collect::<Result<Vec<_>, _>>()?;
    let (start, stop, step) = match ints.as_slice() {
        [stop] => (0, *stop, 1),
        [start, stop] => (*start, *stop, 1),
        [start, stop, step, ..] => (*start, *stop, *step),
        [] => (0, 0, 1),
    };
    Ok(Value::iterator(IteratorValue::range(start, stop, step)?))
}

pub(super) fn reversed(value: &Value) -> EvalResult {
    Ok(Value::Iterator(value.iter_reversed()?))
}

pub(super) fn enumerate(args: &[Value]) -> EvalResult {
    let start = int_or("enumerate", args, 1, 0)?;
    Ok(Value::iterator(IteratorValue::enumerate(args[0].iter()?, start)))
}

/// `isfirst`, `islast` and `isfirstlast`.
pub(super) fn flagged(value: &Value, markers: Markers) -> EvalResult {
    Ok(Value::iterator(IteratorValue::flagged(value.iter()?, markers, 0)))
}

pub(super) fn enumfl(args: &[Value]) -> EvalResult {
    let start = int_or("enumfl", args, 1, 0)?;
    Ok(Value::iterator(IteratorValue::flagged(
        args[0].iter()?,
        INDEX_FIRST_LAST,
        start,
    )))
}

pub(super) fn zip(args: &[Value]) -> EvalResult {
    let inners = args.iter().map(Value::iter).collect::<Result<Vec<_>, _>>()?;
    Ok(Value::iterator(IteratorValue::zip(inners)))
}
