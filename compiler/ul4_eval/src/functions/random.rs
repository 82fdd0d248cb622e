//! `random`, `randrange` and `randchoice`.

use rand::Rng;
use ul4_patterns::errors::{empty_sequence, invalid_value, zero_step};
use ul4_patterns::{EvalResult, Value};

use crate::helpers::int_arg;

pub(super) fn random() -> Value {
    Value::Float(rand::thread_rng().gen::<f64>())
}

/// Python's `randrange(stop)`, `randrange(start, stop)` and
/// `randrange(start, stop, step)`.
pub(super) fn randrange(args: &[Value]) -> EvalResult {
    let ints = args
        .iter()
        .map(|arg| int_arg("randrange", arg))
        .collect::<Result<Vec<_>, _>>()?;
    let (start, stop, step) = match ints.as_slice() {
        [stop] => (0, *stop, 1),
        [start, stop] => (*start, *stop, 1),
        [start, stop, step, ..] => (*start, *stop, *step),
        [] => (0, 0, 1),
    };
    if step == 0 {
        return Err(zero_step("randrange"));
    }

    let (start, stop, step) = (i128::from(start), i128::from(stop), i128::from(step));
    let count = if step > 0 {
        (stop - start + step - 1) / step
    } else {
        (stop - start + step + 1) / step
    };
    if count <= 0 {
        return Err(invalid_value("empty range for randrange()"));
    }

    let offset = rand::thread_rng().gen_range(0..count);
    let picked = start + offset * step;
    // picked lies between start and stop
    Ok(Value::Int(i64::try_from(picked).unwrap_or(i64::MAX)))
}

pub(super) fn randchoice(value: &Value) -> EvalResult {
    let mut items = value.to_vec()?;
    if items.is_empty() {
        return Err(empty_sequence("randchoice"));
    }
    let index = rand::thread_rng().gen_range(0..items.len());
    Ok(items.swap_remove(index))
}
