//! Arity and argument checks shared by the function and method tables.

use smallvec::SmallVec;
use ul4_patterns::errors::{wrong_arg_count, wrong_arg_type};
use ul4_patterns::{CallKind, EvalError, Value};

/// Evaluated positional arguments of one call.
pub(crate) type Args = SmallVec<[Value; 4]>;

/// Accepted argument count: `min..=max`, or at least `min` when `max` is
/// `None`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Arity {
    pub min: usize,
    pub max: Option<usize>,
}

impl Arity {
    pub const fn exact(n: usize) -> Self {
        Arity {
            min: n,
            max: Some(n),
        }
    }

    pub const fn range(min: usize, max: usize) -> Self {
        Arity {
            min,
            max: Some(max),
        }
    }

    pub const fn at_least(min: usize) -> Self {
        Arity { min, max: None }
    }

    pub fn check(self, call: CallKind, name: &str, given: usize) -> Result<(), EvalError> {
        let too_many = self.max.is_some_and(|max| given > max);
        if given < self.min || too_many {
            return Err(wrong_arg_count(call, name, self.min, self.max, given));
        }
        Ok(())
    }
}

/// Argument at `index`, treating an explicit `None` as absent.
#[inline]
pub(crate) fn optional(args: &[Value], index: usize) -> Option<&Value> {
    args.get(index).filter(|value| !matches!(value, Value::None))
}

/// Integer argument (`bool` counts as an integer).
pub(crate) fn int_arg(name: &str, value: &Value) -> Result<i64, EvalError> {
    value
        .as_int()
        .ok_or_else(|| wrong_arg_type(name, "an int", value.type_name()))
}

pub(crate) fn float_arg(name: &str, value: &Value) -> Result<f64, EvalError> {
    value
        .as_float()
        .ok_or_else(|| wrong_arg_type(name, "a number", value.type_name()))
}

pub(crate) fn str_arg<'a>(name: &str, value: &'a Value) -> Result<&'a str, EvalError> {
    value
        .as_str()
        .ok_or_else(|| wrong_arg_type(name, "a string", value.type_name()))
}

/// Optional integer argument with a default.
pub(crate) fn int_or(name: &str, args: &[Value], index: usize, default: i64) -> Result<i64, EvalError> {
    optional(args, index).map_or(Ok(default), |value| int_arg(name, value))
}

/// Convert a count to `i64`, saturating for absurdly large collections.
#[inline]
pub(crate) fn len_to_int(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}
