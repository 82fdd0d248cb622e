//! Builtin method dispatch.
//!
//! Methods are declared once in [`BUILTIN_METHODS`] with the receiver type
//! they apply to and their arity. Dispatch looks the name up, checks the
//! receiver and the argument count, then hands off to the module for the
//! receiver type.
//!
//! `render` and `renders` are listed for completeness but never reach
//! [`call_method`]: the interpreter handles them since they execute a
//! template.
//!
//! # Module Structure
//!
//! - [`strings`]: methods on `str`
//! - [`collections`]: `find`/`rfind` on lists and the `dict` methods
//! - [`calendar`]: methods on `date`, `timedelta` and `monthdelta`
//! - [`color`]: methods on `color`

mod calendar;
mod collections;
mod color;
mod strings;

use ul4_patterns::errors::{unknown_method, wrong_arg_type};
use ul4_patterns::{CallKind, EvalError, EvalResult, Value};

use crate::helpers::Arity;

/// Value types a method can be called on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Receiver {
    Str,
    StrOrList,
    Dict,
    Date,
    TimeDelta,
    MonthDelta,
    Color,
    Template,
}

impl Receiver {
    fn accepts(self, value: &Value) -> bool {
        match self {
            Receiver::Str => matches!(value, Value::Str(_)),
            Receiver::StrOrList => matches!(value, Value::Str(_) | Value::List(_)),
            Receiver::Dict => matches!(value, Value::Dict(_)),
            Receiver::Date => matches!(value, Value::Date(_)),
            Receiver::TimeDelta => matches!(value, Value::TimeDelta(_)),
            Receiver::MonthDelta => matches!(value, Value::MonthDelta(_)),
            Receiver::Color => matches!(value, Value::Color(_)),
            Receiver::Template => matches!(value, Value::Template(_)),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Receiver::Str => "a string",
            Receiver::StrOrList => "a string or a list",
            Receiver::Dict => "a dict",
            Receiver::Date => "a date",
            Receiver::TimeDelta => "a timedelta",
            Receiver::MonthDelta => "a monthdelta",
            Receiver::Color => "a color",
            Receiver::Template => "a template",
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct MethodSpec {
    pub name: &'static str,
    pub receiver: Receiver,
    pub arity: Arity,
}

const fn method(name: &'static str, receiver: Receiver, arity: Arity) -> MethodSpec {
    MethodSpec {
        name,
        receiver,
        arity,
    }
}

/// All builtin methods, grouped by receiver.
pub(crate) const BUILTIN_METHODS: &[MethodSpec] = &[
    // str
    method("replace", Receiver::Str, Arity::range(2, 3)),
    method("strip", Receiver::Str, Arity::range(0, 1)),
    method("lstrip", Receiver::Str, Arity::range(0, 1)),
    method("rstrip", Receiver::Str, Arity::range(0, 1)),
    method("split", Receiver::Str, Arity::range(0, 2)),
    method("rsplit", Receiver::Str, Arity::range(0, 2)),
    method("lower", Receiver::Str, Arity::exact(0)),
    method("upper", Receiver::Str, Arity::exact(0)),
    method("capitalize", Receiver::Str, Arity::exact(0)),
    method("join", Receiver::Str, Arity::exact(1)),
    method("startswith", Receiver::Str, Arity::exact(1)),
    method("endswith", Receiver::Str, Arity::exact(1)),
    // str and list
    method("find", Receiver::StrOrList, Arity::range(1, 3)),
    method("rfind", Receiver::StrOrList, Arity::range(1, 3)),
    // dict
    method("get", Receiver::Dict, Arity::range(1, 2)),
    method("items", Receiver::Dict, Arity::exact(0)),
    method("values", Receiver::Dict, Arity::exact(0)),
    // date
    method("isoformat", Receiver::Date, Arity::exact(0)),
    method("mimeformat", Receiver::Date, Arity::exact(0)),
    method("year", Receiver::Date, Arity::exact(0)),
    method("month", Receiver::Date, Arity::exact(0)),
    method("day", Receiver::Date, Arity::exact(0)),
    method("hour", Receiver::Date, Arity::exact(0)),
    method("minute", Receiver::Date, Arity::exact(0)),
    method("second", Receiver::Date, Arity::exact(0)),
    method("microsecond", Receiver::Date, Arity::exact(0)),
    method("weekday", Receiver::Date, Arity::exact(0)),
    method("week", Receiver::Date, Arity::range(0, 1)),
    method("yearday", Receiver::Date, Arity::exact(0)),
    method("isleap", Receiver::Date, Arity::exact(0)),
    // timedelta
    method("days", Receiver::TimeDelta, Arity::exact(0)),
    method("seconds", Receiver::TimeDelta, Arity::exact(0)),
    method("microseconds", Receiver::TimeDelta, Arity::exact(0)),
    // monthdelta
    method("months", Receiver::MonthDelta, Arity::exact(0)),
    // color
    method("r", Receiver::Color, Arity::exact(0)),
    method("g", Receiver::Color, Arity::exact(0)),
    method("b", Receiver::Color, Arity::exact(0)),
    method("a", Receiver::Color, Arity::exact(0)),
    method("lum", Receiver::Color, Arity::exact(0)),
    method("hls", Receiver::Color, Arity::exact(0)),
    method("hlsa", Receiver::Color, Arity::exact(0)),
    method("hsv", Receiver::Color, Arity::exact(0)),
    method("hsva", Receiver::Color, Arity::exact(0)),
    method("witha", Receiver::Color, Arity::exact(1)),
    method("withlum", Receiver::Color, Arity::exact(1)),
    // template (keyword arguments only)
    method("render", Receiver::Template, Arity::exact(0)),
    method("renders", Receiver::Template, Arity::exact(0)),
];

pub(crate) fn lookup(name: &str) -> Option<&'static MethodSpec> {
    BUILTIN_METHODS.iter().find(|spec| spec.name == name)
}

/// Check that `name` exists, applies to `receiver` and accepts `given`
/// positional arguments.
pub(crate) fn check_call(receiver: &Value, name: &str, given: usize) -> Result<(), EvalError> {
    let spec = lookup(name).ok_or_else(|| unknown_method(receiver.type_name(), name))?;
    if !spec.receiver.accepts(receiver) {
        return Err(wrong_arg_type(name, spec.receiver.describe(), receiver.type_name()));
    }
    spec.arity.check(CallKind::Method, name, given)
}

/// Call the builtin method `name` on `receiver`.
pub(crate) fn call_method(receiver: &Value, name: &str, args: &[Value]) -> EvalResult {
    check_call(receiver, name, args.len())?;
    tracing::trace!(method = name, receiver = receiver.type_name(), "method call");

    match receiver {
        Value::Str(s) => strings::call(s, name, args),
        Value::List(items) => collections::call_list(items, name, args),
        Value::Dict(map) => collections::call_dict(map, name, args),
        Value::Date(date) => calendar::call_date(*date, name, args),
        Value::TimeDelta(delta) => Ok(calendar::call_timedelta(*delta, name)),
        Value::MonthDelta(delta) => Ok(calendar::call_monthdelta(*delta, name)),
        Value::Color(color) => color::call(*color, name, args),
        _ => Err(unknown_method(receiver.type_name(), name)),
    }
}
