//! `format(obj, fmt[, lang])` for integers and dates.
//!
//! - [`int`]: `[[fill]align][sign][#][0][width][type]` integer specs
//! - [`date`]: strftime-style `%` directives
//! - [`locale`]: month and weekday names for the supported languages

mod date;
mod int;
mod locale;

pub(crate) use date::format_date;
pub(crate) use int::format_int;

use ul4_patterns::errors::wrong_arg_type;
use ul4_patterns::{EvalError, Value};

/// Format `value` according to `spec`.
///
/// `lang` selects the locale for date names; `None` means English.
pub(crate) fn format_value(value: &Value, spec: &str, lang: Option<&str>) -> Result<String, EvalError> {
    match value {
        Value::Date(date) => Ok(format_date(*date, spec, lang)),
        Value::Bool(b) => format_int(i64::from(*b), spec),
        Value::Int(n) => format_int(*n, spec),
        other => Err(wrong_arg_type("format", "a date or an int", other.type_name())),
    }
}
