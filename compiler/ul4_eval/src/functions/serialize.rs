//! JSON and UL4ON conversion.
//!
//! `asjson` targets the JavaScript runtime rather than strict JSON: calendar
//! values, colors and templates become constructor calls.

use std::fmt::Write;

use ul4_ir::float_repr;
use ul4_patterns::errors::{invalid_value, not_serializable};
use ul4_patterns::{DictMap, EvalError, EvalResult, Value};

use crate::helpers::str_arg;

pub(super) fn asjson(value: &Value) -> Result<String, EvalError> {
    let mut out = String::new();
    write_json(&mut out, value)?;
    Ok(out)
}

fn write_json(out: &mut String, value: &Value) -> Result<(), EvalError> {
    match value {
        Value::None => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int(n) => {
            let _ = write!(out, "{n}");
        }
        Value::Float(f) if f.is_nan() => out.push_str("NaN"),
        Value::Float(f) if f.is_infinite() => {
            out.push_str(if *f > 0.0 { "Infinity" } else { "-Infinity" });
        }
        Value::Float(f) => out.push_str(&float_repr(*f)),
        Value::Str(s) => write_json_str(out, s),
        Value::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_json(out, item)?;
            }
            out.push(']');
        }
        Value::Dict(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_json_str(out, key);
                out.push_str(": ");
                write_json(out, item)?;
            }
            out.push('}');
        }
        Value::Date(date) => {
            let _ = write!(
                out,
                "new Date({}, {}, {}, {}, {}, {}, {})",
                date.year(),
                i32::from(date.month()) - 1,
                date.day(),
                date.hour(),
                date.minute(),
                date.second(),
                date.microsecond() / 1000
            );
        }
        Value::TimeDelta(delta) => {
            let _ = write!(
                out,
                "ul4.TimeDelta.create({}, {}, {})",
                delta.days(),
                delta.seconds(),
                delta.microseconds()
            );
        }
        Value::MonthDelta(delta) => {
            let _ = write!(out, "ul4.MonthDelta.create({})", delta.months());
        }
        Value::Color(color) => {
            let _ = write!(
                out,
                "ul4.Color.create({}, {}, {}, {})",
                color.r, color.g, color.b, color.a
            );
        }
        Value::Template(template) => {
            let dump = ul4on::dumps_template(template)?;
            out.push_str("ul4.Template.loads(");
            write_json_str(out, &dump);
            out.push(')');
        }
        Value::Iterator(_) => return Err(not_serializable(value.type_name())),
    }
    Ok(())
}

/// Quoted string with everything outside printable ASCII as `\uXXXX`
/// (UTF-16 code units).
fn write_json_str(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            ' '..='\x7f' => out.push(c),
            _ => {
                let mut units = [0_u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{unit:04x}");
                }
            }
        }
    }
    out.push('"');
}

pub(super) fn fromjson(value: &Value) -> EvalResult {
    let text = str_arg("fromjson", value)?;
    let parsed: serde_json::Value =
        serde_json::from_str(text.trim()).map_err(|err| invalid_value(format!("invalid JSON: {err}")))?;
    Ok(from_json_value(parsed))
}

fn from_json_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::None,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::string(s),
        serde_json::Value::Array(items) => Value::list(items.into_iter().map(from_json_value).collect()),
        serde_json::Value::Object(map) => Value::dict(
            map.into_iter()
                .map(|(key, item)| (key, from_json_value(item)))
                .collect::<DictMap>(),
        ),
    }
}

pub(super) fn asul4on(value: &Value) -> EvalResult {
    Ok(Value::string(ul4on::dumps(value)?))
}

pub(super) fn fromul4on(value: &Value) -> EvalResult {
    let text = str_arg("fromul4on", value)?;
    Ok(ul4on::loads(text)?)
}
