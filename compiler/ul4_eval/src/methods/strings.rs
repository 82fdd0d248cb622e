//! Methods on `str`.
//!
//! Positions taken and returned by `find`/`rfind` count characters, not
//! bytes.

use ul4_patterns::errors::{invalid_type, invalid_value, unknown_method};
use ul4_patterns::{EvalError, EvalResult, Value};

use crate::helpers::{int_arg, len_to_int, optional, str_arg};
use crate::operators::slice_range;

pub(super) fn call(s: &str, name: &str, args: &[Value]) -> EvalResult {
    match name {
        "replace" => {
            let old = str_arg(name, &args[0])?;
            let new = str_arg(name, &args[1])?;
            let count = match optional(args, 2) {
                Some(count) => int_arg(name, count)?,
                None => -1,
            };
            Ok(Value::string(match usize::try_from(count) {
                Ok(count) => s.replacen(old, new, count),
                Err(_) => s.replace(old, new),
            }))
        }
        "strip" | "lstrip" | "rstrip" => strip(s, name, optional(args, 0)),
        "split" => split(s, name, args, false),
        "rsplit" => split(s, name, args, true),
        "find" => find(s, name, args, false),
        "rfind" => find(s, name, args, true),
        "lower" => Ok(Value::string(s.to_lowercase())),
        "upper" => Ok(Value::string(s.to_uppercase())),
        "capitalize" => {
            let mut chars = s.chars();
            let capitalized = match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.as_str().to_lowercase().chars())
                    .collect(),
                None => String::new(),
            };
            Ok(Value::string(capitalized))
        }
        "join" => join(s, &args[0]),
        "startswith" => Ok(Value::Bool(s.starts_with(str_arg(name, &args[0])?))),
        "endswith" => Ok(Value::Bool(s.ends_with(str_arg(name, &args[0])?))),
        _ => Err(unknown_method("str", name)),
    }
}

/// `strip`, `lstrip` and `rstrip`: whitespace, or any of `chars`.
fn strip(s: &str, name: &str, chars: Option<&Value>) -> EvalResult {
    let stripped = match chars {
        None => match name {
            "lstrip" => s.trim_start(),
            "rstrip" => s.trim_end(),
            _ => s.trim(),
        },
        Some(chars) => {
            let chars = str_arg(name, chars)?;
            let strip_char = |c: char| chars.contains(c);
            match name {
                "lstrip" => s.trim_start_matches(strip_char),
                "rstrip" => s.trim_end_matches(strip_char),
                _ => s.trim_matches(strip_char),
            }
        }
    };
    Ok(Value::string(stripped))
}

/// `split`/`rsplit([sep[, maxsplit]])`, with Python's whitespace rules when
/// `sep` is missing. A negative `maxsplit` means no limit.
fn split(s: &str, name: &str, args: &[Value], from_right: bool) -> EvalResult {
    let maxsplit = match optional(args, 1) {
        Some(limit) => usize::try_from(int_arg(name, limit)?).ok(),
        None => None,
    };
    let parts: Vec<String> = match optional(args, 0) {
        None if from_right => rsplit_whitespace(s, maxsplit),
        None => split_whitespace(s, maxsplit),
        Some(sep) => {
            let sep = str_arg(name, sep)?;
            if sep.is_empty() {
                return Err(invalid_value("empty separator"));
            }
            match (maxsplit, from_right) {
                (None, false) => s.split(sep).map(str::to_string).collect(),
                (Some(limit), false) => s.splitn(limit + 1, sep).map(str::to_string).collect(),
                (None, true) => {
                    let mut parts: Vec<String> = s.rsplit(sep).map(str::to_string).collect();
                    parts.reverse();
                    parts
                }
                (Some(limit), true) => {
                    let mut parts: Vec<String> = s.rsplitn(limit + 1, sep).map(str::to_string).collect();
                    parts.reverse();
                    parts
                }
            }
        }
    };
    Ok(Value::list(parts.into_iter().map(Value::string).collect()))
}

fn split_whitespace(s: &str, maxsplit: Option<usize>) -> Vec<String> {
    let mut parts = Vec::new();
    let mut rest = s.trim_start();
    while !rest.is_empty() {
        if maxsplit == Some(parts.len()) {
            parts.push(rest.to_string());
            break;
        }
        match rest.find(char::is_whitespace) {
            Some(end) => {
                parts.push(rest[..end].to_string());
                rest = rest[end..].trim_start();
            }
            None => {
                parts.push(rest.to_string());
                break;
            }
        }
    }
    parts
}

fn rsplit_whitespace(s: &str, maxsplit: Option<usize>) -> Vec<String> {
    let mut parts = Vec::new();
    let mut rest = s.trim_end();
    while !rest.is_empty() {
        if maxsplit == Some(parts.len()) {
            parts.push(rest.to_string());
            break;
        }
        match rest.char_indices().rev().find(|(_, c)| c.is_whitespace()) {
            Some((start, c)) => {
                parts.push(rest[start + c.len_utf8()..].to_string());
                rest = rest[..start].trim_end();
            }
            None => {
                parts.push(rest.to_string());
                break;
            }
        }
    }
    parts.reverse();
    parts
}

/// Optional `start`/`end` bounds shared by `find` and `rfind`.
pub(super) fn bounds(name: &str, args: &[Value]) -> Result<(Option<i64>, Option<i64>), EvalError> {
    let bound = |index: usize| optional(args, index).map(|value| int_arg(name, value)).transpose();
    Ok((bound(1)?, bound(2)?))
}

fn find(s: &str, name: &str, args: &[Value], from_right: bool) -> EvalResult {
    let needle = str_arg(name, &args[0])?;
    let (start, end) = bounds(name, args)?;
    let char_count = s.chars().count();
    let range = slice_range(char_count, start, end);

    let byte_offset = |char_index: usize| s.char_indices().nth(char_index).map_or(s.len(), |(i, _)| i);
    let (lo, hi) = (byte_offset(range.start), byte_offset(range.end));
    let haystack = &s[lo..hi];
    let found = if from_right {
        haystack.rfind(needle)
    } else {
        haystack.find(needle)
    };
    Ok(Value::Int(found.map_or(-1, |byte_index| {
        let chars_before = haystack[..byte_index].chars().count();
        len_to_int(range.start + chars_before)
    })))
}

fn join(s: &str, iterable: &Value) -> EvalResult {
    let iter = iterable.iter()?;
    let mut parts = Vec::new();
    while let Some(item) = iter.next()? {
        match item {
            Value::Str(part) => parts.push(part.to_string()),
            other => {
                return Err(invalid_type(format!(
                    "sequence item {}: expected str instance, {} found",
                    parts.len(),
                    other.type_name()
                )))
            }
        }
    }
    Ok(Value::string(parts.join(s)))
}
