//! Escaping, character codes, radix conversion and URL quoting.

use std::fmt::Write;

use ul4_patterns::errors::{invalid_type, invalid_value};
use ul4_patterns::{EvalResult, Value};

use crate::helpers::{int_arg, str_arg};

/// Escape the five XML special characters.
pub(crate) fn xmlescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// One CSV field: `None` is empty, non-strings use their repr.
pub(super) fn csv(value: &Value) -> String {
    let text = match value {
        Value::None => return String::new(),
        Value::Str(s) => s.to_string(),
        other => other.repr(),
    };
    if text.contains([',', '"', '\n']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text
    }
}

pub(super) fn chr(value: &Value) -> EvalResult {
    let code = int_arg("chr", value)?;
    u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .map(Value::string)
        .ok_or_else(|| invalid_value("chr() arg not in range(0x110000)"))
}

pub(super) fn ord(value: &Value) -> EvalResult {
    let text = str_arg("ord", value)?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Value::Int(i64::from(u32::from(c)))),
        _ => Err(invalid_type(format!(
            "ord() expected a character, but string of length {} found",
            text.chars().count()
        ))),
    }
}

/// `hex`, `oct` and `bin`; negative numbers put the sign before the prefix.
pub(super) fn radix(name: &str, value: &Value, prefix: &str) -> EvalResult {
    let n = int_arg(name, value)?;
    let sign = if n < 0 { "-" } else { "" };
    let magnitude = n.unsigned_abs();
    let digits = match prefix {
        "0x" => format!("{magnitude:x}"),
        "0o" => format!("{magnitude:o}"),
        _ => format!("{magnitude:b}"),
    };
    Ok(Value::string(format!("{sign}{prefix}{digits}")))
}

/// Characters `encodeURIComponent` leaves alone.
fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || b"-_.!~*'()".contains(&byte)
}

pub(super) fn urlquote(value: &Value) -> EvalResult {
    let text = str_arg("urlquote", value)?;
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        if is_unreserved(byte) {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    Ok(Value::string(out))
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}

pub(super) fn urlunquote(value: &Value) -> EvalResult {
    let text = str_arg("urlunquote", value)?;
    let malformed = || invalid_value(format!("malformed URL escape in {}", value.repr()));

    let mut bytes = Vec::with_capacity(text.len());
    let mut rest = text.as_bytes();
    while let Some((&byte, tail)) = rest.split_first() {
        if byte == b'%' {
            let hex = tail
                .get(..2)
                .filter(|hex| hex.iter().all(u8::is_ascii_hexdigit))
                .ok_or_else(malformed)?;
            bytes.push(hex.iter().fold(0, |acc, digit| acc * 16 + hex_value(*digit)));
            rest = &tail[2..];
        } else {
            bytes.push(byte);
            rest = tail;
        }
    }
    String::from_utf8(bytes).map(Value::string).map_err(|_| malformed())
}
