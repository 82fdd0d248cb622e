//! Constant values embedded in the AST and their source representations.

use std::fmt::Write as _;

use crate::calendar::{Date, MonthDelta, TimeDelta};
use crate::color::Color;

/// Value of a `Const` node.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(Date),
    TimeDelta(TimeDelta),
    MonthDelta(MonthDelta),
    Color(Color),
}

impl Literal {
    /// Source form of the constant.
    pub fn repr(&self) -> String {
        match self {
            Literal::None => "None".to_string(),
            Literal::Bool(true) => "True".to_string(),
            Literal::Bool(false) => "False".to_string(),
            Literal::Int(n) => n.to_string(),
            Literal::Float(f) => float_repr(*f),
            Literal::Str(s) => str_repr(s),
            Literal::Date(d) => d.repr(),
            Literal::TimeDelta(td) => td.repr(),
            Literal::MonthDelta(md) => md.repr(),
            Literal::Color(c) => c.repr(),
        }
    }
}

/// Double-quoted string literal.
///
/// Printable ASCII is kept; `\r`, `\n`, `\t`, `"` and `\` get short escapes;
/// everything else becomes `\xHH`, `\uHHHH` or `\UHHHHHHHH`.
pub fn str_repr(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            ' '..='\u{7f}' => out.push(c),
            _ => {
                let code = u32::from(c);
                // Writing to a String cannot fail.
                let _ = if code <= 0xff {
                    write!(out, "\\x{code:02x}")
                } else if code <= 0xffff {
                    write!(out, "\\u{code:04x}")
                } else {
                    write!(out, "\\U{code:08x}")
                };
            }
        }
    }
    out.push('"');
    out
}

/// Shortest round-trip float text in Python style.
///
/// Integral values keep a trailing `.0`; exponents below -4 or from 16 up
/// switch to scientific notation with a signed two-digit exponent.
pub fn float_repr(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let body = if (-4..16).contains(&exponent) {
        if exponent >= 0 {
            let point = exponent as usize + 1;
            if digits.len() <= point {
                format!("{digits}{}.0", "0".repeat(point - digits.len()))
            } else {
                format!("{}.{}", &digits[..point], &digits[point..])
            }
        } else {
            format!("0.{}{digits}", "0".repeat((-exponent - 1) as usize))
        }
    } else {
        let (first, rest) = digits.split_at(1);
        let mantissa = if rest.is_empty() {
            first.to_string()
        } else {
            format!("{first}.{rest}")
        };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{exp_sign}{:02}", exponent.abs())
    };
    format!("{sign}{body}")
}
