//! Integer formatting.

use ul4_ir::format_spec::{parse_int_format_spec, Align, FormatType, Sign};
use ul4_patterns::errors::invalid_value;
use ul4_patterns::EvalError;

/// Largest code point accepted by the `c` type.
const MAX_CHAR: i64 = 0xffff;

/// Format an integer with a `[[fill]align][sign][#][0][width][type]` spec.
pub(crate) fn format_int(value: i64, spec: &str) -> Result<String, EvalError> {
    let spec = parse_int_format_spec(spec).map_err(|err| invalid_value(err.to_string()))?;

    let magnitude = value.unsigned_abs();
    let digits = match spec.format_type {
        FormatType::Char => {
            let c = (0..=MAX_CHAR)
                .contains(&value)
                .then(|| char::from_u32(value as u32))
                .flatten()
                .ok_or_else(|| invalid_value("value out of bounds for c format"))?;
            c.to_string()
        }
        FormatType::Binary => format!("{magnitude:b}"),
        FormatType::Octal => format!("{magnitude:o}"),
        FormatType::Hex => format!("{magnitude:x}"),
        FormatType::HexUpper => format!("{magnitude:X}"),
        FormatType::Decimal | FormatType::Number => magnitude.to_string(),
    };

    let sign = match (value < 0, spec.sign) {
        (true, _) => "-",
        (false, Sign::Plus) => "+",
        (false, Sign::Space) => " ",
        (false, Sign::Minus) => "",
    };
    let prefix = if spec.alternate {
        spec.format_type.alternate_prefix().unwrap_or("")
    } else {
        ""
    };

    let used = sign.len() + prefix.len() + digits.chars().count();
    let padding = spec.width.saturating_sub(used);
    let fill = |count: usize| -> String { std::iter::repeat(spec.fill).take(count).collect() };

    let mut out = String::with_capacity(used + padding);
    match spec.align {
        Align::AfterSign => {
            out.push_str(sign);
            out.push_str(prefix);
            out.push_str(&fill(padding));
            out.push_str(&digits);
        }
        Align::Left => {
            out.push_str(sign);
            out.push_str(prefix);
            out.push_str(&digits);
            out.push_str(&fill(padding));
        }
        Align::Right => {
            out.push_str(&fill(padding));
            out.push_str(sign);
            out.push_str(prefix);
            out.push_str(&digits);
        }
        Align::Center => {
            let before = padding / 2;
            out.push_str(&fill(before));
            out.push_str(sign);
            out.push_str(prefix);
            out.push_str(&digits);
            out.push_str(&fill(padding - before));
        }
    }
    Ok(out)
}
