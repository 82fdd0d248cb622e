//! Integer format specification parser for `format(int, spec)`.
//!
//! Syntax: `[[fill]align][sign][#][0][width][type]`. The spec is consumed
//! from the right, so a `0` directly before the width digits is read as part
//! of the width and switches to zero-filled `=` alignment.

use std::fmt;

use crate::literal::str_repr;

/// Parsed integer format specification.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IntFormatSpec {
    /// Padding character.
    pub fill: char,
    pub align: Align,
    pub sign: Sign,
    /// Alternate form (`#`): adds `0b`/`0o`/`0x`/`0X`.
    pub alternate: bool,
    /// Minimum field width.
    pub width: usize,
    pub format_type: FormatType,
}

impl IntFormatSpec {
    /// `format(n, "")`: right-aligned decimal, no padding.
    pub const DEFAULT: Self = Self {
        fill: ' ',
        align: Align::Right,
        sign: Sign::Minus,
        alternate: false,
        width: 0,
        format_type: FormatType::Decimal,
    };
}

/// Alignment direction for field padding.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Align {
    /// `<`
    Left,
    /// `>`
    Right,
    /// `^`: the extra character goes on the right.
    Center,
    /// `=`: padding goes between sign/prefix and digits.
    AfterSign,
}

impl Align {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Self::Left),
            '>' => Some(Self::Right),
            '^' => Some(Self::Center),
            '=' => Some(Self::AfterSign),
            _ => None,
        }
    }
}

/// Sign display mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    /// `+`: always show a sign.
    Plus,
    /// `-`: only for negatives.
    Minus,
    /// ` `: space for non-negatives.
    Space,
}

/// Output radix or character mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FormatType {
    /// `b`
    Binary,
    /// `c`: the code point as a character.
    Char,
    /// `d`
    Decimal,
    /// `o`
    Octal,
    /// `x`
    Hex,
    /// `X`
    HexUpper,
    /// `n`: locale-aware decimal, rendered as plain decimal.
    Number,
}

impl FormatType {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'b' => Some(Self::Binary),
            'c' => Some(Self::Char),
            'd' => Some(Self::Decimal),
            'o' => Some(Self::Octal),
            'x' => Some(Self::Hex),
            'X' => Some(Self::HexUpper),
            'n' => Some(Self::Number),
            _ => None,
        }
    }

    /// Prefix emitted by the alternate form, if the type has one.
    pub fn alternate_prefix(self) -> Option<&'static str> {
        match self {
            Self::Binary => Some("0b"),
            Self::Octal => Some("0o"),
            Self::Hex => Some("0x"),
            Self::HexUpper => Some("0X"),
            Self::Char | Self::Decimal | Self::Number => None,
        }
    }
}

/// Error from parsing an integer format specification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormatSpecError {
    /// A sign was combined with type `c`.
    SignWithChar,
    /// Leftover characters that are not a fill/align pair.
    Illegal(String),
}

impl fmt::Display for FormatSpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SignWithChar => write!(f, "sign not allowed for integer format type 'c'"),
            Self::Illegal(spec) => write!(f, "illegal integer format string {}", str_repr(spec)),
        }
    }
}

impl std::error::Error for FormatSpecError {}

/// Parse an integer format specification.
///
/// ```text
/// parse_int_format_spec("")      // decimal, no padding
/// parse_int_format_spec("08x")   // fill='0', align='=', width=8, hex
/// parse_int_format_spec("*^+#10b")
/// ```
pub fn parse_int_format_spec(spec: &str) -> Result<IntFormatSpec, FormatSpecError> {
    let illegal = || FormatSpecError::Illegal(spec.to_string());
    let mut result = IntFormatSpec::DEFAULT;
    let mut work: Vec<char> = spec.chars().collect();

    // [type]
    if let Some(format_type) = work.last().copied().and_then(FormatType::from_char) {
        result.format_type = format_type;
        work.pop();
    }

    // [0][width]
    let digits_start = work
        .iter()
        .rposition(|c| !c.is_ascii_digit())
        .map_or(0, |pos| pos + 1);
    if digits_start < work.len() {
        let digits: String = work[digits_start..].iter().collect();
        if digits.starts_with('0') {
            result.align = Align::AfterSign;
            result.fill = '0';
        }
        result.width = digits.parse().map_err(|_| illegal())?;
        work.truncate(digits_start);
    }

    // [#]
    if work.last() == Some(&'#') {
        result.alternate = true;
        work.pop();
    }

    // [sign]
    let sign = match work.last() {
        Some('+') => Some(Sign::Plus),
        Some('-') => Some(Sign::Minus),
        Some(' ') => Some(Sign::Space),
        _ => None,
    };
    if let Some(sign) = sign {
        if result.format_type == FormatType::Char {
            return Err(FormatSpecError::SignWithChar);
        }
        result.sign = sign;
        work.pop();
    }

    // [[fill]align]
    match work.as_slice() {
        [] => {}
        [align] => result.align = Align::from_char(*align).ok_or_else(illegal)?,
        [fill, align] => {
            result.align = Align::from_char(*align).ok_or_else(illegal)?;
            result.fill = *fill;
        }
        _ => return Err(illegal()),
    }

    Ok(result)
}

#[cfg(test)]
mod tests;
