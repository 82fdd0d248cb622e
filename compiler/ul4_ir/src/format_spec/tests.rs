//! Tests for the integer format specification parser.
#![allow(
    clippy::unwrap_used,
    reason = "test code uses unwrap for concise assertions"
)]

use super::*;
use pretty_assertions::assert_eq;

// Defaults

#[test]
fn empty_spec() {
    assert_eq!(parse_int_format_spec("").unwrap(), IntFormatSpec::DEFAULT);
}

// Type

#[test]
fn type_only() {
    let spec = parse_int_format_spec("x").unwrap();
    assert_eq!(spec.format_type, FormatType::Hex);
    assert_eq!(parse_int_format_spec("X").unwrap().format_type, FormatType::HexUpper);
    assert_eq!(parse_int_format_spec("c").unwrap().format_type, FormatType::Char);
    assert_eq!(parse_int_format_spec("n").unwrap().format_type, FormatType::Number);
}

#[test]
fn alternate_prefixes() {
    assert_eq!(FormatType::Binary.alternate_prefix(), Some("0b"));
    assert_eq!(FormatType::HexUpper.alternate_prefix(), Some("0X"));
    assert_eq!(FormatType::Decimal.alternate_prefix(), None);
}

// Width

#[test]
fn width_plain() {
    let spec = parse_int_format_spec("10").unwrap();
    assert_eq!(spec.width, 10);
    assert_eq!(spec.align, Align::Right);
    assert_eq!(spec.fill, ' ');
}

#[test]
fn width_with_leading_zero() {
    let spec = parse_int_format_spec("08x").unwrap();
    assert_eq!(spec.width, 8);
    assert_eq!(spec.align, Align::AfterSign);
    assert_eq!(spec.fill, '0');
    assert_eq!(spec.format_type, FormatType::Hex);
}

// Alignment

#[test]
fn align_without_fill() {
    assert_eq!(parse_int_format_spec("<5").unwrap().align, Align::Left);
    assert_eq!(parse_int_format_spec("^5").unwrap().align, Align::Center);
    assert_eq!(parse_int_format_spec("=5").unwrap().align, Align::AfterSign);
}

#[test]
fn fill_and_align() {
    let spec = parse_int_format_spec("*^+#10b").unwrap();
    assert_eq!(
        spec,
        IntFormatSpec {
            fill: '*',
            align: Align::Center,
            sign: Sign::Plus,
            alternate: true,
            width: 10,
            format_type: FormatType::Binary,
        }
    );
}

#[test]
fn sign_space() {
    assert_eq!(parse_int_format_spec(" d").unwrap().sign, Sign::Space);
}

// Errors

#[test]
fn sign_with_char_type() {
    assert_eq!(
        parse_int_format_spec("+c"),
        Err(FormatSpecError::SignWithChar)
    );
    assert_eq!(
        FormatSpecError::SignWithChar.to_string(),
        "sign not allowed for integer format type 'c'"
    );
}

#[test]
fn illegal_leftovers() {
    let err = parse_int_format_spec("abc5").unwrap_err();
    assert_eq!(err, FormatSpecError::Illegal("abc5".to_string()));
    assert_eq!(err.to_string(), "illegal integer format string \"abc5\"");
    assert!(parse_int_format_spec("*5").is_err());
    assert!(parse_int_format_spec("ab5").is_err());
}
