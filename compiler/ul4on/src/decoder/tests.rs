//! Tests for the UL4ON decoder.
#![allow(clippy::unwrap_used, reason = "test code uses unwrap for concise assertions")]

use pretty_assertions::assert_eq;
use ul4_ir::{Color, Date, TimeDelta};
use ul4_patterns::Value;

use crate::{loads, Decoder, Loaded, Registry, Ul4onError};

fn ints(values: &[i64]) -> Value {
    Value::list(values.iter().map(|n| Value::Int(*n)).collect())
}

// Values

#[test]
fn scalars() {
    assert_eq!(loads("n").unwrap(), Value::None);
    assert_eq!(loads("bT").unwrap(), Value::Bool(true));
    assert_eq!(loads("i17|").unwrap(), Value::Int(17));
    assert_eq!(loads("f-0.25|").unwrap(), Value::Float(-0.25));
    assert_eq!(loads("f1e+16|").unwrap(), Value::Float(1e16));
    assert_eq!(loads("S3|\u{e4}bc").unwrap(), Value::string("\u{e4}bc"));
}

#[test]
fn non_finite_floats() {
    assert!(matches!(loads("fnan|").unwrap(), Value::Float(f) if f.is_nan()));
    assert_eq!(loads("finf|").unwrap(), Value::Float(f64::INFINITY));
    assert_eq!(loads("f-inf|").unwrap(), Value::Float(f64::NEG_INFINITY));
}

#[test]
fn calendar_and_color() {
    assert_eq!(
        loads("t20000101000000000000").unwrap(),
        Value::Date(Date::from_ymd(2000, 1, 1).unwrap())
    );
    assert_eq!(
        loads("Ti0|i-1|i0|").unwrap(),
        Value::TimeDelta(TimeDelta::new(-1, 86_399, 0).unwrap())
    );
    assert_eq!(loads("ci0|i128|i255|i1|").unwrap(), Value::Color(Color::new(0, 128, 255, 1)));
}

#[test]
fn whitespace_between_items() {
    assert_eq!(loads(" l i1| i2|\n] ").unwrap(), ints(&[1, 2]));
}

#[test]
fn backreferences() {
    let value = loads("lS2|abS1|c^1|^0|]").unwrap();
    let expected = Value::list(vec![
        Value::string("ab"),
        Value::string("c"),
        Value::string("c"),
        Value::string("ab"),
    ]);
    assert_eq!(value, expected);
}

#[test]
fn dict_keeps_insertion_order() {
    let value = loads("dS1|zi1|S1|ai2|}").unwrap();
    assert_eq!(value.repr(), "{\"z\": 1, \"a\": 2}");
}

// Errors

fn offset_of(err: &Ul4onError) -> usize {
    match err {
        Ul4onError::Syntax { offset, .. } => *offset,
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn unknown_typecode() {
    let err = loads("li1|x]").unwrap_err();
    assert_eq!(offset_of(&err), 4);
    assert_eq!(err.to_string(), "broken UL4ON stream at offset 4: unknown typecode 'x'");
}

#[test]
fn truncated_input() {
    assert_eq!(offset_of(&loads("S5|abc").unwrap_err()), 3);
    assert!(loads("li1|").is_err());
    assert!(loads("i12").is_err());
    assert!(loads("t2000").is_err());
}

#[test]
fn trailing_data() {
    assert_eq!(offset_of(&loads("i1|i2|").unwrap_err()), 3);
}

#[test]
fn invalid_backreference() {
    assert!(loads("^0|").is_err());
}

#[test]
fn invalid_color_channel() {
    assert!(loads("ci256|i0|i0|i0|").is_err());
}

#[test]
fn unknown_object_type() {
    let err = loads("OS9|com.x.foo)").unwrap_err();
    assert_eq!(err, Ul4onError::UnknownType("com.x.foo".to_string()));
}

// Custom registries

fn load_point(decoder: &mut Decoder<'_>, tag: &str) -> Result<Loaded, Ul4onError> {
    assert_eq!(tag, "com.example.point");
    let x = decoder.load_int()?;
    let y = decoder.load_int()?;
    Ok(Loaded::Value(ints(&[x, y])))
}

fn load_self_reference(decoder: &mut Decoder<'_>, _tag: &str) -> Result<Loaded, Ul4onError> {
    decoder.load()
}

#[test]
fn custom_registry_extends_builtin() {
    let mut registry = Registry::builtin().clone();
    assert!(registry.register("com.example.point", load_point).is_none());
    assert!(registry.contains("de.livinglogic.ul4.for"));

    let input = "lOS17|com.example.pointi1|i2|)^0|]";
    let mut decoder = Decoder::with_registry(input, &registry);
    let value = decoder.load_value().unwrap();
    decoder.finish().unwrap();
    assert_eq!(value, Value::list(vec![ints(&[1, 2]), ints(&[1, 2])]));

    assert!(!Registry::builtin().contains("com.example.point"));
}

#[test]
fn backreference_to_unfinished_object() {
    let mut registry = Registry::new();
    registry.register("self", load_self_reference);
    let mut decoder = Decoder::with_registry("OS4|self^0|)", &registry);
    let err = decoder.load().unwrap_err();
    assert_eq!(
        err.to_string(),
        "broken UL4ON stream at offset 8: backreference to unfinished object"
    );
}
