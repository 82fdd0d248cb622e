//! Tests for unary operator implementations.

use pretty_assertions::assert_eq;
use ul4_ir::{MonthDelta, TimeDelta, UnaryOp};
use ul4_patterns::{ErrorCategory, Value};

use super::strs;
use crate::unary_operators::evaluate_unary;

#[test]
fn negation_of_numbers() {
    assert_eq!(evaluate_unary(UnaryOp::Neg, Value::Int(5)).unwrap(), Value::Int(-5));
    assert_eq!(evaluate_unary(UnaryOp::Neg, Value::Float(1.5)).unwrap(), Value::Float(-1.5));
    assert_eq!(evaluate_unary(UnaryOp::Neg, Value::Bool(true)).unwrap(), Value::Int(-1));
}

#[test]
fn negation_of_deltas() {
    assert_eq!(
        evaluate_unary(UnaryOp::Neg, Value::TimeDelta(TimeDelta::new(1, 0, 0).unwrap())).unwrap(),
        Value::TimeDelta(TimeDelta::new(-1, 0, 0).unwrap())
    );
    assert_eq!(
        evaluate_unary(UnaryOp::Neg, Value::MonthDelta(MonthDelta::new(3))).unwrap(),
        Value::MonthDelta(MonthDelta::new(-3))
    );
}

#[test]
fn negation_overflow() {
    let err = evaluate_unary(UnaryOp::Neg, Value::Int(i64::MIN)).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::OverflowError);
}

#[test]
fn negation_of_the_smallest_timedelta_overflows() {
    let smallest = Value::TimeDelta(TimeDelta::new(i64::MIN, 0, 0).unwrap());
    let err = evaluate_unary(UnaryOp::Neg, smallest).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::OverflowError);
}

#[test]
fn negation_of_strings_fails() {
    let err = evaluate_unary(UnaryOp::Neg, Value::string("x")).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::TypeError);
    assert_eq!(err.message, "-str not supported");
}

#[test]
fn not_uses_truthiness() {
    assert_eq!(evaluate_unary(UnaryOp::Not, Value::None).unwrap(), Value::Bool(true));
    assert_eq!(evaluate_unary(UnaryOp::Not, Value::Int(0)).unwrap(), Value::Bool(true));
    assert_eq!(evaluate_unary(UnaryOp::Not, Value::string("")).unwrap(), Value::Bool(true));
    assert_eq!(evaluate_unary(UnaryOp::Not, strs(&["a"])).unwrap(), Value::Bool(false));
    assert_eq!(
        evaluate_unary(UnaryOp::Not, Value::TimeDelta(TimeDelta::new(0, 0, 0).unwrap())).unwrap(),
        Value::Bool(true)
    );
}
