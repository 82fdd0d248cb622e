//! Tests for error construction and messages.

use pretty_assertions::assert_eq;

use super::*;

// Messages

#[test]
fn arity_exact() {
    let err = wrong_arg_count(CallKind::Function, "len", 1, Some(1), 2);
    assert_eq!(err.message, "function len() requires 1 argument, 2 given");
    assert_eq!(err.category(), ErrorCategory::ArgumentError);
    let err = wrong_arg_count(CallKind::Function, "random", 0, Some(0), 1);
    assert_eq!(err.message, "function random() requires 0 arguments, 1 given");
}

#[test]
fn arity_range_and_open() {
    let err = wrong_arg_count(CallKind::Method, "split", 0, Some(2), 3);
    assert_eq!(err.message, "method split() requires 0-2 arguments, 3 given");
    let err = wrong_arg_count(CallKind::Function, "min", 1, None, 0);
    assert_eq!(err.message, "function min() requires at least 1 argument, 0 given");
}

#[test]
fn operator_messages() {
    assert_eq!(
        binary_not_supported("int", "+", "str").message,
        "int + str not supported"
    );
    assert_eq!(
        unorderable_types("int", "<", "str").message,
        "unorderable types: int() < str()"
    );
    assert_eq!(
        negative_repetition().message,
        "mul() repetition counter must be positive"
    );
}

#[test]
fn unpack_messages() {
    assert_eq!(
        unpack_mismatch(2, 2, true).message,
        "mismatched variable unpacking: 2 varnames, >2 items"
    );
    assert_eq!(
        unpack_mismatch(3, 2, false).message,
        "mismatched variable unpacking: 3 varnames, 2 items"
    );
}

// Categories

#[test]
fn categories() {
    assert_eq!(division_by_zero().category(), ErrorCategory::ZeroDivisionError);
    assert_eq!(key_not_found("\"x\"").category(), ErrorCategory::KeyError);
    assert_eq!(index_out_of_range(5).category(), ErrorCategory::IndexError);
    assert_eq!(undefined_variable("x").category(), ErrorCategory::NameError);
    assert_eq!(unknown_type("x.y").category(), ErrorCategory::UnknownTypeError);
    assert_eq!(version_mismatch("20", "19").category(), ErrorCategory::VersionError);
    assert_eq!(integer_overflow("addition").category(), ErrorCategory::OverflowError);
    assert_eq!(EvalError::new("bad").category(), ErrorCategory::ValueError);
    assert_eq!(invalid_type("bad").category(), ErrorCategory::TypeError);
}

#[test]
fn splat_requires_dict() {
    let err = splat_not_dict("list");
    assert_eq!(err.message, "** requires a dict, not list");
    assert_eq!(err.category(), ErrorCategory::TypeError);
}

// Signals and locations

#[test]
fn control_signals() {
    let signal = EvalError::break_signal();
    assert!(signal.is_control_flow());
    assert_eq!(signal.control_flow, Some(ControlFlow::Break));
    assert!(!division_by_zero().is_control_flow());
}

#[test]
fn location_is_kept_innermost() {
    use std::sync::Arc;
    use ul4_ir::Span;

    let inner = Location::text(Arc::from("abc"), Span::new(0, 1));
    let outer = Location::text(Arc::from("abc"), Span::new(0, 3));
    let err = division_by_zero().with_location(&inner).with_location(&outer);
    assert_eq!(err.location, Some(inner));
    assert_eq!(
        err.to_string(),
        "ZeroDivisionError: division by zero (offset 0:1; text \"a\")"
    );
}
