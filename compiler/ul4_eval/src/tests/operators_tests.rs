//! Tests for binary operator implementations.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use ul4_ir::{BinaryOp, Color, Date, MonthDelta, TimeDelta};
use ul4_patterns::{ErrorCategory, Value};

use super::{list, strs};
use crate::operators::{
    compare, evaluate_binary, get_slice, repetitions, slice_range, MAX_REPEAT_LEN,
};

fn binop(left: Value, op: BinaryOp, right: Value) -> Value {
    evaluate_binary(left, right, op).unwrap()
}

fn category(left: Value, op: BinaryOp, right: Value) -> ErrorCategory {
    evaluate_binary(left, right, op).unwrap_err().category()
}

fn date(y: i64, m: i64, d: i64) -> Value {
    Value::Date(Date::from_ymd(y, m, d).unwrap())
}

// Arithmetic

#[test]
fn int_arithmetic() {
    assert_eq!(binop(Value::Int(2), BinaryOp::Add, Value::Int(3)), Value::Int(5));
    assert_eq!(binop(Value::Int(5), BinaryOp::Sub, Value::Int(3)), Value::Int(2));
    assert_eq!(binop(Value::Int(2), BinaryOp::Mul, Value::Int(3)), Value::Int(6));
    assert_eq!(binop(Value::Int(7), BinaryOp::FloorDiv, Value::Int(2)), Value::Int(3));
    assert_eq!(binop(Value::Int(7), BinaryOp::Mod, Value::Int(2)), Value::Int(1));
}

#[test]
fn true_division_always_floats() {
    assert_eq!(binop(Value::Int(7), BinaryOp::TrueDiv, Value::Int(2)), Value::Float(3.5));
    assert!(matches!(
        binop(Value::Int(4), BinaryOp::TrueDiv, Value::Int(2)),
        Value::Float(f) if f == 2.0
    ));
}

#[test]
fn floor_semantics_follow_the_divisor() {
    assert_eq!(binop(Value::Int(-7), BinaryOp::FloorDiv, Value::Int(2)), Value::Int(-4));
    assert_eq!(binop(Value::Int(7), BinaryOp::FloorDiv, Value::Int(-2)), Value::Int(-4));
    assert_eq!(binop(Value::Int(-7), BinaryOp::Mod, Value::Int(2)), Value::Int(1));
    assert_eq!(binop(Value::Int(7), BinaryOp::Mod, Value::Int(-2)), Value::Int(-1));
    assert_eq!(binop(Value::Float(-7.5), BinaryOp::Mod, Value::Int(2)), Value::Float(0.5));
    assert_eq!(binop(Value::Float(-7.5), BinaryOp::FloorDiv, Value::Int(2)), Value::Float(-4.0));
}

#[test]
fn bools_count_as_integers() {
    assert_eq!(binop(Value::Bool(true), BinaryOp::Add, Value::Bool(true)), Value::Int(2));
    assert_eq!(binop(Value::Bool(true), BinaryOp::Mul, Value::Float(2.5)), Value::Float(2.5));
}

#[test]
fn mixed_numbers_promote_to_float() {
    assert_eq!(binop(Value::Int(1), BinaryOp::Add, Value::Float(0.5)), Value::Float(1.5));
    assert_eq!(binop(Value::Float(1.5), BinaryOp::Sub, Value::Int(1)), Value::Float(0.5));
}

#[test]
fn division_by_zero() {
    assert_eq!(
        category(Value::Int(1), BinaryOp::FloorDiv, Value::Int(0)),
        ErrorCategory::ZeroDivisionError
    );
    assert_eq!(
        category(Value::Int(1), BinaryOp::TrueDiv, Value::Float(0.0)),
        ErrorCategory::ZeroDivisionError
    );
    assert_eq!(
        category(Value::Int(1), BinaryOp::Mod, Value::Int(0)),
        ErrorCategory::ZeroDivisionError
    );
}

#[test]
fn integer_overflow_is_reported() {
    assert_eq!(
        category(Value::Int(i64::MAX), BinaryOp::Add, Value::Int(1)),
        ErrorCategory::OverflowError
    );
    assert_eq!(
        category(Value::Int(i64::MIN), BinaryOp::Mul, Value::Int(-1)),
        ErrorCategory::OverflowError
    );
}

fn days(n: i64) -> Value {
    Value::TimeDelta(TimeDelta::new(n, 0, 0).unwrap())
}

#[test]
fn timedelta_overflow_is_reported() {
    let cases = [
        (days(i64::MAX), BinaryOp::Add, days(1)),
        (days(i64::MIN), BinaryOp::Sub, days(1)),
        (days(i64::MAX), BinaryOp::Mul, Value::Int(2)),
        (Value::Int(-2), BinaryOp::Mul, days(i64::MAX)),
        (days(i64::MAX), BinaryOp::Mul, Value::Float(1.5)),
        (days(i64::MAX), BinaryOp::TrueDiv, Value::Float(0.25)),
    ];
    for (left, op, right) in cases {
        let err = evaluate_binary(left, right, op).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::OverflowError);
    }
}

#[test]
fn timedelta_at_the_boundary_still_works() {
    assert_eq!(binop(days(i64::MAX - 1), BinaryOp::Add, days(1)), days(i64::MAX));
    assert_eq!(binop(days(i64::MIN + 1), BinaryOp::Sub, days(1)), days(i64::MIN));
}

#[test]
fn date_minus_extreme_delta_fails() {
    let err = evaluate_binary(date(2000, 1, 1), days(i64::MIN), BinaryOp::Sub).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::OverflowError);
    let err = evaluate_binary(date(2000, 1, 1), days(i64::MAX), BinaryOp::Add).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ValueError);
}

#[test]
fn string_and_list_concatenation() {
    assert_eq!(
        binop(Value::string("ab"), BinaryOp::Add, Value::string("cd")),
        Value::string("abcd")
    );
    assert_eq!(
        binop(strs(&["a"]), BinaryOp::Add, strs(&["b"])),
        strs(&["a", "b"])
    );
}

#[test]
fn repetition_works_in_both_orders() {
    assert_eq!(binop(Value::string("ab"), BinaryOp::Mul, Value::Int(3)), Value::string("ababab"));
    assert_eq!(binop(Value::Int(2), BinaryOp::Mul, strs(&["x"])), strs(&["x", "x"]));
    assert_eq!(binop(Value::string("ab"), BinaryOp::Mul, Value::Int(0)), Value::string(""));
    assert_eq!(
        category(Value::string("ab"), BinaryOp::Mul, Value::Int(-1)),
        ErrorCategory::ValueError
    );
}

#[test]
fn oversized_repetition_is_rejected() {
    let huge = Value::Int(1_000_000_000_000_000);
    let err = evaluate_binary(Value::string("a"), huge.clone(), BinaryOp::Mul).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::OverflowError);
    assert_eq!(
        err.message,
        "repetition result too large (length 1000000000000000, limit 268435456)"
    );
    let err = evaluate_binary(huge, strs(&["x"]), BinaryOp::Mul).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::OverflowError);
    assert_eq!(
        category(strs(&["x", "y"]), BinaryOp::Mul, Value::Int(i64::MAX)),
        ErrorCategory::OverflowError
    );
}

#[test]
fn repetition_up_to_the_limit_is_allowed() {
    let count = i64::try_from(MAX_REPEAT_LEN / 4).unwrap();
    assert_eq!(repetitions(count, 4).unwrap(), MAX_REPEAT_LEN / 4);
    assert!(repetitions(count + 1, 4).is_err());
    assert_eq!(repetitions(i64::MAX, 0).unwrap(), usize::try_from(i64::MAX).unwrap());
    assert_eq!(binop(Value::Bool(true), BinaryOp::Mul, Value::string("ab")), Value::string("ab"));
    assert_eq!(binop(list(vec![]), BinaryOp::Mul, Value::Int(i64::MAX)), list(vec![]));
}

#[test]
fn unsupported_pairs_name_both_types() {
    let err = evaluate_binary(Value::string("a"), Value::Int(1), BinaryOp::Add).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::TypeError);
    assert_eq!(err.message, "str + int not supported");
}

// Calendar arithmetic

#[test]
fn date_plus_timedelta() {
    let result = binop(date(2000, 2, 28), BinaryOp::Add, Value::TimeDelta(TimeDelta::new(1, 0, 0).unwrap()));
    assert_eq!(result, date(2000, 2, 29));
    let result = binop(Value::TimeDelta(TimeDelta::new(2, 0, 0).unwrap()), BinaryOp::Add, date(2000, 2, 28));
    assert_eq!(result, date(2000, 3, 1));
}

#[test]
fn date_minus_date_is_a_timedelta() {
    let result = binop(date(2000, 3, 1), BinaryOp::Sub, date(2000, 2, 1));
    assert_eq!(result, Value::TimeDelta(TimeDelta::new(29, 0, 0).unwrap()));
}

#[test]
fn monthdelta_clamps_to_month_end() {
    let result = binop(date(2000, 1, 31), BinaryOp::Add, Value::MonthDelta(MonthDelta::new(1)));
    assert_eq!(result, date(2000, 2, 29));
    let result = binop(date(2000, 3, 31), BinaryOp::Sub, Value::MonthDelta(MonthDelta::new(1)));
    assert_eq!(result, date(2000, 2, 29));
}

#[test]
fn delta_scaling() {
    assert_eq!(
        binop(Value::TimeDelta(TimeDelta::new(1, 0, 0).unwrap()), BinaryOp::Mul, Value::Int(3)),
        Value::TimeDelta(TimeDelta::new(3, 0, 0).unwrap())
    );
    assert_eq!(
        binop(Value::TimeDelta(TimeDelta::new(1, 0, 0).unwrap()), BinaryOp::TrueDiv, Value::Int(2)),
        Value::TimeDelta(TimeDelta::new(0, 43_200, 0).unwrap())
    );
    assert_eq!(
        binop(Value::MonthDelta(MonthDelta::new(7)), BinaryOp::FloorDiv, Value::Int(2)),
        Value::MonthDelta(MonthDelta::new(3))
    );
    assert_eq!(
        binop(Value::Int(2), BinaryOp::Mul, Value::MonthDelta(MonthDelta::new(5))),
        Value::MonthDelta(MonthDelta::new(10))
    );
}

// Comparison

#[test]
fn comparisons() {
    assert_eq!(binop(Value::Int(2), BinaryOp::Lt, Value::Int(3)), Value::Bool(true));
    assert_eq!(binop(Value::Int(3), BinaryOp::Gt, Value::Float(2.5)), Value::Bool(true));
    assert_eq!(binop(Value::Int(2), BinaryOp::Le, Value::Int(2)), Value::Bool(true));
    assert_eq!(binop(Value::Int(2), BinaryOp::Ge, Value::Int(3)), Value::Bool(false));
    assert_eq!(
        binop(Value::string("abc"), BinaryOp::Lt, Value::string("abd")),
        Value::Bool(true)
    );
}

#[test]
fn lists_compare_lexicographically() {
    let short = list(vec![Value::Int(1), Value::Int(2)]);
    let long = list(vec![Value::Int(1), Value::Int(2), Value::Int(0)]);
    let bigger = list(vec![Value::Int(1), Value::Int(3)]);
    assert_eq!(binop(short.clone(), BinaryOp::Lt, long), Value::Bool(true));
    assert_eq!(binop(bigger, BinaryOp::Gt, short), Value::Bool(true));
}

#[test]
fn nan_is_unordered() {
    let nan = Value::Float(f64::NAN);
    assert_eq!(binop(nan.clone(), BinaryOp::Lt, Value::Int(1)), Value::Bool(false));
    assert_eq!(binop(nan.clone(), BinaryOp::Ge, Value::Int(1)), Value::Bool(false));
    assert_eq!(binop(nan.clone(), BinaryOp::Eq, nan), Value::Bool(false));
}

#[test]
fn equality_crosses_numeric_types_only() {
    assert_eq!(binop(Value::Int(1), BinaryOp::Eq, Value::Float(1.0)), Value::Bool(true));
    assert_eq!(binop(Value::Bool(true), BinaryOp::Eq, Value::Int(1)), Value::Bool(true));
    assert_eq!(binop(Value::Int(1), BinaryOp::Eq, Value::string("1")), Value::Bool(false));
    assert_eq!(binop(Value::None, BinaryOp::Ne, Value::None), Value::Bool(false));
}

#[test]
fn ordering_mismatched_types_fails() {
    let err = evaluate_binary(Value::Int(1), Value::string("a"), BinaryOp::Lt).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::TypeError);
    assert_eq!(err.message, "unorderable types: int() < str()");
    assert!(compare(&Value::None, &Value::None).is_err());
}

// Membership

#[test]
fn containment() {
    assert_eq!(
        binop(Value::string("ell"), BinaryOp::Contains, Value::string("hello")),
        Value::Bool(true)
    );
    assert_eq!(binop(Value::Int(2), BinaryOp::Contains, list(vec![Value::Int(1), Value::Float(2.0)])), Value::Bool(true));
    let mut map = ul4_patterns::DictMap::new();
    map.insert("a".to_string(), Value::Int(1));
    assert_eq!(binop(Value::string("a"), BinaryOp::Contains, Value::dict(map.clone())), Value::Bool(true));
    assert_eq!(binop(Value::Int(1), BinaryOp::NotContains, Value::dict(map)), Value::Bool(true));
    assert_eq!(
        binop(Value::Int(0x33), BinaryOp::Contains, Value::Color(Color::rgb(0x11, 0x22, 0x33))),
        Value::Bool(true)
    );
}

#[test]
fn containment_in_a_non_container_fails() {
    assert_eq!(
        category(Value::Int(1), BinaryOp::Contains, Value::Int(5)),
        ErrorCategory::TypeError
    );
    assert_eq!(
        category(Value::Int(1), BinaryOp::Contains, Value::string("1")),
        ErrorCategory::TypeError
    );
}

// Subscription

#[test]
fn item_access() {
    let items = strs(&["a", "b", "c"]);
    assert_eq!(binop(items.clone(), BinaryOp::GetItem, Value::Int(0)), Value::string("a"));
    assert_eq!(binop(items.clone(), BinaryOp::GetItem, Value::Int(-1)), Value::string("c"));
    assert_eq!(binop(Value::string("héllo"), BinaryOp::GetItem, Value::Int(1)), Value::string("é"));
    assert_eq!(
        binop(Value::Color(Color::new(1, 2, 3, 4)), BinaryOp::GetItem, Value::Int(3)),
        Value::Int(4)
    );
    assert_eq!(category(items, BinaryOp::GetItem, Value::Int(3)), ErrorCategory::IndexError);
}

#[test]
fn missing_dict_key() {
    let err = evaluate_binary(Value::dict(ul4_patterns::DictMap::new()), Value::string("x"), BinaryOp::GetItem)
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::KeyError);
    assert_eq!(err.message, "key \"x\" not found");
}

#[test]
fn slicing_clamps_and_counts_from_the_end() {
    let text = Value::string("abcdef");
    assert_eq!(get_slice(&text, Some(1), Some(3)).unwrap(), Value::string("bc"));
    assert_eq!(get_slice(&text, Some(-2), None).unwrap(), Value::string("ef"));
    assert_eq!(get_slice(&text, None, Some(100)).unwrap(), Value::string("abcdef"));
    assert_eq!(get_slice(&text, Some(4), Some(2)).unwrap(), Value::string(""));
    let items = strs(&["a", "b", "c"]);
    assert_eq!(get_slice(&items, Some(-100), Some(-1)).unwrap(), strs(&["a", "b"]));
    assert!(get_slice(&Value::Int(1), None, None).is_err());
}

proptest! {
    #[test]
    fn floor_mod_has_the_sign_of_the_divisor(a in any::<i32>(), b in any::<i32>().prop_filter("nonzero", |b| *b != 0)) {
        let (a, b) = (i64::from(a), i64::from(b));
        let Value::Int(q) = evaluate_binary(Value::Int(a), Value::Int(b), BinaryOp::FloorDiv).unwrap() else {
            panic!("floor division of ints must be an int");
        };
        let Value::Int(r) = evaluate_binary(Value::Int(a), Value::Int(b), BinaryOp::Mod).unwrap() else {
            panic!("modulo of ints must be an int");
        };
        prop_assert_eq!(q * b + r, a);
        prop_assert!(r == 0 || (r < 0) == (b < 0));
        prop_assert!(r.abs() < b.abs());
    }

    #[test]
    fn slice_range_stays_in_bounds(len in 0usize..50, start in proptest::option::of(-60i64..60), stop in proptest::option::of(-60i64..60)) {
        let range = slice_range(len, start, stop);
        prop_assert!(range.start <= range.end);
        prop_assert!(range.end <= len);
    }
}
