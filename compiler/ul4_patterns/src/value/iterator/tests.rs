//! Tests for the iterator protocol.
#![allow(clippy::unwrap_used, reason = "test code uses unwrap for concise assertions")]

use pretty_assertions::assert_eq;

use super::*;
use crate::DictMap;

fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().map(|n| Value::Int(*n)).collect()
}

fn drain(state: IteratorValue) -> Vec<Value> {
    IteratorHandle::new(state).collect().unwrap()
}

// Sources

#[test]
fn list_iterator_is_fused() {
    let handle = Value::list(ints(&[1])).iter().unwrap();
    assert_eq!(handle.next().unwrap(), Some(Value::Int(1)));
    assert_eq!(handle.next().unwrap(), None);
    assert_eq!(handle.next().unwrap(), None);
}

#[test]
fn string_yields_characters() {
    let items = Value::string("aé").iter().unwrap().collect().unwrap();
    assert_eq!(items, vec![Value::string("a"), Value::string("é")]);
}

#[test]
fn dict_yields_keys_in_order() {
    let mut map = DictMap::default();
    map.insert("b".to_string(), Value::Int(1));
    map.insert("a".to_string(), Value::Int(2));
    let items = Value::dict(map).iter().unwrap().collect().unwrap();
    assert_eq!(items, vec![Value::string("b"), Value::string("a")]);
}

#[test]
fn color_yields_channels() {
    let color = Value::Color(ul4_ir::Color::new(1, 2, 3, 4));
    assert_eq!(color.to_vec().unwrap(), ints(&[1, 2, 3, 4]));
}

#[test]
fn scalar_is_not_iterable() {
    let err = Value::Int(5).iter().unwrap_err();
    assert_eq!(err.message, "'int' object is not iterable");
}

#[test]
fn existing_handle_shares_cursor() {
    let value = Value::iterator(IteratorValue::range(0, 3, 1).unwrap());
    let first = value.iter().unwrap();
    assert_eq!(first.next().unwrap(), Some(Value::Int(0)));
    let second = value.iter().unwrap();
    assert_eq!(second.collect().unwrap(), ints(&[1, 2]));
    assert_eq!(first.next().unwrap(), None);
}

// Range

#[test]
fn range_forms() {
    assert_eq!(drain(IteratorValue::range(0, 5, 1).unwrap()), ints(&[0, 1, 2, 3, 4]));
    assert_eq!(drain(IteratorValue::range(1, 10, 4).unwrap()), ints(&[1, 5, 9]));
    assert_eq!(drain(IteratorValue::range(5, 0, -2).unwrap()), ints(&[5, 3, 1]));
    assert_eq!(drain(IteratorValue::range(5, 0, 1).unwrap()), ints(&[]));
}

#[test]
fn range_zero_step() {
    let err = IteratorValue::range(0, 5, 0).unwrap_err();
    assert_eq!(err.message, "range() requires a step argument != 0");
}

#[test]
fn range_near_limits() {
    let items = drain(IteratorValue::range(i64::MAX - 1, i64::MAX, 5).unwrap());
    assert_eq!(items, ints(&[i64::MAX - 1]));
}

// Producers

#[test]
fn reversed_list() {
    let handle = Value::list(ints(&[1, 2, 3])).iter_reversed().unwrap();
    assert_eq!(handle.collect().unwrap(), ints(&[3, 2, 1]));
}

#[test]
fn reversed_string() {
    let handle = Value::string("abc").iter_reversed().unwrap();
    let items = handle.collect().unwrap();
    assert_eq!(items, vec![Value::string("c"), Value::string("b"), Value::string("a")]);
}

#[test]
fn enumerate_with_start() {
    let inner = Value::string("ab").iter().unwrap();
    let items = drain(IteratorValue::enumerate(inner, 3));
    assert_eq!(
        items,
        vec![
            Value::list(vec![Value::Int(3), Value::string("a")]),
            Value::list(vec![Value::Int(4), Value::string("b")]),
        ]
    );
}

#[test]
fn zip_stops_at_shortest() {
    let a = Value::list(ints(&[1, 2])).iter().unwrap();
    let b = Value::list(ints(&[3, 4, 5])).iter().unwrap();
    let items = drain(IteratorValue::zip(vec![a, b]));
    assert_eq!(
        items,
        vec![Value::list(ints(&[1, 3])), Value::list(ints(&[2, 4]))]
    );
}

#[test]
fn zip_without_arguments_is_empty() {
    assert_eq!(drain(IteratorValue::zip(Vec::new())), Vec::<Value>::new());
}

// Markers

const FIRST: Markers = Markers {
    index: false,
    first: true,
    last: false,
};
const LAST: Markers = Markers {
    index: false,
    first: false,
    last: true,
};
const ENUMFL: Markers = Markers {
    index: true,
    first: true,
    last: true,
};

#[test]
fn isfirst_marks_first_only() {
    let inner = Value::list(ints(&[7, 8])).iter().unwrap();
    let items = drain(IteratorValue::flagged(inner, FIRST, 0));
    assert_eq!(
        items,
        vec![
            Value::list(vec![Value::Bool(true), Value::Int(7)]),
            Value::list(vec![Value::Bool(false), Value::Int(8)]),
        ]
    );
}

#[test]
fn islast_marks_last_only() {
    let inner = Value::list(ints(&[7, 8])).iter().unwrap();
    let items = drain(IteratorValue::flagged(inner, LAST, 0));
    assert_eq!(
        items,
        vec![
            Value::list(vec![Value::Bool(false), Value::Int(7)]),
            Value::list(vec![Value::Bool(true), Value::Int(8)]),
        ]
    );
}

#[test]
fn enumfl_single_item_is_first_and_last() {
    let inner = Value::list(ints(&[9])).iter().unwrap();
    let items = drain(IteratorValue::flagged(inner, ENUMFL, 1));
    assert_eq!(
        items,
        vec![Value::list(vec![
            Value::Int(1),
            Value::Bool(true),
            Value::Bool(true),
            Value::Int(9)
        ])]
    );
}

#[test]
fn flagged_empty() {
    let inner = Value::list(Vec::new()).iter().unwrap();
    assert_eq!(drain(IteratorValue::flagged(inner, ENUMFL, 0)), Vec::<Value>::new());
}

// Lazy sources

struct Countdown(i64);

impl LazySource for Countdown {
    fn next_value(&mut self) -> Result<Option<Value>, EvalError> {
        if self.0 < 0 {
            return Err(errors::invalid_value("countdown underflow"));
        }
        if self.0 == 0 {
            return Ok(None);
        }
        self.0 -= 1;
        Ok(Some(Value::Int(self.0)))
    }
}

#[test]
fn lazy_source_drives_items() {
    assert_eq!(drain(IteratorValue::lazy(Countdown(3))), ints(&[2, 1, 0]));
}

#[test]
fn lazy_source_errors_propagate() {
    let handle = IteratorHandle::new(IteratorValue::lazy(Countdown(-1)));
    let err = handle.next().unwrap_err();
    assert_eq!(err.message, "countdown underflow");
}
