//! Tests for the scope stack.
#![allow(clippy::unwrap_used, reason = "test code uses unwrap for concise assertions")]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn bind_and_lookup() {
    let mut env = Environment::new();
    env.bind("x", Value::Int(42));
    assert_eq!(env.lookup("x"), Some(&Value::Int(42)));
    assert_eq!(env.lookup("y"), None);
}

#[test]
fn rebinding_replaces() {
    let mut env = Environment::new();
    env.bind("x", Value::Int(1));
    env.bind("x", Value::Int(2));
    assert_eq!(env.lookup("x"), Some(&Value::Int(2)));
}

#[test]
fn inner_scope_shadows_and_disappears() {
    let mut env = Environment::new();
    env.bind("x", Value::Int(1));

    env.push_scope();
    env.bind("x", Value::Int(2));
    env.bind("y", Value::Int(3));
    assert_eq!(env.depth(), 2);
    assert_eq!(env.lookup("x"), Some(&Value::Int(2)));

    env.pop_scope();
    assert_eq!(env.lookup("x"), Some(&Value::Int(1)));
    assert_eq!(env.lookup("y"), None);
}

#[test]
fn bottom_scope_is_never_popped() {
    let mut env = Environment::new();
    env.bind("x", Value::Int(1));
    env.pop_scope();
    assert_eq!(env.depth(), 1);
    assert_eq!(env.lookup("x"), Some(&Value::Int(1)));
}

#[test]
fn remove_innermost() {
    let mut env = Environment::new();
    env.bind("x", Value::Int(1));
    env.push_scope();
    env.bind("x", Value::Int(2));

    assert_eq!(env.remove("x"), Some(Value::Int(2)));
    assert_eq!(env.lookup("x"), Some(&Value::Int(1)));
    assert_eq!(env.remove("x"), Some(Value::Int(1)));
    assert_eq!(env.remove("x"), None);
}

#[test]
fn snapshot_keeps_definition_order() {
    let mut vars = DictMap::default();
    vars.insert("b".to_string(), Value::Int(1));
    vars.insert("a".to_string(), Value::Int(2));
    let mut env = Environment::from_vars(&vars);
    env.push_scope();
    env.bind("c", Value::Int(3));
    env.bind("b", Value::Int(4));

    let snapshot = env.snapshot();
    let names: Vec<&str> = snapshot.keys().map(String::as_str).collect();
    assert_eq!(names, ["b", "a", "c"]);
    assert_eq!(snapshot["b"], Value::Int(4));
}
