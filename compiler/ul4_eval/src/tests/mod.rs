//! Test modules relocated from implementation files.
//!
//! Shared node builders live here; each module covers one part of the
//! evaluator.
#![allow(clippy::unwrap_used, reason = "test code uses unwrap for concise assertions")]

mod control_tests;
mod operators_tests;
mod unary_operators_tests;

use std::sync::Arc;

use ul4_ir::ast::{Block, Node, NodeRef, Template};
use ul4_ir::{BinaryOp, Literal, Location, Span};
use ul4_patterns::{DictMap, EvalError, EvalResult, Value};

pub(crate) fn loc() -> Location {
    Location::text(Arc::from(""), Span::EMPTY)
}

/// Literal text node whose location covers `text`.
pub(crate) fn text(text: &str) -> NodeRef {
    Node::text(Location::text(Arc::from(text), Span::new(0, text.len() as u32)))
}

pub(crate) fn int(n: i64) -> NodeRef {
    Node::constant(loc(), Literal::Int(n))
}

pub(crate) fn float(f: f64) -> NodeRef {
    Node::constant(loc(), Literal::Float(f))
}

pub(crate) fn string(s: &str) -> NodeRef {
    Node::constant(loc(), Literal::Str(s.to_string()))
}

pub(crate) fn none() -> NodeRef {
    Node::constant(loc(), Literal::None)
}

pub(crate) fn var(name: &str) -> NodeRef {
    Node::var(loc(), name)
}

pub(crate) fn binary(op: BinaryOp, left: NodeRef, right: NodeRef) -> NodeRef {
    Node::binary(loc(), op, left, right)
}

pub(crate) fn call(name: &str, args: Vec<NodeRef>) -> NodeRef {
    Node::call_func(loc(), name, args)
}

pub(crate) fn meth(object: NodeRef, name: &str, args: Vec<NodeRef>) -> NodeRef {
    Node::call_meth(loc(), object, name, args)
}

pub(crate) fn print(value: NodeRef) -> NodeRef {
    Node::print(loc(), value)
}

pub(crate) fn template(name: &str, content: Vec<NodeRef>) -> Arc<Template> {
    Arc::new(Template::new(
        None,
        "",
        Some(name.to_string()),
        "<?",
        "?>",
        Block::new(content),
    ))
}

/// Evaluate `node` with no variables.
pub(crate) fn eval(node: &NodeRef) -> EvalResult {
    crate::evaluate(node, DictMap::new())
}

/// Render `content` as the body of a template named `t`.
pub(crate) fn render(content: Vec<NodeRef>) -> Result<String, EvalError> {
    crate::render_to_string(&template("t", content), DictMap::new())
}

pub(crate) fn render_with(content: Vec<NodeRef>, vars: DictMap) -> Result<String, EvalError> {
    crate::render_to_string(&template("t", content), vars)
}

pub(crate) fn list(items: Vec<Value>) -> Value {
    Value::list(items)
}

pub(crate) fn strs(items: &[&str]) -> Value {
    Value::list(items.iter().map(|s| Value::string(*s)).collect())
}
