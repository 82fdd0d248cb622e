//! Unary operator dispatch.

use ul4_ir::{MonthDelta, UnaryOp};
use ul4_patterns::errors::{integer_overflow, unary_not_supported};
use ul4_patterns::{EvalResult, Value};

/// Apply a prefix operator to an evaluated operand.
pub fn evaluate_unary(op: UnaryOp, operand: Value) -> EvalResult {
    match op {
        UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
        UnaryOp::Neg => match operand {
            Value::Bool(b) => Ok(Value::Int(-i64::from(b))),
            Value::Int(n) => n
                .checked_neg()
                .map(Value::Int)
                .ok_or_else(|| integer_overflow("negation")),
            Value::Float(f) => Ok(Value::Float(-f)),
            Value::TimeDelta(delta) => delta
                .checked_neg()
                .map(Value::TimeDelta)
                .ok_or_else(|| integer_overflow("negation")),
            Value::MonthDelta(delta) => delta
                .months()
                .checked_neg()
                .map(|months| Value::MonthDelta(MonthDelta::new(months)))
                .ok_or_else(|| integer_overflow("negation")),
            other => Err(unary_not_supported(op.prefix(), other.type_name())),
        },
    }
}
