//! Lazy item source behind generator expressions.

use ul4_ir::ast::{Comprehension, NodeRef, VarTarget};
use ul4_patterns::{EvalError, IteratorHandle, LazySource, Value};

use super::Interpreter;

/// `(item for target in container if condition)`, advanced one item at a
/// time.
///
/// Owns a snapshot of the interpreter taken when the expression was
/// evaluated, so later assignments in the template do not leak in. Output
/// written while evaluating items is discarded.
pub(super) struct Generator {
    interpreter: Interpreter,
    iter: IteratorHandle,
    target: VarTarget,
    condition: Option<NodeRef>,
    item: NodeRef,
}

impl Generator {
    pub(super) fn new(
        interpreter: Interpreter,
        iter: IteratorHandle,
        comp: &Comprehension,
        item: NodeRef,
    ) -> Self {
        Generator {
            interpreter,
            iter,
            target: comp.target.clone(),
            condition: comp.condition.clone(),
            item,
        }
    }
}

impl LazySource for Generator {
    fn next_value(&mut self) -> Result<Option<Value>, EvalError> {
        while let Some(item) = self.iter.next()? {
            self.interpreter.assign(&self.target, item)?;
            if let Some(condition) = &self.condition {
                if !self.interpreter.eval(condition)?.is_truthy() {
                    continue;
                }
            }
            let value = self.interpreter.eval(&self.item)?;
            self.interpreter.output.clear();
            return Ok(Some(value));
        }
        Ok(None)
    }
}
