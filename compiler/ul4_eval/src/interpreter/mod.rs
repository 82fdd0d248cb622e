//! Tree-walking interpreter for UL4 templates.
//!
//! # Architecture
//!
//! Every node goes through [`Interpreter::eval`], which grows the stack if
//! needed and stamps errors with the node's location. Statement nodes
//! evaluate to `None` and act through the scope or the output buffer:
//!
//! - `statements` - output, assignment, loops and conditionals
//! - `expressions` - literals, comprehensions, attribute access and calls
//! - `generator` - lazy generator expressions
//!
//! # Control Flow
//!
//! `break` and `continue` travel up as [`EvalError`]s carrying a
//! [`ControlFlow`](ul4_patterns::ControlFlow) signal. The nearest `for` loop
//! consumes them; one that reaches [`Interpreter::render`] is turned into an
//! ordinary error.
//!
//! # Nested Renders
//!
//! `t.render(...)` and `t.renders(...)` run the callee in a child
//! interpreter whose scope holds only the keyword arguments. The child is one
//! level deeper; exceeding the configured maximum depth is an error.

mod builder;
mod expressions;
mod generator;
mod statements;

pub use builder::{InterpreterBuilder, DEFAULT_MAX_DEPTH};

use ul4_ir::ast::{Block, Node, NodeKind, Template};
use ul4_patterns::errors::{
    break_outside_loop, continue_outside_loop, recursion_limit_exceeded, undefined_variable,
};
use ul4_patterns::{ControlFlow, EvalError, EvalResult, Value};
use ul4_stack::with_stack_guard;

use crate::environment::Environment;
use crate::operators::evaluate_binary;
use crate::unary_operators::evaluate_unary;

/// Evaluator state: the variable scope, the output buffer of the template
/// being rendered, and the nested render depth.
#[derive(Clone, Debug)]
pub struct Interpreter {
    pub(crate) env: Environment,
    pub(crate) output: Vec<String>,
    depth: usize,
    max_depth: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        InterpreterBuilder::new().build()
    }
}

impl Interpreter {
    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Output produced so far by statements run through [`Interpreter::exec`].
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Drain the output buffer.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    /// Nested render depth; 0 for the outermost template.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Evaluate a node.
    ///
    /// Errors raised below `node` without a location get `node`'s location.
    pub fn eval(&mut self, node: &Node) -> EvalResult {
        with_stack_guard(|| self.eval_inner(node)).map_err(|err| err.with_location(&node.location))
    }

    /// Run a statement node for its effect.
    pub fn exec(&mut self, node: &Node) -> Result<(), EvalError> {
        self.eval(node).map(drop)
    }

    pub(crate) fn exec_block(&mut self, block: &Block) -> Result<(), EvalError> {
        for node in &block.content {
            self.exec(node)?;
        }
        Ok(())
    }

    /// Execute `template` in the current scope and return its output.
    ///
    /// A `break` or `continue` that escapes every loop fails here.
    #[tracing::instrument(level = "debug", skip_all, fields(template = template.display_name(), depth = self.depth))]
    pub fn render(&mut self, template: &Template) -> Result<Vec<String>, EvalError> {
        tracing::debug!("rendering template");
        let saved = std::mem::take(&mut self.output);
        let result = self.exec_block(&template.block);
        let output = std::mem::replace(&mut self.output, saved);
        result.map_err(stray_signal)?;
        Ok(output)
    }

    /// Child interpreter for a nested render, or an error past the maximum
    /// depth.
    pub(crate) fn child(&self, env: Environment) -> Result<Interpreter, EvalError> {
        if self.depth >= self.max_depth {
            return Err(recursion_limit_exceeded(self.max_depth));
        }
        Ok(Interpreter {
            env,
            output: Vec::new(),
            depth: self.depth + 1,
            max_depth: self.max_depth,
        })
    }

    fn eval_inner(&mut self, node: &Node) -> EvalResult {
        match &node.kind {
            // Literals
            NodeKind::LoadNone => Ok(Value::None),
            NodeKind::LoadTrue => Ok(Value::Bool(true)),
            NodeKind::LoadFalse => Ok(Value::Bool(false)),
            NodeKind::Const(literal) => Ok(Value::from_literal(literal)),
            NodeKind::List(items) => self.eval_list(items),
            NodeKind::ListComp { item, comp } => self.eval_list_comp(item, comp),
            NodeKind::Dict(items) => self.eval_dict(items),
            NodeKind::DictComp { key, value, comp } => self.eval_dict_comp(key, value, comp),
            NodeKind::GenExpr { item, comp } => self.eval_gen_expr(item, comp),

            // Expressions
            NodeKind::Var(name) => self
                .env
                .lookup(name)
                .cloned()
                .ok_or_else(|| undefined_variable(name)),
            NodeKind::Unary { op, operand } => {
                let operand = self.eval(operand)?;
                evaluate_unary(*op, operand)
            }
            NodeKind::Binary { op, left, right } => self.eval_binary(*op, left, right),
            NodeKind::GetAttr { object, attr } => {
                let object = self.eval(object)?;
                expressions::get_attr(&object, attr)
            }
            NodeKind::GetSlice {
                object,
                start,
                stop,
            } => self.eval_slice(object, start.as_deref(), stop.as_deref()),
            NodeKind::CallFunc { name, args } => self.call_function(name, args),
            NodeKind::CallMeth { name, object, args } => self.call_method(name, object, args),
            NodeKind::CallMethKeywords { name, object, args } => {
                self.call_method_keywords(name, object, args)
            }

            // Statements
            NodeKind::Text => {
                self.output.push(node.location.code().to_string());
                Ok(Value::None)
            }
            NodeKind::Print(operand) => {
                let value = self.eval(operand)?;
                self.output.push(value.to_str());
                Ok(Value::None)
            }
            NodeKind::PrintX(operand) => {
                let value = self.eval(operand)?;
                self.output.push(crate::functions::xmlescape(&value.to_str()));
                Ok(Value::None)
            }
            NodeKind::Render(operand) => self.exec_render(operand).map(|()| Value::None),
            NodeKind::StoreVar { target, value } => {
                let value = self.eval(value)?;
                self.assign(target, value).map(|()| Value::None)
            }
            NodeKind::AugAssign { op, name, value } => {
                let current = self
                    .env
                    .lookup(name)
                    .cloned()
                    .ok_or_else(|| undefined_variable(name))?;
                let operand = self.eval(value)?;
                let result = evaluate_binary(current, operand, op.binary())?;
                self.env.bind(name, result);
                Ok(Value::None)
            }
            NodeKind::DelVar(name) => {
                self.env
                    .remove(name)
                    .ok_or_else(|| undefined_variable(name))?;
                Ok(Value::None)
            }
            NodeKind::For {
                target,
                container,
                block,
            } => self.exec_for(target, container, block).map(|()| Value::None),
            NodeKind::Break => Err(EvalError::break_signal()),
            NodeKind::Continue => Err(EvalError::continue_signal()),
            NodeKind::IfElIfElse(chain) => self.exec_conditional(chain).map(|()| Value::None),
            NodeKind::If { condition, block } | NodeKind::ElIf { condition, block } => {
                if self.eval(condition)?.is_truthy() {
                    self.exec_block(block)?;
                }
                Ok(Value::None)
            }
            NodeKind::Else(block) => self.exec_block(block).map(|()| Value::None),
            NodeKind::Template(template) => {
                self.env
                    .bind(template.display_name(), Value::template(template.clone()));
                Ok(Value::None)
            }
        }
    }
}

/// Turn a loop signal that left every loop into an error at the same spot.
fn stray_signal(err: EvalError) -> EvalError {
    let replacement = match err.control_flow {
        Some(ControlFlow::Break) => break_outside_loop(),
        Some(ControlFlow::Continue) => continue_outside_loop(),
        None => return err,
    };
    match &err.location {
        Some(location) => replacement.with_location(location),
        None => replacement,
    }
}
