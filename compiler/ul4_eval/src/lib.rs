#![allow(
    clippy::result_large_err,
    reason = "EvalError carries its location inline; boxing would touch every call site"
)]
//! UL4 Eval - tree-walking evaluator and builtin library for UL4 templates.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Environment`: variable scoping with a scope stack
//! - `Interpreter`: node evaluation, statement execution and nested renders
//! - `evaluate_binary` / `evaluate_unary`: enum-based operator dispatch
//! - `functions` / `methods`: name-keyed builtin tables with arity checks
//! - `format`: `format()` for dates and integers, with locale tables
//! - `Value` types from `ul4_patterns`
//!
//! # Entry Points
//!
//! [`render`] and [`render_to_string`] run a template against a set of
//! variables; [`evaluate`] evaluates a single expression node. For more
//! control build an [`Interpreter`] with [`InterpreterBuilder`].

mod environment;
mod format;
mod functions;
mod helpers;
pub mod interpreter;
mod methods;
mod operators;
mod unary_operators;

use std::sync::Once;

use ul4_ir::ast::{Node, Template};

pub use environment::Environment;
pub use interpreter::{Interpreter, InterpreterBuilder, DEFAULT_MAX_DEPTH};
pub use operators::{evaluate_binary, get_slice};
pub use ul4_patterns::{DictMap, ErrorCategory, EvalError, EvalResult, Value};
pub use unary_operators::evaluate_unary;

/// Render `template` with `vars` and return the output fragments.
#[tracing::instrument(level = "debug", skip_all, fields(template = template.display_name()))]
pub fn render(template: &Template, vars: DictMap) -> Result<Vec<String>, EvalError> {
    InterpreterBuilder::new().vars(vars).build().render(template)
}

/// Render `template` with `vars` into one string.
pub fn render_to_string(template: &Template, vars: DictMap) -> Result<String, EvalError> {
    render(template, vars).map(|output| output.concat())
}

/// Evaluate an expression node with `vars` in scope.
pub fn evaluate(node: &Node, vars: DictMap) -> EvalResult {
    InterpreterBuilder::new().vars(vars).build().eval(node)
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=ul4_eval=debug` or
/// `RUST_LOG=ul4_eval=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // An embedding program may have installed its own subscriber.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}

#[cfg(test)]
mod tests;
