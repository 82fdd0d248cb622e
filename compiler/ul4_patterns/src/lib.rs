#![allow(
    clippy::result_large_err,
    reason = "EvalError carries its location inline; boxing would touch every call site"
)]
//! UL4 Patterns: the runtime value model shared by the evaluator and UL4ON.
//!
//! This crate provides:
//! - Runtime values (`Value`, `Heap`) with factory-only container allocation
//! - The iterator protocol (`IteratorHandle`, `IteratorValue`, `LazySource`)
//! - Evaluation errors (`EvalError`, `EvalErrorKind`, `ErrorCategory`) and
//!   their `#[cold]` factories

pub mod errors;
mod value;

pub use errors::{CallKind, ControlFlow, ErrorCategory, EvalError, EvalErrorKind, EvalResult};
pub use value::iterator::{Lookahead, Markers};
pub use value::{DictMap, Heap, IteratorHandle, IteratorValue, LazySource, Value};
