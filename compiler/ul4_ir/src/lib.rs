//! UL4 IR: the data every other UL4 crate agrees on.
//!
//! - [`ast`]: node catalogue, templates and pretty-printing
//! - [`calendar`]: naive dates, durations and month deltas
//! - [`Color`]: RGBA colors
//! - [`Literal`]: constant values and their source representations
//! - [`Location`] / [`Span`]: source positions
//! - [`format_spec`]: integer format specifications

pub mod ast;
pub mod calendar;
mod color;
pub mod format_spec;
mod literal;
mod location;
mod operators;
mod span;

pub use ast::{
    Block, Comprehension, DictItem, KeywordArg, Node, NodeId, NodeKind, NodeRef, Template,
    VarTarget,
};
pub use calendar::{CalendarError, Date, MonthDelta, TimeDelta};
pub use color::Color;
pub use literal::{float_repr, str_repr, Literal};
pub use location::Location;
pub use operators::{AugOp, BinaryOp, UnaryOp};
pub use span::Span;

/// Serialization format version embedded in every dumped template.
pub const UL4_VERSION: &str = "20";
