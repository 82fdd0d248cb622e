//! Runtime values.
//!
//! `Value` is a closed union. Containers live behind [`Heap`] and can only be
//! built through the factory methods (`Value::string`, `Value::list`,
//! `Value::dict`), so every container shares its payload on clone.
//!
//! Equality is structural: numbers compare numerically across `Bool`, `Int`
//! and `Float`; containers and calendar values compare by content; templates
//! and iterators compare by identity.

mod heap;
pub mod iterator;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use ul4_ir::{float_repr, str_repr, Color, Date, Literal, MonthDelta, Template, TimeDelta};

pub use heap::Heap;
pub use iterator::{IteratorHandle, IteratorValue, LazySource};

/// Insertion-ordered mapping stored in `Value::Dict`.
pub type DictMap = IndexMap<String, Value>;

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Heap<String>),
    List(Heap<Vec<Value>>),
    Dict(Heap<DictMap>),
    Date(Date),
    TimeDelta(TimeDelta),
    MonthDelta(MonthDelta),
    Color(Color),
    Template(Arc<Template>),
    Iterator(IteratorHandle),
}

// Factory methods

impl Value {
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    #[inline]
    pub fn dict(entries: DictMap) -> Self {
        Value::Dict(Heap::new(entries))
    }

    #[inline]
    pub fn template(template: Arc<Template>) -> Self {
        Value::Template(template)
    }

    /// Wrap iterator state in a fresh shared handle.
    #[inline]
    pub fn iterator(state: IteratorValue) -> Self {
        Value::Iterator(IteratorHandle::new(state))
    }

    pub fn from_literal(literal: &Literal) -> Self {
        match literal {
            Literal::None => Value::None,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Int(n) => Value::Int(*n),
            Literal::Float(f) => Value::Float(*f),
            Literal::Str(s) => Value::string(s.as_str()),
            Literal::Date(d) => Value::Date(*d),
            Literal::TimeDelta(td) => Value::TimeDelta(*td),
            Literal::MonthDelta(md) => Value::MonthDelta(*md),
            Literal::Color(c) => Value::Color(*c),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

// Type queries

impl Value {
    /// Name reported by `type()` and used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
            Value::Date(_) => "date",
            Value::TimeDelta(_) => "timedelta",
            Value::MonthDelta(_) => "monthdelta",
            Value::Color(_) => "color",
            Value::Template(_) => "template",
            Value::Iterator(_) => "iterator",
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Dict(map) => !map.is_empty(),
            Value::TimeDelta(td) => !td.is_zero(),
            Value::MonthDelta(md) => !md.is_zero(),
            Value::Date(_) | Value::Color(_) | Value::Template(_) | Value::Iterator(_) => true,
        }
    }

    /// Integer view of `Bool` and `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Bool(b) => Some(i64::from(*b)),
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Float view of any number.
    #[allow(clippy::cast_precision_loss, reason = "UL4 numbers mix freely")]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Bool(_) | Value::Int(_) | Value::Float(_))
    }
}

// String conversion

impl Value {
    /// Result of `str()`.
    pub fn to_str(&self) -> String {
        match self {
            Value::None => String::new(),
            Value::Str(s) => s.to_string(),
            Value::Date(d) => d.to_string(),
            Value::TimeDelta(td) => td.to_string(),
            Value::MonthDelta(md) => md.to_string(),
            Value::Color(c) => c.to_string(),
            _ => self.repr(),
        }
    }

    /// Result of `repr()`.
    pub fn repr(&self) -> String {
        let mut out = String::new();
        self.write_repr(&mut out);
        out
    }

    fn write_repr(&self, out: &mut String) {
        match self {
            Value::None => out.push_str("None"),
            Value::Bool(true) => out.push_str("True"),
            Value::Bool(false) => out.push_str("False"),
            Value::Int(n) => out.push_str(&n.to_string()),
            Value::Float(f) => out.push_str(&float_repr(*f)),
            Value::Str(s) => out.push_str(&str_repr(s)),
            Value::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write_repr(out);
                }
                out.push(']');
            }
            Value::Dict(map) => {
                out.push('{');
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(&str_repr(key));
                    out.push_str(": ");
                    value.write_repr(out);
                }
                out.push('}');
            }
            Value::Date(d) => out.push_str(&d.repr()),
            Value::TimeDelta(td) => out.push_str(&td.repr()),
            Value::MonthDelta(md) => out.push_str(&md.repr()),
            Value::Color(c) => out.push_str(&c.repr()),
            Value::Template(t) => {
                out.push_str("<template ");
                out.push_str(t.display_name());
                out.push('>');
            }
            Value::Iterator(_) => out.push_str("<iterator>"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

// Equality

#[allow(clippy::float_cmp, reason = "UL4 equality is exact numeric equality")]
fn numbers_equal(left: &Value, right: &Value) -> Option<bool> {
    match (left, right) {
        (Value::Float(a), Value::Float(b)) => Some(a == b),
        (Value::Float(_), _) | (_, Value::Float(_)) => {
            Some(left.as_float()? == right.as_float()?)
        }
        _ => Some(left.as_int()? == right.as_int()?),
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if self.is_number() && other.is_number() {
            return numbers_equal(self, other).unwrap_or(false);
        }
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Dict(a), Value::Dict(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::TimeDelta(a), Value::TimeDelta(b)) => a == b,
            (Value::MonthDelta(a), Value::MonthDelta(b)) => a == b,
            (Value::Color(a), Value::Color(b)) => a == b,
            (Value::Template(a), Value::Template(b)) => Arc::ptr_eq(a, b),
            (Value::Iterator(a), Value::Iterator(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}
