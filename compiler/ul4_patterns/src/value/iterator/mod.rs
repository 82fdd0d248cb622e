//! Iterator protocol.
//!
//! An iterator is single-pass and cannot be restarted. Its state sits behind
//! an `Arc<Mutex<_>>` so every copy of the value shares one cursor: passing an
//! iterator to `enumerate()` or a `for` loop consumes the same underlying
//! sequence.
//!
//! Producers (`range`, `enumerate`, `zip`, `reversed`, the first/last
//! markers) wrap an inner handle. Generator expressions plug in through
//! [`LazySource`], since evaluating their body needs the interpreter.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use super::heap::Heap;
use super::Value;
use crate::errors::{self, EvalError};

/// Externally driven item source (generator expressions).
pub trait LazySource: Send {
    /// Produce the next item, `Ok(None)` at the end.
    fn next_value(&mut self) -> Result<Option<Value>, EvalError>;
}

/// Which markers a flagged iterator (`isfirst`, `enumfl`, ...) emits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Markers {
    pub index: bool,
    pub first: bool,
    pub last: bool,
}

/// One-item lookahead used to detect the last element.
pub enum Lookahead {
    Unprimed,
    Pending(Value),
    Done,
}

/// Cursor state of an iterator.
pub enum IteratorValue {
    List {
        items: Heap<Vec<Value>>,
        pos: usize,
    },
    Str {
        data: Heap<String>,
        byte_pos: usize,
    },
    Range {
        next: i64,
        step: i64,
        remaining: u64,
    },
    /// Walks `items` from the back.
    Reversed {
        items: Heap<Vec<Value>>,
        remaining: usize,
    },
    Enumerate {
        inner: IteratorHandle,
        index: i64,
    },
    /// `isfirst`, `islast`, `isfirstlast` and `enumfl`.
    Flagged {
        inner: IteratorHandle,
        markers: Markers,
        index: i64,
        first: bool,
        lookahead: Lookahead,
    },
    Zip {
        inners: Vec<IteratorHandle>,
    },
    Lazy(Box<dyn LazySource>),
}

impl IteratorValue {
    /// `range(start, stop, step)`.
    pub fn range(start: i64, stop: i64, step: i64) -> Result<Self, EvalError> {
        if step == 0 {
            return Err(errors::zero_step("range"));
        }
        let (start_wide, stop_wide, step_wide) = (i128::from(start), i128::from(stop), i128::from(step));
        let remaining = if step > 0 && start < stop {
            (stop_wide - start_wide - 1) / step_wide + 1
        } else if step < 0 && start > stop {
            (start_wide - stop_wide - 1) / -step_wide + 1
        } else {
            0
        };
        Ok(IteratorValue::Range {
            next: start,
            step,
            remaining: u64::try_from(remaining).unwrap_or(0),
        })
    }

    pub fn enumerate(inner: IteratorHandle, start: i64) -> Self {
        IteratorValue::Enumerate {
            inner,
            index: start,
        }
    }

    pub fn flagged(inner: IteratorHandle, markers: Markers, start: i64) -> Self {
        IteratorValue::Flagged {
            inner,
            markers,
            index: start,
            first: true,
            lookahead: Lookahead::Unprimed,
        }
    }

    pub fn zip(inners: Vec<IteratorHandle>) -> Self {
        IteratorValue::Zip { inners }
    }

    pub fn lazy(source: impl LazySource + 'static) -> Self {
        IteratorValue::Lazy(Box::new(source))
    }

    /// Reverse iteration over a materialized sequence.
    pub fn reversed(items: Vec<Value>) -> Self {
        let remaining = items.len();
        IteratorValue::Reversed {
            items: Heap::new(items),
            remaining,
        }
    }

    fn next(&mut self) -> Result<Option<Value>, EvalError> {
        match self {
            IteratorValue::List { items, pos } => {
                let item = items.get(*pos).cloned();
                if item.is_some() {
                    *pos += 1;
                }
                Ok(item)
            }
            IteratorValue::Str { data, byte_pos } => {
                let Some(c) = data[*byte_pos..].chars().next() else {
                    return Ok(None);
                };
                *byte_pos += c.len_utf8();
                Ok(Some(Value::string(c)))
            }
            IteratorValue::Range {
                next,
                step,
                remaining,
            } => {
                if *remaining == 0 {
                    return Ok(None);
                }
                let current = *next;
                *remaining -= 1;
                *next = next.saturating_add(*step);
                Ok(Some(Value::Int(current)))
            }
            IteratorValue::Reversed { items, remaining } => {
                if *remaining == 0 {
                    return Ok(None);
                }
                *remaining -= 1;
                Ok(items.get(*remaining).cloned())
            }
            IteratorValue::Enumerate { inner, index } => {
                let Some(item) = inner.next()? else {
                    return Ok(None);
                };
                let pair = Value::list(vec![Value::Int(*index), item]);
                *index = index.saturating_add(1);
                Ok(Some(pair))
            }
            IteratorValue::Flagged {
                inner,
                markers,
                index,
                first,
                lookahead,
            } => {
                let current = match std::mem::replace(lookahead, Lookahead::Unprimed) {
                    Lookahead::Unprimed => inner.next()?,
                    Lookahead::Pending(item) => Some(item),
                    Lookahead::Done => None,
                };
                let Some(current) = current else {
                    *lookahead = Lookahead::Done;
                    return Ok(None);
                };
                let mut is_last = false;
                if markers.last {
                    *lookahead = match inner.next()? {
                        Some(item) => Lookahead::Pending(item),
                        None => {
                            is_last = true;
                            Lookahead::Done
                        }
                    };
                }
                let mut row = Vec::with_capacity(4);
                if markers.index {
                    row.push(Value::Int(*index));
                    *index = index.saturating_add(1);
                }
                if markers.first {
                    row.push(Value::Bool(*first));
                }
                if markers.last {
                    row.push(Value::Bool(is_last));
                }
                row.push(current);
                *first = false;
                Ok(Some(Value::list(row)))
            }
            IteratorValue::Zip { inners } => {
                if inners.is_empty() {
                    return Ok(None);
                }
                let mut row = Vec::with_capacity(inners.len());
                for inner in inners.iter() {
                    match inner.next()? {
                        Some(item) => row.push(item),
                        None => return Ok(None),
                    }
                }
                Ok(Some(Value::list(row)))
            }
            IteratorValue::Lazy(source) => source.next_value(),
        }
    }
}

impl fmt::Debug for IteratorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IteratorValue::List { .. } => "List",
            IteratorValue::Str { .. } => "Str",
            IteratorValue::Range { .. } => "Range",
            IteratorValue::Reversed { .. } => "Reversed",
            IteratorValue::Enumerate { .. } => "Enumerate",
            IteratorValue::Flagged { .. } => "Flagged",
            IteratorValue::Zip { .. } => "Zip",
            IteratorValue::Lazy(_) => "Lazy",
        };
        write!(f, "IteratorValue::{name}")
    }
}

/// Shared handle to an iterator cursor.
#[derive(Clone)]
pub struct IteratorHandle(Arc<Mutex<IteratorValue>>);

impl IteratorHandle {
    pub fn new(state: IteratorValue) -> Self {
        IteratorHandle(Arc::new(Mutex::new(state)))
    }

    /// Advance by one item.
    ///
    /// Fails if the iterator is already being advanced further up the call
    /// stack (a generator expression consuming itself).
    pub fn next(&self) -> Result<Option<Value>, EvalError> {
        let Some(mut state) = self.0.try_lock() else {
            return Err(errors::invalid_value("iterator already executing"));
        };
        state.next()
    }

    /// Drain the remaining items.
    pub fn collect(&self) -> Result<Vec<Value>, EvalError> {
        let mut items = Vec::new();
        while let Some(item) = self.next()? {
            items.push(item);
        }
        Ok(items)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for IteratorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<iterator>")
    }
}

impl Value {
    /// Iterator view of the value.
    ///
    /// Strings yield characters, dicts their keys, colors their channels.
    /// An existing iterator is returned as is and keeps its cursor.
    pub fn iter(&self) -> Result<IteratorHandle, EvalError> {
        let state = match self {
            Value::Str(data) => IteratorValue::Str {
                data: data.clone(),
                byte_pos: 0,
            },
            Value::List(items) => IteratorValue::List {
                items: items.clone(),
                pos: 0,
            },
            Value::Dict(map) => IteratorValue::List {
                items: Heap::new(map.keys().map(|key| Value::string(key.as_str())).collect()),
                pos: 0,
            },
            Value::Color(color) => IteratorValue::List {
                items: Heap::new(color.channels().iter().map(|c| Value::Int(i64::from(*c))).collect()),
                pos: 0,
            },
            Value::Iterator(handle) => return Ok(handle.clone()),
            _ => return Err(errors::not_iterable(self.type_name())),
        };
        Ok(IteratorHandle::new(state))
    }

    /// Reverse iterator; lists are walked in place, everything else is
    /// materialized first.
    pub fn iter_reversed(&self) -> Result<IteratorHandle, EvalError> {
        let state = match self {
            Value::List(items) => IteratorValue::Reversed {
                items: items.clone(),
                remaining: items.len(),
            },
            _ => IteratorValue::reversed(self.iter()?.collect()?),
        };
        Ok(IteratorHandle::new(state))
    }

    /// Materialize every item.
    pub fn to_vec(&self) -> Result<Vec<Value>, EvalError> {
        match self {
            Value::List(items) => Ok(items.to_owned_inner()),
            _ => self.iter()?.collect(),
        }
    }
}

#[cfg(test)]
mod tests;
