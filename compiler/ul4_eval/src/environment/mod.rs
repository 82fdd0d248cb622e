//! Variable scopes for one render call.
//!
//! A render starts with a single scope holding the caller's variables.
//! Statements (`for`, assignments, nested template definitions) write into
//! it directly, so loop variables stay visible after the loop. Comprehensions
//! and generator expressions push a scope for their loop variables and pop it
//! when done.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use ul4_patterns::{DictMap, Value};

/// Bindings of one scope, kept in definition order for `vars()`.
type Bindings = IndexMap<String, Value, FxBuildHasher>;

/// Scope stack; the bottom scope is never popped.
#[derive(Clone, Debug)]
pub struct Environment {
    scopes: Vec<Bindings>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            scopes: vec![Bindings::default()],
        }
    }

    /// Environment whose bottom scope holds `vars`.
    pub fn from_vars(vars: &DictMap) -> Self {
        let mut bindings = Bindings::with_capacity_and_hasher(vars.len(), FxBuildHasher);
        for (name, value) in vars {
            bindings.insert(name.clone(), value.clone());
        }
        Environment {
            scopes: vec![bindings],
        }
    }

    /// Number of scopes on the stack.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    #[inline]
    pub fn push_scope(&mut self) {
        self.scopes.push(Bindings::default());
    }

    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Innermost binding of `name`.
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Bind `name` in the innermost scope.
    #[inline]
    pub fn bind(&mut self, name: &str, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            if let Some(slot) = scope.get_mut(name) {
                *slot = value;
            } else {
                scope.insert(name.to_string(), value);
            }
        }
    }

    /// Remove the innermost binding of `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.shift_remove(name))
    }

    /// All visible bindings; inner scopes shadow outer ones.
    pub fn snapshot(&self) -> DictMap {
        let mut vars = DictMap::default();
        for scope in &self.scopes {
            for (name, value) in scope {
                vars.insert(name.clone(), value.clone());
            }
        }
        vars
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
