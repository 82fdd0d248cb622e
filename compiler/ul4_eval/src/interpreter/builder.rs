//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use ul4_patterns::DictMap;

use super::Interpreter;
use crate::environment::Environment;

/// Default limit on nested `render` calls.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Builder for [`Interpreter`].
///
/// ```text
/// let mut interpreter = InterpreterBuilder::new()
///     .vars(vars)
///     .max_depth(64)
///     .build();
/// let output = interpreter.render(&template)?;
/// ```
#[derive(Clone, Debug)]
pub struct InterpreterBuilder {
    vars: DictMap,
    max_depth: usize,
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            vars: DictMap::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Variables visible to the template.
    #[must_use]
    pub fn vars(mut self, vars: DictMap) -> Self {
        self.vars = vars;
        self
    }

    /// Maximum nesting of `render` calls; the outermost template is depth 0.
    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            env: Environment::from_vars(&self.vars),
            output: Vec::new(),
            depth: 0,
            max_depth: self.max_depth,
        }
    }
}
