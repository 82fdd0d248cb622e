//! Type registry: wire tag to decode constructor.
//!
//! The built-in registry is created on first use and never changes. To
//! decode additional object types, clone it and register more loaders:
//!
//! ```text
//! let mut registry = Registry::builtin().clone();
//! registry.register("com.example.point", load_point);
//! let value = Decoder::with_registry(input, &registry).load_value()?;
//! ```

use std::fmt;
use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use ul4_ir::{AugOp, BinaryOp, UnaryOp};

use crate::ast;
use crate::decoder::{Decoder, Loaded};
use crate::Ul4onError;

/// Namespace of every built-in tag.
pub const TYPE_PREFIX: &str = "de.livinglogic.ul4.";

/// Decode constructor.
///
/// Called right after the object's tag has been read; must consume exactly
/// the object's fields. The second argument is the tag with [`TYPE_PREFIX`]
/// removed (or the full tag for foreign types).
pub type LoadFn = fn(&mut Decoder<'_>, &str) -> Result<Loaded, Ul4onError>;

/// Node tags that are not derived from an operator table.
const NODE_TAGS: &[&str] = &[
    "text",
    "const",
    "list",
    "listcomp",
    "dict",
    "dictcomp",
    "genexpr",
    "var",
    "print",
    "printx",
    "render",
    "getattr",
    "getslice",
    "callfunc",
    "callmeth",
    "callmethkw",
    "storevar",
    "delvar",
    "for",
    "break",
    "continue",
    "ieie",
    "if",
    "elif",
    "else",
];

static BUILTIN: OnceLock<Registry> = OnceLock::new();

#[derive(Clone, Default)]
pub struct Registry {
    loaders: FxHashMap<String, LoadFn>,
}

impl Registry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Location, template and every AST node type.
    pub fn builtin() -> &'static Registry {
        BUILTIN.get_or_init(|| {
            let mut registry = Registry::new();
            registry.register_builtin("location", ast::load_location_object);
            registry.register_builtin("template", ast::load_template_object);
            let operator_tags = BinaryOp::ALL
                .iter()
                .map(|op| op.tag())
                .chain(UnaryOp::ALL.iter().map(|op| op.tag()))
                .chain(AugOp::ALL.iter().map(|op| op.tag()));
            for tag in NODE_TAGS.iter().copied().chain(operator_tags) {
                registry.register_builtin(tag, ast::load_node_object);
            }
            tracing::debug!(types = registry.len(), "initialized UL4ON registry");
            registry
        })
    }

    fn register_builtin(&mut self, tag: &str, load: LoadFn) {
        self.register(format!("{TYPE_PREFIX}{tag}"), load);
    }

    /// Register `load` for the full wire tag; returns the loader it replaces.
    pub fn register(&mut self, tag: impl Into<String>, load: LoadFn) -> Option<LoadFn> {
        self.loaders.insert(tag.into(), load)
    }

    pub fn get(&self, tag: &str) -> Option<LoadFn> {
        self.loaders.get(tag).copied()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.loaders.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.loaders.keys().map(String::as_str).collect();
        tags.sort_unstable();
        f.debug_struct("Registry").field("tags", &tags).finish()
    }
}
