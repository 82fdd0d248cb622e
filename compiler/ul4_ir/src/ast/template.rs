use std::fmt;
use std::sync::{Arc, OnceLock};

use rustc_hash::FxHashMap;

use super::{Block, NodeId, NodeRef};
use crate::Location;

/// A compiled template: a named block plus the source it came from.
pub struct Template {
    pub id: NodeId,
    pub location: Option<Location>,
    pub source: Arc<str>,
    pub name: Option<String>,
    pub start_delim: String,
    pub end_delim: String,
    pub block: Block,
    /// Node lookup by identity, built on first use.
    index: OnceLock<FxHashMap<NodeId, NodeRef>>,
}

impl Template {
    pub fn new(
        location: Option<Location>,
        source: impl Into<Arc<str>>,
        name: Option<String>,
        start_delim: impl Into<String>,
        end_delim: impl Into<String>,
        block: Block,
    ) -> Self {
        Template {
            id: NodeId::fresh(),
            location,
            source: source.into(),
            name,
            start_delim: start_delim.into(),
            end_delim: end_delim.into(),
            block,
            index: OnceLock::new(),
        }
    }

    /// Template name, or `unnamed`.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }

    /// Find a node of this template by identity.
    pub fn node(&self, id: NodeId) -> Option<&NodeRef> {
        self.index().get(&id)
    }

    /// Number of nodes in the template, nested templates included.
    pub fn node_count(&self) -> usize {
        self.index().len()
    }

    fn index(&self) -> &FxHashMap<NodeId, NodeRef> {
        self.index.get_or_init(|| {
            let mut index = FxHashMap::default();
            let mut stack: Vec<NodeRef> = self.block.content.iter().rev().cloned().collect();
            while let Some(node) = stack.pop() {
                node.for_each_child(&mut |child| stack.push(Arc::clone(child)));
                index.insert(node.id, node);
            }
            tracing::debug!(template = self.display_name(), nodes = index.len(), "indexed template");
            index
        })
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("content", &self.block.content.len())
            .finish_non_exhaustive()
    }
}
