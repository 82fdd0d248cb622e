//! UL4 abstract syntax tree.
//!
//! Nodes are immutable after construction and shared through [`NodeRef`].
//! A parser (or the UL4ON decoder) builds them with the constructors on
//! [`Node`]; the evaluator walks them by matching on [`NodeKind`].

mod format;
mod template;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::literal::Literal;
use crate::operators::{AugOp, BinaryOp, UnaryOp};
use crate::Location;

pub use template::Template;

/// Shared handle to an AST node.
pub type NodeRef = Arc<Node>;

/// Process-unique node identity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

static NEXT_NODE_ID: AtomicU32 = AtomicU32::new(1);

impl NodeId {
    /// Allocate the next identity.
    pub fn fresh() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Assignment or loop target, possibly a nested tuple: `a`, `(a, b)`, `(a, (b, c))`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum VarTarget {
    Name(String),
    Tuple(Vec<VarTarget>),
}

impl VarTarget {
    pub fn name(name: impl Into<String>) -> Self {
        VarTarget::Name(name.into())
    }

    /// Tuple of plain names.
    pub fn names<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        VarTarget::Tuple(names.into_iter().map(|n| VarTarget::Name(n.into())).collect())
    }
}

/// Entry of a dict literal.
#[derive(Clone, Debug)]
pub enum DictItem {
    /// `key: value`
    Pair(NodeRef, NodeRef),
    /// `**mapping`
    Splat(NodeRef),
}

/// Argument of a keyword method call.
#[derive(Clone, Debug)]
pub enum KeywordArg {
    /// `name=value`
    Named(String, NodeRef),
    /// `**mapping`
    Splat(NodeRef),
}

/// The `for target in container [if condition]` part of a comprehension.
#[derive(Clone, Debug)]
pub struct Comprehension {
    pub target: VarTarget,
    pub container: NodeRef,
    pub condition: Option<NodeRef>,
}

/// Statement sequence of a block node.
#[derive(Clone, Debug, Default)]
pub struct Block {
    /// Location of the closing tag, if known.
    pub endlocation: Option<Location>,
    pub content: Vec<NodeRef>,
}

impl Block {
    pub fn new(content: Vec<NodeRef>) -> Self {
        Block {
            endlocation: None,
            content,
        }
    }

    #[must_use]
    pub fn with_endlocation(mut self, endlocation: Location) -> Self {
        self.endlocation = Some(endlocation);
        self
    }
}

/// Node payload.
#[derive(Clone, Debug)]
pub enum NodeKind {
    // Literals
    /// Literal template text; the text is the location's code.
    Text,
    LoadNone,
    LoadTrue,
    LoadFalse,
    Const(Literal),
    List(Vec<NodeRef>),
    ListComp {
        item: NodeRef,
        comp: Comprehension,
    },
    Dict(Vec<DictItem>),
    DictComp {
        key: NodeRef,
        value: NodeRef,
        comp: Comprehension,
    },
    GenExpr {
        item: NodeRef,
        comp: Comprehension,
    },

    // Expressions
    Var(String),
    Unary {
        op: UnaryOp,
        operand: NodeRef,
    },
    Binary {
        op: BinaryOp,
        left: NodeRef,
        right: NodeRef,
    },
    GetAttr {
        object: NodeRef,
        attr: String,
    },
    GetSlice {
        object: NodeRef,
        start: Option<NodeRef>,
        stop: Option<NodeRef>,
    },
    CallFunc {
        name: String,
        args: Vec<NodeRef>,
    },
    CallMeth {
        name: String,
        object: NodeRef,
        args: Vec<NodeRef>,
    },
    CallMethKeywords {
        name: String,
        object: NodeRef,
        args: Vec<KeywordArg>,
    },

    // Output
    Print(NodeRef),
    PrintX(NodeRef),
    Render(NodeRef),

    // Assignment
    StoreVar {
        target: VarTarget,
        value: NodeRef,
    },
    AugAssign {
        op: AugOp,
        name: String,
        value: NodeRef,
    },
    DelVar(String),

    // Control flow
    For {
        target: VarTarget,
        container: NodeRef,
        block: Block,
    },
    Break,
    Continue,
    /// Chain of `If`, `ElIf` and `Else` nodes.
    IfElIfElse(Block),
    If {
        condition: NodeRef,
        block: Block,
    },
    ElIf {
        condition: NodeRef,
        block: Block,
    },
    Else(Block),
    /// Nested template definition.
    Template(Arc<Template>),
}

/// An AST node: identity, location and payload.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: NodeId,
    pub location: Location,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(location: Location, kind: NodeKind) -> NodeRef {
        Arc::new(Node {
            id: NodeId::fresh(),
            location,
            kind,
        })
    }

    pub fn text(location: Location) -> NodeRef {
        Self::new(location, NodeKind::Text)
    }

    /// Constant; `None`, `True` and `False` map to their dedicated loads.
    pub fn constant(location: Location, value: Literal) -> NodeRef {
        let kind = match value {
            Literal::None => NodeKind::LoadNone,
            Literal::Bool(true) => NodeKind::LoadTrue,
            Literal::Bool(false) => NodeKind::LoadFalse,
            value => NodeKind::Const(value),
        };
        Self::new(location, kind)
    }

    pub fn list(location: Location, items: Vec<NodeRef>) -> NodeRef {
        Self::new(location, NodeKind::List(items))
    }

    pub fn list_comp(location: Location, item: NodeRef, comp: Comprehension) -> NodeRef {
        Self::new(location, NodeKind::ListComp { item, comp })
    }

    pub fn dict(location: Location, items: Vec<DictItem>) -> NodeRef {
        Self::new(location, NodeKind::Dict(items))
    }

    pub fn dict_comp(
        location: Location,
        key: NodeRef,
        value: NodeRef,
        comp: Comprehension,
    ) -> NodeRef {
        Self::new(location, NodeKind::DictComp { key, value, comp })
    }

    pub fn gen_expr(location: Location, item: NodeRef, comp: Comprehension) -> NodeRef {
        Self::new(location, NodeKind::GenExpr { item, comp })
    }

    pub fn var(location: Location, name: impl Into<String>) -> NodeRef {
        Self::new(location, NodeKind::Var(name.into()))
    }

    pub fn unary(location: Location, op: UnaryOp, operand: NodeRef) -> NodeRef {
        Self::new(location, NodeKind::Unary { op, operand })
    }

    pub fn binary(location: Location, op: BinaryOp, left: NodeRef, right: NodeRef) -> NodeRef {
        Self::new(location, NodeKind::Binary { op, left, right })
    }

    pub fn get_attr(location: Location, object: NodeRef, attr: impl Into<String>) -> NodeRef {
        Self::new(
            location,
            NodeKind::GetAttr {
                object,
                attr: attr.into(),
            },
        )
    }

    pub fn get_slice(
        location: Location,
        object: NodeRef,
        start: Option<NodeRef>,
        stop: Option<NodeRef>,
    ) -> NodeRef {
        Self::new(
            location,
            NodeKind::GetSlice {
                object,
                start,
                stop,
            },
        )
    }

    pub fn call_func(location: Location, name: impl Into<String>, args: Vec<NodeRef>) -> NodeRef {
        Self::new(
            location,
            NodeKind::CallFunc {
                name: name.into(),
                args,
            },
        )
    }

    pub fn call_meth(
        location: Location,
        object: NodeRef,
        name: impl Into<String>,
        args: Vec<NodeRef>,
    ) -> NodeRef {
        Self::new(
            location,
            NodeKind::CallMeth {
                name: name.into(),
                object,
                args,
            },
        )
    }

    pub fn call_meth_keywords(
        location: Location,
        object: NodeRef,
        name: impl Into<String>,
        args: Vec<KeywordArg>,
    ) -> NodeRef {
        Self::new(
            location,
            NodeKind::CallMethKeywords {
                name: name.into(),
                object,
                args,
            },
        )
    }

    pub fn print(location: Location, value: NodeRef) -> NodeRef {
        Self::new(location, NodeKind::Print(value))
    }

    pub fn printx(location: Location, value: NodeRef) -> NodeRef {
        Self::new(location, NodeKind::PrintX(value))
    }

    pub fn render(location: Location, value: NodeRef) -> NodeRef {
        Self::new(location, NodeKind::Render(value))
    }

    pub fn store_var(location: Location, target: VarTarget, value: NodeRef) -> NodeRef {
        Self::new(location, NodeKind::StoreVar { target, value })
    }

    pub fn aug_assign(
        location: Location,
        op: AugOp,
        name: impl Into<String>,
        value: NodeRef,
    ) -> NodeRef {
        Self::new(
            location,
            NodeKind::AugAssign {
                op,
                name: name.into(),
                value,
            },
        )
    }

    pub fn del_var(location: Location, name: impl Into<String>) -> NodeRef {
        Self::new(location, NodeKind::DelVar(name.into()))
    }

    pub fn for_loop(
        location: Location,
        target: VarTarget,
        container: NodeRef,
        block: Block,
    ) -> NodeRef {
        Self::new(
            location,
            NodeKind::For {
                target,
                container,
                block,
            },
        )
    }

    pub fn break_stmt(location: Location) -> NodeRef {
        Self::new(location, NodeKind::Break)
    }

    pub fn continue_stmt(location: Location) -> NodeRef {
        Self::new(location, NodeKind::Continue)
    }

    pub fn if_chain(location: Location, block: Block) -> NodeRef {
        Self::new(location, NodeKind::IfElIfElse(block))
    }

    pub fn if_block(location: Location, condition: NodeRef, block: Block) -> NodeRef {
        Self::new(location, NodeKind::If { condition, block })
    }

    pub fn elif_block(location: Location, condition: NodeRef, block: Block) -> NodeRef {
        Self::new(location, NodeKind::ElIf { condition, block })
    }

    pub fn else_block(location: Location, block: Block) -> NodeRef {
        Self::new(location, NodeKind::Else(block))
    }

    /// Nested template definition node.
    ///
    /// Uses the template's own location when it has one.
    pub fn template(location: Location, template: Arc<Template>) -> NodeRef {
        let location = template.location.clone().unwrap_or(location);
        Self::new(location, NodeKind::Template(template))
    }

    /// Wire tag of the node kind (`de.livinglogic.ul4.<tag>`).
    ///
    /// The dedicated `None`/`True`/`False` loads travel as `const`.
    pub fn tag(&self) -> &'static str {
        match &self.kind {
            NodeKind::Text => "text",
            NodeKind::LoadNone
            | NodeKind::LoadTrue
            | NodeKind::LoadFalse
            | NodeKind::Const(_) => "const",
            NodeKind::List(_) => "list",
            NodeKind::ListComp { .. } => "listcomp",
            NodeKind::Dict(_) => "dict",
            NodeKind::DictComp { .. } => "dictcomp",
            NodeKind::GenExpr { .. } => "genexpr",
            NodeKind::Var(_) => "var",
            NodeKind::Unary { op, .. } => op.tag(),
            NodeKind::Binary { op, .. } => op.tag(),
            NodeKind::GetAttr { .. } => "getattr",
            NodeKind::GetSlice { .. } => "getslice",
            NodeKind::CallFunc { .. } => "callfunc",
            NodeKind::CallMeth { .. } => "callmeth",
            NodeKind::CallMethKeywords { .. } => "callmethkw",
            NodeKind::Print(_) => "print",
            NodeKind::PrintX(_) => "printx",
            NodeKind::Render(_) => "render",
            NodeKind::StoreVar { .. } => "storevar",
            NodeKind::AugAssign { op, .. } => op.tag(),
            NodeKind::DelVar(_) => "delvar",
            NodeKind::For { .. } => "for",
            NodeKind::Break => "break",
            NodeKind::Continue => "continue",
            NodeKind::IfElIfElse(_) => "ieie",
            NodeKind::If { .. } => "if",
            NodeKind::ElIf { .. } => "elif",
            NodeKind::Else(_) => "else",
            NodeKind::Template(_) => "template",
        }
    }

    /// Binding strength of expression nodes; `None` for statements.
    pub fn precedence(&self) -> Option<u8> {
        match &self.kind {
            NodeKind::LoadNone
            | NodeKind::LoadTrue
            | NodeKind::LoadFalse
            | NodeKind::Const(_)
            | NodeKind::List(_)
            | NodeKind::ListComp { .. }
            | NodeKind::Dict(_)
            | NodeKind::DictComp { .. }
            | NodeKind::GenExpr { .. }
            | NodeKind::Var(_) => Some(11),
            NodeKind::CallFunc { .. } | NodeKind::CallMeth { .. } => Some(10),
            NodeKind::GetAttr { .. } | NodeKind::CallMethKeywords { .. } => Some(9),
            NodeKind::GetSlice { .. } => Some(8),
            NodeKind::Unary { op, .. } => Some(op.precedence()),
            NodeKind::Binary { op, .. } => Some(op.precedence()),
            _ => None,
        }
    }

    /// Whether equal-precedence children of the same kind need no parentheses.
    pub fn is_associative(&self) -> bool {
        match &self.kind {
            NodeKind::Binary { op, .. } => op.is_associative(),
            NodeKind::GetAttr { .. }
            | NodeKind::GetSlice { .. }
            | NodeKind::CallFunc { .. }
            | NodeKind::CallMeth { .. }
            | NodeKind::CallMethKeywords { .. } => false,
            _ => true,
        }
    }

    /// Visit direct children in evaluation order.
    pub fn for_each_child(&self, f: &mut impl FnMut(&NodeRef)) {
        match &self.kind {
            NodeKind::Text
            | NodeKind::LoadNone
            | NodeKind::LoadTrue
            | NodeKind::LoadFalse
            | NodeKind::Const(_)
            | NodeKind::Var(_)
            | NodeKind::DelVar(_)
            | NodeKind::Break
            | NodeKind::Continue => {}
            NodeKind::List(items) | NodeKind::CallFunc { args: items, .. } => {
                items.iter().for_each(|n| f(n));
            }
            NodeKind::ListComp { item, comp } | NodeKind::GenExpr { item, comp } => {
                visit_comp(comp, f);
                f(item);
            }
            NodeKind::DictComp { key, value, comp } => {
                visit_comp(comp, f);
                f(key);
                f(value);
            }
            NodeKind::Dict(items) => {
                for item in items {
                    match item {
                        DictItem::Pair(key, value) => {
                            f(key);
                            f(value);
                        }
                        DictItem::Splat(mapping) => f(mapping),
                    }
                }
            }
            NodeKind::Unary { operand, .. } => f(operand),
            NodeKind::Binary { left, right, .. } => {
                f(left);
                f(right);
            }
            NodeKind::GetAttr { object, .. } => f(object),
            NodeKind::GetSlice {
                object,
                start,
                stop,
            } => {
                f(object);
                start.iter().chain(stop.iter()).for_each(|n| f(n));
            }
            NodeKind::CallMeth { object, args, .. } => {
                f(object);
                args.iter().for_each(|n| f(n));
            }
            NodeKind::CallMethKeywords { object, args, .. } => {
                f(object);
                for arg in args {
                    match arg {
                        KeywordArg::Named(_, value) | KeywordArg::Splat(value) => f(value),
                    }
                }
            }
            NodeKind::Print(value)
            | NodeKind::PrintX(value)
            | NodeKind::Render(value)
            | NodeKind::StoreVar { value, .. }
            | NodeKind::AugAssign { value, .. } => f(value),
            NodeKind::For {
                container, block, ..
            } => {
                f(container);
                block.content.iter().for_each(|n| f(n));
            }
            NodeKind::If { condition, block } | NodeKind::ElIf { condition, block } => {
                f(condition);
                block.content.iter().for_each(|n| f(n));
            }
            NodeKind::IfElIfElse(block) | NodeKind::Else(block) => {
                block.content.iter().for_each(|n| f(n));
            }
            NodeKind::Template(template) => {
                template.block.content.iter().for_each(|n| f(n));
            }
        }
    }
}

fn visit_comp(comp: &Comprehension, f: &mut impl FnMut(&NodeRef)) {
    f(&comp.container);
    if let Some(condition) = &comp.condition {
        f(condition);
    }
}
