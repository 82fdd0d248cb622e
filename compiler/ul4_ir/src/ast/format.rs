//! Pretty-printing of AST nodes back to UL4 source-like text.
//!
//! Statements are emitted one per line, indented with tabs; blocks are
//! wrapped in `{`/`}` lines. Expressions are emitted inline with the
//! minimal parentheses their precedence requires.

use std::fmt;

use super::{Block, Comprehension, DictItem, KeywordArg, Node, NodeKind, NodeRef, Template, VarTarget};
use crate::literal::str_repr;
use crate::operators::BinaryOp;

fn line(indent: usize, text: &str) -> String {
    format!("{}{text}\n", "\t".repeat(indent))
}

/// `a`, `(a,)` or `(a, (b, c))`.
fn format_target(target: &VarTarget) -> String {
    match target {
        VarTarget::Name(name) => name.clone(),
        VarTarget::Tuple(items) if items.len() == 1 => format!("({},)", format_target(&items[0])),
        VarTarget::Tuple(items) => {
            let parts: Vec<String> = items.iter().map(format_target).collect();
            format!("({})", parts.join(", "))
        }
    }
}

fn format_args(args: &[NodeRef], indent: usize) -> String {
    let parts: Vec<String> = args.iter().map(|arg| arg.format(indent)).collect();
    parts.join(", ")
}

fn format_comp(comp: &Comprehension, indent: usize) -> String {
    let mut out = format!(
        "for {} in {}",
        format_target(&comp.target),
        comp.container.format(indent)
    );
    if let Some(condition) = &comp.condition {
        out.push_str(" if ");
        out.push_str(&condition.format(indent));
    }
    out
}

fn format_block(block: &Block, indent: usize) -> String {
    let mut out = line(indent, "{");
    for node in &block.content {
        out.push_str(&node.format(indent + 1));
    }
    out.push_str(&line(indent, "}"));
    out
}

impl Node {
    /// Format `child` as an operand of `self`, parenthesized when needed.
    fn format_operand(&self, child: &Node) -> String {
        let parent = self.precedence().unwrap_or(0);
        let own = child.precedence().unwrap_or(0);
        let needs_parens =
            own < parent || (own == parent && (child.tag() != self.tag() || !self.is_associative()));
        if needs_parens {
            format!("({})", child.format(0))
        } else {
            child.format(0)
        }
    }

    /// Source-like text for this node at the given indentation level.
    ///
    /// Statement nodes produce complete lines; expression nodes produce
    /// inline text and ignore `indent` except for passing it on.
    pub fn format(&self, indent: usize) -> String {
        match &self.kind {
            NodeKind::Text => line(indent, &format!("text {}", str_repr(self.location.code()))),
            NodeKind::LoadNone => "None".to_string(),
            NodeKind::LoadTrue => "True".to_string(),
            NodeKind::LoadFalse => "False".to_string(),
            NodeKind::Const(value) => value.repr(),
            NodeKind::List(items) => format!("[{}]", format_args(items, indent)),
            NodeKind::ListComp { item, comp } => {
                format!("[ {} {} ]", item.format(indent), format_comp(comp, indent))
            }
            NodeKind::Dict(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .map(|item| match item {
                        DictItem::Pair(key, value) => {
                            format!("{}: {}", key.format(indent), value.format(indent))
                        }
                        DictItem::Splat(mapping) => format!("**{}", mapping.format(indent)),
                    })
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
            NodeKind::DictComp { key, value, comp } => format!(
                "{{ {} : {} {} }}",
                key.format(indent),
                value.format(indent),
                format_comp(comp, indent)
            ),
            NodeKind::GenExpr { item, comp } => {
                format!("( {} {} )", item.format(indent), format_comp(comp, indent))
            }
            NodeKind::Var(name) => name.clone(),
            NodeKind::Unary { op, operand } => {
                format!("{}{}", op.prefix(), self.format_operand(operand))
            }
            NodeKind::Binary {
                op: BinaryOp::GetItem,
                left,
                right,
            } => format!("{}[{}]", self.format_operand(left), right.format(0)),
            NodeKind::Binary { op, left, right } => format!(
                "{} {} {}",
                self.format_operand(left),
                op.as_symbol(),
                self.format_operand(right)
            ),
            NodeKind::GetAttr { object, attr } => {
                format!("{}.{attr}", self.format_operand(object))
            }
            NodeKind::GetSlice {
                object,
                start,
                stop,
            } => format!(
                "{}[{}:{}]",
                self.format_operand(object),
                start.as_ref().map(|n| n.format(indent)).unwrap_or_default(),
                stop.as_ref().map(|n| n.format(indent)).unwrap_or_default()
            ),
            NodeKind::CallFunc { name, args } => format!("{name}({})", format_args(args, indent)),
            NodeKind::CallMeth { name, object, args } => format!(
                "{}.{name}({})",
                self.format_operand(object),
                format_args(args, indent)
            ),
            NodeKind::CallMethKeywords { name, object, args } => {
                let parts: Vec<String> = args
                    .iter()
                    .map(|arg| match arg {
                        KeywordArg::Named(key, value) => format!("{key}={}", value.format(indent)),
                        KeywordArg::Splat(mapping) => format!("**{}", mapping.format(indent)),
                    })
                    .collect();
                format!("{}.{name}({})", self.format_operand(object), parts.join(", "))
            }
            NodeKind::Print(value) => line(indent, &format!("print {}", value.format(indent))),
            NodeKind::PrintX(value) => line(indent, &format!("printx {}", value.format(indent))),
            NodeKind::Render(value) => line(indent, &format!("render {}", value.format(indent))),
            NodeKind::StoreVar { target, value } => line(
                indent,
                &format!("{} = {}", format_target(target), value.format(indent)),
            ),
            NodeKind::AugAssign { op, name, value } => line(
                indent,
                &format!("{name} {} {}", op.as_symbol(), value.format(indent)),
            ),
            NodeKind::DelVar(name) => line(indent, &format!("del {name}")),
            NodeKind::For {
                target,
                container,
                block,
            } => {
                let head = format!(
                    "for {} in {}",
                    format_target(target),
                    container.format(indent)
                );
                line(indent, &head) + &format_block(block, indent)
            }
            NodeKind::Break => line(indent, "break"),
            NodeKind::Continue => line(indent, "continue"),
            NodeKind::IfElIfElse(block) => block
                .content
                .iter()
                .map(|node| node.format(indent))
                .collect(),
            NodeKind::If { condition, block } => {
                line(indent, &format!("if {}", condition.format(indent)))
                    + &format_block(block, indent)
            }
            NodeKind::ElIf { condition, block } => {
                line(indent, &format!("elif {}", condition.format(indent)))
                    + &format_block(block, indent)
            }
            NodeKind::Else(block) => line(indent, "else") + &format_block(block, indent),
            NodeKind::Template(template) => template.format(indent),
        }
    }
}

impl Template {
    /// `def NAME` followed by the block.
    pub fn format(&self, indent: usize) -> String {
        line(indent, &format!("def {}", self.display_name())) + &format_block(&self.block, indent)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(0))
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(0))
    }
}
