//! UL4ON encoder.
//!
//! Strings and objects share one record counter. Every distinct string
//! content is written once; repeats become `^<index>|` backreferences. Each
//! object takes a record slot before its tag and fields are written, which is
//! the order the decoder reserves slots in. Templates are recorded by
//! identity, so a template reachable twice is written once.

use std::fmt::Write as _;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use ul4_ir::{
    float_repr, Block, Comprehension, DictItem, KeywordArg, Location, Node, NodeKind, NodeRef,
    Template, VarTarget, UL4_VERSION,
};
use ul4_patterns::Value;

use crate::registry::TYPE_PREFIX;
use crate::Ul4onError;

/// Streaming UL4ON writer.
#[derive(Default)]
pub struct Encoder {
    out: String,
    records: usize,
    strings: FxHashMap<String, usize>,
    /// Source texts already written, matched by pointer before hashing content.
    sources: Vec<(Arc<str>, usize)>,
    /// Templates already written, keyed by address.
    templates: FxHashMap<usize, usize>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The text written so far.
    pub fn finish(self) -> String {
        self.out
    }

    fn record(&mut self) -> usize {
        let index = self.records;
        self.records += 1;
        index
    }

    fn backref(&mut self, index: usize) {
        let _ = write!(self.out, "^{index}|");
    }

    pub fn dump(&mut self, value: &Value) -> Result<(), Ul4onError> {
        match value {
            Value::None => self.out.push('n'),
            Value::Bool(true) => self.out.push_str("bT"),
            Value::Bool(false) => self.out.push_str("bF"),
            Value::Int(n) => self.dump_int(*n),
            Value::Float(f) => {
                let _ = write!(self.out, "f{}|", float_repr(*f));
            }
            Value::Str(s) => self.dump_str(s),
            Value::List(items) => {
                self.out.push('l');
                for item in items.iter() {
                    self.dump(item)?;
                }
                self.out.push(']');
            }
            Value::Dict(map) => {
                self.out.push('d');
                for (key, item) in map.iter() {
                    self.dump_str(key);
                    self.dump(item)?;
                }
                self.out.push('}');
            }
            Value::Date(date) => {
                self.out.push('t');
                self.out.push_str(&date.compact());
            }
            Value::TimeDelta(delta) => {
                self.out.push('T');
                self.dump_int(delta.days());
                self.dump_int(i64::from(delta.seconds()));
                self.dump_int(i64::from(delta.microseconds()));
            }
            Value::MonthDelta(delta) => {
                self.out.push('m');
                self.dump_int(delta.months());
            }
            Value::Color(color) => {
                self.out.push('c');
                for channel in color.channels() {
                    self.dump_int(i64::from(channel));
                }
            }
            Value::Template(template) => self.dump_template(template)?,
            Value::Iterator(_) => return Err(Ul4onError::NotSerializable("iterator")),
        }
        Ok(())
    }

    pub fn dump_int(&mut self, n: i64) {
        let _ = write!(self.out, "i{n}|");
    }

    pub fn dump_str(&mut self, s: &str) {
        if let Some(&index) = self.strings.get(s) {
            self.backref(index);
            return;
        }
        let index = self.record();
        self.strings.insert(s.to_string(), index);
        let _ = write!(self.out, "S{}|{s}", s.chars().count());
    }

    pub fn dump_opt_str(&mut self, s: Option<&str>) {
        match s {
            Some(s) => self.dump_str(s),
            None => self.out.push('n'),
        }
    }

    /// Template source text; usually shared by every location.
    fn dump_source(&mut self, source: &Arc<str>) {
        if let Some(&(_, index)) = self.sources.iter().find(|(s, _)| Arc::ptr_eq(s, source)) {
            self.backref(index);
            return;
        }
        self.dump_str(source);
        if let Some(&index) = self.strings.get(&**source) {
            self.sources.push((Arc::clone(source), index));
        }
    }

    fn begin_object(&mut self, tag: &str) {
        self.record();
        self.out.push('O');
        self.dump_str(&format!("{TYPE_PREFIX}{tag}"));
    }

    fn end_object(&mut self) {
        self.out.push(')');
    }

    pub fn dump_location(&mut self, location: &Location) {
        self.begin_object("location");
        self.dump_source(&location.source);
        self.dump_opt_str(location.tag_type.as_deref());
        self.dump_int(i64::from(location.tag.start));
        self.dump_int(i64::from(location.tag.end));
        self.dump_int(i64::from(location.code.start));
        self.dump_int(i64::from(location.code.end));
        self.end_object();
    }

    fn dump_opt_location(&mut self, location: Option<&Location>) {
        match location {
            Some(location) => self.dump_location(location),
            None => self.out.push('n'),
        }
    }

    pub fn dump_template(&mut self, template: &Template) -> Result<(), Ul4onError> {
        let key = std::ptr::from_ref(template) as usize;
        if let Some(&index) = self.templates.get(&key) {
            self.backref(index);
            return Ok(());
        }
        let index = self.record();
        self.templates.insert(key, index);
        self.out.push('O');
        self.dump_str(&format!("{TYPE_PREFIX}template"));
        self.dump_str(UL4_VERSION);
        self.dump_source(&template.source);
        self.dump_opt_str(template.name.as_deref());
        self.dump_str(&template.start_delim);
        self.dump_str(&template.end_delim);
        self.dump_opt_location(template.location.as_ref());
        self.dump_block(&template.block)?;
        self.end_object();
        Ok(())
    }

    pub fn dump_node(&mut self, node: &Node) -> Result<(), Ul4onError> {
        if let NodeKind::Template(template) = &node.kind {
            return self.dump_template(template);
        }
        self.begin_object(node.tag());
        self.dump_location(&node.location);
        match &node.kind {
            NodeKind::Text | NodeKind::Break | NodeKind::Continue | NodeKind::Template(_) => {}
            NodeKind::LoadNone => self.out.push('n'),
            NodeKind::LoadTrue => self.out.push_str("bT"),
            NodeKind::LoadFalse => self.out.push_str("bF"),
            NodeKind::Const(literal) => self.dump(&Value::from_literal(literal))?,
            NodeKind::List(items) => self.dump_nodes(items)?,
            NodeKind::ListComp { item, comp } | NodeKind::GenExpr { item, comp } => {
                self.dump_node(item)?;
                self.dump_comp(comp)?;
            }
            NodeKind::Dict(items) => {
                self.out.push('l');
                for item in items {
                    self.out.push('l');
                    match item {
                        DictItem::Pair(key, value) => {
                            self.dump_node(key)?;
                            self.dump_node(value)?;
                        }
                        DictItem::Splat(mapping) => self.dump_node(mapping)?,
                    }
                    self.out.push(']');
                }
                self.out.push(']');
            }
            NodeKind::DictComp { key, value, comp } => {
                self.dump_node(key)?;
                self.dump_node(value)?;
                self.dump_comp(comp)?;
            }
            NodeKind::Var(name) | NodeKind::DelVar(name) => self.dump_str(name),
            NodeKind::Unary { operand, .. }
            | NodeKind::Print(operand)
            | NodeKind::PrintX(operand)
            | NodeKind::Render(operand) => self.dump_node(operand)?,
            NodeKind::Binary { left, right, .. } => {
                self.dump_node(left)?;
                self.dump_node(right)?;
            }
            NodeKind::GetAttr { object, attr } => {
                self.dump_node(object)?;
                self.dump_str(attr);
            }
            NodeKind::GetSlice {
                object,
                start,
                stop,
            } => {
                self.dump_node(object)?;
                self.dump_opt_node(start.as_ref())?;
                self.dump_opt_node(stop.as_ref())?;
            }
            NodeKind::CallFunc { name, args } => {
                self.dump_str(name);
                self.dump_nodes(args)?;
            }
            NodeKind::CallMeth { name, object, args } => {
                self.dump_str(name);
                self.dump_node(object)?;
                self.dump_nodes(args)?;
            }
            NodeKind::CallMethKeywords { name, object, args } => {
                self.dump_str(name);
                self.dump_node(object)?;
                self.out.push('l');
                for arg in args {
                    self.out.push('l');
                    match arg {
                        KeywordArg::Named(name, value) => {
                            self.dump_str(name);
                            self.dump_node(value)?;
                        }
                        KeywordArg::Splat(mapping) => self.dump_node(mapping)?,
                    }
                    self.out.push(']');
                }
                self.out.push(']');
            }
            NodeKind::StoreVar { target, value } => {
                self.dump_target(target);
                self.dump_node(value)?;
            }
            NodeKind::AugAssign { name, value, .. } => {
                self.dump_str(name);
                self.dump_node(value)?;
            }
            NodeKind::For {
                target,
                container,
                block,
            } => {
                self.dump_block(block)?;
                self.dump_target(target);
                self.dump_node(container)?;
            }
            NodeKind::IfElIfElse(block) | NodeKind::Else(block) => self.dump_block(block)?,
            NodeKind::If { condition, block } | NodeKind::ElIf { condition, block } => {
                self.dump_block(block)?;
                self.dump_node(condition)?;
            }
        }
        self.end_object();
        Ok(())
    }

    fn dump_opt_node(&mut self, node: Option<&NodeRef>) -> Result<(), Ul4onError> {
        match node {
            Some(node) => self.dump_node(node),
            None => {
                self.out.push('n');
                Ok(())
            }
        }
    }

    fn dump_nodes(&mut self, nodes: &[NodeRef]) -> Result<(), Ul4onError> {
        self.out.push('l');
        for node in nodes {
            self.dump_node(node)?;
        }
        self.out.push(']');
        Ok(())
    }

    fn dump_block(&mut self, block: &Block) -> Result<(), Ul4onError> {
        self.dump_opt_location(block.endlocation.as_ref());
        self.dump_nodes(&block.content)
    }

    fn dump_comp(&mut self, comp: &Comprehension) -> Result<(), Ul4onError> {
        self.dump_target(&comp.target);
        self.dump_node(&comp.container)?;
        self.dump_opt_node(comp.condition.as_ref())
    }

    fn dump_target(&mut self, target: &VarTarget) {
        match target {
            VarTarget::Name(name) => self.dump_str(name),
            VarTarget::Tuple(items) => {
                self.out.push('l');
                for item in items {
                    self.dump_target(item);
                }
                self.out.push(']');
            }
        }
    }
}
