//! UL4ON decoder.
//!
//! `load` reads one item of any kind. The typed helpers (`load_str`,
//! `load_node`, ...) are what object constructors use to pull their fields
//! back off the stream.

use std::sync::Arc;

use ul4_ir::{
    Block, Color, Comprehension, Date, Location, MonthDelta, Node, NodeRef, Span, TimeDelta,
    VarTarget,
};
use ul4_patterns::{DictMap, Heap, Value};

use crate::registry::{Registry, TYPE_PREFIX};
use crate::Ul4onError;

/// Anything an UL4ON stream can contain.
#[derive(Clone, Debug)]
pub enum Loaded {
    Value(Value),
    Node(NodeRef),
    Location(Location),
}

impl Loaded {
    fn kind(&self) -> &'static str {
        match self {
            Loaded::Value(value) => value.type_name(),
            Loaded::Node(node) => node.tag(),
            Loaded::Location(_) => "location",
        }
    }
}

/// Streaming UL4ON reader.
pub struct Decoder<'a> {
    input: &'a str,
    pos: usize,
    registry: &'a Registry,
    /// Strings and objects in the order they were read; `None` while an
    /// object's fields are still being read.
    records: Vec<Option<Loaded>>,
    /// Source texts converted to `Arc<str>`, keyed by the decoded string.
    sources: Vec<(Heap<String>, Arc<str>)>,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_registry(input, Registry::builtin())
    }

    pub fn with_registry(input: &'a str, registry: &'a Registry) -> Self {
        Decoder {
            input,
            pos: 0,
            registry,
            records: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// Byte offset of the next unread character.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Fail unless only whitespace remains.
    pub fn finish(mut self) -> Result<(), Ul4onError> {
        self.skip_whitespace();
        if self.pos < self.input.len() {
            return Err(self.syntax("trailing data"));
        }
        Ok(())
    }

    /// Error at the current offset.
    pub fn syntax(&self, message: impl Into<String>) -> Ul4onError {
        self.syntax_at(self.pos, message)
    }

    fn syntax_at(&self, offset: usize, message: impl Into<String>) -> Ul4onError {
        Ul4onError::Syntax {
            offset,
            message: message.into(),
        }
    }

    fn unexpected(&self, offset: usize, expected: &str, got: &Loaded) -> Ul4onError {
        self.syntax_at(offset, format!("expected {expected}, got {}", got.kind()))
    }

    // Scanning

    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skip whitespace and consume `terminator` if it comes next.
    fn at_end_of(&mut self, terminator: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(terminator) {
            self.pos += terminator.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), Ul4onError> {
        self.skip_whitespace();
        match self.next_char() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.syntax_at(
                self.pos - c.len_utf8(),
                format!("expected {expected:?}, got {c:?}"),
            )),
            None => Err(self.syntax(format!("expected {expected:?}, got end of input"))),
        }
    }

    /// Text up to the next `|`, which is consumed.
    fn read_field(&mut self) -> Result<&'a str, Ul4onError> {
        let input = self.input;
        let rest = &input[self.pos..];
        let Some(end) = rest.find('|') else {
            return Err(self.syntax("unterminated field"));
        };
        self.pos += end + 1;
        Ok(&rest[..end])
    }

    fn read_number<T: std::str::FromStr>(&mut self, what: &str) -> Result<T, Ul4onError> {
        let start = self.pos;
        let text = self.read_field()?;
        text.parse()
            .map_err(|_| self.syntax_at(start, format!("invalid {what} {text:?}")))
    }

    fn read_string(&mut self) -> Result<String, Ul4onError> {
        let len: usize = self.read_number("string length")?;
        let input = self.input;
        let rest = &input[self.pos..];
        let end = match rest.char_indices().nth(len) {
            Some((end, _)) => end,
            None if rest.chars().count() == len => rest.len(),
            None => return Err(self.syntax("string runs past end of input")),
        };
        self.pos += end;
        Ok(rest[..end].to_string())
    }

    fn record(&mut self, item: Loaded) {
        self.records.push(Some(item));
    }

    // Generic loading

    /// Read one item of any kind.
    pub fn load(&mut self) -> Result<Loaded, Ul4onError> {
        self.skip_whitespace();
        let start = self.pos;
        let Some(code) = self.next_char() else {
            return Err(self.syntax("unexpected end of input"));
        };
        let value = match code {
            'n' => Value::None,
            'b' => match self.next_char() {
                Some('T') => Value::Bool(true),
                Some('F') => Value::Bool(false),
                _ => return Err(self.syntax_at(start, "invalid bool")),
            },
            'i' => Value::Int(self.read_number("int")?),
            'f' => Value::Float(self.read_number("float")?),
            'S' => {
                let value = Value::string(self.read_string()?);
                self.record(Loaded::Value(value.clone()));
                value
            }
            '^' => {
                let index: usize = self.read_number("backreference")?;
                return match self.records.get(index) {
                    Some(Some(item)) => Ok(item.clone()),
                    Some(None) => Err(self.syntax_at(start, "backreference to unfinished object")),
                    None => Err(self.syntax_at(start, format!("unknown backreference {index}"))),
                };
            }
            't' => {
                let input = self.input;
                let text = input
                    .get(self.pos..self.pos + 20)
                    .ok_or_else(|| self.syntax("truncated date"))?;
                let date = Date::parse_compact(text)
                    .map_err(|err| self.syntax_at(start, err.to_string()))?;
                self.pos += 20;
                Value::Date(date)
            }
            'T' => {
                let days = self.load_int()?;
                let seconds = self.load_int()?;
                let microseconds = self.load_int()?;
                let delta = TimeDelta::new(days, seconds, microseconds)
                    .ok_or_else(|| self.syntax_at(start, "timedelta out of range"))?;
                Value::TimeDelta(delta)
            }
            'm' => Value::MonthDelta(MonthDelta::new(self.load_int()?)),
            'c' => {
                let mut channels = [0u8; 4];
                for channel in &mut channels {
                    let offset = self.pos;
                    let n = self.load_int()?;
                    *channel = u8::try_from(n)
                        .map_err(|_| self.syntax_at(offset, format!("color channel {n} out of range")))?;
                }
                let [r, g, b, a] = channels;
                Value::Color(Color::new(r, g, b, a))
            }
            'l' => {
                let mut items = Vec::new();
                while !self.at_end_of(']') {
                    items.push(self.load_value()?);
                }
                Value::list(items)
            }
            'd' => {
                let mut map = DictMap::default();
                while !self.at_end_of('}') {
                    let key = self.load_str()?;
                    let item = self.load_value()?;
                    map.insert(key, item);
                }
                Value::dict(map)
            }
            'O' => return self.load_object(),
            other => return Err(self.syntax_at(start, format!("unknown typecode {other:?}"))),
        };
        Ok(Loaded::Value(value))
    }

    fn load_object(&mut self) -> Result<Loaded, Ul4onError> {
        let index = self.records.len();
        self.records.push(None);
        let tag = self.load_str()?;
        let Some(load) = self.registry.get(&tag) else {
            return Err(Ul4onError::UnknownType(tag));
        };
        let short = tag.strip_prefix(TYPE_PREFIX).unwrap_or(&tag);
        let item = load(self, short)?;
        self.expect(')')?;
        if let Some(slot) = self.records.get_mut(index) {
            *slot = Some(item.clone());
        }
        Ok(item)
    }

    // Typed loading

    pub fn load_value(&mut self) -> Result<Value, Ul4onError> {
        let start = self.pos;
        match self.load()? {
            Loaded::Value(value) => Ok(value),
            other => Err(self.unexpected(start, "value", &other)),
        }
    }

    pub fn load_int(&mut self) -> Result<i64, Ul4onError> {
        let start = self.pos;
        match self.load()? {
            Loaded::Value(Value::Int(n)) => Ok(n),
            other => Err(self.unexpected(start, "int", &other)),
        }
    }

    fn load_offset(&mut self) -> Result<u32, Ul4onError> {
        let start = self.pos;
        let n = self.load_int()?;
        u32::try_from(n).map_err(|_| self.syntax_at(start, format!("invalid offset {n}")))
    }

    pub fn load_str(&mut self) -> Result<String, Ul4onError> {
        let start = self.pos;
        match self.load()? {
            Loaded::Value(Value::Str(s)) => Ok(s.to_string()),
            other => Err(self.unexpected(start, "str", &other)),
        }
    }

    pub fn load_opt_str(&mut self) -> Result<Option<String>, Ul4onError> {
        let start = self.pos;
        match self.load()? {
            Loaded::Value(Value::None) => Ok(None),
            Loaded::Value(Value::Str(s)) => Ok(Some(s.to_string())),
            other => Err(self.unexpected(start, "str or None", &other)),
        }
    }

    /// Source text; repeated sources share one allocation.
    pub fn load_source(&mut self) -> Result<Arc<str>, Ul4onError> {
        let start = self.pos;
        let text = match self.load()? {
            Loaded::Value(Value::Str(text)) => text,
            other => return Err(self.unexpected(start, "str", &other)),
        };
        if let Some((_, source)) = self.sources.iter().find(|(seen, _)| seen.ptr_eq(&text)) {
            return Ok(Arc::clone(source));
        }
        let source: Arc<str> = Arc::from(text.as_str());
        self.sources.push((text, Arc::clone(&source)));
        Ok(source)
    }

    pub fn load_location(&mut self) -> Result<Location, Ul4onError> {
        let start = self.pos;
        match self.load()? {
            Loaded::Location(location) => Ok(location),
            other => Err(self.unexpected(start, "location", &other)),
        }
    }

    pub fn load_opt_location(&mut self) -> Result<Option<Location>, Ul4onError> {
        let start = self.pos;
        match self.load()? {
            Loaded::Value(Value::None) => Ok(None),
            Loaded::Location(location) => Ok(Some(location)),
            other => Err(self.unexpected(start, "location or None", &other)),
        }
    }

    /// Location fields, after the `location` tag.
    pub(crate) fn load_location_fields(&mut self) -> Result<Location, Ul4onError> {
        let source = self.load_source()?;
        let tag_type = self.load_opt_str()?;
        let tag_start = self.load_offset()?;
        let tag_end = self.load_offset()?;
        let code_start = self.load_offset()?;
        let code_end = self.load_offset()?;
        Ok(Location::new(
            source,
            tag_type,
            Span::new(tag_start, tag_end),
            Span::new(code_start, code_end),
        ))
    }

    /// An AST node; a nested template becomes a template definition node.
    pub fn load_node(&mut self) -> Result<NodeRef, Ul4onError> {
        self.skip_whitespace();
        let start = self.pos;
        let item = self.load()?;
        self.node_from(start, item)
    }

    /// Convert an item read at `start` into a node.
    pub(crate) fn node_from(&self, start: usize, item: Loaded) -> Result<NodeRef, Ul4onError> {
        match item {
            Loaded::Node(node) => Ok(node),
            Loaded::Value(Value::Template(template)) => {
                let location = template
                    .location
                    .clone()
                    .unwrap_or_else(|| Location::text(Arc::clone(&template.source), Span::EMPTY));
                Ok(Node::template(location, template))
            }
            other => Err(self.unexpected(start, "AST node", &other)),
        }
    }

    pub fn load_opt_node(&mut self) -> Result<Option<NodeRef>, Ul4onError> {
        self.skip_whitespace();
        if self.peek() == Some('n') {
            self.pos += 1;
            return Ok(None);
        }
        self.load_node().map(Some)
    }

    /// `l` node... `]`
    pub fn load_nodes(&mut self) -> Result<Vec<NodeRef>, Ul4onError> {
        self.expect('l')?;
        let mut nodes = Vec::new();
        while !self.at_end_of(']') {
            nodes.push(self.load_node()?);
        }
        Ok(nodes)
    }

    /// Name, or a (nested) list of names.
    pub fn load_target(&mut self) -> Result<VarTarget, Ul4onError> {
        self.skip_whitespace();
        if self.peek() == Some('l') {
            self.pos += 1;
            let mut items = Vec::new();
            while !self.at_end_of(']') {
                items.push(self.load_target()?);
            }
            return Ok(VarTarget::Tuple(items));
        }
        self.load_str().map(VarTarget::Name)
    }

    pub(crate) fn load_comp(&mut self) -> Result<Comprehension, Ul4onError> {
        let target = self.load_target()?;
        let container = self.load_node()?;
        let condition = self.load_opt_node()?;
        Ok(Comprehension {
            target,
            container,
            condition,
        })
    }

    pub(crate) fn load_block(&mut self) -> Result<Block, Ul4onError> {
        let endlocation = self.load_opt_location()?;
        let content = self.load_nodes()?;
        Ok(Block {
            endlocation,
            content,
        })
    }

    /// Entries of a dict literal or keyword argument list:
    /// `l` followed by `l first second ]` or `l first ]` entries, then `]`.
    ///
    /// Returns each first item with its offset, and the second item if any.
    pub(crate) fn load_entries(
        &mut self,
    ) -> Result<Vec<(usize, Loaded, Option<NodeRef>)>, Ul4onError> {
        self.expect('l')?;
        let mut entries = Vec::new();
        while !self.at_end_of(']') {
            self.expect('l')?;
            self.skip_whitespace();
            let start = self.pos;
            let first = self.load()?;
            let second = if self.at_end_of(']') {
                None
            } else {
                let node = self.load_node()?;
                self.expect(']')?;
                Some(node)
            };
            entries.push((start, first, second));
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests;
