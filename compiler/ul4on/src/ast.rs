//! Decode constructors for locations, templates and AST nodes.
//!
//! Field order matches `Encoder::dump_node`: every node starts with its
//! location, block nodes continue with `endlocation` and `content`.

use std::sync::Arc;

use ul4_ir::{AugOp, BinaryOp, DictItem, KeywordArg, Literal, Node, Template, UnaryOp, UL4_VERSION};
use ul4_patterns::Value;

use crate::decoder::{Decoder, Loaded};
use crate::registry::TYPE_PREFIX;
use crate::Ul4onError;

pub(crate) fn load_location_object(
    decoder: &mut Decoder<'_>,
    _tag: &str,
) -> Result<Loaded, Ul4onError> {
    decoder.load_location_fields().map(Loaded::Location)
}

pub(crate) fn load_template_object(
    decoder: &mut Decoder<'_>,
    _tag: &str,
) -> Result<Loaded, Ul4onError> {
    let version = decoder.load_str()?;
    if version != UL4_VERSION {
        return Err(Ul4onError::Version {
            expected: UL4_VERSION.to_string(),
            got: version,
        });
    }
    let source = decoder.load_source()?;
    let name = decoder.load_opt_str()?;
    let start_delim = decoder.load_str()?;
    let end_delim = decoder.load_str()?;
    let location = decoder.load_opt_location()?;
    let block = decoder.load_block()?;
    let template = Template::new(location, source, name, start_delim, end_delim, block);
    tracing::debug!(template = template.display_name(), "loaded template");
    Ok(Loaded::Value(Value::template(Arc::new(template))))
}

fn literal_from(decoder: &Decoder<'_>, value: Value) -> Result<Literal, Ul4onError> {
    Ok(match value {
        Value::None => Literal::None,
        Value::Bool(b) => Literal::Bool(b),
        Value::Int(n) => Literal::Int(n),
        Value::Float(f) => Literal::Float(f),
        Value::Str(s) => Literal::Str(s.to_string()),
        Value::Date(d) => Literal::Date(d),
        Value::TimeDelta(td) => Literal::TimeDelta(td),
        Value::MonthDelta(md) => Literal::MonthDelta(md),
        Value::Color(c) => Literal::Color(c),
        other => {
            return Err(decoder.syntax(format!(
                "constant of type {} is not supported",
                other.type_name()
            )))
        }
    })
}

pub(crate) fn load_node_object(
    decoder: &mut Decoder<'_>,
    tag: &str,
) -> Result<Loaded, Ul4onError> {
    let location = decoder.load_location()?;
    let node = match tag {
        "text" => Node::text(location),
        "const" => {
            let value = decoder.load_value()?;
            Node::constant(location, literal_from(decoder, value)?)
        }
        "list" => Node::list(location, decoder.load_nodes()?),
        "listcomp" => {
            let item = decoder.load_node()?;
            Node::list_comp(location, item, decoder.load_comp()?)
        }
        "genexpr" => {
            let item = decoder.load_node()?;
            Node::gen_expr(location, item, decoder.load_comp()?)
        }
        "dict" => {
            let mut items = Vec::new();
            for (start, first, second) in decoder.load_entries()? {
                let first = decoder.node_from(start, first)?;
                items.push(match second {
                    Some(value) => DictItem::Pair(first, value),
                    None => DictItem::Splat(first),
                });
            }
            Node::dict(location, items)
        }
        "dictcomp" => {
            let key = decoder.load_node()?;
            let value = decoder.load_node()?;
            Node::dict_comp(location, key, value, decoder.load_comp()?)
        }
        "var" => Node::var(location, decoder.load_str()?),
        "print" => Node::print(location, decoder.load_node()?),
        "printx" => Node::printx(location, decoder.load_node()?),
        "render" => Node::render(location, decoder.load_node()?),
        "getattr" => {
            let object = decoder.load_node()?;
            Node::get_attr(location, object, decoder.load_str()?)
        }
        "getslice" => {
            let object = decoder.load_node()?;
            let start = decoder.load_opt_node()?;
            let stop = decoder.load_opt_node()?;
            Node::get_slice(location, object, start, stop)
        }
        "callfunc" => {
            let name = decoder.load_str()?;
            Node::call_func(location, name, decoder.load_nodes()?)
        }
        "callmeth" => {
            let name = decoder.load_str()?;
            let object = decoder.load_node()?;
            Node::call_meth(location, object, name, decoder.load_nodes()?)
        }
        "callmethkw" => {
            let name = decoder.load_str()?;
            let object = decoder.load_node()?;
            let mut args = Vec::new();
            for (start, first, second) in decoder.load_entries()? {
                args.push(match (first, second) {
                    (Loaded::Value(Value::Str(arg)), Some(value)) => {
                        KeywordArg::Named(arg.to_string(), value)
                    }
                    (first, None) => KeywordArg::Splat(decoder.node_from(start, first)?),
                    (_, Some(_)) => {
                        return Err(decoder.syntax("keyword argument name must be a string"))
                    }
                });
            }
            Node::call_meth_keywords(location, object, name, args)
        }
        "storevar" => {
            let target = decoder.load_target()?;
            Node::store_var(location, target, decoder.load_node()?)
        }
        "delvar" => Node::del_var(location, decoder.load_str()?),
        "for" => {
            let block = decoder.load_block()?;
            let target = decoder.load_target()?;
            let container = decoder.load_node()?;
            Node::for_loop(location, target, container, block)
        }
        "break" => Node::break_stmt(location),
        "continue" => Node::continue_stmt(location),
        "ieie" => Node::if_chain(location, decoder.load_block()?),
        "else" => Node::else_block(location, decoder.load_block()?),
        "if" | "elif" => {
            let block = decoder.load_block()?;
            let condition = decoder.load_node()?;
            if tag == "if" {
                Node::if_block(location, condition, block)
            } else {
                Node::elif_block(location, condition, block)
            }
        }
        other => {
            if let Some(op) = UnaryOp::from_tag(other) {
                Node::unary(location, op, decoder.load_node()?)
            } else if let Some(op) = BinaryOp::from_tag(other) {
                let left = decoder.load_node()?;
                let right = decoder.load_node()?;
                Node::binary(location, op, left, right)
            } else if let Some(op) = AugOp::from_tag(other) {
                let name = decoder.load_str()?;
                Node::aug_assign(location, op, name, decoder.load_node()?)
            } else {
                return Err(Ul4onError::UnknownType(format!("{TYPE_PREFIX}{other}")));
            }
        }
    };
    Ok(Loaded::Node(node))
}
