//! UL4ON: a compact, self-describing text format for UL4 values and
//! templates.
//!
//! ```text
//! n            None
//! bT bF        booleans
//! i42|         int
//! f1.5|        float
//! S5|hello     string (recorded)
//! ^3|          backreference to the 4th recorded string or object
//! t<20 digits> date
//! T i i i      timedelta (days, seconds, microseconds)
//! m i          monthdelta
//! c i i i i    color
//! l ... ]      list
//! d k v ... }  dict
//! O tag ... )  object; its fields follow the tag
//! ```
//!
//! Objects are decoded through a [`Registry`] of constructors keyed by tag.

mod ast;
mod decoder;
mod encoder;
mod error;
mod registry;

use std::sync::Arc;

use ul4_ir::Template;
use ul4_patterns::Value;

pub use decoder::{Decoder, Loaded};
pub use encoder::Encoder;
pub use error::Ul4onError;
pub use registry::{LoadFn, Registry, TYPE_PREFIX};

/// Serialize a value.
#[tracing::instrument(level = "debug", skip_all, fields(kind = value.type_name()))]
pub fn dumps(value: &Value) -> Result<String, Ul4onError> {
    let mut encoder = Encoder::new();
    encoder.dump(value)?;
    Ok(encoder.finish())
}

/// Deserialize a value using the built-in registry.
#[tracing::instrument(level = "debug", skip_all, fields(len = input.len()))]
pub fn loads(input: &str) -> Result<Value, Ul4onError> {
    let mut decoder = Decoder::new(input);
    let value = decoder.load_value()?;
    decoder.finish()?;
    Ok(value)
}

/// Serialize a template, including its version marker.
#[tracing::instrument(level = "debug", skip_all, fields(template = template.display_name()))]
pub fn dumps_template(template: &Template) -> Result<String, Ul4onError> {
    let mut encoder = Encoder::new();
    encoder.dump_template(template)?;
    Ok(encoder.finish())
}

/// Deserialize a template.
#[tracing::instrument(level = "debug", skip_all, fields(len = input.len()))]
pub fn loads_template(input: &str) -> Result<Arc<Template>, Ul4onError> {
    match loads(input)? {
        Value::Template(template) => Ok(template),
        other => Err(Ul4onError::Syntax {
            offset: 0,
            message: format!("expected template, got {}", other.type_name()),
        }),
    }
}
