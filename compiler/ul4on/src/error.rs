use thiserror::Error;
use ul4_patterns::errors;
use ul4_patterns::EvalError;

/// Failure while dumping or loading UL4ON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Ul4onError {
    #[error("can't load object of type {0}")]
    UnknownType(String),

    #[error("invalid version, expected {expected}, got {got}")]
    Version { expected: String, got: String },

    /// Malformed input; `offset` is the byte offset of the offending item.
    #[error("broken UL4ON stream at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },

    #[error("can't serialize object of type {0}")]
    NotSerializable(&'static str),
}

impl From<Ul4onError> for EvalError {
    fn from(err: Ul4onError) -> Self {
        match err {
            Ul4onError::UnknownType(tag) => errors::unknown_type(&tag),
            Ul4onError::Version { expected, got } => errors::version_mismatch(&expected, &got),
            Ul4onError::NotSerializable(type_name) => errors::not_serializable(type_name),
            Ul4onError::Syntax { .. } => errors::invalid_value(err.to_string()),
        }
    }
}
