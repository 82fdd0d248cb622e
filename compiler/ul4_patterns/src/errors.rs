//! Evaluation errors.
//!
//! `EvalErrorKind` carries structured data for every failure mode; factory
//! functions (e.g. `division_by_zero()`) build an [`EvalError`] whose
//! `message` is the kind's `Display` output. Each kind belongs to an
//! [`ErrorCategory`] mirroring the exception classes sibling UL4 runtimes
//! raise.
//!
//! `break` and `continue` travel on the error path as well, marked by
//! `control_flow`, so loops can intercept them with ordinary `?` plumbing.

use std::fmt;

use ul4_ir::Location;

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Loop control signals.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControlFlow {
    Break,
    Continue,
}

/// Coarse error class, as reported to template authors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    TypeError,
    ValueError,
    ArgumentError,
    KeyError,
    IndexError,
    NameError,
    ZeroDivisionError,
    OverflowError,
    RecursionError,
    UnknownTypeError,
    VersionError,
    /// Not an error: a `break`/`continue` signal.
    ControlFlow,
}

impl ErrorCategory {
    pub const fn name(self) -> &'static str {
        match self {
            Self::TypeError => "TypeError",
            Self::ValueError => "ValueError",
            Self::ArgumentError => "ArgumentError",
            Self::KeyError => "KeyError",
            Self::IndexError => "IndexError",
            Self::NameError => "NameError",
            Self::ZeroDivisionError => "ZeroDivisionError",
            Self::OverflowError => "OverflowError",
            Self::RecursionError => "RecursionError",
            Self::UnknownTypeError => "UnknownTypeError",
            Self::VersionError => "VersionError",
            Self::ControlFlow => "ControlFlow",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a call targets a free function or a method.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CallKind {
    Function,
    Method,
}

impl CallKind {
    const fn word(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Method => "method",
        }
    }
}

/// Structured error condition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Operators
    BinaryNotSupported {
        left: String,
        op: &'static str,
        right: String,
    },
    UnaryNotSupported {
        op: &'static str,
        operand: String,
    },
    UnorderableTypes {
        left: String,
        op: &'static str,
        right: String,
    },
    NotIterable {
        type_name: String,
    },
    NotAContainer {
        type_name: String,
    },
    NotSubscriptable {
        type_name: String,
    },
    NoAttribute {
        type_name: String,
        attr: String,
    },
    NegativeRepetition,
    /// `**` unpacking of something that is not a dict.
    SplatNotDict {
        type_name: String,
    },
    /// Any other type mismatch with a ready-made message.
    InvalidType {
        message: String,
    },

    // Arithmetic
    DivisionByZero,
    ModuloByZero,
    IntegerOverflow {
        operation: &'static str,
    },
    /// Repetition whose result would exceed the sequence length limit.
    RepetitionTooLarge {
        length: u128,
        limit: usize,
    },

    // Access
    UndefinedVariable {
        name: String,
    },
    UnknownFunction {
        name: String,
    },
    UnknownMethod {
        type_name: String,
        method: String,
    },
    IndexOutOfRange {
        index: i64,
    },
    KeyNotFound {
        key: String,
    },

    // Calls
    ArityMismatch {
        call: CallKind,
        name: String,
        min: usize,
        max: Option<usize>,
        given: usize,
    },
    WrongArgType {
        name: String,
        expected: &'static str,
        got: String,
    },
    KeywordsNotSupported {
        method: String,
    },
    DuplicateArgument {
        method: String,
        name: String,
    },

    // Unpacking
    UnpackMismatch {
        varnames: usize,
        items: usize,
        more: bool,
    },

    // Control flow misuse
    BreakOutsideLoop,
    ContinueOutsideLoop,
    RecursionLimit {
        depth: usize,
    },

    // Serialization
    UnknownType {
        tag: String,
    },
    VersionMismatch {
        expected: String,
        got: String,
    },
    NotSerializable {
        type_name: String,
    },

    /// Any other value-level failure with a ready-made message.
    InvalidValue {
        message: String,
    },

    /// Carrier for `break`/`continue`.
    Signal,
}

impl EvalErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::BinaryNotSupported { .. }
            | Self::UnaryNotSupported { .. }
            | Self::UnorderableTypes { .. }
            | Self::NotIterable { .. }
            | Self::NotAContainer { .. }
            | Self::NotSubscriptable { .. }
            | Self::NoAttribute { .. }
            | Self::SplatNotDict { .. }
            | Self::InvalidType { .. }
            | Self::WrongArgType { .. } => ErrorCategory::TypeError,
            Self::NegativeRepetition
            | Self::UnpackMismatch { .. }
            | Self::NotSerializable { .. }
            | Self::BreakOutsideLoop
            | Self::ContinueOutsideLoop
            | Self::InvalidValue { .. } => ErrorCategory::ValueError,
            Self::ArityMismatch { .. }
            | Self::KeywordsNotSupported { .. }
            | Self::DuplicateArgument { .. } => ErrorCategory::ArgumentError,
            Self::KeyNotFound { .. } => ErrorCategory::KeyError,
            Self::IndexOutOfRange { .. } => ErrorCategory::IndexError,
            Self::UndefinedVariable { .. }
            | Self::UnknownFunction { .. }
            | Self::UnknownMethod { .. } => ErrorCategory::NameError,
            Self::DivisionByZero | Self::ModuloByZero => ErrorCategory::ZeroDivisionError,
            Self::IntegerOverflow { .. } | Self::RepetitionTooLarge { .. } => {
                ErrorCategory::OverflowError
            }
            Self::RecursionLimit { .. } => ErrorCategory::RecursionError,
            Self::UnknownType { .. } => ErrorCategory::UnknownTypeError,
            Self::VersionMismatch { .. } => ErrorCategory::VersionError,
            Self::Signal => ErrorCategory::ControlFlow,
        }
    }
}

fn arguments(n: usize) -> &'static str {
    if n == 1 {
        "argument"
    } else {
        "arguments"
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Operators
            Self::BinaryNotSupported { left, op, right } => {
                write!(f, "{left} {op} {right} not supported")
            }
            Self::UnaryNotSupported { op, operand } => write!(f, "{op}{operand} not supported"),
            Self::UnorderableTypes { left, op, right } => {
                write!(f, "unorderable types: {left}() {op} {right}()")
            }
            Self::NotIterable { type_name } => write!(f, "'{type_name}' object is not iterable"),
            Self::NotAContainer { type_name } => {
                write!(f, "argument of type '{type_name}' is not iterable")
            }
            Self::NotSubscriptable { type_name } => {
                write!(f, "getitem() needs a sequence or dict, not {type_name}")
            }
            Self::NoAttribute { type_name, attr } => {
                write!(f, "'{type_name}' object has no attribute '{attr}'")
            }
            Self::NegativeRepetition => write!(f, "mul() repetition counter must be positive"),
            Self::SplatNotDict { type_name } => write!(f, "** requires a dict, not {type_name}"),
            Self::InvalidType { message } => f.write_str(message),

            // Arithmetic
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::ModuloByZero => write!(f, "integer modulo by zero"),
            Self::IntegerOverflow { operation } => write!(f, "integer overflow in {operation}"),
            Self::RepetitionTooLarge { length, limit } => {
                write!(f, "repetition result too large (length {length}, limit {limit})")
            }

            // Access
            Self::UndefinedVariable { name } => write!(f, "name '{name}' is not defined"),
            Self::UnknownFunction { name } => write!(f, "function '{name}' unknown"),
            Self::UnknownMethod { type_name, method } => {
                write!(f, "method '{method}' unknown for type '{type_name}'")
            }
            Self::IndexOutOfRange { index } => write!(f, "index {index} out of range"),
            Self::KeyNotFound { key } => write!(f, "key {key} not found"),

            // Calls
            Self::ArityMismatch {
                call,
                name,
                min,
                max,
                given,
            } => {
                let word = call.word();
                match max {
                    Some(max) if max == min => write!(
                        f,
                        "{word} {name}() requires {min} {}, {given} given",
                        arguments(*min)
                    ),
                    Some(max) => {
                        write!(f, "{word} {name}() requires {min}-{max} arguments, {given} given")
                    }
                    None => write!(
                        f,
                        "{word} {name}() requires at least {min} {}, {given} given",
                        arguments(*min)
                    ),
                }
            }
            Self::WrongArgType {
                name,
                expected,
                got,
            } => write!(f, "{name}() requires {expected}, {got} given"),
            Self::KeywordsNotSupported { method } => {
                write!(f, "method {method}() doesn't support keyword arguments")
            }
            Self::DuplicateArgument { method, name } => {
                write!(f, "duplicate keyword argument {name} in {method}()")
            }

            // Unpacking
            Self::UnpackMismatch {
                varnames,
                items,
                more,
            } => {
                let more = if *more { ">" } else { "" };
                write!(
                    f,
                    "mismatched variable unpacking: {varnames} varnames, {more}{items} items"
                )
            }

            // Control flow misuse
            Self::BreakOutsideLoop => write!(f, "break outside of loop"),
            Self::ContinueOutsideLoop => write!(f, "continue outside of loop"),
            Self::RecursionLimit { depth } => {
                write!(f, "maximum render depth exceeded (limit: {depth})")
            }

            // Serialization
            Self::UnknownType { tag } => write!(f, "can't load object of type {tag}"),
            Self::VersionMismatch { expected, got } => {
                write!(f, "invalid version, expected {expected}, got {got}")
            }
            Self::NotSerializable { type_name } => {
                write!(f, "can't serialize object of type {type_name}")
            }

            Self::InvalidValue { message } => f.write_str(message),
            Self::Signal => write!(f, "loop control signal"),
        }
    }
}

/// Evaluation error or loop control signal.
#[derive(Clone, Debug)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()`.
    pub message: String,
    /// Innermost node location known when the error surfaced.
    pub location: Option<Location>,
    /// Set for `break`/`continue` signals.
    pub control_flow: Option<ControlFlow>,
}

impl EvalError {
    /// Error with a free-form message, classed as a value error.
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::InvalidValue {
            message: message.into(),
        })
    }

    pub fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            location: None,
            control_flow: None,
        }
    }

    pub fn break_signal() -> Self {
        EvalError {
            control_flow: Some(ControlFlow::Break),
            ..Self::from_kind(EvalErrorKind::Signal)
        }
    }

    pub fn continue_signal() -> Self {
        EvalError {
            control_flow: Some(ControlFlow::Continue),
            ..Self::from_kind(EvalErrorKind::Signal)
        }
    }

    /// Attach `location` unless a more specific one is already set.
    #[must_use]
    pub fn with_location(mut self, location: &Location) -> Self {
        if self.location.is_none() {
            self.location = Some(location.clone());
        }
        self
    }

    pub fn is_control_flow(&self) -> bool {
        self.control_flow.is_some()
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category(), self.message)?;
        if let Some(location) = &self.location {
            write!(f, " ({location})")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

// Operator errors

#[cold]
pub fn binary_not_supported(left: &str, op: &'static str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BinaryNotSupported {
        left: left.to_string(),
        op,
        right: right.to_string(),
    })
}

#[cold]
pub fn unary_not_supported(op: &'static str, operand: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnaryNotSupported {
        op,
        operand: operand.to_string(),
    })
}

#[cold]
pub fn unorderable_types(left: &str, op: &'static str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnorderableTypes {
        left: left.to_string(),
        op,
        right: right.to_string(),
    })
}

#[cold]
pub fn not_iterable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotIterable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn not_a_container(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAContainer {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn not_subscriptable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotSubscriptable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn no_attribute(type_name: &str, attr: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoAttribute {
        type_name: type_name.to_string(),
        attr: attr.to_string(),
    })
}

#[cold]
pub fn negative_repetition() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NegativeRepetition)
}

#[cold]
pub fn splat_not_dict(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::SplatNotDict {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn invalid_type(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidType {
        message: message.into(),
    })
}

// Arithmetic errors

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow { operation })
}

#[cold]
pub fn repetition_too_large(length: u128, limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RepetitionTooLarge { length, limit })
}

// Access errors

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn unknown_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownFunction {
        name: name.to_string(),
    })
}

#[cold]
pub fn unknown_method(type_name: &str, method: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownMethod {
        type_name: type_name.to_string(),
        method: method.to_string(),
    })
}

#[cold]
pub fn index_out_of_range(index: i64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfRange { index })
}

/// `key` is the repr of the missing key.
#[cold]
pub fn key_not_found(key: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::KeyNotFound {
        key: key.to_string(),
    })
}

// Call errors

#[cold]
pub fn wrong_arg_count(
    call: CallKind,
    name: &str,
    min: usize,
    max: Option<usize>,
    given: usize,
) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        call,
        name: name.to_string(),
        min,
        max,
        given,
    })
}

#[cold]
pub fn wrong_arg_type(name: &str, expected: &'static str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::WrongArgType {
        name: name.to_string(),
        expected,
        got: got.to_string(),
    })
}

#[cold]
pub fn keywords_not_supported(method: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::KeywordsNotSupported {
        method: method.to_string(),
    })
}

#[cold]
pub fn duplicate_argument(method: &str, name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateArgument {
        method: method.to_string(),
        name: name.to_string(),
    })
}

// Unpacking and control flow

#[cold]
pub fn unpack_mismatch(varnames: usize, items: usize, more: bool) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnpackMismatch {
        varnames,
        items,
        more,
    })
}

#[cold]
pub fn break_outside_loop() -> EvalError {
    EvalError::from_kind(EvalErrorKind::BreakOutsideLoop)
}

#[cold]
pub fn continue_outside_loop() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ContinueOutsideLoop)
}

#[cold]
pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { depth })
}

// Serialization errors

#[cold]
pub fn unknown_type(tag: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownType {
        tag: tag.to_string(),
    })
}

#[cold]
pub fn version_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::VersionMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn not_serializable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotSerializable {
        type_name: type_name.to_string(),
    })
}

// Value errors

#[cold]
pub fn invalid_value(message: impl Into<String>) -> EvalError {
    EvalError::new(message)
}

#[cold]
pub fn empty_sequence(function: &str) -> EvalError {
    EvalError::new(format!("{function}() arg is an empty sequence"))
}

#[cold]
pub fn zero_step(function: &str) -> EvalError {
    EvalError::new(format!("{function}() requires a step argument != 0"))
}

#[cfg(test)]
mod tests;
