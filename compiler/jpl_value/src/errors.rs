//! Evaluation errors.
//!
//! # Severity
//!
//! Errors are either recoverable or fatal. Recoverable errors come from
//! ordinary operation failures (type mismatches, division by zero, missing
//! indices, errors thrown by user code) and can be caught by `try` and `?`.
//! Fatal errors signal broken invariants (malformed instruction trees, host
//! boundary violations, runaway recursion) and always reach the caller.
//!
//! # Enclosure
//!
//! Interception operators must only see errors raised inside their own
//! operand, never errors raised by the continuation they pass outputs to.
//! They therefore wrap their continuation so that anything it returns is
//! [`EvalError::enclose`]d, and [`EvalError::disclose`] it again on the way
//! out. An enclosed error is never caught.
//!
//! Factory functions (`division_by_zero()` and friends) are the public API;
//! they set both `kind` and `message`.

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult<T = Value> = Result<T, EvalError>;

/// Whether `try` may intercept an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Recoverable,
    Fatal,
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Arithmetic
    #[error("division by zero")]
    DivisionByZero,
    #[error("cannot apply `{op}` to {left} and {right}")]
    InvalidOperand {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },
    #[error("cannot apply `{op}` to {type_name}")]
    InvalidUnaryOperand {
        op: &'static str,
        type_name: &'static str,
    },
    #[error("result would exceed {limit} elements")]
    SizeLimitExceeded { limit: usize },

    // Access
    #[error("cannot access {type_name} with a {key_type} key")]
    TypeMismatch {
        type_name: &'static str,
        key_type: &'static str,
    },
    #[error("cannot iterate over {type_name}")]
    NotIterable { type_name: &'static str },
    #[error("cannot slice {type_name}")]
    NotSliceable { type_name: &'static str },
    #[error("index {index} is out of range for array of length {len}")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("object keys must be strings, got {type_name}")]
    InvalidObjectKey { type_name: &'static str },
    #[error("undefined variable: {name}")]
    UndefinedVariable { name: String },
    #[error("{type_name} is not callable")]
    NotCallable { type_name: &'static str },

    // Raised by user code or natives
    #[error("{message}")]
    Thrown { message: String },
    #[error("{message}")]
    Custom { message: String },

    // Fatal
    #[error("invalid assignment path: {reason}")]
    InvalidAssignmentPath { reason: &'static str },
    #[error("maximum call depth of {depth} exceeded")]
    StackOverflow { depth: usize },
    #[error("{message}")]
    Normalization { message: String },
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl EvalErrorKind {
    /// Severity of errors of this kind.
    pub const fn severity(&self) -> Severity {
        match self {
            Self::InvalidAssignmentPath { .. }
            | Self::StackOverflow { .. }
            | Self::Normalization { .. }
            | Self::Internal { .. } => Severity::Fatal,
            _ => Severity::Recoverable,
        }
    }
}

/// An evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory errors.
    pub message: String,
    /// Value handed to a `catch` arm. Errors without one pass their message.
    pub value: Option<Value>,
    /// Number of interception boundaries this error has to pass untouched.
    enclosure: u32,
}

impl EvalError {
    /// Create a recoverable error with just a message.
    ///
    /// Prefer the specific factory functions when a structured kind exists.
    #[cold]
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::from_kind(EvalErrorKind::Custom { message })
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            value: None,
            enclosure: 0,
        }
    }

    /// Attach a payload value.
    #[must_use]
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    #[inline]
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    #[inline]
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }

    /// Returns `true` if an interception operator may catch this error here.
    #[inline]
    pub fn is_catchable(&self) -> bool {
        !self.is_fatal() && !self.is_enclosed()
    }

    /// The value a `catch` arm receives.
    pub fn payload(&self) -> Value {
        match &self.value {
            Some(value) => value.clone(),
            None => Value::string(self.message.clone()),
        }
    }

    /// Mark the error as coming from outside the next interception boundary.
    #[must_use]
    pub fn enclose(mut self) -> Self {
        self.enclosure += 1;
        self
    }

    #[inline]
    pub fn is_enclosed(&self) -> bool {
        self.enclosure > 0
    }

    /// Undo one [`enclose`](Self::enclose) when leaving a boundary.
    #[must_use]
    pub fn disclose(mut self) -> Self {
        self.enclosure = self.enclosure.saturating_sub(1);
        self
    }
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

// Arithmetic

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn invalid_operand(op: &'static str, left: &Value, right: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidOperand {
        op,
        left: left.type_name(),
        right: right.type_name(),
    })
}

#[cold]
pub fn invalid_unary_operand(op: &'static str, value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidUnaryOperand {
        op,
        type_name: value.type_name(),
    })
}

// Access

/// Accessing `value` with a key of the wrong type.
#[cold]
pub fn type_mismatch(value: &Value, key: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        type_name: value.type_name(),
        key_type: key.type_name(),
    })
}

#[cold]
pub fn not_iterable(value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotIterable {
        type_name: value.type_name(),
    })
}

#[cold]
pub fn not_sliceable(value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotSliceable {
        type_name: value.type_name(),
    })
}

#[cold]
pub fn size_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::SizeLimitExceeded { limit })
}

#[cold]
pub fn index_out_of_range(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfRange { index, len })
}

#[cold]
pub fn invalid_object_key(key: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidObjectKey {
        type_name: key.type_name(),
    })
}

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_owned(),
    })
}

#[cold]
pub fn not_callable(value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: value.type_name(),
    })
}

/// An error raised on purpose, carrying `value` as its payload.
///
/// String payloads become the message verbatim; anything else is rendered
/// as JSON.
#[cold]
pub fn thrown(value: Value) -> EvalError {
    let message = value.stringify(true);
    EvalError::from_kind(EvalErrorKind::Thrown { message }).with_value(value)
}

// Fatal

#[cold]
pub fn invalid_assignment_path(reason: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidAssignmentPath { reason })
}

#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

#[cold]
pub fn normalization_failed(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Normalization {
        message: message.into(),
    })
}

#[cold]
pub fn fatal(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Internal {
        message: message.into(),
    })
}
