//! Reflection error types
//!
//! Every operation names itself in the error it returns (`op`), so a failure
//! deep inside a conversion still says which entry point rejected the payload.

use thiserror::Error;

use crate::kind::{Kind, WellKnown};

// ============================================================================
// MAIN ERROR TYPE
// ============================================================================

/// Errors returned by navigation, accessors, enumeration and conversion
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum ReflectError {
    /// The operation is not defined for this kind
    #[error("{op}: unsupported kind {kind}")]
    UnsupportedKind { op: &'static str, kind: Kind },

    /// The payload does not fit the requested numeric width
    #[error("{op}: value overflows {kind}")]
    NumericOverflow { op: &'static str, kind: Kind },

    /// A nil indirection layer was reached where a value is required
    #[error("{op}: value cannot be nil")]
    CannotBeNil { op: &'static str },

    /// Named field or entry does not exist
    #[error("{op}: {thing} does not exist")]
    NotExist { op: &'static str, thing: String },

    /// The handle is read-only
    #[error("{op}: value cannot be set")]
    CannotSet { op: &'static str },

    /// Two kinds were required to be compatible and are not
    #[error("{op}: type {left} is not compatible with {right}")]
    TypeUnequal {
        op: &'static str,
        left: Kind,
        right: Kind,
    },

    /// Index is beyond the fixed capacity
    #[error("{op}: index {index} out of range (len: {len})")]
    OutOfRange {
        op: &'static str,
        index: usize,
        len: usize,
    },

    /// Leaf parser rejected the canonical text
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Conversion nested deeper than the configured maximum
    #[error("{op}: nesting depth exceeds {limit}")]
    LimitExceeded { op: &'static str, limit: usize },
}

/// Failures of the well-known leaf parsers
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum ParseError {
    #[error("invalid duration '{input}': {source}")]
    Duration {
        input: String,
        #[source]
        source: humantime::DurationError,
    },

    #[error("invalid timestamp '{input}': {source}")]
    Timestamp {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid ip address '{input}': {source}")]
    IpAddr {
        input: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("invalid url '{input}': {source}")]
    Url {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid regex '{input}': {source}")]
    Regex {
        input: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid mail address '{input}': {reason}")]
    MailAddress { input: String, reason: &'static str },

    #[error("invalid byte size '{input}': {reason}")]
    ByteSize { input: String, reason: &'static str },
}

impl ParseError {
    /// The well-known type whose parser failed
    pub const fn target(&self) -> WellKnown {
        match self {
            Self::Duration { .. } => WellKnown::Duration,
            Self::Timestamp { .. } => WellKnown::Timestamp,
            Self::IpAddr { .. } => WellKnown::IpAddr,
            Self::Url { .. } => WellKnown::Url,
            Self::Regex { .. } => WellKnown::Regex,
            Self::MailAddress { .. } => WellKnown::MailAddress,
            Self::ByteSize { .. } => WellKnown::ByteSize,
        }
    }

    /// The rejected input text
    pub fn input(&self) -> &str {
        match self {
            Self::Duration { input, .. }
            | Self::Timestamp { input, .. }
            | Self::IpAddr { input, .. }
            | Self::Url { input, .. }
            | Self::Regex { input, .. }
            | Self::MailAddress { input, .. }
            | Self::ByteSize { input, .. } => input,
        }
    }
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ReflectError {
    /// Create an unsupported kind error
    pub const fn unsupported(op: &'static str, kind: Kind) -> Self {
        Self::UnsupportedKind { op, kind }
    }

    /// Create a numeric overflow error
    pub const fn overflow(op: &'static str, kind: Kind) -> Self {
        Self::NumericOverflow { op, kind }
    }

    /// Create a nil error
    pub const fn nil(op: &'static str) -> Self {
        Self::CannotBeNil { op }
    }

    /// Create a not-exist error
    pub fn not_exist(op: &'static str, thing: impl Into<String>) -> Self {
        Self::NotExist {
            op,
            thing: thing.into(),
        }
    }

    /// Create a read-only error
    pub const fn cannot_set(op: &'static str) -> Self {
        Self::CannotSet { op }
    }

    /// Create a type mismatch error
    pub const fn type_unequal(op: &'static str, left: Kind, right: Kind) -> Self {
        Self::TypeUnequal { op, left, right }
    }

    /// Create an out of range error
    pub const fn out_of_range(op: &'static str, index: usize, len: usize) -> Self {
        Self::OutOfRange { op, index, len }
    }

    /// Create a depth limit error
    pub const fn limit_exceeded(op: &'static str, limit: usize) -> Self {
        Self::LimitExceeded { op, limit }
    }
}

// ============================================================================
// ERROR CLASSIFICATION
// ============================================================================

impl ReflectError {
    /// Get error code for monitoring
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedKind { .. } => "REFLECT_UNSUPPORTED_KIND",
            Self::NumericOverflow { .. } => "REFLECT_NUMERIC_OVERFLOW",
            Self::CannotBeNil { .. } => "REFLECT_CANNOT_BE_NIL",
            Self::NotExist { .. } => "REFLECT_NOT_EXIST",
            Self::CannotSet { .. } => "REFLECT_CANNOT_SET",
            Self::TypeUnequal { .. } => "REFLECT_TYPE_UNEQUAL",
            Self::OutOfRange { .. } => "REFLECT_OUT_OF_RANGE",
            Self::Parse(_) => "REFLECT_PARSE_ERROR",
            Self::LimitExceeded { .. } => "REFLECT_LIMIT_EXCEEDED",
        }
    }

    /// Check if this is a client error (caller supplied an incompatible payload)
    ///
    /// `CannotSet` is a programming error on the caller's side of the handle,
    /// not a property of the payload.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::CannotSet { .. })
    }

    /// The operation that failed, when known
    pub fn op(&self) -> Option<&'static str> {
        match self {
            Self::UnsupportedKind { op, .. }
            | Self::NumericOverflow { op, .. }
            | Self::CannotBeNil { op }
            | Self::NotExist { op, .. }
            | Self::CannotSet { op }
            | Self::TypeUnequal { op, .. }
            | Self::OutOfRange { op, .. }
            | Self::LimitExceeded { op, .. } => Some(op),
            Self::Parse(_) => None,
        }
    }
}

// ============================================================================
// RESULT TYPE
// ============================================================================

/// Result type alias for reflection operations
pub type Result<T, E = ReflectError> = std::result::Result<T, E>;
