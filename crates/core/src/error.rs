//! Domain error model.

use thiserror::Error;

use crate::schema::AttrType;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures (malformed records, rejected
/// literals, coercion). Snapshot I/O belongs to the storage layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// The type name is not in the model registry.
    #[error("unknown model type: {0}")]
    UnknownType(String),

    /// A timestamp field could not be parsed.
    #[error("invalid timestamp for {field}: {value}")]
    InvalidTimestamp { field: String, value: String },

    /// A serialized record was structurally wrong (e.g. missing discriminator).
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// A literal could not be parsed by the restricted literal parser.
    #[error("invalid literal at offset {offset}: {reason}")]
    InvalidLiteral { offset: usize, reason: String },

    /// Identity and timestamp fields cannot be written as attributes.
    #[error("attribute {0} is read-only")]
    ReadOnlyAttribute(String),

    /// A value could not be converted to the declared attribute type.
    #[error("invalid value for {attribute}: expected {expected}")]
    Coercion { attribute: String, expected: AttrType },
}

impl DomainError {
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType(name.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRecord(msg.into())
    }

    pub fn invalid_literal(offset: usize, reason: impl Into<String>) -> Self {
        Self::InvalidLiteral {
            offset,
            reason: reason.into(),
        }
    }

    pub fn coercion(attribute: impl Into<String>, expected: AttrType) -> Self {
        Self::Coercion {
            attribute: attribute.into(),
            expected,
        }
    }
}
