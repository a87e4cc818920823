//! Console error model.
//!
//! Every variant renders as the exact line the operator sees; the loop
//! prints it and reads the next line.

use thiserror::Error;

use hbnb_core::DomainError;
use hbnb_infra::StorageError;

/// Shell-style splitting failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("no closing quotation")]
    UnterminatedQuote { offset: usize },
}

/// A rejected command line.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("** class name missing **")]
    ClassNameMissing,

    #[error("** class doesn't exist **")]
    ClassDoesNotExist,

    #[error("** instance id missing **")]
    InstanceIdMissing,

    #[error("** no instance found **")]
    NoInstanceFound,

    #[error("** attribute name missing **")]
    AttributeNameMissing,

    #[error("** value missing **")]
    ValueMissing,

    #[error("** {0} **")]
    Tokenize(#[from] TokenizeError),

    /// Literal, coercion, or read-only attribute rejection.
    #[error("** {0} **")]
    Rejected(#[from] DomainError),

    /// The snapshot write failed; the identity map was rolled back.
    #[error("** failed to save: {0} **")]
    SaveFailed(#[source] StorageError),

    #[error("** {0} **")]
    Storage(#[source] StorageError),

    #[error("*** Unknown syntax: {0}")]
    UnknownSyntax(String),
}
