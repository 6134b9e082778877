//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::arena::NodeId;

/// Domain errors represent caller mistakes at an engine entry point.
///
/// Not-found is never an error: lookups answer with `Option`, an empty
/// sequence or [`PathLookup::NotFound`](crate::domain::PathLookup::NotFound).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("tree input is not a usable forest or root: {0}")]
    Input(String),

    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error("node handle does not belong to this tree: {0:?}")]
    UnknownNode(NodeId),
}

impl DomainError {
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
