//! Error types for selectors and command scripts.

use thiserror::Error;

/// Errors that can occur while building or running a query.
///
/// Both variants are raised synchronously by the call that received the bad
/// input; any selection produced before that call stays valid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A selector was supplied that is not a name → scalar mapping.
    #[error("Invalid selector: {reason}")]
    InvalidSelector { reason: String },
    /// A command named a strategy outside the supported set.
    #[error("Unsupported command type '{kind}', expected one of find, findAll, findInChildren, findAllInChildren")]
    UnsupportedCommand { kind: String },
}

impl QueryError {
    pub(crate) fn invalid_selector(reason: impl Into<String>) -> Self {
        QueryError::InvalidSelector {
            reason: reason.into(),
        }
    }
}

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;
