//! Error type shared by every fallible query operation.
//!
//! All failures are synchronous: an operation either returns its full result
//! or one of these errors, never a partial result.

use crate::key::Key;
use thiserror::Error;

/// Convenience result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;

/// Error returned by query construction, terminal operations and lifted operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// The source could not be wrapped (not an array, or a tuple list whose
    /// elements are not tuples).
    #[error("construction error: {0}")]
    Construction(String),

    /// [`Query::index`](crate::Query::index) saw the same key twice.
    #[error("expecting index on `{column}` to be unique, found key {key} more than once")]
    Uniqueness { column: String, key: Key },

    /// A join found no right-hand rows for a left-hand key.
    #[error("no rows to join on `{column}` = {key}")]
    Lookup { column: String, key: Key },

    /// [`Query::apply`](crate::Query::apply) was given a name that is not registered.
    #[error("unknown operation `{0}`")]
    UnknownOperation(String),

    /// A lifted operation rejected one of its arguments.
    #[error("invalid argument for `{operation}`: {message}")]
    InvalidArgument { operation: String, message: String },
}

impl QueryError {
    pub(crate) fn invalid_argument(operation: &str, message: impl Into<String>) -> Self {
        QueryError::InvalidArgument {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}
