//! Error types for the filter evaluator.

use thiserror::Error;

use crate::date::DateError;

/// A specialized Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while resolving filter criteria.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The due-date token is neither a recognized keyword nor a resolvable date.
    #[error("invalid due filter '{token}': {source}")]
    InvalidToken {
        /// The token as supplied by the user.
        token: String,
        /// Why the exact-date fallback rejected it.
        #[source]
        source: DateError,
    },
}

impl FilterError {
    /// Creates an invalid token error.
    pub fn invalid_token(token: impl Into<String>, source: DateError) -> Self {
        FilterError::InvalidToken {
            token: token.into(),
            source,
        }
    }
}
