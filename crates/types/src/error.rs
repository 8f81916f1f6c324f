//! Error types recorded by the query coordination engine.

use thiserror::Error;

/// Failure of a single logical query.
///
/// Both variants are handled identically by the engine: they are caught at the
/// request boundary and recorded as the error state when the failing request
/// is still the latest one. Neither is ever propagated to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The fetch function returned an error.
    #[error("fetch failed: {message}")]
    FetchFailure { message: String },

    /// The fetch function resolved without a result set.
    #[error("no results found")]
    EmptyResult,
}

impl QueryError {
    /// Create a fetch failure error.
    pub fn fetch_failure(message: impl Into<String>) -> Self {
        Self::FetchFailure { message: message.into() }
    }
}
