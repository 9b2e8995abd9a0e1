//! Search error types.

use thiserror::Error;

/// Errors that can occur while searching repositories.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The search API rate limit was hit. Retryable after a cooldown.
    #[error("search rate limit exceeded")]
    RateLimited,

    /// The backend rejected the query itself. Fatal.
    #[error("invalid search query: {message}")]
    InvalidQuery { message: String },

    /// Any other GitHub API error. Fatal.
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),
}
