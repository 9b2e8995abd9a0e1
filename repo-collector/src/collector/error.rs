//! Collector error types.

/// Errors that abort a collection run.
///
/// Per-item clone failures are not represented here; they are logged by the
/// pool and only count against the attempted total.
#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    /// Fatal search backend errors.
    #[error(transparent)]
    Search(#[from] crate::search::SearchError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    GitHub(#[from] octocrab::Error),

    /// Dry-run JSON serialization errors.
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}
