//! Run summary.

use std::time::Duration;

/// Outcome of a collection run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Repositories handed to the pool (or recorded in dry-run mode),
    /// including clone attempts that failed.
    pub repositories_processed: usize,

    /// Total result count the backend reported on the first page.
    pub total_found: u64,

    /// Whether this was a dry run.
    pub dry_run: bool,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}
