//! One page of search results.

use super::repository::RepoRef;

/// A single page of repository search results.
///
/// Produced fresh per fetch and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SearchPage {
    /// Matched repositories, in the backend's ranking order.
    pub items: Vec<RepoRef>,

    /// Total number of results the backend reports for the query.
    pub total: u64,

    /// Whether the backend truncated the result set for this page.
    pub incomplete: bool,
}
