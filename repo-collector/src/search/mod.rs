//! Repository search against the GitHub Search API.
//!
//! The [`Searcher`] trait is the boundary to the search backend; the
//! production implementation is [`GitHubSearcher`] on top of octocrab.
//! [`SearchPaginator`] drives it page by page.

mod error;
mod page;
mod paginator;
mod repository;

pub use error::SearchError;
pub use page::SearchPage;
pub use paginator::{SearchPaginator, PAGE_UNLIMITED};
pub use repository::RepoRef;

use crate::rate_limit;
use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::debug;

/// Pagination overrides for one collection run.
///
/// `max_page` set to [`PAGE_UNLIMITED`] derives the page ceiling from the
/// backend's 1000-result window and the caller's target count.
#[derive(Debug, Clone, Copy)]
pub struct PageConfig {
    /// Results per page, capped at the backend's maximum of 100.
    pub per_page: u8,
    /// Last page to fetch (inclusive). 0 derives a default.
    pub max_page: u32,
    /// First page to fetch. GitHub pages are 1-based.
    pub start_page: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            per_page: 100,
            max_page: PAGE_UNLIMITED,
            start_page: 1,
        }
    }
}

/// One-shot repository search backend.
#[async_trait]
pub trait Searcher: Send + Sync {
    /// Fetches one page of repositories matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::RateLimited`] when the backend throttled the
    /// request; any other error is fatal to the run.
    async fn search(&self, query: &str, page: u32, per_page: u8)
        -> Result<SearchPage, SearchError>;
}

/// GitHub repository search backed by an [`Octocrab`] client.
pub struct GitHubSearcher {
    octocrab: Octocrab,
}

impl GitHubSearcher {
    /// Wraps an existing client.
    #[must_use]
    pub fn new(octocrab: Octocrab) -> Self {
        Self { octocrab }
    }
}

#[async_trait]
impl Searcher for GitHubSearcher {
    async fn search(
        &self,
        query: &str,
        page: u32,
        per_page: u8,
    ) -> Result<SearchPage, SearchError> {
        debug!(query, page, per_page, "executing repository search");

        let result = self
            .octocrab
            .search()
            .repositories(query)
            .per_page(per_page)
            .page(page)
            .send()
            .await
            .map_err(map_search_error)?;

        let items = result
            .items
            .iter()
            .filter_map(|repo| {
                let owner = repo.owner.as_ref()?.login.clone();
                Some(RepoRef {
                    owner,
                    name: repo.name.clone(),
                    description: repo.description.clone(),
                })
            })
            .collect();

        Ok(SearchPage {
            items,
            total: result.total_count.unwrap_or(0),
            incomplete: result.incomplete_results.unwrap_or(false),
        })
    }
}

/// Classifies an octocrab error into the search error taxonomy.
fn map_search_error(err: octocrab::Error) -> SearchError {
    if rate_limit::is_rate_limit(&err) {
        return SearchError::RateLimited;
    }
    if let octocrab::Error::GitHub { source, .. } = &err {
        // 422 means the query itself was rejected (syntax, bad qualifier).
        if source.status_code.as_u16() == 422 {
            return SearchError::InvalidQuery {
                message: source.message.clone(),
            };
        }
    }
    SearchError::Api(err)
}
