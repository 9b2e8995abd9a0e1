//! Lazy pagination over repository search results.

use super::{PageConfig, SearchError, SearchPage, Searcher};
use crate::rate_limit;
use tracing::{debug, warn};

/// `max_page` value meaning "derive the page ceiling from the result window".
pub const PAGE_UNLIMITED: u32 = 0;

/// The search backend never serves results beyond this depth.
const MAX_SEARCH_WINDOW: usize = 1000;

/// Maximum page size the backend accepts.
const MAX_PER_PAGE: u8 = 100;

/// Produces a finite, ordered, lazy sequence of [`SearchPage`]s for one query.
///
/// The cursor only advances after a successful non-empty page, so a
/// rate-limited fetch is retried in place and no result is skipped or
/// duplicated. A paginator is single-use: once it reports exhaustion or an
/// error it stays finished.
pub struct SearchPaginator<S> {
    searcher: S,
    query: String,
    page: u32,
    per_page: u8,
    max_page: u32,
    done: bool,
}

impl<S: Searcher> SearchPaginator<S> {
    /// Creates a paginator over `query` with the given pagination settings.
    ///
    /// `target` is the caller's collection target (0 = unlimited); it only
    /// feeds the default `max_page` derivation.
    pub fn new(searcher: S, query: impl Into<String>, pages: PageConfig, target: usize) -> Self {
        let per_page = if pages.per_page == 0 || pages.per_page > MAX_PER_PAGE {
            warn!(
                per_page = pages.per_page,
                max = MAX_PER_PAGE,
                "page size out of range, clamping"
            );
            pages.per_page.clamp(1, MAX_PER_PAGE)
        } else {
            pages.per_page
        };

        let max_page = if pages.max_page == PAGE_UNLIMITED {
            default_max_page(target, per_page)
        } else {
            pages.max_page
        };

        Self {
            searcher,
            query: query.into(),
            page: pages.start_page.max(1),
            per_page,
            max_page,
            done: false,
        }
    }

    /// Fetches the next page of results.
    ///
    /// Returns `Ok(None)` once the result set is exhausted, either because
    /// the backend served an empty page or the page ceiling was passed.
    /// A rate-limit signal is waited out and the same page retried; any
    /// other backend error finishes the paginator and propagates.
    ///
    /// # Errors
    ///
    /// Returns the backend's fatal [`SearchError`]s unchanged.
    pub async fn next_page(&mut self) -> Result<Option<SearchPage>, SearchError> {
        if self.done || self.page > self.max_page {
            self.done = true;
            return Ok(None);
        }

        loop {
            match self.searcher.search(&self.query, self.page, self.per_page).await {
                Ok(page) => {
                    if page.items.is_empty() {
                        debug!(page = self.page, "empty page, result set exhausted");
                        self.done = true;
                        return Ok(None);
                    }
                    self.page += 1;
                    return Ok(Some(page));
                }
                Err(SearchError::RateLimited) => {
                    warn!(page = self.page, "search rate limit exceeded");
                    rate_limit::cooldown().await;
                }
                Err(err) => {
                    self.done = true;
                    return Err(err);
                }
            }
        }
    }
}

/// Smallest number of pages covering either the backend's result window or
/// the caller's target count, whichever is smaller.
fn default_max_page(target: usize, per_page: u8) -> u32 {
    let window = if target > 0 && target < MAX_SEARCH_WINDOW {
        target
    } else {
        MAX_SEARCH_WINDOW
    };
    window.div_ceil(per_page as usize) as u32
}
