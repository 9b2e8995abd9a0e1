//! Orchestrates the search-to-clone pipeline.
//!
//! The driver pulls pages from a [`SearchPaginator`], hands each discovered
//! repository to a [`ClonePool`] (or prints it in dry-run mode), and stops
//! as soon as either the result set is exhausted or the target count is
//! reached, whichever comes first.

mod budget;
mod config;
mod error;

pub use budget::CollectionBudget;
pub use config::CollectorConfig;
pub use error::CollectorError;

use crate::cloner::{Cloner, GitCloner};
use crate::pool::ClonePool;
use crate::search::{GitHubSearcher, SearchPaginator, Searcher};
use crate::summary::RunSummary;
use octocrab::Octocrab;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Drives one collection run.
///
/// A collector is single-use: [`collect`](Collector::collect) consumes it,
/// because the page cursor and budget carry run-scoped state with no reset.
pub struct Collector<S = GitHubSearcher> {
    config: CollectorConfig,
    paginator: SearchPaginator<S>,
    cloner: Arc<dyn Cloner>,
    budget: CollectionBudget,
}

impl Collector<GitHubSearcher> {
    /// Builds a collector with the production GitHub backend and git cloner.
    ///
    /// # Errors
    ///
    /// Returns a [`CollectorError`] if the GitHub client cannot be built.
    pub fn new(config: CollectorConfig) -> Result<Self, CollectorError> {
        let mut builder = Octocrab::builder();
        if let Some(token) = config.token() {
            builder = builder.personal_token(token.to_string());
        }
        let searcher = GitHubSearcher::new(builder.build()?);

        let cloner = GitCloner::new(
            config.dest().to_path_buf(),
            config.extract().cloned(),
            config.deep(),
            config.ssh(),
        );
        Ok(Self::with_backend(config, searcher, Arc::new(cloner)))
    }
}

impl<S: Searcher> Collector<S> {
    /// Builds a collector with custom search and clone backends.
    pub fn with_backend(config: CollectorConfig, searcher: S, cloner: Arc<dyn Cloner>) -> Self {
        let paginator =
            SearchPaginator::new(searcher, config.query(), config.pages(), config.count());
        let budget = CollectionBudget::new(config.count());
        Self {
            config,
            paginator,
            cloner,
            budget,
        }
    }

    /// Runs the pipeline to completion.
    ///
    /// # Errors
    ///
    /// Returns a [`CollectorError`] on a fatal search failure. Individual
    /// clone failures are logged by the pool and still count as processed.
    pub async fn collect(mut self) -> Result<RunSummary, CollectorError> {
        info!(query = %self.config.query(), "searching GitHub repositories");
        let start = Instant::now();

        let pool = if self.config.dry_run() {
            None
        } else {
            Some(ClonePool::start(
                Arc::clone(&self.cloner),
                self.config.jobs(),
            ))
        };

        let mut total_found = None;

        'pages: while let Some(page) = self.paginator.next_page().await? {
            if total_found.is_none() {
                total_found = Some(page.total);
            }
            if page.incomplete {
                // The backend truncated this page; nothing compensates for
                // it yet, the signal is only surfaced.
                warn!("search backend reported incomplete results");
            }

            for repo in page.items {
                if self.config.dry_run() {
                    if self.config.json() {
                        println!("{}", serde_json::to_string(&repo)?);
                    } else {
                        println!(
                            "dry-run: {}: {}",
                            repo.slug(),
                            repo.description.as_deref().unwrap_or("")
                        );
                    }
                } else if let Some(pool) = &pool {
                    pool.submit(repo).await;
                }

                // Checked per item, not per page, so the target is honored
                // exactly even mid-page.
                let processed = self.budget.record();
                if self.budget.is_exhausted(processed) {
                    break 'pages;
                }
            }
        }

        let processed = self.budget.processed();
        let total_found = total_found.unwrap_or(0);

        if let Some(pool) = pool {
            pool.shutdown().await;
            info!(
                cloned = processed,
                dest = %self.config.dest().display(),
                total_found,
                elapsed_secs = start.elapsed().as_secs_f64(),
                "clone run finished"
            );
        }

        Ok(RunSummary {
            repositories_processed: processed,
            total_found,
            dry_run: self.config.dry_run(),
            elapsed: start.elapsed(),
        })
    }
}
