//! Run configuration.

use crate::search::PageConfig;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Configuration for one collection run.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Repository search query, in GitHub's query language.
    query: String,
    /// Directory checkouts land in, as `dest/owner/name`.
    dest: PathBuf,
    /// Personal access token; anonymous requests work but are throttled hard.
    token: Option<String>,
    /// Keep only files matching this pattern after checkout.
    extract: Option<Regex>,
    /// Stop after this many repositories (0 = unlimited).
    count: usize,
    /// Report matches without cloning; no worker pool is started.
    dry_run: bool,
    /// Print dry-run matches as JSON lines instead of plain text.
    json: bool,
    /// Full clone instead of the default shallow one.
    deep: bool,
    /// Clone over SSH instead of HTTPS.
    ssh: bool,
    /// Number of concurrent clone workers.
    jobs: usize,
    /// Pagination overrides.
    pages: PageConfig,
}

impl CollectorConfig {
    /// Creates a configuration with defaults matching the CLI's.
    pub fn new(query: impl Into<String>, dest: PathBuf) -> Self {
        Self {
            query: query.into(),
            dest,
            token: None,
            extract: None,
            count: 0,
            dry_run: false,
            json: false,
            deep: false,
            ssh: false,
            jobs: 4,
            pages: PageConfig::default(),
        }
    }

    /// Sets the GitHub token used for API calls.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Sets the post-clone extraction pattern.
    #[must_use]
    pub fn with_extract(mut self, extract: Option<Regex>) -> Self {
        self.extract = extract;
        self
    }

    /// Sets the maximum number of repositories to process (0 = unlimited).
    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Enables dry-run mode, optionally emitting JSON lines.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool, json: bool) -> Self {
        self.dry_run = dry_run;
        self.json = json;
        self
    }

    /// Requests full history instead of a shallow clone.
    #[must_use]
    pub fn with_deep(mut self, deep: bool) -> Self {
        self.deep = deep;
        self
    }

    /// Clones over SSH instead of HTTPS.
    #[must_use]
    pub fn with_ssh(mut self, ssh: bool) -> Self {
        self.ssh = ssh;
        self
    }

    /// Sets the clone worker count.
    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// Overrides pagination settings.
    #[must_use]
    pub fn with_pages(mut self, pages: PageConfig) -> Self {
        self.pages = pages;
        self
    }

    /// Returns the search query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the destination directory.
    pub fn dest(&self) -> &Path {
        &self.dest
    }

    /// Returns the configured token.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the extraction pattern.
    pub fn extract(&self) -> Option<&Regex> {
        self.extract.as_ref()
    }

    /// Returns the target count (0 = unlimited).
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns whether dry-run output is JSON.
    pub fn json(&self) -> bool {
        self.json
    }

    /// Returns whether a full clone was requested.
    pub fn deep(&self) -> bool {
        self.deep
    }

    /// Returns whether SSH transport was requested.
    pub fn ssh(&self) -> bool {
        self.ssh
    }

    /// Returns the clone worker count.
    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// Returns the pagination settings.
    pub fn pages(&self) -> PageConfig {
        self.pages
    }
}
