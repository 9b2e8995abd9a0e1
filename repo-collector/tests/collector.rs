use async_trait::async_trait;
use repo_collector::{
    CloneError, Cloner, Collector, CollectorConfig, PageConfig, RepoRef, SearchError, SearchPage,
    Searcher, PAGE_UNLIMITED,
};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Serves a scripted sequence of search responses; a page past the end of
/// the script is empty. Records which pages were requested.
struct ScriptedSearcher {
    responses: Mutex<VecDeque<Result<SearchPage, SearchError>>>,
    requested: Mutex<Vec<u32>>,
}

impl ScriptedSearcher {
    fn new(responses: Vec<Result<SearchPage, SearchError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requested: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Searcher for ScriptedSearcher {
    async fn search(
        &self,
        _query: &str,
        page: u32,
        _per_page: u8,
    ) -> Result<SearchPage, SearchError> {
        self.requested.lock().unwrap().push(page);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(page_of(&[], 0)))
    }
}

/// Records clone attempts; fails on a designated repository name.
struct RecordingCloner {
    seen: Mutex<Vec<String>>,
    fail_on: Option<String>,
}

impl RecordingCloner {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            seen: Mutex::new(Vec::new()),
            fail_on: None,
        })
    }

    fn failing_on(name: &str) -> Arc<Self> {
        Arc::new(Self {
            seen: Mutex::new(Vec::new()),
            fail_on: Some(name.to_string()),
        })
    }

    fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Cloner for RecordingCloner {
    async fn clone_repo(&self, repo: &RepoRef) -> Result<(), CloneError> {
        self.seen.lock().unwrap().push(repo.slug());
        if self.fail_on.as_deref() == Some(repo.name.as_str()) {
            return Err(CloneError::Git {
                slug: repo.slug(),
                stderr: "simulated failure".to_string(),
            });
        }
        Ok(())
    }
}

fn page_of(names: &[&str], total: u64) -> SearchPage {
    SearchPage {
        items: names
            .iter()
            .map(|name| RepoRef {
                owner: "owner".to_string(),
                name: (*name).to_string(),
                description: Some(format!("description of {name}")),
            })
            .collect(),
        total,
        incomplete: false,
    }
}

fn config(count: usize) -> CollectorConfig {
    // Page size 2 so target counts land both mid-page and on boundaries.
    CollectorConfig::new("language:go", PathBuf::from("repos"))
        .with_count(count)
        .with_pages(PageConfig {
            per_page: 2,
            max_page: PAGE_UNLIMITED,
            start_page: 1,
        })
}

#[tokio::test]
async fn unlimited_run_processes_until_empty_page() {
    let searcher = ScriptedSearcher::new(vec![
        Ok(page_of(&["a", "b"], 57)),
        Ok(page_of(&["c", "d"], 57)),
        Ok(page_of(&[], 57)),
    ]);
    let cloner = RecordingCloner::new();
    let collector = Collector::with_backend(config(0), searcher, cloner.clone());

    let summary = collector.collect().await.unwrap();

    assert_eq!(summary.repositories_processed, 4);
    assert_eq!(summary.total_found, 57);
    assert!(!summary.dry_run);
    assert_eq!(
        cloner.seen(),
        ["owner/a", "owner/b", "owner/c", "owner/d"]
    );
}

#[tokio::test]
async fn target_count_stops_mid_page() {
    let searcher = ScriptedSearcher::new(vec![
        Ok(page_of(&["a", "b"], 57)),
        Ok(page_of(&["c", "d"], 57)),
        Ok(page_of(&["e", "f"], 57)),
    ]);
    let cloner = RecordingCloner::new();
    let collector = Collector::with_backend(config(3), searcher, cloner.clone());

    let summary = collector.collect().await.unwrap();

    assert_eq!(summary.repositories_processed, 3);
    // The third item satisfied the target mid-second-page; no third fetch.
    assert_eq!(cloner.seen(), ["owner/a", "owner/b", "owner/c"]);
}

#[tokio::test]
async fn target_count_reached_at_page_boundary_stops_fetching() {
    let searcher = ScriptedSearcher::new(vec![
        Ok(page_of(&["a", "b"], 57)),
        Ok(page_of(&["c", "d"], 57)),
    ]);
    let cloner = RecordingCloner::new();
    let collector = Collector::with_backend(config(2), searcher, cloner.clone());

    let summary = collector.collect().await.unwrap();

    assert_eq!(summary.repositories_processed, 2);
    assert_eq!(cloner.seen(), ["owner/a", "owner/b"]);
}

#[tokio::test(start_paused = true)]
async fn rate_limited_run_matches_unthrottled_outcome() {
    let searcher = ScriptedSearcher::new(vec![
        Err(SearchError::RateLimited),
        Err(SearchError::RateLimited),
        Ok(page_of(&["a", "b"], 57)),
        Ok(page_of(&[], 57)),
    ]);
    let cloner = RecordingCloner::new();
    let collector = Collector::with_backend(config(0), searcher, cloner.clone());

    let summary = collector.collect().await.unwrap();

    assert_eq!(summary.repositories_processed, 2);
    assert_eq!(summary.total_found, 57);
    assert_eq!(cloner.seen(), ["owner/a", "owner/b"]);
}

#[tokio::test]
async fn fatal_search_error_aborts_the_run() {
    let searcher = ScriptedSearcher::new(vec![
        Ok(page_of(&["a"], 57)),
        Err(SearchError::InvalidQuery {
            message: "bad qualifier".to_string(),
        }),
    ]);
    let cloner = RecordingCloner::new();
    let collector = Collector::with_backend(config(0), searcher, cloner.clone());

    // The failure surfaces as the run's terminal error; nothing further is
    // attempted. In-flight work is abandoned, not drained.
    assert!(collector.collect().await.is_err());
}

#[tokio::test]
async fn clone_failure_is_counted_but_not_a_run_error() {
    let searcher = ScriptedSearcher::new(vec![
        Ok(page_of(&["a", "bad", "c"], 57)),
        Ok(page_of(&[], 57)),
    ]);
    let cloner = RecordingCloner::failing_on("bad");
    let collector = Collector::with_backend(config(0), searcher, cloner.clone());

    let summary = collector.collect().await.unwrap();

    assert_eq!(summary.repositories_processed, 3);
    assert_eq!(cloner.seen(), ["owner/a", "owner/bad", "owner/c"]);
}

#[tokio::test]
async fn dry_run_never_clones() {
    let searcher = ScriptedSearcher::new(vec![
        Ok(page_of(&["a", "b"], 57)),
        Ok(page_of(&[], 57)),
    ]);
    let cloner = RecordingCloner::new();
    let collector = Collector::with_backend(
        config(0).with_dry_run(true, false),
        searcher,
        cloner.clone(),
    );

    let summary = collector.collect().await.unwrap();

    assert_eq!(summary.repositories_processed, 2);
    assert!(summary.dry_run);
    assert!(cloner.seen().is_empty());
}

#[tokio::test]
async fn incomplete_pages_are_not_dropped() {
    let truncated = SearchPage {
        incomplete: true,
        ..page_of(&["a", "b"], 57)
    };
    let searcher = ScriptedSearcher::new(vec![Ok(truncated), Ok(page_of(&[], 57))]);
    let cloner = RecordingCloner::new();
    let collector = Collector::with_backend(config(0), searcher, cloner.clone());

    let summary = collector.collect().await.unwrap();

    assert_eq!(summary.repositories_processed, 2);
    assert_eq!(cloner.seen(), ["owner/a", "owner/b"]);
}

#[tokio::test]
async fn total_comes_from_the_first_successful_page() {
    let searcher = ScriptedSearcher::new(vec![
        Ok(page_of(&["a"], 57)),
        Ok(page_of(&["b"], 99)),
        Ok(page_of(&[], 0)),
    ]);
    let cloner = RecordingCloner::new();
    let collector = Collector::with_backend(config(0), searcher, cloner.clone());

    let summary = collector.collect().await.unwrap();

    assert_eq!(summary.total_found, 57);
}
