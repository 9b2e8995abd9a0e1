#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod cloner;
pub mod collector;
pub mod pool;
pub mod rate_limit;
pub mod search;
pub mod summary;

pub use cloner::{CloneError, Cloner, GitCloner};
pub use collector::{CollectionBudget, Collector, CollectorConfig, CollectorError};
pub use pool::ClonePool;
pub use rate_limit::{cooldown, is_rate_limit};
pub use search::{
    GitHubSearcher, PageConfig, RepoRef, SearchError, SearchPage, SearchPaginator, Searcher,
    PAGE_UNLIMITED,
};
pub use summary::RunSummary;
