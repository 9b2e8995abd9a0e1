//! CLI for repo-collector.
//!
//! Searches GitHub repositories with a query and clones every match into a
//! destination directory through a bounded pool of clone workers.

use clap::Parser;
use regex::Regex;
use repo_collector::{Collector, CollectorConfig, CollectorError, PageConfig, RunSummary};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Search GitHub repositories and clone every match.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Repository search query, e.g. "language:rust stars:>500".
    query: String,

    /// Directory to clone repositories into.
    #[arg(long, short, default_value = "repos")]
    dest: PathBuf,

    /// Keep only files whose path matches this regex after checkout.
    #[arg(long, short)]
    extract: Option<Regex>,

    /// Maximum number of repositories to clone (0 = unlimited).
    #[arg(long, short, default_value_t = 0)]
    count: usize,

    /// Report matches without cloning anything.
    #[arg(long)]
    dry_run: bool,

    /// With --dry-run, print one JSON object per match.
    #[arg(long, requires = "dry_run")]
    json: bool,

    /// Fetch full history instead of a shallow clone.
    #[arg(long)]
    deep: bool,

    /// Clone over SSH instead of HTTPS.
    #[arg(long)]
    ssh: bool,

    /// Number of concurrent clone workers.
    #[arg(long, short, default_value_t = 4)]
    jobs: usize,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN")]
    token: Option<String>,

    /// Search results per page (max 100).
    #[arg(long, default_value_t = 100)]
    per_page: u8,

    /// Last search page to fetch (0 = derive from count).
    #[arg(long, default_value_t = 0)]
    max_page: u32,

    /// First search page to fetch.
    #[arg(long, default_value_t = 1)]
    start_page: u32,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "collection failed");
            ExitCode::from(1)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, CollectorError> {
    let config = CollectorConfig::new(args.query, args.dest)
        .with_token(args.token)
        .with_extract(args.extract)
        .with_count(args.count)
        .with_dry_run(args.dry_run, args.json)
        .with_deep(args.deep)
        .with_ssh(args.ssh)
        .with_jobs(args.jobs)
        .with_pages(PageConfig {
            per_page: args.per_page,
            max_page: args.max_page,
            start_page: args.start_page,
        });

    let collector = Collector::new(config)?;
    collector.collect().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!(
        "  Repositories processed: {}",
        summary.repositories_processed
    );
    println!("  Total search results: {}", summary.total_found);
    println!("  Elapsed: {:.1}s", summary.elapsed.as_secs_f64());
}
