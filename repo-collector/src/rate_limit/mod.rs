//! Rate limit handling for the GitHub search API.
//!
//! The search API signals throttling with HTTP 403 ("rate limit exceeded"
//! in the message body) or HTTP 429. Both are retryable after a fixed
//! cooldown; the limit window is fixed, so there is no backoff growth.

use std::time::Duration;
use tracing::info;

/// Fixed cooldown before retrying a rate-limited search request.
pub const SEARCH_COOLDOWN: Duration = Duration::from_secs(60);

/// Returns whether an octocrab error is a rate-limit signal.
#[must_use]
pub fn is_rate_limit(error: &octocrab::Error) -> bool {
    if let octocrab::Error::GitHub { source, .. } = error {
        is_rate_limit_response(source.status_code.as_u16(), &source.message)
    } else {
        false
    }
}

/// Rate-limit classification on raw status and message.
fn is_rate_limit_response(status: u16, message: &str) -> bool {
    match status {
        429 => true,
        403 => message.to_ascii_lowercase().contains("rate limit"),
        _ => false,
    }
}

/// Sleeps out the fixed cooldown window.
pub async fn cooldown() {
    info!(
        cooldown_secs = SEARCH_COOLDOWN.as_secs(),
        "waiting for rate limit window"
    );
    tokio::time::sleep(SEARCH_COOLDOWN).await;
}
