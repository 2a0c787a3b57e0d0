//! Solved-problem discovery
//!
//! Reads the user's profile page and lists the problems it links to,
//! grouped under the contest headings the page shows.

use crate::crawler::fetcher::{FetchOutcome, Fetcher, Transport};
use crate::model::Contest;
use crate::site::{Endpoints, PageExtractor};

/// Fetches the profile page of `username` and extracts its solved problems
///
/// # Returns
///
/// * `Some(contests)` - The contests in page order, possibly empty
/// * `None` - The profile was denied, unavailable, or unreadable
pub async fn discover<T: Transport, X: PageExtractor>(
    fetcher: &Fetcher<T>,
    endpoints: &Endpoints,
    extractor: &X,
    username: &str,
) -> Option<Vec<Contest>> {
    let url = match endpoints.profile_url(username) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!("Cannot build profile URL for '{}': {}", username, e);
            return None;
        }
    };

    tracing::info!("Fetching profile of {} from {}", username, url);

    let body = match fetcher.fetch(url.as_str()).await {
        FetchOutcome::Page(body) => body,
        outcome => {
            if let Some(failure) = outcome.failure() {
                tracing::error!("Could not read profile of {}: {}", username, failure);
            }
            return None;
        }
    };

    let contests = match extractor.parse_profile(&body) {
        Ok(contests) => contests,
        Err(e) => {
            tracing::error!("Profile page of {} is not readable: {}", username, e);
            return None;
        }
    };

    for contest in &contests {
        tracing::info!(
            "Found contest {} ({} problems)",
            contest.name,
            contest.problems.len()
        );
        for problem in &contest.problems {
            tracing::debug!("  {} -> {}", problem.code, problem.history_path);
        }
    }

    Some(contests)
}
