//! Problem resolver
//!
//! Walks a problem's paginated submission history and reduces it to the
//! single best accepted submission.
//!
//! # Pagination
//!
//! Pages are scanned from index 0 until one of:
//! - a page shows the "no recent activity" marker → `NotFound`, no ranking
//! - a page has no submission rows
//! - a page repeats the previous page's submissions (the site serves its
//!   last page again for out-of-range indices)
//! - the configured page cap is reached
//!
//! A page count reported by the site is only logged; the walk never relies
//! on it.

use crate::crawler::fetcher::{FetchFailure, FetchOutcome, Fetcher, Transport};
use crate::crawler::ranker::rank;
use crate::model::{Problem, ResolvedSolution, Submission};
use crate::site::{Endpoints, PageExtractor};

/// Default upper bound on history pages scanned per problem
pub const DEFAULT_MAX_PAGES: u32 = 100;

/// Result of resolving one problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The best accepted submission
    Resolved(ResolvedSolution),

    /// Nothing accepted, or the site reports no activity
    NotFound,

    /// A history page was denied or stayed unavailable
    Inaccessible(FetchFailure),

    /// A history page could not be understood
    Malformed(String),
}

/// Resolves problems against one site, borrowing the crawl's collaborators
pub struct ProblemResolver<'a, T, X> {
    fetcher: &'a Fetcher<T>,
    endpoints: &'a Endpoints,
    extractor: &'a X,
    max_pages: u32,
}

impl<'a, T: Transport, X: PageExtractor> ProblemResolver<'a, T, X> {
    pub fn new(
        fetcher: &'a Fetcher<T>,
        endpoints: &'a Endpoints,
        extractor: &'a X,
        max_pages: u32,
    ) -> Self {
        Self {
            fetcher,
            endpoints,
            extractor,
            max_pages,
        }
    }

    pub async fn resolve(&self, problem: &Problem) -> Resolution {
        tracing::info!("Finding best submission for {}", problem.code);

        let mut candidates: Vec<Submission> = Vec::new();
        let mut previous_ids: Vec<String> = Vec::new();
        let mut page = 0;

        loop {
            if page >= self.max_pages {
                tracing::warn!(
                    "{}: stopped after {} history pages",
                    problem.code,
                    self.max_pages
                );
                break;
            }

            let url = match self.endpoints.history_url(&problem.history_path, page) {
                Ok(url) => url,
                Err(e) => {
                    return Resolution::Malformed(format!(
                        "invalid history path '{}': {}",
                        problem.history_path, e
                    ))
                }
            };

            let body = match self.fetcher.fetch(url.as_str()).await {
                FetchOutcome::Page(body) => body,
                FetchOutcome::Denied => return Resolution::Inaccessible(FetchFailure::Denied),
                FetchOutcome::Unavailable => {
                    return Resolution::Inaccessible(FetchFailure::Unavailable)
                }
            };

            let history = match self.extractor.parse_history(&body) {
                Ok(history) => history,
                Err(e) => return Resolution::Malformed(e.to_string()),
            };

            if page == 0 {
                if let Some(count) = history.page_count {
                    tracing::debug!("{}: site reports {} history pages", problem.code, count);
                }
            }

            if history.has_no_activity_marker() {
                tracing::info!(
                    "{}: hidden solution or no recent activity, skipping",
                    problem.code
                );
                return Resolution::NotFound;
            }

            let ids: Vec<String> = history
                .submission_ids()
                .into_iter()
                .map(str::to_string)
                .collect();

            if ids.is_empty() {
                tracing::debug!("{}: page {} is empty, history ends", problem.code, page);
                break;
            }

            if ids == previous_ids {
                tracing::debug!(
                    "{}: page {} repeats page {}, history ends",
                    problem.code,
                    page,
                    page - 1
                );
                break;
            }

            let before = candidates.len();
            candidates.extend(history.accepted().cloned());
            tracing::debug!(
                "{}: page {} has {} accepted of {} submissions",
                problem.code,
                page,
                candidates.len() - before,
                ids.len()
            );

            previous_ids = ids;
            page += 1;
        }

        match rank(&candidates) {
            Some(best) => {
                tracing::info!(
                    "{}: picked submission {} ({}) from {} accepted",
                    problem.code,
                    best.id,
                    best.language,
                    candidates.len()
                );
                Resolution::Resolved(best.to_resolved())
            }
            None => {
                tracing::info!("{}: no accepted submission found", problem.code);
                Resolution::NotFound
            }
        }
    }
}
