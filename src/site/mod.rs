//! Site adapter layer
//!
//! This module turns raw page bodies into typed records and knows where the
//! site keeps each kind of page:
//! - `Endpoints` builds profile, history and source URLs
//! - `PageExtractor` is the seam the crawler parses pages through
//! - `CodeChefExtractor` implements it for CodeChef's markup

mod codechef;
mod endpoints;

pub use codechef::CodeChefExtractor;
pub use endpoints::Endpoints;

use crate::model::{Contest, Submission};
use thiserror::Error;

/// Errors raised when a page does not have the expected structure
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Malformed submission row: {0}")]
    MalformedRow(String),

    #[error("Missing element: {0}")]
    MissingElement(String),
}

/// Result type for extraction operations
pub type ExtractResult<T> = Result<T, ExtractError>;

/// One row of a submission-history page
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryRow {
    /// An accepted submission with its ranking data
    Accepted(Submission),

    /// Any other verdict
    Rejected { submission_id: String },

    /// The site's explicit "no recent activity" marker
    NoActivity,
}

/// A parsed submission-history page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryPage {
    pub rows: Vec<HistoryRow>,

    /// Total number of pages, when the site reports it
    pub page_count: Option<u32>,
}

impl HistoryPage {
    pub fn has_no_activity_marker(&self) -> bool {
        self.rows.iter().any(|row| matches!(row, HistoryRow::NoActivity))
    }

    /// Ids of every submission row on the page, in page order
    pub fn submission_ids(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter_map(|row| match row {
                HistoryRow::Accepted(submission) => Some(submission.id.as_str()),
                HistoryRow::Rejected { submission_id } => Some(submission_id.as_str()),
                HistoryRow::NoActivity => None,
            })
            .collect()
    }

    pub fn accepted(&self) -> impl Iterator<Item = &Submission> {
        self.rows.iter().filter_map(|row| match row {
            HistoryRow::Accepted(submission) => Some(submission),
            _ => None,
        })
    }
}

/// Turns raw page bodies into typed records
///
/// Implementations must be pure: the same body always yields the same result.
pub trait PageExtractor: Send + Sync {
    /// Extracts the solved problems, grouped by contest, from a profile page
    fn parse_profile(&self, body: &str) -> ExtractResult<Vec<Contest>>;

    /// Extracts the submission rows of one history page
    fn parse_history(&self, body: &str) -> ExtractResult<HistoryPage>;

    /// Extracts the raw source text from a submission's plain-text page
    fn parse_source(&self, body: &str) -> ExtractResult<String>;
}
