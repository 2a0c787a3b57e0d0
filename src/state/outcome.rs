/// Per-problem outcome definitions for tracking crawl progress
///
/// Every discovered problem ends a crawl in exactly one of these states.
use std::fmt;

/// Represents the final state of one problem after a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProblemOutcome {
    // ===== Success =====
    /// The best accepted submission was fetched and written to disk
    Saved,

    // ===== Skips =====
    /// No accepted submission exists, or the site reports no recent activity
    NotFound,

    /// The site denied access (private contest) or stayed unavailable while
    /// resolving the problem
    Inaccessible,

    /// A submission was resolved but its source could not be fetched
    Unretrievable,

    /// A page for this problem did not have the expected structure
    Malformed,

    /// The source was fetched but could not be written
    WriteFailed,

    /// The crawl was interrupted before this problem was finished
    Cancelled,
}

impl ProblemOutcome {
    /// Returns true if the problem's source ended up on disk
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Saved)
    }

    /// Returns true if the problem was skipped for any reason
    pub fn is_skipped(&self) -> bool {
        !self.is_success()
    }

    /// Returns true if the skip was caused by a network or access failure
    pub fn is_network_failure(&self) -> bool {
        matches!(self, Self::Inaccessible | Self::Unretrievable)
    }

    /// Short machine-friendly label, used in logs and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::NotFound => "not_found",
            Self::Inaccessible => "inaccessible",
            Self::Unretrievable => "unretrievable",
            Self::Malformed => "malformed",
            Self::WriteFailed => "write_failed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Human-readable explanation of the outcome
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Saved => "solution saved",
            Self::NotFound => "no accepted submission found",
            Self::Inaccessible => "inaccessible (private contest or site unavailable)",
            Self::Unretrievable => "submission source could not be fetched",
            Self::Malformed => "page structure not recognised",
            Self::WriteFailed => "failed to write solution file",
            Self::Cancelled => "crawl interrupted",
        }
    }

    /// Returns all possible outcomes, in report order
    pub fn all_outcomes() -> Vec<Self> {
        vec![
            Self::Saved,
            Self::NotFound,
            Self::Inaccessible,
            Self::Unretrievable,
            Self::Malformed,
            Self::WriteFailed,
            Self::Cancelled,
        ]
    }
}

impl fmt::Display for ProblemOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
