//! Submission ranking
//!
//! Picks the best accepted submission for a problem. The order is, from
//! most to least significant:
//! 1. higher score (a missing score counts as full credit)
//! 2. lower runtime
//! 3. lower memory
//! 4. smaller submission id, so full ties still resolve the same way
//!    whatever order the submissions arrive in

use crate::model::Submission;
use std::cmp::Ordering;

/// Orders two submissions so that the better one compares as `Less`
pub fn compare_submissions(a: &Submission, b: &Submission) -> Ordering {
    b.effective_score()
        .total_cmp(&a.effective_score())
        .then_with(|| a.runtime.total_cmp(&b.runtime))
        .then_with(|| a.memory.total_cmp(&b.memory))
        .then_with(|| compare_ids(&a.id, &b.id))
}

/// Returns the best submission, or `None` for an empty slice
pub fn rank(submissions: &[Submission]) -> Option<&Submission> {
    submissions.iter().min_by(|a, b| compare_submissions(a, b))
}

// Ids are numeric on the site; shorter-first keeps "99" ahead of "100".
fn compare_ids(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
