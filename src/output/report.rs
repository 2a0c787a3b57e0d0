//! Crawl report types
//!
//! A `CrawlReport` holds one `ProblemRecord` per discovered problem, in
//! discovery order, and derives every count from those records.

use crate::model::ResolvedSolution;
use crate::state::ProblemOutcome;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::PathBuf;

/// Final result for one discovered problem
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemRecord {
    pub contest: String,
    pub problem_code: String,

    /// The submission picked by the resolver, if resolution succeeded
    pub solution: Option<ResolvedSolution>,

    pub outcome: ProblemOutcome,

    /// Extra context for failures (fetch failure kind, parse error, IO error)
    pub detail: Option<String>,

    /// Where the source was written, for saved problems
    pub path: Option<PathBuf>,
}

impl ProblemRecord {
    pub fn new(
        contest: impl Into<String>,
        problem_code: impl Into<String>,
        outcome: ProblemOutcome,
    ) -> Self {
        Self {
            contest: contest.into(),
            problem_code: problem_code.into(),
            solution: None,
            outcome,
            detail: None,
            path: None,
        }
    }

    pub fn with_solution(mut self, solution: ResolvedSolution) -> Self {
        self.solution = Some(solution);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }
}

/// Summary of one crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub username: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// True if the run was stopped before every problem was processed
    pub interrupted: bool,

    /// One record per discovered problem, in discovery order
    pub records: Vec<ProblemRecord>,
}

impl CrawlReport {
    /// Creates a new empty report, stamped with the current time
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            started_at: Utc::now(),
            finished_at: None,
            interrupted: false,
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: ProblemRecord) {
        self.records.push(record);
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Number of problems found on the profile page
    pub fn discovered(&self) -> usize {
        self.records.len()
    }

    /// Number of problems for which a best submission was picked
    pub fn resolved(&self) -> usize {
        self.records.iter().filter(|r| r.solution.is_some()).count()
    }

    /// Number of problems whose source was written
    pub fn retrieved(&self) -> usize {
        self.count(ProblemOutcome::Saved)
    }

    /// Number of problems that did not end up on disk
    pub fn skipped(&self) -> usize {
        self.discovered() - self.retrieved()
    }

    pub fn count(&self, outcome: ProblemOutcome) -> usize {
        self.records.iter().filter(|r| r.outcome == outcome).count()
    }

    /// Count of records per outcome, omitting outcomes that never occurred
    pub fn outcome_counts(&self) -> HashMap<ProblemOutcome, usize> {
        let mut counts = HashMap::new();
        for record in &self.records {
            *counts.entry(record.outcome).or_insert(0) += 1;
        }
        counts
    }

    pub fn skipped_records(&self) -> impl Iterator<Item = &ProblemRecord> {
        self.records.iter().filter(|r| r.outcome.is_skipped())
    }

    /// Wall-clock duration, once the report is finished
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|finished| finished - self.started_at)
    }
}
