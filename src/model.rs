//! Core data model shared by the crawler, the site extractor and the output layer

/// Score assumed for an accepted submission that carries no partial-score annotation
pub const MAX_SCORE: f64 = 100.0;

/// A problem the user has solved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    /// Display identifier, also used to name the output file
    pub code: String,

    /// Relative path (or absolute URL) of the problem's submission history
    pub history_path: String,
}

/// A named group of problems discovered under one heading of the profile page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contest {
    pub name: String,
    pub problems: Vec<Problem>,
}

impl Contest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            problems: Vec::new(),
        }
    }
}

/// One accepted attempt at a problem
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// Opaque identifier used to fetch the submission source
    pub id: String,

    /// Source language as reported by the site
    pub language: String,

    /// Partial score, if the site annotated one
    pub score: Option<f64>,

    /// Execution time in seconds
    pub runtime: f64,

    /// Peak memory in megabytes
    pub memory: f64,
}

impl Submission {
    /// Score used for ranking; a missing score means full credit
    pub fn effective_score(&self) -> f64 {
        self.score.unwrap_or(MAX_SCORE)
    }

    pub fn to_resolved(&self) -> ResolvedSolution {
        ResolvedSolution {
            submission_id: self.id.clone(),
            language: self.language.clone(),
        }
    }
}

/// The submission picked for a problem, carried into the retrieval phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSolution {
    pub submission_id: String,
    pub language: String,
}
