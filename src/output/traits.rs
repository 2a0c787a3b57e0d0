//! Output handler traits and types
//!
//! This module defines the trait interface for persisting downloaded
//! solutions and the errors output code can raise.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Failed to format output: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A downloaded solution, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionFile {
    /// User the crawl ran for; keys the top-level directory
    pub username: String,

    /// Contest heading the problem was listed under, if grouping is used
    pub contest: Option<String>,

    pub problem_code: String,

    /// Source language as reported by the site; picks the file extension
    pub language: String,

    /// Normalised source text
    pub source: String,
}

/// Trait for solution persistence
///
/// A sink decides where a solution goes and writes it. The crawler treats
/// every error as a per-problem failure and carries on.
pub trait SolutionSink: Send + Sync {
    /// Writes a solution and returns the path it was written to
    fn persist(&self, solution: &SolutionFile) -> OutputResult<PathBuf>;
}
