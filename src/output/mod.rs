//! Output module for persisting solutions and reporting crawl results
//!
//! This module handles:
//! - Writing downloaded solutions to disk
//! - Choosing file extensions from language names
//! - Normalising source text before it is written
//! - Summarising a crawl on the console and as markdown

mod filesystem;
mod language;
mod markdown;
mod report;
mod source;
pub mod summary;
mod traits;

pub use filesystem::FileSystemSink;
pub use language::extension_for_language;
pub use markdown::{format_markdown_summary, write_markdown_summary};
pub use report::{CrawlReport, ProblemRecord};
pub use source::normalize_source;
pub use summary::{format_elapsed, print_report};
pub use traits::{OutputError, OutputResult, SolutionFile, SolutionSink};
