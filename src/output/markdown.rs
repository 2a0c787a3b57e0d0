//! Markdown summary generation
//!
//! This module writes a human-readable record of a crawl: the counts, one
//! table row per problem, and the reason each skipped problem was skipped.

use crate::output::report::CrawlReport;
use crate::output::traits::OutputResult;
use crate::state::ProblemOutcome;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown summary of a crawl report to a file
///
/// # Arguments
///
/// * `report` - The finished crawl report
/// * `output_path` - Path where the markdown file should be written
pub fn write_markdown_summary(report: &CrawlReport, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(report);

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl report as markdown
pub fn format_markdown_summary(report: &CrawlReport) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Solutions of {}\n\n", report.username));

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Started**: {}\n", report.started_at.to_rfc3339()));
    if let Some(finished) = report.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished.to_rfc3339()));
    }
    if let Some(duration) = report.duration() {
        md.push_str(&format!(
            "- **Duration**: {} seconds\n",
            duration.num_seconds()
        ));
    }
    if report.interrupted {
        md.push_str("- **Status**: interrupted\n");
    }
    md.push('\n');

    // Totals
    md.push_str("## Totals\n\n");
    md.push_str(&format!("- **Discovered**: {}\n", report.discovered()));
    md.push_str(&format!("- **Resolved**: {}\n", report.resolved()));
    md.push_str(&format!("- **Retrieved**: {}\n", report.retrieved()));
    md.push_str(&format!("- **Skipped**: {}\n\n", report.skipped()));

    // Outcome breakdown
    let counts = report.outcome_counts();
    if !counts.is_empty() {
        md.push_str("## Outcome Breakdown\n\n");
        md.push_str("| Outcome | Count |\n");
        md.push_str("|---------|-------|\n");
        for outcome in ProblemOutcome::all_outcomes() {
            if let Some(count) = counts.get(&outcome) {
                md.push_str(&format!("| {} | {} |\n", outcome.describe(), count));
            }
        }
        md.push('\n');
    }

    // Per-problem table
    if !report.records.is_empty() {
        md.push_str("## Problems\n\n");
        md.push_str("| Contest | Problem | Submission | Language | Outcome |\n");
        md.push_str("|---------|---------|------------|----------|---------|\n");
        for record in &report.records {
            let (submission, language) = record
                .solution
                .as_ref()
                .map(|s| (s.submission_id.as_str(), s.language.as_str()))
                .unwrap_or(("-", "-"));
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                escape_cell(&record.contest),
                escape_cell(&record.problem_code),
                escape_cell(submission),
                escape_cell(language),
                record.outcome
            ));
        }
        md.push('\n');
    }

    // Skip reasons
    let skipped: Vec<_> = report.skipped_records().collect();
    if !skipped.is_empty() {
        md.push_str("## Skipped Problems\n\n");
        for record in skipped {
            md.push_str(&format!(
                "- **{}** ({}): {}",
                record.problem_code,
                record.contest,
                record.outcome.describe()
            ));
            if let Some(detail) = &record.detail {
                md.push_str(&format!(" ({})", detail));
            }
            md.push('\n');
        }
        md.push('\n');
    }

    md
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
