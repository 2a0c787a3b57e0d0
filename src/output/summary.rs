//! Console summary of a finished crawl

use crate::output::report::CrawlReport;
use crate::state::ProblemOutcome;

/// Formats a duration in milliseconds as hours, minutes, seconds and milliseconds
pub fn format_elapsed(total_millis: u64) -> String {
    let hours = total_millis / 3_600_000;
    let minutes = (total_millis % 3_600_000) / 60_000;
    let seconds = (total_millis % 60_000) / 1000;
    let millis = total_millis % 1000;
    format!(
        "{} hours, {} minutes, {} seconds, {} milliseconds",
        hours, minutes, seconds, millis
    )
}

/// Prints the report to stdout in a formatted manner
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Summary for {} ===\n", report.username);

    println!("Overview:");
    println!("  Problems discovered: {}", report.discovered());
    println!("  Problems resolved: {}", report.resolved());
    println!("  Solutions retrieved: {}", report.retrieved());
    println!("  Problems skipped: {}", report.skipped());
    println!();

    let counts = report.outcome_counts();
    let skipped_outcomes: Vec<_> = ProblemOutcome::all_outcomes()
        .into_iter()
        .filter(|o| o.is_skipped())
        .filter_map(|o| counts.get(&o).map(|count| (o, *count)))
        .collect();

    if !skipped_outcomes.is_empty() {
        println!("Skipped by Reason:");
        for (outcome, count) in skipped_outcomes {
            println!("  {}: {}", outcome.describe(), count);
        }
        println!();

        println!("Skipped Problems:");
        for record in report.skipped_records() {
            match &record.detail {
                Some(detail) => println!(
                    "  - {} ({}): {} ({})",
                    record.problem_code,
                    record.contest,
                    record.outcome.describe(),
                    detail
                ),
                None => println!(
                    "  - {} ({}): {}",
                    record.problem_code,
                    record.contest,
                    record.outcome.describe()
                ),
            }
        }
        println!();
    }

    if report.interrupted {
        println!("Crawl was interrupted before all problems were processed.");
    }

    if let Some(duration) = report.duration() {
        let millis = duration.num_milliseconds().max(0) as u64;
        println!(
            "Completed fetching all successful submissions in {}.",
            format_elapsed(millis)
        );
    }
}
