//! HTML extractor for CodeChef pages
//!
//! This module handles parsing CodeChef markup to extract:
//! - Solved problems from a user's profile page
//! - Submission rows and the page count from a problem's status page
//! - Source text from a submission's plain-text view

use crate::model::{Contest, Problem, Submission};
use crate::site::{ExtractError, ExtractResult, HistoryPage, HistoryRow, PageExtractor};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Text the site shows in place of submissions when a history is hidden or empty
const NO_ACTIVITY_TEXT: &str = "No Recent Activity";

/// Image the verdict cell references for accepted submissions
const ACCEPTED_ICON: &str = "tick-icon";

/// Class carried by submission rows on the status page
const SUBMISSION_ROW_CLASS: &str = "kol";

/// Leading markup that marks a source body as HTML rather than raw text
const HTML_PAGE_PREFIXES: [&str; 3] = ["<!doctype", "<html", "<pre"];

/// Number of cells in a regular submission row
const SUBMISSION_ROW_CELLS: usize = 7;

static SCORE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\s*([0-9]+(?:\.[0-9]+)?)\s*pts\s*\]").expect("score pattern is valid")
});

/// Extractor for CodeChef's profile, status and plain-text pages
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeChefExtractor;

impl CodeChefExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl PageExtractor for CodeChefExtractor {
    /// Each `<p>` holding a `<strong>` heading and problem links is one contest.
    ///
    /// # Example
    ///
    /// ```
    /// use chef_harvest::site::{CodeChefExtractor, PageExtractor};
    ///
    /// let html = r#"<p><strong>Practice:</strong><a href="/status/TEST,bob">TEST</a></p>"#;
    /// let contests = CodeChefExtractor::new().parse_profile(html).unwrap();
    /// assert_eq!(contests[0].name, "Practice");
    /// assert_eq!(contests[0].problems[0].code, "TEST");
    /// ```
    fn parse_profile(&self, body: &str) -> ExtractResult<Vec<Contest>> {
        let document = Html::parse_document(body);
        let paragraph_selector = selector("p")?;
        let heading_selector = selector("strong")?;
        let link_selector = selector("a[href]")?;

        let mut contests = Vec::new();
        for paragraph in document.select(&paragraph_selector) {
            let Some(heading) = paragraph.select(&heading_selector).next() else {
                continue;
            };

            let name = clean_contest_name(&element_text(&heading));
            if name.is_empty() {
                continue;
            }

            let mut contest = Contest::new(name);
            for link in paragraph.select(&link_selector) {
                let code = element_text(&link);
                let href = link.value().attr("href").unwrap_or("").trim();
                if code.is_empty() || href.is_empty() {
                    continue;
                }
                contest.problems.push(Problem {
                    code,
                    history_path: href.to_string(),
                });
            }

            if !contest.problems.is_empty() {
                contests.push(contest);
            }
        }

        Ok(contests)
    }

    fn parse_history(&self, body: &str) -> ExtractResult<HistoryPage> {
        let document = Html::parse_document(body);
        let row_selector = selector("tr")?;
        let cell_selector = selector("td")?;

        let mut rows = Vec::new();
        for row in document.select(&row_selector) {
            if !is_submission_row(&row) {
                continue;
            }

            let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
            if cells.is_empty() {
                continue;
            }

            if cells
                .iter()
                .any(|cell| element_text(cell).contains(NO_ACTIVITY_TEXT))
            {
                rows.push(HistoryRow::NoActivity);
                continue;
            }

            rows.push(parse_submission_row(&cells)?);
        }

        let page_count = parse_page_count(&document)?;

        Ok(HistoryPage { rows, page_count })
    }

    /// A plain-text body is the source itself; an HTML page carries it in
    /// its first `<pre>`.
    fn parse_source(&self, body: &str) -> ExtractResult<String> {
        if !is_html_page(body) {
            return Ok(body.to_string());
        }

        let document = Html::parse_document(body);
        let pre_selector = selector("pre")?;

        document
            .select(&pre_selector)
            .next()
            .map(|pre| pre.text().collect())
            .ok_or_else(|| ExtractError::MissingElement("<pre> holding the source".to_string()))
    }
}

/// The plain-text view is served either as a bare `<pre>` block or as a full
/// HTML page; anything else is raw source.
fn is_html_page(body: &str) -> bool {
    let head = body.trim_start().as_bytes();
    HTML_PAGE_PREFIXES.iter().any(|prefix| {
        head.len() >= prefix.len()
            && head[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
    })
}

/// Compiles a CSS selector, mapping failures into `ExtractError`
fn selector(css: &str) -> ExtractResult<Selector> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css.to_string(),
        message: format!("{:?}", e),
    })
}

/// Collects and trims the text content of an element
fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Strips the trailing colon the profile page puts after contest headings
fn clean_contest_name(raw: &str) -> String {
    raw.trim().trim_end_matches(':').trim().to_string()
}

/// Older status pages escape the class attribute (`class="\"kol\""`), so
/// quotes and backslashes are ignored when matching it.
fn is_submission_row(row: &ElementRef) -> bool {
    row.value()
        .attr("class")
        .map(|class| {
            class
                .split_whitespace()
                .any(|c| c.trim_matches(|ch| ch == '"' || ch == '\\') == SUBMISSION_ROW_CLASS)
        })
        .unwrap_or(false)
}

/// Cell layout: 0 id, 3 verdict, 4 runtime, 5 memory, 6 language
fn parse_submission_row(cells: &[ElementRef]) -> ExtractResult<HistoryRow> {
    if cells.len() < SUBMISSION_ROW_CELLS {
        return Err(ExtractError::MalformedRow(format!(
            "expected {} cells, found {}",
            SUBMISSION_ROW_CELLS,
            cells.len()
        )));
    }

    let submission_id = element_text(&cells[0]);
    if submission_id.is_empty() {
        return Err(ExtractError::MalformedRow(
            "submission id cell is empty".to_string(),
        ));
    }

    let verdict = cells[3].html();
    if !verdict.contains(ACCEPTED_ICON) {
        return Ok(HistoryRow::Rejected { submission_id });
    }

    let score = parse_score(&verdict)?;
    let runtime = parse_measure(&element_text(&cells[4]), "runtime", &submission_id)?;
    let memory = parse_measure(&element_text(&cells[5]), "memory", &submission_id)?;
    let language = element_text(&cells[6]);

    Ok(HistoryRow::Accepted(Submission {
        id: submission_id,
        language,
        score,
        runtime,
        memory,
    }))
}

/// Extracts a partial score such as `[35pts]`; `None` means no annotation
fn parse_score(verdict_html: &str) -> ExtractResult<Option<f64>> {
    let Some(captures) = SCORE_PATTERN.captures(verdict_html) else {
        return Ok(None);
    };

    let raw = captures.get(1).map(|m| m.as_str()).unwrap_or("");
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| ExtractError::MalformedRow(format!("unreadable score '{}'", raw)))
}

/// Parses a runtime or memory cell, dropping a trailing unit such as `M`
fn parse_measure(raw: &str, field: &str, submission_id: &str) -> ExtractResult<f64> {
    let number = raw
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_alphabetic())
        .trim();

    number.parse::<f64>().map_err(|_| {
        ExtractError::MalformedRow(format!(
            "unreadable {} '{}' for submission {}",
            field, raw, submission_id
        ))
    })
}

/// Reads the total from a `div.pageinfo` block of the form `"1 of 3"`
fn parse_page_count(document: &Html) -> ExtractResult<Option<u32>> {
    let info_selector = selector("div.pageinfo")?;

    let Some(info) = document.select(&info_selector).next() else {
        return Ok(None);
    };

    let text = element_text(&info);
    Ok(text
        .split("of")
        .nth(1)
        .and_then(|total| total.trim().parse::<u32>().ok()))
}
