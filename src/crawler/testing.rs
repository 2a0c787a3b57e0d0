//! In-memory collaborators for crawler unit tests

use crate::crawler::fetcher::{RetryPolicy, Transport, TransportError, TransportResponse};
use crate::model::{Contest, Problem, Submission};
use crate::site::{ExtractError, ExtractResult, HistoryPage, HistoryRow, PageExtractor};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Retry policy with no delays, so tests don't need paused time
pub fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        initial_delay: Duration::ZERO,
        delay_increment: Duration::ZERO,
        ..RetryPolicy::default()
    }
}

/// Plays back a fixed sequence of statuses (`Err` = transport failure).
///
/// Successful responses carry the body `"body <n>"` for the n-th call.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<u16, ()>>>,
    call_times: Mutex<Vec<Instant>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Result<u16, ()>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            call_times: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.call_times.lock().unwrap().len()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.call_times.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let call = {
            let mut times = self.call_times.lock().unwrap();
            times.push(Instant::now());
            times.len()
        };

        let next = self.script.lock().unwrap().pop_front().unwrap_or(Ok(500));
        match next {
            Ok(status) => Ok(TransportResponse {
                status,
                body: format!("body {}", call),
            }),
            Err(()) => Err(TransportError::Request {
                url: url.to_string(),
                message: "connection refused".to_string(),
            }),
        }
    }
}

/// Serves fixed responses per URL; anything unrouted is an empty 200 page
#[derive(Default)]
pub struct RoutedTransport {
    routes: HashMap<String, TransportResponse>,
    requested: Mutex<Vec<String>>,
}

impl RoutedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            TransportResponse {
                status: 200,
                body: body.to_string(),
            },
        );
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.routes.insert(
            url.to_string(),
            TransportResponse {
                status,
                body: String::new(),
            },
        );
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requested
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.as_str() == url)
            .count()
    }
}

#[async_trait]
impl Transport for RoutedTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        self.requested.lock().unwrap().push(url.to_string());
        Ok(self
            .routes
            .get(url)
            .cloned()
            .unwrap_or(TransportResponse {
                status: 200,
                body: String::new(),
            }))
    }
}

/// Line-oriented page format, independent of any real site markup
///
/// - profile: one contest per line, `Name: CODE=/path CODE=/path`
/// - history: `A <id> <lang> <score|-> <runtime> <memory>`, `R <id>`, `NOACT`
/// - source: the body itself
///
/// A body of `MALFORMED` fails every parse.
pub struct LineExtractor;

impl PageExtractor for LineExtractor {
    fn parse_profile(&self, body: &str) -> ExtractResult<Vec<Contest>> {
        reject_malformed(body)?;
        let mut contests = Vec::new();
        for line in body.lines().filter(|l| !l.trim().is_empty()) {
            let (name, problems) = line
                .split_once(':')
                .ok_or_else(|| ExtractError::MissingElement(line.to_string()))?;
            let mut contest = Contest::new(name.trim());
            for entry in problems.split_whitespace() {
                let (code, path) = entry
                    .split_once('=')
                    .ok_or_else(|| ExtractError::MissingElement(entry.to_string()))?;
                contest.problems.push(Problem {
                    code: code.to_string(),
                    history_path: path.to_string(),
                });
            }
            contests.push(contest);
        }
        Ok(contests)
    }

    fn parse_history(&self, body: &str) -> ExtractResult<HistoryPage> {
        reject_malformed(body)?;
        let mut rows = Vec::new();
        for line in body.lines().filter(|l| !l.trim().is_empty()) {
            let fields: Vec<&str> = line.split_whitespace().collect();
            let row = match fields.as_slice() {
                ["NOACT"] => HistoryRow::NoActivity,
                ["R", id] => HistoryRow::Rejected {
                    submission_id: id.to_string(),
                },
                ["A", id, language, score, runtime, memory] => HistoryRow::Accepted(Submission {
                    id: id.to_string(),
                    language: language.to_string(),
                    score: if *score == "-" {
                        None
                    } else {
                        Some(number(score)?)
                    },
                    runtime: number(runtime)?,
                    memory: number(memory)?,
                }),
                _ => return Err(ExtractError::MalformedRow(line.to_string())),
            };
            rows.push(row);
        }
        Ok(HistoryPage {
            rows,
            page_count: None,
        })
    }

    fn parse_source(&self, body: &str) -> ExtractResult<String> {
        reject_malformed(body)?;
        Ok(body.to_string())
    }
}

fn reject_malformed(body: &str) -> ExtractResult<()> {
    if body.trim() == "MALFORMED" {
        return Err(ExtractError::MissingElement("expected page layout".to_string()));
    }
    Ok(())
}

fn number(raw: &str) -> ExtractResult<f64> {
    raw.parse()
        .map_err(|_| ExtractError::MalformedRow(format!("bad number '{}'", raw)))
}
