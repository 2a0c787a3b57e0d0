//! Crawler coordinator - main crawl orchestration logic
//!
//! A crawl runs in three phases, strictly one request at a time:
//! 1. Discovery: read the profile page and list solved problems
//! 2. Resolution: pick the best accepted submission for every problem
//! 3. Retrieval: download each picked submission and hand it to the sink
//!
//! Every discovered problem ends up with exactly one `ProblemRecord`, in
//! discovery order. No per-problem failure stops the crawl.

use crate::config::{validate, Config};
use crate::crawler::discovery::discover;
use crate::crawler::fetcher::{
    build_http_client, FetchFailure, FetchOutcome, Fetcher, HttpTransport, RetryPolicy, Transport,
};
use crate::crawler::resolver::{ProblemResolver, Resolution};
use crate::model::{Problem, ResolvedSolution};
use crate::output::{
    normalize_source, CrawlReport, FileSystemSink, ProblemRecord, SolutionFile, SolutionSink,
};
use crate::site::{CodeChefExtractor, Endpoints, PageExtractor};
use crate::state::ProblemOutcome;
use crate::HarvestError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A problem between resolution and retrieval
enum Pending {
    /// Finished during resolution; nothing left to fetch
    Done(ProblemRecord),

    /// Waiting for its source to be downloaded
    Resolved {
        contest: String,
        problem_code: String,
        solution: ResolvedSolution,
    },
}

/// Main crawler coordinator structure
pub struct Coordinator<T, X, S> {
    fetcher: Fetcher<T>,
    endpoints: Endpoints,
    extractor: X,
    sink: S,
    max_pages: u32,
    shutdown: Arc<AtomicBool>,
}

impl Coordinator<HttpTransport, CodeChefExtractor, FileSystemSink> {
    /// Creates a coordinator that crawls the configured site over HTTP and
    /// writes below the configured output root
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(HarvestError)` - The configuration is invalid, or the HTTP
    ///   client or base URL could not be built
    pub fn from_config(config: &Config) -> Result<Self, HarvestError> {
        // Configs built in code never went through `load_config`
        validate(config)?;

        let client = build_http_client(&config.user_agent, &config.fetch)?;
        let fetcher = Fetcher::new(
            HttpTransport::new(client),
            RetryPolicy::from_config(&config.fetch),
        );
        let endpoints = Endpoints::new(&config.site.base_url)?;
        let sink = FileSystemSink::new(config.output.resolve_root_dir());

        Ok(Self::new(
            fetcher,
            endpoints,
            CodeChefExtractor::new(),
            sink,
            config.resolver.max_pages,
        ))
    }
}

impl<T: Transport, X: PageExtractor, S: SolutionSink> Coordinator<T, X, S> {
    pub fn new(
        fetcher: Fetcher<T>,
        endpoints: Endpoints,
        extractor: X,
        sink: S,
        max_pages: u32,
    ) -> Self {
        Self {
            fetcher,
            endpoints,
            extractor,
            sink,
            max_pages,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Replaces the shutdown flag with one shared with the caller
    pub fn with_shutdown(mut self, shutdown: Arc<AtomicBool>) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Flag that, once set, stops the crawl at the next problem boundary
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Runs a complete crawl for one user
    ///
    /// Never fails: an unreadable profile yields an empty report, and every
    /// per-problem failure is recorded in the report instead.
    pub async fn run(&self, username: &str) -> CrawlReport {
        let mut report = CrawlReport::new(username);
        tracing::info!("Starting crawl for {}", username);

        if self.shutdown_requested() {
            tracing::warn!("Shutdown requested before discovery, nothing to do");
            report.interrupted = true;
            report.finish();
            return report;
        }

        let contests =
            match discover(&self.fetcher, &self.endpoints, &self.extractor, username).await {
                Some(contests) => contests,
                None => {
                    tracing::warn!("No problems discovered for {}", username);
                    report.finish();
                    return report;
                }
            };

        let problems: Vec<(String, Problem)> = contests
            .into_iter()
            .flat_map(|contest| {
                let name = contest.name;
                contest
                    .problems
                    .into_iter()
                    .map(move |problem| (name.clone(), problem))
            })
            .collect();
        tracing::info!("Discovered {} problems", problems.len());

        let pending = self.resolve_all(&problems).await;

        for item in pending {
            let record = match item {
                Pending::Done(record) => record,
                Pending::Resolved {
                    contest,
                    problem_code,
                    solution,
                } => {
                    if self.shutdown_requested() {
                        ProblemRecord::new(contest, problem_code, ProblemOutcome::Cancelled)
                            .with_solution(solution)
                    } else {
                        self.retrieve(username, contest, problem_code, solution)
                            .await
                    }
                }
            };

            if record.outcome == ProblemOutcome::Cancelled {
                report.interrupted = true;
            }
            report.push(record);
        }

        report.finish();
        tracing::info!(
            "Crawl finished: {} discovered, {} resolved, {} retrieved, {} skipped",
            report.discovered(),
            report.resolved(),
            report.retrieved(),
            report.skipped()
        );
        if report.interrupted {
            tracing::warn!("Crawl was interrupted; unfinished problems are marked cancelled");
        }

        report
    }

    async fn resolve_all(&self, problems: &[(String, Problem)]) -> Vec<Pending> {
        let resolver = ProblemResolver::new(
            &self.fetcher,
            &self.endpoints,
            &self.extractor,
            self.max_pages,
        );

        let mut pending = Vec::with_capacity(problems.len());
        for (contest, problem) in problems {
            if self.shutdown_requested() {
                pending.push(Pending::Done(ProblemRecord::new(
                    contest.as_str(),
                    problem.code.as_str(),
                    ProblemOutcome::Cancelled,
                )));
                continue;
            }

            let item = match resolver.resolve(problem).await {
                Resolution::Resolved(solution) => Pending::Resolved {
                    contest: contest.clone(),
                    problem_code: problem.code.clone(),
                    solution,
                },
                Resolution::NotFound => Pending::Done(ProblemRecord::new(
                    contest.as_str(),
                    problem.code.as_str(),
                    ProblemOutcome::NotFound,
                )),
                Resolution::Inaccessible(failure) => {
                    tracing::warn!("{}: history is not accessible ({})", problem.code, failure);
                    Pending::Done(
                        ProblemRecord::new(
                            contest.as_str(),
                            problem.code.as_str(),
                            ProblemOutcome::Inaccessible,
                        )
                        .with_detail(failure.to_string()),
                    )
                }
                Resolution::Malformed(message) => {
                    tracing::warn!("{}: unreadable history page: {}", problem.code, message);
                    Pending::Done(
                        ProblemRecord::new(
                            contest.as_str(),
                            problem.code.as_str(),
                            ProblemOutcome::Malformed,
                        )
                        .with_detail(message),
                    )
                }
            };
            pending.push(item);
        }
        pending
    }

    /// Downloads one resolved submission and persists it
    async fn retrieve(
        &self,
        username: &str,
        contest: String,
        problem_code: String,
        solution: ResolvedSolution,
    ) -> ProblemRecord {
        let finished = |outcome: ProblemOutcome| {
            ProblemRecord::new(contest.as_str(), problem_code.as_str(), outcome)
                .with_solution(solution.clone())
        };

        let url = match self.endpoints.source_url(&solution.submission_id) {
            Ok(url) => url,
            Err(e) => {
                return finished(ProblemOutcome::Malformed)
                    .with_detail(format!("invalid submission id: {}", e))
            }
        };

        tracing::info!(
            "Downloading {} (submission {})",
            problem_code,
            solution.submission_id
        );

        let body = match self.fetcher.fetch(url.as_str()).await {
            FetchOutcome::Page(body) => body,
            FetchOutcome::Denied => {
                tracing::warn!("{}: source is private, skipping", problem_code);
                return finished(ProblemOutcome::Inaccessible)
                    .with_detail(FetchFailure::Denied.to_string());
            }
            FetchOutcome::Unavailable => {
                tracing::warn!("{}: source could not be downloaded", problem_code);
                return finished(ProblemOutcome::Unretrievable)
                    .with_detail(FetchFailure::Unavailable.to_string());
            }
        };

        let raw = match self.extractor.parse_source(&body) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("{}: unreadable source page: {}", problem_code, e);
                return finished(ProblemOutcome::Malformed).with_detail(e.to_string());
            }
        };

        let file = SolutionFile {
            username: username.to_string(),
            contest: Some(contest.clone()),
            problem_code: problem_code.clone(),
            language: solution.language.clone(),
            source: normalize_source(&raw),
        };

        match self.sink.persist(&file) {
            Ok(path) => {
                tracing::info!("Saved {} to {}", problem_code, path.display());
                finished(ProblemOutcome::Saved).with_path(path)
            }
            Err(e) => {
                tracing::error!("{}: {}", problem_code, e);
                finished(ProblemOutcome::WriteFailed).with_detail(e.to_string())
            }
        }
    }
}
