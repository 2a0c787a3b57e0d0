//! Integration tests for the crawler
//!
//! These tests use wiremock to serve CodeChef-like pages and run the full
//! discover, resolve and download cycle end-to-end.

use chef_harvest::config::{Config, FetchConfig, OutputConfig, SiteConfig};
use chef_harvest::crawler::crawl;
use chef_harvest::output::write_markdown_summary;
use chef_harvest::{Coordinator, ProblemOutcome};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TICK: &str = r#"<img src="/misc/tick-icon.gif" />"#;
const CROSS: &str = r#"<img src="/misc/cross-icon.gif" />"#;

/// Creates a test configuration pointed at the mock server, with no backoff
fn create_test_config(base_url: &str, root_dir: &TempDir) -> Config {
    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
        },
        fetch: FetchConfig {
            max_attempts: 2,
            initial_delay_ms: 0,
            delay_increment_ms: 1,
            ..FetchConfig::default()
        },
        output: OutputConfig {
            root_dir: Some(root_dir.path().display().to_string()),
            summary_path: None,
        },
        ..Config::default()
    }
}

fn profile_page(sections: &[(&str, &[(&str, &str)])]) -> String {
    let mut html = String::from("<html><body><div class=\"profile\">");
    for (contest, problems) in sections {
        html.push_str(&format!("<p><strong>{}:</strong><span>", contest));
        for (code, href) in *problems {
            html.push_str(&format!(r#"<a href="{}">{}</a>, "#, href, code));
        }
        html.push_str("</span></p>");
    }
    html.push_str("</div></body></html>");
    html
}

fn submission_row(id: &str, verdict: &str, time: &str, memory: &str, lang: &str) -> String {
    format!(
        r#"<tr class="kol"><td>{id}</td><td>10:00 AM 01/01/15</td><td>alice</td><td>{verdict}</td><td>{time}</td><td>{memory}</td><td>{lang}</td><td>View</td></tr>"#
    )
}

fn status_page(rows: &[String]) -> String {
    format!(
        r#"<html><body><table class="dataTable"><tr><th>ID</th><th>Date</th><th>User</th><th>Result</th><th>Time</th><th>Mem</th><th>Lang</th><th>Solution</th></tr>{}</table></body></html>"#,
        rows.concat()
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_history(server: &MockServer, route: &str, page: u32, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_saves_best_submissions() {
    let mock_server = MockServer::start().await;
    let root = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &root);

    mount_page(
        &mock_server,
        "/users/alice",
        profile_page(&[
            (
                "Practice(extcontest)",
                &[
                    ("FLOW001", "/status/FLOW001,alice"),
                    ("TEST", "/status/TEST,alice"),
                ],
            ),
            ("JAN15", &[("CHEF", "/JAN15/status/CHEF,alice")]),
        ]),
    )
    .await;

    // FLOW001: two pages, the faster solution is on page 1
    mount_history(
        &mock_server,
        "/status/FLOW001,alice",
        0,
        status_page(&[
            submission_row("101", TICK, "0.50", "14.2M", "C++14"),
            submission_row("102", CROSS, "-", "-", "C++14"),
        ]),
    )
    .await;
    mount_history(
        &mock_server,
        "/status/FLOW001,alice",
        1,
        status_page(&[submission_row("99", TICK, "0.10", "15.0M", "C++14")]),
    )
    .await;
    mount_history(&mock_server, "/status/FLOW001,alice", 2, status_page(&[])).await;

    // TEST: hidden solutions
    mount_history(
        &mock_server,
        "/status/TEST,alice",
        0,
        status_page(&[
            r#"<tr class="kol"><td colspan="8">No Recent Activity</td></tr>"#.to_string(),
        ]),
    )
    .await;

    // CHEF: a full score beats a faster partial score
    mount_history(
        &mock_server,
        "/JAN15/status/CHEF,alice",
        0,
        status_page(&[
            submission_row("201", &format!("{} [35pts]", TICK), "0.01", "2M", "PYTH 3.6"),
            submission_row("202", TICK, "0.90", "9M", "JAVA"),
        ]),
    )
    .await;
    mount_history(&mock_server, "/JAN15/status/CHEF,alice", 1, status_page(&[])).await;

    mount_page(
        &mock_server,
        "/viewplaintext/99",
        "<html><body><pre>#include &lt;cstdio&gt;\r\n\r\nint main() {   \n  return 0;\n}\n\n</pre></body></html>"
            .to_string(),
    )
    .await;
    mount_page(
        &mock_server,
        "/viewplaintext/202",
        "<pre>class Main {\n}\n</pre>".to_string(),
    )
    .await;

    let report = crawl(&config, "alice").await.expect("crawl failed");

    assert_eq!(report.discovered(), 3);
    assert_eq!(report.resolved(), 2);
    assert_eq!(report.retrieved(), 2);
    assert_eq!(report.skipped(), 1);
    assert!(!report.interrupted);

    let codes: Vec<&str> = report
        .records
        .iter()
        .map(|r| r.problem_code.as_str())
        .collect();
    assert_eq!(codes, vec!["FLOW001", "TEST", "CHEF"]);
    assert_eq!(report.records[1].outcome, ProblemOutcome::NotFound);

    let flow = root
        .path()
        .join("alice")
        .join("Practice(extcontest)")
        .join("FLOW001.cpp");
    assert_eq!(
        std::fs::read_to_string(&flow).unwrap(),
        "#include <cstdio>\nint main() {   \n  return 0;\n}\n"
    );

    let chef = root.path().join("alice").join("JAN15").join("CHEF.java");
    assert_eq!(
        std::fs::read_to_string(&chef).unwrap(),
        "class Main {\n}\n"
    );
    assert_eq!(
        report.records[2]
            .solution
            .as_ref()
            .map(|s| s.submission_id.as_str()),
        Some("202")
    );
}

#[tokio::test]
async fn test_private_submission_is_skipped() {
    let mock_server = MockServer::start().await;
    let root = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &root);

    mount_page(
        &mock_server,
        "/users/alice",
        profile_page(&[("Practice", &[("SECRET", "/status/SECRET,alice")])]),
    )
    .await;
    mount_history(
        &mock_server,
        "/status/SECRET,alice",
        0,
        status_page(&[submission_row("7", TICK, "0.00", "1.5M", "C")]),
    )
    .await;
    mount_history(&mock_server, "/status/SECRET,alice", 1, status_page(&[])).await;

    Mock::given(method("GET"))
        .and(path("/viewplaintext/7"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = crawl(&config, "alice").await.unwrap();

    assert_eq!(report.discovered(), 1);
    assert_eq!(report.resolved(), 1);
    assert_eq!(report.retrieved(), 0);
    assert_eq!(report.records[0].outcome, ProblemOutcome::Inaccessible);
    assert!(!root.path().join("alice").join("Practice").exists());
}

#[tokio::test]
async fn test_server_errors_are_retried_then_skipped() {
    let mock_server = MockServer::start().await;
    let root = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &root);

    mount_page(
        &mock_server,
        "/users/alice",
        profile_page(&[("Practice", &[("BUSY", "/status/BUSY,alice")])]),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/status/BUSY,alice"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&mock_server)
        .await;

    let report = crawl(&config, "alice").await.unwrap();

    assert_eq!(report.records[0].outcome, ProblemOutcome::Inaccessible);
    assert_eq!(report.records[0].detail.as_deref(), Some("site unavailable"));
}

#[tokio::test]
async fn test_unknown_user_yields_empty_report() {
    let mock_server = MockServer::start().await;
    let root = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &root);

    Mock::given(method("GET"))
        .and(path("/users/nobody"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let report = crawl(&config, "nobody").await.unwrap();

    assert_eq!(report.discovered(), 0);
    assert_eq!(report.retrieved(), 0);
    assert!(report.finished_at.is_some());
    assert!(!root.path().join("nobody").exists());
}

#[tokio::test]
async fn test_summary_written_after_crawl() {
    let mock_server = MockServer::start().await;
    let root = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &root);

    mount_page(
        &mock_server,
        "/users/alice",
        profile_page(&[("Practice", &[("HIDDEN", "/status/HIDDEN,alice")])]),
    )
    .await;
    mount_history(
        &mock_server,
        "/status/HIDDEN,alice",
        0,
        status_page(&[submission_row("5", CROSS, "-", "-", "C")]),
    )
    .await;
    mount_history(&mock_server, "/status/HIDDEN,alice", 1, status_page(&[])).await;

    let coordinator = Coordinator::from_config(&config).unwrap();
    let report = coordinator.run("alice").await;

    let summary_path = root.path().join("reports").join("summary.md");
    write_markdown_summary(&report, &summary_path).unwrap();

    let content = std::fs::read_to_string(&summary_path).unwrap();
    assert!(content.contains("# Solutions of alice"));
    assert!(content.contains("HIDDEN"));
    assert_eq!(report.count(ProblemOutcome::NotFound), 1);
}
