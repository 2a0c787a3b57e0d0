//! chef-harvest main entry point
//!
//! This is the command-line interface for downloading a user's accepted
//! CodeChef solutions.

use anyhow::{Context, Result};
use chef_harvest::config::{load_config_with_hash, Config};
use chef_harvest::output::{print_report, write_markdown_summary};
use chef_harvest::site::Endpoints;
use chef_harvest::Coordinator;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use tracing_subscriber::EnvFilter;

/// chef-harvest: downloads the best accepted solution of every problem a
/// CodeChef user has solved
///
/// Solutions are written as `<output-dir>/<username>/<contest>/<code><ext>`.
#[derive(Parser, Debug)]
#[command(name = "chef-harvest")]
#[command(version)]
#[command(about = "Downloads a user's accepted CodeChef solutions", long_about = None)]
struct Cli {
    /// CodeChef username whose solutions are downloaded
    #[arg(value_name = "USERNAME")]
    username: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory solutions are written below (overrides output.root-dir)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Write a markdown summary to this file (overrides output.summary-path)
    #[arg(short, long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be requested without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(dir) = &cli.output_dir {
        config.output.root_dir = Some(dir.display().to_string());
    }
    if let Some(summary) = &cli.summary {
        config.output.summary_path = Some(summary.display().to_string());
    }

    if cli.dry_run {
        handle_dry_run(&config, &cli.username)
    } else {
        handle_crawl(&config, &cli.username).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("chef_harvest=info,warn"),
            1 => EnvFilter::new("chef_harvest=debug,info"),
            2 => EnvFilter::new("chef_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration and entry URLs
fn handle_dry_run(config: &Config, username: &str) -> Result<()> {
    let endpoints =
        Endpoints::new(&config.site.base_url).context("site.base-url is not a valid URL")?;

    println!("=== chef-harvest Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Profile: {}", endpoints.profile_url(username)?);
    println!("  Source pages: {}", endpoints.source_url("<submission-id>")?);

    println!("\nFetch:");
    println!("  Max attempts: {}", config.fetch.max_attempts);
    println!("  Initial delay: {}ms", config.fetch.initial_delay_ms);
    println!("  Delay increment: {}ms", config.fetch.delay_increment_ms);
    println!("  Denied statuses: {:?}", config.fetch.denied_statuses);
    println!("  Max history pages: {}", config.resolver.max_pages);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!(
        "  Solutions: {}",
        config.output.resolve_root_dir().join(username).display()
    );
    println!(
        "  Summary: {}",
        config.output.summary_path.as_deref().unwrap_or("(none)")
    );

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, username: &str) -> Result<()> {
    let coordinator = Coordinator::from_config(config).context("failed to set up crawler")?;

    let shutdown = coordinator.shutdown_handle();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::warn!("Interrupt received, finishing the current problem");
                shutdown.store(true, Ordering::SeqCst);
            }
            Err(e) => tracing::error!("Unable to listen for shutdown signal: {}", e),
        }
    });

    tracing::info!(
        "Writing solutions below {}",
        config.output.resolve_root_dir().display()
    );

    let report = coordinator.run(username).await;

    print_report(&report);

    if let Some(path) = config.output.summary_path.as_deref() {
        write_markdown_summary(&report, Path::new(path))
            .with_context(|| format!("failed to write summary to {}", path))?;
        println!("✓ Summary written to: {}", path);
    }

    Ok(())
}
