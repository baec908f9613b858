//! Site-Corpus main entry point
//!
//! This is the command-line interface for the Site-Corpus crawler.

use anyhow::Context;
use clap::Parser;
use site_corpus::config::{load_config_with_hash, validate, Config};
use site_corpus::crawler::{build_fetcher, Coordinator, CrawlSettings, RenderMode};
use site_corpus::output::{print_statistics, write_document, CrawlStatistics};
use std::future::Future;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Site-Corpus: a breadth-first site crawler for retrieval corpora
///
/// Site-Corpus crawls each seed's site breadth-first up to a maximum depth,
/// never leaving the origin of the page a link was found on, and writes the
/// readable text of every visited page into one Markdown document.
#[derive(Parser, Debug)]
#[command(name = "site-corpus")]
#[command(version = "1.0.0")]
#[command(about = "Crawl sites into a single Markdown corpus", long_about = None)]
struct Cli {
    /// Seed URLs to start crawling from
    #[arg(value_name = "SEEDS")]
    seeds: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum link depth from the seeds (inclusive)
    #[arg(short = 'd', long, value_name = "N")]
    max_depth: Option<u32>,

    /// Render pages in a headless browser instead of fetching them directly
    #[arg(long)]
    render: bool,

    /// WebDriver endpoint used when rendering
    #[arg(long, value_name = "URL")]
    webdriver_url: Option<String>,

    /// Path of the Markdown document to write
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {:#}", e);
            return Err(e);
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_corpus=info,warn"),
            1 => EnvFilter::new("site_corpus=debug,info"),
            2 => EnvFilter::new("site_corpus=trace,debug"),
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

/// Loads the config file if one was given, then applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if !cli.seeds.is_empty() {
        config.crawler.seeds = cli.seeds.clone();
    }
    if let Some(depth) = cli.max_depth {
        config.crawler.max_depth = depth;
    }
    if cli.render {
        config.crawler.render = true;
    }
    if let Some(url) = &cli.webdriver_url {
        config.fetcher.webdriver_url = url.clone();
    }
    if let Some(path) = &cli.output {
        config.output.document_path = path.display().to_string();
    }

    validate(&config)?;
    Ok(config)
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Site-Corpus Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Mode: {}", RenderMode::from(config.crawler.render));

    println!("\nFetcher:");
    println!("  Request timeout: {}s", config.fetcher.request_timeout_secs);
    println!("  Render timeout: {}s", config.fetcher.render_timeout_secs);
    println!("  WebDriver: {}", config.fetcher.webdriver_url);
    println!("  User agent: {}", config.fetcher.user_agent);

    println!("\nOutput:");
    println!("  Document: {}", config.output.document_path);

    println!("\nSeeds ({}):", config.crawler.seeds.len());
    for seed in &config.crawler.seeds {
        println!("  - {}", seed);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    let settings = CrawlSettings::from_config(&config);
    let fetcher = build_fetcher(settings.render_mode, &config.fetcher)
        .context("failed to set up the page fetcher")?;

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        let ctrl_c = || async { tokio::signal::ctrl_c().await.is_ok() };
        if handle_interrupts(ctrl_c, signal_token).await {
            tracing::error!("Second interrupt received, aborting without writing the document");
            std::process::exit(130);
        }
    });

    let report = Coordinator::new(settings, fetcher)
        .with_cancellation(cancel)
        .run()
        .await;

    for warning in &report.warnings {
        tracing::debug!("{}", warning);
    }

    let stats = CrawlStatistics::from_report(&report);
    let document_path = Path::new(&config.output.document_path);

    if let Err(e) = write_document(&report.pages, document_path) {
        tracing::error!("{}", e);
        return Err(e.into());
    }

    print_statistics(&stats);

    Ok(())
}

/// Cancels `token` on the first interrupt
///
/// Returns `true` once a second interrupt arrives, or `false` when the
/// interrupt source stops.
async fn handle_interrupts<F, Fut>(mut next_interrupt: F, token: CancellationToken) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    if !next_interrupt().await {
        return false;
    }
    tracing::warn!("Interrupt received, finishing the current page (Ctrl-C again to abort)");
    token.cancel();

    next_interrupt().await
}
