//! Crawler coordinator - the breadth-first traversal engine
//!
//! This module contains the main crawl loop, which:
//! - Seeds the frontier with the caller's URLs at depth 0
//! - Discards entries that are too deep or already visited
//! - Drives the fetcher and extractor for each remaining entry
//! - Enqueues same-origin links one level deeper
//! - Collects page records and warnings in dequeue order

use crate::config::{Config, FetcherConfig};
use crate::crawler::fetcher::{build_fetcher, Fetcher, RenderMode};
use crate::crawler::frontier::{Frontier, FrontierEntry};
use crate::crawler::parser::extract;
use crate::crawler::report::{CrawlReport, CrawlWarning, PageRecord};
use crate::url::{is_same_origin, origin_of, parse_seed};
use crate::CorpusError;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// What to crawl, passed explicitly into the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSettings {
    /// Seed URLs, each starting at depth 0
    pub seeds: Vec<String>,

    /// Deepest level that is still fetched (inclusive)
    pub max_depth: u32,

    /// How markup is obtained
    pub render_mode: RenderMode,
}

impl CrawlSettings {
    pub fn new(seeds: Vec<String>, max_depth: u32, render_mode: RenderMode) -> Self {
        Self {
            seeds,
            max_depth,
            render_mode,
        }
    }

    /// Takes the crawl section of a loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.crawler.seeds.clone(),
            config.crawler.max_depth,
            RenderMode::from(config.crawler.render),
        )
    }
}

/// Main crawler coordinator structure
pub struct Coordinator {
    settings: CrawlSettings,
    fetcher: Arc<dyn Fetcher>,
    cancel: CancellationToken,
}

impl Coordinator {
    /// Creates a new coordinator
    ///
    /// The fetcher is supplied by the caller, so its mode is expected to match
    /// `settings.render_mode`; [`crawl`] builds a matching one.
    pub fn new(settings: CrawlSettings, fetcher: Arc<dyn Fetcher>) -> Self {
        if fetcher.mode() != settings.render_mode {
            tracing::debug!(
                "Fetcher mode {} differs from requested mode {}",
                fetcher.mode(),
                settings.render_mode
            );
        }

        Self {
            settings,
            fetcher,
            cancel: CancellationToken::new(),
        }
    }

    /// Uses the given token to stop the crawl early
    ///
    /// The token is checked once per dequeue; a fetch already in flight is
    /// allowed to finish and its page is kept.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Runs the crawl loop until the frontier is empty or the crawl is cancelled
    ///
    /// Fetch failures never abort the run: each one becomes a [`CrawlWarning`]
    /// and the URL is dropped.
    pub async fn run(&self) -> CrawlReport {
        let mut report = CrawlReport::default();
        let mut frontier = self.seed_frontier(&mut report);

        tracing::info!(
            "Starting {} crawl of {} seed(s) up to depth {}",
            self.settings.render_mode,
            frontier.len(),
            self.settings.max_depth
        );

        let start_time = std::time::Instant::now();

        loop {
            if self.cancel.is_cancelled() {
                tracing::info!(
                    "Crawl cancelled with {} URLs still queued",
                    frontier.len()
                );
                report.cancelled = true;
                break;
            }

            let Some(entry) = frontier.pop() else {
                tracing::info!("Frontier is empty, crawl complete");
                break;
            };

            if entry.depth > self.settings.max_depth {
                tracing::trace!("Depth {} exceeded for {}", entry.depth, entry.url);
                continue;
            }

            if !frontier.mark_visited(&entry.url) {
                tracing::trace!("Skipping already visited: {}", entry.url);
                continue;
            }

            self.process_entry(&entry, &mut frontier, &mut report).await;

            let attempted = frontier.visited_count();
            if attempted % 10 == 0 {
                let elapsed = start_time.elapsed();
                tracing::info!(
                    "Progress: {} pages fetched, {} failed, {} in frontier, {:.2} pages/sec",
                    report.pages.len(),
                    report.warnings.len(),
                    frontier.len(),
                    attempted as f64 / elapsed.as_secs_f64()
                );
            }
        }

        tracing::info!(
            "Crawl finished: {} pages, {} failures in {:?}",
            report.pages.len(),
            report.warnings.len(),
            start_time.elapsed()
        );

        report
    }

    /// Queues every valid seed at depth 0; malformed seeds become warnings
    fn seed_frontier(&self, report: &mut CrawlReport) -> Frontier {
        let mut frontier = Frontier::new();

        for seed in &self.settings.seeds {
            match parse_seed(seed) {
                Ok(url) => frontier.push(url, 0),
                Err(e) => {
                    tracing::warn!("Skipping seed {}: {}", seed, e);
                    report
                        .warnings
                        .push(CrawlWarning::invalid_seed(seed.as_str(), e.to_string()));
                }
            }
        }

        frontier
    }

    /// Fetches, extracts and expands a single entry
    async fn process_entry(
        &self,
        entry: &FrontierEntry,
        frontier: &mut Frontier,
        report: &mut CrawlReport,
    ) {
        let url_str = entry.url.as_str();
        tracing::debug!("Processing {} (depth {})", url_str, entry.depth);

        let html = match self.fetcher.fetch(url_str).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("Failed to retrieve {}: {}", url_str, e);
                report
                    .warnings
                    .push(CrawlWarning::fetch_failed(url_str, e.to_string()));
                return;
            }
        };

        let page = extract(&html, &entry.url);

        report.pages.push(PageRecord {
            url: url_str.to_string(),
            title: page.title,
            depth: entry.depth,
            text: page.text,
        });

        let Some(origin) = origin_of(&entry.url) else {
            return;
        };

        let mut queued = 0;
        for link in page.links {
            if is_same_origin(&link, &origin) {
                frontier.push(link, entry.depth + 1);
                queued += 1;
            }
        }

        tracing::debug!("Queued {} same-origin links from {}", queued, url_str);
    }
}

/// Runs a complete crawl with a fetcher built for the requested render mode
///
/// # Arguments
///
/// * `settings` - Seeds, max depth and render mode
/// * `fetcher_config` - Timeouts, user agent and WebDriver endpoint
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The crawl ran to completion
/// * `Err(CorpusError)` - The fetcher could not be built
///
/// # Example
///
/// ```no_run
/// use site_corpus::config::FetcherConfig;
/// use site_corpus::crawler::{crawl, CrawlSettings, RenderMode};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = CrawlSettings::new(
///     vec!["https://example.com".to_string()],
///     2,
///     RenderMode::Direct,
/// );
/// let report = crawl(settings, &FetcherConfig::default()).await?;
/// println!("Collected {} pages", report.pages.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(
    settings: CrawlSettings,
    fetcher_config: &FetcherConfig,
) -> Result<CrawlReport, CorpusError> {
    let fetcher = build_fetcher(settings.render_mode, fetcher_config)?;
    Ok(Coordinator::new(settings, fetcher).run().await)
}
