//! Crawl run statistics
//!
//! This module summarizes a finished crawl report for display on the console.

use crate::crawler::CrawlReport;
use std::collections::{BTreeMap, BTreeSet};
use url::Url;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Number of pages collected into the document
    pub pages_collected: usize,

    /// Number of URLs dropped because their fetch failed
    pub failed_fetches: usize,

    /// Count of collected pages by depth
    pub pages_by_depth: BTreeMap<u32, usize>,

    /// Distinct origins among the collected pages
    pub origins: BTreeSet<String>,

    /// Total characters of extracted body text
    pub text_chars: usize,

    /// Whether the crawl was stopped early
    pub cancelled: bool,
}

impl CrawlStatistics {
    /// Computes statistics from a crawl report
    pub fn from_report(report: &CrawlReport) -> Self {
        let mut stats = Self {
            pages_collected: report.pages.len(),
            failed_fetches: report.failed_fetches(),
            cancelled: report.cancelled,
            ..Self::default()
        };

        for page in &report.pages {
            *stats.pages_by_depth.entry(page.depth).or_insert(0) += 1;
            stats.text_chars += page.text.chars().count();

            if let Some(origin) = Url::parse(&page.url)
                .ok()
                .as_ref()
                .and_then(crate::url::origin_of)
            {
                stats.origins.insert(origin);
            }
        }

        stats
    }

    /// Percentage of attempted URLs that produced a page
    pub fn success_rate(&self) -> f64 {
        let attempted = self.pages_collected + self.failed_fetches;
        if attempted == 0 {
            0.0
        } else {
            (self.pages_collected as f64 / attempted as f64) * 100.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Pages collected: {}", stats.pages_collected);
    println!("  Failed fetches: {}", stats.failed_fetches);
    println!("  Origins: {}", stats.origins.len());
    println!("  Text characters: {}", stats.text_chars);
    if stats.cancelled {
        println!("  Crawl was cancelled before the frontier emptied");
    }
    println!();

    if !stats.pages_by_depth.is_empty() {
        println!("Pages by Depth:");
        for (depth, count) in &stats.pages_by_depth {
            println!("  {}: {}", depth, count);
        }
        println!();
    }

    if !stats.origins.is_empty() {
        println!("Origins ({}):", stats.origins.len());
        for origin in &stats.origins {
            println!("  - {}", origin);
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} URLs fetched)",
        stats.success_rate(),
        stats.pages_collected,
        stats.pages_collected + stats.failed_fetches
    );
}
