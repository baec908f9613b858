//! Crawl result types

use std::fmt;

/// The extracted content of one successfully fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// The page URL as it was dequeued
    pub url: String,

    /// Page title, or the URL when the page has none
    pub title: String,

    /// Hops from the seed this page was first reached from
    pub depth: u32,

    /// Newline-joined body text
    pub text: String,
}

/// Why a URL was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// The seed string was not an absolute http(s) URL
    InvalidSeed,

    /// The fetch was attempted and failed
    FetchFailed,
}

/// A recoverable failure: the URL was dropped and the crawl went on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlWarning {
    pub url: String,

    /// Failure description, without the URL
    pub cause: String,

    pub kind: WarningKind,
}

impl CrawlWarning {
    pub fn fetch_failed(url: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            cause: cause.into(),
            kind: WarningKind::FetchFailed,
        }
    }

    pub fn invalid_seed(url: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            cause: cause.into(),
            kind: WarningKind::InvalidSeed,
        }
    }
}

impl fmt::Display for CrawlWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            WarningKind::FetchFailed => {
                write!(f, "Failed to retrieve {}: {}", self.url, self.cause)
            }
            WarningKind::InvalidSeed => write!(f, "Skipped seed {}: {}", self.url, self.cause),
        }
    }
}

/// Everything a crawl run produced
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Page records in dequeue order
    pub pages: Vec<PageRecord>,

    /// One warning per URL that could not be fetched
    pub warnings: Vec<CrawlWarning>,

    /// True if the run stopped early on cancellation
    pub cancelled: bool,
}

impl CrawlReport {
    /// Consumes the report, keeping only the page records
    pub fn into_pages(self) -> Vec<PageRecord> {
        self.pages
    }

    /// Number of URLs whose fetch was attempted and failed
    pub fn failed_fetches(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| w.kind == WarningKind::FetchFailed)
            .count()
    }

    /// True if the run was neither cancelled nor hit any fetch failure
    pub fn is_clean(&self) -> bool {
        !self.cancelled && self.warnings.is_empty()
    }
}
