//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - Direct HTTP and headless browser fetching
//! - HTML extraction of titles, text and links
//! - The breadth-first frontier and visited set
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod renderer;
mod report;

pub use coordinator::{crawl, Coordinator, CrawlSettings};
pub use fetcher::{build_fetcher, build_http_client, FetchError, Fetcher, HttpFetcher, RenderMode};
pub use frontier::{Frontier, FrontierEntry};
pub use parser::{extract, ExtractedPage};
pub use renderer::BrowserFetcher;
pub use report::{CrawlReport, CrawlWarning, PageRecord, WarningKind};
