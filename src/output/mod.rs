//! Output module for assembling the corpus document
//!
//! This module handles:
//! - Formatting page records as one markdown document
//! - Writing the document to disk
//! - Summarizing a crawl run for the console

mod markdown;
pub mod stats;

pub use markdown::{assemble, format_page, write_document};
pub use stats::{print_statistics, CrawlStatistics};
