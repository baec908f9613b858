//! Site-Corpus: a breadth-first site crawler for retrieval corpora
//!
//! This crate crawls one or more sites breadth-first up to a bounded depth,
//! staying on each page's own origin, extracts the readable text of every
//! visited page and assembles everything into a single Markdown document.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Corpus operations
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Failed to write document to {path}: {source}")]
    Output {
        path: String,
        source: std::io::Error,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Site-Corpus operations
pub type Result<T> = std::result::Result<T, CorpusError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlReport, CrawlSettings, CrawlWarning, PageRecord, RenderMode};
pub use output::{assemble, write_document};
pub use crate::url::{origin_of, parse_seed};
