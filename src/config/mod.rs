//! Configuration module for Site-Corpus
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every field has a default, so a configuration can also be built entirely from
//! command-line arguments and then validated with [`validate`].
//!
//! # Example
//!
//! ```no_run
//! use site_corpus::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("corpus.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, FetcherConfig, OutputConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
