use crate::config::types::{Config, CrawlerConfig, FetcherConfig, OutputConfig};
use crate::url::parse_seed;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    if config.seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one seed URL is required".to_string(),
        ));
    }

    for seed in &config.seeds {
        parse_seed(seed)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.render_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "render_timeout_secs must be >= 1".to_string(),
        ));
    }

    Url::parse(&config.webdriver_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid webdriver_url: {}", e)))?;

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.document_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "document_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
