//! Page fetcher implementation
//!
//! This module defines how raw markup is obtained for a URL:
//! - The [`Fetcher`] trait the coordinator drives
//! - Direct HTTP GET requests with a bounded timeout
//! - Error classification into [`FetchError`]
//!
//! Rendered (headless browser) fetching lives in the `renderer` module and
//! implements the same trait. There are no retries: one failed attempt is
//! terminal for that URL.

use crate::config::FetcherConfig;
use crate::crawler::renderer::BrowserFetcher;
use crate::CorpusError;
use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// How page markup is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Plain HTTP GET, the markup is the response body
    #[default]
    Direct,

    /// Headless browser navigation, the markup is the rendered DOM
    Rendered,
}

impl From<bool> for RenderMode {
    fn from(render: bool) -> Self {
        if render {
            Self::Rendered
        } else {
            Self::Direct
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::Rendered => write!(f, "rendered"),
        }
    }
}

/// Reasons a single page could not be fetched
///
/// Display text describes the cause only; the URL is available from [`FetchError::url`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("request timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    #[error("network error: {message}")]
    Network { url: String, message: String },

    #[error("browser error: {message}")]
    Browser { url: String, message: String },
}

impl FetchError {
    /// The URL the failed fetch was for
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. }
            | Self::Timeout { url, .. }
            | Self::Network { url, .. }
            | Self::Browser { url, .. } => url,
        }
    }
}

/// Source of raw page markup
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Retrieves the markup for `url`
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;

    /// The render mode this fetcher implements
    fn mode(&self) -> RenderMode;
}

/// Builds the fetcher for the requested render mode
///
/// # Arguments
///
/// * `mode` - Direct HTTP or headless browser rendering
/// * `config` - Timeouts, user agent and WebDriver endpoint
///
/// # Returns
///
/// * `Ok(Arc<dyn Fetcher>)` - Ready to use fetcher
/// * `Err(CorpusError)` - The HTTP client could not be built
pub fn build_fetcher(
    mode: RenderMode,
    config: &FetcherConfig,
) -> Result<Arc<dyn Fetcher>, CorpusError> {
    match mode {
        RenderMode::Direct => Ok(Arc::new(HttpFetcher::new(config)?)),
        RenderMode::Rendered => Ok(Arc::new(BrowserFetcher::new(config))),
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use site_corpus::config::FetcherConfig;
/// use site_corpus::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Direct-mode fetcher: one HTTP GET per URL
pub struct HttpFetcher {
    client: Client,
    timeout_secs: u64,
}

impl HttpFetcher {
    /// Creates a fetcher with a fresh HTTP client
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            timeout_secs: config.request_timeout_secs,
        })
    }

    fn classify_error(&self, url: &str, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                secs: self.timeout_secs,
            }
        } else if error.is_connect() {
            FetchError::Network {
                url: url.to_string(),
                message: "Connection refused".to_string(),
            }
        } else {
            FetchError::Network {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    /// Fetches a URL with a single GET request
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | 2xx | body text |
    /// | any other final status | `FetchError::Status` |
    /// | timeout (request or body) | `FetchError::Timeout` |
    /// | connect / other transport error | `FetchError::Network` |
    ///
    /// Redirects are followed by the client; the caller keeps the requested URL.
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        tracing::trace!("GET {} -> {}", url, status);

        response
            .text()
            .await
            .map_err(|e| self.classify_error(url, e))
    }

    fn mode(&self) -> RenderMode {
        RenderMode::Direct
    }
}
