//! Headless browser fetcher
//!
//! Rendered mode drives a browser through a WebDriver endpoint (chromedriver,
//! geckodriver, selenium). Every call opens its own headless session, so one
//! misbehaving page can never poison the next one, and the session is closed
//! on every exit path, including navigation errors and timeouts.
//!
//! Session start and navigation share one deadline of `render-timeout-secs`.
//! The driver's page-load timeout is set to the same value, so a stuck page is
//! aborted by the browser itself rather than queueing up later commands.

use crate::config::FetcherConfig;
use crate::crawler::fetcher::{FetchError, Fetcher, RenderMode};
use async_trait::async_trait;
use fantoccini::wd::TimeoutConfiguration;
use fantoccini::{Client, ClientBuilder};
use serde_json::{json, Map, Value};
use std::time::Duration;
use tokio::time::{timeout, timeout_at, Instant};

/// Upper bound on deleting a session once the page has been handled
const CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Rendered-mode fetcher: one isolated browser session per URL
pub struct BrowserFetcher {
    webdriver_url: String,
    timeout: Duration,
}

impl BrowserFetcher {
    pub fn new(config: &FetcherConfig) -> Self {
        Self {
            webdriver_url: config.webdriver_url.clone(),
            timeout: Duration::from_secs(config.render_timeout_secs),
        }
    }

    /// Starts a new headless session before `deadline`
    ///
    /// The handshake runs as its own task. If the deadline passes first, that
    /// task is left to finish and any session it still creates is closed.
    async fn open_session(&self, url: &str, deadline: Instant) -> Result<Client, FetchError> {
        let webdriver_url = self.webdriver_url.clone();
        let mut handshake = tokio::spawn(async move {
            let mut builder = ClientBuilder::native();
            builder.capabilities(headless_capabilities());
            builder.connect(&webdriver_url).await
        });

        let started = timeout_at(deadline, &mut handshake).await;
        let client = match started {
            Ok(Ok(Ok(client))) => client,
            Ok(Ok(Err(e))) => {
                return Err(self.browser_error(
                    url,
                    format!("failed to start session at {}: {}", self.webdriver_url, e),
                ))
            }
            Ok(Err(e)) => return Err(self.browser_error(url, e.to_string())),
            Err(_) => {
                tokio::spawn(async move {
                    if let Ok(Ok(client)) = handshake.await {
                        tracing::debug!("Closing browser session that started after its deadline");
                        close_session(client, CLOSE_TIMEOUT).await;
                    }
                });
                return Err(self.timeout_error(url));
            }
        };
        tracing::debug!("Opened browser session at {}", self.webdriver_url);

        let page_load = TimeoutConfiguration::new(None, Some(self.timeout), None);
        let configured = timeout_at(deadline, client.update_timeouts(page_load)).await;
        match configured {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::debug!("Driver rejected page-load timeout: {}", e),
            Err(_) => {
                tokio::spawn(close_session(client, CLOSE_TIMEOUT));
                return Err(self.timeout_error(url));
            }
        }

        Ok(client)
    }

    fn browser_error(&self, url: &str, message: String) -> FetchError {
        FetchError::Browser {
            url: url.to_string(),
            message,
        }
    }

    fn timeout_error(&self, url: &str) -> FetchError {
        FetchError::Timeout {
            url: url.to_string(),
            secs: self.timeout.as_secs(),
        }
    }
}

/// Navigates and serializes the rendered DOM
async fn render(client: &Client, url: &str) -> Result<String, fantoccini::error::CmdError> {
    client.goto(url).await?;
    client.source().await
}

/// Deletes the session, giving up after `limit`
async fn close_session(client: Client, limit: Duration) {
    match timeout(limit, client.close()).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!("Failed to close browser session: {}", e),
        Err(_) => tracing::warn!("Timed out closing browser session"),
    }
}

/// Capabilities asking both Chrome and Firefox drivers for a headless window
pub(crate) fn headless_capabilities() -> Map<String, Value> {
    let mut caps = Map::new();
    caps.insert(
        "goog:chromeOptions".to_string(),
        json!({ "args": ["--headless=new", "--disable-gpu", "--no-sandbox"] }),
    );
    caps.insert(
        "moz:firefoxOptions".to_string(),
        json!({ "args": ["-headless"] }),
    );
    caps
}

#[async_trait]
impl Fetcher for BrowserFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let deadline = Instant::now() + self.timeout;
        let client = self.open_session(url, deadline).await?;

        let rendered = timeout_at(deadline, render(&client, url)).await;
        match rendered {
            Ok(result) => {
                close_session(client, CLOSE_TIMEOUT).await;
                result.map_err(|e| self.browser_error(url, e.to_string()))
            }
            Err(_) => {
                // The delete queues behind the navigation until the driver's
                // page-load timeout aborts it, so it finishes in the background
                tokio::spawn(close_session(client, self.timeout + CLOSE_TIMEOUT));
                Err(self.timeout_error(url))
            }
        }
    }

    fn mode(&self) -> RenderMode {
        RenderMode::Rendered
    }
}
