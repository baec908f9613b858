use serde::Deserialize;

/// Default crawl depth when neither the file nor the command line sets one
pub const DEFAULT_MAX_DEPTH: u32 = 2;

/// Default timeout for direct HTTP requests (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default timeout for a rendered browser navigation (seconds)
pub const DEFAULT_RENDER_TIMEOUT_SECS: u64 = 60;

/// Main configuration structure for Site-Corpus
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl traversal configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Seed URLs, each crawled within its own origin
    #[serde(default)]
    pub seeds: Vec<String>,

    /// Maximum depth to crawl from seed URLs (inclusive)
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Render pages in a headless browser instead of a plain GET
    #[serde(default)]
    pub render: bool,
}

/// Fetcher configuration shared by the direct and rendered modes
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Timeout for a direct HTTP request (seconds)
    #[serde(
        rename = "request-timeout-secs",
        default = "default_request_timeout_secs"
    )]
    pub request_timeout_secs: u64,

    /// Timeout for a rendered navigation, including script execution (seconds)
    #[serde(rename = "render-timeout-secs", default = "default_render_timeout_secs")]
    pub render_timeout_secs: u64,

    /// WebDriver endpoint used to start headless browser sessions
    #[serde(rename = "webdriver-url", default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// User-Agent header sent with direct requests
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the assembled markdown document
    #[serde(rename = "document-path", default = "default_document_path")]
    pub document_path: String,
}

fn default_max_depth() -> u32 {
    DEFAULT_MAX_DEPTH
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_render_timeout_secs() -> u64 {
    DEFAULT_RENDER_TIMEOUT_SECS
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_user_agent() -> String {
    format!("site-corpus/{}", env!("CARGO_PKG_VERSION"))
}

fn default_document_path() -> String {
    "output/combined_site_map.md".to_string()
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            seeds: Vec::new(),
            max_depth: default_max_depth(),
            render: false,
        }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            render_timeout_secs: default_render_timeout_secs(),
            webdriver_url: default_webdriver_url(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            document_path: default_document_path(),
        }
    }
}
