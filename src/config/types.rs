use crate::crawler::TraversalOrder;
use crate::url::ScopeRule;
use serde::Deserialize;

/// Seed address used when neither the command line nor the config file names one
pub const DEFAULT_SEED: &str = "https://example.com";

/// Keyword used when neither the command line nor the config file names one
pub const DEFAULT_KEYWORD: &str = "test";

/// Main configuration structure for Sitesift
///
/// Every section and field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub session: SessionConfig,
    pub crawler: CrawlerConfig,
    pub http: HttpConfig,
}

/// What to crawl and what to look for
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SessionConfig {
    /// Address the crawl starts from; also establishes the origin
    pub seed: String,

    /// Keyword searched for once the crawl is complete
    pub keyword: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED.to_string(),
            keyword: DEFAULT_KEYWORD.to_string(),
        }
    }
}

/// Crawl traversal policy
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Order in which pending addresses are visited
    pub traversal: TraversalOrder,

    /// Rule deciding which discovered links are followed
    pub scope: ScopeRule,
}

/// HTTP client configuration for the page fetcher
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Whole-request timeout in seconds
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds
    pub connect_timeout_secs: u64,

    /// Maximum number of redirects followed per request
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("sitesift/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            max_redirects: 10,
        }
    }
}
