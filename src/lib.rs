//! Sitesift: crawl a site, index its text, search it by keyword
//!
//! This crate implements a single-session web crawler that stays under an origin,
//! records the visible text of every page it reaches, and answers case-insensitive
//! keyword queries against that text.

pub mod config;
pub mod crawler;
pub mod index;
pub mod output;
pub mod search;
pub mod url;

use thiserror::Error;

/// Main error type for Sitesift operations
///
/// Page-level failures never surface here; they are contained by the crawl
/// engine and reported through [`crawler::CrawlReport`].
#[derive(Debug, Error)]
pub enum SiftError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
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
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Sitesift operations
pub type Result<T> = std::result::Result<T, SiftError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlReport, CrawlSession, Crawler, TraversalOrder};
pub use index::Index;
pub use search::search;
pub use crate::url::{normalize_url, resolve_link, Scope, ScopeRule};
