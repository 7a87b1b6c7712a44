//! HTTP fetcher implementation
//!
//! This module handles all network retrieval for the crawler, including:
//! - Building HTTP clients from the `[http]` configuration
//! - GET requests with bounded redirect following
//! - Classifying failures into distinct error kinds for logging
//!
//! Every kind is recovered the same way by the engine: the page is skipped and the
//! crawl continues. There is no retry.

use crate::config::HttpConfig;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Why a page could not be retrieved
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP {status}")]
    Status { status: StatusCode },

    #[error("unsupported content type '{content_type}'")]
    ContentType { content_type: String },

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl FetchError {
    /// Maps a transport-level reqwest error onto a fetch error kind
    fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Connect(e.to_string())
        } else if e.is_redirect() {
            FetchError::Request(format!("redirect error: {}", e))
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

/// A successfully retrieved page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Where the body was finally served from, after redirects
    pub url: Url,
    pub body: String,
}

/// Retrieves raw page content for an address
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `address` and returns its body as text
    async fn fetch(&self, address: &Url) -> Result<FetchedPage, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```
/// use sitesift::config::HttpConfig;
/// use sitesift::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Page fetcher backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from the `[http]` configuration
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    /// # Request Flow
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | 2xx with textual Content-Type | body text and final URL |
    /// | non-2xx status | `Status` |
    /// | binary Content-Type | `ContentType` |
    /// | timeout | `Timeout` |
    /// | connection refused, DNS, TLS | `Connect` |
    /// | too many redirects | `Request` |
    async fn fetch(&self, address: &Url) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(address.clone())
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !is_textual(&content_type) {
            return Err(FetchError::ContentType { content_type });
        }

        let url = response.url().clone();
        if &url != address {
            tracing::debug!("{} redirected to {}", address, url);
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        Ok(FetchedPage { url, body })
    }
}

/// Returns true for content types the extractor can read as markup or text
///
/// A missing header is accepted.
pub fn is_textual(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    mime.is_empty() || mime.starts_with("text/") || mime.contains("html") || mime.ends_with("+xml")
}
