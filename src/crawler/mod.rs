//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `PageFetcher` boundary
//! - HTML text and link extraction behind the `TextExtractor` boundary
//! - The frontier work-list and its traversal order
//! - The crawl engine tying them together

mod engine;
mod extractor;
mod fetcher;
mod frontier;

pub use engine::{CrawlReport, CrawlSession, Crawler, PageError, PageFailure};
pub use extractor::{ExtractError, ExtractedPage, HtmlExtractor, TextExtractor};
pub use fetcher::{
    build_http_client, is_textual, FetchError, FetchedPage, HttpFetcher, PageFetcher,
};
pub use frontier::{Frontier, TraversalOrder};

use crate::config::{validate, Config};
use crate::index::Index;

/// Runs a complete crawl as described by `config`
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the configuration and build the HTTP client
/// 2. Establish the session origin from the seed
/// 3. Visit every in-scope page reachable from the seed
///
/// Only startup problems are errors; page failures are listed in the report.
///
/// # Example
///
/// ```no_run
/// use sitesift::config::Config;
/// use sitesift::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let (index, report) = run_crawl(&Config::default()).await?;
/// println!("{} pages indexed, {} failed", index.len(), report.pages_failed());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> crate::Result<(Index, CrawlReport)> {
    validate(config)?;
    let fetcher = HttpFetcher::new(&config.http)?;
    let mut crawler =
        Crawler::new(fetcher, HtmlExtractor).with_order(config.crawler.traversal);

    let session = CrawlSession::new(&config.session.seed, config.crawler.scope);
    let report = crawler.crawl(&session, &config.session.seed).await;

    Ok((crawler.into_index(), report))
}
