//! Crawl engine - traversal, deduplication, scoping and failure containment
//!
//! The engine repeatedly:
//! 1. Pops the next address from the frontier
//! 2. Skips it if already visited, otherwise marks it visited before any I/O
//! 3. Fetches and extracts the page, indexing its text
//! 4. Resolves discovered links against the page and queues the in-scope ones
//!
//! A failure in step 3 is logged and recorded against that page only; the crawl
//! always runs until the frontier is empty.

use crate::crawler::extractor::{ExtractError, TextExtractor};
use crate::crawler::fetcher::{FetchError, PageFetcher};
use crate::crawler::frontier::{Frontier, TraversalOrder};
use crate::index::Index;
use crate::url::{normalize_url, resolve_link, Scope, ScopeRule};
use crate::UrlError;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::time::Instant;
use thiserror::Error;
use url::Url;

/// Emit a progress line every this many visited pages
const PROGRESS_INTERVAL: usize = 10;

/// Immutable context shared by every step of one crawl
#[derive(Debug, Clone)]
pub struct CrawlSession {
    scope: Scope,
}

impl CrawlSession {
    /// Creates a session scoped to an explicit origin
    pub fn new(origin: &str, rule: ScopeRule) -> Self {
        Self {
            scope: Scope::new(origin, rule),
        }
    }

    /// Creates a session whose origin is the seed address itself
    pub fn from_seed(seed: &str) -> Self {
        Self::new(seed, ScopeRule::default())
    }

    pub fn origin(&self) -> &str {
        self.scope.origin()
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }
}

/// Why a single page produced no index entry
#[derive(Debug, Error)]
pub enum PageError {
    #[error("invalid address: {0}")]
    Address(#[from] UrlError),

    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),
}

/// A page that was visited but not indexed
#[derive(Debug)]
pub struct PageFailure {
    pub address: String,
    pub error: PageError,
}

/// Outcome of one `crawl` call
#[derive(Debug)]
pub struct CrawlReport {
    /// Origin of the session the crawl ran under
    pub origin: String,

    /// Addresses newly marked visited by this call
    pub pages_visited: usize,

    /// Addresses newly indexed by this call
    pub pages_indexed: usize,

    /// Raw link references seen on indexed pages
    pub links_discovered: usize,

    /// In-scope, not yet visited addresses pushed on the frontier
    pub links_queued: usize,

    /// Pages that were visited but failed
    pub failures: Vec<PageFailure>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    fn new(origin: &str) -> Self {
        let now = Utc::now();
        Self {
            origin: origin.to_string(),
            pages_visited: 0,
            pages_indexed: 0,
            links_discovered: 0,
            links_queued: 0,
            failures: Vec::new(),
            started_at: now,
            finished_at: now,
        }
    }

    pub fn pages_failed(&self) -> usize {
        self.failures.len()
    }

    /// Wall-clock duration of the crawl
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    /// Returns the share of visited pages that were indexed, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.pages_visited == 0 {
            return 0.0;
        }
        (self.pages_indexed as f64 / self.pages_visited as f64) * 100.0
    }
}

/// What processing one page produced
struct PageOutcome {
    discovered: usize,
    queued: Vec<String>,
}

/// Crawler owning the index and visited set of one crawl session
///
/// Generic over its collaborators so tests can substitute in-memory fetchers.
pub struct Crawler<F, E> {
    fetcher: F,
    extractor: E,
    order: TraversalOrder,
    index: Index,
    visited: HashSet<String>,
}

impl<F: PageFetcher, E: TextExtractor> Crawler<F, E> {
    /// Creates a depth-first crawler with an empty index
    pub fn new(fetcher: F, extractor: E) -> Self {
        Self {
            fetcher,
            extractor,
            order: TraversalOrder::default(),
            index: Index::new(),
            visited: HashSet::new(),
        }
    }

    /// Sets the traversal order used by subsequent crawls
    pub fn with_order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn into_index(self) -> Index {
        self.index
    }

    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    pub fn has_visited(&self, address: &str) -> bool {
        self.visited.contains(address)
    }

    /// Searches the pages indexed so far
    pub fn search(&self, keyword: &str) -> Vec<String> {
        crate::search::search(&self.index, keyword)
    }

    /// Visits `address` and every in-scope address reachable from it
    ///
    /// Each address is processed at most once for the lifetime of this crawler,
    /// so a second call with an already visited address does nothing. Page
    /// failures are contained and listed in the returned report.
    pub async fn crawl(&mut self, session: &CrawlSession, address: &str) -> CrawlReport {
        let mut report = CrawlReport::new(session.origin());
        let start_time = Instant::now();

        let mut frontier = Frontier::new(self.order);
        frontier.push(address_key(address));

        tracing::info!(
            "Starting {:?} crawl at {} (origin: {}, scope: {:?})",
            self.order,
            address,
            session.origin(),
            session.scope().rule()
        );

        while let Some(address) = frontier.pop() {
            if !self.visited.insert(address.clone()) {
                continue;
            }
            report.pages_visited += 1;
            tracing::debug!("Processing URL: {}", address);

            match self.process_page(session, &address).await {
                Ok(outcome) => {
                    report.pages_indexed += 1;
                    report.links_discovered += outcome.discovered;
                    report.links_queued += outcome.queued.len();
                    frontier.push_links(outcome.queued);
                }
                Err(error) => {
                    tracing::warn!("Error crawling {}: {}", address, error);
                    report.failures.push(PageFailure { address, error });
                }
            }

            if report.pages_visited % PROGRESS_INTERVAL == 0 {
                let rate = report.pages_visited as f64 / start_time.elapsed().as_secs_f64();
                tracing::info!(
                    "Progress: {} pages visited, {} in frontier, {:.2} pages/sec",
                    report.pages_visited,
                    frontier.len(),
                    rate
                );
            }
        }

        report.finished_at = Utc::now();
        tracing::info!(
            "Crawl completed: {} pages visited, {} indexed, {} failed in {:?}",
            report.pages_visited,
            report.pages_indexed,
            report.pages_failed(),
            start_time.elapsed()
        );

        report
    }

    /// Fetches, extracts and indexes one page, returning the links to follow
    ///
    /// The page is indexed under `address`; its links are resolved against the
    /// address it was finally served from.
    async fn process_page(
        &mut self,
        session: &CrawlSession,
        address: &str,
    ) -> Result<PageOutcome, PageError> {
        let url = normalize_url(address)?;
        let fetched = self.fetcher.fetch(&url).await?;
        let page = self.extractor.extract(&fetched.body)?;

        if let Some(title) = &page.title {
            tracing::debug!("Indexed {} ({})", address, title);
        }
        self.index.put(address, page.text);

        Ok(PageOutcome {
            discovered: page.links.len(),
            queued: self.in_scope_links(session, &fetched.url, &page.links),
        })
    }

    /// Resolves raw links against `page` and keeps the unvisited in-scope ones
    fn in_scope_links(&self, session: &CrawlSession, page: &Url, links: &[String]) -> Vec<String> {
        links
            .iter()
            .filter_map(|href| match resolve_link(href, page) {
                Ok(url) => Some(url),
                Err(e) => {
                    tracing::trace!("Skipping link '{}' on {}: {}", href, page, e);
                    None
                }
            })
            .filter(|url| session.scope().contains(url))
            .map(String::from)
            .filter(|candidate| !self.visited.contains(candidate))
            .collect()
    }
}

/// Key under which a caller-supplied address is tracked
///
/// Addresses that cannot be normalized are kept verbatim so the failure is still
/// recorded against them.
fn address_key(address: &str) -> String {
    normalize_url(address)
        .map(String::from)
        .unwrap_or_else(|_| address.trim().to_string())
}
