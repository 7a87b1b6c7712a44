//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl-then-search cycle end-to-end over real HTTP.

use sitesift::config::{Config, CrawlerConfig, HttpConfig, SessionConfig};
use sitesift::crawler::{
    run_crawl, CrawlSession, Crawler, FetchError, HtmlExtractor, HttpFetcher, PageError,
    PageFetcher,
};
use sitesift::output::format_results;
use sitesift::{search, SiftError};
use std::collections::HashSet;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration seeded at `seed`
fn create_test_config(seed: &str, keyword: &str) -> Config {
    Config {
        session: SessionConfig {
            seed: seed.to_string(),
            keyword: keyword.to_string(),
        },
        crawler: CrawlerConfig::default(),
        http: HttpConfig {
            user_agent: "TestBot/1.0".to_string(),
            timeout_secs: 5,
            connect_timeout_secs: 2,
            max_redirects: 5,
        },
    }
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><head><title>Test</title></head><body>{}</body></html>", body),
        "text/html",
    )
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(body))
        .mount(server)
        .await;
}

fn http_fetcher() -> HttpFetcher {
    HttpFetcher::new(&create_test_config("http://localhost/", "").http)
        .expect("Failed to build HTTP fetcher")
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<h1>Welcome!</h1><a href="/page1">Page 1</a><a href="page2">Page 2</a>"#,
    )
    .await;
    mount_page(&mock_server, "/page1", "<p>Rust testing notes</p>").await;
    mount_page(&mock_server, "/page2", "<p>Nothing useful here</p>").await;

    let seed = format!("{}/", base_url);
    let config = create_test_config(&seed, "TESTING");
    let (index, report) = run_crawl(&config).await.expect("Crawl failed to start");

    assert_eq!(report.pages_visited, 3);
    assert_eq!(report.pages_indexed, 3);
    assert!(report.failures.is_empty());

    let page1 = format!("{}/page1", base_url);
    assert!(index.contains(&seed));
    assert!(index.get(&page1).unwrap().contains("Rust testing notes"));

    let results = search(&index, &config.session.keyword);
    assert_eq!(results, vec![page1.clone()]);
    assert_eq!(
        format_results(&results),
        format!("Search results:\n- {}\n", page1)
    );
}

#[tokio::test]
async fn test_end_to_end_with_failure_and_foreign_link() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/a">A</a><a href="https://other.example">Elsewhere</a>"#,
    )
    .await;
    mount_page(
        &mock_server,
        "/a",
        r#"<p>Section A</p><a href="/a/missing">Missing</a><a href="/">Home</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/a/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let seed = format!("{}/", base_url);
    let mut crawler = Crawler::new(http_fetcher(), HtmlExtractor);
    let session = CrawlSession::from_seed(&seed);
    let report = crawler.crawl(&session, &seed).await;

    let expected_visited: HashSet<String> = [
        seed.clone(),
        format!("{}/a", base_url),
        format!("{}/a/missing", base_url),
    ]
    .into_iter()
    .collect();
    assert_eq!(*crawler.visited(), expected_visited);

    assert_eq!(crawler.index().len(), 2);
    assert!(crawler.index().contains(&seed));
    assert!(crawler.index().contains(&format!("{}/a", base_url)));
    assert!(!crawler.has_visited("https://other.example/"));

    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        report.failures[0].error,
        PageError::Fetch(FetchError::Status { .. })
    ));
}

#[tokio::test]
async fn test_non_text_content_is_a_fetch_failure() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/logo.png">Logo</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0x89, 0x50, 0x4e, 0x47], "image/png"))
        .mount(&mock_server)
        .await;

    let seed = format!("{}/", base_url);
    let config = create_test_config(&seed, "");
    let (index, report) = run_crawl(&config).await.expect("Crawl failed to start");

    assert_eq!(index.len(), 1);
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        report.failures[0].error,
        PageError::Fetch(FetchError::ContentType { .. })
    ));
}

#[tokio::test]
async fn test_each_page_requested_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(r#"<a href="/loop">Loop</a><a href="/">Self</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(html_page(r#"<a href="/">Back</a><a href="/loop#again">Again</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let seed = format!("{}/", base_url);
    let mut crawler = Crawler::new(http_fetcher(), HtmlExtractor);
    let session = CrawlSession::from_seed(&seed);

    crawler.crawl(&session, &seed).await;
    let second = crawler.crawl(&session, &seed).await;

    assert_eq!(second.pages_visited, 0);
    assert_eq!(crawler.index().len(), 2);
    // Expectations are verified when the server is dropped
}

#[tokio::test]
async fn test_unreachable_host() {
    // Nothing listens on port 1
    let url = Url::parse("http://127.0.0.1:1/").unwrap();
    let result = http_fetcher().fetch(&url).await;

    assert!(matches!(
        result,
        Err(FetchError::Connect(_)) | Err(FetchError::Request(_)) | Err(FetchError::Timeout)
    ));
}

#[tokio::test]
async fn test_redirect_resolves_links_against_final_url() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/docs">Docs</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/docs/"))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/docs/", r#"<a href="intro">Intro</a>"#).await;
    mount_page(&mock_server, "/docs/intro", "<p>Getting started</p>").await;

    let seed = format!("{}/", base_url);
    let config = create_test_config(&seed, "getting started");
    let (index, report) = run_crawl(&config).await.expect("Crawl failed to start");

    assert!(report.failures.is_empty());
    assert!(index.contains(&format!("{}/docs", base_url)));
    assert!(!index.contains(&format!("{}/intro", base_url)));
    assert_eq!(
        search(&index, &config.session.keyword),
        vec![format!("{}/docs/intro", base_url)]
    );
}

#[tokio::test]
async fn test_empty_page_is_indexed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/empty">Empty</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("", "text/html"))
        .mount(&mock_server)
        .await;

    let seed = format!("{}/", base_url);
    let config = create_test_config(&seed, "");
    let (index, report) = run_crawl(&config).await.expect("Crawl failed to start");

    let empty = format!("{}/empty", base_url);
    assert!(report.failures.is_empty());
    assert_eq!(index.get(&empty), Some(""));
    assert!(search(&index, "").contains(&empty));
}

#[tokio::test]
async fn test_non_canonical_seed_follows_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/about">About</a>"#).await;
    mount_page(&mock_server, "/about", "<p>About us</p>").await;

    // No path and an uppercase scheme
    let seed = base_url.replacen("http://", "HTTP://", 1);
    let config = create_test_config(&seed, "about us");
    let (index, report) = run_crawl(&config).await.expect("Crawl failed to start");

    assert_eq!(report.origin, base_url);
    assert_eq!(report.pages_indexed, 2);
    assert_eq!(
        search(&index, &config.session.keyword),
        vec![format!("{}/about", base_url)]
    );
}

#[tokio::test]
async fn test_invalid_config_is_rejected_before_crawling() {
    let mut config = create_test_config("ftp://example.com/", "");
    assert!(matches!(run_crawl(&config).await, Err(SiftError::Config(_))));

    config.session.seed = "http://127.0.0.1:1/".to_string();
    config.http.connect_timeout_secs = config.http.timeout_secs + 1;
    assert!(matches!(run_crawl(&config).await, Err(SiftError::Config(_))));
}
