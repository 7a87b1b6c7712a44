//! HTML text and link extraction
//!
//! This module turns raw page markup into:
//! - The visible text of the page, used as the index entry
//! - The raw link references found on the page, in document order
//! - The page title, for logging
//!
//! Links are returned exactly as written in the markup (trimmed). Resolving them
//! against the page address is the crawl engine's job.

use scraper::{Html, Selector};
use thiserror::Error;

/// Elements whose text content is never shown to a reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Why a page's content could not be extracted
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

/// Extracted information from a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    /// Visible text, whitespace-trimmed fragments joined by single spaces
    pub text: String,

    /// Raw `href` values in document order
    pub links: Vec<String>,

    /// The page title (from <title> tag)
    pub title: Option<String>,
}

/// Turns raw page content into text and links
pub trait TextExtractor: Send + Sync {
    fn extract(&self, content: &str) -> Result<ExtractedPage, ExtractError>;
}

/// Extractor for HTML documents, built on `scraper`
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlExtractor;

impl TextExtractor for HtmlExtractor {
    /// # Extraction Rules
    ///
    /// **Text:** every text node outside `<script>`, `<style>`, `<noscript>` and
    /// `<template>`, including the title.
    ///
    /// **Links:** the `href` of every `<a href="...">`, in document order.
    /// Empty hrefs are skipped; nothing else is filtered here, so `mailto:` or
    /// off-site references are returned and left for the engine to reject.
    ///
    /// Empty content is a valid document with empty text.
    ///
    /// # Example
    ///
    /// ```
    /// use sitesift::crawler::{HtmlExtractor, TextExtractor};
    ///
    /// let html = r#"<html><head><title>Home</title></head>
    ///     <body><h1>Welcome!</h1><a href="/about">About Us</a></body></html>"#;
    /// let page = HtmlExtractor.extract(html).unwrap();
    /// assert_eq!(page.text, "Home Welcome! About Us");
    /// assert_eq!(page.links, vec!["/about".to_string()]);
    /// ```
    fn extract(&self, content: &str) -> Result<ExtractedPage, ExtractError> {
        let document = Html::parse_document(content);

        Ok(ExtractedPage {
            text: extract_visible_text(&document),
            links: extract_links(&document)?,
            title: extract_title(&document)?,
        })
    }
}

fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// Collects text nodes that are not inside a hidden element
fn extract_visible_text(document: &Html) -> String {
    let mut text = String::new();

    for node in document.tree.root().descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()))
        });
        if hidden {
            continue;
        }

        let fragment = fragment.trim();
        if fragment.is_empty() {
            continue;
        }

        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(fragment);
    }

    text
}

/// Extracts raw link references from `<a>` tags
fn extract_links(document: &Html) -> Result<Vec<String>, ExtractError> {
    let a_selector = selector("a[href]")?;

    Ok(document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect())
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Result<Option<String>, ExtractError> {
    let title_selector = selector("title")?;

    Ok(document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty()))
}
