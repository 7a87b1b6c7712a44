//! URL handling module for Sitesift
//!
//! This module provides address normalization, link resolution against the page
//! a link was found on, and the origin scope test applied to discovered links.

mod normalize;
mod scope;

use crate::{UrlError, UrlResult};
use url::Url;

// Re-export main functions
pub use normalize::normalize_url;
pub use scope::{Scope, ScopeRule};

/// Resolves a raw link reference against the page it was found on
///
/// The result is normalized, so it can be used directly as an index key.
///
/// # Arguments
///
/// * `href` - The raw reference, relative or absolute
/// * `page` - The address of the page containing the reference
///
/// # Examples
///
/// ```
/// use sitesift::url::resolve_link;
/// use url::Url;
///
/// let page = Url::parse("https://example.com/docs/intro").unwrap();
/// let link = resolve_link("setup#step-2", &page).unwrap();
/// assert_eq!(link.as_str(), "https://example.com/docs/setup");
/// ```
pub fn resolve_link(href: &str, page: &Url) -> UrlResult<Url> {
    let joined = page
        .join(href.trim())
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;
    normalize::normalize(joined)
}
