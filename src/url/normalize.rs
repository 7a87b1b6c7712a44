use crate::{UrlError, UrlResult};
use url::Url;

/// List of tracking query parameters to remove during normalization
const TRACKING_PARAMS: &[&str] = &["fbclid", "gclid", "mc_eid", "ref", "source"];

/// Normalizes an absolute URL string into the form used as an index key
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed or relative
/// 2. Accept only `http` and `https`
/// 3. Lowercase scheme and host, remove dot segments (done by the parser)
/// 4. Remove fragment (everything after #)
/// 5. Remove tracking query parameters and sort the rest by key
/// 6. Remove empty query string (trailing ?)
///
/// Trailing slashes are kept: `/docs/` and `/docs` resolve relative links differently.
///
/// # Examples
///
/// ```
/// use sitesift::url::normalize_url;
///
/// let url = normalize_url("https://EXAMPLE.com/a/../page#top").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page");
/// ```
pub fn normalize_url(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
    normalize(url)
}

/// Normalizes an already parsed URL
pub(crate) fn normalize(mut url: Url) -> UrlResult<Url> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    match url.query() {
        Some("") => url.set_query(None),
        Some(_) => normalize_query(&mut url),
        None => {}
    }

    Ok(url)
}

/// Drops tracking parameters and sorts the remaining pairs by key
///
/// The query is only rewritten when filtering or sorting changed it, so already
/// clean queries keep their original encoding.
fn normalize_query(url: &mut Url) {
    let original: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut params: Vec<(String, String)> = original
        .iter()
        .filter(|(key, _)| !is_tracking_param(key))
        .cloned()
        .collect();
    params.sort_by(|a, b| a.0.cmp(&b.0));

    if params == original {
        return;
    }

    if params.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(params);
    }
}

/// Checks if a query parameter is a tracking parameter
fn is_tracking_param(key: &str) -> bool {
    key.starts_with("utm_") || TRACKING_PARAMS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_scheme() {
        let result = normalize_url("http://example.com/page").unwrap();
        assert_eq!(result.as_str(), "http://example.com/page");
    }

    #[test]
    fn test_keep_trailing_slash() {
        let result = normalize_url("https://example.com/docs/").unwrap();
        assert_eq!(result.as_str(), "https://example.com/docs/");
    }

    #[test]
    fn test_empty_path_becomes_root() {
        let result = normalize_url("https://example.com").unwrap();
        assert_eq!(result.as_str(), "https://example.com/");
    }

    #[test]
    fn test_remove_fragment() {
        let result = normalize_url("https://example.com/page#section").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_remove_tracking_params() {
        let result = normalize_url("https://example.com/page?utm_source=twitter").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_sort_query_params() {
        let result = normalize_url("https://example.com/page?b=2&a=1").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page?a=1&b=2");
    }

    #[test]
    fn test_clean_query_untouched() {
        let result = normalize_url("https://example.com/search?q=a%20b").unwrap();
        assert_eq!(result.as_str(), "https://example.com/search?q=a%20b");
    }

    #[test]
    fn test_empty_query_removed() {
        let result = normalize_url("https://example.com/page?").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_mixed_query_params() {
        let result = normalize_url(
            "https://example.com/page?keep=yes&utm_medium=email&another=value&fbclid=123",
        )
        .unwrap();
        assert_eq!(
            result.as_str(),
            "https://example.com/page?another=value&keep=yes"
        );
    }

    #[test]
    fn test_normalize_path_with_dots() {
        let result = normalize_url("https://example.com/a/../b/./c").unwrap();
        assert_eq!(result.as_str(), "https://example.com/b/c");
    }

    #[test]
    fn test_lowercase_host_only() {
        let result = normalize_url("HTTPS://EXAMPLE.COM/Page").unwrap();
        assert_eq!(result.as_str(), "https://example.com/Page");
    }

    #[test]
    fn test_invalid_scheme() {
        let result = normalize_url("ftp://example.com/page");
        assert!(matches!(result, Err(UrlError::InvalidScheme(_))));
    }

    #[test]
    fn test_relative_is_parse_error() {
        let result = normalize_url("/about");
        assert!(matches!(result, Err(UrlError::Parse(_))));
    }

    #[test]
    fn test_malformed_url() {
        assert!(normalize_url("not a url").is_err());
    }
}
