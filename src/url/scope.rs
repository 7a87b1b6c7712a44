//! Origin scoping for discovered links

use crate::url::normalize_url;
use serde::Deserialize;
use url::Url;

/// Rule deciding whether a discovered address lies under the origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ScopeRule {
    /// The candidate's string form starts with the origin string.
    ///
    /// Purely textual: `https://example.com` also admits
    /// `https://example.com.evil.net/`. The origin is put in the same canonical
    /// form as the candidates first, so `https://Example.com:443` behaves like
    /// `https://example.com`.
    #[default]
    Prefix,

    /// Same scheme, host and port as the origin, and the candidate path lies
    /// at or below the origin path.
    Structural,
}

/// The scope boundary of one crawl session
#[derive(Debug, Clone)]
pub struct Scope {
    origin: String,
    origin_url: Option<Url>,
    rule: ScopeRule,
}

impl Scope {
    /// Creates a scope around `origin`
    ///
    /// An origin that parses as an http(s) URL is normalized the way addresses
    /// are, so every normalized address of a page under it starts with it. One
    /// difference: a root `/` is not added when `origin` has no path, keeping
    /// `https://example.com` a textual prefix of `https://example.com.evil.net/`.
    /// Unparseable origins are kept as given (trimmed); the structural rule then
    /// admits nothing.
    pub fn new(origin: &str, rule: ScopeRule) -> Self {
        let raw = origin.trim();
        let origin_url = normalize_url(raw).ok();
        let origin = match &origin_url {
            Some(url) => canonical_origin(raw, url),
            None => raw.to_string(),
        };
        Self {
            origin,
            origin_url,
            rule,
        }
    }

    /// The canonical origin string
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The rule in force
    pub fn rule(&self) -> ScopeRule {
        self.rule
    }

    /// Returns true if `candidate` should be followed
    pub fn contains(&self, candidate: &Url) -> bool {
        match self.rule {
            ScopeRule::Prefix => candidate.as_str().starts_with(&self.origin),
            ScopeRule::Structural => self
                .origin_url
                .as_ref()
                .is_some_and(|origin| same_site(origin, candidate) && path_within(origin.path(), candidate.path())),
        }
    }
}

fn canonical_origin(raw: &str, url: &Url) -> String {
    let canonical = url.as_str();
    if url.path() == "/" && url.query().is_none() && !has_explicit_path(raw) {
        return canonical.strip_suffix('/').unwrap_or(canonical).to_string();
    }
    canonical.to_string()
}

/// Whether anything between the authority and the query or fragment was written
fn has_explicit_path(raw: &str) -> bool {
    let rest = raw.split_once("://").map_or(raw, |(_, rest)| rest);
    rest.find(|c: char| matches!(c, '/' | '\\' | '?' | '#'))
        .is_some_and(|i| matches!(rest.as_bytes()[i], b'/' | b'\\'))
}

fn same_site(origin: &Url, candidate: &Url) -> bool {
    origin.scheme() == candidate.scheme()
        && origin.host_str() == candidate.host_str()
        && origin.port_or_known_default() == candidate.port_or_known_default()
}

/// `/docs/` covers `/docs/...`; `/docs` covers `/docs` and `/docs/...` but not `/docsx`
fn path_within(base: &str, candidate: &str) -> bool {
    if base.ends_with('/') {
        return candidate.starts_with(base);
    }

    candidate == base
        || candidate
            .strip_prefix(base)
            .is_some_and(|rest| rest.starts_with('/'))
}
