//! In-memory page index
//!
//! Maps a normalized page address to the visible text extracted from it. An entry
//! is written once, when the page is first fetched and extracted, and is never
//! replaced. The index lives for one crawl session.

use std::collections::hash_map::{Entry, HashMap};

/// Address -> text lookup built during a crawl
#[derive(Debug, Clone, Default)]
pub struct Index {
    pages: HashMap<String, String>,
}

impl Index {
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the text for `address`
    ///
    /// Returns `false` and leaves the existing entry untouched if `address` is
    /// already indexed.
    pub fn put(&mut self, address: impl Into<String>, text: impl Into<String>) -> bool {
        match self.pages.entry(address.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(text.into());
                true
            }
        }
    }

    /// Returns the stored text for `address`
    pub fn get(&self, address: &str) -> Option<&str> {
        self.pages.get(address).map(String::as_str)
    }

    /// Returns true if `address` has been indexed
    pub fn contains(&self, address: &str) -> bool {
        self.pages.contains_key(address)
    }

    /// Iterates over `(address, text)` pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pages.iter().map(|(a, t)| (a.as_str(), t.as_str()))
    }

    /// Returns every `(address, text)` pair in unspecified order
    pub fn get_all(&self) -> Vec<(&str, &str)> {
        self.iter().collect()
    }

    /// Iterates over indexed addresses in unspecified order
    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
