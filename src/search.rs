//! Keyword search over the page index

use crate::index::Index;

/// Returns every indexed address whose text contains `keyword`, ignoring case
///
/// Matching is a plain substring test after lowercasing both sides, so the empty
/// keyword matches every page. Results follow the index's iteration order; no
/// match yields an empty vector.
///
/// # Examples
///
/// ```
/// use sitesift::{search, Index};
///
/// let mut index = Index::new();
/// index.put("p1", "has the keyword here");
/// index.put("p2", "nothing useful");
///
/// assert_eq!(search(&index, "KEYWORD"), vec!["p1".to_string()]);
/// ```
pub fn search(index: &Index, keyword: &str) -> Vec<String> {
    let needle = keyword.to_lowercase();

    index
        .iter()
        .filter(|(_, text)| text.to_lowercase().contains(&needle))
        .map(|(address, _)| address.to_string())
        .collect()
}
