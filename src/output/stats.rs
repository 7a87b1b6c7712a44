//! Crawl statistics summary
//!
//! This module turns a finished crawl's report and index into a short
//! human-readable statistics block.

use crate::crawler::CrawlReport;
use crate::index::Index;
use std::fmt::Write;

/// Crawl statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlStatistics {
    /// Origin the crawl was scoped to
    pub origin: String,

    /// Pages marked visited, indexed or not
    pub pages_visited: usize,

    /// Pages with an index entry
    pub pages_indexed: usize,

    /// Total characters of indexed text
    pub indexed_chars: usize,

    /// Raw links seen on indexed pages
    pub links_discovered: usize,

    /// Links pushed onto the frontier
    pub links_queued: usize,

    /// Failed pages with their error messages
    pub failures: Vec<(String, String)>,

    /// Crawl duration in milliseconds
    pub elapsed_ms: i64,

    /// Share of visited pages that were indexed, as a percentage
    pub success_rate: f64,
}

/// Collects statistics from a finished crawl
pub fn collect_statistics(report: &CrawlReport, index: &Index) -> CrawlStatistics {
    CrawlStatistics {
        origin: report.origin.clone(),
        pages_visited: report.pages_visited,
        pages_indexed: report.pages_indexed,
        indexed_chars: index.iter().map(|(_, text)| text.chars().count()).sum(),
        links_discovered: report.links_discovered,
        links_queued: report.links_queued,
        failures: report
            .failures
            .iter()
            .map(|f| (f.address.clone(), f.error.to_string()))
            .collect(),
        elapsed_ms: report.elapsed().num_milliseconds(),
        success_rate: report.success_rate(),
    }
}

/// Formats statistics as a plain-text block
pub fn format_statistics(stats: &CrawlStatistics) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "=== Crawl Statistics ===\n");
    let _ = writeln!(out, "Overview:");
    let _ = writeln!(out, "  Origin: {}", stats.origin);
    let _ = writeln!(out, "  Pages visited: {}", stats.pages_visited);
    let _ = writeln!(out, "  Pages indexed: {}", stats.pages_indexed);
    let _ = writeln!(out, "  Pages failed: {}", stats.failures.len());
    let _ = writeln!(out, "  Indexed text: {} chars", stats.indexed_chars);
    let _ = writeln!(
        out,
        "  Links discovered: {} ({} queued)",
        stats.links_discovered, stats.links_queued
    );
    let _ = writeln!(out, "  Elapsed: {:.2}s", stats.elapsed_ms as f64 / 1000.0);
    let _ = writeln!(out);

    if !stats.failures.is_empty() {
        let _ = writeln!(out, "Failures ({}):", stats.failures.len());
        for (address, error) in &stats.failures {
            let _ = writeln!(out, "  - {}: {}", address, error);
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(
        out,
        "Success Rate: {:.1}% ({} / {} pages indexed)",
        stats.success_rate, stats.pages_indexed, stats.pages_visited
    );

    out
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    print!("{}", format_statistics(stats));
}
