//! Output module for search results and crawl summaries
//!
//! This module handles:
//! - Rendering search results (header plus one line per address)
//! - Recording crawl statistics for the operator

mod printer;
pub mod stats;

pub use printer::{format_results, print_results, write_results, NO_RESULTS, RESULTS_HEADER};
pub use stats::{collect_statistics, format_statistics, print_statistics, CrawlStatistics};

use crate::crawler::CrawlReport;
use crate::index::Index;

/// Prints the statistics block for a finished crawl
pub fn print_crawl_summary(report: &CrawlReport, index: &Index) {
    print_statistics(&collect_statistics(report, index));
}
