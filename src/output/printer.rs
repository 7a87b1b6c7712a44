//! Search result rendering

use std::io::{self, Write};

/// Header line printed above a non-empty result list
pub const RESULTS_HEADER: &str = "Search results:";

/// Line printed instead of a result list when nothing matched
pub const NO_RESULTS: &str = "No results found.";

/// Formats search results, one `- <address>` line per result
///
/// # Examples
///
/// ```
/// use sitesift::output::format_results;
///
/// let text = format_results(&["https://test.com".to_string()]);
/// assert_eq!(text, "Search results:\n- https://test.com\n");
/// assert_eq!(format_results(&[]), "No results found.\n");
/// ```
pub fn format_results(results: &[String]) -> String {
    if results.is_empty() {
        return format!("{}\n", NO_RESULTS);
    }

    let mut out = format!("{}\n", RESULTS_HEADER);
    for result in results {
        out.push_str(&format!("- {}\n", result));
    }
    out
}

/// Writes formatted search results to `writer`
pub fn write_results<W: Write>(writer: &mut W, results: &[String]) -> io::Result<()> {
    writer.write_all(format_results(results).as_bytes())
}

/// Prints search results to stdout
pub fn print_results(results: &[String]) {
    print!("{}", format_results(results));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_result() {
        let output = format_results(&["https://test.com".to_string()]);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines, vec!["Search results:", "- https://test.com"]);
    }

    #[test]
    fn test_multiple_results_keep_order() {
        let results = vec!["https://b.test".to_string(), "https://a.test".to_string()];
        let output = format_results(&results);
        assert_eq!(output, "Search results:\n- https://b.test\n- https://a.test\n");
    }

    #[test]
    fn test_no_results() {
        let output = format_results(&[]);
        assert_eq!(output.lines().collect::<Vec<_>>(), vec!["No results found."]);
    }

    #[test]
    fn test_write_results() {
        let mut buffer = Vec::new();
        write_results(&mut buffer, &["https://test.com".to_string()]).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Search results:\n- https://test.com\n"
        );
    }
}
