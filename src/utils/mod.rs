//! Utility functions and helpers.

pub mod query;

use url::Url;

pub use query::SearchQuery;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href.trim())
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.trim().to_string())
}

/// Parse the leading number of a result count text such as `"1,234 results"`.
///
/// Thousands separators (`,`, `.`, spaces) inside the number are skipped.
pub fn parse_count(text: &str) -> Option<usize> {
    let digits: String = text
        .trim()
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit() || matches!(*c, ',' | '.' | ' ' | '\u{a0}'))
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
