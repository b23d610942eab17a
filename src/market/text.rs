//! Text normalization and pattern extraction
//!
//! The upstream pages are prose, not an API: extraction is regex-based and
//! best-effort. A pattern miss yields `None`, never an error.

use regex::Regex;
use scraper::{Html, Selector};

/// Strip markup and return the page's body as plain text
pub fn body_text(html: &str) -> String {
    let document = Html::parse_document(html);

    if let Ok(selector) = Selector::parse("body") {
        if let Some(body) = document.select(&selector).next() {
            return body.text().collect::<Vec<_>>().join(" ");
        }
    }

    document.root_element().text().collect::<Vec<_>>().join(" ")
}

/// Collapse whitespace runs to single spaces, trim, and normalize en-dashes
/// to ASCII hyphens
pub fn normalize_text(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('–', "-")
}

/// Return the first capture of the first matching pattern
///
/// Patterns are tried in order; the order encodes which phrasing to prefer
/// when the page wording varies. Each pattern must have exactly one capturing
/// group. A Unicode minus in the captured value is replaced with an ASCII
/// hyphen.
pub fn capture_first(text: &str, patterns: &[&str]) -> Option<String> {
    for pattern in patterns {
        if let Ok(re) = Regex::new(pattern) {
            if let Some(captures) = re.captures(text) {
                if let Some(value) = captures.get(1) {
                    let value = value.as_str();
                    if !value.is_empty() {
                        return Some(value.replace('−', "-"));
                    }
                }
            }
        }
    }
    None
}

/// Map "In the {ordinal} quarter of {year}" phrasing to a "Q{n} {year}" label
///
/// The release page's dating convention is stable, so this is a single fixed
/// pattern with no fallbacks.
pub fn parse_quarter(text: &str) -> Option<String> {
    let re = Regex::new(r"(?i)In the (first|second|third|fourth) quarter of (\d{4})").ok()?;
    let captures = re.captures(text)?;

    let quarter = match captures.get(1)?.as_str().to_lowercase().as_str() {
        "first" => "Q1",
        "second" => "Q2",
        "third" => "Q3",
        "fourth" => "Q4",
        _ => return None,
    };

    Some(format!("{} {}", quarter, captures.get(2)?.as_str()))
}
