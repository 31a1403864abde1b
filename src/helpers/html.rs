//! HTML and XML text helpers

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TAG_RE: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// Strip HTML tags from content
///
/// # Examples
/// ```ignore
/// strip_html("<p>Hello <b>world</b></p>") // -> "Hello world"
/// ```
pub fn strip_html(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

/// Count whitespace-separated words in HTML content (strips tags first)
pub fn count_words(html: &str) -> usize {
    strip_html(html).split_whitespace().count()
}

/// Escape text for use inside HTML element bodies and attributes
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape XML special characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Truncate by character count, appending an ellipsis when shortened
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", truncated.trim_end())
}
