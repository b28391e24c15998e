//! Content summary derivation.

use crate::patterns::WHITESPACE_RUN;

/// Marker appended to truncated summaries.
pub const ELLIPSIS: &str = "...";

/// Collapse whitespace and cap `text` at `max_len` characters.
///
/// Longer text is cut at exactly `max_len` characters and gets [`ELLIPSIS`]
/// appended. Lengths count `char`s, not bytes.
///
/// # Example
///
/// ```rust
/// use post_extractor::summary::make_summary;
///
/// assert_eq!(make_summary("hello   world\n", 200), "hello world");
/// assert_eq!(make_summary("abcdef", 3), "abc...");
/// ```
#[must_use]
pub fn make_summary(text: &str, max_len: usize) -> String {
    if text.is_empty() {
        return String::new();
    }

    let cleaned = WHITESPACE_RUN.replace_all(text, " ");
    let cleaned = cleaned.trim();

    match cleaned.char_indices().nth(max_len) {
        None => cleaned.to_string(),
        Some((cut, _)) => format!("{}{ELLIPSIS}", &cleaned[..cut]),
    }
}
