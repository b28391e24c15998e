//! DOM Operations Adapter
//!
//! Thin helpers over `dom_query` used by the markup fallback. Every lookup
//! takes an ordered list of CSS selector groups and returns the first
//! non-empty hit, so selector drift is handled by editing data, not code.

pub use dom_query::{Document, Selection};
pub use tendril::StrTendril;

/// Parse HTML string into document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// All text content of the selection and its descendants.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Get any attribute value.
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Trimmed text of `sel`, or `None` when it is empty.
#[must_use]
pub fn trimmed_text(sel: &Selection) -> Option<String> {
    let text = text_content(sel);
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Text of the first element matched by the first selector group that
/// yields non-empty text.
#[must_use]
pub fn first_text(root: &Selection, selectors: &[&str]) -> Option<String> {
    selectors
        .iter()
        .find_map(|selector| trimmed_text(&root.select_single(selector)))
}

/// `content` of the first `<meta property="...">` with the given property.
#[must_use]
pub fn meta_content(doc: &Document, property: &str) -> Option<String> {
    let meta = doc.select_single(&format!(r#"meta[property="{property}"]"#));
    get_attribute(&meta, "content")
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}
