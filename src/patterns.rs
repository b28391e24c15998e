//! Compiled regex patterns for post extraction.
//!
//! All patterns are compiled once at first use with `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Post URL Families
// =============================================================================

/// Full-form post link: `xiaohongshu.com/explore/<id>`. Lowercase hex only.
pub static EXPLORE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"xiaohongshu\.com/explore/([a-f0-9]+)").expect("EXPLORE_URL regex")
});

/// Discovery link: `xiaohongshu.com/discovery/item/<id>`. Lowercase hex only.
pub static DISCOVERY_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"xiaohongshu\.com/discovery/item/([a-f0-9]+)").expect("DISCOVERY_URL regex")
});

/// Short link: `xhslink.com/<code>`. Mixed-case alphanumeric.
pub static SHORT_LINK_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"xhslink\.com/([a-zA-Z0-9]+)").expect("SHORT_LINK_URL regex")
});

// =============================================================================
// Embedded State
// =============================================================================

/// `window.__INITIAL_STATE__ = {...}` terminated by `;` or `</script>`.
///
/// The object capture is lazy, so it stops at the first terminator that
/// follows a closing brace.
pub static INITIAL_STATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)window\.__INITIAL_STATE__\s*=\s*(\{.+?\})\s*(?:;|</script>)")
        .expect("INITIAL_STATE regex")
});

// =============================================================================
// Text Normalization
// =============================================================================

/// Count with a ten-thousand unit suffix, e.g. `1.2万` or `3 万`.
pub static TEN_THOUSAND_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\d.]+)\s*万").expect("TEN_THOUSAND_COUNT regex")
});

/// Runs of whitespace (collapsed to a single space in summaries).
pub static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN regex"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_stops_at_semicolon() {
        let page = r#"<script>window.__INITIAL_STATE__ = {"a":1};var x = {"b":2};</script>"#;
        let caps = INITIAL_STATE.captures(page).unwrap();
        assert_eq!(&caps[1], r#"{"a":1}"#);
    }

    #[test]
    fn initial_state_stops_at_script_end() {
        let page = "<script>window.__INITIAL_STATE__={\"a\":\n{\"b\":2}}</script>";
        let caps = INITIAL_STATE.captures(page).unwrap();
        assert_eq!(&caps[1], "{\"a\":\n{\"b\":2}}");
    }

    #[test]
    fn ten_thousand_requires_leading_number() {
        assert!(TEN_THOUSAND_COUNT.is_match("1.2万"));
        assert!(TEN_THOUSAND_COUNT.is_match("3 万"));
        assert!(!TEN_THOUSAND_COUNT.is_match("约3万"));
    }
}
