//! Post identifier resolution.
//!
//! Recognizes the URL shapes a post can be shared under and maps them to a
//! canonical post URL used for fetching.

use regex::Regex;
use url::Url;

use crate::patterns;

/// Template for the canonical post URL; `{id}` is substituted.
pub const CANONICAL_URL_TEMPLATE: &str = "https://www.xiaohongshu.com/explore/{id}";

/// Query parameter carrying the share token on shared links.
pub const SHARE_TOKEN_PARAM: &str = "xsec_token";

/// URL families in match order. First match wins.
static URL_FAMILIES: [&std::sync::LazyLock<Regex>; 3] = [
    &patterns::EXPLORE_URL,
    &patterns::DISCOVERY_URL,
    &patterns::SHORT_LINK_URL,
];

/// Resolve the post identifier from a URL.
///
/// # Returns
/// * `Some(id)` for a recognized post link, `None` otherwise
///
/// # Example
///
/// ```rust
/// use post_extractor::identifier::resolve_post_id;
///
/// let id = resolve_post_id("https://www.xiaohongshu.com/explore/66a1b2c3d4e5f6?xsec_token=t");
/// assert_eq!(id.as_deref(), Some("66a1b2c3d4e5f6"));
/// assert_eq!(resolve_post_id("https://google.com/explore/123"), None);
/// ```
#[must_use]
pub fn resolve_post_id(url: &str) -> Option<String> {
    URL_FAMILIES.iter().find_map(|family| {
        family
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

/// Build the canonical post URL for `id`.
///
/// With an empty `id` the original URL is returned unchanged.
#[must_use]
pub fn canonical_url(id: &str, fallback_url: &str) -> String {
    if id.is_empty() {
        return fallback_url.to_string();
    }
    CANONICAL_URL_TEMPLATE.replace("{id}", id)
}

/// Read the share token (`xsec_token`) from a post URL's query string.
#[must_use]
pub fn share_token(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == SHARE_TOKEN_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
