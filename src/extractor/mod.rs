//! Page-level extraction strategies.
//!
//! Strategies are tried in order and the first one that yields a record
//! wins. The markup strategy is the terminal fallback and never misses.

pub mod embedded_state;
pub mod markup;

use crate::result::PostRecord;
use crate::Options;

pub use embedded_state::extract_from_state;
pub use markup::extract_from_markup;

/// A strategy that may or may not recognize the page.
///
/// Arguments: page text, post identifier, source URL, options.
pub type StrategyFn = fn(&str, &str, &str, &Options) -> Option<PostRecord>;

/// Optional strategies, in the order they are tried.
pub const STRATEGIES: &[(&str, StrategyFn)] = &[("embedded_state", extract_from_state)];

/// Run every strategy in order, falling back to markup extraction.
///
/// # Example
///
/// ```rust
/// use post_extractor::{extractor::extract_page, Options};
///
/// let page = r#"<script>window.__INITIAL_STATE__={"note":{"note":{"title":"Hi"}}};</script>"#;
/// let record = extract_page(page, "abc", "https://xhslink.com/abc", &Options::default());
/// assert_eq!(record.title, "Hi");
/// ```
#[must_use]
pub fn extract_page(page: &str, post_id: &str, source_url: &str, opts: &Options) -> PostRecord {
    for (name, strategy) in STRATEGIES {
        if let Some(record) = strategy(page, post_id, source_url, opts) {
            tracing::debug!(strategy = *name, post_id, "strategy produced a record");
            return record;
        }
        tracing::debug!(strategy = *name, post_id, "strategy found no data, trying next");
    }

    extract_from_markup(page, post_id, source_url, opts)
}
