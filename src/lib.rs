//! # post-extractor
//!
//! Turns a content-platform post URL into a structured, bounded-size
//! [`PostRecord`]: title, author, interaction counts, top comments, tags and
//! images.
//!
//! ## Quick Start
//!
//! ```rust
//! use post_extractor::{extract_html, Strategy};
//!
//! let page = r#"<html><head><meta property="og:title" content="My Post"></head></html>"#;
//!
//! let record = extract_html(page, "https://www.xiaohongshu.com/explore/66a1b2c3d4e5f6");
//! assert_eq!(record.id, "66a1b2c3d4e5f6");
//! assert_eq!(record.title, "My Post");
//! assert_eq!(record.strategy, Strategy::Markup);
//! ```
//!
//! Fetching and extracting in one step goes through [`Extractor`]:
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), post_extractor::FetchError> {
//! use post_extractor::{Extractor, Options};
//!
//! let extractor = Extractor::new(Options::default())?;
//! let record = extractor.extract("https://xhslink.com/abc123XYZ").await;
//! println!("{} ({} likes)", record.title, record.interaction.like_count);
//! # Ok(()) }
//! ```
//!
//! ## Strategies
//!
//! - **Embedded state**: parses the `window.__INITIAL_STATE__` JSON the
//!   server renders into the page. Preferred; carries exact counts, images
//!   and the comment feed.
//! - **Markup**: CSS selectors over the visible page plus Open Graph meta
//!   tags. Used when the embedded state is missing or unrecognized.
//!
//! Extraction never returns an error. A failed fetch produces a degraded
//! record whose title is [`FETCH_FAILED_TITLE`].

mod error;
mod extract;
mod options;
mod patterns;
mod result;

/// DOM helpers over `dom_query`.
pub mod dom;

/// Response body charset detection and decoding.
pub mod encoding;

/// Embedded-state and markup extraction strategies.
pub mod extractor;

/// Page fetching seam and its reqwest implementation.
pub mod fetch;

/// Post identifier resolution and canonical URLs.
pub mod identifier;

/// Count normalization (`1.2万`, `1,234`, floats).
pub mod numeric;

/// Comment ranking.
pub mod ranking;

/// Content summary derivation.
pub mod summary;

// Public API - re-exports
pub use error::{ConfigError, FetchError, Result};
pub use extract::Extractor;
pub use fetch::{HttpFetcher, PageFetcher};
pub use options::Options;
pub use result::{Author, Comment, Interaction, PostRecord, Strategy, FETCH_FAILED_TITLE};

/// Extracts a post record from already fetched page text using default options.
///
/// `url` is the post URL the page was fetched from; the post identifier is
/// resolved from it.
#[must_use]
pub fn extract_html(page: &str, url: &str) -> PostRecord {
    extract_html_with_options(page, url, &Options::default())
}

/// Extracts a post record from already fetched page text with custom options.
///
/// # Example
///
/// ```rust
/// use post_extractor::{extract_html_with_options, Options};
///
/// let page = r#"<div class="comment-item"><span class="content">a</span></div>
///               <div class="comment-item"><span class="content">b</span></div>"#;
/// let options = Options {
///     max_comments: 1,
///     ..Options::default()
/// };
/// let record = extract_html_with_options(page, "https://xhslink.com/x", &options);
/// assert_eq!(record.top_comments.len(), 1);
/// ```
#[must_use]
pub fn extract_html_with_options(page: &str, url: &str, options: &Options) -> PostRecord {
    let post_id = identifier::resolve_post_id(url).unwrap_or_default();
    extractor::extract_page(page, &post_id, url, options)
}

/// Extracts a post record from raw response bytes, detecting the charset.
///
/// `content_type` is the response's `Content-Type` header, if known.
#[must_use]
pub fn extract_bytes(body: &[u8], content_type: Option<&str>, url: &str) -> PostRecord {
    let page = encoding::transcode_to_utf8(body, content_type);
    extract_html(&page, url)
}
