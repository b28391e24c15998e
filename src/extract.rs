//! Extraction orchestration.
//!
//! `Extractor::extract` resolves the post identifier, fetches the canonical
//! page once, and hands the text to the strategy chain. A failed fetch is
//! terminal and produces a degraded record instead of an error.

use std::sync::Arc;

use crate::error::Result;
use crate::extractor::extract_page;
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::identifier::{canonical_url, resolve_post_id, share_token};
use crate::result::PostRecord;
use crate::Options;

/// Post extractor bound to a page fetcher and options.
///
/// Cloning is cheap and clones share the fetcher, so one `Extractor` can
/// serve concurrent calls.
#[derive(Clone)]
pub struct Extractor {
    fetcher: Arc<dyn PageFetcher>,
    options: Options,
}

impl std::fmt::Debug for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Extractor {
    /// Extractor using an [`HttpFetcher`] built from `options`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(options: Options) -> Result<Self> {
        let fetcher = HttpFetcher::new(&options)?;
        Ok(Self::with_fetcher(Arc::new(fetcher), options))
    }

    /// Extractor using a caller-supplied fetcher.
    #[must_use]
    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>, options: Options) -> Self {
        Self { fetcher, options }
    }

    /// Options this extractor runs with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Extract a post record from `url`.
    ///
    /// Never fails: a fetch error yields a degraded record (see
    /// [`PostRecord::fetch_failed`]) carrying the resolved id and the error
    /// text.
    pub async fn extract(&self, url: &str) -> PostRecord {
        let post_id = resolve_post_id(url).unwrap_or_default();
        let target = canonical_url(&post_id, url);

        tracing::info!(
            url,
            target = %target,
            post_id = %post_id,
            shared = share_token(url).is_some(),
            "extracting post"
        );

        let page = match self.fetcher.fetch(&target).await {
            Ok(page) => page,
            Err(err) => {
                tracing::warn!(url = %target, error = %err, "page fetch failed");
                return PostRecord::fetch_failed(
                    &post_id,
                    url,
                    &err.to_string(),
                    self.options.summary_length,
                );
            }
        };

        let record = extract_page(&page, &post_id, url, &self.options);
        tracing::info!(
            post_id = %record.id,
            strategy = ?record.strategy,
            title = %record.title,
            comments = record.top_comments.len(),
            "extracted post"
        );
        record
    }

    /// Extract a post record from already fetched page text.
    #[must_use]
    pub fn extract_page(&self, page: &str, url: &str) -> PostRecord {
        crate::extract_html_with_options(page, url, &self.options)
    }
}
