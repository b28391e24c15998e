//! Page fetching.
//!
//! [`PageFetcher`] is the seam between the extraction engine and the
//! network. [`HttpFetcher`] is the production implementation over a single
//! shared `reqwest::Client`, which pools connections and is safe to use from
//! many in-flight extractions at once.

use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, REFERER};
use reqwest::redirect::Policy;

use crate::encoding::transcode_to_utf8;
use crate::error::{FetchError, Result};
use crate::Options;

/// `Accept` header sent with page requests.
pub const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Maximum number of redirects followed per fetch.
pub const MAX_REDIRECTS: usize = 10;

/// Fetches the raw text of a page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the decoded page text.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on connection failure, timeout, non-success
    /// status, or an unreadable body.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// [`PageFetcher`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Build a fetcher with browser-like headers from `opts`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if a header value is invalid or the
    /// TLS backend fails to initialize.
    pub fn new(opts: &Options) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
        headers.insert(ACCEPT_LANGUAGE, header_value("Accept-Language", &opts.accept_language)?);
        headers.insert(REFERER, header_value("Referer", &opts.referer)?);

        let client = reqwest::Client::builder()
            .user_agent(opts.user_agent.as_str())
            .default_headers(headers)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .timeout(opts.timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            timeout: opts.timeout,
        })
    }

    fn request_error(&self, err: &reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout.as_secs())
        } else {
            FetchError::Request(error_chain(err))
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.request_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout.as_secs())
            } else {
                FetchError::Body(error_chain(&e))
            }
        })?;

        tracing::debug!(url, bytes = body.len(), "fetched page");
        Ok(transcode_to_utf8(&body, content_type.as_deref()))
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| FetchError::Client(format!("invalid {name} header: {e}")))
}

/// Render an error with its full source chain, outermost first.
///
/// reqwest's top-level message hides the cause ("error sending request"),
/// while the OS reason ("Connection refused") sits a few sources down.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
