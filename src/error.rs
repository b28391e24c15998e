//! Error types for post-extractor.
//!
//! Extraction itself never fails: every failure mode resolves to a (possibly
//! degraded) [`PostRecord`](crate::PostRecord). These errors surface only at
//! the page-fetch boundary and when loading options from the environment.

/// Error returned by a [`PageFetcher`](crate::fetch::PageFetcher).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed from the options.
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// The request could not be sent or the connection failed.
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status} for {url}")]
    Status {
        /// Numeric status code.
        status: u16,
        /// URL that was requested (after redirects).
        url: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Error raised while loading [`Options`](crate::Options) from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
}

/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;
