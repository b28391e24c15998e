//! Configuration options for post extraction.
//!
//! The `Options` struct bounds the size of extracted records and configures
//! the outbound page fetch. Defaults match a desktop browser visiting the
//! platform's web client.

use std::time::Duration;

use crate::error::ConfigError;

/// Desktop Chrome user agent sent with page requests.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Prefix for environment variable overrides (`CL_EXTRACT_TIMEOUT`, ...).
pub const ENV_PREFIX: &str = "CL_";

/// Configuration options for extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use post_extractor::Options;
///
/// let options = Options {
///     max_comments: 5,
///     ..Options::default()
/// };
/// assert_eq!(options.summary_length, 200);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Maximum number of ranked comments kept on a record.
    ///
    /// Default: `3`
    pub max_comments: usize,

    /// Maximum summary length in characters, before the `...` marker.
    ///
    /// Default: `200`
    pub summary_length: usize,

    /// Upper bound for a single page fetch, connect through body.
    ///
    /// Default: 15 seconds
    pub timeout: Duration,

    /// `User-Agent` header for page requests.
    pub user_agent: String,

    /// `Accept-Language` header for page requests.
    ///
    /// Default: `zh-CN,zh;q=0.9,en;q=0.8`
    pub accept_language: String,

    /// `Referer` header for page requests.
    ///
    /// Default: `https://www.xiaohongshu.com/`
    pub referer: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_comments: 3,
            summary_length: 200,
            timeout: Duration::from_secs(15),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: "zh-CN,zh;q=0.9,en;q=0.8".to_string(),
            referer: "https://www.xiaohongshu.com/".to_string(),
        }
    }
}

impl Options {
    /// Load options from `CL_`-prefixed environment variables.
    ///
    /// Recognized: `CL_EXTRACT_TIMEOUT` (seconds), `CL_EXTRACT_MAX_COMMENTS`,
    /// `CL_EXTRACT_SUMMARY_LENGTH`, `CL_USER_AGENT`. Unset or empty variables
    /// keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse or the timeout
    /// is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Options::from_env`] with an injectable variable lookup.
    ///
    /// # Errors
    ///
    /// See [`Options::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| {
            lookup(&format!("{ENV_PREFIX}{key}")).filter(|value| !value.trim().is_empty())
        };

        let timeout_secs = parse_u64(&var, "EXTRACT_TIMEOUT", defaults.timeout.as_secs())?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: format!("{ENV_PREFIX}EXTRACT_TIMEOUT"),
                message: "must be at least 1 second".to_string(),
            });
        }

        let max_comments = usize::try_from(parse_u64(
            &var,
            "EXTRACT_MAX_COMMENTS",
            defaults.max_comments as u64,
        )?)
        .map_err(|e| ConfigError::InvalidValue {
            name: format!("{ENV_PREFIX}EXTRACT_MAX_COMMENTS"),
            message: e.to_string(),
        })?;

        let summary_length = usize::try_from(parse_u64(
            &var,
            "EXTRACT_SUMMARY_LENGTH",
            defaults.summary_length as u64,
        )?)
        .map_err(|e| ConfigError::InvalidValue {
            name: format!("{ENV_PREFIX}EXTRACT_SUMMARY_LENGTH"),
            message: e.to_string(),
        })?;

        Ok(Self {
            max_comments,
            summary_length,
            timeout: Duration::from_secs(timeout_secs),
            user_agent: var("USER_AGENT").unwrap_or(defaults.user_agent),
            ..defaults
        })
    }
}

fn parse_u64<F>(var: &F, key: &str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(value) => value.trim().parse().map_err(|e| ConfigError::ParseInt {
            name: format!("{ENV_PREFIX}{key}"),
            source: e,
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_options() {
        let opts = Options::default();

        assert_eq!(opts.max_comments, 3);
        assert_eq!(opts.summary_length, 200);
        assert_eq!(opts.timeout, Duration::from_secs(15));
        assert!(opts.user_agent.contains("Chrome/120"));
        assert!(opts.accept_language.starts_with("zh-CN"));
        assert_eq!(opts.referer, "https://www.xiaohongshu.com/");
    }

    #[test]
    fn test_from_lookup_empty_keeps_defaults() {
        let opts = Options::from_lookup(lookup(&[])).unwrap();
        assert_eq!(opts.max_comments, 3);
        assert_eq!(opts.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let opts = Options::from_lookup(lookup(&[
            ("CL_EXTRACT_TIMEOUT", "5"),
            ("CL_EXTRACT_MAX_COMMENTS", " 10 "),
            ("CL_EXTRACT_SUMMARY_LENGTH", "80"),
            ("CL_USER_AGENT", "test-agent"),
        ]))
        .unwrap();

        assert_eq!(opts.timeout, Duration::from_secs(5));
        assert_eq!(opts.max_comments, 10);
        assert_eq!(opts.summary_length, 80);
        assert_eq!(opts.user_agent, "test-agent");
    }

    #[test]
    fn test_blank_value_ignored() {
        let opts = Options::from_lookup(lookup(&[("CL_EXTRACT_MAX_COMMENTS", "  ")])).unwrap();
        assert_eq!(opts.max_comments, 3);
    }

    #[test]
    fn test_rejects_non_numeric() {
        let err = Options::from_lookup(lookup(&[("CL_EXTRACT_MAX_COMMENTS", "lots")])).unwrap_err();
        assert!(err.to_string().contains("CL_EXTRACT_MAX_COMMENTS"));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let err = Options::from_lookup(lookup(&[("CL_EXTRACT_TIMEOUT", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
