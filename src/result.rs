//! Result types for extraction output.
//!
//! A [`PostRecord`] is built fresh for every extraction call and handed to the
//! caller by value; the extractor keeps no reference to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::summary::make_summary;

/// Title used when the page could not be fetched at all.
pub const FETCH_FAILED_TITLE: &str = "[提取失败]";

/// Post author as shown on the page.
///
/// An empty nickname means the author is unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Platform user id.
    pub id: Option<String>,

    /// Display name.
    pub nickname: String,

    /// Avatar image URL.
    pub avatar_url: Option<String>,
}

/// Interaction counters, already normalized to integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub like_count: i64,
    pub collect_count: i64,
    pub comment_count: i64,
    pub share_count: i64,
}

/// A single top-level comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Commenter display name.
    pub nickname: String,

    /// Comment text.
    pub content: String,

    /// Popularity count used for ranking.
    pub like_count: i64,

    /// Number of replies under this comment.
    pub sub_comment_count: i64,
}

/// Which extraction path produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Parsed from the embedded `__INITIAL_STATE__` blob.
    EmbeddedState,

    /// Parsed from the visible page structure and meta tags.
    Markup,

    /// The page could not be fetched; the record is degraded.
    FetchFailed,
}

/// Structured, bounded-size record extracted from a post page.
///
/// Invariants:
/// - `top_comments` never exceeds the configured cap and is sorted by
///   descending `like_count` (ties keep source order).
/// - `tags` and `images` contain no empty strings.
/// - `content_summary` is always derived from `content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    /// Canonical post identifier, or an empty placeholder.
    pub id: String,

    /// Input URL, verbatim.
    pub source_url: String,

    pub title: String,
    pub content: String,
    pub content_summary: String,
    pub author: Author,
    pub interaction: Interaction,
    pub top_comments: Vec<Comment>,
    pub tags: Vec<String>,
    pub images: Vec<String>,

    /// Post kind such as `normal` or `video`.
    pub kind: String,

    /// Publish time, when the page exposes one.
    pub published_at: Option<DateTime<Utc>>,

    /// When this record was produced.
    pub extracted_at: DateTime<Utc>,

    /// Extraction path that produced this record.
    pub strategy: Strategy,
}

impl PostRecord {
    /// Empty record for `id`/`source_url`, attributed to `strategy`.
    #[must_use]
    pub fn new(id: &str, source_url: &str, strategy: Strategy) -> Self {
        Self {
            id: id.to_string(),
            source_url: source_url.to_string(),
            title: String::new(),
            content: String::new(),
            content_summary: String::new(),
            author: Author::default(),
            interaction: Interaction::default(),
            top_comments: Vec::new(),
            tags: Vec::new(),
            images: Vec::new(),
            kind: "normal".to_string(),
            published_at: None,
            extracted_at: Utc::now(),
            strategy,
        }
    }

    /// Degraded record returned when the page fetch fails.
    ///
    /// `reason` ends up in `content`, and the summary is cut from it at
    /// `summary_length` characters like any other record's.
    #[must_use]
    pub fn fetch_failed(id: &str, source_url: &str, reason: &str, summary_length: usize) -> Self {
        let content = format!("无法获取笔记内容: {reason}");
        Self {
            title: FETCH_FAILED_TITLE.to_string(),
            content_summary: make_summary(&content, summary_length),
            content,
            ..Self::new(id, source_url, Strategy::FetchFailed)
        }
    }

    /// Whether this record came from a failed fetch.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.strategy == Strategy::FetchFailed
    }
}
