//! Embedded State Extraction
//!
//! Server-rendered post pages assign their full data model to
//! `window.__INITIAL_STATE__` inside a `<script>` tag. This is the primary
//! extraction strategy: the blob carries exact counts, image lists and the
//! comment feed, none of which are reliable in the visible markup.
//!
//! The state layout has shifted over time, so both the post detail node and
//! the comment list are looked up through ordered lists of candidate paths.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::numeric::normalize_count;
use crate::patterns::INITIAL_STATE;
use crate::ranking::rank_comments;
use crate::result::{Author, Comment, Interaction, PostRecord, Strategy};
use crate::summary::make_summary;
use crate::Options;

/// Nickname used for comments whose author is missing.
pub const ANONYMOUS_COMMENTER: &str = "匿名用户";

/// One step in a path through the state tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep {
    /// Object member with a fixed name.
    Key(&'static str),
    /// Object member named after the post identifier.
    PostId,
}

use PathStep::{Key, PostId};

/// Candidate locations of the post detail node, tried in order.
pub const DETAIL_PATHS: &[&[PathStep]] = &[
    &[Key("note"), Key("noteDetailMap"), PostId, Key("note")],
    &[Key("note"), Key("note")],
    &[Key("noteDetail"), Key("data"), Key("noteData")],
];

/// Candidate locations of the raw comment list, tried in order.
pub const COMMENT_PATHS: &[&[PathStep]] = &[
    &[Key("comment"), Key("comments")],
    &[Key("note"), Key("noteDetailMap"), PostId, Key("comments")],
];

/// Extract a post record from the page's embedded state.
///
/// # Returns
/// * `Some(record)` when the blob is present, parses, and holds a detail node
/// * `None` otherwise, signalling the caller to try the next strategy
#[must_use]
pub fn extract_from_state(
    page: &str,
    post_id: &str,
    source_url: &str,
    opts: &Options,
) -> Option<PostRecord> {
    let Some(state) = parse_initial_state(page) else {
        tracing::debug!(post_id, "no usable __INITIAL_STATE__ in page");
        return None;
    };

    let Some(detail) = find_object(&state, DETAIL_PATHS, post_id) else {
        tracing::debug!(post_id, "__INITIAL_STATE__ has no post detail node");
        return None;
    };

    let content = string_field(detail, "desc");
    let raw_comments = find_comment_list(&state, post_id);

    Some(PostRecord {
        title: string_field(detail, "title"),
        content_summary: make_summary(&content, opts.summary_length),
        content,
        author: author_from(detail.get("user")),
        interaction: interaction_from(detail.get("interactInfo")),
        top_comments: rank_comments(raw_comments, opts.max_comments),
        tags: tags_from(detail.get("tagList")),
        images: images_from(detail.get("imageList")),
        kind: non_empty(detail.get("type")).unwrap_or_else(|| "normal".to_string()),
        published_at: published_at(detail.get("time")),
        ..PostRecord::new(post_id, source_url, Strategy::EmbeddedState)
    })
}

/// Locate and parse the `__INITIAL_STATE__` object literal.
///
/// The platform serializes JavaScript `undefined` verbatim, which is not
/// JSON. Exactly that token is rewritten to `null` before parsing; no other
/// repairs are attempted.
#[must_use]
pub fn parse_initial_state(page: &str) -> Option<Value> {
    let caps = INITIAL_STATE.captures(page)?;
    let raw = caps[1].replace("undefined", "null");

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(error = %err, "__INITIAL_STATE__ is not valid JSON");
            None
        }
    }
}

/// Follow `path` from `root`, resolving [`PathStep::PostId`] to `post_id`.
fn walk<'a>(root: &'a Value, path: &[PathStep], post_id: &str) -> Option<&'a Value> {
    path.iter().try_fold(root, |node, step| {
        let key = match *step {
            Key(name) => name,
            PostId => post_id,
        };
        node.as_object()?.get(key)
    })
}

/// First candidate path that resolves to a non-empty object.
fn find_object<'a>(
    root: &'a Value,
    paths: &[&[PathStep]],
    post_id: &str,
) -> Option<&'a Map<String, Value>> {
    paths
        .iter()
        .filter_map(|path| walk(root, path, post_id)?.as_object())
        .find(|obj| !obj.is_empty())
}

/// Raw comments from the first candidate path holding a non-empty list.
fn find_comment_list(root: &Value, post_id: &str) -> Vec<Comment> {
    COMMENT_PATHS
        .iter()
        .filter_map(|path| walk(root, path, post_id)?.as_array())
        .find(|list| !list.is_empty())
        .map(|list| list.iter().filter_map(comment_from).collect())
        .unwrap_or_default()
}

fn comment_from(raw: &Value) -> Option<Comment> {
    let raw = raw.as_object()?;
    let nickname = raw
        .get("userInfo")
        .and_then(|user| user.get("nickname"))
        .and_then(Value::as_str)
        .map_or_else(|| ANONYMOUS_COMMENTER.to_string(), ToString::to_string);

    Some(Comment {
        nickname,
        content: string_field(raw, "content"),
        like_count: count_field(raw, "likeCount"),
        sub_comment_count: count_field(raw, "subCommentCount"),
    })
}

fn author_from(user: Option<&Value>) -> Author {
    let Some(user) = user.and_then(Value::as_object) else {
        return Author::default();
    };

    Author {
        id: non_empty(user.get("userId")),
        nickname: string_field(user, "nickname"),
        avatar_url: non_empty(user.get("avatar")),
    }
}

fn interaction_from(info: Option<&Value>) -> Interaction {
    let Some(info) = info.and_then(Value::as_object) else {
        return Interaction::default();
    };

    Interaction {
        like_count: count_field(info, "likedCount"),
        collect_count: count_field(info, "collectedCount"),
        comment_count: count_field(info, "commentCount"),
        share_count: count_field(info, "shareCount"),
    }
}

/// Image URLs, preferring `urlDefault` over `url`; entries with neither are dropped.
fn images_from(list: Option<&Value>) -> Vec<String> {
    list.and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|img| {
                    non_empty(img.get("urlDefault")).or_else(|| non_empty(img.get("url")))
                })
                .collect()
        })
        .unwrap_or_default()
}

fn tags_from(list: Option<&Value>) -> Vec<String> {
    list.and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(|tag| non_empty(tag.get("name"))).collect())
        .unwrap_or_default()
}

/// Publish time from an epoch-milliseconds `time` field.
fn published_at(time: Option<&Value>) -> Option<DateTime<Utc>> {
    let millis = time?.as_i64()?;
    DateTime::from_timestamp_millis(millis)
}

/// String member, with missing or `null` values read as empty.
fn string_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn count_field(obj: &Map<String, Value>, key: &str) -> i64 {
    obj.get(key).map_or(0, normalize_count)
}

fn non_empty(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}
