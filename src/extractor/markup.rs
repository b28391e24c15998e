//! Markup Fallback Extraction
//!
//! Used when the page carries no usable embedded state. Reads the visible
//! post structure with CSS selectors and falls back to Open Graph meta tags
//! for title and description. Always produces a record; anything missing is
//! left at its placeholder or default.

use dom_query::Selection;

use crate::dom;
use crate::numeric::normalize_count_text;
use crate::ranking::rank_comments;
use crate::result::{Author, Comment, Interaction, PostRecord, Strategy};
use crate::summary::make_summary;
use crate::Options;

/// Title used when neither the markup nor meta tags provide one.
pub const UNTITLED: &str = "[无标题]";

/// Nickname used for comment blocks without an author element.
pub const ANONYMOUS_COMMENTER: &str = "匿名";

pub const TITLE_SELECTORS: &[&str] = &["#detail-title", ".title, .note-title"];
pub const CONTENT_SELECTORS: &[&str] = &["#detail-desc", ".desc, .note-content, .content"];
pub const AUTHOR_SELECTORS: &[&str] = &[".author .name, .user-nickname"];
pub const LIKE_COUNT_SELECTORS: &[&str] = &[r#".like-wrapper .count, [data-type="like"] .count"#];

pub const COMMENT_BLOCK_SELECTOR: &str = ".comment-item, .parent-comment";
pub const COMMENT_AUTHOR_SELECTORS: &[&str] = &[".name, .user-name"];
pub const COMMENT_TEXT_SELECTORS: &[&str] = &[".content, .comment-text, .note-text"];
pub const COMMENT_LIKE_SELECTORS: &[&str] = &[".like .count, .like-count"];

pub const TAG_SELECTOR: &str = ".tag, .hashtag, a[href*='tag']";

/// Extract a post record from the page markup.
#[must_use]
pub fn extract_from_markup(
    page: &str,
    post_id: &str,
    source_url: &str,
    opts: &Options,
) -> PostRecord {
    let doc = dom::parse(page);
    let root = doc.select("html");

    let title = dom::first_text(&root, TITLE_SELECTORS)
        .or_else(|| dom::meta_content(&doc, "og:title"))
        .unwrap_or_else(|| UNTITLED.to_string());

    let content = dom::first_text(&root, CONTENT_SELECTORS)
        .or_else(|| dom::meta_content(&doc, "og:description"))
        .unwrap_or_default();

    let author = Author {
        nickname: dom::first_text(&root, AUTHOR_SELECTORS).unwrap_or_default(),
        ..Author::default()
    };

    let interaction = Interaction {
        like_count: dom::first_text(&root, LIKE_COUNT_SELECTORS)
            .map_or(0, |text| normalize_count_text(&text)),
        ..Interaction::default()
    };

    PostRecord {
        title,
        content_summary: make_summary(&content, opts.summary_length),
        content,
        author,
        interaction,
        top_comments: extract_comments(&root, opts.max_comments),
        tags: extract_tags(&root),
        ..PostRecord::new(post_id, source_url, Strategy::Markup)
    }
}

/// Comments from the first `max_count` comment blocks, most liked first.
///
/// Blocks without comment text are skipped; they still count toward the cap.
fn extract_comments(root: &Selection, max_count: usize) -> Vec<Comment> {
    let comments = root
        .select(COMMENT_BLOCK_SELECTOR)
        .nodes()
        .iter()
        .take(max_count)
        .filter_map(|node| {
            let block = Selection::from(*node);
            let content = dom::first_text(&block, COMMENT_TEXT_SELECTORS)?;

            Some(Comment {
                nickname: dom::first_text(&block, COMMENT_AUTHOR_SELECTORS)
                    .unwrap_or_else(|| ANONYMOUS_COMMENTER.to_string()),
                content,
                like_count: dom::first_text(&block, COMMENT_LIKE_SELECTORS)
                    .map_or(0, |text| normalize_count_text(&text)),
                sub_comment_count: 0,
            })
        })
        .collect();

    rank_comments(comments, max_count)
}

/// Tag and hashtag labels with any leading `#` removed.
fn extract_tags(root: &Selection) -> Vec<String> {
    let mut tags = Vec::new();

    for node in root.select(TAG_SELECTOR).nodes() {
        let sel = Selection::from(*node);
        let Some(text) = dom::trimmed_text(&sel) else {
            continue;
        };

        let tag = text.trim_start_matches('#').trim();
        if !tag.is_empty() {
            tags.push(tag.to_string());
        }
    }

    tags
}
