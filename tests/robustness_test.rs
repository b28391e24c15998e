use post_extractor::{extract_bytes, extract_html, Strategy};
use std::time::{Duration, Instant};

const POST_URL: &str = "https://www.xiaohongshu.com/explore/66a1b2c3d4e5f6";

#[test]
fn extract_does_not_panic_on_malformed_html_unclosed_tags() {
    let html = r#"<div id="detail-title">title<div id="detail-desc">more"#;
    let record = extract_html(html, POST_URL);
    assert_eq!(record.strategy, Strategy::Markup);
    assert!(record.title.contains("title"));
}

#[test]
fn extract_does_not_panic_on_malformed_html_invalid_nesting() {
    let record = extract_html("<p><div></p></div>", POST_URL);
    assert_eq!(record.title, "[无标题]");
}

#[test]
fn extract_does_not_panic_on_broken_attributes() {
    let record = extract_html("<div class=\"comment-item id=broken>", POST_URL);
    assert!(record.top_comments.is_empty());
}

#[test]
fn extract_does_not_panic_on_truncated_state() {
    let html = r#"<script>window.__INITIAL_STATE__={"note":{"note":{"title":"cut"#;
    let record = extract_html(html, POST_URL);
    assert_eq!(record.strategy, Strategy::Markup);
}

#[test]
fn extract_tolerates_wrong_types_in_state() {
    let html = r#"<script>window.__INITIAL_STATE__={"note":{"note":{
        "title":42,
        "desc":null,
        "user":"nobody",
        "interactInfo":{"likedCount":[1],"collectedCount":{"n":2},"commentCount":true,"shareCount":"n/a"},
        "imageList":"none",
        "tagList":[1,"x",{"name":7}]
    }},"comment":{"comments":[5,"text",{"content":"ok","likeCount":"1千"}]}};</script>"#;

    let record = extract_html(html, POST_URL);

    assert_eq!(record.strategy, Strategy::EmbeddedState);
    assert!(record.title.is_empty());
    assert!(record.content.is_empty());
    assert!(record.author.nickname.is_empty());
    assert_eq!(record.interaction.like_count, 0);
    assert_eq!(record.interaction.collect_count, 0);
    assert_eq!(record.interaction.share_count, 0);
    assert!(record.images.is_empty());
    assert!(record.tags.is_empty());
    assert_eq!(record.top_comments.len(), 1);
    assert_eq!(record.top_comments[0].like_count, 1);
}

#[test]
fn extract_handles_whitespace_only_input() {
    let record = extract_html("   \n\t  ", POST_URL);
    assert_eq!(record.id, "66a1b2c3d4e5f6");
    assert!(record.content.is_empty());
}

#[test]
fn extract_handles_large_html_without_panic() {
    let target_size = 10 * 1024 * 1024 + 1;
    let chunk = r#"<div class="comment-item"><span class="name">u</span><span class="content">some repeated comment</span></div>"#;
    let mut html = String::with_capacity(target_size + 128);
    html.push_str("<html><body>");
    while html.len() < target_size {
        html.push_str(chunk);
    }
    html.push_str("</body></html>");

    let start = Instant::now();
    let record = extract_html(&html, POST_URL);
    let elapsed = start.elapsed();

    assert_eq!(record.top_comments.len(), 3);
    assert!(elapsed < Duration::from_secs(30), "large HTML parsing took {elapsed:?}");
}

#[test]
fn extract_handles_null_bytes_gracefully() {
    let record = extract_html("text\x00more", POST_URL);
    assert_eq!(record.strategy, Strategy::Markup);
}

#[test]
fn extract_bytes_decodes_meta_charset() {
    let (body, _, _) = encoding_rs::GBK.encode(
        r#"<html><head><meta charset="gbk"><meta property="og:title" content="编码测试"></head></html>"#,
    );
    let record = extract_bytes(&body, None, POST_URL);
    assert_eq!(record.title, "编码测试");
}

#[test]
fn extract_bytes_tolerates_invalid_utf8() {
    let record = extract_bytes(b"<div id=\"detail-title\">ok\xFF\xFE</div>", None, POST_URL);
    assert!(record.title.starts_with("ok"));
}
