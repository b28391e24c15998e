//! Character encoding detection and transcoding.
//!
//! Fetched post pages are decoded to UTF-8 before extraction. The charset is
//! taken from the `Content-Type` response header when present, then from
//! HTML meta tags, defaulting to UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("valid regex")
});

/// Match `charset=...` inside a `Content-Type` header value
#[allow(clippy::expect_used)]
static HEADER_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).expect("valid regex")
});

/// Detect character encoding of a response body.
///
/// Order:
/// 1. `charset=` in the `Content-Type` header
/// 2. `<meta charset>` / `http-equiv` declaration in the first 1024 bytes
/// 3. UTF-8
#[must_use]
pub fn detect_encoding(body: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some(encoding) = content_type
        .and_then(|ct| capture(&HEADER_CHARSET_RE, ct))
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return encoding;
    }

    let head = String::from_utf8_lossy(&body[..body.len().min(1024)]);
    capture(&CHARSET_META_RE, &head)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}

fn capture(re: &Regex, haystack: &str) -> Option<String> {
    re.captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Decode a response body to a UTF-8 string.
///
/// Invalid sequences become U+FFFD rather than failing the fetch.
#[must_use]
pub fn transcode_to_utf8(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = detect_encoding(body, content_type);

    if encoding == UTF_8 {
        return String::from_utf8_lossy(body).into_owned();
    }

    let (decoded, _encoding_used, _had_errors) = encoding.decode(body);
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_charset_wins() {
        let body = br#"<html><head><meta charset="utf-8"></head></html>"#;
        let encoding = detect_encoding(body, Some("text/html; charset=GBK"));
        assert_eq!(encoding.name(), "GBK");
    }

    #[test]
    fn meta_charset_used_without_header() {
        let body = br#"<html><head><meta charset="gb2312"></head></html>"#;
        assert_eq!(detect_encoding(body, Some("text/html")).name(), "GBK");
    }

    #[test]
    fn http_equiv_charset() {
        let body = br#"<meta http-equiv="Content-Type" content="text/html; charset=ISO-8859-1">"#;
        // encoding_rs maps ISO-8859-1 to windows-1252 per WHATWG
        assert_eq!(detect_encoding(body, None).name(), "windows-1252");
    }

    #[test]
    fn default_to_utf8() {
        assert_eq!(detect_encoding(b"<html></html>", None), UTF_8);
        assert_eq!(detect_encoding(b"<html></html>", Some("text/html; charset=bogus")), UTF_8);
    }

    #[test]
    fn transcode_gbk_to_utf8() {
        // "中文" in GBK
        let body = b"<html><body>\xD6\xD0\xCE\xC4</body></html>";
        let text = transcode_to_utf8(body, Some("text/html; charset=gbk"));
        assert!(text.contains("中文"));
    }

    #[test]
    fn transcode_invalid_utf8_is_lossy() {
        let body = b"<html><body>Test \xFF\xFE Invalid</body></html>";
        let text = transcode_to_utf8(body, None);
        assert!(text.contains("Test"));
        assert!(text.contains("Invalid"));
    }
}
