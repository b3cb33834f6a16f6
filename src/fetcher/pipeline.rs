//! Body decoding for fetched pages.
//!
//! User-submitted article URLs serve bytes in whatever charset the site
//! happens to use. Decoding order: charset from the Content-Type header,
//! then a `<meta>` declaration in the first 4KB, then detector sniffing.

use std::sync::LazyLock;

use bytes::Bytes;
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use regex::Regex;

use crate::fetcher::errors::FetchError;

/// How much of the body the meta scan and the detector get to look at.
const SNIFF_WINDOW: usize = 4096;

static HEADER_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<meta\s+[^>]*?(?:charset\s*=\s*["']?([^"'\s/>]+)|content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+))"#,
    )
    .unwrap()
});

/// Decode a fetched body to UTF-8, reporting the encoding used.
pub fn decode_body(content_type: &str, body: &Bytes) -> Result<(String, &'static str), FetchError> {
    let encoding = sniff_encoding(content_type, body);
    let (decoded, _, had_errors) = encoding.decode(body);
    if had_errors {
        return Err(FetchError::Charset(format!(
            "failed to decode content as {}",
            encoding.name()
        )));
    }
    Ok((decoded.into_owned(), encoding.name()))
}

fn sniff_encoding(content_type: &str, body: &[u8]) -> &'static Encoding {
    if let Some(encoding) = label_from_captures(HEADER_CHARSET_REGEX.captures(content_type)) {
        return encoding;
    }

    let window = &body[..body.len().min(SNIFF_WINDOW)];
    let window_str = String::from_utf8_lossy(window);
    if let Some(encoding) = label_from_captures(META_CHARSET_REGEX.captures(&window_str)) {
        return encoding;
    }

    let mut detector = EncodingDetector::new();
    detector.feed(window, false);
    detector.guess(None, true)
}

fn label_from_captures(captures: Option<regex::Captures<'_>>) -> Option<&'static Encoding> {
    let captures = captures?;
    let label = captures.get(1).or_else(|| captures.get(2))?;
    Encoding::for_label(label.as_str().trim().as_bytes())
}
