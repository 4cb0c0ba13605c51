//! Character encoding detection and decoding.
//!
//! Catalog pages are served as windows-1251 unless they declare otherwise, so
//! detection differs from the usual web default: an explicit meta charset
//! wins, a literal "utf-8" token in the document head is honored, and
//! everything else falls back to windows-1251.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1251};
use regex::Regex;

/// Bytes examined for charset declarations.
const SNIFF_WINDOW: usize = 5000;

/// Match `<meta charset="...">` tag.
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>]+)"#).expect("valid regex")
});

/// Detect character encoding from raw page bytes.
///
/// Declaration sources, in order:
/// 1. `<meta charset="...">` (also matches the `http-equiv` form's
///    `charset=` tail)
/// 2. a bare "utf-8" token anywhere in the first [`SNIFF_WINDOW`] bytes
/// 3. windows-1251, the site default
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head = &html[..html.len().min(SNIFF_WINDOW)];
    let head_str = String::from_utf8_lossy(head);

    if let Some(caps) = CHARSET_META_RE.captures(&head_str) {
        if let Some(label) = caps.get(1) {
            if let Some(encoding) = Encoding::for_label(label.as_str().as_bytes()) {
                return encoding;
            }
        }
    }

    if head_str.to_lowercase().contains("utf-8") {
        return UTF_8;
    }

    WINDOWS_1251
}

/// Decode raw page bytes to a UTF-8 string.
///
/// Invalid byte sequences are replaced with � rather than causing errors.
#[must_use]
pub fn decode(html: &[u8]) -> String {
    let encoding = detect_encoding(html);

    if encoding == UTF_8 {
        return String::from_utf8_lossy(html).into_owned();
    }

    let (decoded, _encoding_used, _had_errors) = encoding.decode(html);
    decoded.into_owned()
}
