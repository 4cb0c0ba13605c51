//! Video URL extraction from episode pages.
//!
//! Three independent probes over the player markup, merged in order with
//! last-writer-wins per quality key: `<source>` tags, the single player
//! `<video>` tag, and `data-player-*` attributes. Extraction fails only when
//! the union of all three is empty.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::dom::{Document, Selection};
use crate::error::{Error, Result};
use crate::patterns::{PLACEHOLDER_IMAGE, QUALITY_IN_URL, QUALITY_LABEL, VIDEO_QUALITIES};
use crate::text;

/// Extract all video URLs from an episode page.
///
/// Returns a quality → URL mapping; keys come from the fixed quality set
/// plus whatever the markup labels carry. URLs are entity-unescaped.
pub(crate) fn extract(html: &str) -> Result<BTreeMap<String, String>> {
    let doc = Document::from(html);
    let mut urls = BTreeMap::new();

    merge(&mut urls, from_source_tags(&doc), "source tags");
    merge(&mut urls, from_video_tag(&doc), "video tag");
    merge(&mut urls, from_data_attributes(&doc), "data attributes");

    if urls.is_empty() {
        warn!("all video URL probes came back empty");
        return Err(Error::NoVideoSources);
    }

    debug!(qualities = urls.len(), "video URLs extracted");
    Ok(urls)
}

fn merge(urls: &mut BTreeMap<String, String>, probe: BTreeMap<String, String>, origin: &str) {
    for (quality, url) in probe {
        debug!(%quality, probe = origin, "video source found");
        urls.insert(quality, url);
    }
}

/// Probe 1: `<source type="video/mp4">` elements. Quality from the `res`
/// attribute, falling back to digits in the `label` attribute.
fn from_source_tags(doc: &Document) -> BTreeMap<String, String> {
    let mut urls = BTreeMap::new();

    for node in doc.select(r#"source[type="video/mp4"]"#).nodes() {
        let source = Selection::from(*node);
        let Some(src) = source.attr("src").map(|s| s.to_string()) else {
            continue;
        };
        if !is_video_src(&src) {
            continue;
        }

        let quality = source
            .attr("res")
            .map(|s| s.to_string())
            .filter(|r| !r.is_empty())
            .or_else(|| {
                source.attr("label").and_then(|label| {
                    QUALITY_LABEL
                        .captures(&label)
                        .and_then(|c| c.get(1))
                        .map(|m| m.as_str().to_string())
                })
            });

        if let Some(quality) = quality {
            urls.insert(quality, text::unescape_entities(&src));
        }
    }

    urls
}

/// Probe 2: the single `<video class="vjs-tech">` element. Quality is read
/// from the URL itself, e.g. `video.720.mp4`.
fn from_video_tag(doc: &Document) -> BTreeMap<String, String> {
    let mut urls = BTreeMap::new();

    if let Some(node) = doc.select("video.vjs-tech").nodes().first() {
        let video = Selection::from(*node);
        if let Some(src) = video.attr("src").map(|s| s.to_string()) {
            if is_video_src(&src) {
                if let Some(quality) = QUALITY_IN_URL
                    .captures(&src)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str().to_string())
                {
                    urls.insert(quality, text::unescape_entities(&src));
                }
            }
        }
    }

    urls
}

/// Probe 3: custom `data-player-<quality>` attributes on the player element.
fn from_data_attributes(doc: &Document) -> BTreeMap<String, String> {
    let mut urls = BTreeMap::new();

    for node in doc.select("[data-player-1080]").nodes() {
        let player = Selection::from(*node);
        for quality in VIDEO_QUALITIES {
            let attr = format!("data-player-{quality}");
            let Some(url) = player.attr(&attr).map(|s| s.to_string()) else {
                continue;
            };
            if is_video_src(&url) {
                urls.insert(quality.to_string(), text::unescape_entities(&url));
            }
        }
    }

    urls
}

/// A usable video source points at an mp4 and is not the placeholder frame.
fn is_video_src(src: &str) -> bool {
    src.contains(".mp4") && !src.contains(PLACEHOLDER_IMAGE)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn source_tags_with_res_and_label() {
        let html = concat!(
            r#"<video><source type="video/mp4" src="/v/ep.1080.mp4?tk=1&amp;s=2" res="1080">"#,
            r#"<source type="video/mp4" src="/v/ep.720.mp4" label="720p HD"></video>"#,
        );
        let urls = extract(html).unwrap();
        assert_eq!(urls["1080"], "/v/ep.1080.mp4?tk=1&s=2");
        assert_eq!(urls["720"], "/v/ep.720.mp4");
    }

    #[test]
    fn probes_merge_across_strategies() {
        let html = concat!(
            r#"<video><source type="video/mp4" src="/v/ep.720.mp4" res="720"></video>"#,
            r#"<div data-player-1080="/v/ep.1080.mp4"></div>"#,
        );
        let urls = extract(html).unwrap();
        assert_eq!(urls.len(), 2);
        assert!(urls.contains_key("720"));
        assert!(urls.contains_key("1080"));
    }

    #[test]
    fn later_probe_overwrites_same_quality() {
        let html = concat!(
            r#"<video><source type="video/mp4" src="/old.720.mp4" res="720"></video>"#,
            r#"<div data-player-1080="/v.1080.mp4" data-player-720="/new.720.mp4"></div>"#,
        );
        let urls = extract(html).unwrap();
        assert_eq!(urls["720"], "/new.720.mp4");
    }

    #[test]
    fn video_tag_quality_from_url() {
        let html = r#"<video class="vjs-tech" src="/videos/naruto.480.mp4?sig=a&amp;b=c"></video>"#;
        let urls = extract(html).unwrap();
        assert_eq!(urls["480"], "/videos/naruto.480.mp4?sig=a&b=c");
    }

    #[test]
    fn placeholder_image_never_accepted() {
        let html = r#"<video class="vjs-tech" src="/img/pixel.png?as.1080.mp4"></video>"#;
        assert!(matches!(extract(html), Err(Error::NoVideoSources)));
    }

    #[test]
    fn empty_page_fails_with_no_sources() {
        assert!(matches!(extract("<html><body></body></html>"), Err(Error::NoVideoSources)));
    }

    #[test]
    fn non_mp4_sources_skipped() {
        let html = r#"<video><source type="video/mp4" src="/v/stream.m3u8" res="720"></video>"#;
        assert!(extract(html).is_err());
    }
}
