//! # jutsu-catalog
//!
//! Structured catalog extraction for jut.su anime pages.
//!
//! The site's markup has no reliable schema: headings marking seasons and
//! story arcs share one CSS class, and episode links are associated with
//! their season only by document order and URL path segments. This crate
//! reconciles those signals into one consistent
//! season → arc → episode hierarchy, extracts the surrounding metadata
//! (title, genres, years, rating, poster, description), and resolves video
//! URLs from episode pages.
//!
//! Network transport, authentication, and file download are out of scope:
//! callers fetch pages themselves and feed the markup in.
//!
//! ## Quick start
//!
//! ```rust
//! use jutsu_catalog::parse_catalog;
//!
//! let html = r#"<html><body>
//!   <h1 class="header_video">Смотреть Наруто все серии</h1>
//!   <div class="watch_l">
//!     <a href="/naruto/episode-1.html"><i></i>1 серия</a>
//!   </div>
//! </body></html>"#;
//!
//! let anime = parse_catalog(html, "https://jut.su/naruto/")?;
//! assert_eq!(anime.title, "Наруто");
//! assert_eq!(anime.episodes.len(), 1);
//! # Ok::<(), jutsu_catalog::Error>(())
//! ```
//!
//! Parsing is pure and synchronous: no I/O, no shared mutable state, safe to
//! run concurrently on independent inputs. The returned tree is immutable
//! and safe for unsynchronized concurrent reads.

mod error;
mod extract;
mod video;

/// Thin DOM helpers over `dom_query`.
pub mod dom;

/// Character encoding detection and decoding (site default: windows-1251).
pub mod encoding;

/// Heading classification: season boundary vs story-arc boundary.
pub mod headings;

/// Season/arc/episode hierarchy assembly.
mod hierarchy;

/// Per-field metadata extractors.
mod metadata;

/// Catalog value objects.
pub mod models;

/// Compiled regex patterns, CSS selectors, and site constants.
pub mod patterns;

/// Text cleanup and token extraction utilities.
pub mod text;

/// URL utilities for absolutizing catalog hrefs.
pub mod url_utils;

use std::collections::BTreeMap;

// Public API - re-exports
pub use error::{Error, Result};
pub use models::{Anime, Arc, Episode, Rating, Season};

/// Parse a catalog page into an [`Anime`].
///
/// # Arguments
///
/// * `html` - The page markup as a UTF-8 string
/// * `url` - The page URL, kept on the result and used to absolutize
///   episode links
///
/// # Errors
///
/// Returns [`Error::Malformed`] when the page carries no recognizable title
/// heading. Missing optional fields degrade gracefully instead of failing.
pub fn parse_catalog(html: &str, url: &str) -> Result<Anime> {
    extract::parse_document(html, url)
}

/// Parse a catalog page from raw bytes with automatic encoding detection.
///
/// Pages are windows-1251 unless a meta charset (or a utf-8 token in the
/// document head) says otherwise.
pub fn parse_catalog_bytes(html: &[u8], url: &str) -> Result<Anime> {
    let decoded = encoding::decode(html);
    parse_catalog(&decoded, url)
}

/// Extract quality → video URL pairs from an episode page.
///
/// Three probes run in order (source tags, single video tag, data
/// attributes) and merge last-writer-wins per quality key.
///
/// # Errors
///
/// Returns [`Error::NoVideoSources`] when all probes come back empty.
pub fn extract_video_urls(html: &str) -> Result<BTreeMap<String, String>> {
    video::extract(html)
}
