//! Compiled regex patterns, CSS selectors, and site constants.
//!
//! All patterns are compiled once at first use with `LazyLock` and reused for
//! the program lifetime. Patterns are organized by the pipeline stage that
//! consumes them.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Site constants
// =============================================================================

/// Default base for absolutizing relative hrefs when the page URL is unusable.
pub const BASE_URL: &str = "https://jut.su";

/// Status value emitted when the page links into the ongoing catalog.
pub const STATUS_ONGOING: &str = "онгоинг";

/// Qualities probed on episode pages, highest first.
pub const VIDEO_QUALITIES: [&str; 4] = ["1080", "720", "480", "360"];

/// Placeholder poster frame; never a real video source.
pub const PLACEHOLDER_IMAGE: &str = "pixel.png";

/// SEO filler tokens stripped from descriptions (lowercase).
pub const SEO_WORDS: [&str; 7] = [
    "серия", "серии", "сезон", "онлайн", "аниме", "видео", "смотреть",
];

pub const MIN_YEAR: u32 = 1900;
pub const MAX_YEAR: u32 = 2100;
pub const MIN_SEASON_NUMBER: u32 = 1;
pub const MAX_SEASON_NUMBER: u32 = 20;

/// Items scanned past a heading when looking for its next episode link.
pub const HEADING_LOOKAHEAD: usize = 100;

// =============================================================================
// CSS selectors
// =============================================================================

pub const SELECTOR_TITLE: &str = "h1.header_video";
pub const SELECTOR_INFO_BLOCK: &str = "div.under_video_additional";
pub const SELECTOR_POSTER: &str = "div.all_anime_title";
pub const SELECTOR_POSTER_META: &str = r#"meta[property="yandex_recommendations_image"]"#;
pub const SELECTOR_AGE_RATING: &str = "span.age_rating_all";
pub const SELECTOR_DESCRIPTION: &str = "p.under_video";
pub const SELECTOR_RATING_VALUE: &str = r#"span[itemprop="ratingValue"]"#;
pub const SELECTOR_RATING_BEST: &str = r#"span[itemprop="bestRating"]"#;
pub const SELECTOR_RATING_WORST: &str = r#"meta[itemprop="worstRating"]"#;
pub const SELECTOR_RATING_COUNT: &str = r#"span[itemprop="ratingCount"]"#;
pub const SELECTOR_WATCH_DIV: &str = "div.watch_l";
pub const SELECTOR_ONGOING_LINK: &str = r#"a[href*="/anime/ongoing/"]"#;
pub const SELECTOR_CATALOG_LINKS: &str = r#"a[href*="/anime/"]"#;

/// Combined document-order scan over heading candidates and episode links.
pub const SELECTOR_PAGE_ITEMS: &str = r#"h2.the-anime-season, a[href*="episode-"]"#;

/// Class marking a heading as an unambiguous season boundary.
pub const CLASS_BOLD_SEASON: &str = "need_bold_season";

// =============================================================================
// URL patterns
// =============================================================================

/// `/episode-N.html` path segment of an episode link.
pub static EPISODE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/episode-(\d+)\.html").expect("EPISODE_URL regex"));

/// `/season-N/` path segment of an episode link.
pub static SEASON_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/season-(\d+)/").expect("SEASON_URL regex"));

// =============================================================================
// Heading classification patterns
// =============================================================================

/// "part N" marker, Cyrillic or Latin; always classifies a heading as an arc.
pub static PART_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)часть\s*\d+|part\s*\d+").expect("PART_HEADER regex"));

/// Season number patterns, tried in order. Ranges are checked by the caller.
pub static SEASON_WITH_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+сезон").expect("SEASON_WITH_SUFFIX regex"));

pub static SEASON_IN_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+)\s+сезон\)").expect("SEASON_IN_BRACKETS regex"));

pub static NUMBER_IN_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+)").expect("NUMBER_IN_BRACKETS regex"));

pub static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)").expect("LEADING_NUMBER regex"));

pub static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("DIGIT_RUN regex"));

/// Season display-title derivation.
pub static SEASON_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*\(\d+\s+сезон\)").expect("SEASON_TITLE regex"));

pub static PLAIN_SEASON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\s+сезон\s*$").expect("PLAIN_SEASON regex"));

pub static TITLE_BEFORE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+\d+").expect("TITLE_BEFORE_NUMBER regex"));

// =============================================================================
// Metadata patterns
// =============================================================================

pub static WATCH_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Смотреть\s+").expect("WATCH_PREFIX regex"));

pub static ALL_EPISODES_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+все серии(?:\s+и сезоны)?$").expect("ALL_EPISODES_SUFFIX regex")
});

pub static AND_SEASONS_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+и сезоны$").expect("AND_SEASONS_SUFFIX regex"));

/// Catalog anchor prefix stripped from genre/theme texts.
pub static ANIME_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Аниме\s*").expect("ANIME_PREFIX regex"));

pub static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})").expect("YEAR regex"));

pub static YEAR_EXACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("YEAR_EXACT regex"));

/// Raw-markup fallbacks for the release-year labels.
pub static YEARS_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Годы выпуска:\s*(.*?)(?:<br|Оригинальное)").expect("YEARS_LABEL regex")
});

pub static YEAR_LABEL_MARKED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Год выпуска:.*?<a[^>]*>.*?<i>.*?</i>\s*(\d{4})").expect("YEAR_LABEL_MARKED regex")
});

pub static YEAR_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)Год выпуска:.*?(\d{4})").expect("YEAR_LABEL regex"));

/// Inline `background: url(...)` style of the poster block.
pub static POSTER_BACKGROUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"background:\s*url\(['"]?(.+?)['"]?\)"#).expect("POSTER_BACKGROUND regex")
});

pub const LABEL_ORIGINAL_TITLE: &str = "Оригинальное название:";

// =============================================================================
// Video extraction patterns
// =============================================================================

/// First digit run in a `label` attribute, e.g. "720p HD".
pub static QUALITY_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)").expect("QUALITY_LABEL regex"));

/// Quality embedded in a video URL, e.g. `video.720.mp4`.
pub static QUALITY_IN_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(\d+)\.").expect("QUALITY_IN_URL regex"));

// =============================================================================
// Text cleaning patterns
// =============================================================================

pub static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE regex"));

pub static EDGE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[,\s]+|[,\s]+$").expect("EDGE_PUNCT regex"));

/// `<br>` separators splitting the info block into sections.
pub static BR_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("BR_TAG regex"));
