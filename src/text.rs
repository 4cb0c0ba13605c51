//! Text cleanup and token extraction utilities.
//!
//! Everything here is pure string-in/string-out: whitespace normalization,
//! SEO-word stripping, year and season-number extraction, entity unescaping.

use crate::patterns::{
    DIGIT_RUN, EDGE_PUNCT, LEADING_NUMBER, MAX_SEASON_NUMBER, MAX_YEAR, MIN_SEASON_NUMBER,
    MIN_YEAR, NUMBER_IN_BRACKETS, SEASON_IN_BRACKETS, SEASON_WITH_SUFFIX, SEO_WORDS,
    WHITESPACE, YEAR, YEAR_EXACT,
};

/// Tokens this short are kept even when they collide with an SEO word.
const MIN_WORD_LENGTH: usize = 2;

/// Collapse whitespace runs and trim leading/trailing commas and spaces.
#[must_use]
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let collapsed = WHITESPACE.replace_all(text, " ");
    EDGE_PUNCT.replace_all(collapsed.trim(), "").into_owned()
}

/// Clean a description: collapse whitespace, drop standalone SEO filler
/// tokens longer than [`MIN_WORD_LENGTH`], and collapse consecutive
/// duplicate tokens.
#[must_use]
pub fn clean_description(description: &str) -> String {
    if description.is_empty() {
        return String::new();
    }

    let mut cleaned: Vec<&str> = Vec::new();
    let mut prev: Option<&str> = None;

    for word in description.split_whitespace() {
        let lower = word.to_lowercase();
        let skip = (word.chars().count() > MIN_WORD_LENGTH && SEO_WORDS.contains(&lower.as_str()))
            || SEO_WORDS.contains(&word);

        if !skip && prev != Some(word) {
            cleaned.push(word);
            prev = Some(word);
        }
    }

    clean_text(&cleaned.join(" "))
}

/// Whether the whole text is a 4-digit year in the accepted range.
#[must_use]
pub fn is_year(text: &str) -> bool {
    let trimmed = text.trim();
    YEAR_EXACT.is_match(trimmed)
        && trimmed
            .parse::<u32>()
            .is_ok_and(|y| (MIN_YEAR..=MAX_YEAR).contains(&y))
}

/// First 4-digit run in the accepted year range, if any.
#[must_use]
pub fn extract_year(text: &str) -> Option<u32> {
    YEAR.captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|y| (MIN_YEAR..=MAX_YEAR).contains(y))
}

/// All distinct years in the accepted range, in order of first appearance.
#[must_use]
pub fn extract_years(text: &str) -> Vec<u32> {
    let mut years = Vec::new();
    for caps in YEAR.captures_iter(text) {
        if let Some(year) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) {
            if (MIN_YEAR..=MAX_YEAR).contains(&year) && !years.contains(&year) {
                years.push(year);
            }
        }
    }
    years
}

/// Extract a season number from heading text.
///
/// Patterns are tried in order ("N сезон", "(N сезон)", "(N", leading
/// digits); the first hit in `[1, 20]` wins. Any digit run in range is the
/// last resort.
#[must_use]
pub fn extract_season_number(text: &str) -> Option<u32> {
    let patterns = [
        &*SEASON_WITH_SUFFIX,
        &*SEASON_IN_BRACKETS,
        &*NUMBER_IN_BRACKETS,
        &*LEADING_NUMBER,
    ];

    for pattern in patterns {
        if let Some(num) = pattern
            .captures(text)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
        {
            if (MIN_SEASON_NUMBER..=MAX_SEASON_NUMBER).contains(&num) {
                return Some(num);
            }
        }
    }

    DIGIT_RUN
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .find(|num| (MIN_SEASON_NUMBER..=MAX_SEASON_NUMBER).contains(num))
}

/// Resolve the handful of named entities that survive raw-markup splitting.
#[must_use]
pub fn unescape_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
}
