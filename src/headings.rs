//! Heading classification: season boundary vs story-arc boundary.
//!
//! The catalog marks both season and arc boundaries with the same
//! `h2.the-anime-season` element, so the distinction rests on heuristics:
//! a "part N" text pattern, the `need_bold_season` marker class, and the
//! heading's position relative to episode links and neighboring headings.
//!
//! The heuristics are expressed as an ordered rule list over a pure
//! [`HeadingContext`], evaluated top to bottom with a default outcome of
//! [`HeadingKind::Arc`]: a heading we cannot prove to be a season is not one.

use crate::patterns::PART_HEADER;

/// Resolved role of a heading candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingKind {
    Season,
    Arc,
}

/// Positional and textual context of one heading candidate.
///
/// Built from a document-order scan; classification itself is pure.
#[derive(Debug, Clone, Default)]
pub struct HeadingContext {
    /// Trimmed heading text.
    pub text: String,
    /// `title` attribute, when present and non-empty.
    pub title_attr: Option<String>,
    /// Heading carries the `need_bold_season` marker class.
    pub has_bold_marker: bool,
    /// An episode link follows within the lookahead window.
    pub has_following_episode_link: bool,
    /// Another heading candidate follows in document order.
    pub has_next_heading: bool,
    /// A bold-marked heading intervenes before the next heading candidate.
    pub bold_heading_before_next: bool,
}

type Rule = fn(&HeadingContext) -> Option<HeadingKind>;

/// Rules in evaluation order. The "part N" check short-circuits everything,
/// including the bold marker.
const RULES: [Rule; 4] = [
    part_marker,
    bold_season_marker,
    season_without_next_heading,
    season_before_next_heading,
];

/// Classify one heading candidate.
#[must_use]
pub fn classify(ctx: &HeadingContext) -> HeadingKind {
    RULES
        .iter()
        .find_map(|rule| rule(ctx))
        .unwrap_or(HeadingKind::Arc)
}

/// Rule 1: a "part N" pattern in text or title attribute is always an arc.
fn part_marker(ctx: &HeadingContext) -> Option<HeadingKind> {
    let title = ctx.title_attr.as_deref().unwrap_or("");
    is_part_header(&ctx.text, title).then_some(HeadingKind::Arc)
}

/// Rule 2: the bold marker class is an unambiguous season boundary.
fn bold_season_marker(ctx: &HeadingContext) -> Option<HeadingKind> {
    ctx.has_bold_marker.then_some(HeadingKind::Season)
}

/// Rule 3: digits plus a following episode link, with no further heading to
/// bound the group, read as a trailing season.
fn season_without_next_heading(ctx: &HeadingContext) -> Option<HeadingKind> {
    (has_digits(&ctx.text) && ctx.has_following_episode_link && !ctx.has_next_heading)
        .then_some(HeadingKind::Season)
}

/// Rule 4: digits plus a following episode link read as a season unless a
/// bold-marked heading intervenes before the next heading candidate.
fn season_before_next_heading(ctx: &HeadingContext) -> Option<HeadingKind> {
    (has_digits(&ctx.text)
        && ctx.has_following_episode_link
        && ctx.has_next_heading
        && !ctx.bold_heading_before_next)
        .then_some(HeadingKind::Season)
}

/// Whether heading text and title attribute denote a story part, not a season.
#[must_use]
pub fn is_part_header(text: &str, title_attr: &str) -> bool {
    let combined = format!("{text} {title_attr}").to_lowercase();

    if PART_HEADER.is_match(&combined) {
        return true;
    }

    if combined.contains("часть") {
        return true;
    }

    // A bare "part" in the tooltip still means an arc unless it names a season
    let title_lower = title_attr.to_lowercase();
    !title_lower.is_empty() && title_lower.contains("part") && !title_lower.contains("season")
}

fn has_digits(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}
