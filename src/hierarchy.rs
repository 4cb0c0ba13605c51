//! Hierarchy building: episode links and classified headings into the
//! season → arc → episode tree.
//!
//! The page is scanned once in document order into a flat item list; all
//! grouping decisions are index arithmetic over that list. This keeps the
//! proximity rules (nearest following episode link, nearest preceding arc
//! header) pure and testable without a live DOM.

use std::collections::BTreeMap;

use tracing::warn;

use crate::dom::{self, Selection};
use crate::headings::{classify, HeadingContext, HeadingKind};
use crate::models::{Arc, Episode, Season};
use crate::patterns::{
    CLASS_BOLD_SEASON, EPISODE_URL, HEADING_LOOKAHEAD, PLAIN_SEASON, SEASON_TITLE, SEASON_URL,
    SELECTOR_PAGE_ITEMS, TITLE_BEFORE_NUMBER,
};
use crate::text;
use crate::url_utils;

/// One element of the document-order page scan.
#[derive(Debug, Clone)]
pub(crate) enum PageItem {
    /// A heading candidate of unresolved kind.
    Heading {
        text: String,
        title_attr: Option<String>,
        bold: bool,
    },
    /// An episode link with its URL-derived coordinates.
    EpisodeLink {
        number: u32,
        season: Option<u32>,
        url: String,
        title: String,
    },
}

/// An arc heading resolved to its owning season.
#[derive(Debug, Clone)]
struct ArcHeader {
    pos: usize,
    name: String,
    title: Option<String>,
    season: u32,
}

/// Scan a page region for heading candidates and episode links, in document
/// order.
///
/// Episode URLs are absolutized against `origin` here so everything
/// downstream deals in final URLs.
pub(crate) fn scan_items(root: &Selection, origin: &str) -> Vec<PageItem> {
    let mut items = Vec::new();

    for node in root.select(SELECTOR_PAGE_ITEMS).nodes() {
        let sel = Selection::from(*node);
        let Some(tag) = node.node_name().map(|t| t.to_string()) else {
            continue;
        };

        if tag == "h2" {
            items.push(PageItem::Heading {
                text: text::clean_text(&sel.text()),
                title_attr: dom::attr_non_empty(&sel, "title"),
                bold: dom::has_class(&sel, CLASS_BOLD_SEASON),
            });
            continue;
        }

        let Some(href) = dom::attr(&sel, "href") else {
            continue;
        };
        let Some(number) = EPISODE_URL
            .captures(&href)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .filter(|n| *n > 0)
        else {
            continue;
        };
        let season = SEASON_URL
            .captures(&href)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok());

        items.push(PageItem::EpisodeLink {
            number,
            season,
            url: url_utils::absolutize(&href, origin),
            title: episode_title(&sel),
        });
    }

    items
}

/// Episode title: the text trailing the inline icon marker, or the link text
/// with markers stripped when no marker is present.
fn episode_title(link: &Selection) -> String {
    if let Some(tail) = dom::tail_after_marker(&link.inner_html()) {
        if !tail.is_empty() {
            return tail;
        }
    }
    dom::text_without_markers(link)
}

/// Build the flat episode list and season tree from a page scan.
///
/// `grouped` is false when the page has no dedicated episode container; such
/// pages degenerate to a flat, season-less list regardless of headings.
pub(crate) fn build(items: &[PageItem], grouped: bool) -> (Vec<Episode>, Vec<Season>) {
    let kinds = classify_headings(items);
    let any_season_heading = kinds.iter().any(|(_, k)| *k == HeadingKind::Season);

    if !grouped || !any_season_heading {
        return (flat_episodes(items), Vec::new());
    }

    // Season headings whose text yields no usable number leave nothing to
    // group under; keep every episode rather than dropping them all.
    let seasons = season_headers(items, &kinds);
    if seasons.is_empty() {
        warn!(
            headings = kinds.len(),
            "season-shaped headings yielded no season numbers; page needs manual review"
        );
        return (flat_episodes(items), Vec::new());
    }
    let arcs = arc_headers(items, &kinds, &seasons);

    // One pass: (position, season, episode) tuples, deduplicated on
    // (season, episode number), first occurrence wins.
    let mut tuples: Vec<(usize, u32, Episode)> = Vec::new();
    let mut seen: Vec<(u32, u32)> = Vec::new();

    for (pos, item) in items.iter().enumerate() {
        let PageItem::EpisodeLink { number, season, url, title } = item else {
            continue;
        };
        let season_num = match season {
            Some(s) => *s,
            // A bare link on a single-season page belongs to that season
            None if seasons.len() == 1 => match seasons.keys().next() {
                Some(s) => *s,
                None => continue,
            },
            None => continue,
        };
        if !seasons.contains_key(&season_num) || seen.contains(&(season_num, *number)) {
            continue;
        }
        let Ok(episode) = Episode::new(*number, title.clone(), url.clone(), Some(season_num))
        else {
            continue;
        };
        seen.push((season_num, *number));
        tuples.push((pos, season_num, episode));
    }

    // Group after the fact: season episode lists plus per-arc-header buckets.
    let mut season_episodes: BTreeMap<u32, Vec<Episode>> = BTreeMap::new();
    let mut arc_episodes: BTreeMap<usize, Vec<Episode>> = BTreeMap::new();

    for (pos, season_num, episode) in &tuples {
        season_episodes
            .entry(*season_num)
            .or_default()
            .push(episode.clone());

        // Nearest preceding arc header of the same season owns the episode
        let owner = arcs
            .iter()
            .filter(|a| a.season == *season_num && a.pos < *pos)
            .max_by_key(|a| a.pos);
        if let Some(arc) = owner {
            arc_episodes.entry(arc.pos).or_default().push(episode.clone());
        }
    }

    let mut season_list = Vec::with_capacity(seasons.len());
    for (number, title) in &seasons {
        let mut episodes = season_episodes.remove(number).unwrap_or_default();
        episodes.sort_by_key(|e| e.number);

        let mut season_arcs: Vec<Arc> = Vec::new();
        for arc in arcs.iter().filter(|a| a.season == *number) {
            let Some(mut eps) = arc_episodes.remove(&arc.pos) else {
                continue;
            };
            eps.sort_by_key(|e| e.number);
            // Same-named arc headers within a season merge into one arc
            if let Some(existing) = season_arcs.iter_mut().find(|a| a.name == arc.name) {
                existing.episodes.extend(eps);
                existing.episodes.sort_by_key(|e| e.number);
            } else {
                season_arcs.push(Arc {
                    name: arc.name.clone(),
                    title: arc.title.clone(),
                    episodes: eps,
                });
            }
        }

        season_list.push(Season {
            number: *number,
            title: title.clone(),
            episodes,
            arcs: season_arcs,
        });
    }

    let mut flat: Vec<Episode> = tuples.into_iter().map(|(_, _, e)| e).collect();
    flat.sort_by_key(|e| (e.season_number.unwrap_or(0), e.number));

    (flat, season_list)
}

/// Season-less fallback: every episode link becomes a flat entry, keeping any
/// URL-derived season number as a plain back-reference.
fn flat_episodes(items: &[PageItem]) -> Vec<Episode> {
    let mut episodes = Vec::new();
    let mut seen: Vec<(u32, u32)> = Vec::new();

    for item in items {
        let PageItem::EpisodeLink { number, season, url, title } = item else {
            continue;
        };
        let key = (season.unwrap_or(0), *number);
        if seen.contains(&key) {
            continue;
        }
        if let Ok(episode) = Episode::new(*number, title.clone(), url.clone(), *season) {
            seen.push(key);
            episodes.push(episode);
        }
    }

    episodes.sort_by_key(|e| (e.season_number.unwrap_or(0), e.number));
    episodes
}

/// Classify every heading candidate in the scan.
fn classify_headings(items: &[PageItem]) -> Vec<(usize, HeadingKind)> {
    let mut kinds = Vec::new();

    for (pos, item) in items.iter().enumerate() {
        let PageItem::Heading { text, title_attr, bold } = item else {
            continue;
        };

        let next_heading = items[pos + 1..]
            .iter()
            .position(|i| matches!(i, PageItem::Heading { .. }))
            .map(|off| pos + 1 + off);

        let window_end = items.len().min(pos + 1 + HEADING_LOOKAHEAD);
        let has_following_episode_link = items[pos + 1..window_end]
            .iter()
            .any(|i| matches!(i, PageItem::EpisodeLink { .. }));

        let bold_heading_before_next = next_heading.is_some_and(|nh| {
            items[pos + 1..nh]
                .iter()
                .any(|i| matches!(i, PageItem::Heading { bold: true, .. }))
        });

        let ctx = HeadingContext {
            text: text.clone(),
            title_attr: title_attr.clone(),
            has_bold_marker: *bold,
            has_following_episode_link,
            has_next_heading: next_heading.is_some(),
            bold_heading_before_next,
        };
        kinds.push((pos, classify(&ctx)));
    }

    kinds
}

/// Resolve season headings to a number → display title map. Later headings
/// win on number collisions.
fn season_headers(
    items: &[PageItem],
    kinds: &[(usize, HeadingKind)],
) -> BTreeMap<u32, Option<String>> {
    let mut seasons = BTreeMap::new();

    for (pos, kind) in kinds {
        if *kind != HeadingKind::Season {
            continue;
        }
        let PageItem::Heading { text, title_attr, .. } = &items[*pos] else {
            continue;
        };
        let Some(number) = text::extract_season_number(text) else {
            continue;
        };

        let title = title_attr
            .clone()
            .or_else(|| season_display_title(text));
        seasons.insert(number, title);
    }

    seasons
}

/// Derive a season display title from heading text when no `title` attribute
/// is present: the residual before the season-number phrase, kept only when
/// it is not purely numeric.
fn season_display_title(heading_text: &str) -> Option<String> {
    if let Some(caps) = SEASON_TITLE.captures(heading_text) {
        return caps.get(1).map(|m| m.as_str().trim().to_string());
    }

    if PLAIN_SEASON.is_match(heading_text) {
        return None;
    }

    TITLE_BEFORE_NUMBER
        .captures(heading_text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| !t.is_empty() && !t.chars().all(|c| c.is_ascii_digit()))
}

/// Resolve arc-candidate headings to their owning season via the nearest
/// following episode link's URL. Arcs pointing at unknown seasons are
/// discarded.
fn arc_headers(
    items: &[PageItem],
    kinds: &[(usize, HeadingKind)],
    seasons: &BTreeMap<u32, Option<String>>,
) -> Vec<ArcHeader> {
    let mut arcs = Vec::new();

    for (pos, kind) in kinds {
        if *kind != HeadingKind::Arc {
            continue;
        }
        let PageItem::Heading { text, title_attr, .. } = &items[*pos] else {
            continue;
        };

        let next_link_season = items[pos + 1..].iter().find_map(|i| match i {
            PageItem::EpisodeLink { season, .. } => Some(*season),
            PageItem::Heading { .. } => None,
        });

        if let Some(Some(season)) = next_link_season {
            if seasons.contains_key(&season) {
                arcs.push(ArcHeader {
                    pos: *pos,
                    name: text.clone(),
                    title: title_attr.clone(),
                    season,
                });
            }
        }
    }

    arcs
}
