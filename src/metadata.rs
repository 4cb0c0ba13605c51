//! Per-field metadata extractors.
//!
//! Each extractor is independent, works off its own narrow page region, and
//! degrades to an absent value instead of failing. The info block under the
//! player is the richest source: it has no inner structure beyond `<br>`
//! separators, so it is split on those into sections and each section is
//! re-parsed as its own fragment.

use crate::dom::{self, Document, Selection};
use crate::models::Rating;
use crate::patterns::{
    ALL_EPISODES_SUFFIX, AND_SEASONS_SUFFIX, ANIME_PREFIX, BR_TAG, LABEL_ORIGINAL_TITLE,
    MAX_YEAR, MIN_YEAR, POSTER_BACKGROUND, SELECTOR_AGE_RATING, SELECTOR_CATALOG_LINKS,
    SELECTOR_DESCRIPTION,
    SELECTOR_INFO_BLOCK, SELECTOR_ONGOING_LINK, SELECTOR_POSTER, SELECTOR_POSTER_META,
    SELECTOR_RATING_BEST, SELECTOR_RATING_COUNT, SELECTOR_RATING_VALUE, SELECTOR_RATING_WORST,
    SELECTOR_TITLE, STATUS_ONGOING, WATCH_PREFIX, YEAR, YEARS_LABEL, YEAR_LABEL,
    YEAR_LABEL_MARKED,
};
use crate::text;

/// Page title from the primary heading, with the "Смотреть" prefix and
/// "все серии (и сезоны)" suffixes stripped.
pub(crate) fn extract_title(doc: &Document) -> Option<String> {
    let heading = doc.select(SELECTOR_TITLE);
    if heading.nodes().is_empty() {
        return None;
    }

    let mut title = text::clean_text(&heading.text());
    title = WATCH_PREFIX.replace(&title, "").into_owned();
    title = ALL_EPISODES_SUFFIX.replace(&title, "").into_owned();
    title = AND_SEASONS_SUFFIX.replace(&title, "").into_owned();
    let title = title.trim().to_string();

    (!title.is_empty()).then_some(title)
}

/// Original (romaji/English) title: the first `<b>` of the info block, when
/// the block carries the original-title label.
pub(crate) fn extract_original_title(doc: &Document) -> Option<String> {
    let info = doc.select(SELECTOR_INFO_BLOCK);
    if info.nodes().is_empty() || !info.text().contains(LABEL_ORIGINAL_TITLE) {
        return None;
    }

    let first_bold = info.select("b").nodes().first().copied()?;
    let original = text::clean_text(&Selection::from(first_bold).text());
    (!original.is_empty()).then_some(original)
}

/// Poster URL: inline `background: url(...)` style first, recommendation
/// meta tag second.
pub(crate) fn extract_poster(doc: &Document) -> Option<String> {
    let poster_div = doc.select(SELECTOR_POSTER);
    if let Some(style) = dom::attr_non_empty(&poster_div, "style") {
        if let Some(url) = POSTER_BACKGROUND
            .captures(&style)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
        {
            return Some(url);
        }
    }

    dom::attr_non_empty(&doc.select(SELECTOR_POSTER_META), "content")
}

/// Genre and theme lists from the info block.
///
/// Sections are split on `<br>`; anchors are collected per section. The
/// first qualifying section is genres, the second themes; year-like and
/// linkless sections do not count toward that index.
pub(crate) fn extract_genres_and_themes(doc: &Document) -> (Vec<String>, Vec<String>) {
    let mut genres = Vec::new();
    let mut themes = Vec::new();

    let mut section_index = 0usize;
    for texts in info_block_sections(doc) {
        if texts.is_empty() || is_year_section(&texts) {
            continue;
        }

        let target = match section_index {
            0 => &mut genres,
            1 => &mut themes,
            _ => break,
        };
        section_index += 1;

        for entry in texts {
            if !entry.is_empty()
                && !text::is_year(&entry)
                && entry.chars().count() > 1
                && !entry.chars().all(|c| c.is_ascii_digit())
                && !target.contains(&entry)
            {
                target.push(entry);
            }
        }
    }

    (genres, themes)
}

/// Release years: 4-digit tokens from section anchors, with a raw-markup
/// regex fallback over the release-year labels. Sorted ascending,
/// duplicate-free.
pub(crate) fn extract_years(doc: &Document) -> Vec<u32> {
    let mut years: Vec<u32> = Vec::new();

    for texts in info_block_sections(doc) {
        for entry in texts {
            if let Some(year) = text::extract_year(&entry) {
                if !years.contains(&year) {
                    years.push(year);
                }
            }
        }
    }

    if years.is_empty() {
        years = years_from_raw_labels(doc);
    }

    years.sort_unstable();
    years
}

/// Fallback pass over the raw info-block markup for "Годы выпуска:" /
/// "Год выпуска:" labels.
fn years_from_raw_labels(doc: &Document) -> Vec<u32> {
    let info = doc.select(SELECTOR_INFO_BLOCK);
    if info.nodes().is_empty() {
        return Vec::new();
    }
    let raw = info.html().to_string();
    let mut years = Vec::new();

    if raw.contains("Годы выпуска:") {
        if let Some(caps) = YEARS_LABEL.captures(&raw) {
            let segment = caps.get(1).map_or("", |m| m.as_str());
            let frag = dom::fragment(segment);
            for node in frag.select(SELECTOR_CATALOG_LINKS).nodes() {
                let link_text = Selection::from(*node).text();
                if let Some(year) = text::extract_year(&link_text) {
                    if !years.contains(&year) {
                        years.push(year);
                    }
                }
            }
        }
    } else if raw.contains("Год выпуска:") {
        let caps = YEAR_LABEL_MARKED
            .captures(&raw)
            .or_else(|| YEAR_LABEL.captures(&raw));
        if let Some(year) = caps
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .filter(|y| (MIN_YEAR..=MAX_YEAR).contains(y))
        {
            years.push(year);
        }
    }

    years
}

/// Age rating badge text, verbatim.
pub(crate) fn extract_age_rating(doc: &Document) -> Option<String> {
    let badge = doc.select(SELECTOR_AGE_RATING);
    if badge.nodes().is_empty() {
        return None;
    }
    let rating = text::clean_text(&badge.text());
    (!rating.is_empty()).then_some(rating)
}

/// Airing status: any link into the ongoing catalog marks the title ongoing.
pub(crate) fn extract_status(doc: &Document) -> Option<String> {
    (!doc.select(SELECTOR_ONGOING_LINK).nodes().is_empty())
        .then(|| STATUS_ONGOING.to_string())
}

/// Description text: the span inside the description block with `<i>`
/// sub-elements removed and `<b>` unwrapped, then SEO-cleaned.
pub(crate) fn extract_description(doc: &Document) -> Option<String> {
    let block = doc.select(SELECTOR_DESCRIPTION);
    let span = block.select("span");
    if span.nodes().is_empty() {
        return None;
    }

    let frag = dom::fragment(&span.html());
    frag.select("i").remove();
    frag.select("body").strip_elements(&["b"]);

    let description = text::clean_description(&text::clean_text(&frag.select("body").text()));
    (!description.is_empty()).then_some(description)
}

/// Aggregate rating from itemprop markup.
///
/// A missing value means no rating at all. Best and worst bounds default to
/// 10.0 and 1.0, the vote count to 0. Out-of-bounds values abandon the whole
/// extraction silently.
pub(crate) fn extract_rating(doc: &Document) -> Option<Rating> {
    let value_sel = doc.select(SELECTOR_RATING_VALUE);
    if value_sel.nodes().is_empty() {
        return None;
    }
    let value: f64 = value_sel.text().trim().parse().ok()?;

    let best = doc
        .select(SELECTOR_RATING_BEST)
        .text()
        .trim()
        .parse::<f64>()
        .unwrap_or(10.0);

    let worst = dom::attr_non_empty(&doc.select(SELECTOR_RATING_WORST), "content")
        .and_then(|c| c.parse::<f64>().ok())
        .unwrap_or(1.0);

    let count = doc
        .select(SELECTOR_RATING_COUNT)
        .text()
        .trim()
        .parse::<u32>()
        .unwrap_or(0);

    Rating::new(value, best, worst, count).ok()
}

/// Split the info block's inner markup on `<br>` into sections and return
/// each section's catalog-anchor texts, markers stripped.
fn info_block_sections(doc: &Document) -> Vec<Vec<String>> {
    let info = doc.select(SELECTOR_INFO_BLOCK);
    if info.nodes().is_empty() {
        return Vec::new();
    }

    let inner = info.inner_html().to_string();
    BR_TAG
        .split(&inner)
        .map(|section| {
            let frag = dom::fragment(section);
            frag.select(SELECTOR_CATALOG_LINKS)
                .nodes()
                .iter()
                .map(|node| anchor_text(&Selection::from(*node)))
                .filter(|t| !t.is_empty())
                .collect()
        })
        .collect()
}

/// Catalog anchor text with icon markers removed and the "Аниме" prefix
/// stripped.
fn anchor_text(link: &Selection) -> String {
    let raw = dom::text_without_markers(link);
    text::clean_text(&ANIME_PREFIX.replace(&raw, ""))
}

/// A section whose anchors look like years is a release-year section, not a
/// genre/theme one.
fn is_year_section(texts: &[String]) -> bool {
    texts.iter().any(|t| {
        text::is_year(t) || (t.chars().count() <= 6 && YEAR.is_match(t))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_strips_watch_phrases() {
        let doc = Document::from(
            r#"<h1 class="header_video">Смотреть Наруто все серии и сезоны</h1>"#,
        );
        assert_eq!(extract_title(&doc), Some("Наруто".to_string()));
    }

    #[test]
    fn title_absent_without_heading() {
        let doc = Document::from("<div>нет заголовка</div>");
        assert_eq!(extract_title(&doc), None);
    }

    #[test]
    fn original_title_requires_label() {
        let labeled = Document::from(
            r#"<div class="under_video_additional">Оригинальное название: <b>Naruto</b></div>"#,
        );
        assert_eq!(extract_original_title(&labeled), Some("Naruto".to_string()));

        let unlabeled =
            Document::from(r#"<div class="under_video_additional"><b>Naruto</b></div>"#);
        assert_eq!(extract_original_title(&unlabeled), None);
    }

    #[test]
    fn poster_prefers_background_style() {
        let doc = Document::from(concat!(
            r#"<div class="all_anime_title" style="background: url('/uploads/naruto.jpg')"></div>"#,
            r#"<meta property="yandex_recommendations_image" content="https://jut.su/meta.jpg">"#,
        ));
        assert_eq!(extract_poster(&doc), Some("/uploads/naruto.jpg".to_string()));
    }

    #[test]
    fn poster_falls_back_to_meta() {
        let doc = Document::from(
            r#"<meta property="yandex_recommendations_image" content="https://jut.su/meta.jpg">"#,
        );
        assert_eq!(extract_poster(&doc), Some("https://jut.su/meta.jpg".to_string()));
    }

    #[test]
    fn genres_then_themes_skipping_year_sections() {
        let doc = Document::from(concat!(
            r#"<div class="under_video_additional">"#,
            r#"<a href="/anime/2007/">2007</a><br>"#,
            r#"<a href="/anime/adventure/">Аниме Приключения</a> <a href="/anime/shounen/">Сёнэн</a><br>"#,
            r#"<a href="/anime/ninja/">Ниндзя</a>"#,
            r#"</div>"#,
        ));
        let (genres, themes) = extract_genres_and_themes(&doc);
        assert_eq!(genres, vec!["Приключения", "Сёнэн"]);
        assert_eq!(themes, vec!["Ниндзя"]);
    }

    #[test]
    fn years_from_anchor_texts() {
        let doc = Document::from(concat!(
            r#"<div class="under_video_additional">"#,
            r#"<a href="/anime/2009/">2009</a> <a href="/anime/2007/">2007</a>"#,
            r#"</div>"#,
        ));
        assert_eq!(extract_years(&doc), vec![2007, 2009]);
    }

    #[test]
    fn years_fallback_single_label() {
        let doc = Document::from(
            r#"<div class="under_video_additional">Год выпуска: <a href="/anime/2019/"><i></i> 2019</a></div>"#,
        );
        assert_eq!(extract_years(&doc), vec![2019]);
    }

    #[test]
    fn description_removes_italics_and_unwraps_bold() {
        let doc = Document::from(concat!(
            r#"<p class="under_video"><span>"#,
            r#"<i>смотреть онлайн</i>История о <b>ниндзя</b> из Конохи"#,
            r#"</span></p>"#,
        ));
        assert_eq!(
            extract_description(&doc),
            Some("История о ниндзя из Конохи".to_string())
        );
    }

    #[test]
    fn rating_defaults_and_bounds() {
        let doc = Document::from(concat!(
            r#"<span itemprop="ratingValue">9.2</span>"#,
            r#"<span itemprop="ratingCount">1523</span>"#,
        ));
        let rating = extract_rating(&doc);
        assert_eq!(
            rating,
            Some(Rating { value: 9.2, best: 10.0, worst: 1.0, count: 1523 })
        );
    }

    #[test]
    fn rating_absent_without_value() {
        let doc = Document::from(r#"<span itemprop="bestRating">10</span>"#);
        assert_eq!(extract_rating(&doc), None);
    }

    #[test]
    fn rating_abandoned_when_out_of_bounds() {
        let doc = Document::from(concat!(
            r#"<span itemprop="ratingValue">11</span>"#,
            r#"<span itemprop="bestRating">10</span>"#,
        ));
        assert_eq!(extract_rating(&doc), None);
    }

    #[test]
    fn status_from_ongoing_link() {
        let doc = Document::from(r#"<a href="/anime/ongoing/">онгоинги</a>"#);
        assert_eq!(extract_status(&doc), Some(STATUS_ONGOING.to_string()));
        assert_eq!(extract_status(&Document::from("<div></div>")), None);
    }
}
