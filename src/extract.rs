//! Catalog page parsing: orchestrates the metadata extractors and the
//! hierarchy builder into one immutable [`Anime`].

use tracing::{debug, warn};

use crate::dom::Document;
use crate::error::{Error, Result};
use crate::hierarchy::{self, PageItem};
use crate::metadata;
use crate::models::Anime;
use crate::patterns::SELECTOR_WATCH_DIV;
use crate::url_utils;

/// Parse one catalog page into an [`Anime`].
///
/// Individual fields degrade to absent values; the only hard requirement is
/// a recognizable title heading.
pub(crate) fn parse_document(html: &str, url: &str) -> Result<Anime> {
    let doc = Document::from(html);

    let title = metadata::extract_title(&doc)
        .ok_or_else(|| Error::Malformed("page has no title heading".to_string()))?;

    let origin = url_utils::base_origin(url);

    // Episode links live in the watch container when one exists; without it
    // the page degenerates to a flat, season-less episode list drawn from
    // anywhere in the document.
    let watch = doc.select(SELECTOR_WATCH_DIV);
    let grouped = !watch.nodes().is_empty();
    let items = if grouped {
        hierarchy::scan_items(&watch, &origin)
    } else {
        hierarchy::scan_items(&doc.select("html"), &origin)
    };

    let heading_count = items
        .iter()
        .filter(|i| matches!(i, PageItem::Heading { .. }))
        .count();

    let (episodes, seasons) = hierarchy::build(&items, grouped);

    if heading_count > 0 && seasons.is_empty() {
        warn!(
            %url,
            heading_count,
            "page has season-shaped headings but produced zero seasons; flat result may need manual review"
        );
    }

    let years = metadata::extract_years(&doc);
    let year = years.first().copied();
    let (genres, themes) = metadata::extract_genres_and_themes(&doc);

    debug!(
        %title,
        episodes = episodes.len(),
        seasons = seasons.len(),
        "catalog page parsed"
    );

    Ok(Anime {
        title,
        original_title: metadata::extract_original_title(&doc),
        url: url.to_string(),
        poster_url: metadata::extract_poster(&doc),
        description: metadata::extract_description(&doc),
        genres,
        themes,
        years,
        year,
        age_rating: metadata::extract_age_rating(&doc),
        rating: metadata::extract_rating(&doc),
        status: metadata::extract_status(&doc),
        episodes,
        seasons,
    })
}
