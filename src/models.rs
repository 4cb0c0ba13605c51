//! Catalog value objects: `Anime`, `Season`, `Arc`, `Episode`, `Rating`.
//!
//! All entities are immutable value objects constructed once per parse.
//! Invariant violations abort construction of that entity entirely; no
//! partially valid entity is ever returned.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{Error, Result};

/// Aggregate user rating of a title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub value: f64,
    /// Best possible value on the scale.
    pub best: f64,
    /// Worst possible value on the scale.
    pub worst: f64,
    /// Number of votes behind the value.
    pub count: u32,
}

impl Rating {
    /// Build a rating, enforcing `worst <= value <= best`.
    pub fn new(value: f64, best: f64, worst: f64, count: u32) -> Result<Self> {
        if value < worst || value > best {
            return Err(Error::Validation(format!(
                "rating {value} outside bounds [{worst}, {best}]"
            )));
        }
        Ok(Self { value, best, worst, count })
    }
}

/// A single watchable episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Positive episode number within its season.
    pub number: u32,
    /// Visible title; may be empty when the page carries none, never absent.
    pub title: String,
    /// Absolute page URL.
    pub url: String,
    /// Season back-reference, absent on season-less pages.
    pub season_number: Option<u32>,
}

impl Episode {
    /// Build an episode, enforcing a positive number and non-empty URL.
    pub fn new(number: u32, title: String, url: String, season_number: Option<u32>) -> Result<Self> {
        if number == 0 {
            return Err(Error::Validation("episode number must be positive".to_string()));
        }
        if url.is_empty() {
            return Err(Error::Validation("episode URL must not be empty".to_string()));
        }
        Ok(Self { number, title, url, season_number })
    }
}

/// A named sub-grouping of episodes within one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arc {
    /// Arc name, unique within its season.
    pub name: String,
    /// Display title from the heading's `title` attribute, when present.
    pub title: Option<String>,
    /// Episodes of the arc, sorted by number.
    pub episodes: Vec<Episode>,
}

/// A numbered top-level grouping of episodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    /// Positive season number, unique within the anime.
    pub number: u32,
    /// Display title, when one could be derived from the heading.
    pub title: Option<String>,
    /// Episodes of the season, sorted by number.
    pub episodes: Vec<Episode>,
    /// Arcs partitioning a subset of the season's episodes, document order.
    pub arcs: Vec<Arc>,
}

/// One fully parsed catalog page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anime {
    pub title: String,
    pub original_title: Option<String>,
    /// Canonical page URL this entry was parsed from.
    pub url: String,
    pub poster_url: Option<String>,
    pub description: Option<String>,
    /// Ordered, duplicate-free genre list.
    pub genres: Vec<String>,
    /// Ordered, duplicate-free theme list.
    pub themes: Vec<String>,
    /// Release years, sorted ascending, duplicate-free.
    pub years: Vec<u32>,
    /// Primary release year: the minimum of `years`.
    pub year: Option<u32>,
    pub age_rating: Option<String>,
    pub rating: Option<Rating>,
    /// Airing status, e.g. "онгоинг"; absent when completed or unknown.
    pub status: Option<String>,
    /// Flat episode list, sorted by (season number or 0, episode number).
    pub episodes: Vec<Episode>,
    /// Seasons sorted by number; empty on season-less pages.
    pub seasons: Vec<Season>,
}

impl Anime {
    /// Convert the tree to a nested plain mapping for interchange.
    ///
    /// Mirrors the structure 1:1, with season and arc levels additionally
    /// exposing a computed `episodes_count`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        json!({
            "title": self.title,
            "original_title": self.original_title,
            "url": self.url,
            "poster_url": self.poster_url,
            "description": self.description,
            "genres": self.genres,
            "themes": self.themes,
            "years": self.years,
            "year": self.year,
            "age_rating": self.age_rating,
            "rating": self.rating.as_ref().map(|r| json!({
                "value": r.value,
                "best": r.best,
                "worst": r.worst,
                "count": r.count,
            })),
            "status": self.status,
            "episodes": self.episodes.iter().map(episode_value).collect::<Vec<_>>(),
            "seasons": self.seasons.iter().map(season_value).collect::<Vec<_>>(),
        })
    }
}

fn episode_value(episode: &Episode) -> Value {
    json!({
        "number": episode.number,
        "title": episode.title,
        "url": episode.url,
        "season_number": episode.season_number,
    })
}

fn season_episode_value(episode: &Episode) -> Value {
    json!({
        "number": episode.number,
        "title": episode.title,
        "url": episode.url,
    })
}

fn season_value(season: &Season) -> Value {
    let arcs = if season.arcs.is_empty() {
        Value::Null
    } else {
        Value::Array(
            season
                .arcs
                .iter()
                .map(|arc| {
                    json!({
                        "name": arc.name,
                        "title": arc.title,
                        "episodes_count": arc.episodes.len(),
                        "episodes": arc.episodes.iter().map(season_episode_value).collect::<Vec<_>>(),
                    })
                })
                .collect(),
        )
    };

    json!({
        "number": season.number,
        "title": season.title,
        "episodes_count": season.episodes.len(),
        "episodes": season.episodes.iter().map(season_episode_value).collect::<Vec<_>>(),
        "arcs": arcs,
    })
}
