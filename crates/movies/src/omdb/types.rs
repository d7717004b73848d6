//! OMDb response shapes and the domain types built from them.
//!
//! OMDb answers every request with HTTP 200 and signals failure in the body
//! (`"Response": "False"` plus an `Error` message). Missing values are the
//! literal string `"N/A"`.

use serde::Deserialize;

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct SearchResponse {
    pub response: String,
    pub error: Option<String>,
    #[serde(default)]
    pub search: Vec<SearchItem>,
    #[serde(rename = "totalResults")]
    pub total_results: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct SearchItem {
    pub title: String,
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type")]
    pub kind: String,
    pub poster: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct MovieResponse {
    pub response: String,
    pub error: Option<String>,
    pub title: Option<String>,
    pub year: Option<String>,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub awards: Option<String>,
    pub poster: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
}

/// `"True"`/`"False"` as sent by OMDb.
pub(super) fn is_true(flag: &str) -> bool {
    flag.eq_ignore_ascii_case("true")
}

/// `None` for absent, empty, or `"N/A"` values.
pub(super) fn known(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && v != "N/A"
    })
}

// =============================================================================
// Domain types
// =============================================================================

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieSummary {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    /// `movie`, `series`, `episode`, or `game`.
    pub kind: String,
    pub poster_url: Option<String>,
}

impl From<SearchItem> for MovieSummary {
    fn from(item: SearchItem) -> Self {
        Self {
            imdb_id: item.imdb_id,
            title: item.title,
            year: item.year,
            kind: item.kind,
            poster_url: known(item.poster),
        }
    }
}

/// Full details of one title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub imdb_id: String,
    pub title: String,
    pub year: Option<String>,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub awards: Option<String>,
    pub poster_url: Option<String>,
    pub imdb_rating: Option<String>,
}

impl Movie {
    /// Build from a successful response. `requested_id` is used when the body
    /// omits `imdbID`.
    pub(super) fn from_response(raw: MovieResponse, requested_id: &str) -> Self {
        Self {
            imdb_id: known(raw.imdb_id).unwrap_or_else(|| requested_id.to_owned()),
            title: known(raw.title).unwrap_or_else(|| "Untitled".to_owned()),
            year: known(raw.year),
            rated: known(raw.rated),
            released: known(raw.released),
            runtime: known(raw.runtime),
            genre: known(raw.genre),
            director: known(raw.director),
            writer: known(raw.writer),
            actors: known(raw.actors),
            plot: known(raw.plot),
            language: known(raw.language),
            country: known(raw.country),
            awards: known(raw.awards),
            poster_url: known(raw.poster),
            imdb_rating: known(raw.imdb_rating),
        }
    }
}
