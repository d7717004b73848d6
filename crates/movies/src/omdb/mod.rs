//! OMDb API client.
//!
//! Plain REST over `reqwest`; the API key goes in the query string. Successful
//! searches and lookups are cached with `moka` (5-minute TTL by default);
//! failures are never cached.
//!
//! # Example
//!
//! ```rust,ignore
//! use reelbox_core::{ImdbId, SearchQuery};
//! use reelbox_movies::omdb::MovieClient;
//!
//! let client = MovieClient::new(&config.omdb);
//! let hits = client.search(&SearchQuery::parse("alien")?).await?;
//! let movie = client.retrieve_movie_by_id(&ImdbId::parse("tt0078748")?).await?;
//! ```

mod types;

pub use types::{Movie, MovieSummary};

use std::sync::Arc;

use moka::future::Cache;
use reelbox_core::{ImdbId, SearchQuery};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::OmdbConfig;
use types::{MovieResponse, SearchResponse, is_true};

/// Errors that can occur when talking to OMDb.
#[derive(Debug, Error)]
pub enum OmdbError {
    /// Non-200 response, usually a bad or unactivated API key.
    #[error("Search request failed; make sure your API key is correct and authorized")]
    RequestFailed(u16),

    /// OMDb answered `"Response": "False"`.
    #[error("Error retrieving results: '{0}'")]
    Api(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl OmdbError {
    /// Whether the message is meant for the page (bad query, unknown id, bad
    /// key) rather than an outage.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::RequestFailed(_) | Self::Api(_))
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    /// Lowercased query text.
    Search(String),
    Movie(ImdbId),
}

#[derive(Debug, Clone)]
enum CacheValue {
    Search(Arc<Vec<MovieSummary>>),
    Movie(Arc<Movie>),
}

struct SearchPage {
    items: Vec<MovieSummary>,
    total: usize,
}

/// Client for the OMDb API.
#[derive(Clone)]
pub struct MovieClient {
    inner: Arc<MovieClientInner>,
}

struct MovieClientInner {
    client: reqwest::Client,
    base_url: Url,
    api_key: SecretString,
    max_search_pages: u32,
    cache: Cache<CacheKey, CacheValue>,
}

impl MovieClient {
    /// Create a new OMDb client.
    #[must_use]
    pub fn new(config: &OmdbConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            inner: Arc::new(MovieClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                api_key: config.api_key.clone(),
                max_search_pages: config.max_search_pages,
                cache,
            }),
        }
    }

    /// Build a request URL carrying the API key plus `params`.
    fn url(&self, params: &[(&str, &str)]) -> Url {
        let mut url = self.inner.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("apikey", self.inner.api_key.expose_secret());
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        url
    }

    /// GET `url` and decode the JSON body. Any non-200 status is
    /// `RequestFailed`.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, OmdbError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status != reqwest::StatusCode::OK {
            tracing::warn!(status = %status, "OMDb returned non-200 status");
            return Err(OmdbError::RequestFailed(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse OMDb response"
            );
            OmdbError::Parse(e)
        })
    }

    async fn search_page(&self, query: &str, page: u32) -> Result<SearchPage, OmdbError> {
        let page_param = page.to_string();
        let url = self.url(&[("s", query), ("page", &page_param)]);
        let raw: SearchResponse = self.get_json(url).await?;

        if !is_true(&raw.response) {
            return Err(OmdbError::Api(
                raw.error.unwrap_or_else(|| "Unknown error".to_owned()),
            ));
        }

        let items: Vec<MovieSummary> = raw.search.into_iter().map(MovieSummary::from).collect();
        let total = raw
            .total_results
            .and_then(|t| t.trim().parse::<usize>().ok())
            .unwrap_or(items.len());

        Ok(SearchPage { items, total })
    }

    /// Search titles by free text.
    ///
    /// Fetches page 1, then keeps requesting pages while fewer than
    /// `totalResults` hits are collected, the last page was non-empty, and the
    /// configured page limit is not reached. A failed follow-up page ends
    /// pagination with what was collected so far.
    ///
    /// # Errors
    ///
    /// Returns `OmdbError::Api` if OMDb reports an error for page 1 (e.g.
    /// "Movie not found!" or "Too many results."), `RequestFailed` for a
    /// non-200 status, or `Http`/`Parse` for transport failures.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<MovieSummary>, OmdbError> {
        let key = CacheKey::Search(query.as_str().to_lowercase());
        if let Some(CacheValue::Search(results)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for search");
            return Ok(results.as_ref().clone());
        }

        let first = self.search_page(query.as_str(), 1).await?;
        let total = first.total;
        let mut results = first.items;
        let mut page = 1;

        while results.len() < total && page < self.inner.max_search_pages {
            page += 1;
            match self.search_page(query.as_str(), page).await {
                Ok(next) if !next.items.is_empty() => results.extend(next.items),
                Ok(_) => break,
                Err(e) => {
                    tracing::warn!(page, error = %e, "Stopping search pagination");
                    break;
                }
            }
        }

        debug!(count = results.len(), total, pages = page, "Search complete");

        self.inner
            .cache
            .insert(key, CacheValue::Search(Arc::new(results.clone())))
            .await;

        Ok(results)
    }

    /// Full details of one title.
    ///
    /// # Errors
    ///
    /// Returns `OmdbError::Api` for an unknown id ("Incorrect IMDb ID."),
    /// `RequestFailed` for a non-200 status, or `Http`/`Parse` for transport
    /// failures.
    #[instrument(skip(self), fields(imdb_id = %id))]
    pub async fn retrieve_movie_by_id(&self, id: &ImdbId) -> Result<Movie, OmdbError> {
        let key = CacheKey::Movie(id.clone());
        if let Some(CacheValue::Movie(movie)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for movie");
            return Ok(movie.as_ref().clone());
        }

        let url = self.url(&[("i", id.as_str()), ("plot", "full")]);
        let raw: MovieResponse = self.get_json(url).await?;

        if !is_true(&raw.response) {
            return Err(OmdbError::Api(
                raw.error.clone().unwrap_or_else(|| "Unknown error".to_owned()),
            ));
        }

        let movie = Movie::from_response(raw, id.as_str());

        self.inner
            .cache
            .insert(key, CacheValue::Movie(Arc::new(movie.clone())))
            .await;

        Ok(movie)
    }
}
