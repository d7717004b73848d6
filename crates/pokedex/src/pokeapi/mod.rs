//! `PokéAPI` client.
//!
//! Plain REST over `reqwest`, JSON decoded with `serde`. Successful responses
//! are cached with `moka` (10-minute TTL by default); errors are never cached.
//!
//! # Example
//!
//! ```rust,ignore
//! use reelbox_core::Slug;
//! use reelbox_pokedex::pokeapi::PokeClient;
//!
//! let client = PokeClient::new(&config.pokeapi);
//! let names = client.get_pokemon_list().await?;
//! let pikachu = client.get_pokemon_info(&Slug::parse("pikachu")?).await?;
//! ```

mod types;

pub use types::{AbilityRef, BaseStat, PokemonInfo};

use std::sync::Arc;

use moka::future::Cache;
use reelbox_core::Slug;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::PokeApiConfig;
use types::{AbilityResponse, EncounterEntry, PokemonListResponse, PokemonResponse};

/// Errors that can occur when talking to `PokéAPI`.
#[derive(Debug, Error)]
pub enum PokeApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The API has no such resource.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Any other non-success status.
    #[error("Unexpected status {0}")]
    Status(u16),

    /// A URL could not be built from the configured base.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    PokemonList,
    Pokemon(Slug),
    Ability(Slug),
}

#[derive(Debug, Clone)]
enum CacheValue {
    Names(Arc<Vec<String>>),
    Pokemon(Arc<PokemonInfo>),
}

/// Client for the public `PokéAPI`.
#[derive(Clone)]
pub struct PokeClient {
    inner: Arc<PokeClientInner>,
}

struct PokeClientInner {
    client: reqwest::Client,
    base_url: Url,
    list_limit: u32,
    cache: Cache<CacheKey, CacheValue>,
}

impl PokeClient {
    /// Create a new client.
    #[must_use]
    pub fn new(config: &PokeApiConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(2000)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            inner: Arc::new(PokeClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                list_limit: config.list_limit,
                cache,
            }),
        }
    }

    /// GET `url` and decode the JSON body.
    ///
    /// `resource` names what was requested, for `NotFound`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        resource: &str,
    ) -> Result<T, PokeApiError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(PokeApiError::NotFound(resource.to_string()));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(PokeApiError::RateLimited(retry_after));
        }

        if !status.is_success() {
            tracing::error!(status = %status, resource, "PokéAPI returned non-success status");
            return Err(PokeApiError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse PokéAPI response"
            );
            PokeApiError::Parse(e)
        })
    }

    /// Names of every Pokémon, in API order.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_pokemon_list(&self) -> Result<Vec<String>, PokeApiError> {
        if let Some(CacheValue::Names(names)) = self.inner.cache.get(&CacheKey::PokemonList).await
        {
            debug!("Cache hit for pokemon list");
            return Ok(names.as_ref().clone());
        }

        let mut url = self.inner.base_url.join("pokemon")?;
        url.query_pairs_mut()
            .append_pair("limit", &self.inner.list_limit.to_string());

        let list: PokemonListResponse = self.get_json(url, "pokemon list").await?;
        let names: Vec<String> = list.results.into_iter().map(|r| r.name).collect();

        self.inner
            .cache
            .insert(CacheKey::PokemonList, CacheValue::Names(Arc::new(names.clone())))
            .await;

        Ok(names)
    }

    /// Details for one Pokémon, including where it can be encountered.
    ///
    /// A failed encounters lookup leaves `locations` empty rather than failing
    /// the whole page.
    ///
    /// # Errors
    ///
    /// Returns `PokeApiError::NotFound` if there is no such Pokémon, or another
    /// error if the API request fails.
    #[instrument(skip(self), fields(name = %name))]
    pub async fn get_pokemon_info(&self, name: &Slug) -> Result<PokemonInfo, PokeApiError> {
        let key = CacheKey::Pokemon(name.clone());
        if let Some(CacheValue::Pokemon(info)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for pokemon");
            return Ok(info.as_ref().clone());
        }

        let url = self.inner.base_url.join(&format!("pokemon/{name}"))?;
        let raw: PokemonResponse = self.get_json(url, &format!("pokemon '{name}'")).await?;

        let encounters_url = self
            .inner
            .base_url
            .join(&format!("pokemon/{name}/encounters"))?;
        let encounters: Vec<EncounterEntry> = match self
            .get_json(encounters_url, &format!("encounters for '{name}'"))
            .await
        {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load encounter locations");
                Vec::new()
            }
        };

        let info = PokemonInfo::from_response(raw, encounters);

        self.inner
            .cache
            .insert(key, CacheValue::Pokemon(Arc::new(info.clone())))
            .await;

        Ok(info)
    }

    /// Names of every Pokémon that can have `ability`.
    ///
    /// # Errors
    ///
    /// Returns `PokeApiError::NotFound` if there is no such ability, or another
    /// error if the API request fails.
    #[instrument(skip(self), fields(ability = %ability))]
    pub async fn get_pokemon_with_ability(
        &self,
        ability: &Slug,
    ) -> Result<Vec<String>, PokeApiError> {
        let key = CacheKey::Ability(ability.clone());
        if let Some(CacheValue::Names(names)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for ability");
            return Ok(names.as_ref().clone());
        }

        let url = self.inner.base_url.join(&format!("ability/{ability}"))?;
        let raw: AbilityResponse = self
            .get_json(url, &format!("ability '{ability}'"))
            .await?;
        let names: Vec<String> = raw.pokemon.into_iter().map(|p| p.pokemon.name).collect();

        self.inner
            .cache
            .insert(key, CacheValue::Names(Arc::new(names.clone())))
            .await;

        Ok(names)
    }
}
