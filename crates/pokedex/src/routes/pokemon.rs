//! Pokémon route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use reelbox_core::Slug;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::pokeapi::{BaseStat, PokeApiError, PokemonInfo};
use crate::state::AppState;

/// A link to a Pokémon's info page.
#[derive(Debug, Clone)]
pub struct PokemonLink {
    pub name: String,
    pub href: String,
}

impl PokemonLink {
    fn new(name: String) -> Self {
        let href = format!("/pokemon/{}", urlencoding::encode(&name));
        Self { name, href }
    }
}

/// An ability as shown on the info page.
#[derive(Debug, Clone)]
pub struct AbilityView {
    pub name: String,
    pub href: String,
    pub hidden: bool,
}

/// Pokémon display data for templates.
#[derive(Debug, Clone)]
pub struct PokemonView {
    pub id: u32,
    pub name: String,
    pub height: String,
    pub weight: String,
    pub base_experience: Option<u32>,
    pub types: Vec<String>,
    pub abilities: Vec<AbilityView>,
    pub stats: Vec<BaseStat>,
    pub sprite_url: Option<String>,
    pub locations: Vec<String>,
}

impl From<PokemonInfo> for PokemonView {
    fn from(info: PokemonInfo) -> Self {
        Self {
            id: info.id,
            name: info.name,
            height: format!("{:.1} m", f64::from(info.height) / 10.0),
            weight: format!("{:.1} kg", f64::from(info.weight) / 10.0),
            base_experience: info.base_experience,
            types: info.types,
            abilities: info
                .abilities
                .into_iter()
                .map(|a| AbilityView {
                    href: format!("/ability/{}", urlencoding::encode(&a.name)),
                    name: a.name,
                    hidden: a.hidden,
                })
                .collect(),
            stats: info.stats,
            sprite_url: info.sprite_url,
            locations: info.locations,
        }
    }
}

/// Index page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub pokemon: Vec<PokemonLink>,
}

/// Pokémon info page template.
#[derive(Template, WebTemplate)]
#[template(path = "pokemon.html")]
pub struct InfoTemplate {
    pub requested: String,
    pub pokemon: Option<PokemonView>,
    pub error_msg: Option<String>,
}

/// Ability page template.
#[derive(Template, WebTemplate)]
#[template(path = "ability.html")]
pub struct AbilityTemplate {
    pub ability: String,
    pub pokemon: Vec<PokemonLink>,
    pub error_msg: Option<String>,
}

/// 404 page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub path: String,
}

/// Display every Pokémon name.
///
/// # Errors
///
/// Returns `AppError::Upstream` if the list cannot be fetched.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<IndexTemplate> {
    let names = state.poke().get_pokemon_list().await?;
    Ok(IndexTemplate {
        pokemon: names.into_iter().map(PokemonLink::new).collect(),
    })
}

/// Display one Pokémon.
///
/// An invalid or unknown name renders the page with an error message and
/// status 404.
///
/// # Errors
///
/// Returns `AppError::Upstream` for any other `PokéAPI` failure.
#[instrument(skip(state))]
pub async fn info(State(state): State<AppState>, Path(name): Path<String>) -> Result<Response> {
    let missing = |requested: String, message: String| {
        (
            StatusCode::NOT_FOUND,
            InfoTemplate {
                requested,
                pokemon: None,
                error_msg: Some(message),
            },
        )
            .into_response()
    };

    let slug = match Slug::parse(&name) {
        Ok(slug) => slug,
        Err(e) => return Ok(missing(name, format!("Invalid Pokémon name: {e}"))),
    };

    match state.poke().get_pokemon_info(&slug).await {
        Ok(info) => Ok(InfoTemplate {
            requested: slug.to_string(),
            pokemon: Some(info.into()),
            error_msg: None,
        }
        .into_response()),
        Err(PokeApiError::NotFound(_)) => Ok(missing(
            slug.to_string(),
            format!("No Pokémon named '{slug}' was found."),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Display every Pokémon that can have an ability.
///
/// # Errors
///
/// Returns `AppError::Upstream` for `PokéAPI` failures other than not-found.
#[instrument(skip(state))]
pub async fn ability(State(state): State<AppState>, Path(name): Path<String>) -> Result<Response> {
    let missing = |ability: String, message: String| {
        (
            StatusCode::NOT_FOUND,
            AbilityTemplate {
                ability,
                pokemon: Vec::new(),
                error_msg: Some(message),
            },
        )
            .into_response()
    };

    let slug = match Slug::parse(&name) {
        Ok(slug) => slug,
        Err(e) => return Ok(missing(name, format!("Invalid ability name: {e}"))),
    };

    match state.poke().get_pokemon_with_ability(&slug).await {
        Ok(names) => Ok(AbilityTemplate {
            ability: slug.to_string(),
            pokemon: names.into_iter().map(PokemonLink::new).collect(),
            error_msg: None,
        }
        .into_response()),
        Err(PokeApiError::NotFound(_)) => Ok(missing(
            slug.to_string(),
            format!("No ability named '{slug}' was found."),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Fallback for unknown paths.
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            path: uri.path().to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokeapi::AbilityRef;

    #[test]
    fn test_pokemon_view_formats_units_and_links() {
        let view = PokemonView::from(PokemonInfo {
            id: 25,
            name: "pikachu".to_string(),
            height: 4,
            weight: 60,
            base_experience: Some(112),
            types: vec!["electric".to_string()],
            abilities: vec![AbilityRef {
                name: "lightning-rod".to_string(),
                hidden: true,
            }],
            stats: Vec::new(),
            sprite_url: None,
            locations: Vec::new(),
        });

        assert_eq!(view.height, "0.4 m");
        assert_eq!(view.weight, "6.0 kg");
        assert_eq!(view.abilities.len(), 1);
        assert_eq!(view.abilities.first().map(|a| a.href.as_str()), Some("/ability/lightning-rod"));
    }

    #[test]
    fn test_pokemon_link_href() {
        let link = PokemonLink::new("mr-mime".to_string());
        assert_eq!(link.href, "/pokemon/mr-mime");
    }
}
