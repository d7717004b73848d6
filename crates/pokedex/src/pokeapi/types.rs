//! `PokéAPI` response shapes and the domain types built from them.
//!
//! Only the fields the pages render are deserialized; serde ignores the rest.

use serde::Deserialize;

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
pub(super) struct NamedResource {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct PokemonListResponse {
    pub results: Vec<NamedResource>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PokemonResponse {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    #[serde(default)]
    pub sprites: Sprites,
}

#[derive(Debug, Deserialize)]
pub(super) struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Deserialize)]
pub(super) struct AbilitySlot {
    pub slot: u8,
    pub is_hidden: bool,
    pub ability: NamedResource,
}

#[derive(Debug, Deserialize)]
pub(super) struct StatEntry {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct Sprites {
    pub front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct EncounterEntry {
    pub location_area: NamedResource,
}

#[derive(Debug, Deserialize)]
pub(super) struct AbilityResponse {
    #[serde(default)]
    pub pokemon: Vec<AbilityPokemon>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AbilityPokemon {
    pub pokemon: NamedResource,
}

// =============================================================================
// Domain types
// =============================================================================

/// Everything the info page shows about one Pokémon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonInfo {
    pub id: u32,
    pub name: String,
    /// Height in decimetres.
    pub height: u32,
    /// Weight in hectograms.
    pub weight: u32,
    pub base_experience: Option<u32>,
    /// Type names in slot order.
    pub types: Vec<String>,
    /// Abilities in slot order.
    pub abilities: Vec<AbilityRef>,
    pub stats: Vec<BaseStat>,
    pub sprite_url: Option<String>,
    /// Location-area names where the Pokémon can be encountered, first
    /// occurrence order, without duplicates.
    pub locations: Vec<String>,
}

/// An ability as listed on a Pokémon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityRef {
    pub name: String,
    pub hidden: bool,
}

/// A base stat (`hp`, `attack`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseStat {
    pub name: String,
    pub value: u32,
}

impl PokemonInfo {
    pub(super) fn from_response(mut raw: PokemonResponse, encounters: Vec<EncounterEntry>) -> Self {
        raw.types.sort_by_key(|t| t.slot);
        raw.abilities.sort_by_key(|a| a.slot);

        let mut locations: Vec<String> = Vec::with_capacity(encounters.len());
        for entry in encounters {
            if !locations.contains(&entry.location_area.name) {
                locations.push(entry.location_area.name);
            }
        }

        Self {
            id: raw.id,
            name: raw.name,
            height: raw.height,
            weight: raw.weight,
            base_experience: raw.base_experience,
            types: raw.types.into_iter().map(|t| t.kind.name).collect(),
            abilities: raw
                .abilities
                .into_iter()
                .map(|a| AbilityRef {
                    name: a.ability.name,
                    hidden: a.is_hidden,
                })
                .collect(),
            stats: raw
                .stats
                .into_iter()
                .map(|s| BaseStat {
                    name: s.stat.name,
                    value: s.base_stat,
                })
                .collect(),
            sprite_url: raw.sprites.front_default,
            locations,
        }
    }
}
