//! `PokeClient` tests against a mocked `PokéAPI`.

#![allow(clippy::unwrap_used)]

use httpmock::prelude::*;
use reelbox_core::Slug;
use reelbox_pokedex::config::PokeApiConfig;
use reelbox_pokedex::pokeapi::{PokeApiError, PokeClient};
use serde_json::json;

fn client_for(server: &MockServer, list_limit: u32) -> PokeClient {
    let mut config = PokeApiConfig::with_base_url(&server.url("/api/v2")).unwrap();
    config.list_limit = list_limit;
    PokeClient::new(&config)
}

fn ditto_json() -> serde_json::Value {
    json!({
        "id": 132,
        "name": "ditto",
        "height": 3,
        "weight": 40,
        "base_experience": 101,
        "types": [{"slot": 1, "type": {"name": "normal", "url": ""}}],
        "abilities": [
            {"slot": 1, "is_hidden": false, "ability": {"name": "limber", "url": ""}},
            {"slot": 3, "is_hidden": true, "ability": {"name": "imposter", "url": ""}}
        ],
        "stats": [{"base_stat": 48, "effort": 1, "stat": {"name": "hp", "url": ""}}],
        "sprites": {"front_default": "https://raw.githubusercontent.com/132.png"}
    })
}

#[tokio::test]
async fn test_pokemon_list_sends_limit_and_keeps_order() {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v2/pokemon")
                .query_param("limit", "3");
            then.status(200).json_body(json!({
                "count": 1302,
                "results": [
                    {"name": "bulbasaur", "url": ""},
                    {"name": "ivysaur", "url": ""},
                    {"name": "venusaur", "url": ""}
                ]
            }));
        })
        .await;

    let client = client_for(&server, 3);
    let names = client.get_pokemon_list().await.unwrap();

    assert_eq!(names, vec!["bulbasaur", "ivysaur", "venusaur"]);
    list.assert_async().await;
}

#[tokio::test]
async fn test_pokemon_list_is_cached() {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/pokemon");
            then.status(200)
                .json_body(json!({"results": [{"name": "mew", "url": ""}]}));
        })
        .await;

    let client = client_for(&server, 10);
    client.get_pokemon_list().await.unwrap();
    let names = client.get_pokemon_list().await.unwrap();

    assert_eq!(names, vec!["mew"]);
    list.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_pokemon_info_includes_locations() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/pokemon/ditto");
            then.status(200).json_body(ditto_json());
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/pokemon/ditto/encounters");
            then.status(200).json_body(json!([
                {"location_area": {"name": "cerulean-cave-1f", "url": ""}, "version_details": []},
                {"location_area": {"name": "route-13-area", "url": ""}, "version_details": []},
                {"location_area": {"name": "cerulean-cave-1f", "url": ""}, "version_details": []}
            ]));
        })
        .await;

    let client = client_for(&server, 10);
    let info = client
        .get_pokemon_info(&Slug::parse("Ditto").unwrap())
        .await
        .unwrap();

    assert_eq!(info.id, 132);
    assert_eq!(info.name, "ditto");
    assert_eq!(info.types, vec!["normal"]);
    assert_eq!(info.abilities.len(), 2);
    assert_eq!(info.locations, vec!["cerulean-cave-1f", "route-13-area"]);
}

#[tokio::test]
async fn test_pokemon_info_survives_encounter_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/pokemon/ditto");
            then.status(200).json_body(ditto_json());
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/pokemon/ditto/encounters");
            then.status(500);
        })
        .await;

    let client = client_for(&server, 10);
    let info = client
        .get_pokemon_info(&Slug::parse("ditto").unwrap())
        .await
        .unwrap();

    assert!(info.locations.is_empty());
}

#[tokio::test]
async fn test_unknown_pokemon_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/pokemon/missingno");
            then.status(404).body("Not Found");
        })
        .await;

    let client = client_for(&server, 10);
    let err = client
        .get_pokemon_info(&Slug::parse("missingno").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, PokeApiError::NotFound(_)));
}

#[tokio::test]
async fn test_rate_limit_reports_retry_after() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/ability/static");
            then.status(429).header("Retry-After", "7");
        })
        .await;

    let client = client_for(&server, 10);
    let err = client
        .get_pokemon_with_ability(&Slug::parse("static").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, PokeApiError::RateLimited(7)));
}

#[tokio::test]
async fn test_server_error_is_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/pokemon");
            then.status(503);
        })
        .await;

    let client = client_for(&server, 10);
    let err = client.get_pokemon_list().await.unwrap_err();

    assert!(matches!(err, PokeApiError::Status(503)));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/pokemon");
            then.status(200).body("{\"results\": 12}");
        })
        .await;

    let client = client_for(&server, 10);
    let err = client.get_pokemon_list().await.unwrap_err();

    assert!(matches!(err, PokeApiError::Parse(_)));
}

#[tokio::test]
async fn test_pokemon_with_ability() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/ability/imposter");
            then.status(200).json_body(json!({
                "id": 150,
                "name": "imposter",
                "pokemon": [
                    {"is_hidden": true, "slot": 3, "pokemon": {"name": "ditto", "url": ""}}
                ]
            }));
        })
        .await;

    let client = client_for(&server, 10);
    let names = client
        .get_pokemon_with_ability(&Slug::parse("imposter").unwrap())
        .await
        .unwrap();

    assert_eq!(names, vec!["ditto"]);
}
