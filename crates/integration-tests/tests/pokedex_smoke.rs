//! Smoke tests for a running Pokédex.
//!
//! These tests require:
//! - The Pokédex running (cargo run -p reelbox-pokedex)
//! - Network access to `PokeAPI`
//!
//! Run with: cargo test -p reelbox-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use reelbox_integration_tests::{client, pokedex_base_url};
use reqwest::StatusCode;

#[tokio::test]
#[ignore = "requires running pokedex server"]
async fn test_health() {
    let resp = client()
        .unwrap()
        .get(format!("{}/health", pokedex_base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("x-content-type-options")
            .and_then(|v| v.to_str().ok()),
        Some("nosniff")
    );
}

#[tokio::test]
#[ignore = "requires running pokedex server"]
async fn test_index_links_to_pokemon_and_abilities() {
    let http = client().unwrap();
    let base = pokedex_base_url();

    let index = http.get(&base).send().await.unwrap();
    assert_eq!(index.status(), StatusCode::OK);
    let body = index.text().await.unwrap();
    assert!(body.contains("href=\"/pokemon/bulbasaur\""));

    let detail = http
        .get(format!("{base}/pokemon/bulbasaur"))
        .send()
        .await
        .unwrap();
    assert_eq!(detail.status(), StatusCode::OK);
    let body = detail.text().await.unwrap();
    assert!(body.contains("href=\"/ability/overgrow\""));

    let ability = http
        .get(format!("{base}/ability/overgrow"))
        .send()
        .await
        .unwrap();
    assert_eq!(ability.status(), StatusCode::OK);
    assert!(ability.text().await.unwrap().contains("href=\"/pokemon/bulbasaur\""));
}

#[tokio::test]
#[ignore = "requires running pokedex server"]
async fn test_unknown_pokemon_is_not_found() {
    let resp = client()
        .unwrap()
        .get(format!("{}/pokemon/agumon", pokedex_base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
