//! Router tests: real handlers and templates, mocked `PokéAPI`.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use httpmock::prelude::*;
use reelbox_pokedex::build_router;
use reelbox_pokedex::config::{PokeApiConfig, PokedexConfig};
use reelbox_pokedex::state::AppState;
use reelbox_web::telemetry::SentrySettings;
use serde_json::json;
use tower::ServiceExt;

fn app_for(server: &MockServer) -> axum::Router {
    let config = PokedexConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        pokeapi: PokeApiConfig::with_base_url(&server.url("/api/v2/")).unwrap(),
        sentry: SentrySettings::default(),
    };
    build_router(AppState::new(config))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_index_links_every_pokemon() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/pokemon");
            then.status(200).json_body(json!({
                "results": [{"name": "mr-mime", "url": ""}, {"name": "pikachu", "url": ""}]
            }));
        })
        .await;

    let (status, body) = get(app_for(&server), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("href=\"/pokemon/mr-mime\""));
    assert!(body.contains("Mr Mime"));
    assert!(body.contains("href=\"/pokemon/pikachu\""));
}

#[tokio::test]
async fn test_index_upstream_failure_is_bad_gateway() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/pokemon");
            then.status(500);
        })
        .await;

    let (status, body) = get(app_for(&server), "/").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, "External service error");
}

#[tokio::test]
async fn test_info_page_links_abilities() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/pokemon/pikachu");
            then.status(200).json_body(json!({
                "id": 25,
                "name": "pikachu",
                "height": 4,
                "weight": 60,
                "base_experience": 112,
                "types": [{"slot": 1, "type": {"name": "electric"}}],
                "abilities": [{"slot": 1, "is_hidden": false, "ability": {"name": "static"}}],
                "stats": [],
                "sprites": {"front_default": null}
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/pokemon/pikachu/encounters");
            then.status(200)
                .json_body(json!([{"location_area": {"name": "viridian-forest-area"}}]));
        })
        .await;

    let (status, body) = get(app_for(&server), "/pokemon/pikachu").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("href=\"/ability/static\""));
    assert!(body.contains("0.4 m"));
    assert!(body.contains("Viridian Forest Area"));
}

#[tokio::test]
async fn test_unknown_pokemon_renders_message_with_404() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/pokemon/agumon");
            then.status(404);
        })
        .await;

    let (status, body) = get(app_for(&server), "/pokemon/agumon").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("agumon"));
    assert!(body.contains("was found."));
    assert!(body.contains("class=\"error\""));
}

#[tokio::test]
async fn test_invalid_name_never_reaches_upstream() {
    let server = MockServer::start_async().await;
    let any = server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200);
        })
        .await;

    let (status, body) = get(app_for(&server), "/pokemon/bad%20name").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Invalid Pokémon name"));
    any.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_ability_page_lists_pokemon() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/ability/imposter");
            then.status(200).json_body(json!({
                "pokemon": [{"is_hidden": true, "slot": 3, "pokemon": {"name": "ditto"}}]
            }));
        })
        .await;

    let (status, body) = get(app_for(&server), "/ability/imposter").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("href=\"/pokemon/ditto\""));
}

#[tokio::test]
async fn test_unknown_route_is_404_page() {
    let server = MockServer::start_async().await;

    let (status, body) = get(app_for(&server), "/berries").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Page not found"));
}

#[tokio::test]
async fn test_health_and_headers() {
    let server = MockServer::start_async().await;
    let response = app_for(&server)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert!(response.headers().contains_key("content-security-policy"));
}
