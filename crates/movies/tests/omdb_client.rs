//! `MovieClient` tests against a mocked OMDb.

#![allow(clippy::unwrap_used)]

use httpmock::prelude::*;
use reelbox_core::{ImdbId, SearchQuery};
use reelbox_movies::config::OmdbConfig;
use reelbox_movies::omdb::{MovieClient, OmdbError};
use secrecy::SecretString;
use serde_json::{Value, json};

const KEY: &str = "test-key";

fn client_for(server: &MockServer, max_pages: u32) -> MovieClient {
    let mut config = OmdbConfig::new(SecretString::from(KEY), &server.url("/")).unwrap();
    config.max_search_pages = max_pages;
    MovieClient::new(&config)
}

fn hits(start: usize, count: usize) -> Vec<Value> {
    (start..start + count)
        .map(|i| {
            json!({
                "Title": format!("Alien {i}"),
                "Year": "1979",
                "imdbID": format!("tt{i:07}"),
                "Type": "movie",
                "Poster": "N/A"
            })
        })
        .collect()
}

fn page(items: Vec<Value>, total: usize) -> Value {
    json!({"Search": items, "totalResults": total.to_string(), "Response": "True"})
}

fn query(s: &str) -> SearchQuery {
    SearchQuery::parse(s).unwrap()
}

#[tokio::test]
async fn test_search_follows_pages_until_total() {
    let server = MockServer::start_async().await;
    let first = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/")
                .query_param("apikey", KEY)
                .query_param("s", "alien")
                .query_param("page", "1");
            then.status(200).json_body(page(hits(0, 10), 12));
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET).path("/").query_param("page", "2");
            then.status(200).json_body(page(hits(10, 2), 12));
        })
        .await;

    let results = client_for(&server, 5).search(&query("alien")).await.unwrap();

    assert_eq!(results.len(), 12);
    assert_eq!(results[0].imdb_id, "tt0000000");
    assert_eq!(results[11].title, "Alien 11");
    assert!(results[0].poster_url.is_none());
    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn test_search_stops_at_page_limit() {
    let server = MockServer::start_async().await;
    let first = server
        .mock_async(|when, then| {
            when.method(GET).path("/").query_param("page", "1");
            then.status(200).json_body(page(hits(0, 10), 300));
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET).path("/").query_param("page", "2");
            then.status(200).json_body(page(hits(10, 10), 300));
        })
        .await;
    let third = server
        .mock_async(|when, then| {
            when.method(GET).path("/").query_param("page", "3");
            then.status(200).json_body(page(hits(20, 10), 300));
        })
        .await;

    let results = client_for(&server, 2).search(&query("alien")).await.unwrap();

    assert_eq!(results.len(), 20);
    first.assert_async().await;
    second.assert_async().await;
    third.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_search_stops_on_empty_page() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/").query_param("page", "1");
            then.status(200).json_body(page(hits(0, 10), 25));
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET).path("/").query_param("page", "2");
            then.status(200).json_body(page(Vec::new(), 25));
        })
        .await;
    let third = server
        .mock_async(|when, then| {
            when.method(GET).path("/").query_param("page", "3");
            then.status(200).json_body(page(hits(20, 5), 25));
        })
        .await;

    let results = client_for(&server, 5).search(&query("alien")).await.unwrap();

    assert_eq!(results.len(), 10);
    second.assert_async().await;
    third.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_failed_follow_up_page_keeps_first_page() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/").query_param("page", "1");
            then.status(200).json_body(page(hits(0, 10), 20));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/").query_param("page", "2");
            then.status(500);
        })
        .await;

    let results = client_for(&server, 5).search(&query("alien")).await.unwrap();

    assert_eq!(results.len(), 10);
}

#[tokio::test]
async fn test_search_reports_omdb_error_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/").query_param("s", "zzzzqx");
            then.status(200)
                .json_body(json!({"Response": "False", "Error": "Movie not found!"}));
        })
        .await;

    let err = client_for(&server, 5)
        .search(&query("zzzzqx"))
        .await
        .unwrap_err();

    assert!(err.is_user_facing());
    assert_eq!(err.to_string(), "Error retrieving results: 'Movie not found!'");
}

#[tokio::test]
async fn test_unauthorized_key_is_request_failed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(401)
                .json_body(json!({"Response": "False", "Error": "Invalid API key!"}));
        })
        .await;

    let err = client_for(&server, 5)
        .search(&query("alien"))
        .await
        .unwrap_err();

    assert!(matches!(err, OmdbError::RequestFailed(401)));
    assert!(err.is_user_facing());
}

#[tokio::test]
async fn test_search_results_are_cached() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/").query_param("page", "1");
            then.status(200).json_body(page(hits(0, 3), 3));
        })
        .await;

    let client = client_for(&server, 5);
    let first = client.search(&query("Alien")).await.unwrap();
    let second = client.search(&query("alien")).await.unwrap();

    assert_eq!(first, second);
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let server = MockServer::start_async().await;
    let mut failing = server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(503);
        })
        .await;

    let client = client_for(&server, 5);
    assert!(client.search(&query("alien")).await.is_err());

    failing.delete_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200).json_body(page(hits(0, 1), 1));
        })
        .await;

    assert_eq!(client.search(&query("alien")).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_retrieve_movie_by_id_requests_full_plot() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/")
                .query_param("apikey", KEY)
                .query_param("i", "tt0078748")
                .query_param("plot", "full");
            then.status(200).json_body(json!({
                "Title": "Alien",
                "Year": "1979",
                "Rated": "R",
                "Released": "22 Jun 1979",
                "Runtime": "117 min",
                "Genre": "Horror, Sci-Fi",
                "Director": "Ridley Scott",
                "Writer": "Dan O'Bannon",
                "Actors": "Sigourney Weaver, Tom Skerritt",
                "Plot": "The crew of a commercial spacecraft...",
                "Language": "English",
                "Country": "United Kingdom, United States",
                "Awards": "N/A",
                "Poster": "https://m.media-amazon.com/images/alien.jpg",
                "imdbRating": "8.5",
                "imdbID": "tt0078748",
                "Type": "movie",
                "Response": "True"
            }));
        })
        .await;

    let movie = client_for(&server, 5)
        .retrieve_movie_by_id(&ImdbId::parse("tt0078748").unwrap())
        .await
        .unwrap();

    assert_eq!(movie.title, "Alien");
    assert_eq!(movie.director.as_deref(), Some("Ridley Scott"));
    assert_eq!(movie.imdb_rating.as_deref(), Some("8.5"));
    assert!(movie.awards.is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_retrieve_unknown_id() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/").query_param("i", "tt9999999999");
            then.status(200)
                .json_body(json!({"Response": "False", "Error": "Incorrect IMDb ID."}));
        })
        .await;

    let err = client_for(&server, 5)
        .retrieve_movie_by_id(&ImdbId::parse("tt9999999999").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, OmdbError::Api(ref msg) if msg == "Incorrect IMDb ID."));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let err = client_for(&server, 5)
        .retrieve_movie_by_id(&ImdbId::parse("tt0078748").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, OmdbError::Parse(_)));
    assert!(!err.is_user_facing());
}
