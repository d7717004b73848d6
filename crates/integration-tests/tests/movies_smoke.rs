//! Smoke tests for a running movie site.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (cargo run -p reelbox-cli -- migrate)
//! - The movie site running (cargo run -p reelbox-movies)
//! - A valid `OMDB_API_KEY` in the server's environment
//!
//! Run with: cargo test -p reelbox-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use reelbox_integration_tests::{client, csrf_from, movies_base_url, unique_username};
use reqwest::{Client, StatusCode};

const PASSWORD: &str = "smoke-test-password";

async fn token(http: &Client, url: &str) -> String {
    let body = http.get(url).send().await.unwrap().text().await.unwrap();
    csrf_from(&body).unwrap().to_owned()
}

fn location(resp: &reqwest::Response) -> &str {
    resp.headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
#[ignore = "requires running movies server"]
async fn test_health_and_readiness() {
    let http = client().unwrap();
    let base = movies_base_url();

    let resp = http.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = http.get(format!("{base}/health/ready")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires running movies server"]
async fn test_search_flow() {
    let http = client().unwrap();
    let base = movies_base_url();

    let csrf_token = token(&http, &base).await;
    let resp = http
        .post(format!("{base}/"))
        .form(&[("csrf_token", csrf_token.as_str()), ("search_query", "alien")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/search-results/alien");

    let results = http
        .get(format!("{base}/search-results/alien"))
        .send()
        .await
        .unwrap();
    assert_eq!(results.status(), StatusCode::OK);
    assert!(results.text().await.unwrap().contains("href=\"/movies/tt0078748\""));
}

#[tokio::test]
#[ignore = "requires running movies server"]
async fn test_account_lifecycle() {
    let http = client().unwrap();
    let base = movies_base_url();
    let username = unique_username();
    let email = format!("{username}@example.com");

    // Register
    let csrf_token = token(&http, &format!("{base}/register")).await;
    let resp = http
        .post(format!("{base}/register"))
        .form(&[
            ("csrf_token", csrf_token.as_str()),
            ("username", username.as_str()),
            ("email", email.as_str()),
            ("password", PASSWORD),
            ("confirm_password", PASSWORD),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login?success=registered");

    // Log in
    let csrf_token = token(&http, &format!("{base}/login")).await;
    let resp = http
        .post(format!("{base}/login"))
        .form(&[
            ("csrf_token", csrf_token.as_str()),
            ("username", username.as_str()),
            ("password", PASSWORD),
            ("next", ""),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/account");

    // Review a movie
    let movie_url = format!("{base}/movies/tt0078748");
    let csrf_token = token(&http, &movie_url).await;
    let review = format!("Smoke test review by {username}.");
    let resp = http
        .post(&movie_url)
        .form(&[("csrf_token", csrf_token.as_str()), ("text", review.as_str())])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let page = http.get(&movie_url).send().await.unwrap().text().await.unwrap();
    assert!(page.contains(&review));

    let profile = http
        .get(format!("{base}/user/{username}"))
        .send()
        .await
        .unwrap();
    assert_eq!(profile.status(), StatusCode::OK);
    assert!(profile.text().await.unwrap().contains(&review));

    // Log out
    let resp = http.get(format!("{base}/logout")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let resp = http.get(format!("{base}/account")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(location(&resp).starts_with("/login"));
}
