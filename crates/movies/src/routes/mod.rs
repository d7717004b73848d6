//! HTTP route handlers for the movie site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Search form
//! POST /                        - Search submit (303 to results)
//! GET  /search-results/{query}  - Search results
//! GET  /movies/{movie_id}       - Movie details and reviews
//! POST /movies/{movie_id}       - Post a review (requires auth)
//! GET  /user/{username}         - Public profile and reviews
//!
//! # Auth
//! GET  /register                - Register page
//! POST /register                - Register action (rate limited)
//! GET  /login                   - Login page
//! POST /login                   - Login action (rate limited)
//! GET  /logout                  - Logout (requires auth)
//!
//! # Account (requires auth)
//! GET  /account                 - Username and picture forms
//! POST /account                 - Urlencoded: rename; multipart: picture
//! ```

pub mod account;
pub mod auth;
pub mod home;
pub mod movies;
pub mod users;

use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::middleware::auth_rate_limiter;
use crate::models::Review;
use crate::state::AppState;

/// Request body cap for `/account`; a little above the picture limit so an
/// oversized upload still reaches the form validation.
const ACCOUNT_BODY_LIMIT: usize = 3 * 1024 * 1024;

/// Placeholder shown for users without a profile picture.
pub const DEFAULT_AVATAR: &str = "/static/img/default-avatar.svg";

/// Create the auth routes router.
///
/// `trust_proxy` controls whether the rate limiter keys on proxy headers.
pub fn auth_routes(trust_proxy: bool) -> Router<AppState> {
    Router::new()
        .route(
            "/register",
            get(auth::register_page)
                .merge(post(auth::register).layer(auth_rate_limiter(trust_proxy))),
        )
        .route(
            "/login",
            get(auth::login_page).merge(post(auth::login).layer(auth_rate_limiter(trust_proxy))),
        )
        .route("/logout", get(auth::logout))
}

/// Create all routes for the movie site.
pub fn routes(trust_proxy: bool) -> Router<AppState> {
    Router::new()
        .route("/", get(home::index).post(home::search))
        .route("/search-results/{query}", get(home::search_results))
        .route(
            "/movies/{movie_id}",
            get(movies::detail).post(movies::post_review),
        )
        .route("/user/{username}", get(users::show))
        .route(
            "/account",
            get(account::index)
                .merge(post(account::update).layer(DefaultBodyLimit::max(ACCOUNT_BODY_LIMIT))),
        )
        .merge(auth_routes(trust_proxy))
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// A review as shown on movie and profile pages.
#[derive(Debug, Clone)]
pub struct ReviewView {
    pub commenter: String,
    pub commenter_href: String,
    pub content: String,
    pub date: String,
    pub movie_title: String,
    pub movie_href: String,
}

impl From<Review> for ReviewView {
    fn from(review: Review) -> Self {
        Self {
            commenter_href: format!("/user/{}", urlencoding::encode(&review.commenter)),
            movie_href: format!("/movies/{}", urlencoding::encode(&review.imdb_id)),
            date: review.display_date(),
            commenter: review.commenter,
            content: review.content,
            movie_title: review.movie_title,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use reelbox_core::{ReviewId, UserId};

    use super::*;

    #[test]
    fn test_review_view_links() {
        let review = Review {
            id: ReviewId::new(3),
            commenter_id: UserId::new(1),
            commenter: "film buff".to_string(),
            content: "Still holds up.".to_string(),
            imdb_id: "tt0078748".to_string(),
            movie_title: "Alien".to_string(),
            created_at: chrono::Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
        };

        let view = ReviewView::from(review);
        assert_eq!(view.commenter_href, "/user/film%20buff");
        assert_eq!(view.movie_href, "/movies/tt0078748");
        assert_eq!(view.date, "January 02, 2026 at 03:04:05");
    }
}
