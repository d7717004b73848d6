//! Public user profiles.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use reelbox_core::Username;

use crate::db::{ReviewRepository, UserRepository};
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;
use crate::routes::home::not_found_page;
use crate::routes::{DEFAULT_AVATAR, ReviewView};
use crate::state::AppState;

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "user_detail.html")]
pub struct UserDetailTemplate {
    pub current_user: Option<CurrentUser>,
    pub username: String,
    pub picture_src: String,
    pub reviews: Vec<ReviewView>,
}

/// Display a user's picture and reviews, newest first.
#[instrument(skip(state, viewer))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(username): Path<String>,
) -> Result<Response> {
    let path = format!("/user/{}", urlencoding::encode(&username));
    // Exact match only; parsing trims, so `/user/%20neo` must not find `neo`
    let Some(username) = Username::parse(&username)
        .ok()
        .filter(|parsed| parsed.as_str() == username)
    else {
        return Ok(not_found_page(viewer, &path));
    };

    let users = UserRepository::new(state.pool());
    let Some(user) = users.get_by_username(&username).await? else {
        return Ok(not_found_page(viewer, &path));
    };

    let picture_src = users
        .get_profile_picture(user.id)
        .await?
        .map_or_else(|| DEFAULT_AVATAR.to_owned(), |p| p.data_uri());

    let reviews = ReviewRepository::new(state.pool())
        .list_for_user(user.id)
        .await?
        .into_iter()
        .map(ReviewView::from)
        .collect();

    Ok(UserDetailTemplate {
        current_user: viewer,
        username: user.username.into_inner(),
        picture_src,
        reviews,
    }
    .into_response())
}
