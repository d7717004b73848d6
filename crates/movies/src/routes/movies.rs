//! Movie detail page and review posting.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{OriginalUri, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use reelbox_core::{ImdbId, ReviewText};

use crate::db::reviews::NewReview;
use crate::db::ReviewRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::{CsrfToken, OptionalAuth, RequireAuth, verify_csrf};
use crate::models::CurrentUser;
use crate::omdb::{Movie, OmdbError};
use crate::routes::ReviewView;
use crate::state::AppState;

/// Review form data.
#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    #[serde(default)]
    pub csrf_token: String,
    #[serde(default)]
    pub text: String,
}

/// Movie detail template.
#[derive(Template, WebTemplate)]
#[template(path = "movie_detail.html")]
pub struct MovieDetailTemplate {
    pub current_user: Option<CurrentUser>,
    pub csrf_token: String,
    pub movie_id: String,
    pub movie: Option<Movie>,
    pub reviews: Vec<ReviewView>,
    pub error_msg: Option<String>,
    pub review_text: String,
    pub review_error: Option<String>,
}

impl MovieDetailTemplate {
    fn failed(user: Option<CurrentUser>, csrf_token: String, movie_id: &str, msg: String) -> Self {
        Self {
            current_user: user,
            csrf_token,
            movie_id: movie_id.to_owned(),
            movie: None,
            reviews: Vec::new(),
            error_msg: Some(msg),
            review_text: String::new(),
            review_error: None,
        }
    }
}

/// A movie page's outcome: the movie, or the message to show instead.
type Lookup = std::result::Result<(ImdbId, Movie), String>;

/// Fetch the movie for `movie_id`.
///
/// Malformed ids get the same message OMDb gives for unknown ones.
async fn load_movie(state: &AppState, movie_id: &str) -> Result<Lookup> {
    let Ok(id) = ImdbId::parse(movie_id) else {
        return Ok(Err(OmdbError::Api("Incorrect IMDb ID.".to_owned()).to_string()));
    };

    match state.omdb().retrieve_movie_by_id(&id).await {
        Ok(movie) => Ok(Ok((id, movie))),
        Err(e) if e.is_user_facing() => Ok(Err(e.to_string())),
        Err(e) => Err(e.into()),
    }
}

async fn render(
    state: &AppState,
    user: Option<CurrentUser>,
    csrf_token: String,
    id: &ImdbId,
    movie: Movie,
    review_text: String,
    review_error: Option<String>,
) -> Result<MovieDetailTemplate> {
    let reviews = ReviewRepository::new(state.pool())
        .list_for_movie(id)
        .await?
        .into_iter()
        .map(ReviewView::from)
        .collect();

    Ok(MovieDetailTemplate {
        current_user: user,
        csrf_token,
        movie_id: id.to_string(),
        movie: Some(movie),
        reviews,
        error_msg: None,
        review_text,
        review_error,
    })
}

/// Display a movie with its reviews.
#[instrument(skip(state, user, csrf))]
pub async fn detail(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    csrf: CsrfToken,
    Path(movie_id): Path<String>,
) -> Result<Response> {
    let (id, movie) = match load_movie(&state, &movie_id).await? {
        Ok(found) => found,
        Err(msg) => {
            return Ok(MovieDetailTemplate::failed(user, csrf.0, &movie_id, msg).into_response());
        }
    };

    Ok(render(&state, user, csrf.0, &id, movie, String::new(), None)
        .await?
        .into_response())
}

/// Handle review form submission.
///
/// Anonymous visitors are sent to the login page first.
#[instrument(skip(state, user, session, csrf, uri, form), fields(user_id = %user.id))]
pub async fn post_review(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    csrf: CsrfToken,
    OriginalUri(uri): OriginalUri,
    Path(movie_id): Path<String>,
    Form(form): Form<ReviewForm>,
) -> Result<Response> {
    verify_csrf(&session, &form.csrf_token).await?;

    let (id, movie) = match load_movie(&state, &movie_id).await? {
        Ok(found) => found,
        Err(msg) => {
            return Ok(
                MovieDetailTemplate::failed(Some(user), csrf.0, &movie_id, msg).into_response(),
            );
        }
    };

    let content = match ReviewText::parse(&form.text) {
        Ok(content) => content,
        Err(e) => {
            let page = render(
                &state,
                Some(user),
                csrf.0,
                &id,
                movie,
                form.text,
                Some(e.to_string()),
            )
            .await?;
            return Ok(page.into_response());
        }
    };

    let review = ReviewRepository::new(state.pool())
        .create(&NewReview {
            commenter_id: user.id,
            content: &content,
            imdb_id: &id,
            movie_title: &movie.title,
        })
        .await?;

    tracing::info!(review_id = %review.id, "Review posted");
    Ok(Redirect::to(uri.path()).into_response())
}
