//! Search form, search results, and the 404 page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use reelbox_core::SearchQuery;

use crate::error::Result;
use crate::filters;
use crate::middleware::{CsrfToken, OptionalAuth, verify_csrf};
use crate::models::CurrentUser;
use crate::omdb::MovieSummary;
use crate::state::AppState;

/// Search form data.
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub csrf_token: String,
    #[serde(default)]
    pub search_query: String,
}

/// Search page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub current_user: Option<CurrentUser>,
    pub csrf_token: String,
    pub search_query: String,
    pub error: Option<String>,
}

/// One search hit with its detail link.
pub struct ResultView {
    pub href: String,
    pub movie: MovieSummary,
}

/// Search results template.
#[derive(Template, WebTemplate)]
#[template(path = "search_results.html")]
pub struct SearchResultsTemplate {
    pub current_user: Option<CurrentUser>,
    pub query: String,
    pub results: Vec<ResultView>,
    pub error_msg: Option<String>,
}

/// 404 page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub current_user: Option<CurrentUser>,
    pub path: String,
}

/// Display the search form.
pub async fn index(OptionalAuth(user): OptionalAuth, csrf: CsrfToken) -> impl IntoResponse {
    IndexTemplate {
        current_user: user,
        csrf_token: csrf.0,
        search_query: String::new(),
        error: None,
    }
}

/// Handle search form submission.
///
/// A valid query redirects to its results page; anything else re-renders
/// the form with the field error.
#[instrument(skip(session, csrf, user, form))]
pub async fn search(
    OptionalAuth(user): OptionalAuth,
    session: Session,
    csrf: CsrfToken,
    Form(form): Form<SearchForm>,
) -> Result<Response> {
    verify_csrf(&session, &form.csrf_token).await?;

    match SearchQuery::parse(&form.search_query) {
        Ok(query) => {
            let target = format!("/search-results/{}", urlencoding::encode(query.as_str()));
            Ok(Redirect::to(&target).into_response())
        }
        Err(e) => Ok(IndexTemplate {
            current_user: user,
            csrf_token: csrf.0,
            search_query: form.search_query,
            error: Some(e.to_string()),
        }
        .into_response()),
    }
}

/// Display search results.
///
/// Problems OMDb reports (no matches, too many matches, bad key) are shown
/// on the page; transport failures become a 502.
#[instrument(skip(state, user))]
pub async fn search_results(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(query): Path<String>,
) -> Result<Response> {
    let page = |results: Vec<ResultView>, error_msg: Option<String>| SearchResultsTemplate {
        current_user: user.clone(),
        query: query.clone(),
        results,
        error_msg,
    };

    let parsed = match SearchQuery::parse(&query) {
        Ok(parsed) => parsed,
        Err(e) => return Ok(page(Vec::new(), Some(format!("Invalid search: {e}"))).into_response()),
    };

    match state.omdb().search(&parsed).await {
        Ok(hits) => {
            let results = hits
                .into_iter()
                .map(|movie| ResultView {
                    href: format!("/movies/{}", urlencoding::encode(&movie.imdb_id)),
                    movie,
                })
                .collect();
            Ok(page(results, None).into_response())
        }
        Err(e) if e.is_user_facing() => Ok(page(Vec::new(), Some(e.to_string())).into_response()),
        Err(e) => Err(e.into()),
    }
}

/// Render the 404 page.
pub fn not_found_page(user: Option<CurrentUser>, path: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            current_user: user,
            path: path.to_owned(),
        },
    )
        .into_response()
}

/// Fallback handler for unknown routes.
pub async fn not_found(OptionalAuth(user): OptionalAuth, uri: Uri) -> Response {
    not_found_page(user, uri.path())
}
