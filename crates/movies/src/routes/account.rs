//! Account page: rename and profile picture upload.
//!
//! Both forms post to `/account`. An urlencoded body is a username change;
//! a multipart body is a picture upload.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::db::UserRepository;
use crate::error::{AppError, Result, set_sentry_user};
use crate::filters;
use crate::middleware::{CsrfToken, RequireAuth, set_current_user, verify_csrf};
use crate::models::CurrentUser;
use crate::routes::DEFAULT_AVATAR;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Username form data.
#[derive(Debug, Deserialize)]
pub struct UsernameForm {
    #[serde(default)]
    pub csrf_token: String,
    #[serde(default)]
    pub username: String,
}

/// Account page template.
#[derive(Template, WebTemplate)]
#[template(path = "account.html")]
pub struct AccountTemplate {
    pub current_user: Option<CurrentUser>,
    pub csrf_token: String,
    pub email: String,
    pub picture_src: String,
    pub username_value: String,
    pub username_error: Option<String>,
    pub picture_error: Option<String>,
}

/// Which form failed, if any.
#[derive(Default)]
struct FormErrors {
    username_value: Option<String>,
    username: Option<String>,
    picture: Option<String>,
}

async fn render(
    state: &AppState,
    user: CurrentUser,
    csrf_token: String,
    errors: FormErrors,
) -> Result<Response> {
    let users = UserRepository::new(state.pool());
    let account = users
        .get_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", user.id)))?;

    let picture_src = users
        .get_profile_picture(user.id)
        .await?
        .map_or_else(|| DEFAULT_AVATAR.to_owned(), |p| p.data_uri());

    Ok(AccountTemplate {
        username_value: errors
            .username_value
            .unwrap_or_else(|| account.username.as_str().to_owned()),
        current_user: Some(user),
        csrf_token,
        email: account.email.into_inner(),
        picture_src,
        username_error: errors.username,
        picture_error: errors.picture,
    }
    .into_response())
}

/// Display the account page.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    csrf: CsrfToken,
) -> Result<Response> {
    render(&state, user, csrf.0, FormErrors::default()).await
}

/// Handle either account form.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    csrf: CsrfToken,
    request: Request,
) -> Result<Response> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    if is_multipart {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        update_picture(&state, user, &session, csrf, multipart).await
    } else {
        let Form(form) = Form::<UsernameForm>::from_request(request, &state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        update_username(&state, user, &session, csrf, form).await
    }
}

async fn update_username(
    state: &AppState,
    user: CurrentUser,
    session: &Session,
    csrf: CsrfToken,
    form: UsernameForm,
) -> Result<Response> {
    verify_csrf(session, &form.csrf_token).await?;

    match AuthService::new(state.pool())
        .rename(user.id, &form.username)
        .await
    {
        Ok(updated) => {
            set_current_user(session, &CurrentUser::from(&updated)).await?;
            set_sentry_user(&updated.id, Some(updated.username.as_str()));
            tracing::info!(username = %updated.username.as_str(), "Username changed");
            Ok(Redirect::to("/account").into_response())
        }
        Err(e @ (AuthError::InvalidUsername(_) | AuthError::UsernameTaken)) => {
            let message = match e {
                AuthError::UsernameTaken => "Username is taken".to_owned(),
                other => other.to_string(),
            };
            let errors = FormErrors {
                username_value: Some(form.username),
                username: Some(message),
                picture: None,
            };
            render(state, user, csrf.0, errors).await
        }
        Err(e) => Err(e.into()),
    }
}

async fn update_picture(
    state: &AppState,
    user: CurrentUser,
    session: &Session,
    csrf: CsrfToken,
    mut multipart: Multipart,
) -> Result<Response> {
    let mut token = String::new();
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        match field.name() {
            Some("csrf_token") => {
                token = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
            }
            Some("picture") => {
                let filename = field.file_name().unwrap_or_default().to_owned();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                upload = Some((filename, data.to_vec()));
            }
            _ => {}
        }
    }

    verify_csrf(session, &token).await?;

    let (filename, data) = upload.unwrap_or_default();
    match AuthService::new(state.pool())
        .set_profile_picture(user.id, &filename, &data)
        .await
    {
        Ok(()) => {
            tracing::info!(size = data.len(), "Profile picture updated");
            Ok(Redirect::to("/account").into_response())
        }
        Err(AuthError::InvalidPicture(message)) => {
            let errors = FormErrors {
                picture: Some(message),
                ..FormErrors::default()
            };
            render(state, user, csrf.0, errors).await
        }
        Err(e) => Err(e.into()),
    }
}
