//! Authentication route handlers.
//!
//! Registration, login, and logout with username and password.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{
    CsrfToken, OptionalAuth, RequireAuth, clear_current_user, set_current_user, verify_csrf,
};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthService, Registration, RegistrationErrors};
use crate::state::AppState;

/// Shown after a failed login.
pub const LOGIN_FAILED: &str = "Login failed. Check your username and/or password";

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub csrf_token: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub next: Option<String>,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub csrf_token: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for the login page.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
    pub success: Option<String>,
    pub next: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub current_user: Option<CurrentUser>,
    pub csrf_token: String,
    pub error: Option<String>,
    pub success: Option<String>,
    pub next: String,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub current_user: Option<CurrentUser>,
    pub csrf_token: String,
    pub username: String,
    pub email: String,
    pub errors: RegistrationErrors,
}

/// Only same-site relative paths are followed after login.
///
/// Browsers drop tabs and newlines from a `Location` before resolving it, so
/// `/\t/host` would become `//host`; control characters are rejected outright.
#[must_use]
pub fn safe_next(next: Option<&str>) -> Option<&str> {
    next.filter(|n| {
        n.starts_with('/')
            && !n.starts_with("//")
            && !n.contains('\\')
            && !n.chars().any(char::is_control)
    })
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(
    OptionalAuth(user): OptionalAuth,
    csrf: CsrfToken,
    Query(query): Query<LoginQuery>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }

    let error = query.error.as_deref().map(|code| match code {
        "credentials" => LOGIN_FAILED.to_owned(),
        _ => "Something went wrong, please try again".to_owned(),
    });
    let success = query.success.as_deref().map(|code| match code {
        "registered" => "Account created. You can now log in.".to_owned(),
        _ => "Done.".to_owned(),
    });

    LoginTemplate {
        current_user: None,
        csrf_token: csrf.0,
        error,
        success,
        next: safe_next(query.next.as_deref()).unwrap_or_default().to_owned(),
    }
    .into_response()
}

/// Handle login form submission.
#[instrument(skip(state, user, session, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    if user.is_some() {
        return Ok(Redirect::to("/").into_response());
    }
    verify_csrf(&session, &form.csrf_token).await?;

    let next = safe_next(form.next.as_deref());

    match AuthService::new(state.pool())
        .login(&form.username, &form.password)
        .await
    {
        Ok(user) => {
            // New session id on privilege change
            session.cycle_id().await?;
            set_current_user(&session, &CurrentUser::from(&user)).await?;
            set_sentry_user(&user.id, Some(user.username.as_str()));
            tracing::info!(user_id = %user.id, "User logged in");

            Ok(Redirect::to(next.unwrap_or("/account")).into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("Login failed");
            let target = next.map_or_else(
                || "/login?error=credentials".to_owned(),
                |n| format!("/login?error=credentials&next={}", urlencoding::encode(n)),
            );
            Ok(Redirect::to(&target).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(OptionalAuth(user): OptionalAuth, csrf: CsrfToken) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }

    RegisterTemplate {
        current_user: None,
        csrf_token: csrf.0,
        username: String::new(),
        email: String::new(),
        errors: RegistrationErrors::default(),
    }
    .into_response()
}

/// Handle registration form submission.
#[instrument(skip(state, user, session, csrf, form), fields(username = %form.username))]
pub async fn register(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
    csrf: CsrfToken,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    if user.is_some() {
        return Ok(Redirect::to("/").into_response());
    }
    verify_csrf(&session, &form.csrf_token).await?;

    let registration = Registration {
        username: &form.username,
        email: &form.email,
        password: &form.password,
        confirm_password: &form.confirm_password,
    };

    match AuthService::new(state.pool()).register(&registration).await {
        Ok(_) => Ok(Redirect::to("/login?success=registered").into_response()),
        Err(e) => {
            let errors = RegistrationErrors::from_auth_error(e)?;
            Ok(RegisterTemplate {
                current_user: None,
                csrf_token: csrf.0,
                username: form.username,
                email: form.email,
                errors,
            }
            .into_response())
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Log out and return to the search page.
pub async fn logout(RequireAuth(user): RequireAuth, session: Session) -> Result<Response> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    tracing::info!(user_id = %user.id, "User logged out");
    Ok(Redirect::to("/").into_response())
}
