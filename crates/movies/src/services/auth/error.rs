//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid username.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] reelbox_core::UsernameError),

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] reelbox_core::EmailError),

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Username belongs to another account.
    #[error("username is taken")]
    UsernameTaken,

    /// Email belongs to another account.
    #[error("email is already registered")]
    EmailTaken,

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Upload is not an accepted image.
    #[error("invalid picture: {0}")]
    InvalidPicture(String),

    /// One or more registration fields failed validation.
    #[error("registration failed validation")]
    Registration(RegistrationErrors),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

/// Per-field messages for the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationErrors {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

impl RegistrationErrors {
    /// True when no field has an error.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.confirm_password.is_none()
    }

    /// Turn a registration failure into form errors.
    ///
    /// # Errors
    ///
    /// Returns the original error when it is not about the submitted fields.
    pub fn from_auth_error(error: AuthError) -> Result<Self, AuthError> {
        let mut errors = Self::default();
        match error {
            AuthError::Registration(e) => return Ok(e),
            AuthError::UsernameTaken => errors.username = Some(USERNAME_TAKEN.to_owned()),
            AuthError::EmailTaken => errors.email = Some(EMAIL_TAKEN.to_owned()),
            other => return Err(other),
        }
        Ok(errors)
    }
}

pub(super) const USERNAME_TAKEN: &str = "Username is taken";
pub(super) const EMAIL_TAKEN: &str = "Email is taken";
