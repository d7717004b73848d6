//! Authentication service.
//!
//! Password registration and login, plus the two account changes the site
//! offers: renaming and replacing the profile picture.

mod error;

pub use error::{AuthError, RegistrationErrors};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;
use tracing::instrument;

use reelbox_core::{Email, UserId, Username};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;
use error::{EMAIL_TAKEN, USERNAME_TAKEN};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Largest accepted profile picture.
pub const MAX_PICTURE_BYTES: usize = 2 * 1024 * 1024;

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Raw registration form input.
#[derive(Debug, Clone, Copy)]
pub struct Registration<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new account.
    ///
    /// Every field is checked before anything is written, so the form can show
    /// all problems at once.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Registration` with per-field messages if validation
    /// fails or the username/email is already in use.
    /// Returns `AuthError::UsernameTaken`/`EmailTaken` if another registration
    /// claimed the name between the check and the insert.
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn register(&self, form: &Registration<'_>) -> Result<User, AuthError> {
        let mut errors = RegistrationErrors::default();

        let username = match Username::parse(form.username) {
            Ok(username) => {
                if self.users.username_exists(&username).await? {
                    errors.username = Some(USERNAME_TAKEN.to_owned());
                }
                Some(username)
            }
            Err(e) => {
                errors.username = Some(e.to_string());
                None
            }
        };

        let email = match Email::parse(form.email) {
            Ok(email) => {
                if self.users.email_exists(&email).await? {
                    errors.email = Some(EMAIL_TAKEN.to_owned());
                }
                Some(email)
            }
            Err(e) => {
                errors.email = Some(e.to_string());
                None
            }
        };

        if let Err(e) = validate_password(form.password) {
            errors.password = Some(e.to_string());
        }
        if form.password != form.confirm_password {
            errors.confirm_password = Some(AuthError::PasswordMismatch.to_string());
        }

        let (Some(username), Some(email)) = (username, email) else {
            return Err(AuthError::Registration(errors));
        };
        if !errors.is_empty() {
            return Err(AuthError::Registration(errors));
        }

        let password_hash = hash_password(form.password)?;

        let user = self
            .users
            .create(&username, &email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(field) if field == "email" => AuthError::EmailTaken,
                RepositoryError::Conflict(_) => AuthError::UsernameTaken,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Login with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username is unknown or
    /// the password is wrong.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = Username::parse(username).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }

    /// Change a user's username.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` if the new name is invalid.
    /// Returns `AuthError::UsernameTaken` if another account owns it.
    #[instrument(skip(self))]
    pub async fn rename(&self, user_id: UserId, new_username: &str) -> Result<User, AuthError> {
        let username = Username::parse(new_username)?;

        if let Some(owner) = self.users.get_by_username(&username).await?
            && owner.id != user_id
        {
            return Err(AuthError::UsernameTaken);
        }

        self.users
            .update_username(user_id, &username)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UsernameTaken,
                other => AuthError::Repository(other),
            })
    }

    /// Store or replace a user's profile picture.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidPicture` if the upload is not an accepted
    /// image.
    #[instrument(skip(self, data), fields(size = data.len()))]
    pub async fn set_profile_picture(
        &self,
        user_id: UserId,
        filename: &str,
        data: &[u8],
    ) -> Result<(), AuthError> {
        let content_type = validate_picture(filename, data)?;
        self.users
            .put_profile_picture(user_id, content_type, data)
            .await?;
        Ok(())
    }
}

/// Check an upload and return its content type.
///
/// Accepts PNG and JPEG up to [`MAX_PICTURE_BYTES`]. Both the filename
/// extension and the leading bytes must say so.
///
/// # Errors
///
/// Returns `AuthError::InvalidPicture` with a message for the form.
pub fn validate_picture(filename: &str, data: &[u8]) -> Result<&'static str, AuthError> {
    if filename.is_empty() || data.is_empty() {
        return Err(AuthError::InvalidPicture("No file selected".to_owned()));
    }
    if data.len() > MAX_PICTURE_BYTES {
        return Err(AuthError::InvalidPicture(
            "Image must be 2 MiB or smaller".to_owned(),
        ));
    }

    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if !matches!(extension.as_str(), "png" | "jpg" | "jpeg") {
        return Err(AuthError::InvalidPicture(
            "Only PNG and JPEG images are allowed".to_owned(),
        ));
    }

    if data.starts_with(PNG_MAGIC) {
        Ok("image/png")
    } else if data.starts_with(JPEG_MAGIC) {
        Ok("image/jpeg")
    } else {
        Err(AuthError::InvalidPicture(
            "File is not a PNG or JPEG image".to_owned(),
        ))
    }
}

fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
