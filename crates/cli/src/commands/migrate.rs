//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! reelbox-cli migrate
//! reelbox-cli migrate --status
//! ```
//!
//! # Environment Variables
//!
//! - `MOVIES_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Movie site migrations live in `crates/movies/migrations/`. The session
//! table (`tower_sessions.session`) is created by `tower-sessions-sqlx-store`.
//!
//! The Pokédex has no database.

use reelbox_movies::config::database_url_from_env;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use thiserror::Error;
use tower_sessions_sqlx_store::PostgresStore;

static MIGRATOR: Migrator = sqlx::migrate!("../movies/migrations");

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Database URL is not configured.
    #[error("Configuration error: {0}")]
    Config(#[from] reelbox_web::config::ConfigError),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration failed to apply.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

async fn connect() -> Result<PgPool, MigrationError> {
    let database_url = database_url_from_env()?;

    tracing::info!("Connecting to movies database...");
    Ok(PgPool::connect(database_url.expose_secret()).await?)
}

/// Apply pending schema migrations and create the session table.
///
/// # Errors
///
/// Returns `MigrationError` if the database is unreachable or a migration
/// fails.
pub async fn run() -> Result<(), MigrationError> {
    let pool = connect().await?;

    tracing::info!("Running movies migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Creating session table...");
    PostgresStore::new(pool.clone()).migrate().await?;

    tracing::info!("Movies migrations complete!");
    Ok(())
}

/// Log every known migration and whether it has been applied.
///
/// # Errors
///
/// Returns `MigrationError` if the database is unreachable.
pub async fn status() -> Result<(), MigrationError> {
    let pool = connect().await?;

    let applied: Vec<i64> = sqlx::query_scalar("SELECT version FROM _sqlx_migrations")
        .fetch_all(&pool)
        .await
        .or_else(|e| match e {
            // Table doesn't exist until the first run
            sqlx::Error::Database(db) if db.code().as_deref() == Some("42P01") => Ok(Vec::new()),
            other => Err(other),
        })?;

    for migration in MIGRATOR.iter() {
        let state = if applied.contains(&migration.version) {
            "applied"
        } else {
            "pending"
        };
        tracing::info!(
            version = migration.version,
            description = %migration.description,
            "{state}"
        );
    }

    Ok(())
}
