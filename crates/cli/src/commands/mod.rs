//! CLI command implementations.

pub mod migrate;
pub mod user;

use thiserror::Error;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Account already exists.
    #[error("Account already exists with email: {0}")]
    UserExists(String),

    /// Repository error from the server crate.
    #[error("Repository error: {0}")]
    Repository(String),

    /// Password hashing failed.
    #[error("Password hash error: {0}")]
    Hash(String),
}

/// Resolve the database URL from the environment.
///
/// Prefers `BILLFOLD_DATABASE_URL` and falls back to the generic
/// `DATABASE_URL`.
pub fn database_url() -> Result<String, CommandError> {
    dotenvy::dotenv().ok();
    std::env::var("BILLFOLD_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CommandError::MissingEnvVar("BILLFOLD_DATABASE_URL"))
}
