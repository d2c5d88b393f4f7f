//! Account management commands.
//!
//! # Usage
//!
//! ```bash
//! billfold-cli user create -e owner@example.com -n "Shop Owner" -p "s3cr3t"
//! ```

use sqlx::PgPool;

use billfold_core::Email;
use billfold_server::db::{RepositoryError, users::UserRepository};
use billfold_server::services::auth;

use super::{CommandError, database_url};

/// Create a new account with a hashed password.
///
/// # Errors
///
/// Returns `CommandError::InvalidInput` on a bad email or empty name,
/// `CommandError::UserExists` when the email is already registered.
pub async fn create(email: &str, name: &str, password: &str) -> Result<i32, CommandError> {
    let email =
        Email::parse(email).map_err(|e| CommandError::InvalidInput(e.to_string()))?;
    if name.trim().is_empty() {
        return Err(CommandError::InvalidInput("name is required".to_owned()));
    }
    if password.len() < 8 {
        return Err(CommandError::InvalidInput(
            "password must be at least 8 characters".to_owned(),
        ));
    }

    let password_hash =
        auth::hash_password(password).map_err(|e| CommandError::Hash(e.to_string()))?;

    let database_url = database_url()?;
    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Creating account: {}", email.as_str());
    let user = UserRepository::new(&pool)
        .create(&email, name.trim(), &password_hash)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => CommandError::UserExists(email.as_str().to_owned()),
            other => CommandError::Repository(other.to_string()),
        })?;

    tracing::info!("Account created with id {}", user.id);
    Ok(user.id.as_i32())
}
