//! Password authentication against `app_user`.
//!
//! Login verifies an argon2id hash; identity then lives in the tower-session
//! as a [`crate::models::CurrentUser`]. Everything beyond email + password
//! (OAuth, passkeys) is out of scope for this service.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;
use thiserror::Error;

use billfold_core::Email;

use crate::db::{RepositoryError, users::UserRepository};
use crate::models::User;

/// Errors that can occur during authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email unknown or password mismatch; deliberately indistinct.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Database operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing failed.
    #[error("password hash error: {0}")]
    Hash(String),
}

/// Verify an email/password pair and return the account on success.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` on unknown email or wrong
/// password, `AuthError::Repository` on storage failure.
pub async fn login(pool: &PgPool, email: &Email, password: &str) -> Result<User, AuthError> {
    let repo = UserRepository::new(pool);
    let Some((user, password_hash)) = repo.get_by_email_with_password(email).await? else {
        return Err(AuthError::InvalidCredentials);
    };

    let parsed = PasswordHash::new(&password_hash).map_err(|e| AuthError::Hash(e.to_string()))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)?;

    Ok(user)
}

/// Hash a password with argon2id and a fresh random salt.
///
/// # Errors
///
/// Returns `AuthError::Hash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("correct horse battery staple").unwrap();
        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"correct horse battery staple", &parsed)
                .is_ok()
        );
        assert!(
            Argon2::default()
                .verify_password(b"wrong password", &parsed)
                .is_err()
        );
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }
}
