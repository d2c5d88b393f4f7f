//! User (account holder) domain types.

use chrono::{DateTime, Utc};

use billfold_core::{Email, UserId};

/// An account holder (domain type).
///
/// Owns businesses, products, clients, and invoices. All list endpoints are
/// scoped to the authenticated account.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login email address.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}
