//! Database operations for the Billfold `PostgreSQL` database.
//!
//! # Tables
//!
//! - `app_user` - Account holders (login identities)
//! - `business` - Merchants, optionally geocoded (PostGIS queries)
//! - `product` - Catalog items with stock counters
//! - `client` - Customers, deduped per account by phone
//! - `invoice` / `invoice_item` - Billing documents
//! - `payment` - Amounts applied to invoices
//! - `stock_log` - Stock movement history
//! - `tower_sessions.session` - tower-sessions storage
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p billfold-cli -- migrate
//! ```
//!
//! # Query style
//!
//! List endpoints build their SQL through a per-endpoint query value object
//! (`NearbyQuery`, `ClientListQuery`, ...) whose predicate method feeds both
//! the paginated fetch and the `COUNT(*)`, so the two can never disagree on
//! the filter.

pub mod businesses;
pub mod clients;
pub mod invoices;
pub mod products;
mod spatial;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use businesses::{BusinessRepository, NearbyQuery};
pub use clients::{ClientListQuery, ClientRepository, ClientSortKey};
pub use invoices::{InvoiceListQuery, InvoiceRepository, InvoiceSortKey};
pub use products::{NearbyProductsQuery, ProductListQuery, ProductRepository, ProductSortKey};
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parse the `sort_order` query parameter; anything but "asc" sorts
    /// descending, matching the dashboard's default-new-first lists.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some(s) if s.eq_ignore_ascii_case("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    /// SQL keyword for this direction.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Turn a free-text search term into an `ILIKE` pattern.
///
/// Empty or whitespace-only terms become `None` so the predicate is skipped
/// entirely instead of matching everything through `%%`. `%`, `_`, and the
/// backslash escape character are escaped so the search stays a literal
/// substring match ("100%" must not match every row).
#[must_use]
pub(crate) fn like_pattern(search: Option<&str>) -> Option<String> {
    let term = search?.trim();
    if term.is_empty() {
        return None;
    }
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Some(format!("%{escaped}%"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_parsing() {
        assert_eq!(SortOrder::from_param(Some("asc")), SortOrder::Asc);
        assert_eq!(SortOrder::from_param(Some("ASC")), SortOrder::Asc);
        assert_eq!(SortOrder::from_param(Some("desc")), SortOrder::Desc);
        assert_eq!(SortOrder::from_param(Some("sideways")), SortOrder::Desc);
        assert_eq!(SortOrder::from_param(None), SortOrder::Desc);
    }

    #[test]
    fn test_like_pattern() {
        assert_eq!(like_pattern(Some("tea")), Some("%tea%".to_string()));
        assert_eq!(like_pattern(Some("  ")), None);
        assert_eq!(like_pattern(None), None);
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern(Some("100%")), Some("%100\\%%".to_string()));
        assert_eq!(like_pattern(Some("a_b")), Some("%a\\_b%".to_string()));
        assert_eq!(like_pattern(Some(r"c:\tmp")), Some(r"%c:\\tmp%".to_string()));
    }
}
