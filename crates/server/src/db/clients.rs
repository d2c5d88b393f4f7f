//! Database operations for clients and the reads feeding dues aggregation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use billfold_core::{BusinessId, ClientId, InvoiceId, PageParams, Phone, UserId};

use super::{RepositoryError, SortOrder, like_pattern};
use crate::models::{Client, UpsertClientInput};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for client queries.
#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: i32,
    user_id: i32,
    name: String,
    phone: String,
    email: Option<String>,
    address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Self {
            id: ClientId::new(row.id),
            user_id: UserId::new(row.user_id),
            name: row.name,
            phone: row.phone,
            email: row.email,
            address: row.address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// An invoice row eager-loaded for dues aggregation.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InvoiceForDues {
    pub id: i32,
    pub client_id: i32,
    pub business_id: i32,
    pub business_name: String,
    pub total: Decimal,
}

/// A payment row eager-loaded for dues aggregation.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PaymentForDues {
    pub invoice_id: i32,
    pub amount: Decimal,
}

// =============================================================================
// Query Specification
// =============================================================================

/// Sortable columns for the client list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientSortKey {
    #[default]
    CreatedAt,
    Name,
    Phone,
    Email,
}

impl ClientSortKey {
    /// Parse the `sort_by` query parameter; unknown keys fall back to
    /// creation time so callers cannot inject arbitrary column names.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("name") => Self::Name,
            Some("phone") => Self::Phone,
            Some("email") => Self::Email,
            _ => Self::CreatedAt,
        }
    }

    const fn as_sql(self) -> &'static str {
        match self {
            Self::CreatedAt => "c.created_at",
            Self::Name => "c.name",
            Self::Phone => "c.phone",
            Self::Email => "c.email",
        }
    }
}

/// Specification of one account-scoped client list.
///
/// One value drives both the paginated fetch and the count.
#[derive(Debug, Clone)]
pub struct ClientListQuery {
    /// Owning account; every predicate starts from this.
    pub user_id: UserId,
    /// Optional substring filter over name, phone, and email.
    pub search: Option<String>,
    /// Keep only clients with at least one invoice from this business.
    pub business_id: Option<BusinessId>,
    pub sort_by: ClientSortKey,
    pub sort_order: SortOrder,
}

impl ClientListQuery {
    fn push_predicate(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push("c.user_id = ").push_bind(self.user_id.as_i32());
        if let Some(pattern) = like_pattern(self.search.as_deref()) {
            qb.push(" AND (c.name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR c.phone ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR COALESCE(c.email, '') ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(business_id) = self.business_id {
            qb.push(" AND EXISTS (SELECT 1 FROM invoice i WHERE i.client_id = c.id AND i.business_id = ")
                .push_bind(business_id.as_i32())
                .push(")");
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

const CLIENT_COLUMNS: &str =
    "c.id, c.user_id, c.name, c.phone, c.email, c.address, c.created_at, c.updated_at";

/// Repository for client database operations.
pub struct ClientRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ClientRepository<'a> {
    /// Create a new client repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch one page of the account's clients.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        query: &ClientListQuery,
        page: PageParams,
    ) -> Result<Vec<Client>, RepositoryError> {
        let mut qb = QueryBuilder::new("SELECT ");
        qb.push(CLIENT_COLUMNS);
        qb.push(" FROM client c WHERE ");
        query.push_predicate(&mut qb);
        qb.push(" ORDER BY ")
            .push(query.sort_by.as_sql())
            .push(" ")
            .push(query.sort_order.as_sql())
            .push(" LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows: Vec<ClientRow> = qb.build_query_as().fetch_all(self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Count all clients matching the same predicate as [`Self::list`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self, query: &ClientListQuery) -> Result<i64, RepositoryError> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM client c WHERE ");
        query.push_predicate(&mut qb);

        let total: i64 = qb.build_query_scalar().fetch_one(self.pool).await?;
        Ok(total)
    }

    /// Eager-load the invoices (with owning business names) for a set of
    /// clients, for dues aggregation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn invoices_for_clients(
        &self,
        client_ids: &[ClientId],
    ) -> Result<Vec<InvoiceForDues>, RepositoryError> {
        if client_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i32> = client_ids.iter().map(|id| id.as_i32()).collect();

        let rows = sqlx::query_as::<_, InvoiceForDues>(
            r"
            SELECT i.id, i.client_id, i.business_id, b.name AS business_name, i.total
            FROM invoice i
            INNER JOIN business b ON b.id = i.business_id
            WHERE i.client_id = ANY($1)
            ",
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Eager-load the payments applied to a set of invoices.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn payments_for_invoices(
        &self,
        invoice_ids: &[InvoiceId],
    ) -> Result<Vec<PaymentForDues>, RepositoryError> {
        if invoice_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i32> = invoice_ids.iter().map(|id| id.as_i32()).collect();

        let rows = sqlx::query_as::<_, PaymentForDues>(
            r"
            SELECT p.invoice_id, p.amount
            FROM payment p
            WHERE p.invoice_id = ANY($1)
            ",
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Upsert a client by its (account, phone) natural key: insert a new
    /// client, or refresh name/email/address on the existing one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn upsert_by_phone(
        &self,
        user_id: UserId,
        phone: &Phone,
        input: &UpsertClientInput,
    ) -> Result<Client, RepositoryError> {
        let row: ClientRow = sqlx::query_as(
            r"
            INSERT INTO client (user_id, name, phone, email, address)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, phone) DO UPDATE
            SET name = EXCLUDED.name,
                email = EXCLUDED.email,
                address = EXCLUDED.address,
                updated_at = now()
            RETURNING id, user_id, name, phone, email, address, created_at, updated_at
            ",
        )
        .bind(user_id.as_i32())
        .bind(&input.name)
        .bind(phone.as_str())
        .bind(input.email.as_deref())
        .bind(input.address.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }
}
