//! Database operations for the invoice list.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use billfold_core::{
    BusinessId, ClientId, InvoiceId, InvoiceStatus, PageParams, UserId,
};

use super::{RepositoryError, SortOrder, like_pattern};
use crate::models::InvoiceSummary;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for invoice list queries.
#[derive(Debug, sqlx::FromRow)]
struct InvoiceSummaryRow {
    id: i32,
    client_id: i32,
    client_name: String,
    business_id: i32,
    business_name: String,
    total: Decimal,
    paid: Decimal,
    status: String,
    created_at: DateTime<Utc>,
}

impl From<InvoiceSummaryRow> for InvoiceSummary {
    fn from(row: InvoiceSummaryRow) -> Self {
        Self {
            id: InvoiceId::new(row.id),
            client_id: ClientId::new(row.client_id),
            client_name: row.client_name,
            business_id: BusinessId::new(row.business_id),
            business_name: row.business_name,
            total: row.total,
            paid: row.paid,
            status: InvoiceStatus::from_db(&row.status),
            created_at: row.created_at,
        }
    }
}

// =============================================================================
// Query Specification
// =============================================================================

/// Sortable columns for the invoice list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvoiceSortKey {
    #[default]
    CreatedAt,
    Total,
    Status,
}

impl InvoiceSortKey {
    /// Parse the `sort_by` query parameter; unknown keys fall back to
    /// creation time so callers cannot inject arbitrary column names.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("total") => Self::Total,
            Some("status") => Self::Status,
            _ => Self::CreatedAt,
        }
    }

    const fn as_sql(self) -> &'static str {
        match self {
            Self::CreatedAt => "i.created_at",
            Self::Total => "i.total",
            Self::Status => "i.status",
        }
    }
}

/// Specification of one account-scoped invoice list.
#[derive(Debug, Clone)]
pub struct InvoiceListQuery {
    /// Owning account; every predicate starts from this.
    pub user_id: UserId,
    /// Optional substring filter on the billed client's name.
    pub search: Option<String>,
    /// Keep only invoices issued by this business.
    pub business_id: Option<BusinessId>,
    pub sort_by: InvoiceSortKey,
    pub sort_order: SortOrder,
}

impl InvoiceListQuery {
    fn push_predicate(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push("i.user_id = ").push_bind(self.user_id.as_i32());
        if let Some(pattern) = like_pattern(self.search.as_deref()) {
            qb.push(" AND c.name ILIKE ").push_bind(pattern);
        }
        if let Some(business_id) = self.business_id {
            qb.push(" AND i.business_id = ").push_bind(business_id.as_i32());
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

const INVOICE_FROM: &str = "FROM invoice i \
     INNER JOIN client c ON c.id = i.client_id \
     INNER JOIN business b ON b.id = i.business_id WHERE ";

/// Repository for invoice database operations.
pub struct InvoiceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InvoiceRepository<'a> {
    /// Create a new invoice repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch one page of the account's invoices, annotated with client and
    /// business names and the paid-to-date sum.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        query: &InvoiceListQuery,
        page: PageParams,
    ) -> Result<Vec<InvoiceSummary>, RepositoryError> {
        let mut qb = QueryBuilder::new(
            "SELECT i.id, i.client_id, c.name AS client_name, \
             i.business_id, b.name AS business_name, i.total, i.status, i.created_at, \
             (SELECT COALESCE(SUM(p.amount), 0) FROM payment p WHERE p.invoice_id = i.id) AS paid ",
        );
        qb.push(INVOICE_FROM);
        query.push_predicate(&mut qb);
        qb.push(" ORDER BY ")
            .push(query.sort_by.as_sql())
            .push(" ")
            .push(query.sort_order.as_sql())
            .push(" LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows: Vec<InvoiceSummaryRow> = qb.build_query_as().fetch_all(self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Count all invoices matching the same predicate as [`Self::list`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self, query: &InvoiceListQuery) -> Result<i64, RepositoryError> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) ");
        qb.push(INVOICE_FROM);
        query.push_predicate(&mut qb);

        let total: i64 = qb.build_query_scalar().fetch_one(self.pool).await?;
        Ok(total)
    }
}
