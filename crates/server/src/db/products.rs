//! Database operations for products.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use billfold_core::{BusinessId, Coordinate, METERS_PER_KM, PageParams, ProductId, UserId};

use super::{RepositoryError, SortOrder, like_pattern, spatial};
use crate::models::{CreateProductInput, NearbyProduct, Product};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    user_id: i32,
    business_id: i32,
    name: String,
    category: String,
    description: String,
    price: Decimal,
    images: Vec<String>,
    stock: i32,
    min_stock: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            user_id: UserId::new(row.user_id),
            business_id: BusinessId::new(row.business_id),
            name: row.name,
            category: row.category,
            description: row.description,
            price: row.price,
            images: row.images,
            stock: row.stock,
            min_stock: row.min_stock,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Internal row type for nearby-product queries.
#[derive(Debug, sqlx::FromRow)]
struct NearbyProductRow {
    id: i32,
    name: String,
    price: Decimal,
    category: String,
    description: String,
    images: Vec<String>,
    business_name: String,
    distance_m: f64,
}

impl From<NearbyProductRow> for NearbyProduct {
    fn from(row: NearbyProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            price: row.price,
            merchant_name: row.business_name,
            distance_km: row.distance_m / METERS_PER_KM,
            images: row.images,
            category: row.category,
            description: row.description,
        }
    }
}

// =============================================================================
// Query Specifications
// =============================================================================

/// Specification of one nearby-product search.
///
/// Products join onto the set of businesses within the radius; a product
/// whose business is outside the radius (or not geocoded) is excluded
/// entirely, so every returned row has a resolvable distance.
#[derive(Debug, Clone)]
pub struct NearbyProductsQuery {
    /// Query point.
    pub origin: Coordinate,
    /// Search radius in kilometers.
    pub radius_km: f64,
    /// Optional case-insensitive substring filter on the product name.
    pub search: Option<String>,
    /// Optional exact category filter.
    pub category: Option<String>,
}

impl NearbyProductsQuery {
    /// Push the shared query body: the nearby-business CTE, the join, and
    /// the product filters. `select` is a fixed projection list, never
    /// caller input.
    fn push_body(&self, qb: &mut QueryBuilder<'_, Postgres>, select: &str) {
        qb.push("WITH nearby_business AS (SELECT b.id, b.name, ");
        spatial::push_distance_meters(qb, self.origin);
        qb.push(" AS distance_m FROM business b WHERE ");
        spatial::push_within_radius(qb, self.origin, self.radius_km);
        qb.push(") SELECT ");
        qb.push(select);
        qb.push(" FROM product p INNER JOIN nearby_business nb ON p.business_id = nb.id");

        let mut conjunction = " WHERE ";
        if let Some(pattern) = like_pattern(self.search.as_deref()) {
            qb.push(conjunction).push("p.name ILIKE ").push_bind(pattern);
            conjunction = " AND ";
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.trim().is_empty()) {
            qb.push(conjunction)
                .push("p.category = ")
                .push_bind(category.to_owned());
        }
    }
}

/// Sortable columns for the product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSortKey {
    #[default]
    CreatedAt,
    Name,
    Price,
    Stock,
}

impl ProductSortKey {
    /// Parse the `sort_by` query parameter; unknown keys fall back to
    /// creation time so callers cannot inject arbitrary column names.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("name") => Self::Name,
            Some("price") => Self::Price,
            Some("stock") => Self::Stock,
            _ => Self::CreatedAt,
        }
    }

    const fn as_sql(self) -> &'static str {
        match self {
            Self::CreatedAt => "p.created_at",
            Self::Name => "p.name",
            Self::Price => "p.price",
            Self::Stock => "p.stock",
        }
    }
}

/// Specification of one account-scoped product list.
#[derive(Debug, Clone)]
pub struct ProductListQuery {
    /// Owning account; every predicate starts from this.
    pub user_id: UserId,
    /// Optional substring filter over name and description.
    pub search: Option<String>,
    /// Keep only products that appear on this business's invoices.
    pub business_id: Option<BusinessId>,
    pub sort_by: ProductSortKey,
    pub sort_order: SortOrder,
}

impl ProductListQuery {
    fn push_predicate(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push("p.user_id = ").push_bind(self.user_id.as_i32());
        if let Some(pattern) = like_pattern(self.search.as_deref()) {
            qb.push(" AND (p.name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR p.description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(business_id) = self.business_id {
            qb.push(" AND EXISTS (SELECT 1 FROM invoice_item ii INNER JOIN invoice i ON i.id = ii.invoice_id WHERE ii.product_id = p.id AND i.business_id = ")
                .push_bind(business_id.as_i32())
                .push(")");
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

const PRODUCT_COLUMNS: &str = "p.id, p.user_id, p.business_id, p.name, p.category, \
     p.description, p.price, p.images, p.stock, p.min_stock, p.created_at, p.updated_at";

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Nearby search
    // =========================================================================

    /// Fetch one page of products sold by nearby merchants, newest first,
    /// each annotated with its merchant's name and distance.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn nearby_page(
        &self,
        query: &NearbyProductsQuery,
        page: PageParams,
    ) -> Result<Vec<NearbyProduct>, RepositoryError> {
        let mut qb = QueryBuilder::new("");
        query.push_body(
            &mut qb,
            "p.id, p.name, p.price, p.category, p.description, p.images, \
             nb.name AS business_name, nb.distance_m",
        );
        qb.push(" ORDER BY p.created_at DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows: Vec<NearbyProductRow> = qb.build_query_as().fetch_all(self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Count all products matching the same predicate as [`Self::nearby_page`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn nearby_count(&self, query: &NearbyProductsQuery) -> Result<i64, RepositoryError> {
        let mut qb = QueryBuilder::new("");
        query.push_body(&mut qb, "COUNT(*)");

        let total: i64 = qb.build_query_scalar().fetch_one(self.pool).await?;
        Ok(total)
    }

    // =========================================================================
    // Account-scoped catalog
    // =========================================================================

    /// Fetch one page of the account's products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        query: &ProductListQuery,
        page: PageParams,
    ) -> Result<Vec<Product>, RepositoryError> {
        let mut qb = QueryBuilder::new("SELECT ");
        qb.push(PRODUCT_COLUMNS);
        qb.push(" FROM product p WHERE ");
        query.push_predicate(&mut qb);
        qb.push(" ORDER BY ")
            .push(query.sort_by.as_sql())
            .push(" ")
            .push(query.sort_order.as_sql())
            .push(" LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows: Vec<ProductRow> = qb.build_query_as().fetch_all(self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Count all products matching the same predicate as [`Self::list`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self, query: &ProductListQuery) -> Result<i64, RepositoryError> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM product p WHERE ");
        query.push_predicate(&mut qb);

        let total: i64 = qb.build_query_scalar().fetch_one(self.pool).await?;
        Ok(total)
    }

    /// Create a product, writing an `INITIAL` stock log entry when the
    /// starting stock is positive.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; the
    /// product and its stock log commit atomically.
    pub async fn create(
        &self,
        user_id: UserId,
        input: &CreateProductInput,
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row: ProductRow = sqlx::query_as(
            r"
            INSERT INTO product (
                user_id, business_id, name, category, description,
                price, images, stock, min_stock
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, user_id, business_id, name, category, description,
                      price, images, stock, min_stock, created_at, updated_at
            ",
        )
        .bind(user_id.as_i32())
        .bind(input.business_id.as_i32())
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.description)
        .bind(input.price)
        .bind(&input.images)
        .bind(input.stock)
        .bind(input.min_stock)
        .fetch_one(&mut *tx)
        .await?;

        if input.stock > 0 {
            sqlx::query(
                r"
                INSERT INTO stock_log (product_id, user_id, quantity, type, note)
                VALUES ($1, $2, $3, 'INITIAL', 'Initial stock entry')
                ",
            )
            .bind(row.id)
            .bind(user_id.as_i32())
            .bind(input.stock)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(row.into())
    }
}
