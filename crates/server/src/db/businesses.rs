//! Database operations for businesses (merchants).

use sqlx::{PgPool, Postgres, QueryBuilder};

use billfold_core::{BusinessId, Coordinate, METERS_PER_KM, PageParams};

use super::{RepositoryError, like_pattern, spatial};
use crate::models::NearbyMerchant;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for nearby-merchant queries.
#[derive(Debug, sqlx::FromRow)]
struct NearbyBusinessRow {
    id: i32,
    name: String,
    logo_url: Option<String>,
    distance_m: f64,
}

impl From<NearbyBusinessRow> for NearbyMerchant {
    fn from(row: NearbyBusinessRow) -> Self {
        Self {
            id: BusinessId::new(row.id),
            name: row.name,
            image: row.logo_url,
            distance_km: row.distance_m / METERS_PER_KM,
        }
    }
}

// =============================================================================
// Query Specification
// =============================================================================

/// Specification of one nearby-merchant search.
///
/// A single value drives both the paginated fetch and the total count, so
/// the pagination summary is always computed against the same predicate as
/// the returned page.
#[derive(Debug, Clone)]
pub struct NearbyQuery {
    /// Query point.
    pub origin: Coordinate,
    /// Search radius in kilometers.
    pub radius_km: f64,
    /// Optional case-insensitive substring filter on the business name.
    pub search: Option<String>,
}

impl NearbyQuery {
    /// Push the full WHERE predicate (radius + optional name filter).
    fn push_predicate(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        spatial::push_within_radius(qb, self.origin, self.radius_km);
        if let Some(pattern) = like_pattern(self.search.as_deref()) {
            qb.push(" AND b.name ILIKE ").push_bind(pattern);
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for business database operations.
pub struct BusinessRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BusinessRepository<'a> {
    /// Create a new business repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch one page of merchants within the radius, ordered ascending by
    /// geodesic distance.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn nearby_page(
        &self,
        query: &NearbyQuery,
        page: PageParams,
    ) -> Result<Vec<NearbyMerchant>, RepositoryError> {
        let mut qb = QueryBuilder::new("SELECT b.id, b.name, b.logo_url, ");
        spatial::push_distance_meters(&mut qb, query.origin);
        qb.push(" AS distance_m FROM business b WHERE ");
        query.push_predicate(&mut qb);
        qb.push(" ORDER BY distance_m ASC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows: Vec<NearbyBusinessRow> = qb.build_query_as().fetch_all(self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Count all merchants matching the same predicate as [`Self::nearby_page`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn nearby_count(&self, query: &NearbyQuery) -> Result<i64, RepositoryError> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM business b WHERE ");
        query.push_predicate(&mut qb);

        let total: i64 = qb.build_query_scalar().fetch_one(self.pool).await?;
        Ok(total)
    }
}
