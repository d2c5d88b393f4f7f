//! Nearby-search route handlers.
//!
//! Both endpoints are public: discovery runs before the caller has an
//! account. Coordinates equal to 0 are treated as "not supplied" because
//! ungeolocated callers submit zeroes; a genuine equator/prime-meridian
//! point is rejected with them (known limitation).

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use billfold_core::{Coordinate, PageParams, Pagination};

use crate::db::{BusinessRepository, NearbyProductsQuery, NearbyQuery, ProductRepository};
use crate::error::{AppError, Result};
use crate::models::{NearbyMerchant, NearbyProduct};
use crate::state::AppState;

/// Default search radius in kilometers.
const DEFAULT_RADIUS_KM: f64 = 5.0;

/// Query parameters shared by both nearby endpoints.
#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius: Option<f64>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    /// Exact category filter; products variant only.
    pub category: Option<String>,
}

impl NearbyParams {
    /// Validate the geo and pagination parameters.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when lat/lng are missing or zero, out
    /// of range, or when radius/page/limit are non-positive.
    fn validate(&self) -> Result<(Coordinate, f64, PageParams)> {
        let (Some(lat), Some(lng)) = (self.lat, self.lng) else {
            return Err(AppError::Validation(
                "Latitude and longitude are required".to_string(),
            ));
        };
        let origin = Coordinate::new(lng, lat);
        if origin.is_unset() {
            return Err(AppError::Validation(
                "Latitude and longitude are required".to_string(),
            ));
        }
        if !origin.in_bounds() {
            return Err(AppError::Validation(
                "Latitude and longitude are out of range".to_string(),
            ));
        }

        let radius_km = self.radius.unwrap_or(DEFAULT_RADIUS_KM);
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(AppError::Validation("Radius must be positive".to_string()));
        }

        let page = PageParams::new(self.page.unwrap_or(1), self.limit.unwrap_or(10))
            .ok_or_else(|| AppError::Validation("Page and limit must be positive".to_string()))?;

        Ok((origin, radius_km, page))
    }
}

/// Response body for the nearby-merchants endpoint.
#[derive(Debug, Serialize)]
pub struct NearbyMerchantsResponse {
    pub merchants: Vec<NearbyMerchant>,
    pub pagination: Pagination,
}

/// Response body for the nearby-products endpoint.
#[derive(Debug, Serialize)]
pub struct NearbyProductsResponse {
    pub products: Vec<NearbyProduct>,
    pub pagination: Pagination,
}

/// Merchants within the radius, ordered ascending by geodesic distance.
#[instrument(skip(state))]
pub async fn nearby_merchants(
    State(state): State<AppState>,
    Query(params): Query<NearbyParams>,
) -> Result<Json<NearbyMerchantsResponse>> {
    let (origin, radius_km, page) = params.validate()?;
    let query = NearbyQuery {
        origin,
        radius_km,
        search: params.search.clone(),
    };

    let repo = BusinessRepository::new(state.pool());
    let (merchants, total) =
        tokio::try_join!(repo.nearby_page(&query, page), repo.nearby_count(&query))?;

    Ok(Json(NearbyMerchantsResponse {
        merchants,
        pagination: page.summarize(total),
    }))
}

/// Products sold by merchants within the radius, newest first.
#[instrument(skip(state))]
pub async fn nearby_products(
    State(state): State<AppState>,
    Query(params): Query<NearbyParams>,
) -> Result<Json<NearbyProductsResponse>> {
    let (origin, radius_km, page) = params.validate()?;
    let query = NearbyProductsQuery {
        origin,
        radius_km,
        search: params.search.clone(),
        category: params.category.clone(),
    };

    let repo = ProductRepository::new(state.pool());
    let (products, total) =
        tokio::try_join!(repo.nearby_page(&query, page), repo.nearby_count(&query))?;

    Ok(Json(NearbyProductsResponse {
        products,
        pagination: page.summarize(total),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(lat: Option<f64>, lng: Option<f64>) -> NearbyParams {
        NearbyParams {
            lat,
            lng,
            radius: None,
            page: None,
            limit: None,
            search: None,
            category: None,
        }
    }

    #[test]
    fn test_missing_coordinates_rejected() {
        assert!(params(None, Some(77.2)).validate().is_err());
        assert!(params(Some(12.9), None).validate().is_err());
        assert!(params(None, None).validate().is_err());
    }

    #[test]
    fn test_zero_coordinates_rejected_as_missing() {
        assert!(params(Some(0.0), Some(77.2)).validate().is_err());
        assert!(params(Some(12.9), Some(0.0)).validate().is_err());
    }

    #[test]
    fn test_defaults_applied() {
        let (origin, radius_km, page) = params(Some(12.9), Some(77.2))
            .validate()
            .expect("valid params");
        assert!((origin.latitude - 12.9).abs() < f64::EPSILON);
        assert!((origin.longitude - 77.2).abs() < f64::EPSILON);
        assert!((radius_km - DEFAULT_RADIUS_KM).abs() < f64::EPSILON);
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 10);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        let mut p = params(Some(12.9), Some(77.2));
        p.radius = Some(0.0);
        assert!(p.validate().is_err());
        p.radius = Some(-3.0);
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_non_positive_pagination_rejected() {
        let mut p = params(Some(12.9), Some(77.2));
        p.page = Some(0);
        assert!(p.validate().is_err());

        let mut p = params(Some(12.9), Some(77.2));
        p.limit = Some(-1);
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        assert!(params(Some(91.0), Some(77.2)).validate().is_err());
        assert!(params(Some(12.9), Some(-181.0)).validate().is_err());
    }
}
