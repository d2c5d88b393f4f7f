//! Business (merchant) domain types.

use serde::Serialize;

use billfold_core::BusinessId;

/// A merchant row returned by the nearby-merchants endpoint.
///
/// `distance_km` is the geodesic distance from the query point, computed by
/// the same PostGIS expression that filtered the merchant into the radius.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyMerchant {
    /// Business ID.
    pub id: BusinessId,
    /// Display name.
    pub name: String,
    /// Logo reference, if one was uploaded.
    pub image: Option<String>,
    /// Distance from the query point in kilometers.
    pub distance_km: f64,
}
