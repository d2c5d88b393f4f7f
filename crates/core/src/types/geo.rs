//! Geographic coordinate type used by the nearby-search endpoints.

use serde::{Deserialize, Serialize};

/// Conversion factor between the radius supplied by callers (kilometers)
/// and the distance predicate evaluated by PostGIS (meters).
pub const METERS_PER_KM: f64 = 1000.0;

/// A WGS84 point as stored on a business record.
///
/// Longitude comes first to match the `ST_MakePoint(lon, lat)` argument
/// order used throughout the spatial queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Longitude in degrees, -180 to 180.
    pub longitude: f64,
    /// Latitude in degrees, -90 to 90.
    pub latitude: f64,
}

impl Coordinate {
    /// Create a coordinate from longitude and latitude.
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Whether either component carries the `0` "unset" sentinel.
    ///
    /// Callers that never geocoded a location submit zeroes, so a zero on
    /// either axis is treated as "not supplied". A true equatorial or
    /// prime-meridian point is therefore rejected as well; this is a known,
    /// documented limitation rather than an accident.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.longitude == 0.0 || self.latitude == 0.0
    }

    /// Whether both components are within their valid WGS84 ranges.
    #[must_use]
    pub fn in_bounds(&self) -> bool {
        (-180.0..=180.0).contains(&self.longitude) && (-90.0..=90.0).contains(&self.latitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_axis_is_unset() {
        assert!(Coordinate::new(0.0, 12.5).is_unset());
        assert!(Coordinate::new(77.2, 0.0).is_unset());
        assert!(Coordinate::new(0.0, 0.0).is_unset());
        assert!(!Coordinate::new(77.2, 12.5).is_unset());
    }

    #[test]
    fn test_bounds() {
        assert!(Coordinate::new(77.2, 12.5).in_bounds());
        assert!(!Coordinate::new(181.0, 12.5).in_bounds());
        assert!(!Coordinate::new(77.2, -90.5).in_bounds());
    }
}
