//! Shared PostGIS expression builders for the nearby queries.
//!
//! Both nearby endpoints must filter and report with the same geodesic
//! distance function, so the `ST_DWithin` predicate and the `ST_Distance`
//! projection are built here and nowhere else. The expressions assume the
//! business table is aliased `b` in the surrounding query.

use sqlx::{Postgres, QueryBuilder};

use billfold_core::{Coordinate, METERS_PER_KM};

/// Push the radius predicate: both coordinates present and the geography
/// distance to the origin within `radius_km * 1000` meters.
pub(crate) fn push_within_radius(
    qb: &mut QueryBuilder<'_, Postgres>,
    origin: Coordinate,
    radius_km: f64,
) {
    qb.push("b.longitude IS NOT NULL AND b.latitude IS NOT NULL AND ST_DWithin(")
        .push("ST_MakePoint(b.longitude, b.latitude)::geography, ST_MakePoint(")
        .push_bind(origin.longitude)
        .push(", ")
        .push_bind(origin.latitude)
        .push(")::geography, ")
        .push_bind(radius_km * METERS_PER_KM)
        .push(")");
}

/// Push the distance projection in meters, from the same point expressions
/// the predicate uses.
pub(crate) fn push_distance_meters(qb: &mut QueryBuilder<'_, Postgres>, origin: Coordinate) {
    qb.push("ST_Distance(ST_MakePoint(b.longitude, b.latitude)::geography, ST_MakePoint(")
        .push_bind(origin.longitude)
        .push(", ")
        .push_bind(origin.latitude)
        .push(")::geography)");
}
