//! Overpass QL construction for bounded-radius settlement searches.

use crate::error::ResolveError;
use crate::models::GeoPoint;

/// Search radius around each input point, in meters.
pub const SEARCH_RADIUS_M: u32 = 100_000;

/// Server-side query timeout declared in the QL header, in seconds.
pub const SERVER_TIMEOUT_S: u32 = 30;

/// Build the Overpass QL query for named settlements around a point.
///
/// The place filter is applied to node, way and relation features in one
/// union, so the same settlement may come back several times under
/// different geometry types. `out center;` makes ways and relations carry
/// a precomputed centroid.
///
/// Fails with `InvalidCoordinate` when the point did not survive
/// normalization (the raw value was non-finite), before any query text is
/// produced.
pub fn build_query(point: &GeoPoint) -> Result<String, ResolveError> {
    if !point.is_valid() {
        return Err(ResolveError::InvalidCoordinate);
    }

    Ok(format!(
        "[out:json][timeout:{timeout}];\
         (\
         node[\"place\"~\"^(city|town|village)$\"](around:{radius},{lat},{lon});\
         way[\"place\"~\"^(city|town|village)$\"](around:{radius},{lat},{lon});\
         relation[\"place\"~\"^(city|town|village)$\"](around:{radius},{lat},{lon});\
         );\
         out center;",
        timeout = SERVER_TIMEOUT_S,
        radius = SEARCH_RADIUS_M,
        lat = point.lat,
        lon = point.lon,
    ))
}
