//! Settlement candidate types produced by response parsing.

use serde::{Deserialize, Serialize};

use crate::geo_math;

/// Geographic point (lat/lon).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Build a point from raw input, wrapping longitude into (-180, 180]
    /// and clamping latitude to [-90, 90]. Non-finite input survives
    /// construction and is rejected at query-build time.
    pub fn normalized(lon: f64, lat: f64) -> Self {
        Self {
            lat: geo_math::normalize_latitude(lat),
            lon: geo_math::normalize_longitude(lon),
        }
    }

    /// Whether both components are finite and in range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// OSM place classification of a settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceKind {
    City,
    Town,
    Village,
    Unknown,
}

impl PlaceKind {
    /// Map an OSM `place` tag value; anything unrecognized or absent is
    /// `Unknown`.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("city") => PlaceKind::City,
            Some("town") => PlaceKind::Town,
            Some("village") => PlaceKind::Village,
            _ => PlaceKind::Unknown,
        }
    }
}

impl std::fmt::Display for PlaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaceKind::City => write!(f, "city"),
            PlaceKind::Town => write!(f, "town"),
            PlaceKind::Village => write!(f, "village"),
            PlaceKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// A named settlement parsed from one query response.
///
/// Produced fresh per query and never persisted. The same logical
/// settlement may appear more than once in a candidate list when the
/// server returned it under several geometry representations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settlement {
    pub name: String,
    pub kind: PlaceKind,
    pub location: GeoPoint,
    /// Distance from the source point, in kilometers.
    pub distance_km: f64,
    /// Resident count if the server reported a parsable one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
}
