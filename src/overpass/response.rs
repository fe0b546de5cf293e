//! Serde structures for the Overpass JSON payload.

use serde::Deserialize;
use std::collections::HashMap;

/// Top-level Overpass response.
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

/// One result element: a node carries inline coordinates, a way or
/// relation carries a precomputed `center`.
#[derive(Debug, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    pub element_type: String,
    pub id: u64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<OverpassCenter>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// Centroid attached to way/relation elements by `out center;`.
#[derive(Debug, Deserialize)]
pub struct OverpassCenter {
    pub lat: f64,
    pub lon: f64,
}

impl OverpassElement {
    /// Extract a coordinate: inline point geometry first, centroid as the
    /// fallback.
    pub fn coordinate(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => self.center.as_ref().map(|c| (c.lat, c.lon)),
        }
    }
}
