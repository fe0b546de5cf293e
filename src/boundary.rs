//! National-border polygon: GeoJSON parsing and point containment.

use anyhow::{anyhow, Context, Result};
use geo::{Contains, Coord, LineString, MultiPolygon, Point, Polygon};
use serde_json::Value;
use tracing::info;
use url::Url;

use crate::models::GeoPoint;

/// A ready-made border geometry with a containment test.
///
/// Used to keep candidates domestic when the search radius spills across
/// the border. Containment is strict: a point exactly on the border
/// counts as outside.
#[derive(Debug, Clone)]
pub struct Boundary {
    geometry: MultiPolygon<f64>,
}

impl Boundary {
    pub fn new(geometry: MultiPolygon<f64>) -> Self {
        Self { geometry }
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        self.geometry.contains(&Point::new(point.lon, point.lat))
    }

    /// Parse a GeoJSON document: a bare geometry, a Feature, or a
    /// FeatureCollection. The first Polygon/MultiPolygon found wins.
    pub fn from_geojson(value: &Value) -> Result<Self> {
        let geometry = find_geometry(value)
            .ok_or_else(|| anyhow!("No polygonal geometry in GeoJSON document"))?;

        let polygons = match geometry["type"].as_str() {
            Some("Polygon") => vec![parse_polygon(&geometry["coordinates"])?],
            Some("MultiPolygon") => geometry["coordinates"]
                .as_array()
                .ok_or_else(|| anyhow!("MultiPolygon coordinates are not an array"))?
                .iter()
                .map(parse_polygon)
                .collect::<Result<Vec<_>>>()?,
            other => anyhow::bail!("Unsupported geometry type {:?}", other),
        };

        Ok(Self::new(MultiPolygon::new(polygons)))
    }

    /// One-time fetch of the border polygon. Failure here is fatal to the
    /// whole run; no containment filtering is possible without it.
    pub async fn fetch(client: &reqwest::Client, url: &Url) -> Result<Self> {
        info!("Fetching boundary polygon from {}", url);

        let response = client
            .get(url.clone())
            .send()
            .await
            .context("Boundary request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("Boundary fetch returned HTTP {}", response.status());
        }

        let value: Value = response
            .json()
            .await
            .context("Boundary payload is not valid JSON")?;

        Self::from_geojson(&value)
    }
}

/// Walk a GeoJSON document down to the first polygonal geometry.
fn find_geometry(value: &Value) -> Option<&Value> {
    match value["type"].as_str() {
        Some("Polygon") | Some("MultiPolygon") => Some(value),
        Some("Feature") => find_geometry(&value["geometry"]),
        Some("FeatureCollection") => value["features"].as_array()?.iter().find_map(find_geometry),
        Some("GeometryCollection") => value["geometries"]
            .as_array()?
            .iter()
            .find_map(find_geometry),
        _ => None,
    }
}

fn parse_polygon(rings: &Value) -> Result<Polygon<f64>> {
    let rings = rings
        .as_array()
        .ok_or_else(|| anyhow!("Polygon rings are not an array"))?;

    let mut parsed = rings.iter().map(parse_ring);
    let exterior = parsed
        .next()
        .ok_or_else(|| anyhow!("Polygon has no exterior ring"))??;
    let interiors = parsed.collect::<Result<Vec<_>>>()?;

    Ok(Polygon::new(exterior, interiors))
}

fn parse_ring(ring: &Value) -> Result<LineString<f64>> {
    let positions = ring
        .as_array()
        .ok_or_else(|| anyhow!("Ring is not an array"))?;

    let coords = positions
        .iter()
        .map(|pos| match (pos[0].as_f64(), pos[1].as_f64()) {
            (Some(x), Some(y)) => Ok(Coord { x, y }),
            _ => Err(anyhow!("Ring position is not a [lon, lat] pair")),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LineString::new(coords))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn square_feature_collection() -> Value {
        json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "name": "border" }, "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [37.0, 55.0], [38.0, 55.0], [38.0, 56.0], [37.0, 56.0], [37.0, 55.0]
                    ]]
                }}
            ]
        })
    }

    #[test]
    fn parses_feature_collection_and_tests_containment() {
        let boundary = Boundary::from_geojson(&square_feature_collection()).unwrap();

        let inside = GeoPoint {
            lat: 55.5,
            lon: 37.5,
        };
        let outside = GeoPoint {
            lat: 54.9,
            lon: 37.5,
        };
        assert!(boundary.contains(&inside));
        assert!(!boundary.contains(&outside));
    }

    #[test]
    fn parses_bare_multipolygon() {
        let value = json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]],
                [[[5.0, 5.0], [6.0, 5.0], [6.0, 6.0], [5.0, 6.0], [5.0, 5.0]]]
            ]
        });
        let boundary = Boundary::from_geojson(&value).unwrap();
        assert!(boundary.contains(&GeoPoint { lat: 0.5, lon: 0.5 }));
        assert!(boundary.contains(&GeoPoint { lat: 5.5, lon: 5.5 }));
        assert!(!boundary.contains(&GeoPoint { lat: 3.0, lon: 3.0 }));
    }

    #[test]
    fn rejects_non_polygonal_documents() {
        let value = json!({ "type": "Point", "coordinates": [37.6, 55.7] });
        assert!(Boundary::from_geojson(&value).is_err());
    }
}
