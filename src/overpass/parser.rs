//! Turns a raw Overpass payload into settlement candidates.

use tracing::debug;

use crate::boundary::Boundary;
use crate::error::ResolveError;
use crate::geo_math;
use crate::models::{GeoPoint, PlaceKind, Settlement};
use crate::overpass::response::OverpassResponse;

/// Parse a raw response body into candidates around `origin`.
///
/// When a boundary is supplied, elements outside it are discarded; this
/// handles a search radius spilling across the border. Unnamed elements
/// and elements without any usable geometry are skipped. No name-level
/// deduplication happens here: duplicate geometry representations of the
/// same settlement are the selector's problem.
///
/// `ParseError` carries only the deserializer message; the caller keeps
/// the raw body for the diagnostic dump.
pub fn parse_candidates(
    body: &str,
    origin: &GeoPoint,
    boundary: Option<&Boundary>,
) -> Result<Vec<Settlement>, ResolveError> {
    if body.trim_start().starts_with('<') {
        return Err(ResolveError::UnexpectedServerFormat);
    }

    let response: OverpassResponse =
        serde_json::from_str(body).map_err(|e| ResolveError::ParseError(e.to_string()))?;

    if response.elements.is_empty() {
        return Err(ResolveError::NoElements);
    }

    let mut candidates = Vec::new();

    for element in &response.elements {
        let location = match element.coordinate() {
            Some((lat, lon)) => GeoPoint { lat, lon },
            None => {
                debug!(
                    "Skipping {} {} without geometry",
                    element.element_type, element.id
                );
                continue;
            }
        };

        if let Some(boundary) = boundary {
            if !boundary.contains(&location) {
                continue;
            }
        }

        // An unnamed result can never be a valid answer.
        let name = match element.tags.get("name") {
            Some(n) if !n.trim().is_empty() => n.clone(),
            _ => continue,
        };

        let kind = PlaceKind::from_tag(element.tags.get("place").map(String::as_str));

        // Absent or unparsable population means "no value", never zero.
        let population = element
            .tags
            .get("population")
            .and_then(|p| p.trim().parse::<u64>().ok());

        candidates.push(Settlement {
            name,
            kind,
            location,
            distance_km: geo_math::haversine_km(origin, &location),
            population,
        });
    }

    if candidates.is_empty() {
        return Err(ResolveError::NoSettlementsRecognized);
    }

    Ok(candidates)
}
