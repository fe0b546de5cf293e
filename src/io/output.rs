//! Result table writer.

use anyhow::{Context, Result};
use csv::Writer;
use std::path::Path;
use tracing::info;

use crate::models::{GeoPoint, Outcome};

/// Marker written to the population column when no count is known.
const NOT_AVAILABLE: &str = "n/a";

/// Write one row per input point, in input order.
///
/// Resolved points carry the full settlement record; failed points leave
/// the settlement columns empty and put the failure reason text in the
/// status column, which is the flag an inspecting human filters on.
pub fn write_results(path: &Path, rows: &[(GeoPoint, Outcome)]) -> Result<()> {
    let mut writer = Writer::from_path(path).context("Failed to create output file")?;

    writer.write_record([
        "source_lon",
        "source_lat",
        "name",
        "kind",
        "settlement_lon",
        "settlement_lat",
        "distance_km",
        "population",
        "status",
    ])?;

    for (point, outcome) in rows {
        match outcome {
            Ok(settlement) => writer.write_record([
                point.lon.to_string(),
                point.lat.to_string(),
                settlement.name.clone(),
                settlement.kind.to_string(),
                settlement.location.lon.to_string(),
                settlement.location.lat.to_string(),
                format!("{:.2}", settlement.distance_km),
                settlement
                    .population
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                "OK".to_string(),
            ])?,
            Err(reason) => writer.write_record([
                point.lon.to_string(),
                point.lat.to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                reason.to_string(),
            ])?,
        }
    }

    writer.flush()?;
    info!("Wrote {} result rows to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;
    use crate::models::{PlaceKind, Settlement};

    #[test]
    fn rows_mirror_input_order_and_failures_stay_blank() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        let ok_point = GeoPoint {
            lat: 55.75,
            lon: 37.62,
        };
        let bad_point = GeoPoint {
            lat: 59.93,
            lon: 30.34,
        };
        let rows = vec![
            (
                ok_point,
                Ok(Settlement {
                    name: "Tikhvin".to_string(),
                    kind: PlaceKind::Town,
                    location: GeoPoint {
                        lat: 59.645,
                        lon: 33.529,
                    },
                    distance_km: 12.3456,
                    population: None,
                }),
            ),
            (bad_point, Err(ResolveError::RateLimited)),
        ];

        write_results(&path, &rows).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("source_lon,source_lat,"));
        assert_eq!(lines[1], "37.62,55.75,Tikhvin,town,33.529,59.645,12.35,n/a,OK");
        assert_eq!(lines[2], "30.34,59.93,,,,,,,rate limited by server");
    }
}
