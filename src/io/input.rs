//! Input adapters: coordinate batch and exclusion list.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::info;

use crate::models::GeoPoint;

/// Read the ordered input points. The first row is a header and is
/// skipped; rows whose longitude/latitude cells fail to parse are
/// silently skipped, not errored.
pub fn read_points(path: &Path) -> Result<Vec<GeoPoint>> {
    let file = File::open(path).context("Failed to open points file")?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let mut points = Vec::new();
    for record in reader.records() {
        let record = record?;
        let lon = record.get(0).and_then(|c| c.trim().parse::<f64>().ok());
        let lat = record.get(1).and_then(|c| c.trim().parse::<f64>().ok());
        if let (Some(lon), Some(lat)) = (lon, lat) {
            points.push(GeoPoint::normalized(lon, lat));
        }
    }

    info!("Loaded {} input points from {}", points.len(), path.display());
    Ok(points)
}

/// Read the excluded settlement names, one per row, header skipped.
/// Blank names are dropped.
pub fn read_exclusions(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).context("Failed to open exclusion file")?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(name) = record.get(0) {
            let name = name.trim();
            if !name.is_empty() {
                names.push(name.to_string());
            }
        }
    }

    info!("Loaded {} excluded names from {}", names.len(), path.display());
    Ok(names)
}
