//! Alder - batch settlement resolution against the Overpass API
//!
//! This library provides the resolution core and I/O adapters for the
//! enrich binary.

pub mod boundary;
pub mod error;
pub mod geo_math;
pub mod io;
pub mod models;
pub mod overpass;
pub mod resolve;

pub use error::ResolveError;
pub use models::{GeoPoint, Outcome, PlaceKind, Settlement};
