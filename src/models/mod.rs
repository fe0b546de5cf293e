//! Core data models for the resolution pipeline.

pub mod settlement;

pub use settlement::{GeoPoint, PlaceKind, Settlement};

use crate::error::ResolveError;

/// Exactly one resolution outcome per input point.
pub type Outcome = Result<Settlement, ResolveError>;
