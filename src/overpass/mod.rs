//! Overpass API integration.
//!
//! Builds bounded-radius settlement queries, submits them over HTTP and
//! parses the JSON payload into candidate records.

pub mod client;
pub mod parser;
pub mod query;
pub mod response;

pub use client::{OverpassClient, Transport};
pub use parser::parse_candidates;
pub use query::build_query;
