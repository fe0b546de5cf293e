//! Per-point resolution with bounded retry and linear backoff.

use std::time::Duration;

use tracing::{debug, warn};

use crate::boundary::Boundary;
use crate::error::ResolveError;
use crate::io::DiagnosticSink;
use crate::models::{GeoPoint, Outcome};
use crate::overpass::{build_query, parse_candidates, Transport};
use crate::resolve::selector::{select, SelectionPolicy};
use crate::resolve::state::RunState;

/// Total attempts per point, rate-limited responses included.
pub const MAX_ATTEMPTS: u32 = 3;

/// Base backoff delay; attempt N sleeps `N * BASE_BACKOFF` before the
/// next attempt (linear backoff).
pub const BASE_BACKOFF: Duration = Duration::from_secs(2);

/// Resolves one point at a time against the query service, carrying the
/// run-wide exclusion/dedup state across points.
///
/// Only a rate-limited response is retried; any other outcome, success or
/// failure, is terminal for the point.
pub struct Resolver<T> {
    transport: T,
    policy: SelectionPolicy,
    boundary: Option<Boundary>,
    state: RunState,
    base_backoff: Duration,
    diagnostics: Option<DiagnosticSink>,
}

impl<T: Transport> Resolver<T> {
    pub fn new(
        transport: T,
        policy: SelectionPolicy,
        boundary: Option<Boundary>,
        state: RunState,
    ) -> Self {
        Self {
            transport,
            policy,
            boundary,
            state,
            base_backoff: BASE_BACKOFF,
            diagnostics: None,
        }
    }

    /// Route unparsable payloads to a diagnostic sink for post-mortem.
    pub fn with_diagnostics(mut self, sink: DiagnosticSink) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    /// Override the backoff base delay. Tests pin this for deterministic
    /// timing.
    pub fn with_base_backoff(mut self, base: Duration) -> Self {
        self.base_backoff = base;
        self
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Resolve a single point: query, parse, select. On success the
    /// winning name is recorded as used before returning, so later points
    /// in the run see it as taken.
    pub async fn resolve(&mut self, point: &GeoPoint) -> Outcome {
        let query = build_query(point)?;

        for attempt in 1..=MAX_ATTEMPTS {
            let body = match self.transport.fetch(&query).await {
                Ok(body) => body,
                Err(e) if e.is_retryable() => {
                    if attempt == MAX_ATTEMPTS {
                        return Err(ResolveError::RetriesExhausted);
                    }
                    let delay = self.base_backoff * attempt;
                    warn!(
                        "Rate limited on attempt {}/{}, backing off {:?}",
                        attempt, MAX_ATTEMPTS, delay
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let candidates = match parse_candidates(&body, point, self.boundary.as_ref()) {
                Ok(candidates) => candidates,
                Err(e @ ResolveError::ParseError(_)) => {
                    if let Some(sink) = &self.diagnostics {
                        if let Err(io_err) = sink.record(&body) {
                            warn!("Failed to persist offending payload: {}", io_err);
                        }
                    }
                    return Err(e);
                }
                Err(e) => return Err(e),
            };

            debug!(
                "{} candidates at ({}, {})",
                candidates.len(),
                point.lat,
                point.lon
            );

            let winner = select(&candidates, &self.state, self.policy)?.clone();
            self.state.mark_used(&winner.name);
            return Ok(winner);
        }

        Err(ResolveError::RetriesExhausted)
    }
}
