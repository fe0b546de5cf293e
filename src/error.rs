//! Failure taxonomy for single-point resolution.

use thiserror::Error;

/// Everything that can go wrong while resolving one input point.
///
/// Each variant's display text is what ends up in the status column of the
/// output table. None of these abort the batch; a failed point is recorded
/// and processing moves on.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The source point normalizes to an out-of-range latitude.
    #[error("invalid coordinate")]
    InvalidCoordinate,

    /// The server answered with markup instead of structured data.
    #[error("unexpected server format")]
    UnexpectedServerFormat,

    /// The response body could not be deserialized.
    #[error("parse error: {0}")]
    ParseError(String),

    /// The result set was absent or empty.
    #[error("no elements in response")]
    NoElements,

    /// Elements were present but none survived extraction and filtering.
    #[error("no settlements recognized")]
    NoSettlementsRecognized,

    /// No candidate's population fell inside the configured band.
    #[error("no settlement in population band")]
    NoPopulationBandMatch,

    /// Candidates existed but every one was excluded or already used.
    #[error("all candidates excluded or already used")]
    AllCandidatesExcluded,

    /// The server signaled "too many requests".
    #[error("rate limited by server")]
    RateLimited,

    /// The gateway timed out before the query finished.
    #[error("gateway timeout")]
    GatewayTimeout,

    /// Any other non-success HTTP status.
    #[error("HTTP error {0}")]
    HttpError(u16),

    /// The retry budget was consumed without a terminal outcome.
    #[error("retries exhausted")]
    RetriesExhausted,

    /// Any other runtime fault during resolution of one point.
    #[error("unhandled error: {0}")]
    Unhandled(String),
}

impl ResolveError {
    /// Only rate limiting is worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ResolveError::RateLimited)
    }
}
