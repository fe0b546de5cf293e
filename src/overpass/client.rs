//! HTTP transport to the Overpass API endpoint.

use reqwest::{Client, StatusCode};
use std::future::Future;
use url::Url;

use crate::error::ResolveError;

/// Abstraction over the remote query service, so the resolver can be
/// exercised against scripted responses in tests.
pub trait Transport {
    /// Submit one query and return the raw response body.
    fn fetch(&self, query: &str) -> impl Future<Output = Result<String, ResolveError>> + Send;
}

/// Client for the Overpass API.
///
/// The query text is POSTed as the `data` form field. The client-side
/// timeout is wider than the server-side timeout declared in the query,
/// so slow-but-successful queries are not cut off locally.
pub struct OverpassClient {
    client: Client,
    endpoint: Url,
}

impl OverpassClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: Client::builder()
                .user_agent("Alder/0.1 (settlement resolver)")
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("Failed to create HTTP client"),
            endpoint,
        }
    }
}

impl Transport for OverpassClient {
    async fn fetch(&self, query: &str) -> Result<String, ResolveError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&[("data", query)])
            .send()
            .await
            .map_err(|e| ResolveError::Unhandled(e.to_string()))?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => Err(ResolveError::RateLimited),
            StatusCode::GATEWAY_TIMEOUT => Err(ResolveError::GatewayTimeout),
            status if !status.is_success() => Err(ResolveError::HttpError(status.as_u16())),
            _ => response
                .text()
                .await
                .map_err(|e| ResolveError::Unhandled(e.to_string())),
        }
    }
}
