//! Resource service.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::instrument;

use crate::config::MisfitConfig;
use crate::errors::{resource_error, MisfitError, MisfitResult};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::types::ResourceRequest;

/// Resource service for authenticated fetches.
pub struct ResourceService {
    config: Arc<MisfitConfig>,
    transport: Arc<dyn HttpTransport>,
}

impl ResourceService {
    /// Creates a new resource service.
    pub fn new(config: Arc<MisfitConfig>, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    /// Fetches a resource and returns the body unmodified.
    pub async fn get(&self, request: &ResourceRequest) -> MisfitResult<serde_json::Value> {
        self.get_as(request).await
    }

    /// Fetches a resource and decodes the body.
    #[instrument(skip(self, request), fields(path = %request.path()))]
    pub async fn get_as<T: DeserializeOwned>(&self, request: &ResourceRequest) -> MisfitResult<T> {
        let response = self.send(request).await?;
        self.parse_response(response)
    }

    async fn send(&self, request: &ResourceRequest) -> MisfitResult<HttpResponse> {
        let http_request = self.build_request(request);
        Ok(self.transport.send(http_request).await?)
    }

    /// Builds an HTTP request.
    fn build_request(&self, request: &ResourceRequest) -> HttpRequest {
        let mut http_request = HttpRequest::get(self.config.endpoint_url(&request.path()))
            .with_header("Accept", "application/json")
            .with_header(
                "Authorization",
                format!("Bearer {}", request.access_token()),
            );

        for (name, value) in request.query_pairs() {
            http_request = http_request.with_query(name.as_str(), value.as_str());
        }

        http_request
    }

    /// Parses the HTTP response.
    fn parse_response<T: DeserializeOwned>(&self, response: HttpResponse) -> MisfitResult<T> {
        if !response.is_success() {
            let error = resource_error(&response);
            tracing::warn!(status = response.status, error = %error, "Resource request failed");
            return Err(error);
        }

        response.json().map_err(|e| MisfitError::Serialization {
            message: format!("Failed to parse response: {}", e),
        })
    }
}

impl std::fmt::Debug for ResourceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceService").finish()
    }
}
