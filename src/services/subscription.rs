//! Subscription service.

use std::sync::Arc;
use tracing::instrument;
use url::Url;

use crate::errors::MisfitResult;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::types::request::ensure_present;
use crate::types::SubscriptionConfirmation;

/// Argument name reported for a missing subscribe URL.
pub const SUBSCRIBE_URL_FIELD: &str = "subscribe_url";

/// Subscription service for the push notification handshake.
pub struct SubscriptionService {
    transport: Arc<dyn HttpTransport>,
}

impl SubscriptionService {
    /// Creates a new subscription service.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Confirms a subscription by visiting its subscribe URL.
    ///
    /// The raw response is returned whatever its status; only transport
    /// failures are errors.
    #[instrument(skip(self, data))]
    pub async fn confirm(&self, data: &SubscriptionConfirmation) -> MisfitResult<HttpResponse> {
        ensure_present(&[(SUBSCRIBE_URL_FIELD, data.subscribe_url.as_str())])?;

        // An unusable URL is reported by the transport.
        let host = Url::parse(&data.subscribe_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_default();
        let request = HttpRequest::get(data.subscribe_url.as_str());
        let response = self.transport.send(request).await?;

        tracing::info!(host = %host, status = response.status, "Subscription confirmation sent");
        Ok(response)
    }
}

impl std::fmt::Debug for SubscriptionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionService").finish()
    }
}
