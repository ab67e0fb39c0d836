//! OAuth2 authorization for the Misfit API.
//!
//! Builds the authorization dialog URL and exchanges authorization codes for
//! bearer tokens. Codes are single use, so the exchange is never retried.

use std::sync::Arc;
use tracing::instrument;
use url::Url;

use crate::config::MisfitConfig;
use crate::errors::{token_error, MisfitError, MisfitResult};
use crate::transport::{HttpRequest, HttpTransport};
use crate::types::request::ensure_present;
use crate::types::token::{TokenExchangeBody, AUTHORIZATION_CODE_GRANT};
use crate::types::{ResponseType, TokenResponse};

/// Path of the authorization dialog.
pub const AUTHORIZE_PATH: &str = "/auth/dialog/authorize";

/// Path of the token exchange endpoint.
pub const TOKEN_EXCHANGE_PATH: &str = "/auth/tokens/exchange";

/// Argument name reported for a missing authorization code.
pub const AUTHORIZATION_CODE_FIELD: &str = "authorization_code";

/// Authorization service.
pub struct AuthorizationService {
    config: Arc<MisfitConfig>,
    transport: Arc<dyn HttpTransport>,
}

impl AuthorizationService {
    /// Creates a new authorization service.
    pub fn new(config: Arc<MisfitConfig>, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    /// Authorization dialog URL for the code flow.
    pub fn authorize_url(&self) -> String {
        self.authorize_url_for(ResponseType::Code)
    }

    /// Authorization dialog URL for the given response type.
    ///
    /// Parameters are form-urlencoded in the order `response_type`,
    /// `client_id`, `redirect_uri`, `scope`.
    pub fn authorize_url_for(&self, response_type: ResponseType) -> String {
        let mut url: Url = self.config.endpoint_url(AUTHORIZE_PATH);
        url.query_pairs_mut()
            .append_pair("response_type", response_type.as_str())
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("scope", &self.config.scope);
        url.into()
    }

    /// Exchanges an authorization code for an access token.
    pub async fn get_access_token(&self, authorization_code: &str) -> MisfitResult<String> {
        self.exchange_code(authorization_code)
            .await
            .map(|token| token.access_token)
    }

    /// Exchanges an authorization code, returning the full token response.
    #[instrument(skip(self, authorization_code))]
    pub async fn exchange_code(&self, authorization_code: &str) -> MisfitResult<TokenResponse> {
        ensure_present(&[(AUTHORIZATION_CODE_FIELD, authorization_code)])?;

        let body = TokenExchangeBody {
            grant_type: AUTHORIZATION_CODE_GRANT,
            code: authorization_code,
            redirect_uri: &self.config.redirect_uri,
            client_id: &self.config.client_id,
            client_secret: self.config.client_secret(),
        };
        let request = HttpRequest::post(self.config.endpoint_url(TOKEN_EXCHANGE_PATH))
            .with_header("Accept", "application/json")
            .with_json(&body)?;

        let response = self.transport.send(request).await?;

        if !response.is_success() {
            let error = token_error(&response);
            tracing::warn!(
                status = response.status,
                error_type = error.error_type().unwrap_or_default(),
                "Token exchange rejected"
            );
            return Err(error);
        }

        let token: TokenResponse = response.json().map_err(|e| MisfitError::Serialization {
            message: format!("Failed to parse token response: {}", e),
        })?;

        if token.access_token.is_empty() {
            return Err(MisfitError::Serialization {
                message: "Token response has an empty access_token".to_string(),
            });
        }

        tracing::debug!(token_type = %token.token_type, "Authorization code exchanged");
        Ok(token)
    }
}

impl std::fmt::Debug for AuthorizationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationService")
            .field("client_id", &self.config.client_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockResponse, MockTransport};
    use crate::transport::HttpMethod;
    use pretty_assertions::assert_eq;

    fn service(transport: Arc<MockTransport>) -> AuthorizationService {
        let config = MisfitConfig::builder()
            .client_id("abc")
            .client_secret("shh")
            .redirect_uri("http://x")
            .scope("s")
            .build()
            .unwrap();
        AuthorizationService::new(Arc::new(config), transport)
    }

    #[test]
    fn test_authorize_url_exact() {
        let auth = service(Arc::new(MockTransport::new()));
        assert_eq!(
            auth.authorize_url(),
            "https://api.misfitwearables.com/auth/dialog/authorize?response_type=code&client_id=abc&redirect_uri=http%3A%2F%2Fx&scope=s"
        );
    }

    #[test]
    fn test_authorize_url_token_flow() {
        let auth = service(Arc::new(MockTransport::new()));
        assert!(auth
            .authorize_url_for(ResponseType::Token)
            .contains("?response_type=token&client_id=abc"));
    }

    #[test]
    fn test_authorize_url_encodes_default_scope() {
        let config = MisfitConfig::builder().build().unwrap();
        let auth = AuthorizationService::new(Arc::new(config), Arc::new(MockTransport::new()));
        let expected_tail = concat!(
            "client_id=&redirect_uri=&",
            "scope=public%2Cbirthday%2Cemail%2Ctracking%2Csession%2Csleeps"
        );
        assert!(auth.authorize_url().ends_with(expected_tail));
    }

    #[tokio::test]
    async fn test_exchange_posts_json_body() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_json(&serde_json::json!({"access_token": "tok", "token_type": "bearer"}));
        let auth = service(Arc::clone(&transport));

        let token = auth.get_access_token("8f673z9qpn58hm4f").await.unwrap();
        assert_eq!(token, "tok");

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://api.misfitwearables.com/auth/tokens/exchange");
        let body: serde_json::Value = serde_json::from_slice(&request.body.unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "grant_type": "authorization_code",
                "code": "8f673z9qpn58hm4f",
                "redirect_uri": "http://x",
                "client_id": "abc",
                "client_secret": "shh"
            })
        );
    }

    #[tokio::test]
    async fn test_exchange_missing_code_sends_nothing() {
        let transport = Arc::new(MockTransport::new());
        let auth = service(Arc::clone(&transport));

        let err = auth.get_access_token("").await.unwrap_err();
        assert!(matches!(
            err,
            MisfitError::RequiredParameter { ref missing_fields }
                if missing_fields == &["authorization_code"]
        ));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_exchange_without_access_token_is_serialization_error() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_json(&serde_json::json!({"token_type": "bearer"}));
        let auth = service(transport);

        let err = auth.exchange_code("code").await.unwrap_err();
        assert!(matches!(err, MisfitError::Serialization { .. }));
    }

    #[tokio::test]
    async fn test_exchange_rejection_maps_oauth_error() {
        let transport = Arc::new(MockTransport::new());
        transport.queue(MockResponse::json_with_status(
            403,
            &serde_json::json!({
                "error": "invalid_grant",
                "error_description": "Authorization code expired"
            }),
        ));
        let auth = service(transport);

        let err = auth.exchange_code("8f673z9qpn58hm4g").await.unwrap_err();
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.error_type(), Some("invalid_grant"));
        assert!(err.to_string().ends_with("Authorization code expired"));
    }
}
