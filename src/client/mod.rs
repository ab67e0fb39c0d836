//! Misfit API client.
//!
//! Provides the main client interface for interacting with the Misfit API.

use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::auth::AuthorizationService;
use crate::config::{MisfitConfig, MisfitConfigBuilder};
use crate::errors::MisfitResult;
use crate::services::{ResourceService, SubscriptionService};
use crate::transport::{HttpResponse, HttpTransport, ReqwestTransport};
use crate::types::{
    ResourceOptions, ResourceRequest, ResponseType, SubscriptionConfirmation, SummaryOptions,
    TokenResponse,
};

/// The main Misfit client.
///
/// Every operation validates its arguments before sending anything and makes
/// at most one HTTP request.
///
/// # Example
///
/// ```rust,no_run
/// use misfit_client::{MisfitClient, ResourceOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = MisfitClient::builder()
///         .client_id("your_client_id")
///         .client_secret("your_client_secret")
///         .redirect_uri("https://example.com/callback")
///         .build()?;
///
///     println!("Visit {}", client.authorize_url());
///
///     let token = client.get_access_token("code_from_redirect").await?;
///     let profile = client.get_profile(&token, ResourceOptions::default()).await?;
///     println!("{}", profile);
///     Ok(())
/// }
/// ```
pub struct MisfitClient {
    config: Arc<MisfitConfig>,
    auth_service: AuthorizationService,
    resource_service: ResourceService,
    subscription_service: SubscriptionService,
}

impl MisfitClient {
    /// Creates a new client builder.
    pub fn builder() -> MisfitClientBuilder {
        MisfitClientBuilder::new()
    }

    /// Creates a client from environment variables.
    ///
    /// See [`MisfitConfig::from_env`].
    pub fn from_env() -> MisfitResult<Self> {
        let config = MisfitConfig::from_env()?;
        MisfitClientBuilder::from_config(config).build()
    }

    /// Returns the authorization service.
    pub fn auth(&self) -> &AuthorizationService {
        &self.auth_service
    }

    /// Returns the resource service.
    pub fn resources(&self) -> &ResourceService {
        &self.resource_service
    }

    /// Returns the subscription service.
    pub fn subscriptions(&self) -> &SubscriptionService {
        &self.subscription_service
    }

    /// Returns the configuration.
    pub fn config(&self) -> &MisfitConfig {
        &self.config
    }

    /// Authorization dialog URL for the code flow.
    pub fn authorize_url(&self) -> String {
        self.auth_service.authorize_url()
    }

    /// Authorization dialog URL for the given response type.
    pub fn authorize_url_for(&self, response_type: ResponseType) -> String {
        self.auth_service.authorize_url_for(response_type)
    }

    /// Exchanges an authorization code for an access token.
    pub async fn get_access_token(&self, authorization_code: &str) -> MisfitResult<String> {
        self.auth_service.get_access_token(authorization_code).await
    }

    /// Exchanges an authorization code, returning the full token response.
    pub async fn exchange_code(&self, authorization_code: &str) -> MisfitResult<TokenResponse> {
        self.auth_service.exchange_code(authorization_code).await
    }

    /// Fetches any resource; the body is returned unmodified.
    pub async fn get_resource(&self, request: ResourceRequest) -> MisfitResult<serde_json::Value> {
        self.resource_service.get(&request).await
    }

    /// Fetches any resource and decodes the body.
    pub async fn get_resource_as<T: DeserializeOwned>(
        &self,
        request: ResourceRequest,
    ) -> MisfitResult<T> {
        self.resource_service.get_as(&request).await
    }

    /// Fetches the user profile.
    pub async fn get_profile(
        &self,
        access_token: &str,
        options: ResourceOptions,
    ) -> MisfitResult<serde_json::Value> {
        let request = ResourceRequest::profile(access_token, &options)?;
        self.get_resource(request).await
    }

    /// Fetches the paired device.
    pub async fn get_device(
        &self,
        access_token: &str,
        options: ResourceOptions,
    ) -> MisfitResult<serde_json::Value> {
        let request = ResourceRequest::device(access_token, &options)?;
        self.get_resource(request).await
    }

    /// Fetches goals between two `YYYY-MM-DD` dates.
    pub async fn get_goals(
        &self,
        access_token: &str,
        start_date: &str,
        end_date: &str,
        options: ResourceOptions,
    ) -> MisfitResult<serde_json::Value> {
        let request = ResourceRequest::goals(access_token, start_date, end_date, &options)?;
        self.get_resource(request).await
    }

    /// Fetches the activity summary between two `YYYY-MM-DD` dates.
    pub async fn get_summary(
        &self,
        access_token: &str,
        start_date: &str,
        end_date: &str,
        options: SummaryOptions,
    ) -> MisfitResult<serde_json::Value> {
        let request = ResourceRequest::summary(access_token, start_date, end_date, &options)?;
        self.get_resource(request).await
    }

    /// Fetches activity sessions between two `YYYY-MM-DD` dates.
    pub async fn get_sessions(
        &self,
        access_token: &str,
        start_date: &str,
        end_date: &str,
        options: ResourceOptions,
    ) -> MisfitResult<serde_json::Value> {
        let request = ResourceRequest::sessions(access_token, start_date, end_date, &options)?;
        self.get_resource(request).await
    }

    /// Fetches sleep records between two `YYYY-MM-DD` dates.
    pub async fn get_sleeps(
        &self,
        access_token: &str,
        start_date: &str,
        end_date: &str,
        options: ResourceOptions,
    ) -> MisfitResult<serde_json::Value> {
        let request = ResourceRequest::sleeps(access_token, start_date, end_date, &options)?;
        self.get_resource(request).await
    }

    /// Confirms a push subscription, returning the raw response.
    pub async fn handle_subscription(
        &self,
        data: &SubscriptionConfirmation,
    ) -> MisfitResult<HttpResponse> {
        self.subscription_service.confirm(data).await
    }
}

impl std::fmt::Debug for MisfitClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MisfitClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for the Misfit client.
pub struct MisfitClientBuilder {
    config_builder: MisfitConfigBuilder,
    config: Option<MisfitConfig>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl MisfitClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            config_builder: MisfitConfigBuilder::new(),
            config: None,
            transport: None,
        }
    }

    /// Creates a builder from an existing configuration.
    ///
    /// Configuration setters called afterwards are ignored.
    pub fn from_config(config: MisfitConfig) -> Self {
        Self {
            config_builder: MisfitConfigBuilder::new(),
            config: Some(config),
            transport: None,
        }
    }

    /// Sets the OAuth2 client id.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.client_id(client_id);
        self
    }

    /// Sets the OAuth2 client secret.
    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.client_secret(client_secret);
        self
    }

    /// Sets the redirect URI.
    pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.redirect_uri(redirect_uri);
        self
    }

    /// Sets the permission scope.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.scope(scope);
        self
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(base_url);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config_builder = self.config_builder.timeout_secs(secs);
        self
    }

    /// Sets the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.user_agent(user_agent);
        self
    }

    /// Sets a custom transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the client.
    pub fn build(self) -> MisfitResult<MisfitClient> {
        let config = match self.config {
            Some(config) => config,
            None => self.config_builder.build()?,
        };

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(ReqwestTransport::new(config.timeout, &config.user_agent)?),
        };

        let config = Arc::new(config);

        let auth_service = AuthorizationService::new(Arc::clone(&config), Arc::clone(&transport));
        let resource_service = ResourceService::new(Arc::clone(&config), Arc::clone(&transport));
        let subscription_service = SubscriptionService::new(transport);

        tracing::debug!(base_url = %config.base_url, "Misfit client built");

        Ok(MisfitClient {
            config,
            auth_service,
            resource_service,
            subscription_service,
        })
    }
}

impl Default for MisfitClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
