//! Configuration module for the Misfit client.
//!
//! Holds the OAuth2 application credentials, the redirect URI and scope used
//! for the authorization dialog, and the connection settings.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

use crate::errors::{MisfitError, MisfitResult};

/// Default base URL for the Misfit cloud API.
pub const DEFAULT_BASE_URL: &str = "https://api.misfitwearables.com";

/// Default permission scope requested in the authorization dialog.
pub const DEFAULT_SCOPE: &str = "public,birthday,email,tracking,session,sleeps";

/// Default request timeout (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("misfit-client/", env!("CARGO_PKG_VERSION"));

/// Configuration for the Misfit client.
///
/// Credentials are not validated; an empty client id simply yields an
/// authorization URL the Misfit dialog will reject.
#[derive(Clone)]
pub struct MisfitConfig {
    /// OAuth2 client (application) id.
    pub client_id: String,
    /// OAuth2 client secret (stored securely).
    pub(crate) client_secret: SecretString,
    /// Redirect URI registered for the application.
    pub redirect_uri: String,
    /// Comma separated permission scope.
    pub scope: String,
    /// Base URL for API requests.
    pub base_url: Url,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent header value.
    pub user_agent: String,
}

impl MisfitConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> MisfitConfigBuilder {
        MisfitConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `MISFIT_CLIENT_ID`: OAuth2 client id
    /// - `MISFIT_CLIENT_SECRET`: OAuth2 client secret
    /// - `MISFIT_REDIRECT_URI`: registered redirect URI
    /// - `MISFIT_SCOPE`: permission scope
    /// - `MISFIT_BASE_URL`: custom base URL
    /// - `MISFIT_TIMEOUT`: request timeout in seconds
    ///
    /// All variables are optional.
    pub fn from_env() -> MisfitResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Creates a configuration from `MISFIT_*` variables resolved by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> MisfitResult<Self> {
        let mut builder = MisfitConfigBuilder::new();

        if let Some(client_id) = lookup("MISFIT_CLIENT_ID") {
            builder = builder.client_id(client_id);
        }

        if let Some(client_secret) = lookup("MISFIT_CLIENT_SECRET") {
            builder = builder.client_secret(client_secret);
        }

        if let Some(redirect_uri) = lookup("MISFIT_REDIRECT_URI") {
            builder = builder.redirect_uri(redirect_uri);
        }

        if let Some(scope) = lookup("MISFIT_SCOPE") {
            builder = builder.scope(scope);
        }

        if let Some(base_url) = lookup("MISFIT_BASE_URL") {
            builder = builder.base_url(base_url);
        }

        if let Some(timeout_str) = lookup("MISFIT_TIMEOUT") {
            let secs = timeout_str
                .parse::<u64>()
                .map_err(|_| MisfitError::Configuration {
                    message: format!(
                        "MISFIT_TIMEOUT must be a number of seconds, got '{}'",
                        timeout_str
                    ),
                })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }

        builder.build()
    }

    /// Returns the client secret (exposing the secret).
    pub(crate) fn client_secret(&self) -> &str {
        self.client_secret.expose_secret()
    }

    /// Returns the full URL for an API path, keeping any path prefix of the base URL.
    pub fn endpoint_url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        url
    }
}

impl Default for MisfitConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: SecretString::new(String::new()),
            redirect_uri: String::new(),
            scope: DEFAULT_SCOPE.to_string(),
            base_url: default_base_url(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl std::fmt::Debug for MisfitConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MisfitConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .field("scope", &self.scope)
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn default_base_url() -> Url {
    // The constant is a valid absolute URL; parsing cannot fail.
    Url::parse(DEFAULT_BASE_URL).unwrap_or_else(|_| unreachable!("DEFAULT_BASE_URL is valid"))
}

/// Builder for `MisfitConfig`.
#[derive(Default)]
pub struct MisfitConfigBuilder {
    client_id: Option<String>,
    client_secret: Option<String>,
    redirect_uri: Option<String>,
    scope: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl MisfitConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the OAuth2 client id.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Sets the OAuth2 client secret.
    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Sets the redirect URI.
    pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Sets the permission scope.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Sets the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the configuration.
    ///
    /// Only the base URL is checked; missing credentials are left empty.
    pub fn build(self) -> MisfitResult<MisfitConfig> {
        let base_url = match self.base_url {
            Some(raw) => {
                let url = Url::parse(raw.trim_end_matches('/'))?;
                if url.scheme() != "https" && url.scheme() != "http" {
                    return Err(MisfitError::Configuration {
                        message: format!("Base URL must use http or https, got '{}'", raw),
                    });
                }
                if url.cannot_be_a_base() {
                    return Err(MisfitError::Configuration {
                        message: format!("Base URL must be absolute, got '{}'", raw),
                    });
                }
                url
            }
            None => default_base_url(),
        };

        if base_url.scheme() == "http" {
            tracing::warn!(base_url = %base_url, "Base URL does not use HTTPS");
        }

        Ok(MisfitConfig {
            client_id: self.client_id.unwrap_or_default(),
            client_secret: SecretString::new(self.client_secret.unwrap_or_default()),
            redirect_uri: self.redirect_uri.unwrap_or_default(),
            scope: self.scope.unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            base_url,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }
}
