//! OAuth2 authorization types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::MisfitError;

/// Grant type sent with every code exchange.
pub const AUTHORIZATION_CODE_GRANT: &str = "authorization_code";

/// `response_type` requested from the authorization dialog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ResponseType {
    /// Authorization code flow.
    #[default]
    Code,
    /// Implicit flow; the token is returned in the redirect fragment.
    Token,
}

impl ResponseType {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseType::Code => "code",
            ResponseType::Token => "token",
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseType {
    type Err = MisfitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code" => Ok(ResponseType::Code),
            "token" => Ok(ResponseType::Token),
            other => Err(MisfitError::invalid_parameter(
                "response_type",
                other,
                "expected 'code' or 'token'",
            )),
        }
    }
}

/// Successful token exchange response.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    /// Bearer token for resource calls.
    pub access_token: String,

    /// Token type, normally `"bearer"`.
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// JSON body posted to the token exchange endpoint.
#[derive(Serialize)]
pub(crate) struct TokenExchangeBody<'a> {
    pub grant_type: &'a str,
    pub code: &'a str,
    pub redirect_uri: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
}
