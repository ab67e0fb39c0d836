//! Error types for the Misfit client.
//!
//! Validation failures are detected before any I/O and are kept apart from
//! failures reported by the Misfit API or by the transport underneath it.

use thiserror::Error;

use crate::transport::{HttpResponse, TransportError};

/// Result type alias for Misfit operations.
pub type MisfitResult<T> = Result<T, MisfitError>;

/// Error type for Misfit client operations.
#[derive(Debug, Error)]
pub enum MisfitError {
    /// One or more mandatory arguments were missing or empty.
    #[error("Missing required parameter(s): {}", missing_fields.join(", "))]
    RequiredParameter {
        /// Names of the missing arguments, in argument order.
        missing_fields: Vec<String>,
    },

    /// A date argument was not a valid `YYYY-MM-DD` calendar date.
    #[error("Invalid date for {field}: '{value}' (expected YYYY-MM-DD)")]
    InvalidDate {
        /// The offending argument.
        field: String,
        /// The rejected value.
        value: String,
    },

    /// A date range violated the API's range policy.
    #[error("Invalid date range: {reason}")]
    InvalidDateRange {
        /// Why the range was rejected.
        reason: String,
    },

    /// An argument was present but not acceptable.
    #[error("Invalid value for {name}: '{value}' ({reason})")]
    InvalidParameter {
        /// The offending argument.
        name: String,
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The Misfit API answered with a non-2xx status.
    #[error("API error (HTTP {status}, {error_type}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error type (`"api"` for resource calls, the OAuth2 `error` code for token calls).
        error_type: String,
        /// Human readable message from the response body.
        message: String,
    },

    /// The request never produced an HTTP response.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// A successful response could not be decoded.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },

    /// The client configuration is unusable.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message.
        message: String,
    },
}

impl MisfitError {
    /// Creates a required-parameter error.
    pub fn required<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MisfitError::RequiredParameter {
            missing_fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates an invalid-parameter error.
    pub fn invalid_parameter(
        name: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        MisfitError::InvalidParameter {
            name: name.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates an API error.
    pub fn api(status: u16, error_type: impl Into<String>, message: impl Into<String>) -> Self {
        MisfitError::Api {
            status,
            error_type: error_type.into(),
            message: message.into(),
        }
    }

    /// Returns true if the error was raised by local argument validation,
    /// which always happens before any request is sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MisfitError::RequiredParameter { .. }
                | MisfitError::InvalidDate { .. }
                | MisfitError::InvalidDateRange { .. }
                | MisfitError::InvalidParameter { .. }
        )
    }

    /// Returns the HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            MisfitError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the error type for API errors.
    pub fn error_type(&self) -> Option<&str> {
        match self {
            MisfitError::Api { error_type, .. } => Some(error_type),
            _ => None,
        }
    }
}

/// Error type reported for failed resource calls.
pub const RESOURCE_ERROR_TYPE: &str = "api";

/// Error body returned by the token endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct TokenErrorBody {
    /// OAuth2 error code, e.g. `invalid_grant`.
    #[serde(default)]
    pub error: Option<String>,
    /// Human readable description.
    #[serde(default)]
    pub error_description: Option<String>,
}

/// Error body returned by resource endpoints.
#[derive(Debug, serde::Deserialize)]
pub struct ResourceErrorBody {
    /// Service code, usually mirroring the HTTP status; any JSON shape.
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    /// Human readable message.
    pub message: Option<String>,
}

/// Maps a failed token-exchange response to an API error.
pub fn token_error(response: &HttpResponse) -> MisfitError {
    let body = serde_json::from_slice::<TokenErrorBody>(&response.body).ok();
    let (error_type, message) = match body {
        Some(body) => (body.error, body.error_description),
        None => (None, None),
    };

    MisfitError::Api {
        status: response.status,
        error_type: error_type.unwrap_or_else(|| RESOURCE_ERROR_TYPE.to_string()),
        message: message.unwrap_or_else(|| response.reason()),
    }
}

/// Maps a failed resource response to an API error.
pub fn resource_error(response: &HttpResponse) -> MisfitError {
    let message = serde_json::from_slice::<ResourceErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.message);

    MisfitError::Api {
        status: response.status,
        error_type: RESOURCE_ERROR_TYPE.to_string(),
        message: message.unwrap_or_else(|| response.reason()),
    }
}

impl From<reqwest::Error> for MisfitError {
    fn from(err: reqwest::Error) -> Self {
        MisfitError::Transport(TransportError::from(err))
    }
}

impl From<serde_json::Error> for MisfitError {
    fn from(err: serde_json::Error) -> Self {
        MisfitError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for MisfitError {
    fn from(err: url::ParseError) -> Self {
        MisfitError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}
