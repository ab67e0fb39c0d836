//! Misfit Cloud API Client Library
//!
//! An async Rust client for the Misfit fitness-tracking cloud API. Covers the
//! OAuth2 authorization-code flow, the authenticated resource endpoints
//! (profile, device, goals, summary, sessions, sleeps) and the push
//! subscription handshake.
//!
//! # Features
//!
//! - **OAuth2**: Authorization dialog URL and code-for-token exchange
//! - **Resources**: Untyped pass-through fetches and typed payload models
//! - **Validation**: Arguments and date ranges are checked before any request
//! - **Observability**: `tracing` spans and structured logging
//! - **Testability**: Pluggable transport with a recording mock
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use misfit_client::{MisfitClient, ResourceOptions, SummaryOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MisfitClient::builder()
//!         .client_id("your_client_id")
//!         .client_secret("your_client_secret")
//!         .redirect_uri("https://example.com/callback")
//!         .build()?;
//!
//!     let token = client.get_access_token("code_from_redirect").await?;
//!
//!     let summary = client
//!         .get_summary(&token, "2013-10-01", "2013-10-30", SummaryOptions::new().detail(true))
//!         .await?;
//!     println!("{}", summary);
//!
//!     let device = client.get_device(&token, ResourceOptions::default()).await?;
//!     println!("{}", device);
//!     Ok(())
//! }
//! ```
//!
//! # Typed Example
//!
//! ```rust,no_run
//! use misfit_client::{MisfitClient, ResourceOptions, ResourceRequest, SleepList};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MisfitClient::from_env()?;
//!
//!     let request = ResourceRequest::sleeps(
//!         "access_token",
//!         "2015-01-18",
//!         "2015-01-18",
//!         &ResourceOptions::default(),
//!     )?;
//!     let sleeps: SleepList = client.get_resource_as(request).await?;
//!     println!("{} sleeps", sleeps.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod services;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::{MisfitClient, MisfitClientBuilder};
pub use config::{MisfitConfig, MisfitConfigBuilder};
pub use errors::{MisfitError, MisfitResult};
pub use observability::{LogFormat, LogLevel, LoggingConfig};
pub use transport::{HttpResponse, HttpTransport, TransportError};

// Type re-exports
pub use types::{
    DateRange, Device, Goal, GoalList, Profile, Resource, ResourceOptions, ResourceRequest,
    ResponseType, Session, SessionList, Sleep, SleepDetail, SleepList, SleepState,
    SubscriptionConfirmation, Summary, SummaryList, SummaryOptions, TokenResponse,
};

/// Mock implementations for testing.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
