//! Observability for the Misfit client.
//!
//! Every public operation opens a `tracing` span; this module provides the
//! subscriber setup and the shared log helpers.

mod logging;

pub use logging::{
    log_request, log_response, redact_bearer, LogFormat, LogLevel, LoggingConfig,
};
