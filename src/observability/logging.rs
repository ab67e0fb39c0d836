//! Logging configuration and utilities.
//!
//! Structured logging is done with `tracing`; this module wires up a
//! `tracing-subscriber` registry for applications that want one and holds
//! the request/response log helpers used by the transport.

use std::time::Duration;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// The minimum log level to capture.
    pub level: LogLevel,
    /// The output format for log messages.
    pub format: LogFormat,
    /// Whether to include the module target in log output.
    pub include_target: bool,
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Trace-level logging (most verbose).
    Trace,
    /// Debug-level logging.
    Debug,
    /// Info-level logging.
    Info,
    /// Warning-level logging.
    Warn,
    /// Error-level logging (least verbose).
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format (for development).
    Pretty,
    /// JSON format (for structured logging in production).
    Json,
    /// Compact single-line format.
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            include_target: true,
        }
    }
}

impl LoggingConfig {
    /// Creates a new logging configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log level.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the log format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets whether to include the module target.
    pub fn with_target(mut self, include: bool) -> Self {
        self.include_target = include;
        self
    }

    /// Builds the filter: `RUST_LOG` directives plus the configured level.
    fn filter(&self) -> EnvFilter {
        EnvFilter::from_default_env().add_directive(LevelFilter::from(self.level).into())
    }

    /// Installs a global subscriber with this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber has already been installed.
    pub fn init(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let filter = self.filter();

        match self.format {
            LogFormat::Pretty => tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(self.include_target))
                .try_init()?,
            LogFormat::Json => tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_target(self.include_target))
                .try_init()?,
            LogFormat::Compact => tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().compact().with_target(self.include_target))
                .try_init()?,
        }

        Ok(())
    }
}

/// Log an outgoing HTTP request.
pub fn log_request(method: &str, url: &str) {
    tracing::debug!(method = method, url = url, "Outgoing request");
}

/// Log an incoming HTTP response.
pub fn log_response(status: u16, elapsed: Duration) {
    tracing::debug!(
        status = status,
        duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        "Incoming response"
    );
}

/// Replaces bearer credentials in `text` with `***`.
pub fn redact_bearer(text: &str) -> String {
    const MARKER: &str = "Bearer ";

    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(idx) = rest.find(MARKER) {
        let (head, tail) = rest.split_at(idx + MARKER.len());
        result.push_str(head);
        result.push_str("***");
        let token_end = tail
            .find(|c: char| c.is_whitespace() || c == '"' || c == ',')
            .unwrap_or(tail.len());
        rest = &tail[token_end..];
    }
    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.include_target);
    }

    #[test]
    fn test_logging_config_builder_chain() {
        let config = LoggingConfig::new()
            .with_level(LogLevel::Trace)
            .with_format(LogFormat::Json)
            .with_target(false);

        assert_eq!(config.level, LogLevel::Trace);
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.include_target);
    }

    #[test]
    fn test_log_level_to_filter() {
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::TRACE);
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::WARN);
        assert_eq!(LevelFilter::from(LogLevel::Error), LevelFilter::ERROR);
    }

    #[test]
    fn test_init_twice_fails() {
        // The first call may lose to another test's subscriber; the second never succeeds.
        let _ = LoggingConfig::new().with_format(LogFormat::Compact).init();
        assert!(LoggingConfig::new().init().is_err());
    }

    #[test]
    fn test_redact_bearer() {
        assert_eq!(
            redact_bearer("Authorization: Bearer abc123, next"),
            "Authorization: Bearer ***, next"
        );
        assert_eq!(redact_bearer("Bearer x Bearer y"), "Bearer *** Bearer ***");
        assert_eq!(redact_bearer("no credentials"), "no credentials");
    }

    #[test]
    fn test_log_helpers_do_not_panic() {
        log_request("GET", "https://api.misfitwearables.com/move/resource/v1/user/me/profile");
        log_response(200, Duration::from_millis(12));
    }
}
