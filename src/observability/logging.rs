//! Logging configuration and utilities.
//!
//! Structured logging through `tracing`, with pretty, JSON and compact
//! output. The client itself only emits events; installing a subscriber is
//! left to the application.

use std::collections::HashMap;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::API_KEY_HEADER;
use crate::transport::HttpResponse;
use crate::types::RemoteError;

/// Placeholder written instead of credential header values.
pub const REDACTED: &str = "[REDACTED]";

/// Headers whose values are never logged.
const SENSITIVE_HEADERS: [&str; 2] = [API_KEY_HEADER, "Authorization"];

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// The minimum log level to capture
    pub level: LogLevel,
    /// The output format for log messages
    pub format: LogFormat,
    /// Whether to include the module target in log output
    pub include_target: bool,
    /// Whether to include file and line number in log output
    pub include_file_line: bool,
}

/// Log level enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Trace-level logging (most verbose)
    Trace,
    /// Debug-level logging
    Debug,
    /// Info-level logging
    Info,
    /// Warning-level logging
    Warn,
    /// Error-level logging (least verbose)
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl From<LogLevel> for tracing::level_filters::LevelFilter {
    fn from(level: LogLevel) -> Self {
        Level::from(level).into()
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors (for development)
    Pretty,
    /// JSON format (for structured logging in production)
    Json,
    /// Compact format
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            include_target: true,
            include_file_line: false,
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
    ///
    /// ```
    /// use integrations_azure_openai_files::observability::{LogFormat, LoggingConfig};
    ///
    /// let config = LoggingConfig::new().with_format(LogFormat::Json);
    /// assert_eq!(config.format, LogFormat::Json);
    /// ```
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets whether to include the module target.
    pub fn with_target(mut self, include: bool) -> Self {
        self.include_target = include;
        self
    }

    /// Sets whether to include file and line number.
    pub fn with_file_line(mut self, include: bool) -> Self {
        self.include_file_line = include;
        self
    }

    /// Installs a global subscriber with this configuration.
    ///
    /// `RUST_LOG` directives are honored on top of the configured level.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed.
    pub fn init(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let filter = EnvFilter::from_default_env()
            .add_directive(tracing::level_filters::LevelFilter::from(self.level).into());

        match self.format {
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(
                        fmt::layer()
                            .with_ansi(true)
                            .with_target(self.include_target)
                            .with_file(self.include_file_line)
                            .with_line_number(self.include_file_line),
                    )
                    .try_init()?;
            }
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(
                        fmt::layer()
                            .json()
                            .with_target(self.include_target)
                            .with_file(self.include_file_line)
                            .with_line_number(self.include_file_line),
                    )
                    .try_init()?;
            }
            LogFormat::Compact => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(
                        fmt::layer()
                            .compact()
                            .with_target(self.include_target)
                            .with_file(self.include_file_line)
                            .with_line_number(self.include_file_line),
                    )
                    .try_init()?;
            }
        }

        Ok(())
    }
}

/// Returns the headers sorted by name, with credential values replaced.
pub fn redact_headers(headers: &HashMap<String, String>) -> Vec<(String, String)> {
    let mut redacted: Vec<(String, String)> = headers
        .iter()
        .map(|(name, value)| {
            let sensitive = SENSITIVE_HEADERS
                .iter()
                .any(|s| s.eq_ignore_ascii_case(name));
            let value = if sensitive { REDACTED } else { value.as_str() };
            (name.clone(), value.to_string())
        })
        .collect();
    redacted.sort();
    redacted
}

/// Log an incoming HTTP response.
pub fn log_response(response: &HttpResponse) {
    tracing::debug!(
        status = response.status,
        request_id = response.request_id().unwrap_or("<none>"),
        body_len = response.body.len(),
        "Response received"
    );
}

/// Log a call the service rejected.
pub fn log_remote_error(operation: &str, error: &RemoteError, request_id: Option<&str>) {
    tracing::warn!(
        operation,
        status = error.status,
        code = %error.code(),
        message = %error.detail().message,
        request_id = request_id.unwrap_or("<none>"),
        "Service returned an error"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ErrorDetail, ErrorResponse};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.include_target);
        assert!(!config.include_file_line);
    }

    #[test]
    fn test_logging_config_builder_chain() {
        let config = LoggingConfig::new()
            .with_level(LogLevel::Trace)
            .with_format(LogFormat::Compact)
            .with_target(false)
            .with_file_line(true);

        assert_eq!(config.level, LogLevel::Trace);
        assert_eq!(config.format, LogFormat::Compact);
        assert!(!config.include_target);
        assert!(config.include_file_line);
    }

    #[test]
    fn test_log_level_to_level() {
        assert_eq!(Level::from(LogLevel::Trace), Level::TRACE);
        assert_eq!(Level::from(LogLevel::Debug), Level::DEBUG);
        assert_eq!(Level::from(LogLevel::Info), Level::INFO);
        assert_eq!(Level::from(LogLevel::Warn), Level::WARN);
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
    }

    #[test]
    fn test_init_installs_once() {
        let config = LoggingConfig::new()
            .with_format(LogFormat::Json)
            .with_file_line(true);

        let _ = config.clone().init();
        tracing::info!("subscriber installed");
        assert!(config.init().is_err());
    }

    #[test]
    fn test_redact_headers() {
        let mut headers = HashMap::new();
        headers.insert("api-key".to_string(), "super-secret".to_string());
        headers.insert("Authorization".to_string(), "Bearer token".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());

        let redacted = redact_headers(&headers);

        assert_eq!(
            redacted,
            vec![
                ("Accept".to_string(), "application/json".to_string()),
                ("Authorization".to_string(), REDACTED.to_string()),
                ("api-key".to_string(), REDACTED.to_string()),
            ]
        );
    }

    #[test]
    fn test_log_helpers_do_not_panic() {
        let response = HttpResponse::new(404, "{}");
        log_response(&response);

        let remote = RemoteError {
            status: 404,
            response: ErrorResponse {
                error: ErrorDetail::new("404", "Resource not found"),
            },
        };
        log_remote_error("delete", &remote, Some("req-1"));
        log_remote_error("delete", &remote, None);
    }
}
