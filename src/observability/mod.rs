//! Observability: `tracing` setup and the log helpers used by the client.

mod logging;

pub use logging::{
    log_remote_error, log_response, redact_headers, LogFormat, LogLevel, LoggingConfig, REDACTED,
};
