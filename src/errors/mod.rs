//! Error types for the Azure OpenAI Files client.
//!
//! Local and transport failures are reported through [`FilesError`]. A
//! non-2xx answer from the service is not a `FilesError`: it is the
//! [`RemoteError`](crate::types::RemoteError) branch of the per-call outcome.

use std::path::PathBuf;
use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias for client operations.
pub type FilesResult<T> = Result<T, FilesError>;

/// Maximum number of body bytes kept in a deserialization error.
const MAX_BODY_SNIPPET: usize = 512;

/// Local, transport and protocol-shape failures.
#[derive(Debug, Error)]
pub enum FilesError {
    /// Configuration error (empty endpoint, missing key, etc.)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// Request validation failed before anything was sent.
    #[error("Validation error: {message}")]
    Validation {
        /// Error message describing the validation issue.
        message: String,
        /// The parameter that caused the error.
        param: Option<String>,
    },

    /// The upload source could not be used.
    #[error("Cannot read file {}: {message}", .path.display())]
    LocalFile {
        /// Path supplied by the caller.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// The transport failed to complete the round trip.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body did not match the shape expected for its status.
    #[error("Deserialization error (HTTP {status}): {message}")]
    Deserialization {
        /// HTTP status of the response.
        status: u16,
        /// Parser message.
        message: String,
        /// Leading part of the offending body.
        body: String,
    },
}

impl FilesError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        FilesError::Configuration {
            message: message.into(),
        }
    }

    /// Creates a validation error for a named parameter.
    pub fn validation_param(message: impl Into<String>, param: impl Into<String>) -> Self {
        FilesError::Validation {
            message: message.into(),
            param: Some(param.into()),
        }
    }

    /// Creates a local file error.
    pub fn local_file(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        FilesError::LocalFile {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a deserialization error, keeping a bounded snippet of the body.
    pub fn deserialization(status: u16, err: &serde_json::Error, body: &[u8]) -> Self {
        let end = body.len().min(MAX_BODY_SNIPPET);
        FilesError::Deserialization {
            status,
            message: err.to_string(),
            body: String::from_utf8_lossy(&body[..end]).into_owned(),
        }
    }

    /// Returns true if the failure happened before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            FilesError::Configuration { .. }
                | FilesError::Validation { .. }
                | FilesError::LocalFile { .. }
        )
    }

    /// Returns true if the transport failed.
    pub fn is_transport(&self) -> bool {
        matches!(self, FilesError::Transport(_))
    }
}

impl From<url::ParseError> for FilesError {
    fn from(err: url::ParseError) -> Self {
        FilesError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_local_errors() {
        assert!(FilesError::configuration("endpoint is empty").is_local());
        assert!(FilesError::validation_param("file id is empty", "file_id").is_local());
        assert!(FilesError::local_file("/tmp/missing.jsonl", "not found").is_local());

        let transport: FilesError = TransportError::Timeout {
            timeout: Duration::from_secs(5),
        }
        .into();
        assert!(!transport.is_local());
        assert!(transport.is_transport());
    }

    #[test]
    fn test_local_file_display_names_path() {
        let error = FilesError::local_file("/data/train.jsonl", "No such file or directory");
        let text = error.to_string();
        assert!(text.contains("/data/train.jsonl"));
        assert!(text.contains("No such file"));
    }

    #[test]
    fn test_deserialization_truncates_body() {
        let body = vec![b'x'; 2048];
        let err = serde_json::from_slice::<serde_json::Value>(&body).unwrap_err();
        let error = FilesError::deserialization(200, &err, &body);

        match error {
            FilesError::Deserialization { status, body, .. } => {
                assert_eq!(status, 200);
                assert_eq!(body.len(), MAX_BODY_SNIPPET);
            }
            other => panic!("Expected Deserialization error, got {other:?}"),
        }
    }

    #[test]
    fn test_url_parse_error_is_configuration() {
        let error: FilesError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(error, FilesError::Configuration { .. }));
    }
}
