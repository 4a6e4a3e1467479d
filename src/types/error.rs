//! Error envelope returned by the service on non-2xx responses.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::serde_helpers::{null_as_empty_string, null_as_empty_vec};

/// Code used when the service answers with an empty error body.
pub const UNKNOWN_ERROR_CODE: &str = "UnknownError";

/// Outer error envelope: `{"error": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// The top-level error.
    pub error: ErrorDetail,
}

impl ErrorResponse {
    /// Builds an envelope for a response that carried no body.
    pub fn unknown(status: u16) -> Self {
        let reason = http::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("Unknown Status");

        Self {
            error: ErrorDetail::new(
                UNKNOWN_ERROR_CODE,
                format!("HTTP {status} {reason} with an empty response body"),
            ),
        }
    }
}

/// A single error, possibly with nested errors.
///
/// The service may send `null` or omit `code` and `message`; both read as
/// an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Error code.
    #[serde(default, deserialize_with = "null_as_empty_string::deserialize")]
    pub code: String,
    /// Human readable message.
    #[serde(default, deserialize_with = "null_as_empty_string::deserialize")]
    pub message: String,
    /// Name of the field the error refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Nested errors, in the order the service sent them.
    #[serde(
        default,
        deserialize_with = "null_as_empty_vec::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub details: Vec<ErrorDetail>,
    /// Chain of progressively more specific codes.
    #[serde(
        rename = "innererror",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub inner_error: Option<Box<InnerError>>,
}

impl ErrorDetail {
    /// Creates an error without target, details or inner error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            target: None,
            details: Vec::new(),
            inner_error: None,
        }
    }

    /// Returns the inner error codes, outermost first.
    pub fn inner_codes(&self) -> Vec<&str> {
        self.inner_error
            .as_deref()
            .map(InnerError::codes)
            .unwrap_or_default()
    }

    /// Returns the most specific code available.
    pub fn most_specific_code(&self) -> &str {
        self.inner_codes().last().copied().unwrap_or(self.code.as_str())
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code.is_empty(), self.message.is_empty()) {
            (false, false) => write!(f, "{}: {}", self.code, self.message)?,
            (false, true) => f.write_str(&self.code)?,
            (true, _) => f.write_str(&self.message)?,
        }
        if let Some(target) = &self.target {
            write!(f, " (target: {target})")?;
        }
        Ok(())
    }
}

/// One link of the inner error chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnerError {
    /// Diagnostic code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Next, more specific, link.
    #[serde(
        rename = "innererror",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub inner_error: Option<Box<InnerError>>,
}

impl InnerError {
    /// Number of links in the chain starting here.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut current = self;
        while let Some(next) = current.inner_error.as_deref() {
            depth += 1;
            current = next;
        }
        depth
    }

    /// Codes along the chain, skipping links without one.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes = Vec::new();
        let mut current = Some(self);
        while let Some(link) = current {
            if let Some(code) = link.code.as_deref() {
                codes.push(code);
            }
            current = link.inner_error.as_deref();
        }
        codes
    }
}

/// The service rejected the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    /// HTTP status code.
    pub status: u16,
    /// Error envelope, as sent by the service.
    pub response: ErrorResponse,
}

impl RemoteError {
    /// The top-level error detail.
    pub fn detail(&self) -> &ErrorDetail {
        &self.response.error
    }

    /// The top-level error code.
    pub fn code(&self) -> &str {
        &self.response.error.code
    }

    /// Returns true for 404 Not Found.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.response.error)
    }
}

impl std::error::Error for RemoteError {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NESTED: &str = r#"{
        "error": {
            "code": "InvalidPayload",
            "message": "The request payload is invalid.",
            "target": "file",
            "details": [
                {"code": "FirstIssue", "message": "first", "target": "purpose", "details": null},
                {"code": "SecondIssue", "message": "second"},
                {"code": "ThirdIssue", "message": "third", "details": [
                    {"code": "Nested", "message": "nested"}
                ]}
            ],
            "innererror": {
                "code": "ValidationError",
                "innererror": {
                    "code": "InvalidFileFormat",
                    "innererror": {"code": "MissingPromptKey"}
                }
            }
        }
    }"#;

    #[test]
    fn test_nested_error_preserves_order_and_depth() {
        let response: ErrorResponse = serde_json::from_str(NESTED).unwrap();
        let error = &response.error;

        assert_eq!(error.code, "InvalidPayload");
        assert_eq!(error.target.as_deref(), Some("file"));

        let codes: Vec<&str> = error.details.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, vec!["FirstIssue", "SecondIssue", "ThirdIssue"]);
        assert!(error.details[0].details.is_empty());
        assert_eq!(error.details[2].details[0].code, "Nested");

        let inner = error.inner_error.as_deref().unwrap();
        assert_eq!(inner.depth(), 3);
        assert_eq!(
            error.inner_codes(),
            vec!["ValidationError", "InvalidFileFormat", "MissingPromptKey"]
        );
        assert_eq!(error.most_specific_code(), "MissingPromptKey");
    }

    #[test]
    fn test_minimal_error() {
        let json = r#"{"error": {"code": "404", "message": "Resource not found"}}"#;
        let response: ErrorResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.error.code, "404");
        assert_eq!(response.error.target, None);
        assert!(response.error.details.is_empty());
        assert!(response.error.inner_error.is_none());
        assert_eq!(response.error.most_specific_code(), "404");
    }

    #[test]
    fn test_sparse_error_reads_null_and_missing_as_empty() {
        let json = r#"{
            "error": {
                "message": "Invalid file format.",
                "type": "invalid_request_error",
                "param": null,
                "code": null,
                "details": [{"code": "x"}, {"message": null, "target": null}]
            }
        }"#;
        let response: ErrorResponse = serde_json::from_str(json).unwrap();
        let error = &response.error;

        assert_eq!(error.code, "");
        assert_eq!(error.message, "Invalid file format.");
        assert_eq!(error.details[0].code, "x");
        assert_eq!(error.details[0].message, "");
        assert_eq!(error.details[1].code, "");
        assert_eq!(error.details[1].target, None);
        assert_eq!(error.most_specific_code(), "");
        assert_eq!(error.to_string(), "Invalid file format.");
        assert_eq!(error.details[0].to_string(), "x");
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let mut detail = ErrorDetail::new("Outer", "outer");
        detail.inner_error = Some(Box::new(InnerError {
            code: Some("Inner".to_string()),
            inner_error: None,
        }));

        let value = serde_json::to_value(ErrorResponse { error: detail }).unwrap();
        assert_eq!(value["error"]["innererror"]["code"], "Inner");
        assert!(value["error"].get("inner_error").is_none());
        assert!(value["error"].get("details").is_none());
    }

    #[test]
    fn test_unknown_envelope() {
        let response = ErrorResponse::unknown(503);
        assert_eq!(response.error.code, UNKNOWN_ERROR_CODE);
        assert!(response.error.message.contains("503"));
        assert!(response.error.message.contains("Service Unavailable"));

        let odd = ErrorResponse::unknown(599);
        assert!(odd.error.message.contains("599"));
    }

    #[test]
    fn test_remote_error_display() {
        let remote = RemoteError {
            status: 404,
            response: ErrorResponse {
                error: ErrorDetail::new("404", "Resource not found"),
            },
        };

        assert!(remote.is_not_found());
        assert_eq!(remote.code(), "404");
        assert_eq!(remote.to_string(), "HTTP 404: 404: Resource not found");
    }
}
