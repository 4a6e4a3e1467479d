//! HTTP transport implementation.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, ClientBuilder};
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::instrument;

use super::TransportError;
use crate::config::FilesConfig;
use crate::observability::redact_headers;

/// Response headers that carry the service-side request identifier.
const REQUEST_ID_HEADERS: [&str; 2] = ["apim-request-id", "x-request-id"];

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// POST request.
    Post,
    /// DELETE request.
    Delete,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A part of a multipart form.
#[derive(Debug, Clone)]
pub enum MultipartPart {
    /// Text field.
    Text {
        /// Field name.
        name: String,
        /// Field value.
        value: String,
    },
    /// File field.
    File {
        /// Field name.
        name: String,
        /// File name.
        filename: String,
        /// Content type.
        content_type: String,
        /// File data.
        data: Bytes,
    },
}

impl MultipartPart {
    /// Returns the form field name.
    pub fn name(&self) -> &str {
        match self {
            MultipartPart::Text { name, .. } | MultipartPart::File { name, .. } => name,
        }
    }
}

/// Request body.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// `multipart/form-data` body.
    Multipart(Vec<MultipartPart>),
}

impl RequestBody {
    /// Returns the multipart parts, empty for a bodiless request.
    pub fn parts(&self) -> &[MultipartPart] {
        match self {
            RequestBody::Empty => &[],
            RequestBody::Multipart(parts) => parts,
        }
    }
}

/// Transport-ready HTTP request description.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request path relative to the endpoint, already percent-encoded.
    pub path: String,
    /// Query parameters, in order.
    pub query: Vec<(String, String)>,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: RequestBody,
}

impl HttpRequest {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HashMap::new(),
            body: RequestBody::Empty,
        }
    }

    /// Creates a new POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Creates a new DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Appends a query parameter.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Sets a multipart body.
    pub fn with_multipart(mut self, parts: Vec<MultipartPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    /// Looks up a header value, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Looks up the first query parameter with the given name.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP response representation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Bytes,
}

impl HttpResponse {
    /// Creates a response without headers.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Looks up a header value, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Returns the service request id, if the response carries one.
    pub fn request_id(&self) -> Option<&str> {
        REQUEST_ID_HEADERS.iter().find_map(|name| self.header(name))
    }
}

fn find_header<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// HTTP transport trait.
///
/// Executes exactly one round trip per call; retries are not performed here.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send an HTTP request and return status, headers and raw body.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// HTTP transport implementation using reqwest.
pub struct HttpTransportImpl {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransportImpl {
    /// Creates a new HTTP transport.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, TransportError> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Creates a transport for the configured endpoint.
    pub fn from_config(config: &FilesConfig) -> Result<Self, TransportError> {
        Self::new(&config.endpoint, config.timeout, &config.user_agent)
    }

    /// Builds the full URL for a path.
    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn build_form(parts: Vec<MultipartPart>) -> Result<reqwest::multipart::Form, TransportError> {
        let mut form = reqwest::multipart::Form::new();

        for part in parts {
            form = match part {
                MultipartPart::Text { name, value } => form.text(name, value),
                MultipartPart::File {
                    name,
                    filename,
                    content_type,
                    data,
                } => {
                    let length = data.len() as u64;
                    let part = reqwest::multipart::Part::stream_with_length(data, length)
                        .file_name(filename)
                        .mime_str(&content_type)?;
                    form.part(name, part)
                }
            };
        }

        Ok(form)
    }

    fn map_send_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                timeout: self.timeout,
            }
        } else {
            err.into()
        }
    }
}

#[async_trait]
impl HttpTransport for HttpTransportImpl {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self.build_url(&request.path);

        tracing::debug!(
            url = %url,
            headers = ?redact_headers(&request.headers),
            parts = request.body.parts().len(),
            "Outgoing request"
        );

        let mut req_builder = match request.method {
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        // Add headers
        for (name, value) in &request.headers {
            req_builder = req_builder.header(name.as_str(), value.as_str());
        }

        if let RequestBody::Multipart(parts) = request.body {
            req_builder = req_builder.multipart(Self::build_form(parts)?);
        }

        let started = Instant::now();
        let response = req_builder
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_send_error(e))?;

        tracing::debug!(
            status,
            duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            body_len = body.len(),
            "Incoming response"
        );

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl fmt::Debug for HttpTransportImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransportImpl")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let transport = HttpTransportImpl::new(
            "https://myresource.openai.azure.com/",
            Duration::from_secs(5),
            "test-agent",
        )
        .unwrap();

        assert_eq!(
            transport.build_url("/openai/files"),
            "https://myresource.openai.azure.com/openai/files"
        );
        assert_eq!(
            transport.build_url("openai/files/file-abc"),
            "https://myresource.openai.azure.com/openai/files/file-abc"
        );
    }

    #[test]
    fn test_request_lookup_helpers() {
        let mut request = HttpRequest::delete("/openai/files/file-abc")
            .with_query("api-version", "2024-03-01-preview");
        request
            .headers
            .insert("Api-Key".to_string(), "secret".to_string());

        assert_eq!(request.header("api-key"), Some("secret"));
        assert_eq!(request.query_param("api-version"), Some("2024-03-01-preview"));
        assert_eq!(request.query_param("missing"), None);
        assert!(request.body.parts().is_empty());
    }

    #[test]
    fn test_response_request_id() {
        let mut response = HttpResponse::new(404, Bytes::new());
        assert_eq!(response.request_id(), None);

        response
            .headers
            .insert("Apim-Request-Id".to_string(), "req-123".to_string());
        assert_eq!(response.request_id(), Some("req-123"));
    }

    #[test]
    fn test_multipart_part_name() {
        let text = MultipartPart::Text {
            name: "purpose".to_string(),
            value: "fine-tune".to_string(),
        };
        let file = MultipartPart::File {
            name: "file".to_string(),
            filename: "train.jsonl".to_string(),
            content_type: "application/octet-stream".to_string(),
            data: Bytes::from_static(b"{}"),
        };
        assert_eq!(text.name(), "purpose");
        assert_eq!(file.name(), "file");
    }
}
