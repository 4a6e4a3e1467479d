//! Configuration module for the Files client.
//!
//! Holds the resource endpoint, the account key and the API version. A
//! configuration is immutable once built and is shared read-only by every
//! call a client makes.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

use crate::errors::{FilesError, FilesResult};

/// Default API version sent as the `api-version` query parameter.
pub const DEFAULT_API_VERSION: &str = "2024-03-01-preview";

/// Default request timeout (60 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Environment variable holding the resource endpoint.
pub const ENV_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
/// Environment variable holding the account key.
pub const ENV_API_KEY: &str = "AZURE_OPENAI_API_KEY";
/// Environment variable overriding the API version.
pub const ENV_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";
/// Environment variable overriding the timeout, in seconds.
pub const ENV_TIMEOUT: &str = "AZURE_OPENAI_TIMEOUT";

/// Connection configuration for the Files client.
#[derive(Clone)]
pub struct FilesConfig {
    /// Resource endpoint, e.g. `https://myresource.openai.azure.com`, without
    /// a trailing slash.
    pub endpoint: String,
    /// Account key (stored securely).
    pub(crate) api_key: SecretString,
    /// API version sent with every request.
    pub api_version: String,
    /// Transport timeout.
    pub timeout: Duration,
    /// User agent reported to the service.
    pub user_agent: String,
}

impl FilesConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> FilesConfigBuilder {
        FilesConfigBuilder::new()
    }

    /// Creates a configuration with the default API version.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> FilesResult<Self> {
        Self::builder().endpoint(endpoint).api_key(api_key).build()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AZURE_OPENAI_ENDPOINT` (required): resource endpoint
    /// - `AZURE_OPENAI_API_KEY` (required): account key
    /// - `AZURE_OPENAI_API_VERSION` (optional): API version
    /// - `AZURE_OPENAI_TIMEOUT` (optional): request timeout in seconds
    pub fn from_env() -> FilesResult<Self> {
        let endpoint = std::env::var(ENV_ENDPOINT).map_err(|_| {
            FilesError::configuration(format!("{} environment variable not set", ENV_ENDPOINT))
        })?;

        let mut builder = FilesConfigBuilder::new()
            .endpoint(endpoint)
            .api_key_from_env(ENV_API_KEY)?;

        if let Ok(api_version) = std::env::var(ENV_API_VERSION) {
            builder = builder.api_version(api_version);
        }

        if let Ok(timeout_str) = std::env::var(ENV_TIMEOUT) {
            match timeout_str.parse::<u64>() {
                Ok(secs) => builder = builder.timeout_secs(secs),
                Err(_) => {
                    tracing::warn!(value = %timeout_str, "Ignoring unparsable {}", ENV_TIMEOUT);
                }
            }
        }

        builder.build()
    }

    /// Returns the account key (exposing the secret).
    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Returns the key hint (last 4 characters) for debugging.
    pub fn api_key_hint(&self) -> String {
        key_hint(self.api_key.expose_secret())
    }
}

impl std::fmt::Debug for FilesConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilesConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Builder for `FilesConfig`.
#[derive(Default)]
pub struct FilesConfigBuilder {
    endpoint: Option<String>,
    api_key: Option<String>,
    api_version: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl FilesConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resource endpoint.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the account key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the account key from an environment variable.
    pub fn api_key_from_env(mut self, var_name: &str) -> FilesResult<Self> {
        let api_key = std::env::var(var_name).map_err(|_| {
            FilesError::configuration(format!("Environment variable {} not set", var_name))
        })?;
        self.api_key = Some(api_key);
        Ok(self)
    }

    /// Sets the API version.
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Sets the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> FilesResult<FilesConfig> {
        let endpoint = self
            .endpoint
            .map(|e| e.trim().trim_end_matches('/').to_string())
            .unwrap_or_default();

        if endpoint.is_empty() {
            return Err(FilesError::configuration("Endpoint is required"));
        }

        let parsed = Url::parse(&endpoint)?;
        if !matches!(parsed.scheme(), "https" | "http") {
            return Err(FilesError::configuration(format!(
                "Endpoint must use http or https, got '{}'",
                parsed.scheme()
            )));
        }
        if parsed.scheme() == "http" {
            tracing::warn!(endpoint = %endpoint, "Endpoint does not use HTTPS");
        }

        let api_key = self
            .api_key
            .ok_or_else(|| FilesError::configuration("API key is required"))?;
        if api_key.is_empty() {
            return Err(FilesError::configuration("API key cannot be empty"));
        }

        let api_version = self
            .api_version
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());
        if api_version.trim().is_empty() {
            return Err(FilesError::configuration("API version cannot be empty"));
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(FilesError::configuration("Timeout must be greater than 0"));
        }

        Ok(FilesConfig {
            endpoint,
            api_key: SecretString::new(api_key),
            api_version,
            timeout,
            user_agent: self.user_agent.unwrap_or_else(default_user_agent),
        })
    }
}

fn default_user_agent() -> String {
    format!("integrations-azure-openai-files/{}", env!("CARGO_PKG_VERSION"))
}

pub(crate) fn key_hint(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 4 {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("...{}", tail)
    } else {
        "****".to_string()
    }
}
