//! Azure OpenAI Files client.
//!
//! Every call returns `FilesResult<Result<T, RemoteError>>`. The outer error
//! covers local and transport failures. The inner `Err` is a well-formed
//! error answer from the service.

use bytes::Bytes;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::auth::{ApiKeyAuth, AuthProvider};
use crate::config::{FilesConfig, FilesConfigBuilder};
use crate::errors::{FilesError, FilesResult};
use crate::services::{FilesRequestBuilder, FilesService};
use crate::transport::{HttpTransport, HttpTransportImpl};
use crate::types::{
    DeleteRequest, FileRecord, Purpose, RemoteError, UploadBytesRequest, UploadRequest,
};

/// Client for the Azure OpenAI Files API.
///
/// The configuration is fixed at construction. A client can be shared
/// across tasks and used concurrently.
///
/// # Example
///
/// ```rust,no_run
/// use integrations_azure_openai_files::{FilesClient, Purpose};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = FilesClient::builder()
///         .endpoint("https://myresource.openai.azure.com")
///         .api_key("your-api-key")
///         .build()?;
///
///     match client.upload(Purpose::FineTune, "train.jsonl").await? {
///         Ok(file) => println!("uploaded {}", file.id),
///         Err(remote) => eprintln!("rejected: {remote}"),
///     }
///     Ok(())
/// }
/// ```
pub struct FilesClient {
    config: Arc<FilesConfig>,
    files: FilesService,
}

impl FilesClient {
    /// Creates a new client builder.
    pub fn builder() -> FilesClientBuilder {
        FilesClientBuilder::new()
    }

    /// Creates a client from environment variables.
    ///
    /// See [`FilesConfig::from_env`].
    pub fn from_env() -> FilesResult<Self> {
        FilesClientBuilder::from_config(FilesConfig::from_env()?).build()
    }

    /// Creates a client from an existing configuration.
    pub fn new(config: FilesConfig) -> FilesResult<Self> {
        FilesClientBuilder::from_config(config).build()
    }

    /// Uploads a local file.
    #[instrument(skip(self, purpose, file_path), fields(purpose = %purpose))]
    pub async fn upload(
        &self,
        purpose: Purpose,
        file_path: impl Into<PathBuf>,
    ) -> FilesResult<Result<FileRecord, RemoteError>> {
        self.files
            .upload(&UploadRequest::new(purpose, file_path))
            .await
    }

    /// Uploads content held in memory under the given file name.
    #[instrument(skip(self, purpose, filename, data), fields(purpose = %purpose))]
    pub async fn upload_bytes(
        &self,
        purpose: Purpose,
        filename: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> FilesResult<Result<FileRecord, RemoteError>> {
        self.files
            .upload_bytes(&UploadBytesRequest::new(purpose, filename, data))
            .await
    }

    /// Deletes a file. `Ok(Ok(true))` means the service accepted the deletion.
    #[instrument(skip(self, file_id))]
    pub async fn delete(
        &self,
        file_id: impl Into<String>,
    ) -> FilesResult<Result<bool, RemoteError>> {
        self.files.delete(&DeleteRequest::new(file_id)).await
    }

    /// Returns the files service.
    pub fn files(&self) -> &FilesService {
        &self.files
    }

    /// Returns the configuration.
    pub fn config(&self) -> &FilesConfig {
        &self.config
    }
}

impl std::fmt::Debug for FilesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilesClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for the Files client.
#[derive(Default)]
pub struct FilesClientBuilder {
    config_builder: FilesConfigBuilder,
    config: Option<FilesConfig>,
    transport: Option<Arc<dyn HttpTransport>>,
    auth: Option<Arc<dyn AuthProvider>>,
}

impl FilesClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from an existing configuration.
    pub fn from_config(config: FilesConfig) -> Self {
        Self {
            config: Some(config),
            ..Self::default()
        }
    }

    /// Sets the resource endpoint.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.endpoint(endpoint);
        self
    }

    /// Sets the account key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.api_key(api_key);
        self
    }

    /// Sets the account key from an environment variable.
    pub fn api_key_from_env(mut self, var_name: &str) -> FilesResult<Self> {
        self.config_builder = self.config_builder.api_key_from_env(var_name)?;
        Ok(self)
    }

    /// Sets the API version.
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.api_version(api_version);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.user_agent(user_agent);
        self
    }

    /// Sets a custom transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a custom auth provider.
    pub fn auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Builds the client.
    pub fn build(self) -> FilesResult<FilesClient> {
        let config = match self.config {
            Some(config) => config,
            None => self.config_builder.build()?,
        };
        let config = Arc::new(config);

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransportImpl::from_config(&config).map_err(|e| {
                FilesError::configuration(format!("Failed to create HTTP client: {e}"))
            })?),
        };

        let auth: Arc<dyn AuthProvider> = match self.auth {
            Some(a) => a,
            None => Arc::new(ApiKeyAuth::from_string(config.api_key())),
        };
        auth.validate()?;

        let builder = FilesRequestBuilder::new(Arc::clone(&config), auth);
        let files = FilesService::new(transport, builder);

        tracing::debug!(
            endpoint = %config.endpoint,
            api_version = %config.api_version,
            "Files client created"
        );

        Ok(FilesClient { config, files })
    }
}
