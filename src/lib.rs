//! Azure OpenAI Files Client Library
//!
//! Uploads local files for fine-tuning or assistants and deletes them again,
//! against the `/openai/files` endpoint of an Azure OpenAI resource.
//!
//! # Features
//!
//! - **Typed outcomes**: a non-2xx answer is a [`RemoteError`] value carrying
//!   the service's error envelope verbatim, kept apart from local and
//!   transport failures ([`FilesError`])
//! - **Exact wire mapping**: [`Purpose`] tokens and renamed fields
//!   (`object`, `innererror`) match the service byte for byte
//! - **Single attempt**: no retries, no hidden state between calls
//! - **Observability**: `tracing` spans and events, credential redaction
//! - **Testability**: pluggable [`HttpTransport`], recording mock transport
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use integrations_azure_openai_files::{FilesClient, Purpose};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FilesClient::builder()
//!         .endpoint("https://myresource.openai.azure.com")
//!         .api_key("your-api-key")
//!         .build()?;
//!
//!     let file = match client.upload(Purpose::FineTune, "train.jsonl").await? {
//!         Ok(file) => file,
//!         Err(remote) => {
//!             eprintln!("{} ({:?})", remote, remote.detail().inner_codes());
//!             return Ok(());
//!         }
//!     };
//!
//!     if let Err(remote) = client.delete(&file.id).await? {
//!         eprintln!("delete rejected: {}", remote.code());
//!     }
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

#[cfg(any(test, feature = "mocks"))]
pub mod fixtures;
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use auth::{ApiKeyAuth, AuthProvider};
pub use client::{FilesClient, FilesClientBuilder};
pub use config::{FilesConfig, FilesConfigBuilder, DEFAULT_API_VERSION};
pub use errors::{FilesError, FilesResult};
pub use services::{FilesRequestBuilder, FilesService, ResponseClassifier};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};
pub use types::{
    DeleteRequest, ErrorDetail, ErrorResponse, FileRecord, FileStatus, InnerError, Purpose,
    RemoteError, UploadBytesRequest, UploadRequest,
};
