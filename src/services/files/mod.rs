//! Files API: upload and delete.

mod request_builder;
mod response_classifier;
mod service;
mod validation;

pub use request_builder::{FilesRequestBuilder, API_VERSION_PARAM, FILES_PATH};
pub use response_classifier::ResponseClassifier;
pub use service::FilesService;

/// Largest file the service accepts, in bytes.
pub const MAX_FILE_SIZE: u64 = validation::FileRequestValidator::MAX_FILE_SIZE;
