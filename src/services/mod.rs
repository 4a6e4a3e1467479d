//! Service implementations for the Azure OpenAI API.

pub mod files;

pub use files::{FilesRequestBuilder, FilesService, ResponseClassifier};
