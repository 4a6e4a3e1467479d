//! Turns a raw status and body into a typed outcome.
//!
//! A non-2xx status is a regular outcome carried in the inner `Err`; only a
//! body that does not fit the expected shape becomes a [`FilesError`].

use serde::de::DeserializeOwned;

use crate::errors::{FilesError, FilesResult};
use crate::types::{ErrorResponse, FileRecord, RemoteError};

/// Stateless classifier for Files API responses.
pub struct ResponseClassifier;

impl ResponseClassifier {
    /// Classifies an upload response.
    ///
    /// A 2xx body must be a file record. Anything else must be an error
    /// envelope, or empty.
    pub fn classify_upload(status: u16, body: &[u8]) -> FilesResult<Result<FileRecord, RemoteError>> {
        if is_success(status) {
            Self::parse(status, body).map(Ok)
        } else {
            Self::remote_error(status, body).map(Err)
        }
    }

    /// Classifies a delete response. A 2xx status is `true`; its body is
    /// never read.
    pub fn classify_delete(status: u16, body: &[u8]) -> FilesResult<Result<bool, RemoteError>> {
        if is_success(status) {
            Ok(Ok(true))
        } else {
            Self::remote_error(status, body).map(Err)
        }
    }

    /// Reads the error envelope of a non-2xx response.
    ///
    /// An empty or whitespace-only body yields a synthesized envelope with
    /// code [`UNKNOWN_ERROR_CODE`](crate::types::UNKNOWN_ERROR_CODE).
    pub fn remote_error(status: u16, body: &[u8]) -> FilesResult<RemoteError> {
        let response = if body.iter().all(u8::is_ascii_whitespace) {
            ErrorResponse::unknown(status)
        } else {
            Self::parse(status, body)?
        };

        Ok(RemoteError { status, response })
    }

    fn parse<T: DeserializeOwned>(status: u16, body: &[u8]) -> FilesResult<T> {
        serde_json::from_slice(body).map_err(|e| FilesError::deserialization(status, &e, body))
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}
