//! Request, resource and error types exchanged with the Files API.

mod error;
mod file;
pub(crate) mod serde_helpers;

pub use error::{ErrorDetail, ErrorResponse, InnerError, RemoteError, UNKNOWN_ERROR_CODE};
pub use file::{
    DeleteRequest, FileRecord, FileStatus, Purpose, UnknownToken, UploadBytesRequest,
    UploadRequest,
};
