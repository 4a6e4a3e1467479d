use crate::errors::{FilesError, FilesResult};
use crate::types::{DeleteRequest, UploadBytesRequest};

/// Checks requests before anything is read or sent.
pub struct FileRequestValidator;

impl FileRequestValidator {
    /// Largest file the service accepts (512 MiB).
    pub const MAX_FILE_SIZE: u64 = 512 * 1024 * 1024;

    /// Checks in-memory upload content: a file name, non-empty data and the
    /// size limit.
    pub fn validate_upload_bytes(request: &UploadBytesRequest) -> FilesResult<()> {
        if request.filename.trim().is_empty() {
            return Err(FilesError::validation_param(
                "filename cannot be empty",
                "filename",
            ));
        }

        if request.data.is_empty() {
            return Err(FilesError::validation_param("file cannot be empty", "file"));
        }

        Self::validate_size(request.data.len() as u64)
    }

    /// Checks a size against [`Self::MAX_FILE_SIZE`].
    pub fn validate_size(size: u64) -> FilesResult<()> {
        if size > Self::MAX_FILE_SIZE {
            return Err(FilesError::validation_param(
                format!(
                    "file is {} bytes, the limit is {} bytes",
                    size,
                    Self::MAX_FILE_SIZE
                ),
                "file",
            ));
        }
        Ok(())
    }

    pub fn validate_delete(request: &DeleteRequest) -> FilesResult<()> {
        if request.file_id.trim().is_empty() {
            return Err(FilesError::validation_param(
                "file id cannot be empty",
                "file_id",
            ));
        }
        Ok(())
    }
}
