//! Files service.

use std::sync::Arc;
use tracing::instrument;

use super::request_builder::FilesRequestBuilder;
use super::response_classifier::ResponseClassifier;
use crate::errors::FilesResult;
use crate::observability::{log_remote_error, log_response};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::types::{
    DeleteRequest, FileRecord, RemoteError, UploadBytesRequest, UploadRequest,
};

/// Files service: build, send once, classify.
pub struct FilesService {
    transport: Arc<dyn HttpTransport>,
    builder: FilesRequestBuilder,
}

impl FilesService {
    /// Creates a new files service.
    pub fn new(transport: Arc<dyn HttpTransport>, builder: FilesRequestBuilder) -> Self {
        Self { transport, builder }
    }

    /// Uploads a file from disk.
    #[instrument(skip(self, request), fields(purpose = %request.purpose, path = %request.file_path.display()))]
    pub async fn upload(
        &self,
        request: &UploadRequest,
    ) -> FilesResult<Result<FileRecord, RemoteError>> {
        let http_request = self.builder.upload(request).await?;
        let response = self.execute(http_request).await?;
        let outcome = ResponseClassifier::classify_upload(response.status, &response.body)?;
        report("upload", &response, &outcome);
        Ok(outcome)
    }

    /// Uploads in-memory content.
    #[instrument(skip(self, request), fields(purpose = %request.purpose, filename = %request.filename, size = request.data.len()))]
    pub async fn upload_bytes(
        &self,
        request: &UploadBytesRequest,
    ) -> FilesResult<Result<FileRecord, RemoteError>> {
        let http_request = self.builder.upload_bytes(request)?;
        let response = self.execute(http_request).await?;
        let outcome = ResponseClassifier::classify_upload(response.status, &response.body)?;
        report("upload", &response, &outcome);
        Ok(outcome)
    }

    /// Deletes a file by id.
    #[instrument(skip(self, request), fields(file_id = %request.file_id))]
    pub async fn delete(&self, request: &DeleteRequest) -> FilesResult<Result<bool, RemoteError>> {
        let http_request = self.builder.delete(request)?;
        let response = self.execute(http_request).await?;
        let outcome = ResponseClassifier::classify_delete(response.status, &response.body)?;
        report("delete", &response, &outcome);
        Ok(outcome)
    }

    async fn execute(&self, request: HttpRequest) -> FilesResult<HttpResponse> {
        let response = self.transport.send(request).await.map_err(|e| {
            tracing::error!(error = %e, "Transport failure");
            e
        })?;
        log_response(&response);
        Ok(response)
    }
}

fn report<T>(operation: &str, response: &HttpResponse, outcome: &Result<T, RemoteError>) {
    if let Err(remote) = outcome {
        log_remote_error(operation, remote, response.request_id());
    }
}

impl std::fmt::Debug for FilesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilesService")
            .field("builder", &self.builder)
            .finish_non_exhaustive()
    }
}
