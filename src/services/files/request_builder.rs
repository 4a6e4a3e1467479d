//! Maps file operations onto transport-ready HTTP requests.

use bytes::Bytes;
use std::path::Path;
use std::sync::Arc;

use super::validation::FileRequestValidator;
use crate::auth::AuthProvider;
use crate::config::FilesConfig;
use crate::errors::{FilesError, FilesResult};
use crate::transport::{HttpRequest, MultipartPart};
use crate::types::{DeleteRequest, Purpose, UploadBytesRequest, UploadRequest};

/// Collection path of the Files API.
pub const FILES_PATH: &str = "/openai/files";
/// Query parameter carrying the API version.
pub const API_VERSION_PARAM: &str = "api-version";

const FILE_FIELD: &str = "file";
const PURPOSE_FIELD: &str = "purpose";

/// Builds upload and delete requests from the shared configuration.
///
/// Holds no per-call state; the only I/O it performs is reading the upload
/// source.
#[derive(Clone)]
pub struct FilesRequestBuilder {
    config: Arc<FilesConfig>,
    auth: Arc<dyn AuthProvider>,
}

impl FilesRequestBuilder {
    /// Creates a request builder.
    pub fn new(config: Arc<FilesConfig>, auth: Arc<dyn AuthProvider>) -> Self {
        Self { config, auth }
    }

    /// Builds `POST /openai/files` for a file on disk.
    ///
    /// The file must exist, be a regular file and fit the service size
    /// limit. An empty file is sent as is. The form file name is the last
    /// component of the path.
    pub async fn upload(&self, request: &UploadRequest) -> FilesResult<HttpRequest> {
        let (filename, data) = read_upload_source(&request.file_path).await?;
        Ok(self.multipart(request.purpose, filename, data))
    }

    /// Builds `POST /openai/files` for in-memory content.
    ///
    /// Rejects an empty file name or empty content.
    pub fn upload_bytes(&self, request: &UploadBytesRequest) -> FilesResult<HttpRequest> {
        FileRequestValidator::validate_upload_bytes(request)?;
        Ok(self.multipart(
            request.purpose,
            request.filename.clone(),
            request.data.clone(),
        ))
    }

    /// Builds `DELETE /openai/files/{file_id}` with an empty body.
    ///
    /// The id is percent-encoded as one path segment. Every byte outside
    /// `A-Z a-z 0-9 - . _ ~` is escaped, including characters a path would
    /// allow such as `:` and `@`. Service ids (`file-…`) pass unchanged.
    pub fn delete(&self, request: &DeleteRequest) -> FilesResult<HttpRequest> {
        FileRequestValidator::validate_delete(request)?;

        let path = format!("{}/{}", FILES_PATH, urlencoding::encode(&request.file_id));
        Ok(self.authorize(HttpRequest::delete(path)))
    }

    fn multipart(&self, purpose: Purpose, filename: String, data: Bytes) -> HttpRequest {
        let parts = vec![
            MultipartPart::File {
                name: FILE_FIELD.to_string(),
                filename,
                content_type: mime::APPLICATION_OCTET_STREAM.to_string(),
                data,
            },
            MultipartPart::Text {
                name: PURPOSE_FIELD.to_string(),
                value: purpose.as_str().to_string(),
            },
        ];

        self.authorize(HttpRequest::post(FILES_PATH))
            .with_multipart(parts)
    }

    /// Adds the API version and the credential header.
    fn authorize(&self, request: HttpRequest) -> HttpRequest {
        let mut request = request.with_query(API_VERSION_PARAM, &self.config.api_version);
        self.auth.apply_auth(&mut request.headers);
        request
    }
}

impl std::fmt::Debug for FilesRequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilesRequestBuilder")
            .field("endpoint", &self.config.endpoint)
            .field("api_version", &self.config.api_version)
            .finish_non_exhaustive()
    }
}

async fn read_upload_source(path: &Path) -> FilesResult<(String, Bytes)> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| FilesError::local_file(path, e.to_string()))?;

    if !metadata.is_file() {
        return Err(FilesError::local_file(path, "not a regular file"));
    }
    FileRequestValidator::validate_size(metadata.len())?;

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| FilesError::local_file(path, "path has no file name"))?;

    let data = tokio::fs::read(path)
        .await
        .map_err(|e| FilesError::local_file(path, e.to_string()))?;

    Ok((filename, Bytes::from(data)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ApiKeyAuth;
    use crate::transport::{HttpMethod, RequestBody};
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use test_case::test_case;

    const KEY: &str = "0123456789abcdef";

    fn builder() -> FilesRequestBuilder {
        let config = FilesConfig::builder()
            .endpoint("https://myresource.openai.azure.com/")
            .api_key(KEY)
            .api_version("2024-03-01-preview")
            .build()
            .unwrap();
        FilesRequestBuilder::new(Arc::new(config), Arc::new(ApiKeyAuth::from_string(KEY)))
    }

    fn text_part<'a>(request: &'a HttpRequest, field: &str) -> Option<&'a str> {
        request.body.parts().iter().find_map(|part| match part {
            MultipartPart::Text { name, value } if name == field => Some(value.as_str()),
            _ => None,
        })
    }

    #[test_case(Purpose::Assistants, "assistants")]
    #[test_case(Purpose::AssistantsOutput, "assistants_output")]
    #[test_case(Purpose::FineTune, "fine-tune")]
    #[test_case(Purpose::FineTuneResults, "fine-tune-results")]
    fn test_upload_bytes_purpose_field(purpose: Purpose, wire: &str) {
        let request = builder()
            .upload_bytes(&UploadBytesRequest::new(purpose, "data.jsonl", "{}"))
            .unwrap();
        assert_eq!(text_part(&request, "purpose"), Some(wire));
    }

    #[test]
    fn test_upload_bytes_request_shape() {
        let request = builder()
            .upload_bytes(&UploadBytesRequest::new(
                Purpose::FineTune,
                "train.jsonl",
                "{\"prompt\": \"a\"}",
            ))
            .unwrap();

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path, "/openai/files");
        assert_eq!(request.query_param("api-version"), Some("2024-03-01-preview"));
        assert_eq!(request.header("Api-Key"), Some(KEY));

        let parts = request.body.parts();
        let names: Vec<&str> = parts.iter().map(MultipartPart::name).collect();
        assert_eq!(names, vec!["file", "purpose"]);

        match &parts[0] {
            MultipartPart::File {
                filename,
                content_type,
                data,
                ..
            } => {
                assert_eq!(filename, "train.jsonl");
                assert_eq!(content_type, "application/octet-stream");
                assert_eq!(data.as_ref(), b"{\"prompt\": \"a\"}");
            }
            other => panic!("Expected file part, got {other:?}"),
        }
    }

    #[test]
    fn test_upload_body_never_carries_credentials() {
        let request = builder()
            .upload_bytes(&UploadBytesRequest::new(Purpose::Assistants, "a.txt", "x"))
            .unwrap();

        for part in request.body.parts() {
            assert_ne!(part.name(), "api-version");
            assert_ne!(part.name(), "Api-Key");
            if let MultipartPart::Text { value, .. } = part {
                assert!(!value.contains(KEY));
            }
        }
    }

    #[test]
    fn test_delete_request_shape() {
        let request = builder().delete(&DeleteRequest::new("file-abc123")).unwrap();

        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.path, "/openai/files/file-abc123");
        assert_eq!(request.query_param("api-version"), Some("2024-03-01-preview"));
        assert_eq!(request.header("Api-Key"), Some(KEY));
        assert!(matches!(request.body, RequestBody::Empty));
    }

    #[test]
    fn test_delete_encodes_path_segment() {
        let request = builder().delete(&DeleteRequest::new("a/b c?d")).unwrap();
        assert_eq!(request.path, "/openai/files/a%2Fb%20c%3Fd");
    }

    #[test]
    fn test_delete_empty_id_rejected() {
        let err = builder().delete(&DeleteRequest::new("")).unwrap_err();
        assert!(err.is_local());
    }

    #[tokio::test]
    async fn test_upload_reads_file() {
        let mut file = tempfile::Builder::new().suffix(".jsonl").tempfile().unwrap();
        file.write_all(b"{\"messages\": []}\n").unwrap();

        let request = builder()
            .upload(&UploadRequest::new(Purpose::FineTune, file.path()))
            .await
            .unwrap();

        let expected_name = file.path().file_name().unwrap().to_string_lossy().into_owned();
        match &request.body.parts()[0] {
            MultipartPart::File { filename, data, .. } => {
                assert_eq!(filename, &expected_name);
                assert_eq!(data.as_ref(), b"{\"messages\": []}\n");
            }
            other => panic!("Expected file part, got {other:?}"),
        }
        assert_eq!(text_part(&request, "purpose"), Some("fine-tune"));
    }

    #[tokio::test]
    async fn test_upload_empty_file_is_sent() {
        let file = tempfile::Builder::new().suffix(".jsonl").tempfile().unwrap();

        let request = builder()
            .upload(&UploadRequest::new(Purpose::FineTune, file.path()))
            .await
            .unwrap();

        assert_eq!(request.method, HttpMethod::Post);
        match &request.body.parts()[0] {
            MultipartPart::File { data, .. } => assert!(data.is_empty()),
            other => panic!("Expected file part, got {other:?}"),
        }
        assert_eq!(text_part(&request, "purpose"), Some("fine-tune"));
    }

    #[test]
    fn test_upload_bytes_empty_content_rejected() {
        let err = builder()
            .upload_bytes(&UploadBytesRequest::new(Purpose::FineTune, "a.jsonl", ""))
            .unwrap_err();
        assert!(matches!(err, FilesError::Validation { .. }));
    }

    #[test]
    fn test_delete_escapes_reserved_path_characters() {
        let request = builder().delete(&DeleteRequest::new("file:1@x")).unwrap();
        assert_eq!(request.path, "/openai/files/file%3A1%40x");
    }

    #[tokio::test]
    async fn test_upload_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.jsonl");

        let err = builder()
            .upload(&UploadRequest::new(Purpose::Assistants, &missing))
            .await
            .unwrap_err();

        match err {
            FilesError::LocalFile { path, .. } => assert_eq!(path, missing),
            other => panic!("Expected LocalFile error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_upload_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();

        let err = builder()
            .upload(&UploadRequest::new(Purpose::Assistants, dir.path()))
            .await
            .unwrap_err();

        assert!(matches!(err, FilesError::LocalFile { .. }));
    }
}
