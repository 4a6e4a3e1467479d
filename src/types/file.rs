//! File resource and request types.

use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Intended use of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Purpose {
    /// Data for assistants.
    Assistants,
    /// Files produced by assistants.
    AssistantsOutput,
    /// Fine-tuning training or validation data.
    FineTune,
    /// Results of a fine-tuning job.
    FineTuneResults,
}

/// Wire token of every purpose. Two of the four use hyphens, so this is not
/// a case conversion of the variant names.
const PURPOSE_WIRE: [(Purpose, &str); 4] = [
    (Purpose::Assistants, "assistants"),
    (Purpose::AssistantsOutput, "assistants_output"),
    (Purpose::FineTune, "fine-tune"),
    (Purpose::FineTuneResults, "fine-tune-results"),
];

impl Purpose {
    /// All purposes, in declaration order.
    pub const ALL: [Purpose; 4] = [
        Purpose::Assistants,
        Purpose::AssistantsOutput,
        Purpose::FineTune,
        Purpose::FineTuneResults,
    ];

    /// Returns the wire token sent in the `purpose` form field.
    pub fn as_str(&self) -> &'static str {
        PURPOSE_WIRE
            .iter()
            .find(|(purpose, _)| purpose == self)
            .map_or("", |(_, wire)| *wire)
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a token is not a known wire string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{token}'")]
pub struct UnknownToken {
    kind: &'static str,
    token: String,
}

impl UnknownToken {
    /// The rejected token.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl FromStr for Purpose {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PURPOSE_WIRE
            .iter()
            .find(|(_, wire)| *wire == s)
            .map(|(purpose, _)| *purpose)
            .ok_or_else(|| UnknownToken {
                kind: "purpose",
                token: s.to_string(),
            })
    }
}

impl Serialize for Purpose {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Purpose {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}

/// Processing state of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// Received, not yet processed.
    Uploaded,
    /// Waiting for processing.
    Pending,
    /// Being processed.
    Running,
    /// Ready for use.
    Processed,
    /// Processing failed; see `status_details`.
    Error,
    /// Deletion in progress.
    Deleting,
    /// Deleted.
    Deleted,
}

impl FileStatus {
    /// Returns the wire token.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Uploaded => "uploaded",
            FileStatus::Pending => "pending",
            FileStatus::Running => "running",
            FileStatus::Processed => "processed",
            FileStatus::Error => "error",
            FileStatus::Deleting => "deleting",
            FileStatus::Deleted => "deleted",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileStatus {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uploaded" => Ok(FileStatus::Uploaded),
            "pending" => Ok(FileStatus::Pending),
            "running" => Ok(FileStatus::Running),
            "processed" => Ok(FileStatus::Processed),
            "error" => Ok(FileStatus::Error),
            "deleting" => Ok(FileStatus::Deleting),
            "deleted" => Ok(FileStatus::Deleted),
            _ => Err(UnknownToken {
                kind: "file status",
                token: s.to_string(),
            }),
        }
    }
}

/// A file resource as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// File identifier.
    pub id: String,
    /// Original file name.
    pub filename: String,
    /// Size in bytes.
    pub bytes: Option<u64>,
    /// Creation time, seconds since the Unix epoch.
    pub created_at: i64,
    /// Purpose wire string, echoed as sent.
    pub purpose: String,
    /// Lifecycle state, e.g. `uploaded` or `processed`.
    pub status: String,
    /// Failure explanation when processing did not succeed, as sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_details: Option<String>,
    /// Resource type discriminator, usually `file`.
    #[serde(rename = "object")]
    pub object_type: String,
}

impl FileRecord {
    /// Parses the echoed purpose.
    pub fn purpose_kind(&self) -> Result<Purpose, UnknownToken> {
        self.purpose.parse()
    }

    /// Parses the lifecycle state.
    pub fn status_kind(&self) -> Result<FileStatus, UnknownToken> {
        self.status.parse()
    }
}

/// Upload a local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Intended use of the file.
    pub purpose: Purpose,
    /// Local path to the file content.
    pub file_path: PathBuf,
}

impl UploadRequest {
    /// Creates an upload request.
    pub fn new(purpose: Purpose, file_path: impl Into<PathBuf>) -> Self {
        Self {
            purpose,
            file_path: file_path.into(),
        }
    }
}

/// Upload content already held in memory.
#[derive(Debug, Clone)]
pub struct UploadBytesRequest {
    /// Intended use of the file.
    pub purpose: Purpose,
    /// File name reported to the service.
    pub filename: String,
    /// File content.
    pub data: Bytes,
}

impl UploadBytesRequest {
    /// Creates an in-memory upload request.
    pub fn new(purpose: Purpose, filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            purpose,
            filename: filename.into(),
            data: data.into(),
        }
    }
}

/// Delete a previously uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    /// File identifier.
    pub file_id: String,
}

impl DeleteRequest {
    /// Creates a delete request.
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
        }
    }
}
