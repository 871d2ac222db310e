//! Batch upload orchestration
//!
//! Validates an upload request, resolves one key per file, and drives the
//! storage collaborator sequentially. Per-file failures are recorded as
//! outcomes and never abort the batch; only the pre-checks (missing bucket,
//! invalid option combination) and a failed directory listing are fatal.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::key::KeyResolver;
use crate::traits::{ObjectStore, UploadedObject};

/// Everything one invocation of the uploader needs, resolved up front
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Local file, or directory in recursive mode
    pub source: PathBuf,

    /// Target bucket; empty means "not resolved", rejected before upload
    pub bucket: String,

    /// Filename override; invalid together with `recursive`
    pub filename: Option<String>,

    /// Prefix keys with the current date as YYYY/MM/DD/
    pub date_prefix: bool,

    /// Destination folder prefix
    pub folder: Option<String>,

    /// Upload every file directly inside `source` (one level, no tree walk)
    pub recursive: bool,

    /// In recursive mode, prefix keys with the source directory's name
    pub subfolder: bool,
}

/// Result of one attempted file upload
#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub status: &'static str,
    pub local_path: PathBuf,
    pub bucket: String,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_human: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadOutcome {
    fn uploaded(local: &Path, bucket: &str, object: UploadedObject) -> Self {
        Self {
            status: "uploaded",
            local_path: local.to_path_buf(),
            bucket: bucket.to_string(),
            key: object.key,
            size_bytes: Some(object.size_bytes),
            size_human: Some(object.size_human),
            etag: object.etag,
            error: None,
        }
    }

    fn failed(local: &Path, bucket: &str, key: String, reason: String) -> Self {
        Self {
            status: "failed",
            local_path: local.to_path_buf(),
            bucket: bucket.to_string(),
            key,
            size_bytes: None,
            size_human: None,
            etag: None,
            error: Some(reason),
        }
    }

    /// Whether this file made it to the store
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// All outcomes of one uploader invocation, in upload order
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub outcomes: Vec<UploadOutcome>,
}

impl BatchResult {
    /// Number of files that uploaded successfully
    pub fn uploaded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded()).count()
    }

    /// Number of files that failed
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.uploaded()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }
}

/// Run one upload batch against the given store
///
/// Fail-fast validation happens before any storage call: an empty bucket
/// yields `MissingBucket`, a filename override combined with recursive mode
/// yields `InvalidOptions`. After that, every attempted file appears in the
/// returned batch result, success or failure.
pub async fn run(store: &dyn ObjectStore, request: &UploadRequest) -> Result<BatchResult> {
    if request.bucket.is_empty() {
        return Err(Error::MissingBucket);
    }

    // Captures the batch date once; also rejects filename + recursive.
    let resolver = KeyResolver::new(request)?;

    let files = if request.recursive {
        list_files(&request.source)?
    } else {
        vec![request.source.clone()]
    };

    let mut outcomes = Vec::with_capacity(files.len());
    for file in &files {
        let key = resolver.resolve(file);
        match store.upload_file(file, &request.bucket, &key).await {
            Ok(object) => {
                tracing::debug!(
                    local = %file.display(),
                    bucket = %request.bucket,
                    key = %object.key,
                    "uploaded"
                );
                outcomes.push(UploadOutcome::uploaded(file, &request.bucket, object));
            }
            Err(e) => {
                tracing::warn!(
                    local = %file.display(),
                    bucket = %request.bucket,
                    key = %key,
                    error = %e,
                    "upload failed"
                );
                outcomes.push(UploadOutcome::failed(
                    file,
                    &request.bucket,
                    key,
                    e.to_string(),
                ));
            }
        }
    }

    Ok(BatchResult { outcomes })
}

/// List the regular files directly inside `dir`, sorted by name
///
/// One level only: subdirectories are not traversed and non-files are
/// skipped. Sorting makes upload order (and therefore reporting order)
/// independent of filesystem enumeration order.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}
