//! ObjectStore trait definition
//!
//! The single storage operation bucketit needs, kept behind a trait so the
//! core stays independent of the S3 SDK and the orchestrator can be tested
//! against a mock.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Metadata returned for a successfully uploaded object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedObject {
    /// Object key
    pub key: String,

    /// Size in bytes
    pub size_bytes: i64,

    /// Human-readable size
    pub size_human: String,

    /// ETag reported by the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

impl UploadedObject {
    /// Create an UploadedObject for a key and size
    pub fn new(key: impl Into<String>, size: i64) -> Self {
        Self {
            key: key.into(),
            size_bytes: size,
            size_human: humansize::format_size(size.max(0) as u64, humansize::BINARY),
            etag: None,
        }
    }
}

/// Trait for the upload primitive of an S3-compatible store
///
/// Implemented by the S3 adapter; mocked in orchestrator tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Transfer the file at `local` to `bucket` under `key`
    ///
    /// Blocking from the batch's point of view: one file completes (or
    /// fails) before the next starts.
    async fn upload_file(&self, local: &Path, bucket: &str, key: &str) -> Result<UploadedObject>;
}
