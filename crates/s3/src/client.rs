//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from bucketit-core.
//! This is the only crate that talks to the SDK.

use std::path::Path;

use async_trait::async_trait;

use bucketit_core::{Config, Error, ObjectStore, Result, UploadedObject};

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a new S3 client from the bucketit configuration
    pub async fn new(config: &Config) -> Result<Self> {
        let credentials = aws_credential_types::Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None, // session token
            None, // expiry
            "bucketit-static-credentials",
        );

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(config.region.clone()))
            .endpoint_url(&config.endpoint_url)
            .load()
            .await;

        // Path-style addressing for MinIO, RustFS and friends
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

/// Classify an SDK error string onto the core taxonomy
fn classify_error(err: String, context: &str) -> Error {
    if err.contains("NoSuchBucket") || err.contains("NotFound") {
        Error::NotFound(context.to_string())
    } else if err.contains("AccessDenied")
        || err.contains("InvalidAccessKeyId")
        || err.contains("SignatureDoesNotMatch")
    {
        Error::Auth(err)
    } else {
        Error::Network(err)
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn upload_file(&self, local: &Path, bucket: &str, key: &str) -> Result<UploadedObject> {
        let size = tokio::fs::metadata(local)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => Error::NotFound(local.display().to_string()),
                _ => Error::Io(e),
            })?
            .len() as i64;

        let body = aws_sdk_s3::primitives::ByteStream::from_path(local)
            .await
            .map_err(|e| Error::General(format!("Failed to read {}: {e}", local.display())))?;

        let mut request = self
            .inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body);

        if let Some(mime) = mime_guess::from_path(local).first() {
            request = request.content_type(mime.essence_str());
        }

        let response = request.send().await.map_err(|e| {
            classify_error(
                aws_sdk_s3::error::DisplayErrorContext(&e).to_string(),
                &format!("Bucket not found: {bucket}"),
            )
        })?;

        tracing::debug!(bucket, key, size, "put_object complete");

        let mut object = UploadedObject::new(key, size);
        if let Some(etag) = response.e_tag() {
            object.etag = Some(etag.trim_matches('"').to_string());
        }

        Ok(object)
    }
}
