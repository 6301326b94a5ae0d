//! Object storage access.
//!
//! The handler only ever needs two capabilities from storage: read an
//! object's bytes and write bytes under a key. [`ObjectStore`] is exactly that
//! seam; [`S3Store`] implements it over `aws-sdk-s3`.
//!
//! ## Failure classification
//!
//! SDK failures are folded into three cases the caller can act on:
//!
//! | HTTP status / condition | [`StorageError`] |
//! |---|---|
//! | 404, `NoSuchKey`, `NoSuchBucket` | `NotFound` |
//! | 403 | `AccessDenied` |
//! | anything else (5xx, timeout, dispatch failure, body read) | `Unavailable` |
//!
//! Nothing here retries. The SDK's own default retry policy still applies.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("access denied: {0}")]
    AccessDenied(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Narrow storage capability used by the handler.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Read the full contents of `bucket/key`.
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Write `body` to `bucket/key`, replacing any existing object.
    async fn store(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError>;
}

/// Map an HTTP status (when the service answered at all) to a storage error.
fn classify(status: Option<u16>, message: String) -> StorageError {
    match status {
        Some(404) => StorageError::NotFound(message),
        Some(403) => StorageError::AccessDenied(message),
        _ => StorageError::Unavailable(message),
    }
}

/// [`ObjectStore`] backed by Amazon S3.
#[derive(Clone)]
pub struct S3Store {
    client: Client,
}

impl S3Store {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the ambient AWS configuration (env, profile, or
    /// the Lambda execution role).
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                let status = err.raw_response().map(|r| r.status().as_u16());
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    return StorageError::NotFound(format!("{bucket}/{key}"));
                }
                classify(status, DisplayErrorContext(&service_err).to_string())
            })?;

        let body = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Unavailable(format!("reading {bucket}/{key}: {e}")))?;
        let bytes = body.into_bytes().to_vec();
        debug!(bucket, key, len = bytes.len(), "Fetched object");
        Ok(bytes)
    }

    async fn store(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let len = body.len();
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|err| {
                let status = err.raw_response().map(|r| r.status().as_u16());
                classify(status, DisplayErrorContext(&err).to_string())
            })?;
        debug!(bucket, key, len, content_type, "Stored object");
        Ok(())
    }
}
