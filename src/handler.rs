//! The resize handler: one notification in, one thumbnail out.
//!
//! ## Steps
//!
//! ```text
//! event ─► locator ─► fetch ─► decode ─► resize 128×128 ─► encode JPEG ─► store
//!                     (source bucket)                                     (OUTPUT_BUCKET, same key)
//! ```
//!
//! Each step runs only after the previous one succeeded. The first failure
//! is logged with the locator and returned; the Lambda runtime reports it as
//! an invocation error. Nothing is retried, and a failed invocation never
//! writes to the destination bucket because the upload is the last step.
//!
//! ## Batched notifications
//!
//! Only the first record of an event is processed. Additional records are
//! skipped with a warning carrying their count.

use crate::config::HandlerConfig;
use crate::event::{EventError, Locator, S3Event};
use crate::imaging::{CodecError, ImageCodec, JPEG_CONTENT_TYPE, ThumbnailConfig, make_thumbnail};
use crate::storage::{ObjectStore, StorageError};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

/// Body returned to the runtime when an image was processed.
pub const SUCCESS_MESSAGE: &str = "Image processed successfully!";

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Malformed event: {0}")]
    MalformedEvent(#[from] EventError),
    #[error("Failed to read {bucket}/{key}: {source}")]
    StorageRead {
        bucket: String,
        key: String,
        source: StorageError,
    },
    #[error("Source is not a decodable image: {0}")]
    Decode(#[source] CodecError),
    #[error("Thumbnail encoding failed: {0}")]
    Encode(#[source] CodecError),
    #[error("Failed to write {bucket}/{key}: {source}")]
    StorageWrite {
        bucket: String,
        key: String,
        source: StorageError,
    },
}

impl From<CodecError> for HandlerError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Decode(_) | CodecError::Io(_) => HandlerError::Decode(err),
            CodecError::Encode(_) => HandlerError::Encode(err),
        }
    }
}

/// Result handed back to the runtime, serialized as
/// `{"statusCode": 200, "body": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResult {
    pub status_code: u16,
    pub body: String,
}

impl InvocationResult {
    pub fn success() -> Self {
        Self {
            status_code: 200,
            body: SUCCESS_MESSAGE.to_string(),
        }
    }
}

/// Stateless between invocations: holds only the startup configuration and
/// the two capabilities it drives.
pub struct ImageResizeHandler<S, C> {
    config: HandlerConfig,
    thumbnail: ThumbnailConfig,
    store: S,
    codec: C,
}

impl<S: ObjectStore, C: ImageCodec> ImageResizeHandler<S, C> {
    pub fn new(config: HandlerConfig, store: S, codec: C) -> Self {
        Self {
            config,
            thumbnail: ThumbnailConfig::default(),
            store,
            codec,
        }
    }

    /// Process the first record of `event`.
    pub async fn handle(&self, event: &S3Event) -> Result<InvocationResult, HandlerError> {
        let locator = event.first_locator().inspect_err(|err| {
            error!(error = %err, records = event.records.len(), "Rejecting malformed event");
        })?;

        let ignored = event.ignored_records();
        if ignored > 0 {
            warn!(
                ignored,
                processed = %locator,
                "Event carries more than one record; only the first is processed"
            );
        }

        match self.process(&locator).await {
            Ok(()) => Ok(InvocationResult::success()),
            Err(err) => {
                error!(
                    bucket = %locator.bucket,
                    key = %locator.key,
                    error = %err,
                    "Image processing failed"
                );
                Err(err)
            }
        }
    }

    async fn process(&self, source: &Locator) -> Result<(), HandlerError> {
        info!(bucket = %source.bucket, key = %source.key, "Fetching source object");
        let raw = self
            .store
            .fetch(&source.bucket, &source.key)
            .await
            .map_err(|err| HandlerError::StorageRead {
                bucket: source.bucket.clone(),
                key: source.key.clone(),
                source: err,
            })?;

        let thumbnail = make_thumbnail(&self.codec, &raw, &self.thumbnail)?;
        drop(raw);
        info!(
            key = %source.key,
            source_dimensions = %thumbnail.source_dimensions,
            dimensions = %thumbnail.dimensions,
            len = thumbnail.data.len(),
            "Thumbnail created"
        );

        let destination = &self.config.output_bucket;
        self.store
            .store(destination, &source.key, thumbnail.data, JPEG_CONTENT_TYPE)
            .await
            .map_err(|err| HandlerError::StorageWrite {
                bucket: destination.clone(),
                key: source.key.clone(),
                source: err,
            })?;
        info!(bucket = %destination, key = %source.key, "Thumbnail uploaded");

        Ok(())
    }
}
