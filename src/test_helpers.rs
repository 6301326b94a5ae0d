//! Shared test utilities for the s3-thumbnailer test suite.
//!
//! Provides synthetic image fixtures, notification event builders, and an
//! in-memory [`ObjectStore`] that records every write.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let store = MemoryStore::new();
//! store.insert("in-bucket", "photos/a.png", encode_test_image(400, 200, ImageFormat::Png));
//!
//! let event = s3_event(&[("in-bucket", "photos/a.png")]);
//! // ... run the handler ...
//! let written = store.written("out-bucket", "photos/a.png");
//! assert_eq!(written.content_type, "image/jpeg");
//! ```

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, RgbImage};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;

use crate::event::S3Event;
use crate::storage::{ObjectStore, StorageError};

// =========================================================================
// Image fixtures
// =========================================================================

/// An RGB gradient, so resampling has real content to work on.
pub fn gradient_rgb(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Encode a gradient image of the given size in `format`.
pub fn encode_test_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let rgb = DynamicImage::ImageRgb8(gradient_rgb(width, height));
    // The GIF encoder wants RGBA frames.
    let image = match format {
        ImageFormat::Gif => DynamicImage::ImageRgba8(rgb.to_rgba8()),
        _ => rgb,
    };
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, format).unwrap();
    buffer.into_inner()
}

// =========================================================================
// Event builders
// =========================================================================

/// Build a notification event with one record per `(bucket, key)` pair.
pub fn s3_event(records: &[(&str, &str)]) -> S3Event {
    let records: Vec<serde_json::Value> = records
        .iter()
        .map(|(bucket, key)| {
            serde_json::json!({
                "eventName": "ObjectCreated:Put",
                "s3": {
                    "bucket": { "name": bucket },
                    "object": { "key": key, "size": 1024 }
                }
            })
        })
        .collect();
    serde_json::from_value(serde_json::json!({ "Records": records })).unwrap()
}

// =========================================================================
// In-memory object store
// =========================================================================

/// An object written through [`ObjectStore::store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: String,
}

/// Recorded storage call, in invocation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageCall {
    Fetch { bucket: String, key: String },
    Store { bucket: String, key: String },
}

/// In-memory [`ObjectStore`]. Fetches of unknown locators return `NotFound`.
/// Buckets listed in `read_only` reject writes with `AccessDenied`.
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<(String, String), StoredObject>>,
    calls: Mutex<Vec<StorageCall>>,
    read_only: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_read_only_bucket(bucket: &str) -> Self {
        Self {
            read_only: vec![bucket.to_string()],
            ..Self::default()
        }
    }

    pub fn insert(&self, bucket: &str, key: &str, body: Vec<u8>) {
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body,
                content_type: "application/octet-stream".to_string(),
            },
        );
    }

    /// Object at `(bucket, key)`. Panics with the stored keys on miss.
    pub fn written(&self, bucket: &str, key: &str) -> StoredObject {
        let objects = self.objects.lock().unwrap();
        objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .unwrap_or_else(|| {
                let keys: Vec<_> = objects.keys().collect();
                panic!("object '{bucket}/{key}' not found. Available: {keys:?}")
            })
    }

    pub fn calls(&self) -> Vec<StorageCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of `store` calls made so far.
    pub fn store_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, StorageCall::Store { .. }))
            .count()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        self.calls.lock().unwrap().push(StorageCall::Fetch {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .map(|o| o.body.clone())
            .ok_or_else(|| StorageError::NotFound(format!("{bucket}/{key}")))
    }

    async fn store(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.calls.lock().unwrap().push(StorageCall::Store {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });
        if self.read_only.iter().any(|b| b == bucket) {
            return Err(StorageError::AccessDenied(format!("{bucket}/{key}")));
        }
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }
}
