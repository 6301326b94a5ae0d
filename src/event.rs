//! S3 object-created notification payload.
//!
//! Only the fields the handler reads are modelled; everything else in the
//! notification (region, principal, request ids, etags) is ignored by serde.
//! Every level defaults when absent or `null` (a `null` record counts as an
//! empty one), so a structurally odd event still reaches the handler and is
//! rejected there as malformed, instead of failing inside the Lambda runtime's
//! deserializer.
//!
//! ```json
//! {
//!   "Records": [
//!     {
//!       "eventName": "ObjectCreated:Put",
//!       "s3": {
//!         "bucket": { "name": "in-bucket" },
//!         "object": { "key": "photos/my+trip%21.png", "size": 51234 }
//!       }
//!     }
//!   ]
//! }
//! ```
//!
//! ## Key encoding
//!
//! S3 form-encodes object keys in notifications: spaces arrive as `+` and
//! other reserved bytes as `%XX`. [`decode_key`] reverses that so the fetch
//! and the upload both use the real key.

use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EventError {
    #[error("event contains no records")]
    NoRecords,
    #[error("record is missing the bucket name")]
    MissingBucket,
    #[error("record is missing the object key")]
    MissingKey,
    #[error("object key {key:?} is not valid percent-encoded UTF-8")]
    InvalidKey { key: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct S3Event {
    #[serde(rename = "Records", default, deserialize_with = "records_or_empty")]
    pub records: Vec<S3EventRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct S3EventRecord {
    #[serde(rename = "eventName", default)]
    pub event_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct S3Entity {
    #[serde(default, deserialize_with = "null_as_default")]
    pub bucket: S3Bucket,
    #[serde(default, deserialize_with = "null_as_default")]
    pub object: S3Object,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct S3Bucket {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct S3Object {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn records_or_empty<'de, D>(deserializer: D) -> Result<Vec<S3EventRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let records = Option::<Vec<Option<S3EventRecord>>>::deserialize(deserializer)?;
    Ok(records
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

/// The (bucket, key) pair identifying one stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub bucket: String,
    pub key: String,
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

impl S3Event {
    /// Locator of the first record. Later records are never looked at.
    pub fn first_locator(&self) -> Result<Locator, EventError> {
        let record = self.records.first().ok_or(EventError::NoRecords)?;

        let bucket = record
            .s3
            .bucket
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or(EventError::MissingBucket)?;
        let raw_key = record
            .s3
            .object
            .key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(EventError::MissingKey)?;

        Ok(Locator {
            bucket: bucket.to_string(),
            key: decode_key(raw_key)?,
        })
    }

    /// How many records follow the first one.
    pub fn ignored_records(&self) -> usize {
        self.records.len().saturating_sub(1)
    }
}

/// Undo S3's form encoding of notification keys (`+` → space, `%XX` → byte).
pub fn decode_key(raw: &str) -> Result<String, EventError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| EventError::InvalidKey {
            key: raw.to_string(),
        })
}
