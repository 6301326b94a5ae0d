//! # s3-thumbnailer
//!
//! An AWS Lambda function that turns every image uploaded to a source bucket
//! into a 128×128 JPEG thumbnail stored under the same key in a destination
//! bucket.
//!
//! # Architecture: One Linear Pipeline
//!
//! ```text
//! S3 notification ─► fetch ─► decode ─► resize ─► encode ─► store ─► {statusCode: 200}
//! ```
//!
//! The handler is stateless. Configuration and the S3 client are built once
//! at cold start and borrowed by every invocation; every buffer lives only as
//! long as the invocation that created it.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `OUTPUT_BUCKET` loading, once per process |
//! | [`event`] | S3 notification model and locator extraction (with key decoding) |
//! | [`storage`] | [`storage::ObjectStore`] trait and its S3 implementation |
//! | [`imaging`] | [`imaging::ImageCodec`] trait, `image`-crate codec, thumbnail pipeline |
//! | [`handler`] | [`handler::ImageResizeHandler`]: ties the steps together, maps failures |
//!
//! # Design Decisions
//!
//! ## Two Narrow Seams
//!
//! Storage and pixel work are the only external collaborators, so each sits
//! behind a small trait ([`storage::ObjectStore`], [`imaging::ImageCodec`]).
//! Tests run the real handler against an in-memory store and either the real
//! codec or a recording mock. No AWS account is needed to exercise the
//! pipeline end to end.
//!
//! ## Fixed Output
//!
//! Every thumbnail is exactly 128×128 JPEG, whatever the input shape or
//! format. Non-square sources are stretched, not cropped or letterboxed. The
//! stored content type is always `image/jpeg`, even when the key still ends
//! in `.png`.
//!
//! ## Fail Loudly, Once
//!
//! No step retries and no failure is swallowed. The handler logs the failure
//! with its locator and returns the error; the Lambda runtime decides what
//! happens next (its own retry policy, DLQ, alarms).

pub mod config;
pub mod event;
pub mod handler;
pub mod imaging;
pub mod storage;

pub use config::HandlerConfig;
pub use event::{Locator, S3Event};
pub use handler::{HandlerError, ImageResizeHandler, InvocationResult};

#[cfg(test)]
pub(crate) mod test_helpers;
