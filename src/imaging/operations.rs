//! High-level image operations.
//!
//! These functions chain the codec steps into the thumbnail pipeline:
//! decode → resize → encode. They own no pixels themselves; each intermediate
//! value is moved into the next step and dropped as soon as it is consumed.

use super::backend::{CodecError, Dimensions, ImageCodec};
use super::params::ThumbnailConfig;
use std::path::Path;
use tracing::debug;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Content type recorded on every stored thumbnail.
pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// An encoded thumbnail ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub dimensions: Dimensions,
    /// Dimensions of the decoded source, before resizing.
    pub source_dimensions: Dimensions,
}

/// Turn raw image bytes into a JPEG thumbnail.
pub fn make_thumbnail(
    codec: &impl ImageCodec,
    source: &[u8],
    config: &ThumbnailConfig,
) -> Result<EncodedImage> {
    let decoded = codec.decode(source)?;
    let source_dimensions = Dimensions::of(&decoded);

    let resized = codec.resize(decoded, config.size);
    let dimensions = Dimensions::of(&resized);

    let data = codec.encode_jpeg(&resized, config.quality)?;
    debug!(
        %source_dimensions,
        %dimensions,
        encoded_len = data.len(),
        "Thumbnail encoded"
    );

    Ok(EncodedImage {
        data,
        dimensions,
        source_dimensions,
    })
}

/// Read an image file, thumbnail it, and write the JPEG to `output`.
pub fn thumbnail_file(
    codec: &impl ImageCodec,
    input: &Path,
    output: &Path,
    config: &ThumbnailConfig,
) -> Result<EncodedImage> {
    let source = std::fs::read(input)?;
    let encoded = make_thumbnail(codec, &source, config)?;
    std::fs::write(output, &encoded.data)?;
    Ok(encoded)
}
