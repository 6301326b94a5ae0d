//! Image codec trait and shared types.
//!
//! The [`ImageCodec`] trait defines the three operations the thumbnail
//! pipeline needs: decode, resize, and encode.
//!
//! The production implementation is
//! [`RustCodec`](super::rust_backend::RustCodec), built on the `image` crate.
//! Tests use the recording [`MockCodec`](tests::MockCodec) below.

use super::params::Quality;
use image::DynamicImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode image: {0}")]
    Decode(String),
    #[error("Failed to encode image: {0}")]
    Encode(String),
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn of(image: &DynamicImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
        }
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Trait for image codecs.
///
/// `Sync` so a codec can be shared by reference across awaits in the handler.
pub trait ImageCodec: Sync {
    /// Decode raw bytes, detecting the format from the content itself.
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, CodecError>;

    /// Resample to exactly `target`, ignoring the source aspect ratio.
    fn resize(&self, image: DynamicImage, target: Dimensions) -> DynamicImage;

    /// Serialize as JPEG.
    fn encode_jpeg(&self, image: &DynamicImage, quality: Quality) -> Result<Vec<u8>, CodecError>;
}
