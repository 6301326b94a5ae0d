//! Pure Rust codec built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF, BMP, TIFF, WebP) | `image::ImageReader::with_guessed_format` |
//! | Resize | `DynamicImage::resize_exact` with `CatmullRom` (bicubic) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |
//!
//! The format is sniffed from the bytes, never from the object key, so a PNG
//! uploaded as `photo.jpg` still decodes.

use super::backend::{CodecError, Dimensions, ImageCodec};
use super::params::Quality;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::borrow::Cow;
use std::io::Cursor;
use tracing::debug;

/// Resampling filter used for every resize. Bicubic is the usual default of
/// imaging libraries when no filter is requested.
const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Codec backed by the `image` crate's pure Rust decoders and JPEG encoder.
pub struct RustCodec;

impl RustCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// JPEG carries 8-bit gray or RGB only. Anything else (alpha, 16-bit, float)
/// is converted; compatible images are passed through untouched.
fn jpeg_compatible(image: &DynamicImage) -> Cow<'_, DynamicImage> {
    match image {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => Cow::Borrowed(image),
        DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_) => Cow::Owned(DynamicImage::ImageLuma8(image.to_luma8())),
        _ => Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),
    }
}

impl ImageCodec for RustCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, CodecError> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| CodecError::Decode(format!("sniffing format: {e}")))?;
        let Some(format) = reader.format() else {
            return Err(CodecError::Decode(format!(
                "unrecognized image format ({} bytes)",
                bytes.len()
            )));
        };
        debug!(?format, len = bytes.len(), "Detected image format");

        reader
            .decode()
            .map_err(|e| CodecError::Decode(format!("{format:?}: {e}")))
    }

    fn resize(&self, image: DynamicImage, target: Dimensions) -> DynamicImage {
        image.resize_exact(target.width, target.height, RESIZE_FILTER)
    }

    fn encode_jpeg(&self, image: &DynamicImage, quality: Quality) -> Result<Vec<u8>, CodecError> {
        let mut buffer = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.value());
        jpeg_compatible(image)
            .write_with_encoder(encoder)
            .map_err(|e| CodecError::Encode(e.to_string()))?;
        Ok(buffer.into_inner())
    }
}
