//! Image processing — pure Rust via the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `ImageReader::with_guessed_format` (content sniffing) |
//! | **Resize** | `resize_exact` to a fixed 128×128, bicubic |
//! | **Encode** | `JpegEncoder`, quality 75 |
//!
//! The module is split into:
//! - **Parameters**: target size and quality
//! - **Backend**: [`ImageCodec`] trait + [`RustCodec`]
//! - **Operations**: the decode → resize → encode chain

pub mod backend;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{CodecError, Dimensions, ImageCodec};
pub use operations::{EncodedImage, JPEG_CONTENT_TYPE, make_thumbnail, thumbnail_file};
pub use params::{Quality, THUMBNAIL_SIZE, ThumbnailConfig};
pub use rust_backend::RustCodec;
