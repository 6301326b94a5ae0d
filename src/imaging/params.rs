//! Parameter types for image operations.
//!
//! These structs describe *what* to produce, not *how*. The
//! [`operations`](super::operations) module passes them to the
//! [`codec`](super::backend) which does the pixel work, so a mock codec can be
//! swapped in without touching operation logic.
//!
//! ## Types
//!
//! - [`Quality`] — JPEG encoding quality (1–100, default 75). Clamped on construction.
//! - [`ThumbnailConfig`] — Target dimensions plus quality for a thumbnail.
//! - [`THUMBNAIL_SIZE`] — The fixed 128×128 output every upload is resized to.

use super::backend::Dimensions;

/// Output size for every thumbnail. Not configurable; aspect ratio is not kept.
pub const THUMBNAIL_SIZE: Dimensions = Dimensions {
    width: 128,
    height: 128,
};

/// Quality setting for JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Matches the default most imaging libraries use when no quality is given.
impl Default for Quality {
    fn default() -> Self {
        Self(75)
    }
}

/// What a thumbnail should look like once encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailConfig {
    pub size: Dimensions,
    pub quality: Quality,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            size: THUMBNAIL_SIZE,
            quality: Quality::default(),
        }
    }
}
