//! Image codec abstraction for TileMosaic.
//!
//! The pipeline never touches pixel formats directly. Decoding fetched bytes,
//! resampling to tile size and encoding tiles or composites all go through the
//! [`ImageCodec`] trait, so the pipeline can run against any implementation.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐   ┌──────────────────┐
//! │  TileNormalizer  │   │   GridComposer   │
//! └────────┬─────────┘   └────────┬─────────┘
//!          │  Arc<dyn ImageCodec> │
//!          └──────────┬───────────┘
//!                     ▼
//!          ┌──────────────────────┐
//!          │  ImageCodec (trait)  │
//!          └──────────┬───────────┘
//!                     ▼
//!          ┌──────────────────────┐
//!          │   ImageCrateCodec    │
//!          └──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tilemosaic::codec::{ImageCodec, ImageCrateCodec, OutputFormat};
//!
//! let codec: Arc<dyn ImageCodec> = Arc::new(ImageCrateCodec::new());
//! let image = image::RgbImage::new(64, 48);
//! let small = codec.resize(&image, 32, 32);
//! let bytes = codec.encode(&small, OutputFormat::Png).unwrap();
//! assert_eq!(codec.decode(&bytes).unwrap().dimensions(), (32, 32));
//! ```

mod error;
mod format;
mod image_crate;

pub use error::CodecError;
pub use format::{OutputFormat, DEFAULT_JPEG_QUALITY};
pub use image_crate::ImageCrateCodec;

use image::RgbImage;

/// Decode, resize and encode capability used by the pipeline.
///
/// Implementations must be deterministic: the same input always yields the
/// same output. Resizing uses one fixed filter; it is not selectable per call.
pub trait ImageCodec: Send + Sync {
    /// Decodes an encoded image (format detected from content) into RGB.
    fn decode(&self, data: &[u8]) -> Result<RgbImage, CodecError>;

    /// Stretches an image to exactly `width`×`height`.
    ///
    /// Aspect ratio is not preserved. An image already at the target size is
    /// returned unchanged.
    fn resize(&self, image: &RgbImage, width: u32, height: u32) -> RgbImage;

    /// Encodes an RGB image in the given format.
    fn encode(&self, image: &RgbImage, format: OutputFormat) -> Result<Vec<u8>, CodecError>;

    /// Codec name for logging.
    fn name(&self) -> &str;
}
