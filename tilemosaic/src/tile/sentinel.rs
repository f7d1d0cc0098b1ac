//! Uniform-color sentinel tiles.
//!
//! When real content for a cell is unavailable the pipeline substitutes a
//! solid tile so the composite always renders:
//!
//! - **black** (0, 0, 0) when the source reported "not found"
//! - **blue** (0, 0, 255) for every other failure
//!
//! Sentinels go through the same encoder as real tiles, so every tile in a
//! run shares one byte representation.

use image::{Rgb, RgbImage};

use super::types::{Tile, TileSize, TileSource};
use crate::codec::{CodecError, ImageCodec, OutputFormat};

/// The two kinds of substitute tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentinel {
    /// Source was reported missing.
    NotFound,
    /// Source failed to fetch or decode.
    Error,
}

impl Sentinel {
    /// Fill color of this sentinel.
    pub fn color(&self) -> Rgb<u8> {
        match self {
            Sentinel::NotFound => Rgb([0, 0, 0]),
            Sentinel::Error => Rgb([0, 0, 255]),
        }
    }

    /// Tile source recorded on tiles built from this sentinel.
    pub fn tile_source(&self) -> TileSource {
        match self {
            Sentinel::NotFound => TileSource::NotFound,
            Sentinel::Error => TileSource::Failed,
        }
    }

    /// Raw raster of the sentinel at the given size.
    pub fn raster(&self, size: TileSize) -> RgbImage {
        RgbImage::from_pixel(size.width(), size.height(), self.color())
    }
}

/// Generate an encoded sentinel tile.
///
/// # Errors
///
/// Returns an error if the codec cannot encode a solid raster, which for the
/// built-in formats only happens on allocation failure.
///
/// # Example
///
/// ```
/// use tilemosaic::codec::{ImageCrateCodec, OutputFormat};
/// use tilemosaic::tile::{generate_sentinel, Sentinel, TileSize};
///
/// let codec = ImageCrateCodec::new();
/// let tile = generate_sentinel(&codec, Sentinel::NotFound, TileSize::default(), OutputFormat::Png)
///     .unwrap();
/// assert!(tile.is_sentinel());
/// ```
pub fn generate_sentinel(
    codec: &dyn ImageCodec,
    kind: Sentinel,
    size: TileSize,
    format: OutputFormat,
) -> Result<Tile, CodecError> {
    let data = codec.encode(&kind.raster(size), format)?;
    Ok(Tile::new(data, size, format, kind.tile_source()))
}
