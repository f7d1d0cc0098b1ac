//! Composite assembly.

use std::sync::Arc;

use image::{imageops, RgbImage};
use thiserror::Error;
use tracing::{debug, warn};

use super::layout::GridShape;
use crate::codec::{CodecError, ImageCodec, OutputFormat};
use crate::tile::{Sentinel, Tile, TileSize};

/// Errors that can occur while composing the grid.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// More tiles than grid cells.
    #[error("Grid {grid} has {cells} cells but {tiles} tiles were supplied")]
    GridTooSmall {
        grid: GridShape,
        cells: usize,
        tiles: usize,
    },

    /// Composite dimensions overflow `u32`.
    #[error("Composite for {grid} with {tile_size} tiles exceeds maximum image dimensions")]
    TooLarge { grid: GridShape, tile_size: TileSize },

    /// Final encoding failed.
    #[error("Failed to encode composite: {0}")]
    Encode(#[source] CodecError),
}

/// The encoded composite grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeImage {
    data: Vec<u8>,
    width: u32,
    height: u32,
    format: OutputFormat,
}

impl CompositeImage {
    /// Encoded bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the composite, returning the encoded bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Width in pixels (`cols × tile width`).
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels (`rows × tile height`).
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Encoding format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// MIME type of [`CompositeImage::data`].
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

/// Lays tiles out row-major and encodes the result.
pub struct GridComposer {
    codec: Arc<dyn ImageCodec>,
    tile_size: TileSize,
    format: OutputFormat,
}

impl GridComposer {
    /// Creates a composer for `tile_size` cells, encoding as `format`.
    pub fn new(codec: Arc<dyn ImageCodec>, tile_size: TileSize, format: OutputFormat) -> Self {
        Self {
            codec,
            tile_size,
            format,
        }
    }

    /// Cell size.
    pub fn tile_size(&self) -> TileSize {
        self.tile_size
    }

    /// Output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Pixel dimensions of the composite for `grid`.
    pub fn composite_dimensions(&self, grid: GridShape) -> Option<(u32, u32)> {
        let width = grid.cols().checked_mul(self.tile_size.width())?;
        let height = grid.rows().checked_mul(self.tile_size.height())?;
        Some((width, height))
    }

    /// Composes `tiles` into `grid`.
    ///
    /// Tile `i` lands in cell `(i / cols, i % cols)`. Cells past the last
    /// tile stay black. A tile that cannot be decoded is painted with the
    /// error color; one of the wrong size is stretched to fit its cell.
    pub fn compose(&self, tiles: &[Tile], grid: GridShape) -> Result<CompositeImage, ComposeError> {
        if !grid.fits(tiles.len()) {
            return Err(ComposeError::GridTooSmall {
                grid,
                cells: grid.cell_count(),
                tiles: tiles.len(),
            });
        }

        let (width, height) =
            self.composite_dimensions(grid)
                .ok_or(ComposeError::TooLarge {
                    grid,
                    tile_size: self.tile_size,
                })?;
        let (tile_width, tile_height) = self.tile_size.dimensions();

        // Zero-initialized, so unfilled cells are already the black sentinel
        let mut canvas = RgbImage::new(width, height);

        for (index, tile) in tiles.iter().enumerate() {
            let (row, col) = grid.position(index);
            let cell = self.cell_raster(index, tile);
            imageops::replace(
                &mut canvas,
                &cell,
                i64::from(col * tile_width),
                i64::from(row * tile_height),
            );
        }

        let data = self
            .codec
            .encode(&canvas, self.format)
            .map_err(ComposeError::Encode)?;

        debug!(
            tiles = tiles.len(),
            grid = %grid,
            width = width,
            height = height,
            bytes = data.len(),
            "Composite encoded"
        );

        Ok(CompositeImage {
            data,
            width,
            height,
            format: self.format,
        })
    }

    fn cell_raster(&self, index: usize, tile: &Tile) -> RgbImage {
        let (tile_width, tile_height) = self.tile_size.dimensions();
        match self.codec.decode(tile.data()) {
            Ok(raster) => self.codec.resize(&raster, tile_width, tile_height),
            Err(e) => {
                warn!(index = index, error = %e, "Tile could not be decoded, painting error cell");
                Sentinel::Error.raster(self.tile_size)
            }
        }
    }
}
