//! Tile data types.

use std::fmt;

use crate::codec::OutputFormat;

/// Default tile edge length in pixels.
pub const DEFAULT_TILE_EDGE: u32 = 32;

/// Largest tile edge in pixels, the JPEG per-side limit.
pub const MAX_TILE_EDGE: u32 = 65_535;

/// Fixed pixel dimensions every tile is normalized to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileSize {
    width: u32,
    height: u32,
}

impl TileSize {
    /// Creates a tile size. Returns `None` if either dimension is zero or
    /// exceeds [`MAX_TILE_EDGE`].
    pub fn new(width: u32, height: u32) -> Option<Self> {
        let valid = |edge: u32| (1..=MAX_TILE_EDGE).contains(&edge);
        if !valid(width) || !valid(height) {
            return None;
        }
        Some(Self { width, height })
    }

    /// Square tile of the given edge length.
    pub fn square(edge: u32) -> Option<Self> {
        Self::new(edge, edge)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` tuple, in the order `image` uses.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Default for TileSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_TILE_EDGE,
            height: DEFAULT_TILE_EDGE,
        }
    }
}

impl fmt::Display for TileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.width, self.height)
    }
}

/// Result of fetching one source image.
///
/// The variant set is closed: every way a fetch can end is one of these
/// three, and normalization matches on them exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileOutcome {
    /// HTTP 200 with a non-empty body.
    Success(Vec<u8>),
    /// HTTP 404.
    NotFound,
    /// Any other status, network failure or timeout.
    TransientError(String),
}

impl TileOutcome {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            TileOutcome::Success(_) => "success",
            TileOutcome::NotFound => "not_found",
            TileOutcome::TransientError(_) => "transient_error",
        }
    }
}

/// Which normalization branch produced a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileSource {
    /// Real image content, resized.
    Fetched,
    /// Black sentinel for a missing source.
    NotFound,
    /// Blue sentinel for a transient or decode failure.
    Failed,
}

/// A fixed-size encoded image for one grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    data: Vec<u8>,
    size: TileSize,
    format: OutputFormat,
    source: TileSource,
}

impl Tile {
    /// Wraps already encoded tile bytes.
    pub fn new(data: Vec<u8>, size: TileSize, format: OutputFormat, source: TileSource) -> Self {
        Self {
            data,
            size,
            format,
            source,
        }
    }

    /// Encoded bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the tile, returning the encoded bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Pixel dimensions.
    pub fn size(&self) -> TileSize {
        self.size
    }

    /// Encoding format of [`Tile::data`].
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Branch that produced this tile.
    pub fn source(&self) -> TileSource {
        self.source
    }

    /// True if this tile is one of the two sentinels.
    pub fn is_sentinel(&self) -> bool {
        self.source != TileSource::Fetched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_size_default_is_32() {
        assert_eq!(TileSize::default().dimensions(), (32, 32));
    }

    #[test]
    fn test_tile_size_rejects_out_of_range() {
        assert!(TileSize::new(0, 32).is_none());
        assert!(TileSize::new(32, 0).is_none());
        assert!(TileSize::square(0).is_none());
        assert!(TileSize::new(70_000, 32).is_none());
        assert!(TileSize::new(32, MAX_TILE_EDGE + 1).is_none());
        assert!(TileSize::square(MAX_TILE_EDGE).is_some());
        assert_eq!(TileSize::new(16, 24).unwrap().dimensions(), (16, 24));
    }

    #[test]
    fn test_tile_size_display() {
        assert_eq!(TileSize::new(48, 32).unwrap().to_string(), "48×32");
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(TileOutcome::Success(vec![1]).label(), "success");
        assert_eq!(TileOutcome::NotFound.label(), "not_found");
        assert_eq!(
            TileOutcome::TransientError("x".into()).label(),
            "transient_error"
        );
    }

    #[test]
    fn test_tile_accessors() {
        let tile = Tile::new(
            vec![1, 2, 3],
            TileSize::default(),
            OutputFormat::Png,
            TileSource::NotFound,
        );
        assert_eq!(tile.data(), &[1, 2, 3]);
        assert_eq!(tile.format(), OutputFormat::Png);
        assert!(tile.is_sentinel());
        assert_eq!(tile.into_data(), vec![1, 2, 3]);
    }
}
