//! Grid geometry.

use std::fmt;

/// Default number of grid rows.
pub const DEFAULT_GRID_ROWS: u32 = 12;

/// Default number of grid columns.
pub const DEFAULT_GRID_COLS: u32 = 11;

/// Shape of the composite grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridShape {
    rows: u32,
    cols: u32,
}

impl GridShape {
    /// Creates a grid shape. Returns `None` if either dimension is zero.
    pub fn new(rows: u32, cols: u32) -> Option<Self> {
        if rows == 0 || cols == 0 {
            return None;
        }
        Some(Self { rows, cols })
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// True if `tile_count` tiles fit.
    pub fn fits(&self, tile_count: usize) -> bool {
        tile_count <= self.cell_count()
    }

    /// Row-major `(row, col)` of the cell holding tile `index`.
    pub fn position(&self, index: usize) -> (u32, u32) {
        let cols = self.cols as usize;
        ((index / cols) as u32, (index % cols) as u32)
    }

    /// Smallest near-square grid holding `tile_count` tiles, wider than tall.
    ///
    /// Returns `None` for zero tiles.
    pub fn for_count(tile_count: usize) -> Option<Self> {
        if tile_count == 0 {
            return None;
        }
        let cols = (tile_count as f64).sqrt().ceil() as usize;
        let rows = tile_count.div_ceil(cols);
        Self::new(rows as u32, cols as u32)
    }
}

impl Default for GridShape {
    fn default() -> Self {
        Self {
            rows: DEFAULT_GRID_ROWS,
            cols: DEFAULT_GRID_COLS,
        }
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rows × {} cols", self.rows, self.cols)
    }
}
