//! Grid composition.
//!
//! Places normalized tiles into a fixed grid and encodes the result as a
//! single image.
//!
//! ```text
//! tiles: [t0, t1, t2]          grid: 2 rows × 2 cols
//!
//!   ┌────┬────┐
//!   │ t0 │ t1 │   cell (r, c) holds tile r * cols + c
//!   ├────┼────┤   cells without a tile stay black
//!   │ t2 │    │
//!   └────┴────┘
//! ```

mod grid;
mod layout;

pub use grid::{ComposeError, CompositeImage, GridComposer};
pub use layout::{GridShape, DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS};
