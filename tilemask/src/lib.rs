//! Tilemask - Transparency mask generation for tiled raster imagery
//!
//! Builds binary alpha masks for images too large to hold in memory: an
//! out-of-core flood fill marks background pixels (solid borders,
//! letterboxing, interior gaps) as transparent, tile by tile, with a result
//! identical to flooding the whole image at once.
//!
//! # Example
//!
//! ```
//! use tilemask::{MemoryTileStore, TileGrid};
//! use tilemask::fill::{FloodFillOptions, TiledFloodFill};
//!
//! let grid = TileGrid::new(16, 16, 4, 4).unwrap();
//! let store = MemoryTileStore::new(grid, vec![0u8; 256]).unwrap();
//! let mut flood = TiledFloodFill::new(grid, FloodFillOptions::new(), store).unwrap();
//! flood.add_fill_value(0);
//! flood.add_corner_seeds().unwrap();
//! assert_eq!(flood.flood_fill().unwrap(), 256); // uniform image floods away
//! ```

// Re-export core types (grid, stores, mask sentinels)
pub use tilemask_core::*;

// Re-export the fill engine as a module
pub use tilemask_fill as fill;
