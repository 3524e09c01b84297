//! tilemask-fill - Out-of-core tiled flood fill
//!
//! Generates a binary transparency mask for a raster image too large to
//! hold in memory, by flooding pixels that match a configurable background
//! predicate. Flooding starts from seed points and from self-discovered
//! holes, spreads vertically and horizontally (never diagonally), and
//! produces a mask identical to an in-memory flood fill while only ever
//! materializing one tile's blocks at a time.
//!
//! Tiles come and go through the [`TileStore`] interface from
//! `tilemask-core`; solid borders, letterboxing, and interior gaps in
//! imagery can be hidden by flooding their color before the tiles are
//! served.
//!
//! # Examples
//!
//! ```
//! use tilemask_core::{FILLED, MemoryTileStore, TileGrid};
//! use tilemask_fill::{FloodFillOptions, TiledFloodFill};
//!
//! // A 6x6 image with a black border and a lighter interior.
//! let mut pixels = vec![0u8; 36];
//! for y in 1..5 {
//!     for x in 1..5 {
//!         pixels[y * 6 + x] = 200;
//!     }
//! }
//!
//! let grid = TileGrid::new(6, 6, 3, 3).unwrap();
//! let store = MemoryTileStore::new(grid, pixels).unwrap();
//! let mut flood = TiledFloodFill::new(grid, FloodFillOptions::new(), store).unwrap();
//! flood.add_fill_value(0);
//! flood.add_corner_seeds().unwrap();
//! flood.flood_fill().unwrap();
//!
//! let mask = flood.store().mask();
//! assert_eq!(mask[0], FILLED); // border is masked out
//! assert_ne!(mask[7], FILLED); // interior stays opaque
//! ```
//!
//! [`TileStore`]: tilemask_core::TileStore

pub mod engine;
pub mod error;
pub mod predicate;

mod expand;
mod span;

// Re-export core types
pub use tilemask_core;

pub use engine::{FloodFillOptions, TiledFloodFill};
pub use error::{FillError, FillResult};
pub use predicate::FillPredicate;
