//! Host-facing collaborator interfaces
//!
//! The flood-fill engine never touches storage directly: a [`TileStore`]
//! supplies pixel tiles and persists mask tiles, one blocking call at a
//! time. The engine owns the block buffers; a store fills or reads them and
//! must not retain references into them between calls.

use crate::error::Result;

/// Mask value for a pixel that stays opaque.
pub const NOT_FILLED: u8 = 255;

/// Mask value for a pixel flooded away (made transparent).
///
/// A mask pixel transitions at most once, from [`NOT_FILLED`] to [`FILLED`],
/// and never back.
pub const FILLED: u8 = 0;

/// Block storage for the pixel and mask tiles of one image.
///
/// All blocks are row-major and sized to the tile's clipped extent
/// ([`TileGrid::block_len`]); tiles on the right and bottom image edges are
/// smaller than the nominal tile size.
///
/// Calls are blocking and may perform I/O. Failures propagate out of the
/// engine unchanged; the engine makes no attempt at partial progress once a
/// tile cannot be loaded or saved.
///
/// [`TileGrid::block_len`]: crate::TileGrid::block_len
pub trait TileStore {
    /// Fill `block` with the pixel data of tile `(col, row)`.
    fn load_pixel_tile(&mut self, col: u32, row: u32, block: &mut [u8]) -> Result<()>;

    /// Fill `block` with the mask data of tile `(col, row)` and return the
    /// tile's prior opacity.
    ///
    /// The first load of a tile must yield a block of all [`NOT_FILLED`] and
    /// an opacity of `NOT_FILLED as f64`; later loads must return exactly
    /// what the last [`save_mask_tile`](TileStore::save_mask_tile) stored.
    fn load_mask_tile(&mut self, col: u32, row: u32, block: &mut [u8]) -> Result<f64>;

    /// Persist the mask `block` and running opacity of tile `(col, row)`.
    ///
    /// Called only when the mask block changed since it was loaded.
    fn save_mask_tile(&mut self, col: u32, row: u32, block: &[u8], opacity: f64) -> Result<()>;
}

/// Optional observer for long-running fills.
///
/// Invoked at most a few times per minute. The estimate is a lower bound on
/// the tiles still to visit; omitting the sink never changes the mask.
pub trait ProgressSink {
    /// Report that `tiles_done` tile visits have completed and at least
    /// `tiles_estimated_remaining` remain.
    fn report_progress(&mut self, tiles_done: u64, tiles_estimated_remaining: u64);
}
