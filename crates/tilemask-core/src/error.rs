//! Error types for tilemask-core
//!
//! Provides a unified error type for the core crate. Configuration errors
//! are reported at the offending call; store I/O failures are wrapped and
//! propagated unchanged to the caller.

use thiserror::Error;

/// Tilemask core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Invalid tile dimensions (each side must be at least 2 pixels)
    #[error("invalid tile dimensions: {tile_width}x{tile_height}")]
    InvalidTileDimensions { tile_width: u32, tile_height: u32 },

    /// Tile index outside the grid
    #[error("tile index out of range: ({col}, {row})")]
    TileOutOfRange { col: u32, row: u32 },

    /// A tile block buffer does not match the tile's clipped extent
    #[error("tile block size mismatch: expected {expected} bytes, got {actual}")]
    BlockSizeMismatch { expected: usize, actual: usize },

    /// Image buffer does not cover the full image
    #[error("image buffer size mismatch: expected {expected} bytes, got {actual}")]
    ImageSizeMismatch { expected: usize, actual: usize },

    /// I/O error from a tile store backend
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for tilemask core operations
pub type Result<T> = std::result::Result<T, Error>;
