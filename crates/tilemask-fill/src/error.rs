//! Error types for tilemask-fill

use thiserror::Error;

/// Errors that can occur while configuring or running a flood fill
#[derive(Debug, Error)]
pub enum FillError {
    /// Core library or tile store error
    #[error("core error: {0}")]
    Core(#[from] tilemask_core::Error),

    /// Minimum hole diameter wider than a tile; the horizontal run
    /// propagation cannot detect holes wider than one tile
    #[error("minimum hole diameter {diameter} exceeds tile width {tile_width}")]
    HoleDiameterTooLarge { diameter: u32, tile_width: u32 },

    /// Seed position outside the image
    #[error("seed outside image: ({x}, {y})")]
    SeedOutOfBounds { x: u32, y: u32 },

    /// Seeds in one tile column must be added in non-increasing row order
    #[error("seed ({x}, {y}) breaks non-increasing row order (previous row {previous})")]
    SeedOrder { x: u32, y: u32, previous: u32 },
}

/// Result type for flood fill operations
pub type FillResult<T> = std::result::Result<T, FillError>;
