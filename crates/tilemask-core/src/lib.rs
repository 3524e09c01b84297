//! Tilemask Core - Data structures and host interfaces for tiled mask
//! generation
//!
//! This crate provides the pieces shared between the flood-fill engine and
//! its hosts:
//!
//! - [`TileGrid`] - image/tile coordinate arithmetic with clipped edge tiles
//! - [`TileStore`] - block storage interface for pixel and mask tiles
//! - [`MemoryTileStore`] - in-memory reference store
//! - [`ProgressSink`] - optional progress observer
//! - [`NOT_FILLED`] / [`FILLED`] - the two mask sentinel values

pub mod error;
pub mod grid;
pub mod memory;
pub mod store;

pub use error::{Error, Result};
pub use grid::TileGrid;
pub use memory::MemoryTileStore;
pub use store::{FILLED, NOT_FILLED, ProgressSink, TileStore};
