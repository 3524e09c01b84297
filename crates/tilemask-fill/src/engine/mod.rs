//! Tiled flood-fill engine
//!
//! Sweeps up and down the rows of tiles, propagating pending spans within
//! each tile-row band until no direction holds work. Flooding inside a band
//! reloads tiles as often as cross-tile boundary signals demand; spans only
//! ever travel vertically through the per-column queues, and horizontally
//! through the boundary-signal table shared by one chain of tile visits.
//!
//! Hole detection runs during the first full sweep only: a horizontal line
//! of vertical run counts moves down the whole image while per-edge vertical
//! lines of horizontal run counts propagate between neighboring tiles. The
//! hole diameter may not exceed the tile width, since tiles within a band
//! are visited in an order the horizontal counts cannot survive otherwise.

use std::time::{Duration, Instant};

use crate::error::{FillError, FillResult};
use crate::predicate::FillPredicate;
use crate::span::{Direction, Span, SpanQueues};
use tilemask_core::{ProgressSink, TileGrid, TileStore};

mod tile;

use tile::BoundaryTable;

/// Seconds between progress reports for long computations.
const PROGRESS_REPORT_INTERVAL: Duration = Duration::from_secs(30);

/// Construction-time knobs for [`TiledFloodFill`].
#[derive(Debug, Clone, Default)]
pub struct FloodFillOptions {
    /// A pixel is fillable when within this distance of a registered fill
    /// value.
    pub tolerance: u8,
    /// Minimum length of a fillable run (horizontal or vertical) that seeds
    /// a flood on its own; 0 disables hole detection.
    pub min_hole_diameter: u32,
}

impl FloodFillOptions {
    /// Options with zero tolerance and hole detection disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fill tolerance.
    pub fn with_tolerance(mut self, tolerance: u8) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the minimum hole diameter.
    pub fn with_min_hole_diameter(mut self, diameter: u32) -> Self {
        self.min_hole_diameter = diameter;
        self
    }
}

/// Out-of-core flood fill over a tiled image.
///
/// Pixels within tolerance of a registered fill value are flooded, starting
/// from seed points and from self-discovered holes, without ever holding
/// more than one tile's pixel and mask blocks in memory. The resulting mask
/// is identical to an in-memory flood fill of the whole image and does not
/// depend on the tile size or on which sweep direction runs first.
///
/// ```
/// use tilemask_core::{MemoryTileStore, TileGrid};
/// use tilemask_fill::{FloodFillOptions, TiledFloodFill};
///
/// let grid = TileGrid::new(4, 4, 2, 2).unwrap();
/// let pixels = vec![
///     0, 0, 7, 7, //
///     0, 7, 7, 7, //
///     7, 7, 7, 7, //
///     7, 7, 7, 0,
/// ];
/// let store = MemoryTileStore::new(grid, pixels).unwrap();
/// let mut flood = TiledFloodFill::new(grid, FloodFillOptions::new(), store).unwrap();
/// flood.add_fill_value(0);
/// flood.add_seed(0, 0).unwrap();
/// let filled = flood.flood_fill().unwrap();
/// assert_eq!(filled, 3); // the corner region; (3, 3) is not connected
/// ```
pub struct TiledFloodFill<S> {
    store: S,
    grid: TileGrid,
    predicate: FillPredicate,
    min_hole_diameter: u32,

    // Pending spans per sweep direction and tile column.
    queues: SpanQueues,

    // Hole-detection state. The vertical run counts live for one
    // flood_fill call; the horizontal run counts and visited flags live for
    // one tile-row band.
    compute_holes: bool,
    v_runs: Vec<u32>,
    h_runs: Vec<Vec<u32>>,
    hole_visited: Vec<bool>,

    // The single in-flight tile block pair.
    pixels: Vec<u8>,
    mask: Vec<u8>,

    run_filled: u64,

    progress: Option<Box<dyn ProgressSink>>,
    tiles_processed: u64,
    started: Instant,
    reported_at: Duration,
}

impl<S: TileStore> TiledFloodFill<S> {
    /// Create an engine over `store` for the given grid.
    ///
    /// # Errors
    ///
    /// Returns [`FillError::HoleDiameterTooLarge`] if
    /// `options.min_hole_diameter` exceeds the tile width.
    pub fn new(grid: TileGrid, options: FloodFillOptions, store: S) -> FillResult<Self> {
        if options.min_hole_diameter > grid.tile_width() {
            return Err(FillError::HoleDiameterTooLarge {
                diameter: options.min_hole_diameter,
                tile_width: grid.tile_width(),
            });
        }
        Ok(Self {
            store,
            grid,
            predicate: FillPredicate::new(options.tolerance),
            min_hole_diameter: options.min_hole_diameter,
            queues: SpanQueues::new(grid.tile_cols()),
            compute_holes: false,
            v_runs: Vec::new(),
            h_runs: Vec::new(),
            hole_visited: Vec::new(),
            pixels: Vec::new(),
            mask: Vec::new(),
            run_filled: 0,
            progress: None,
            tiles_processed: 0,
            started: Instant::now(),
            reported_at: Duration::ZERO,
        })
    }

    /// The grid this engine operates on.
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Borrow the tile store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutably borrow the tile store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consume the engine, returning the tile store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Install a progress observer. Reports are best-effort and never
    /// affect the mask.
    pub fn set_progress_sink(&mut self, sink: Box<dyn ProgressSink>) {
        self.progress = Some(sink);
    }

    /// Register a fill value. Pixels within the configured tolerance of any
    /// registered value become fillable; the fillable set only grows.
    pub fn add_fill_value(&mut self, value: u8) {
        self.predicate.add_fill_value(value);
    }

    /// Register the pixel values at the four image corners as fill values.
    ///
    /// Useful when no explicit background value is known: rotated or
    /// mosaiced imagery almost always carries the background color in its
    /// corners.
    ///
    /// # Errors
    ///
    /// Propagates tile store failures.
    pub fn add_corner_fill_values(&mut self) -> FillResult<()> {
        let right = self.grid.image_width() - 1;
        let bottom = self.grid.image_height() - 1;
        for (x, y) in [(0, 0), (right, 0), (0, bottom), (right, bottom)] {
            let col = self.grid.tile_col_of(x);
            let row = self.grid.tile_row_of(y);
            self.pixels.resize(self.grid.block_len(col, row), 0);
            self.store.load_pixel_tile(col, row, &mut self.pixels)?;
            let clip_w = self.grid.clipped_width(col) as usize;
            let index =
                self.grid.row_in_tile(y) as usize * clip_w + self.grid.col_in_tile(x) as usize;
            self.predicate.add_fill_value(self.pixels[index]);
        }
        Ok(())
    }

    /// Add a seed point known a priori to be background.
    ///
    /// Seeds in one tile column must arrive in non-increasing row order;
    /// equal rows are fine.
    ///
    /// # Errors
    ///
    /// Returns [`FillError::SeedOutOfBounds`] for a point outside the image
    /// and [`FillError::SeedOrder`] when a seed's row exceeds the previous
    /// seed's row in the same tile column.
    pub fn add_seed(&mut self, x: u32, y: u32) -> FillResult<()> {
        if !self.grid.contains(x, y) {
            return Err(FillError::SeedOutOfBounds { x, y });
        }
        let col = self.grid.tile_col_of(x) as usize;
        if let Some(top) = self.queues.top(Direction::Plus, col) {
            if i64::from(y) > top.row {
                return Err(FillError::SeedOrder {
                    x,
                    y,
                    previous: top.row as u32,
                });
            }
        }
        self.queues.push(
            Direction::Plus,
            col,
            Span::seed(i64::from(y), self.grid.col_in_tile(x)),
        );
        Ok(())
    }

    /// Seed all four image corners, bottom pair first.
    ///
    /// # Errors
    ///
    /// Propagates [`add_seed`](TiledFloodFill::add_seed) errors; cannot fail
    /// on an engine with no seeds added yet.
    pub fn add_corner_seeds(&mut self) -> FillResult<()> {
        let right = self.grid.image_width() - 1;
        let bottom = self.grid.image_height() - 1;
        self.add_seed(0, bottom)?;
        self.add_seed(right, bottom)?;
        self.add_seed(0, 0)?;
        self.add_seed(right, 0)
    }

    /// Run the flood fill to convergence, reading and writing tiles through
    /// the store.
    ///
    /// Alternates sweep direction over the tile-row bands until neither
    /// direction's queues hold work. Every created span corresponds to at
    /// least one pixel flipping to filled, a bounded and irreversible
    /// quantity, so termination is guaranteed. Calling again on a converged
    /// engine fills nothing.
    ///
    /// Returns the number of pixels filled by this call.
    ///
    /// # Errors
    ///
    /// Propagates tile store failures; the mask is left partially written
    /// in that case.
    pub fn flood_fill(&mut self) -> FillResult<u64> {
        let tile_cols = self.grid.tile_cols() as usize;
        let tile_rows = i64::from(self.grid.tile_rows());
        let mut y_direction = Direction::Plus;

        self.compute_holes = self.min_hole_diameter > 0;
        self.v_runs.clear();
        self.v_runs.resize(self.grid.image_width() as usize, 0);
        self.run_filled = 0;
        self.tiles_processed = 0;
        self.started = Instant::now();
        self.reported_at = Duration::ZERO;

        loop {
            let mut tile_row = match y_direction {
                Direction::Plus => 0,
                Direction::Minus => tile_rows - 1,
            };
            while tile_row >= 0 && tile_row < tile_rows {
                let band = tile_row as u32;
                self.hole_visited.clear();
                self.hole_visited.resize(tile_cols, false);
                self.h_runs.clear();
                self.h_runs.resize_with(tile_cols + 1, Vec::new);

                for col in 0..tile_cols {
                    if self.band_has_work(y_direction, col, band) {
                        let mut boundary = BoundaryTable::new(self.grid.tile_cols());
                        self.process_band_chain(col as u32, band, y_direction, &mut boundary)?;
                    }
                }

                if self.compute_holes {
                    // Search every tile not reached by any flood for holes.
                    for col in 0..tile_cols {
                        if !self.hole_visited[col] {
                            let mut boundary = BoundaryTable::new(self.grid.tile_cols());
                            self.process_band_chain(col as u32, band, y_direction, &mut boundary)?;
                        }
                    }
                }

                tile_row += y_direction.delta();
            }

            // Propagation in this direction past the last band is stale.
            self.queues.clear_direction(y_direction);
            let need_work = !self.queues.direction_is_empty(y_direction.reverse());
            self.compute_holes = false; // one sweep finds every hole
            y_direction = y_direction.reverse();
            if !need_work {
                break;
            }
        }

        Ok(self.run_filled)
    }

    /// Whether `col`'s next pending span in `direction` lies inside band
    /// `band`.
    fn band_has_work(&self, direction: Direction, col: usize, band: u32) -> bool {
        let row_base = i64::from(band) * i64::from(self.grid.tile_height());
        let clip_h = i64::from(self.grid.clipped_height(band));
        self.queues
            .top(direction, col)
            .is_some_and(|s| s.row >= row_base && s.row < row_base + clip_h)
    }

    /// Count the distinct tiles referenced by pending spans, for progress
    /// estimation only.
    fn count_tiles_to_do(&self) -> u64 {
        let tile_height = i64::from(self.grid.tile_height());
        let image_height = i64::from(self.grid.image_height());
        let mut count = 0u64;
        for direction in [Direction::Minus, Direction::Plus] {
            for col in 0..self.grid.tile_cols() as usize {
                let mut last_band = -1;
                for span in self.queues.spans(direction, col) {
                    if span.row < 0 || span.row >= image_height {
                        continue;
                    }
                    let band = span.row / tile_height;
                    if band != last_band {
                        count += 1;
                        last_band = band;
                    }
                }
            }
        }
        count
    }

    /// Lower bound on the tiles still to visit. While the hole sweep is
    /// owed, every tile below the current band must be visited at least
    /// once.
    fn estimate_tiles_remaining(&self, band: u32) -> u64 {
        let mut remaining = self.count_tiles_to_do();
        if self.compute_holes {
            let bands_below = u64::from(self.grid.tile_rows() - band - 1);
            remaining = remaining.max(u64::from(self.grid.tile_cols()) * bands_below);
        }
        remaining
    }

    /// Bump the visit counter and report progress, throttled.
    fn tile_done(&mut self, tile_row: u32) {
        self.tiles_processed += 1;
        if self.progress.is_none() {
            return;
        }
        let remaining = self.estimate_tiles_remaining(tile_row);
        let elapsed = self.started.elapsed();
        if remaining == 0 || elapsed >= self.reported_at + PROGRESS_REPORT_INTERVAL {
            self.reported_at = elapsed;
            let done = self.tiles_processed;
            if let Some(sink) = self.progress.as_deref_mut() {
                sink.report_progress(done, remaining);
            }
        }
    }
}
