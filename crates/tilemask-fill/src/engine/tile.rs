//! Per-tile flooding and cross-column chains
//!
//! A tile visit loads the tile's blocks, alternates intra-tile sweeps until
//! no pending span addresses the tile, persists the mask if anything
//! filled, and reports which neighboring tile columns now need a visit of
//! their own. Visits chain across columns through an explicit work stack;
//! the boundary-signal table is shared by the whole chain.

use crate::error::FillResult;
use crate::expand::expand_span;
use crate::span::Direction;
use tilemask_core::{FILLED, NOT_FILLED, TileStore};

use super::TiledFloodFill;

/// Boundary signals for one chain of tile visits: one byte per tile row per
/// inter-column edge, [`FILLED`] once flooding newly reached that edge
/// during this chain. Edge `i` sits between tile columns `i - 1` and `i`.
pub(super) struct BoundaryTable {
    edges: Vec<Vec<u8>>,
}

impl BoundaryTable {
    pub(super) fn new(tile_cols: u32) -> Self {
        Self {
            edges: vec![Vec::new(); tile_cols as usize + 1],
        }
    }

    fn ensure(&mut self, edge: usize, rows: usize) {
        if self.edges[edge].len() < rows {
            self.edges[edge].resize(rows, NOT_FILLED);
        }
    }

    fn get(&self, edge: usize, row: usize) -> u8 {
        self.edges[edge][row]
    }

    fn set_filled(&mut self, edge: usize, row: usize) {
        self.edges[edge][row] = FILLED;
    }
}

/// Push a visit unless the column is out of bounds or already pending. A
/// pending visit consumes every boundary signal present when it runs, so
/// one entry per column is enough.
fn enqueue_visit(work: &mut Vec<(i64, Direction)>, tile_cols: i64, col: i64, entry: Direction) {
    if col >= 0 && col < tile_cols && !work.iter().any(|&(pending, _)| pending == col) {
        work.push((col, entry));
    }
}

impl<S: TileStore> TiledFloodFill<S> {
    /// Flood a chain of tiles within one band, starting at `start_col`.
    ///
    /// Cross-column propagation runs as a work stack of
    /// `(column, entry direction)` pairs over one shared boundary table.
    /// When a visit signals both neighbors, the column opposite its entry
    /// direction is visited first (it usually has less left to do) and the
    /// forward column is kept as a continuation.
    pub(super) fn process_band_chain(
        &mut self,
        start_col: u32,
        tile_row: u32,
        y_direction: Direction,
        boundary: &mut BoundaryTable,
    ) -> FillResult<()> {
        let tile_cols = i64::from(self.grid.tile_cols());
        let mut work: Vec<(i64, Direction)> = vec![(i64::from(start_col), Direction::Plus)];
        while let Some((col, entry)) = work.pop() {
            let (visit_left, visit_right) =
                self.flood_tile(col as u32, tile_row, y_direction, boundary)?;
            if visit_left && visit_right {
                enqueue_visit(&mut work, tile_cols, col + entry.delta(), entry);
                enqueue_visit(&mut work, tile_cols, col - entry.delta(), entry.reverse());
            } else if visit_left {
                enqueue_visit(&mut work, tile_cols, col - 1, Direction::Minus);
            } else if visit_right {
                enqueue_visit(&mut work, tile_cols, col + 1, Direction::Plus);
            }
            assert!(
                work.len() <= tile_cols as usize,
                "tile visit work stack exceeded the column count"
            );
        }
        Ok(())
    }

    /// Flood within a single tile, in the given overall sweep direction.
    ///
    /// Returns whether the left and right neighbor columns need a visit
    /// because an edge pixel newly filled.
    fn flood_tile(
        &mut self,
        tile_col: u32,
        tile_row: u32,
        y_direction: Direction,
        boundary: &mut BoundaryTable,
    ) -> FillResult<(bool, bool)> {
        let col = tile_col as usize;
        let clip_w = self.grid.clipped_width(tile_col) as usize;
        let clip_h = self.grid.clipped_height(tile_row) as usize;
        let row_base = i64::from(tile_row) * i64::from(self.grid.tile_height());
        let tile_width = self.grid.tile_width() as usize;
        let min_dia = self.min_hole_diameter;

        self.pixels.resize(clip_w * clip_h, 0);
        self.store
            .load_pixel_tile(tile_col, tile_row, &mut self.pixels)?;
        self.mask.resize(clip_w * clip_h, NOT_FILLED);
        let old_opacity = self
            .store
            .load_mask_tile(tile_col, tile_row, &mut self.mask)?;

        boundary.ensure(col, clip_h);
        boundary.ensure(col + 1, clip_h);

        // Snapshot the edge columns so newly filled edge pixels can be told
        // apart afterwards.
        let side_cols = [0, clip_w - 1];
        let mut old_sides = vec![[NOT_FILLED; 2]; clip_h];
        for (r, sides) in old_sides.iter_mut().enumerate() {
            sides[0] = self.mask[r * clip_w + side_cols[0]];
            sides[1] = self.mask[r * clip_w + side_cols[1]];
        }

        // Alternate sweeps inside the tile. Only the first sweep looks at
        // boundary signals and hole runs; later sweeps just drain spans.
        let mut first_sweep = true;
        let mut tile_dir = y_direction;
        let mut filled: u64 = 0;

        loop {
            let mut row: i64 = match tile_dir {
                Direction::Plus => 0,
                Direction::Minus => clip_h as i64 - 1,
            };
            while row >= 0 && row < clip_h as i64 {
                if !first_sweep {
                    // Jump ahead to the next row with pending work.
                    if let Some(top) = self.queues.top(tile_dir, col) {
                        if top.row >= row_base && top.row < row_base + clip_h as i64 {
                            row = top.row - row_base;
                        }
                    }
                }
                let r = row as usize;
                let global_row = row_base + row;
                let row_beg = r * clip_w;
                let row_end = row_beg + clip_w;

                // Pop the row's spans before expanding: expansion pushes
                // spans for the neighboring rows onto the same stacks.
                let mut todo = Vec::new();
                while self
                    .queues
                    .top(tile_dir, col)
                    .is_some_and(|s| s.row == global_row)
                {
                    todo.push(self.queues.pop(tile_dir, col).unwrap());
                }
                for span in &todo {
                    filled += expand_span(
                        &self.pixels[row_beg..row_end],
                        &mut self.mask[row_beg..row_end],
                        &self.predicate,
                        &mut self.queues,
                        col,
                        global_row,
                        tile_dir,
                        span.col as usize,
                        span.len as usize,
                    ) as u64;
                }

                if first_sweep {
                    // A neighbor flooded up to this row's edge; if our edge
                    // pixel is still open, seed it.
                    for side in 0..2 {
                        if boundary.get(col + side, r) == FILLED
                            && self.mask[row_beg + side_cols[side]] != FILLED
                        {
                            filled += expand_span(
                                &self.pixels[row_beg..row_end],
                                &mut self.mask[row_beg..row_end],
                                &self.predicate,
                                &mut self.queues,
                                col,
                                global_row,
                                tile_dir,
                                side_cols[side],
                                0,
                            ) as u64;
                        }
                    }

                    if self.compute_holes && !self.hole_visited[col] {
                        // Advance the run counts across the row, seeding a
                        // flood wherever either count reaches the hole
                        // diameter. The horizontal count extends the left
                        // edge's counter in place until the first break in
                        // the run; the right edge's counter gets the final
                        // count, and is folded in at the row's last pixel
                        // so runs straddling the edge still trigger.
                        let (left_half, right_half) = self.h_runs.split_at_mut(col + 1);
                        let left_runs = &mut left_half[col];
                        let right_runs = &mut right_half[0];
                        if left_runs.len() < clip_h {
                            left_runs.resize(clip_h, 0);
                        }
                        if right_runs.len() < clip_h {
                            right_runs.resize(clip_h, 0);
                        }

                        let mut on_left_run = true;
                        let mut mid_count: u32 = 0;
                        for i in 0..clip_w {
                            let vx = col * tile_width + i;
                            let open = self.mask[row_beg + i] != FILLED
                                && self.predicate.is_fillable(self.pixels[row_beg + i]);
                            if !open {
                                on_left_run = false;
                                mid_count = 0;
                                self.v_runs[vx] = 0;
                                continue;
                            }
                            self.v_runs[vx] += 1;
                            let h_count = if on_left_run {
                                left_runs[r] += 1;
                                if i == clip_w - 1 {
                                    left_runs[r] += right_runs[r];
                                }
                                left_runs[r]
                            } else {
                                mid_count += 1;
                                if i == clip_w - 1 {
                                    mid_count += right_runs[r];
                                }
                                mid_count
                            };
                            if h_count >= min_dia || self.v_runs[vx] >= min_dia {
                                filled += expand_span(
                                    &self.pixels[row_beg..row_end],
                                    &mut self.mask[row_beg..row_end],
                                    &self.predicate,
                                    &mut self.queues,
                                    col,
                                    global_row,
                                    tile_dir,
                                    i,
                                    0,
                                ) as u64;
                            }
                        }
                        right_runs[r] = if on_left_run { left_runs[r] } else { mid_count };
                    }
                }

                row += tile_dir.delta();
            }

            first_sweep = false;
            self.hole_visited[col] = true;
            tile_dir = tile_dir.reverse();
            let more_work = self
                .queues
                .top(tile_dir, col)
                .is_some_and(|s| s.row >= row_base && s.row < row_base + clip_h as i64);
            if !more_work {
                break;
            }
        }

        if filled > 0 {
            let fraction = filled as f64 / (clip_w * clip_h) as f64;
            let opacity = old_opacity + fraction * (f64::from(FILLED) - f64::from(NOT_FILLED));
            self.store
                .save_mask_tile(tile_col, tile_row, &self.mask, opacity)?;
        }
        self.run_filled += filled;

        // Where an edge pixel newly filled, raise the boundary signal and
        // ask for a visit to that neighbor.
        let mut needs_visit = [false, false];
        for (r, sides) in old_sides.iter().enumerate() {
            for side in 0..2 {
                if sides[side] != FILLED
                    && self.mask[r * clip_w + side_cols[side]] == FILLED
                    && boundary.get(col + side, r) != FILLED
                {
                    boundary.set_filled(col + side, r);
                    needs_visit[side] = true;
                }
            }
        }

        self.tile_done(tile_row);

        Ok((needs_visit[0], needs_visit[1]))
    }
}
