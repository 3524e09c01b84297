//! Single-row span expansion
//!
//! Applies one pending span to one tile row: grows the span sideways into
//! fillable, unfilled pixels, marks what it reaches, and emits follow-up
//! spans for the neighboring rows. This is the only place mask pixels are
//! written.

use crate::predicate::FillPredicate;
use crate::span::{Direction, Span, SpanQueues};
use tilemask_core::FILLED;

/// Expand one span within a single tile row.
///
/// `pixels` and `mask` are the clipped pixel and mask slices of the row the
/// span addresses; nothing outside them is read or written. `start` and
/// `len` give the span within the row; `len == 0` is a point seed expanded
/// in both horizontal directions.
///
/// Newly filled runs are queued as spans for `global_row + delta` in the
/// same sweep `direction`. Any growth outside the original `[start,
/// start + len)` range is new information the producing row could not have
/// had, so it is also queued for `global_row - delta` in the reverse
/// direction.
///
/// Returns the number of pixels that transitioned to [`FILLED`]; a pixel
/// already filled is always a no-op.
pub(crate) fn expand_span(
    pixels: &[u8],
    mask: &mut [u8],
    predicate: &FillPredicate,
    queues: &mut SpanQueues,
    tile_col: usize,
    global_row: i64,
    direction: Direction,
    start: usize,
    len: usize,
) -> usize {
    debug_assert_eq!(pixels.len(), mask.len());
    debug_assert!(start + len <= pixels.len());

    let row_len = pixels.len();
    let next_row = global_row + direction.delta();
    let prev_row = global_row - direction.delta();
    let right = start + len;
    let mut filled = 0usize;

    // Expand left of the span while predecessors are fillable and unfilled.
    // The start pixel itself is left to the scan below.
    let mut exp_left = start;
    if mask[start] != FILLED && predicate.is_fillable(pixels[start]) {
        while exp_left > 0
            && mask[exp_left - 1] != FILLED
            && predicate.is_fillable(pixels[exp_left - 1])
        {
            exp_left -= 1;
            mask[exp_left] = FILLED;
        }
    }

    // Scan the span left to right, flushing each completed run to the next
    // row. `last` is the start of the run currently being collected; it
    // begins at exp_left so the left expansion joins the first run.
    let mut last = exp_left;
    for i in start..right {
        if mask[i] != FILLED && predicate.is_fillable(pixels[i]) {
            mask[i] = FILLED;
        } else {
            if last < i {
                queues.push(
                    direction,
                    tile_col,
                    Span::new(next_row, last as u32, (i - last) as u32),
                );
                filled += i - last;
            }
            last = i + 1;
        }
    }

    // If the scan reached the span's right edge without breaking (or this is
    // a point seed), keep expanding past it, then flush the trailing run.
    let mut exp_right = right;
    if len == 0 || last < right {
        while exp_right < row_len
            && mask[exp_right] != FILLED
            && predicate.is_fillable(pixels[exp_right])
        {
            mask[exp_right] = FILLED;
            exp_right += 1;
        }
        if last < exp_right {
            queues.push(
                direction,
                tile_col,
                Span::new(next_row, last as u32, (exp_right - last) as u32),
            );
            filled += exp_right - last;
        }
    }

    // Growth outside the original span propagates against the sweep too.
    if len == 0 {
        if exp_left < exp_right {
            queues.push(
                direction.reverse(),
                tile_col,
                Span::new(prev_row, exp_left as u32, (exp_right - exp_left) as u32),
            );
        }
    } else {
        if exp_right > right {
            queues.push(
                direction.reverse(),
                tile_col,
                Span::new(prev_row, right as u32, (exp_right - right) as u32),
            );
        }
        if exp_left < start {
            queues.push(
                direction.reverse(),
                tile_col,
                Span::new(prev_row, exp_left as u32, (start - exp_left) as u32),
            );
        }
    }

    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilemask_core::NOT_FILLED;

    fn predicate_for(values: &[u8]) -> FillPredicate {
        let mut p = FillPredicate::new(0);
        for &v in values {
            p.add_fill_value(v);
        }
        p
    }

    fn drain(queues: &mut SpanQueues, direction: Direction, col: usize) -> Vec<Span> {
        let mut out = Vec::new();
        while let Some(s) = queues.pop(direction, col) {
            out.push(s);
        }
        out
    }

    #[test]
    fn test_seed_expands_both_ways() {
        let pixels = [9, 3, 3, 3, 9, 3];
        let mut mask = [NOT_FILLED; 6];
        let mut queues = SpanQueues::new(1);
        let p = predicate_for(&[3]);

        let filled = expand_span(&pixels, &mut mask, &p, &mut queues, 0, 10, Direction::Plus, 2, 0);
        assert_eq!(filled, 3);
        assert_eq!(mask, [NOT_FILLED, FILLED, FILLED, FILLED, NOT_FILLED, NOT_FILLED]);

        // The whole run goes to the next row in the sweep direction, and to
        // the previous row because a seed's growth is all new.
        let fwd = drain(&mut queues, Direction::Plus, 0);
        assert_eq!(fwd, vec![Span::new(11, 1, 3)]);
        let rev = drain(&mut queues, Direction::Minus, 0);
        assert_eq!(rev, vec![Span::new(9, 1, 3)]);
    }

    #[test]
    fn test_seed_on_unfillable_pixel_is_noop() {
        let pixels = [3, 3, 9, 3, 3];
        let mut mask = [NOT_FILLED; 5];
        let mut queues = SpanQueues::new(1);
        let p = predicate_for(&[3]);

        let filled = expand_span(&pixels, &mut mask, &p, &mut queues, 0, 0, Direction::Plus, 2, 0);
        assert_eq!(filled, 0);
        assert_eq!(mask, [NOT_FILLED; 5]);
        assert!(queues.top(Direction::Plus, 0).is_none());
        assert!(queues.top(Direction::Minus, 0).is_none());
    }

    #[test]
    fn test_span_breaks_into_runs() {
        // Span covers [0, 5); pixel 2 is a wall, so two runs are flushed.
        let pixels = [3, 3, 9, 3, 3];
        let mut mask = [NOT_FILLED; 5];
        let mut queues = SpanQueues::new(1);
        let p = predicate_for(&[3]);

        let filled = expand_span(&pixels, &mut mask, &p, &mut queues, 0, 4, Direction::Plus, 0, 5);
        assert_eq!(filled, 4);
        assert_eq!(mask, [FILLED, FILLED, NOT_FILLED, FILLED, FILLED]);

        let mut fwd = drain(&mut queues, Direction::Plus, 0);
        fwd.sort_by_key(|s| s.col);
        assert_eq!(fwd, vec![Span::new(5, 0, 2), Span::new(5, 3, 2)]);
        // Nothing grew outside [0, 5), so no reverse spans.
        assert!(queues.top(Direction::Minus, 0).is_none());
    }

    #[test]
    fn test_growth_outside_span_propagates_in_reverse() {
        // Span is [2, 4); fillable pixels extend to both sides of it.
        let pixels = [3, 3, 3, 3, 3, 3, 9];
        let mut mask = [NOT_FILLED; 7];
        let mut queues = SpanQueues::new(1);
        let p = predicate_for(&[3]);

        let filled = expand_span(&pixels, &mut mask, &p, &mut queues, 0, 4, Direction::Plus, 2, 2);
        assert_eq!(filled, 6);
        assert_eq!(&mask[..6], &[FILLED; 6]);
        assert_eq!(mask[6], NOT_FILLED);

        let fwd = drain(&mut queues, Direction::Plus, 0);
        assert_eq!(fwd, vec![Span::new(5, 0, 6)]);

        // Left growth [0, 2) and right growth [4, 6) go back against the sweep.
        let mut rev = drain(&mut queues, Direction::Minus, 0);
        rev.sort_by_key(|s| s.col);
        assert_eq!(rev, vec![Span::new(3, 0, 2), Span::new(3, 4, 2)]);
    }

    #[test]
    fn test_already_filled_pixels_are_not_recounted() {
        let pixels = [3, 3, 3, 3];
        let mut mask = [NOT_FILLED, FILLED, NOT_FILLED, NOT_FILLED];
        let mut queues = SpanQueues::new(1);
        let p = predicate_for(&[3]);

        let filled = expand_span(&pixels, &mut mask, &p, &mut queues, 0, 0, Direction::Plus, 0, 4);
        assert_eq!(filled, 3);
        assert_eq!(mask, [FILLED; 4]);
    }

    #[test]
    fn test_minus_direction_addresses_rows_upward() {
        let pixels = [3, 3];
        let mut mask = [NOT_FILLED; 2];
        let mut queues = SpanQueues::new(1);
        let p = predicate_for(&[3]);

        expand_span(&pixels, &mut mask, &p, &mut queues, 0, 7, Direction::Minus, 0, 0);
        assert_eq!(queues.top(Direction::Minus, 0).unwrap().row, 6);
        assert_eq!(queues.top(Direction::Plus, 0).unwrap().row, 8);
    }

    #[test]
    fn test_row_zero_seed_addresses_row_minus_one() {
        let pixels = [3];
        let mut mask = [NOT_FILLED];
        let mut queues = SpanQueues::new(1);
        let p = predicate_for(&[3]);

        expand_span(&pixels, &mut mask, &p, &mut queues, 0, 0, Direction::Minus, 0, 0);
        // Stale span off the image edge; it is discarded later, never consumed.
        assert_eq!(queues.top(Direction::Minus, 0).unwrap().row, -1);
    }
}
