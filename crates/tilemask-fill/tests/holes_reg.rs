//! Hole detection regression tests
//!
//! Holes are maximal fillable runs, horizontal or vertical, long enough to
//! be treated as background even when no seed reaches them. The run counts
//! are carried across tile edges and tile-row bands, so the cases here
//! place runs astride both.

use tilemask_core::{FILLED, MemoryTileStore, NOT_FILLED, TileGrid};
use tilemask_fill::{FloodFillOptions, TiledFloodFill};

fn run_fill(
    image: &[u8],
    width: u32,
    height: u32,
    tile_width: u32,
    tile_height: u32,
    min_hole_diameter: u32,
    fill_values: &[u8],
    seeds: &[(u32, u32)],
) -> Vec<u8> {
    let grid = TileGrid::new(width, height, tile_width, tile_height).unwrap();
    let store = MemoryTileStore::new(grid, image.to_vec()).unwrap();
    let options = FloodFillOptions::new().with_min_hole_diameter(min_hole_diameter);
    let mut flood = TiledFloodFill::new(grid, options, store).unwrap();
    for &v in fill_values {
        flood.add_fill_value(v);
    }
    for &(x, y) in seeds {
        flood.add_seed(x, y).unwrap();
    }
    flood.flood_fill().unwrap();
    flood.into_store().into_mask()
}

#[test]
fn test_horizontal_run_straddling_a_tile_edge() {
    // A run of six 0s in row 1, columns 1..=6 of an 8x4 image. With 4x4
    // tiles the run contributes three pixels to each tile, so only the
    // carried edge count can reach the diameter of 5.
    let mut image = vec![9u8; 32];
    for x in 1..7usize {
        image[8 + x] = 0;
    }
    let mask = run_fill(&image, 8, 4, 4, 4, 5, &[0], &[]);
    for (i, &m) in mask.iter().enumerate() {
        if (9..15).contains(&i) {
            assert_eq!(m, FILLED, "pixel {i}");
        } else {
            assert_eq!(m, NOT_FILLED, "pixel {i}");
        }
    }

    // One pixel shorter and the hole stays undetected.
    let mut short = vec![9u8; 32];
    for x in 1..5usize {
        short[8 + x] = 0;
    }
    let mask = run_fill(&short, 8, 4, 4, 4, 5, &[0], &[]);
    assert_eq!(mask, vec![NOT_FILLED; 32]);
}

#[test]
fn test_vertical_run_straddling_a_band() {
    // A run of six 0s in column 2, rows 1..=6 of a 4x8 image cut into 4x4
    // tiles; the vertical count carries from the first band into the
    // second.
    let mut image = vec![9u8; 32];
    for y in 1..7usize {
        image[y * 4 + 2] = 0;
    }
    let mask = run_fill(&image, 4, 8, 4, 4, 5, &[0], &[]);
    for (i, &m) in mask.iter().enumerate() {
        if i % 4 == 2 && (1..7).contains(&(i / 4)) {
            assert_eq!(m, FILLED, "pixel {i}");
        } else {
            assert_eq!(m, NOT_FILLED, "pixel {i}");
        }
    }
}

#[test]
fn test_hole_floods_into_connected_pixels() {
    // The detected run floods onward into an attached pocket that is
    // itself too small to trigger detection.
    let image = vec![
        9, 9, 9, 9, 9, 9, //
        9, 0, 0, 0, 0, 9, //
        9, 0, 9, 9, 9, 9, //
        9, 9, 9, 9, 9, 9,
    ];
    let mask = run_fill(&image, 6, 4, 6, 4, 4, &[0], &[]);
    let filled: Vec<usize> = (0..24).filter(|&i| mask[i] == FILLED).collect();
    assert_eq!(filled, vec![7, 8, 9, 10, 13]);
}

#[test]
fn test_mosaic_gaps_filled_without_seeds() {
    // Images of 0s and 1s whose 0 regions must all be masked with hole
    // diameter 1, no seeds: the mask ends up equal to the image.
    let cases: [(&str, [u8; 36]); 3] = [
        (
            "gap in the middle",
            [
                1, 1, 1, 1, 1, 1, //
                1, 1, 1, 1, 1, 1, //
                1, 1, 0, 0, 0, 1, //
                1, 1, 0, 0, 0, 1, //
                1, 1, 0, 0, 0, 1, //
                1, 1, 1, 1, 1, 1,
            ],
        ),
        (
            "rotated image corners",
            [
                0, 0, 1, 1, 0, 0, //
                0, 0, 1, 1, 1, 0, //
                0, 1, 1, 1, 1, 1, //
                1, 1, 1, 1, 1, 0, //
                1, 1, 1, 1, 0, 0, //
                0, 1, 1, 1, 0, 0,
            ],
        ),
        (
            "island in the middle",
            [
                0, 0, 0, 0, 0, 0, //
                0, 1, 1, 1, 1, 0, //
                0, 1, 1, 1, 1, 0, //
                0, 1, 1, 1, 1, 0, //
                0, 1, 1, 1, 1, 0, //
                0, 0, 0, 0, 0, 0,
            ],
        ),
    ];
    for (name, image) in &cases {
        for tile_width in 2..8 {
            for tile_height in 2..8 {
                let mask = run_fill(image, 6, 6, tile_width, tile_height, 1, &[0], &[]);
                for (i, (&pixel, &m)) in image.iter().zip(mask.iter()).enumerate() {
                    let expected = if pixel == 0 { FILLED } else { NOT_FILLED };
                    assert_eq!(
                        m, expected,
                        "{name}: pixel {i}, tile {tile_width}x{tile_height}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_zeroed_edges_filled_without_seeds() {
    // One fully zeroed row or column against an otherwise solid image.
    for (zero_row, zero_col) in [(Some(0), None), (Some(5), None), (None, Some(0)), (None, Some(5))]
    {
        let mut image = [1u8; 36];
        for y in 0..6usize {
            for x in 0..6usize {
                if Some(y) == zero_row || Some(x) == zero_col {
                    image[y * 6 + x] = 0;
                }
            }
        }
        for tile_width in 2..8 {
            for tile_height in 2..8 {
                let mask = run_fill(&image, 6, 6, tile_width, tile_height, 1, &[0], &[]);
                for (i, (&pixel, &m)) in image.iter().zip(mask.iter()).enumerate() {
                    let expected = if pixel == 0 { FILLED } else { NOT_FILLED };
                    assert_eq!(
                        m, expected,
                        "row {zero_row:?} col {zero_col:?} pixel {i}, \
                         tile {tile_width}x{tile_height}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_holes_only_on_first_pass_still_converges() {
    // A hole-seeded flood whose propagation has to travel back up across
    // bands after hole detection is already over.
    let image = vec![
        9, 9, 9, 0, 9, 9, //
        9, 9, 9, 0, 9, 9, //
        9, 9, 9, 0, 9, 9, //
        9, 9, 9, 0, 9, 9, //
        9, 9, 9, 0, 9, 9, //
        0, 0, 0, 0, 9, 9,
    ];
    for tile_width in 4..8 {
        for tile_height in 2..8 {
            let mask = run_fill(&image, 6, 6, tile_width, tile_height, 4, &[0], &[]);
            for (i, (&pixel, &m)) in image.iter().zip(mask.iter()).enumerate() {
                let expected = if pixel == 0 { FILLED } else { NOT_FILLED };
                assert_eq!(m, expected, "pixel {i}, tile {tile_width}x{tile_height}");
            }
        }
    }
}
