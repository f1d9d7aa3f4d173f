//! Brick-pattern tile layout.
//!
//! Rows are spaced `tile_height + spacing` apart. Every odd row is shifted
//! left by half a horizontal step so seams never line up vertically; the
//! first tile of a shifted row starts off-canvas to cover the left edge.

/// Where one copy of the watermark lands on the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePlacement {
    /// Zero-based row index.
    pub row: u32,
    /// Left edge; negative for the first tile of a staggered row.
    pub x: i64,
    /// Top edge.
    pub y: i64,
}

/// Gap between tiles in pixels: `floor(base_width * spacing_ratio)`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn spacing_for(base_width: u32, spacing_ratio: f64) -> u32 {
    (f64::from(base_width) * spacing_ratio).floor() as u32
}

/// Horizontal shift for `row`: half a step for odd rows, none for even rows.
#[must_use]
pub fn row_offset(row: u32, tile_width: u32, spacing: u32) -> i64 {
    if row % 2 == 1 {
        (i64::from(tile_width) + i64::from(spacing)) / 2
    } else {
        0
    }
}

/// Every tile placement covering a `base_width` x `base_height` canvas, row
/// by row, left to right.
///
/// Returns nothing for an empty tile with no spacing, since such a grid
/// would never advance.
#[must_use]
pub fn tile_positions(
    base_width: u32,
    base_height: u32,
    tile_width: u32,
    tile_height: u32,
    spacing: u32,
) -> Vec<TilePlacement> {
    let step_x = i64::from(tile_width) + i64::from(spacing);
    let step_y = i64::from(tile_height) + i64::from(spacing);
    if step_x == 0 || step_y == 0 {
        return Vec::new();
    }

    let width = i64::from(base_width);
    let height = i64::from(base_height);
    let mut placements = Vec::new();

    let mut row = 0u32;
    let mut y = 0i64;
    while y < height {
        let mut x = -row_offset(row, tile_width, spacing);
        while x < width {
            placements.push(TilePlacement { row, x, y });
            x += step_x;
        }
        row += 1;
        y += step_y;
    }

    placements
}
