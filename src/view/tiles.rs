//! Mirrored tile grid
//!
//! The arena surface is drawn over and over to fill the zoomed-out canvas.
//! Neighbouring tiles are mirror images of each other, so a ball leaving one
//! tile appears to continue into the next one.
//!
//! Tile positions are tile centers. There is always an odd number of rows and
//! columns so exactly one tile (unflipped) sits on the anchor.

use glam::Vec2;

use super::overlap::is_overlapping_2d;
use crate::consts::MAX_TILES_BEFORE;
use crate::error::ConfigError;

/// Shape of the mirrored grid for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileLayout {
    /// Center of the top-left tile
    pub first_position: Vec2,
    pub first_flip_x: bool,
    pub first_flip_y: bool,
    /// Always odd
    pub row_count: u32,
    /// Always odd
    pub col_count: u32,
    pub tile_size: Vec2,
}

/// One copy of the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub row: u32,
    pub col: u32,
    /// Center of the tile
    pub position: Vec2,
    pub flip_x: bool,
    pub flip_y: bool,
}

impl Tile {
    /// Scale to draw this tile with: -1 on flipped axes
    pub fn scale(&self) -> Vec2 {
        Vec2::new(crate::flip_sign(self.flip_x), crate::flip_sign(self.flip_y))
    }
}

/// Tiles needed on one side of the center tile, never negative.
/// Kept as a float so oversized grids can be reported before any cast.
fn tiles_before(zoomed_axis: f32, tile_axis: f32) -> f32 {
    ((zoomed_axis - tile_axis) / 2.0 / tile_axis).ceil().max(0.0)
}

impl TileLayout {
    /// Lay out the grid for a canvas seen at `zoom`, centered on `anchor`
    pub fn compute(
        canvas_size: Vec2,
        anchor: Vec2,
        tile_size: Vec2,
        zoom: f32,
    ) -> Result<Self, ConfigError> {
        if !(tile_size.x > 0.0 && tile_size.y > 0.0) || !tile_size.is_finite() {
            return Err(ConfigError::InvalidTileSize {
                width: tile_size.x,
                height: tile_size.y,
            });
        }
        if !(zoom > 0.0) || !zoom.is_finite() {
            return Err(ConfigError::InvalidZoom(zoom));
        }
        if !(canvas_size.x >= 0.0 && canvas_size.y >= 0.0) || !canvas_size.is_finite() {
            return Err(ConfigError::InvalidCanvasSize {
                width: canvas_size.x,
                height: canvas_size.y,
            });
        }

        let zoomed = canvas_size / zoom;
        let cols_before = tiles_before(zoomed.x, tile_size.x);
        let rows_before = tiles_before(zoomed.y, tile_size.y);
        let limit = MAX_TILES_BEFORE as f32;
        if !(cols_before <= limit && rows_before <= limit) {
            return Err(ConfigError::TooManyTiles {
                cols: 2.0 * cols_before + 1.0,
                rows: 2.0 * rows_before + 1.0,
            });
        }
        let (cols_before, rows_before) = (cols_before as u32, rows_before as u32);

        let first_position = Vec2::new(
            anchor.x - cols_before as f32 * tile_size.x,
            anchor.y - rows_before as f32 * tile_size.y,
        );

        Ok(Self {
            first_position,
            first_flip_x: cols_before % 2 != 0,
            first_flip_y: rows_before % 2 != 0,
            row_count: 2 * rows_before + 1,
            col_count: 2 * cols_before + 1,
            tile_size,
        })
    }

    /// Total number of tiles
    pub fn tile_count(&self) -> usize {
        self.row_count as usize * self.col_count as usize
    }

    /// Every tile, row by row
    pub fn tiles(&self) -> Tiles {
        Tiles {
            layout: *self,
            row: 0,
            col: 0,
        }
    }

    /// Tiles that intersect a viewport centered on `view_center`
    pub fn visible_tiles(&self, view_center: Vec2, view_size: Vec2) -> impl Iterator<Item = Tile> {
        let half_tile = self.tile_size * 0.5;
        let half_view = view_size * 0.5;
        self.tiles()
            .filter(move |t| is_overlapping_2d(t.position, half_tile, view_center, half_view))
    }
}

/// Iterator over a layout's tiles.
///
/// Flip parity toggles with every column (restarting from `first_flip_x` on
/// each row) and with every row.
#[derive(Debug, Clone)]
pub struct Tiles {
    layout: TileLayout,
    row: u32,
    col: u32,
}

impl Iterator for Tiles {
    type Item = Tile;

    fn next(&mut self) -> Option<Tile> {
        let layout = &self.layout;
        if self.row >= layout.row_count {
            return None;
        }

        let (row, col) = (self.row, self.col);
        let tile = Tile {
            row,
            col,
            position: layout.first_position
                + Vec2::new(col as f32, row as f32) * layout.tile_size,
            flip_x: layout.first_flip_x ^ (col % 2 == 1),
            flip_y: layout.first_flip_y ^ (row % 2 == 1),
        };

        self.col += 1;
        if self.col >= layout.col_count {
            self.col = 0;
            self.row += 1;
        }
        Some(tile)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let done = self.row as usize * self.layout.col_count as usize + self.col as usize;
        let left = self.layout.tile_count().saturating_sub(done);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Tiles {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tile() -> Vec2 {
        Vec2::new(200.0, 300.0)
    }

    #[test]
    fn test_tile_larger_than_canvas_is_single() {
        let layout = TileLayout::compute(Vec2::new(100.0, 100.0), Vec2::ZERO, tile(), 1.0).unwrap();
        assert_eq!((layout.row_count, layout.col_count), (1, 1));
        assert!(!layout.first_flip_x && !layout.first_flip_y);
        assert_eq!(layout.first_position, Vec2::ZERO);
    }

    #[test]
    fn test_zoomed_out_grid() {
        // Zoomed canvas 1000x1000: (1000-200)/2/200 = 2 cols, (1000-300)/2/300 -> 2 rows
        let layout =
            TileLayout::compute(Vec2::new(500.0, 500.0), Vec2::ZERO, tile(), 0.5).unwrap();
        assert_eq!(layout.col_count, 5);
        assert_eq!(layout.row_count, 5);
        assert!(!layout.first_flip_x);
        assert!(!layout.first_flip_y);
        assert_eq!(layout.first_position, Vec2::new(-400.0, -600.0));
    }

    #[test]
    fn test_odd_before_count_starts_flipped() {
        // Zoomed width 500: ceil(300/2/200) = 1
        let layout =
            TileLayout::compute(Vec2::new(500.0, 300.0), Vec2::new(10.0, 20.0), tile(), 1.0)
                .unwrap();
        assert_eq!(layout.col_count, 3);
        assert_eq!(layout.row_count, 1);
        assert!(layout.first_flip_x);
        assert!(!layout.first_flip_y);
        assert_eq!(layout.first_position, Vec2::new(-190.0, 20.0));
    }

    #[test]
    fn test_center_tile_is_unflipped_on_anchor() {
        let anchor = Vec2::new(7.0, -3.0);
        let layout = TileLayout::compute(Vec2::new(1920.0, 1080.0), anchor, tile(), 0.3).unwrap();
        let center = layout
            .tiles()
            .find(|t| t.row == layout.row_count / 2 && t.col == layout.col_count / 2)
            .unwrap();
        assert!((center.position - anchor).length() < 1e-3);
        assert!(!center.flip_x && !center.flip_y);
        assert_eq!(center.scale(), Vec2::ONE);
    }

    #[test]
    fn test_neighbours_alternate_flip() {
        let layout = TileLayout::compute(Vec2::new(1000.0, 1000.0), Vec2::ZERO, tile(), 0.5).unwrap();
        let tiles: Vec<Tile> = layout.tiles().collect();
        assert_eq!(tiles.len(), layout.tile_count());
        for pair in tiles.windows(2) {
            if pair[0].row == pair[1].row {
                assert_ne!(pair[0].flip_x, pair[1].flip_x);
                assert_eq!(pair[0].flip_y, pair[1].flip_y);
                assert!((pair[1].position.x - pair[0].position.x - 200.0).abs() < 1e-3);
            } else {
                // New row restarts x parity and toggles y parity
                assert_eq!(pair[1].flip_x, layout.first_flip_x);
                assert_ne!(pair[0].flip_y, pair[1].flip_y);
            }
        }
    }

    #[test]
    fn test_rejects_bad_tile_and_zoom() {
        assert!(matches!(
            TileLayout::compute(Vec2::ONE, Vec2::ZERO, Vec2::new(0.0, 10.0), 1.0),
            Err(ConfigError::InvalidTileSize { .. })
        ));
        assert!(matches!(
            TileLayout::compute(Vec2::ONE, Vec2::ZERO, Vec2::new(10.0, -1.0), 1.0),
            Err(ConfigError::InvalidTileSize { .. })
        ));
        assert_eq!(
            TileLayout::compute(Vec2::ONE, Vec2::ZERO, tile(), 0.0),
            Err(ConfigError::InvalidZoom(0.0))
        );
    }

    #[test]
    fn test_visible_tiles_culls_outer_ring() {
        // Zoomed canvas 1000x1000 but only a 200x300 window is looked at
        let layout = TileLayout::compute(Vec2::new(500.0, 500.0), Vec2::ZERO, tile(), 0.5).unwrap();
        let visible: Vec<Tile> = layout.visible_tiles(Vec2::ZERO, Vec2::new(100.0, 100.0)).collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].position, Vec2::ZERO);

        let all = layout.visible_tiles(Vec2::ZERO, Vec2::new(1000.0, 1000.0)).count();
        assert_eq!(all, layout.tile_count());
    }

    #[test]
    fn test_size_hint_counts_down() {
        let layout = TileLayout::compute(Vec2::new(500.0, 300.0), Vec2::ZERO, tile(), 1.0).unwrap();
        let mut tiles = layout.tiles();
        assert_eq!(tiles.len(), 3);
        tiles.next();
        assert_eq!(tiles.len(), 2);
    }

    #[test]
    fn test_extreme_zoom_out_is_rejected() {
        let result = TileLayout::compute(Vec2::new(1000.0, 1000.0), Vec2::ZERO, tile(), 1e-9);
        assert!(matches!(result, Err(ConfigError::TooManyTiles { .. })));
    }

    #[test]
    fn test_grid_at_tile_limit() {
        // Zoomed width 200 * 1025 gives exactly MAX_TILES_BEFORE columns each side
        let canvas = Vec2::new(200.0 * (2 * MAX_TILES_BEFORE + 1) as f32, 300.0);
        let layout = TileLayout::compute(canvas, Vec2::ZERO, tile(), 1.0).unwrap();
        assert_eq!(layout.col_count, 2 * MAX_TILES_BEFORE + 1);
        assert_eq!(layout.row_count, 1);

        let wider = canvas + Vec2::new(2.0 * 200.0, 0.0);
        assert!(matches!(
            TileLayout::compute(wider, Vec2::ZERO, tile(), 1.0),
            Err(ConfigError::TooManyTiles { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_counts_are_odd(
            cw in 1.0f32..4000.0,
            ch in 1.0f32..4000.0,
            tw in 1.0f32..1000.0,
            th in 1.0f32..1000.0,
            zoom in 0.05f32..10.0,
        ) {
            let layout = TileLayout::compute(
                Vec2::new(cw, ch),
                Vec2::ZERO,
                Vec2::new(tw, th),
                zoom,
            ).unwrap();
            prop_assert_eq!(layout.row_count % 2, 1);
            prop_assert_eq!(layout.col_count % 2, 1);
            // The grid covers the zoomed canvas
            prop_assert!(layout.col_count as f32 * tw >= cw / zoom * 0.999);
            prop_assert!(layout.row_count as f32 * th >= ch / zoom * 0.999);
        }
    }
}
