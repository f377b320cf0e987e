//! Mirrored viewport
//!
//! Maps between the single simulated arena and the infinitely mirrored grid
//! of copies the player sees.

pub mod launch;
pub mod overlap;
pub mod tiles;

pub use launch::{Launch, map_launch, mirror_parity, screen_to_view, wrap_to_tile};
pub use overlap::{is_overlapping_1d, is_overlapping_2d};
pub use tiles::{Tile, TileLayout, Tiles};
