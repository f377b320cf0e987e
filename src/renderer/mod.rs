//! Rendering facade
//!
//! Pixels belong to the host. This module decides what to draw and where,
//! and talks to the host through the `Canvas` trait.

pub mod canvas;
pub mod commands;
pub mod frame;

pub use canvas::{Canvas, Rgb, Surface};
pub use commands::{CircleInstance, CommandRecorder, DrawCommand, LineInstance};
pub use frame::{draw_balls, draw_paths, draw_tiles, render_frame};

/// Colors for scene elements
pub mod colors {
    use super::Rgb;

    pub const BALL: Rgb = [254, 223, 83];
    pub const BALL_OUTLINE: Rgb = [51, 51, 51];
    pub const PATH: Rgb = [0, 0, 30];
    pub const PREDICTION: Rgb = [0, 255, 255];
}
