//! Host canvas capability
//!
//! The host owns the actual pixels. All the simulation needs is a surface it
//! can draw circles and lines on, a transform stack, and a way to stamp a
//! captured surface onto another.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Offscreen surfaces the frame is composed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// One arena's worth of balls; replicated over the tile grid
    Arena,
    /// Travelled paths, drawn unmirrored
    Paths,
}

/// RGB color, 0-255
pub type Rgb = [u8; 3];

/// Drawing primitives provided by the host
pub trait Canvas {
    /// Surface size in pixels
    fn size(&self) -> Vec2;

    fn clear(&mut self);

    /// Filled circle with a `stroke` outline of `stroke_width`; alpha is 0-255
    /// and applies to both
    fn draw_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        stroke_width: f32,
        fill: Rgb,
        stroke: Rgb,
        alpha: f32,
    );

    fn draw_line(&mut self, from: Vec2, to: Vec2, stroke_width: f32, color: Rgb, alpha: f32);

    fn push(&mut self);

    fn pop(&mut self);

    fn translate(&mut self, offset: Vec2);

    /// Non-uniform scale; negative components mirror
    fn scale(&mut self, scale: Vec2);

    /// Draw a captured surface of `size` centered on the current origin
    fn draw_surface(&mut self, surface: Surface, size: Vec2);
}
