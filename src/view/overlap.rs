//! Axis-aligned bounding box overlap tests
//!
//! Boxes are given by center and half extents.

use glam::Vec2;

/// Do two intervals `[pos - extent, pos + extent]` overlap? Touching counts.
#[inline]
pub fn is_overlapping_1d(pos1: f32, extent1: f32, pos2: f32, extent2: f32) -> bool {
    let (min1, max1) = (pos1 - extent1, pos1 + extent1);
    let (min2, max2) = (pos2 - extent2, pos2 + extent2);
    !(min1 > max2 || max1 < min2)
}

/// Do two centered axis-aligned boxes overlap?
#[inline]
pub fn is_overlapping_2d(pos1: Vec2, extents1: Vec2, pos2: Vec2, extents2: Vec2) -> bool {
    is_overlapping_1d(pos1.x, extents1.x, pos2.x, extents2.x)
        && is_overlapping_1d(pos1.y, extents1.y, pos2.y, extents2.y)
}
