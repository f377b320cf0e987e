//! Slingshot launch mapping
//!
//! Drags can start and end over any mirrored tile. Only the canonical tile is
//! simulated, so the release point is folded back into it and the velocity is
//! mirrored to match the flips of the tile the player actually touched.
//!
//! Input points live in the view frame: relative to the anchor (the center of
//! the canonical tile) and already divided by the zoom factor.

use glam::Vec2;

use crate::wrap_positive;

/// A launch folded into canonical tile coordinates (`[0, w) x [0, h)`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Convert a canvas pixel position to the view frame
pub fn screen_to_view(point: Vec2, canvas_size: Vec2, zoom: f32) -> Vec2 {
    (point - canvas_size * 0.5) / zoom
}

/// Whether the tile under `point` is mirrored on each axis
pub fn mirror_parity(point: Vec2, tile_size: Vec2) -> (bool, bool) {
    let shifted = point + tile_size * 0.5;
    let odd = |v: f32, size: f32| (v / size).floor().rem_euclid(2.0) != 0.0;
    (odd(shifted.x, tile_size.x), odd(shifted.y, tile_size.y))
}

/// Fold a view-frame point into the canonical tile.
///
/// Returns the tile-local position and the flip scale (±1 per axis) of the
/// tile the point was in.
pub fn wrap_to_tile(point: Vec2, tile_size: Vec2) -> (Vec2, Vec2) {
    let (flip_x, flip_y) = mirror_parity(point, tile_size);
    let scale = Vec2::new(crate::flip_sign(flip_x), crate::flip_sign(flip_y));
    let local = wrap_positive(point * scale + tile_size * 0.5, tile_size);
    (local, scale)
}

/// Map a drag from `press` to `release` into a launch.
///
/// The ball starts under the release point and flies back toward the press
/// point. Returns `None` for a zero-length drag or a degenerate tile.
pub fn map_launch(press: Vec2, release: Vec2, tile_size: Vec2) -> Option<Launch> {
    if !(tile_size.x > 0.0 && tile_size.y > 0.0) {
        log::warn!("Launch ignored: invalid tile size {:?}", tile_size);
        return None;
    }
    let drag = press - release;
    if drag.length_squared() == 0.0 {
        return None;
    }

    let (position, scale) = wrap_to_tile(release, tile_size);
    Some(Launch {
        position,
        velocity: drag * scale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tile() -> Vec2 {
        Vec2::new(200.0, 300.0)
    }

    #[test]
    fn test_canonical_tile_is_shifted_only() {
        let (local, scale) = wrap_to_tile(Vec2::new(-50.0, 20.0), tile());
        assert_eq!(scale, Vec2::ONE);
        assert!((local - Vec2::new(50.0, 170.0)).length() < 1e-4);
    }

    #[test]
    fn test_right_neighbour_is_mirrored() {
        // 10 units right of the seam lands 10 units left of the right wall
        let (local, scale) = wrap_to_tile(Vec2::new(110.0, 0.0), tile());
        assert_eq!(scale, Vec2::new(-1.0, 1.0));
        assert!((local - Vec2::new(190.0, 150.0)).length() < 1e-4);
    }

    #[test]
    fn test_two_tiles_over_is_not_mirrored() {
        let (_, scale) = wrap_to_tile(Vec2::new(0.0, 600.0), tile());
        assert_eq!(scale, Vec2::ONE);
        let (_, scale) = wrap_to_tile(Vec2::new(0.0, -310.0), tile());
        assert_eq!(scale, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_launch_velocity_mirrored() {
        let press = Vec2::new(-130.0, 10.0);
        let release = Vec2::new(-110.0, 0.0);
        let launch = map_launch(press, release, tile()).unwrap();
        // Left neighbour is flipped in x
        assert_eq!(launch.velocity, Vec2::new(20.0, 10.0));
        assert!((launch.position - Vec2::new(10.0, 150.0)).length() < 1e-4);
    }

    #[test]
    fn test_zero_drag_rejected() {
        let p = Vec2::new(5.0, 5.0);
        assert_eq!(map_launch(p, p, tile()), None);
        assert_eq!(map_launch(Vec2::ZERO, p, Vec2::ZERO), None);
    }

    #[test]
    fn test_screen_to_view() {
        let v = screen_to_view(Vec2::new(500.0, 400.0), Vec2::new(800.0, 600.0), 0.5);
        assert_eq!(v, Vec2::new(200.0, 200.0));
    }

    proptest! {
        #[test]
        fn prop_wrap_is_idempotent(x in 0.0f32..199.0, y in 0.0f32..299.0) {
            let local = Vec2::new(x, y);
            let (wrapped, scale) = wrap_to_tile(local - tile() * 0.5, tile());
            prop_assert_eq!(scale, Vec2::ONE);
            prop_assert!((wrapped - local).length() < 1e-3);
        }

        #[test]
        fn prop_wrap_lands_in_tile(x in -5000.0f32..5000.0, y in -5000.0f32..5000.0) {
            let (local, _) = wrap_to_tile(Vec2::new(x, y), tile());
            prop_assert!(local.x >= 0.0 && local.x <= 200.0);
            prop_assert!(local.y >= 0.0 && local.y <= 300.0);
        }
    }
}
