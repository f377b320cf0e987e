//! Mirror Bounce - bouncing balls in a mirrored, zoomable arena
//!
//! Core modules:
//! - `sim`: Particle simulation (bisection collision, pool, frame tick)
//! - `view`: Mirrored tile layout, launch mapping, overlap tests
//! - `renderer`: Host canvas facade and draw command recording
//! - `settings`: Slider-backed tunables with validation
//! - `error`: Configuration errors

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use error::ConfigError;
pub use settings::Settings;

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Bisection stops once the midpoint is this close to the edge
    pub const CONTACT_EPSILON: f32 = 0.5;
    /// Upper bound on bisection iterations per edge
    pub const MAX_BISECTION_STEPS: u32 = 64;

    /// Default arena (one tile) dimensions
    pub const ARENA_WIDTH: f32 = 200.0;
    pub const ARENA_HEIGHT: f32 = 300.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_LIFETIME: f32 = 5.0;
    /// Pool capacity
    pub const MAX_PARTICLES: usize = 32;
    /// Drag length (world units) to launch speed multiplier
    pub const LAUNCH_SPEED_SCALE: f32 = 2.0;

    /// Idle/demo launcher: seconds between launches and speed range
    pub const IDLE_LAUNCH_INTERVAL: f64 = 0.75;
    pub const IDLE_MIN_SPEED: f32 = 80.0;
    pub const IDLE_MAX_SPEED: f32 = 240.0;

    /// Zoom limits (1.0 = one arena pixel per canvas pixel)
    pub const MIN_ZOOM: f32 = 0.05;
    /// Lowest `min_zoom` the settings accept
    pub const ZOOM_FLOOR: f32 = 0.001;
    /// Most tiles on either side of the center tile, per axis
    pub const MAX_TILES_BEFORE: u32 = 512;
    pub const MAX_ZOOM: f32 = 4.0;
    /// Scroll delta to log-zoom factor
    pub const ZOOM_SENSITIVITY: f32 = 0.001;

    /// Stroke widths used when painting
    pub const BALL_STROKE: f32 = 2.0;
    pub const PATH_STROKE: f32 = 3.0;
    /// Maximum alpha value
    pub const FULL_ALPHA: f32 = 255.0;
}

/// Angle of a vector in radians, in (-π, π]
#[inline]
pub fn angle_of(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Unit vector pointing along `angle`
#[inline]
pub fn unit_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Component-wise modulo that always lands in `[0, m)`
#[inline]
pub fn wrap_positive(v: Vec2, m: Vec2) -> Vec2 {
    Vec2::new(v.x.rem_euclid(m.x), v.y.rem_euclid(m.y))
}

/// Scale factor (+1/-1) for a mirror flip
#[inline]
pub fn flip_sign(flip: bool) -> f32 {
    if flip { -1.0 } else { 1.0 }
}
