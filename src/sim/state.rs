//! Simulation context
//!
//! Everything that changes between frames lives here and is owned by the
//! frame driver: tunables, the particle pool, zoom, drag state and the clock.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Bounds;
use super::particle::SpawnParams;
use super::pool::{Insertion, ParticlePool};
use crate::consts::MAX_TILES_BEFORE;
use crate::error::ConfigError;
use crate::settings::Settings;
use crate::view::launch::map_launch;
use crate::view::tiles::TileLayout;

/// Something the host may want to react to (sound, UI)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimEvent {
    /// A ball finished its first step; `pan` is the stereo position
    Spawned { slot: usize, pan: f32 },
    /// A ball bounced off a wall
    Contact { slot: usize, point: Vec2 },
    /// A ball's lifetime ran out
    Expired { slot: usize },
    /// A drag (or the idle launcher) put a ball into the pool
    Launched { slot: usize, reused: bool },
    /// Zoom factor changed
    Zoomed { zoom: f32 },
}

/// Explicit simulation state, passed by reference into tick and render
#[derive(Debug, Clone)]
pub struct SimContext {
    pub settings: Settings,
    pub pool: ParticlePool,
    /// Canvas pixels per arena unit
    pub zoom: f32,
    /// Host canvas size in pixels
    pub canvas_size: Vec2,
    /// Press point of the drag in progress (view frame)
    pub drag_start: Option<Vec2>,
    /// Simulation clock in seconds
    pub now: f64,
    /// Seed for the idle launcher
    pub seed: u64,
    pub(super) rng: Pcg32,
    pub(super) last_idle_launch: f64,
}

impl SimContext {
    pub fn new(settings: Settings, canvas_size: Vec2, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;
        if !(canvas_size.x >= 0.0 && canvas_size.y >= 0.0) || !canvas_size.is_finite() {
            return Err(ConfigError::InvalidCanvasSize {
                width: canvas_size.x,
                height: canvas_size.y,
            });
        }
        let mut ctx = Self {
            pool: ParticlePool::new(settings.max_particles),
            settings,
            zoom: 1.0,
            canvas_size,
            drag_start: None,
            now: 0.0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            last_idle_launch: f64::NEG_INFINITY,
        };
        ctx.zoom = ctx.clamp_zoom(1.0);
        Ok(ctx)
    }

    /// Restart the idle launcher's random sequence from `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        log::info!("Idle launcher reseeded with {}", seed);
    }

    /// Smallest zoom the tile grid can be laid out at for the current canvas.
    ///
    /// Leaves one tile of slack per side under `MAX_TILES_BEFORE` so float
    /// rounding in the layout never crosses the limit.
    pub fn grid_min_zoom(&self) -> f32 {
        let tiles_across = (2 * MAX_TILES_BEFORE - 1) as f32;
        let per_axis = self.canvas_size / (self.tile_size() * tiles_across);
        per_axis.max_element()
    }

    /// Clamp into the configured range, never below what the grid supports.
    /// The grid floor wins over `max_zoom` on absurdly small arenas.
    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        self.settings.clamp_zoom(zoom).max(self.grid_min_zoom())
    }

    /// Size of the arena, which is also the size of one tile
    pub fn tile_size(&self) -> Vec2 {
        self.settings.arena_size()
    }

    pub fn arena_bounds(&self) -> Bounds {
        Bounds::from_size(self.tile_size())
    }

    /// Mirrored tile grid for the current zoom, centered on the canvas
    pub fn layout(&self) -> Result<TileLayout, ConfigError> {
        TileLayout::compute(self.canvas_size, Vec2::ZERO, self.tile_size(), self.zoom)
    }

    /// Canvas size in arena units
    pub fn view_size(&self) -> Vec2 {
        self.canvas_size / self.zoom
    }

    /// Replace the tunables.
    ///
    /// A capacity change resizes the pool. An arena change clears it, since
    /// live balls would otherwise sit outside their new bounds.
    pub fn apply_settings(&mut self, settings: Settings) -> Result<(), ConfigError> {
        settings.validate()?;

        if settings.max_particles != self.settings.max_particles {
            log::info!(
                "Particle pool capacity {} -> {}",
                self.settings.max_particles,
                settings.max_particles
            );
            self.pool.resize(settings.max_particles);
        }
        if settings.arena_size() != self.settings.arena_size() {
            log::info!(
                "Arena resized to {}x{}, clearing {} balls",
                settings.arena_width,
                settings.arena_height,
                self.pool.len()
            );
            self.pool.clear();
        }

        self.settings = settings;
        self.zoom = self.clamp_zoom(self.zoom);
        Ok(())
    }

    /// Apply a scroll delta to the zoom factor. Positive deltas zoom out.
    pub fn zoom_by(&mut self, scroll_delta: f32) -> f32 {
        let factor = (-scroll_delta * self.settings.zoom_sensitivity).exp();
        self.zoom = self.clamp_zoom(self.zoom * factor);
        self.zoom
    }

    /// Put a ball into the pool with the current lifetime and radius
    pub fn spawn(&mut self, position: Vec2, direction: Vec2, speed: f32) -> Insertion {
        let params = SpawnParams::new(position, direction, speed, self.arena_bounds())
            .with_radius(self.settings.ball_radius)
            .with_lifetime(self.settings.ball_lifetime);
        self.pool.launch(params, self.now)
    }

    /// Launch from a drag given in view coordinates
    pub fn launch(&mut self, press: Vec2, release: Vec2) -> Option<Insertion> {
        let launch = map_launch(press, release, self.tile_size())?;
        let speed = launch.velocity.length() * self.settings.launch_speed_scale;
        let insertion = self.spawn(launch.position, launch.velocity, speed);
        log::debug!(
            "Launched ball in slot {} at {:?} (speed {:.1}, reused: {})",
            insertion.slot,
            launch.position,
            speed,
            insertion.reused
        );
        Some(insertion)
    }
}
