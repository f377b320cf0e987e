//! Per-frame simulation tick
//!
//! Applies one frame of host input to the context and advances every ball.

use glam::Vec2;
use rand::Rng;

use super::particle::ParticleEvent;
use super::state::{SimContext, SimEvent};
use crate::consts::{IDLE_LAUNCH_INTERVAL, IDLE_MAX_SPEED, IDLE_MIN_SPEED};
use crate::settings::Settings;
use crate::unit_from_angle;
use crate::view::launch::screen_to_view;

/// Input gathered by the host for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Seconds since the previous frame
    pub dt: f32,
    /// Mouse press position (canvas pixels)
    pub press: Option<Vec2>,
    /// Mouse release position (canvas pixels)
    pub release: Option<Vec2>,
    /// Scroll wheel delta; positive zooms out
    pub scroll: f32,
    /// New slider values
    pub settings: Option<Settings>,
    /// New canvas size (pixels)
    pub canvas_size: Option<Vec2>,
    /// Idle/demo mode - launch random balls on a timer
    pub idle_mode: bool,
}

/// Advance the simulation by one frame
pub fn tick(ctx: &mut SimContext, input: &FrameInput) -> Vec<SimEvent> {
    let mut events = Vec::new();

    if let Some(settings) = &input.settings {
        if let Err(e) = ctx.apply_settings(settings.clone()) {
            log::warn!("Rejected settings change: {}", e);
        }
    }

    if let Some(size) = input.canvas_size {
        if size.x >= 0.0 && size.y >= 0.0 && size.is_finite() {
            ctx.canvas_size = size;
            ctx.zoom = ctx.clamp_zoom(ctx.zoom);
        } else {
            log::warn!("Ignoring invalid canvas size {:?}", size);
        }
    }

    if input.scroll != 0.0 {
        let zoom = ctx.zoom_by(input.scroll);
        events.push(SimEvent::Zoomed { zoom });
    }

    // Press and release are converted with the zoom in effect when they happen
    if let Some(press) = input.press {
        ctx.drag_start = Some(screen_to_view(press, ctx.canvas_size, ctx.zoom));
    }
    if let Some(release) = input.release {
        let release = screen_to_view(release, ctx.canvas_size, ctx.zoom);
        match ctx.drag_start.take() {
            Some(press) => {
                if let Some(ins) = ctx.launch(press, release) {
                    events.push(SimEvent::Launched {
                        slot: ins.slot,
                        reused: ins.reused,
                    });
                }
            }
            None => log::debug!("Release without press ignored"),
        }
    }

    if input.idle_mode && ctx.now - ctx.last_idle_launch >= IDLE_LAUNCH_INTERVAL {
        ctx.last_idle_launch = ctx.now;
        events.push(idle_launch(ctx));
    }

    let dt = input.dt.max(0.0);
    ctx.now += dt as f64;

    for (slot, event) in ctx.pool.step_all(dt, ctx.now) {
        events.push(match event {
            ParticleEvent::Spawned { pan } => SimEvent::Spawned { slot, pan },
            ParticleEvent::Contact { point } => {
                log::trace!("Ball {} hit wall at {:?}", slot, point);
                SimEvent::Contact { slot, point }
            }
            ParticleEvent::Expired => SimEvent::Expired { slot },
        });
    }

    events
}

/// Launch a ball from a random point in a random direction
fn idle_launch(ctx: &mut SimContext) -> SimEvent {
    let size = ctx.tile_size();
    let position = Vec2::new(
        ctx.rng.random_range(0.0..size.x),
        ctx.rng.random_range(0.0..size.y),
    );
    let angle = ctx.rng.random_range(0.0..std::f32::consts::TAU);
    let speed = ctx.rng.random_range(IDLE_MIN_SPEED..IDLE_MAX_SPEED);

    let ins = ctx.spawn(position, unit_from_angle(angle), speed);
    SimEvent::Launched {
        slot: ins.slot,
        reused: ins.reused,
    }
}
