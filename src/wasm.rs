//! Browser bindings
//!
//! The page owns the canvases and the event listeners. It forwards input to
//! `WasmSim`, calls `frame` once per animation frame, and replays the returned
//! draw commands on its 2D contexts.

use glam::Vec2;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::renderer::{Canvas, CommandRecorder, DrawCommand, render_frame};
use crate::settings::Settings;
use crate::sim::{FrameInput, SimContext, SimEvent, tick};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Already initialized when the module is instantiated twice
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Mirror Bounce starting...");
}

/// Everything the page needs to draw one frame
#[derive(Serialize)]
struct FrameOutput<'a> {
    arena: &'a [DrawCommand],
    paths: &'a [DrawCommand],
    screen: &'a [DrawCommand],
    events: &'a [SimEvent],
    tiles: usize,
}

#[wasm_bindgen]
pub struct WasmSim {
    ctx: SimContext,
    input: FrameInput,
    arena: CommandRecorder,
    paths: CommandRecorder,
    screen: CommandRecorder,
}

#[wasm_bindgen]
impl WasmSim {
    /// `path_margin` is the extra border of the path canvas around the arena
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, path_margin: f32, seed: u64) -> Result<WasmSim, JsValue> {
        let settings = Settings::load();
        let ctx = SimContext::new(settings, Vec2::new(width, height), seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let tile = ctx.tile_size();
        log::info!("Simulation ready: arena {}x{}, seed {}", tile.x, tile.y, seed);
        Ok(Self {
            arena: CommandRecorder::new(tile),
            paths: CommandRecorder::new(tile + Vec2::splat(path_margin * 2.0)),
            screen: CommandRecorder::new(Vec2::new(width, height)),
            input: FrameInput::default(),
            ctx,
        })
    }

    pub fn mouse_pressed(&mut self, x: f32, y: f32) {
        self.input.press = Some(Vec2::new(x, y));
    }

    pub fn mouse_released(&mut self, x: f32, y: f32) {
        self.input.release = Some(Vec2::new(x, y));
    }

    pub fn scrolled(&mut self, delta: f32) {
        self.input.scroll += delta;
    }

    pub fn resized(&mut self, width: f32, height: f32) {
        self.input.canvas_size = Some(Vec2::new(width, height));
        self.screen.resize(Vec2::new(width, height));
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.input.idle_mode = idle;
    }

    /// Slider inputs; an invalid combination is rejected inside `tick`
    pub fn set_sliders(&mut self, ball_lifetime: f32, arena_width: f32, arena_height: f32) {
        let settings = Settings {
            ball_lifetime,
            arena_width,
            arena_height,
            ..self.ctx.settings.clone()
        };
        self.input.settings = Some(settings);
    }

    /// Restart the idle launcher; the same seed replays the same launches
    pub fn reseed(&mut self, seed: u64) {
        self.ctx.reseed(seed);
    }

    pub fn seed(&self) -> u64 {
        self.ctx.seed
    }

    pub fn zoom(&self) -> f32 {
        self.ctx.zoom
    }

    pub fn active_balls(&self) -> usize {
        self.ctx.pool.active_count()
    }

    /// Advance by `dt` seconds and return the frame as JSON
    pub fn frame(&mut self, dt: f32) -> Result<String, JsValue> {
        let mut input = std::mem::take(&mut self.input);
        input.dt = dt;
        // Sticky across frames
        self.input.idle_mode = input.idle_mode;

        let settings_changed = input.settings.is_some();
        let events = tick(&mut self.ctx, &input);
        if settings_changed {
            let tile = self.ctx.tile_size();
            let margin = (self.paths.size() - self.arena.size()) * 0.5;
            self.arena.resize(tile);
            self.paths.resize(tile + margin * 2.0);
            self.ctx.settings.save();
        }

        self.arena.take();
        self.paths.take();
        self.screen.take();
        let tiles = render_frame(&self.ctx, &mut self.arena, &mut self.paths, &mut self.screen)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let output = FrameOutput {
            arena: self.arena.commands(),
            paths: self.paths.commands(),
            screen: self.screen.commands(),
            events: &events,
            tiles,
        };
        serde_json::to_string(&output).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Arena circles of the last frame as packed `CircleInstance`s
    pub fn arena_circles(&self) -> Vec<f32> {
        bytemuck::cast_slice(&self.arena.circle_instances()).to_vec()
    }

    /// Path lines of the last frame as packed `LineInstance`s
    pub fn path_lines(&self) -> Vec<f32> {
        bytemuck::cast_slice(&self.paths.line_instances()).to_vec()
    }
}
