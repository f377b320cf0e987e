//! Mirror Bounce entry point
//!
//! In the browser the page drives `mirror_bounce::wasm::WasmSim`. Natively
//! this runs a headless idle-mode session and reports what would be drawn.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::Path;
    use std::time::Instant;

    use glam::Vec2;
    use mirror_bounce::renderer::{Canvas, CommandRecorder, render_frame};
    use mirror_bounce::sim::{FrameInput, SimContext, SimEvent, tick};
    use mirror_bounce::{ConfigError, Settings};

    /// Frames per second of the headless session
    const FPS: u32 = 60;
    /// Seconds to simulate
    const SESSION_SECONDS: u32 = 12;
    const CANVAS_SIZE: Vec2 = Vec2::new(1280.0, 720.0);
    const PATH_MARGIN: f32 = 40.0;

    fn load_settings() -> Result<Settings, ConfigError> {
        match std::env::args().nth(1) {
            Some(path) => Settings::load_from_path(Path::new(&path)),
            None => {
                log::info!("Using default settings");
                Ok(Settings::default())
            }
        }
    }

    pub fn run() -> Result<(), ConfigError> {
        let settings = load_settings()?;
        let mut ctx = SimContext::new(settings, CANVAS_SIZE, 0x5eed)?;
        log::info!("Simulation initialized with seed: {}", ctx.seed);

        let tile = ctx.tile_size();
        let mut arena = CommandRecorder::new(tile);
        let mut paths = CommandRecorder::new(tile + Vec2::splat(PATH_MARGIN * 2.0));
        let mut screen = CommandRecorder::new(CANVAS_SIZE);

        let dt = 1.0 / FPS as f32;
        let started = Instant::now();
        let (mut launches, mut contacts, mut expired) = (0usize, 0usize, 0usize);

        for frame in 0..SESSION_SECONDS * FPS {
            // Zoom out slowly so the mirrored grid grows over the session
            let input = FrameInput {
                dt,
                idle_mode: true,
                scroll: 2.0,
                ..Default::default()
            };

            for event in tick(&mut ctx, &input) {
                match event {
                    SimEvent::Launched { .. } => launches += 1,
                    SimEvent::Contact { .. } => contacts += 1,
                    SimEvent::Expired { .. } => expired += 1,
                    SimEvent::Spawned { slot, pan } => {
                        log::debug!("Ball {} spawned (pan {:+.2})", slot, pan)
                    }
                    SimEvent::Zoomed { .. } => {}
                }
            }

            arena.take();
            paths.take();
            screen.take();
            let tiles = render_frame(&ctx, &mut arena, &mut paths, &mut screen)?;

            if (frame + 1) % FPS == 0 {
                log::info!(
                    "t={:>5.2}s zoom={:.3} tiles={:>3} balls={:>2}/{} paths={:>3} lines",
                    ctx.now,
                    ctx.zoom,
                    tiles,
                    ctx.pool.active_count(),
                    ctx.pool.capacity(),
                    paths.line_instances().len(),
                );
            }
        }

        log::info!(
            "Session done in {:.1?}: {} launches, {} wall contacts, {} expired, path surface {:?}",
            started.elapsed(),
            launches,
            contacts,
            expired,
            paths.size()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Mirror Bounce (native) starting...");
    log::info!("Native mode is headless - build for wasm32 to play in the browser");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is mirror_bounce::wasm::start, this is just to satisfy the compiler
}
