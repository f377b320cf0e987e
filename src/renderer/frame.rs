//! Frame composition
//!
//! 1. Balls are painted into the arena surface.
//! 2. Their travelled paths go into the path surface.
//! 3. The arena surface is stamped onto the screen once per mirrored tile.

use glam::Vec2;

use super::canvas::{Canvas, Surface};
use super::colors;
use crate::consts::{BALL_STROKE, PATH_STROKE};
use crate::error::ConfigError;
use crate::sim::{Particle, SimContext};

/// Paint every active ball into the arena surface
pub fn draw_balls(ctx: &SimContext, arena: &mut dyn Canvas) {
    arena.clear();
    for (_, ball) in ctx.pool.iter_active() {
        draw_ball(arena, ball, ctx.now);
    }
}

fn draw_ball(canvas: &mut dyn Canvas, ball: &Particle, now: f64) {
    let alpha = ball.alpha(now);
    canvas.draw_circle(
        ball.position,
        ball.radius,
        BALL_STROKE,
        colors::BALL,
        colors::BALL_OUTLINE,
        alpha,
    );
}

/// Paint travelled paths and predicted lines into the path surface.
///
/// The path surface may be larger than the arena; the arena is centered on it.
pub fn draw_paths(ctx: &SimContext, paths: &mut dyn Canvas) {
    paths.clear();
    let offset = (paths.size() - ctx.tile_size()) * 0.5;
    for (_, ball) in ctx.pool.iter_active() {
        draw_path(paths, ball, offset, ctx.now);
    }
}

fn draw_path(canvas: &mut dyn Canvas, ball: &Particle, offset: Vec2, now: f64) {
    let alpha = ball.alpha(now);
    for (from, to) in ball.path_segments() {
        canvas.draw_line(from + offset, to + offset, PATH_STROKE, colors::PATH, alpha);
    }
    if let Some((from, to)) = ball.predicted_segment(now) {
        canvas.draw_line(from + offset, to + offset, PATH_STROKE, colors::PREDICTION, alpha);
    }
}

/// Stamp the arena surface over the visible part of the mirrored grid.
///
/// Returns the number of tiles drawn.
pub fn draw_tiles(ctx: &SimContext, screen: &mut dyn Canvas) -> Result<usize, ConfigError> {
    let layout = ctx.layout()?;
    let tile_size = ctx.tile_size();

    screen.clear();
    screen.push();
    screen.translate(ctx.canvas_size * 0.5);
    screen.scale(Vec2::splat(ctx.zoom));

    let mut drawn = 0;
    for tile in layout.visible_tiles(Vec2::ZERO, ctx.view_size()) {
        screen.push();
        screen.translate(tile.position);
        screen.scale(tile.scale());
        screen.draw_surface(Surface::Arena, tile_size);
        screen.pop();
        drawn += 1;
    }

    screen.pop();
    Ok(drawn)
}

/// Compose a full frame onto the three host surfaces
pub fn render_frame(
    ctx: &SimContext,
    arena: &mut dyn Canvas,
    paths: &mut dyn Canvas,
    screen: &mut dyn Canvas,
) -> Result<usize, ConfigError> {
    draw_balls(ctx, arena);
    draw_paths(ctx, paths);
    draw_tiles(ctx, screen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{CommandRecorder, DrawCommand};
    use crate::settings::Settings;
    use crate::sim::{FrameInput, tick};

    fn ctx(canvas: Vec2) -> SimContext {
        let settings = Settings {
            arena_width: 200.0,
            arena_height: 300.0,
            ..Default::default()
        };
        SimContext::new(settings, canvas, 1).unwrap()
    }

    fn run(ctx: &mut SimContext, frames: usize) {
        let input = FrameInput {
            dt: 1.0 / 60.0,
            ..Default::default()
        };
        for _ in 0..frames {
            tick(ctx, &input);
        }
    }

    #[test]
    fn test_balls_fade_with_age() {
        let mut ctx = ctx(Vec2::new(200.0, 300.0));
        ctx.spawn(Vec2::new(100.0, 150.0), Vec2::Y, 10.0);
        run(&mut ctx, 60);

        let mut arena = CommandRecorder::new(ctx.tile_size());
        draw_balls(&ctx, &mut arena);
        let circles = arena.circle_instances();
        assert_eq!(circles.len(), 1);
        let alpha = circles[0].color[3];
        assert!(alpha < 1.0 && alpha > 0.5);
    }

    #[test]
    fn test_balls_have_outline() {
        let mut ctx = ctx(Vec2::new(200.0, 300.0));
        ctx.spawn(Vec2::new(100.0, 150.0), Vec2::Y, 10.0);

        let mut arena = CommandRecorder::new(ctx.tile_size());
        draw_balls(&ctx, &mut arena);
        assert!(matches!(
            arena.commands()[1],
            DrawCommand::Circle {
                fill: colors::BALL,
                stroke: colors::BALL_OUTLINE,
                ..
            }
        ));
    }

    #[test]
    fn test_expired_balls_not_drawn() {
        let mut ctx = ctx(Vec2::new(200.0, 300.0));
        ctx.spawn(Vec2::new(100.0, 150.0), Vec2::Y, 10.0);
        run(&mut ctx, 400);

        let mut arena = CommandRecorder::new(ctx.tile_size());
        draw_balls(&ctx, &mut arena);
        assert_eq!(arena.commands(), &[DrawCommand::Clear]);
    }

    #[test]
    fn test_paths_are_offset_and_predicted() {
        let mut ctx = ctx(Vec2::new(200.0, 300.0));
        ctx.spawn(Vec2::new(100.0, 150.0), Vec2::X, 60.0);
        run(&mut ctx, 150);

        let mut paths = CommandRecorder::new(Vec2::new(240.0, 340.0));
        draw_paths(&ctx, &mut paths);
        let lines = paths.line_instances();
        // spawn -> contact, contact -> current, plus the prediction
        assert_eq!(lines.len(), 3);
        assert!((lines[0].from[0] - 120.0).abs() < 1e-3);
        assert!((lines[0].from[1] - 170.0).abs() < 1e-3);
        assert_eq!(lines[2].color[..3], [0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_tiles_balanced_and_counted() {
        let mut ctx = ctx(Vec2::new(1000.0, 1000.0));
        ctx.zoom = 1.0;
        let mut screen = CommandRecorder::new(ctx.canvas_size);
        let drawn = draw_tiles(&ctx, &mut screen).unwrap();

        let layout = ctx.layout().unwrap();
        assert_eq!(drawn, layout.tile_count());
        assert_eq!(screen.depth(), 0);
        let stamps = screen
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::DrawSurface { surface: Surface::Arena, .. }))
            .count();
        assert_eq!(stamps, drawn);
    }

    #[test]
    fn test_full_zoom_out_still_renders() {
        let settings = Settings {
            min_zoom: crate::consts::ZOOM_FLOOR,
            ..Default::default()
        };
        let mut ctx = SimContext::new(settings, Vec2::new(1920.0, 1080.0), 1).unwrap();
        let input = FrameInput {
            dt: 1.0 / 60.0,
            scroll: 1.0e6,
            ..Default::default()
        };
        tick(&mut ctx, &input);

        let mut arena = CommandRecorder::new(ctx.tile_size());
        let mut paths = CommandRecorder::new(ctx.tile_size());
        let mut screen = CommandRecorder::new(ctx.canvas_size);
        let drawn = render_frame(&ctx, &mut arena, &mut paths, &mut screen).unwrap();
        assert!(drawn > 1);
        assert_eq!(screen.depth(), 0);
    }

    #[test]
    fn test_center_tile_not_mirrored() {
        let ctx = ctx(Vec2::new(200.0, 300.0));
        let mut screen = CommandRecorder::new(ctx.canvas_size);
        assert_eq!(draw_tiles(&ctx, &mut screen).unwrap(), 1);
        assert!(screen
            .commands()
            .contains(&DrawCommand::Scale { scale: Vec2::ONE }));
    }
}
