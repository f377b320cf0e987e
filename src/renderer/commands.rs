//! Draw command recording
//!
//! A `Canvas` that writes everything down instead of drawing. The wasm host
//! replays the commands on a 2D context, and tests inspect them directly.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::canvas::{Canvas, Rgb, Surface};

/// One recorded canvas call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear,
    Circle {
        center: Vec2,
        radius: f32,
        stroke_width: f32,
        fill: Rgb,
        stroke: Rgb,
        alpha: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        stroke_width: f32,
        color: Rgb,
        alpha: f32,
    },
    Push,
    Pop,
    Translate {
        offset: Vec2,
    },
    Scale {
        scale: Vec2,
    },
    DrawSurface {
        surface: Surface,
        size: Vec2,
    },
}

/// Circle instance for a batched host renderer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    pub center: [f32; 2],
    pub radius: f32,
    pub stroke_width: f32,
    /// RGBA, 0-1
    pub color: [f32; 4],
    /// Outline RGBA, 0-1
    pub stroke_color: [f32; 4],
}

/// Line instance for a batched host renderer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineInstance {
    pub from: [f32; 2],
    pub to: [f32; 2],
    pub width: f32,
    pub _pad: [f32; 3],
    /// RGBA, 0-1
    pub color: [f32; 4],
}

fn rgba(color: Rgb, alpha: f32) -> [f32; 4] {
    [
        color[0] as f32 / 255.0,
        color[1] as f32 / 255.0,
        color[2] as f32 / 255.0,
        (alpha / 255.0).clamp(0.0, 1.0),
    ]
}

/// Canvas that records every call
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    size: Vec2,
    commands: Vec<DrawCommand>,
    depth: usize,
}

impl CommandRecorder {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            commands: Vec::new(),
            depth: 0,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Hand the recorded commands over, leaving the recorder empty
    pub fn take(&mut self) -> Vec<DrawCommand> {
        self.depth = 0;
        std::mem::take(&mut self.commands)
    }

    pub fn resize(&mut self, size: Vec2) {
        self.size = size;
    }

    /// Current transform stack depth; zero after a balanced frame
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.commands)
    }

    /// Circles as instances. Transforms are ignored, so this is only
    /// meaningful for surfaces drawn without push/translate/scale.
    pub fn circle_instances(&self) -> Vec<CircleInstance> {
        self.commands
            .iter()
            .filter_map(|c| match *c {
                DrawCommand::Circle {
                    center,
                    radius,
                    stroke_width,
                    fill,
                    stroke,
                    alpha,
                } => Some(CircleInstance {
                    center: center.to_array(),
                    radius,
                    stroke_width,
                    color: rgba(fill, alpha),
                    stroke_color: rgba(stroke, alpha),
                }),
                _ => None,
            })
            .collect()
    }

    /// Lines as instances, with the same caveat as `circle_instances`
    pub fn line_instances(&self) -> Vec<LineInstance> {
        self.commands
            .iter()
            .filter_map(|c| match *c {
                DrawCommand::Line {
                    from,
                    to,
                    stroke_width,
                    color,
                    alpha,
                } => Some(LineInstance {
                    from: from.to_array(),
                    to: to.to_array(),
                    width: stroke_width,
                    _pad: [0.0; 3],
                    color: rgba(color, alpha),
                }),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for CommandRecorder {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn draw_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        stroke_width: f32,
        fill: Rgb,
        stroke: Rgb,
        alpha: f32,
    ) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            stroke_width,
            fill,
            stroke,
            alpha,
        });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, stroke_width: f32, color: Rgb, alpha: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke_width,
            color,
            alpha,
        });
    }

    fn push(&mut self) {
        self.depth += 1;
        self.commands.push(DrawCommand::Push);
    }

    fn pop(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(DrawCommand::Pop);
    }

    fn translate(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::Translate { offset });
    }

    fn scale(&mut self, scale: Vec2) {
        self.commands.push(DrawCommand::Scale { scale });
    }

    fn draw_surface(&mut self, surface: Surface, size: Vec2) {
        self.commands.push(DrawCommand::DrawSurface { surface, size });
    }
}
