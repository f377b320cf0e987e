//! Boundary collision detection and response
//!
//! The tricky part of the arena: instead of clamping a ball back inside, we
//! bisect between the last inside position and the overshooting one to find
//! where the ball actually crossed the wall, then reflect off that wall.

use glam::Vec2;

use crate::consts::{CONTACT_EPSILON, MAX_BISECTION_STEPS};
use crate::{angle_of, unit_from_angle};

/// Axis-aligned rectangle a particle is confined to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl Bounds {
    pub fn new(x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Bounds covering `[0, width] x [0, height]`
    pub fn from_size(size: Vec2) -> Self {
        Self::new(0.0, size.x, 0.0, size.y)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x_min && p.x <= self.x_max && p.y >= self.y_min && p.y <= self.y_max
    }

    /// The low and high edge on one axis
    fn edges(&self, axis: Axis) -> [Edge; 2] {
        match axis {
            Axis::X => [
                Edge::new(axis, Side::Low, self.x_min),
                Edge::new(axis, Side::High, self.x_max),
            ],
            Axis::Y => [
                Edge::new(axis, Side::Low, self.y_min),
                Edge::new(axis, Side::High, self.y_max),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Low,
    High,
}

/// One wall of the arena
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub axis: Axis,
    pub side: Side,
    pub value: f32,
}

impl Edge {
    pub fn new(axis: Axis, side: Side, value: f32) -> Self {
        Self { axis, side, value }
    }

    /// Strictly past the wall; sitting exactly on it counts as inside
    #[inline]
    pub fn is_outside(&self, p: Vec2) -> bool {
        let c = self.axis.of(p);
        match self.side {
            Side::Low => c < self.value,
            Side::High => c > self.value,
        }
    }

    /// Unit normal pointing back into the arena
    pub fn normal(&self) -> Vec2 {
        match (self.axis, self.side) {
            (Axis::X, Side::Low) => Vec2::X,
            (Axis::X, Side::High) => Vec2::NEG_X,
            (Axis::Y, Side::Low) => Vec2::Y,
            (Axis::Y, Side::High) => Vec2::NEG_Y,
        }
    }
}

/// Bisect the segment between an outside and an inside point until the
/// midpoint is within `CONTACT_EPSILON` of the edge.
///
/// Gives up after `MAX_BISECTION_STEPS` and returns the best estimate, which
/// only happens when `inside` was not actually inside.
pub fn bisect_crossing(outside: Vec2, inside: Vec2, edge: &Edge) -> Vec2 {
    let mut outside = outside;
    let mut inside = inside;
    let mut mid = (outside + inside) * 0.5;

    for _ in 0..MAX_BISECTION_STEPS {
        if (edge.axis.of(mid) - edge.value).abs() <= CONTACT_EPSILON {
            break;
        }
        if edge.is_outside(mid) {
            outside = mid;
        } else {
            inside = mid;
        }
        mid = (outside + inside) * 0.5;
    }

    mid
}

/// Outcome of checking a moved particle against its bounds
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryHit {
    /// Position corrected to the crossing point(s)
    pub position: Vec2,
    /// Normals of every wall crossed, x wall first
    pub normals: Vec<Vec2>,
}

impl BoundaryHit {
    pub fn is_contact(&self) -> bool {
        !self.normals.is_empty()
    }
}

/// Resolve a step from `previous` to `position` against `bounds`.
///
/// Axes are resolved independently, x first. The y bracket starts from the
/// x-corrected position, so a corner hit yields two normals.
pub fn resolve_bounds(position: Vec2, previous: Vec2, bounds: &Bounds) -> BoundaryHit {
    let mut position = position;
    let mut normals = Vec::new();

    for axis in [Axis::X, Axis::Y] {
        // Only one side of an axis can be crossed per step
        if let Some(edge) = bounds
            .edges(axis)
            .into_iter()
            .find(|edge| edge.is_outside(position))
        {
            position = bisect_crossing(position, previous, &edge);
            normals.push(edge.normal());
        }
    }

    BoundaryHit { position, normals }
}

/// Combine wall normals by averaging their angles (not their vectors).
///
/// Two perpendicular walls average to the diagonal between them. Returns
/// `None` when there is nothing to average.
pub fn average_normal(normals: &[Vec2]) -> Option<Vec2> {
    if normals.is_empty() {
        return None;
    }
    let mean = normals.iter().map(|n| angle_of(*n)).sum::<f32>() / normals.len() as f32;
    Some(unit_from_angle(mean))
}

/// Mirror a direction about a surface normal: d' = normalize(d - 2(d·n)n)
#[inline]
pub fn reflect_direction(direction: Vec2, normal: Vec2) -> Vec2 {
    (direction - 2.0 * direction.dot(normal) * normal).normalize_or_zero()
}
