//! Ball particles
//!
//! A particle moves in a straight line at constant speed, bounces off the
//! walls of its bounds and remembers every contact point so the renderer can
//! draw the path it travelled. Particles fade out and deactivate once their
//! lifetime is over; the slot stays allocated for reuse by the pool.

use glam::Vec2;

use super::collision::{Bounds, average_normal, reflect_direction, resolve_bounds};
use crate::consts::{BALL_LIFETIME, BALL_RADIUS, FULL_ALPHA};

/// Everything needed to (re)create a particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnParams {
    pub position: Vec2,
    /// Need not be normalized; a zero vector gives a stationary ball
    pub direction: Vec2,
    pub speed: f32,
    pub bounds: Bounds,
    pub radius: f32,
    /// Seconds
    pub lifetime: f32,
}

impl SpawnParams {
    pub fn new(position: Vec2, direction: Vec2, speed: f32, bounds: Bounds) -> Self {
        Self {
            position,
            direction,
            speed,
            bounds,
            radius: BALL_RADIUS,
            lifetime: BALL_LIFETIME,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_lifetime(mut self, lifetime: f32) -> Self {
        self.lifetime = lifetime;
        self
    }
}

/// Something noteworthy that happened during a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleEvent {
    /// First step after spawn; `pan` is -1 (left wall) to 1 (right wall)
    Spawned { pan: f32 },
    /// Bounced off a wall at `point`
    Contact { point: Vec2 },
    /// Lifetime ran out
    Expired,
}

/// A bouncing ball
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    /// Position before the last step; the inside end of the bisection bracket
    pub previous_position: Vec2,
    /// Unit length (or zero)
    pub direction: Vec2,
    pub speed: f32,
    pub velocity: Vec2,
    pub radius: f32,
    pub lifetime: f32,
    /// Host clock seconds at (re)spawn
    pub spawn_time: f64,
    pub bounds: Bounds,
    /// Latched on the spawn frame, start of the drawn path
    pub initial_position: Vec2,
    pub initial_velocity: Vec2,
    active: bool,
    spawned_this_frame: bool,
    first_contact_time: Option<f64>,
    /// Resolved contact points, oldest first
    contact_history: Vec<Vec2>,
}

impl Particle {
    pub fn new(params: SpawnParams, now: f64) -> Self {
        let direction = params.direction.normalize_or_zero();
        let velocity = direction * params.speed;
        Self {
            position: params.position,
            previous_position: params.position,
            direction,
            speed: params.speed,
            velocity,
            radius: params.radius,
            lifetime: params.lifetime,
            spawn_time: now,
            bounds: params.bounds,
            initial_position: params.position,
            initial_velocity: velocity,
            active: true,
            spawned_this_frame: true,
            first_contact_time: None,
            contact_history: Vec::new(),
        }
    }

    /// Reconstruct this slot in place, keeping the history allocation
    pub fn respawn(&mut self, params: SpawnParams, now: f64) {
        let mut history = std::mem::take(&mut self.contact_history);
        history.clear();
        *self = Self::new(params, now);
        self.contact_history = history;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True until the first step has run
    #[inline]
    pub fn is_spawn_frame(&self) -> bool {
        self.spawned_this_frame
    }

    /// Seconds since spawn
    #[inline]
    pub fn age(&self, now: f64) -> f32 {
        (now - self.spawn_time) as f32
    }

    #[inline]
    pub fn is_expired(&self, now: f64) -> bool {
        self.age(now) >= self.lifetime
    }

    pub fn contact_history(&self) -> &[Vec2] {
        &self.contact_history
    }

    pub fn first_contact_time(&self) -> Option<f64> {
        self.first_contact_time
    }

    /// Stereo pan for the current x position: -1 at `x_min`, 1 at `x_max`
    pub fn pan(&self) -> f32 {
        let width = self.bounds.width();
        if width <= 0.0 {
            return 0.0;
        }
        ((self.position.x - self.bounds.x_min) / width) * 2.0 - 1.0
    }

    /// Advance by `dt` seconds at host time `now`
    pub fn step(&mut self, dt: f32, now: f64) -> Option<ParticleEvent> {
        if !self.active {
            return None;
        }

        if self.is_expired(now) {
            self.active = false;
            return Some(ParticleEvent::Expired);
        }

        let mut event = None;
        let spawn_frame = self.spawned_this_frame;
        if spawn_frame {
            self.initial_position = self.position;
            self.initial_velocity = self.velocity;
            event = Some(ParticleEvent::Spawned { pan: self.pan() });
        }

        self.previous_position = self.position;
        self.position += self.velocity * dt;

        let hit = resolve_bounds(self.position, self.previous_position, &self.bounds);
        self.position = hit.position;

        if !spawn_frame {
            if let Some(normal) = average_normal(&hit.normals) {
                self.record_contact(now);
                self.direction = reflect_direction(self.direction, normal);
                self.velocity = self.direction * self.speed;
                event = Some(ParticleEvent::Contact {
                    point: self.position,
                });
            }
        }

        self.spawned_this_frame = false;
        event
    }

    fn record_contact(&mut self, now: f64) {
        if self.contact_history.is_empty() {
            self.first_contact_time = Some(now);
        }
        self.contact_history.push(self.position);
    }

    /// Fade alpha in [0, 255]: square root of the remaining life fraction
    pub fn alpha(&self, now: f64) -> f32 {
        if self.lifetime <= 0.0 {
            return 0.0;
        }
        let remaining = (1.0 - self.age(now) / self.lifetime).clamp(0.0, 1.0);
        remaining.sqrt() * FULL_ALPHA
    }

    /// Contact points followed by the current position.
    ///
    /// Borrowing iterator; call again each frame since history grows.
    pub fn path_points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.contact_history
            .iter()
            .copied()
            .chain(std::iter::once(self.position))
    }

    /// Line segments of the travelled path, starting at the spawn point
    pub fn path_segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.path_points().scan(self.initial_position, |prev, p| {
            let segment = (*prev, p);
            *prev = p;
            Some(segment)
        })
    }

    /// Where the ball would be had it kept its launch velocity after the
    /// first contact. `None` until a contact has happened.
    pub fn predicted_segment(&self, now: f64) -> Option<(Vec2, Vec2)> {
        let first = *self.contact_history.first()?;
        let since = (now - self.first_contact_time?) as f32;
        Some((first, first + self.initial_velocity * since))
    }
}
