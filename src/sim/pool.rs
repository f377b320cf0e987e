//! Fixed-capacity ring of particles
//!
//! Slots are appended until the pool is full. After that, launches overwrite
//! the slot under a round-robin cursor, oldest first.

use super::particle::{Particle, ParticleEvent, SpawnParams};

/// Ring buffer of particle slots
#[derive(Debug, Clone)]
pub struct ParticlePool {
    slots: Vec<Particle>,
    capacity: usize,
    /// Next slot to overwrite once full
    cursor: usize,
}

/// Result of inserting a particle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insertion {
    pub slot: usize,
    /// True when an existing slot was overwritten
    pub reused: bool,
}

impl ParticlePool {
    /// `capacity` is clamped to at least one slot
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            cursor: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Allocated slots, active or not
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    /// Number of particles still alive
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|p| p.is_active()).count()
    }

    pub fn get(&self, slot: usize) -> Option<&Particle> {
        self.slots.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter()
    }

    /// Active particles only, with their slot index
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &Particle)> {
        self.slots.iter().enumerate().filter(|(_, p)| p.is_active())
    }

    /// Append a new particle, or overwrite the slot under the cursor
    pub fn launch(&mut self, params: SpawnParams, now: f64) -> Insertion {
        if !self.is_full() {
            self.slots.push(Particle::new(params, now));
            return Insertion {
                slot: self.slots.len() - 1,
                reused: false,
            };
        }

        let slot = self.cursor;
        self.slots[slot].respawn(params, now);
        self.cursor = (self.cursor + 1) % self.capacity;
        Insertion { slot, reused: true }
    }

    /// Step every particle, returning events tagged with their slot
    pub fn step_all(&mut self, dt: f32, now: f64) -> Vec<(usize, ParticleEvent)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(slot, p)| p.step(dt, now).map(|e| (slot, e)))
            .collect()
    }

    /// Change capacity, dropping the newest slots if shrinking
    pub fn resize(&mut self, capacity: usize) {
        let capacity = capacity.max(1);
        self.slots.truncate(capacity);
        self.capacity = capacity;
        self.cursor = 0;
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Bounds;
    use glam::Vec2;

    fn params(x: f32) -> SpawnParams {
        SpawnParams::new(
            Vec2::new(x, 50.0),
            Vec2::X,
            10.0,
            Bounds::from_size(Vec2::new(200.0, 300.0)),
        )
    }

    #[test]
    fn test_fills_then_reuses_first_slot() {
        let mut pool = ParticlePool::new(4);
        for i in 0..4 {
            let ins = pool.launch(params(i as f32), 0.0);
            assert_eq!(ins, Insertion { slot: i, reused: false });
        }
        assert!(pool.is_full());

        let ins = pool.launch(params(99.0), 1.0);
        assert_eq!(ins, Insertion { slot: 0, reused: true });
        assert_eq!(pool.len(), 4);
        assert_eq!(pool.active_count(), 4);
        assert_eq!(pool.get(0).unwrap().position, Vec2::new(99.0, 50.0));
    }

    #[test]
    fn test_round_robin_wraps() {
        let mut pool = ParticlePool::new(3);
        for i in 0..3 {
            pool.launch(params(i as f32), 0.0);
        }
        let slots: Vec<usize> = (0..5).map(|_| pool.launch(params(1.0), 0.0).slot).collect();
        assert_eq!(slots, vec![0, 1, 2, 0, 1]);
    }

    #[test]
    fn test_step_all_reports_spawns() {
        let mut pool = ParticlePool::new(2);
        pool.launch(params(10.0), 0.0);
        pool.launch(params(20.0), 0.0);
        let events = pool.step_all(0.01, 0.01);
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], (1, ParticleEvent::Spawned { .. })));
    }

    #[test]
    fn test_expired_slots_stay_allocated() {
        let mut pool = ParticlePool::new(2);
        pool.launch(params(10.0).with_lifetime(1.0), 0.0);
        pool.step_all(0.01, 2.0);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.iter_active().count(), 0);
    }

    #[test]
    fn test_resize_truncates() {
        let mut pool = ParticlePool::new(5);
        for i in 0..5 {
            pool.launch(params(i as f32), 0.0);
        }
        pool.resize(2);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.capacity(), 2);
        assert_eq!(pool.launch(params(0.0), 0.0).slot, 0);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        assert_eq!(ParticlePool::new(0).capacity(), 1);
    }
}
