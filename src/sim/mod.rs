//! Particle simulation
//!
//! Everything that moves lives here. Time is supplied by the host (`now` in
//! seconds plus a per-frame `dt`), so the module has no rendering or platform
//! dependencies and runs the same in tests as in the browser.

pub mod collision;
pub mod particle;
pub mod pool;
pub mod state;
pub mod tick;

pub use collision::{Bounds, average_normal, bisect_crossing, reflect_direction, resolve_bounds};
pub use particle::{Particle, ParticleEvent, SpawnParams};
pub use pool::{Insertion, ParticlePool};
pub use state::{SimContext, SimEvent};
pub use tick::{FrameInput, tick};
