//! # pointburst
//!
//! A fixed-capacity pool of 2D point particles, spawned under the mouse,
//! advanced on the CPU each frame and drawn as GPU point sprites.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pointburst::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     env_logger::init();
//!     Simulation::new()
//!         .with_capacity(5_000)
//!         .with_emitter(EmitterConfig::default().with_particles_per_frame(25))
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Pool
//!
//! [`ParticlePool`] owns every [`Particle`]. It is allocated once and slots
//! are recycled in place: `life > 0` is alive, anything else is dead and
//! free for reuse.
//!
//! ### Emission
//!
//! [`Emitter::emit`] makes a fixed number of spawn attempts per call, each
//! one at the pool's rotating cursor. Attempts that land on a live slot are
//! dropped.
//!
//! ### Stepping and rendering
//!
//! [`step`] ages and moves live particles. The whole pool, dead slots
//! included, is then copied into the GPU vertex buffer and drawn in a single
//! instanced call.
//!
//! ## Frame order
//!
//! | Phase | Module |
//! |-------|--------|
//! | Input | [`input`] |
//! | Emission | [`Emitter`] |
//! | Step | [`step`] |
//! | Upload + draw | internal `gpu` |
//!
//! Using the core without a window:
//!
//! ```
//! use pointburst::{Emitter, EmitterConfig, ParticlePool, StdRandom, Vec2};
//!
//! let mut pool = ParticlePool::new(4, Vec2::ZERO);
//! let emitter = Emitter::new(EmitterConfig::default().with_particles_per_frame(2));
//! let mut rng = StdRandom::from_seed(1);
//!
//! assert_eq!(emitter.emit(&mut pool, Vec2::new(5.0, 5.0), &mut rng), 2);
//! pointburst::step(&mut pool, 1.0 / 60.0);
//! assert_eq!(pool.alive_count(), 2);
//! ```

mod emitter;
pub mod error;
mod gpu;
pub mod input;
mod particle;
mod pool;
pub mod rng;
mod shader;
mod simulation;
mod step;
pub mod time;

pub use bytemuck;
pub use emitter::{sample_direction, Emitter, EmitterConfig};
pub use error::{ConfigError, DegenerateDirection, GpuError, SimulationError};
pub use glam::Vec2;
pub use particle::Particle;
pub use pool::ParticlePool;
pub use rng::{RandomSource, StdRandom};
pub use shader::SHADER_SOURCE;
pub use simulation::{Scene, Simulation};
pub use step::step;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use pointburst::prelude::*;
/// ```
pub mod prelude {
    pub use crate::emitter::{Emitter, EmitterConfig};
    pub use crate::error::SimulationError;
    pub use crate::particle::Particle;
    pub use crate::pool::ParticlePool;
    pub use crate::rng::{RandomSource, StdRandom};
    pub use crate::simulation::Simulation;
    pub use crate::step::step;
    pub use crate::Vec2;
}
