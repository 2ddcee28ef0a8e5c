//! Per-frame simulation step.

use crate::pool::ParticlePool;

/// Advance the pool by one frame of `dt` seconds.
///
/// Holds no state of its own; emission for the frame must already have
/// happened.
#[inline]
pub fn step(pool: &mut ParticlePool, dt: f32) {
    pool.advance(dt);
}
