//! Fixed-capacity particle pool.
//!
//! The pool is allocated once and never resized. Slots are recycled in
//! place: a spawn overwrites a dead record, expiry just lets `life` run out.
//! A single rotating cursor remembers the next slot the emitter will look at.
//!
//! ```ignore
//! let mut pool = ParticlePool::new(1_000, Vec2::new(800.0, 600.0));
//! emitter.emit(&mut pool, pointer, &mut rng);
//! pool.advance(dt);
//! queue.write_buffer(&buffer, 0, pool.as_bytes());
//! ```

use crate::particle::Particle;
use glam::Vec2;

/// Ordered, fixed-length sequence of particles plus the spawn cursor.
#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    cursor: usize,
}

impl ParticlePool {
    /// Create a pool of `capacity` dead particles parked at `rest_position`.
    ///
    /// A zero-capacity pool is allowed; every operation on it is a no-op.
    pub fn new(capacity: usize, rest_position: Vec2) -> Self {
        Self {
            particles: vec![Particle::dead_at(rest_position); capacity],
            cursor: 0,
        }
    }

    /// Number of slots. Fixed for the lifetime of the pool.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    /// Index of the next slot eligible for spawn consideration.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of slots currently alive. O(n), meant for diagnostics.
    pub fn alive_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_alive()).count()
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    /// Advance every live particle by `dt` seconds.
    ///
    /// Live particles lose `dt` of life and move by `velocity * dt`. Dead
    /// particles are left exactly as they are. `dt` must be non-negative.
    pub fn advance(&mut self, dt: f32) {
        for p in self.particles.iter_mut().filter(|p| p.is_alive()) {
            p.life -= dt;
            p.position += p.velocity * dt;
        }
    }

    /// Read-only view of every slot, dead and alive.
    #[inline]
    pub fn snapshot(&self) -> &[Particle] {
        &self.particles
    }

    /// The snapshot reinterpreted as the tightly packed GPU upload format.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.particles)
    }

    /// Take the slot under the cursor and step the cursor forward.
    ///
    /// Returns the slot if it is dead and may receive a spawn, `None` if it
    /// is alive. The cursor moves either way, wrapping at capacity.
    pub(crate) fn next_slot(&mut self) -> Option<&mut Particle> {
        if self.particles.is_empty() {
            return None;
        }
        let index = self.cursor;
        self.cursor = (self.cursor + 1) % self.particles.len();
        let slot = &mut self.particles[index];
        if slot.is_alive() {
            None
        } else {
            Some(slot)
        }
    }

    /// Overwrite slot `index` with `particle`, bypassing the cursor.
    ///
    /// Used for scripted placement; returns `false` if `index` is out of range.
    pub fn spawn(&mut self, index: usize, particle: Particle) -> bool {
        match self.particles.get_mut(index) {
            Some(slot) => {
                *slot = particle;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live(position: Vec2, velocity: Vec2, life: f32) -> Particle {
        Particle { position, velocity, life }
    }

    #[test]
    fn test_new_pool_is_all_dead_at_rest() {
        let rest = Vec2::new(800.0, 600.0);
        let pool = ParticlePool::new(8, rest);
        assert_eq!(pool.capacity(), 8);
        assert_eq!(pool.cursor(), 0);
        assert_eq!(pool.alive_count(), 0);
        assert!(pool.snapshot().iter().all(|p| p.position == rest && p.life == 0.0));
    }

    #[test]
    fn test_advance_moves_and_ages_live_particles() {
        let mut pool = ParticlePool::new(1, Vec2::ZERO);
        pool.spawn(0, live(Vec2::new(10.0, 20.0), Vec2::new(4.0, -8.0), 3.0));

        pool.advance(0.25);

        let p = pool.get(0).unwrap();
        assert_eq!(p.position, Vec2::new(11.0, 18.0));
        assert_eq!(p.life, 2.75);
    }

    #[test]
    fn test_advance_leaves_dead_particles_untouched() {
        let mut pool = ParticlePool::new(2, Vec2::ZERO);
        // Stale velocity on a dead slot must not cause drift.
        pool.spawn(0, live(Vec2::new(3.0, 3.0), Vec2::new(50.0, 50.0), 0.0));
        pool.spawn(1, live(Vec2::new(7.0, 7.0), Vec2::new(1.0, 1.0), -2.0));
        let before = pool.snapshot().to_vec();

        pool.advance(1.0);

        assert_eq!(pool.snapshot(), before.as_slice());
    }

    #[test]
    fn test_advance_zero_dt_is_identity() {
        let mut pool = ParticlePool::new(1, Vec2::ZERO);
        pool.spawn(0, live(Vec2::new(1.0, 1.0), Vec2::new(9.0, 9.0), 1.0));
        let before = pool.snapshot().to_vec();
        pool.advance(0.0);
        assert_eq!(pool.snapshot(), before.as_slice());
    }

    #[test]
    fn test_next_slot_skips_alive_and_still_advances() {
        let mut pool = ParticlePool::new(3, Vec2::ZERO);
        pool.spawn(0, live(Vec2::ZERO, Vec2::ZERO, 1.0));

        assert!(pool.next_slot().is_none());
        assert_eq!(pool.cursor(), 1);
        assert!(pool.next_slot().is_some());
        assert!(pool.next_slot().is_some());
        assert_eq!(pool.cursor(), 0);
    }

    #[test]
    fn test_spawn_out_of_range_is_rejected() {
        let mut pool = ParticlePool::new(2, Vec2::ZERO);
        assert!(!pool.spawn(2, live(Vec2::ZERO, Vec2::ZERO, 1.0)));
        assert_eq!(pool.alive_count(), 0);
    }

    #[test]
    fn test_empty_pool_is_inert() {
        let mut pool = ParticlePool::new(0, Vec2::ZERO);
        pool.advance(1.0);
        assert!(pool.next_slot().is_none());
        assert_eq!(pool.cursor(), 0);
        assert!(pool.as_bytes().is_empty());
    }

    #[test]
    fn test_as_bytes_covers_every_slot() {
        let pool = ParticlePool::new(10, Vec2::ZERO);
        assert_eq!(pool.as_bytes().len(), 10 * std::mem::size_of::<Particle>());
    }
}
