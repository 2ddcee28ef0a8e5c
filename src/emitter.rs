//! Pointer-driven particle emission.
//!
//! While the trigger is held, the driver calls [`Emitter::emit`] once per
//! frame with the pointer position. Each call makes a fixed number of spawn
//! attempts, walking the pool's rotating cursor one slot per attempt:
//!
//! - a dead slot receives a fresh particle at the origin,
//! - an alive slot is skipped (never killed), but the cursor still moves.
//!
//! Under sustained emission faster than particles expire, some attempts land
//! on live slots and are dropped. There is no backpressure.
//!
//! # Direction sampling
//!
//! Directions come from two independent uniform draws in `[-1, 1]`, then
//! normalized. This favours the diagonals slightly compared to a uniform
//! angle; the distribution is kept as-is so emission looks the same as the
//! reference fountain.
//!
//! # Example
//!
//! ```ignore
//! let emitter = Emitter::new(
//!     EmitterConfig::default()
//!         .with_particles_per_frame(20)
//!         .with_speed(10.0..100.0)
//!         .with_lifetime(5.0..15.0),
//! );
//!
//! if input.mouse_held(MouseButton::Left) {
//!     emitter.emit(&mut pool, input.cursor_position(), &mut rng);
//! }
//! ```

use crate::error::{ConfigError, DegenerateDirection};
use crate::particle::Particle;
use crate::pool::ParticlePool;
use crate::rng::RandomSource;
use glam::Vec2;
use std::ops::Range;

/// Resample budget before falling back to [`FALLBACK_DIRECTION`].
const MAX_DIRECTION_SAMPLES: usize = 8;
const FALLBACK_DIRECTION: Vec2 = Vec2::X;

/// Emission settings.
#[derive(Clone, Debug, PartialEq)]
pub struct EmitterConfig {
    /// Spawn attempts per `emit` call.
    pub particles_per_frame: u32,
    /// Initial speed range in pixels per second.
    pub speed: Range<f32>,
    /// Lifetime range in seconds.
    pub lifetime: Range<f32>,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            particles_per_frame: 10,
            speed: 10.0..100.0,
            lifetime: 5.0..15.0,
        }
    }
}

impl EmitterConfig {
    pub fn with_particles_per_frame(mut self, count: u32) -> Self {
        self.particles_per_frame = count;
        self
    }

    pub fn with_speed(mut self, speed: Range<f32>) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_lifetime(mut self, lifetime: Range<f32>) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Reject ranges that are non-finite, inverted or negative.
    ///
    /// A zero-width range (`a..a`) is accepted and always yields `a`.
    /// Lifetimes of zero produce particles that are dead on arrival.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("speed", &self.speed)?;
        check_range("lifetime", &self.lifetime)?;
        Ok(())
    }
}

fn check_range(name: &'static str, range: &Range<f32>) -> Result<(), ConfigError> {
    if !range.start.is_finite() || !range.end.is_finite() {
        return Err(ConfigError::NonFiniteRange { name });
    }
    if range.start > range.end {
        return Err(ConfigError::EmptyRange { name });
    }
    if range.start < 0.0 {
        return Err(ConfigError::NegativeRange { name });
    }
    Ok(())
}

/// Spawns particles into dead pool slots.
#[derive(Clone, Debug, Default)]
pub struct Emitter {
    config: EmitterConfig,
}

impl Emitter {
    pub fn new(config: EmitterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Attempt `particles_per_frame` spawns at `origin`.
    ///
    /// Returns how many attempts found a dead slot. The cursor advances by
    /// `particles_per_frame` (mod capacity) regardless.
    pub fn emit<R: RandomSource + ?Sized>(
        &self,
        pool: &mut ParticlePool,
        origin: Vec2,
        rng: &mut R,
    ) -> usize {
        let mut spawned = 0;
        for _ in 0..self.config.particles_per_frame {
            let Some(slot) = pool.next_slot() else {
                continue;
            };
            *slot = self.sample(origin, rng);
            spawned += 1;
        }

        let dropped = self.config.particles_per_frame as usize - spawned;
        if dropped > 0 {
            log::trace!(
                "emit at ({:.1}, {:.1}): {} spawned, {} dropped on live slots",
                origin.x,
                origin.y,
                spawned,
                dropped
            );
        }
        spawned
    }

    fn sample<R: RandomSource + ?Sized>(&self, origin: Vec2, rng: &mut R) -> Particle {
        let direction = direction_or_fallback(rng);
        let speed = rng.uniform_f32(self.config.speed.start, self.config.speed.end);
        let life = rng.uniform_f32(self.config.lifetime.start, self.config.lifetime.end);

        Particle {
            position: origin,
            velocity: direction * speed,
            life,
        }
    }
}

/// Square-then-normalize direction sample.
pub fn sample_direction<R: RandomSource + ?Sized>(
    rng: &mut R,
) -> Result<Vec2, DegenerateDirection> {
    let x = rng.uniform_f32(-1.0, 1.0);
    let y = rng.uniform_f32(-1.0, 1.0);
    Vec2::new(x, y).try_normalize().ok_or(DegenerateDirection)
}

fn direction_or_fallback<R: RandomSource + ?Sized>(rng: &mut R) -> Vec2 {
    for _ in 0..MAX_DIRECTION_SAMPLES {
        if let Ok(direction) = sample_direction(rng) {
            return direction;
        }
    }
    log::warn!(
        "{} after {} samples, emitting along {:?}",
        DegenerateDirection,
        MAX_DIRECTION_SAMPLES,
        FALLBACK_DIRECTION
    );
    FALLBACK_DIRECTION
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::StdRandom;

    /// Replays a fixed list of floats, cycling when exhausted.
    struct Scripted {
        values: Vec<f32>,
        next: usize,
    }

    impl Scripted {
        fn new(values: &[f32]) -> Self {
            Self { values: values.to_vec(), next: 0 }
        }
    }

    impl RandomSource for Scripted {
        fn uniform_f32(&mut self, _min: f32, _max: f32) -> f32 {
            let v = self.values[self.next % self.values.len()];
            self.next += 1;
            v
        }

        fn uniform_u32(&mut self, min: u32, _max: u32) -> u32 {
            min
        }
    }

    fn emitter(per_frame: u32) -> Emitter {
        Emitter::new(EmitterConfig::default().with_particles_per_frame(per_frame))
    }

    #[test]
    fn test_spawn_uses_origin_and_sampled_values() {
        let mut pool = ParticlePool::new(1, Vec2::ZERO);
        // dir (3, 4) -> (0.6, 0.8), speed 50, life 7
        let mut rng = Scripted::new(&[0.3, 0.4, 50.0, 7.0]);

        let spawned = emitter(1).emit(&mut pool, Vec2::new(12.0, 34.0), &mut rng);

        assert_eq!(spawned, 1);
        let p = pool.get(0).unwrap();
        assert_eq!(p.position, Vec2::new(12.0, 34.0));
        assert!((p.velocity - Vec2::new(30.0, 40.0)).length() < 1e-4);
        assert_eq!(p.life, 7.0);
    }

    #[test]
    fn test_sampled_particles_respect_ranges() {
        let config = EmitterConfig::default();
        let emitter = Emitter::new(config.clone().with_particles_per_frame(500));
        let mut pool = ParticlePool::new(500, Vec2::ZERO);
        let mut rng = StdRandom::from_seed(99);

        emitter.emit(&mut pool, Vec2::new(5.0, 5.0), &mut rng);

        for p in pool.snapshot() {
            assert!(p.life >= config.lifetime.start && p.life <= config.lifetime.end);
            let speed = p.velocity.length();
            assert!(speed >= config.speed.start - 1e-3 && speed <= config.speed.end + 1e-3);
        }
    }

    #[test]
    fn test_zero_direction_is_resampled() {
        // First draw pair is the zero vector, second is (-1, 0).
        let mut rng = Scripted::new(&[0.0, 0.0, -0.5, 0.0, 20.0, 1.0]);
        let mut pool = ParticlePool::new(1, Vec2::ZERO);

        emitter(1).emit(&mut pool, Vec2::ZERO, &mut rng);

        let p = pool.get(0).unwrap();
        assert_eq!(p.velocity, Vec2::new(-20.0, 0.0));
        assert_eq!(p.life, 1.0);
    }

    #[test]
    fn test_persistent_zero_direction_falls_back() {
        let mut rng = Scripted::new(&[0.0]);
        assert_eq!(sample_direction(&mut rng), Err(DegenerateDirection));
        assert_eq!(direction_or_fallback(&mut rng), FALLBACK_DIRECTION);
    }

    #[test]
    fn test_alive_slots_are_skipped_not_killed() {
        let mut pool = ParticlePool::new(3, Vec2::ZERO);
        let resident = Particle {
            position: Vec2::new(1.0, 1.0),
            velocity: Vec2::new(2.0, 2.0),
            life: 4.0,
        };
        pool.spawn(1, resident);
        let mut rng = StdRandom::from_seed(3);

        let spawned = emitter(3).emit(&mut pool, Vec2::new(9.0, 9.0), &mut rng);

        assert_eq!(spawned, 2);
        assert_eq!(pool.get(1), Some(&resident));
        assert_eq!(pool.cursor(), 0);
    }

    #[test]
    fn test_more_attempts_than_capacity_wraps() {
        let mut pool = ParticlePool::new(4, Vec2::ZERO);
        let mut rng = StdRandom::from_seed(5);

        let spawned = emitter(6).emit(&mut pool, Vec2::ZERO, &mut rng);

        // Attempts 5 and 6 revisit slots 0 and 1, which are now alive.
        assert_eq!(spawned, 4);
        assert_eq!(pool.cursor(), 2);
    }

    #[test]
    fn test_zero_per_frame_is_noop() {
        let mut pool = ParticlePool::new(4, Vec2::ZERO);
        let mut rng = StdRandom::from_seed(5);
        assert_eq!(emitter(0).emit(&mut pool, Vec2::ZERO, &mut rng), 0);
        assert_eq!(pool.cursor(), 0);
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let inverted = EmitterConfig::default().with_speed(100.0..10.0);
        assert_eq!(inverted.validate(), Err(ConfigError::EmptyRange { name: "speed" }));

        let negative = EmitterConfig::default().with_lifetime(-1.0..2.0);
        assert_eq!(negative.validate(), Err(ConfigError::NegativeRange { name: "lifetime" }));

        let unbounded = EmitterConfig::default().with_speed(10.0..f32::INFINITY);
        assert_eq!(unbounded.validate(), Err(ConfigError::NonFiniteRange { name: "speed" }));

        let nan = EmitterConfig::default().with_lifetime(f32::NAN..5.0);
        assert_eq!(nan.validate(), Err(ConfigError::NonFiniteRange { name: "lifetime" }));

        assert!(EmitterConfig::default().validate().is_ok());
        assert!(EmitterConfig::default().with_lifetime(3.0..3.0).validate().is_ok());
    }
}
