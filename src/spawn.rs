//! Random source for particle spawning.
//!
//! Every emitter owns one [`SpawnRng`]. Seed it with [`SpawnRng::seeded`]
//! for reproducible runs (tests, replays); [`SpawnRng::new`] seeds from the
//! clock so each program execution differs.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Small, fast RNG with helpers for the spawn patterns emitters need.
#[derive(Clone, Debug)]
pub struct SpawnRng {
    rng: SmallRng,
}

impl SpawnRng {
    /// Clock-seeded RNG. `salt` keeps emitters created in the same instant
    /// from sharing a sequence.
    pub fn new(salt: u64) -> Self {
        let seed = salt
            ^ std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42);
        Self::seeded(seed)
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Uniform f32 in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Uniform integer in `[min, max]`, both ends inclusive.
    #[inline]
    pub fn random_int(&mut self, min: u32, max: u32) -> u32 {
        self.rng.gen_range(min..=max)
    }

    /// Uniform gray level in `[1, 255]`.
    #[inline]
    pub fn random_level(&mut self) -> u8 {
        self.rng.gen_range(1..=255)
    }

    /// Velocity of length `speed` along `angle` radians.
    #[inline]
    pub fn polar(angle: f32, speed: f32) -> Vec2 {
        Vec2::new(speed * angle.cos(), speed * angle.sin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = SpawnRng::seeded(7);
        let mut b = SpawnRng::seeded(7);
        for _ in 0..16 {
            assert_eq!(a.random(), b.random());
        }
    }

    #[test]
    fn test_random_int_inclusive_bounds() {
        let mut rng = SpawnRng::seeded(1);
        for _ in 0..500 {
            let v = rng.random_int(10, 40);
            assert!((10..=40).contains(&v));
        }
    }

    #[test]
    fn test_random_level_never_zero() {
        let mut rng = SpawnRng::seeded(3);
        for _ in 0..500 {
            assert!(rng.random_level() >= 1);
        }
    }

    #[test]
    fn test_polar() {
        let v = SpawnRng::polar(std::f32::consts::FRAC_PI_2, 2.0);
        assert!(v.x.abs() < 1e-5);
        assert!((v.y - 2.0).abs() < 1e-5);
    }
}
