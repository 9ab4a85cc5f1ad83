//! Stateless hash noise used to give every mesh its own, reproducible animation parameters.

use glam::Vec3;

use crate::geometry::try_normalize;

const HASH_AXIS: Vec3 = Vec3::new(12.9898, 78.233, 37.719);
const HASH_SCALE: f32 = 43_758.545;

/// Raw noise shorter than this is treated as having no direction.
pub const MIN_NOISE_LENGTH: f32 = 1e-3;

/// Returned by `vector_noise` when the hashed vector is too short to normalize.
pub const FALLBACK_DIRECTION: Vec3 = Vec3::Y;

/// Maps `position` and `seed` to a value in `[0, 1)`.
pub fn scalar_noise(position: Vec3, seed: f32) -> f32 {
    let x = ((position + Vec3::splat(seed)).dot(HASH_AXIS)).sin() * HASH_SCALE;
    let fract = x - x.floor();
    // floor rounding can land exactly on 1.0 for tiny negative inputs
    if fract < 1.0 {
        fract
    } else {
        0.0
    }
}

/// Unit vector hashed from `position` and `seed`, or `FALLBACK_DIRECTION` if the raw
/// vector is degenerate.
pub fn vector_noise(position: Vec3, seed: f32) -> Vec3 {
    direction_or_fallback(vector_noise_raw(position, seed))
}

fn direction_or_fallback(raw: Vec3) -> Vec3 {
    try_normalize(raw, MIN_NOISE_LENGTH).unwrap_or(FALLBACK_DIRECTION)
}

fn vector_noise_raw(position: Vec3, seed: f32) -> Vec3 {
    Vec3::new(
        scalar_noise(position, seed + 0.123) * 2.0 - 1.0,
        scalar_noise(position, seed + 4.321) * 2.0 - 1.0,
        scalar_noise(position, seed + 8.765) * 2.0 - 1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn random_position(rng: &mut StdRng) -> Vec3 {
        Vec3::new(
            rng.gen_range(-500.0..500.0),
            rng.gen_range(-500.0..500.0),
            rng.gen_range(-500.0..500.0),
        )
    }

    #[test]
    fn scalar_noise_stays_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let p = random_position(&mut rng);
            let seed = rng.gen_range(-50.0..50.0);
            let n = scalar_noise(p, seed);
            assert!((0.0..1.0).contains(&n), "noise {n} out of range for {p:?}, {seed}");
        }
    }

    #[test]
    fn scalar_noise_is_deterministic() {
        let p = Vec3::new(0.25, -1.5, 3.0);
        assert_eq!(scalar_noise(p, 3.71).to_bits(), scalar_noise(p, 3.71).to_bits());
        assert_ne!(scalar_noise(p, 3.71), scalar_noise(p, 6.42));
    }

    #[test]
    fn vector_noise_is_unit_length() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10_000 {
            let p = random_position(&mut rng);
            let seed = rng.gen_range(-50.0..50.0);
            let v = vector_noise(p, seed);
            assert!((v.length() - 1.0).abs() < 1e-4, "{v:?} is not unit length");
        }
    }

    #[test]
    fn short_raw_vector_falls_back_to_up() {
        assert_eq!(direction_or_fallback(Vec3::splat(1e-4)), Vec3::Y);
        assert_eq!(direction_or_fallback(Vec3::ZERO), FALLBACK_DIRECTION);
        assert_eq!(direction_or_fallback(Vec3::new(0.0, 0.0, -0.5)), Vec3::NEG_Z);
    }

    #[test]
    fn origin_noise_is_repeatable() {
        assert_eq!(vector_noise(Vec3::ZERO, 2.57), vector_noise(Vec3::ZERO, 2.57));
    }
}
