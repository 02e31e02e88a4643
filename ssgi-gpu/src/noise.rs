use core::f32::consts::PI;

use glam::{vec3, Vec3};

/// Stateless-per-pixel pseudo-random generator.
///
/// It's seeded purely from a position (see [`Self::from_position()`]), so
/// the same surface point yields the same samples every frame, no matter
/// which thread evaluates it.
#[derive(Copy, Clone, Debug)]
pub struct Noise {
    state: u32,
}

impl Noise {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Creates a generator by hashing given world-space position.
    pub fn from_position(pos: Vec3) -> Self {
        Self::new(
            pos.x.to_bits().wrapping_mul(48619)
                ^ pos.y.to_bits().wrapping_mul(95461)
                ^ pos.z.to_bits().wrapping_mul(26699),
        )
    }

    /// Generates a uniform sample in range `<0.0, 1.0>`.
    pub fn sample(&mut self) -> f32 {
        (self.sample_int() as f32) / (u32::MAX as f32)
    }

    /// Generates a uniform sample in range `<0, u32::MAX>`.
    ///
    /// See: PCG-RXS-M-XS (https://www.pcg-random.org).
    pub fn sample_int(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(747796405)
            .wrapping_add(2891336453);

        let word = ((self.state >> ((self.state >> 28) + 4)) ^ self.state)
            .wrapping_mul(277803737);

        (word >> 22) ^ word
    }

    /// Generates a uniform sample inside of a unit sphere.
    pub fn sample_sphere(&mut self) -> Vec3 {
        let phi = self.sample() * 2.0 * PI;
        let cos_theta = self.sample() * 2.0 - 1.0;
        let u = self.sample();

        let theta = cos_theta.acos();
        let r = u.cbrt();

        vec3(
            r * theta.sin() * phi.cos(),
            r * theta.sin() * phi.sin(),
            r * theta.cos(),
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn random_position(rng: &mut StdRng) -> Vec3 {
        vec3(
            rng.gen_range(-100.0..100.0),
            rng.gen_range(-100.0..100.0),
            rng.gen_range(-100.0..100.0),
        )
    }

    #[test]
    fn from_position_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(1234);

        for _ in 0..256 {
            let pos = random_position(&mut rng);

            let mut a = Noise::from_position(pos);
            let mut b = Noise::from_position(pos);

            assert_eq!(a.sample_int(), b.sample_int());
            assert_eq!(a.sample_sphere(), b.sample_sphere());
        }
    }

    #[test]
    fn from_position_differs_across_positions() {
        let mut a = Noise::from_position(vec3(1.0, 2.0, 3.0));
        let mut b = Noise::from_position(vec3(1.0, 2.0, 3.001));

        assert_ne!(a.sample_int(), b.sample_int());
    }

    #[test]
    fn sample_sphere() {
        let mut rng = StdRng::seed_from_u64(4321);

        for _ in 0..256 {
            let mut target = Noise::from_position(random_position(&mut rng));

            for _ in 0..16 {
                assert!(target.sample_sphere().length() <= 1.0 + 1e-5);
            }
        }
    }

    #[test]
    fn sample() {
        let mut target = Noise::new(0xcafebabe);

        for _ in 0..1024 {
            let sample = target.sample();

            assert!((0.0..=1.0).contains(&sample));
        }
    }
}
