//! Stochastic sampling helpers.
//!
//! Every function takes the generator explicitly so callers control seeding;
//! the renderer derives one ChaCha20 stream per scanline from a base seed,
//! which makes a seeded render reproducible even across worker threads.

use glam::Vec3A;
use rand::Rng;

/// Random f32 in [min, max).
pub fn random_range(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    min + (max - min) * rng.random::<f32>()
}

/// Random unit vector uniformly distributed on the unit sphere.
pub fn random_unit_vector(rng: &mut impl Rng) -> Vec3A {
    // Uniform azimuth plus uniform cos(phi) gives a uniform sphere density
    let theta = 2.0 * std::f32::consts::PI * rng.random::<f32>();
    let cos_phi = 2.0 * rng.random::<f32>() - 1.0;
    let sin_phi = (1.0 - cos_phi * cos_phi).sqrt();

    Vec3A::new(sin_phi * theta.cos(), sin_phi * theta.sin(), cos_phi)
}

/// Random point inside the unit disk (z = 0), by rejection sampling.
pub fn random_in_unit_disk(rng: &mut impl Rng) -> Vec3A {
    loop {
        let p = Vec3A::new(
            random_range(rng, -1.0, 1.0),
            random_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Random RGB color with components in [0.0, 1.0).
pub fn random_color(rng: &mut impl Rng) -> Vec3A {
    Vec3A::new(rng.random(), rng.random(), rng.random())
}

/// Random RGB color with components in [min, max).
pub fn random_color_range(rng: &mut impl Rng, min: f32, max: f32) -> Vec3A {
    Vec3A::new(
        random_range(rng, min, max),
        random_range(rng, min, max),
        random_range(rng, min, max),
    )
}
