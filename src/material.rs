//! Surface materials.
//!
//! Three material kinds: Lambertian (diffuse), Metal (specular with fuzz)
//! and Dielectric (refractive glass). A material answers one question: given
//! an incident ray and a hit, does the ray scatter, and if so where and with
//! what attenuation.

use glam::Vec3A;
use rand::Rng;

use crate::error::ConfigError;
use crate::hittable::HitRecord;
use crate::random;
use crate::ray::Ray;

/// RGB color in linear space.
pub type Color = Vec3A;

/// Closed set of supported materials.
///
/// A plain `Copy` enum: spheres that share a material hold equal copies,
/// which is observationally identical to shared ownership since materials
/// are immutable values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialType {
    /// Lambertian diffuse material for matte surfaces.
    Lambertian {
        /// Surface reflectance color.
        albedo: Color,
    },

    /// Metallic material with mirror reflection.
    Metal {
        /// Metal color.
        albedo: Color,
        /// Reflection roughness in [0, 1]; 0 is a perfect mirror.
        fuzz: f32,
    },

    /// Dielectric (transparent) material with refraction.
    Dielectric {
        /// Index of refraction (1.0 = vacuum, 1.5 = glass).
        refraction_index: f32,
    },
}

impl MaterialType {
    /// Check material parameters, fail-fast at scene construction.
    ///
    /// Negative fuzz is rejected rather than clamped; fuzz above 1 is also
    /// rejected since it no longer describes a physical roughness.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            MaterialType::Lambertian { .. } => Ok(()),
            MaterialType::Metal { fuzz, .. } => {
                if !(0.0..=1.0).contains(&fuzz) || !fuzz.is_finite() {
                    Err(ConfigError::FuzzOutOfRange(fuzz))
                } else {
                    Ok(())
                }
            }
            MaterialType::Dielectric { refraction_index } => {
                if !refraction_index.is_finite() || refraction_index <= 0.0 {
                    Err(ConfigError::InvalidRefractionIndex(refraction_index))
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Scatter an incident ray at a hit point.
    ///
    /// Returns the attenuation color and the scattered ray, or `None` when
    /// the ray is absorbed.
    pub fn scatter(&self, r_in: &Ray, rec: &HitRecord, rng: &mut impl Rng) -> Option<(Color, Ray)> {
        match *self {
            MaterialType::Lambertian { albedo } => scatter_lambertian(albedo, rec, rng),
            MaterialType::Metal { albedo, fuzz } => scatter_metal(albedo, fuzz, r_in, rec, rng),
            MaterialType::Dielectric { refraction_index } => {
                scatter_dielectric(refraction_index, r_in, rec, rng)
            }
        }
    }
}

/// Lambertian scattering: normal plus a uniform unit vector approximates a
/// cosine-weighted hemisphere. Never absorbs.
fn scatter_lambertian(albedo: Color, rec: &HitRecord, rng: &mut impl Rng) -> Option<(Color, Ray)> {
    let mut scatter_direction = rec.normal + random::random_unit_vector(rng);

    // The random vector can land opposite the normal and cancel it out
    if scatter_direction.length_squared() < 1e-8 {
        scatter_direction = rec.normal;
    }

    Some((albedo, Ray::new(rec.p, scatter_direction)))
}

/// Metallic reflection, blurred by fuzz. Rays perturbed below the surface
/// are absorbed.
fn scatter_metal(
    albedo: Color,
    fuzz: f32,
    r_in: &Ray,
    rec: &HitRecord,
    rng: &mut impl Rng,
) -> Option<(Color, Ray)> {
    let reflected = reflect(r_in.direction, rec.normal);
    let direction = reflected.normalize() + fuzz * random::random_unit_vector(rng);

    if direction.dot(rec.normal) > 0.0 {
        Some((albedo, Ray::new(rec.p, direction)))
    } else {
        None
    }
}

/// Dielectric scattering: Fresnel-weighted choice between reflection and
/// refraction. Glass absorbs nothing, so this always scatters.
fn scatter_dielectric(
    refraction_index: f32,
    r_in: &Ray,
    rec: &HitRecord,
    rng: &mut impl Rng,
) -> Option<(Color, Ray)> {
    // Entering the medium uses the inverse ratio
    let ri = if rec.front_face {
        1.0 / refraction_index
    } else {
        refraction_index
    };

    let unit_direction = r_in.direction.normalize();
    let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    // Snell's law has no solution past the critical angle
    let cannot_refract = ri * sin_theta > 1.0;

    let direction = if cannot_refract || reflectance(cos_theta, ri) > rng.random::<f32>() {
        reflect(unit_direction, rec.normal)
    } else {
        refract(unit_direction, rec.normal, ri)
    };

    Some((Color::ONE, Ray::new(rec.p, direction)))
}

/// Reflect v about the surface normal n.
pub fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through an interface with refraction ratio
/// etai_over_etat, using Snell's law in vector form.
pub fn refract(uv: Vec3A, n: Vec3A, etai_over_etat: f32) -> Vec3A {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Schlick's approximation of Fresnel reflectance.
fn reflectance(cosine: f32, refraction_index: f32) -> f32 {
    let r0 = (1.0 - refraction_index) / (1.0 + refraction_index);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
