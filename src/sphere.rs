//! Sphere primitive.
//!
//! Intersection uses the half-b form of the quadratic, which saves a few
//! multiplications over the textbook formula.

use glam::Vec3A;

use crate::error::ConfigError;
use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::MaterialType;
use crate::ray::Ray;

/// Sphere defined by center, radius and material.
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Center point in world coordinates.
    pub center: Vec3A,
    /// Radius, non-negative. Zero is a degenerate point that only ever
    /// produces tangent hits.
    pub radius: f32,
    /// Surface material.
    pub material: MaterialType,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Rejects negative or non-finite radii and invalid material
    /// parameters rather than clamping them.
    pub fn new(center: Vec3A, radius: f32, material: MaterialType) -> Result<Self, ConfigError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(ConfigError::InvalidRadius(radius));
        }
        material.validate()?;
        Ok(Self {
            center,
            radius,
            material,
        })
    }
}

impl Hittable for Sphere {
    fn hit(&self, r: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        let oc = self.center - r.origin;

        // Half-b quadratic: a t^2 - 2h t + c = 0
        let a = r.direction.length_squared();
        let h = r.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Nearest root inside the interval, else the far one
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return false;
            }
        }

        rec.t = root;
        rec.p = r.at(rec.t);
        let outward_normal = (rec.p - self.center) / self.radius;
        rec.set_face_normal(r, outward_normal);
        rec.material = self.material;

        true
    }
}
