//! Ray-object intersection.
//!
//! The `Hittable` trait is the single capability every primitive exposes,
//! and `HittableList` aggregates primitives behind the same trait via a
//! nearest-hit reduction.

use glam::Vec3A;

use crate::interval::Interval;
use crate::material::MaterialType;
use crate::ray::Ray;

/// Result of a successful ray-surface intersection query.
#[derive(Debug, Clone)]
pub struct HitRecord {
    /// Point where the ray intersects the object.
    pub p: Vec3A,
    /// Unit surface normal at the hit point, always facing the incident ray.
    pub normal: Vec3A,
    /// Ray parameter of the intersection.
    pub t: f32,
    /// True if the ray struck the surface from outside.
    pub front_face: bool,
    /// Material of the struck object.
    pub material: MaterialType,
}

impl Default for HitRecord {
    fn default() -> Self {
        Self {
            p: Vec3A::ZERO,
            normal: Vec3A::ZERO,
            t: 0.0,
            front_face: false,
            material: MaterialType::Lambertian { albedo: Vec3A::ZERO },
        }
    }
}

impl HitRecord {
    /// Orient the stored normal against the incident ray.
    ///
    /// `outward_normal` must be unit length. front_face is true iff the ray
    /// arrives from outside the surface.
    pub fn set_face_normal(&mut self, r: &Ray, outward_normal: Vec3A) {
        self.front_face = r.direction.dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Capability of being intersected by a ray.
///
/// `Sync + Send` so a scene can be shared across render workers; geometry is
/// read-only during rendering.
pub trait Hittable: Sync + Send {
    /// Test for intersection with t strictly inside `ray_t`.
    ///
    /// Returns true and fills `rec` on a hit. On a miss the record must be
    /// left untouched; the list reduction relies on that.
    fn hit(&self, r: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool;
}

/// Insertion-ordered collection of hittables forming a scene.
///
/// Linear search; the nearest hit wins, so insertion order never changes
/// the result.
#[derive(Default)]
pub struct HittableList {
    /// Scene members.
    pub objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Remove every object.
    pub fn clear(&mut self) {
        self.objects.clear();
    }
}

impl Hittable for HittableList {
    fn hit(&self, r: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        let mut temp_rec = HitRecord::default();
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        // Shrink the interval upper bound to the closest hit found so far
        for object in &self.objects {
            if object.hit(r, Interval::new(ray_t.min, closest_so_far), &mut temp_rec) {
                hit_anything = true;
                closest_so_far = temp_rec.t;
                *rec = temp_rec.clone();
            }
        }

        hit_anything
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random;
    use crate::sphere::Sphere;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn grey() -> MaterialType {
        MaterialType::Lambertian {
            albedo: Vec3A::splat(0.5),
        }
    }

    #[test]
    fn face_normal_opposes_incident_ray() {
        let mut rec = HitRecord::default();
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));

        rec.set_face_normal(&r, Vec3A::Z);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3A::Z);

        rec.set_face_normal(&r, -Vec3A::Z);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3A::Z);
        assert!(rec.normal.dot(r.direction) <= 0.0);
    }

    #[test]
    fn list_returns_nearest_hit() {
        let mut world = HittableList::new();
        world.add(Box::new(
            Sphere::new(Vec3A::new(0.0, 0.0, -10.0), 1.0, grey()).unwrap(),
        ));
        world.add(Box::new(
            Sphere::new(Vec3A::new(0.0, 0.0, -5.0), 1.0, grey()).unwrap(),
        ));
        world.add(Box::new(
            Sphere::new(Vec3A::new(0.0, 0.0, -20.0), 1.0, grey()).unwrap(),
        ));

        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();
        assert!(world.hit(&r, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 4.0).abs() < 1e-4);
    }

    #[test]
    fn list_miss_leaves_record_untouched() {
        let mut world = HittableList::new();
        world.add(Box::new(
            Sphere::new(Vec3A::new(0.0, 0.0, -5.0), 1.0, grey()).unwrap(),
        ));

        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0));
        let mut rec = HitRecord::default();
        rec.t = 123.0;
        assert!(!world.hit(&r, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert_eq!(rec.t, 123.0);
    }

    // The aggregate hit must agree with testing every sphere on its own and
    // taking the minimum t.
    #[test]
    fn list_hit_matches_minimum_over_members() {
        let mut rng = ChaCha20Rng::seed_from_u64(99);

        for _ in 0..50 {
            let mut world = HittableList::new();
            let mut spheres = Vec::new();
            for _ in 0..8 {
                let center = Vec3A::new(
                    random::random_range(&mut rng, -3.0, 3.0),
                    random::random_range(&mut rng, -3.0, 3.0),
                    random::random_range(&mut rng, -20.0, -5.0),
                );
                let radius = random::random_range(&mut rng, 0.1, 1.5);
                let s = Sphere::new(center, radius, grey()).unwrap();
                spheres.push(s.clone());
                world.add(Box::new(s));
            }

            let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
            let full = Interval::new(0.001, f32::INFINITY);

            let mut best: Option<f32> = None;
            for s in &spheres {
                let mut rec = HitRecord::default();
                if s.hit(&r, full, &mut rec) {
                    best = Some(best.map_or(rec.t, |b: f32| b.min(rec.t)));
                }
            }

            let mut rec = HitRecord::default();
            let hit = world.hit(&r, full, &mut rec);
            match best {
                Some(t) => {
                    assert!(hit);
                    assert!((rec.t - t).abs() < 1e-5);
                }
                None => assert!(!hit),
            }
        }
    }
}
