//! Ray representation.
//!
//! A ray is the half-line r(t) = origin + t * direction used for all
//! intersection queries.

use glam::Vec3A;

/// Ray defined by an origin point and a direction vector.
///
/// The direction is not required to be unit length; callers that need a
/// unit direction normalize at the point of use.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    pub origin: Vec3A,

    /// Direction vector of the ray.
    pub direction: Vec3A,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self { origin, direction }
    }

    /// Position along the ray at parameter t: origin + t * direction.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }
}
