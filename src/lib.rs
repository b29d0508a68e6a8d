//! raypath offline ray tracer
//!
//! Renders scenes of spheres with Lambertian, metallic and dielectric
//! materials to a plain-text PPM (P3) pixel stream, with multi-sample
//! anti-aliasing and optional defocus blur.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod ray;
pub mod sphere;
pub mod hittable;
pub mod interval;
pub mod camera;
pub mod random;
pub mod material;
pub mod output;
pub mod error;
pub mod logger;
