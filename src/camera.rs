//! Camera: ray generation and the render loop.

use glam::Vec3A;
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;

use crate::error::ConfigError;
use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::random;
use crate::ray::Ray;

/// RGB color in linear space.
type Color = Vec3A;

/// Parameter below which hits are treated as self-intersection noise.
const SHADOW_ACNE_EPSILON: f32 = 0.001;

/// Pinhole camera with optional defocus blur and multi-sample
/// anti-aliasing.
///
/// Public fields are the configuration; everything else is derived from
/// them by [`Camera::initialize`], recomputed from scratch on every render.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Ratio of image width over height.
    pub aspect_ratio: f32,
    /// Rendered image width in pixels.
    pub image_width: u32,
    /// Number of random samples averaged per pixel.
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces.
    pub max_depth: u32,
    /// Vertical field of view in degrees.
    pub vfov: f32,
    /// Camera position.
    pub lookfrom: Vec3A,
    /// Point the camera looks at.
    pub lookat: Vec3A,
    /// Camera-relative "up" direction.
    pub vup: Vec3A,
    /// Cone angle of ray origin variation per pixel, in degrees; 0 disables
    /// defocus blur.
    pub defocus_angle: f32,
    /// Distance from lookfrom to the plane of perfect focus.
    pub focus_dist: f32,
    /// Base seed for the sampling streams. `None` draws a fresh seed per
    /// render; a fixed seed makes output byte-reproducible.
    pub seed: Option<u64>,

    /// Rendered image height, derived from width and aspect ratio.
    image_height: u32,
    /// 1 / samples_per_pixel, applied to each sample sum.
    pixel_samples_scale: f32,
    /// Camera position (same as lookfrom).
    center: Vec3A,
    /// World position of the center of pixel (0, 0).
    pixel00_loc: Vec3A,
    /// Offset to the next pixel to the right.
    pixel_delta_u: Vec3A,
    /// Offset to the next pixel below.
    pixel_delta_v: Vec3A,
    /// Camera basis vector pointing right.
    u: Vec3A,
    /// Camera basis vector pointing up.
    v: Vec3A,
    /// Camera basis vector opposite the view direction.
    w: Vec3A,
    /// Defocus disk horizontal radius vector.
    defocus_disk_u: Vec3A,
    /// Defocus disk vertical radius vector.
    defocus_disk_v: Vec3A,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Camera with the default configuration: square 100-pixel image,
    /// 10 samples, 10 bounces, 90 degree FOV, no defocus blur.
    pub fn new() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            lookfrom: Vec3A::ZERO,
            lookat: Vec3A::new(0.0, 0.0, -1.0),
            vup: Vec3A::new(0.0, 1.0, 0.0),
            defocus_angle: 0.0,
            focus_dist: 10.0,
            seed: None,
            image_height: 0,
            pixel_samples_scale: 0.0,
            center: Vec3A::ZERO,
            pixel00_loc: Vec3A::ZERO,
            pixel_delta_u: Vec3A::ZERO,
            pixel_delta_v: Vec3A::ZERO,
            u: Vec3A::ZERO,
            v: Vec3A::ZERO,
            w: Vec3A::ZERO,
            defocus_disk_u: Vec3A::ZERO,
            defocus_disk_v: Vec3A::ZERO,
        }
    }

    /// Image height derived by the last [`Camera::initialize`] call.
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Validate the configuration and derive the viewport state.
    ///
    /// A pure function of the public fields: calling it again without
    /// changing the configuration derives identical state.
    pub fn initialize(&mut self) -> Result<(), ConfigError> {
        self.validate()?;

        self.image_height = ((self.image_width as f32 / self.aspect_ratio) as u32).max(1);

        self.pixel_samples_scale = 1.0 / self.samples_per_pixel as f32;

        self.center = self.lookfrom;

        // Viewport dimensions from the field of view and focus distance
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width =
            viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Orthonormal camera frame: w opposes the view direction
        self.w = (self.lookfrom - self.lookat).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Viewport edge vectors; v points down in image space
        let viewport_u = viewport_width * self.u;
        let viewport_v = viewport_height * -self.v;

        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        let viewport_upper_left =
            self.center - (self.focus_dist * self.w) - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        let defocus_radius = self.focus_dist * (self.defocus_angle.to_radians() / 2.0).tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;

        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.image_width == 0 {
            return Err(ConfigError::ZeroImageWidth);
        }
        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            return Err(ConfigError::InvalidAspectRatio(self.aspect_ratio));
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroMaxDepth);
        }
        if !self.vfov.is_finite() || self.vfov <= 0.0 || self.vfov >= 180.0 {
            return Err(ConfigError::InvalidVfov(self.vfov));
        }
        if !self.focus_dist.is_finite() || self.focus_dist <= 0.0 {
            return Err(ConfigError::InvalidFocusDistance(self.focus_dist));
        }
        if !self.defocus_angle.is_finite() || self.defocus_angle < 0.0 {
            return Err(ConfigError::NegativeDefocusAngle(self.defocus_angle));
        }
        Ok(())
    }

    /// Render the scene to a linear f32 RGB buffer.
    ///
    /// Scanlines are traced in parallel, top to bottom. Each scanline draws
    /// from its own ChaCha20 stream derived from the base seed, so a fixed
    /// seed yields identical output regardless of thread scheduling.
    pub fn render(
        &mut self,
        world: &dyn Hittable,
    ) -> Result<ImageBuffer<Rgb<f32>, Vec<f32>>, ConfigError> {
        self.initialize()?;

        let base_seed = self.seed.unwrap_or_else(|| rand::rng().random());
        info!(
            "Rendering {}x{} at {} spp, depth {}, seed {} on {} threads",
            self.image_width,
            self.image_height,
            self.samples_per_pixel,
            self.max_depth,
            base_seed,
            rayon::current_num_threads()
        );
        let render_start = std::time::Instant::now();

        let pb = ProgressBar::new(self.image_height as u64);
        pb.set_style(ProgressStyle::default_bar().template("{bar:40} {pos}/{len} ETA: {eta}").unwrap());

        let rows: Vec<Vec<Color>> = (0..self.image_height)
            .into_par_iter()
            .map(|j| {
                let mut rng = ChaCha20Rng::seed_from_u64(base_seed.wrapping_add(j as u64));
                let row: Vec<Color> = (0..self.image_width)
                    .map(|i| {
                        let mut pixel_color = Color::ZERO;
                        for _sample in 0..self.samples_per_pixel {
                            let r = self.get_ray(i, j, &mut rng);
                            pixel_color += self.ray_color(&r, world, self.max_depth, &mut rng);
                        }
                        pixel_color * self.pixel_samples_scale
                    })
                    .collect();
                pb.inc(1);
                row
            })
            .collect();

        pb.finish();

        let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> =
            ImageBuffer::new(self.image_width, self.image_height);
        for (j, row) in rows.iter().enumerate() {
            for (i, c) in row.iter().enumerate() {
                image.put_pixel(i as u32, j as u32, Rgb([c.x, c.y, c.z]));
            }
        }

        info!("Image rendered in {:.2?}", render_start.elapsed());
        Ok(image)
    }

    /// Ray through pixel (i, j), jittered within the pixel for
    /// anti-aliasing and originating on the defocus disk when defocus blur
    /// is enabled.
    fn get_ray(&self, i: u32, j: u32, rng: &mut impl Rng) -> Ray {
        let offset = self.sample_square(rng);
        let pixel_sample = self.pixel00_loc
            + ((i as f32 + offset.x) * self.pixel_delta_u)
            + ((j as f32 + offset.y) * self.pixel_delta_v);

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };
        let ray_direction = pixel_sample - ray_origin;

        Ray::new(ray_origin, ray_direction)
    }

    /// Random offset in [-0.5, 0.5]^2, the box filter over one pixel.
    fn sample_square(&self, rng: &mut impl Rng) -> Vec3A {
        Vec3A::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5, 0.0)
    }

    /// Random ray origin on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut impl Rng) -> Vec3A {
        let p = random::random_in_unit_disk(rng);
        self.center + (p.x * self.defocus_disk_u) + (p.y * self.defocus_disk_v)
    }

    /// Recursive light transport: follow the ray through scatter events
    /// until it is absorbed, exhausts the bounce budget, or escapes to the
    /// sky.
    fn ray_color(&self, r: &Ray, world: &dyn Hittable, depth: u32, rng: &mut impl Rng) -> Color {
        // Out of bounce budget, no more light is gathered
        if depth == 0 {
            return Color::ZERO;
        }

        let mut rec = HitRecord::default();

        // Lower bound skips self-intersections at t near zero
        if world.hit(r, Interval::new(SHADOW_ACNE_EPSILON, f32::INFINITY), &mut rec) {
            return match rec.material.scatter(r, &rec, rng) {
                Some((attenuation, scattered)) => {
                    attenuation * self.ray_color(&scattered, world, depth - 1, rng)
                }
                None => Color::ZERO,
            };
        }

        // Sky gradient: white at the horizon toward blue at the zenith
        let unit_direction = r.direction.normalize();
        let a = 0.5 * (unit_direction.y + 1.0);
        (1.0 - a) * Color::new(1.0, 1.0, 1.0) + a * Color::new(0.5, 0.7, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::HittableList;
    use crate::material::MaterialType;
    use crate::output;
    use crate::sphere::Sphere;

    #[test]
    fn initialize_derives_height_from_aspect_ratio() {
        let mut cam = Camera::new();
        cam.image_width = 200;
        cam.aspect_ratio = 2.0;
        cam.initialize().unwrap();
        assert_eq!(cam.image_height(), 100);

        // Extreme aspect ratios still produce at least one row
        cam.image_width = 10;
        cam.aspect_ratio = 100.0;
        cam.initialize().unwrap();
        assert_eq!(cam.image_height(), 1);
    }

    #[test]
    fn initialize_is_idempotent() {
        let mut cam = Camera::new();
        cam.aspect_ratio = 16.0 / 9.0;
        cam.image_width = 400;
        cam.vfov = 20.0;
        cam.lookfrom = Vec3A::new(13.0, 2.0, 3.0);
        cam.lookat = Vec3A::ZERO;
        cam.defocus_angle = 0.6;

        cam.initialize().unwrap();
        let first = cam.clone();
        cam.initialize().unwrap();

        assert_eq!(first.u, cam.u);
        assert_eq!(first.v, cam.v);
        assert_eq!(first.w, cam.w);
        assert_eq!(first.pixel00_loc, cam.pixel00_loc);
        assert_eq!(first.pixel_delta_u, cam.pixel_delta_u);
        assert_eq!(first.pixel_delta_v, cam.pixel_delta_v);
        assert_eq!(first.defocus_disk_u, cam.defocus_disk_u);
        assert_eq!(first.image_height, cam.image_height);
    }

    #[test]
    fn camera_basis_is_orthonormal() {
        let mut cam = Camera::new();
        cam.lookfrom = Vec3A::new(13.0, 2.0, 3.0);
        cam.lookat = Vec3A::new(0.0, 0.5, 0.0);
        cam.initialize().unwrap();

        assert!((cam.u.length() - 1.0).abs() < 1e-5);
        assert!((cam.v.length() - 1.0).abs() < 1e-5);
        assert!((cam.w.length() - 1.0).abs() < 1e-5);
        assert!(cam.u.dot(cam.v).abs() < 1e-5);
        assert!(cam.u.dot(cam.w).abs() < 1e-5);
        assert!(cam.v.dot(cam.w).abs() < 1e-5);
    }

    #[test]
    fn validate_rejects_bad_configuration() {
        let mut cam = Camera::new();
        cam.samples_per_pixel = 0;
        assert_eq!(cam.initialize().unwrap_err(), ConfigError::ZeroSamples);

        let mut cam = Camera::new();
        cam.max_depth = 0;
        assert_eq!(cam.initialize().unwrap_err(), ConfigError::ZeroMaxDepth);

        let mut cam = Camera::new();
        cam.image_width = 0;
        assert_eq!(cam.initialize().unwrap_err(), ConfigError::ZeroImageWidth);

        let mut cam = Camera::new();
        cam.aspect_ratio = -1.0;
        assert!(matches!(
            cam.initialize().unwrap_err(),
            ConfigError::InvalidAspectRatio(_)
        ));

        let mut cam = Camera::new();
        cam.vfov = 180.0;
        assert!(matches!(cam.initialize().unwrap_err(), ConfigError::InvalidVfov(_)));

        let mut cam = Camera::new();
        cam.defocus_angle = -0.5;
        assert!(matches!(
            cam.initialize().unwrap_err(),
            ConfigError::NegativeDefocusAngle(_)
        ));
    }

    #[test]
    fn miss_returns_sky_gradient() {
        let mut cam = Camera::new();
        cam.initialize().unwrap();
        let world = HittableList::new();
        let mut rng = ChaCha20Rng::seed_from_u64(0);

        // Straight up: a = 1, pure zenith color
        let up = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0));
        let c = cam.ray_color(&up, &world, 10, &mut rng);
        assert!(c.abs_diff_eq(Vec3A::new(0.5, 0.7, 1.0), 1e-5));

        // Horizontal: a = 0.5, halfway blend
        let level = Ray::new(Vec3A::ZERO, Vec3A::new(1.0, 0.0, 0.0));
        let c = cam.ray_color(&level, &world, 10, &mut rng);
        assert!(c.abs_diff_eq(Vec3A::new(0.75, 0.85, 1.0), 1e-5));
    }

    #[test]
    fn exhausted_depth_returns_black() {
        let mut cam = Camera::new();
        cam.initialize().unwrap();
        let world = HittableList::new();
        let mut rng = ChaCha20Rng::seed_from_u64(0);

        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0));
        assert_eq!(cam.ray_color(&r, &world, 0, &mut rng), Vec3A::ZERO);
    }

    // The single-ground-sphere scenario: a fixed seed must reproduce the
    // PPM byte-for-byte across renders.
    #[test]
    fn seeded_render_is_byte_reproducible() {
        let mut world = HittableList::new();
        world.add(Box::new(
            Sphere::new(
                Vec3A::new(0.0, -1000.0, 0.0),
                1000.0,
                MaterialType::Lambertian {
                    albedo: Vec3A::splat(0.5),
                },
            )
            .unwrap(),
        ));

        let mut cam = Camera::new();
        cam.image_width = 4;
        cam.aspect_ratio = 1.0;
        cam.samples_per_pixel = 2;
        cam.max_depth = 4;
        cam.lookfrom = Vec3A::new(0.0, 1.0, 0.0);
        cam.lookat = Vec3A::new(0.0, 0.0, 0.0);
        cam.vup = Vec3A::new(0.0, 0.0, -1.0);
        cam.seed = Some(42);

        let first = cam.render(&world).unwrap();
        let second = cam.render(&world).unwrap();

        let mut ppm_a = Vec::new();
        let mut ppm_b = Vec::new();
        output::write_ppm(&first, &mut ppm_a).unwrap();
        output::write_ppm(&second, &mut ppm_b).unwrap();
        assert_eq!(ppm_a, ppm_b);
        assert!(!ppm_a.is_empty());
    }

    #[test]
    fn different_seeds_change_the_image() {
        let mut world = HittableList::new();
        world.add(Box::new(
            Sphere::new(
                Vec3A::new(0.0, 0.0, -2.0),
                1.0,
                MaterialType::Lambertian {
                    albedo: Vec3A::splat(0.5),
                },
            )
            .unwrap(),
        ));

        let mut cam = Camera::new();
        cam.image_width = 8;
        cam.samples_per_pixel = 2;
        cam.max_depth = 4;

        cam.seed = Some(1);
        let a = cam.render(&world).unwrap();
        cam.seed = Some(2);
        let b = cam.render(&world).unwrap();
        assert_ne!(a.as_raw(), b.as_raw());
    }
}
