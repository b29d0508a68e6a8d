use clap::Parser;
use glam::Vec3A;
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

mod cli;

use cli::Args;
use raypath::camera::Camera;
use raypath::error::ConfigError;
use raypath::hittable::HittableList;
use raypath::logger::init_logger;
use raypath::material::MaterialType;
use raypath::output::save_image_as_ppm;
use raypath::random;
use raypath::sphere::Sphere;

/// Build the showcase scene: a grey ground sphere, three large feature
/// spheres and a field of small randomized ones.
fn create_scene(rng: &mut impl Rng) -> Result<HittableList, ConfigError> {
    let mut world = HittableList::new();

    let ground_material = MaterialType::Lambertian {
        albedo: Vec3A::new(0.5, 0.5, 0.5),
    };
    world.add(Box::new(Sphere::new(
        Vec3A::new(0.0, -1000.0, 0.0),
        1000.0,
        ground_material,
    )?));

    // Field of small spheres with randomized placement and materials
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = rng.random::<f32>();
            let center = Vec3A::new(
                a as f32 + 0.9 * rng.random::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.random::<f32>(),
            );

            // Keep clear of the metal feature sphere
            if (center - Vec3A::new(4.0, 0.2, 0.0)).length() > 0.9 {
                let sphere_material = if choose_mat < 0.8 {
                    let albedo = random::random_color(rng) * random::random_color(rng);
                    MaterialType::Lambertian { albedo }
                } else if choose_mat < 0.95 {
                    let albedo = random::random_color_range(rng, 0.5, 1.0);
                    let fuzz = random::random_range(rng, 0.0, 0.5);
                    MaterialType::Metal { albedo, fuzz }
                } else {
                    MaterialType::Dielectric {
                        refraction_index: 1.5,
                    }
                };

                world.add(Box::new(Sphere::new(center, 0.2, sphere_material)?));
            }
        }
    }

    // Three large feature spheres: glass, matte and polished metal
    let material1 = MaterialType::Dielectric {
        refraction_index: 1.5,
    };
    world.add(Box::new(Sphere::new(Vec3A::new(0.0, 1.0, 0.0), 1.0, material1)?));

    let material2 = MaterialType::Lambertian {
        albedo: Vec3A::new(0.4, 0.2, 0.1),
    };
    world.add(Box::new(Sphere::new(Vec3A::new(-4.0, 1.0, 0.0), 1.0, material2)?));

    let material3 = MaterialType::Metal {
        albedo: Vec3A::new(0.7, 0.6, 0.5),
        fuzz: 0.0,
    };
    world.add(Box::new(Sphere::new(Vec3A::new(4.0, 1.0, 0.0), 1.0, material3)?));

    Ok(world)
}

/// Camera for the showcase shot, with CLI overrides applied.
fn create_camera(args: &Args) -> Camera {
    let mut camera = Camera::new();
    camera.aspect_ratio = args.aspect_ratio;
    camera.image_width = args.width;
    camera.samples_per_pixel = args.samples_per_pixel;
    camera.max_depth = args.max_depth;
    camera.seed = args.seed;
    camera.vfov = 20.0;
    camera.lookfrom = Vec3A::new(13.0, 2.0, 3.0);
    camera.lookat = Vec3A::new(0.0, 0.0, 0.0);
    camera.vup = Vec3A::new(0.0, 1.0, 0.0);
    camera.defocus_angle = 0.6;
    camera.focus_dist = 10.0;
    camera
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    info!("raypath - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));
    info!(
        "Image resolution: {}x{:.0}, samples per pixel: {}",
        args.width,
        args.width as f32 / args.aspect_ratio,
        args.samples_per_pixel
    );

    // One generator for scene layout; the camera derives its own sampling
    // streams from the same seed
    let mut scene_rng = match args.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_rng(&mut rand::rng()),
    };

    let world = create_scene(&mut scene_rng)?;
    let mut camera = create_camera(&args);

    let image = camera.render(&world)?;

    save_image_as_ppm(&image, &args.output)?;

    Ok(())
}
