use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use lux_math::Vec3;
use lux_render::{
    render_with_progress, Camera, Color, Dielectric, Lambertian, MaterialRegistry, Metal,
    RenderConfig, Scene, Sphere,
};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

mod cli;
mod output;

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.clone().into())
        .init();

    info!(
        "Image resolution: {}x{}, samples per pixel: {}",
        args.width, args.height, args.samples_per_pixel
    );

    let mut scene_rng: StdRng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (scene, materials) = build_cover_scene(&mut scene_rng);
    info!(
        "Scene holds {} spheres and {} materials",
        scene.len(),
        materials.len()
    );

    let camera = Camera::new(
        Vec3::new(13.0, 2.0, 3.0),
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        20.0,
        args.width as f64 / args.height as f64,
        0.1,
        10.0,
    );

    let config = RenderConfig {
        samples_per_pixel: args.samples_per_pixel,
        max_depth: args.max_depth,
        seed: args.seed,
    };

    info!("Rendering on {} CPU cores...", rayon::current_num_threads());
    let start = Instant::now();
    let progress = ProgressBar::new(args.height as u64);
    progress.set_style(ProgressStyle::default_bar().template("{bar:40} {pos}/{len} ETA: {eta}")?);

    let frame = render_with_progress(
        &scene,
        &materials,
        &camera,
        args.width,
        args.height,
        &config,
        |_| progress.inc(1),
    )?;

    progress.finish();
    info!("Image generated in {:.2?}", start.elapsed());

    let path = Path::new(&args.output);
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("png") => output::save_png(&frame, path)?,
        _ => output::save_ppm(&frame, path)?,
    }

    Ok(())
}

/// Build the cover scene: a gray ground sphere, a jittered grid of small
/// random spheres, and three large feature spheres.
fn build_cover_scene(rng: &mut dyn RngCore) -> (Scene, MaterialRegistry) {
    let mut scene = Scene::new();
    let mut materials = MaterialRegistry::new();

    let ground = materials.add_lambertian(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
    scene.push_sphere(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f64 = rng.gen();
            let center = Vec3::new(
                a as f64 + 0.7 * rng.gen::<f64>(),
                0.2,
                b as f64 + 0.7 * rng.gen::<f64>(),
            );

            // Keep the grid clear of the large metal sphere
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                let albedo = random_color(rng) * random_color(rng);
                materials.add_lambertian(Lambertian::new(albedo))
            } else if choose_mat < 0.95 {
                let albedo = random_color_range(rng, 0.5, 1.0);
                let fuzz = rng.gen_range(0.0..0.5);
                materials.add_metal(Metal::new(albedo, fuzz))
            } else {
                materials.add_dielectric(Dielectric::new(1.5))
            };

            scene.push_sphere(Sphere::new(center, 0.2, material));
        }
    }

    let glass = materials.add_dielectric(Dielectric::new(1.5));
    scene.push_sphere(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, glass));

    let matte = materials.add_lambertian(Lambertian::new(Color::new(0.4, 0.2, 0.1)));
    scene.push_sphere(Sphere::new(Vec3::new(-4.0, 1.0, 0.0), 1.0, matte));

    let polished = materials.add_metal(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0));
    scene.push_sphere(Sphere::new(Vec3::new(4.0, 1.0, 0.0), 1.0, polished));

    (scene, materials)
}

fn random_color(rng: &mut dyn RngCore) -> Color {
    Color::new(rng.gen(), rng.gen(), rng.gen())
}

fn random_color_range(rng: &mut dyn RngCore, min: f64, max: f64) -> Color {
    Color::new(
        rng.gen_range(min..max),
        rng.gen_range(min..max),
        rng.gen_range(min..max),
    )
}
