//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray resolution with a fixed depth cutoff
//! - Anti-aliasing via jittered multi-sampling
//! - Row-parallel rendering, one private generator per row

use crate::hittable::Hittable;
use crate::sampling::gen_f64;
use crate::{Camera, Color, MaterialRegistry, Scene};
use log::debug;
use lux_math::{Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use thiserror::Error;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Base seed for the per-row generators; None draws from entropy
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 1000,
            max_depth: 100,
            seed: None,
        }
    }
}

/// Rejected render invocations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// Coordinate normalization divides by `width - 1` and `height - 1`
    #[error("resolution {width}x{height} is too small, both dimensions must be at least 2")]
    ResolutionTooSmall { width: u32, height: u32 },
    /// Averaging divides by the sample count
    #[error("samples per pixel must be at least 1")]
    ZeroSamples,
}

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It traces the ray through the
/// scene, scattering off surfaces and multiplying attenuations until the
/// ray escapes to the sky, is absorbed, or runs out of depth.
pub fn ray_color(
    ray: &Ray,
    scene: &Scene,
    materials: &MaterialRegistry,
    depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    // Depth exhausted: cut the path off with no light
    if depth == 0 {
        return Color::ZERO;
    }

    // The lower bound skips self-intersections at the ray's own origin
    match scene.hit(ray, Interval::new(0.001, f64::INFINITY)) {
        Some(rec) => match materials.scatter(ray, &rec, rng) {
            Some(scatter) => {
                scatter.attenuation * ray_color(&scatter.scattered, scene, materials, depth - 1, rng)
            }
            // Ray was absorbed
            None => Color::ZERO,
        },
        None => sky_gradient(ray),
    }
}

/// Background gradient: white at the horizon blending to sky blue above.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    Color::ONE.lerp(Color::new(0.5, 0.7, 1.0), a)
}

/// Render a single pixel with jittered multi-sampling.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    materials: &MaterialRegistry,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let h = (x as f64 + gen_f64(rng)) / (width - 1) as f64;
        let v = ((height - y) as f64 + gen_f64(rng)) / (height - 1) as f64;
        let ray = camera.get_ray(h, v, rng);
        pixel_color += ray_color(&ray, scene, materials, config.max_depth, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f64
}

/// Linear-light pixel buffer, row-major, top row first.
///
/// Gamma correction happens in the output writers, not here.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl Frame {
    /// Create a new frame filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }
}

/// Render the scene into a frame.
pub fn render(
    scene: &Scene,
    materials: &MaterialRegistry,
    camera: &Camera,
    width: u32,
    height: u32,
    config: &RenderConfig,
) -> Result<Frame, RenderError> {
    render_with_progress(scene, materials, camera, width, height, config, |_| {})
}

/// Render the scene, reporting each finished row to `on_row`.
///
/// Rows render in parallel and every row owns an independent generator, so
/// a fixed seed reproduces the image bit for bit regardless of how rayon
/// schedules the rows.
pub fn render_with_progress<F>(
    scene: &Scene,
    materials: &MaterialRegistry,
    camera: &Camera,
    width: u32,
    height: u32,
    config: &RenderConfig,
    on_row: F,
) -> Result<Frame, RenderError>
where
    F: Fn(u32) + Sync,
{
    if width < 2 || height < 2 {
        return Err(RenderError::ResolutionTooSmall { width, height });
    }
    if config.samples_per_pixel == 0 {
        return Err(RenderError::ZeroSamples);
    }

    debug!(
        "rendering {}x{} at {} samples per pixel, depth {}",
        width, height, config.samples_per_pixel, config.max_depth
    );

    let mut frame = Frame::new(width, height);
    frame
        .pixels
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let mut rng = row_rng(config.seed, y as u64);
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = render_pixel(
                    camera,
                    scene,
                    materials,
                    x as u32,
                    y as u32,
                    width,
                    height,
                    config,
                    &mut rng,
                );
            }
            on_row(y as u32);
        });

    Ok(frame)
}

/// One generator per row keeps workers decorrelated and seeded renders
/// reproducible.
fn row_rng(seed: Option<u64>, row: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(row)),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Dielectric, Lambertian, Metal};
    use crate::sphere::Sphere;
    use lux_math::Vec3;

    fn empty_world() -> (Scene, MaterialRegistry) {
        (Scene::new(), MaterialRegistry::new())
    }

    /// Solve the gradient formula backward: every sky pixel lies on the
    /// white-to-blue line, with the same parameter on every channel.
    fn assert_on_sky_gradient(color: Color) {
        assert_eq!(color.z, 1.0);
        let t_r = (1.0 - color.x) / 0.5;
        let t_g = (1.0 - color.y) / 0.3;
        assert!((t_r - t_g).abs() < 1e-9);
        assert!((-1e-9..=1.0 + 1e-9).contains(&t_r));
    }

    #[test]
    fn test_sky_gradient_endpoints() {
        let (scene, materials) = empty_world();
        let mut rng = StdRng::seed_from_u64(42);

        let up = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        let color = ray_color(&up, &scene, &materials, 5, &mut rng);
        assert!((color - Color::new(0.5, 0.7, 1.0)).length() < 1e-12);

        let down = Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0));
        let color = ray_color(&down, &scene, &materials, 5, &mut rng);
        assert!((color - Color::ONE).length() < 1e-12);
    }

    #[test]
    fn test_depth_zero_is_black() {
        let (scene, materials) = empty_world();
        let mut rng = StdRng::seed_from_u64(42);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(ray_color(&ray, &scene, &materials, 0, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_empty_scene_renders_the_background() {
        // 2x2, one sample, depth 1: no hit ever occurs, so the cutoff
        // never triggers and every pixel is an unattenuated sky sample
        let (scene, materials) = empty_world();
        let camera = Camera::new(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
            90.0,
            1.0,
            0.0,
            1.0,
        );
        let config = RenderConfig {
            samples_per_pixel: 1,
            max_depth: 1,
            seed: Some(42),
        };

        let frame = render(&scene, &materials, &camera, 2, 2, &config).unwrap();
        assert_eq!(frame.pixels.len(), 4);
        for pixel in &frame.pixels {
            assert_on_sky_gradient(*pixel);
        }
    }

    #[test]
    fn test_ground_sphere_never_occludes_the_sky() {
        // Camera pointing straight up with the ground far below: every
        // ray escapes and every pixel follows the gradient formula
        let mut scene = Scene::new();
        let mut materials = MaterialRegistry::new();
        let ground = materials.add_lambertian(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
        scene.push_sphere(Sphere::new(Vec3::new(0.0, -1000.5, 0.0), 1000.0, ground));

        let camera = Camera::new(
            Vec3::ZERO,
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            40.0,
            1.0,
            0.0,
            1.0,
        );
        let config = RenderConfig {
            samples_per_pixel: 2,
            max_depth: 10,
            seed: Some(7),
        };

        let frame = render(&scene, &materials, &camera, 4, 4, &config).unwrap();
        for pixel in &frame.pixels {
            assert_on_sky_gradient(*pixel);
        }
    }

    #[test]
    fn test_full_pipeline_produces_finite_colors() {
        let mut scene = Scene::new();
        let mut materials = MaterialRegistry::new();

        let ground = materials.add_lambertian(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
        let center = materials.add_lambertian(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
        let left = materials.add_dielectric(Dielectric::new(1.5));
        let right = materials.add_metal(Metal::new(Color::new(0.8, 0.6, 0.2), 0.3));

        scene.push_sphere(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, ground));
        scene.push_sphere(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, center));
        scene.push_sphere(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, left));
        scene.push_sphere(Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, right));

        let camera = Camera::new(
            Vec3::new(-2.0, 2.0, 1.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
            20.0,
            4.0 / 3.0,
            0.0,
            3.4,
        );
        let config = RenderConfig {
            samples_per_pixel: 4,
            max_depth: 8,
            seed: Some(42),
        };

        let frame = render(&scene, &materials, &camera, 8, 6, &config).unwrap();
        assert_eq!(frame.pixels.len(), 48);
        for pixel in &frame.pixels {
            for channel in [pixel.x, pixel.y, pixel.z] {
                assert!(channel.is_finite());
                assert!(channel >= 0.0);
            }
        }
    }

    #[test]
    fn test_seeded_render_is_reproducible() {
        let mut scene = Scene::new();
        let mut materials = MaterialRegistry::new();
        let gray = materials.add_lambertian(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
        scene.push_sphere(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, gray));

        let camera = Camera::new(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
            90.0,
            1.0,
            0.0,
            1.0,
        );
        let config = RenderConfig {
            samples_per_pixel: 4,
            max_depth: 5,
            seed: Some(42),
        };

        let first = render(&scene, &materials, &camera, 6, 6, &config).unwrap();
        let second = render(&scene, &materials, &camera, 6, 6, &config).unwrap();
        assert_eq!(first.pixels, second.pixels);
    }

    #[test]
    fn test_rejects_degenerate_resolution() {
        let (scene, materials) = empty_world();
        let camera = Camera::new(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
            90.0,
            1.0,
            0.0,
            1.0,
        );
        let config = RenderConfig {
            samples_per_pixel: 1,
            max_depth: 1,
            seed: None,
        };

        let err = render(&scene, &materials, &camera, 1, 2, &config).unwrap_err();
        assert_eq!(err, RenderError::ResolutionTooSmall { width: 1, height: 2 });

        let err = render(&scene, &materials, &camera, 2, 0, &config).unwrap_err();
        assert_eq!(err, RenderError::ResolutionTooSmall { width: 2, height: 0 });
    }

    #[test]
    fn test_rejects_zero_samples() {
        let (scene, materials) = empty_world();
        let camera = Camera::new(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
            90.0,
            1.0,
            0.0,
            1.0,
        );
        let config = RenderConfig {
            samples_per_pixel: 0,
            max_depth: 1,
            seed: None,
        };

        let err = render(&scene, &materials, &camera, 2, 2, &config).unwrap_err();
        assert_eq!(err, RenderError::ZeroSamples);
    }

    #[test]
    fn test_frame_is_row_major() {
        let mut frame = Frame::new(3, 2);
        // Second row, third column
        frame.pixels[5] = Color::new(1.0, 0.0, 0.0);
        assert_eq!(frame.get(2, 1), Color::new(1.0, 0.0, 0.0));
    }
}
