//! Lux renderer - CPU path tracing
//!
//! A Monte Carlo path tracer: camera rays are resolved recursively against
//! a scene of spheres and a registry of scattering materials, and jittered
//! samples are averaged into a linear-light frame.

mod camera;
mod hittable;
mod material;
mod registry;
mod renderer;
mod sampling;
mod scene;
mod sphere;

pub use camera::Camera;
pub use hittable::{HitRecord, Hittable};
pub use material::{Color, Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use registry::{MaterialKind, MaterialRef, MaterialRegistry};
pub use renderer::{
    ray_color, render, render_pixel, render_with_progress, Frame, RenderConfig, RenderError,
};
pub use sampling::{gen_f64, gen_range, random_in_sphere, random_in_unit_disk, random_unit_vector};
pub use scene::Scene;
pub use sphere::Sphere;

/// Re-export the shared math types from lux_math
pub use lux_math::{Interval, Ray, Vec3};
