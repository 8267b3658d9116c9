//! Camera for ray generation.

use crate::sampling::random_in_unit_disk;
use lux_math::{Ray, Vec3};
use rand::RngCore;

/// Thin-lens camera mapping normalized image coordinates to world rays.
///
/// Immutable once constructed; every field is derived in [`Camera::new`].
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Vec3,
    lower_left: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    lens_radius: f64,
}

impl Camera {
    /// Build a camera from its viewing parameters.
    ///
    /// - `vfov`: vertical field of view in degrees
    /// - `aperture`: lens diameter; 0 disables depth-of-field blur
    /// - `focus_dist`: distance to the plane of perfect focus
    pub fn new(
        look_from: Vec3,
        look_at: Vec3,
        vup: Vec3,
        vfov: f64,
        aspect_ratio: f64,
        aperture: f64,
        focus_dist: f64,
    ) -> Self {
        let theta = vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect_ratio * viewport_height;

        // Orthonormal basis: w points from look_at toward the eye
        let w = (look_from - look_at).normalize();
        let u = vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = look_from;
        let horizontal = focus_dist * viewport_width * u;
        let vertical = focus_dist * viewport_height * v;
        let lower_left = origin - horizontal / 2.0 - vertical / 2.0 - focus_dist * w;

        Self {
            origin,
            lower_left,
            horizontal,
            vertical,
            u,
            v,
            lens_radius: aperture / 2.0,
        }
    }

    /// Generate a ray through normalized image coordinates `(h, v)`.
    ///
    /// Jittered coordinates may overshoot [0, 1] slightly near the edges;
    /// the mapping stays well defined. The ray origin is offset within the
    /// lens disk, which blurs everything off the focus plane.
    pub fn get_ray(&self, h: f64, v: f64, rng: &mut dyn RngCore) -> Ray {
        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;

        Ray::new(
            self.origin + offset,
            self.lower_left + h * self.horizontal + v * self.vertical - self.origin - offset,
        )
    }

    /// The camera's eye position.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }
}
