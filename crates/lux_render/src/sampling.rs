//! Random sampling helpers for scattering and lens simulation.
//!
//! Every helper draws from the caller's generator. Rendering workers each
//! own an independent generator, which keeps samples decorrelated across
//! threads and makes seeded renders reproducible.

use lux_math::Vec3;
use rand::{Rng, RngCore};

/// Generate a uniform f64 in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen()
}

/// Generate a uniform f64 in [min, max).
#[inline]
pub fn gen_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * gen_f64(rng)
}

/// Generate a random unit vector, uniform over the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    // Rejection sample the unit ball, then push the point to the surface
    loop {
        let v = Vec3::new(
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-12 && len_sq < 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Generate a random point inside a sphere of the given radius.
///
/// Returns the zero vector for a non-positive radius, so a fuzz of zero
/// leaves reflections untouched.
pub fn random_in_sphere(rng: &mut dyn RngCore, radius: f64) -> Vec3 {
    if radius <= 0.0 {
        return Vec3::ZERO;
    }
    let radius_sq = radius * radius;
    loop {
        let v = Vec3::new(
            gen_range(rng, -radius, radius),
            gen_range(rng, -radius, radius),
            gen_range(rng, -radius, radius),
        );
        if v.length_squared() < radius_sq {
            return v;
        }
    }
}

/// Generate a random point in the unit disk on the xy plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(gen_range(rng, -1.0, 1.0), gen_range(rng, -1.0, 1.0), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
