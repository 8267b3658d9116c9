//! Sphere primitive for ray tracing.

use crate::hittable::{HitRecord, Hittable};
use crate::registry::MaterialRef;
use lux_math::{Interval, Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
    material: MaterialRef,
}

impl Sphere {
    /// Create a new sphere. Negative radius values are clamped to 0.
    pub fn new(center: Vec3, radius: f64, material: MaterialRef) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    /// The sphere's center point.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// The sphere's radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let position = ray.at(root);
        let outward_normal = (position - self.center) / self.radius;

        let mut rec = HitRecord {
            position,
            normal: outward_normal,
            material: self.material,
            t: root,
            front_face: true,
        };
        rec.set_face_normal(ray, outward_normal);

        Some(rec)
    }
}
