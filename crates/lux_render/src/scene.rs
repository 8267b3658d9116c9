//! Scene aggregate answering nearest-hit queries.

use crate::hittable::{HitRecord, Hittable};
use crate::sphere::Sphere;
use lux_math::{Interval, Ray};

/// All primitives of a scene, one homogeneous collection per kind.
///
/// Spheres are the only declared primitive kind. Primitives are appended
/// while the scene is built and treated as read-only during rendering.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    spheres: Vec<Sphere>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sphere to the scene.
    pub fn push_sphere(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    /// Remove every primitive from the scene.
    pub fn clear(&mut self) {
        self.spheres.clear();
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;
        let mut closest_so_far = ray_t.max;

        for sphere in &self.spheres {
            if let Some(rec) = sphere.hit(ray, Interval::new(ray_t.min, closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{MaterialKind, MaterialRef};
    use lux_math::Vec3;

    fn material(slot: u32) -> MaterialRef {
        MaterialRef {
            kind: MaterialKind::Lambertian,
            slot,
        }
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = Scene::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(scene.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn test_nearest_hit_wins() {
        let mut scene = Scene::new();
        scene.push_sphere(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 0.5, material(0)));
        scene.push_sphere(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5, material(1)));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = scene.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();

        assert!((rec.t - 1.5).abs() < 1e-9);
        assert_eq!(rec.material, material(1));
    }

    #[test]
    fn test_nearest_hit_invariant_under_reordering() {
        let spheres = [
            Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5, material(0)),
            Sphere::new(Vec3::new(0.0, 0.0, -4.0), 0.5, material(1)),
            Sphere::new(Vec3::new(0.0, 0.0, -8.0), 0.5, material(2)),
        ];
        let orders: [[usize; 3]; 3] = [[0, 1, 2], [2, 1, 0], [1, 0, 2]];

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let mut results = Vec::new();
        for order in orders {
            let mut scene = Scene::new();
            for i in order {
                scene.push_sphere(spheres[i]);
            }
            let rec = scene.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
            results.push((rec.t, rec.position));
        }

        for (t, position) in &results[1..] {
            assert!((t - results[0].0).abs() < 1e-12);
            assert!((*position - results[0].1).length() < 1e-12);
        }
    }

    #[test]
    fn test_clear_empties_the_scene() {
        let mut scene = Scene::new();
        scene.push_sphere(Sphere::new(Vec3::ZERO, 1.0, material(0)));
        assert_eq!(scene.len(), 1);

        scene.clear();
        assert!(scene.is_empty());
    }
}
