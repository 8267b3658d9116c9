//! Heterogeneous material storage and dispatch.
//!
//! Materials of different kinds live in homogeneous per-kind collections.
//! A compact (kind, slot) pair names one material, and dispatch is a match
//! on the kind discriminant, so no per-ray boxing or vtable is involved.

use crate::hittable::HitRecord;
use crate::material::{Dielectric, Lambertian, Material, Metal, ScatterResult};
use lux_math::Ray;
use rand::RngCore;

/// Discriminant naming one of the declared material kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    Lambertian,
    Metal,
    Dielectric,
}

/// Handle to a material in a [`MaterialRegistry`].
///
/// A handle stays valid for the registry's lifetime; the collections are
/// append-only, so later insertions never invalidate it. Handles must come
/// from the registry's insert methods, a hand-built handle may index out of
/// bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialRef {
    /// Which kind's collection holds the material
    pub kind: MaterialKind,
    /// Index within that collection
    pub slot: u32,
}

/// Append-only storage for every material of a scene.
#[derive(Debug, Clone, Default)]
pub struct MaterialRegistry {
    lambertians: Vec<Lambertian>,
    metals: Vec<Metal>,
    dielectrics: Vec<Dielectric>,
}

impl MaterialRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a diffuse material and return its handle.
    pub fn add_lambertian(&mut self, material: Lambertian) -> MaterialRef {
        self.lambertians.push(material);
        MaterialRef {
            kind: MaterialKind::Lambertian,
            slot: (self.lambertians.len() - 1) as u32,
        }
    }

    /// Insert a metal material and return its handle.
    pub fn add_metal(&mut self, material: Metal) -> MaterialRef {
        self.metals.push(material);
        MaterialRef {
            kind: MaterialKind::Metal,
            slot: (self.metals.len() - 1) as u32,
        }
    }

    /// Insert a dielectric material and return its handle.
    pub fn add_dielectric(&mut self, material: Dielectric) -> MaterialRef {
        self.dielectrics.push(material);
        MaterialRef {
            kind: MaterialKind::Dielectric,
            slot: (self.dielectrics.len() - 1) as u32,
        }
    }

    /// Scatter `ray` at `rec` using the material the hit record points at.
    ///
    /// Routes by the handle's kind, indexes that kind's collection at the
    /// handle's slot, and returns exactly what the material returns.
    pub fn scatter(
        &self,
        ray: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let slot = rec.material.slot as usize;
        match rec.material.kind {
            MaterialKind::Lambertian => self.lambertians[slot].scatter(ray, rec, rng),
            MaterialKind::Metal => self.metals[slot].scatter(ray, rec, rng),
            MaterialKind::Dielectric => self.dielectrics[slot].scatter(ray, rec, rng),
        }
    }

    /// Total number of materials across all kinds.
    pub fn len(&self) -> usize {
        self.lambertians.len() + self.metals.len() + self.dielectrics.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
