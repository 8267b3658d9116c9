//! Math primitives for the lux path tracer.
//!
//! Geometry and shading run in double precision; `Vec3` is glam's f64
//! vector and stands in for points, directions, and colors alike.

// Re-export glam's double-precision vector as the workspace Vec3
pub use glam::DVec3 as Vec3;

mod interval;
mod ray;

pub use interval::Interval;
pub use ray::Ray;
