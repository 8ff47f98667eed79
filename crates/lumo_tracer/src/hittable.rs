//! Intersect trait and HitRecord for ray-object intersection.

use lumo_core::Shape;
use lumo_math::{Ray, Vec3};

/// Record of a ray-object intersection.
///
/// Which object was hit is tracked by the caller, not stored here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Parameter t where the intersection occurs; +infinity means no hit
    pub time: f32,
    /// Surface normal, in the frame the intersection test ran in
    pub normal: Vec3,
}

impl HitRecord {
    /// A record holding no hit.
    pub fn new() -> Self {
        Self {
            time: f32::INFINITY,
            normal: Vec3::ZERO,
        }
    }
}

impl Default for HitRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for shapes that can be hit by rays.
pub trait Intersect {
    /// Test a ray (in the shape's local frame) for an intersection at
    /// `t >= t_min`.
    ///
    /// On a hit, writes `time` and the local-frame `normal` into `record`
    /// and returns true. On a miss the record is left untouched.
    fn intersect(&self, ray: &Ray, t_min: f32, record: &mut HitRecord) -> bool;
}

impl Intersect for Shape {
    fn intersect(&self, ray: &Ray, t_min: f32, record: &mut HitRecord) -> bool {
        match self {
            Shape::Plane(plane) => plane.intersect(ray, t_min, record),
            Shape::Triangle(triangle) => triangle.intersect(ray, t_min, record),
        }
    }
}
