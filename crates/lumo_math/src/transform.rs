// Transform utilities for Mat4
//
// Extends glam::Mat4 with the local/world conversions the tracer needs.
// glam::Mat4 already provides transform_point3(), transform_vector3() and inverse().

use crate::Ray;
use glam::{Mat3, Mat4, Vec3};

/// Extension trait for Mat4 to provide ray tracing transform utilities
pub trait Mat4Ext {
    /// Transform a ray: the origin as a point (w=1), the direction as a
    /// vector (w=0). The direction is not renormalized so hit parameters
    /// stay comparable across frames.
    fn transform_ray(&self, ray: &Ray) -> Ray;

    /// Inverse-transpose of the upper-left 3x3 block.
    ///
    /// Normals must be carried through this matrix rather than the matrix
    /// itself, otherwise non-uniform scale skews them off the surface.
    fn normal_matrix(&self) -> Mat3;
}

impl Mat4Ext for Mat4 {
    fn transform_ray(&self, ray: &Ray) -> Ray {
        Ray::new(
            self.transform_point3(ray.origin),
            self.transform_vector3(ray.direction),
        )
    }

    fn normal_matrix(&self) -> Mat3 {
        Mat3::from_mat4(*self).inverse().transpose()
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}
