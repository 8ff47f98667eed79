//! Ray-triangle intersection.
//!
//! Uses the Möller-Trumbore algorithm. Triangles are single-sided: a ray
//! arriving at the back face (clockwise winding as seen by the ray) misses.

use crate::hittable::{HitRecord, Intersect};
use lumo_core::Triangle;
use lumo_math::Ray;

/// Smallest determinant accepted; also culls back faces.
const DET_EPSILON: f32 = 1e-8;

impl Intersect for Triangle {
    /// Möller-Trumbore ray-triangle intersection algorithm.
    fn intersect(&self, ray: &Ray, t_min: f32, record: &mut HitRecord) -> bool {
        let [p0, p1, p2] = self.positions;
        let edge1 = p1 - p0;
        let edge2 = p2 - p0;

        let h = ray.direction().cross(edge2);
        let det = edge1.dot(h);

        // Parallel, degenerate, or seen from behind
        if det < DET_EPSILON {
            return false;
        }

        let f = 1.0 / det;
        let s = ray.origin() - p0;
        let u = f * s.dot(h);

        // Check if intersection is outside triangle (u parameter)
        if !(0.0..=1.0).contains(&u) {
            return false;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction().dot(q);

        // Check if intersection is outside triangle (v parameter)
        if v < 0.0 || u + v > 1.0 {
            return false;
        }

        let t = f * edge2.dot(q);
        if t < t_min {
            return false;
        }

        // Phong normal: barycentric blend of the vertex normals
        let [n0, n1, n2] = self.normals;
        record.time = t;
        record.normal = ((1.0 - u - v) * n0 + u * n1 + v * n2).normalize_or_zero();
        true
    }
}
