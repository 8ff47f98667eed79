//! Ray-plane intersection (closed-form).

use crate::hittable::{HitRecord, Intersect};
use lumo_core::Plane;
use lumo_math::Ray;

impl Intersect for Plane {
    /// Solve `dot(origin + t * dir, n) = d` for t.
    ///
    /// Planes are two-sided; the recorded normal is always the plane's own.
    fn intersect(&self, ray: &Ray, t_min: f32, record: &mut HitRecord) -> bool {
        let denom = ray.direction().dot(self.normal);

        // Ray is parallel to plane
        if denom == 0.0 {
            return false;
        }

        let t = (self.offset - ray.origin().dot(self.normal)) / denom;

        // Behind the minimum distance (NaN from degenerate planes lands here too)
        if t.is_nan() || t < t_min {
            return false;
        }

        record.time = t;
        record.normal = self.normal;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumo_math::Vec3;

    #[test]
    fn test_ray_plane_perpendicular() {
        let plane = Plane::new(Vec3::Y, 0.0);
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));

        let mut rec = HitRecord::new();
        assert!(plane.intersect(&ray, 0.001, &mut rec));
        assert!((rec.time - 5.0).abs() < 1e-6);
        assert_eq!(rec.normal, Vec3::Y);
    }

    #[test]
    fn test_ray_plane_offset() {
        let plane = Plane::new(Vec3::Y, 2.0);
        let ray = Ray::new(Vec3::new(3.0, 5.0, 4.0), Vec3::new(0.0, -2.0, 0.0));

        let mut rec = HitRecord::new();
        assert!(plane.intersect(&ray, 0.001, &mut rec));
        // Unnormalized direction: 3 units away at speed 2
        assert!((rec.time - 1.5).abs() < 1e-6);
        assert!((ray.at(rec.time) - Vec3::new(3.0, 2.0, 4.0)).length() < 1e-5);
    }

    #[test]
    fn test_ray_plane_parallel() {
        let plane = Plane::new(Vec3::Y, 0.0);
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::X);

        let mut rec = HitRecord::new();
        assert!(!plane.intersect(&ray, 0.001, &mut rec));
        assert_eq!(rec, HitRecord::new());
    }

    #[test]
    fn test_ray_plane_behind() {
        let plane = Plane::new(Vec3::Y, 0.0);
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);

        let mut rec = HitRecord::new();
        assert!(!plane.intersect(&ray, 0.001, &mut rec));
        assert_eq!(rec, HitRecord::new());
    }

    #[test]
    fn test_ray_plane_from_below() {
        let plane = Plane::new(Vec3::Y, 0.0);
        let ray = Ray::new(Vec3::new(0.0, -2.0, 0.0), Vec3::Y);

        let mut rec = HitRecord::new();
        assert!(plane.intersect(&ray, 0.001, &mut rec));
        assert!((rec.time - 2.0).abs() < 1e-6);
        assert_eq!(rec.normal, Vec3::Y);
    }

    #[test]
    fn test_ray_plane_rejects_self_intersection() {
        let plane = Plane::new(Vec3::Y, 0.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, -1.0, 0.0));

        let mut rec = HitRecord::new();
        assert!(!plane.intersect(&ray, 0.001, &mut rec));
    }

    #[test]
    fn test_degenerate_plane_never_hits() {
        let plane = Plane::new(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);

        let mut rec = HitRecord::new();
        assert!(!plane.intersect(&ray, 0.001, &mut rec));
    }
}
