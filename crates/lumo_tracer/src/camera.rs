//! Cameras for primary ray generation.
//!
//! Both projections map a point on the normalized image plane
//! `[-1, 1] x [-1, 1]` (x right, y up) to a world-space ray from the camera
//! center.

use std::str::FromStr;

use lumo_math::{Ray, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{TracerError, TracerResult};

/// Camera placement as written in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSpec {
    /// Eye position
    pub center: Vec3,
    /// View direction (any length)
    pub direction: Vec3,
    /// Up vector (any length)
    pub up: Vec3,
    /// Field of view in degrees
    pub fov: f32,
}

impl Default for CameraSpec {
    fn default() -> Self {
        Self {
            center: Vec3::new(0.0, 0.0, 5.0),
            direction: Vec3::NEG_Z,
            up: Vec3::Y,
            fov: 45.0,
        }
    }
}

/// Camera projection model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "lowercase")]
pub enum Projection {
    #[default]
    Perspective,
    Fisheye,
}

impl FromStr for Projection {
    type Err = TracerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "perspective" => Ok(Projection::Perspective),
            "fisheye" => Ok(Projection::Fisheye),
            _ => Err(TracerError::UnknownProjection(s.to_string())),
        }
    }
}

impl TryFrom<String> for Projection {
    type Error = TracerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Orthonormal-ish camera frame shared by every projection.
#[derive(Debug, Clone, Copy)]
struct CameraFrame {
    center: Vec3,
    direction: Vec3,
    up: Vec3,
    horizontal: Vec3,
    fov_radians: f32,
}

impl CameraFrame {
    fn new(spec: &CameraSpec) -> TracerResult<Self> {
        if !(spec.fov > 0.0 && spec.fov < 180.0) {
            return Err(TracerError::InvalidConfig(format!(
                "field of view must be in (0, 180) degrees, got {}",
                spec.fov
            )));
        }

        let direction = spec.direction.normalize_or_zero();
        let up = spec.up.normalize_or_zero();
        let horizontal = direction.cross(up).normalize_or_zero();
        if horizontal == Vec3::ZERO || !spec.center.is_finite() {
            return Err(TracerError::InvalidConfig(
                "camera direction and up must be finite, non-zero and not parallel".to_string(),
            ));
        }

        Ok(Self {
            center: spec.center,
            direction,
            up,
            horizontal,
            fov_radians: spec.fov.to_radians(),
        })
    }
}

/// Pinhole camera: rays diverge linearly across the image plane.
#[derive(Debug, Clone, Copy)]
pub struct PerspectiveCamera {
    frame: CameraFrame,
    /// Distance to the image plane giving the requested field of view
    focal_distance: f32,
}

impl PerspectiveCamera {
    fn new(frame: CameraFrame) -> Self {
        Self {
            frame,
            focal_distance: 1.0 / (frame.fov_radians / 2.0).tan(),
        }
    }

    fn generate_ray(&self, point: Vec2) -> Ray {
        let f = &self.frame;
        let direction = self.focal_distance * f.direction + point.x * f.horizontal + point.y * f.up;
        Ray::new(f.center, direction.normalize())
    }
}

/// Fisheye camera: angular deflection grows with distance from the image
/// center.
///
/// This is an angular approximation, not a model of a physical lens; it is
/// not rectilinear and straight lines bend away from the center.
#[derive(Debug, Clone, Copy)]
pub struct FisheyeCamera {
    frame: CameraFrame,
    strength: f32,
}

impl FisheyeCamera {
    /// Default deflection strength.
    pub const DEFAULT_STRENGTH: f32 = 3.0;

    fn new(frame: CameraFrame, strength: f32) -> Self {
        Self { frame, strength }
    }

    fn generate_ray(&self, point: Vec2) -> Ray {
        let f = &self.frame;
        let r = point.length();
        let theta = r * f.fov_radians * self.strength;

        // Azimuth is undefined at the center
        let phi = if r > 1e-6 { point.y.atan2(point.x) } else { 0.0 };

        let (sin_theta, cos_theta) = theta.sin_cos();
        let (sin_phi, cos_phi) = phi.sin_cos();
        let direction =
            cos_theta * f.direction + sin_theta * (cos_phi * f.horizontal + sin_phi * f.up);

        Ray::new(f.center, direction.normalize_or_zero())
    }
}

/// Camera for generating primary rays.
#[derive(Debug, Clone, Copy)]
pub enum Camera {
    Perspective(PerspectiveCamera),
    Fisheye(FisheyeCamera),
}

impl Camera {
    /// Build a camera; fails on a degenerate frame or field of view.
    pub fn new(spec: &CameraSpec, projection: Projection, fisheye_strength: f32) -> TracerResult<Self> {
        let frame = CameraFrame::new(spec)?;
        Ok(match projection {
            Projection::Perspective => Camera::Perspective(PerspectiveCamera::new(frame)),
            Projection::Fisheye => {
                if !fisheye_strength.is_finite() {
                    return Err(TracerError::InvalidConfig(format!(
                        "fisheye strength must be finite, got {}",
                        fisheye_strength
                    )));
                }
                Camera::Fisheye(FisheyeCamera::new(frame, fisheye_strength))
            }
        })
    }

    /// Ray through a point of the normalized image plane.
    pub fn generate_ray(&self, point: Vec2) -> Ray {
        match self {
            Camera::Perspective(camera) => camera.generate_ray(point),
            Camera::Fisheye(camera) => camera.generate_ray(point),
        }
    }

    /// Minimum ray parameter accepted for primary rays.
    pub fn t_min(&self) -> f32 {
        0.0
    }

    /// Which projection this camera uses.
    pub fn projection(&self) -> Projection {
        match self {
            Camera::Perspective(_) => Projection::Perspective,
            Camera::Fisheye(_) => Projection::Fisheye,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(fov: f32) -> CameraSpec {
        CameraSpec {
            center: Vec3::ZERO,
            direction: Vec3::new(0.0, 0.0, -2.0),
            up: Vec3::new(0.0, 3.0, 0.0),
            fov,
        }
    }

    #[test]
    fn test_perspective_center_ray() {
        let camera = Camera::new(&spec(60.0), Projection::Perspective, 1.0).unwrap();
        let ray = camera.generate_ray(Vec2::ZERO);

        assert_eq!(ray.origin(), Vec3::ZERO);
        assert!((ray.direction() - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_perspective_corner_ray() {
        // 90 degrees: the image plane sits at distance 1
        let camera = Camera::new(&spec(90.0), Projection::Perspective, 1.0).unwrap();
        let ray = camera.generate_ray(Vec2::new(1.0, 1.0));

        let expected = Vec3::new(1.0, 1.0, -1.0).normalize();
        assert!((ray.direction() - expected).length() < 1e-5);
    }

    #[test]
    fn test_perspective_edge_angle_matches_fov() {
        let camera = Camera::new(&spec(60.0), Projection::Perspective, 1.0).unwrap();
        let ray = camera.generate_ray(Vec2::new(1.0, 0.0));

        let angle = ray.direction().angle_between(Vec3::NEG_Z);
        assert!((angle - 30.0_f32.to_radians()).abs() < 1e-4);
    }

    #[test]
    fn test_fisheye_center_ray() {
        let camera = Camera::new(&spec(60.0), Projection::Fisheye, 3.0).unwrap();
        let ray = camera.generate_ray(Vec2::ZERO);

        assert!(ray.direction().is_finite());
        assert!((ray.direction() - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_fisheye_deflection() {
        let camera = Camera::new(&spec(30.0), Projection::Fisheye, 1.0).unwrap();

        // theta = r * fov * strength = 0.5 * 30 degrees
        let ray = camera.generate_ray(Vec2::new(0.5, 0.0));
        let angle = ray.direction().angle_between(Vec3::NEG_Z);
        assert!((angle - 15.0_f32.to_radians()).abs() < 1e-4);
        assert!(ray.direction().x > 0.0);

        // Straight up on the image plane bends towards +Y
        let ray = camera.generate_ray(Vec2::new(0.0, 0.5));
        assert!(ray.direction().y > 0.0);
        assert!(ray.direction().x.abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_frame_rejected() {
        let mut bad = spec(60.0);
        bad.up = Vec3::new(0.0, 0.0, 1.0);
        assert!(matches!(
            Camera::new(&bad, Projection::Perspective, 1.0),
            Err(TracerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_invalid_fov_rejected() {
        assert!(Camera::new(&spec(0.0), Projection::Perspective, 1.0).is_err());
        assert!(Camera::new(&spec(180.0), Projection::Fisheye, 1.0).is_err());
        assert!(Camera::new(&spec(f32::NAN), Projection::Perspective, 1.0).is_err());
    }

    #[test]
    fn test_projection_parse() {
        assert_eq!("perspective".parse::<Projection>().unwrap(), Projection::Perspective);
        assert_eq!("FishEye".parse::<Projection>().unwrap(), Projection::Fisheye);
        assert!(matches!(
            "orthographic".parse::<Projection>(),
            Err(TracerError::UnknownProjection(name)) if name == "orthographic"
        ));
    }

    #[test]
    fn test_projection_json() {
        let projection: Projection = serde_json::from_str(r#""fisheye""#).unwrap();
        assert_eq!(projection, Projection::Fisheye);

        let result: Result<Projection, _> = serde_json::from_str(r#""panoramic""#);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("panoramic"));
    }
}
