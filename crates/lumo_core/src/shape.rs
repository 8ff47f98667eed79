//! Geometric shapes in their local coordinate frame.
//!
//! Shapes are immutable after scene load. Ray intersection lives in the
//! tracer crate; this module only owns the geometry.

use lumo_math::Vec3;
use serde::{Deserialize, Serialize};

/// Any shape the tracer can intersect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Plane(Plane),
    Triangle(Triangle),
}

impl From<Plane> for Shape {
    fn from(plane: Plane) -> Self {
        Shape::Plane(plane)
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}

/// The infinite plane `{x : dot(normal, x) = offset}`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPlane")]
pub struct Plane {
    /// Unit normal
    pub normal: Vec3,
    /// Signed distance from the origin along `normal`
    pub offset: f32,
}

#[derive(Deserialize)]
struct RawPlane {
    normal: Vec3,
    #[serde(default)]
    offset: f32,
}

impl From<RawPlane> for Plane {
    fn from(raw: RawPlane) -> Self {
        Plane::new(raw.normal, raw.offset)
    }
}

impl Plane {
    /// Create a plane. The normal is rescaled to unit length together with
    /// the offset, so the point set is unchanged.
    pub fn new(normal: Vec3, offset: f32) -> Self {
        let length = normal.length();
        if length > 0.0 {
            Self {
                normal: normal / length,
                offset: offset / length,
            }
        } else {
            // Degenerate: never hit (every denominator is zero)
            Self {
                normal: Vec3::ZERO,
                offset,
            }
        }
    }
}

/// A triangle with per-vertex normals, interpolated across the face.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTriangle")]
pub struct Triangle {
    /// Vertices, counter-clockwise when seen from the front
    pub positions: [Vec3; 3],
    /// Shading normals at each vertex
    pub normals: [Vec3; 3],
}

#[derive(Deserialize)]
struct RawTriangle {
    positions: [Vec3; 3],
    #[serde(default)]
    normals: Option<[Vec3; 3]>,
}

impl From<RawTriangle> for Triangle {
    fn from(raw: RawTriangle) -> Self {
        match raw.normals {
            Some(normals) => Triangle::new(raw.positions, normals),
            None => {
                let [p0, p1, p2] = raw.positions;
                Triangle::flat(p0, p1, p2)
            }
        }
    }
}

impl Triangle {
    /// Create a triangle from positions and per-vertex normals.
    pub fn new(positions: [Vec3; 3], normals: [Vec3; 3]) -> Self {
        Self { positions, normals }
    }

    /// Create a triangle whose vertex normals all equal the face normal.
    pub fn flat(p0: Vec3, p1: Vec3, p2: Vec3) -> Self {
        let mut triangle = Self::new([p0, p1, p2], [Vec3::ZERO; 3]);
        triangle.normals = [triangle.face_normal(); 3];
        triangle
    }

    /// Geometric face normal (counter-clockwise winding).
    pub fn face_normal(&self) -> Vec3 {
        let [p0, p1, p2] = self.positions;
        (p1 - p0).cross(p2 - p0).normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_normalizes() {
        let plane = Plane::new(Vec3::new(0.0, 2.0, 0.0), 4.0);
        assert_eq!(plane.normal, Vec3::Y);
        assert_eq!(plane.offset, 2.0);
    }

    #[test]
    fn test_plane_json_normalizes() {
        let shape: Shape =
            serde_json::from_str(r#"{ "type": "plane", "normal": [0, 0, 3], "offset": -3 }"#)
                .unwrap();
        assert_eq!(shape, Shape::Plane(Plane::new(Vec3::Z, -1.0)));
    }

    #[test]
    fn test_flat_triangle_normals() {
        let tri = Triangle::flat(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert_eq!(tri.normals, [Vec3::Z; 3]);
        assert_eq!(tri.face_normal(), Vec3::Z);
    }

    #[test]
    fn test_triangle_json_without_normals() {
        let shape: Shape = serde_json::from_str(
            r#"{ "type": "triangle", "positions": [[0,0,0], [1,0,0], [0,1,0]] }"#,
        )
        .unwrap();

        match shape {
            Shape::Triangle(tri) => assert_eq!(tri.normals[1], Vec3::Z),
            other => panic!("expected triangle, got {:?}", other),
        }
    }
}
