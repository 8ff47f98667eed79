//! Phong surface materials.

use lumo_math::Vec3;
use serde::{Deserialize, Serialize};

/// Color type alias (linear RGB, nominally 0-1 but never clamped while shading)
pub type Color = Vec3;

/// A Phong material: three reflectance colors and a specular exponent.
///
/// `specular` doubles as the mirror reflectance of recursive bounces.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Reflectance for ambient lights
    pub ambient: Color,

    /// Lambertian reflectance
    pub diffuse: Color,

    /// Highlight and mirror reflectance
    pub specular: Color,

    /// Phong exponent
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Color::splat(0.1),
            diffuse: Color::splat(0.5), // Grey default
            specular: Color::ZERO,
            shininess: 1.0,
        }
    }
}

impl Material {
    /// Create a material with explicit colors.
    pub fn new(ambient: Color, diffuse: Color, specular: Color, shininess: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }

    /// A purely diffuse material, ambient reflectance equal to diffuse.
    pub fn diffuse(color: Color) -> Self {
        Self::new(color, color, Color::ZERO, 1.0)
    }

    /// True if recursive bounces off this material can contribute anything.
    pub fn is_reflective(&self) -> bool {
        self.specular.max_element() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diffuse_material() {
        let m = Material::diffuse(Color::new(0.2, 0.4, 0.6));
        assert_eq!(m.ambient, m.diffuse);
        assert!(!m.is_reflective());
    }

    #[test]
    fn test_material_partial_json() {
        // Missing fields fall back to the defaults
        let m: Material = serde_json::from_str(r#"{ "specular": [1.0, 1.0, 1.0] }"#).unwrap();
        assert_eq!(m.specular, Color::ONE);
        assert_eq!(m.diffuse, Material::default().diffuse);
        assert!(m.is_reflective());
    }
}
