//! Light sources.
//!
//! Lights are plain data. Where a light sits comes from the transform of the
//! object carrying it, so a point light has no position field of its own.

use crate::Color;
use lumo_math::Vec3;
use serde::{Deserialize, Serialize};

/// A light source.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Light {
    /// Flat contribution independent of position and orientation.
    Ambient { color: Color },

    /// Infinitely distant light shining along `direction` (local frame).
    Directional { direction: Vec3, color: Color },

    /// Light at the origin of its local frame, falling off as
    /// `color / (attenuation.x * d^2)`.
    Point {
        color: Color,
        #[serde(default = "default_attenuation")]
        attenuation: Vec3,
    },
}

fn default_attenuation() -> Vec3 {
    Vec3::new(1.0, 0.0, 0.0)
}

impl Light {
    /// Ambient light of the given color.
    pub fn ambient(color: Color) -> Self {
        Light::Ambient { color }
    }

    /// Directional light shining along `direction`.
    pub fn directional(direction: Vec3, color: Color) -> Self {
        Light::Directional { direction, color }
    }

    /// Point light with unit constant attenuation.
    pub fn point(color: Color) -> Self {
        Light::Point {
            color,
            attenuation: default_attenuation(),
        }
    }

    /// Point light with an explicit attenuation vector.
    pub fn point_with_attenuation(color: Color, attenuation: Vec3) -> Self {
        Light::Point { color, attenuation }
    }

    /// The light's color, whatever its kind.
    pub fn color(&self) -> Color {
        match *self {
            Light::Ambient { color }
            | Light::Directional { color, .. }
            | Light::Point { color, .. } => color,
        }
    }

    /// True for ambient lights.
    pub fn is_ambient(&self) -> bool {
        matches!(self, Light::Ambient { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_json_tags() {
        let light: Light =
            serde_json::from_str(r#"{ "type": "point", "color": [1.0, 0.5, 0.25] }"#).unwrap();

        assert_eq!(
            light,
            Light::Point {
                color: Vec3::new(1.0, 0.5, 0.25),
                attenuation: Vec3::new(1.0, 0.0, 0.0),
            }
        );
    }

    #[test]
    fn test_light_unknown_type_rejected() {
        let result: Result<Light, _> =
            serde_json::from_str(r#"{ "type": "spot", "color": [1.0, 1.0, 1.0] }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_light_color() {
        let light = Light::directional(Vec3::NEG_Y, Vec3::ONE);
        assert_eq!(light.color(), Vec3::ONE);
        assert!(!light.is_ambient());
        assert!(Light::ambient(Vec3::ONE).is_ambient());
    }
}
