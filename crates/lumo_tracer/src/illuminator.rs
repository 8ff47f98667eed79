//! Light evaluation at a surface point.
//!
//! Directional and point lights are reduced to the same triple: which way
//! the light is, how much arrives, and how far away it is. Ambient lights
//! have no direction and are handled by the shading loop instead.

use lumo_core::{Color, Light};
use lumo_math::{Mat4, Vec3};

/// Light arriving at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Illumination {
    /// Unit vector from the point towards the light
    pub dir_to_light: Vec3,
    /// Incident intensity
    pub intensity: Color,
    /// Distance to the light; infinite for directional lights
    pub distance: f32,
}

/// Evaluate `light`, placed by `local_to_world`, at world position `hit_pos`.
///
/// Returns `None` for ambient lights and for configurations that would
/// produce non-finite values (a point light sitting on the surface, a zero
/// direction, a non-positive constant attenuation).
pub fn illuminate(light: &Light, local_to_world: &Mat4, hit_pos: Vec3) -> Option<Illumination> {
    match *light {
        Light::Ambient { .. } => None,
        Light::Directional { direction, color } => {
            let direction = local_to_world.transform_vector3(direction).normalize_or_zero();
            if direction == Vec3::ZERO {
                return None;
            }
            Some(Illumination {
                dir_to_light: -direction,
                intensity: color,
                distance: f32::INFINITY,
            })
        }
        Light::Point { color, attenuation } => {
            let light_pos = local_to_world.transform_point3(Vec3::ZERO);
            let to_light = light_pos - hit_pos;
            let distance = to_light.length();

            // L = I / (alpha * d^2), alpha being the constant attenuation term
            let falloff = attenuation.x * distance * distance;
            if distance <= 0.0 || !(falloff > 0.0 && falloff.is_finite()) {
                return None;
            }

            Some(Illumination {
                dir_to_light: to_light / distance,
                intensity: color / falloff,
                distance,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directional_light() {
        let light = Light::directional(Vec3::new(0.0, -2.0, 0.0), Color::new(0.5, 0.6, 0.7));
        let illum = illuminate(&light, &Mat4::IDENTITY, Vec3::new(3.0, 0.0, 1.0)).unwrap();

        assert!((illum.dir_to_light - Vec3::Y).length() < 1e-6);
        assert_eq!(illum.intensity, Color::new(0.5, 0.6, 0.7));
        assert_eq!(illum.distance, f32::INFINITY);
    }

    #[test]
    fn test_directional_light_follows_rotation() {
        use std::f32::consts::FRAC_PI_2;

        // Pointing down -Y, rotated a quarter turn about Z to point along +X
        let light = Light::directional(Vec3::NEG_Y, Color::ONE);
        let illum = illuminate(&light, &Mat4::from_rotation_z(FRAC_PI_2), Vec3::ZERO).unwrap();

        assert!((illum.dir_to_light - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_point_light_inverse_square() {
        let light = Light::point(Color::splat(4.0));
        let placement = Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0));
        let illum = illuminate(&light, &placement, Vec3::ZERO).unwrap();

        assert!((illum.dir_to_light - Vec3::Y).length() < 1e-6);
        assert!((illum.distance - 2.0).abs() < 1e-6);
        assert!((illum.intensity - Color::ONE).length() < 1e-6);
    }

    #[test]
    fn test_point_light_attenuation_constant() {
        let light = Light::point_with_attenuation(Color::splat(4.0), Vec3::new(2.0, 0.0, 0.0));
        let placement = Mat4::from_translation(Vec3::new(0.0, 0.0, 2.0));
        let illum = illuminate(&light, &placement, Vec3::ZERO).unwrap();

        assert!((illum.intensity - Color::splat(0.5)).length() < 1e-6);
    }

    #[test]
    fn test_point_light_at_hit_point() {
        let light = Light::point(Color::ONE);
        assert!(illuminate(&light, &Mat4::IDENTITY, Vec3::ZERO).is_none());
    }

    #[test]
    fn test_point_light_zero_attenuation() {
        let light = Light::point_with_attenuation(Color::ONE, Vec3::ZERO);
        let placement = Mat4::from_translation(Vec3::Y);
        assert!(illuminate(&light, &placement, Vec3::ZERO).is_none());
    }

    #[test]
    fn test_ambient_not_evaluated() {
        let light = Light::ambient(Color::ONE);
        assert!(illuminate(&light, &Mat4::IDENTITY, Vec3::ZERO).is_none());
    }
}
