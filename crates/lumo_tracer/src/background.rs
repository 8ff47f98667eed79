//! What rays see when they leave the scene.

use std::sync::Arc;

use lumo_core::{Color, CubeMap};
use lumo_math::Vec3;

/// Background lookup on ray miss.
#[derive(Debug, Clone)]
pub enum Background {
    /// The same color in every direction
    Solid(Color),
    /// Direction-indexed cube map
    Environment(Arc<CubeMap>),
}

impl Background {
    /// Color seen along `direction`.
    pub fn color(&self, direction: Vec3) -> Color {
        match self {
            Background::Solid(color) => *color,
            Background::Environment(cube_map) => cube_map.sample(direction),
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::Solid(Color::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumo_core::Texture;

    #[test]
    fn test_solid_background() {
        let background = Background::Solid(Color::new(0.1, 0.2, 0.3));
        assert_eq!(background.color(Vec3::X), Color::new(0.1, 0.2, 0.3));
        assert_eq!(background.color(Vec3::NEG_Y), Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_environment_background() {
        let faces = std::array::from_fn(|i| Texture::solid_color(Color::splat(i as f32 / 10.0)));
        let background = Background::Environment(Arc::new(CubeMap::new(faces).unwrap()));

        // +Z is the fifth face
        assert!((background.color(Vec3::Z) - Color::splat(0.4)).length() < 1e-6);
        assert!((background.color(Vec3::NEG_X) - Color::splat(0.1)).length() < 1e-6);
    }
}
