//! Cube-map environments.
//!
//! A cube map is six square textures around the origin. Looking one up by
//! direction gives the background seen by rays that leave the scene.

use std::path::Path;

use lumo_math::Vec3;

use crate::error::{SceneError, SceneResult};
use crate::material::Color;

/// A loaded texture with pixel data.
///
/// Stores pixels as RGB floats, 8-bit values divided by 255 with no
/// transfer curve, so a face written back out round-trips unchanged.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Pixel data, row-major order, row 0 at the top
    pub pixels: Vec<Color>,
}

impl Texture {
    /// Create a new texture from pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<Color>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Color) -> Self {
        Self::new(1, 1, vec![color])
    }

    /// Load a texture from an image file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let rgb = image::open(path)?.to_rgb8();
        let (width, height) = rgb.dimensions();

        let pixels = rgb
            .pixels()
            .map(|p| {
                Color::new(
                    p[0] as f32 / 255.0,
                    p[1] as f32 / 255.0,
                    p[2] as f32 / 255.0,
                )
            })
            .collect();

        log::debug!("Loaded texture: {} ({}x{})", path.display(), width, height);
        Ok(Self::new(width, height, pixels))
    }

    /// Nearest-texel lookup. `u` runs left to right, `v` top to bottom,
    /// both in [0, 1]; values outside are clamped to the edge.
    pub fn sample_nearest(&self, u: f32, v: f32) -> Color {
        if self.width == 0 || self.height == 0 {
            return Color::ZERO;
        }
        let x = ((u.clamp(0.0, 1.0) * self.width as f32) as u32).min(self.width - 1);
        let y = ((v.clamp(0.0, 1.0) * self.height as f32) as u32).min(self.height - 1);

        self.pixels
            .get((y * self.width + x) as usize)
            .copied()
            .unwrap_or(Color::ZERO)
    }
}

/// The six faces of a cube map, in storage order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    /// All faces in storage order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// A direction-indexed environment made of six square faces.
#[derive(Clone, Debug)]
pub struct CubeMap {
    faces: [Texture; 6],
}

impl CubeMap {
    /// Create a cube map from faces in `CubeFace::ALL` order.
    ///
    /// Every face must be square and all faces must share one size.
    pub fn new(faces: [Texture; 6]) -> SceneResult<Self> {
        let size = faces[0].width;
        for (face, texture) in CubeFace::ALL.iter().zip(&faces) {
            if texture.width != texture.height {
                return Err(SceneError::InvalidCubeMap(format!(
                    "{:?} face is {}x{}, faces must be square",
                    face, texture.width, texture.height
                )));
            }
            if texture.width != size {
                return Err(SceneError::InvalidCubeMap(format!(
                    "{:?} face is {} pixels wide, expected {}",
                    face, texture.width, size
                )));
            }
            if texture.width == 0 {
                return Err(SceneError::InvalidCubeMap(format!("{:?} face is empty", face)));
            }
        }
        Ok(Self { faces })
    }

    /// Load six face images, given in `CubeFace::ALL` order.
    pub fn load<P: AsRef<Path>>(paths: &[P; 6]) -> SceneResult<Self> {
        let [px, nx, py, ny, pz, nz] = paths;
        let cube_map = Self::new([
            Texture::load(px)?,
            Texture::load(nx)?,
            Texture::load(py)?,
            Texture::load(ny)?,
            Texture::load(pz)?,
            Texture::load(nz)?,
        ])?;
        log::info!("Loaded cube map ({} px faces)", cube_map.face_size());
        Ok(cube_map)
    }

    /// Edge length of each face in pixels.
    pub fn face_size(&self) -> u32 {
        self.faces[0].width
    }

    /// Get one face.
    pub fn face(&self, face: CubeFace) -> &Texture {
        &self.faces[face.index()]
    }

    /// Pick the face a direction points at, and the (u, v) on it.
    ///
    /// Faces are laid out as seen from inside the cube: the four side faces
    /// stand upright with +Y at the top edge, the +Y face has +Z at its top
    /// edge and the -Y face has -Z at its top edge. `v` grows downwards.
    pub fn face_coordinates(direction: Vec3) -> (CubeFace, f32, f32) {
        let abs = direction.abs();
        // (face, right component, down component, major axis length)
        let (face, sc, tc, ma) = if abs.x >= abs.y && abs.x >= abs.z {
            if direction.x > 0.0 {
                (CubeFace::PositiveX, direction.z, -direction.y, abs.x)
            } else {
                (CubeFace::NegativeX, -direction.z, -direction.y, abs.x)
            }
        } else if abs.y >= abs.z {
            if direction.y > 0.0 {
                (CubeFace::PositiveY, direction.x, -direction.z, abs.y)
            } else {
                (CubeFace::NegativeY, direction.x, direction.z, abs.y)
            }
        } else if direction.z > 0.0 {
            (CubeFace::PositiveZ, -direction.x, -direction.y, abs.z)
        } else {
            (CubeFace::NegativeZ, direction.x, -direction.y, abs.z)
        };

        if ma <= 0.0 {
            // Zero direction: look at the middle of +X
            return (CubeFace::PositiveX, 0.5, 0.5);
        }

        let u = 0.5 * (sc / ma + 1.0);
        let v = 0.5 * (tc / ma + 1.0);
        (face, u, v)
    }

    /// Environment color seen along `direction` (need not be unit length).
    pub fn sample(&self, direction: Vec3) -> Color {
        let (face, u, v) = Self::face_coordinates(direction);
        self.face(face).sample_nearest(u, v)
    }
}
