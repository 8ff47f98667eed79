//! Render configuration.

use lumo_core::Color;
use serde::{Deserialize, Serialize};

use crate::bucket::DEFAULT_BUCKET_SIZE;
use crate::camera::{CameraSpec, FisheyeCamera, Projection};
use crate::error::{TracerError, TracerResult};

/// Everything the tracer needs besides the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracerConfig {
    pub camera: CameraSpec,
    pub projection: Projection,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of mirror bounces after the primary hit
    pub max_bounces: u32,
    /// Background color, used when no cube map is attached
    pub background: Color,
    /// Cast shadow rays towards directional and point lights
    pub shadows: bool,
    /// Samples per pixel; 1 shoots through the pixel center
    pub samples: u32,
    /// Barrel strength of the fisheye projection
    pub fisheye_strength: f32,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            camera: CameraSpec::default(),
            projection: Projection::default(),
            width: 200,
            height: 200,
            max_bounces: 0,
            background: Color::ZERO,
            shadows: false,
            samples: 1,
            fisheye_strength: FisheyeCamera::DEFAULT_STRENGTH,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl TracerConfig {
    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> TracerResult<Self> {
        let config: TracerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values that do not depend on the camera frame.
    pub fn validate(&self) -> TracerResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TracerError::InvalidConfig(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        let bytes = (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|pixels| pixels.checked_mul(3));
        if !matches!(bytes, Some(n) if n <= isize::MAX as usize) {
            return Err(TracerError::InvalidConfig(format!(
                "image size {}x{} is too large",
                self.width, self.height
            )));
        }
        if self.samples == 0 {
            return Err(TracerError::InvalidConfig(
                "samples per pixel must be at least 1".to_string(),
            ));
        }
        if self.bucket_size == 0 {
            return Err(TracerError::InvalidConfig(
                "bucket size must be non-zero".to_string(),
            ));
        }
        if !self.background.is_finite() {
            return Err(TracerError::InvalidConfig(
                "background color must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
