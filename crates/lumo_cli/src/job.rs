//! Render job files.
//!
//! A job bundles the render settings, the scene and an optional cube map:
//!
//! ```json
//! {
//!   "render": { "width": 320, "height": 240, "max_bounces": 2 },
//!   "scene": { "objects": [], "lights": [] },
//!   "cube_map": ["px.png", "nx.png", "py.png", "ny.png", "pz.png", "nz.png"]
//! }
//! ```
//!
//! Cube map paths are relative to the job file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use lumo_core::{CubeMap, Scene, SceneDescription};
use lumo_tracer::{Tracer, TracerConfig};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Job {
    pub render: TracerConfig,
    pub scene: SceneDescription,
    /// Faces in +X, -X, +Y, -Y, +Z, -Z order
    pub cube_map: Option<[PathBuf; 6]>,
}

impl Job {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse job")
    }

    /// Read a job file and make its cube map paths absolute.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job file {}", path.display()))?;
        let mut job = Self::from_json_str(&text)
            .with_context(|| format!("Invalid job file {}", path.display()))?;

        if job.scene.name.is_empty() {
            if let Some(stem) = path.file_stem() {
                job.scene.name = stem.to_string_lossy().into_owned();
            }
        }

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        if let Some(faces) = job.cube_map.as_mut() {
            for face in faces.iter_mut() {
                if face.is_relative() {
                    *face = base.join(&*face);
                }
            }
        }

        Ok(job)
    }

    /// Build the scene and a tracer ready to render it.
    pub fn prepare(self) -> Result<(Scene, Tracer)> {
        let scene = self.scene.build().context("Failed to build scene")?;
        log::info!(
            "Scene '{}': {} objects, {} lights",
            scene.name,
            scene.object_count(),
            scene.light_count()
        );

        let mut tracer = Tracer::new(self.render).context("Invalid render settings")?;
        if let Some(faces) = &self.cube_map {
            let cube_map = CubeMap::load(faces).context("Failed to load cube map")?;
            tracer = tracer.with_cube_map(Arc::new(cube_map));
        }

        Ok((scene, tracer))
    }
}
