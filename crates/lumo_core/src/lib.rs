//! Lumo Core - scene store for the Lumo ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Material`, `Light`, `Shape`, `Transform`
//! - **Scene query**: the `SceneQuery` trait the tracer reads the scene through
//! - **Scene files**: JSON scene descriptions
//! - **Environment**: `CubeMap` textures used as background on ray miss
//!
//! # Example
//!
//! ```ignore
//! use lumo_core::{load_scene_json, SceneQuery};
//!
//! let scene = load_scene_json("scene.json")?;
//! println!("{} tracing objects, {} lights",
//!     scene.tracing_objects().len(),
//!     scene.light_objects().len());
//! ```

pub mod cube_map;
pub mod description;
pub mod error;
pub mod light;
pub mod material;
pub mod scene;
pub mod shape;

// Re-export commonly used types
pub use cube_map::{CubeFace, CubeMap, Texture};
pub use description::{load_scene_json, SceneDescription};
pub use error::{SceneError, SceneResult};
pub use light::Light;
pub use material::{Color, Material};
pub use scene::{
    GroupId, LightObject, MaterialId, ObjectId, Scene, SceneQuery, TracingObject, Transform,
};
pub use shape::{Plane, Shape, Triangle};
