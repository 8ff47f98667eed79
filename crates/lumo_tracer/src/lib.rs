//! Lumo Tracer - CPU recursive ray tracing
//!
//! A Whitted-style ray tracer: nearest-hit search by linear scan, Phong
//! shading per light with optional shadow rays, fixed-depth mirror bounces,
//! and jittered multi-sampling. Buckets of pixels render in parallel.

mod background;
mod bucket;
mod camera;
mod config;
mod error;
mod hittable;
mod illuminator;
mod image_buffer;
mod plane;
mod scene_view;
mod tracer;
mod triangle;

pub use background::Background;
pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, CameraSpec, FisheyeCamera, PerspectiveCamera, Projection};
pub use config::TracerConfig;
pub use error::{TracerError, TracerResult};
pub use hittable::{HitRecord, Intersect};
pub use illuminator::{illuminate, Illumination};
pub use image_buffer::{color_to_rgb, ImageBuffer};
pub use scene_view::{SceneView, ViewLight, ViewObject};
pub use tracer::{Tracer, ERROR_COLOR, HIT_EPSILON};

/// Re-export the scene and math types the tracer API is expressed in
pub use lumo_core::{Color, CubeMap, Light, Material, Plane, Scene, SceneQuery, Shape, Triangle};
pub use lumo_math::{Interval, Mat4, Ray, Vec2, Vec3};
